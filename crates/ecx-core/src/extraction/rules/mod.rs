//! Rule-based field extraction for encumbrance certificate entries.
//!
//! Each field is described by a [`FieldRule`]: the field it fills, the
//! pattern whose first capture group holds the raw value, and a
//! post-processing step. Rules are independent and applied in table order.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{format_rupee_amount, parse_rupee_amount};
pub use dates::{month_from_abbreviation, parse_registration_date};

use regex::Regex;

use crate::models::record::{Field, FieldValue};
use crate::text::normalize_name;
use patterns::*;

/// Turns a captured string into a field value.
///
/// `Ok(None)` means the capture held nothing usable and the field stays
/// unset; `Err` is reported as a partial extraction failure.
pub type PostProcess = fn(&str) -> Result<Option<FieldValue>, String>;

/// One entry of the extraction table.
#[derive(Clone)]
pub struct FieldRule {
    pub field: Field,
    pub pattern: Regex,
    pub post: PostProcess,
}

impl FieldRule {
    pub fn new(field: Field, pattern: &Regex, post: PostProcess) -> Self {
        Self {
            field,
            pattern: pattern.clone(),
            post,
        }
    }

    /// Apply the rule to a block. Only the first match is considered.
    pub fn apply(&self, block: &str) -> Option<Result<Option<FieldValue>, String>> {
        let caps = self.pattern.captures(block)?;
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        Some((self.post)(raw))
    }
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Trimmed free text; blank captures leave the field unset.
pub fn text_value(raw: &str) -> Result<Option<FieldValue>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(FieldValue::Text(trimmed.to_string())))
    }
}

/// Rupee amount with thousands separators removed.
pub fn amount_value(raw: &str) -> Result<Option<FieldValue>, String> {
    parse_rupee_amount(raw).map(|n| Some(FieldValue::Amount(n)))
}

/// Party name passed through [`normalize_name`].
pub fn name_value(raw: &str) -> Result<Option<FieldValue>, String> {
    text_value(&normalize_name(raw))
}

/// The built-in rule table, in extraction order.
pub fn default_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new(Field::SerialNo, &SERIAL_NO, text_value),
        FieldRule::new(Field::Date, &REGISTRATION_DATE, text_value),
        FieldRule::new(Field::DocumentNo, &DOCUMENT_NO, text_value),
        FieldRule::new(Field::Value, &RUPEE_AMOUNT, amount_value),
        FieldRule::new(Field::MarketValue, &MARKET_VALUE, amount_value),
        FieldRule::new(Field::PropertyExtent, &PROPERTY_EXTENT, text_value),
        FieldRule::new(Field::SurveyNo, &SURVEY_NO, text_value),
        FieldRule::new(Field::HouseNo, &PLOT_NO, text_value),
        FieldRule::new(Field::Village, &VILLAGE, text_value),
        FieldRule::new(Field::Seller, &EXECUTANT, name_value),
        FieldRule::new(Field::Buyer, &CLAIMANT, name_value),
        FieldRule::new(Field::Nature, &NATURE, text_value),
        FieldRule::new(Field::PropertyType, &PROPERTY_TYPE, text_value),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_for(field: Field) -> FieldRule {
        default_rules()
            .into_iter()
            .find(|r| r.field == field)
            .unwrap()
    }

    #[test]
    fn test_value_rule_strips_separators() {
        let rule = rule_for(Field::Value);
        let result = rule.apply("Consideration: ரூ. 12,345/- paid").unwrap();
        assert_eq!(result, Ok(Some(FieldValue::Amount(12345))));
    }

    #[test]
    fn test_market_value_requires_label() {
        let rule = rule_for(Field::MarketValue);
        assert!(rule.apply("ரூ. 12,345/-").is_none());

        let result = rule
            .apply("Market Value (சந்தை மதிப்பு): ரூ. 4,50,000/-")
            .unwrap();
        assert_eq!(result, Ok(Some(FieldValue::Amount(450000))));
    }

    #[test]
    fn test_unparseable_amount_is_error() {
        let rule = rule_for(Field::Value);
        assert!(rule.apply("ரூ. ,,/-").unwrap().is_err());
    }

    #[test]
    fn test_first_match_wins() {
        let rule = rule_for(Field::Date);
        let result = rule.apply("06-Feb-2013 and 07-Mar-2014").unwrap();
        assert_eq!(
            result,
            Ok(Some(FieldValue::Text("06-Feb-2013".to_string())))
        );
    }

    #[test]
    fn test_name_rule_normalizes() {
        let rule = rule_for(Field::Buyer);
        let result = rule
            .apply("Name of Claimant(s) (எழுதி வாங்குபவர்): 1. ரவி (மகன்)\n")
            .unwrap();
        assert_eq!(result, Ok(Some(FieldValue::Text("ரவி".to_string()))));
    }

    #[test]
    fn test_blank_name_leaves_field_unset() {
        let rule = rule_for(Field::Seller);
        let result = rule.apply("Name of Executant(s): (deceased)\n").unwrap();
        assert_eq!(result, Ok(None));
    }
}
