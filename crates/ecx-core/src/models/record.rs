//! Transaction records extracted from encumbrance certificates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extraction::rules::dates::parse_registration_date;
use crate::translation::TranslationResult;

/// A single registered transaction.
///
/// Every field is optional: extraction is best-effort and a field that no
/// rule matched stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Serial number of the entry in the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_no: Option<String>,

    /// Registration date as printed (DD-MMM-YYYY).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Calendar date parsed from `date`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,

    /// Document number with registration year (e.g. 1234/2013).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_no: Option<String>,

    /// Consideration value in whole rupees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,

    /// Government-assessed market value in whole rupees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_value: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_extent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_no: Option<String>,

    /// Plot or house number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_no: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,

    /// Executant (transferor).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,

    /// Claimant (transferee).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,

    /// Nature of the transaction (sale deed, mortgage, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nature: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
}

/// Fields a rule can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    SerialNo,
    Date,
    DocumentNo,
    Value,
    MarketValue,
    PropertyExtent,
    SurveyNo,
    HouseNo,
    Village,
    Seller,
    Buyer,
    Nature,
    PropertyType,
}

impl Field {
    /// Name used in reports and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SerialNo => "serialNo",
            Self::Date => "date",
            Self::DocumentNo => "documentNo",
            Self::Value => "value",
            Self::MarketValue => "marketValue",
            Self::PropertyExtent => "propertyExtent",
            Self::SurveyNo => "surveyNo",
            Self::HouseNo => "houseNo",
            Self::Village => "village",
            Self::Seller => "seller",
            Self::Buyer => "buyer",
            Self::Nature => "nature",
            Self::PropertyType => "propertyType",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A value produced by a field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Amount(u64),
}

impl TransactionRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a rule value in the slot for `field`.
    ///
    /// Amounts landing in a text slot are rendered as decimal strings and
    /// text landing in an amount slot is ignored.
    pub fn set(&mut self, field: Field, value: FieldValue) {
        let text = match &value {
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::Amount(n) => n.to_string(),
        };
        let amount = match value {
            FieldValue::Amount(n) => Some(n),
            FieldValue::Text(_) => None,
        };

        match field {
            Field::SerialNo => self.serial_no = Some(text),
            Field::Date => {
                self.transaction_date = parse_registration_date(&text);
                self.date = Some(text);
            }
            Field::DocumentNo => self.document_no = Some(text),
            Field::Value => self.value = amount,
            Field::MarketValue => self.market_value = amount,
            Field::PropertyExtent => self.property_extent = Some(text),
            Field::SurveyNo => self.survey_no = Some(text),
            Field::HouseNo => self.house_no = Some(text),
            Field::Village => self.village = Some(text),
            Field::Seller => self.seller = Some(text),
            Field::Buyer => self.buyer = Some(text),
            Field::Nature => self.nature = Some(text),
            Field::PropertyType => self.property_type = Some(text),
        }
    }

    /// Number of populated fields. The derived `transaction_date` is not counted.
    pub fn populated_fields(&self) -> usize {
        [
            self.serial_no.is_some(),
            self.date.is_some(),
            self.document_no.is_some(),
            self.value.is_some(),
            self.market_value.is_some(),
            self.property_extent.is_some(),
            self.survey_no.is_some(),
            self.house_no.is_some(),
            self.village.is_some(),
            self.seller.is_some(),
            self.buyer.is_some(),
            self.nature.is_some(),
            self.property_type.is_some(),
        ]
        .iter()
        .filter(|populated| **populated)
        .count()
    }

    /// Registration date as a calendar date.
    pub fn transaction_date(&self) -> Option<NaiveDate> {
        self.transaction_date
            .or_else(|| self.date.as_deref().and_then(parse_registration_date))
    }

    /// Mutable access to a party name slot.
    pub fn party_mut(&mut self, party: PartyField) -> &mut Option<String> {
        match party {
            PartyField::Buyer => &mut self.buyer,
            PartyField::Seller => &mut self.seller,
        }
    }
}

/// The two fields subject to translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyField {
    Buyer,
    Seller,
}

impl PartyField {
    /// Translation order within a record.
    pub const ALL: [PartyField; 2] = [PartyField::Buyer, PartyField::Seller];
}

/// Translation applied to one party field of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTranslation {
    /// Index of the record in `ProcessedDocument::records`.
    pub record_index: usize,
    pub field: PartyField,
    pub result: TranslationResult,
}

/// Output of the document pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocument {
    /// Records in source order.
    pub records: Vec<TransactionRecord>,
    /// Number of party fields that contained Tamil text.
    pub tamil_fragment_count: usize,
    pub translations: Vec<FieldTranslation>,
    /// Absorbed extraction and translation problems.
    pub warnings: Vec<String>,
    /// Processing stopped early; `records` holds only the completed prefix.
    pub cancelled: bool,
}

impl ProcessedDocument {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_date_derives_calendar_date() {
        let mut record = TransactionRecord::new();
        record.set(Field::Date, FieldValue::Text("06-Feb-2013".to_string()));

        assert_eq!(record.date.as_deref(), Some("06-Feb-2013"));
        assert_eq!(
            record.transaction_date(),
            NaiveDate::from_ymd_opt(2013, 2, 6)
        );
    }

    #[test]
    fn test_populated_fields_ignores_derived_date() {
        let mut record = TransactionRecord::new();
        assert_eq!(record.populated_fields(), 0);

        record.set(Field::SerialNo, FieldValue::Text("1".to_string()));
        record.set(Field::Date, FieldValue::Text("06-Feb-2013".to_string()));
        record.set(Field::Value, FieldValue::Amount(12345));

        assert_eq!(record.populated_fields(), 3);
    }

    #[test]
    fn test_text_in_amount_slot_is_ignored() {
        let mut record = TransactionRecord::new();
        record.set(Field::Value, FieldValue::Text("twelve".to_string()));
        assert_eq!(record.value, None);
    }

    #[test]
    fn test_json_uses_camel_case_and_skips_empty() {
        let mut record = TransactionRecord::new();
        record.set(Field::DocumentNo, FieldValue::Text("1234/2013".to_string()));
        record.set(Field::MarketValue, FieldValue::Amount(500000));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["documentNo"], "1234/2013");
        assert_eq!(json["marketValue"], 500000);
        assert!(json.get("buyer").is_none());
    }
}
