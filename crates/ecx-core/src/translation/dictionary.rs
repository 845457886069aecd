//! Static Tamil to English lookup table used when the remote service is unavailable.

use serde::{Deserialize, Serialize};

use crate::error::{EcxError, Result};

/// Ordered list of literal (Tamil, English) replacements.
///
/// Entries are applied in order, so longer names must precede any entry
/// that is a substring of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: Vec<(String, String)>,
}

const DEFAULT_TAMIL_ENTRIES: &[(&str, &str)] = &[
    // Initials
    ("ஏ..", "A."),
    ("வி..", "V."),
    ("கு..", "K."),
    ("பா..", "P."),
    ("ஜி..", "G."),
    ("எம்..", "M."),
    ("பெ..", "P."),
    ("எஸ்..", "S."),
    ("கா..", "K."),
    ("டி..", "D."),
    ("வீ..", "V."),
    ("சி..", "C."),
    ("து..", "T."),
    // Personal names
    ("செல்வமுத்துகுமாரசாமி", "Selvamuthukumarasamy"),
    ("கோபாலசுந்தரம்", "Gopalasundaram"),
    ("அருணகிரி", "Arunagiri"),
    ("நித்யா", "Nithya"),
    ("சசிகலா", "Sasikala"),
    ("ஆனந்த்", "Anand"),
    ("ஏழுமலை", "Ezhumalai"),
    ("வேல்முருகன்", "Velmurugan"),
    ("அல்லி", "Alli"),
    ("சண்முகம்", "Shanmugam"),
    ("கருணாகரன்", "Karunakaran"),
    ("சேதுராமன்", "Sethuraman"),
    ("சுவாமிநாதன்", "Swaminathan"),
    ("சித்ரா", "Chitra"),
    ("ரவி", "Ravi"),
    ("நாராயணன்", "Narayanan"),
    ("இளங்கோவன்", "Ilangovan"),
    ("சுமித்ரா", "Sumitra"),
    ("சாரங்கம்", "Sarangam"),
    ("வீரமணி", "Veeramani"),
    ("பாலகணபதி", "Balaganapathi"),
    ("பாலகுரு", "Balakuru"),
    ("முருகதாஸ்", "Murugadas"),
    ("ஜனார்த்தனன்", "Janardanan"),
    ("விக்னேஷ்வர்", "Vigneshwar"),
    ("மாதேஷ்", "Mahesh"),
    ("கஸ்தூரி", "Kasturi"),
    ("சிவாச்சரன்", "Sivacharan"),
    ("பிரேம்", "Prem"),
    ("ரூப்ஜான்", "Roopjan"),
    ("செந்தில்குமார்", "Senthilkumar"),
    ("கலியன்", "Kaliyan"),
    ("வள்ளி", "Valli"),
    ("முகமதுரஃபி", "Muhammadurafi"),
    ("ராஜேஷ்", "Rajesh"),
    ("ஆறுமுகம்", "Arumugam"),
    // Places
    ("திருவெண்ணைநல்லூர்", "Thiruvennainallur"),
    // Domain terms
    ("விற்பனையாளர்", "Seller"),
    ("வாங்குபவர்", "Buyer"),
    ("ஆவணம் எண்", "Document No"),
    ("சர்வே எண்", "Survey No"),
    ("வீட்டு எண்", "House No"),
    ("தேதி", "Date"),
    ("மதிப்பு", "Value"),
    ("கிரையம்", "Sale"),
    ("மனை", "Plot"),
    ("சதுரமீட்டர்", "Square Meter"),
    ("சதுரடி", "Square Feet"),
];

impl Dictionary {
    /// Create a dictionary from ordered pairs.
    pub fn new<I, S, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .filter(|(from, _)| !from.is_empty())
                .collect(),
        }
    }

    /// The built-in table of names, places and registration terms.
    pub fn default_tamil() -> Self {
        Self::new(DEFAULT_TAMIL_ENTRIES.iter().copied())
    }

    /// Load a table from a JSON array of `[tamil, english]` pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<(String, String)> = serde_json::from_str(json)
            .map_err(|e| EcxError::Config(format!("invalid dictionary: {}", e)))?;
        Ok(Self::new(entries))
    }

    /// Load a table from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every occurrence of every entry, in table order.
    ///
    /// Text with no known entries comes back unchanged.
    pub fn apply(&self, text: &str) -> String {
        let mut translated = text.to_string();
        for (from, to) in &self.entries {
            if translated.contains(from.as_str()) {
                translated = translated.replace(from.as_str(), to);
            }
        }
        translated
    }
}
