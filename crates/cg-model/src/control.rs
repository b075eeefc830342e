use std::collections::BTreeMap;

use crate::error::{ModelError, Result};

/// Control codes published with the CTRL vocabulary.
const CTRL_CONTROL_CODES: &[(&str, u32)] = &[
    ("Pregnancy", 168629),
    ("Christianity", 7292),
    ("Explain", 106423),
    ("Fitness", 63440),
    ("Saving", 63163),
    ("Ask", 27171),
    ("Ass", 95985),
    ("Joke", 163509),
    ("Questions", 45622),
    ("Thoughts", 49605),
    ("Retail", 52342),
    ("Feminism", 164338),
    ("Writing", 11992),
    ("Atheism", 192263),
    ("Netflix", 48616),
    ("Computing", 39639),
    ("Opinion", 43213),
    ("Alone", 44967),
    ("Funny", 58917),
    ("Gaming", 40358),
    ("Human", 4088),
    ("India", 1331),
    ("Joker", 77138),
    ("Diet", 36206),
    ("Legal", 11859),
    ("Norman", 4939),
    ("Tip", 72689),
    ("Weight", 52343),
    ("Movies", 46273),
    ("Running", 23425),
    ("Science", 2090),
    ("Horror", 37793),
    ("Confession", 60572),
    ("Finance", 12250),
    ("Politics", 16360),
    ("Scary", 191985),
    ("Support", 12654),
    ("Technologies", 32516),
    ("Teenage", 66160),
    ("Event", 32769),
    ("Learned", 67460),
    ("Notion", 182770),
    ("Wikipedia", 37583),
    ("Books", 6665),
    ("Extract", 76050),
    ("Confessions", 102701),
    ("Conspiracy", 75932),
    ("Links", 63674),
    ("Narcissus", 150425),
    ("Relationship", 54766),
    ("Relationships", 134796),
    ("Reviews", 41671),
    ("News", 4256),
    ("Translation", 26820),
    ("multilingual", 128406),
];

/// Mapping from control-code names to the token IDs that condition the model
/// on a domain.
#[derive(Debug, Clone, Default)]
pub struct ControlCodes {
    codes: BTreeMap<String, u32>,
}

impl ControlCodes {
    /// The control codes of the published CTRL checkpoint.
    pub fn ctrl() -> Self {
        CTRL_CONTROL_CODES
            .iter()
            .map(|&(name, id)| (name.to_string(), id))
            .collect()
    }

    /// Look up the token ID for a control code. Names are case-sensitive.
    pub fn token_id(&self, name: &str) -> Result<u32> {
        self.codes
            .get(name)
            .copied()
            .ok_or_else(|| ModelError::UnknownControlCode(name.to_string()))
    }

    /// Register or replace a control code.
    pub fn insert(&mut self, name: impl Into<String>, token_id: u32) -> Option<u32> {
        self.codes.insert(name.into(), token_id)
    }

    /// All known control-code names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<(String, u32)> for ControlCodes {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_table() {
        let codes = ControlCodes::ctrl();
        assert_eq!(codes.len(), CTRL_CONTROL_CODES.len());
        assert_eq!(codes.token_id("Politics").unwrap(), 16360);
        assert_eq!(codes.token_id("Wikipedia").unwrap(), 37583);
    }

    #[test]
    fn test_unknown_code() {
        let codes = ControlCodes::ctrl();
        let err = codes.token_id("politics").unwrap_err();
        assert!(matches!(err, ModelError::UnknownControlCode(ref n) if n == "politics"));
    }

    #[test]
    fn test_custom_table() {
        let mut codes: ControlCodes = vec![("A".to_string(), 1)].into_iter().collect();
        assert_eq!(codes.insert("B", 2), None);
        assert_eq!(codes.insert("A", 3), Some(1));
        assert_eq!(codes.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(codes.token_id("A").unwrap(), 3);
    }

    #[test]
    fn test_empty() {
        let codes = ControlCodes::default();
        assert!(codes.is_empty());
        assert!(codes.token_id("Politics").is_err());
    }
}
