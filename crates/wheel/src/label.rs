use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Text shown on one segment of the wheel.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Label {
    /// Splits a free-form word list on whitespace, dropping empty entries.
    pub fn parse_list(input: &str) -> Vec<Label> {
        input.split_whitespace().map(Label::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_skips_blank_runs() {
        let labels = Label::parse_list("  10%   20%\tfree-shipping \n");
        let expected: Vec<Label> = ["10%", "20%", "free-shipping"]
            .into_iter()
            .map(Label::from)
            .collect();
        assert_eq!(labels, expected);
        assert!(Label::parse_list("   ").is_empty());
    }

    #[test]
    fn test_label_is_transparent_in_json() {
        let label: Label = serde_json::from_str("\"BONUS\"").unwrap();
        assert_eq!(label.as_str(), "BONUS");
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"BONUS\"");
    }
}
