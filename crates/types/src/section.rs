use serde::{Deserialize, Serialize};
use std::fmt;

/// Character limit of every free-text section in the care planning guide.
pub const MAX_SECTION_CHARS: usize = 1262;

/// One of the three user-authored blocks of the guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Beliefs,
    Values,
    Wishes,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Beliefs, Section::Values, Section::Wishes];

    /// Lowercase key used in requests and profiles.
    pub fn key(self) -> &'static str {
        match self {
            Section::Beliefs => "beliefs",
            Section::Values => "values",
            Section::Wishes => "wishes",
        }
    }

    /// Capitalised label used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Section::Beliefs => "Beliefs",
            Section::Values => "Values",
            Section::Wishes => "Wishes",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three strings of a merge request, exactly as the collaborators produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTexts {
    #[serde(default)]
    pub beliefs: String,
    #[serde(default)]
    pub values: String,
    #[serde(default)]
    pub wishes: String,
}

impl SectionTexts {
    pub fn new(
        beliefs: impl Into<String>,
        values: impl Into<String>,
        wishes: impl Into<String>,
    ) -> Self {
        Self {
            beliefs: beliefs.into(),
            values: values.into(),
            wishes: wishes.into(),
        }
    }

    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Beliefs => &self.beliefs,
            Section::Values => &self.values,
            Section::Wishes => &self.wishes,
        }
    }

    /// Iterates sections in guide order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> + '_ {
        Section::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_iterate_in_guide_order() {
        let texts = SectionTexts::new("b", "v", "w");
        let collected: Vec<_> = texts.iter().collect();
        assert_eq!(
            collected,
            vec![
                (Section::Beliefs, "b"),
                (Section::Values, "v"),
                (Section::Wishes, "w")
            ]
        );
    }

    #[test]
    fn section_deserializes_from_lowercase_key() {
        let section: Section = serde_json::from_str("\"wishes\"").unwrap();
        assert_eq!(section, Section::Wishes);
        assert_eq!(section.key(), "wishes");
        assert_eq!(section.to_string(), "Wishes");
    }

    #[test]
    fn missing_request_fields_default_to_empty() {
        let texts: SectionTexts = serde_json::from_str(r#"{"beliefs":"faith"}"#).unwrap();
        assert_eq!(texts.beliefs, "faith");
        assert!(texts.values.is_empty());
        assert!(texts.wishes.is_empty());
    }
}
