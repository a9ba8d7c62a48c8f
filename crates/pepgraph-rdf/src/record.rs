//! Typed PEP records and the feed that carries them.
//!
//! The upstream feed (`peps.json`) is a JSON object mapping a key to a loosely
//! typed record. All presence decisions are made here: empty strings and
//! nulls become `None`, numbers in text positions become strings.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// One proposal as published by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PepRecord {
    #[serde(alias = "id")]
    pub number: u32,
    pub title: String,
    pub url: String,
    pub status: String,
    #[serde(rename = "type")]
    pub pep_type: String,
    #[serde(default, alias = "target_version", deserialize_with = "opt_text")]
    pub python_version: Option<String>,
    /// Display names joined by `", "`.
    #[serde(default, deserialize_with = "opt_text")]
    pub authors: Option<String>,
    /// Comma-separated topics.
    #[serde(default, deserialize_with = "opt_text")]
    pub topic: Option<String>,
    /// `DD-Mon-YYYY`.
    #[serde(default, deserialize_with = "opt_text")]
    pub created: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub superseded_by: Option<String>,
    /// Comma-separated PEP numbers.
    #[serde(default, deserialize_with = "opt_text")]
    pub replaces: Option<String>,
    /// Comma-separated PEP numbers.
    #[serde(default, deserialize_with = "opt_text")]
    pub requires: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub discussions_to: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub resolution: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub post_history: Option<String>,
}

impl PepRecord {
    /// A record with only the required fields set.
    pub fn new(
        number: u32,
        title: impl Into<String>,
        url: impl Into<String>,
        status: impl Into<String>,
        pep_type: impl Into<String>,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            url: url.into(),
            status: status.into(),
            pep_type: pep_type.into(),
            python_version: None,
            authors: None,
            topic: None,
            created: None,
            superseded_by: None,
            replaces: None,
            requires: None,
            discussions_to: None,
            resolution: None,
            post_history: None,
        }
    }

    pub fn author_names(&self) -> impl Iterator<Item = &str> {
        self.authors
            .as_deref()
            .into_iter()
            .flat_map(|s| s.split(", "))
            .filter(|name| !name.is_empty())
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        comma_list(self.topic.as_deref())
    }

    pub fn replaced_ids(&self) -> impl Iterator<Item = &str> {
        comma_list(self.replaces.as_deref())
    }

    pub fn required_ids(&self) -> impl Iterator<Item = &str> {
        comma_list(self.requires.as_deref())
    }
}

fn comma_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .into_iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(serde_json::Number),
}

fn opt_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawText>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| {
        let text = match raw {
            RawText::Text(s) => s,
            RawText::Number(n) => n.to_string(),
        };
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }))
}

// ============================================================================
// Feed
// ============================================================================

/// The whole feed, keyed by the feed's own (opaque) keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Feed {
    records: BTreeMap<String, PepRecord>,
}

impl Feed {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(key, record)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &PepRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn records(&self) -> impl Iterator<Item = &PepRecord> {
        self.records.values()
    }

    pub fn get(&self, number: u32) -> Option<&PepRecord> {
        self.records.values().find(|r| r.number == number)
    }
}

/// Keys records by their number, the way the upstream feed does.
impl FromIterator<PepRecord> for Feed {
    fn from_iter<I: IntoIterator<Item = PepRecord>>(iter: I) -> Self {
        Self {
            records: iter
                .into_iter()
                .map(|r| (r.number.to_string(), r))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "8": {
            "number": 8,
            "title": "Style Guide for Python Code",
            "authors": "Guido van Rossum, Barry Warsaw, Alyssa Coghlan",
            "discussions_to": null,
            "status": "Active",
            "type": "Process",
            "topic": "",
            "created": "05-Jul-2001",
            "python_version": null,
            "post_history": "05-Jul-2001, 01-Aug-2013",
            "resolution": null,
            "requires": null,
            "replaces": null,
            "superseded_by": null,
            "url": "https://peps.python.org/pep-0008/"
        },
        "3": {
            "number": 3,
            "title": "Guidelines for Handling Bug Reports",
            "authors": "Jeremy Hylton",
            "status": "Withdrawn",
            "type": "Process",
            "created": "25-Sep-2000",
            "python_version": "",
            "superseded_by": 9999,
            "requires": "1, 2,",
            "url": "https://peps.python.org/pep-0003/"
        }
    }"#;

    #[test]
    fn decodes_feed_with_nulls_and_blanks() {
        let feed = Feed::from_json_str(SAMPLE).unwrap();
        assert_eq!(feed.len(), 2);

        let pep8 = feed.get(8).unwrap();
        assert_eq!(pep8.pep_type, "Process");
        assert_eq!(pep8.topic, None);
        assert_eq!(pep8.discussions_to, None);
        assert_eq!(pep8.python_version, None);
        assert_eq!(
            pep8.author_names().collect::<Vec<_>>(),
            ["Guido van Rossum", "Barry Warsaw", "Alyssa Coghlan"]
        );
    }

    #[test]
    fn numbers_in_text_fields_become_strings() {
        let feed = Feed::from_json_str(SAMPLE).unwrap();
        let pep3 = feed.get(3).unwrap();
        assert_eq!(pep3.superseded_by.as_deref(), Some("9999"));
        assert_eq!(pep3.python_version, None);
        assert_eq!(pep3.required_ids().collect::<Vec<_>>(), ["1", "2"]);
        assert_eq!(pep3.replaced_ids().count(), 0);
    }

    #[test]
    fn id_and_target_version_aliases() {
        let record: PepRecord = serde_json::from_str(
            r#"{"id": 1, "title": "t", "url": "u", "status": "s", "type": "x",
                "target_version": "3.12"}"#,
        )
        .unwrap();
        assert_eq!(record.number, 1);
        assert_eq!(record.python_version.as_deref(), Some("3.12"));
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let err = Feed::from_json_str(r#"{"1": {"number": 1, "title": "t"}}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn topics_are_trimmed() {
        let mut record = PepRecord::new(1, "t", "u", "s", "x");
        record.topic = Some("Packaging,  Typing ,".to_string());
        assert_eq!(record.topics().collect::<Vec<_>>(), ["Packaging", "Typing"]);
    }

    #[test]
    fn collects_keyed_by_number() {
        let feed: Feed = vec![PepRecord::new(20, "Zen", "u", "Active", "Informational")]
            .into_iter()
            .collect();
        assert_eq!(feed.entries().next().map(|(k, _)| k), Some("20"));
    }
}
