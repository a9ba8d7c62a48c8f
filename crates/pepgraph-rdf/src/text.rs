//! Date/URL extraction from the free-form `Resolution` and `Post-History`
//! header fields.
//!
//! Both fields are hand-written reStructuredText, usually a list of
//! `` `DD-Mon-YYYY <url>`__ `` hyperlinks but sometimes a bare URL or bare
//! dates. Each field is parsed by a [`Cascade`]: an ordered list of tiers,
//! tried in sequence, where the first tier that yields anything wins.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

/// Date format used throughout the PEP headers (`01-Jan-2020`).
pub const FEED_DATE_FORMAT: &str = "%d-%b-%Y";

const DATE: &str = r"\d{2}-[A-Za-z]{3}-\d{4}";

/// What the resolution parser found. At least one field is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResolution {
    pub date: Option<String>,
    pub url: Option<String>,
}

/// One post-history entry. The date is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPost {
    pub date: String,
    pub url: Option<String>,
}

// ============================================================================
// Cascade
// ============================================================================

pub(crate) struct Tier<T> {
    pub(crate) name: &'static str,
    regex: Regex,
    extract: fn(&Captures<'_>, &str) -> T,
}

impl<T> Tier<T> {
    fn new(name: &'static str, pattern: &str, extract: fn(&Captures<'_>, &str) -> T) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("tier pattern is a valid regex"),
            extract,
        }
    }

    pub(crate) fn first(&self, input: &str) -> Option<T> {
        self.regex
            .captures(input)
            .map(|cap| (self.extract)(&cap, input))
    }

    pub(crate) fn all(&self, input: &str) -> Vec<T> {
        self.regex
            .captures_iter(input)
            .map(|cap| (self.extract)(&cap, input))
            .collect()
    }
}

pub(crate) struct Cascade<T> {
    pub(crate) tiers: Vec<Tier<T>>,
}

impl<T> Cascade<T> {
    /// First match of the first tier that matches at all.
    fn first(&self, input: &str) -> Option<(&'static str, T)> {
        self.tiers
            .iter()
            .find_map(|tier| tier.first(input).map(|found| (tier.name, found)))
    }

    /// Every match of the first tier that matches at all.
    fn all(&self, input: &str) -> Option<(&'static str, Vec<T>)> {
        self.tiers.iter().find_map(|tier| {
            let found = tier.all(input);
            (!found.is_empty()).then_some((tier.name, found))
        })
    }
}

pub(crate) static RESOLUTION: LazyLock<Cascade<ParsedResolution>> = LazyLock::new(|| Cascade {
    tiers: vec![
        // `01-Jan-2020 <https://...>`__ (backticks optional)
        Tier::new(
            "hyperlinked_date",
            &format!(r"^`?({DATE})\s+<([^>]+)>"),
            |cap, _| ParsedResolution {
                date: Some(cap[1].to_string()),
                url: Some(cap[2].to_string()),
            },
        ),
        // https://...
        Tier::new("bare_url", r"^https?://\S+", |_, input| ParsedResolution {
            date: None,
            url: Some(input.to_string()),
        }),
    ],
});

pub(crate) static POST_HISTORY: LazyLock<Cascade<ParsedPost>> = LazyLock::new(|| Cascade {
    tiers: vec![
        Tier::new(
            "hyperlinked_dates",
            &format!(r"`?({DATE})\s+<([^>]+)>"),
            |cap, _| ParsedPost {
                date: cap[1].to_string(),
                url: Some(cap[2].to_string()),
            },
        ),
        Tier::new("bare_dates", &format!(r"\b({DATE})\b"), |cap, _| ParsedPost {
            date: cap[1].to_string(),
            url: None,
        }),
    ],
});

// ============================================================================
// Public API
// ============================================================================

/// Parse a `Resolution` header. Returns `None` when the text has neither a
/// hyperlinked date nor a leading absolute URL.
pub fn parse_resolution(resolution: &str) -> Option<ParsedResolution> {
    let input = resolution.trim();
    let (tier, found) = RESOLUTION.first(input)?;
    tracing::trace!(tier, "resolution matched");
    Some(found)
}

/// Parse a `Post-History` header into entries in textual order.
pub fn parse_post_history(post_history: &str) -> Vec<ParsedPost> {
    match POST_HISTORY.all(post_history) {
        Some((tier, found)) => {
            tracing::trace!(tier, entries = found.len(), "post history matched");
            found
        }
        None => Vec::new(),
    }
}

/// Why a header date was rejected.
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    /// Not two-digit day, three-letter month, four-digit year.
    #[error("expected DD-Mon-YYYY")]
    Format,
    /// Right shape, but not a calendar date (`31-Feb-2020`, `01-Foo-2020`).
    #[error(transparent)]
    Calendar(#[from] chrono::ParseError),
}

static FEED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{DATE}$")).expect("date grammar is a valid regex"));

/// Parse a `DD-Mon-YYYY` date. Month abbreviations are case-insensitive.
///
/// chrono alone accepts `5-Jul-2001` and `05-Jul-01`; the grammar is checked
/// first so those are rejected.
pub fn parse_feed_date(value: &str) -> Result<NaiveDate, DateError> {
    let value = value.trim();
    if !FEED_DATE.is_match(value) {
        return Err(DateError::Format);
    }
    Ok(NaiveDate::parse_from_str(value, FEED_DATE_FORMAT)?)
}
