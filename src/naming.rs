//! The `NNN-name` convention for content directories and image files.
//!
//! A numeric prefix orders an entry and marks it as published; entries
//! without one sort after all numbered entries and are treated as drafts:
//!
//! - `020-Travel/` → number 20, name `Travel`
//! - `001-tokyo-tower.jpg` (stem) → number 1, name `tokyo-tower`, title "tokyo tower"
//! - `wip-edits/` → no number, name `wip-edits`

use std::cmp::Ordering;

/// A parsed directory name or file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    pub number: Option<u32>,
    /// Text after the `NNN-` prefix, dashes preserved. The full input when unnumbered.
    pub name: String,
}

impl EntryName {
    pub fn parse(raw: &str) -> Self {
        let (prefix, rest) = match raw.split_once('-') {
            Some((prefix, rest)) => (prefix, Some(rest)),
            None => (raw, None),
        };
        match prefix.parse::<u32>() {
            Ok(number) => Self {
                number: Some(number),
                name: rest.unwrap_or_default().to_string(),
            },
            Err(_) => Self {
                number: None,
                name: raw.to_string(),
            },
        }
    }

    pub fn is_numbered(&self) -> bool {
        self.number.is_some()
    }

    /// Human title: dashes become spaces.
    pub fn display_title(&self) -> String {
        self.name.replace('-', " ")
    }

    /// Whether a user-typed slug refers to this entry, with or without the prefix.
    pub fn matches_slug(&self, raw: &str, slug: &str) -> bool {
        raw.eq_ignore_ascii_case(slug)
            || (!self.name.is_empty() && self.name.eq_ignore_ascii_case(slug))
    }
}

/// Ordering used everywhere entries are listed: numbered first by number,
/// then unnumbered, ties broken by the raw name.
pub fn compare_entries(a: &str, b: &str) -> Ordering {
    let (pa, pb) = (EntryName::parse(a), EntryName::parse(b));
    match (pa.number, pb.number) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
