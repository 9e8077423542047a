//! Film Record Types
//! One parsed CSV row and the award flag it carries.

use serde::Serialize;
use std::fmt;

/// Award flag of a film. Anything other than `Yes` / `No` lands in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AwardStatus {
    Yes,
    No,
    Unknown,
}

impl AwardStatus {
    /// Parse the raw `Awards` cell. Matching is case-insensitive.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("yes") => AwardStatus::Yes,
            Some(v) if v.eq_ignore_ascii_case("no") => AwardStatus::No,
            _ => AwardStatus::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AwardStatus::Yes => "Yes",
            AwardStatus::No => "No",
            AwardStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AwardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One film row after validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub year: i32,
    pub length: f64,
    pub popularity: f64,
    pub subject: String,
    pub awards: AwardStatus,
    pub title: Option<String>,
}

impl Record {
    pub fn new(year: i32, length: f64, popularity: f64, subject: &str, awards: AwardStatus) -> Self {
        Self {
            year,
            length,
            popularity,
            subject: subject.to_string(),
            awards,
            title: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn award_parse_is_case_insensitive() {
        assert_eq!(AwardStatus::parse(Some("Yes")), AwardStatus::Yes);
        assert_eq!(AwardStatus::parse(Some(" no ")), AwardStatus::No);
        assert_eq!(AwardStatus::parse(Some("YES")), AwardStatus::Yes);
    }

    #[test]
    fn award_parse_falls_back_to_unknown() {
        assert_eq!(AwardStatus::parse(None), AwardStatus::Unknown);
        assert_eq!(AwardStatus::parse(Some("")), AwardStatus::Unknown);
        assert_eq!(AwardStatus::parse(Some("maybe")), AwardStatus::Unknown);
    }
}
