use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One rating for a shared recipe.
///
/// The same shape covers both sources: entries returned by the ratings
/// endpoint and entries captured locally before that endpoint existed
/// (the backend names its timestamp `updatedAt`, local entries use
/// `date`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingEntry {
    pub stars: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default, alias = "updatedAt")]
    pub date: Option<DateTime<Utc>>,
}

impl RatingEntry {
    /// Builds a locally captured entry stamped with the current time.
    pub fn new(stars: u8, comment: impl Into<String>) -> Self {
        Self {
            stars,
            comment: comment.into(),
            date: Some(Utc::now()),
        }
    }
}

impl fmt::Display for RatingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "★".repeat(self.stars as usize))?;
        if let Some(date) = self.date {
            write!(f, " ({})", date.format("%Y-%m-%d"))?;
        }
        if !self.comment.is_empty() {
            write!(f, " {}", self.comment)?;
        }
        Ok(())
    }
}

/// Mean star value across `entries`; `0.0` when there are none.
pub fn average_stars(entries: &[RatingEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let total: u32 = entries.iter().map(|e| u32::from(e.stars)).sum();
    f64::from(total) / entries.len() as f64
}

/// Renders an average with one decimal place, the way rating summaries
/// are shown everywhere in the app.
pub fn format_average(average: f64) -> String {
    format!("{:.1}", average)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_empty_is_zero() {
        assert_eq!(average_stars(&[]), 0.0);
        assert_eq!(format_average(average_stars(&[])), "0.0");
    }

    #[test]
    fn test_average_and_formatting() {
        let entries = vec![
            RatingEntry::new(5, "great"),
            RatingEntry::new(4, ""),
            RatingEntry::new(4, "solid"),
        ];
        let average = average_stars(&entries);
        assert!((average - 4.333).abs() < 0.001);
        assert_eq!(format_average(average), "4.3");
    }

    #[test]
    fn test_reads_backend_timestamp_field() {
        let json = r#"{"stars": 4, "comment": "good", "updatedAt": "2026-01-15T10:30:00Z"}"#;
        let entry: RatingEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.stars, 4);
        assert_eq!(entry.comment, "good");
        assert!(entry.date.is_some());
    }

    #[test]
    fn test_reads_local_entry_without_date() {
        let json = r#"{"stars": 3}"#;
        let entry: RatingEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.stars, 3);
        assert!(entry.comment.is_empty());
        assert_eq!(entry.date, None);
    }

    #[test]
    fn test_display_includes_stars_and_comment() {
        let entry = RatingEntry {
            stars: 4,
            comment: "tasty".into(),
            date: None,
        };
        assert_eq!(format!("{}", entry), "★★★★ tasty");
    }

    #[test]
    fn test_json_roundtrip() {
        let entry = RatingEntry::new(5, "perfect");
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: RatingEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }
}
