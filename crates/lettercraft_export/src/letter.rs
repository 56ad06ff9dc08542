//! Exportable letters and their sender metadata.

use chrono::{DateTime, Utc};

use lettercraft_templates::{SenderDetails, ValueMap};

/// Sender information exporters may place around the letter body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SenderMetadata {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub position: Option<String>,
    /// Signature image as a data URL
    pub signature: Option<String>,
}

impl SenderMetadata {
    /// Build metadata from form values, falling back to saved details for
    /// name, email and phone.
    pub fn from_values(
        values: &ValueMap,
        details: &SenderDetails,
        signature: Option<String>,
    ) -> Self {
        Self {
            full_name: value_or(values, "fullName", &details.full_name),
            email: value_or(values, "email", &details.email),
            phone: value_or(values, "phone", &details.phone),
            company_name: non_empty(values, "companyName").map(String::from),
            position: non_empty(values, "position").map(String::from),
            signature,
        }
    }

    /// Document title derived from position and company.
    pub fn title(&self) -> String {
        match (&self.position, &self.company_name) {
            (Some(position), Some(company)) => {
                format!("Cover letter - {} at {}", position, company)
            }
            (Some(position), None) => format!("Cover letter - {}", position),
            (None, Some(company)) => format!("Cover letter - {}", company),
            (None, None) => "Cover letter".to_string(),
        }
    }
}

fn non_empty<'a>(values: &'a ValueMap, id: &str) -> Option<&'a str> {
    values
        .get(id)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

fn value_or(values: &ValueMap, id: &str, fallback: &str) -> String {
    non_empty(values, id).unwrap_or(fallback).to_string()
}

/// A rendered letter ready for export.
#[derive(Debug, Clone)]
pub struct Letter {
    /// Rendered text, exported without modification
    pub content: String,
    pub sender: SenderMetadata,
    pub created_at: DateTime<Utc>,
}

impl Letter {
    pub fn new(content: impl Into<String>, sender: SenderMetadata) -> Self {
        Self {
            content: content.into(),
            sender,
            created_at: Utc::now(),
        }
    }
}

/// File name for an exported letter:
/// `cover-letter-<company | position | application>-<millis>.<ext>`.
pub fn export_filename(values: &ValueMap, extension: &str, timestamp: DateTime<Utc>) -> String {
    let label = non_empty(values, "companyName")
        .or_else(|| non_empty(values, "position"))
        .unwrap_or("application");
    let label: String = label
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '-' } else { c })
        .collect();
    format!(
        "cover-letter-{}-{}.{}",
        label,
        timestamp.timestamp_millis(),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn values(pairs: &[(&str, &str)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_export_filename() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            export_filename(&values(&[("companyName", "Acme"), ("position", "QA")]), "pdf", ts),
            "cover-letter-Acme-1700000000123.pdf"
        );
        assert_eq!(
            export_filename(&values(&[("companyName", " "), ("position", "QA")]), "txt", ts),
            "cover-letter-QA-1700000000123.txt"
        );
        assert_eq!(
            export_filename(&ValueMap::new(), "txt", ts),
            "cover-letter-application-1700000000123.txt"
        );
        assert_eq!(
            export_filename(&values(&[("companyName", "A/B")]), "txt", ts),
            "cover-letter-A-B-1700000000123.txt"
        );
    }

    #[test]
    fn test_metadata_falls_back_to_details() {
        let details = SenderDetails {
            full_name: "Saved".to_string(),
            email: "saved@example.com".to_string(),
            ..Default::default()
        };
        let meta = SenderMetadata::from_values(
            &values(&[("fullName", "Typed"), ("email", ""), ("position", "QA")]),
            &details,
            None,
        );
        assert_eq!(meta.full_name, "Typed");
        assert_eq!(meta.email, "saved@example.com");
        assert_eq!(meta.phone, "");
        assert_eq!(meta.position.as_deref(), Some("QA"));
        assert!(meta.company_name.is_none());
        assert_eq!(meta.title(), "Cover letter - QA");
    }
}
