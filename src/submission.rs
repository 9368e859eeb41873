use reqwest::Url;

use crate::catalog::adapter::RawFields;
use crate::domain::{EntryStatus, Submission};
use crate::error::{CatalogError, Result};

impl Submission {
    /// Check the fields the public form marks as required.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("appName", &self.app_name),
            ("url", &self.url),
            ("shortDescription", &self.short_description),
            ("whyGreat", &self.why_great),
            ("email", &self.email),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(CatalogError::InvalidSubmission(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        match Url::parse(self.url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            _ => {
                return Err(CatalogError::InvalidSubmission(format!(
                    "url must be an absolute http(s) URL, got '{}'",
                    self.url
                )))
            }
        }

        if !looks_like_email(self.email.trim()) {
            return Err(CatalogError::InvalidSubmission(format!(
                "email is not a valid address: '{}'",
                self.email
            )));
        }
        Ok(())
    }

    /// Store columns for a new record awaiting review
    pub fn to_fields(&self) -> RawFields {
        RawFields {
            app_name: Some(self.app_name.trim().to_string()),
            primary_url: Some(self.url.trim().to_string()),
            short_description: Some(self.short_description.clone()),
            full_description: Some(self.why_great.clone()),
            platform: Some(
                self.platform
                    .iter()
                    .flatten()
                    .map(|p| p.as_str().to_string())
                    .collect(),
            ),
            status: Some(EntryStatus::PendingReview.as_str().to_string()),
            submitter_email: Some(self.email.trim().to_string()),
            submitter_name: Some(self.submitter_name.clone().unwrap_or_default()),
            ..Default::default()
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
