//! Frontend Models
//!
//! Data structures matching the résumé resource served by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned record identifier
pub type RecordId = u64;

/// Closed set of wire values with a catch-all for anything else
pub trait ChoiceField: Sized {
    const UNKNOWN: Self;

    fn is_known(&self) -> bool;
}

/// `null` decodes like an unrecognised value
fn lenient_choice<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + ChoiceField,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or(T::UNKNOWN))
}

fn unknown_source() -> ResumeSource {
    ResumeSource::Unknown
}

fn unknown_status() -> ResumeStatus {
    ResumeStatus::Unknown
}

/// Where a résumé came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSource {
    #[default]
    Manual,
    Email,
    Physical,
    Other,
    /// Missing, `null` or not one of the values above
    #[serde(other)]
    Unknown,
}

impl ChoiceField for ResumeSource {
    const UNKNOWN: Self = Self::Unknown;

    fn is_known(&self) -> bool {
        *self != Self::Unknown
    }
}

impl ResumeSource {
    pub const ALL: [ResumeSource; 4] = [Self::Manual, Self::Email, Self::Physical, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Email => "email",
            Self::Physical => "physical",
            Self::Other => "other",
            Self::Unknown => "",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|source| source.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Manual => "Manual entry",
            Self::Email => "E-mail",
            Self::Physical => "Physical (scanned)",
            Self::Other => "Other",
            Self::Unknown => "N/A",
        }
    }
}

/// Review pipeline status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeStatus {
    #[default]
    PendingReview,
    UnderReview,
    Shortlisted,
    InterviewScheduled,
    Rejected,
    Hired,
    /// Missing, `null` or not one of the values above
    #[serde(other)]
    Unknown,
}

impl ChoiceField for ResumeStatus {
    const UNKNOWN: Self = Self::Unknown;

    fn is_known(&self) -> bool {
        *self != Self::Unknown
    }
}

impl ResumeStatus {
    pub const ALL: [ResumeStatus; 6] = [
        Self::PendingReview,
        Self::UnderReview,
        Self::Shortlisted,
        Self::InterviewScheduled,
        Self::Rejected,
        Self::Hired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::UnderReview => "under_review",
            Self::Shortlisted => "shortlisted",
            Self::InterviewScheduled => "interview_scheduled",
            Self::Rejected => "rejected",
            Self::Hired => "hired",
            Self::Unknown => "",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PendingReview => "Pending review",
            Self::UnderReview => "Under review",
            Self::Shortlisted => "Shortlisted",
            Self::InterviewScheduled => "Interview scheduled",
            Self::Rejected => "Rejected",
            Self::Hired => "Hired",
            Self::Unknown => "N/A",
        }
    }
}

/// Résumé record as returned by the API
///
/// Read-only: the upload input lives on [`FileAttachment`] and is never
/// round-tripped from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: RecordId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub education_summary: Option<String>,
    #[serde(default)]
    pub experience_summary: Option<String>,
    #[serde(default)]
    pub skills_summary: Option<String>,
    #[serde(default)]
    pub full_text_content: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "unknown_source", deserialize_with = "lenient_choice")]
    pub source: ResumeSource,
    #[serde(default = "unknown_status", deserialize_with = "lenient_choice")]
    pub status: ResumeStatus,
    #[serde(default)]
    pub original_file_url: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ResumeRecord {
    /// Last path segment of the stored file URL
    pub fn original_file_name(&self) -> Option<&str> {
        self.original_file_url.as_deref().and_then(file_name_from_url)
    }
}

/// Extract the last non-empty path segment of a URL
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').find(|segment| !segment.is_empty())
}

/// Format a server timestamp for display
pub fn format_timestamp(at: Option<&DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%d/%m/%Y %H:%M").to_string(),
        None => "N/A".to_string(),
    }
}

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// One page of records plus the total matching the current filter
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult {
    pub items: Vec<ResumeRecord>,
    pub total_count: u64,
    /// False when the backend answered with a bare array
    pub paginated: bool,
}

impl ListResult {
    pub fn total_pages(&self, items_per_page: u32) -> u32 {
        if !self.paginated {
            return if self.items.is_empty() { 0 } else { 1 };
        }
        let per_page = u64::from(items_per_page.max(1));
        let pages = self.total_count.div_ceil(per_page);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}
