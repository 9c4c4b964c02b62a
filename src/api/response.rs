//! List response shapes.

use serde::Deserialize;

use crate::models::{ListResult, ResumeRecord};

/// The list endpoint answers either with a paginated envelope or a bare array
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Envelope {
        count: u64,
        results: Vec<ResumeRecord>,
    },
    Bare(Vec<ResumeRecord>),
}

impl From<ListResponse> for ListResult {
    fn from(response: ListResponse) -> Self {
        match response {
            ListResponse::Envelope { count, results } => ListResult {
                items: results,
                total_count: count,
                paginated: true,
            },
            ListResponse::Bare(items) => ListResult {
                total_count: items.len() as u64,
                items,
                paginated: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResumeSource, ResumeStatus};

    #[test]
    fn test_envelope_response() {
        let json = r#"{"count": 12, "next": "http://x/?page=2", "previous": null, "results": [{"id": 1}, {"id": 2}]}"#;
        let result: ListResult = serde_json::from_str::<ListResponse>(json).unwrap().into();
        assert!(result.paginated);
        assert_eq!(result.total_count, 12);
        assert_eq!(result.items.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(result.total_pages(10), 2);
    }

    #[test]
    fn test_bare_response() {
        let json = r#"[{"id": 5}, {"id": 4}, {"id": 9}]"#;
        let result: ListResult = serde_json::from_str::<ListResponse>(json).unwrap().into();
        assert!(!result.paginated);
        assert_eq!(result.total_count, 3);
        assert_eq!(result.items[2].id, 9);
    }

    #[test]
    fn test_odd_choice_values_keep_the_page() {
        let json = r#"{"count": 2, "results": [{"id": 1, "status": "shortlisted"}, {"id": 2, "status": null}]}"#;
        let result: ListResult = serde_json::from_str::<ListResponse>(json).unwrap().into();
        assert_eq!(result.items[0].status, ResumeStatus::Shortlisted);
        assert_eq!(result.items[1].status, ResumeStatus::Unknown);

        let bare = serde_json::from_str::<ListResponse>(r#"[{"id": 1, "source": "linkedin"}]"#).unwrap();
        let result = ListResult::from(bare);
        assert_eq!(result.items[0].source, ResumeSource::Unknown);
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        assert!(serde_json::from_str::<ListResponse>(r#"{"items": []}"#).is_err());
    }
}
