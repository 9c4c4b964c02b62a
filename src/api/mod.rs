//! API Client
//!
//! Binding to the résumé REST resource. Controllers depend on the
//! [`ResumeApi`] trait; the app wires in [`HttpResumeApi`].

mod error;
mod http;
mod payload;
mod response;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::models::{ListResult, RecordId, ResumeRecord};

pub use error::{ApiError, FieldErrors};
pub use http::HttpResumeApi;
pub use payload::{PayloadField, ResumePayload, FILE_FIELD};
pub use response::ListResponse;

/// Base resource path under the API root
pub const RESOURCE_PATH: &str = "resumes/";

/// CRUD operations on the résumé collection
#[async_trait(?Send)]
pub trait ResumeApi {
    /// `search` is only sent when non-empty
    async fn list(&self, page: u32, search: &str) -> Result<ListResult, ApiError>;

    async fn get(&self, id: RecordId) -> Result<ResumeRecord, ApiError>;

    async fn create(&self, payload: &ResumePayload) -> Result<ResumeRecord, ApiError>;

    /// Partial update; fields absent from `payload` are left untouched
    async fn update(&self, id: RecordId, payload: &ResumePayload) -> Result<ResumeRecord, ApiError>;

    async fn delete(&self, id: RecordId) -> Result<(), ApiError>;
}
