//! In-memory [`ResumeApi`] double that records every call.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use super::{ApiError, ResumeApi, ResumePayload};
use crate::models::{ListResult, RecordId, ResumeRecord};

/// One observed call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List { page: u32, search: String },
    Get(RecordId),
    Create(ResumePayload),
    Update(RecordId, ResumePayload),
    Delete(RecordId),
}

/// Records stored server-side; `list` filters by substring of the name and pages by `per_page`
#[derive(Default)]
pub struct FakeResumeApi {
    pub records: RefCell<Vec<ResumeRecord>>,
    pub calls: RefCell<Vec<Call>>,
    pub per_page: usize,
    /// Errors returned (once each) by the next calls, in order
    pub failures: RefCell<VecDeque<ApiError>>,
    next_id: RefCell<RecordId>,
}

impl FakeResumeApi {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page,
            next_id: RefCell::new(1),
            ..Default::default()
        }
    }

    pub fn with_records(per_page: usize, records: Vec<ResumeRecord>) -> Self {
        let next = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let api = Self::new(per_page);
        *api.records.borrow_mut() = records;
        *api.next_id.borrow_mut() = next;
        api
    }

    pub fn fail_next(&self, err: ApiError) {
        self.failures.borrow_mut().push_back(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn apply(record: &mut ResumeRecord, payload: &ResumePayload) {
        use super::PayloadField::*;
        use crate::models::{ResumeSource, ResumeStatus};

        let text = |field| payload.get(field).map(str::to_string);
        if let Some(v) = text(FullName) { record.full_name = Some(v); }
        if let Some(v) = text(Email) { record.email = Some(v); }
        if let Some(v) = text(Phone) { record.phone = Some(v); }
        if let Some(v) = text(LinkedinUrl) { record.linkedin_url = Some(v); }
        if let Some(v) = text(EducationSummary) { record.education_summary = Some(v); }
        if let Some(v) = text(ExperienceSummary) { record.experience_summary = Some(v); }
        if let Some(v) = text(SkillsSummary) { record.skills_summary = Some(v); }
        if let Some(v) = text(Notes) { record.notes = Some(v); }
        if let Some(v) = payload.get(Source).and_then(ResumeSource::from_str) { record.source = v; }
        if let Some(v) = payload.get(Status).and_then(ResumeStatus::from_str) { record.status = v; }
        if let Some(file) = payload.file() {
            record.original_file_url = Some(format!("http://files.test/media/resumes/{}", file.name));
        }
    }
}

pub fn record(id: RecordId, name: &str) -> ResumeRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "full_name": name,
        "original_file_url": format!("http://files.test/media/resumes/{}.pdf", id),
    }))
    .expect("valid record json")
}

#[async_trait(?Send)]
impl ResumeApi for FakeResumeApi {
    async fn list(&self, page: u32, search: &str) -> Result<ListResult, ApiError> {
        self.record(Call::List { page, search: search.to_string() })?;
        let needle = search.to_lowercase();
        let matching: Vec<ResumeRecord> = self
            .records
            .borrow()
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.full_name.as_deref().unwrap_or("").to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        let start = (page.max(1) as usize - 1) * self.per_page;
        let items = matching.iter().skip(start).take(self.per_page).cloned().collect();
        Ok(ListResult {
            items,
            total_count: matching.len() as u64,
            paginated: true,
        })
    }

    async fn get(&self, id: RecordId) -> Result<ResumeRecord, ApiError> {
        self.record(Call::Get(id))?;
        self.records
            .borrow()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn create(&self, payload: &ResumePayload) -> Result<ResumeRecord, ApiError> {
        self.record(Call::Create(payload.clone()))?;
        let id = {
            let mut next = self.next_id.borrow_mut();
            let id = *next;
            *next += 1;
            id
        };
        let mut created = record(id, "");
        created.full_name = None;
        created.original_file_url = None;
        Self::apply(&mut created, payload);
        self.records.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: RecordId, payload: &ResumePayload) -> Result<ResumeRecord, ApiError> {
        self.record(Call::Update(id, payload.clone()))?;
        let mut records = self.records.borrow_mut();
        let existing = records.iter_mut().find(|r| r.id == id).ok_or(ApiError::NotFound)?;
        Self::apply(existing, payload);
        Ok(existing.clone())
    }

    async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        self.record(Call::Delete(id))?;
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}
