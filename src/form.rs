//! Résumé Form Controller
//!
//! Editable state of one record in Add or Edit mode, plus loading and
//! submitting it through a [`ResumeApi`].

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};
use thiserror::Error;

use crate::api::{ApiError, FieldErrors, PayloadField, ResumeApi, ResumePayload};
use crate::config::COMPLETION_DELAY_MS;
use crate::context::AppContext;
use crate::models::{file_name_from_url, ChoiceField, FileAttachment, RecordId, ResumeRecord, ResumeSource, ResumeStatus};

/// File types offered by the file picker
pub const ACCEPTED_FILE_TYPES: &str = ".pdf,.doc,.docx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(RecordId),
}

/// Free-text fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    FullName,
    Email,
    Phone,
    LinkedinUrl,
    EducationSummary,
    ExperienceSummary,
    SkillsSummary,
    Notes,
}

impl TextField {
    pub const ALL: [TextField; 8] = [
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::LinkedinUrl,
        Self::EducationSummary,
        Self::ExperienceSummary,
        Self::SkillsSummary,
        Self::Notes,
    ];

    pub fn payload_field(&self) -> PayloadField {
        match self {
            Self::FullName => PayloadField::FullName,
            Self::Email => PayloadField::Email,
            Self::Phone => PayloadField::Phone,
            Self::LinkedinUrl => PayloadField::LinkedinUrl,
            Self::EducationSummary => PayloadField::EducationSummary,
            Self::ExperienceSummary => PayloadField::ExperienceSummary,
            Self::SkillsSummary => PayloadField::SkillsSummary,
            Self::Notes => PayloadField::Notes,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::LinkedinUrl => "LinkedIn URL",
            Self::EducationSummary => "Education summary",
            Self::ExperienceSummary => "Experience summary",
            Self::SkillsSummary => "Skills summary",
            Self::Notes => "Notes",
        }
    }

    /// HTML input type; `None` renders a textarea
    pub fn input_type(&self) -> Option<&'static str> {
        match self {
            Self::FullName | Self::Phone => Some("text"),
            Self::Email => Some("email"),
            Self::LinkedinUrl => Some("url"),
            _ => None,
        }
    }

    /// Textarea height
    pub fn rows(&self) -> u32 {
        match self {
            Self::ExperienceSummary => 4,
            _ => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    texts: [String; 8],
    pub source: ResumeSource,
    pub status: ResumeStatus,
}

impl FormFields {
    pub fn from_record(record: &ResumeRecord) -> Self {
        let mut fields = Self {
            source: record.source,
            status: record.status,
            ..Default::default()
        };
        let values = [
            &record.full_name,
            &record.email,
            &record.phone,
            &record.linkedin_url,
            &record.education_summary,
            &record.experience_summary,
            &record.skills_summary,
            &record.notes,
        ];
        for (field, value) in TextField::ALL.into_iter().zip(values) {
            fields.set(field, value.clone().unwrap_or_default());
        }
        fields
    }

    pub fn get(&self, field: TextField) -> &str {
        &self.texts[field as usize]
    }

    pub fn set(&mut self, field: TextField, value: String) {
        self.texts[field as usize] = value;
    }

    /// Empty text fields and unknown choices are left out
    fn to_payload(&self) -> ResumePayload {
        let mut payload = ResumePayload::new();
        for field in TextField::ALL {
            let value = self.get(field);
            if !value.is_empty() {
                payload.set(field.payload_field(), value);
            }
        }
        if self.source.is_known() {
            payload.set(PayloadField::Source, self.source.as_str());
        }
        if self.status.is_known() {
            payload.set(PayloadField::Status, self.status.as_str());
        }
        payload
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Please select a résumé file.")]
    MissingFile,

    #[error("Failed to load résumé for editing: {0}")]
    Load(ApiError),

    #[error("Submission failed: {0}")]
    Rejected(FieldErrors),

    #[error("Submission failed: {0}")]
    Api(ApiError),

    #[error("A request is already in progress.")]
    Busy,

    #[error("The résumé has not been loaded; changes cannot be saved.")]
    NotLoaded,
}

impl From<ApiError> for FormError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(fields) => FormError::Rejected(fields),
            other => FormError::Api(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus {
    Editing,
    Loading,
    Submitting,
    Succeeded(String),
    Failed(FormError),
}

/// Validated request ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub mode: FormMode,
    pub payload: ResumePayload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    mode: FormMode,
    fields: FormFields,
    /// Newly picked upload; never filled from a loaded record
    new_file: Option<FileAttachment>,
    /// Read-only URL of the stored file
    original_file_url: Option<String>,
    /// Edit mode: the record arrived and `fields` hold its values
    record_loaded: bool,
    status: FormStatus,
}

impl FormController {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            fields: FormFields::default(),
            new_file: None,
            original_file_url: None,
            record_loaded: false,
            status: match mode {
                FormMode::Add => FormStatus::Editing,
                FormMode::Edit(_) => FormStatus::Loading,
            },
        }
    }

    /// Drop all state and start over in `mode`
    pub fn reset(&mut self, mode: FormMode) {
        debug!("[form] reset to {:?}", mode);
        *self = Self::new(mode);
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn text(&self, field: TextField) -> &str {
        self.fields.get(field)
    }

    pub fn set_text(&mut self, field: TextField, value: String) {
        self.fields.set(field, value);
    }

    pub fn set_source(&mut self, source: ResumeSource) {
        self.fields.source = source;
    }

    pub fn set_status(&mut self, status: ResumeStatus) {
        self.fields.status = status;
    }

    pub fn select_file(&mut self, file: Option<FileAttachment>) {
        self.new_file = file;
    }

    pub fn selected_file(&self) -> Option<&FileAttachment> {
        self.new_file.as_ref()
    }

    pub fn original_file_url(&self) -> Option<&str> {
        self.original_file_url.as_deref()
    }

    /// Name of the picked file, else of the stored one
    pub fn file_label(&self) -> Option<String> {
        if let Some(file) = &self.new_file {
            return Some(file.name.clone());
        }
        self.original_file_url
            .as_deref()
            .and_then(file_name_from_url)
            .map(str::to_string)
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.status, FormStatus::Loading | FormStatus::Submitting)
    }

    /// Edit forms only submit once the record they edit has loaded
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && (self.mode == FormMode::Add || self.record_loaded)
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.status {
            FormStatus::Failed(err) => Some(err.to_string()),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Succeeded(message) => Some(message),
            _ => None,
        }
    }

    /// Apply a `get` result; ignored unless still editing `id`
    pub fn apply_loaded(&mut self, id: RecordId, result: Result<ResumeRecord, ApiError>) -> bool {
        if self.mode != FormMode::Edit(id) {
            debug!("[form] dropping load of {} after switching to {:?}", id, self.mode);
            return false;
        }
        match result {
            Ok(record) => {
                self.fields = FormFields::from_record(&record);
                self.original_file_url = record.original_file_url;
                self.new_file = None;
                self.record_loaded = true;
                self.status = FormStatus::Editing;
            }
            Err(err) => {
                warn!("[form] loading {} failed: {}", id, err);
                self.status = FormStatus::Failed(FormError::Load(err));
            }
        }
        true
    }

    /// Validate locally and build the request. On success the form is `Submitting`.
    pub fn prepare_submission(&mut self) -> Result<Submission, FormError> {
        if self.is_busy() {
            return Err(FormError::Busy);
        }
        // Keep the load error on screen.
        if !self.can_submit() {
            return Err(FormError::NotLoaded);
        }
        let mut payload = self.fields.to_payload();
        match (self.mode, &self.new_file) {
            (FormMode::Add, None) => {
                self.status = FormStatus::Failed(FormError::MissingFile);
                return Err(FormError::MissingFile);
            }
            (_, Some(file)) => payload.set_file(file.clone()),
            // Edit without a new file: the field is omitted so the stored file stays.
            (FormMode::Edit(_), None) => {}
        }
        self.status = FormStatus::Submitting;
        Ok(Submission { mode: self.mode, payload })
    }

    /// Apply the outcome of `submission`; ignored if the form moved on meanwhile
    pub fn apply_submitted(&mut self, submission: &Submission, result: Result<ResumeRecord, ApiError>) -> bool {
        if self.mode != submission.mode || self.status != FormStatus::Submitting {
            return false;
        }
        match result {
            Ok(record) => match self.mode {
                FormMode::Add => {
                    info!("[form] résumé {} added", record.id);
                    self.reset(FormMode::Add);
                    self.status = FormStatus::Succeeded("Résumé added.".to_string());
                }
                FormMode::Edit(_) => {
                    info!("[form] résumé {} updated", record.id);
                    self.original_file_url = record.original_file_url;
                    self.new_file = None;
                    self.status = FormStatus::Succeeded("Résumé updated.".to_string());
                }
            },
            Err(err) => {
                warn!("[form] submit failed: {}", err);
                self.status = FormStatus::Failed(err.into());
            }
        }
        true
    }

    /// Load the record being edited (no-op in Add mode)
    #[cfg(test)]
    pub async fn load<A: ResumeApi + ?Sized>(&mut self, api: &A) {
        if let FormMode::Edit(id) = self.mode {
            let result = api.get(id).await;
            self.apply_loaded(id, result);
        }
    }

    /// Validate, send and apply in one go
    #[cfg(test)]
    pub async fn submit<A: ResumeApi + ?Sized>(&mut self, api: &A) -> Result<ResumeRecord, FormError> {
        let submission = self.prepare_submission()?;
        let result = send_submission(api, &submission).await;
        self.apply_submitted(&submission, result.clone());
        result.map_err(FormError::from)
    }
}

/// Create or update according to the submission's mode
pub async fn send_submission<A: ResumeApi + ?Sized>(api: &A, submission: &Submission) -> Result<ResumeRecord, ApiError> {
    match submission.mode {
        FormMode::Add => api.create(&submission.payload).await,
        FormMode::Edit(id) => api.update(id, &submission.payload).await,
    }
}

// ========================
// Reactive binding
// ========================

/// Form controller living in a signal
#[derive(Clone, Copy)]
pub struct FormSync {
    state: RwSignal<FormController>,
    ctx: AppContext,
}

impl FormSync {
    pub fn new(ctx: AppContext, mode: FormMode) -> Self {
        Self {
            state: RwSignal::new(FormController::new(mode)),
            ctx,
        }
    }

    pub fn state(&self) -> RwSignal<FormController> {
        self.state
    }

    /// Reset to `mode`, loading the record when editing
    pub fn open(&self, mode: FormMode) {
        self.state.update(|form| form.reset(mode));
        let FormMode::Edit(id) = mode else {
            return;
        };
        let state = self.state;
        let api = self.ctx.api();
        spawn_local(async move {
            let result = api.get(id).await;
            state.try_update(|form| form.apply_loaded(id, result));
        });
    }

    /// Submit; after a success, waits so the confirmation is visible, then runs `on_done`
    pub fn submit(&self, on_done: Callback<()>) {
        let Some(prepared) = self.state.try_update(|form| form.prepare_submission()) else {
            return;
        };
        let submission = match prepared {
            Ok(submission) => submission,
            Err(err) => {
                debug!("[form] not submitted: {}", err);
                return;
            }
        };
        let state = self.state;
        let api = self.ctx.api();
        spawn_local(async move {
            let result = send_submission(&api, &submission).await;
            let succeeded = result.is_ok();
            let applied = state
                .try_update(|form| form.apply_submitted(&submission, result))
                .unwrap_or(false);
            if applied && succeeded {
                TimeoutFuture::new(COMPLETION_DELAY_MS).await;
                on_done.run(());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{record, Call, FakeResumeApi};
    use crate::api::FILE_FIELD;

    fn pdf(name: &str) -> FileAttachment {
        FileAttachment {
            name: name.to_string(),
            mime_type: Some("application/pdf".to_string()),
            bytes: b"%PDF-1.4".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_add_without_file_is_rejected_locally() {
        let api = FakeResumeApi::new(10);
        let mut form = FormController::new(FormMode::Add);
        form.set_text(TextField::FullName, "Ana Lima".to_string());

        let err = form.submit(&api).await.unwrap_err();

        assert_eq!(err, FormError::MissingFile);
        assert!(api.calls().is_empty());
        assert_eq!(form.error_message().as_deref(), Some("Please select a résumé file."));
    }

    #[tokio::test]
    async fn test_add_sends_multipart_and_clears_form() {
        let api = FakeResumeApi::new(10);
        let mut form = FormController::new(FormMode::Add);
        form.set_text(TextField::FullName, "Ana Lima".to_string());
        form.set_status(ResumeStatus::Shortlisted);
        form.select_file(Some(pdf("ana.pdf")));

        let created = form.submit(&api).await.unwrap();

        let Call::Create(payload) = &api.calls()[0] else {
            panic!("expected create call");
        };
        assert_eq!(payload.field_names(), vec!["full_name", "source", "status", FILE_FIELD]);
        assert_eq!(payload.get(PayloadField::Status), Some("shortlisted"));
        assert_eq!(created.full_name.as_deref(), Some("Ana Lima"));
        assert_eq!(form.success_message(), Some("Résumé added."));
        assert_eq!(form.text(TextField::FullName), "");
        assert!(form.selected_file().is_none());
    }

    #[tokio::test]
    async fn test_edit_without_new_file_omits_file_field() {
        let mut existing = record(4, "Ana");
        existing.email = Some("ana@example.com".to_string());
        let api = FakeResumeApi::with_records(10, vec![existing]);
        let mut form = FormController::new(FormMode::Edit(4));
        form.load(&api).await;
        let url_before = form.original_file_url().map(str::to_string);
        assert_eq!(form.text(TextField::Email), "ana@example.com");
        assert!(form.selected_file().is_none());

        form.set_text(TextField::Phone, "555-0101".to_string());
        form.submit(&api).await.unwrap();

        let Call::Update(id, payload) = api.calls().last().cloned().unwrap() else {
            panic!("expected update call");
        };
        assert_eq!(id, 4);
        assert!(!payload.has_file());
        assert!(!payload.field_names().contains(&FILE_FIELD));
        assert!(!payload.field_names().contains(&"original_file_url"));
        assert_eq!(payload.get(PayloadField::Phone), Some("555-0101"));

        let mut reloaded = FormController::new(FormMode::Edit(4));
        reloaded.load(&api).await;
        assert_eq!(reloaded.original_file_url().map(str::to_string), url_before);
        assert_eq!(reloaded.text(TextField::Phone), "555-0101");
        assert_eq!(form.success_message(), Some("Résumé updated."));
    }

    #[tokio::test]
    async fn test_edit_with_new_file_replaces_url() {
        let api = FakeResumeApi::with_records(10, vec![record(2, "Bruno")]);
        let mut form = FormController::new(FormMode::Edit(2));
        form.load(&api).await;
        form.select_file(Some(pdf("bruno-2024.pdf")));
        assert_eq!(form.file_label().as_deref(), Some("bruno-2024.pdf"));

        form.submit(&api).await.unwrap();

        assert_eq!(
            form.original_file_url(),
            Some("http://files.test/media/resumes/bruno-2024.pdf")
        );
        assert!(form.selected_file().is_none());
    }

    #[tokio::test]
    async fn test_validation_errors_are_joined() {
        let api = FakeResumeApi::new(10);
        let mut fields = FieldErrors::new();
        fields.insert("email", "Enter a valid email address.");
        fields.insert("original_file", "The submitted file is empty.");
        api.fail_next(ApiError::Validation(fields));
        let mut form = FormController::new(FormMode::Add);
        form.select_file(Some(pdf("empty.pdf")));

        let err = form.submit(&api).await.unwrap_err();

        assert!(matches!(err, FormError::Rejected(_)));
        assert_eq!(
            form.error_message().as_deref(),
            Some("Submission failed: email: Enter a valid email address.; original_file: The submitted file is empty.")
        );
    }

    #[tokio::test]
    async fn test_load_missing_record_fails() {
        let api = FakeResumeApi::new(10);
        let mut form = FormController::new(FormMode::Edit(77));
        form.load(&api).await;
        assert_eq!(form.status(), &FormStatus::Failed(FormError::Load(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_failed_load_blocks_submit() {
        let stored: ResumeRecord = serde_json::from_value(serde_json::json!({
            "id": 4, "full_name": "Ana", "status": "hired", "source": "email",
        }))
        .unwrap();
        let api = FakeResumeApi::with_records(10, vec![stored.clone()]);
        api.fail_next(ApiError::Transport("timeout".to_string()));
        let mut form = FormController::new(FormMode::Edit(4));
        form.load(&api).await;
        assert!(!form.can_submit());

        let err = form.submit(&api).await.unwrap_err();

        assert_eq!(err, FormError::NotLoaded);
        assert_eq!(api.calls(), vec![Call::Get(4)]);
        assert_eq!(api.records.borrow()[0], stored);
        assert_eq!(
            form.status(),
            &FormStatus::Failed(FormError::Load(ApiError::Transport("timeout".to_string())))
        );
    }

    #[tokio::test]
    async fn test_unknown_choices_are_not_sent_on_edit() {
        let stored: ResumeRecord =
            serde_json::from_value(serde_json::json!({"id": 6, "status": "archived", "source": null})).unwrap();
        let api = FakeResumeApi::with_records(10, vec![stored]);
        let mut form = FormController::new(FormMode::Edit(6));
        form.load(&api).await;
        form.set_text(TextField::Notes, "call back".to_string());

        form.submit(&api).await.unwrap();

        let Call::Update(_, payload) = api.calls().last().cloned().unwrap() else {
            panic!("expected update call");
        };
        assert_eq!(payload.field_names(), vec!["notes"]);
    }

    #[test]
    fn test_reset_clears_previous_edit() {
        let mut form = FormController::new(FormMode::Edit(1));
        form.apply_loaded(1, Ok(record(1, "Ana")));
        form.select_file(Some(pdf("x.pdf")));
        assert_eq!(form.text(TextField::FullName), "Ana");

        form.reset(FormMode::Add);

        assert_eq!(form, FormController::new(FormMode::Add));
        assert!(form.original_file_url().is_none());
    }

    #[test]
    fn test_late_load_for_previous_target_is_ignored() {
        let mut form = FormController::new(FormMode::Edit(1));
        form.reset(FormMode::Edit(2));

        assert!(!form.apply_loaded(1, Ok(record(1, "Ana"))));
        assert_eq!(form.text(TextField::FullName), "");
        assert_eq!(form.status(), &FormStatus::Loading);

        assert!(form.apply_loaded(2, Ok(record(2, "Bruno"))));
        assert_eq!(form.text(TextField::FullName), "Bruno");
    }

    #[test]
    fn test_busy_form_cannot_submit_twice() {
        let mut form = FormController::new(FormMode::Add);
        form.select_file(Some(pdf("a.pdf")));
        assert!(form.prepare_submission().is_ok());
        assert_eq!(form.prepare_submission(), Err(FormError::Busy));
    }

    #[test]
    fn test_file_label_from_stored_url() {
        let mut form = FormController::new(FormMode::Edit(3));
        form.apply_loaded(3, Ok(record(3, "Caio")));
        assert_eq!(form.file_label().as_deref(), Some("3.pdf"));
    }
}
