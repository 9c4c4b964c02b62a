//! Outbound résumé payloads.
//!
//! The payload only knows writable fields; the read-only file URL has no
//! representation here and so can never be sent back.

use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use super::ApiError;
use crate::models::FileAttachment;

/// Multipart field name of the uploaded file
pub const FILE_FIELD: &str = "original_file";

/// Writable scalar fields of a résumé
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadField {
    FullName,
    Email,
    Phone,
    LinkedinUrl,
    EducationSummary,
    ExperienceSummary,
    SkillsSummary,
    Notes,
    Source,
    Status,
}

impl PayloadField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::LinkedinUrl => "linkedin_url",
            Self::EducationSummary => "education_summary",
            Self::ExperienceSummary => "experience_summary",
            Self::SkillsSummary => "skills_summary",
            Self::Notes => "notes",
            Self::Source => "source",
            Self::Status => "status",
        }
    }
}

/// Fields (and optionally a file) to send on create/update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumePayload {
    fields: Vec<(PayloadField, String)>,
    file: Option<FileAttachment>,
}

impl ResumePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, field: PayloadField, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn set_file(&mut self, file: FileAttachment) {
        self.file = Some(file);
    }

    pub fn get(&self, field: PayloadField) -> Option<&str> {
        self.fields.iter().find(|(f, _)| *f == field).map(|(_, v)| v.as_str())
    }

    pub fn file(&self) -> Option<&FileAttachment> {
        self.file.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// Wire names of everything that would be sent, in insertion order
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.fields.iter().map(|(f, _)| f.name()).collect();
        if self.file.is_some() {
            names.push(FILE_FIELD);
        }
        names
    }

    /// JSON body of the scalar fields; the file is never part of it
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(field, value)| (field.name().to_string(), Value::String(value.clone())))
            .collect();
        Value::Object(map)
    }

    pub fn to_multipart(&self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (field, value) in &self.fields {
            form = form.text(field.name(), value.clone());
        }
        if let Some(file) = &self.file {
            let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
            if let Some(mime) = &file.mime_type {
                part = part
                    .mime_str(mime)
                    .map_err(|e| ApiError::InvalidPayload(format!("invalid file type {}: {}", mime, e)))?;
            }
            form = form.part(FILE_FIELD, part);
        }
        Ok(form)
    }
}
