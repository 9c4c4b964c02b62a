//! Résumé Row Component
//!
//! One entry of the list with edit/delete actions.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::models::{format_timestamp, ResumeRecord};

fn or_missing(value: &Option<String>) -> (String, bool) {
    match value.as_deref().filter(|v| !v.is_empty()) {
        Some(v) => (v.to_string(), true),
        None => ("N/A".to_string(), false),
    }
}

#[component]
pub fn ResumeRow(
    record: ResumeRecord,
    #[prop(into)] on_edit: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    let name = record
        .full_name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Name not provided".to_string());
    let has_name = record.full_name.as_deref().is_some_and(|n| !n.is_empty());
    let (email, has_email) = or_missing(&record.email);
    let (phone, has_phone) = or_missing(&record.phone);
    let uploaded = format_timestamp(record.uploaded_at.as_ref());
    let file_url = record.original_file_url.clone();
    let extracted = record.full_text_content.clone().filter(|text| !text.trim().is_empty());
    let file_name = record.original_file_name().unwrap_or("View original file").to_string();
    let subject = has_name.then(|| name.clone());

    view! {
        <li class="resume-row">
            <div class="resume-main">
                <div class="resume-name" class:missing=!has_name>{name}</div>
                <div class="resume-detail" class:missing=!has_email>
                    <strong>"Email: "</strong>{email}
                </div>
                <div class="resume-detail" class:missing=!has_phone>
                    <strong>"Phone: "</strong>{phone}
                </div>
                <div class="resume-detail">
                    <strong>"Status: "</strong>{record.status.label()}
                </div>
                <div class="resume-detail">
                    <strong>"Source: "</strong>{record.source.label()}
                </div>
                {file_url.map(move |url| view! {
                    <div class="resume-detail">
                        <a href=url target="_blank" rel="noopener noreferrer">{file_name}</a>
                    </div>
                })}
                {extracted.map(|text| view! {
                    <details class="resume-detail extracted">
                        <summary>"Extracted text"</summary>
                        <pre>{text}</pre>
                    </details>
                })}
                <div class="resume-detail uploaded">
                    <em>"Uploaded: "</em>{uploaded}
                </div>
            </div>
            <div class="resume-actions">
                <button class="edit-btn" on:click=move |_| on_edit.run(())>"Edit"</button>
                <DeleteConfirmButton button_class="delete-btn" subject=subject on_confirm=on_delete />
            </div>
        </li>
    }
}
