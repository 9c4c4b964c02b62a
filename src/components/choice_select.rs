//! Choice Select Component
//!
//! Labelled `<select>` over a fixed set of wire values. An empty selection
//! (a value the backend sent that is not in the set) shows as "N/A".

use leptos::prelude::*;

use crate::models::{ResumeSource, ResumeStatus};

/// (wire value, label) pairs for the source select
pub fn source_options() -> Vec<(&'static str, &'static str)> {
    ResumeSource::ALL.iter().map(|s| (s.as_str(), s.label())).collect()
}

/// (wire value, label) pairs for the status select
pub fn status_options() -> Vec<(&'static str, &'static str)> {
    ResumeStatus::ALL.iter().map(|s| (s.as_str(), s.label())).collect()
}

#[component]
pub fn ChoiceSelect(
    label: &'static str,
    options: Vec<(&'static str, &'static str)>,
    selected: Signal<&'static str>,
    on_change: impl Fn(String) + Copy + 'static,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <select on:change=move |ev| on_change(event_target_value(&ev))>
                <option value="" disabled=true hidden=move || !selected.get().is_empty() selected=move || selected.get().is_empty()>
                    "N/A"
                </option>
                {options.into_iter().map(|(value, text)| {
                    view! {
                        <option value=value selected=move || selected.get() == value>
                            {text}
                        </option>
                    }
                }).collect_view()}
            </select>
        </label>
    }
}
