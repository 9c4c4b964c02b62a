//! Résumé Form Component
//!
//! Add/Edit form over a [`FormSync`]. The file picker reads the chosen file
//! into memory so it can go out as a multipart part.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::components::{source_options, status_options, ChoiceSelect};
use crate::context::AppContext;
use crate::form::{FormMode, FormStatus, FormSync, TextField, ACCEPTED_FILE_TYPES};
use crate::location::Route;
use crate::models::{FileAttachment, ResumeSource, ResumeStatus};

/// Read a picked file fully into memory
async fn read_attachment(file: &web_sys::File) -> Result<FileAttachment, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime_type = file.type_();
    Ok(FileAttachment {
        name: file.name(),
        mime_type: (!mime_type.is_empty()).then_some(mime_type),
        bytes,
    })
}

fn route_for(mode: FormMode) -> Route {
    match mode {
        FormMode::Add => Route::Add,
        FormMode::Edit(id) => Route::Edit(id),
    }
}

#[component]
pub fn ResumeForm(mode: FormMode) -> impl IntoView {
    let ctx = AppContext::use_context();
    let sync = FormSync::new(ctx, mode);
    let state = sync.state();
    sync.open(mode);

    let title = match mode {
        FormMode::Add => "Add résumé",
        FormMode::Edit(_) => "Edit résumé",
    };

    // Leave only if the user is still on this form
    let on_done = Callback::new(move |_: ()| {
        if ctx.route.get_untracked() == route_for(mode) {
            ctx.navigate(Route::List);
        }
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            state.update(|f| f.select_file(None));
            return;
        };
        spawn_local(async move {
            match read_attachment(&file).await {
                Ok(attachment) => {
                    state.try_update(|f| f.select_file(Some(attachment)));
                }
                Err(err) => warn!("[form] could not read {}: {}", file.name(), err),
            }
        });
    };

    let text_inputs = TextField::ALL
        .into_iter()
        .map(|field| {
            let value = move || state.with(|f| f.text(field).to_string());
            let set = move |ev: leptos::ev::Event| {
                state.update(|f| f.set_text(field, event_target_value(&ev)));
            };
            let control = match field.input_type() {
                Some(input_type) => view! {
                    <input type=input_type prop:value=value on:input=set />
                }
                .into_any(),
                None => view! {
                    <textarea rows=field.rows() prop:value=value on:input=set></textarea>
                }
                .into_any(),
            };
            view! {
                <label class="form-field">
                    <span class="form-label">{field.label()}</span>
                    {control}
                </label>
            }
        })
        .collect_view();

    view! {
        <section class="resume-form">
            <h1>{title}</h1>

            <Show when=move || state.with(|f| f.status() == &FormStatus::Loading)>
                <div class="loading">"Loading résumé..."</div>
            </Show>

            {move || state.with(|f| f.success_message().map(str::to_string)).map(|message| view! {
                <div class="alert alert-success">{message}</div>
            })}
            {move || state.with(|f| f.error_message()).map(|message| view! {
                <div class="alert alert-error">{message}</div>
            })}

            <form
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    sync.submit(on_done);
                }
            >
                {text_inputs}

                <ChoiceSelect
                    label="Source"
                    options=source_options()
                    selected=Signal::derive(move || state.with(|f| f.fields().source.as_str()))
                    on_change=move |value: String| {
                        if let Some(source) = ResumeSource::from_str(&value) {
                            state.update(|f| f.set_source(source));
                        }
                    }
                />
                <ChoiceSelect
                    label="Status"
                    options=status_options()
                    selected=Signal::derive(move || state.with(|f| f.fields().status.as_str()))
                    on_change=move |value: String| {
                        if let Some(status) = ResumeStatus::from_str(&value) {
                            state.update(|f| f.set_status(status));
                        }
                    }
                />

                <label class="form-field">
                    <span class="form-label">
                        {match mode {
                            FormMode::Add => "Résumé file",
                            FormMode::Edit(_) => "Replace file (optional)",
                        }}
                    </span>
                    <input type="file" accept=ACCEPTED_FILE_TYPES on:change=on_file_change />
                </label>
                {move || state.with(|f| {
                    let label = f.file_label()?;
                    Some(match f.original_file_url() {
                        Some(url) if f.selected_file().is_none() => view! {
                            <p class="current-file">
                                "Current file: "
                                <a href=url.to_string() target="_blank" rel="noopener noreferrer">{label}</a>
                            </p>
                        }
                        .into_any(),
                        _ => view! { <p class="selected-file">"Selected: "{label}</p> }.into_any(),
                    })
                })}

                <div class="form-actions">
                    <button type="submit" disabled=move || !state.with(|f| f.can_submit())>
                        {move || match (mode, state.with(|f| f.status() == &FormStatus::Submitting)) {
                            (_, true) => "Saving...",
                            (FormMode::Add, false) => "Add résumé",
                            (FormMode::Edit(_), false) => "Save changes",
                        }}
                    </button>
                    <button type="button" class="cancel-btn" on:click=move |_| ctx.navigate(Route::List)>
                        "Cancel"
                    </button>
                </div>
            </form>
        </section>
    }
}
