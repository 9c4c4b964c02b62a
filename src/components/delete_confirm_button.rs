//! Delete Confirm Button Component

use leptos::prelude::*;

/// Two-step delete: "Delete" opens an inline prompt naming `subject`,
/// ✓ runs `on_confirm`, ✗ closes the prompt.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    /// Shown in the prompt, e.g. the résumé owner's name
    subject: Option<String>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);
    let prompt = match subject {
        Some(subject) => format!("Delete {}?", subject),
        None => "Delete?".to_string(),
    };

    move || {
        if !asking.get() {
            return view! {
                <button
                    class=button_class.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(true);
                    }
                >
                    "Delete"
                </button>
            }
            .into_any();
        }
        view! {
            <span class="delete-confirm" role="alertdialog">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    title="Confirm"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    title="Cancel"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        }
        .into_any()
    }
}
