//! Search Bar Component

use leptos::prelude::*;

/// Free-text search with submit and clear
///
/// The input follows `search` whenever the active query changes
/// (e.g. after back/forward navigation).
#[component]
pub fn SearchBar(
    search: Signal<String>,
    #[prop(into)] on_submit: Callback<String>,
    #[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
    let (text, set_text) = signal(String::new());

    Effect::new(move |_| set_text.set(search.get()));

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(text.get_untracked());
    };

    view! {
        <form class="search-bar" on:submit=submit>
            <input
                type="search"
                placeholder="Search by name, email, skills..."
                prop:value=move || text.get()
                on:input=move |ev| set_text.set(event_target_value(&ev))
            />
            <button type="submit">"Search"</button>
            <Show when=move || !search.get().is_empty()>
                <button
                    type="button"
                    class="clear-btn"
                    on:click=move |_| {
                        set_text.set(String::new());
                        on_clear.run(());
                    }
                >
                    "Clear"
                </button>
            </Show>
        </form>
    }
}
