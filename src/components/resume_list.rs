//! Résumé List Component
//!
//! Search, paginated list and row actions, all driven through [`ListSync`].

use leptos::prelude::*;
use log::Level;

use crate::components::{Pagination, ResumeRow, SearchBar};
use crate::context::AppContext;
use crate::list_sync::{ListEvent, ListSync};
use crate::location::Route;

/// Recent warnings shown under a load error
const DIAGNOSTIC_LINES: usize = 5;

#[component]
pub fn ResumeList() -> impl IntoView {
    let ctx = AppContext::use_context();
    let sync = ListSync::new(ctx);
    let state = sync.state();

    // First run loads the URL's query; later runs follow back/forward.
    Effect::new(move |prev: Option<u64>| {
        let nav = ctx.navigation.get();
        match prev {
            None => sync.dispatch(ListEvent::Mounted(ctx.current_query())),
            Some(seen) if seen != nav.seq && ctx.route.get_untracked() == Route::List => {
                sync.dispatch(ListEvent::Navigated(nav.query));
            }
            Some(_) => {}
        }
        nav.seq
    });

    let search = Signal::derive(move || state.with(|c| c.query().search.clone()));
    let page = Signal::derive(move || state.with(|c| c.query().page));
    let total_pages = Signal::derive(move || state.with(|c| c.total_pages()));
    let loading = move || state.with(|c| c.is_loading());
    let error = move || state.with(|c| c.error().map(|e| e.to_string()));
    let items = move || state.with(|c| c.items().to_vec());
    let is_empty = move || state.with(|c| c.loaded().is_some() && c.items().is_empty());

    view! {
        <section class="resume-list">
            <h1>"Résumés"</h1>
            <Show when=move || state.with(|c| c.loaded().is_some())>
                <p class="result-count">
                    {move || match state.with(|c| c.total_count()) {
                        1 => "1 résumé".to_string(),
                        n => format!("{} résumés", n),
                    }}
                </p>
            </Show>
            <SearchBar
                search=search
                on_submit=move |text: String| sync.dispatch(ListEvent::SearchSubmitted(text))
                on_clear=move |_: ()| sync.dispatch(ListEvent::SearchCleared)
            />

            <Show when=loading>
                <div class="loading">"Loading résumés..."</div>
            </Show>

            {move || error().map(|message| view! {
                <div class="alert alert-error">
                    <span>"Failed to load résumés: "{message}</span>
                    <button class="retry-btn" on:click=move |_| sync.dispatch(ListEvent::Retry)>
                        "Retry"
                    </button>
                    <details class="diagnostics">
                        <summary>"Details"</summary>
                        <ul>
                            {console_logger::recent_at(Level::Warn, DIAGNOSTIC_LINES)
                                .into_iter()
                                .map(|entry| view! { <li><code>{entry.to_string()}</code></li> })
                                .collect_view()}
                        </ul>
                    </details>
                </div>
            })}

            <Show when=move || is_empty() && !loading()>
                <p class="empty">
                    {move || if search.get().is_empty() {
                        "No résumés yet."
                    } else {
                        "No résumés match your search."
                    }}
                </p>
            </Show>

            <ul class="resume-rows" class:stale=loading>
                <For
                    each=items
                    key=|record| (record.id, record.updated_at)
                    children=move |record| {
                        let id = record.id;
                        view! {
                            <ResumeRow
                                record=record
                                on_edit=move |_: ()| ctx.navigate(Route::Edit(id))
                                on_delete=move |_: ()| sync.delete(id)
                            />
                        }
                    }
                />
            </ul>

            <Pagination
                current=page
                total=total_pages
                on_select=move |page: u32| sync.dispatch(ListEvent::PageSelected(page))
            />
        </section>
    }
}
