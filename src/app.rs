//! Résumé Desk App
//!
//! Root component: navigation bar plus the view for the current route.

use leptos::prelude::*;
use log::info;

use crate::api::HttpResumeApi;
use crate::components::{NavBar, ResumeForm, ResumeList};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::form::FormMode;
use crate::location::Route;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    info!("[app] API at {}", config.api_base_url);
    let ctx = AppContext::new(HttpResumeApi::new(config.api_base_url));
    provide_context(ctx);

    // Back/forward
    let _popstate = window_event_listener(leptos::ev::popstate, move |_| ctx.sync_from_browser());

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">
                {move || match ctx.route.get() {
                    Route::Root | Route::List => view! { <ResumeList /> }.into_any(),
                    Route::Add => view! { <ResumeForm mode=FormMode::Add /> }.into_any(),
                    Route::Edit(id) => view! { <ResumeForm mode=FormMode::Edit(id) /> }.into_any(),
                    Route::NotFound => view! {
                        <section class="not-found">
                            <h1>"Page not found"</h1>
                            <a href="/list" on:click=move |ev| {
                                ev.prevent_default();
                                ctx.navigate(Route::List);
                            }>
                                "Back to the list"
                            </a>
                        </section>
                    }
                    .into_any(),
                }}
            </main>
        </div>
    }
}
