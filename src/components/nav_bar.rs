//! Navigation Bar Component

use leptos::prelude::*;

use crate::context::AppContext;
use crate::location::Route;

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = AppContext::use_context();

    let link = move |route: Route, label: &'static str| {
        let href = route.path();
        let is_active = move || match (ctx.route.get(), route) {
            (Route::Root | Route::List, Route::List) => true,
            (current, target) => current == target,
        };
        view! {
            <a
                href=href
                class=move || if is_active() { "nav-link active" } else { "nav-link" }
                on:click=move |ev| {
                    ev.prevent_default();
                    ctx.navigate(route);
                }
            >
                {label}
            </a>
        }
    };

    view! {
        <header class="nav-bar">
            <span class="nav-title">"Résumé Desk"</span>
            <nav class="nav-links">
                {link(Route::List, "Résumés")}
                {link(Route::Add, "Add résumé")}
            </nav>
        </header>
    }
}
