//! Pagination Component
//!
//! Previous/next controls with a window of page numbers.

use leptos::prelude::*;

/// Page numbers shown at most at once
const WINDOW: u32 = 5;

/// Pages to show around `current`, clamped to `1..=total`
pub fn page_window(current: u32, total: u32) -> Vec<u32> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let span = WINDOW.min(total);
    let start = current.saturating_sub(span / 2).max(1).min(total - span + 1);
    (start..start + span).collect()
}

#[component]
pub fn Pagination(
    current: Signal<u32>,
    total: Signal<u32>,
    #[prop(into)] on_select: Callback<u32>,
) -> impl IntoView {
    view! {
        <Show when=move || { total.get() > 1 || current.get() > 1 }>
            <nav class="pagination">
                <button
                    class="page-btn"
                    disabled=move || current.get() <= 1
                    on:click=move |_| on_select.run(current.get_untracked().saturating_sub(1).max(1))
                >
                    "‹ Prev"
                </button>
                {move || {
                    let active = current.get();
                    page_window(active, total.get()).into_iter().map(|page| {
                        view! {
                            <button
                                class=if page == active { "page-btn active" } else { "page-btn" }
                                on:click=move |_| on_select.run(page)
                            >
                                {page}
                            </button>
                        }
                    }).collect_view()
                }}
                <button
                    class="page-btn"
                    disabled=move || current.get() >= total.get()
                    on:click=move |_| on_select.run(current.get_untracked() + 1)
                >
                    "Next ›"
                </button>
                <span class="page-info">
                    {move || format!("Page {} of {}", current.get(), total.get().max(1))}
                </span>
            </nav>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 0), Vec::<u32>::new());
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
        // Page past the end (e.g. after deleting its last record)
        assert_eq!(page_window(2, 1), vec![1]);
    }
}
