//! Navigable Location
//!
//! URL codec for the list query, the route table, and browser-history access.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::models::RecordId;

/// Characters left unescaped in query values (RFC 3986 unreserved)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const LIST_PATH: &str = "/list";
pub const ADD_PATH: &str = "/add";
const EDIT_PREFIX: &str = "/edit/";

/// Pagination/search parameters of the list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQueryState {
    /// 1-based page number
    pub page: u32,
    /// Free-text filter; empty means no filter
    pub search: String,
}

impl Default for ListQueryState {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
        }
    }
}

impl ListQueryState {
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            search: search.into(),
        }
    }

    /// Search term to send to the API, if any
    pub fn search_filter(&self) -> Option<&str> {
        if self.search.is_empty() {
            None
        } else {
            Some(&self.search)
        }
    }

    /// Encode as a query string without the leading `?`.
    ///
    /// `page` is omitted when 1 and `search` when empty.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if self.page > 1 {
            params.push(format!("page={}", self.page));
        }
        if let Some(search) = self.search_filter() {
            params.push(format!("search={}", utf8_percent_encode(search, QUERY_VALUE)));
        }
        params.join("&")
    }

    /// Decode a query string (with or without leading `?`).
    ///
    /// Unknown keys are ignored; a missing, malformed or zero page reads as 1.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match decode_component(key).as_str() {
                "page" => {
                    state.page = decode_component(value)
                        .parse::<u32>()
                        .ok()
                        .filter(|page| *page >= 1)
                        .unwrap_or(1);
                }
                "search" => state.search = decode_component(value),
                _ => {}
            }
        }
        state
    }

    /// Path plus query for the list view
    pub fn href(&self) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            LIST_PATH.to_string()
        } else {
            format!("{}?{}", LIST_PATH, query)
        }
    }
}

/// Form-style decoding: `+` is a space, then percent-decoding
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Top-level views of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` only redirects to the list
    Root,
    List,
    Add,
    Edit(RecordId),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        match trimmed {
            "" | "/" => Route::Root,
            LIST_PATH => Route::List,
            ADD_PATH => Route::Add,
            other => other
                .strip_prefix(EDIT_PREFIX)
                .and_then(|id| id.parse::<RecordId>().ok())
                .map(Route::Edit)
                .unwrap_or(Route::NotFound),
        }
    }

    /// Canonical path; `Root` resolves to the list
    pub fn path(&self) -> String {
        match self {
            Route::Root | Route::List => LIST_PATH.to_string(),
            Route::Add => ADD_PATH.to_string(),
            Route::Edit(id) => format!("{}{}", EDIT_PREFIX, id),
            Route::NotFound => "/404".to_string(),
        }
    }
}

/// Snapshot of the browser location
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationSnapshot {
    pub path: String,
    pub query: String,
}

/// Browser history access via `window.location` / `window.history`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLocation;

impl BrowserLocation {
    pub fn current(&self) -> LocationSnapshot {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return LocationSnapshot::default();
        };
        LocationSnapshot {
            path: location.pathname().unwrap_or_default(),
            query: location.search().unwrap_or_default(),
        }
    }

    /// Add a history entry without reloading
    pub fn push(&self, href: &str) {
        self.write_history(href, false);
    }

    /// Replace the current history entry without reloading
    pub fn replace(&self, href: &str) {
        self.write_history(href, true);
    }

    fn write_history(&self, href: &str, replace: bool) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            log::warn!("history API unavailable, cannot navigate to {}", href);
            return;
        };
        let result = if replace {
            history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(href))
        } else {
            history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(href))
        };
        if let Err(err) = result {
            log::warn!("failed to update history to {}: {:?}", href, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_round_trip() {
        let state = ListQueryState::new(3, "ana");
        let encoded = state.to_query_string();
        assert_eq!(encoded, "page=3&search=ana");
        assert_eq!(ListQueryState::from_query_string(&encoded), state);
    }

    #[test]
    fn test_defaults_are_omitted() {
        assert_eq!(ListQueryState::default().to_query_string(), "");
        assert_eq!(ListQueryState::new(1, "x").to_query_string(), "search=x");
        assert_eq!(ListQueryState::new(2, "").to_query_string(), "page=2");
        assert_eq!(ListQueryState::default().href(), "/list");
        assert_eq!(ListQueryState::new(2, "").href(), "/list?page=2");
    }

    #[test]
    fn test_special_characters_round_trip() {
        let state = ListQueryState::new(4, "c++ & rust = 100% josé");
        let encoded = state.to_query_string();
        assert!(!encoded.contains(' '));
        assert_eq!(ListQueryState::from_query_string(&format!("?{}", encoded)), state);
    }

    #[test]
    fn test_decoding_is_lenient() {
        assert_eq!(ListQueryState::from_query_string("?page=0&search=a+b"), ListQueryState::new(1, "a b"));
        assert_eq!(ListQueryState::from_query_string("page=abc&sort=name"), ListQueryState::default());
        assert_eq!(ListQueryState::from_query_string(""), ListQueryState::default());
    }

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse(""), Route::Root);
        assert_eq!(Route::parse("/list"), Route::List);
        assert_eq!(Route::parse("/list/"), Route::List);
        assert_eq!(Route::parse("/add"), Route::Add);
        assert_eq!(Route::parse("/edit/42"), Route::Edit(42));
        assert_eq!(Route::parse("/edit/abc"), Route::NotFound);
        assert_eq!(Route::parse("/settings"), Route::NotFound);
    }

    #[test]
    fn test_route_path_round_trip() {
        for route in [Route::List, Route::Add, Route::Edit(9)] {
            assert_eq!(Route::parse(&route.path()), route);
        }
        assert_eq!(Route::Root.path(), "/list");
    }
}
