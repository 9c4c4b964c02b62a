//! Application Context
//!
//! Shared state provided via Leptos Context API: the API client, the
//! current route and back/forward navigation notifications.

use leptos::prelude::*;
use log::debug;

use crate::api::HttpResumeApi;
use crate::location::{BrowserLocation, ListQueryState, Route};

/// Back/forward navigation notice; `seq` increases on every popstate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationEvent {
    pub seq: u64,
    pub query: ListQueryState,
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<HttpResumeApi, LocalStorage>,
    /// Current top-level view - read
    pub route: ReadSignal<Route>,
    /// Current top-level view - write
    set_route: WriteSignal<Route>,
    /// Last browser navigation - read
    pub navigation: ReadSignal<NavigationEvent>,
    /// Last browser navigation - write
    set_navigation: WriteSignal<NavigationEvent>,
    location: BrowserLocation,
}

impl AppContext {
    pub fn new(api: HttpResumeApi) -> Self {
        let location = BrowserLocation;
        let route = resolve_route(&location);
        let (route, set_route) = signal(route);
        let (navigation, set_navigation) = signal(NavigationEvent::default());
        Self {
            api: StoredValue::new_local(api),
            route,
            set_route,
            navigation,
            set_navigation,
            location,
        }
    }

    /// Get the context provided by `App`
    pub fn use_context() -> Self {
        expect_context::<AppContext>()
    }

    pub fn api(&self) -> HttpResumeApi {
        self.api.get_value()
    }

    /// List query currently in the address bar
    pub fn current_query(&self) -> ListQueryState {
        ListQueryState::from_query_string(&self.location.current().query)
    }

    /// Switch views, adding a history entry
    pub fn navigate(&self, route: Route) {
        self.navigate_href(&route.path());
    }

    pub fn navigate_href(&self, href: &str) {
        debug!("[nav] push {}", href);
        self.location.push(href);
        self.set_route_if_changed(Route::parse(href));
    }

    /// Record a new list URL without changing views
    pub fn push_location(&self, href: &str) {
        debug!("[nav] push {}", href);
        self.location.push(href);
    }

    /// Re-read the browser location after back/forward
    pub fn sync_from_browser(&self) {
        let route = resolve_route(&self.location);
        debug!("[nav] popstate to {:?}", route);
        self.set_route_if_changed(route);
        let query = self.current_query();
        self.set_navigation.update(|nav| {
            nav.seq += 1;
            nav.query = query;
        });
    }

    fn set_route_if_changed(&self, route: Route) {
        if self.route.get_untracked() != route {
            self.set_route.set(route);
        }
    }
}

/// Current route, turning `/` into `/list` in place
fn resolve_route(location: &BrowserLocation) -> Route {
    let snapshot = location.current();
    match Route::parse(&snapshot.path) {
        Route::Root => {
            location.replace(&format!("{}{}", Route::List.path(), snapshot.query));
            Route::List
        }
        route => route,
    }
}
