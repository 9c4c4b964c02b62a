//! List Synchronization
//!
//! Keeps the list query (page + search) consistent between memory, the URL
//! and the API. All changes go through one reducer, [`ListController::dispatch`],
//! whose events are tagged by where they came from. The reducer returns
//! effects (push a URL, start a fetch) that the host executes.
//!
//! Navigation events never push the URL back, so the URL → state path cannot
//! feed into the state → URL path. Fetch results carry the id of the request
//! they answer; only the latest request may update the view.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};

use crate::api::{ApiError, ResumeApi};
use crate::config::ITEMS_PER_PAGE;
use crate::context::AppContext;
use crate::location::ListQueryState;
use crate::models::{ListResult, RecordId, ResumeRecord};

/// Identity of an issued list fetch; increases monotonically
pub type RequestId = u64;

/// Where a state change originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    User,
    Navigation,
    Network,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// List view shown with the query currently in the URL
    Mounted(ListQueryState),
    /// URL changed by back/forward navigation
    Navigated(ListQueryState),
    SearchSubmitted(String),
    SearchCleared,
    PageSelected(u32),
    /// A record was deleted server-side; reload the current page
    RecordDeleted(RecordId),
    Retry,
    FetchSucceeded { request: RequestId, result: ListResult },
    FetchFailed { request: RequestId, error: ApiError },
}

impl ListEvent {
    pub fn source(&self) -> ChangeSource {
        match self {
            ListEvent::Mounted(_) | ListEvent::Navigated(_) => ChangeSource::Navigation,
            ListEvent::SearchSubmitted(_)
            | ListEvent::SearchCleared
            | ListEvent::PageSelected(_)
            | ListEvent::RecordDeleted(_)
            | ListEvent::Retry => ChangeSource::User,
            ListEvent::FetchSucceeded { .. } | ListEvent::FetchFailed { .. } => ChangeSource::Network,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub query: ListQueryState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEffect {
    /// Add a history entry for this list href
    PushLocation(String),
    Fetch(FetchRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListStatus {
    Idle,
    Loading,
    Failed(ApiError),
}

/// Last successfully loaded page and the query that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage {
    pub query: ListQueryState,
    pub result: ListResult,
}

#[derive(Debug, Clone)]
pub struct ListController {
    /// Active query; the URL always reflects it once effects have run
    query: ListQueryState,
    in_flight: Option<FetchRequest>,
    next_request: RequestId,
    loaded: Option<LoadedPage>,
    status: ListStatus,
    items_per_page: u32,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(ITEMS_PER_PAGE)
    }
}

impl ListController {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            query: ListQueryState::default(),
            in_flight: None,
            next_request: 1,
            loaded: None,
            status: ListStatus::Idle,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn query(&self) -> &ListQueryState {
        &self.query
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ListStatus::Loading)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.status {
            ListStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn loaded(&self) -> Option<&LoadedPage> {
        self.loaded.as_ref()
    }

    pub fn items(&self) -> &[ResumeRecord] {
        self.loaded.as_ref().map(|page| page.result.items.as_slice()).unwrap_or(&[])
    }

    pub fn total_count(&self) -> u64 {
        self.loaded.as_ref().map(|page| page.result.total_count).unwrap_or(0)
    }

    pub fn total_pages(&self) -> u32 {
        self.loaded
            .as_ref()
            .map(|page| page.result.total_pages(self.items_per_page))
            .unwrap_or(0)
    }

    pub fn dispatch(&mut self, event: ListEvent) -> Vec<ListEffect> {
        debug!("[list] {:?} event: {:?}", event.source(), event);
        match event {
            ListEvent::Mounted(query) => {
                self.query = query;
                vec![self.issue_fetch()]
            }
            ListEvent::Navigated(query) => {
                if query == self.query {
                    debug!("[list] navigation matches current query, nothing to do");
                    return Vec::new();
                }
                self.reconcile(query)
            }
            ListEvent::SearchSubmitted(search) => self.user_change(ListQueryState::new(1, search)),
            ListEvent::SearchCleared => self.user_change(ListQueryState::default()),
            ListEvent::PageSelected(page) => {
                let next = ListQueryState::new(page, self.query.search.clone());
                self.user_change(next)
            }
            // Page is kept even if the deletion emptied it.
            ListEvent::RecordDeleted(_) | ListEvent::Retry => vec![self.issue_fetch()],
            ListEvent::FetchSucceeded { request, result } => {
                let Some(query) = self.take_current(request) else {
                    return Vec::new();
                };
                self.loaded = Some(LoadedPage { query, result });
                self.status = ListStatus::Idle;
                Vec::new()
            }
            ListEvent::FetchFailed { request, error } => {
                if self.take_current(request).is_none() {
                    return Vec::new();
                }
                warn!("[list] fetch failed: {}", error);
                self.status = ListStatus::Failed(error);
                Vec::new()
            }
        }
    }

    fn user_change(&mut self, next: ListQueryState) -> Vec<ListEffect> {
        let mut effects = Vec::new();
        if next != self.query {
            effects.push(ListEffect::PushLocation(next.href()));
        }
        effects.extend(self.reconcile(next));
        effects
    }

    /// Adopt `next` as the query, fetching unless it is already loaded or in flight
    fn reconcile(&mut self, next: ListQueryState) -> Vec<ListEffect> {
        if next == self.query && self.is_settled_on(&next) {
            debug!("[list] query unchanged, skipping fetch");
            return Vec::new();
        }
        self.query = next;
        vec![self.issue_fetch()]
    }

    fn is_settled_on(&self, query: &ListQueryState) -> bool {
        if let Some(request) = &self.in_flight {
            return request.query == *query;
        }
        matches!(self.status, ListStatus::Idle)
            && self.loaded.as_ref().is_some_and(|page| page.query == *query)
    }

    fn issue_fetch(&mut self) -> ListEffect {
        let request = FetchRequest {
            id: self.next_request,
            query: self.query.clone(),
        };
        self.next_request += 1;
        if let Some(previous) = &self.in_flight {
            debug!("[list] request {} supersedes {}", request.id, previous.id);
        }
        self.in_flight = Some(request.clone());
        self.status = ListStatus::Loading;
        ListEffect::Fetch(request)
    }

    /// Clear the in-flight request if `request` is it; stale ids yield `None`
    fn take_current(&mut self, request: RequestId) -> Option<ListQueryState> {
        match &self.in_flight {
            Some(current) if current.id == request => self.in_flight.take().map(|r| r.query),
            _ => {
                debug!("[list] discarding stale response for request {}", request);
                None
            }
        }
    }
}

/// Perform a list fetch and turn its outcome into the matching event
pub async fn run_fetch<A: ResumeApi + ?Sized>(api: &A, request: &FetchRequest) -> ListEvent {
    match api.list(request.query.page, &request.query.search).await {
        Ok(result) => ListEvent::FetchSucceeded {
            request: request.id,
            result,
        },
        Err(error) => ListEvent::FetchFailed {
            request: request.id,
            error,
        },
    }
}

/// Delete a record; on success the returned event triggers a reload
pub async fn delete_record<A: ResumeApi + ?Sized>(api: &A, id: RecordId) -> Result<ListEvent, ApiError> {
    api.delete(id).await?;
    Ok(ListEvent::RecordDeleted(id))
}

// ========================
// Reactive binding
// ========================

/// List controller living in a signal, with effects run against the browser and API
#[derive(Clone, Copy)]
pub struct ListSync {
    state: RwSignal<ListController>,
    ctx: AppContext,
}

impl ListSync {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            state: RwSignal::new(ListController::new(ITEMS_PER_PAGE)),
            ctx,
        }
    }

    pub fn state(&self) -> RwSignal<ListController> {
        self.state
    }

    pub fn dispatch(&self, event: ListEvent) {
        // The signal is gone once the list view unmounts; late events are dropped.
        let Some(effects) = self.state.try_update(|controller| controller.dispatch(event)) else {
            return;
        };
        for effect in effects {
            self.run(effect);
        }
    }

    /// Delete with a one-shot alert on failure; list state is untouched on error
    pub fn delete(&self, id: RecordId) {
        let this = *self;
        let api = self.ctx.api();
        spawn_local(async move {
            match delete_record(&api, id).await {
                Ok(event) => this.dispatch(event),
                Err(err) => {
                    warn!("[list] delete of {} failed: {}", id, err);
                    alert(&format!("Failed to delete résumé: {}", err));
                }
            }
        });
    }

    fn run(&self, effect: ListEffect) {
        match effect {
            ListEffect::PushLocation(href) => self.ctx.push_location(&href),
            ListEffect::Fetch(request) => {
                let this = *self;
                let api = self.ctx.api();
                spawn_local(async move {
                    let event = run_fetch(&api, &request).await;
                    this.dispatch(event);
                });
            }
        }
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
