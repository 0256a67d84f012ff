// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Search/filter controller.
//!
//! Holds the current search criteria and the latest results:
//! - Free-text changes are debounced; each keystroke restarts the timer.
//! - Filter and category changes re-query immediately.
//! - Every request gets a generation number. Starting a request aborts the
//!   previous one, and a response whose generation is no longer current is
//!   dropped, so a slow superseded search can never overwrite newer results.
//!
//! Results are published on a `watch` channel as `SearchSnapshot`s.

use crate::models::{Category, Recipe, SearchFilters, SearchQuery};
use crate::services::RecipeService;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// What the results panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnapshot {
    /// Generation of the request these results (or the pending load) belong to
    pub generation: u64,
    /// A request is outstanding
    pub loading: bool,
    pub query: SearchQuery,
    pub recipes: Vec<Recipe>,
}

/// Shared handle to the controller. Clones drive the same state.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    recipes: RecipeService,
    debounce: Duration,
    state: Mutex<ControllerState>,
    snapshot_tx: watch::Sender<SearchSnapshot>,
}

#[derive(Default)]
struct ControllerState {
    query: SearchQuery,
    /// Latest typed text still waiting out the debounce
    pending_text: Option<String>,
    /// Bumped on every keystroke; a debounce timer only fires if still current
    debounce_seq: u64,
    debounce_task: Option<JoinHandle<()>>,
    generation: u64,
    request_task: Option<JoinHandle<()>>,
}

impl SearchController {
    pub fn new(recipes: RecipeService, debounce: Duration) -> Self {
        let state = ControllerState::default();
        let (snapshot_tx, _) = watch::channel(SearchSnapshot {
            generation: 0,
            loading: false,
            query: state.query.clone(),
            recipes: Vec::new(),
        });

        Self {
            inner: Arc::new(ControllerInner {
                recipes,
                debounce,
                state: Mutex::new(state),
                snapshot_tx,
            }),
        }
    }

    /// Run the initial search for the default criteria.
    pub fn start(&self) {
        let mut state = self.lock();
        self.issue(&mut state);
    }

    /// Current results and criteria.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Text typed so far that has not been searched yet.
    pub fn pending_text(&self) -> Option<String> {
        self.lock().pending_text.clone()
    }

    /// Free-text input changed. Searches after the debounce delay unless more
    /// input arrives first. Blank input cancels any pending search.
    pub fn set_query(&self, text: &str) {
        let text = text.trim().to_string();
        let mut state = self.lock();

        state.debounce_seq += 1;
        if let Some(task) = state.debounce_task.take() {
            task.abort();
        }

        if text.is_empty() {
            state.pending_text = None;
            return;
        }

        state.pending_text = Some(text.clone());
        let seq = state.debounce_seq;
        let controller = self.clone();
        let delay = self.inner.debounce;

        state.debounce_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.fire_debounced(seq, text);
        }));
    }

    /// Search for `text` right away (search button, Enter key).
    ///
    /// Returns `false` and does nothing for blank input.
    pub fn submit_query(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        let mut state = self.lock();
        state.debounce_seq += 1;
        if let Some(task) = state.debounce_task.take() {
            task.abort();
        }
        state.pending_text = None;
        state.query.query = text.to_string();
        self.issue(&mut state);
        true
    }

    /// Replace the filter set and re-query immediately.
    pub fn set_filters(&self, filters: SearchFilters) {
        let mut state = self.lock();
        state.query.filters = filters.normalized();
        self.issue(&mut state);
    }

    pub fn clear_filters(&self) {
        self.set_filters(SearchFilters::default());
    }

    /// Switch category and re-query immediately.
    pub fn set_category(&self, category: Category) {
        let mut state = self.lock();
        state.query.category = category;
        self.issue(&mut state);
    }

    fn fire_debounced(&self, seq: u64, text: String) {
        let mut state = self.lock();
        if state.debounce_seq != seq {
            // Superseded by a later keystroke.
            return;
        }
        state.debounce_task = None;
        state.pending_text = None;
        state.query.query = text;
        self.issue(&mut state);
    }

    /// Start a request for the current criteria, superseding any in flight.
    fn issue(&self, state: &mut ControllerState) {
        state.generation += 1;
        if let Some(task) = state.request_task.take() {
            task.abort();
        }

        let generation = state.generation;
        let query = state.query.clone();

        self.inner.snapshot_tx.send_modify(|snapshot| {
            snapshot.generation = generation;
            snapshot.loading = true;
            snapshot.query = query.clone();
        });

        tracing::debug!(
            generation,
            query = %query.query,
            category = %query.category,
            "Issuing recipe search"
        );

        let controller = self.clone();
        state.request_task = Some(tokio::spawn(async move {
            let recipes = controller.inner.recipes.search(&query).await;
            controller.publish(generation, recipes);
        }));
    }

    fn publish(&self, generation: u64, recipes: Vec<Recipe>) {
        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(
                generation,
                current = state.generation,
                "Dropping stale search response"
            );
            return;
        }
        state.request_task = None;

        self.inner.snapshot_tx.send_modify(|snapshot| {
            snapshot.loading = false;
            snapshot.recipes = recipes;
        });
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
