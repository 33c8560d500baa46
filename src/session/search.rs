//! Debounced search-as-you-type session.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::RequestSequencer;
use crate::debounce::Debouncer;
use crate::models::SearchResult;
use crate::repository::SearchRepository;

/// What a search box renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Latest raw input, before debouncing.
    pub query: String,
    pub results: Vec<SearchResult>,
    pub loading: bool,
}

struct Shared {
    repo: Arc<SearchRepository>,
    sequencer: RequestSequencer,
    state: watch::Sender<SearchState>,
    limit: usize,
}

/// Runs a global search whenever the typed query settles.
///
/// Input passes through a [`Debouncer`]; each settled query issues one
/// request, and only the newest request may publish results. A blank query
/// clears the results without searching. Dropping the session stops all
/// publishing.
pub struct SearchSession {
    input: Debouncer<String>,
    shared: Arc<Shared>,
    driver: JoinHandle<()>,
}

impl SearchSession {
    pub fn new(repo: Arc<SearchRepository>, delay: Duration, limit: usize) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        let shared = Arc::new(Shared {
            repo,
            sequencer: RequestSequencer::new(),
            state,
            limit,
        });

        let input = Debouncer::new(String::new(), delay);
        let mut settled = input.subscribe();
        let driver_shared = Arc::clone(&shared);

        let driver = tokio::spawn(async move {
            while settled.changed().await.is_ok() {
                let state = settled.borrow_and_update().clone();
                // Arming only flips `pending`; act on settlements.
                if state.pending {
                    continue;
                }
                Shared::search(&driver_shared, state.settled);
            }
        });

        Self {
            input,
            shared,
            driver,
        }
    }

    /// Feed the raw text of the search box.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.shared
            .state
            .send_if_modified(|state| replace_if_changed(&mut state.query, &query));
        self.input.set(query);
    }

    /// Empty the box and the results immediately, superseding in-flight requests.
    pub fn clear(&mut self) {
        self.shared.sequencer.issue();
        self.shared.state.send_replace(SearchState::default());
        self.input.set(String::new());
    }

    /// Whether typed input is still waiting out the debounce delay.
    pub fn is_debouncing(&self) -> bool {
        self.input.is_pending()
    }

    pub fn state(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.shared.sequencer.close();
        self.driver.abort();
    }
}

impl Shared {
    fn search(this: &Arc<Self>, query: String) {
        let token = this.sequencer.issue();

        if query.trim().is_empty() {
            this.state.send_if_modified(|state| {
                if !this.sequencer.is_current(token) {
                    return false;
                }
                state.results.clear();
                state.loading = false;
                true
            });
            return;
        }

        this.state.send_if_modified(|state| {
            let was_loading = state.loading;
            state.loading = true;
            !was_loading
        });

        let shared = Arc::clone(this);
        tokio::spawn(async move {
            let results = shared.repo.global_search(&query, shared.limit).await;

            let applied = shared.state.send_if_modified(|state| {
                if !shared.sequencer.is_current(token) {
                    return false;
                }
                state.results = results;
                state.loading = false;
                true
            });

            if applied {
                tracing::debug!("Search for {:?} settled", query);
            } else {
                tracing::debug!("Discarded superseded search for {:?}", query);
            }
        });
    }
}

fn replace_if_changed(slot: &mut String, value: &str) -> bool {
    if slot == value {
        return false;
    }
    value.clone_into(slot);
    true
}
