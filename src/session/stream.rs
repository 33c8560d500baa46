//! Paginated listing stream over a content repository.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::RequestSequencer;
use crate::pipeline::{FilterSpec, Page, SortKey};
use crate::repository::ContentRepository;

/// What a listing consumer renders.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub filter: FilterSpec,
    pub sort: SortKey,
    pub limit: usize,
    pub loading: bool,
    pub page: Option<Page<T>>,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            sort: SortKey::default(),
            limit: 10,
            loading: false,
            page: None,
            error: None,
        }
    }
}

/// Issues listing requests and keeps only the newest result.
///
/// A response is applied only if no later request was submitted in the
/// meantime and the stream has not been closed.
pub struct QueryStream<R: ContentRepository + ?Sized + 'static> {
    repo: Arc<R>,
    sequencer: Arc<RequestSequencer>,
    state: Arc<watch::Sender<QueryState<R::Item>>>,
}

impl<R: ContentRepository + ?Sized + 'static> QueryStream<R> {
    pub fn new(repo: Arc<R>) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            repo,
            sequencer: Arc::new(RequestSequencer::new()),
            state: Arc::new(state),
        }
    }

    /// Request one page for `filter`, superseding any in-flight request.
    pub fn submit(
        &self,
        filter: FilterSpec,
        sort: SortKey,
        page: usize,
        limit: usize,
    ) -> JoinHandle<()> {
        let token = self.sequencer.issue();
        self.state.send_modify(|state| {
            state.filter = filter.clone();
            state.sort = sort;
            state.limit = limit;
            state.loading = true;
            state.error = None;
        });

        let repo = Arc::clone(&self.repo);
        let sequencer = Arc::clone(&self.sequencer);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let result = repo.list(&filter, sort, page, limit).await;

            let applied = state.send_if_modified(|state| {
                if !sequencer.is_current(token) {
                    return false;
                }
                state.loading = false;
                match result {
                    Ok(page) => {
                        state.page = Some(page);
                        state.error = None;
                    }
                    Err(e) => {
                        tracing::warn!("Listing request failed: {}", e);
                        state.page = None;
                        state.error = Some(e.message());
                    }
                }
                true
            });

            if !applied {
                tracing::debug!("Discarded superseded listing response #{}", token.sequence());
            }
        })
    }

    /// Fetch the next page of the current query, if there is one and nothing is loading.
    pub fn load_more(&self) -> Option<JoinHandle<()>> {
        let (filter, sort, limit, next_page) = {
            let state = self.state.borrow();
            let page = state.page.as_ref()?;
            if state.loading || !page.pagination.has_next {
                return None;
            }
            (
                state.filter.clone(),
                state.sort,
                state.limit,
                page.pagination.page + 1,
            )
        };
        Some(self.submit(filter, sort, next_page, limit))
    }

    pub fn state(&self) -> QueryState<R::Item> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<R::Item>> {
        self.state.subscribe()
    }

    /// Stop publishing results; in-flight responses are dropped.
    pub fn close(&self) {
        self.sequencer.close();
    }
}

impl<R: ContentRepository + ?Sized + 'static> Drop for QueryStream<R> {
    fn drop(&mut self) {
        self.sequencer.close();
    }
}
