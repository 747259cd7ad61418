use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::watch;

use crate::api::SearchBackend;
use crate::data_models::SearchRequest;
use crate::error::{Error, Result};
use crate::presenter::{ResultsContent, render_results};

pub const RETRY_MESSAGE: &str = "An error occurred. Please try again.";

/// Everything the results area shows at a given moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsView {
    pub loading: bool,
    pub content: ResultsContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The response (or its error) is what the view now shows.
    Rendered,
    /// A newer submission started before this one resolved; its result was dropped.
    Superseded,
}

/// Drives searches and publishes the resulting view state.
///
/// Submissions may overlap. Each one gets a sequence number when it starts and
/// only the latest may write results, so a slow earlier request cannot
/// overwrite a newer one. The loading flag stays up while anything is in flight.
pub struct SearchController {
    backend: Arc<dyn SearchBackend>,
    view: watch::Sender<ResultsView>,
    latest: AtomicU64,
    in_flight: AtomicUsize,
}

impl SearchController {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let (view, _) = watch::channel(ResultsView::default());
        Self {
            backend,
            view,
            latest: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ResultsView> {
        self.view.subscribe()
    }

    pub fn view(&self) -> ResultsView {
        self.view.borrow().clone()
    }

    pub async fn submit_search(&self, keyword: &str) -> Result<SubmitOutcome> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            log::warn!("refusing to search for an empty keyword");
            return Err(Error::EmptyKeyword);
        }

        let (seq, _loading) = self.begin();
        let request = SearchRequest::new(keyword);
        let content = match self.backend.search(&request).await {
            Ok(response) => render_results(response.results.as_deref(), keyword),
            Err(Error::Rejected { status, message }) => {
                ResultsContent::Error(message.unwrap_or_else(|| rejected_message(status)))
            }
            Err(e) => {
                log::error!("search for {keyword:?} failed, error: {:#}", e);
                ResultsContent::Error(RETRY_MESSAGE.to_string())
            }
        };

        let rendered = self.view.send_if_modified(|view| {
            if self.latest.load(Ordering::SeqCst) != seq {
                return false;
            }
            view.content = content;
            true
        });
        if rendered {
            Ok(SubmitOutcome::Rendered)
        } else {
            log::info!("dropping superseded results for {keyword:?} (request #{seq})");
            Ok(SubmitOutcome::Superseded)
        }
    }

    /// Claims the next sequence number, clears the results and raises the
    /// loading flag, all under the view lock.
    fn begin(&self) -> (u64, LoadingGuard<'_>) {
        let mut seq = 0;
        self.view.send_modify(|view| {
            seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            view.content = ResultsContent::Blank;
            view.loading = true;
        });
        (seq, LoadingGuard { controller: self })
    }
}

fn rejected_message(status: u16) -> String {
    format!("Request failed (HTTP {status})")
}

/// Lowers the loading flag once the last in-flight submission ends, however it ends.
struct LoadingGuard<'a> {
    controller: &'a SearchController,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let controller = self.controller;
        controller.view.send_modify(|view| {
            let remaining = controller.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
            view.loading = remaining > 0;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_without_message_names_status() {
        assert_eq!(rejected_message(502), "Request failed (HTTP 502)");
    }

    #[test]
    fn starts_blank_and_idle() {
        struct Unreachable;

        #[async_trait::async_trait]
        impl SearchBackend for Unreachable {
            async fn search(
                &self,
                _request: &SearchRequest,
            ) -> Result<crate::data_models::SearchResponse> {
                unreachable!("no search expected")
            }
        }

        let controller = SearchController::new(Arc::new(Unreachable));
        assert_eq!(controller.view(), ResultsView::default());
        assert!(!controller.view().loading);
    }
}
