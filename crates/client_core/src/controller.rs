use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::domain::SimulationRequest;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    error::{InputError, SubmitError},
    input::parse_form,
    protocol_client::SimulationBackend,
    view::{ErrorView, SuccessView, ViewState},
};

/// A submission that has entered `Loading` but not yet resolved.
#[derive(Debug)]
pub struct PendingSubmission {
    ticket: u64,
    request: Result<SimulationRequest, InputError>,
}

impl PendingSubmission {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: u64,
    /// The view this submission produced.
    pub view: ViewState,
    /// False when a newer submission had already taken over the view.
    pub applied: bool,
}

/// Drives one form: Loading on submit, then Success or Error.
///
/// Only the most recent submission may change the view; a response that
/// resolves after a newer submission started is dropped.
pub struct FormController {
    backend: Arc<dyn SimulationBackend>,
    state: watch::Sender<ViewState>,
    latest_ticket: AtomicU64,
}

impl FormController {
    pub fn new(backend: Arc<dyn SimulationBackend>) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            backend,
            state,
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn current(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Enters `Loading` right away, before any network work.
    pub fn begin(&self, location: &str, surface_area: &str) -> PendingSubmission {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(ticket, ViewState::Loading);
        PendingSubmission {
            ticket,
            request: parse_form(location, surface_area),
        }
    }

    pub async fn finish(&self, pending: PendingSubmission) -> Submission {
        let PendingSubmission { ticket, request } = pending;
        let outcome = match request {
            Ok(request) => self
                .backend
                .simulate(&request)
                .await
                .map(|response| SuccessView::from_response(&response, &request.location)),
            Err(err) => Err(SubmitError::from(err)),
        };

        let view = match outcome {
            Ok(view) => {
                info!(ticket, headline = %view.headline, "form: simulation succeeded");
                ViewState::Success(view)
            }
            Err(err) => {
                warn!(ticket, error = %err, "form: simulation failed");
                ViewState::Error(ErrorView::from_error(&err))
            }
        };

        let applied = self.apply(ticket, view.clone());
        Submission {
            ticket,
            view,
            applied,
        }
    }

    pub async fn submit(&self, location: &str, surface_area: &str) -> Submission {
        let pending = self.begin(location, surface_area);
        self.finish(pending).await
    }

    fn apply(&self, ticket: u64, next: ViewState) -> bool {
        self.state.send_if_modified(|state| {
            let latest = self.latest_ticket.load(Ordering::SeqCst);
            if ticket != latest {
                debug!(ticket, latest, "form: discarding stale result");
                return false;
            }
            *state = next;
            true
        })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
