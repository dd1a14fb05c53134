//! Caller-side bookkeeping for the plot currently on display.
//!
//! The service offers no cancellation, so a slow answer can arrive after a
//! newer request was issued. Every request gets a [`Ticket`] with a
//! monotonically increasing sequence number; only the latest ticket may
//! replace what is displayed.

use log::debug;

use crate::error::PlotError;
use crate::plot::{PlotRequest, Plotter};
use crate::polyline::Polyline;
use crate::service::ComputeService;

/// Sequence number of an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What happens to the displayed polyline when the latest request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnFailure {
    /// Leave the last good plot visible next to the error message.
    #[default]
    Keep,
    /// Blank the plot area.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing requested yet.
    Idle,
    /// The latest request has not answered. Distinct from a ready plot with
    /// no valid samples.
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Default)]
pub struct PlotSession {
    issued: u64,
    pending: Option<Ticket>,
    current: Option<Polyline>,
    error: Option<PlotError>,
    on_failure: OnFailure,
}

impl PlotSession {
    pub fn new(on_failure: OnFailure) -> Self {
        Self {
            on_failure,
            ..Self::default()
        }
    }

    /// Issues a ticket for a new request, superseding any outstanding one.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.pending = Some(ticket);
        ticket
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Records the outcome of `ticket`'s request.
    ///
    /// Returns `false`, leaving the session untouched, when a newer request
    /// has been issued since.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Polyline, PlotError>) -> bool {
        if !self.is_latest(ticket) {
            debug!(
                "discarding stale plot result #{} (latest is #{})",
                ticket.0, self.issued
            );
            return false;
        }

        self.pending = None;
        match result {
            Ok(polyline) => {
                self.current = Some(polyline);
                self.error = None;
            }
            Err(err) => {
                if self.on_failure == OnFailure::Clear {
                    self.current = None;
                }
                self.error = Some(err);
            }
        }
        true
    }

    /// Issues a ticket, runs `request` on `plotter` and records the result.
    pub fn refresh<S: ComputeService>(
        &mut self,
        plotter: &Plotter<S>,
        request: &PlotRequest,
    ) -> Status {
        let ticket = self.begin();
        let result = plotter.plot(request);
        self.complete(ticket, result);
        self.status()
    }

    pub fn status(&self) -> Status {
        if self.pending.is_some() {
            Status::Pending
        } else if self.error.is_some() {
            Status::Failed
        } else if self.current.is_some() {
            Status::Ready
        } else {
            Status::Idle
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The polyline on display, if any.
    pub fn current(&self) -> Option<&Polyline> {
        self.current.as_ref()
    }

    /// Error of the latest completed request, if it failed.
    pub fn error(&self) -> Option<&PlotError> {
        self.error.as_ref()
    }
}
