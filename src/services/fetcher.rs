//! Background fetch dispatch
//!
//! Each submitted request runs on its own thread and reports over its own
//! channel. `drain` is called on every tick and never blocks.

use super::query::{GraphqlResponse, MemberSource, Operation, QueryRequest};
use crate::error::FetchError;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// A request tagged with the sequence token it was issued under
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub token: u64,
    pub request: QueryRequest,
}

/// Outcome of one ticket
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCompletion {
    pub token: u64,
    pub operation: Operation,
    pub result: Result<GraphqlResponse, FetchError>,
}

/// Runs tickets off the UI thread and hands back their completions
pub trait Dispatch: Send {
    fn submit(&mut self, ticket: FetchTicket);

    /// Completions that arrived since the last call, in arrival order
    fn drain(&mut self) -> Vec<FetchCompletion>;
}

struct InFlight {
    token: u64,
    operation: Operation,
    receiver: Receiver<Result<GraphqlResponse, FetchError>>,
    started: Instant,
}

/// Thread-per-request dispatcher over a [`MemberSource`]
pub struct ThreadDispatcher {
    source: Arc<dyn MemberSource>,
    in_flight: Vec<InFlight>,
}

impl ThreadDispatcher {
    pub fn new(source: Arc<dyn MemberSource>) -> Self {
        Self {
            source,
            in_flight: Vec::new(),
        }
    }
}

impl Dispatch for ThreadDispatcher {
    fn submit(&mut self, ticket: FetchTicket) {
        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let operation = ticket.request.operation;
        let request = ticket.request;

        thread::spawn(move || {
            let result = source.execute(&request);
            let _ = tx.send(result);
        });

        self.in_flight.push(InFlight {
            token: ticket.token,
            operation,
            receiver: rx,
            started: Instant::now(),
        });
    }

    fn drain(&mut self) -> Vec<FetchCompletion> {
        let mut completions = Vec::new();

        self.in_flight.retain(|job| {
            let result = match job.receiver.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => Err(FetchError::Disconnected),
            };
            tracing::debug!(
                token = job.token,
                operation = job.operation.name(),
                elapsed_ms = job.started.elapsed().as_millis() as u64,
                ok = result.is_ok(),
                "fetch finished"
            );
            completions.push(FetchCompletion {
                token: job.token,
                operation: job.operation,
                result,
            });
            false
        });

        completions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockDataSource;
    use std::time::Duration;

    struct PanickingSource;

    impl MemberSource for PanickingSource {
        fn execute(&self, _request: &QueryRequest) -> Result<GraphqlResponse, FetchError> {
            panic!("worker died");
        }
    }

    fn drain_until(dispatcher: &mut ThreadDispatcher, count: usize) -> Vec<FetchCompletion> {
        let mut completions = Vec::new();
        for _ in 0..200 {
            completions.extend(dispatcher.drain());
            if completions.len() >= count {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        completions
    }

    #[test]
    fn test_completion_carries_token_and_operation() {
        let mut dispatcher = ThreadDispatcher::new(Arc::new(MockDataSource::new()));
        dispatcher.submit(FetchTicket {
            token: 7,
            request: QueryRequest::list(20),
        });

        let completions = drain_until(&mut dispatcher, 1);

        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].token, 7);
        assert_eq!(completions[0].operation, Operation::List);
        assert!(completions[0].result.is_ok());
        assert!(dispatcher.in_flight.is_empty());
    }

    #[test]
    fn test_worker_panic_reports_disconnected() {
        let mut dispatcher = ThreadDispatcher::new(Arc::new(PanickingSource));
        dispatcher.submit(FetchTicket {
            token: 1,
            request: QueryRequest::list(20),
        });

        let completions = drain_until(&mut dispatcher, 1);

        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].result, Err(FetchError::Disconnected));
    }
}
