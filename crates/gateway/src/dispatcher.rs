//! Delivery event dispatch
//!
//! One dispatcher consumes the single event channel of a connection. Each
//! event is routed through the registry and aggregator, and the matching
//! continuation fires exactly once. Nothing that arrives on the channel can
//! make the dispatcher fail: unmatched events are dropped and a panicking
//! continuation is contained and logged.

use crate::correlation::{PendingCallRegistry, ResponseAggregator};
use crate::messages::{Completion, Continuation, RspError};
use log::{debug, error, info, trace, warn};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tradewire_core::{CorrelationToken, Record};
use tradewire_ports::{DeliveryEvent, EventReceiver, RspInfo, SessionEvent};

/// What a single event did to correlation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A continuation was taken and invoked
    Resolved(CorrelationToken),
    /// A stream record was buffered; the call is still pending
    Accumulated(CorrelationToken),
    /// Nothing was registered for the event
    Dropped,
    /// Session notification with no armed listener
    Notified,
}

/// Routes delivery events to pending calls
pub struct Dispatcher {
    registry: PendingCallRegistry,
    aggregator: ResponseAggregator<Record>,
    connected: AtomicBool,
    session_events: broadcast::Sender<SessionEvent>,
}

impl Dispatcher {
    pub fn new(registry: PendingCallRegistry, session_event_capacity: usize) -> Self {
        let (session_events, _) = broadcast::channel(session_event_capacity.max(1));
        Self {
            registry,
            aggregator: ResponseAggregator::new(),
            connected: AtomicBool::new(false),
            session_events,
        }
    }

    pub fn registry(&self) -> &PendingCallRegistry {
        &self.registry
    }

    pub fn aggregator(&self) -> &ResponseAggregator<Record> {
        &self.aggregator
    }

    /// Connection state as last reported by a session event
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Observe session lifecycle events, including heartbeat warnings
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session_events.subscribe()
    }

    /// Apply one delivery event
    pub fn dispatch(&self, event: DeliveryEvent) -> DispatchOutcome {
        match event {
            DeliveryEvent::Error { token, info } => self.on_error(token, info),
            DeliveryEvent::UnaryReply {
                token,
                info,
                record,
            } => match failure(info) {
                Some(error) => self.on_error_info(token, error),
                None => self.resolve(token, Ok(Completion::Single(record))),
            },
            DeliveryEvent::StreamRecord {
                token,
                info,
                record,
                is_last,
            } => match failure(info) {
                Some(error) => self.on_error_info(token, error),
                None => self.on_stream_record(token, record, is_last),
            },
            DeliveryEvent::Session(event) => self.on_session(event),
        }
    }

    /// Consume events until every sender is dropped
    pub async fn run(&self, mut events: EventReceiver) {
        info!("Dispatch loop started");
        while let Some(event) = events.recv().await {
            self.dispatch(event);
        }

        let pending = self.registry.len();
        if pending > 0 {
            warn!(
                "Dispatch loop stopped with {} calls still pending: {:?}",
                pending,
                self.registry.pending_tokens()
            );
        } else {
            info!("Dispatch loop stopped");
        }
    }

    /// Run the dispatch loop on the tokio runtime
    pub fn spawn(self: &Arc<Self>, events: EventReceiver) -> JoinHandle<()> {
        let dispatcher = Arc::clone(self);
        tokio::spawn(async move { dispatcher.run(events).await })
    }

    fn on_error(&self, token: CorrelationToken, info: RspInfo) -> DispatchOutcome {
        self.on_error_info(token, RspError::from(info))
    }

    fn on_error_info(&self, token: CorrelationToken, error: RspError) -> DispatchOutcome {
        self.resolve(token, Err(error))
    }

    fn on_stream_record(
        &self,
        token: CorrelationToken,
        record: Option<Record>,
        is_last: bool,
    ) -> DispatchOutcome {
        // Never keep a buffer for a token nobody is waiting on
        if !self.registry.contains(token) {
            let discarded = self.aggregator.discard(token);
            debug!(
                "Dropped stream record for unmatched token {} ({} buffered)",
                token, discarded
            );
            return DispatchOutcome::Dropped;
        }

        let finished = match record {
            Some(record) => self.aggregator.append(token, record, is_last),
            None if is_last => Some(self.aggregator.finish(token)),
            None => None,
        };

        match finished {
            Some(records) => self.resolve(token, Ok(Completion::List(records))),
            // Taken while the record was being buffered
            None if !self.registry.contains(token) => {
                let discarded = self.aggregator.discard(token);
                debug!(
                    "Dropped {} buffered records for withdrawn token {}",
                    discarded, token
                );
                DispatchOutcome::Dropped
            }
            None => {
                trace!(
                    "Buffered record for {} ({} so far)",
                    token,
                    self.aggregator.buffered(token)
                );
                DispatchOutcome::Accumulated(token)
            }
        }
    }

    fn on_session(&self, event: SessionEvent) -> DispatchOutcome {
        match &event {
            SessionEvent::Connected => {
                info!("Trading front connected");
                self.connected.store(true, Ordering::Release);
            }
            SessionEvent::Disconnected { reason } => {
                warn!(
                    "Trading front disconnected (reason {:#06x}), {} calls pending",
                    reason,
                    self.registry.len()
                );
                self.connected.store(false, Ordering::Release);
            }
            SessionEvent::HeartbeatWarning { elapsed_secs } => {
                warn!("No heartbeat from trading front for {}s", elapsed_secs);
            }
        }

        // No subscribers is fine
        let _ = self.session_events.send(event.clone());

        match event.token() {
            Some(token) => match self.resolve(token, Ok(Completion::Single(None))) {
                DispatchOutcome::Dropped => DispatchOutcome::Notified,
                outcome => outcome,
            },
            None => DispatchOutcome::Notified,
        }
    }

    fn resolve(
        &self,
        token: CorrelationToken,
        outcome: Result<Completion, RspError>,
    ) -> DispatchOutcome {
        let taken = self.registry.take(token);
        // A buffer never outlives its pending call
        let discarded = self.aggregator.discard(token);
        if discarded > 0 {
            debug!("Discarded {} buffered records for {}", discarded, token);
        }

        let Some(continuation) = taken else {
            match &outcome {
                Err(e) => debug!(
                    "Dropped error {} for unmatched token {}: {}",
                    e.code, token, e.message
                ),
                Ok(_) => debug!("Dropped reply for unmatched token {}", token),
            }
            return DispatchOutcome::Dropped;
        };

        invoke(token, continuation, outcome);
        DispatchOutcome::Resolved(token)
    }
}

fn failure(info: Option<RspInfo>) -> Option<RspError> {
    info.filter(RspInfo::is_error).map(RspError::from)
}

fn invoke(
    token: CorrelationToken,
    continuation: Continuation,
    outcome: Result<Completion, RspError>,
) {
    let shape = continuation.shape();
    if catch_unwind(AssertUnwindSafe(|| continuation.resolve(outcome))).is_err() {
        error!("Continuation ({}) for {} panicked", shape, token);
    }
}
