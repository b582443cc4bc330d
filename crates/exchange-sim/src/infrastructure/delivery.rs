use log::debug;
use parking_lot::Mutex;
use rand::Rng;
use std::collections::{BTreeMap, VecDeque};
use tradewire_core::CorrelationToken;
use tradewire_ports::{DeliveryEvent, EventSender, SessionError, SessionResult};

/// How emitted events reach the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Straight onto the event channel
    #[default]
    Immediate,
    /// Queued until released
    Held,
}

/// Outbound side of the simulated front
pub struct EventSink {
    tx: EventSender,
    mode: Mutex<DeliveryMode>,
    held: Mutex<Vec<DeliveryEvent>>,
}

impl EventSink {
    pub fn new(tx: EventSender) -> Self {
        Self {
            tx,
            mode: Mutex::new(DeliveryMode::Immediate),
            held: Mutex::new(Vec::new()),
        }
    }

    pub fn mode(&self) -> DeliveryMode {
        *self.mode.lock()
    }

    pub fn set_mode(&self, mode: DeliveryMode) {
        *self.mode.lock() = mode;
    }

    pub fn emit(&self, event: DeliveryEvent) -> SessionResult<()> {
        match self.mode() {
            DeliveryMode::Immediate => self.send(event),
            DeliveryMode::Held => {
                self.held.lock().push(event);
                Ok(())
            }
        }
    }

    pub fn emit_all(&self, events: impl IntoIterator<Item = DeliveryEvent>) -> SessionResult<()> {
        events.into_iter().try_for_each(|event| self.emit(event))
    }

    /// Number of events waiting for release
    pub fn held(&self) -> usize {
        self.held.lock().len()
    }

    /// Deliver held events in emission order
    pub fn release_in_order(&self) -> SessionResult<usize> {
        let events = std::mem::take(&mut *self.held.lock());
        let count = events.len();
        events.into_iter().try_for_each(|event| self.send(event))?;
        Ok(count)
    }

    /// Deliver held events with tokens interleaved at random
    ///
    /// Events addressed to the same token keep their relative order, so a
    /// stream still ends with its terminal record.
    pub fn release_shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> SessionResult<usize> {
        let events = std::mem::take(&mut *self.held.lock());
        let count = events.len();

        let mut queues: BTreeMap<Option<CorrelationToken>, VecDeque<DeliveryEvent>> =
            BTreeMap::new();
        for event in events {
            queues.entry(event.token()).or_default().push_back(event);
        }

        let mut lanes: Vec<VecDeque<DeliveryEvent>> = queues.into_values().collect();
        while !lanes.is_empty() {
            let lane = rng.gen_range(0..lanes.len());
            if let Some(event) = lanes[lane].pop_front() {
                self.send(event)?;
            }
            if lanes[lane].is_empty() {
                lanes.swap_remove(lane);
            }
        }

        debug!("Released {} held events shuffled", count);
        Ok(count)
    }

    fn send(&self, event: DeliveryEvent) -> SessionResult<()> {
        self.tx.send(event).map_err(|_| SessionError::Closed)
    }
}
