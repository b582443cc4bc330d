use dashmap::DashMap;
use std::sync::Arc;
use tradewire_core::CorrelationToken;

/// Accumulates streamed records per token until the terminal marker
///
/// A buffer exists only between the first non-terminal record and the
/// terminal record (or an error). Buffers are keyed by token and never
/// shared. Cloning shares the underlying map.
pub struct ResponseAggregator<T> {
    buffers: Arc<DashMap<CorrelationToken, Vec<T>>>,
}

impl<T> ResponseAggregator<T> {
    pub fn new() -> Self {
        Self {
            buffers: Arc::new(DashMap::new()),
        }
    }

    /// Append a record in arrival order
    ///
    /// Returns the finished list when `is_last` is set; the buffer is
    /// removed at that point.
    pub fn append(&self, token: CorrelationToken, record: T, is_last: bool) -> Option<Vec<T>> {
        if is_last {
            let mut records = self.take_buffer(token);
            records.push(record);
            return Some(records);
        }

        self.buffers.entry(token).or_default().push(record);
        None
    }

    /// Terminal marker without a record; returns whatever was buffered
    pub fn finish(&self, token: CorrelationToken) -> Vec<T> {
        self.take_buffer(token)
    }

    /// Drop the buffer for `token`, returning how many records were discarded
    pub fn discard(&self, token: CorrelationToken) -> usize {
        self.buffers
            .remove(&token)
            .map(|(_, records)| records.len())
            .unwrap_or(0)
    }

    /// Number of records buffered for `token`
    pub fn buffered(&self, token: CorrelationToken) -> usize {
        self.buffers.get(&token).map(|b| b.len()).unwrap_or(0)
    }

    /// Number of tokens with an open buffer
    pub fn in_flight(&self) -> usize {
        self.buffers.len()
    }

    fn take_buffer(&self, token: CorrelationToken) -> Vec<T> {
        self.buffers
            .remove(&token)
            .map(|(_, records)| records)
            .unwrap_or_default()
    }
}

impl<T> Default for ResponseAggregator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ResponseAggregator<T> {
    fn clone(&self) -> Self {
        Self {
            buffers: Arc::clone(&self.buffers),
        }
    }
}
