use crate::error::{GatewayError, Result};
use crate::messages::Continuation;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use tradewire_core::CorrelationToken;

/// Concurrent token -> continuation map
///
/// Cloning shares the underlying map. `take` is an atomic remove, so a
/// continuation can be handed out at most once no matter how many events
/// reference its token.
pub struct PendingCallRegistry<C = Continuation> {
    // Entries are only moved in and out, never borrowed; the mutex lets
    // Send-only continuations live in a Sync map.
    calls: Arc<DashMap<CorrelationToken, Mutex<C>>>,
}

impl<C> PendingCallRegistry<C> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(DashMap::new()),
        }
    }

    /// Register a continuation for `token`
    ///
    /// The reserved session tokens are re-armed: an existing listener is
    /// replaced and returned. Allocator-issued tokens must be unique; a
    /// second registration is rejected, the first one stays in place and
    /// the rejected continuation is dropped without firing.
    pub fn register(&self, token: CorrelationToken, continuation: C) -> Result<Option<C>> {
        if token.is_reserved() {
            let displaced = self
                .calls
                .insert(token, Mutex::new(continuation))
                .map(Mutex::into_inner);
            if displaced.is_some() {
                debug!("Re-armed session listener on {}", token);
            }
            return Ok(displaced);
        }

        match self.calls.entry(token) {
            Entry::Occupied(_) => {
                warn!("Rejected duplicate registration for token {}", token);
                Err(GatewayError::DuplicateToken(token))
            }
            Entry::Vacant(slot) => {
                slot.insert(Mutex::new(continuation));
                Ok(None)
            }
        }
    }

    /// Remove and return the continuation for `token`
    pub fn take(&self, token: CorrelationToken) -> Option<C> {
        self.calls
            .remove(&token)
            .map(|(_, continuation)| continuation.into_inner())
    }

    pub fn contains(&self, token: CorrelationToken) -> bool {
        self.calls.contains_key(&token)
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Snapshot of the tokens still waiting for a terminal event, ascending
    pub fn pending_tokens(&self) -> Vec<CorrelationToken> {
        let mut tokens: Vec<_> = self.calls.iter().map(|entry| *entry.key()).collect();
        tokens.sort();
        tokens
    }
}

impl<C> Default for PendingCallRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for PendingCallRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}
