use crate::error::{GatewayError, Result};
use std::sync::atomic::{AtomicI32, Ordering};
use tradewire_core::CorrelationToken;

/// Issues correlation tokens 1, 2, 3, ...
///
/// A single atomic is the only synchronization point. Tokens are never
/// reused; once `i32::MAX` has been issued the allocator refuses further
/// requests instead of wrapping into the reserved negative range.
#[derive(Debug, Default)]
pub struct TokenAllocator {
    last: AtomicI32,
}

impl TokenAllocator {
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Resume allocation after `last` (negative values are clamped to 0)
    pub fn starting_after(last: i32) -> Self {
        Self {
            last: AtomicI32::new(last.max(0)),
        }
    }

    /// Allocate the next token
    pub fn next(&self) -> Result<CorrelationToken> {
        self.last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_add(1))
            .map(|previous| CorrelationToken::new(previous + 1))
            .map_err(|_| GatewayError::TokenSpaceExhausted)
    }

    /// Most recently issued token, if any
    pub fn last_issued(&self) -> Option<CorrelationToken> {
        match self.last.load(Ordering::Acquire) {
            0 => None,
            n => Some(CorrelationToken::new(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_starts_at_one() {
        let allocator = TokenAllocator::new();
        assert_eq!(allocator.last_issued(), None);
        assert_eq!(allocator.next().unwrap(), CorrelationToken::new(1));
        assert_eq!(allocator.next().unwrap(), CorrelationToken::new(2));
        assert_eq!(allocator.last_issued(), Some(CorrelationToken::new(2)));
    }

    #[test]
    fn test_never_issues_sentinels() {
        let allocator = TokenAllocator::new();
        for _ in 0..1_000_000 {
            let token = allocator.next().unwrap();
            assert!(token.is_allocated());
            assert_ne!(token, CorrelationToken::CONNECT);
            assert_ne!(token, CorrelationToken::DISCONNECT);
        }
    }

    #[test]
    fn test_overflow_is_fatal() {
        let allocator = TokenAllocator::starting_after(i32::MAX - 1);
        assert_eq!(allocator.next().unwrap(), CorrelationToken::new(i32::MAX));
        assert!(matches!(
            allocator.next(),
            Err(GatewayError::TokenSpaceExhausted)
        ));
        // Stays exhausted, never wraps
        assert!(allocator.next().is_err());
        assert_eq!(allocator.last_issued(), Some(CorrelationToken::new(i32::MAX)));
    }

    #[test]
    fn test_negative_start_is_clamped() {
        let allocator = TokenAllocator::starting_after(-5);
        assert_eq!(allocator.next().unwrap(), CorrelationToken::new(1));
    }

    #[test]
    fn test_concurrent_allocation_is_unique() {
        let allocator = Arc::new(TokenAllocator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let allocator = Arc::clone(&allocator);
                std::thread::spawn(move || {
                    (0..1000)
                        .map(|_| allocator.next().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for token in handle.join().unwrap() {
                assert!(seen.insert(token), "token {} issued twice", token);
            }
        }
        assert_eq!(seen.len(), 8000);
        assert_eq!(allocator.last_issued(), Some(CorrelationToken::new(8000)));
    }
}
