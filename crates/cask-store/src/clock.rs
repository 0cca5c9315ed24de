use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cask_types::CasToken;

/// Hybrid logical clock issuing CAS tokens.
///
/// Each token is `max(wall_clock_micros, previous + 1)`, so tokens follow
/// wall-clock time when it moves forward and keep counting when it stalls or
/// steps backward. Tokens from one clock are strictly increasing across all
/// threads and never equal [`CasToken::ZERO`].
///
/// One clock is shared by every collection of a registry.
#[derive(Debug, Default)]
pub struct CasClock {
    last: AtomicU64,
}

impl CasClock {
    /// Create a clock that has not issued any token.
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Issue a new token, strictly greater than every token issued before.
    pub fn next(&self) -> CasToken {
        let wall = Self::wall_clock_micros();
        let advance = |last: u64| wall.max(last.saturating_add(1));
        let prev = match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(advance(last)))
        {
            Ok(prev) | Err(prev) => prev,
        };
        CasToken::new(advance(prev))
    }

    /// The most recently issued token, or [`CasToken::ZERO`] if none.
    pub fn last(&self) -> CasToken {
        CasToken::new(self.last.load(Ordering::Acquire))
    }

    /// Current wall-clock time in microseconds since the UNIX epoch.
    fn wall_clock_micros() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_micros() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn first_token_is_not_zero() {
        let clock = CasClock::new();
        assert_eq!(clock.last(), CasToken::ZERO);
        let t = clock.next();
        assert!(!t.is_zero());
        assert_eq!(clock.last(), t);
    }

    #[test]
    fn tokens_strictly_increase() {
        let clock = CasClock::new();
        let mut prev = clock.next();
        for _ in 0..10_000 {
            let t = clock.next();
            assert!(t > prev, "{t:?} not after {prev:?}");
            prev = t;
        }
    }

    #[test]
    fn keeps_counting_when_wall_clock_is_behind() {
        // Far ahead of any realistic wall clock.
        let ahead = CasToken::new(u64::MAX / 2);
        let clock = CasClock {
            last: AtomicU64::new(ahead.get()),
        };
        assert_eq!(clock.next(), CasToken::new(u64::MAX / 2 + 1));
        assert_eq!(clock.next(), CasToken::new(u64::MAX / 2 + 2));
    }

    #[test]
    fn tokens_unique_across_threads() {
        let clock = Arc::new(CasClock::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let clock = Arc::clone(&clock);
                thread::spawn(move || (0..1_000).map(|_| clock.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut all = HashSet::new();
        for h in handles {
            let tokens = h.join().unwrap();
            // Per-thread order is also increasing.
            assert!(tokens.windows(2).all(|w| w[0] < w[1]));
            all.extend(tokens);
        }
        assert_eq!(all.len(), 8_000);
    }
}
