use std::fmt;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Server-assigned insertion stamp for ledger rows.
///
/// Combines a physical wall-clock component with a logical counter so
/// that stamps issued by one [`LedgerClock`] are strictly increasing even
/// when several rows land within the same millisecond. This is the
/// `authored_at` axis of the ledger: it orders the audit trail and is
/// independent of both the caller-supplied match date and the per-matchup
/// revision sequence.
///
/// Ordering: `physical_ms` → `logical` (total order).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerStamp {
    /// Wall-clock milliseconds since UNIX epoch.
    pub physical_ms: u64,
    /// Logical counter for rows stamped within the same millisecond.
    pub logical: u32,
}

impl LedgerStamp {
    /// Create a stamp with explicit values.
    pub fn new(physical_ms: u64, logical: u32) -> Self {
        Self {
            physical_ms,
            logical,
        }
    }

    /// The zero stamp, used for rows staged but not yet applied.
    pub const fn zero() -> Self {
        Self {
            physical_ms: 0,
            logical: 0,
        }
    }

    /// Returns `true` if this stamp orders after `other`.
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl PartialOrd for LedgerStamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LedgerStamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.physical_ms
            .cmp(&other.physical_ms)
            .then(self.logical.cmp(&other.logical))
    }
}

impl fmt::Debug for LedgerStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerStamp({}ms.{})", self.physical_ms, self.logical)
    }
}

impl fmt::Display for LedgerStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.physical_ms, self.logical)
    }
}

/// Internal mutable state of the ledger clock.
struct ClockState {
    physical_ms: u64,
    logical: u32,
}

/// Issues strictly monotonic [`LedgerStamp`]s for one ledger.
///
/// Rules:
/// - physical = max(wall clock, last physical); if physical advanced the
///   logical counter resets, otherwise it increments.
/// - Every stamp returned by [`LedgerClock::next`] is strictly greater
///   than any previously returned stamp from the same clock.
///
/// Safe for concurrent use via an internal [`Mutex`].
pub struct LedgerClock {
    state: Mutex<ClockState>,
}

impl LedgerClock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ClockState {
                physical_ms: 0,
                logical: 0,
            }),
        }
    }

    /// Issue the next monotonic stamp.
    pub fn next(&self) -> LedgerStamp {
        let wall = Self::wall_clock_ms();
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            // A poisoned clock still only ever held plain integers; take
            // the inner state and keep issuing monotonic stamps.
            Err(poisoned) => poisoned.into_inner(),
        };

        let physical = wall.max(state.physical_ms);
        let logical = if physical > state.physical_ms {
            0
        } else {
            state.logical + 1
        };

        state.physical_ms = physical;
        state.logical = logical;

        LedgerStamp::new(physical, logical)
    }

    fn wall_clock_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl Default for LedgerClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_physical_first() {
        let a = LedgerStamp::new(100, 9);
        let b = LedgerStamp::new(200, 0);
        assert!(a < b);
    }

    #[test]
    fn ordering_logical_second() {
        let a = LedgerStamp::new(100, 1);
        let b = LedgerStamp::new(100, 2);
        assert!(b.is_after(&a));
    }

    #[test]
    fn zero_orders_before_everything() {
        assert!(LedgerStamp::zero() < LedgerStamp::new(1, 0));
    }

    #[test]
    fn clock_is_strictly_monotonic() {
        let clock = LedgerClock::new();
        let mut previous = clock.next();
        for _ in 0..1000 {
            let next = clock.next();
            assert!(next.is_after(&previous));
            previous = next;
        }
    }

    #[test]
    fn clock_is_monotonic_across_threads() {
        use std::sync::Arc;

        let clock = Arc::new(LedgerClock::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let clock = Arc::clone(&clock);
                std::thread::spawn(move || {
                    (0..250).map(|_| clock.next()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut stamps: Vec<LedgerStamp> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = stamps.len();
        stamps.sort();
        stamps.dedup();
        assert_eq!(stamps.len(), total);
    }

    #[test]
    fn serde_roundtrip() {
        let stamp = LedgerStamp::new(1_700_000_000_000, 3);
        let json = serde_json::to_string(&stamp).unwrap();
        let parsed: LedgerStamp = serde_json::from_str(&json).unwrap();
        assert_eq!(stamp, parsed);
    }
}
