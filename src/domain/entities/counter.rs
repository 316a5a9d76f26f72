//! Global allocation counter.

/// Key of the single counter document.
pub const GLOBAL_COUNTER_KEY: &str = "global";

/// The singleton counter from which every short code is derived.
///
/// Its `count` only ever grows: each allocation increments it inside a store
/// transaction and receives the new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterRecord {
    pub count: u64,
}

impl CounterRecord {
    pub fn new(count: u64) -> Self {
        Self { count }
    }

    /// The value the next successful allocation will receive, if it does not overflow.
    pub fn successor(&self) -> Option<u64> {
        self.count.checked_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successor() {
        assert_eq!(CounterRecord::new(23512).successor(), Some(23513));
        assert_eq!(CounterRecord::new(u64::MAX).successor(), None);
    }
}
