//! Two-value color toggle
//!
//! Every call to `next` flips between the two values. The internal state
//! starts on the first value, so the first call yields the second.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator<T> {
    first: T,
    second: T,
    current: T,
}

impl<T: Copy + PartialEq> Oscillator<T> {
    pub fn new(first: T, second: T) -> Self {
        Self {
            first,
            second,
            current: first,
        }
    }

    /// Build from a `(first, second)` palette pair
    pub fn from_pair((first, second): (T, T)) -> Self {
        Self::new(first, second)
    }

    /// Flip and return the new value
    pub fn next(&mut self) -> T {
        self.current = if self.current == self.first {
            self.second
        } else {
            self.first
        };
        self.current
    }
}
