use std::mem;

use parking_lot::Mutex;

use crate::domain::NewsMessage;

/// Positive messages collected since the last drain, in arrival order.
///
/// Appends and drains share one lock, so every appended item shows up in
/// exactly one drain.
#[derive(Debug)]
pub struct Accumulator<T = NewsMessage> {
    items: Mutex<Vec<T>>,
}

impl<T> Accumulator<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    pub fn append(&self, value: T) {
        self.items.lock().push(value);
    }

    pub fn drain_and_clear(&self) -> Vec<T> {
        mem::take(&mut *self.items.lock())
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}
