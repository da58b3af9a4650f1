use crate::error::PsrsError;

// Fixed-capacity circular buffer: `add` overwrites the oldest slot once
// full. The cursor always points at the next slot to be overwritten, which
// is also the oldest entry once the ring has wrapped at least once -
// exactly the property `MovingWindow` relies on to read back the most
// recent `L` pushes in insertion order.
//
// The original C version threads an explicit allocator/deallocator pair
// through every call so a ring of arbitrary byte blobs can be built without
// knowing `T` up front. Rust's generics make that unnecessary: `Ring<T>` is
// just a `Vec<Option<T>>` with a write cursor.
pub struct Ring<T> {
    slots: Vec<Option<T>>,
    cursor: usize,
}

impl<T> Ring<T> {
    pub fn new(capacity: usize) -> Result<Self, PsrsError> {
        if capacity == 0 {
            return Err(PsrsError::ConfigInvalid(
                "ring capacity must be at least 1".to_string(),
            ));
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(Ring { slots, cursor: 0 })
    }

    pub fn length(&self) -> usize {
        self.slots.len()
    }

    // Overwrites the slot at the cursor (dropping any prior contents) and
    // advances the cursor, wrapping at `length()`.
    pub fn add(&mut self, value: T) {
        self.slots[self.cursor] = Some(value);
        self.cursor = (self.cursor + 1) % self.slots.len();
    }

    // Walks exactly `length()` slots starting at the cursor (the oldest
    // entry once the ring has wrapped). Panics if a slot has never been
    // written - callers must respect `length()` the same way the C
    // contract requires the caller to respect it.
    pub fn iter(&self) -> RingIter<'_, T> {
        RingIter {
            slots: &self.slots,
            pos: self.cursor,
            remaining: self.slots.len(),
        }
    }
}

pub struct RingIter<'a, T> {
    slots: &'a [Option<T>],
    pos: usize,
    remaining: usize,
}

impl<'a, T> Iterator for RingIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }

        let slot = self.slots[self.pos]
            .as_ref()
            .expect("ring slot read before being written");

        self.pos = (self.pos + 1) % self.slots.len();
        self.remaining -= 1;

        Some(slot)
    }
}
