//! Two-slot buffer arena for double-buffered cell quantities.
//!
//! One slot holds the current ("old") values that a sweep reads, the other
//! receives the new values. [`DoubleBuffer::split`] hands out a shared view of
//! the active slot and an exclusive view of the other one, so the two can
//! never alias. [`DoubleBuffer::commit`] makes the freshly written slot active.

use crate::types::Real;

/// Selects one of the two slots of a [`DoubleBuffer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Slot 0
    #[default]
    First,
    /// Slot 1
    Second,
}

impl Slot {
    /// The other slot.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }

    /// Numeric slot index (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }
}

/// Pair of equally sized buffers with one active slot.
#[derive(Clone, Debug)]
pub struct DoubleBuffer {
    slots: [Vec<Real>; 2],
    active: Slot,
}

impl DoubleBuffer {
    /// Create a buffer of `len` values, both slots set to `value`.
    pub fn new(len: usize, value: Real) -> Self {
        Self {
            slots: [vec![value; len], vec![value; len]],
            active: Slot::First,
        }
    }

    /// Adopt `data` as the active slot; the other slot starts as a copy.
    pub fn from_vec(data: Vec<Real>) -> Self {
        let second = data.clone();
        Self {
            slots: [data, second],
            active: Slot::First,
        }
    }

    /// Number of values per slot.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots[0].len()
    }

    /// True if the slots hold no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots[0].is_empty()
    }

    /// Currently active slot.
    #[inline]
    pub fn active(&self) -> Slot {
        self.active
    }

    /// Values of the active slot.
    #[inline]
    pub fn current(&self) -> &[Real] {
        &self.slots[self.active.index()]
    }

    /// Mutable values of the active slot.
    #[inline]
    pub fn current_mut(&mut self) -> &mut [Real] {
        &mut self.slots[self.active.index()]
    }

    /// Shared view of the active slot and exclusive view of the inactive one.
    #[inline]
    pub fn split(&mut self) -> (&[Real], &mut [Real]) {
        let [first, second] = &mut self.slots;
        match self.active {
            Slot::First => (first.as_slice(), second.as_mut_slice()),
            Slot::Second => (second.as_slice(), first.as_mut_slice()),
        }
    }

    /// Make the inactive slot the active one.
    #[inline]
    pub fn commit(&mut self) {
        self.active = self.active.other();
    }

    /// Overwrite both slots with `value`.
    pub fn fill(&mut self, value: Real) {
        for slot in &mut self.slots {
            slot.fill(value);
        }
    }

    /// Copy the active slot into a new vector.
    pub fn to_vec(&self) -> Vec<Real> {
        self.current().to_vec()
    }
}
