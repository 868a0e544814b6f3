//! Code-unit storage seen through positions and sinks.
//!
//! Decoders never touch storage directly. They read through a
//! [`CodeUnitPosition`], which can sit at any unit of a range or one past its
//! last unit, and they write through a [`CodeUnitSink`], which accepts one unit
//! at a time. Any contiguous or ring storage can provide these.
//!
//! Positions borrow the storage they point into, so the storage cannot be
//! mutated while a position (or a cursor built from one) is alive.

use alloc::{collections::VecDeque, vec::Vec};

/// A position inside a range of fixed-width code units.
///
/// Two positions are equal when they designate the same unit of the same
/// storage.
pub trait CodeUnitPosition: Clone + PartialEq {
    /// The fixed-width storage atom.
    type Unit: Copy;

    /// Reads the unit at this position.
    ///
    /// Callers must not read at the end position of a range.
    fn unit(&self) -> Self::Unit;

    /// Moves one unit towards the end.
    fn step_forward(&mut self);

    /// Moves one unit towards the beginning.
    fn step_back(&mut self);
}

/// Storage that exposes a begin and an end [`CodeUnitPosition`].
pub trait CodeUnitRange {
    /// The position type, borrowing from `self`.
    type Position<'a>: CodeUnitPosition
    where
        Self: 'a;

    /// Position of the first unit.
    fn begin_position(&self) -> Self::Position<'_>;

    /// Position one past the last unit.
    fn end_position(&self) -> Self::Position<'_>;
}

/// An index into a borrowed slice.
#[derive(Debug)]
pub struct SlicePosition<'a, U> {
    units: &'a [U],
    index: usize,
}

impl<'a, U> SlicePosition<'a, U> {
    /// A position at `index` in `units`; `index` may equal `units.len()`.
    #[must_use]
    pub fn new(units: &'a [U], index: usize) -> Self {
        debug_assert!(index <= units.len());
        Self { units, index }
    }

    /// Offset from the start of the slice.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The slice this position points into.
    #[must_use]
    pub fn units(&self) -> &'a [U] {
        self.units
    }
}

impl<U> Clone for SlicePosition<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for SlicePosition<'_, U> {}

impl<U> PartialEq for SlicePosition<'_, U> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && core::ptr::eq(self.units, other.units)
    }
}

impl<U> Eq for SlicePosition<'_, U> {}

impl<U: Copy> CodeUnitPosition for SlicePosition<'_, U> {
    type Unit = U;

    #[inline]
    fn unit(&self) -> U {
        self.units[self.index]
    }

    #[inline]
    fn step_forward(&mut self) {
        self.index += 1;
    }

    #[inline]
    fn step_back(&mut self) {
        self.index -= 1;
    }
}

/// An index into a borrowed ring buffer.
#[derive(Debug)]
pub struct DequePosition<'a, U> {
    units: &'a VecDeque<U>,
    index: usize,
}

impl<'a, U> DequePosition<'a, U> {
    /// A position at `index` in `units`; `index` may equal `units.len()`.
    #[must_use]
    pub fn new(units: &'a VecDeque<U>, index: usize) -> Self {
        debug_assert!(index <= units.len());
        Self { units, index }
    }

    /// Offset from the front of the deque.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<U> Clone for DequePosition<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for DequePosition<'_, U> {}

impl<U> PartialEq for DequePosition<'_, U> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && core::ptr::eq(self.units, other.units)
    }
}

impl<U> Eq for DequePosition<'_, U> {}

impl<U: Copy> CodeUnitPosition for DequePosition<'_, U> {
    type Unit = U;

    #[inline]
    fn unit(&self) -> U {
        self.units[self.index]
    }

    #[inline]
    fn step_forward(&mut self) {
        self.index += 1;
    }

    #[inline]
    fn step_back(&mut self) {
        self.index -= 1;
    }
}

impl<U: Copy> CodeUnitRange for [U] {
    type Position<'a>
        = SlicePosition<'a, U>
    where
        Self: 'a;

    fn begin_position(&self) -> SlicePosition<'_, U> {
        SlicePosition::new(self, 0)
    }

    fn end_position(&self) -> SlicePosition<'_, U> {
        SlicePosition::new(self, self.len())
    }
}

impl<U: Copy> CodeUnitRange for Vec<U> {
    type Position<'a>
        = SlicePosition<'a, U>
    where
        Self: 'a;

    fn begin_position(&self) -> SlicePosition<'_, U> {
        self.as_slice().begin_position()
    }

    fn end_position(&self) -> SlicePosition<'_, U> {
        self.as_slice().end_position()
    }
}

impl<U: Copy> CodeUnitRange for VecDeque<U> {
    type Position<'a>
        = DequePosition<'a, U>
    where
        Self: 'a;

    fn begin_position(&self) -> DequePosition<'_, U> {
        DequePosition::new(self, 0)
    }

    fn end_position(&self) -> DequePosition<'_, U> {
        DequePosition::new(self, self.len())
    }
}

/// Accepts encoded output one code unit at a time.
pub trait CodeUnitSink<U> {
    /// Appends one unit.
    fn push_unit(&mut self, unit: U);

    /// Hint that about `additional` more units will follow.
    fn reserve_units(&mut self, additional: usize) {
        let _ = additional;
    }
}

impl<U> CodeUnitSink<U> for Vec<U> {
    #[inline]
    fn push_unit(&mut self, unit: U) {
        self.push(unit);
    }

    fn reserve_units(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

impl<U> CodeUnitSink<U> for VecDeque<U> {
    #[inline]
    fn push_unit(&mut self, unit: U) {
        self.push_back(unit);
    }

    fn reserve_units(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

impl<U, S: CodeUnitSink<U> + ?Sized> CodeUnitSink<U> for &mut S {
    #[inline]
    fn push_unit(&mut self, unit: U) {
        (**self).push_unit(unit);
    }

    fn reserve_units(&mut self, additional: usize) {
        (**self).reserve_units(additional);
    }
}

/// A sink that discards units and counts them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingSink {
    count: usize,
}

impl CountingSink {
    /// A sink that has seen no units.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Units pushed so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<U> CodeUnitSink<U> for CountingSink {
    #[inline]
    fn push_unit(&mut self, _unit: U) {
        self.count += 1;
    }
}
