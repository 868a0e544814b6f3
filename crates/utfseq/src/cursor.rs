//! Lazy, bidirectional codepoint traversal over code units.
//!
//! A [`CodepointCursor`] is a position on a codepoint boundary plus a cached
//! "next boundary". Nothing is decoded until the cursor is dereferenced or
//! moved, and a dereference followed by an advance decodes only once.
//!
//! Cursors compare equal when they sit on the same code unit; the cache is
//! invisible to equality, so a dereferenced cursor still equals a fresh cursor
//! at the same place.
//!
//! The cursor borrows its storage through its positions, so the storage cannot
//! change underneath it.

use core::{iter::FusedIterator, marker::PhantomData};

use crate::{
    codepoint::Codepoint,
    encoding::Encoding,
    error::EncodingError,
    policy::Policy,
    units::{CodeUnitPosition, CodeUnitRange},
};

/// A bidirectional cursor over the codepoints of a code-unit range.
///
/// `current` always lies within `[begin, end]`. `next` is either equal to
/// `current` (nothing decoded since the last move) or exactly one codepoint
/// ahead of it.
#[derive(Debug, Clone)]
pub struct CodepointCursor<E, C, P> {
    begin: C,
    current: C,
    next: C,
    end: C,
    policy: P,
    encoding: PhantomData<E>,
}

impl<E, C, P> CodepointCursor<E, C, P>
where
    E: Encoding,
    C: CodeUnitPosition<Unit = E::Unit>,
    P: Policy,
{
    /// A cursor at `current` within `[begin, end]`.
    ///
    /// `current` must lie on a codepoint boundary for the traversal to agree
    /// with a traversal started at `begin`.
    pub fn new(current: C, begin: C, end: C, policy: P) -> Self {
        Self {
            next: current.clone(),
            current,
            begin,
            end,
            policy,
            encoding: PhantomData,
        }
    }

    /// A cursor at the first codepoint of `[begin, end]`.
    pub fn at_begin(begin: C, end: C, policy: P) -> Self {
        Self::new(begin.clone(), begin, end, policy)
    }

    /// A cursor one past the last codepoint of `[begin, end]`.
    pub fn at_end(begin: C, end: C, policy: P) -> Self {
        Self::new(end.clone(), begin, end, policy)
    }

    /// Decodes the codepoint under the cursor without moving it.
    ///
    /// The first call after a move remembers where the codepoint ends, so a
    /// following [`advance`](Self::advance) does not decode again. At the end
    /// of the range this reports a malformed read through the policy.
    ///
    /// # Errors
    ///
    /// Returns the policy's error on malformed input.
    pub fn get(&mut self) -> Result<Codepoint, EncodingError> {
        if self.next == self.current {
            let decoded = E::decode(&mut self.next, &self.end, &self.policy);
            if decoded.is_err() {
                self.next = self.current.clone();
            }
            decoded
        } else {
            self.peek()
        }
    }

    /// Decodes the codepoint under the cursor without touching the cache.
    ///
    /// # Errors
    ///
    /// Returns the policy's error on malformed input.
    pub fn peek(&self) -> Result<Codepoint, EncodingError> {
        let mut probe = self.current.clone();
        E::decode(&mut probe, &self.end, &self.policy)
    }

    /// Moves to the next codepoint. Does nothing at the end.
    ///
    /// # Errors
    ///
    /// Returns the policy's error if the codepoint under the cursor is
    /// malformed; the cursor does not move in that case.
    pub fn advance(&mut self) -> Result<(), EncodingError> {
        if self.current == self.end {
            return Ok(());
        }
        if self.next == self.current {
            if let Err(err) = E::decode(&mut self.next, &self.end, &self.policy) {
                self.next = self.current.clone();
                return Err(err);
            }
        }
        self.current = self.next.clone();
        Ok(())
    }

    /// Moves to the previous codepoint. Does nothing at the beginning.
    ///
    /// # Errors
    ///
    /// Returns the policy's error if the preceding codepoint is malformed;
    /// the cursor does not move in that case.
    pub fn retreat(&mut self) -> Result<(), EncodingError> {
        self.retreat_decoded().transpose().map(|_| ())
    }

    /// Moves to the previous codepoint and returns it, or `None` at the
    /// beginning.
    pub(crate) fn retreat_decoded(&mut self) -> Option<Result<Codepoint, EncodingError>> {
        if self.current == self.begin {
            return None;
        }
        let mut previous = self.current.clone();
        let decoded = E::decode_previous(&self.begin, &mut previous, &self.policy);
        if decoded.is_ok() {
            self.current = previous;
            self.next = self.current.clone();
        }
        Some(decoded)
    }

    /// Returns the codepoint under the cursor and moves past it, or `None` at
    /// the end.
    pub(crate) fn advance_decoded(&mut self) -> Option<Result<Codepoint, EncodingError>> {
        if self.current == self.end {
            return None;
        }
        let decoded = self.get();
        if decoded.is_ok() {
            // `get` primed `next`; this only moves.
            self.current = self.next.clone();
        }
        Some(decoded)
    }

    /// The code-unit position under the cursor.
    pub fn position(&self) -> &C {
        &self.current
    }

    /// Consumes the cursor, returning its code-unit position.
    pub fn into_position(self) -> C {
        self.current
    }

    /// Whether the cursor is at the first codepoint.
    pub fn is_begin(&self) -> bool {
        self.current == self.begin
    }

    /// Whether the cursor is past the last codepoint.
    pub fn is_end(&self) -> bool {
        self.current == self.end
    }

    /// The policy consulted on malformed input.
    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<E, C: PartialEq, P> PartialEq for CodepointCursor<E, C, P> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<E, C: Eq, P> Eq for CodepointCursor<E, C, P> {}

/// Double-ended iterator over the codepoints between two cursors.
///
/// Yields `Err` once on malformed input under a strict policy, then stops.
#[derive(Debug, Clone)]
pub struct Codepoints<E, C, P> {
    front: CodepointCursor<E, C, P>,
    back: CodepointCursor<E, C, P>,
    failed: bool,
}

impl<E, C, P> Codepoints<E, C, P>
where
    E: Encoding,
    C: CodeUnitPosition<Unit = E::Unit>,
    P: Policy + Clone,
{
    /// Iterates every codepoint of `[begin, end]`.
    pub fn new(begin: C, end: C, policy: P) -> Self {
        Self::between(
            CodepointCursor::at_begin(begin.clone(), end.clone(), policy.clone()),
            CodepointCursor::at_end(begin, end, policy),
        )
    }
}

impl<E, C, P> Codepoints<E, C, P>
where
    E: Encoding,
    C: CodeUnitPosition<Unit = E::Unit>,
    P: Policy,
{
    /// Iterates from `front` up to `back`; both must lie on codepoint
    /// boundaries of the same range with `front` not after `back`.
    pub fn between(front: CodepointCursor<E, C, P>, back: CodepointCursor<E, C, P>) -> Self {
        Self {
            front,
            back,
            failed: false,
        }
    }

    /// The cursor for the next codepoint yielded from the front.
    pub fn front(&self) -> &CodepointCursor<E, C, P> {
        &self.front
    }

    /// The cursor one past the next codepoint yielded from the back.
    pub fn back(&self) -> &CodepointCursor<E, C, P> {
        &self.back
    }

    fn finish(
        &mut self,
        item: Option<Result<Codepoint, EncodingError>>,
    ) -> Option<Result<Codepoint, EncodingError>> {
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

impl<E, C, P> Iterator for Codepoints<E, C, P>
where
    E: Encoding,
    C: CodeUnitPosition<Unit = E::Unit>,
    P: Policy,
{
    type Item = Result<Codepoint, EncodingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.front == self.back {
            return None;
        }
        let item = self.front.advance_decoded();
        self.finish(item)
    }
}

impl<E, C, P> DoubleEndedIterator for Codepoints<E, C, P>
where
    E: Encoding,
    C: CodeUnitPosition<Unit = E::Unit>,
    P: Policy,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.failed || self.front == self.back {
            return None;
        }
        let item = self.back.retreat_decoded();
        self.finish(item)
    }
}

impl<E, C, P> FusedIterator for Codepoints<E, C, P>
where
    E: Encoding,
    C: CodeUnitPosition<Unit = E::Unit>,
    P: Policy,
{
}

/// Iterates the codepoints of `range` as encoded in `E`.
///
/// # Examples
///
/// ```rust
/// use utfseq::{Replace, Utf8, codepoints};
///
/// let bytes = b"\x80\x80X";
/// let decoded: Vec<u32> = codepoints::<Utf8, _, _>(&bytes[..], Replace::DEFAULT)
///     .map(Result::unwrap)
///     .collect();
/// assert_eq!(decoded, [0xFFFD, 0xFFFD, 0x58]);
/// ```
pub fn codepoints<'a, E, R, P>(range: &'a R, policy: P) -> Codepoints<E, R::Position<'a>, P>
where
    E: Encoding,
    R: CodeUnitRange + ?Sized,
    R::Position<'a>: CodeUnitPosition<Unit = E::Unit>,
    P: Policy + Clone,
{
    Codepoints::new(range.begin_position(), range.end_position(), policy)
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;
    use crate::{
        Replace, Strict, Utf8, Utf16,
        units::{CodeUnitRange, SlicePosition},
    };

    type Cursor<'a, P> = CodepointCursor<Utf8, SlicePosition<'a, u8>, P>;

    fn cursors<'a, P: Policy + Clone>(
        bytes: &'a [u8],
        policy: P,
    ) -> (Cursor<'a, P>, Cursor<'a, P>) {
        let begin = bytes.begin_position();
        let end = bytes.end_position();
        (
            CodepointCursor::at_begin(begin, end, policy.clone()),
            CodepointCursor::at_end(begin, end, policy),
        )
    }

    #[test]
    fn repeated_dereference_is_stable() {
        let bytes = "añ€😀".as_bytes();
        let (mut it, end) = cursors(bytes, Strict);
        let mut seen = vec![];
        while it != end {
            let first = it.get().unwrap();
            let position = it.position().index();
            assert_eq!(it.get(), Ok(first));
            assert_eq!(it.peek(), Ok(first));
            assert_eq!(it.position().index(), position);
            seen.push(first);
            it.advance().unwrap();
        }
        assert_eq!(seen, vec![0x61, 0xF1, 0x20AC, 0x1_F600]);
    }

    #[test]
    fn advance_without_dereference_still_finds_boundaries() {
        let bytes = "€€".as_bytes();
        let (mut it, end) = cursors(bytes, Strict);
        it.advance().unwrap();
        assert_eq!(it.position().index(), 3);
        it.advance().unwrap();
        assert!(it == end);
        assert!(it.is_end());
    }

    #[test]
    fn clamped_at_both_ends() {
        let bytes = "ab".as_bytes();
        let (mut it, end) = cursors(bytes, Strict);
        it.retreat().unwrap();
        assert!(it.is_begin());
        it.advance().unwrap();
        it.advance().unwrap();
        it.advance().unwrap();
        assert!(it == end);
        assert_eq!(it.position().index(), 2);
    }

    #[test]
    fn equality_ignores_the_decode_cache() {
        let bytes = "xy".as_bytes();
        let (mut a, _) = cursors(bytes, Strict);
        let (b, _) = cursors(bytes, Strict);
        assert_eq!(a.get(), Ok(0x78));
        assert!(a == b);

        let (mut at_end, fresh_end) = cursors(bytes, Strict);
        at_end.advance().unwrap();
        assert_eq!(at_end.get(), Ok(0x79));
        at_end.advance().unwrap();
        assert!(at_end == fresh_end);
    }

    #[test]
    fn retreat_after_dereference_resets_the_cache() {
        let bytes = "a€b".as_bytes();
        let (mut it, _) = cursors(bytes, Strict);
        it.advance().unwrap();
        it.advance().unwrap();
        assert_eq!(it.get(), Ok(0x62));
        it.retreat().unwrap();
        assert_eq!(it.position().index(), 1);
        assert_eq!(it.get(), Ok(0x20AC));
        it.advance().unwrap();
        assert_eq!(it.position().index(), 4);
    }

    #[test]
    fn strict_errors_leave_the_cursor_in_place() {
        let bytes = [b'a', 0xFF, b'b'];
        let (mut it, _) = cursors(&bytes, Strict);
        it.advance().unwrap();
        assert_eq!(it.get(), Err(EncodingError::MalformedSequence));
        assert_eq!(it.advance(), Err(EncodingError::MalformedSequence));
        assert_eq!(it.position().index(), 1);

        let (_, mut back) = cursors(&bytes, Strict);
        back.retreat().unwrap();
        assert_eq!(back.retreat(), Err(EncodingError::MalformedSequence));
        assert_eq!(back.position().index(), 2);
    }

    #[test]
    fn replace_policy_walks_through_garbage() {
        let bytes = [0x80, 0x80, 0x58];
        let forward: Vec<_> = codepoints::<Utf8, _, _>(&bytes[..], Replace::DEFAULT)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(forward, vec![0xFFFD, 0xFFFD, 0x58]);

        let backward: Vec<_> = codepoints::<Utf8, _, _>(&bytes[..], Replace::DEFAULT)
            .rev()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(backward, vec![0x58, 0xFFFD, 0xFFFD]);
    }

    #[test]
    fn strict_iteration_yields_one_error_then_stops() {
        let bytes = [0x80, 0x80, 0x58];
        let items: Vec<_> = codepoints::<Utf8, _, _>(&bytes[..], Strict).collect();
        assert_eq!(items, vec![Err(EncodingError::MalformedSequence)]);
    }

    #[test]
    fn both_ends_meet_in_the_middle() {
        let units: Vec<u16> = "a😀b€".encode_utf16().collect();
        let mut it = codepoints::<Utf16, _, _>(&units, Strict);
        assert_eq!(it.next(), Some(Ok(0x61)));
        assert_eq!(it.next_back(), Some(Ok(0x20AC)));
        assert_eq!(it.next_back(), Some(Ok(0x62)));
        assert_eq!(it.next(), Some(Ok(0x1_F600)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn cursor_hands_back_its_position_and_policy() {
        let bytes = "añ".as_bytes();
        let (mut it, _) = cursors(bytes, Replace::new('?'));
        assert_eq!(it.policy().substitute(), '?');
        it.advance().unwrap();
        let position = it.into_position();
        assert_eq!(position.index(), 1);
        assert!(core::ptr::eq(position.units(), bytes));
    }

    #[test]
    fn iterator_ends_track_consumption() {
        let bytes = "a€b".as_bytes();
        let mut it = codepoints::<Utf8, _, _>(bytes, Strict);
        assert!(it.front().is_begin());
        assert!(it.back().is_end());
        assert_eq!(it.next(), Some(Ok(0x61)));
        assert_eq!(it.next_back(), Some(Ok(0x62)));
        assert_eq!(it.front().position().index(), 1);
        assert_eq!(it.back().position().index(), 4);
        assert_eq!(it.next(), Some(Ok(0x20AC)));
        assert!(it.front() == it.back());
    }

    #[test]
    fn cursor_over_a_deque() {
        let mut deque = alloc::collections::VecDeque::with_capacity(4);
        deque.extend([0u8, 0, 0]);
        deque.drain(..3);
        deque.extend("é!".bytes());
        let decoded: Vec<_> = codepoints::<Utf8, _, _>(&deque, Strict)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(decoded, vec![0xE9, 0x21]);
    }
}
