use std::{
    fmt::{self, Debug},
    ops::{Index, IndexMut, Range},
};

use log::trace;

use crate::{error::RingDequeError, iter::Iter, policy::ShrinkPolicy, ring_offsets::RingOffsets};

/// A double-ended queue stored in a power-of-two ring of `Option<T>` slots.
///
/// Pushes grow the ring by doubling as soon as the cursors collide, and pops may halve it
/// according to the deque's [`ShrinkPolicy`]. Every boundary condition, such as popping an
/// empty deque or peeking out of range, is reported as `None`.
#[derive(Clone)]
pub struct RingDeque<T> {
    offsets: RingOffsets,
    buffer: Vec<Option<T>>,
    policy: ShrinkPolicy,
}

impl<T> RingDeque<T> {
    /// Smallest ring a deque ever holds, both at construction and after a shrink.
    pub const MIN_CAPACITY: usize = 4;

    pub fn new() -> Self {
        Self::try_from_parts(Self::MIN_CAPACITY, ShrinkPolicy::default())
            .expect("minimum capacity ring should always allocate")
    }

    /// Creates a deque whose ring holds at least `capacity` slots, rounded up to a power of
    /// two no smaller than [`Self::MIN_CAPACITY`].
    ///
    /// Panics if the rounded ring cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).expect("capacity hint should fit a power of two")
    }

    /// Fallible [`Self::with_capacity`] using the default [`ShrinkPolicy`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self, RingDequeError> {
        Self::try_with_policy(capacity, ShrinkPolicy::default())
    }

    /// Creates a deque with room for at least `capacity` slots that shrinks according to
    /// `policy`.
    ///
    /// Returns [`RingDequeError::CapacityOverflow`] if `capacity` has no representable next
    /// power of two or the resulting ring cannot be allocated.
    pub fn try_with_policy(capacity: usize, policy: ShrinkPolicy) -> Result<Self, RingDequeError> {
        let rounded = capacity
            .max(Self::MIN_CAPACITY)
            .checked_next_power_of_two()
            .ok_or(RingDequeError::CapacityOverflow(capacity))?;

        Self::try_from_parts(rounded, policy)
            .map_err(|_| RingDequeError::CapacityOverflow(capacity))
    }

    fn try_from_parts(capacity: usize, policy: ShrinkPolicy) -> Result<Self, RingDequeError> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| RingDequeError::CapacityOverflow(capacity))?;
        buffer.resize_with(capacity, || None);

        let deque = Self {
            offsets: RingOffsets::new(capacity),
            buffer,
            policy,
        };

        deque.debug_assert_invariants();
        Ok(deque)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.offsets.capacity()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    pub fn shrink_policy(&self) -> ShrinkPolicy {
        self.policy
    }

    pub fn set_shrink_policy(&mut self, policy: ShrinkPolicy) {
        self.policy = policy;
    }

    pub fn front(&self) -> Option<&T> {
        self.peek_at(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.peek_at(-1)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.peek_at_mut(0)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.peek_at_mut(-1)
    }

    /// Maps a signed logical index onto a rank counted from the front. Negative indices
    /// count from the back, so `-1` is the last element.
    fn resolve_rank(&self, index: isize) -> Option<usize> {
        let len = self.len();

        let rank = if index < 0 {
            len.checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };

        (rank < len).then_some(rank)
    }

    pub fn peek_at(&self, index: isize) -> Option<&T> {
        let rank = self.resolve_rank(index)?;
        self.get(rank)
    }

    pub fn peek_at_mut(&mut self, index: isize) -> Option<&mut T> {
        let rank = self.resolve_rank(index)?;
        self.get_mut(rank)
    }

    pub fn get(&self, rank: usize) -> Option<&T> {
        if rank >= self.len() {
            return None;
        }

        self.buffer[self.offsets.masked_rank(rank)].as_ref()
    }

    pub fn get_mut(&mut self, rank: usize) -> Option<&mut T> {
        if rank >= self.len() {
            return None;
        }

        let index = self.offsets.masked_rank(rank);
        self.buffer[index].as_mut()
    }

    pub fn contains(&self, elem: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == elem)
    }

    /// Physical ranges holding the live elements, front part first. The second range is
    /// empty unless the ring has wrapped.
    pub(crate) fn live_ranges(&self) -> (Range<usize>, Range<usize>) {
        let head = self.offsets.head();
        let tail = self.offsets.tail();

        if self.offsets.is_wrapped() {
            (head..self.capacity(), 0..tail)
        } else {
            (head..tail, 0..0)
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        let (front, back) = self.live_ranges();
        Iter::new(&self.buffer[front], &self.buffer[back])
    }

    /// Empties the deque while keeping its capacity. Live values are dropped here rather
    /// than left behind in their slots.
    pub fn clear(&mut self) {
        let (front, back) = self.live_ranges();
        self.buffer[front].fill_with(|| None);
        self.buffer[back].fill_with(|| None);

        self.offsets.reset();
    }

    /// Appends `elem` and returns the new length.
    pub fn push_back(&mut self, elem: T) -> usize {
        let index = self.offsets.tail();
        self.buffer[index] = Some(elem);
        self.offsets.tail_forward();

        // collided cursors mean the ring is full, not empty
        if self.offsets.is_empty() {
            self.grow();
        }

        self.len()
    }

    /// Prepends `elem` and returns the new length.
    pub fn push_front(&mut self, elem: T) -> usize {
        self.offsets.head_backward();
        let index = self.offsets.head();
        self.buffer[index] = Some(elem);

        if self.offsets.is_empty() {
            self.grow();
        }

        self.len()
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.offsets.head();
        let elem = self.take_front()?;

        if self.should_shrink(head, self.offsets.tail()) {
            self.shrink();
        }

        Some(elem)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.offsets.tail();
        let elem = self.take_back()?;

        if self.should_shrink(self.offsets.head(), tail) {
            self.shrink();
        }

        Some(elem)
    }

    /// Removes the first element without considering a shrink.
    pub(crate) fn take_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let index = self.offsets.head();
        let elem = self.buffer[index].take();
        self.offsets.head_forward();

        debug_assert!(elem.is_some());
        elem
    }

    /// Removes the last element without considering a shrink.
    pub(crate) fn take_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.offsets.tail_backward();
        let index = self.offsets.tail();
        let elem = self.buffer[index].take();

        debug_assert!(elem.is_some());
        elem
    }

    #[inline]
    fn should_shrink(&self, origin: usize, far: usize) -> bool {
        self.capacity() > Self::MIN_CAPACITY
            && self.policy.should_shrink(origin, far, self.capacity())
    }

    /// Doubles the ring after a push filled it. A wrapped ring is first rotated so that the
    /// front element sits at slot zero, which leaves the upper half free for the tail.
    fn grow(&mut self) {
        let curr_capacity = self.capacity();
        let new_capacity = curr_capacity << 1;

        let head = self.offsets.head();
        if head > 0 {
            self.buffer.rotate_left(head);
        }

        self.buffer.resize_with(new_capacity, || None);
        self.offsets.grow_mask(curr_capacity);

        trace!(
            "grew ring deque from {} to {} slots holding {} elements",
            curr_capacity,
            new_capacity,
            self.len()
        );
        self.debug_assert_invariants();
    }

    /// Halves the ring. Only called once both cursors are known to sit in the lower half.
    fn shrink(&mut self) {
        let curr_capacity = self.capacity();
        let new_capacity = curr_capacity >> 1;

        self.buffer.truncate(new_capacity);
        self.buffer.shrink_to_fit();
        self.offsets.shrink_mask();

        trace!(
            "shrank ring deque from {} to {} slots holding {} elements",
            curr_capacity,
            new_capacity,
            self.len()
        );
        self.debug_assert_invariants();
    }

    #[inline]
    fn debug_assert_invariants(&self) {
        debug_assert!(self.capacity().is_power_of_two());
        debug_assert!(self.capacity() >= Self::MIN_CAPACITY);
        debug_assert_eq!(self.buffer.len(), self.capacity());
        debug_assert!(self.offsets.head() < self.capacity());
        debug_assert!(self.offsets.tail() < self.capacity());
    }
}

impl<T> Default for RingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for RingDeque<T> {
    type Output = T;

    fn index(&self, rank: usize) -> &Self::Output {
        let len = self.len();

        match self.get(rank) {
            Some(elem) => elem,
            None => panic!("rank {rank} is out of bounds for deque of length {len}"),
        }
    }
}

impl<T> IndexMut<usize> for RingDeque<T> {
    fn index_mut(&mut self, rank: usize) -> &mut Self::Output {
        let len = self.len();

        match self.get_mut(rank) {
            Some(elem) => elem,
            None => panic!("rank {rank} is out of bounds for deque of length {len}"),
        }
    }
}

impl<T> Debug for RingDeque<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for RingDeque<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RingDeque<T> where T: Eq {}

impl<T> Extend<T> for RingDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push_back(elem);
        }
    }
}

impl<'a, T> Extend<&'a T> for RingDeque<T>
where
    T: Copy + 'a,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for RingDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();

        // one spare slot so that collecting exactly `lower` items does not grow
        let mut deque = Self::try_with_capacity(lower.saturating_add(1)).unwrap_or_default();
        deque.extend(iter);

        deque
    }
}
