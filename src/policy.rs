use crate::error::RingDequeError;

/// When a [`RingDeque`](crate::RingDeque) hands half of its buffer back.
///
/// Shrinking is only considered once a cursor has travelled past `threshold` slots and the
/// live range fits within `capacity >> occupancy_shift`, so small deques never shrink and a
/// shrink is never followed straight away by a grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShrinkPolicy {
    threshold: usize,
    occupancy_shift: u32,
}

impl ShrinkPolicy {
    /// Cursor distance a deque must exceed before it is considered for shrinking.
    pub const DEFAULT_THRESHOLD: usize = 10_000;
    /// Live range must fit within a quarter of the ring.
    pub const DEFAULT_OCCUPANCY_SHIFT: u32 = 2;

    /// Returns [`RingDequeError::InvalidShrinkPolicy`] when `occupancy_shift` is below 2 or
    /// not smaller than `usize::BITS`.
    pub fn new(threshold: usize, occupancy_shift: u32) -> Result<Self, RingDequeError> {
        // below a quarter of the buffer the far cursor could land on the halved boundary
        if occupancy_shift < 2 || occupancy_shift >= usize::BITS {
            return Err(RingDequeError::InvalidShrinkPolicy {
                threshold,
                occupancy_shift,
            });
        }

        Ok(Self {
            threshold,
            occupancy_shift,
        })
    }

    /// A policy under which the ring only ever grows.
    pub const fn never() -> Self {
        Self {
            threshold: usize::MAX,
            occupancy_shift: Self::DEFAULT_OCCUPANCY_SHIFT,
        }
    }

    #[inline]
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    #[inline]
    pub const fn occupancy_shift(&self) -> u32 {
        self.occupancy_shift
    }

    /// `origin` is the cursor expected near slot zero, `far` the cursor at the other end of
    /// the live range.
    #[inline]
    pub(crate) const fn should_shrink(&self, origin: usize, far: usize, capacity: usize) -> bool {
        origin < 2 && far > self.threshold && far <= capacity >> self.occupancy_shift
    }
}

impl Default for ShrinkPolicy {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            occupancy_shift: Self::DEFAULT_OCCUPANCY_SHIFT,
        }
    }
}
