/// Head and tail cursors of a power-of-two ring, kept already masked so that both always
/// lie in `0..capacity`.
#[derive(Clone)]
pub(crate) struct RingOffsets {
    head: usize,
    tail: usize,
    capacity_mask: usize,
}

impl RingOffsets {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());

        Self {
            head: 0,
            tail: 0,
            capacity_mask: capacity - 1,
        }
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.capacity_mask + 1
    }

    #[inline(always)]
    pub const fn mask(&self, val: usize) -> usize {
        val & self.capacity_mask
    }

    #[inline(always)]
    pub const fn head(&self) -> usize {
        self.head
    }

    #[inline(always)]
    pub const fn tail(&self) -> usize {
        self.tail
    }

    /// Number of slots between the cursors. A collided pair reads as zero, which is why a
    /// full ring must never be left behind by a push.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        if self.head <= self.tail {
            self.tail - self.head
        } else {
            self.capacity() - (self.head - self.tail)
        }
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Whether the live range is split across the end of the buffer.
    #[inline(always)]
    pub const fn is_wrapped(&self) -> bool {
        self.head > self.tail
    }

    #[inline(always)]
    pub fn head_forward(&mut self) {
        self.head = self.mask(self.head.wrapping_add(1));
    }

    #[inline(always)]
    pub fn head_backward(&mut self) {
        self.head = self.mask(self.head.wrapping_sub(1));
    }

    #[inline(always)]
    pub fn tail_forward(&mut self) {
        self.tail = self.mask(self.tail.wrapping_add(1));
    }

    #[inline(always)]
    pub fn tail_backward(&mut self) {
        self.tail = self.mask(self.tail.wrapping_sub(1));
    }

    #[inline(always)]
    pub const fn masked_rank(&self, rank: usize) -> usize {
        self.mask(self.head.wrapping_add(rank))
    }

    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Records a ring that was realigned to start at slot zero and then doubled. `len` is
    /// the number of live slots, which equals the old capacity when growth follows a
    /// collision.
    pub fn grow_mask(&mut self, len: usize) {
        self.head = 0;
        self.tail = len;
        self.capacity_mask = (self.capacity_mask << 1) | 1;

        debug_assert!(self.tail < self.capacity());
    }

    pub fn shrink_mask(&mut self) {
        self.capacity_mask >>= 1;

        debug_assert!(self.head <= self.capacity_mask);
        debug_assert!(self.tail <= self.capacity_mask);
    }
}

impl Default for RingOffsets {
    fn default() -> Self {
        Self::new(4)
    }
}
