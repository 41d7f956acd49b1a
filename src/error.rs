use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RingDequeError {
    #[error("capacity hint {0} has no representable power of two")]
    CapacityOverflow(usize),

    #[error("shrink policy with threshold {threshold} and occupancy shift {occupancy_shift} is invalid")]
    InvalidShrinkPolicy { threshold: usize, occupancy_shift: u32 },
}
