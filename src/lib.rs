mod iter;
mod policy;
mod ring_deque;
mod ring_offsets;

pub mod error;

pub use error::RingDequeError;
pub use iter::{IntoIter, Iter};
pub use policy::ShrinkPolicy;
pub use ring_deque::RingDeque;
