pub mod cache;
pub mod resolver;

pub use cache::SegmentCache;
pub use resolver::{SegmentLookup, SegmentResolver};
