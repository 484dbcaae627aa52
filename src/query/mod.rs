//! Point queries against extracted surfaces.

mod locator;
mod pick;

pub use locator::PointLocator;
pub use pick::{pick, PickOutcome, PickResult};
