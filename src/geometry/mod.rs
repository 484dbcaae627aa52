pub mod domain;
pub mod half_space;
pub mod implicit;

pub use domain::ShellDomain;
pub use half_space::{ClipAxis, HalfSpace};
pub use implicit::Implicit;
