pub mod crash_group;
pub mod error;
pub mod histogram;
pub mod timefmt;

pub use crash_group::{ChangeFactor, CrashGroup, RegressionBadge, RegressionInfo};
pub use error::{Error, Result};
pub use histogram::Histogram;
