//! Location fixes and watch option filtering

pub mod fix;
pub mod gate;
pub mod geo;
pub mod options;

pub use fix::{Fix, FixQuality};
pub use gate::SampleGate;
pub use geo::distance_m;
pub use options::{Accuracy, WatchOptions};
