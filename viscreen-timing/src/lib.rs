pub mod timer;

pub use timer::{Clock, DeadlineTimer, ManualClock, MonotonicClock};
