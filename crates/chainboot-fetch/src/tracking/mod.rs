//! Pure transformations used by the fetcher.

mod percent;

pub use percent::PercentTracker;
