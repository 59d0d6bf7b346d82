pub mod tracker;

pub use tracker::ProgressBarSink;
