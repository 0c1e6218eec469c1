//! Removes GPS fixes that imply an unrealistic travel speed from GPX tracks.
//!
//! [`segment_filter::filter_segment`] is the core: a single forward pass that
//! keeps a point only if the speed from the last kept point stays under the
//! threshold. [`gpx_cleaner::GpxCleaner`] applies it to every segment of a file.

pub mod error;
pub mod gpx_cleaner;
pub mod segment_filter;
pub mod speed_estimator;
pub mod track_point;
pub mod validators;

pub use error::{CleanerError, Result};
pub use segment_filter::{filter_segment, FilterStats, SpeedThreshold};
pub use speed_estimator::estimate_speed;
pub use track_point::{GeoPoint, TrackSample};
