//! Greedy single-pass speed filter for one track segment.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::error::{CleanerError, Result};
use crate::speed_estimator::estimate_speed;
use crate::track_point::TrackSample;

/// Maximum plausible speed in km/h between two consecutive retained points.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpeedThreshold(f64);

impl SpeedThreshold {
    pub fn new(kmh: f64) -> Result<Self> {
        if !kmh.is_finite() || kmh <= 0.0 {
            return Err(CleanerError::InvalidThreshold(
                "Speed threshold must be positive".to_string(),
            ));
        }
        Ok(Self(kmh))
    }

    pub fn kmh(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub total_points: usize,
    pub filtered_points: usize,
}

impl FilterStats {
    pub fn remaining_points(&self) -> usize {
        self.total_points - self.filtered_points
    }
}

impl Add for FilterStats {
    type Output = FilterStats;

    fn add(self, other: FilterStats) -> FilterStats {
        FilterStats {
            total_points: self.total_points + other.total_points,
            filtered_points: self.filtered_points + other.filtered_points,
        }
    }
}

impl AddAssign for FilterStats {
    fn add_assign(&mut self, other: FilterStats) {
        *self = *self + other;
    }
}

impl Sum for FilterStats {
    fn sum<I: Iterator<Item = FilterStats>>(iter: I) -> Self {
        iter.fold(FilterStats::default(), Add::add)
    }
}

/// Keeps the points of `points` whose speed relative to the last *retained*
/// point does not exceed `threshold`.
///
/// The first point is always kept. A rejected point never becomes the
/// comparison base, so a burst of bad fixes is measured against the last good
/// one. Speeds that cannot be computed come back as 0.0 and always pass.
pub fn filter_segment<P>(points: &[P], threshold: SpeedThreshold) -> (Vec<P>, FilterStats)
where
    P: TrackSample + Clone,
{
    let mut stats = FilterStats {
        total_points: points.len(),
        filtered_points: 0,
    };

    let Some((first, rest)) = points.split_first() else {
        return (Vec::new(), stats);
    };

    let mut retained = Vec::with_capacity(points.len());
    retained.push(first.clone());

    for current in rest {
        // retained is never empty here
        let last_retained = &retained[retained.len() - 1];
        let speed = estimate_speed(last_retained, current);

        if speed <= threshold.kmh() {
            retained.push(current.clone());
        } else {
            stats.filtered_points += 1;
        }
    }

    (retained, stats)
}
