//! File-level driver: load a GPX file, run the speed filter over every track
//! segment and write the cleaned file back out.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use csv::Writer;
use gpx::{read, write, Gpx, TrackSegment};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::segment_filter::{filter_segment, FilterStats, SpeedThreshold};
use crate::speed_estimator::elapsed_hours;

/// One row of the per-segment statistics report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentReport {
    pub track_index: usize,
    pub track_name: String,
    pub segment_index: usize,
    pub total_points: usize,
    pub filtered_points: usize,
    pub remaining_points: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CleaningSummary {
    pub stats: FilterStats,
    pub segments: Vec<SegmentReport>,
}

pub struct GpxCleaner {
    threshold: SpeedThreshold,
}

impl GpxCleaner {
    pub fn new(threshold: SpeedThreshold) -> Self {
        Self { threshold }
    }

    /// Reads `input_path`, filters it and saves the result to `output_path`.
    pub fn process_file(&self, input_path: &Path, output_path: &Path) -> Result<CleaningSummary> {
        let start = std::time::Instant::now();

        let reader = BufReader::new(File::open(input_path)?);
        let mut gpx = read(reader)?;

        let summary = self.clean(&mut gpx);

        let writer = BufWriter::new(File::create(output_path)?);
        write(&gpx, writer)?;

        info!(
            "{}: {} tracks, {} segments, {} of {} points filtered in {:.2}s",
            input_path.display(),
            gpx.tracks.len(),
            summary.segments.len(),
            summary.stats.filtered_points,
            summary.stats.total_points,
            start.elapsed().as_secs_f64()
        );

        Ok(summary)
    }

    /// Replaces the points of every segment in `gpx` with their filtered
    /// version. Segments are independent and are filtered in parallel.
    pub fn clean(&self, gpx: &mut Gpx) -> CleaningSummary {
        let threshold = self.threshold;
        let track_names: Vec<String> = gpx
            .tracks
            .iter()
            .map(|track| track.name.clone().unwrap_or_default())
            .collect();

        let mut segments: Vec<(usize, usize, &mut TrackSegment)> = gpx
            .tracks
            .iter_mut()
            .enumerate()
            .flat_map(|(track_index, track)| {
                track
                    .segments
                    .iter_mut()
                    .enumerate()
                    .map(move |(segment_index, segment)| (track_index, segment_index, segment))
            })
            .collect();

        let reports: Vec<SegmentReport> = segments
            .par_iter_mut()
            .map(|(track_index, segment_index, segment)| {
                log_out_of_order_times(*track_index, *segment_index, segment);

                let (kept, stats) = filter_segment(&segment.points, threshold);
                segment.points = kept;

                debug!(
                    "track {} segment {}: {} points, {} filtered",
                    track_index, segment_index, stats.total_points, stats.filtered_points
                );

                SegmentReport {
                    track_index: *track_index,
                    track_name: track_names[*track_index].clone(),
                    segment_index: *segment_index,
                    total_points: stats.total_points,
                    filtered_points: stats.filtered_points,
                    remaining_points: stats.remaining_points(),
                }
            })
            .collect();

        let stats = reports
            .iter()
            .map(|r| FilterStats {
                total_points: r.total_points,
                filtered_points: r.filtered_points,
            })
            .sum();

        CleaningSummary { stats, segments: reports }
    }
}

// Negative elapsed time is let through by the filter; surface it in the log.
fn log_out_of_order_times(track_index: usize, segment_index: usize, segment: &TrackSegment) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let backwards = segment
        .points
        .windows(2)
        .filter(|pair| elapsed_hours(&pair[0], &pair[1]).is_some_and(|h| h < 0.0))
        .count();

    if backwards > 0 {
        debug!(
            "track {} segment {}: {} point(s) timestamped before their predecessor",
            track_index, segment_index, backwards
        );
    }
}

/// Writes one CSV row per segment.
pub fn write_report(path: &Path, summary: &CleaningSummary) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for row in &summary.segments {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
