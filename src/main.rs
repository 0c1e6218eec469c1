use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use gpx_speed_cleaner::gpx_cleaner::{write_report, CleaningSummary, GpxCleaner};
use gpx_speed_cleaner::speed_estimator::format_speed;
use gpx_speed_cleaner::validators::{
    validate_gpx_file, validate_speed_threshold, DEFAULT_MAX_THRESHOLD_KMH,
};
use gpx_speed_cleaner::{FilterStats, Result, SpeedThreshold};

#[derive(Parser, Debug)]
#[command(name = "gpx-speed-cleaner")]
#[command(about = "Clean GPX files by removing points with unrealistic speeds", long_about = None)]
struct Args {
    /// Input GPX file path
    input_file: PathBuf,

    /// Output GPX file path
    output_file: PathBuf,

    /// Speed threshold in km/h
    #[arg(long, default_value_t = 25.0)]
    speed_threshold: f64,

    /// Highest threshold accepted by validation, in km/h
    #[arg(long, default_value_t = DEFAULT_MAX_THRESHOLD_KMH)]
    max_threshold: f64,

    /// Write per-segment statistics to this CSV file
    #[arg(long, value_name = "CSV_PATH")]
    report: Option<PathBuf>,
}

/// Validated run settings built from the command line.
#[derive(Debug)]
struct CleanerConfig {
    input_file: PathBuf,
    output_file: PathBuf,
    speed_threshold: SpeedThreshold,
    report_path: Option<PathBuf>,
}

impl CleanerConfig {
    fn from_args(args: Args) -> Result<Self> {
        validate_gpx_file(&args.input_file)?;
        let speed_threshold = validate_speed_threshold(args.speed_threshold, args.max_threshold)?;

        Ok(Self {
            input_file: args.input_file,
            output_file: args.output_file,
            speed_threshold,
            report_path: args.report,
        })
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = CleanerConfig::from_args(args)?;
    info!(
        "Cleaning {} with threshold {}",
        config.input_file.display(),
        format_speed(config.speed_threshold.kmh())
    );

    let cleaner = GpxCleaner::new(config.speed_threshold);
    let summary = cleaner.process_file(&config.input_file, &config.output_file)?;
    print_stats(&summary.stats);

    if let Some(report_path) = &config.report_path {
        write_report(report_path, &summary)?;
        print_segment_table(&summary);
        println!("Segment report saved to: {}", report_path.display());
    }

    println!("\nCleaned GPX file saved to: {}", config.output_file.display());
    Ok(())
}

fn print_stats(stats: &FilterStats) {
    println!("\nProcessing Statistics:");
    println!("Total points processed: {}", stats.total_points);
    println!("Points filtered out: {}", stats.filtered_points);
    println!("Remaining points: {}", stats.remaining_points());
}

fn print_segment_table(summary: &CleaningSummary) {
    println!("\n{:<6} {:<24} {:<8} {:>8} {:>9} {:>10}",
             "Track", "Name", "Segment", "Total", "Filtered", "Remaining");
    for row in &summary.segments {
        println!("{:<6} {:<24} {:<8} {:>8} {:>9} {:>10}",
                 row.track_index,
                 row.track_name,
                 row.segment_index,
                 row.total_points,
                 row.filtered_points,
                 row.remaining_points);
    }
}
