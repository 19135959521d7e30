//! Titanic Dashboard
//!
//! Opens the interactive dashboard window, or prints the summary for one
//! selection with the `summary` subcommand.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eframe::egui;
use env_logger::Env;

use titanic_dashboard::app::TitanicDashboardApp;
use titanic_dashboard::config::{
    APP_TITLE, BUNDLED_DATASET_NAME, HISTOGRAM_BINS, MAX_HISTOGRAM_BINS, MIN_WINDOW_SIZE, WINDOW_SIZE,
};
use titanic_dashboard::data::filter::{compute_filtered_view, FilterSelection};
use titanic_dashboard::data::loader::{load_bundled, load_file};
use titanic_dashboard::data::model::{Dataset, PassengerClass};
use titanic_dashboard::data::summary::DashboardSummary;
use titanic_dashboard::data::table::format_view;
use titanic_dashboard::report;
use titanic_dashboard::state::AppState;

/// Interactive Titanic passenger dashboard
#[derive(Parser, Debug)]
#[command(name = "titanic-dashboard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Passenger file to load instead of the bundled dataset (.csv, .json, .parquet)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the summary for one selection and exit
    Summary {
        /// Passenger class (First, Second, Third)
        #[arg(short, long)]
        class: PassengerClass,

        /// Minimum age (defaults to the youngest passenger)
        #[arg(long)]
        age_min: Option<f64>,

        /// Maximum age (defaults to the oldest passenger)
        #[arg(long)]
        age_max: Option<f64>,

        /// Number of age histogram bins (1-1000)
        #[arg(
            long,
            default_value_t = HISTOGRAM_BINS,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
                .range(1..=MAX_HISTOGRAM_BINS as u64)
        )]
        bins: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also print the matching passengers as a table
        #[arg(long)]
        rows: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    // Loaded once; shared read-only for the rest of the process.
    let (dataset, source) = match &cli.data {
        Some(path) => (load_file(path)?, path.display().to_string()),
        None => (load_bundled()?, BUNDLED_DATASET_NAME.to_string()),
    };
    log::info!("Using {} passengers from {source}", dataset.len());
    let dataset = Arc::new(dataset);

    match cli.command {
        Some(Commands::Summary {
            class,
            age_min,
            age_max,
            bins,
            json,
            rows,
        }) => run_summary(&dataset, class, age_min, age_max, bins, json, rows),
        None => run_gui(dataset, source),
    }
}

fn run_summary(
    dataset: &Dataset,
    class: PassengerClass,
    age_min: Option<f64>,
    age_max: Option<f64>,
    bins: usize,
    json: bool,
    rows: bool,
) -> Result<()> {
    let (lo, hi) = dataset.age_range();
    let selection = FilterSelection::new(class, age_min.unwrap_or(lo), age_max.unwrap_or(hi));
    let view = compute_filtered_view(dataset, &selection);
    let summary = DashboardSummary::compute_with_bins(&view, bins);

    if json {
        println!("{}", report::render_json(&selection, &summary)?);
    } else {
        print!("{}", report::render_text(&selection, &summary));
    }
    if rows {
        println!("{}", format_view(&view)?);
    }
    Ok(())
}

fn run_gui(dataset: Arc<Dataset>, source: String) -> Result<()> {
    let state = AppState::new(dataset, source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(TitanicDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running dashboard window")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_bins(args: &[&str]) -> Result<usize, clap::Error> {
        let cli = Cli::try_parse_from(args)?;
        match cli.command {
            Some(Commands::Summary { bins, .. }) => Ok(bins),
            None => panic!("expected the summary subcommand"),
        }
    }

    #[test]
    fn bins_default_and_bounds() {
        assert_eq!(summary_bins(&["titanic-dashboard", "summary", "-c", "First"]).unwrap(), HISTOGRAM_BINS);
        assert_eq!(
            summary_bins(&["titanic-dashboard", "summary", "-c", "First", "--bins", "1000"]).unwrap(),
            1000
        );
    }

    #[test]
    fn out_of_range_bins_are_rejected() {
        for bins in ["0", "1001", "18446744073709551615"] {
            let err = summary_bins(&["titanic-dashboard", "summary", "-c", "First", "--bins", bins])
                .unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "--bins {bins}");
        }
    }
}
