//! digscan entrypoint: `anomaly` screens one numeric metric of a CSV
//! dataset against a mean + k * std threshold and exports flagged rows and
//! figures; `maturity` scores a 5x5 Likert survey into a weighted index
//! and renders the PDF report.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use digscan::input::survey::load_survey;
use digscan::input::load_dataset;
use digscan::model::profile::MaturityProfile;
use digscan::pipeline::detect::run_detect;
use digscan::pipeline::recommend::recommendations_for;
use digscan::pipeline::score::run_score;
use digscan::report::text::ViewMode;
use digscan::report::{self, export, pdf, plot, text};

#[derive(Parser, Debug)]
#[command(name = "digscan")]
#[command(about = "Statistical anomaly screening and digital maturity assessment", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Screen one numeric metric of a CSV dataset for threshold anomalies
    Anomaly {
        /// Path to the CSV dataset (UNSW-NB15 style)
        #[arg(long)]
        input: PathBuf,

        /// Numeric column to screen
        #[arg(long)]
        metric: String,

        /// Sensitivity multiplier: threshold = mean + k * std
        #[arg(long, default_value_t = 2.5)]
        k: f64,

        /// Output directory for exports
        #[arg(long, default_value = "outputs")]
        out: PathBuf,

        /// Which rows to show in the console table
        #[arg(long, value_enum, default_value = "all")]
        view: ViewMode,

        /// Maximum rows in the console table
        #[arg(long, default_value_t = 50)]
        top: usize,

        /// Skip PNG figure export
        #[arg(long)]
        no_plots: bool,

        /// Skip anomaly CSV export
        #[arg(long)]
        no_csv: bool,
    },
    /// Score a digital maturity survey and render the PDF report
    Maturity {
        /// Path to the survey answers JSON
        #[arg(long)]
        survey: PathBuf,

        /// Output directory for the report
        #[arg(long, default_value = "outputs")]
        out: PathBuf,

        /// Skip PDF report export
        #[arg(long)]
        no_pdf: bool,
    },
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Anomaly {
            input,
            metric,
            k,
            out,
            view,
            top,
            no_plots,
            no_csv,
        } => run_anomaly(&input, &metric, k, &out, view, top, no_plots, no_csv),
        Commands::Maturity {
            survey,
            out,
            no_pdf,
        } => run_maturity(&survey, &out, no_pdf),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_anomaly(
    input: &Path,
    metric: &str,
    k: f64,
    out: &Path,
    view: ViewMode,
    top: usize,
    no_plots: bool,
    no_csv: bool,
) -> Result<(), String> {
    let dataset = load_dataset(input).map_err(|e| e.to_string())?;
    info!(
        rows = dataset.n_rows(),
        columns = dataset.n_columns(),
        numeric = dataset.numeric_columns().len(),
        "dataset loaded"
    );

    let values = dataset.numeric_view(metric).map_err(|e| e.to_string())?;
    let detection = run_detect(&values, metric, k);
    print!("{}", text::render_anomaly_summary(&detection));
    println!();

    let indices = text::view_filter(&detection, view, top);
    if indices.is_empty() {
        println!("{}", text::empty_view_message(view));
    } else {
        print!("{}", text::render_anomaly_table(&dataset, &detection, &indices));
    }

    if no_csv && no_plots {
        return Ok(());
    }
    std::fs::create_dir_all(out).map_err(|e| e.to_string())?;
    let ts = report::timestamp();

    if !no_csv {
        match export::write_anomaly_csv(&dataset, &detection, out, &ts)
            .map_err(|e| e.to_string())?
        {
            Some(path) => info!(path = %path.display(), "anomaly CSV exported"),
            None => println!("No anomalies for the selected metric and k; CSV export skipped."),
        }
    }

    if !no_plots {
        let series = plot::write_series_plot(&detection, out, &ts).map_err(|e| e.to_string())?;
        let hist = plot::write_histogram(&detection, out, &ts).map_err(|e| e.to_string())?;
        info!(series = %series.display(), histogram = %hist.display(), "figures exported");
    }

    Ok(())
}

fn run_maturity(survey_path: &Path, out: &Path, no_pdf: bool) -> Result<(), String> {
    let survey = load_survey(survey_path).map_err(|e| e.to_string())?;
    let scores = survey.dimension_scores();
    let profile = MaturityProfile::default_v1();
    let assessment = run_score(&survey.company, &scores, &profile).map_err(|e| e.to_string())?;
    let recommendations = recommendations_for(assessment.tier);

    print!(
        "{}",
        text::render_maturity_summary(&assessment, &profile, recommendations)
    );

    if !no_pdf {
        std::fs::create_dir_all(out).map_err(|e| e.to_string())?;
        let path = pdf::write_maturity_pdf(
            &assessment,
            &profile,
            recommendations,
            out,
            &report::timestamp(),
        )
        .map_err(|e| e.to_string())?;
        info!(path = %path.display(), "maturity report exported");
    }

    Ok(())
}
