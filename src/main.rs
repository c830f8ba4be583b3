// src/main.rs

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use indicatif::ProgressBar;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use motion_platform_analysis::constants::{ACC_CMD, ACC_MES, POS_MES, VEL_CMD};
use motion_platform_analysis::data_analysis::fft_utils::spectrum;
use motion_platform_analysis::data_analysis::fragmentation::{
    fragment_by_iteration_with_progress, fragment_by_ranges,
};
use motion_platform_analysis::data_analysis::frequency_response::frequency_response;
use motion_platform_analysis::data_analysis::maneuver_windows::{extract_windows, maneuver_windows};
use motion_platform_analysis::data_analysis::zero_crossing::{crossing_intervals, zero_crossings, SignChangeSplit};
use motion_platform_analysis::data_input::log_parser::{load_dof, reader_for_path};
use motion_platform_analysis::data_input::persistence::{may_write, write_csv, OverwritePolicy, SaveOutcome};
use motion_platform_analysis::data_input::profile::{chain_profiles, read_profile};
use motion_platform_analysis::plot_framework::PlotStyle;
use motion_platform_analysis::plot_functions::plot_bode::plot_bode;
use motion_platform_analysis::plot_functions::plot_dof::plot_dof;
use motion_platform_analysis::plot_functions::plot_fragments::plot_fragments;
use motion_platform_analysis::plot_functions::plot_io::{plot_io, IoGroup, TrendFit};
use motion_platform_analysis::plot_functions::plot_signal::plot_signal;
use motion_platform_analysis::{crate_version, preprocess, AnalysisConfig, Dof, Fragment, Quantity, Series};

#[derive(Parser, Debug)]
#[command(author, version, about = "Aligns commanded and measured motion-platform signals and characterises their response", long_about = None)]
struct Cli {
    /// Motion log (CSV export, or HDF5 when built with the `hdf5` feature)
    #[arg(value_hint = ValueHint::FilePath)]
    log: PathBuf,

    /// Degree of freedom to analyse
    #[arg(long, value_enum, default_value_t = Dof::Z)]
    dof: Dof,

    /// Motion profile JSON; repeat to chain profiles played back to back
    #[arg(long, value_hint = ValueHint::FilePath)]
    profile: Vec<PathBuf>,

    /// Target sample rate in Hz (overrides the config file)
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Directory for the aligned CSV and the figures
    #[arg(long, default_value = "output", value_hint = ValueHint::DirPath)]
    output_dir: PathBuf,

    /// What to do with existing output files
    #[arg(long, value_enum, default_value_t = OverwriteMode::Ask)]
    overwrite: OverwriteMode,

    /// Analysis parameters as JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Skip figure generation
    #[arg(long, action = ArgAction::SetTrue)]
    no_plots: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OverwriteMode {
    Always,
    Never,
    Ask,
}

fn confirm_overwrite(path: &Path) -> bool {
    print!("File {} exists. Overwrite? [y/n]: ", path.display());
    let _ = io::stdout().flush();
    let mut answer = String::new();
    io::stdin().read_line(&mut answer).is_ok() && answer.trim().eq_ignore_ascii_case("y")
}

fn with_policy<T>(mode: OverwriteMode, f: impl FnOnce(OverwritePolicy<'_>) -> T) -> T {
    let mut ask = confirm_overwrite;
    let policy = match mode {
        OverwriteMode::Always => OverwritePolicy::Always,
        OverwriteMode::Never => OverwritePolicy::Never,
        OverwriteMode::Ask => OverwritePolicy::Ask(&mut ask),
    };
    f(policy)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    info!("motion-platform-analysis {}", crate_version());
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(rate) = cli.sample_rate {
        config.sample_rate_hz = rate;
    }
    config.validate()?;

    let reader = reader_for_path(&cli.log);
    let mut series = load_dof(reader.as_ref(), &cli.log, cli.dof)
        .with_context(|| format!("loading {} for '{}'", cli.log.display(), cli.dof))?;
    let report = preprocess(&mut series, config.sample_rate_hz).context("aligning measured to commanded motion")?;
    info!(
        "Aligned {} rows: offset {:.6}, lag {} samples ({:.4} s)",
        report.rows, report.offset, report.lag.samples, report.lag.time
    );

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating {}", cli.output_dir.display()))?;
    let stem = cli
        .log
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "motionlog".to_string());
    let root_name = format!("{}_{}", stem, cli.dof);
    let output = |suffix: &str| cli.output_dir.join(format!("{root_name}_{suffix}"));

    let csv_path = output("aligned.csv");
    if with_policy(cli.overwrite, |policy| write_csv(&series, &csv_path, policy))? == SaveOutcome::Skipped {
        info!("Aligned series not saved");
    }

    let half_periods = split_half_periods(&series, config.min_samples_between_splits)?;
    let crossings = zero_crossings(series.column(VEL_CMD)?);
    let cycles = fragment_by_ranges(&series, &crossing_intervals(&crossings))?;
    info!(
        "{} velocity sign changes: {} half periods, {} overlapping cycles",
        crossings.len(),
        half_periods.len(),
        cycles.len()
    );

    let maneuvers = if cli.profile.is_empty() {
        Vec::new()
    } else {
        let sources = cli
            .profile
            .iter()
            .map(|path| read_profile(path, &config.profile_kind))
            .collect::<motion_platform_analysis::Result<Vec<_>>>()?;
        let windows = maneuver_windows(&chain_profiles(sources), &config.windows);
        // One series per window, so touching windows never merge.
        let pieces = extract_windows(&series, &windows)?;
        info!("Extracted {} maneuver windows", pieces.len());
        pieces
    };

    if cli.no_plots {
        return Ok(());
    }
    let style = PlotStyle::default();
    let render = |path: &Path| with_policy(cli.overwrite, |mut policy| may_write(path, &mut policy));
    let report_plot = |name: &str, result: std::result::Result<(), Box<dyn std::error::Error>>| {
        if let Err(e) = result {
            warn!("Skipping {} plot: {}", name, e);
        }
    };

    let path = output("motion.png");
    if render(&path) {
        report_plot("motion", plot_dof(&series, cli.dof, None, &root_name, &path, &style));
    }
    let path = output("acceleration.png");
    if render(&path) {
        report_plot(
            "acceleration",
            plot_signal(&series, cli.dof, Quantity::Acceleration, &root_name, &path, &style),
        );
    }
    if let Some(first) = cycles.first() {
        let path = output("first_cycle.png");
        if render(&path) {
            report_plot(
                "first cycle",
                plot_dof(&series, cli.dof, Some(first.source_rows.clone()), &root_name, &path, &style),
            );
        }
    }
    if !half_periods.is_empty() {
        let path = output("half_periods.png");
        if render(&path) {
            report_plot("half period", plot_fragments(&half_periods, POS_MES, &root_name, &path, &style));
        }
    }

    if !maneuvers.is_empty() {
        let spectra = maneuvers
            .iter()
            .filter(|m| m.len() >= 2)
            .map(|m| spectrum(m, &[ACC_CMD, ACC_MES], config.sample_rate_hz))
            .collect::<motion_platform_analysis::Result<Vec<_>>>()?;
        let response = frequency_response(&spectra, ACC_CMD, ACC_MES, config.bode_peak_height, config.cutoff())?;
        let path = output("bode.png");
        if render(&path) {
            report_plot("Bode", plot_bode(&response, &root_name, &path, &style));
        }

        let path = output("io.png");
        if render(&path) {
            let group = amplitude_group(&maneuvers, cli.dof)?;
            match plot_io(
                &[group],
                TrendFit::Free,
                "Input amplitude",
                "Output amplitude",
                &root_name,
                &path,
                &style,
            ) {
                Ok(trends) => info!("I/O trend lines: {:?}", trends),
                Err(e) => warn!("Skipping I/O plot: {}", e),
            }
        }
    }
    Ok(())
}

fn split_half_periods(series: &Series, min_samples: usize) -> Result<Vec<Fragment>> {
    let split = SignChangeSplit::new(VEL_CMD, min_samples);
    fragment_by_iteration_with_progress::<_, ProgressBar>(series, |s, w| split.decide(s, w))
        .map_err(|e| anyhow!("splitting at velocity sign changes: {e}"))
}

// Peak commanded against peak measured acceleration of every maneuver.
fn amplitude_group(maneuvers: &[Series], dof: Dof) -> Result<IoGroup> {
    let peak = |maneuver: &Series, column: &str| -> Result<f64> {
        Ok(maneuver.column(column)?.iter().fold(0.0f64, |m, v| m.max(v.abs())))
    };
    let mut group = IoGroup {
        label: format!("{} maneuvers", dof.name().to_uppercase()),
        x: Vec::with_capacity(maneuvers.len()),
        y: Vec::with_capacity(maneuvers.len()),
    };
    for maneuver in maneuvers {
        if maneuver.is_empty() {
            continue;
        }
        group.x.push(peak(maneuver, ACC_CMD)?);
        group.y.push(peak(maneuver, ACC_MES)?);
    }
    Ok(group)
}
