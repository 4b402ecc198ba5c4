use tracing::info;
use tracing_subscriber::EnvFilter;

use inkprep::{
    CanvasProfile, FetchParams, HttpTransport, TracingReporter, fetch_to_directory,
    normalize_directory, read_source_list, write_report_json,
};

use super::args::{CliArgs, Command, FetchArgs, NormalizeArgs};
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Profile file (or the Inkplate default) with command-line overrides applied.
fn build_profile(args: &NormalizeArgs) -> Result<CanvasProfile, AppError> {
    let mut profile = match &args.profile {
        Some(path) => CanvasProfile::from_json_file(path)?,
        None => CanvasProfile::default(),
    };
    if let Some(width) = args.width {
        profile.width = width;
    }
    if let Some(height) = args.height {
        profile.height = height;
    }
    if let Some(background) = args.background {
        profile.background = background;
    }
    if let Some(quality) = args.quality {
        profile.jpeg_quality = quality;
    }
    if let Some(filter) = args.filter {
        profile.filter = filter;
    }
    profile.validate()?;
    Ok(profile)
}

fn run_fetch(args: FetchArgs) -> Result<(), AppError> {
    let identifiers = read_source_list(&args.sources)?;
    if identifiers.is_empty() {
        return Err(AppError::EmptySourceList { path: args.sources });
    }

    let params = FetchParams {
        working_dir: args.working_dir,
        url_suffix: args.url_suffix,
        delimiter: args.delimiter,
        ..FetchParams::default()
    };
    let transport = HttpTransport::new()?;

    let report = fetch_to_directory(
        &identifiers,
        &transport,
        &params,
        !args.fail_fast,
        &mut TracingReporter,
    )?;

    info!("Downloaded: {}", report.downloaded);
    info!("Failed: {}", report.failed);
    info!("Malformed: {}", report.malformed);

    if let Some(path) = &args.report {
        write_report_json(&report, path)?;
    }
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<(), AppError> {
    if !args.input_dir.is_dir() {
        return Err(AppError::MissingInputDir {
            path: args.input_dir,
        });
    }
    let profile = build_profile(&args)?;

    let report = normalize_directory(
        &args.input_dir,
        &args.output_dir,
        &profile,
        args.order,
        !args.fail_fast,
        &mut TracingReporter,
    )?;

    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.errors);

    if let Some(path) = &args.report {
        write_report_json(&report, path)?;
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    match args.command {
        Command::Fetch(fetch) => run_fetch(fetch)?,
        Command::Normalize(normalize) => run_normalize(normalize)?,
    }
    Ok(())
}
