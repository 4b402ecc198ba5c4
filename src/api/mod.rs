//! High-level, ergonomic API for fetching and normalizing images.
//!
//! Both batch entry points keep going past per-item failures: every item is
//! handed to a [`Reporter`] and recorded in the returned report. Setup
//! failures (missing input directory, invalid profile) abort immediately.
//! With `continue_on_error = false` the first output or network failure is
//! returned instead; undecodable inputs and malformed identifiers are always
//! skipped.
use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info};

use crate::core::params::{CanvasProfile, FetchParams};
use crate::core::processing::pipeline::{Canvas, Placement, fit_to_box};
use crate::error::{Error, Result};
use crate::io::decode::decode_image;
use crate::io::enumerate::list_input_files;
use crate::io::fetch::{Transport, fetch_one};
use crate::io::source::SourceRef;
use crate::io::writers::jpeg::write_canvas_jpeg;
use crate::types::EnumerationOrder;

pub mod report;

pub use report::{
    FetchReport, ItemFailure, ItemOutcome, NormalizeReport, Reporter, Stage, TracingReporter,
    write_report_json,
};

/// Compose one decoded image onto a fresh canvas for `profile`.
pub fn normalize_image(image: &DynamicImage, profile: &CanvasProfile) -> Result<Canvas> {
    profile.validate()?;
    fit_to_box(image, profile)
}

/// Decode `input`, normalize it and write the JPEG to `output`.
pub fn normalize_file(input: &Path, output: &Path, profile: &CanvasProfile) -> Result<Placement> {
    let image = decode_image(input)?;
    let canvas = normalize_image(&image, profile)?;
    write_canvas_jpeg(output, &canvas, profile.jpeg_quality)?;
    Ok(canvas.placement)
}

/// Normalize every file of `input_dir` into `output_dir` as `1.jpg`, `2.jpg`, ...
///
/// Numbers follow `order` and are only consumed by images that were written,
/// so the output sequence has no gaps. Existing files with the same numbers
/// are overwritten.
pub fn normalize_directory(
    input_dir: &Path,
    output_dir: &Path,
    profile: &CanvasProfile,
    order: EnumerationOrder,
    continue_on_error: bool,
    reporter: &mut dyn Reporter,
) -> Result<NormalizeReport> {
    profile.validate()?;
    let files = list_input_files(input_dir, order)?;
    std::fs::create_dir_all(output_dir)?;

    info!(
        "Normalizing {} entries from {:?} into {:?} ({}x{})",
        files.len(),
        input_dir,
        output_dir,
        profile.width,
        profile.height
    );

    let mut report = NormalizeReport::start();
    let mut last_number = 0usize;

    for path in files {
        let input = path.display().to_string();

        let image = match decode_image(&path) {
            Ok(image) => image,
            Err(e) => {
                let failure = ItemFailure::from_error(Stage::Normalize, input, &e);
                reporter.item_failed(&failure);
                report.failures.push(failure);
                report.skipped += 1;
                continue;
            }
        };

        let number = last_number + 1;
        let output = output_dir.join(format!("{}.jpg", number));
        debug!("Processing: {:?} -> {:?}", path, output);

        let written = fit_to_box(&image, profile)
            .and_then(|canvas| {
                write_canvas_jpeg(&output, &canvas, profile.jpeg_quality)?;
                Ok(canvas.placement)
            });
        drop(image);

        match written {
            Ok(placement) => {
                last_number = number;
                let outcome = ItemOutcome {
                    stage: Stage::Normalize,
                    input,
                    output,
                    number: Some(number),
                    placement: Some(placement),
                };
                reporter.item_succeeded(&outcome);
                report.outputs.push(outcome);
                report.processed += 1;
            }
            Err(e) => {
                let failure = ItemFailure::from_error(Stage::Normalize, input, &e);
                reporter.item_failed(&failure);
                report.failures.push(failure);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    report.finished_at = chrono::Utc::now();
    info!(
        "Normalize complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

/// Download every identifier into `params.working_dir` as `<derived name>.<ext>`.
pub fn fetch_to_directory(
    identifiers: &[String],
    transport: &dyn Transport,
    params: &FetchParams,
    continue_on_error: bool,
    reporter: &mut dyn Reporter,
) -> Result<FetchReport> {
    std::fs::create_dir_all(&params.working_dir)?;
    info!(
        "Fetching {} sources into {:?}",
        identifiers.len(),
        params.working_dir
    );

    let mut report = FetchReport::start();

    for identifier in identifiers {
        let result = SourceRef::parse(identifier, params.delimiter)
            .and_then(|source| fetch_one(transport, &source, params));

        match result {
            Ok(output) => {
                let outcome = ItemOutcome {
                    stage: Stage::Fetch,
                    input: identifier.clone(),
                    output,
                    number: None,
                    placement: None,
                };
                reporter.item_succeeded(&outcome);
                report.files.push(outcome);
                report.downloaded += 1;
            }
            Err(e) => {
                let failure = ItemFailure::from_error(Stage::Fetch, identifier.as_str(), &e);
                reporter.item_failed(&failure);
                report.failures.push(failure);
                if matches!(e, Error::MalformedIdentifier { .. }) {
                    report.malformed += 1;
                    continue;
                }
                report.failed += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    report.finished_at = chrono::Utc::now();
    info!(
        "Fetch complete: downloaded={} failed={} malformed={}",
        report.downloaded, report.failed, report.malformed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::fetch::testing::FakeTransport;

    #[derive(Default)]
    struct Recording {
        ok: Vec<ItemOutcome>,
        failed: Vec<ItemFailure>,
    }

    impl Reporter for Recording {
        fn item_succeeded(&mut self, outcome: &ItemOutcome) {
            self.ok.push(outcome.clone());
        }

        fn item_failed(&mut self, failure: &ItemFailure) {
            self.failed.push(failure.clone());
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fetch_continues_past_malformed_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let params = FetchParams {
            working_dir: dir.path().join("raw"),
            ..Default::default()
        };
        let transport = FakeTransport::default()
            .with("http://a/o%1/datastream/OBJ/view", 200, b"one")
            .with("http://a/o%3/datastream/OBJ/view", 200, b"three");
        let mut rec = Recording::default();

        let report = fetch_to_directory(
            &ids(&["http://a/o%1", "http://a/no-delimiter", "http://a/o%2", "http://a/o%3"]),
            &transport,
            &params,
            true,
            &mut rec,
        )
        .unwrap();

        assert_eq!(
            (report.downloaded, report.failed, report.malformed),
            (2, 1, 1)
        );
        assert_eq!(rec.ok.len(), 2);
        assert_eq!(rec.failed[0].kind, "malformed_identifier");
        assert_eq!(rec.failed[1].kind, "network");
        assert_eq!(
            std::fs::read(dir.path().join("raw/3.jpg")).unwrap(),
            b"three"
        );
        // The malformed identifier never reached the transport
        assert_eq!(transport.requested.lock().unwrap().len(), 3);
    }

    #[test]
    fn fetch_fail_fast_stops_on_network_error_only() {
        let dir = tempfile::tempdir().unwrap();
        let params = FetchParams {
            working_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let transport = FakeTransport::default();
        let mut rec = Recording::default();

        let err = fetch_to_directory(
            &ids(&["bad", "http://a/o%1", "http://a/o%2"]),
            &transport,
            &params,
            false,
            &mut rec,
        )
        .unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
        assert_eq!(rec.failed.len(), 2);
        assert_eq!(transport.requested.lock().unwrap().len(), 1);
    }

    #[test]
    fn normalize_file_writes_full_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        image::RgbImage::from_pixel(1600, 1200, image::Rgb([200, 200, 200]))
            .save(&input)
            .unwrap();
        let output = dir.path().join("out.jpg");

        let placement = normalize_file(&input, &output, &CanvasProfile::default()).unwrap();
        assert_eq!((placement.x, placement.y), (0, 290));
        assert_eq!((placement.width, placement.height), (825, 619));

        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (825, 1200));
    }

    #[test]
    fn normalize_rejects_invalid_profile_before_work() {
        let dir = tempfile::tempdir().unwrap();
        let profile = CanvasProfile {
            width: 0,
            ..Default::default()
        };
        let err = normalize_directory(
            dir.path(),
            &dir.path().join("out"),
            &profile,
            EnumerationOrder::Name,
            true,
            &mut TracingReporter,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "width", .. }));
        assert!(!dir.path().join("out").exists());
    }
}
