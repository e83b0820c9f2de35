//! Ingestion coordinator: all categories -> dataset + report.
//!
//! Categories are processed strictly in declaration order and rows in source
//! order, since duplicate attribution ("first seen in ...") and row numbering
//! depend on it. Per-row problems become report entries; only duplicate ids
//! abort the run, and they do so before anything is written.
//!
//! # Example
//!
//! ```rust,no_run
//! use graphdata::{convert, ConvertOptions};
//!
//! let result = convert(&ConvertOptions::default())?;
//! println!("{} nodes", result.dataset.nodes.len());
//! # Ok::<(), graphdata::PipelineError>(())
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::logs::{
    log_error, log_info, log_source_info, log_source_warning, log_success, LogEntry,
    LOG_BROADCASTER,
};
use crate::config::ConvertOptions;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{Dataset, MissingFields, Record, Report, SkippedRow, SourceCounts};
use crate::parser::{read_category, Row};

use super::mapper::map_row;
use super::registry::IdRegistry;
use super::schema::{validate_categories, CategorySchema};

/// Data rows start on line 2 (line 1 is the header).
const HEADER_OFFSET: usize = 2;

/// Output of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub dataset: Dataset,
    pub report: Report,
}

/// Run every category and validate, without writing anything.
pub fn ingest(options: &ConvertOptions) -> PipelineResult<ConversionResult> {
    validate_categories(&options.categories)?;
    log_info("📖 Converting CSV sources (nodes only)...");

    let mut registry = IdRegistry::new();
    let mut report = Report::default();
    let mut nodes = Vec::new();

    for schema in &options.categories {
        let rows = read_category(&options.source_path(schema))?;
        nodes.extend(ingest_category(schema, &rows, &mut registry, &mut report));
    }
    LOG_BROADCASTER.log(LogEntry::info(format!("{} distinct ids", registry.len())).with_indent(1));

    if !report.duplicate_ids.is_empty() {
        log_error(format!(
            "Duplicate node IDs found: {}",
            report.duplicate_ids.join(", ")
        ));
        return Err(PipelineError::DuplicateIds {
            ids: report.duplicate_ids.clone(),
            report: Box::new(report),
        });
    }

    Ok(ConversionResult {
        dataset: Dataset::from_nodes(nodes),
        report,
    })
}

/// Full run: ingest, then write the dataset and the report.
pub fn convert(options: &ConvertOptions) -> PipelineResult<ConversionResult> {
    let result = ingest(options)?;
    write_artifacts(&result, &options.output_path, &options.report_path)?;

    log_success(format!("Output: {}", options.output_path.display()));
    log_success(format!("Report: {}", options.report_path.display()));
    Ok(result)
}

/// Process the rows of one category.
///
/// Accepted records are returned in row order. Counts and skips are added to
/// `report`; accepted ids are claimed in `registry`.
pub fn ingest_category(
    schema: &CategorySchema,
    rows: &[Row],
    registry: &mut IdRegistry,
    report: &mut Report,
) -> Vec<Record> {
    let source = schema.source.as_str();
    let mut counts = SourceCounts {
        total: rows.len(),
        ..SourceCounts::default()
    };
    let mut accepted = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let row_number = idx + HEADER_OFFSET;
        let candidate = map_row(row, schema);

        let record = match candidate.into_record(schema.required_keys()) {
            Ok(record) => record,
            Err(missing) => {
                counts.skipped += 1;
                report.skipped_rows.push(SkippedRow {
                    source: source.to_string(),
                    row_number,
                    reason: format!("missing: {}", missing.join(", ")),
                });
                report.missing_required_fields.push(MissingFields {
                    source: source.to_string(),
                    row_number,
                    missing_fields: missing,
                });
                continue;
            }
        };

        if let Err(first) = registry.claim(&record.id, source, row_number) {
            report.note_duplicate(&record.id);
            counts.skipped += 1;
            report.skipped_rows.push(SkippedRow {
                source: source.to_string(),
                row_number,
                reason: format!(
                    "duplicate id \"{}\" (first seen in {} row {})",
                    record.id, first.source, first.row_number
                ),
            });
            log_source_warning(
                source,
                format!("row {}: duplicate id \"{}\"", row_number, record.id),
            );
            continue;
        }

        counts.parsed += 1;
        accepted.push(record);
    }

    log_source_info(
        source,
        format!("{} nodes ({} skipped)", counts.parsed, counts.skipped),
    );
    report.counts.insert(source.to_string(), counts);
    accepted
}

/// Serialize both artifacts, stage both next to their destinations, then
/// move them into place. A failure before the first rename leaves the
/// previous dataset and report untouched.
pub fn write_artifacts(
    result: &ConversionResult,
    output_path: &Path,
    report_path: &Path,
) -> PipelineResult<()> {
    let dataset = to_pretty_json(&result.dataset)?;
    let report = to_pretty_json(&result.report)?;

    let staged_dataset = stage(output_path, &dataset)?;
    let staged_report = match stage(report_path, &report) {
        Ok(tmp) => tmp,
        Err(e) => {
            let _ = fs::remove_file(&staged_dataset);
            return Err(e.into());
        }
    };

    if let Err(e) = commit(&staged_dataset, output_path) {
        let _ = fs::remove_file(&staged_report);
        return Err(e.into());
    }
    commit(&staged_report, report_path)?;
    Ok(())
}

fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Write `content` to `path` through a sibling temp file, creating parent
/// directories. The previous file is replaced wholesale.
pub(crate) fn write_file_replacing(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp = stage(path, content)?;
    commit(&tmp, path)
}

/// Write `content` to the temp sibling of `path`; returns the temp path.
fn stage(path: &Path, content: &str) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, content) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(tmp)
}

fn commit(tmp: &Path, path: &Path) -> std::io::Result<()> {
    if let Err(e) = fs::rename(tmp, path) {
        let _ = fs::remove_file(tmp);
        return Err(e);
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
