// src/export/logic.rs

use crate::core::engine;
use crate::core::source::EventSource;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{PeriodRow, PresenceRow, Report, UniqueRow};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ReportKind};
use crate::models::period::Granularity;
use crate::ui::messages::warning;
use crate::utils::date::window_start;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

/// Inputs shared by every report; each report reads only the fields it needs.
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub date: NaiveDate,
    pub equipment: Vec<String>,
    pub since: NaiveDate,
    pub window_days: u32,
    pub as_of: NaiveDateTime,
    pub limit: usize,
}

/// High level export flow.
pub struct ExportLogic;

impl ExportLogic {
    /// Builds `report` from `source` and writes it to `file` (absolute path).
    ///
    /// An empty report is not written (and an existing file is not touched);
    /// a warning is printed instead.
    pub fn export(
        source: &dyn EventSource,
        report: ReportKind,
        format: ExportFormat,
        file: &str,
        params: &ReportParams,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let data = Self::build(source, report, params)?;

        if data.is_empty() {
            warning("No records found, nothing exported.");
            return Ok(());
        }

        ensure_writable(path, force)?;

        tracing::debug!(?report, format = format.as_str(), file, "writing export");

        match format {
            ExportFormat::Csv => export_csv(&data, path)?,
            ExportFormat::Json => export_json(&data, path)?,
            ExportFormat::Xlsx => export_xlsx(&data, path)?,
        }

        Ok(())
    }

    /// Runs the engine query behind a report kind.
    pub fn build(
        source: &dyn EventSource,
        report: ReportKind,
        params: &ReportParams,
    ) -> AppResult<Report> {
        let data = match report {
            ReportKind::Present => {
                let present = engine::current_presence(source, params.date, &params.equipment)?;
                Report::Presence(
                    present
                        .iter()
                        .map(|m| PresenceRow::from_member(params.date, m))
                        .collect(),
                )
            }
            ReportKind::AttendanceDay | ReportKind::AttendanceMonth => {
                let by = if report == ReportKind::AttendanceDay {
                    Granularity::Day
                } else {
                    Granularity::Month
                };
                let counts = engine::unique_checkins_by_period(source, by, params.since)?;
                Report::Periods(counts.iter().map(PeriodRow::from).collect())
            }
            ReportKind::Unique => {
                let count = engine::unique_checkins_in_trailing_window(
                    source,
                    params.window_days,
                    params.as_of,
                )?;
                Report::Unique(UniqueRow::new(
                    window_start(params.as_of.date(), params.window_days),
                    params.as_of,
                    params.window_days,
                    count,
                ))
            }
            ReportKind::Recent => Report::Events(engine::recent_events(source, params.limit)?),
            ReportKind::Devices => Report::Devices(engine::device_log(source, params.limit)?),
        };
        Ok(data)
    }
}
