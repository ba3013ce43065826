// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::{Report, notify_export_success};
use crate::ui::messages::info;
use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX with a styled header, banded rows and fitted column widths.
pub(crate) fn export_xlsx(report: &Report, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = report.headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(xlsx_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, values) in report.rows().iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate() {
            write_cell(worksheet, row, col as u16, value, band_color)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(xlsx_error)?;
    }

    workbook.save(path).map_err(xlsx_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Writes a cell as an Excel date, a number or text, whichever parses first.
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = excel_serial(s) {
        ws.write_with_format(row, col, serial, &base.set_num_format(num_format))
            .map_err(xlsx_error)?;
        return Ok(());
    }

    if let Ok(num) = s.parse::<f64>() {
        ws.write_with_format(row, col, num, &base.set_align(FormatAlign::Right))
            .map_err(xlsx_error)?;
        return Ok(());
    }

    ws.write_with_format(row, col, s, &base).map_err(xlsx_error)?;
    Ok(())
}

/// Excel serial day number for `YYYY-MM-DD[ HH:MM:SS]`, with its display format.
fn excel_serial(s: &str) -> Option<(&'static str, f64)> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        let secs = (dt - epoch).num_seconds() as f64;
        return Some(("yyyy-mm-dd hh:mm:ss", secs / 86400.0));
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let secs = (d.and_hms_opt(0, 0, 0)? - epoch).num_seconds() as f64;
        return Some(("yyyy-mm-dd", secs / 86400.0));
    }

    None
}

fn xlsx_error(e: rust_xlsxwriter::XlsxError) -> AppError {
    AppError::Export(e.to_string())
}
