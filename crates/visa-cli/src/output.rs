//! Record sinks: spreadsheet, CSV, JSON and text renderings of visa records.
//!
//! Every tabular format uses `VisaRecord::HEADERS` as its header row and
//! leaves absent fields as empty cells.

use std::fs;
use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use visa_core::models::OutputConfig;
use visa_core::{SheetFormat, VisaRecord};

/// Pick the sheet format: explicit flag, then file extension, then config.
pub fn resolve_format(flag: Option<SheetFormat>, path: &Path, config: &OutputConfig) -> SheetFormat {
    if let Some(format) = flag {
        return format;
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "xlsx" => SheetFormat::Xlsx,
        "csv" => SheetFormat::Csv,
        "json" => SheetFormat::Json,
        _ => config.default_format,
    }
}

/// File extension for a sheet format.
pub fn extension(format: SheetFormat) -> &'static str {
    match format {
        SheetFormat::Xlsx => "xlsx",
        SheetFormat::Csv => "csv",
        SheetFormat::Json => "json",
    }
}

/// Write all rows to `path` in the given format.
pub fn write_sheet(
    path: &Path,
    format: SheetFormat,
    rows: &[VisaRecord],
    config: &OutputConfig,
) -> anyhow::Result<()> {
    match format {
        SheetFormat::Xlsx => write_xlsx(path, rows, &config.sheet_name),
        SheetFormat::Csv => {
            let file = fs::File::create(path)?;
            write_csv(file, rows)
        }
        SheetFormat::Json => {
            fs::write(path, serde_json::to_string_pretty(rows)?)?;
            Ok(())
        }
    }
}

/// Write rows as an xlsx workbook with a bold, frozen header row.
pub fn write_xlsx(path: &Path, rows: &[VisaRecord], sheet_name: &str) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let header_format = Format::new().set_bold();
    for (col, header) in VisaRecord::HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let mut widths: Vec<usize> = VisaRecord::HEADERS.iter().map(|h| h.chars().count()).collect();
    for (row_idx, record) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        for (col, cell) in record.to_row().into_iter().enumerate() {
            // Absent values stay as empty cells
            if let Some(value) = cell {
                worksheet.write_string(row, col as u16, value)?;
                widths[col] = widths[col].max(value.chars().count());
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, (*width as f64 + 2.0).min(60.0))?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Write rows as CSV with the header row first.
pub fn write_csv<W: Write>(writer: W, rows: &[VisaRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(VisaRecord::HEADERS)?;
    for record in rows {
        wtr.write_record(record.to_row().map(|cell| cell.unwrap_or("")))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render a single record as CSV text.
pub fn format_csv(record: &VisaRecord) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, std::slice::from_ref(record))?;
    Ok(String::from_utf8(buf)?)
}

/// Human-readable summary of a single record.
pub fn format_text(record: &VisaRecord) -> String {
    let mut output = String::new();

    for (header, cell) in VisaRecord::HEADERS.iter().zip(record.to_row()) {
        output.push_str(&format!("{:<18}{}\n", format!("{}:", header), cell.unwrap_or("-")));
    }

    if let Some((from, until)) = record.validity_period() {
        output.push_str(&format!("\nValid for {} days\n", (until - from).num_days() + 1));
    }

    output
}
