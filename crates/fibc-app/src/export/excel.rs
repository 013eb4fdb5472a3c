//! Excel export of unit-weight calculation sheets

use crate::app::Calculation;
use chrono::Local;
use fibc_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export calculations to an Excel file
pub fn export_to_excel(calculations: &[Calculation], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, calculations)?;

    let breakdown_sheet = workbook.add_worksheet();
    write_breakdown_sheet(breakdown_sheet, calculations)?;

    let inputs_sheet = workbook.add_worksheet();
    write_inputs_sheet(inputs_sheet, calculations)?;

    workbook.save(output_path).map_err(xlsx_err)?;
    info!(path = %output_path.display(), bags = calculations.len(), "exported calculation sheet");

    Ok(())
}

/// NaN and infinities are written as text; Excel has no cell value for them
fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<()> {
    if value.is_finite() {
        sheet.write_number(row, col, value).map_err(xlsx_err)?;
    } else {
        sheet
            .write_string(row, col, value.to_string())
            .map_err(xlsx_err)?;
    }
    Ok(())
}

fn write_header_row(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, calculations: &[Calculation]) -> Result<()> {
    sheet.set_name("Summary").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "FIBC Unit Weight Calculation", &header_format)
        .map_err(xlsx_err)?;

    sheet.write_string(2, 0, "Generated:").map_err(xlsx_err)?;
    sheet
        .write_string(2, 1, Local::now().format("%Y-%m-%d %H:%M").to_string())
        .map_err(xlsx_err)?;

    sheet.write_string(3, 0, "Bags:").map_err(xlsx_err)?;
    sheet
        .write_number(3, 1, calculations.len() as f64)
        .map_err(xlsx_err)?;

    sheet
        .write_string_with_format(5, 0, "Bag", &header_format)
        .map_err(xlsx_err)?;
    sheet
        .write_string_with_format(5, 1, "Total (g)", &header_format)
        .map_err(xlsx_err)?;
    sheet
        .write_string_with_format(5, 2, "Total (kg)", &header_format)
        .map_err(xlsx_err)?;

    for (idx, calc) in calculations.iter().enumerate() {
        let row = 6 + idx as u32;
        sheet.write_string(row, 0, &calc.name).map_err(xlsx_err)?;
        write_value(sheet, row, 1, calc.breakdown.total_grams)?;
        write_value(sheet, row, 2, calc.breakdown.total_kg)?;
    }

    sheet.set_column_width(0, 30).map_err(xlsx_err)?;
    sheet.set_column_width(1, 14).map_err(xlsx_err)?;
    sheet.set_column_width(2, 14).map_err(xlsx_err)?;

    Ok(())
}

fn write_breakdown_sheet(sheet: &mut Worksheet, calculations: &[Calculation]) -> Result<()> {
    sheet.set_name("Breakdown").map_err(xlsx_err)?;

    write_header_row(
        sheet,
        &[
            "Bag",
            "Body (g)",
            "Bottom (g)",
            "Top spout (g)",
            "Bottom spout (g)",
            "Ties (g)",
            "Straps (g)",
            "Thread (g)",
            "Total (g)",
            "Total (kg)",
            "Sewn length (cm)",
            "Strap length (cm)",
            "Seam length (cm)",
        ],
    )?;

    for (idx, calc) in calculations.iter().enumerate() {
        let row = (idx + 1) as u32;
        let b = &calc.breakdown;
        sheet.write_string(row, 0, &calc.name).map_err(xlsx_err)?;

        let values = [
            b.body_g,
            b.bottom_g,
            b.top_spout_g,
            b.bottom_spout_g,
            b.ties_g,
            b.straps_g,
            b.thread_g,
            b.total_grams,
            b.total_kg,
            b.sewn_length_cm,
            b.strap_length_cm,
            b.seam_length_cm,
        ];
        for (offset, value) in values.iter().enumerate() {
            write_value(sheet, row, 1 + offset as u16, *value)?;
        }
    }

    sheet.set_column_width(0, 30).map_err(xlsx_err)?;

    Ok(())
}

fn write_inputs_sheet(sheet: &mut Worksheet, calculations: &[Calculation]) -> Result<()> {
    sheet.set_name("Inputs").map_err(xlsx_err)?;

    write_header_row(
        sheet,
        &[
            "Bag",
            "Height (cm)",
            "Width (cm)",
            "Bottom (cm)",
            "Main fabric (g/m²)",
            "Spout fabric (g/m²)",
            "Top spout",
            "Bottom spout",
            "Tie (g/m)",
            "Tie length (cm)",
            "Loop height (cm)",
            "Sewn ratio",
            "Strap (g/m)",
            "Thread (g/cm)",
        ],
    )?;

    for (idx, calc) in calculations.iter().enumerate() {
        let row = (idx + 1) as u32;
        let spec = &calc.spec;
        sheet.write_string(row, 0, &calc.name).map_err(xlsx_err)?;
        write_value(sheet, row, 1, spec.height_cm)?;
        write_value(sheet, row, 2, spec.width_cm)?;
        write_value(sheet, row, 3, spec.bottom_size_cm)?;
        write_value(sheet, row, 4, spec.main_density_gm2)?;
        write_value(sheet, row, 5, spec.aux_density_gm2)?;

        for (col, spout) in [(6u16, spec.top_spout), (7u16, spec.bottom_spout)] {
            let text = match spout {
                Some(s) => format!("Ø{} × {}", s.diameter_cm, s.height_cm),
                None => "-".to_string(),
            };
            sheet.write_string(row, col, text).map_err(xlsx_err)?;
        }

        write_value(sheet, row, 8, spec.tie.weight_per_meter_g)?;
        write_value(sheet, row, 9, spec.tie.length_cm)?;
        write_value(sheet, row, 10, spec.strap.loop_height_cm)?;
        sheet
            .write_string(row, 11, spec.strap.sewn_ratio.label())
            .map_err(xlsx_err)?;
        write_value(sheet, row, 12, spec.strap.weight_per_meter_g)?;
        write_value(sheet, row, 13, spec.thread_weight_per_cm_g)?;
    }

    sheet.set_column_width(0, 30).map_err(xlsx_err)?;
    sheet.set_column_width(6, 14).map_err(xlsx_err)?;
    sheet.set_column_width(7, 14).map_err(xlsx_err)?;

    Ok(())
}
