use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sweeper_model::{FileReport, FileStage};

use crate::types::BatchResult;

pub fn print_summary(result: &BatchResult) {
    if result.dry_run {
        println!("Output: (dry run, nothing written)");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Stage"),
        header_cell("Rows In"),
        header_cell("Rows Out"),
        header_cell("Output"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    let mut total_in = 0usize;
    let mut total_out = 0usize;
    let mut failed = 0usize;
    for report in &result.files {
        total_in += report.rows_in.unwrap_or(0);
        total_out += report.rows_out.unwrap_or(0);
        if !report.is_success() {
            failed += 1;
        }
        table.add_row(vec![
            Cell::new(&report.file_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            stage_cell(report.stage),
            count_cell(report.rows_in),
            count_cell(report.rows_out),
            output_cell(report),
            status_cell(report),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_in).add_attribute(Attribute::Bold),
        Cell::new(total_out).add_attribute(Attribute::Bold),
        dim_cell("-"),
        failed_cell(failed),
    ]);
    println!("{table}");
    let errors: Vec<&FileReport> = result.files.iter().filter(|r| !r.is_success()).collect();
    if !errors.is_empty() {
        eprintln!("Errors:");
        for report in errors {
            if let Some(error) = &report.error {
                eprintln!("- {}: {error}", report.file_name);
            }
        }
    }
}

/// Prints the rows of `data` under a title, one column per table column.
pub fn print_preview(title: &str, data: &sweeper_common::Table) {
    let mut table = Table::new();
    table.set_header(
        data.column_names()
            .iter()
            .map(|name| header_cell(name))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for (index, kind) in data.kinds().iter().enumerate() {
        if kind.is_numeric() {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for row in 0..data.height() {
        table.add_row(
            data.row(row)
                .into_iter()
                .map(|value| {
                    if value.is_null() {
                        dim_cell("null")
                    } else {
                        Cell::new(value)
                    }
                })
                .collect::<Vec<_>>(),
        );
    }
    println!("{title}");
    println!("{table}");
}

/// Prints name, kind and missing count for every column.
pub fn print_columns(data: &sweeper_common::Table) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (name, kind) in data.column_names().iter().zip(data.kinds()) {
        let missing = data.missing_count(name).ok();
        table.add_row(vec![
            Cell::new(name),
            Cell::new(kind.as_str()),
            count_cell(missing),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn stage_cell(stage: FileStage) -> Cell {
    match stage {
        FileStage::Downloaded | FileStage::Converted => Cell::new(stage).fg(Color::Green),
        _ => Cell::new(stage).fg(Color::Yellow),
    }
}

fn output_cell(report: &FileReport) -> Cell {
    match &report.output_name {
        Some(name) => Cell::new(name),
        None => dim_cell("-"),
    }
}

fn status_cell(report: &FileReport) -> Cell {
    if report.is_success() {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn failed_cell(failed: usize) -> Cell {
    if failed > 0 {
        Cell::new(format!("{failed} failed"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("ok")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
