use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::Value;

use crate::runner::{FieldReport, RunReport, ScenarioForm};

pub fn print_summary(report: &RunReport) {
    println!("Scenario: {}", report.name);
    println!("Events replayed: {}", report.events);
    println!("{}", summary_table(report));
    if report.valid {
        println!("Form is valid");
    } else {
        eprintln!("Form is invalid");
    }
}

/// One row per field: path, value, interaction flags and errors.
pub fn summary_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Path"),
        header_cell("Value"),
        header_cell("Focused"),
        header_cell("Blurred"),
        header_cell("Dirty"),
        header_cell("Validated"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..=6 {
        align_column(&mut table, index, CellAlignment::Center);
    }
    for field in &report.fields {
        table.add_row(field_row(field));
    }
    table
}

fn field_row(field: &FieldReport) -> Vec<Cell> {
    vec![
        Cell::new(&field.name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(&field.path),
        value_cell(field.value.as_ref()),
        flag_cell(field.record.has_focused),
        flag_cell(field.record.has_blurred),
        flag_cell(field.record.is_dirty),
        flag_cell(field.record.has_validated),
        errors_cell(&field.record.errors),
    ]
}

/// Registered fields and their resolved modes, for `check`.
pub fn fields_table(built: &ScenarioForm) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Id"),
        header_cell("Path"),
        header_cell("Mode"),
        header_cell("Revalidate"),
    ]);
    apply_table_style(&mut table);
    for field in &built.fields {
        table.add_row(vec![
            Cell::new(&field.name),
            dim_cell(field.handle.id()),
            Cell::new(field.handle.path()),
            Cell::new(field.policy.mode),
            Cell::new(field.policy.revalidate_mode),
        ]);
    }
    table
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: Option<&Value>) -> Cell {
    match value {
        None => dim_cell("undefined"),
        Some(Value::String(s)) => Cell::new(format!("{s:?}")),
        Some(other) => Cell::new(other),
    }
}

fn flag_cell(set: bool) -> Cell {
    if set {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn errors_cell(errors: &[String]) -> Cell {
    if errors.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(errors.join("\n")).fg(Color::Red)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
