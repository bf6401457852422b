//! Operator-facing summary tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ivr_map::MatchCandidate;
use ivr_model::{ManufacturerConfig, MappingResult, OutputField};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

pub fn print_mapping_summary(result: &MappingResult, fields: &[OutputField]) {
    println!(
        "Manufacturer: {} ({})",
        result.manufacturer.name, result.manufacturer.document_type
    );
    println!("Template: {}", result.manufacturer.template_id);

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Valid"),
        header_cell("Completeness"),
        header_cell("Output Fields"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    let valid_cell = if result.validation.valid {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("NO").fg(Color::Red).add_attribute(Attribute::Bold)
    };
    table.add_row(vec![
        valid_cell,
        Cell::new(format!(
            "{:.0}% ({}/{})",
            result.completeness.percentage,
            result.completeness.filled,
            result.completeness.total
        ))
        .set_alignment(CellAlignment::Right),
        Cell::new(fields.len()).set_alignment(CellAlignment::Right),
        Cell::new(result.validation.errors.len()).set_alignment(CellAlignment::Right),
        Cell::new(result.validation.warnings.len()).set_alignment(CellAlignment::Right),
    ]);
    println!("{table}");

    if !result.validation.errors.is_empty() {
        println!("Errors:");
        for issue in &result.validation.errors {
            println!("- [{}] {}", issue.code, issue.message);
        }
    }
    if !result.validation.warnings.is_empty() {
        println!("Warnings:");
        for issue in &result.validation.warnings {
            println!("- [{}] {}", issue.code, issue.message);
        }
    }
}

pub fn print_candidates(proposals: &[(String, Vec<MatchCandidate>)], top: usize) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Template Field"),
        header_cell("Canonical Path"),
        header_cell("Type"),
        header_cell("Confidence"),
        header_cell("Auto"),
    ]);
    for (field, candidates) in proposals {
        if candidates.is_empty() {
            table.add_row(vec![
                Cell::new(field),
                Cell::new("(no match)").fg(Color::DarkGrey),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ]);
            continue;
        }
        for candidate in candidates.iter().take(top) {
            let auto = if candidate.auto_acceptable() {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("review").fg(Color::Yellow)
            };
            table.add_row(vec![
                Cell::new(field),
                Cell::new(&candidate.path),
                Cell::new(candidate.match_type),
                Cell::new(format!("{:.2}", candidate.confidence))
                    .set_alignment(CellAlignment::Right),
                auto,
            ]);
        }
    }
    println!("{table}");
}

pub fn print_manufacturers(configs: &[&ManufacturerConfig]) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Manufacturer"),
        header_cell("Document"),
        header_cell("Template"),
        header_cell("Fields"),
        header_cell("Required"),
    ]);
    for config in configs {
        table.add_row(vec![
            Cell::new(config.id),
            Cell::new(&config.name),
            Cell::new(config.document_type),
            Cell::new(&config.template_id),
            Cell::new(config.targets.len()).set_alignment(CellAlignment::Right),
            Cell::new(config.required_fields.len()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}
