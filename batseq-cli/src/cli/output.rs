/// Standard output utilities for consistent command formatting
use batseq_core::{ColumnKind, ResultTable, OUTPUT_COLUMNS};
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color as TableColor, ContentArrangement, Table};

/// Display a section header
pub fn section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Display an info message
pub fn info(message: &str) {
    println!("{} {}", "●".blue(), message);
}

/// Display a warning message
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Display an empty/none indicator
pub fn empty(message: &str) {
    println!("{} {}", "◌".dimmed(), message);
}

/// Tree structure item
pub fn tree_item(is_last: bool, label: &str, value: Option<&str>) {
    let prefix = if is_last { "└─" } else { "├─" };
    if let Some(val) = value {
        println!("{} {}: {}", prefix.dimmed(), label, val);
    } else {
        println!("{} {}", prefix.dimmed(), label);
    }
}

/// Create a standard table with our preferred styling
pub fn create_standard_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Create a standard header cell
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .fg(TableColor::Cyan)
}

/// Hit table with one column per report field; numbers right-aligned
pub fn hits_table(results: &ResultTable) -> Table {
    let mut table = create_standard_table();
    table.set_header(results.columns.iter().map(|c| header_cell(c)));

    for hit in &results.rows {
        table.add_row(OUTPUT_COLUMNS.iter().map(|&column| {
            let cell = Cell::new(hit.display_value(column));
            match column.kind() {
                ColumnKind::Numeric => cell.set_alignment(CellAlignment::Right),
                ColumnKind::Text => cell,
            }
        }));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use batseq_core::{AlignmentHit, OutputColumn};

    #[test]
    fn test_hits_table_renders_every_row() {
        let mut first = AlignmentHit::default();
        first.set(OutputColumn::SubjectTitle, "SpeciesX");
        first.set(OutputColumn::BitScore, "250");
        let mut second = AlignmentHit::default();
        second.set(OutputColumn::SubjectTitle, "SpeciesY");

        let rendered = hits_table(&ResultTable::new(vec![first, second])).to_string();
        assert!(rendered.contains("stitle"));
        assert!(rendered.contains("bitscore"));
        assert!(rendered.contains("SpeciesX"));
        assert!(rendered.contains("SpeciesY"));
        assert!(rendered.contains("250"));
    }
}
