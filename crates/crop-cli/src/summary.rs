use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crop_cli::pipeline::{ConsolidationResult, StageCount};
use crop_model::{ModelInfo, PredictionOutput, RecommendationOutput};
use crop_validate::{ConsolidationReport, FusionSummary};

pub fn print_consolidation(result: &ConsolidationResult) {
    println!("Output: {}", result.output.display());
    println!("Summary: {}", result.summary_path.display());
    print_stage_table(&result.stages);
    print_overview(&result.summary);
    print_report(&result.report);
}

pub fn print_validation(report: &ConsolidationReport, summary: &FusionSummary) {
    print_overview(summary);
    print_report(report);
}

fn print_stage_table(stages: &[StageCount]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for stage in stages {
        table.add_row(vec![Cell::new(&stage.stage), count_cell(stage.rows)]);
    }
    println!("{table}");
}

fn print_overview(summary: &FusionSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows"), Cell::new(summary.total_rows)]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(summary.total_columns)]);
    if let Some((first, last)) = summary.year_range {
        table.add_row(vec![Cell::new("Years"), Cell::new(format!("{first}-{last}"))]);
    }
    if let Some(countries) = summary.unique_countries {
        table.add_row(vec![Cell::new("Countries"), Cell::new(countries)]);
    }
    if let Some(crops) = summary.unique_crops {
        table.add_row(vec![Cell::new("Crops"), Cell::new(crops)]);
    }
    for stat in summary.missing.iter().filter(|stat| stat.count > 0) {
        table.add_row(vec![
            Cell::new(format!("Missing {}", stat.column)),
            Cell::new(format!("{} ({:.2}%)", stat.count, stat.percentage)).fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

fn print_report(report: &ConsolidationReport) {
    if report.is_valid() {
        println!("No consolidation issues found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for issue in &report.issues {
        let count = match issue.count {
            Some(value) => Cell::new(value)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(issue.kind.as_str()).fg(Color::Red),
            count,
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn print_prediction(output: &PredictionOutput) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Crop"),
        header_cell("Predicted yield"),
        header_cell("Unit"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(&output.crop).add_attribute(Attribute::Bold),
        yield_cell(output.predicted_yield),
        Cell::new(&output.yield_unit),
    ]);
    println!("Model: {}", output.model_version);
    println!("{table}");
}

pub fn print_recommendation(output: &RecommendationOutput) {
    let context = &output.context;
    println!("Model: {}", output.model_version);
    println!(
        "Conditions: {} | rainfall {} mm | pesticides {} t | temp {} C",
        context.country, context.rainfall_mm, context.pesticides_tonnes, context.avg_temp
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rank"),
        header_cell("Crop"),
        header_cell("Predicted yield"),
        header_cell("Unit"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for rec in &output.recommendations {
        let crop = if rec.rank == 1 {
            Cell::new(&rec.crop)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&rec.crop)
        };
        table.add_row(vec![
            Cell::new(rec.rank),
            crop,
            yield_cell(rec.predicted_yield),
            Cell::new(&rec.yield_unit),
        ]);
    }
    println!("{table}");
}

pub fn print_model_info(info: &ModelInfo) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Model version"), Cell::new(&info.model_version)]);
    table.add_row(vec![
        Cell::new("Supported crops"),
        Cell::new(info.supported_crops.join("\n")),
    ]);
    let countries = if info.supported_countries.is_empty() {
        dim_cell("any")
    } else {
        Cell::new(info.supported_countries.join(", "))
    };
    table.add_row(vec![Cell::new("Supported countries"), countries]);
    table.add_row(vec![Cell::new("Features"), Cell::new(info.features.join(", "))]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

/// Zero rows after a stage usually means a join or filter went wrong.
fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

fn yield_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}"))
}
