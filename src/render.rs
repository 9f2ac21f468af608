use analytics::PaceReport;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use core_types::{Bucket, CalculatedTargets, PeriodTargets};
use rust_decimal::Decimal;

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(h)));
    table
}

fn num(value: Decimal) -> Cell {
    Cell::new(value.normalize()).set_alignment(CellAlignment::Right)
}

fn period_row(name: &str, period: &PeriodTargets) -> Vec<Cell> {
    vec![
        Cell::new(name),
        num(period.deals),
        num(period.opportunities),
        num(period.leads),
        num(period.revenue),
    ]
}

pub fn targets_table(targets: &CalculatedTargets) -> Table {
    let mut table = new_table(&["Period", "Deals", "Opportunities", "Leads", "Revenue"]);
    table.add_row(period_row("Annual", &targets.annual));
    table.add_row(period_row("Monthly", &targets.monthly));
    table.add_row(period_row("Weekly", &targets.weekly));
    table.add_row(vec![
        Cell::new("Daily"),
        num(targets.daily.deals),
        num(targets.daily.opportunities),
        num(targets.daily.leads),
        num(targets.daily.revenue),
    ]);
    table
}

pub fn activity_table(targets: &CalculatedTargets) -> Table {
    let mut table = new_table(&["Metric", "Value"]);
    let rows = [
        ("Calls per day", targets.daily.calls),
        ("Emails per day", targets.daily.emails),
        ("Texts per day", targets.daily.texts),
        ("Pipeline coverage ratio", targets.pipeline.coverage_ratio),
        ("Required pipeline value", targets.pipeline.required_pipeline_value),
        ("Sales velocity (per day)", targets.pipeline.sales_velocity),
    ];
    for (metric, value) in rows {
        table.add_row(vec![Cell::new(metric), num(value)]);
    }
    table
}

pub fn buckets_table(buckets: &[Bucket]) -> Table {
    let mut table = new_table(&["Bucket", "From", "To", "Total"]);
    for bucket in buckets {
        table.add_row(vec![
            Cell::new(&bucket.label),
            Cell::new(bucket.start_date),
            Cell::new(bucket.end_date),
            num(bucket.total),
        ]);
    }
    table
}

pub fn pace_table(report: &PaceReport) -> Table {
    let mut table = new_table(&["Bucket", "From", "To", "Actual", "Target", "Attainment %"]);
    let pct = |value: Option<Decimal>| match value {
        Some(p) => num(p),
        None => Cell::new("-").set_alignment(CellAlignment::Right),
    };

    for row in &report.buckets {
        table.add_row(vec![
            Cell::new(&row.label),
            Cell::new(row.start_date),
            Cell::new(row.end_date),
            num(row.actual),
            num(row.target),
            pct(row.attainment_pct),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(""),
        Cell::new(""),
        num(report.total_actual),
        num(report.total_target),
        pct(report.attainment_pct),
    ]);
    table
}
