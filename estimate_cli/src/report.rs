//! Plain-text estimate report.

use std::fmt::Write;

use estimate_core::units::format_inr;
use estimate_core::ProjectResult;

const RULE: &str = "═══════════════════════════════════════════════════════";

/// Render a full report. `generated_on` is printed verbatim in the header.
pub fn render(result: &ProjectResult, generated_on: &str) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, result, generated_on);
    out
}

fn write_report(out: &mut String, result: &ProjectResult, generated_on: &str) -> std::fmt::Result {
    let config = &result.config;
    let unit = result.area_unit;
    let cost = &result.cost;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "  CONSTRUCTION ESTIMATE")?;
    writeln!(out, "  Generated on {}", generated_on)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    writeln!(out, "Project:")?;
    writeln!(out, "  Area:      {:.0} {}", config.area, unit.label())?;
    writeln!(out, "  Floors:    {} ({})", config.floors_label(), config.floors)?;
    writeln!(out, "  Location:  {}", config.location)?;
    if let Some(days) = config.duration_constraint_days {
        writeln!(out, "  Target:    {} days", days)?;
    }
    writeln!(out, "  Preset:    {}", result.preset)?;
    writeln!(out)?;

    let crew = &result.workforce;
    writeln!(out, "Workforce:")?;
    writeln!(out, "  Masons:        {}", crew.masons)?;
    writeln!(out, "  Helpers:       {}", crew.helpers)?;
    writeln!(out, "  Steel fixers:  {}", crew.steel_fixers)?;
    writeln!(out, "  Carpenters:    {}", crew.carpenters)?;
    writeln!(out, "  Supervisors:   {}", crew.supervisors)?;
    writeln!(out, "  Labour days:   {}", crew.total_labor_days)?;
    writeln!(out)?;

    writeln!(out, "Materials:")?;
    for line in &cost.material_lines {
        writeln!(
            out,
            "  {:<18} {:>12} {:<14} {:>14}",
            line.name,
            format!("{}", line.quantity),
            line.unit,
            format_inr(line.cost)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Cost:")?;
    writeln!(out, "  Labour:       {:>16}", format_inr(cost.labor_cost))?;
    for package in &cost.fixed_labor_lines {
        writeln!(
            out,
            "    incl. {} ({} workers, {} days): {}",
            package.name,
            package.workers,
            package.days,
            format_inr(package.cost)
        )?;
    }
    writeln!(out, "  Materials:    {:>16}", format_inr(cost.material_cost))?;
    writeln!(out, "  Overhead:     {:>16}", format_inr(cost.overhead_cost))?;
    writeln!(out, "  Contingency:  {:>16}", format_inr(cost.contingency))?;
    writeln!(out, "  Total:        {:>16}", format_inr(cost.total_cost))?;
    writeln!(
        out,
        "  Unit rate:    {:>16} / {}",
        format_inr(cost.cost_per_unit_area),
        unit.rate_label()
    )?;
    if cost.overtime_applied {
        writeln!(out, "  Overtime applied for the compressed schedule")?;
    }
    writeln!(out)?;

    let timeline = &result.timeline;
    writeln!(
        out,
        "Timeline: {} days ({} weeks, {:.1} months)",
        timeline.total_days, timeline.total_weeks, timeline.total_months
    )?;
    for phase in &timeline.phases {
        writeln!(
            out,
            "  Day {:>4}-{:<4} {:<32} {:>3} workers",
            phase.start_day, phase.end_day, phase.name, phase.workers
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Schedule: {} active weeks", result.schedule.len())?;
    writeln!(out)?;

    writeln!(out, "Layout:")?;
    for floor in &result.layout.floors {
        writeln!(out, "  {} ({:.1} ft square)", floor.label, floor.side)?;
        for room in &floor.rooms {
            writeln!(out, "    {:<14} {:>6.1} x {:<6.1} ft", room.name, room.width, room.height)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Insights:")?;
    for insight in &result.insights {
        writeln!(out, "  - {}: {}", insight.title, insight.recommendation)?;
    }
    writeln!(out)?;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "  TOTAL: {}", format_inr(cost.total_cost))?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimate_core::{estimate, EstimationPreset, ProjectInput};

    #[test]
    fn test_report_sections() {
        let result = estimate(&ProjectInput::new(1000.0, 3, "Urban"), EstimationPreset::standard()).unwrap();
        let report = render(&result, "17 Oct 2026, 10:00");

        assert!(report.contains("Generated on 17 Oct 2026, 10:00"));
        assert!(report.contains("Floors:    G+2 (3)"));
        assert!(report.contains("₹22,64,031"));
        assert!(report.contains("/ Sq Yard"));
        assert!(report.contains("Ground Floor"));
        assert!(report.contains("Living Room"));
        assert!(report.contains("Floor 2 – Slab Casting"));
        assert!(!report.contains("Overtime applied"));
        assert!(!report.contains("incl. "));
    }

    #[test]
    fn test_compact_report_units() {
        let input = ProjectInput::new(1800.0, 2, "Rural").with_duration_constraint(40);
        let result = estimate(&input, EstimationPreset::compact()).unwrap();
        let report = render(&result, "today");

        assert!(report.contains("1800 sq ft"));
        assert!(report.contains("/ Sq Ft"));
        assert!(report.contains("Target:    40 days"));
        assert!(report.contains("Overtime applied"));
        assert!(report.contains("incl. Plumbing/Electrical (2 workers, 45 days): ₹59,500"));
    }
}
