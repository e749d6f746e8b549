//! Human-readable summary renderer for change reports.

use crate::diff::{AnimalUpdate, CountChange, FieldChange, WarningChange};
use crate::model::Severity;
use crate::report::{ChangeReport, ReportClassification};

/// Render a Markdown summary of a [`ChangeReport`].
///
/// Informational only; the structured report is authoritative.
pub fn render_human_summary(report: &ChangeReport) -> String {
    let mut out = String::new();

    out.push_str("## Herd Changes\n\n");

    let class_label = match report.classification {
        ReportClassification::NoChanges => "No Changes",
        ReportClassification::Changed => "Changed",
    };
    out.push_str(&format!("**Classification**: {class_label}\n\n"));

    out.push_str("### Game Time\n\n");
    let gt = &report.game_time;
    if gt.changed {
        out.push_str(&format!(
            "- Day {} {} → Day {} {}\n\n",
            gt.old.current_day,
            clock(gt.old.day_time),
            gt.new.current_day,
            clock(gt.new.day_time)
        ));
    } else {
        out.push_str(&format!(
            "- Day {} {} (unchanged)\n\n",
            gt.new.current_day,
            clock(gt.new.day_time)
        ));
    }

    if report.classification == ReportClassification::NoChanges {
        out.push_str("_No changes detected._\n");
        return out;
    }

    let lc = &report.livestock;
    if !lc.is_empty() {
        out.push_str("### Livestock\n\n");
        if !lc.added.is_empty() {
            let ids: Vec<&str> = lc.added.iter().map(|a| a.id.as_str()).collect();
            out.push_str(&format!(
                "- **Added** ({}): {}\n",
                lc.added.len(),
                ids.join(", ")
            ));
        }
        if !lc.removed.is_empty() {
            let ids: Vec<&str> = lc.removed.iter().map(|a| a.id.as_str()).collect();
            out.push_str(&format!(
                "- **Removed** ({}): {}\n",
                lc.removed.len(),
                ids.join(", ")
            ));
        }
        for update in &lc.updated {
            out.push_str(&format!("- **Updated** `{}`: {}\n", update.id, describe(update)));
        }
        out.push('\n');
    }

    let wc = &report.warnings;
    if !wc.is_empty() {
        out.push_str("### Warnings\n\n");
        for change in &wc.new {
            out.push_str(&format!("- **New** {}\n", warning_line(change)));
        }
        for change in &wc.resolved {
            out.push_str(&format!("- **Resolved** {}\n", warning_line(change)));
        }
        out.push_str(&format!("- Active warnings: {}\n\n", wc.total));
    }

    let st = &report.statistics;
    if st.changed() {
        out.push_str("### Statistics\n\n");
        out.push_str("| | Before | After |\n|---|---|---|\n");
        for (label, count) in [
            ("Animals", &st.animals),
            ("Pastures", &st.pastures),
            ("Farms", &st.farms),
        ] {
            out.push_str(&count_row(label, count));
        }
        out.push('\n');
    }

    out
}

fn clock(day_time: f64) -> String {
    let minutes = day_time.max(0.0).floor() as i64;
    format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
}

fn flag(label: &str, change: &FieldChange<bool>) -> String {
    if change.new {
        format!("now {label}")
    } else {
        format!("no longer {label}")
    }
}

fn describe(update: &AnimalUpdate) -> String {
    let c = &update.changes;
    let mut parts = Vec::with_capacity(c.len());
    if let Some(h) = &c.health {
        parts.push(format!("health {} → {}", h.old, h.new));
    }
    if let Some(a) = &c.age {
        parts.push(format!("age {} → {} months", a.old, a.new));
    }
    if let Some(p) = &c.is_pregnant {
        parts.push(flag("pregnant", p));
    }
    if let Some(l) = &c.is_lactating {
        parts.push(flag("lactating", l));
    }
    if let Some(loc) = &c.location {
        parts.push(format!("moved {} → {}", loc.old, loc.new));
    }
    parts.join("; ")
}

fn warning_line(change: &WarningChange) -> String {
    let severity = match change.warning.severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Danger => "danger",
    };
    format!(
        "[{severity}] {} ({}): {}",
        change.pasture_name,
        change.warning.warning_type.tag(),
        change.warning.message
    )
}

fn count_row(label: &str, count: &CountChange) -> String {
    let marker = if count.changed { " *" } else { "" };
    format!("| {label}{marker} | {} | {} |\n", count.old, count.new)
}
