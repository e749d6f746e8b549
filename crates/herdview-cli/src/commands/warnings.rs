//! Warnings command
//!
//! Usage: herdview warnings --snapshot <FILE> [--format json|markdown]

use clap::Args;
use herdview_core::model::{Severity, Warning};
use herdview_core::warnings::BirthForecast;
use herdview_store::HerdviewConfig;
use serde::Serialize;
use std::path::PathBuf;

use super::{load_snapshot, print_json, OutputFormat};

#[derive(Debug, Args)]
pub struct WarningsArgs {
    #[arg(long)]
    pub snapshot: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PastureWarnings<'a> {
    id: &'a str,
    name: &'a str,
    animal_count: usize,
    capacity: u32,
    warnings: &'a [Warning],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WarningsOutput<'a> {
    pastures: Vec<PastureWarnings<'a>>,
    forecast: BirthForecast,
}

pub fn execute(args: WarningsArgs, config: &HerdviewConfig) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let forecast = config.engine().forecast(&snapshot);

    let output = WarningsOutput {
        pastures: snapshot
            .pastures
            .iter()
            .map(|p| PastureWarnings {
                id: &p.id,
                name: &p.name,
                animal_count: p.animal_count,
                capacity: p.capacity,
                warnings: &p.all_warnings,
            })
            .collect(),
        forecast,
    };

    match args.format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Markdown => print!("{}", render_markdown(&output)),
    }
    Ok(())
}

fn render_markdown(output: &WarningsOutput<'_>) -> String {
    let mut out = String::from("## Pasture Warnings\n\n");
    for pasture in &output.pastures {
        out.push_str(&format!(
            "### {} ({}/{})\n\n",
            pasture.name, pasture.animal_count, pasture.capacity
        ));
        if pasture.warnings.is_empty() {
            out.push_str("- none\n");
        }
        for w in pasture.warnings {
            let label = match w.severity {
                Severity::Danger => "danger",
                Severity::Warning => "warning",
                Severity::Info => "info",
            };
            out.push_str(&format!("- **{}** {}\n", label, w.message));
        }
        out.push('\n');
    }

    out.push_str("## Birth Forecast\n\n");
    if output.forecast.is_empty() {
        out.push_str("_Nothing due._\n");
    }
    for due in &output.forecast.due_soon {
        out.push_str(&format!(
            "- {} ({}) in {}: {} month(s) remaining\n",
            due.animal_id, due.animal_type, due.location, due.months_remaining
        ));
    }
    for risk in &output.forecast.breeding_risks {
        out.push_str(&format!(
            "- Breeding risk: {} ({} months) with {}\n",
            risk.female_id,
            risk.age,
            risk.male_ids.join(", ")
        ));
    }
    out
}
