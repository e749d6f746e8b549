//! Value command
//!
//! Usage: herdview value --snapshot <FILE> [--animal <ID>] [--format json|markdown]

use clap::Args;
use herdview_core::errors::{ExError, ExErrorKind};
use herdview_core::valuation::{value, value_group, Valuation};
use herdview_store::HerdviewConfig;
use serde::Serialize;
use std::path::PathBuf;

use super::{load_snapshot, print_json, OutputFormat};

#[derive(Debug, Args)]
pub struct ValueArgs {
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Value one animal and show the breakdown
    #[arg(long)]
    pub animal: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnimalValue<'a> {
    id: &'a str,
    name: &'a str,
    sub_type: &'a str,
    #[serde(flatten)]
    valuation: Valuation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PastureValue<'a> {
    id: &'a str,
    name: &'a str,
    animal_count: usize,
    total_value: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HerdValue<'a> {
    pastures: Vec<PastureValue<'a>>,
    animal_count: usize,
    total_value: i64,
}

pub fn execute(args: ValueArgs, config: &HerdviewConfig) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let tables = config.valuation_tables();

    if let Some(id) = args.animal.as_deref() {
        let animal = snapshot
            .animal(id)
            .ok_or_else(|| {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("value")
                    .with_entity_id(id)
                    .with_message("animal not found in snapshot")
            })?;
        let output = AnimalValue {
            id: &animal.id,
            name: &animal.name,
            sub_type: &animal.sub_type,
            valuation: value(animal, &tables),
        };
        match args.format {
            OutputFormat::Json => print_json(&output)?,
            OutputFormat::Markdown => {
                let b = &output.valuation.breakdown;
                println!("## {} ({})\n", output.id, output.sub_type);
                println!("**Value**: {}\n", output.valuation.value);
                println!("| Factor | Value |");
                println!("|---|---|");
                println!("| Base value | {:.0} |", b.base_value);
                println!("| Age factor | {:.2} |", b.age_factor);
                println!("| Weight factor | {:.2} |", b.weight_factor);
                println!("| Health factor | {:.2} |", b.health_factor);
                println!("| Meat factor | {:.2} |", b.meat_factor);
                println!("| Pregnancy premium | {:.0} |", b.pregnancy_premium);
                println!("| Lactation premium | {:.0} |", b.lactation_premium);
                println!("| Floor | {:.0} |", b.floor);
            }
        }
        return Ok(());
    }

    let output = HerdValue {
        pastures: snapshot
            .pastures
            .iter()
            .map(|p| PastureValue {
                id: &p.id,
                name: &p.name,
                animal_count: p.animal_count,
                total_value: value_group(snapshot.members_of(p), &tables),
            })
            .collect(),
        animal_count: snapshot.animals.len(),
        total_value: value_group(&snapshot.animals, &tables),
    };
    match args.format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Markdown => {
            println!("| Pasture | Animals | Value |");
            println!("|---|---|---|");
            for p in &output.pastures {
                println!("| {} | {} | {} |", p.name, p.animal_count, p.total_value);
            }
            println!(
                "| **Total** | {} | {} |",
                output.animal_count, output.total_value
            );
        }
    }
    Ok(())
}
