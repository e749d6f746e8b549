//! Birth forecast and breeding-risk detection for one group of co-located
//! animals.

use serde::{Deserialize, Serialize};

use super::gestation_months;
use crate::model::Animal;

const DUE_SOON_MONTHS: i64 = 1;
const BREEDING_RISK_AGE: f64 = 11.0;

/// A pregnant animal expected to give birth within a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthDue {
    pub animal_id: String,
    pub animal_type: String,
    pub location: String,
    /// Pregnancy completion estimate (0.2, 0.4, 0.6 or 0.8)
    pub progress: f64,
    pub months_remaining: i64,
}

/// A young female sharing a group with a breeding male.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingRisk {
    pub female_id: String,
    pub age: f64,
    pub location: String,
    pub male_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthForecast {
    pub due_soon: Vec<BirthDue>,
    pub breeding_risks: Vec<BreedingRisk>,
}

impl BirthForecast {
    pub fn is_empty(&self) -> bool {
        self.due_soon.is_empty() && self.breeding_risks.is_empty()
    }

    pub fn merge(&mut self, other: BirthForecast) {
        self.due_soon.extend(other.due_soon);
        self.breeding_risks.extend(other.breeding_risks);
    }
}

/// Map the continuous reproduction statistic (0–1) onto four progress
/// buckets.
pub fn progress_bucket(reproduction: f64) -> f64 {
    let percent = reproduction * 100.0;
    if percent > 80.0 {
        0.8
    } else if percent > 60.0 {
        0.6
    } else if percent > 40.0 {
        0.4
    } else {
        0.2
    }
}

/// Whole months left in a pregnancy.
pub fn months_remaining(animal: &Animal) -> i64 {
    let progress = progress_bucket(animal.reproduction);
    (gestation_months(&animal.animal_type) * (1.0 - progress)).round() as i64
}

fn is_breeding_male(animal: &Animal) -> bool {
    if !animal.is_male() {
        return false;
    }
    let sub = animal.sub_type.to_ascii_uppercase();
    sub.contains("BULL") || sub.contains("COW")
}

/// Births due within a month and breeding risks among `members`, which must
/// all share one location.
pub fn forecast_births(members: &[&Animal]) -> BirthForecast {
    let due_soon = members
        .iter()
        .filter(|a| a.is_pregnant)
        .filter_map(|a| {
            let remaining = months_remaining(a);
            (remaining <= DUE_SOON_MONTHS).then(|| BirthDue {
                animal_id: a.id.clone(),
                animal_type: a.animal_type.clone(),
                location: a.display_location().to_string(),
                progress: progress_bucket(a.reproduction),
                months_remaining: remaining,
            })
        })
        .collect();

    let male_ids: Vec<String> = members
        .iter()
        .filter(|a| is_breeding_male(a))
        .map(|a| a.id.clone())
        .collect();

    let breeding_risks = if male_ids.is_empty() {
        Vec::new()
    } else {
        members
            .iter()
            .filter(|a| a.is_female() && a.age < BREEDING_RISK_AGE)
            .map(|a| BreedingRisk {
                female_id: a.id.clone(),
                age: a.age,
                location: a.display_location().to_string(),
                male_ids: male_ids.clone(),
            })
            .collect()
    };

    BirthForecast {
        due_soon,
        breeding_risks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gender;

    #[test]
    fn test_progress_buckets() {
        assert_eq!(progress_bucket(0.81), 0.8);
        assert_eq!(progress_bucket(0.8), 0.6);
        assert_eq!(progress_bucket(0.61), 0.6);
        assert_eq!(progress_bucket(0.41), 0.4);
        assert_eq!(progress_bucket(0.4), 0.2);
        assert_eq!(progress_bucket(0.0), 0.2);
    }

    #[test]
    fn test_due_soon_uses_gestation_table() {
        let mut cow = Animal::new("c", "COW_ANGUS");
        cow.is_pregnant = true;
        cow.reproduction = 0.9;
        // round(9 × 0.2) = 2
        assert_eq!(months_remaining(&cow), 2);

        let mut sow = Animal::new("s", "PIG_LANDRACE");
        sow.is_pregnant = true;
        sow.reproduction = 0.9;
        // round(4 × 0.2) = 1
        let mut open = Animal::new("o", "PIG_LANDRACE");
        open.reproduction = 0.9;

        let forecast = forecast_births(&[&cow, &sow, &open]);
        assert_eq!(forecast.due_soon.len(), 1);
        assert_eq!(forecast.due_soon[0].animal_id, "s");
        assert_eq!(forecast.due_soon[0].months_remaining, 1);
    }

    #[test]
    fn test_breeding_risk_needs_breeding_male() {
        let mut heifer = Animal::new("h", "COW_ANGUS");
        heifer.gender = Gender::Female;
        heifer.age = 8.0;
        let mut ram = Animal::new("r", "SHEEP_LANDRACE");
        ram.gender = Gender::Male;

        assert!(forecast_births(&[&heifer, &ram]).breeding_risks.is_empty());

        let mut bull = Animal::new("b", "BULL_ANGUS");
        bull.gender = Gender::Male;
        let forecast = forecast_births(&[&heifer, &ram, &bull]);
        assert_eq!(forecast.breeding_risks.len(), 1);
        assert_eq!(forecast.breeding_risks[0].male_ids, vec!["b".to_string()]);
    }

    #[test]
    fn test_breeding_risk_age_cutoff() {
        let mut heifer = Animal::new("h", "COW_ANGUS");
        heifer.gender = Gender::Female;
        heifer.age = 11.0;
        let mut steer = Animal::new("s", "COW_ANGUS");
        steer.gender = Gender::Male;
        assert!(forecast_births(&[&heifer, &steer]).is_empty());
    }
}
