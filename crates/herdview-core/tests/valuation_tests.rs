// Valuation engine: floor property and table-driven pricing

use herdview_core::model::{Animal, Gender, Genetics};
use herdview_core::valuation::{value, value_group, ValuationOverrides, ValuationTables};
use proptest::prelude::*;

const SUB_TYPES: &[&str] = &[
    "COW_HOLSTEIN",
    "COW_ANGUS",
    "BULL_ANGUS",
    "PIG_LANDRACE",
    "SHEEP_LANDRACE",
    "GOAT",
    "HORSE_GRAY",
    "CHICKEN",
    "LLAMA_UNKNOWN",
];

fn any_animal() -> impl Strategy<Value = Animal> {
    (
        prop::sample::select(SUB_TYPES),
        0.0f64..400.0,
        -10.0f64..120.0,
        -50.0f64..2000.0,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::option::of(0.0f64..2.0),
    )
        .prop_map(
            |(sub_type, age, health, weight, male, pregnant, lactating, quality)| {
                let mut a = Animal::new("x", sub_type);
                a.age = age;
                a.health = health;
                a.weight = weight;
                a.gender = if male { Gender::Male } else { Gender::Female };
                a.is_pregnant = pregnant;
                a.is_lactating = lactating;
                a.genetics = quality.map(|q| Genetics {
                    quality: q,
                    ..Genetics::default()
                });
                a
            },
        )
}

proptest! {
    #[test]
    fn prop_value_never_below_floor(animal in any_animal()) {
        let tables = ValuationTables::default();
        let base = tables.lookup(&animal.sub_type).base_value;
        let valuation = value(&animal, &tables);
        prop_assert!(valuation.value as f64 >= (base * 0.05).round());
        prop_assert_eq!(valuation.breakdown.base_value, base);
    }

    #[test]
    fn prop_value_is_deterministic(animal in any_animal()) {
        let tables = ValuationTables::default();
        prop_assert_eq!(value(&animal, &tables), value(&animal, &tables));
    }
}

#[test]
fn test_new_breed_is_additive_configuration() {
    let mut overrides = ValuationOverrides::default();
    let mut entry = ValuationTables::default().lookup("COW_ANGUS");
    entry.base_value = 10_000.0;
    overrides.subtypes.insert("COW_WAGYU".to_string(), entry);
    let tables = ValuationTables::default().merged_with(&overrides);

    let mut wagyu = Animal::new("w", "COW_WAGYU");
    wagyu.gender = Gender::Female;
    wagyu.age = 48.0;
    wagyu.health = 100.0;
    let mut angus = wagyu.clone();
    angus.sub_type = "COW_ANGUS".to_string();

    assert!(value(&wagyu, &tables).value > value(&angus, &tables).value);
}

#[test]
fn test_group_value_is_sum() {
    let tables = ValuationTables::default();
    let herd: Vec<Animal> = ["COW_ANGUS", "PIG_LANDRACE", "GOAT"]
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut a = Animal::new(i.to_string(), *s);
            a.age = 24.0;
            a.health = 90.0;
            a
        })
        .collect();
    let sum: i64 = herd.iter().map(|a| value(a, &tables).value).sum();
    assert_eq!(value_group(&herd, &tables), sum);
    assert_eq!(value_group(&Vec::<Animal>::new(), &tables), 0);
}
