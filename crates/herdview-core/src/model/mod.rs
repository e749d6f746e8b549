pub mod animal;
pub mod pasture;
pub mod snapshot;
pub mod warning;

pub use animal::{derive_type, Animal, Gender, Genetics, RawRecord, FREE_ROAMING, UNKNOWN_PARENT};
pub use pasture::{
    CapacityEstimate, CapacitySource, ConditionReport, FencePoint, FoodReport, FoodType, Pasture,
    PastureSpec,
};
pub use snapshot::{Farm, GameTime, Snapshot};
pub use warning::{MotherOffspringPair, Severity, Warning, WarningDetails, WarningType};
