//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_CYCLE_ID: &str = "cycle_id";

// Entity identifiers
pub const FIELD_ANIMAL_ID: &str = "animal_id";
pub const FIELD_PASTURE_ID: &str = "pasture_id";

// Collection sizes
pub const FIELD_ANIMAL_COUNT: &str = "animal_count";
pub const FIELD_PASTURE_COUNT: &str = "pasture_count";
pub const FIELD_WARNING_COUNT: &str = "warning_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
