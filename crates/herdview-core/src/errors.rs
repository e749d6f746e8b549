use herdview_core_types::CycleId;
use thiserror::Error;

/// Result type alias using HerdError
pub type Result<T> = std::result::Result<T, HerdError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output. The reconciliation core itself is
/// infallible; these kinds cover the surfaces around it (parsing, config,
/// persistence) and the report determinism guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    MissingField,
    InvalidSnapshot,
    InvalidFeed,
    InvalidConfig,

    // Reporting
    /// A change report failed its JSON round-trip check
    DeterminismViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::InvalidFeed => "ERR_INVALID_FEED",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::DeterminismViolation => "ERR_DETERMINISM_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling and optional context
/// (operation, entity, pasture, cycle) for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    pasture_id: Option<String>,
    cycle_id: Option<CycleId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            pasture_id: None,
            cycle_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add animal ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add pasture ID context
    pub fn with_pasture_id(mut self, id: impl Into<String>) -> Self {
        self.pasture_id = Some(id.into());
        self
    }

    /// Add reconcile cycle context
    pub fn with_cycle_id(mut self, cycle_id: CycleId) -> Self {
        self.cycle_id = Some(cycle_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the animal ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the pasture ID context, if any
    pub fn pasture_id(&self) -> Option<&str> {
        self.pasture_id.as_deref()
    }

    /// Get the cycle ID context, if any
    pub fn cycle_id(&self) -> Option<&CycleId> {
        self.cycle_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (animal_id: {})", entity_id)?;
        }
        if let Some(pasture_id) = &self.pasture_id {
            write!(f, " (pasture_id: {})", pasture_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for HerdView operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HerdError {
    /// A snapshot document could not be decoded
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    /// A live feed document could not be decoded
    #[error("Invalid live feed document: {reason}")]
    InvalidFeed { reason: String },

    /// A required field is missing from an input document
    #[error("Missing required field `{field}`")]
    MissingField { field: String },

    /// A configuration file is malformed
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<HerdError> for ExError {
    fn from(err: HerdError) -> Self {
        match &err {
            HerdError::InvalidSnapshot { .. } => {
                ExError::new(ExErrorKind::InvalidSnapshot).with_message(err.to_string())
            }
            HerdError::InvalidFeed { .. } => {
                ExError::new(ExErrorKind::InvalidFeed).with_message(err.to_string())
            }
            HerdError::MissingField { .. } => {
                ExError::new(ExErrorKind::MissingField).with_message(err.to_string())
            }
            HerdError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(err.to_string())
            }
            HerdError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
            }
        }
    }
}

/// Conversion from serde_json::Error to HerdError
impl From<serde_json::Error> for HerdError {
    fn from(err: serde_json::Error) -> Self {
        HerdError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidSnapshot, "ERR_INVALID_SNAPSHOT"),
            (ExErrorKind::InvalidFeed, "ERR_INVALID_FEED"),
            (ExErrorKind::DeterminismViolation, "ERR_DETERMINISM_VIOLATION"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_herd_error_converts_to_ex_error() {
        let err: ExError = HerdError::MissingField {
            field: "animals".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::MissingField);
        assert!(err.message().contains("animals"));
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::Persistence)
            .with_op("snapshot_save")
            .with_pasture_id("p1")
            .with_message("disk full");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_PERSISTENCE]"));
        assert!(text.contains("snapshot_save"));
        assert!(text.contains("pasture_id: p1"));
    }
}
