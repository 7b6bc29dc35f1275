use abidiff_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using AbiDiffError
pub type Result<T> = std::result::Result<T, AbiDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure this workspace can report maps to exactly one kind, and
/// every kind has a stable `ERR_*` code that callers and tests can match on.
/// There is no retryable category: the change computation does no I/O, so
/// anything it reports is a caller contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input contract
    /// The same class appears twice in one snapshot collection
    DuplicateClass,
    /// Two snapshots of different classes were handed to a per-class comparison
    ClassIdMismatch,

    // Snapshot-set documents
    /// Snapshot-set bytes are not UTF-8 JSON of the expected shape or version
    InvalidSnapshotSet,
    /// A required snapshot-set field is absent
    MissingField,

    // Integration
    /// A snapshot-set file could not be read
    Io,
    /// A change set could not be encoded
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DuplicateClass => "ERR_DUPLICATE_CLASS",
            ExErrorKind::ClassIdMismatch => "ERR_CLASS_ID_MISMATCH",
            ExErrorKind::InvalidSnapshotSet => "ERR_INVALID_SNAPSHOT_SET",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification used for programmatic handling plus the
/// context needed to find the offending input: the operation, the class
/// identity and which side of the diff it came from.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    class_id: Option<String>,
    side: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            class_id: None,
            side: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the offending class identity
    pub fn with_class_id(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = Some(class_id.into());
        self
    }

    /// Add which input collection (`current` / `previous`) was at fault
    pub fn with_side(mut self, side: impl Into<String>) -> Self {
        self.side = Some(side.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
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

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn class_id(&self) -> Option<&str> {
        self.class_id.as_deref()
    }

    pub fn side(&self) -> Option<&str> {
        self.side.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
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
        if let Some(class_id) = &self.class_id {
            write!(f, " (class_id: {})", class_id)?;
        }
        if let Some(side) = &self.side {
            write!(f, " (side: {})", side)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        if let Some(trace_id) = &self.trace_id {
            write!(f, " (trace_id: {})", trace_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Concrete failures raised by the change computation and its inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AbiDiffError {
    // ===== Input contract =====
    /// One snapshot collection contains the same class more than once
    #[error("Duplicate class {class_id} in {side} snapshots")]
    DuplicateClass { class_id: String, side: String },

    #[error("Cannot compare snapshots of different classes: current={current}, previous={previous}")]
    ClassIdMismatch { current: String, previous: String },

    // ===== Snapshot-set documents =====
    #[error("Invalid snapshot set: {reason}")]
    InvalidSnapshotSet { reason: String },

    #[error("Snapshot set is missing required field `{field}`")]
    MissingField { field: String },

    // ===== Generic Errors =====
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<AbiDiffError> for ExError {
    fn from(err: AbiDiffError) -> Self {
        match err {
            AbiDiffError::DuplicateClass { class_id, side } => {
                ExError::new(ExErrorKind::DuplicateClass)
                    .with_class_id(class_id)
                    .with_side(side)
                    .with_message("Snapshot collection contains the class more than once")
            }

            AbiDiffError::ClassIdMismatch { current, previous } => {
                ExError::new(ExErrorKind::ClassIdMismatch)
                    .with_class_id(current)
                    .with_message(format!(
                        "Previous snapshot belongs to a different class {}",
                        previous
                    ))
            }

            AbiDiffError::InvalidSnapshotSet { reason } => {
                ExError::new(ExErrorKind::InvalidSnapshotSet).with_message(reason)
            }

            AbiDiffError::MissingField { field } => ExError::new(ExErrorKind::MissingField)
                .with_message(format!("required field `{}` is absent", field)),

            AbiDiffError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_message(format!("{}: {}", path, message)),

            AbiDiffError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to AbiDiffError
impl From<serde_json::Error> for AbiDiffError {
    fn from(err: serde_json::Error) -> Self {
        AbiDiffError::Serialization {
            message: err.to_string(),
        }
    }
}
