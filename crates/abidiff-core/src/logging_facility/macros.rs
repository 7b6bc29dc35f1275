//! Operation logging macros
//!
//! Every logged operation emits one `start` event and exactly one of `end`
//! or `end_error`, all carrying the same `op`. Error events name the
//! offending class and input side when the error has them, so a failed diff
//! can be traced to the snapshot that broke it.

/// Log the start of an operation, with optional extra fields
///
/// ```
/// # use abidiff_core::log_op_start;
/// log_op_start!("compute_changes");
/// log_op_start!("compute_changes", current_len = 3, previous_len = 2);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            op = $op,
            event = abidiff_core_types::schema::EVENT_START,
            $($($field)+)?
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use abidiff_core::log_op_end;
/// log_op_end!("compute_changes", duration_ms = 42, changed_classes = 1);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            op = $op,
            event = abidiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        );
    };
}

/// Log the failed end of an operation
///
/// `err` is anything convertible into [`ExError`](crate::errors::ExError).
/// `class_id` and `side` are empty when the error carries none.
///
/// ```
/// # use abidiff_core::{log_op_error, errors::AbiDiffError};
/// let err = AbiDiffError::DuplicateClass {
///     class_id: "com/example/A".to_string(),
///     side: "current".to_string(),
/// };
/// log_op_error!("compute_changes", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            op = $op,
            event = abidiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_code = ex_err.code(),
            class_id = ex_err.class_id().unwrap_or_default(),
            side = ex_err.side().unwrap_or_default(),
            "{}",
            ex_err
        );
    }};
}
