//! Lifecycle logging macros for command handlers
//!
//! Each macro emits one event carrying `component`, `op` and `event`, plus
//! any extra `tracing` fields given after the required arguments. Callers
//! must depend on `costlens-core-types` for the event constants.

/// Log the start of an operation
///
/// ```
/// # use costlens_core::log_op_start;
/// log_op_start!("diff");
/// log_op_start!("diff", before = "before.json", after = "after.json");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = costlens_core_types::schema::EVENT_START,
            $($($field)+)?
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use costlens_core::log_op_end;
/// log_op_end!("diff", duration_ms = 42, added = 1usize, removed = 0usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = costlens_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        );
    };
}

/// Log a failed operation with its canonical error kind and code
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
///
/// ```
/// # use costlens_core::{log_op_error, errors::CostLensError};
/// let err = CostLensError::UnknownAggregationProperty { property: "x".into() };
/// log_op_error!("diff", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = costlens_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($($field)+)?
        );
    }};
}
