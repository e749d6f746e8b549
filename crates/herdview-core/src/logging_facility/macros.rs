//! Operation logging macros
//!
//! Every core operation emits a `start` event and then either `end` or
//! `end_error`, all tagged with `component` and `op`. A scope may follow
//! the operation name:
//!
//! - `cycle = ctx` stamps `cycle_id` and `sequence` from a [`CycleContext`]
//! - `pasture = id` stamps `pasture_id`
//!
//! Any remaining `key = value` pairs are passed to `tracing` untouched.
//!
//! [`CycleContext`]: herdview_core_types::correlation::CycleContext

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr, { $($fixed:tt)* }, cycle = $ctx:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            cycle_id = $ctx.cycle_id.as_str(),
            sequence = $ctx.sequence,
            $($fixed)*
            $($($field)*)?
        )
    };
    ($level:ident, $op:expr, $event:expr, { $($fixed:tt)* }, pasture = $id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            pasture_id = ::core::convert::AsRef::<str>::as_ref(&$id),
            $($fixed)*
            $($($field)*)?
        )
    };
    ($level:ident, $op:expr, $event:expr, { $($fixed:tt)* } $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($fixed)*
            $($($field)*)?
        )
    };
}

/// Log the start of an operation.
///
/// ```
/// # use herdview_core::log_op_start;
/// let pasture_id = String::from("north-paddock");
/// log_op_start!("report");
/// log_op_start!("derive_pasture", pasture = pasture_id);
/// log_op_start!("ingest_document", bytes = 512usize);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($rest:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::__schema::schema::EVENT_START,
            {}
            $(, $($rest)*)?
        )
    };
}

/// Log the successful end of an operation started at `start`.
///
/// `duration_ms` is measured from the given [`std::time::Instant`].
///
/// ```
/// # use herdview_core::log_op_end;
/// let start = std::time::Instant::now();
/// log_op_end!("report", start, warning_count = 2usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $start:expr $(, $($rest:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::__schema::schema::EVENT_END,
            { duration_ms = $start.elapsed().as_millis() as u64, }
            $(, $($rest)*)?
        )
    };
}

/// Log a failed operation started at `start`.
///
/// The error's own cycle, pasture and animal context is attached, so
/// callers pass no scope here.
///
/// ```
/// # use herdview_core::log_op_error;
/// # use herdview_core::errors::HerdError;
/// let start = std::time::Instant::now();
/// let err = HerdError::InvalidFeed { reason: "animals is not a list".to_string() };
/// log_op_error!("ingest_document", err, start);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, $start:expr $(, $($rest:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            $crate::__schema::schema::EVENT_END_ERROR,
            {
                duration_ms = $start.elapsed().as_millis() as u64,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
                cycle_id = ex_err.cycle_id().map(|id| id.as_str()),
                pasture_id = ex_err.pasture_id(),
                animal_id = ex_err.entity_id(),
            }
            $(, $($rest)*)?
        )
    }};
}
