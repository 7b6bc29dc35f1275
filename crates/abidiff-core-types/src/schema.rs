//! Field keys and event names of operation log events
//!
//! The logging macros emit these fields; the test capture layer reads them
//! back by the same keys.

pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_CLASS_ID: &str = "class_id";
pub const FIELD_SIDE: &str = "side";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
