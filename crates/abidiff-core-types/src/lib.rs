//! Types shared by the abidiff error and logging facilities
//!
//! - **Correlation**: per-run `RequestId`, caller `TraceId`, `RequestContext`
//! - **Schema**: log field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
