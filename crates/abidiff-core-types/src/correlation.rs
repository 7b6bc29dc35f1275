//! Correlation ids for one diff invocation
//!
//! A change computation is usually one step of a larger build. The request
//! id is minted per `abidiff` run; the trace id, when given, comes from the
//! build tool and ties this run's logs and errors back to that build.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Id of a single diff run (UUIDv7, so ids sort by start time)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque trace id handed down by the driving build tool
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(String);

impl TraceId {
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ids attached to every log span and error of one diff run
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    /// Fresh request id, optionally joined to the caller's trace.
    pub fn for_invocation(trace_id: Option<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            trace_id: trace_id.map(TraceId::from_string),
        }
    }

    /// Trace id for log fields; empty when the run is not part of a trace.
    pub fn trace_id_str(&self) -> &str {
        self.trace_id.as_ref().map(TraceId::as_str).unwrap_or_default()
    }
}
