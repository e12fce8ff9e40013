//! FILENAME: pivot/src/result.rs
//! PURPOSE: Pivot submission and the queries the server returns for it.
//! CONTEXT: Submitting a specification does not run anything. The server
//! translates it into search queries (a `| pivot` query, and a `| tstats`
//! query when an acceleration summary can answer it), which the caller then
//! runs as a search job. `PivotService` is the seam between this crate and
//! whatever HTTP client talks to the server.

use crate::error::{PivotError, PivotResult};
use datamodel::log_debug;
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// REQUEST
// ============================================================================

/// One pivot submission, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRequest {
    /// Name of the data model, which is also the last path segment.
    pub data_model: String,
    /// Serialized specification.
    pub pivot_json: String,
    pub namespace: Option<String>,
}

impl PivotRequest {
    /// Endpoint path, relative to the service namespace.
    pub fn path(&self) -> String {
        format!("datamodel/pivot/{}", self.data_model)
    }

    /// Query arguments of the GET request.
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![("pivot_json".to_string(), self.pivot_json.clone())];
        if let Some(namespace) = &self.namespace {
            query.push(("namespace".to_string(), namespace.clone()));
        }
        query
    }
}

/// Sends pivot requests to a server.
///
/// Implementations perform one round trip and return the decoded JSON feed.
/// A non-success HTTP status must map to `PivotError::RemoteRejection` and a
/// connection problem to `PivotError::Transport`.
pub trait PivotService {
    fn submit_pivot(&self, request: &PivotRequest) -> PivotResult<Value>;
}

// ============================================================================
// RESULT
// ============================================================================

#[derive(Debug, Deserialize)]
struct PivotContent {
    pivot_search: Option<String>,
    #[serde(default)]
    tstats_search: Option<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    drilldown_search: Option<String>,
    #[serde(default)]
    open_in_search: Option<String>,
}

/// The queries generated for a pivot specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pivot {
    pivot_query: String,
    accelerated_query: Option<String>,
    search: Option<String>,
    drilldown_search: Option<String>,
    open_in_search: Option<String>,
}

impl Pivot {
    /// Reads `entry[0].content` of the server's JSON feed.
    pub fn from_response(response: &Value) -> PivotResult<Self> {
        let content = response
            .get("entry")
            .and_then(|entry| entry.get(0))
            .and_then(|entry| entry.get("content"))
            .ok_or_else(|| PivotError::MalformedResponse("no entry content".to_string()))?;

        let content = PivotContent::deserialize(content)
            .map_err(|e| PivotError::MalformedResponse(e.to_string()))?;

        let pivot_query = content
            .pivot_search
            .ok_or_else(|| PivotError::MalformedResponse("missing pivot_search".to_string()))?;

        let non_empty = |value: Option<String>| value.filter(|s| !s.trim().is_empty());
        let pivot = Pivot {
            pivot_query,
            accelerated_query: non_empty(content.tstats_search),
            search: non_empty(content.search),
            drilldown_search: non_empty(content.drilldown_search),
            open_in_search: non_empty(content.open_in_search),
        };

        log_debug!(
            "PIVOT",
            "pivot response accelerated={}",
            pivot.accelerated_query.is_some()
        );
        Ok(pivot)
    }

    /// The `| pivot ...` query.
    pub fn pivot_query(&self) -> &str {
        &self.pivot_query
    }

    /// The `| tstats ...` query, when the server could use an acceleration summary.
    pub fn accelerated_query(&self) -> Option<&str> {
        self.accelerated_query.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn drilldown_search(&self) -> Option<&str> {
        self.drilldown_search.as_deref()
    }

    pub fn open_in_search(&self) -> Option<&str> {
        self.open_in_search.as_deref()
    }

    /// The query to run: accelerated when available, the pivot query otherwise.
    pub fn preferred_query(&self) -> &str {
        self.accelerated_query().unwrap_or(&self.pivot_query)
    }
}
