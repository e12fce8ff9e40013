//! FILENAME: service/src/pivots.rs
//! PURPOSE: Pivot submission over HTTP and running the generated queries.

use crate::error::{ServiceError, ServiceResult};
use crate::job::Job;
use crate::service::Service;
use crate::transport::Transport;
use datamodel::log_info;
use pivot::{Pivot, PivotError, PivotRequest, PivotResult, PivotService};
use serde_json::Value;

impl<T: Transport> PivotService for Service<T> {
    fn submit_pivot(&self, request: &PivotRequest) -> PivotResult<Value> {
        self.get(&request.path(), &request.query())
            .map_err(|e| match e {
                ServiceError::Http { status, message } => {
                    PivotError::RemoteRejection { status, message }
                }
                ServiceError::Json(e) => PivotError::MalformedResponse(e.to_string()),
                other => PivotError::Transport(other.to_string()),
            })
    }
}

impl<T: Transport> Service<T> {
    /// Starts a search job for a pivot, preferring the accelerated query.
    pub fn run_pivot(&self, pivot: &Pivot) -> ServiceResult<Job<'_, T>> {
        let query = pivot.preferred_query();
        log_info!(
            "PIVOT",
            "running pivot accelerated={}",
            pivot.accelerated_query().is_some()
        );
        self.create_job(query, &[])
    }
}
