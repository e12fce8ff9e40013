//! FILENAME: service/src/job.rs
//! PURPOSE: Search jobs.
//! CONTEXT: Creating a job only queues the search; the server reports its
//! progress through `dispatchState` (QUEUED, PARSING, RUNNING, FINALIZING,
//! DONE, FAILED) and `isDone`. Callers poll with `refresh`.

use crate::entity::{encode_segment, owned_args, Entity};
use crate::error::{ServiceError, ServiceResult};
use crate::service::Service;
use crate::transport::Transport;
use datamodel::{log_debug, log_info};
use serde_json::Value;
use std::thread;
use std::time::Duration;

const JOBS_PATH: &str = "search/jobs";

/// Dispatch states in which a job has not produced anything yet.
const NOT_READY_STATES: &[&str] = &["QUEUED", "PARSING"];

/// A search job on the server.
pub struct Job<'s, T: Transport> {
    service: &'s Service<T>,
    sid: String,
    entity: Option<Entity>,
}

impl<'s, T: Transport> Job<'s, T> {
    pub fn sid(&self) -> &str {
        &self.sid
    }

    fn path(&self) -> String {
        format!("{}/{}", JOBS_PATH, encode_segment(&self.sid))
    }

    /// Re-reads the job's state from the server.
    pub fn refresh(&mut self) -> ServiceResult<&Entity> {
        // Job entries are named after their search, so the path comes from the sid.
        let path = self.path();
        let feed = self.service.get(&path, &[])?;
        let entity = Entity::from_feed(JOBS_PATH, &feed)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ServiceError::UnexpectedResponse(format!("job {} returned no entry", self.sid))
            })?
            .with_path(path);
        Ok(self.entity.insert(entity))
    }

    /// State from the last refresh, if any.
    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    /// Refreshes and reports whether the job got past queueing and parsing.
    pub fn is_ready(&mut self) -> ServiceResult<bool> {
        let entity = self.refresh()?;
        Ok(match entity.get_str("dispatchState") {
            Some(state) => !NOT_READY_STATES.contains(&state),
            None => false,
        })
    }

    /// Refreshes and reports whether the job has finished.
    pub fn is_done(&mut self) -> ServiceResult<bool> {
        Ok(self.refresh()?.get_bool("isDone"))
    }

    pub fn dispatch_state(&self) -> Option<&str> {
        self.entity.as_ref().and_then(|e| e.get_str("dispatchState"))
    }

    /// The search string the job runs. The server names job entries after it.
    pub fn search(&self) -> Option<&str> {
        self.entity.as_ref().map(Entity::name)
    }

    pub fn cancel(&self) -> ServiceResult<()> {
        let form = owned_args(&[("action", "cancel")]);
        self.service.post(&format!("{}/control", self.path()), &form)?;
        log_info!("JOB", "cancelled sid={}", self.sid);
        Ok(())
    }

    /// Polls until the job is ready, up to `attempts` refreshes `interval` apart.
    pub fn wait_until_ready(&mut self, attempts: u32, interval: Duration) -> ServiceResult<()> {
        for attempt in 1..=attempts {
            if self.is_ready()? {
                log_debug!("JOB", "sid={} ready after {} attempts", self.sid, attempt);
                return Ok(());
            }
            if attempt < attempts {
                thread::sleep(interval);
            }
        }
        Err(ServiceError::JobNotReady {
            sid: self.sid.clone(),
            attempts,
        })
    }
}

impl<T: Transport> Service<T> {
    /// Starts a search job. `args` are extra job arguments such as
    /// `earliest_time`.
    pub fn create_job(&self, query: &str, args: &[(&str, &str)]) -> ServiceResult<Job<'_, T>> {
        let mut form = vec![("search".to_string(), query.to_string())];
        form.extend(owned_args(args));

        let response = self.post(JOBS_PATH, &form)?;
        let sid = response
            .get("sid")
            .and_then(Value::as_str)
            .ok_or_else(|| ServiceError::UnexpectedResponse("job response has no sid".to_string()))?;

        log_info!("JOB", "created sid={} search={}", sid, query);
        Ok(self.job(sid))
    }

    /// A handle on an existing job. Nothing is fetched until `refresh`.
    pub fn job(&self, sid: &str) -> Job<'_, T> {
        Job {
            service: self,
            sid: sid.to_string(),
            entity: None,
        }
    }
}
