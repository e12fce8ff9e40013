//! FILENAME: service/src/lib.rs
//! REST client for the analytics server.
//!
//! Layers:
//! - `transport`: One request, one response (the only code that does I/O)
//! - `service`: Sessions, namespaced paths, JSON and error decoding
//! - `entity`, `job`, `datamodels`, `pivots`: Typed access to specific endpoints

pub mod config;
pub mod datamodels;
pub mod entity;
pub mod error;
pub mod job;
pub mod pivots;
pub mod service;
pub mod transport;

pub use config::ServiceConfig;
pub use entity::{Entity, EntityCollection};
pub use error::{ServiceError, ServiceResult};
pub use job::Job;
pub use service::Service;
pub use transport::{HttpTransport, Method, Request, Response, Transport};
