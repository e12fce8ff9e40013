//! FILENAME: service/src/datamodels.rs
//! PURPOSE: Data model endpoints.
//! CONTEXT: A data model entity carries its schema as a JSON string in
//! `content.description` and its acceleration settings as another JSON string
//! in `content.acceleration`; `datamodel` parses both.

use crate::entity::{encode_segment, Entity, EntityCollection};
use crate::error::{ServiceError, ServiceResult};
use crate::job::Job;
use crate::service::Service;
use crate::transport::Transport;
use datamodel::{log_info, DataModel, DataModelObject};

const DATA_MODELS_PATH: &str = "datamodel/model";

fn parse_entity(entity: &Entity) -> ServiceResult<DataModel> {
    let description = entity.get_str("description").ok_or_else(|| {
        ServiceError::UnexpectedResponse(format!("data model {} has no description", entity.name()))
    })?;
    Ok(DataModel::from_description(
        entity.name(),
        description,
        entity.get_str("acceleration"),
    )?)
}

impl<T: Transport> Service<T> {
    pub fn data_models(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, DATA_MODELS_PATH)
    }

    /// Every data model visible in the current namespace.
    pub fn list_data_models(&self) -> ServiceResult<Vec<DataModel>> {
        self.data_models().list()?.iter().map(parse_entity).collect()
    }

    /// Fetches and parses one data model, or `None` if it does not exist.
    pub fn data_model(&self, name: &str) -> ServiceResult<Option<DataModel>> {
        match self.data_models().get(name)? {
            Some(entity) => Ok(Some(parse_entity(&entity)?)),
            None => Ok(None),
        }
    }

    /// Creates a data model from a description JSON document.
    pub fn create_data_model(&self, name: &str, description: &str) -> ServiceResult<DataModel> {
        let entity = self
            .data_models()
            .create(name, &[("description", description)])?;
        log_info!("MODEL", "created data model={}", name);
        parse_entity(&entity)
    }

    pub fn remove_data_model(&self, name: &str) -> ServiceResult<()> {
        self.delete(&format!("{}/{}", DATA_MODELS_PATH, encode_segment(name)))?;
        log_info!("MODEL", "removed data model={}", name);
        Ok(())
    }

    /// Starts a job that builds a local acceleration summary of `object`.
    /// Its sid can be passed to `PivotSpecification::set_acceleration_job`.
    pub fn create_local_acceleration_job(
        &self,
        object: &DataModelObject,
        earliest_time: Option<&str>,
    ) -> ServiceResult<Job<'_, T>> {
        let query = object.local_acceleration_query();
        match earliest_time {
            Some(earliest) => self.create_job(&query, &[("earliest_time", earliest)]),
            None => self.create_job(&query, &[]),
        }
    }
}
