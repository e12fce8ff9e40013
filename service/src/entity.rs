//! FILENAME: service/src/entity.rs
//! PURPOSE: Generic REST resources and the collections that list them.
//! CONTEXT: The server answers every listing with a feed whose `entry` array
//! holds one object per resource: its `name`, and a `content` map of
//! settings. Values in `content` are loosely typed (numbers and booleans are
//! often strings), so the accessors below convert leniently.

use crate::error::{ServiceError, ServiceResult};
use crate::service::Service;
use crate::transport::Transport;
use datamodel::{flag_value, log_debug};
use serde_json::{Map, Value};

/// Percent-encodes one path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Pairs borrowed keys and values into the owned form the request helpers take.
pub(crate) fn owned_args(args: &[(&str, &str)]) -> Vec<(String, String)> {
    args.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// ENTITY
// ============================================================================

/// One resource, as read from a feed entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    path: String,
    content: Map<String, Value>,
}

impl Entity {
    /// Reads a feed entry. `collection` is the relative path of the listing
    /// the entry came from.
    pub fn from_entry(collection: &str, entry: &Value) -> ServiceResult<Self> {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ServiceError::UnexpectedResponse("entry has no name".to_string()))?;
        let content = match entry.get("content") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        Ok(Entity {
            name: name.to_string(),
            path: format!("{}/{}", collection.trim_end_matches('/'), encode_segment(name)),
            content,
        })
    }

    /// Reads every entry of a feed.
    pub fn from_feed(collection: &str, feed: &Value) -> ServiceResult<Vec<Self>> {
        match feed.get("entry") {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| Self::from_entry(collection, entry))
                .collect(),
            Some(_) => Err(ServiceError::UnexpectedResponse(
                "entry is not an array".to_string(),
            )),
            None => Ok(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relative path of the resource itself.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replaces the path for resources addressed by something other than
    /// their entry name.
    pub(crate) fn with_path(mut self, path: String) -> Self {
        self.path = path;
        self
    }

    pub fn content(&self) -> &Map<String, Value> {
        &self.content
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.content.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Booleans written as `true`, `1` or `"1"`. Missing keys are false.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(flag_value).unwrap_or(false)
    }

    /// Integers written as numbers or numeric strings. Fractional or
    /// out-of-range numbers are `None`.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// A list of strings; a single string is a one-element list.
    pub fn get_str_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// COLLECTION
// ============================================================================

/// A listing endpoint such as `saved/searches`.
pub struct EntityCollection<'s, T: Transport> {
    service: &'s Service<T>,
    path: String,
}

impl<'s, T: Transport> EntityCollection<'s, T> {
    pub fn new(service: &'s Service<T>, path: impl Into<String>) -> Self {
        EntityCollection {
            service,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Every resource in the collection.
    pub fn list(&self) -> ServiceResult<Vec<Entity>> {
        let query = vec![("count".to_string(), "0".to_string())];
        let feed = self.service.get(&self.path, &query)?;
        let entities = Entity::from_feed(&self.path, &feed)?;
        log_debug!("HTTP", "listed {} entities={}", self.path, entities.len());
        Ok(entities)
    }

    /// Fetches one resource, or `None` when the server does not know it.
    pub fn get(&self, name: &str) -> ServiceResult<Option<Entity>> {
        match self.service.get(&self.entity_path(name), &[]) {
            Ok(feed) => Ok(Entity::from_feed(&self.path, &feed)?.into_iter().next()),
            Err(ServiceError::Http { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn contains(&self, name: &str) -> ServiceResult<bool> {
        Ok(self.get(name)?.is_some())
    }

    /// Creates a resource named `name` with extra arguments.
    pub fn create(&self, name: &str, args: &[(&str, &str)]) -> ServiceResult<Entity> {
        let mut form = vec![("name".to_string(), name.to_string())];
        form.extend(owned_args(args));

        let feed = self.service.post(&self.path, &form)?;
        Entity::from_feed(&self.path, &feed)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ServiceError::UnexpectedResponse(format!("creating '{}' returned no entry", name))
            })
    }

    pub fn remove(&self, name: &str) -> ServiceResult<()> {
        self.service.delete(&self.entity_path(name))?;
        Ok(())
    }

    fn entity_path(&self, name: &str) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), encode_segment(name))
    }
}

// ============================================================================
// RESOURCE GETTERS
// ============================================================================

impl<T: Transport> Service<T> {
    pub fn applications(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "apps/local")
    }

    /// Capability names known to the server.
    pub fn capabilities(&self) -> ServiceResult<Vec<String>> {
        let entity = self.read_entity("authorization/capabilities")?;
        Ok(entity.get_str_list("capabilities"))
    }

    /// This server's deployment client settings.
    pub fn deployment_client(&self) -> ServiceResult<Entity> {
        self.read_entity("deployment/client")
    }

    pub fn deployment_servers(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "deployment/server")
    }

    pub fn deployment_server_classes(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "deployment/serverclass")
    }

    pub fn deployment_tenants(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "deployment/tenants")
    }

    pub fn event_types(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "saved/eventtypes")
    }

    pub fn indexes(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "data/indexes")
    }

    /// Server version, build and platform details.
    pub fn info(&self) -> ServiceResult<Entity> {
        self.read_entity("server/info")
    }

    pub fn jobs(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "search/jobs")
    }

    pub fn license_groups(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "licenser/groups")
    }

    pub fn license_messages(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "licenser/messages")
    }

    pub fn license_pools(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "licenser/pools")
    }

    pub fn license_stacks(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "licenser/stacks")
    }

    /// Indexers reporting to this license master.
    pub fn license_slaves(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "licenser/slaves")
    }

    pub fn licenses(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "licenser/licenses")
    }

    pub fn loggers(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "server/logger")
    }

    pub fn messages(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "messages")
    }

    pub fn passwords(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "storage/passwords")
    }

    pub fn roles(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "authentication/roles")
    }

    pub fn saved_searches(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "saved/searches")
    }

    pub fn users(&self) -> EntityCollection<'_, T> {
        EntityCollection::new(self, "authentication/users")
    }

    /// Reads the first entry of a single-resource endpoint.
    fn read_entity(&self, path: &str) -> ServiceResult<Entity> {
        let feed = self.get(path, &[])?;
        Entity::from_feed(path, &feed)?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::UnexpectedResponse(format!("{} returned no entry", path)))
    }
}
