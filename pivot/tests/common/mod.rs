//! FILENAME: tests/common/mod.rs
//! Fixtures for pivot integration tests.

#![allow(dead_code)]

use datamodel::DataModel;
use pivot::{PivotError, PivotRequest, PivotResult, PivotService};
use serde_json::{json, Value};
use std::cell::RefCell;

/// Description of a data model with one event object covering every field
/// type the pivot builder distinguishes.
pub const TEST_DATA_DESCRIPTION: &str = r#"{
    "modelName": "testmodel",
    "displayName": "Test Model",
    "description": "Fixture for pivot tests",
    "objects": [
        {
            "objectName": "test_data",
            "displayName": "Test Data",
            "parentName": "BaseEvent",
            "lineage": "test_data",
            "fields": [
                {"fieldName": "has_boris", "owner": "test_data", "type": "boolean"},
                {"fieldName": "hostip", "owner": "test_data", "type": "ipv4"},
                {"fieldName": "epsilon", "owner": "test_data", "type": "number"},
                {"fieldName": "test_data", "owner": "test_data", "type": "objectCount"}
            ]
        },
        {
            "objectName": "boris_events",
            "parentName": "test_data",
            "lineage": "test_data.boris_events",
            "fields": [
                {"fieldName": "boris_count", "owner": "boris_events", "type": "childCount"}
            ]
        }
    ]
}"#;

pub struct ModelFixture;

impl ModelFixture {
    pub fn plain() -> DataModel {
        DataModel::from_description("testmodel", TEST_DATA_DESCRIPTION, None).unwrap()
    }

    pub fn accelerated() -> DataModel {
        DataModel::from_description(
            "testmodel",
            TEST_DATA_DESCRIPTION,
            Some(r#"{"enabled": "1", "earliest_time": "-1mon"}"#),
        )
        .unwrap()
    }
}

/// What the fake server answers with.
pub enum Reply {
    Queries { pivot: String, tstats: String },
    Reject { status: u16, message: String },
    Unreachable,
}

/// Pivot service that records every request and answers with a canned reply.
/// Empty specifications are rejected the way the server rejects them.
pub struct FakePivotService {
    pub requests: RefCell<Vec<PivotRequest>>,
    reply: Reply,
}

impl FakePivotService {
    pub fn new() -> Self {
        Self::with_reply(Reply::Queries {
            pivot: "| pivot testmodel test_data count(test_data) AS \"Count\"".to_string(),
            tstats: String::new(),
        })
    }

    pub fn with_reply(reply: Reply) -> Self {
        FakePivotService {
            requests: RefCell::new(Vec::new()),
            reply,
        }
    }

    pub fn last_request(&self) -> PivotRequest {
        self.requests.borrow().last().cloned().unwrap()
    }
}

impl PivotService for FakePivotService {
    fn submit_pivot(&self, request: &PivotRequest) -> PivotResult<Value> {
        self.requests.borrow_mut().push(request.clone());

        let spec: Value = serde_json::from_str(&request.pivot_json).unwrap();
        let empty = ["filters", "rows", "columns", "cells"]
            .iter()
            .all(|key| spec[*key].as_array().map_or(true, |a| a.is_empty()));
        if empty {
            return Err(PivotError::RemoteRejection {
                status: 400,
                message: "In handler 'datamodelpivot': Pivot has no cells, rows or columns"
                    .to_string(),
            });
        }

        match &self.reply {
            Reply::Queries { pivot, tstats } => Ok(json!({
                "entry": [{
                    "name": request.data_model,
                    "content": {
                        "pivot_search": pivot,
                        "tstats_search": tstats,
                        "drilldown_search": "| datamodel testmodel test_data search",
                        "open_in_search": "| pivot testmodel test_data"
                    }
                }]
            })),
            Reply::Reject { status, message } => Err(PivotError::RemoteRejection {
                status: *status,
                message: message.clone(),
            }),
            Reply::Unreachable => Err(PivotError::Transport("connection refused".to_string())),
        }
    }
}
