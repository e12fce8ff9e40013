//! FILENAME: pivot/src/specification.rs
//! PURPOSE: The pivot specification aggregate.
//! CONTEXT: A specification is built against one data model object and holds
//! four containers (filters, row splits, column splits, cell values) plus the
//! acceleration namespace. Every `add_*` call resolves its field against the
//! object's catalog and builds the element before touching the containers,
//! so a failed call leaves the specification exactly as it was.

use crate::cell_value::CellValue;
use crate::error::PivotResult;
use crate::field_ref::lookup;
use crate::filter::{Comparison, LimitFilter, PivotFilter};
use crate::functions::{SortDirection, StatsFunction, TimestampBinning};
use crate::result::{Pivot, PivotRequest, PivotService};
use crate::split::{ColumnSplit, NumberRanges, RowSplit, Split, SplitShape};
use datamodel::{log_debug, log_enter, log_exit, log_warn, DataModelObject};
use serde::Serialize;
use serde_json::Value;

/// Wire form of a specification.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpecificationJson<'s> {
    data_model: &'s str,
    base_class: &'s str,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'s str>,
    filters: &'s [PivotFilter],
    rows: &'s [RowSplit],
    columns: &'s [ColumnSplit],
    cells: &'s [CellValue],
}

/// A pivot under construction for one data model object.
#[derive(Debug, Clone)]
pub struct PivotSpecification<'a> {
    object: &'a DataModelObject,
    namespace: Option<String>,
    filters: Vec<PivotFilter>,
    rows: Vec<RowSplit>,
    columns: Vec<ColumnSplit>,
    cells: Vec<CellValue>,
}

impl<'a> PivotSpecification<'a> {
    /// Starts an empty specification. Objects of accelerated data models
    /// begin with the model's name as namespace.
    pub fn new(object: &'a DataModelObject) -> Self {
        let namespace = object
            .is_model_accelerated()
            .then(|| object.model_name().to_string());

        PivotSpecification {
            object,
            namespace,
            filters: Vec::new(),
            rows: Vec::new(),
            columns: Vec::new(),
            cells: Vec::new(),
        }
    }

    pub fn object(&self) -> &'a DataModelObject {
        self.object
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn filters(&self) -> &[PivotFilter] {
        &self.filters
    }

    pub fn rows(&self) -> &[RowSplit] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnSplit] {
        &self.columns
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
            && self.rows.is_empty()
            && self.columns.is_empty()
            && self.cells.is_empty()
    }

    // ========================================================================
    // NAMESPACE
    // ========================================================================

    /// Runs the pivot against the summary of a local acceleration job.
    pub fn set_acceleration_job(&mut self, sid: &str) -> &mut Self {
        self.namespace = Some(format!("sid={}", sid));
        self
    }

    /// Runs the pivot against an explicit acceleration namespace.
    pub fn set_acceleration_namespace(&mut self, namespace: &str) -> &mut Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    // ========================================================================
    // FILTERS
    // ========================================================================

    /// Adds a comparison filter. The comparator's type selects the filter
    /// variant, which must match the field's declared type.
    pub fn add_filter<C: Comparison>(
        &mut self,
        field: &str,
        comparator: C,
        compare_to: impl Into<C::Operand>,
    ) -> PivotResult<&mut Self> {
        let field = lookup(self.object, field)?;
        let filter = PivotFilter::comparison(field, comparator, compare_to.into())?;
        self.push_filter(filter);
        Ok(self)
    }

    /// Adds a comparison filter given a comparator token such as `">="` and a
    /// JSON operand.
    pub fn add_filter_from_tokens(
        &mut self,
        field: &str,
        comparator: &str,
        compare_to: &Value,
    ) -> PivotResult<&mut Self> {
        let field = lookup(self.object, field)?;
        let filter = PivotFilter::from_tokens(field, comparator, compare_to)?;
        self.push_filter(filter);
        Ok(self)
    }

    /// Keeps the `limit_amount` values of `field` that rank first by
    /// `stats_fn` over `sort_attribute`, in `direction` order.
    pub fn add_limit_filter(
        &mut self,
        field: &str,
        sort_attribute: &str,
        direction: SortDirection,
        limit_amount: i64,
        stats_fn: StatsFunction,
    ) -> PivotResult<&mut Self> {
        let limited = lookup(self.object, field)?;
        let attribute = lookup(self.object, sort_attribute)?;
        let filter = LimitFilter::new(limited, attribute, direction, limit_amount, stats_fn)?;
        self.push_filter(PivotFilter::Limit(filter));
        Ok(self)
    }

    fn push_filter(&mut self, filter: PivotFilter) {
        if self.filters.contains(&filter) {
            log_debug!("PIVOT", "duplicate filter on {} ignored", filter.field().field_name);
            return;
        }
        self.filters.push(filter);
    }

    // ========================================================================
    // ROW SPLITS
    // ========================================================================

    /// Splits rows by every value of a string or number field.
    pub fn add_row_split(&mut self, field: &str, label: &str) -> PivotResult<&mut Self> {
        self.push_row(field, label, SplitShape::Values)
    }

    /// Splits rows by the first `limit_amount` values of a string field,
    /// ordered by `direction`.
    pub fn add_limited_row_split(
        &mut self,
        field: &str,
        label: &str,
        direction: SortDirection,
        limit_amount: i64,
    ) -> PivotResult<&mut Self> {
        let shape = SplitShape::Limited {
            direction,
            limit_amount,
        };
        self.push_row(field, label, shape)
    }

    /// Splits rows of a number field into ranges.
    pub fn add_range_row_split(
        &mut self,
        field: &str,
        label: &str,
        ranges: NumberRanges,
    ) -> PivotResult<&mut Self> {
        self.push_row(field, label, SplitShape::Ranges(ranges))
    }

    pub fn add_boolean_row_split(
        &mut self,
        field: &str,
        label: &str,
        true_label: &str,
        false_label: &str,
    ) -> PivotResult<&mut Self> {
        let shape = SplitShape::Boolean {
            true_label: true_label.to_string(),
            false_label: false_label.to_string(),
        };
        self.push_row(field, label, shape)
    }

    pub fn add_timestamp_row_split(
        &mut self,
        field: &str,
        label: &str,
        binning: TimestampBinning,
    ) -> PivotResult<&mut Self> {
        self.push_row(field, label, SplitShape::Timestamp(binning))
    }

    fn push_row(&mut self, field: &str, label: &str, shape: SplitShape) -> PivotResult<&mut Self> {
        let split = Split::new(lookup(self.object, field)?, shape)?;
        self.rows.push(RowSplit {
            split,
            label: label.to_string(),
        });
        Ok(self)
    }

    // ========================================================================
    // COLUMN SPLITS
    // ========================================================================

    /// Splits columns by every value of a string or number field.
    pub fn add_column_split(&mut self, field: &str) -> PivotResult<&mut Self> {
        self.push_column(field, SplitShape::Values)
    }

    pub fn add_limited_column_split(
        &mut self,
        field: &str,
        direction: SortDirection,
        limit_amount: i64,
    ) -> PivotResult<&mut Self> {
        let shape = SplitShape::Limited {
            direction,
            limit_amount,
        };
        self.push_column(field, shape)
    }

    pub fn add_range_column_split(
        &mut self,
        field: &str,
        ranges: NumberRanges,
    ) -> PivotResult<&mut Self> {
        self.push_column(field, SplitShape::Ranges(ranges))
    }

    pub fn add_boolean_column_split(
        &mut self,
        field: &str,
        true_label: &str,
        false_label: &str,
    ) -> PivotResult<&mut Self> {
        let shape = SplitShape::Boolean {
            true_label: true_label.to_string(),
            false_label: false_label.to_string(),
        };
        self.push_column(field, shape)
    }

    pub fn add_timestamp_column_split(
        &mut self,
        field: &str,
        binning: TimestampBinning,
    ) -> PivotResult<&mut Self> {
        self.push_column(field, SplitShape::Timestamp(binning))
    }

    fn push_column(&mut self, field: &str, shape: SplitShape) -> PivotResult<&mut Self> {
        let split = Split::new(lookup(self.object, field)?, shape)?;
        self.columns.push(ColumnSplit { split });
        Ok(self)
    }

    // ========================================================================
    // CELL VALUES
    // ========================================================================

    /// Adds an aggregated cell value. Identical cell values are stored once.
    pub fn add_cell_value(
        &mut self,
        field: &str,
        label: &str,
        stats_fn: StatsFunction,
        sparkline: bool,
    ) -> PivotResult<&mut Self> {
        let cell = CellValue::new(lookup(self.object, field)?, label, stats_fn, sparkline)?;
        if !self.cells.contains(&cell) {
            self.cells.push(cell);
        }
        Ok(self)
    }

    // ========================================================================
    // SERIALIZATION & SUBMISSION
    // ========================================================================

    fn wire(&self) -> SpecificationJson<'_> {
        SpecificationJson {
            data_model: self.object.model_name(),
            base_class: self.object.name(),
            namespace: self.namespace.as_deref(),
            filters: &self.filters,
            rows: &self.rows,
            columns: &self.columns,
            cells: &self.cells,
        }
    }

    /// The JSON document the server expects as `pivot_json`.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.wire()).unwrap_or_default()
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.wire()).unwrap_or_default()
    }

    /// Builds the request `pivot` would send, with an optional namespace override.
    pub fn request(&self, namespace: Option<&str>) -> PivotRequest {
        PivotRequest {
            data_model: self.object.model_name().to_string(),
            pivot_json: self.to_json_string(),
            namespace: namespace.or(self.namespace.as_deref()).map(str::to_string),
        }
    }

    /// Asks the server to translate this specification into search queries.
    ///
    /// An empty specification is sent as is; the server decides whether it
    /// is acceptable.
    pub fn pivot<S: PivotService + ?Sized>(&self, service: &S) -> PivotResult<Pivot> {
        self.submit(service, self.request(None))
    }

    /// Like `pivot`, but against the summary of acceleration job `sid` for
    /// this call only.
    pub fn pivot_with_job<S: PivotService + ?Sized>(
        &self,
        service: &S,
        sid: &str,
    ) -> PivotResult<Pivot> {
        let namespace = format!("sid={}", sid);
        self.submit(service, self.request(Some(namespace.as_str())))
    }

    fn submit<S: PivotService + ?Sized>(&self, service: &S, request: PivotRequest) -> PivotResult<Pivot> {
        log_enter!(
            "PIVOT",
            "pivot",
            "model={} object={} namespace={:?}",
            request.data_model,
            self.object.name(),
            request.namespace
        );

        let result = service
            .submit_pivot(&request)
            .and_then(|response| Pivot::from_response(&response));

        match &result {
            Ok(_) => log_exit!("PIVOT", "pivot", "ok"),
            Err(e) => log_warn!("PIVOT", "pivot submission failed: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PivotError;
    use crate::functions::{BooleanComparison, NumberComparison};
    use datamodel::DataModel;
    use serde_json::json;

    fn model(accelerated: bool) -> DataModel {
        let description = r#"{
            "objects": [{
                "objectName": "test_data",
                "parentName": "BaseEvent",
                "fields": [
                    {"fieldName": "has_boris", "owner": "test_data", "type": "boolean"},
                    {"fieldName": "epsilon", "owner": "test_data", "type": "number"}
                ]
            }]
        }"#;
        let acceleration = if accelerated { r#"{"enabled": true}"# } else { "" };
        DataModel::from_description("testmodel", description, Some(acceleration)).unwrap()
    }

    #[test]
    fn test_empty_specification_json() {
        let model = model(false);
        let spec = PivotSpecification::new(model.object("test_data").unwrap());

        assert!(spec.is_empty());
        assert_eq!(
            spec.to_json(),
            json!({
                "dataModel": "testmodel",
                "baseClass": "test_data",
                "filters": [],
                "rows": [],
                "columns": [],
                "cells": []
            })
        );
    }

    #[test]
    fn test_initial_namespace_follows_acceleration() {
        let plain = model(false);
        assert_eq!(PivotSpecification::new(plain.object("test_data").unwrap()).namespace(), None);

        let accelerated = model(true);
        let spec = PivotSpecification::new(accelerated.object("test_data").unwrap());
        assert_eq!(spec.namespace(), Some("testmodel"));
        assert_eq!(spec.to_json()["namespace"], "testmodel");
    }

    #[test]
    fn test_failed_add_leaves_specification_unchanged() {
        let model = model(false);
        let mut spec = PivotSpecification::new(model.object("test_data").unwrap());
        spec.add_filter("epsilon", NumberComparison::AtLeast, 2.3).unwrap();
        let before = spec.to_json();

        assert!(spec.add_filter("epsilon", BooleanComparison::Equals, true).is_err());
        assert!(spec.add_row_split("has_boris", "b").is_err());
        assert!(spec.add_cell_value("has_boris", "b", StatsFunction::Count, false).is_err());
        assert!(matches!(
            spec.add_column_split("nope"),
            Err(PivotError::UnknownField { .. })
        ));

        assert_eq!(spec.to_json(), before);
    }

    #[test]
    fn test_duplicate_filters_and_cells_stored_once() {
        let model = model(false);
        let mut spec = PivotSpecification::new(model.object("test_data").unwrap());
        spec.add_filter("has_boris", BooleanComparison::Equals, true)
            .unwrap()
            .add_filter("has_boris", BooleanComparison::Equals, true)
            .unwrap()
            .add_cell_value("epsilon", "Sum", StatsFunction::Sum, false)
            .unwrap()
            .add_cell_value("epsilon", "Sum", StatsFunction::Sum, false)
            .unwrap()
            .add_row_split("epsilon", "e")
            .unwrap()
            .add_row_split("epsilon", "e")
            .unwrap();

        assert_eq!(spec.filters().len(), 1);
        assert_eq!(spec.cells().len(), 1);
        // Splits are ordered, repeats are kept.
        assert_eq!(spec.rows().len(), 2);
    }

    #[test]
    fn test_request_namespace_override() {
        let model = model(true);
        let mut spec = PivotSpecification::new(model.object("test_data").unwrap());
        assert_eq!(spec.request(None).namespace.as_deref(), Some("testmodel"));
        assert_eq!(spec.request(Some("sid=9")).namespace.as_deref(), Some("sid=9"));

        spec.set_acceleration_job("abc");
        assert_eq!(spec.request(None).namespace.as_deref(), Some("sid=abc"));
        assert_eq!(spec.request(None).path(), "datamodel/pivot/testmodel");
    }
}
