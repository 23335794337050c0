//! Formula, rollup and timestamp filters
//!
//! Formula and rollup filters carry no operations of their own. They embed a
//! fully built inner property filter, which supplies the predicate:
//!
//! ```text
//! formula: { property, type: "formula", <type_name>: {inner} }
//! rollup:  { property, type: "rollup", <operator>: { <type_name>: {inner} } }
//! ```
//!
//! Timestamp filters target page metadata rather than a property, so they
//! carry a `timestamp` key instead of `property`/`type`.

use crate::ops::sealed::SetOperation;
use crate::ops::set_op_on;
use crate::typed::property_object;
use crate::{
    CheckboxFilter, DateFilter, Filter, FilterObject, FilterValue, NumberFilter, Operation,
    PropertyFilter, PropertyType, RichTextFilter,
};

// ============================================================================
// FORMULA
// ============================================================================

/// Filter on a formula property's computed value.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaFilter {
    object: FilterObject,
}

impl FormulaFilter {
    pub const PROPERTY_TYPE: PropertyType = PropertyType::Formula;

    /// Nest `inner` under `type_name` (`"string"`, `"number"`, `"checkbox"`,
    /// `"date"`). The type name is passed through unchecked.
    pub fn new(
        property: impl Into<String>,
        type_name: impl Into<String>,
        inner: impl PropertyFilter,
    ) -> Self {
        let mut object = property_object(property.into(), Self::PROPERTY_TYPE);
        object.insert(type_name, inner.into_object());
        Self { object }
    }

    /// Formula producing text, filtered with rich-text operations.
    pub fn string(property: impl Into<String>, inner: RichTextFilter) -> Self {
        Self::new(property, "string", inner)
    }

    pub fn number(property: impl Into<String>, inner: NumberFilter) -> Self {
        Self::new(property, "number", inner)
    }

    pub fn checkbox(property: impl Into<String>, inner: CheckboxFilter) -> Self {
        Self::new(property, "checkbox", inner)
    }

    pub fn date(property: impl Into<String>, inner: DateFilter) -> Self {
        Self::new(property, "date", inner)
    }
}

impl Filter for FormulaFilter {
    fn as_object(&self) -> &FilterObject {
        &self.object
    }

    fn into_object(self) -> FilterObject {
        self.object
    }
}

impl PropertyFilter for FormulaFilter {}

// ============================================================================
// ROLLUP
// ============================================================================

/// Filter on a rollup property.
///
/// The inner filter is nested two levels deep: first under the aggregation
/// `operator`, then under `type_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct RollupFilter {
    object: FilterObject,
}

impl RollupFilter {
    pub const PROPERTY_TYPE: PropertyType = PropertyType::Rollup;

    /// `operator` is usually `"any"`, `"every"` or `"none"` for array rollups,
    /// or `"number"`/`"date"` for aggregated ones. Neither argument is checked.
    pub fn new(
        property: impl Into<String>,
        operator: impl Into<String>,
        type_name: impl Into<String>,
        inner: impl PropertyFilter,
    ) -> Self {
        let nested = FilterObject::new().with(type_name, inner.into_object());
        let mut object = property_object(property.into(), Self::PROPERTY_TYPE);
        object.insert(operator, nested);
        Self { object }
    }

    /// Match when any rolled-up item matches `inner`.
    pub fn any(
        property: impl Into<String>,
        type_name: impl Into<String>,
        inner: impl PropertyFilter,
    ) -> Self {
        Self::new(property, "any", type_name, inner)
    }

    /// Match when every rolled-up item matches `inner`.
    pub fn every(
        property: impl Into<String>,
        type_name: impl Into<String>,
        inner: impl PropertyFilter,
    ) -> Self {
        Self::new(property, "every", type_name, inner)
    }

    /// Match when no rolled-up item matches `inner`.
    pub fn none(
        property: impl Into<String>,
        type_name: impl Into<String>,
        inner: impl PropertyFilter,
    ) -> Self {
        Self::new(property, "none", type_name, inner)
    }
}

impl Filter for RollupFilter {
    fn as_object(&self) -> &FilterObject {
        &self.object
    }

    fn into_object(self) -> FilterObject {
        self.object
    }
}

impl PropertyFilter for RollupFilter {}

// ============================================================================
// TIMESTAMP
// ============================================================================

/// Filter on page creation or last-edit time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampFilter {
    object: FilterObject,
}

impl TimestampFilter {
    pub const OPERATIONS: &'static [Operation] = crate::enums::TIMESTAMP_OPS;

    pub fn new(timestamp: impl Into<String>) -> Self {
        let timestamp: String = timestamp.into();
        Self {
            object: FilterObject::new().with("timestamp", timestamp),
        }
    }

    pub fn created_time() -> Self {
        Self::new("created_time")
    }

    pub fn last_edited_time() -> Self {
        Self::new("last_edited_time")
    }

    /// The timestamp being filtered.
    pub fn timestamp(&self) -> &str {
        self.object
            .get("timestamp")
            .and_then(FilterValue::as_str)
            .unwrap_or_default()
    }
}

impl Filter for TimestampFilter {
    fn as_object(&self) -> &FilterObject {
        &self.object
    }

    fn into_object(self) -> FilterObject {
        self.object
    }
}

impl SetOperation for TimestampFilter {
    fn set_op(mut self, op: Operation, value: FilterValue) -> Self {
        set_op_on(&mut self.object, op, value);
        self
    }
}

impl crate::ops::Equals for TimestampFilter {}
impl crate::ops::IsEmpty for TimestampFilter {}
impl crate::ops::IsNotEmpty for TimestampFilter {}

// =============================================================================
// TESTS
// =============================================================================
