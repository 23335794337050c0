//! Runtime-typed property filter
//!
//! [`DynamicFilter`] serves callers that only learn a property's type at
//! runtime (for example from a database schema response). Operations are
//! checked against [`PropertyType::operations`] and rejected with
//! [`FilterError::UnsupportedOperation`] instead of being written.

use crate::ops::set_op_on;
use crate::typed::property_object;
use crate::{
    Filter, FilterError, FilterObject, FilterResult, FilterValue, Operation, PropertyFilter,
    PropertyType,
};

/// Property filter whose type is chosen at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicFilter {
    property_type: PropertyType,
    object: FilterObject,
}

impl DynamicFilter {
    pub fn new(property: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            property_type,
            object: property_object(property.into(), property_type),
        }
    }

    /// Build from a discriminator string such as `"rich_text"`.
    pub fn from_type_name(property: impl Into<String>, type_name: &str) -> FilterResult<Self> {
        let property_type = type_name
            .parse::<PropertyType>()
            .map_err(|reason| FilterError::InvalidValue { reason })?;
        Ok(Self::new(property, property_type))
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// Set `op` to `value` if the property type supports it.
    ///
    /// `is_empty` and `is_not_empty` always store `true`; the given value is
    /// ignored for them.
    pub fn apply(mut self, op: Operation, value: impl Into<FilterValue>) -> FilterResult<Self> {
        if !self.property_type.supports(op) {
            tracing::debug!(
                property_type = %self.property_type,
                operation = %op,
                "Rejected unsupported filter operation"
            );
            return Err(FilterError::UnsupportedOperation {
                property_type: self.property_type,
                operation: op,
            });
        }
        let value = if op.is_unary() {
            FilterValue::Bool(true)
        } else {
            value.into()
        };
        set_op_on(&mut self.object, op, value);
        Ok(self)
    }

    pub fn apply_empty(self) -> FilterResult<Self> {
        self.apply(Operation::IsEmpty, true)
    }

    pub fn apply_not_empty(self) -> FilterResult<Self> {
        self.apply(Operation::IsNotEmpty, true)
    }
}

impl Filter for DynamicFilter {
    fn as_object(&self) -> &FilterObject {
        &self.object
    }

    fn into_object(self) -> FilterObject {
        self.object
    }
}

impl PropertyFilter for DynamicFilter {}

// =============================================================================
// TESTS
// =============================================================================
