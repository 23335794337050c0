//! Operation primitives
//!
//! Every predicate kind is a one-method trait layered on a sealed key setter.
//! A builder gains an operation by implementing the matching trait, which is
//! how each property type exposes exactly its legal operation set. The setter
//! itself cannot be named outside this crate, so there is no way around the
//! capability traits.

use crate::{FilterObject, FilterResult, FilterValue, Operation, SerializeOptions};

/// Anything that produces a final filter object.
pub trait Filter {
    /// Borrow the filter object built so far.
    fn as_object(&self) -> &FilterObject;

    /// Take ownership of the filter object.
    fn into_object(self) -> FilterObject
    where
        Self: Sized;

    /// Structured mapping form, with keys in insertion order.
    fn to_dict(&self) -> FilterResult<serde_json::Map<String, serde_json::Value>> {
        self.as_object().to_map()
    }

    /// Structured form as a JSON value.
    fn to_value(&self) -> FilterResult<serde_json::Value> {
        self.as_object().to_value()
    }

    /// Compact JSON text.
    fn to_json(&self) -> FilterResult<String> {
        self.to_json_with(&SerializeOptions::default())
    }

    /// JSON text rendered with the given options.
    fn to_json_with(&self, options: &SerializeOptions) -> FilterResult<String> {
        options.render(self.as_object())
    }
}

/// Marker for filters addressed by a `property` name.
///
/// Only these can be nested inside formula and rollup filters.
pub trait PropertyFilter: Filter {}

pub(crate) mod sealed {
    use crate::{Filter, FilterValue, Operation};

    /// Low-level key setter every operation trait delegates to.
    pub trait SetOperation: Filter + Sized {
        /// Set `op` to `value`. A later call with the same `op` overwrites
        /// the earlier value; distinct operations coexist.
        fn set_op(self, op: Operation, value: FilterValue) -> Self;
    }
}

use sealed::SetOperation;

/// Shared body of [`SetOperation::set_op`] for object-backed builders.
pub(crate) fn set_op_on(object: &mut FilterObject, op: Operation, value: FilterValue) {
    tracing::trace!(operation = %op, "Setting filter operation");
    object.insert(op.as_str(), value);
}

pub trait Equals: SetOperation {
    fn equals(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::Equals, value.into())
    }
}

pub trait DoesNotEqual: SetOperation {
    fn does_not_equal(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::DoesNotEqual, value.into())
    }
}

pub trait IsEmpty: SetOperation {
    fn is_empty(self) -> Self {
        self.set_op(Operation::IsEmpty, FilterValue::Bool(true))
    }
}

pub trait IsNotEmpty: SetOperation {
    fn is_not_empty(self) -> Self {
        self.set_op(Operation::IsNotEmpty, FilterValue::Bool(true))
    }
}

pub trait GreaterThan: SetOperation {
    fn greater_than(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::GreaterThan, value.into())
    }
}

pub trait GreaterThanOrEqualTo: SetOperation {
    fn greater_than_or_equal_to(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::GreaterThanOrEqualTo, value.into())
    }
}

pub trait LessThan: SetOperation {
    fn less_than(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::LessThan, value.into())
    }
}

pub trait LessThanOrEqualTo: SetOperation {
    fn less_than_or_equal_to(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::LessThanOrEqualTo, value.into())
    }
}

pub trait Contains: SetOperation {
    fn contains(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::Contains, value.into())
    }
}

pub trait DoesNotContain: SetOperation {
    fn does_not_contain(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::DoesNotContain, value.into())
    }
}

pub trait StartsWith: SetOperation {
    fn starts_with(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::StartsWith, value.into())
    }
}

pub trait EndsWith: SetOperation {
    fn ends_with(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::EndsWith, value.into())
    }
}

/// Date filters only.
pub trait After: SetOperation {
    fn after(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::After, value.into())
    }
}

/// Date filters only.
pub trait Before: SetOperation {
    fn before(self, value: impl Into<FilterValue>) -> Self {
        self.set_op(Operation::Before, value.into())
    }
}
