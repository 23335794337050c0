//! notion-filter core - typed filter builders
//!
//! Builds the JSON filter payloads a property-based document database
//! expects in its query endpoint. Each property type gets its own builder
//! exposing only the operations that type supports, so an invalid predicate
//! such as `contains` on a checkbox does not compile.
//!
//! This crate produces data only. It performs no I/O and does not validate
//! values against a live schema.
//!
//! ```
//! use notion_filter_core::prelude::*;
//!
//! let filter = CompoundFilter::and([
//!     AnyFilter::from(CheckboxFilter::new("done").equals(true)),
//!     AnyFilter::from(NumberFilter::new("age").greater_than(18)),
//! ]);
//! assert_eq!(
//!     filter.to_json().unwrap(),
//!     r#"{"and":[{"property":"done","type":"checkbox","equals":true},{"property":"age","type":"number","greater_than":18}]}"#
//! );
//! ```

mod compound;
mod config;
mod dynamic;
mod enums;
mod error;
pub mod ops;
mod special;
mod typed;
mod value;

pub use compound::{AnyFilter, CompoundFilter};
pub use config::{JsonFormat, SerializeOptions};
pub use dynamic::DynamicFilter;
pub use enums::{BoolOperator, Operation, PropertyType, TIMESTAMP_OPS};
pub use error::{FilterError, FilterResult};
pub use ops::{Filter, PropertyFilter};
pub use special::{FormulaFilter, RollupFilter, TimestampFilter};
pub use typed::{
    CheckboxFilter, DateFilter, FilesFilter, MultiSelectFilter, NumberFilter, PeopleFilter,
    RelationFilter, RichTextFilter, SelectFilter, StatusFilter, UniqueIdFilter,
};
pub use value::{FilterObject, FilterValue};

/// Everything needed to build filters, including the operation traits.
pub mod prelude {
    pub use crate::ops::{
        After, Before, Contains, DoesNotContain, DoesNotEqual, EndsWith, Equals, GreaterThan,
        GreaterThanOrEqualTo, IsEmpty, IsNotEmpty, LessThan, LessThanOrEqualTo, StartsWith,
    };
    pub use crate::{
        AnyFilter, BoolOperator, CheckboxFilter, CompoundFilter, DateFilter, DynamicFilter,
        FilesFilter, Filter, FilterError, FilterObject, FilterResult, FilterValue, FormulaFilter,
        JsonFormat, MultiSelectFilter, NumberFilter, Operation, PeopleFilter, PropertyFilter,
        PropertyType, RelationFilter, RichTextFilter, RollupFilter, SelectFilter,
        SerializeOptions, StatusFilter, TimestampFilter, UniqueIdFilter,
    };
}

// ============================================================================
// TESTS
// ============================================================================
