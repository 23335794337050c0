//! Typed property filter builders
//!
//! One builder per property type. Each is generated by [`typed_filter!`] from
//! its discriminator and the list of operation traits it implements, so the
//! public surface of a builder is exactly its capability set.

use crate::ops::sealed::SetOperation;
use crate::ops::set_op_on;
use crate::{Filter, FilterObject, FilterValue, Operation, PropertyType};

/// Declare a property filter builder.
///
/// ```ignore
/// typed_filter! {
///     /// Filter on a checkbox property.
///     CheckboxFilter => Checkbox: [Equals, DoesNotEqual]
/// }
/// ```
///
/// Each listed name is both an operation trait in [`crate::ops`] and an
/// [`Operation`] variant.
macro_rules! typed_filter {
    ($(#[$meta:meta])* $name:ident => $ty:ident: [$($op:ident),* $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            object: FilterObject,
        }

        impl $name {
            /// Discriminator written to the `type` key.
            pub const PROPERTY_TYPE: PropertyType = PropertyType::$ty;

            /// Operations this builder exposes.
            pub const OPERATIONS: &'static [Operation] = &[$(Operation::$op),*];

            pub fn new(property: impl Into<String>) -> Self {
                Self {
                    object: property_object(property.into(), Self::PROPERTY_TYPE),
                }
            }

            /// Name of the filtered property.
            pub fn property(&self) -> &str {
                self.object
                    .get("property")
                    .and_then(FilterValue::as_str)
                    .unwrap_or_default()
            }
        }

        impl Filter for $name {
            fn as_object(&self) -> &FilterObject {
                &self.object
            }

            fn into_object(self) -> FilterObject {
                self.object
            }
        }

        impl $crate::PropertyFilter for $name {}

        impl SetOperation for $name {
            fn set_op(mut self, op: Operation, value: FilterValue) -> Self {
                set_op_on(&mut self.object, op, value);
                self
            }
        }

        $(impl $crate::ops::$op for $name {})*
    };
}

/// `{"property": <name>, "type": <discriminator>}`, in that order.
pub(crate) fn property_object(property: String, ty: PropertyType) -> FilterObject {
    FilterObject::new()
        .with("property", property)
        .with("type", ty.as_str())
}

typed_filter! {
    /// Filter on a checkbox property.
    ///
    /// Only equality is available:
    ///
    /// ```
    /// use notion_filter_core::prelude::*;
    ///
    /// let filter = CheckboxFilter::new("done").does_not_equal(true);
    /// assert_eq!(filter.as_object().len(), 3);
    /// ```
    ///
    /// Other operations are not callable:
    ///
    /// ```compile_fail
    /// use notion_filter_core::prelude::*;
    ///
    /// let filter = CheckboxFilter::new("done").contains(1);
    /// ```
    ///
    /// ```compile_fail
    /// use notion_filter_core::prelude::*;
    ///
    /// let filter = CheckboxFilter::new("done").is_empty();
    /// ```
    CheckboxFilter => Checkbox: [Equals, DoesNotEqual]
}

typed_filter! {
    /// Filter on a date property.
    DateFilter => Date: [Equals, IsEmpty, IsNotEmpty, After, Before]
}

typed_filter! {
    /// Filter on a files property.
    FilesFilter => Files: [IsEmpty, IsNotEmpty]
}

typed_filter! {
    /// Filter on a multi-select property.
    MultiSelectFilter => MultiSelect: [
        Equals,
        DoesNotEqual,
        IsEmpty,
        IsNotEmpty,
        Contains,
        DoesNotContain,
    ]
}

typed_filter! {
    /// Filter on a number property.
    NumberFilter => Number: [
        GreaterThan,
        GreaterThanOrEqualTo,
        LessThan,
        LessThanOrEqualTo,
        Equals,
        DoesNotEqual,
        IsEmpty,
        IsNotEmpty,
    ]
}

typed_filter! {
    /// Filter on a people property. Values are user ids.
    PeopleFilter => People: [Contains, DoesNotContain, IsEmpty, IsNotEmpty]
}

typed_filter! {
    /// Filter on a relation property. Values are page ids.
    RelationFilter => Relation: [Contains, DoesNotContain, IsEmpty, IsNotEmpty]
}

typed_filter! {
    /// Filter on a rich text (or title) property.
    RichTextFilter => RichText: [
        Contains,
        DoesNotContain,
        DoesNotEqual,
        EndsWith,
        Equals,
        StartsWith,
        IsEmpty,
        IsNotEmpty,
    ]
}

typed_filter! {
    /// Filter on a select property.
    SelectFilter => Select: [Equals, DoesNotEqual, IsEmpty, IsNotEmpty]
}

typed_filter! {
    /// Filter on a status property.
    StatusFilter => Status: [Equals, DoesNotEqual, IsEmpty, IsNotEmpty]
}

typed_filter! {
    /// Filter on a unique id property.
    UniqueIdFilter => UniqueId: [
        GreaterThan,
        GreaterThanOrEqualTo,
        LessThan,
        LessThanOrEqualTo,
        Equals,
        DoesNotEqual,
    ]
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::*;
    use serde_json::json;

    #[test]
    fn test_checkbox_equals() {
        let filter = CheckboxFilter::new("done").equals(true);
        assert_eq!(
            filter.to_json().unwrap(),
            r#"{"property":"done","type":"checkbox","equals":true}"#
        );
        assert_eq!(filter.property(), "done");
    }

    #[test]
    fn test_construction_sets_property_then_type() {
        let filter = StatusFilter::new("Stage");
        let keys: Vec<_> = filter.as_object().keys().collect();
        assert_eq!(keys, vec!["property", "type"]);
        assert_eq!(
            filter.to_value().unwrap(),
            json!({"property": "Stage", "type": "status"})
        );
    }

    #[test]
    fn test_number_range_keeps_both_keys() {
        let filter = NumberFilter::new("x").greater_than(5).less_than(10);
        assert_eq!(
            filter.to_json().unwrap(),
            r#"{"property":"x","type":"number","greater_than":5,"less_than":10}"#
        );
    }

    #[test]
    fn test_same_operation_overwrites() {
        let filter = NumberFilter::new("x").equals(1).less_than(3).equals(2);
        assert_eq!(
            filter.to_value().unwrap(),
            json!({"property": "x", "type": "number", "equals": 2, "less_than": 3})
        );
    }

    #[test]
    fn test_is_empty_always_true() {
        let filter = FilesFilter::new("Attachments").is_empty();
        assert_eq!(
            filter.to_value().unwrap(),
            json!({"property": "Attachments", "type": "files", "is_empty": true})
        );

        let filter = SelectFilter::new("Tag").equals("a").is_not_empty();
        assert_eq!(filter.as_object().get("is_not_empty"), Some(&FilterValue::Bool(true)));
        assert_eq!(filter.as_object().get("equals").and_then(FilterValue::as_str), Some("a"));
    }

    #[test]
    fn test_date_after_before() {
        let filter = DateFilter::new("Due")
            .after("2024-01-01")
            .before("2024-12-31");
        assert_eq!(
            filter.to_json().unwrap(),
            r#"{"property":"Due","type":"date","after":"2024-01-01","before":"2024-12-31"}"#
        );
    }

    #[test]
    fn test_date_accepts_chrono_values() {
        let day = chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let filter = DateFilter::new("Due").equals(day);
        assert_eq!(filter.to_value().unwrap()["equals"], json!("2024-02-29"));
    }

    #[test]
    fn test_rich_text_operations() {
        let filter = RichTextFilter::new("Name")
            .starts_with("Re")
            .ends_with("port")
            .does_not_contain("draft");
        assert_eq!(
            filter.to_value().unwrap(),
            json!({
                "property": "Name",
                "type": "rich_text",
                "starts_with": "Re",
                "ends_with": "port",
                "does_not_contain": "draft"
            })
        );
    }

    #[test]
    fn test_people_and_relation_accept_uuids() {
        let id = uuid::Uuid::nil();
        let people = PeopleFilter::new("Owner").contains(id);
        let relation = RelationFilter::new("Project").does_not_contain(id);
        assert_eq!(
            people.to_value().unwrap()["contains"],
            json!("00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(relation.to_value().unwrap()["type"], json!("relation"));
    }

    #[test]
    fn test_values_are_not_coerced() {
        // A string on a number filter passes through untouched.
        let filter = UniqueIdFilter::new("ID").greater_than_or_equal_to("42");
        assert_eq!(filter.to_value().unwrap()["greater_than_or_equal_to"], json!("42"));

        let filter = MultiSelectFilter::new("Tags").does_not_equal(3.5);
        assert_eq!(filter.to_value().unwrap()["does_not_equal"], json!(3.5));
    }

    #[test]
    fn test_discriminators() {
        assert_eq!(CheckboxFilter::PROPERTY_TYPE.as_str(), "checkbox");
        assert_eq!(DateFilter::PROPERTY_TYPE.as_str(), "date");
        assert_eq!(FilesFilter::PROPERTY_TYPE.as_str(), "files");
        assert_eq!(MultiSelectFilter::PROPERTY_TYPE.as_str(), "multi_select");
        assert_eq!(NumberFilter::PROPERTY_TYPE.as_str(), "number");
        assert_eq!(PeopleFilter::PROPERTY_TYPE.as_str(), "people");
        assert_eq!(RelationFilter::PROPERTY_TYPE.as_str(), "relation");
        assert_eq!(RichTextFilter::PROPERTY_TYPE.as_str(), "rich_text");
        assert_eq!(SelectFilter::PROPERTY_TYPE.as_str(), "select");
        assert_eq!(StatusFilter::PROPERTY_TYPE.as_str(), "status");
        assert_eq!(UniqueIdFilter::PROPERTY_TYPE.as_str(), "unique_id");
    }

    #[test]
    fn test_typed_surface_matches_capability_table() {
        let builders: [(PropertyType, &[Operation]); 11] = [
            (CheckboxFilter::PROPERTY_TYPE, CheckboxFilter::OPERATIONS),
            (DateFilter::PROPERTY_TYPE, DateFilter::OPERATIONS),
            (FilesFilter::PROPERTY_TYPE, FilesFilter::OPERATIONS),
            (MultiSelectFilter::PROPERTY_TYPE, MultiSelectFilter::OPERATIONS),
            (NumberFilter::PROPERTY_TYPE, NumberFilter::OPERATIONS),
            (PeopleFilter::PROPERTY_TYPE, PeopleFilter::OPERATIONS),
            (RelationFilter::PROPERTY_TYPE, RelationFilter::OPERATIONS),
            (RichTextFilter::PROPERTY_TYPE, RichTextFilter::OPERATIONS),
            (SelectFilter::PROPERTY_TYPE, SelectFilter::OPERATIONS),
            (StatusFilter::PROPERTY_TYPE, StatusFilter::OPERATIONS),
            (UniqueIdFilter::PROPERTY_TYPE, UniqueIdFilter::OPERATIONS),
        ];
        for (ty, ops) in builders {
            assert_eq!(ty.operations(), ops, "capability mismatch for {ty}");
        }
    }
}
