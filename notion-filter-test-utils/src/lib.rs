//! notion-filter Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Proptest generators for values, operations and filters
//! - Test fixtures for common query shapes
//! - Assertions for filter payloads and errors

pub use notion_filter_core::prelude::*;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating filters.

    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Property types that accept direct operations.
    pub const OPERABLE_TYPES: [PropertyType; 11] = [
        PropertyType::Checkbox,
        PropertyType::Date,
        PropertyType::Files,
        PropertyType::MultiSelect,
        PropertyType::Number,
        PropertyType::People,
        PropertyType::Relation,
        PropertyType::RichText,
        PropertyType::Select,
        PropertyType::Status,
        PropertyType::UniqueId,
    ];

    /// Generate a property name, including spaces and non-ASCII letters.
    pub fn arb_property_name() -> impl Strategy<Value = String> {
        "[A-Za-zÄÖÜäöü][A-Za-z0-9 _äöü]{0,15}"
    }

    /// Generate a PropertyType that accepts direct operations.
    pub fn arb_operable_type() -> impl Strategy<Value = PropertyType> {
        prop::sample::select(OPERABLE_TYPES.to_vec())
    }

    /// Generate any Operation.
    pub fn arb_operation() -> impl Strategy<Value = Operation> {
        prop::sample::select(Operation::ALL.to_vec())
    }

    /// Generate an operation legal for `ty`.
    pub fn arb_operation_for(ty: PropertyType) -> impl Strategy<Value = Operation> {
        prop::sample::select(ty.operations().to_vec())
    }

    /// Generate a leaf FilterValue.
    ///
    /// Floats are multiples of 1/4 so they survive a text round trip exactly.
    pub fn arb_scalar_value() -> impl Strategy<Value = FilterValue> {
        prop_oneof![
            any::<bool>().prop_map(FilterValue::Bool),
            any::<i64>().prop_map(FilterValue::Int),
            (-4_000_000i32..4_000_000).prop_map(|n| FilterValue::Float(f64::from(n) / 4.0)),
            ".{0,24}".prop_map(FilterValue::Text),
            any::<[u8; 16]>().prop_map(|b| FilterValue::from(Uuid::from_bytes(b))),
            (2000i32..2100, 1u32..13, 1u32..29).prop_map(|(y, m, d)| {
                match chrono::NaiveDate::from_ymd_opt(y, m, d) {
                    Some(date) => FilterValue::from(date),
                    None => FilterValue::Text(format!("{y:04}-{m:02}-{d:02}")),
                }
            }),
        ]
    }

    /// Generate a FilterValue, nesting arrays and objects a few levels deep.
    pub fn arb_filter_value() -> impl Strategy<Value = FilterValue> {
        arb_scalar_value().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(FilterValue::Array),
                prop::collection::vec(("[a-z_]{1,8}", inner), 0..4).prop_map(|entries| {
                    FilterValue::Object(entries.into_iter().collect())
                }),
            ]
        })
    }

    /// Generate a runtime-typed filter with one to four legal operations.
    pub fn arb_dynamic_filter() -> impl Strategy<Value = DynamicFilter> {
        (arb_property_name(), arb_operable_type()).prop_flat_map(|(name, ty)| {
            prop::collection::vec((arb_operation_for(ty), arb_filter_value()), 1..5).prop_map(
                move |ops| {
                    let mut filter = DynamicFilter::new(name.clone(), ty);
                    for (op, value) in ops {
                        filter = match filter.clone().apply(op, value) {
                            Ok(next) => next,
                            Err(_) => filter,
                        };
                    }
                    filter
                },
            )
        })
    }

    /// Generate a number filter through the typed builder.
    pub fn arb_number_filter() -> impl Strategy<Value = NumberFilter> {
        (arb_property_name(), any::<i64>(), any::<i64>(), any::<bool>()).prop_map(
            |(name, lo, hi, empty)| {
                let filter = NumberFilter::new(name).greater_than(lo).less_than_or_equal_to(hi);
                if empty {
                    filter.is_not_empty()
                } else {
                    filter
                }
            },
        )
    }

    /// Generate a timestamp filter.
    pub fn arb_timestamp_filter() -> impl Strategy<Value = TimestampFilter> {
        (
            prop_oneof![Just("created_time"), Just("last_edited_time")],
            arb_scalar_value(),
        )
            .prop_map(|(ts, value)| TimestampFilter::new(ts).equals(value))
    }

    /// Generate a formula or rollup filter wrapping a dynamic filter.
    pub fn arb_nested_filter() -> impl Strategy<Value = AnyFilter> {
        (
            arb_property_name(),
            "[a-z]{1,10}",
            arb_dynamic_filter(),
            prop_oneof![Just("any"), Just("every"), Just("none")],
            any::<bool>(),
        )
            .prop_map(|(name, type_name, inner, op, formula)| {
                if formula {
                    FormulaFilter::new(name, type_name, inner).into()
                } else {
                    RollupFilter::new(name, op, type_name, inner).into()
                }
            })
    }

    /// Generate a leaf (non-compound) filter of any kind.
    pub fn arb_leaf_filter() -> impl Strategy<Value = AnyFilter> {
        prop_oneof![
            4 => arb_dynamic_filter().prop_map(AnyFilter::from),
            1 => arb_number_filter().prop_map(AnyFilter::from),
            1 => arb_timestamp_filter().prop_map(AnyFilter::from),
            2 => arb_nested_filter(),
        ]
    }

    /// Generate a filter tree mixing compound and leaf filters.
    pub fn arb_any_filter() -> impl Strategy<Value = AnyFilter> {
        arb_leaf_filter().prop_recursive(4, 32, 4, |inner| {
            (
                prop_oneof![Just(BoolOperator::And), Just(BoolOperator::Or)],
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(op, members)| CompoundFilter::new(op, members).into())
        })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built filters for common query shapes.

    use super::*;

    /// `done == true`
    pub fn done_checkbox() -> CheckboxFilter {
        CheckboxFilter::new("done").equals(true)
    }

    /// `age > 18`
    pub fn adult_number() -> NumberFilter {
        NumberFilter::new("age").greater_than(18)
    }

    /// Open tasks due before a date, owned by someone.
    pub fn open_tasks_due(before: &str) -> CompoundFilter {
        CompoundFilter::and([
            AnyFilter::from(StatusFilter::new("Status").does_not_equal("Done")),
            AnyFilter::from(DateFilter::new("Due").before(before)),
            AnyFilter::from(PeopleFilter::new("Assignee").is_not_empty()),
        ])
    }

    /// One instance of every filter kind.
    pub fn every_kind() -> Vec<AnyFilter> {
        vec![
            done_checkbox().into(),
            DateFilter::new("Due").after("2024-01-01").into(),
            FilesFilter::new("Files").is_empty().into(),
            MultiSelectFilter::new("Tags").contains("rust").into(),
            adult_number().into(),
            PeopleFilter::new("Owner").does_not_contain("user-1").into(),
            RelationFilter::new("Project").contains("page-1").into(),
            RichTextFilter::new("Name").starts_with("Intro").into(),
            SelectFilter::new("Priority").equals("High").into(),
            StatusFilter::new("Status").is_not_empty().into(),
            UniqueIdFilter::new("ID").less_than_or_equal_to(100).into(),
            FormulaFilter::number("Score", NumberFilter::new("Score").equals(5)).into(),
            RollupFilter::any("Tasks", "checkbox", done_checkbox()).into(),
            TimestampFilter::created_time().equals("2024-05-01").into(),
            open_tasks_due("2025-01-01").into(),
            DynamicFilter::new("Stage", PropertyType::Select)
                .apply_empty()
                .map(AnyFilter::from)
                .unwrap_or_else(|err| panic!("select supports is_empty: {err}")),
        ]
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertion helpers for filter payloads.

    use super::*;

    /// Assert that a filter serializes to exactly `expected` (compact JSON).
    #[track_caller]
    pub fn assert_json<F: Filter>(filter: &F, expected: &str) {
        match filter.to_json() {
            Ok(text) => assert_eq!(text, expected, "Unexpected filter JSON"),
            Err(err) => panic!("Expected JSON {}, got error: {}", expected, err),
        }
    }

    /// Assert that parsing the JSON text gives back the structured mapping.
    #[track_caller]
    pub fn assert_round_trip<F: Filter>(filter: &F) {
        let text = filter
            .to_json()
            .unwrap_or_else(|err| panic!("to_json failed: {}", err));
        let dict = filter
            .to_dict()
            .unwrap_or_else(|err| panic!("to_dict failed: {}", err));
        let parsed: serde_json::Value = serde_json::from_str(&text)
            .unwrap_or_else(|err| panic!("output is not valid JSON: {}", err));
        assert_eq!(parsed, serde_json::Value::Object(dict), "JSON text and mapping differ");
    }

    /// Assert the filter's key order.
    #[track_caller]
    pub fn assert_keys<F: Filter>(filter: &F, expected: &[&str]) {
        let keys: Vec<&str> = filter.as_object().keys().collect();
        assert_eq!(keys, expected, "Unexpected filter keys");
    }

    /// Assert that a FilterResult is an UnsupportedOperation error.
    #[track_caller]
    pub fn assert_unsupported<T: std::fmt::Debug>(
        result: &FilterResult<T>,
        property_type: PropertyType,
        operation: Operation,
    ) {
        match result {
            Err(FilterError::UnsupportedOperation {
                property_type: ty,
                operation: op,
            }) => {
                assert_eq!(*ty, property_type, "Wrong property type in error");
                assert_eq!(*op, operation, "Wrong operation in error");
            }
            other => panic!(
                "Expected UnsupportedOperation({}, {}), got: {:?}",
                property_type, operation, other
            ),
        }
    }

    /// Assert that a FilterResult is a Serialization error.
    #[track_caller]
    pub fn assert_serialization_error<T: std::fmt::Debug>(result: &FilterResult<T>) {
        match result {
            Err(FilterError::Serialization { .. }) => {}
            other => panic!("Expected Serialization error, got: {:?}", other),
        }
    }
}
