//! Fuzz test for filter building and JSON serialization
//!
//! Drives the runtime builder with arbitrary type names, operations and
//! JSON values, then checks that serialization never panics and that the
//! emitted text parses back to the structured mapping.
//!
//! Run with: cargo +nightly fuzz run filter_json_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use notion_filter_core::{
    CompoundFilter, DynamicFilter, Filter, FilterValue, FormulaFilter, Operation, SerializeOptions,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let (head, rest) = data.split_at(2);
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };

    // Line one names the property type; the remainder is a JSON value.
    let (type_name, json) = input.split_once('\n').unwrap_or((input, "null"));
    let Ok(mut filter) = DynamicFilter::from_type_name("fuzz", type_name) else {
        return;
    };

    let value = serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .and_then(|v| FilterValue::try_from(v).ok())
        .unwrap_or(FilterValue::Bool(true));

    for byte in head {
        let op = Operation::ALL[usize::from(*byte) % Operation::ALL.len()];
        match filter.clone().apply(op, value.clone()) {
            Ok(next) => filter = next,
            Err(_) => assert!(!filter.property_type().supports(op)),
        }
    }

    let nested = CompoundFilter::or([FormulaFilter::new("f", type_name, filter.clone())])
        .with(filter);

    // Non-finite floats are the only way serialization may fail.
    if let (Ok(text), Ok(dict)) = (nested.to_json(), nested.to_dict()) {
        let parsed: serde_json::Value =
            serde_json::from_str(&text).expect("emitted JSON must parse");
        assert_eq!(parsed, serde_json::Value::Object(dict));

        let pretty = nested
            .to_json_with(&SerializeOptions::pretty(4))
            .expect("pretty output must succeed when compact does");
        let reparsed: serde_json::Value =
            serde_json::from_str(&pretty).expect("pretty JSON must parse");
        assert_eq!(parsed, reparsed);
    }
});
