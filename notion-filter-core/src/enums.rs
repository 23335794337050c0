//! Enum types for filter discriminators and operations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CORE ENUMS
// ============================================================================

/// Property data type, serialized as the filter's `type` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Checkbox,
    Date,
    Files,
    MultiSelect,
    Number,
    People,
    Relation,
    RichText,
    Select,
    Status,
    UniqueId,
    /// Formula filters wrap an inner filter; no direct operations.
    Formula,
    /// Rollup filters wrap an inner filter; no direct operations.
    Rollup,
}

/// A single predicate kind. The wire key is the snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Equals,
    DoesNotEqual,
    IsEmpty,
    IsNotEmpty,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,
    /// Date only
    After,
    /// Date only
    Before,
}

/// Boolean operator joining the members of a compound filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOperator {
    And,
    Or,
}

// ============================================================================
// CAPABILITY TABLE
// ============================================================================

use Operation::*;

const CHECKBOX_OPS: &[Operation] = &[Equals, DoesNotEqual];
const DATE_OPS: &[Operation] = &[Equals, IsEmpty, IsNotEmpty, After, Before];
const FILES_OPS: &[Operation] = &[IsEmpty, IsNotEmpty];
const MULTI_SELECT_OPS: &[Operation] = &[
    Equals,
    DoesNotEqual,
    IsEmpty,
    IsNotEmpty,
    Contains,
    DoesNotContain,
];
const NUMBER_OPS: &[Operation] = &[
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Equals,
    DoesNotEqual,
    IsEmpty,
    IsNotEmpty,
];
const PEOPLE_OPS: &[Operation] = &[Contains, DoesNotContain, IsEmpty, IsNotEmpty];
const RELATION_OPS: &[Operation] = &[Contains, DoesNotContain, IsEmpty, IsNotEmpty];
const RICH_TEXT_OPS: &[Operation] = &[
    Contains,
    DoesNotContain,
    DoesNotEqual,
    EndsWith,
    Equals,
    StartsWith,
    IsEmpty,
    IsNotEmpty,
];
const SELECT_OPS: &[Operation] = &[Equals, DoesNotEqual, IsEmpty, IsNotEmpty];
const STATUS_OPS: &[Operation] = &[Equals, DoesNotEqual, IsEmpty, IsNotEmpty];
const UNIQUE_ID_OPS: &[Operation] = &[
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Equals,
    DoesNotEqual,
];

/// Operations accepted by timestamp filters (`created_time`, `last_edited_time`).
pub const TIMESTAMP_OPS: &[Operation] = &[Equals, IsEmpty, IsNotEmpty];

impl PropertyType {
    /// Every property type, in declaration order.
    pub const ALL: [PropertyType; 13] = [
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
        PropertyType::Formula,
        PropertyType::Rollup,
    ];

    /// Wire discriminator written to the `type` key.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Checkbox => "checkbox",
            PropertyType::Date => "date",
            PropertyType::Files => "files",
            PropertyType::MultiSelect => "multi_select",
            PropertyType::Number => "number",
            PropertyType::People => "people",
            PropertyType::Relation => "relation",
            PropertyType::RichText => "rich_text",
            PropertyType::Select => "select",
            PropertyType::Status => "status",
            PropertyType::UniqueId => "unique_id",
            PropertyType::Formula => "formula",
            PropertyType::Rollup => "rollup",
        }
    }

    /// Operations legal for this property type.
    ///
    /// Formula and rollup filters take their predicate from an inner filter,
    /// so they expose nothing here.
    pub fn operations(&self) -> &'static [Operation] {
        match self {
            PropertyType::Checkbox => CHECKBOX_OPS,
            PropertyType::Date => DATE_OPS,
            PropertyType::Files => FILES_OPS,
            PropertyType::MultiSelect => MULTI_SELECT_OPS,
            PropertyType::Number => NUMBER_OPS,
            PropertyType::People => PEOPLE_OPS,
            PropertyType::Relation => RELATION_OPS,
            PropertyType::RichText => RICH_TEXT_OPS,
            PropertyType::Select => SELECT_OPS,
            PropertyType::Status => STATUS_OPS,
            PropertyType::UniqueId => UNIQUE_ID_OPS,
            PropertyType::Formula | PropertyType::Rollup => &[],
        }
    }

    /// Check whether `op` is legal for this property type.
    pub fn supports(&self, op: Operation) -> bool {
        self.operations().contains(&op)
    }
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 14] = [
        Equals,
        DoesNotEqual,
        IsEmpty,
        IsNotEmpty,
        GreaterThan,
        GreaterThanOrEqualTo,
        LessThan,
        LessThanOrEqualTo,
        Contains,
        DoesNotContain,
        StartsWith,
        EndsWith,
        After,
        Before,
    ];

    /// Wire key written into the filter object.
    pub fn as_str(&self) -> &'static str {
        match self {
            Equals => "equals",
            DoesNotEqual => "does_not_equal",
            IsEmpty => "is_empty",
            IsNotEmpty => "is_not_empty",
            GreaterThan => "greater_than",
            GreaterThanOrEqualTo => "greater_than_or_equal_to",
            LessThan => "less_than",
            LessThanOrEqualTo => "less_than_or_equal_to",
            Contains => "contains",
            DoesNotContain => "does_not_contain",
            StartsWith => "starts_with",
            EndsWith => "ends_with",
            After => "after",
            Before => "before",
        }
    }

    /// True for operations whose value is always the literal `true`.
    pub fn is_unary(&self) -> bool {
        matches!(self, IsEmpty | IsNotEmpty)
    }
}

impl BoolOperator {
    /// Wire key of the compound filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoolOperator::And => "and",
            BoolOperator::Or => "or",
        }
    }
}

// ============================================================================
// DISPLAY / FROMSTR
// ============================================================================

/// Lowercase and drop separators so `rich_text`, `RichText` and `rich-text`
/// all parse to the same variant.
fn normalize_token(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "checkbox" => Ok(PropertyType::Checkbox),
            "date" => Ok(PropertyType::Date),
            "files" => Ok(PropertyType::Files),
            "multiselect" => Ok(PropertyType::MultiSelect),
            "number" => Ok(PropertyType::Number),
            "people" => Ok(PropertyType::People),
            "relation" => Ok(PropertyType::Relation),
            "richtext" => Ok(PropertyType::RichText),
            "select" => Ok(PropertyType::Select),
            "status" => Ok(PropertyType::Status),
            "uniqueid" => Ok(PropertyType::UniqueId),
            "formula" => Ok(PropertyType::Formula),
            "rollup" => Ok(PropertyType::Rollup),
            _ => Err(format!("Invalid PropertyType: {}", s)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "equals" => Ok(Equals),
            "doesnotequal" => Ok(DoesNotEqual),
            "isempty" => Ok(IsEmpty),
            "isnotempty" => Ok(IsNotEmpty),
            "greaterthan" => Ok(GreaterThan),
            "greaterthanorequalto" => Ok(GreaterThanOrEqualTo),
            "lessthan" => Ok(LessThan),
            "lessthanorequalto" => Ok(LessThanOrEqualTo),
            "contains" => Ok(Contains),
            "doesnotcontain" => Ok(DoesNotContain),
            "startswith" => Ok(StartsWith),
            "endswith" => Ok(EndsWith),
            "after" => Ok(After),
            "before" => Ok(Before),
            _ => Err(format!("Invalid Operation: {}", s)),
        }
    }
}

impl fmt::Display for BoolOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BoolOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "and" => Ok(BoolOperator::And),
            "or" => Ok(BoolOperator::Or),
            _ => Err(format!("Invalid BoolOperator: {}", s)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_roundtrip() {
        for ty in PropertyType::ALL {
            let parsed: PropertyType = ty.as_str().parse().unwrap();
            assert_eq!(ty, parsed);
        }
    }

    #[test]
    fn test_operation_roundtrip() {
        for op in Operation::ALL {
            let parsed: Operation = op.to_string().parse().unwrap();
            assert_eq!(op, parsed);
        }
    }

    #[test]
    fn test_from_str_accepts_loose_spelling() {
        assert_eq!("RichText".parse::<PropertyType>(), Ok(PropertyType::RichText));
        assert_eq!("multi-select".parse::<PropertyType>(), Ok(PropertyType::MultiSelect));
        assert_eq!("Greater Than".parse::<Operation>(), Ok(Operation::GreaterThan));
        assert_eq!("OR".parse::<BoolOperator>(), Ok(BoolOperator::Or));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("title".parse::<PropertyType>().is_err());
        assert!("matches".parse::<Operation>().is_err());
        assert!("not".parse::<BoolOperator>().is_err());
    }

    #[test]
    fn test_serde_names_match_wire_keys() {
        for ty in PropertyType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
        for op in Operation::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
        }
        assert_eq!(serde_json::to_string(&BoolOperator::And).unwrap(), "\"and\"");
    }

    #[test]
    fn test_capability_table() {
        assert!(PropertyType::Checkbox.supports(Operation::Equals));
        assert!(!PropertyType::Checkbox.supports(Operation::Contains));
        assert!(PropertyType::Date.supports(Operation::After));
        assert!(!PropertyType::Number.supports(Operation::After));
        assert!(!PropertyType::UniqueId.supports(Operation::IsEmpty));
        assert_eq!(PropertyType::Files.operations(), &[Operation::IsEmpty, Operation::IsNotEmpty]);
        assert!(PropertyType::Formula.operations().is_empty());
        assert!(PropertyType::Rollup.operations().is_empty());
    }

    #[test]
    fn test_after_before_are_date_only() {
        for ty in PropertyType::ALL {
            let date_only = ty.supports(Operation::After) || ty.supports(Operation::Before);
            assert_eq!(date_only, ty == PropertyType::Date, "{ty}");
        }
    }

    #[test]
    fn test_unary_operations() {
        let unary: Vec<_> = Operation::ALL.iter().filter(|op| op.is_unary()).collect();
        assert_eq!(unary, vec![&Operation::IsEmpty, &Operation::IsNotEmpty]);
    }
}
