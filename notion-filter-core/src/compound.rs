//! Compound filters and the heterogeneous filter wrapper

use crate::{
    BoolOperator, CheckboxFilter, DateFilter, DynamicFilter, FilesFilter, Filter, FilterObject,
    FilterValue, FormulaFilter, MultiSelectFilter, NumberFilter, PeopleFilter, RelationFilter,
    RichTextFilter, RollupFilter, SelectFilter, StatusFilter, TimestampFilter, UniqueIdFilter,
};

// ============================================================================
// COMPOUND FILTER
// ============================================================================

/// Boolean combination of filters: `{ <operator>: [f1, f2, ...] }`.
///
/// Members are copied in as finished filter objects and keep their input
/// order. The operator string is not restricted to `and`/`or`; use
/// [`CompoundFilter::and`] or [`CompoundFilter::or`] for the checked forms.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundFilter {
    operator: String,
    object: FilterObject,
}

impl CompoundFilter {
    pub fn new<I>(operator: impl Into<String>, filters: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyFilter>,
    {
        let operator = operator.into();
        let members: Vec<FilterValue> = filters
            .into_iter()
            .map(|f| FilterValue::Object(Into::<AnyFilter>::into(f).into_object()))
            .collect();
        tracing::debug!(
            operator = %operator,
            members = members.len(),
            "Composed compound filter"
        );
        let object = FilterObject::new().with(operator.clone(), FilterValue::Array(members));
        Self { operator, object }
    }

    /// All members must match.
    pub fn and<I>(filters: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyFilter>,
    {
        Self::new(BoolOperator::And, filters)
    }

    /// At least one member must match.
    pub fn or<I>(filters: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyFilter>,
    {
        Self::new(BoolOperator::Or, filters)
    }

    /// Append one more member.
    pub fn push(&mut self, filter: impl Into<AnyFilter>) {
        let filter: AnyFilter = filter.into();
        let member = FilterValue::Object(filter.into_object());
        if let Some(FilterValue::Array(members)) = self.object.get_mut(&self.operator) {
            members.push(member);
        }
    }

    /// Builder-style [`CompoundFilter::push`].
    pub fn with(mut self, filter: impl Into<AnyFilter>) -> Self {
        self.push(filter);
        self
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Member filter objects, in order.
    pub fn members(&self) -> impl Iterator<Item = &FilterObject> {
        let members: &[FilterValue] = match self.object.get(&self.operator) {
            Some(FilterValue::Array(members)) => members,
            _ => &[],
        };
        members.iter().filter_map(FilterValue::as_object)
    }

    pub fn len(&self) -> usize {
        self.members().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Filter for CompoundFilter {
    fn as_object(&self) -> &FilterObject {
        &self.object
    }

    fn into_object(self) -> FilterObject {
        self.object
    }
}

impl From<BoolOperator> for String {
    fn from(op: BoolOperator) -> Self {
        op.as_str().to_string()
    }
}

// ============================================================================
// ANY FILTER
// ============================================================================

macro_rules! any_filter {
    ($($variant:ident($inner:ty)),* $(,)?) => {
        /// Any finished filter, for building heterogeneous member lists.
        #[derive(Debug, Clone, PartialEq)]
        pub enum AnyFilter {
            $($variant($inner),)*
            /// A pre-built filter object, passed through as-is.
            Object(FilterObject),
        }

        $(
            impl From<$inner> for AnyFilter {
                fn from(filter: $inner) -> Self {
                    AnyFilter::$variant(filter)
                }
            }
        )*

        impl Filter for AnyFilter {
            fn as_object(&self) -> &FilterObject {
                match self {
                    $(AnyFilter::$variant(f) => f.as_object(),)*
                    AnyFilter::Object(obj) => obj,
                }
            }

            fn into_object(self) -> FilterObject {
                match self {
                    $(AnyFilter::$variant(f) => f.into_object(),)*
                    AnyFilter::Object(obj) => obj,
                }
            }
        }
    };
}

any_filter! {
    Checkbox(CheckboxFilter),
    Date(DateFilter),
    Files(FilesFilter),
    MultiSelect(MultiSelectFilter),
    Number(NumberFilter),
    People(PeopleFilter),
    Relation(RelationFilter),
    RichText(RichTextFilter),
    Select(SelectFilter),
    Status(StatusFilter),
    UniqueId(UniqueIdFilter),
    Formula(FormulaFilter),
    Rollup(RollupFilter),
    Timestamp(TimestampFilter),
    Compound(CompoundFilter),
    Dynamic(DynamicFilter),
}

impl From<FilterObject> for AnyFilter {
    fn from(obj: FilterObject) -> Self {
        AnyFilter::Object(obj)
    }
}

// =============================================================================
// TESTS
// =============================================================================
