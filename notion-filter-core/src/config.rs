//! Serialization options

use crate::{FilterError, FilterResult};
use serde::{Deserialize, Serialize};

/// Text layout of the JSON output. Formatting never changes the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JsonFormat {
    /// Single line, no whitespace
    #[default]
    Compact,
    /// One key per line, indented by `indent` spaces per level
    Pretty { indent: usize },
}

/// Options applied when rendering a filter to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SerializeOptions {
    pub format: JsonFormat,
}

impl SerializeOptions {
    /// Compact single-line output.
    pub fn compact() -> Self {
        Self {
            format: JsonFormat::Compact,
        }
    }

    /// Pretty output with the given indent width.
    pub fn pretty(indent: usize) -> Self {
        Self {
            format: JsonFormat::Pretty { indent },
        }
    }

    /// Render any serializable value with these options.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> FilterResult<String> {
        self.render_text(value).map_err(|err| {
            tracing::warn!(
                error = %err,
                format = ?self.format,
                "Filter could not be rendered as JSON"
            );
            err
        })
    }

    fn render_text<T: Serialize + ?Sized>(&self, value: &T) -> FilterResult<String> {
        let text = match self.format {
            JsonFormat::Compact => serde_json::to_string(value)?,
            JsonFormat::Pretty { indent } => {
                let indent = " ".repeat(indent);
                let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
                let mut buf = Vec::new();
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
                value.serialize(&mut ser)?;
                // serde_json only ever writes valid UTF-8
                String::from_utf8(buf).map_err(|err| FilterError::Serialization {
                    reason: err.to_string(),
                })?
            }
        };
        Ok(text)
    }
}

// =============================================================================
// TESTS
// =============================================================================
