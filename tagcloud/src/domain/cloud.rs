// tagcloud/src/domain/cloud.rs
use std::fmt;
use std::str::FromStr;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::domain::count_text::{CountLabel, DEFAULT_THOUSANDS_SEP};
use crate::domain::error::DomainError;

/// Output shape of a rendered cloud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Flat,
    List,
    /// Unjoined entries; `array` is accepted as an alias
    #[serde(alias = "array")]
    Structured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Name,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
    #[serde(alias = "rand")]
    Random,
}

impl FromStr for Format {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(Format::Flat),
            "list" => Ok(Format::List),
            "structured" | "array" => Ok(Format::Structured),
            other => Err(DomainError::Other(format!("Unknown format: {}", other))),
        }
    }
}

impl FromStr for OrderBy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(OrderBy::Name),
            "count" => Ok(OrderBy::Count),
            other => Err(DomainError::Other(format!("Unknown orderby: {}", other))),
        }
    }
}

impl FromStr for Order {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Order::Ascending),
            "desc" | "descending" => Ok(Order::Descending),
            "rand" | "random" => Ok(Order::Random),
            other => Err(DomainError::Other(format!("Unknown order: {}", other))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Flat => write!(f, "flat"),
            Format::List => write!(f, "list"),
            Format::Structured => write!(f, "structured"),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBy::Name => write!(f, "name"),
            OrderBy::Count => write!(f, "count"),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Ascending => write!(f, "ascending"),
            Order::Descending => write!(f, "descending"),
            Order::Random => write!(f, "random"),
        }
    }
}

/// Settings for a single render call.
///
/// Unset fields take the defaults below; callers override field by field
/// through [`RenderConfigBuilder`].
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct RenderConfig {
    /// Font size of the least used tag
    #[builder(default = "8.0")]
    pub smallest: f64,

    /// Font size of the most used tag
    #[builder(default = "22.0")]
    pub largest: f64,

    /// CSS unit appended to every size, verbatim
    #[builder(default = "\"pt\".to_string()")]
    pub unit: String,

    /// Entries kept after ordering, 0 keeps all
    #[builder(default = "0")]
    pub number: usize,

    #[builder(default)]
    pub format: Format,

    #[builder(default)]
    pub order_by: OrderBy,

    #[builder(default)]
    pub order: Order,

    /// Tooltip producer; wins over the text templates when set
    #[builder(default, setter(strip_option))]
    pub count_label: Option<CountLabel>,

    #[builder(default, setter(strip_option))]
    pub single_text: Option<String>,

    #[builder(default, setter(strip_option))]
    pub multiple_text: Option<String>,

    /// Extra keyword appended to `rel="nofollow"`
    #[builder(default, setter(strip_option))]
    pub rel_addendum: Option<String>,

    /// Joins entries in the flat format
    #[builder(default = "\"\\n\".to_string()")]
    pub separator: String,

    #[builder(default = "DEFAULT_THOUSANDS_SEP.to_string()")]
    pub thousands_sep: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            smallest: 8.0,
            largest: 22.0,
            unit: "pt".to_string(),
            number: 0,
            format: Format::Flat,
            order_by: OrderBy::Name,
            order: Order::Ascending,
            count_label: None,
            single_text: None,
            multiple_text: None,
            rel_addendum: None,
            separator: "\n".to_string(),
            thousands_sep: DEFAULT_THOUSANDS_SEP.to_string(),
        }
    }
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// Explicit callback, else both text templates, else "N topics"
    pub fn resolve_count_label(&self) -> CountLabel {
        if let Some(label) = &self.count_label {
            return label.clone();
        }
        match (&self.single_text, &self.multiple_text) {
            (Some(single), Some(multiple)) => {
                CountLabel::from_templates(single, multiple, &self.thousands_sep)
            }
            _ => CountLabel::topics(&self.thousands_sep),
        }
    }

    /// The `rel` attribute value: always nofollow, plus the addendum if any
    pub fn rel_value(&self) -> String {
        match self.rel_addendum.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("nofollow {}", extra),
            _ => "nofollow".to_string(),
        }
    }
}
