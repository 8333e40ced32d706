// tagcloud/src/domain/tag.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Link value meaning "no destination"; rendered as a placeholder anchor.
pub const NO_LINK: &str = "#";

/// Opaque tag identifier, either numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagId {
    Int(i64),
    Str(String),
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagId::Int(id) => write!(f, "{}", id),
            TagId::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for TagId {
    fn from(id: i64) -> Self {
        TagId::Int(id)
    }
}

impl From<i32> for TagId {
    fn from(id: i32) -> Self {
        TagId::Int(id.into())
    }
}

impl From<u64> for TagId {
    fn from(id: u64) -> Self {
        i64::try_from(id)
            .map(TagId::Int)
            .unwrap_or_else(|_| TagId::Str(id.to_string()))
    }
}

impl From<&str> for TagId {
    fn from(id: &str) -> Self {
        TagId::Str(id.to_string())
    }
}

impl FromStr for TagId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::InvalidTag("Tag id cannot be empty".to_string()));
        }
        Ok(s.parse::<i64>()
            .map(TagId::Int)
            .unwrap_or_else(|_| TagId::Str(s.to_string())))
    }
}

impl TagId {
    /// Parse a comma-separated id list, skipping blanks
    pub fn parse_list<S: AsRef<str>>(ids: S) -> DomainResult<Vec<TagId>> {
        ids.as_ref()
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(TagId::from_str)
            .collect()
    }
}

/// A stored tag term as delivered by a tag repository, before link resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TagId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub count: u64,
}

impl Term {
    /// Creates a term, deriving the slug from the name
    pub fn new<S: AsRef<str>>(id: impl Into<TagId>, name: S, count: u64) -> DomainResult<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(DomainError::InvalidTag("Tag name cannot be empty".to_string()));
        }
        Ok(Self {
            id: id.into(),
            name: name.to_string(),
            slug: slugify(name),
            count,
        })
    }

    /// Attach a resolved link, turning the term into a renderable record
    pub fn with_link(self, link: impl Into<String>) -> TagRecord {
        TagRecord {
            id: self.id,
            name: self.name,
            count: self.count,
            link: link.into(),
        }
    }
}

/// A tag ready for rendering: the cloud only reads these
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: TagId,
    pub name: String,
    pub count: u64,
    pub link: String,
}

impl TagRecord {
    pub fn new(
        id: impl Into<TagId>,
        name: impl Into<String>,
        count: u64,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count,
            link: link.into(),
        }
    }

    pub fn has_link(&self) -> bool {
        self.link != NO_LINK
    }
}

/// Lowercased alphanumeric runs joined by '-'
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
