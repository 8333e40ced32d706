// tagcloud/src/domain/repositories/repository.rs
use std::fmt::Debug;

use crate::domain::error::DomainResult;
use crate::domain::repositories::query::TagQuery;
use crate::domain::tag::Term;

/// Source of stored tag terms
pub trait TagRepository: Debug + Send + Sync {
    /// Terms matching `query`, filtered, ordered and capped by the repository
    fn get_tags(&self, query: &TagQuery) -> DomainResult<Vec<Term>>;
}

/// Which destination a tag link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// The public archive page of the tag
    #[default]
    View,
    /// The admin page editing the tag
    Edit,
}

impl std::str::FromStr for LinkMode {
    type Err = crate::domain::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(LinkMode::View),
            "edit" => Ok(LinkMode::Edit),
            other => Err(crate::domain::error::DomainError::Other(format!(
                "Unknown link mode: {}",
                other
            ))),
        }
    }
}

/// Maps a stored term to the URL its cloud entry links to
pub trait LinkResolver: Debug + Send + Sync {
    fn resolve(&self, term: &Term, mode: LinkMode) -> DomainResult<String>;

    /// Whether links use descriptive paths rather than query strings
    fn uses_permalinks(&self) -> bool {
        false
    }
}
