// tagcloud/src/infrastructure/repositories/json_tag_repository.rs
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::query::TagQuery;
use crate::domain::repositories::repository::TagRepository;
use crate::domain::tag::{slugify, TagId, Term};
use crate::infrastructure::error::InfrastructureError;

#[derive(Deserialize)]
struct JsonTerm {
    id: TagId,
    name: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    count: u64,
}

/// Tag terms loaded from a JSON array of `{id, name, slug?, count}` objects
#[derive(Debug, Clone)]
pub struct JsonTagRepository {
    terms: Vec<Term>,
}

impl JsonTagRepository {
    #[instrument(level = "debug")]
    pub fn from_path(path: &Path) -> DomainResult<Self> {
        let file = File::open(path).map_err(|e| {
            DomainError::from(InfrastructureError::FileSystem(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        })?;
        Self::from_reader(BufReader::new(file))
            .map_err(|e| e.context(format!("Loading tags from {}", path.display())))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> DomainResult<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(|e| {
            DomainError::from(InfrastructureError::FileSystem(format!(
                "Failed to read tag data: {}",
                e
            )))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> DomainResult<Self> {
        if content.trim().is_empty() {
            debug!("Empty tag data");
            return Ok(Self { terms: Vec::new() });
        }

        let json_terms: Vec<JsonTerm> = serde_json::from_str(content).map_err(|e| {
            DomainError::from(InfrastructureError::Serialization(format!(
                "Failed to parse JSON: {}. Expected a JSON array of tag objects.",
                e
            )))
        })?;

        let terms = json_terms
            .into_iter()
            .map(|t| {
                let name = t.name.trim();
                if name.is_empty() {
                    return Err(DomainError::InvalidTag(format!("Tag {} has no name", t.id)));
                }
                let slug = t
                    .slug
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| slugify(name));
                Ok(Term {
                    id: t.id,
                    name: name.to_string(),
                    slug,
                    count: t.count,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        debug!("Loaded {} tags", terms.len());
        Ok(Self { terms })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl TagRepository for JsonTagRepository {
    fn get_tags(&self, query: &TagQuery) -> DomainResult<Vec<Term>> {
        Ok(query.apply(self.terms.iter().cloned()))
    }
}
