// tagcloud/src/infrastructure/repositories/memory_tag_repository.rs
use crate::domain::error::DomainResult;
use crate::domain::repositories::query::TagQuery;
use crate::domain::repositories::repository::TagRepository;
use crate::domain::tag::Term;

/// Vector-backed tag repository
#[derive(Debug, Default)]
pub struct InMemoryTagRepository {
    terms: Vec<Term>,
}

impl InMemoryTagRepository {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}

impl TagRepository for InMemoryTagRepository {
    fn get_tags(&self, query: &TagQuery) -> DomainResult<Vec<Term>> {
        Ok(query.apply(self.terms.iter().cloned()))
    }
}
