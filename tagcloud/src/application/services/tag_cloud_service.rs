// tagcloud/src/application/services/tag_cloud_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::cloud::RenderConfig;
use crate::domain::renderer::CloudOutput;
use crate::domain::repositories::query::TagQuery;
use crate::domain::repositories::repository::LinkMode;
use crate::domain::tag::{TagId, Term};

/// How many of the most used tags a cloud shows unless told otherwise
pub const DEFAULT_CLOUD_SIZE: usize = 45;

/// Everything one tag cloud call needs
#[derive(Debug, Clone)]
pub struct TagCloudRequest {
    pub render: RenderConfig,
    pub link: LinkMode,
    pub include: Vec<TagId>,
    pub exclude: Vec<TagId>,
    /// Seed for `Order::Random`; unseeded calls use the thread rng
    pub seed: Option<u64>,
}

impl Default for TagCloudRequest {
    fn default() -> Self {
        Self {
            render: RenderConfig {
                number: DEFAULT_CLOUD_SIZE,
                ..RenderConfig::default()
            },
            link: LinkMode::View,
            include: Vec::new(),
            exclude: Vec::new(),
            seed: None,
        }
    }
}

impl TagCloudRequest {
    pub fn new(render: RenderConfig) -> Self {
        Self {
            render,
            ..Self::default()
        }
    }

    /// The repository query: always the top tags by count
    pub fn query(&self) -> TagQuery {
        TagQuery::top(self.render.number)
            .with_include(self.include.clone())
            .with_exclude(self.exclude.clone())
    }
}

/// Service interface for building tag clouds from stored tags
pub trait TagCloudService: Send + Sync {
    /// Query, link and render a cloud. `Ok(None)` when there are no tags.
    ///
    /// Fails as a whole if any single link cannot be resolved.
    fn tag_cloud(&self, request: &TagCloudRequest) -> ApplicationResult<Option<CloudOutput>>;

    /// Stored terms matching `query`
    fn list_tags(&self, query: &TagQuery) -> ApplicationResult<Vec<Term>>;
}
