// tagcloud/src/application/services/tag_cloud_service_impl.rs
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::tag_cloud_service::{TagCloudRequest, TagCloudService};
use crate::domain::hooks::{HookContext, HookPoint, Hooks};
use crate::domain::renderer::{CloudOutput, TagCloudRenderer};
use crate::domain::repositories::query::TagQuery;
use crate::domain::repositories::repository::{LinkResolver, TagRepository};
use crate::domain::tag::{TagRecord, Term};

/// Permalink setups append this keyword to the nofollow relation
pub const PERMALINK_REL: &str = "tag";

pub struct TagCloudServiceImpl<R: TagRepository, L: LinkResolver> {
    repository: Arc<R>,
    resolver: Arc<L>,
    renderer: TagCloudRenderer,
    hooks: Hooks,
}

impl<R: TagRepository, L: LinkResolver> TagCloudServiceImpl<R, L> {
    pub fn new(repository: Arc<R>, resolver: Arc<L>) -> Self {
        Self::with_hooks(repository, resolver, Hooks::default())
    }

    /// `hooks` feed both the renderer's generate filters and the final cloud filters
    pub fn with_hooks(repository: Arc<R>, resolver: Arc<L>, hooks: Hooks) -> Self {
        debug!("Creating new TagCloudServiceImpl");
        Self {
            repository,
            resolver,
            renderer: TagCloudRenderer::with_hooks(hooks.clone()),
            hooks,
        }
    }

    // All or nothing: the first failing term aborts the whole cloud.
    fn resolve_links(
        &self,
        terms: Vec<Term>,
        request: &TagCloudRequest,
    ) -> ApplicationResult<Vec<TagRecord>> {
        terms
            .into_iter()
            .map(|term| {
                let link = self.resolver.resolve(&term, request.link).map_err(|e| {
                    ApplicationError::LinkResolution {
                        tag: term.id.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(term.with_link(link))
            })
            .collect()
    }
}

impl<R: TagRepository, L: LinkResolver> TagCloudService for TagCloudServiceImpl<R, L> {
    #[instrument(skip_all, level = "debug", fields(link = ?request.link, number = request.render.number))]
    fn tag_cloud(&self, request: &TagCloudRequest) -> ApplicationResult<Option<CloudOutput>> {
        let terms = self.repository.get_tags(&request.query())?;
        if terms.is_empty() {
            debug!("No tags found");
            return Ok(None);
        }

        let records = self.resolve_links(terms, request)?;

        let mut config = request.render.clone();
        if config.rel_addendum.is_none() && self.resolver.uses_permalinks() {
            config.rel_addendum = Some(PERMALINK_REL.to_string());
        }

        let rendered = match request.seed {
            Some(seed) => {
                self.renderer
                    .render_retained(&records, &config, &mut StdRng::seed_from_u64(seed))
            }
            None => self
                .renderer
                .render_retained(&records, &config, &mut rand::thread_rng()),
        };

        Ok(rendered.map(|(output, retained)| {
            let ctx = HookContext {
                point: HookPoint::TagCloud,
                tags: &retained,
                config: &config,
            };
            self.hooks.apply(output, &ctx)
        }))
    }

    #[instrument(skip(self), level = "debug")]
    fn list_tags(&self, query: &TagQuery) -> ApplicationResult<Vec<Term>> {
        Ok(self.repository.get_tags(query)?)
    }
}
