// tagcloud/src/domain/hooks.rs
use std::fmt;
use std::sync::Arc;

use crate::domain::cloud::RenderConfig;
use crate::domain::renderer::CloudOutput;
use crate::domain::tag::TagRecord;

/// Where a filter runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoint {
    /// Right after the renderer assembled its output
    Generate,
    /// On the final result of the tag cloud service
    TagCloud,
}

/// What a filter gets to look at besides the output itself
#[derive(Debug)]
pub struct HookContext<'a> {
    pub point: HookPoint,
    /// Entries that made it into the output, in output order
    pub tags: &'a [TagRecord],
    pub config: &'a RenderConfig,
}

pub type OutputFilter = Arc<dyn Fn(CloudOutput, &HookContext<'_>) -> CloudOutput + Send + Sync>;

/// Registered output filters, applied in registration order.
#[derive(Clone, Default)]
pub struct Hooks {
    generate: Vec<OutputFilter>,
    tag_cloud: Vec<OutputFilter>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter<F>(&mut self, point: HookPoint, filter: F) -> &mut Self
    where
        F: Fn(CloudOutput, &HookContext<'_>) -> CloudOutput + Send + Sync + 'static,
    {
        self.filters_mut(point).push(Arc::new(filter));
        self
    }

    pub fn has_filters(&self, point: HookPoint) -> bool {
        !self.filters(point).is_empty()
    }

    pub fn apply(&self, output: CloudOutput, ctx: &HookContext<'_>) -> CloudOutput {
        self.filters(ctx.point)
            .iter()
            .fold(output, |acc, filter| filter(acc, ctx))
    }

    fn filters(&self, point: HookPoint) -> &[OutputFilter] {
        match point {
            HookPoint::Generate => &self.generate,
            HookPoint::TagCloud => &self.tag_cloud,
        }
    }

    fn filters_mut(&mut self, point: HookPoint) -> &mut Vec<OutputFilter> {
        match point {
            HookPoint::Generate => &mut self.generate,
            HookPoint::TagCloud => &mut self.tag_cloud,
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("generate", &self.generate.len())
            .field("tag_cloud", &self.tag_cloud.len())
            .finish()
    }
}
