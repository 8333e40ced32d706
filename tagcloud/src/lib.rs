// tagcloud/src/lib.rs
#![crate_type = "lib"]
#![crate_name = "tagcloud"]

// Core modules
pub mod application;
pub mod domain;
pub mod infrastructure;

// CLI modules
pub mod cli;
pub mod config;
pub mod exitcode;
pub mod util;

pub use domain::cloud::{Format, Order, OrderBy, RenderConfig};
pub use domain::count_text::CountLabel;
pub use domain::renderer::{CloudOutput, RenderedTag, TagCloudRenderer};
pub use domain::tag::{TagId, TagRecord};

/// Render `tags` with `config` and no hooks; `None` for an empty cloud.
pub fn render(tags: &[TagRecord], config: &RenderConfig) -> Option<CloudOutput> {
    TagCloudRenderer::new().render(tags, config)
}
