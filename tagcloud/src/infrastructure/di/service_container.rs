// tagcloud/src/infrastructure/di/service_container.rs
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::error::ApplicationResult;
use crate::application::services::tag_cloud_service::TagCloudService;
use crate::application::TagCloudServiceImpl;
use crate::config::Settings;
use crate::domain::hooks::Hooks;
use crate::infrastructure::links::PermalinkResolver;
use crate::infrastructure::repositories::json_tag_repository::JsonTagRepository;

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    pub tag_cloud_service: Arc<dyn TagCloudService>,
}

impl ServiceContainer {
    /// Create all services with explicit dependency injection
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        Self::with_hooks(config, Hooks::default())
    }

    pub fn with_hooks(config: &Settings, hooks: Hooks) -> ApplicationResult<Self> {
        let tag_repository = Self::create_repository(config.tags_file.as_deref())?;
        let link_resolver = Self::create_link_resolver(config)?;

        let tag_cloud_service = Arc::new(TagCloudServiceImpl::with_hooks(
            tag_repository,
            link_resolver,
            hooks,
        ));

        Ok(Self { tag_cloud_service })
    }

    fn create_repository(tags_file: Option<&str>) -> ApplicationResult<Arc<JsonTagRepository>> {
        let repository = match tags_file {
            Some(path) if path != "-" => {
                debug!("Reading tags from {}", path);
                JsonTagRepository::from_path(Path::new(path))?
            }
            _ => {
                debug!("Reading tags from stdin");
                let mut content = String::new();
                io::stdin().lock().read_to_string(&mut content)?;
                JsonTagRepository::from_json(&content)?
            }
        };
        Ok(Arc::new(repository))
    }

    fn create_link_resolver(config: &Settings) -> ApplicationResult<Arc<PermalinkResolver>> {
        let resolver = PermalinkResolver::new(&config.home_url, config.permalinks)?
            .with_tag_base(&config.tag_base);
        Ok(Arc::new(resolver))
    }
}
