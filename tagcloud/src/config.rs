// tagcloud/src/config.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::cloud::{Format, Order, OrderBy, RenderConfig};
use crate::domain::count_text::DEFAULT_THOUSANDS_SEP;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::repository::LinkMode;
use crate::application::services::tag_cloud_service::DEFAULT_CLOUD_SIZE;
use crate::infrastructure::links::DEFAULT_TAG_BASE;

pub const ENV_HOME_URL: &str = "TAGCLOUD_HOME_URL";
pub const ENV_PERMALINKS: &str = "TAGCLOUD_PERMALINKS";
pub const ENV_TAGS_FILE: &str = "TAGCLOUD_TAGS_FILE";

/// Render defaults, the `[cloud]` table of the config file
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CloudSettings {
    pub smallest: f64,
    pub largest: f64,
    pub unit: String,
    /// Number of top tags shown, 0 for all
    pub number: usize,
    pub format: Format,
    pub order_by: OrderBy,
    pub order: Order,
    pub separator: String,
    pub thousands_sep: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_text: Option<String>,
    pub link: LinkMode,
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            smallest: 8.0,
            largest: 22.0,
            unit: "pt".to_string(),
            number: DEFAULT_CLOUD_SIZE,
            format: Format::Flat,
            order_by: OrderBy::Name,
            order: Order::Ascending,
            separator: "\n".to_string(),
            thousands_sep: DEFAULT_THOUSANDS_SEP.to_string(),
            single_text: None,
            multiple_text: None,
            link: LinkMode::View,
        }
    }
}

impl CloudSettings {
    pub fn to_render_config(&self) -> RenderConfig {
        RenderConfig {
            smallest: self.smallest,
            largest: self.largest,
            unit: self.unit.clone(),
            number: self.number,
            format: self.format,
            order_by: self.order_by,
            order: self.order,
            count_label: None,
            single_text: self.single_text.clone(),
            multiple_text: self.multiple_text.clone(),
            rel_addendum: None,
            separator: self.separator.clone(),
            thousands_sep: self.thousands_sep.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Site root every tag link is built on
    #[serde(default = "default_home_url")]
    pub home_url: String,

    /// Descriptive tag paths instead of `?tag=` query strings
    #[serde(default)]
    pub permalinks: bool,

    #[serde(default = "default_tag_base")]
    pub tag_base: String,

    /// JSON tag data; stdin when unset or "-"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_file: Option<String>,

    #[serde(default)]
    pub cloud: CloudSettings,
}

fn default_home_url() -> String {
    "http://localhost/".to_string()
}

fn default_tag_base() -> String {
    DEFAULT_TAG_BASE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
            permalinks: false,
            tag_base: default_tag_base(),
            tags_file: None,
            cloud: CloudSettings::default(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/tagcloud/config.toml"))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn read_settings_file(path: &Path) -> DomainResult<Settings> {
    let config_text = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Io(e).context(format!("Reading {}", path.display())))?;
    toml::from_str::<Settings>(&config_text).map_err(|e| {
        DomainError::SerializationError(format!("Invalid config {}: {}", path.display(), e))
    })
}

/// Defaults, then the config file, then environment variables.
///
/// An explicit `config_path` must exist and parse; the default location is
/// skipped when absent or broken.
#[instrument(level = "debug")]
pub fn load_settings(config_path: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_path {
        Some(path) => read_settings_file(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => read_settings_file(&path).unwrap_or_else(|e| {
                debug!("Ignoring config file: {}", e);
                Settings::default()
            }),
            None => Settings::default(),
        },
    };

    if let Ok(home_url) = std::env::var(ENV_HOME_URL) {
        trace!("Using {} from environment: {}", ENV_HOME_URL, home_url);
        settings.home_url = home_url;
    }

    if let Ok(permalinks) = std::env::var(ENV_PERMALINKS) {
        match parse_bool(&permalinks) {
            Some(value) => settings.permalinks = value,
            None => debug!("Ignoring {}={}: not a boolean", ENV_PERMALINKS, permalinks),
        }
    }

    if let Ok(tags_file) = std::env::var(ENV_TAGS_FILE) {
        trace!("Using {} from environment: {}", ENV_TAGS_FILE, tags_file);
        settings.tags_file = Some(tags_file);
    }

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    toml::to_string_pretty(&Settings::default())
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::EnvGuard;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config_file(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).unwrap();
        (temp_dir, config_path)
    }

    #[test]
    fn given_defaults_when_to_render_config_then_matches_cloud_defaults() {
        let config = Settings::default().cloud.to_render_config();
        assert_eq!(config.smallest, 8.0);
        assert_eq!(config.largest, 22.0);
        assert_eq!(config.unit, "pt");
        assert_eq!(config.number, 45);
        assert_eq!(config.format, Format::Flat);
        assert_eq!(config.order_by, OrderBy::Name);
        assert_eq!(config.order, Order::Ascending);
        assert!(config.rel_addendum.is_none());
    }

    #[test]
    #[serial]
    fn given_config_file_when_load_settings_then_overrides_defaults_field_by_field() {
        let _guard = EnvGuard::new();
        let (temp_dir, config_path) = create_temp_config_file(
            r#"
            home_url = "https://blog.example.com"
            permalinks = true

            [cloud]
            largest = 30
            order = "desc"
            single_text = "%s post"
            multiple_text = "%s posts"
            "#,
        );

        let settings = load_settings(Some(&config_path)).unwrap();

        assert_eq!(settings.home_url, "https://blog.example.com");
        assert!(settings.permalinks);
        assert_eq!(settings.tag_base, "tag");
        assert_eq!(settings.cloud.largest, 30.0);
        assert_eq!(settings.cloud.smallest, 8.0);
        assert_eq!(settings.cloud.order, Order::Descending);
        assert_eq!(settings.cloud.single_text.as_deref(), Some("%s post"));
        assert_eq!(settings.cloud.number, 45);
        drop(temp_dir);
    }

    #[test]
    #[serial]
    fn given_environment_when_load_settings_then_environment_wins() {
        let _guard = EnvGuard::new();
        let (temp_dir, config_path) = create_temp_config_file(
            r#"
            home_url = "https://file.example.com"
            permalinks = true
            "#,
        );
        env::set_var(ENV_HOME_URL, "https://env.example.com");
        env::set_var(ENV_PERMALINKS, "no");
        env::set_var(ENV_TAGS_FILE, "/tmp/tags.json");

        let settings = load_settings(Some(&config_path)).unwrap();

        assert_eq!(settings.home_url, "https://env.example.com");
        assert!(!settings.permalinks);
        assert_eq!(settings.tags_file.as_deref(), Some("/tmp/tags.json"));
        drop(temp_dir);
    }

    #[test]
    #[serial]
    fn given_missing_explicit_config_when_load_settings_then_fails() {
        let _guard = EnvGuard::new();
        assert!(load_settings(Some(Path::new("/nonexistent/tagcloud.toml"))).is_err());
    }

    #[test]
    #[serial]
    fn given_broken_explicit_config_when_load_settings_then_serialization_error() {
        let _guard = EnvGuard::new();
        let (_temp_dir, config_path) = create_temp_config_file("cloud = 3");
        let err = load_settings(Some(&config_path)).unwrap_err();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }

    #[test]
    fn given_default_config_when_generated_then_parses_back() {
        let text = generate_default_config();
        let settings: Settings = toml::from_str(&text).unwrap();
        assert_eq!(settings.home_url, "http://localhost/");
        assert_eq!(settings.cloud.number, 45);
        assert_eq!(settings.cloud.separator, "\n");
    }

    #[test]
    fn given_bool_strings_when_parse_bool_then_maps_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
