// tagcloud/src/infrastructure/links.rs
use tracing::trace;
use url::Url;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::repository::{LinkMode, LinkResolver};
use crate::domain::tag::Term;
use crate::infrastructure::error::InfrastructureError;

pub const DEFAULT_TAG_BASE: &str = "tag";
const ADMIN_EDIT_PATH: [&str; 2] = ["wp-admin", "edit-tags.php"];

/// Builds tag URLs below a site's home URL.
///
/// With permalinks: `{home}/{tag_base}/{slug}/`, otherwise `{home}/?tag={slug}`.
/// Edit links always point at the admin tag editor.
#[derive(Debug, Clone)]
pub struct PermalinkResolver {
    home_url: Url,
    permalinks: bool,
    tag_base: String,
}

impl PermalinkResolver {
    pub fn new(home_url: &str, permalinks: bool) -> DomainResult<Self> {
        let home_url = Url::parse(home_url.trim())
            .map_err(InfrastructureError::from)
            .map_err(|e| DomainError::from(e).context(format!("home url '{}'", home_url)))?;
        if home_url.cannot_be_a_base() {
            return Err(DomainError::LinkResolution(format!(
                "home url '{}' cannot carry a path",
                home_url
            )));
        }
        Ok(Self {
            home_url,
            permalinks,
            tag_base: DEFAULT_TAG_BASE.to_string(),
        })
    }

    pub fn with_tag_base<S: AsRef<str>>(mut self, tag_base: S) -> Self {
        let base = tag_base.as_ref().trim_matches('/');
        if !base.is_empty() {
            self.tag_base = base.to_string();
        }
        self
    }

    fn view_link(&self, term: &Term) -> DomainResult<String> {
        if term.slug.is_empty() {
            return Err(DomainError::LinkResolution(format!(
                "tag '{}' has no slug",
                term.name
            )));
        }

        let mut url = self.home_url.clone();
        if self.permalinks {
            {
                let mut segments = url.path_segments_mut().map_err(|_| {
                    DomainError::LinkResolution(format!("cannot extend '{}'", self.home_url))
                })?;
                segments.pop_if_empty();
                for part in self.tag_base.split('/').filter(|p| !p.is_empty()) {
                    segments.push(part);
                }
                segments.push(&term.slug).push("");
            }
        } else {
            url.query_pairs_mut().append_pair("tag", &term.slug);
        }
        Ok(url.into())
    }

    fn edit_link(&self, term: &Term) -> DomainResult<String> {
        let mut url = self.home_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                DomainError::LinkResolution(format!("cannot extend '{}'", self.home_url))
            })?;
            segments.pop_if_empty().extend(ADMIN_EDIT_PATH);
        }
        url.query_pairs_mut()
            .append_pair("action", "edit")
            .append_pair("tag_ID", &term.id.to_string());
        Ok(url.into())
    }
}

impl LinkResolver for PermalinkResolver {
    fn resolve(&self, term: &Term, mode: LinkMode) -> DomainResult<String> {
        let link = match mode {
            LinkMode::View => self.view_link(term)?,
            LinkMode::Edit => self.edit_link(term)?,
        };
        trace!("Resolved {:?} link for '{}': {}", mode, term.name, link);
        Ok(link)
    }

    fn uses_permalinks(&self) -> bool {
        self.permalinks
    }
}
