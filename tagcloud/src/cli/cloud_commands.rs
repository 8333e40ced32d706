// tagcloud/src/cli/cloud_commands.rs
use std::fmt::Write as _;
use std::io::{self, Write};

use crossterm::style::Stylize;
use tracing::{debug, instrument};

use crate::application::services::tag_cloud_service::TagCloudRequest;
use crate::cli::args::{Commands, SourceArgs};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::cloud::Format;
use crate::domain::repositories::query::TagQuery;
use crate::domain::tag::TagId;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::json::{write_cloud_as_json, write_terms_as_json};

/// Settings with the command line source flags applied on top
pub fn apply_source_args(settings: &Settings, source: &SourceArgs) -> Settings {
    let mut settings = settings.clone();
    if let Some(file) = &source.file {
        settings.tags_file = Some(file.clone());
    }
    if let Some(home_url) = &source.home_url {
        settings.home_url = home_url.clone();
    }
    if source.permalinks {
        settings.permalinks = true;
    }
    settings
}

fn parse_ids(flag: &str, ids: Option<&str>) -> CliResult<Vec<TagId>> {
    match ids {
        None => Ok(Vec::new()),
        Some(ids) => TagId::parse_list(ids)
            .map_err(|e| CliError::InvalidInput(e.to_string()).context(flag)),
    }
}

#[instrument(skip_all, level = "debug")]
pub fn render(command: Commands, settings: &Settings) -> CliResult<()> {
    let Commands::Render {
        source,
        format,
        smallest,
        largest,
        unit,
        number,
        order_by,
        order,
        separator,
        single_text,
        multiple_text,
        link,
        include,
        exclude,
        seed,
        is_json,
    } = command
    else {
        return Err(CliError::CommandFailed("expected render command".to_string()));
    };

    let settings = apply_source_args(settings, &source);

    let mut cloud = settings.cloud.clone();
    if let Some(v) = smallest {
        cloud.smallest = v;
    }
    if let Some(v) = largest {
        cloud.largest = v;
    }
    if let Some(v) = unit {
        cloud.unit = v;
    }
    if let Some(v) = number {
        cloud.number = v;
    }
    if let Some(v) = format {
        cloud.format = v;
    }
    if let Some(v) = order_by {
        cloud.order_by = v;
    }
    if let Some(v) = order {
        cloud.order = v;
    }
    if let Some(v) = separator {
        cloud.separator = v;
    }
    if let Some(v) = single_text {
        cloud.single_text = Some(v);
    }
    if let Some(v) = multiple_text {
        cloud.multiple_text = Some(v);
    }
    if let Some(v) = link {
        cloud.link = v;
    }

    let request = TagCloudRequest {
        render: cloud.to_render_config(),
        link: cloud.link,
        include: parse_ids("--include", include.as_deref())?,
        exclude: parse_ids("--exclude", exclude.as_deref())?,
        seed,
    };
    debug!("Render request: {:?}", request);

    let services = ServiceContainer::new(&settings)?;
    let Some(output) = services.tag_cloud_service.tag_cloud(&request)? else {
        debug!("Empty tag cloud");
        return Ok(());
    };

    let mut stdout = io::stdout().lock();
    if is_json || cloud.format == Format::Structured {
        write_cloud_as_json(&mut stdout, &output)?;
    } else {
        let text = output.to_string();
        if text.ends_with('\n') {
            write!(stdout, "{}", text)?;
        } else {
            writeln!(stdout, "{}", text)?;
        }
    }
    Ok(())
}

#[instrument(skip_all, level = "debug")]
pub fn show_tags(command: Commands, settings: &Settings) -> CliResult<()> {
    let Commands::Tags {
        source,
        limit,
        is_json,
    } = command
    else {
        return Err(CliError::CommandFailed("expected tags command".to_string()));
    };

    let settings = apply_source_args(settings, &source);
    let services = ServiceContainer::new(&settings)?;
    let terms = services
        .tag_cloud_service
        .list_tags(&TagQuery::top(limit.unwrap_or(0)))?;

    if is_json {
        write_terms_as_json(&mut io::stdout().lock(), &terms)?;
        return Ok(());
    }

    if terms.is_empty() {
        eprintln!("No tags found");
        return Ok(());
    }

    eprintln!("All tags:");
    let mut output = String::new();
    for term in &terms {
        writeln!(&mut output, "  {} ({})", term.name.as_str().green(), term.count)
            .map_err(|e| CliError::Other(e.to_string()))?;
    }
    print!("{}", output);
    Ok(())
}
