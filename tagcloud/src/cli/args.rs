// tagcloud/src/cli/args.rs
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::cloud::{Format, Order, OrderBy};
use crate::domain::repositories::repository::LinkMode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Render tag clouds with nofollow links
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[arg(long = "no-color", help = "disable colored output")]
    pub no_color: bool,

    #[arg(long = "generate-config", help = "print the default configuration and exit")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where tag data comes from and how links are built
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// JSON file with an array of {id, name, slug, count} objects, '-' for stdin
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<String>,

    #[arg(long = "home-url", help = "site root tag links are built on")]
    pub home_url: Option<String>,

    #[arg(long = "permalinks", help = "use /tag/<slug>/ paths and rel=\"nofollow tag\"")]
    pub permalinks: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a tag cloud from the most used tags
    Render {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long = "format", help = "flat, list or structured")]
        format: Option<Format>,

        #[arg(long = "smallest", help = "font size of the least used tag")]
        smallest: Option<f64>,

        #[arg(long = "largest", help = "font size of the most used tag")]
        largest: Option<f64>,

        #[arg(long = "unit", help = "CSS unit of the font sizes")]
        unit: Option<String>,

        #[arg(short = 'n', long = "number", help = "number of top tags, 0 for all")]
        number: Option<usize>,

        #[arg(long = "orderby", help = "name or count")]
        order_by: Option<OrderBy>,

        #[arg(long = "order", help = "asc, desc or rand")]
        order: Option<Order>,

        #[arg(long = "separator", help = "joins entries in the flat format")]
        separator: Option<String>,

        #[arg(long = "single-text", help = "tooltip for one use, %s is the count")]
        single_text: Option<String>,

        #[arg(long = "multiple-text", help = "tooltip for several uses, %s is the count")]
        multiple_text: Option<String>,

        #[arg(long = "link", help = "view or edit")]
        link: Option<LinkMode>,

        #[arg(long = "include", help = "only these tag ids, comma separated")]
        include: Option<String>,

        #[arg(long = "exclude", help = "skip these tag ids, comma separated")]
        exclude: Option<String>,

        #[arg(long = "seed", help = "seed for --order rand")]
        seed: Option<u64>,

        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Show tags with their usage counts, most used first
    Tags {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(short = 'l', long = "limit", help = "limit number of results")]
        limit: Option<usize>,

        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
}
