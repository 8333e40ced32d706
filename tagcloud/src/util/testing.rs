// tagcloud/src/util/testing.rs
use std::env;
use std::sync::OnceLock;

use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt, fmt::format::FmtSpan, prelude::*, EnvFilter};

use crate::config::{ENV_HOME_URL, ENV_PERMALINKS, ENV_TAGS_FILE};
use crate::domain::tag::{TagRecord, Term};

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    /// JSON tag fixtures shipped with the test suite
    pub resources: Vec<&'static str>,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            resources: vec!["tests/resources/tags.json"],
        }
    }
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Sets up logging once and returns the shared test environment.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
        TestEnv::new()
    })
}

fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

const GUARDED_VARS: [&str; 3] = [ENV_HOME_URL, ENV_PERMALINKS, ENV_TAGS_FILE];

/// Clears the TAGCLOUD_* variables for the duration of a test and restores them on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        let saved = GUARDED_VARS
            .iter()
            .map(|name| (*name, env::var(name).ok()))
            .collect();
        for name in GUARDED_VARS {
            env::remove_var(name);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(val) => env::set_var(name, val),
                None => env::remove_var(name),
            }
        }
    }
}

/// Stored terms used across the unit tests
pub fn sample_terms() -> Vec<Term> {
    [
        (1, "Rust", 40),
        (2, "python", 12),
        (3, "Go", 9),
        (4, "Java", 5),
        (5, "tag2", 2),
        (6, "Tag10", 1),
        (7, "archived", 0),
    ]
    .into_iter()
    .map(|(id, name, count)| Term::new(id, name, count).expect("valid sample term"))
    .collect()
}

/// Renderable records with `#` links
pub fn sample_records() -> Vec<TagRecord> {
    sample_terms()
        .into_iter()
        .map(|term| term.with_link("#"))
        .collect()
}
