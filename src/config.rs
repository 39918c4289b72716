use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::theme::Theme;
use crate::types::Tab;

pub const DEFAULT_ENDPOINT: &str = "https://swapi-graphql.eskerda.vercel.app/";

/// Swapix - Star Wars catalog explorer
///
/// Terminal UI over the SWAPI GraphQL API: films, characters, planets and starships.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug, Default)]
#[command(name = "swapix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Star Wars catalog explorer", long_about = None)]
pub struct CliArgs {
    /// GraphQL endpoint URL
    #[arg(long, env = "SWAPIX_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Per-request timeout in milliseconds (100-120000). No timeout when unset
    #[arg(long, env = "SWAPIX_REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "RENDER_FPS")]
    pub render_fps: Option<u32>,

    /// Available FPS options for Ctrl+O cycling (comma-separated, e.g., "20,30,60")
    #[arg(long, env = "RENDER_FPS_CHOICES")]
    pub render_fps_choices: Option<String>,

    /// Color theme: nord, dos-blue, amber-crt, green-phosphor
    #[arg(long, env = "SWAPIX_THEME")]
    pub theme: Option<String>,

    /// Tab shown on startup
    #[arg(long, env = "SWAPIX_TAB")]
    pub tab: Option<String>,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, env = "SWAPIX_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub endpoint: String,
    pub request_timeout: Option<Duration>,
    pub render_fps: u32,
    pub render_fps_choices: Vec<u32>,
    pub theme: Theme,
    pub initial_tab: Tab,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
            render_fps: 20,
            render_fps_choices: vec![20, 30, 60],
            theme: Theme::default(),
            initial_tab: Tab::Films,
            log_file: PathBuf::from("swapix.log"),
        }
    }
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Parse comma-separated FPS list and validate each value
fn parse_fps_list(s: &str) -> Vec<u32> {
    s.split(',')
        .filter_map(|v| v.trim().parse::<u32>().ok())
        .filter(|n| (1..=120).contains(n))
        .collect()
}

/// Load configuration from CLI args and environment variables
pub fn load() -> Result<Config> {
    from_args(CliArgs::parse())
}

/// Validate parsed arguments into a `Config`. Clap has already applied env fallbacks.
pub fn from_args(args: CliArgs) -> Result<Config> {
    let defaults = Config::default();

    let endpoint = args.endpoint.unwrap_or(defaults.endpoint);
    validate_url(&endpoint, "SWAPIX_ENDPOINT")?;

    let request_timeout = args
        .request_timeout_ms
        .map(|ms| validate_in_range(ms, 100, 120_000, "SWAPIX_REQUEST_TIMEOUT_MS"))
        .transpose()?
        .map(Duration::from_millis);

    let render_fps_choices = args
        .render_fps_choices
        .map(|s| parse_fps_list(&s))
        .unwrap_or(defaults.render_fps_choices);
    let Some(&default_fps) = render_fps_choices.first() else {
        return Err(anyhow!(
            "RENDER_FPS_CHOICES must contain at least one valid value (1-120)"
        ));
    };
    let render_fps = validate_in_range(
        args.render_fps.unwrap_or(default_fps),
        1,
        120,
        "RENDER_FPS",
    )?;

    let theme = match args.theme {
        Some(name) => Theme::from_str(&name).map_err(|e| anyhow!(e))?,
        None => defaults.theme,
    };
    let initial_tab = match args.tab {
        Some(name) => name.parse()?,
        None => defaults.initial_tab,
    };

    Ok(Config {
        endpoint,
        request_timeout,
        render_fps,
        render_fps_choices,
        theme,
        initial_tab,
        log_file: args.log_file.unwrap_or(defaults.log_file),
    })
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

impl Config {
    pub fn log_summary(&self) {
        log::info!("Swapix configuration:");
        log::info!("  Endpoint: {}", self.endpoint);
        match self.request_timeout {
            Some(t) => log::info!("  Request timeout: {}ms", t.as_millis()),
            None => log::info!("  Request timeout: none"),
        }
        log::info!("  Render FPS: {} (choices {:?})", self.render_fps, self.render_fps_choices);
        log::info!("  Theme: {}", self.theme);
        log::info!("  Initial tab: {}", self.initial_tab);
    }
}
