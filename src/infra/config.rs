use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::identity::DEFAULT_SIMILARITY_THRESHOLD;

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Database file path
    pub db_path: PathBuf,

    /// Fuzzy statement-matcher settings
    pub matcher: MatcherConfig,

    /// Store settings
    pub store: StoreConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig
{
    /// Acceptance threshold for fuzzy statement matches
    pub threshold: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig
{
    /// Stored solution content is clipped to this many characters
    pub content_limit: usize,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            db_path: PathBuf::from("ordo.db"),
            matcher: MatcherConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for MatcherConfig
{
    fn default() -> Self
    {
        Self { threshold: DEFAULT_SIMILARITY_THRESHOLD }
    }
}

impl Default for StoreConfig
{
    fn default() -> Self
    {
        Self { content_limit: 1000 }
    }
}

pub fn load_config() -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["ordo.toml", "ordo.yaml", "ordo.json", ".ordo.toml"];

    for path in &config_paths
    {
        if Path::new(path).exists()
        {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with ORDO_ prefix
    builder = builder.add_source(config::Environment::with_prefix("ORDO").separator("_"));

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("ordo.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
