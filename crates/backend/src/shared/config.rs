use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub remote: RemoteConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub geo: GeoConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the built frontend, served as static files
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How long fetched sheets are reused before re-fetching
    #[serde(default = "default_snapshot_ttl_secs")]
    pub snapshot_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// HS256 secret; a random one is generated at startup when empty
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GeoConfig {
    /// GeoJSON file with province boundaries
    #[serde(default)]
    pub boundaries_path: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_snapshot_ttl_secs() -> u64 {
    60
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[remote]
base_url = "http://127.0.0.1:8080/api"
timeout_secs = 30
snapshot_ttl_secs = 60

[auth]

[geo]
boundaries_path = "assets/geo/provinces.geojson"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// `SALES_REMOTE_URL`, `SALES_REMOTE_API_KEY` and `SALES_PORT` override the
/// file values.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match find_config_file() {
        Some(config_path) => {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Config>(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            toml::from_str::<Config>(DEFAULT_CONFIG)?
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let config_path = exe_path.parent()?.join("config.toml");
    if config_path.exists() {
        Some(config_path)
    } else {
        tracing::warn!("config.toml not found at: {}", config_path.display());
        None
    }
}

fn apply_env_overrides(
    config: &mut Config,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(url) = var("SALES_REMOTE_URL") {
        config.remote.base_url = url;
    }
    if let Some(key) = var("SALES_REMOTE_API_KEY") {
        config.remote.api_key = Some(key);
    }
    if let Some(port) = var("SALES_PORT") {
        config.server.port = port
            .parse()
            .map_err(|e| anyhow::anyhow!("SALES_PORT '{}' is not a port: {}", port, e))?;
    }
    Ok(())
}

/// Resolve a configured path relative to the executable directory
pub fn resolve_path(path_str: &str) -> PathBuf {
    let path = Path::new(path_str);

    // If absolute path, use as is
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    // Fallback: use relative to current directory
    PathBuf::from(path_str)
}
