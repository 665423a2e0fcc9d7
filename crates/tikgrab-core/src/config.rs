use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/tikgrab/config.toml`.
///
/// The lookup endpoint and the header-template fields are injected here so
/// tests can point the pipeline at a stand-in service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TikgrabConfig {
    /// Lookup service endpoint the page URL is resolved against.
    pub endpoint: String,
    /// Origin header the lookup service expects.
    pub origin: String,
    /// Referer header the lookup service expects.
    pub referer: String,
    /// User-Agent presented to the lookup service.
    pub user_agent: String,
    /// Directory downloaded videos are saved into.
    pub output_dir: PathBuf,
    /// Bounded wait for the resolution POST, in seconds.
    pub lookup_timeout_secs: u64,
    /// Bounded wait for the startup connectivity probe, in seconds.
    pub check_timeout_secs: u64,
    /// Bounded wait for the media GET, in seconds.
    pub download_timeout_secs: u64,
}

impl Default for TikgrabConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://savetik.co/api/ajaxSearch".to_string(),
            origin: "https://savetik.co".to_string(),
            referer: "https://savetik.co/en2".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36"
                .to_string(),
            output_dir: PathBuf::from("downloaded_videos"),
            lookup_timeout_secs: 20,
            check_timeout_secs: 10,
            download_timeout_secs: 30,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tikgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TikgrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TikgrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

fn load_from(path: &Path) -> Result<TikgrabConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: TikgrabConfig = toml::from_str(&data)?;
    Ok(cfg)
}
