use std::{env, fmt, path::PathBuf, time::Duration};

use log::LevelFilter;

pub const DATA_BASE_URL: &str =
    "https://raw.communitydragon.org/latest/plugins/rcp-be-lol-game-data/global/default/v1";
pub const CDN_BASE_URL: &str = "https://raw.communitydragon.org/latest";
pub const ARCHIVE_BASE_URL: &str = "https://raw.githubusercontent.com/darkseal-org/lol-skins/main/skins";

pub const JSON_TIMEOUT: Duration = Duration::from_secs(30);
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

const CACHE_FOLDER_NAME: &str = "skin-cache";
const APP_NAME: &str = "skindrop";

/// Base URLs of the three remote hosts the browser talks to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub data_base_url: String,
    pub cdn_base_url: String,
    pub archive_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            data_base_url: DATA_BASE_URL.to_string(),
            cdn_base_url: CDN_BASE_URL.to_string(),
            archive_base_url: ARCHIVE_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoints: Endpoints,
    pub cache_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn new(
        cache_dir: Option<PathBuf>,
        log_file: Option<PathBuf>,
        verbose: bool,
    ) -> Result<Self, ConfigError> {
        let cache_dir = match cache_dir {
            Some(dir) => dir,
            None => AppConfig::default_cache_dir()?,
        };
        let log_file = log_file.unwrap_or_else(AppConfig::default_log_file);
        let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

        Ok(Self {
            endpoints: Endpoints::default(),
            cache_dir,
            log_file,
            log_level,
        })
    }

    fn default_cache_dir() -> Result<PathBuf, ConfigError> {
        let documents = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or(ConfigError::DocumentsDirNotFound)?;

        Ok(documents.join(CACHE_FOLDER_NAME))
    }

    fn default_log_file() -> PathBuf {
        let mut path = env::temp_dir();
        path.push(APP_NAME);
        path.push(format!("{}.log", APP_NAME));
        path
    }
}

#[derive(Debug)]
pub enum ConfigError {
    DocumentsDirNotFound,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::DocumentsDirNotFound => {
                write!(f, "Could not determine the documents or home directory of the current user.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_dir_override_wins() {
        let config = AppConfig::new(Some(PathBuf::from("/tmp/skins")), None, false).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/skins"));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn verbose_raises_log_level() {
        let config = AppConfig::new(
            Some(PathBuf::from("/tmp/skins")),
            Some(PathBuf::from("/tmp/skindrop.log")),
            true,
        )
        .unwrap();
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, PathBuf::from("/tmp/skindrop.log"));
    }

    #[test]
    fn default_log_file_lives_in_temp_dir() {
        let log_file = AppConfig::default_log_file();
        assert!(log_file.starts_with(env::temp_dir()));
        assert!(log_file.ends_with("skindrop/skindrop.log"));
    }
}
