use std::{
    fmt,
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use json::JsonValue;
use log::debug;

use crate::{
    config::{Endpoints, DOWNLOAD_TIMEOUT, JSON_TIMEOUT},
    model::{
        champion::{Champion, ChampionDetail},
        ids::ChampionId,
    },
};

use super::{
    parsing::{
        champion::{parse_champion_detail, parse_champion_summary},
        ParsingError,
    },
    transport::{HttpTransport, TransportError},
};

/// Client for the CommunityDragon game data, its asset CDN and the skin archive mirror.
pub struct CDragonClient {
    transport: Arc<dyn HttpTransport>,
    endpoints: Endpoints,
}

impl CDragonClient {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoints: Endpoints) -> Self {
        Self { transport, endpoints }
    }

    pub fn fetch_catalog_summary(&self) -> Result<Vec<Champion>, RequestError> {
        let url = format!("{}/champion-summary.json", self.endpoints.data_base_url);
        let json = self.request_json(&url)?;
        Ok(parse_champion_summary(&json)?)
    }

    pub fn fetch_champion_detail(&self, id: ChampionId) -> Result<ChampionDetail, RequestError> {
        let url = format!("{}/champions/{}.json", self.endpoints.data_base_url, id);
        let json = self.request_json(&url)?;
        Ok(parse_champion_detail(&json)?)
    }

    /// Turns a catalog asset path into an absolute URL. An empty result means there is no asset.
    pub fn resolve_asset_url(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        format!(
            "{}/{}",
            self.endpoints.cdn_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Never fails: anything but a 200 counts as absent.
    pub fn asset_exists(&self, url: &str) -> bool {
        match self.transport.head(url, JSON_TIMEOUT) {
            Ok(status) => {
                debug!("Existence check for {} returned {}", url, status);
                status == 200
            }
            Err(err) => {
                debug!("Existence check for {} failed: {}", url, err);
                false
            }
        }
    }

    pub fn fetch_asset(&self, url: &str) -> Result<Vec<u8>, RequestError> {
        let response = self.transport.get(url, JSON_TIMEOUT)?;
        if !response.is_success() {
            return Err(RequestError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response.body)
    }

    /// Downloads `{archive base}/{champion}/{filename}` into `destination_dir`, replacing any
    /// previous file of the same name.
    pub fn download_archive(
        &self,
        champion: &str,
        filename: &str,
        destination_dir: &Path,
    ) -> Result<PathBuf, RequestError> {
        let url = format!(
            "{}/{}/{}",
            self.endpoints.archive_base_url.trim_end_matches('/'),
            encode_path(champion),
            encode_path(filename)
        );

        let response = self.transport.get(&url, DOWNLOAD_TIMEOUT)?;
        if !response.is_success() {
            return Err(RequestError::Status {
                url,
                status: response.status,
            });
        }

        let target_file = destination_dir.join(local_file_name(filename));
        let mut file = File::create(&target_file)?;
        file.write_all(&response.body)?;

        Ok(target_file)
    }

    fn request_json(&self, url: &str) -> Result<JsonValue, RequestError> {
        let response = self.transport.get(url, JSON_TIMEOUT)?;
        if !response.is_success() {
            return Err(RequestError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }

        let text = String::from_utf8_lossy(&response.body);
        let json = json::parse(&text).map_err(ParsingError::from)?;
        Ok(json)
    }
}

// Slashes inside names stay path separators on the mirror.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn local_file_name(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[derive(Debug)]
pub enum RequestError {
    Network(TransportError),
    Status { url: String, status: u16 },
    DataFormat(ParsingError),
    Filesystem(io::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::Network(err) => write!(f, "Network error: {}", err),
            RequestError::Status { url, status } => {
                write!(f, "Network error: server returned HTTP {} for {}", status, url)
            }
            RequestError::DataFormat(err) => write!(f, "Unexpected data format: {}", err),
            RequestError::Filesystem(err) => write!(f, "Filesystem error: {}", err),
        }
    }
}

impl From<TransportError> for RequestError {
    fn from(error: TransportError) -> Self {
        RequestError::Network(error)
    }
}

impl From<ParsingError> for RequestError {
    fn from(error: ParsingError) -> Self {
        RequestError::DataFormat(error)
    }
}

impl From<io::Error> for RequestError {
    fn from(error: io::Error) -> Self {
        RequestError::Filesystem(error)
    }
}
