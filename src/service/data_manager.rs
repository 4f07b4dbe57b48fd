use std::{
    fmt, io,
    path::{Path, PathBuf},
    sync::{
        mpsc::{self, Receiver},
        Arc,
    },
    thread,
};

use image::ImageError;
use itertools::Itertools;
use log::{debug, info};

use crate::{
    config::AppConfig,
    model::{
        champion::{Champion, ChampionDetail},
        ids::ChampionId,
    },
    service::{
        download::DownloadManager,
        gameapi::{
            cdragon_client::{CDragonClient, RequestError},
            transport::HttpTransport,
        },
        preview::PreviewImage,
    },
};

/// Runs every network-bound action on a worker thread of its own.
pub struct DataManager {
    client: Arc<CDragonClient>,
    downloads: Arc<DownloadManager>,
}

impl DataManager {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &AppConfig) -> Self {
        let client = Arc::new(CDragonClient::new(transport, config.endpoints.clone()));
        let downloads = Arc::new(DownloadManager::new(Arc::clone(&client), config.cache_dir.clone()));
        Self { client, downloads }
    }

    // Generic async wrapper that executes fetch in a thread
    pub fn async_wrapper<T, F>(&self, fetch_fn: F) -> Receiver<DataRetrievalResult<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> DataRetrievalResult<T> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = fetch_fn();
            tx.send(result).ok();
        });

        rx
    }

    /// Whole catalog, sorted by name.
    pub fn get_champions(&self) -> Receiver<DataRetrievalResult<Vec<Champion>>> {
        let client = Arc::clone(&self.client);

        self.async_wrapper(move || {
            let champions = client
                .fetch_catalog_summary()?
                .into_iter()
                .sorted_by(|a, b| a.name.cmp(&b.name))
                .collect_vec();
            info!("Loaded {} champions", champions.len());
            Ok(champions)
        })
    }

    pub fn get_champion_detail(&self, id: ChampionId) -> Receiver<DataRetrievalResult<ChampionDetail>> {
        let client = Arc::clone(&self.client);

        self.async_wrapper(move || {
            let detail = client.fetch_champion_detail(id)?;
            info!("Loaded {} skins for {} ({})", detail.skins.len(), detail.name, id);
            Ok(detail)
        })
    }

    /// `Ok(None)` when the asset does not exist.
    pub fn get_preview(&self, url: String) -> Receiver<DataRetrievalResult<Option<PreviewImage>>> {
        let client = Arc::clone(&self.client);

        self.async_wrapper(move || {
            if !client.asset_exists(&url) {
                debug!("No preview available at {}", url);
                return Ok(None);
            }

            let bytes = client.fetch_asset(&url)?;
            let image = PreviewImage::decode(&bytes)?;
            Ok(Some(image))
        })
    }

    pub fn download_skin(&self, champion: String, skin_name: String) -> Receiver<DataRetrievalResult<PathBuf>> {
        let downloads = Arc::clone(&self.downloads);

        self.async_wrapper(move || Ok(downloads.download_skin(&champion, &skin_name)?))
    }

    pub fn resolve_asset_url(&self, path: &str) -> String {
        self.client.resolve_asset_url(path)
    }

    pub fn cache_dir(&self) -> &Path {
        self.downloads.cache_dir()
    }

    pub fn ensure_cache_dir(&self) -> io::Result<&Path> {
        self.downloads.ensure_cache_dir()
    }
}

pub type DataRetrievalResult<T> = Result<T, DataRetrievalError>;

#[derive(Debug)]
pub enum DataRetrievalError {
    RequestFailed(RequestError),
    DecodeFailed(ImageError),
    WorkerDisconnected,
}

impl fmt::Display for DataRetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataRetrievalError::RequestFailed(err) => write!(f, "{}", err),
            DataRetrievalError::DecodeFailed(err) => write!(f, "Image could not be decoded: {}", err),
            DataRetrievalError::WorkerDisconnected => write!(f, "Background task ended without a result"),
        }
    }
}

impl From<RequestError> for DataRetrievalError {
    fn from(error: RequestError) -> Self {
        Self::RequestFailed(error)
    }
}

impl From<ImageError> for DataRetrievalError {
    fn from(error: ImageError) -> Self {
        Self::DecodeFailed(error)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use log::LevelFilter;

    use super::*;
    use crate::{
        config::Endpoints,
        service::{gameapi::transport::fake::FakeTransport, preview::encode_png},
    };

    fn manager(cache_dir: PathBuf) -> (Arc<FakeTransport>, DataManager) {
        let transport = Arc::new(FakeTransport::new());
        let config = AppConfig {
            endpoints: Endpoints {
                data_base_url: "http://data.test/v1".into(),
                cdn_base_url: "http://cdn.test/latest".into(),
                archive_base_url: "http://archive.test/skins".into(),
            },
            cache_dir,
            log_file: PathBuf::from("unused.log"),
            log_level: LevelFilter::Off,
        };
        let manager = DataManager::new(transport.clone(), &config);
        (transport, manager)
    }

    fn wait<T>(rx: Receiver<T>) -> T {
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn champions_come_back_sorted() {
        let (transport, manager) = manager(PathBuf::from("unused"));
        transport.respond_json(
            "http://data.test/v1/champion-summary.json",
            r#"[{"id": 1, "name": "Annie"}, {"id": 266, "name": "Aatrox"}, {"id": 103, "name": "Ahri"}]"#,
        );

        let names = wait(manager.get_champions())
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect_vec();
        assert_eq!(names, vec!["Aatrox", "Ahri", "Annie"]);
    }

    #[test]
    fn missing_preview_is_none_and_skips_download() {
        let (transport, manager) = manager(PathBuf::from("unused"));

        let preview = wait(manager.get_preview("http://cdn.test/latest/missing.jpg".into())).unwrap();
        assert!(preview.is_none());
        assert_eq!(transport.requests(), vec![("HEAD".to_string(), "http://cdn.test/latest/missing.jpg".to_string())]);
    }

    #[test]
    fn existing_preview_is_decoded() {
        let (transport, manager) = manager(PathBuf::from("unused"));
        transport.respond("http://cdn.test/latest/splash.png", 200, encode_png(64, 36, [9, 9, 9]));

        let preview = wait(manager.get_preview("http://cdn.test/latest/splash.png".into()))
            .unwrap()
            .unwrap();
        assert_eq!((preview.width(), preview.height()), (512, 288));
    }

    #[test]
    fn undecodable_preview_is_an_error() {
        let (transport, manager) = manager(PathBuf::from("unused"));
        transport.respond("http://cdn.test/latest/broken.png", 200, b"not a png".to_vec());

        let result = wait(manager.get_preview("http://cdn.test/latest/broken.png".into()));
        assert!(matches!(result, Err(DataRetrievalError::DecodeFailed(_))));
    }

    #[test]
    fn download_runs_in_background() {
        let root = tempfile::tempdir().unwrap();
        let (transport, manager) = manager(root.path().join("skin-cache"));
        transport.respond("http://archive.test/skins/Ahri/Arcade%20Ahri.zip", 200, b"PK".to_vec());

        let path = wait(manager.download_skin("Ahri".into(), "Arcade Ahri".into())).unwrap();
        assert_eq!(path, root.path().join("skin-cache").join("Arcade Ahri.zip"));
    }
}
