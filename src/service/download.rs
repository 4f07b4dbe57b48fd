use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;

use super::gameapi::cdragon_client::{CDragonClient, RequestError};

pub struct DownloadManager {
    client: Arc<CDragonClient>,
    cache_dir: PathBuf,
}

impl DownloadManager {
    pub fn new(client: Arc<CDragonClient>, cache_dir: PathBuf) -> Self {
        Self { client, cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Creates the cache folder (and parents) if needed.
    pub fn ensure_cache_dir(&self) -> io::Result<&Path> {
        fs::create_dir_all(&self.cache_dir)?;
        Ok(&self.cache_dir)
    }

    pub fn download_skin(&self, champion: &str, skin_name: &str) -> Result<PathBuf, RequestError> {
        let cache_dir = self.ensure_cache_dir()?;
        let path = self
            .client
            .download_archive(champion, &archive_file_name(skin_name), cache_dir)?;

        info!("Downloaded '{}' of {} to {}", skin_name, champion, path.display());
        Ok(path)
    }
}

pub fn archive_file_name(skin_name: &str) -> String {
    format!("{}.zip", skin_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Endpoints, service::gameapi::transport::fake::FakeTransport};

    fn manager(cache_dir: PathBuf) -> (Arc<FakeTransport>, DownloadManager) {
        let transport = Arc::new(FakeTransport::new());
        let endpoints = Endpoints {
            data_base_url: "http://data.test/v1".into(),
            cdn_base_url: "http://cdn.test/latest".into(),
            archive_base_url: "http://archive.test/skins".into(),
        };
        let client = Arc::new(CDragonClient::new(transport.clone(), endpoints));
        (transport, DownloadManager::new(client, cache_dir))
    }

    #[test]
    fn creates_nested_cache_dir_on_download() {
        let root = tempfile::tempdir().unwrap();
        let cache_dir = root.path().join("Documents").join("skin-cache");
        let (transport, manager) = manager(cache_dir.clone());
        transport.respond("http://archive.test/skins/Annie/Goth%20Annie.zip", 200, b"PK".to_vec());

        let path = manager.download_skin("Annie", "Goth Annie").unwrap();

        assert_eq!(path, cache_dir.join("Goth Annie.zip"));
        assert_eq!(fs::read(path).unwrap(), b"PK");
    }

    #[test]
    fn ensure_cache_dir_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let (_, manager) = manager(root.path().join("skin-cache"));

        manager.ensure_cache_dir().unwrap();
        manager.ensure_cache_dir().unwrap();
        assert!(manager.cache_dir().is_dir());
    }

    #[test]
    fn network_errors_propagate() {
        let root = tempfile::tempdir().unwrap();
        let (_, manager) = manager(root.path().join("skin-cache"));

        let err = manager.download_skin("Annie", "Goth Annie").unwrap_err();
        assert!(matches!(err, RequestError::Status { status: 404, .. }));
        assert_eq!(fs::read_dir(manager.cache_dir()).unwrap().count(), 0);
    }

    #[test]
    fn unusable_cache_dir_is_a_filesystem_error() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("skin-cache");
        fs::write(&blocker, b"not a folder").unwrap();
        let (_, manager) = manager(blocker);

        let err = manager.download_skin("Annie", "Goth Annie").unwrap_err();
        assert!(matches!(err, RequestError::Filesystem(_)));
    }
}
