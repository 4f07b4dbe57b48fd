use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::{
    model::champion::{Champion, ChampionDetail, NO_CHROMA},
    service::{
        catalog::Catalog,
        data_manager::{DataManager, DataRetrievalResult},
        preview::PreviewImage,
        reveal::{RevealInFileBrowser, RevealOutcome},
    },
    ui::{
        async_data::{drain_finished, AsyncData},
        selector::Selector,
    },
};

pub const PREVIEW_UNAVAILABLE: &str = "[Preview unavailable]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStage {
    Idle,
    ChampionChosen,
    SkinChosen,
    ChromaChosen,
}

impl BrowserStage {
    /// What the user is expected to do next.
    pub fn hint(self) -> &'static str {
        match self {
            BrowserStage::Idle => "pick a champion",
            BrowserStage::ChampionChosen => "pick a skin",
            BrowserStage::SkinChosen => "pick a chroma or download",
            BrowserStage::ChromaChosen => "ready to download",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Champion,
    Skin,
    Chroma,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Champion => Field::Skin,
            Field::Skin => Field::Chroma,
            Field::Chroma => Field::Champion,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Field::Champion => Field::Chroma,
            Field::Skin => Field::Champion,
            Field::Chroma => Field::Skin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A message box that stays on screen until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct PreviewPane {
    image: Option<PreviewImage>,
    overlay: Option<String>,
}

impl PreviewPane {
    pub fn image(&self) -> Option<&PreviewImage> {
        self.image.as_ref()
    }

    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }
}

struct PendingDownload {
    skin: String,
    task: AsyncData<PathBuf>,
}

/// Champion → skin → chroma selection flow. Lives on the UI thread; workers only hand results back.
pub struct SkinBrowser {
    manager: DataManager,
    file_browser: Box<dyn RevealInFileBrowser>,
    catalog: Catalog,
    champions: Selector,
    skins: Selector,
    chromas: Selector,
    stage: BrowserStage,
    status: String,
    notice: Option<Notice>,
    preview: PreviewPane,
    generation: u64,
    catalog_generation: u64,
    catalog_tasks: Vec<AsyncData<Vec<Champion>>>,
    detail_tasks: Vec<AsyncData<ChampionDetail>>,
    preview_tasks: Vec<AsyncData<Option<PreviewImage>>>,
    download_tasks: Vec<PendingDownload>,
}

impl SkinBrowser {
    pub fn new(manager: DataManager, file_browser: Box<dyn RevealInFileBrowser>) -> Self {
        Self {
            manager,
            file_browser,
            catalog: Catalog::new(),
            champions: Selector::new("Champion"),
            skins: Selector::new("Skin"),
            chromas: Selector::new("Chroma"),
            stage: BrowserStage::Idle,
            status: String::new(),
            notice: None,
            preview: PreviewPane::default(),
            generation: 0,
            catalog_generation: 0,
            catalog_tasks: Vec::new(),
            detail_tasks: Vec::new(),
            preview_tasks: Vec::new(),
            download_tasks: Vec::new(),
        }
    }

    pub fn stage(&self) -> BrowserStage {
        self.stage
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn preview(&self) -> &PreviewPane {
        &self.preview
    }

    pub fn is_preview_loading(&self) -> bool {
        self.preview_tasks.iter().any(|t| t.generation() == self.generation)
    }

    pub fn has_pending_tasks(&self) -> bool {
        !(self.catalog_tasks.is_empty()
            && self.detail_tasks.is_empty()
            && self.preview_tasks.is_empty()
            && self.download_tasks.is_empty())
    }

    pub fn cache_dir(&self) -> &Path {
        self.manager.cache_dir()
    }

    pub fn selector(&self, field: Field) -> &Selector {
        match field {
            Field::Champion => &self.champions,
            Field::Skin => &self.skins,
            Field::Chroma => &self.chromas,
        }
    }

    pub fn selector_mut(&mut self, field: Field) -> &mut Selector {
        match field {
            Field::Champion => &mut self.champions,
            Field::Skin => &mut self.skins,
            Field::Chroma => &mut self.chromas,
        }
    }

    /// Commits the highlighted entry of `field`.
    pub fn select_highlighted(&mut self, field: Field) {
        let Some(name) = self.selector(field).highlighted().map(str::to_string) else {
            return;
        };
        match field {
            Field::Champion => self.select_champion(&name),
            Field::Skin => self.select_skin(&name),
            Field::Chroma => self.select_chroma(&name),
        }
    }

    pub fn load_catalog(&mut self) {
        self.catalog_generation += 1;
        self.status = "Loading champions…".into();
        info!("Loading champion catalog");

        let task = AsyncData::new(self.catalog_generation, self.manager.get_champions());
        self.catalog_tasks.push(task);
    }

    pub fn select_champion(&mut self, name: &str) {
        let id = match self.catalog.find_champion(name) {
            Ok(champion) => champion.id,
            Err(err) => {
                self.status = err.to_string();
                return;
            }
        };

        self.champions.choose(name);
        self.generation += 1;
        self.stage = BrowserStage::ChampionChosen;
        self.catalog.clear_detail();
        self.skins.clear();
        self.chromas.clear();
        self.status = "Loading skins…".into();
        debug!("Requesting detail of {} ({}) at generation {}", name, id, self.generation);

        let task = AsyncData::new(self.generation, self.manager.get_champion_detail(id));
        self.detail_tasks.push(task);
    }

    pub fn select_skin(&mut self, name: &str) {
        let skin = match self.catalog.find_skin(name) {
            Ok(skin) => skin.clone(),
            Err(err) => {
                self.status = err.to_string();
                return;
            }
        };

        self.skins.choose(name);
        self.generation += 1;
        self.stage = BrowserStage::SkinChosen;

        let chroma_names = skin.chroma_names();
        match chroma_names.first().cloned() {
            Some(first) => {
                self.chromas.set_options(chroma_names);
                self.chromas.choose(&first);
            }
            None => {
                self.chromas.set_options(vec![NO_CHROMA.to_string()]);
                self.chromas.choose(NO_CHROMA);
            }
        }

        self.show_preview(skin.splash_path.as_deref());
    }

    pub fn select_chroma(&mut self, name: &str) {
        if name.is_empty() || name == NO_CHROMA {
            return;
        }
        let Some(skin_name) = self.skins.chosen().map(str::to_string) else {
            return;
        };

        let chroma = match self.catalog.find_chroma(&skin_name, name) {
            Ok(chroma) => chroma.clone(),
            Err(err) => {
                self.status = err.to_string();
                return;
            }
        };

        self.chromas.choose(name);
        self.generation += 1;
        self.stage = BrowserStage::ChromaChosen;
        self.show_preview(chroma.splash_path.as_deref());
    }

    pub fn download_selected(&mut self) {
        let (Some(champion), Some(skin)) = (self.champions.chosen(), self.skins.chosen()) else {
            self.notice = Some(Notice {
                kind: NoticeKind::Warning,
                title: "Missing selection".into(),
                message: "Choose a champion and a skin.".into(),
            });
            return;
        };
        let (champion, skin) = (champion.to_string(), skin.to_string());

        self.status = "Downloading…".into();
        info!("Downloading '{}' of {}", skin, champion);

        let task = AsyncData::new(self.generation, self.manager.download_skin(champion, skin.clone()));
        self.download_tasks.push(PendingDownload { skin, task });
    }

    pub fn open_cache_folder(&mut self) {
        match self.manager.ensure_cache_dir().map(Path::to_path_buf) {
            Ok(dir) => self.reveal(&dir),
            Err(err) => self.status = format!("Cache folder unavailable: {}", err),
        }
    }

    /// Applies every finished background result. Results from superseded selections are dropped.
    pub fn poll(&mut self) {
        for (generation, result) in drain_finished(&mut self.catalog_tasks) {
            if generation == self.catalog_generation {
                self.apply_catalog(result);
            } else {
                debug!("Dropping stale catalog (generation {})", generation);
            }
        }

        for (generation, result) in drain_finished(&mut self.detail_tasks) {
            if generation == self.generation {
                self.apply_detail(result);
            } else {
                debug!(
                    "Dropping stale champion detail (generation {}, current {})",
                    generation, self.generation
                );
            }
        }

        for (generation, result) in drain_finished(&mut self.preview_tasks) {
            if generation == self.generation {
                self.apply_preview(result);
            } else {
                debug!(
                    "Dropping stale preview (generation {}, current {})",
                    generation, self.generation
                );
            }
        }

        let mut finished = Vec::new();
        self.download_tasks.retain(|download| match download.task.try_take() {
            Some(result) => {
                finished.push((download.skin.clone(), result));
                false
            }
            None => true,
        });
        for (skin, result) in finished {
            self.apply_download(&skin, result);
        }
    }

    fn apply_catalog(&mut self, result: DataRetrievalResult<Vec<Champion>>) {
        // Anything still in flight belongs to the previous catalog
        self.generation += 1;
        self.stage = BrowserStage::Idle;
        self.skins.clear();
        self.chromas.clear();

        match result {
            Ok(champions) => {
                self.catalog.set_champions(champions);
                self.champions.set_options(self.catalog.champion_names());
                self.status = "Choose a champion.".into();
            }
            Err(err) => {
                warn!("Catalog load failed: {}", err);
                self.catalog.set_champions(Vec::new());
                self.champions.clear();
                self.status = format!("Error loading champions: {}", err);
            }
        }
    }

    fn apply_detail(&mut self, result: DataRetrievalResult<ChampionDetail>) {
        match result {
            Ok(detail) => {
                self.catalog.set_detail(detail);
                self.skins.set_options(self.catalog.selectable_skin_names());
                self.status = "Select a skin.".into();
            }
            Err(err) => {
                warn!("Champion detail load failed: {}", err);
                self.skins.clear();
                self.status = format!("Error loading skins: {}", err);
            }
        }
    }

    fn show_preview(&mut self, splash_path: Option<&str>) {
        let url = self.manager.resolve_asset_url(splash_path.unwrap_or_default());
        if url.is_empty() {
            self.preview.overlay = Some(PREVIEW_UNAVAILABLE.into());
            return;
        }

        debug!("Requesting preview {} at generation {}", url, self.generation);
        let task = AsyncData::new(self.generation, self.manager.get_preview(url));
        self.preview_tasks.push(task);
    }

    fn apply_preview(&mut self, result: DataRetrievalResult<Option<PreviewImage>>) {
        match result {
            Ok(Some(image)) => {
                self.preview.image = Some(image);
                self.preview.overlay = None;
            }
            Ok(None) => self.preview.overlay = Some(PREVIEW_UNAVAILABLE.into()),
            Err(err) => {
                debug!("Preview failed: {}", err);
                self.preview.overlay = Some(format!("[Preview failed] {}", err));
            }
        }
    }

    fn apply_download(&mut self, skin: &str, result: DataRetrievalResult<PathBuf>) {
        match result {
            Ok(path) => {
                self.status = "Download finished.".into();
                self.notice = Some(Notice {
                    kind: NoticeKind::Info,
                    title: "Success".into(),
                    message: format!("The skin '{}' was downloaded.", skin),
                });
                self.reveal(&path);
            }
            Err(err) => {
                warn!("Download of '{}' failed: {}", skin, err);
                self.status = "Download error".into();
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    title: "Error".into(),
                    message: err.to_string(),
                });
            }
        }
    }

    fn reveal(&self, path: &Path) {
        match self.file_browser.reveal(path) {
            Ok(RevealOutcome::Opened) => info!("Revealed {}", path.display()),
            Ok(RevealOutcome::Unsupported) => debug!("No file browser integration for {}", path.display()),
            Err(err) => warn!("Could not reveal {}: {}", path.display(), err),
        }
    }
}
