use std::fmt;

use itertools::Itertools;

use crate::model::champion::{Champion, ChampionDetail, Chroma, Skin};

/// The loaded champion list plus the detail of at most one champion.
#[derive(Debug, Default)]
pub struct Catalog {
    champions: Vec<Champion>,
    detail: Option<ChampionDetail>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_champions(&mut self, champions: Vec<Champion>) {
        self.champions = champions;
        self.detail = None;
    }

    pub fn champion_names(&self) -> Vec<String> {
        self.champions.iter().map(|c| c.name.clone()).collect_vec()
    }

    pub fn set_detail(&mut self, detail: ChampionDetail) {
        self.detail = Some(detail);
    }

    pub fn clear_detail(&mut self) {
        self.detail = None;
    }

    /// Exact match, first one wins.
    pub fn find_champion(&self, name: &str) -> Result<&Champion, LookupError> {
        self.champions
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| LookupError::Champion(name.to_string()))
    }

    pub fn find_skin(&self, name: &str) -> Result<&Skin, LookupError> {
        let detail = self.detail.as_ref().ok_or(LookupError::NoDetail)?;
        detail
            .skins
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| LookupError::Skin {
                champion: detail.name.clone(),
                skin: name.to_string(),
            })
    }

    pub fn find_chroma(&self, skin_name: &str, chroma_name: &str) -> Result<&Chroma, LookupError> {
        let skin = self.find_skin(skin_name)?;
        skin.chromas
            .iter()
            .find(|c| c.name == chroma_name)
            .ok_or_else(|| LookupError::Chroma {
                skin: skin.name.clone(),
                chroma: chroma_name.to_string(),
            })
    }

    pub fn selectable_skin_names(&self) -> Vec<String> {
        match &self.detail {
            Some(detail) => detail.selectable_skins().map(|s| s.name.clone()).collect_vec(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum LookupError {
    Champion(String),
    NoDetail,
    Skin { champion: String, skin: String },
    Chroma { skin: String, chroma: String },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LookupError::Champion(name) => write!(f, "Champion not found: {}", name),
            LookupError::NoDetail => write!(f, "No champion details loaded yet"),
            LookupError::Skin { champion, skin } => {
                write!(f, "Skin '{}' not listed for champion '{}'", skin, champion)
            }
            LookupError::Chroma { skin, chroma } => {
                write!(f, "Chroma '{}' not listed for skin '{}'", chroma, skin)
            }
        }
    }
}
