use super::ids::ChampionId;

/// Placeholder value shown in the chroma selector when a skin has no chromas.
pub const NO_CHROMA: &str = "—";

#[derive(Debug, Clone, PartialEq)]
pub struct Champion {
    pub id: ChampionId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionDetail {
    pub id: ChampionId,
    pub name: String,
    pub skins: Vec<Skin>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skin {
    pub name: String,
    pub is_base: bool,
    pub splash_path: Option<String>,
    pub chromas: Vec<Chroma>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chroma {
    pub name: String,
    pub splash_path: Option<String>,
}

impl ChampionDetail {
    pub fn selectable_skins(&self) -> impl Iterator<Item = &Skin> {
        self.skins.iter().filter(|s| !s.is_base)
    }
}

impl Skin {
    pub fn chroma_names(&self) -> Vec<String> {
        self.chromas.iter().map(|c| c.name.clone()).collect()
    }
}
