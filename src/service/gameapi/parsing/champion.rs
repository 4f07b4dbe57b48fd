use json::{object::Object, JsonValue};

use crate::model::champion::{Champion, ChampionDetail, Chroma, Skin};

use super::ParsingError;

pub fn parse_champion_summary(json: &JsonValue) -> Result<Vec<Champion>, ParsingError> {
    if let JsonValue::Array(array) = json {
        let mut champions = Vec::new();

        for champ_entry in array {
            if let JsonValue::Object(champ_obj) = champ_entry {
                let champ = parse_summary_obj(champ_obj)?;
                if champ.id.0 == -1 {
                    continue;
                }
                champions.push(champ);
            } else {
                return Err(ParsingError::InvalidType("champ entry".into()));
            }
        }

        return Ok(champions);
    }

    Err(ParsingError::InvalidType("root".into()))
}

pub fn parse_champion_detail(json: &JsonValue) -> Result<ChampionDetail, ParsingError> {
    let JsonValue::Object(champ_obj) = json else {
        return Err(ParsingError::InvalidType("root".into()));
    };

    let champ_id = champ_obj["id"].as_i32().ok_or(ParsingError::InvalidType("id".into()))?;
    let name = champ_obj["name"].as_str().unwrap_or_default();

    let JsonValue::Array(skin_array) = &champ_obj["skins"] else {
        return Err(ParsingError::InvalidType("skins".into()));
    };

    let mut skins = Vec::with_capacity(skin_array.len());
    for skin_entry in skin_array {
        if let JsonValue::Object(skin_obj) = skin_entry {
            skins.push(parse_skin_obj(skin_obj)?);
        } else {
            return Err(ParsingError::InvalidType("skin entry".into()));
        }
    }

    Ok(ChampionDetail {
        id: champ_id.into(),
        name: name.to_string(),
        skins,
    })
}

fn parse_summary_obj(obj: &Object) -> Result<Champion, ParsingError> {
    let champ_id = obj["id"].as_i32().ok_or(ParsingError::InvalidType("id".into()))?;
    let name = obj["name"].as_str().ok_or(ParsingError::InvalidType("name".into()))?;

    Ok(Champion {
        id: champ_id.into(),
        name: name.to_string(),
    })
}

fn parse_skin_obj(obj: &Object) -> Result<Skin, ParsingError> {
    let name = obj["name"].as_str().ok_or(ParsingError::InvalidType("skin/name".into()))?;
    let is_base = obj["isBase"].as_bool().unwrap_or(false);
    let splash_path = optional_path(&obj["splashPath"]);

    let chromas = match &obj["chromas"] {
        JsonValue::Array(chroma_array) => {
            let mut chromas = Vec::with_capacity(chroma_array.len());
            for chroma_entry in chroma_array {
                if let JsonValue::Object(chroma_obj) = chroma_entry {
                    chromas.push(parse_chroma_obj(chroma_obj)?);
                } else {
                    return Err(ParsingError::InvalidType("chroma entry".into()));
                }
            }
            chromas
        }
        JsonValue::Null => Vec::new(),
        _ => return Err(ParsingError::InvalidType("chromas".into())),
    };

    Ok(Skin {
        name: name.to_string(),
        is_base,
        splash_path,
        chromas,
    })
}

fn parse_chroma_obj(obj: &Object) -> Result<Chroma, ParsingError> {
    let name = obj["name"].as_str().ok_or(ParsingError::InvalidType("chroma/name".into()))?;
    // Live catalog data only carries `chromaPath` for chromas
    let splash_path = optional_path(&obj["splashPath"]).or_else(|| optional_path(&obj["chromaPath"]));

    Ok(Chroma {
        name: name.to_string(),
        splash_path,
    })
}

fn optional_path(value: &JsonValue) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}
