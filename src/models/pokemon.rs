//! Pokémon card model

use serde::{Deserialize, Serialize};

/// Base URL for official artwork PNGs, keyed by national dex number
pub const ARTWORK_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// One entry in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// National dex number
    pub number: u32,
    /// Lowercase species name
    pub name: String,
    /// Lowercase primary type
    pub kind: String,
    /// Artwork location, used verbatim as the image cache key
    pub image_url: String,
}

impl Pokemon {
    /// Create an entry pointing at its official artwork
    pub fn new(number: u32, name: &str, kind: &str) -> Self {
        Self {
            number,
            name: name.to_string(),
            kind: kind.to_string(),
            image_url: Self::artwork_url(number),
        }
    }

    /// Official artwork URL for a dex number
    pub fn artwork_url(number: u32) -> String {
        format!("{ARTWORK_BASE_URL}/{number}.png")
    }

    /// Name as shown on the card
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }

    /// Type as shown on the card
    pub fn display_kind(&self) -> String {
        capitalize(&self.kind)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
