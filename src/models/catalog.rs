//! The fixed list of Pokémon shown by Dexter

use super::Pokemon;

/// (number, name, type) for every card, in display order
const ENTRIES: &[(u32, &str, &str)] = &[
    (1, "bulbasaur", "grass"),
    (4, "charmander", "fire"),
    (7, "squirtle", "water"),
    (10, "caterpie", "bug"),
    (16, "pidgey", "flying"),
    (25, "pikachu", "electric"),
    (35, "clefairy", "fairy"),
    (37, "vulpix", "fire"),
    (52, "meowth", "normal"),
    (63, "abra", "psychic"),
    (77, "ponyta", "fire"),
];

/// Build the catalog
pub fn catalog() -> Vec<Pokemon> {
    ENTRIES
        .iter()
        .map(|&(number, name, kind)| Pokemon::new(number, name, kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_order() {
        let list = catalog();
        assert_eq!(list.len(), 11);
        assert_eq!(list[0].name, "bulbasaur");
        assert_eq!(list[5].name, "pikachu");
        assert_eq!(list[10].name, "ponyta");
    }

    #[test]
    fn test_catalog_urls_unique() {
        let list = catalog();
        let urls: HashSet<_> = list.iter().map(|p| p.image_url.as_str()).collect();
        assert_eq!(urls.len(), list.len());
        assert!(list.iter().all(|p| p.image_url.ends_with(&format!("/{}.png", p.number))));
    }
}
