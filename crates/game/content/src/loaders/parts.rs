//! Character-part catalog loader.

use std::path::Path;

use hearth_core::CharacterParts;

use crate::loaders::{LoadResult, read_file};

/// Loader for the character-part catalog from RON files.
pub struct PartsLoader;

impl PartsLoader {
    pub fn load(path: &Path) -> LoadResult<CharacterParts> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses and sanity-checks the catalog: the creation sequencer
    /// cycles every list, so none may be empty and the male prefix must
    /// fit inside the body list.
    pub fn parse(content: &str) -> LoadResult<CharacterParts> {
        let parts: CharacterParts = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character parts RON: {}", e))?;
        if parts.num_male_bodies > parts.bodies.len() {
            anyhow::bail!(
                "num_male_bodies ({}) exceeds body list length ({})",
                parts.num_male_bodies,
                parts.bodies.len()
            );
        }
        let lists: [(&str, usize); 8] = [
            ("bodies", parts.bodies.len()),
            ("male_eyes", parts.male_eyes.len()),
            ("male_hair", parts.male_hair.len()),
            ("male_outfits", parts.male_outfits.len()),
            ("female_eyes", parts.female_eyes.len()),
            ("female_hair", parts.female_hair.len()),
            ("female_outfits", parts.female_outfits.len()),
            ("hair_colors", parts.hair_colors.len()),
        ];
        for (name, len) in lists {
            if len == 0 {
                anyhow::bail!("Character part list {} must not be empty", name);
            }
        }
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"(
        bodies: [Some("body_m0"), Some("body_m1"), Some("body_f0"), Some("body_f1")],
        num_male_bodies: 2,
        male_eyes: [Some("m_eyes_0"), None],
        male_hair: [Some("m_hair_0")],
        male_outfits: [Some("m_cleric"), Some("m_warrior"), Some("m_wizard")],
        female_eyes: [Some("f_eyes_0")],
        female_hair: [Some("f_hair_0"), Some("f_hair_1")],
        female_outfits: [Some("f_cleric"), Some("f_warrior"), Some("f_wizard")],
        hair_colors: [(r: 40, g: 20, b: 10, a: 255), (r: 220, g: 180, b: 90, a: 255)],
    )"#;

    #[test]
    fn parses_parts_catalog_ron() {
        let parts = PartsLoader::parse(SAMPLE).unwrap();
        assert_eq!(parts.bodies.len(), 4);
        assert!(parts.is_male(1));
        assert!(!parts.is_male(2));
        // None entries are valid selections with an empty visual slot.
        assert_eq!(parts.male_eyes[1], None);
    }

    #[test]
    fn rejects_male_prefix_longer_than_body_list() {
        let bad = SAMPLE.replace("num_male_bodies: 2", "num_male_bodies: 9");
        assert!(PartsLoader::parse(&bad).is_err());
    }

    #[test]
    fn rejects_empty_lists() {
        let bad = SAMPLE.replace(
            r#"male_hair: [Some("m_hair_0")],"#,
            "male_hair: [],",
        );
        assert!(PartsLoader::parse(&bad).is_err());
    }
}
