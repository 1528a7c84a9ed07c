//! Static character-part catalog.

use crate::state::Rgba;

use super::sequencer::CreationRequest;

/// Customization catalog a player cycles through while creating a
/// character.
///
/// The body list is a combined male+female list: the first
/// `num_male_bodies` entries are male. Eyes/hair/outfit lists are split
/// per gender and indexed independently. A `None` entry is a valid
/// selection whose visual slot simply stays empty.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterParts {
    pub bodies: Vec<Option<String>>,
    pub num_male_bodies: usize,

    pub male_eyes: Vec<Option<String>>,
    pub male_hair: Vec<Option<String>>,
    pub male_outfits: Vec<Option<String>>,

    pub female_eyes: Vec<Option<String>>,
    pub female_hair: Vec<Option<String>>,
    pub female_outfits: Vec<Option<String>>,

    pub hair_colors: Vec<Rgba>,
}

/// Validation failure for a creation request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CreationError {
    #[error("{field} index {index} out of range (catalog has {len})")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },
}

impl CharacterParts {
    /// A body index in the male prefix of the combined list is male.
    #[inline]
    pub fn is_male(&self, body_index: usize) -> bool {
        body_index < self.num_male_bodies
    }

    /// Splits a combined body index into gender and per-gender local
    /// index. The female offset subtraction happens here, exactly once.
    pub fn local_body_index(&self, body_index: usize) -> (bool, usize) {
        if self.is_male(body_index) {
            (true, body_index)
        } else {
            (false, body_index - self.num_male_bodies)
        }
    }

    pub fn eyes(&self, male: bool) -> &[Option<String>] {
        if male { &self.male_eyes } else { &self.female_eyes }
    }

    pub fn hair(&self, male: bool) -> &[Option<String>] {
        if male { &self.male_hair } else { &self.female_hair }
    }

    pub fn outfits(&self, male: bool) -> &[Option<String>] {
        if male {
            &self.male_outfits
        } else {
            &self.female_outfits
        }
    }

    pub fn class_name(&self, class_index: usize) -> &'static str {
        match class_index {
            0 => "Cleric",
            1 => "Warrior",
            2 => "Wizard",
            _ => "Class",
        }
    }

    /// Server-side bounds check of a received creation request. The
    /// client-side sequencer keeps indices in range, but that is
    /// advisory only and never trusted.
    pub fn validate(&self, request: &CreationRequest) -> Result<(), CreationError> {
        let check = |field: &'static str, index: usize, len: usize| {
            if index < len {
                Ok(())
            } else {
                Err(CreationError::IndexOutOfRange { field, index, len })
            }
        };
        check("body", request.body as usize, self.bodies.len())?;
        let male = self.is_male(request.body as usize);
        check("eyes", request.eyes as usize, self.eyes(male).len())?;
        check("hair", request.hair as usize, self.hair(male).len())?;
        check(
            "hair color",
            request.hair_color as usize,
            self.hair_colors.len(),
        )?;
        check("class", request.class as usize, self.outfits(male).len())?;
        Ok(())
    }
}
