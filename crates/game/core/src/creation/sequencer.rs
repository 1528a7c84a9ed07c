//! The character-creation finite state machine.

use crate::state::Rgba;

use super::parts::CharacterParts;

/// Strictly linear creation stages. `Done` is terminal: the sequencer is
/// inert until restarted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreationStage {
    SelectBase,
    SelectEyes,
    SelectHair,
    SelectHairColor,
    SelectClass,
    Done,
}

/// Discrete input edges consumed by the sequencer, one per logical tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreationInput {
    Previous,
    Next,
    Confirm,
}

/// The finalized choice set sent to the server exactly once per creation
/// cycle. Body index spans the combined male+female list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreationRequest {
    pub controller_index: u8,
    pub body: u16,
    pub eyes: u16,
    pub hair: u16,
    pub hair_color: u16,
    pub class: u16,
}

/// Initial preview indices, drawn from the male lists (the panel opens
/// showing a random male look, hair color 0). The caller supplies the
/// randomness; the sequencer itself stays deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CreationSeeds {
    pub body: usize,
    pub eyes: usize,
    pub hair: usize,
    pub outfit: usize,
}

/// What the creation panel should currently display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewEntry {
    /// Sprite slot; `None` leaves the image hidden.
    Sprite(Option<String>),
    Color(Rgba),
}

/// Category label plus the selected entry, handed to the display
/// collaborator after every input edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreationPreview {
    pub category: String,
    pub entry: PreviewEntry,
}

/// Per-local-player creation state machine.
///
/// Each non-terminal stage cycles one index over its catalog list with
/// wraparound; `Confirm` commits the index and advances. The base-body
/// choice decides which gendered lists the later stages use, re-derived
/// on every stage entry rather than cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreationSequencer {
    controller_index: u8,
    stage: CreationStage,
    /// Selection within the active stage's list.
    index: usize,
    seeds: CreationSeeds,

    body: usize,
    eyes: usize,
    hair: usize,
    hair_color: usize,
    class: usize,
}

impl CreationSequencer {
    /// Starts (or restarts, e.g. after death) a creation cycle.
    pub fn start(controller_index: u8, parts: &CharacterParts, seeds: CreationSeeds) -> Self {
        let mut sequencer = Self {
            controller_index,
            stage: CreationStage::SelectBase,
            index: 0,
            seeds,
            body: 0,
            eyes: 0,
            hair: 0,
            hair_color: 0,
            class: 0,
        };
        sequencer.index = sequencer.entry_index(CreationStage::SelectBase, parts);
        sequencer
    }

    pub fn stage(&self) -> CreationStage {
        self.stage
    }

    pub fn is_done(&self) -> bool {
        self.stage == CreationStage::Done
    }

    /// Feeds one input edge. Returns the finalized request exactly when
    /// `Confirm` completes the last stage; afterwards the sequencer is
    /// inert until [`CreationSequencer::start`] is called again.
    pub fn step(
        &mut self,
        input: CreationInput,
        parts: &CharacterParts,
    ) -> Option<CreationRequest> {
        let len = self.active_len(parts);
        match input {
            CreationInput::Previous if len > 0 => {
                self.index = if self.index == 0 {
                    len - 1
                } else {
                    self.index - 1
                };
                None
            }
            CreationInput::Next if len > 0 => {
                self.index = (self.index + 1) % len;
                None
            }
            CreationInput::Confirm => self.confirm(parts),
            _ => None,
        }
    }

    /// Current panel contents for the display collaborator.
    pub fn preview(&self, parts: &CharacterParts) -> CreationPreview {
        let male = parts.is_male(self.body);
        let sprite = |list: &[Option<String>]| {
            PreviewEntry::Sprite(list.get(self.index).cloned().flatten())
        };
        match self.stage {
            CreationStage::SelectBase => CreationPreview {
                category: "Body".into(),
                entry: sprite(&parts.bodies),
            },
            CreationStage::SelectEyes => CreationPreview {
                category: "Eyes".into(),
                entry: sprite(parts.eyes(male)),
            },
            CreationStage::SelectHair => CreationPreview {
                category: "Hair".into(),
                entry: sprite(parts.hair(male)),
            },
            CreationStage::SelectHairColor => CreationPreview {
                category: "Hair Color".into(),
                entry: PreviewEntry::Color(
                    parts
                        .hair_colors
                        .get(self.index)
                        .copied()
                        .unwrap_or_default(),
                ),
            },
            CreationStage::SelectClass => CreationPreview {
                category: parts.class_name(self.index).into(),
                entry: sprite(parts.outfits(male)),
            },
            CreationStage::Done => CreationPreview {
                category: String::new(),
                entry: PreviewEntry::Sprite(None),
            },
        }
    }

    fn confirm(&mut self, parts: &CharacterParts) -> Option<CreationRequest> {
        let next = match self.stage {
            CreationStage::SelectBase => {
                self.body = self.index;
                CreationStage::SelectEyes
            }
            CreationStage::SelectEyes => {
                self.eyes = self.index;
                CreationStage::SelectHair
            }
            CreationStage::SelectHair => {
                self.hair = self.index;
                CreationStage::SelectHairColor
            }
            CreationStage::SelectHairColor => {
                self.hair_color = self.index;
                CreationStage::SelectClass
            }
            CreationStage::SelectClass => {
                self.class = self.index;
                self.stage = CreationStage::Done;
                return Some(self.request());
            }
            CreationStage::Done => return None,
        };
        self.stage = next;
        self.index = self.entry_index(next, parts);
        None
    }

    /// Seeds the visible selection on stage entry: the randomized male
    /// preview index when it still matches the active list, else 0. The
    /// gendered list choice is re-derived from the committed body here,
    /// every time a stage is entered.
    fn entry_index(&self, stage: CreationStage, parts: &CharacterParts) -> usize {
        let male = parts.is_male(self.body);
        let seeded = |seed: usize, len: usize| {
            if male && seed < len { seed } else { 0 }
        };
        match stage {
            CreationStage::SelectBase => {
                if self.seeds.body < parts.bodies.len() {
                    self.seeds.body
                } else {
                    0
                }
            }
            CreationStage::SelectEyes => seeded(self.seeds.eyes, parts.eyes(male).len()),
            CreationStage::SelectHair => seeded(self.seeds.hair, parts.hair(male).len()),
            CreationStage::SelectHairColor => 0,
            CreationStage::SelectClass => seeded(self.seeds.outfit, parts.outfits(male).len()),
            CreationStage::Done => 0,
        }
    }

    fn active_len(&self, parts: &CharacterParts) -> usize {
        let male = parts.is_male(self.body);
        match self.stage {
            CreationStage::SelectBase => parts.bodies.len(),
            CreationStage::SelectEyes => parts.eyes(male).len(),
            CreationStage::SelectHair => parts.hair(male).len(),
            CreationStage::SelectHairColor => parts.hair_colors.len(),
            CreationStage::SelectClass => parts.outfits(male).len(),
            CreationStage::Done => 0,
        }
    }

    fn request(&self) -> CreationRequest {
        CreationRequest {
            controller_index: self.controller_index,
            body: self.body as u16,
            eyes: self.eyes as u16,
            hair: self.hair as u16,
            hair_color: self.hair_color as u16,
            class: self.class as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creation::parts::tests::sample_parts;

    fn confirm(seq: &mut CreationSequencer, parts: &CharacterParts) -> Option<CreationRequest> {
        seq.step(CreationInput::Confirm, parts)
    }

    #[test]
    fn next_wraps_around_at_the_end_of_the_list() {
        let mut parts = sample_parts();
        parts.bodies.truncate(4);
        parts.num_male_bodies = 4;
        let seeds = CreationSeeds {
            body: 3,
            ..Default::default()
        };
        let mut seq = CreationSequencer::start(0, &parts, seeds);
        assert_eq!(
            seq.preview(&parts).entry,
            PreviewEntry::Sprite(Some("body_3".into()))
        );
        seq.step(CreationInput::Next, &parts);
        assert_eq!(
            seq.preview(&parts).entry,
            PreviewEntry::Sprite(Some("body_0".into()))
        );
    }

    #[test]
    fn previous_wraps_to_the_last_entry() {
        let parts = sample_parts();
        let mut seq = CreationSequencer::start(0, &parts, CreationSeeds::default());
        seq.step(CreationInput::Previous, &parts);
        confirm(&mut seq, &parts);
        // Confirmed body index 7, a female body.
        let request = drive_to_done(&mut seq, &parts);
        assert_eq!(request.body, 7);
    }

    fn drive_to_done(seq: &mut CreationSequencer, parts: &CharacterParts) -> CreationRequest {
        loop {
            if let Some(request) = seq.step(CreationInput::Confirm, parts) {
                return request;
            }
            assert!(!seq.is_done());
        }
    }

    #[test]
    fn full_cycle_emits_one_request_then_goes_inert() {
        let parts = sample_parts();
        let mut seq = CreationSequencer::start(2, &parts, CreationSeeds::default());
        let stages = [
            CreationStage::SelectBase,
            CreationStage::SelectEyes,
            CreationStage::SelectHair,
            CreationStage::SelectHairColor,
            CreationStage::SelectClass,
        ];
        for expected in &stages[..4] {
            assert_eq!(seq.stage(), *expected);
            assert!(seq.step(CreationInput::Confirm, &parts).is_none());
        }
        assert_eq!(seq.stage(), stages[4]);
        seq.step(CreationInput::Next, &parts);
        let request = seq.step(CreationInput::Confirm, &parts).unwrap();
        assert_eq!(request.controller_index, 2);
        assert_eq!(request.class, 1);
        assert!(seq.is_done());
        // Inert after Done: no further requests, no stage changes.
        assert!(seq.step(CreationInput::Confirm, &parts).is_none());
        assert!(seq.step(CreationInput::Next, &parts).is_none());
        assert_eq!(seq.stage(), CreationStage::Done);
    }

    #[test]
    fn female_body_switches_the_gendered_lists() {
        let parts = sample_parts();
        let mut seq = CreationSequencer::start(0, &parts, CreationSeeds::default());
        // Move to body index 5 (female) and confirm.
        for _ in 0..5 {
            seq.step(CreationInput::Next, &parts);
        }
        confirm(&mut seq, &parts);
        assert_eq!(seq.stage(), CreationStage::SelectEyes);
        // Female eyes list has 4 entries: index 3 reachable, index 4 wraps.
        for _ in 0..3 {
            seq.step(CreationInput::Next, &parts);
        }
        let preview = seq.preview(&parts);
        assert_eq!(preview.entry, PreviewEntry::Sprite(Some("f_eyes_3".into())));
        seq.step(CreationInput::Next, &parts);
        assert_eq!(
            seq.preview(&parts).entry,
            PreviewEntry::Sprite(Some("f_eyes_0".into()))
        );
    }

    #[test]
    fn male_seeds_apply_only_while_the_male_lists_are_active() {
        let parts = sample_parts();
        let seeds = CreationSeeds {
            body: 1,
            eyes: 2,
            hair: 4,
            outfit: 1,
        };
        // Male path keeps the randomized preview.
        let mut seq = CreationSequencer::start(0, &parts, seeds);
        confirm(&mut seq, &parts);
        assert_eq!(
            seq.preview(&parts).entry,
            PreviewEntry::Sprite(Some("m_eyes_2".into()))
        );

        // Female path falls back to index 0.
        let mut seq = CreationSequencer::start(0, &parts, seeds);
        for _ in 0..4 {
            seq.step(CreationInput::Next, &parts);
        }
        confirm(&mut seq, &parts);
        assert_eq!(
            seq.preview(&parts).entry,
            PreviewEntry::Sprite(Some("f_eyes_0".into()))
        );
    }

    #[test]
    fn hair_color_stage_previews_colors() {
        let parts = sample_parts();
        let mut seq = CreationSequencer::start(0, &parts, CreationSeeds::default());
        confirm(&mut seq, &parts); // body
        confirm(&mut seq, &parts); // eyes
        confirm(&mut seq, &parts); // hair
        assert_eq!(seq.stage(), CreationStage::SelectHairColor);
        seq.step(CreationInput::Next, &parts);
        let preview = seq.preview(&parts);
        assert_eq!(preview.category, "Hair Color");
        assert_eq!(preview.entry, PreviewEntry::Color(parts.hair_colors[1]));
    }

    #[test]
    fn class_stage_shows_class_names() {
        let parts = sample_parts();
        let mut seq = CreationSequencer::start(0, &parts, CreationSeeds::default());
        for _ in 0..4 {
            confirm(&mut seq, &parts);
        }
        assert_eq!(seq.stage(), CreationStage::SelectClass);
        assert_eq!(seq.preview(&parts).category, "Cleric");
        seq.step(CreationInput::Next, &parts);
        assert_eq!(seq.preview(&parts).category, "Warrior");
    }
}
