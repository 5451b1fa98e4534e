use serde::{Deserialize, Serialize};

use super::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Strategy {
    #[default]
    PreserveOrder,
    Compact,
    Balanced,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::PreserveOrder => "preserve_order",
            Self::Compact => "compact",
            Self::Balanced => "balanced",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Two overlapping positional components, by id, with their shared region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapPair {
    pub a: String,
    pub b: String,
    pub rect: Rect,
    #[serde(skip)]
    pub(crate) a_index: usize,
    #[serde(skip)]
    pub(crate) b_index: usize,
}

impl OverlapPair {
    /// Original slide indices of the pair, lower first.
    pub fn indices(&self) -> (usize, usize) {
        (self.a_index, self.b_index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub strategy: Strategy,
    pub iterations: usize,
    pub moved_count: usize,
    pub total_displacement: f32,
    pub unresolved: Vec<OverlapPair>,
    pub clean: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckReport {
    pub slides: Vec<AlignmentReport>,
    pub clean_slides: usize,
    pub total_moved: usize,
    pub total_displacement: f32,
}

impl DeckReport {
    pub fn from_slides(slides: Vec<AlignmentReport>) -> Self {
        let clean_slides = slides.iter().filter(|r| r.clean).count();
        let total_moved = slides.iter().map(|r| r.moved_count).sum();
        let total_displacement = slides.iter().map(|r| r.total_displacement).sum();
        Self {
            slides,
            clean_slides,
            total_moved,
            total_displacement,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.clean_slides == self.slides.len()
    }
}
