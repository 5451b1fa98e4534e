use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::layout::{Rect, Strategy};

pub const DEFAULT_MARGIN: f32 = 16.0;
pub const DEFAULT_GUTTER: f32 = 12.0;
pub const DEFAULT_COLUMNS: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Px,
    In,
}

/// Top-level input: a deck, or a bare slide handled as a one-slide deck.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Document {
    Deck(Deck),
    Slide(Slide),
}

/// A full deck document. Slides inherit size and grid from the deck when
/// they do not carry their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_size: Option<String>,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    pub slides: Vec<Slide>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    #[serde(default)]
    pub margin: Margin,
    #[serde(default = "default_gutter")]
    pub gutter: f32,
    #[serde(default = "default_columns")]
    pub columns: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap: Option<f32>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            gutter: DEFAULT_GUTTER,
            columns: DEFAULT_COLUMNS,
            snap: None,
        }
    }
}

fn default_gutter() -> f32 {
    DEFAULT_GUTTER
}

fn default_columns() -> i64 {
    DEFAULT_COLUMNS
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Margin {
    Uniform(f32),
    Sides(MarginSides),
}

impl Default for Margin {
    fn default() -> Self {
        Self::Uniform(DEFAULT_MARGIN)
    }
}

impl Margin {
    pub fn sides(&self) -> MarginSides {
        match *self {
            Self::Uniform(m) => MarginSides {
                top: m,
                right: m,
                bottom: m,
                left: m,
            },
            Self::Sides(sides) => sides,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginSides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Text,
    Image,
    Table,
    Chart,
    Shape,
    #[serde(other)]
    Other,
}

/// Column/row placement on the slide grid. `col` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPlacement {
    pub col: i64,
    #[serde(default = "default_span")]
    pub span: i64,
    pub row_h: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

fn default_span() -> i64 {
    1
}

/// A positioned visual element. Only `bounds` is ever rewritten by the engine;
/// `payload` and any unknown fields are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default, alias = "ignore_overlaps")]
    pub non_positional: bool,
    #[serde(rename = "box", default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridPlacement>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Component {
    pub fn new(id: impl Into<String>, kind: ComponentKind, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            non_positional: false,
            bounds: Some(bounds),
            grid: None,
            payload: Value::Null,
            extra: Map::new(),
        }
    }

    pub fn non_positional(mut self) -> Self {
        self.non_positional = true;
        self
    }
}

impl Deck {
    /// Wraps a bare slide as a one-slide deck with default deck settings.
    pub fn from_slide(slide: Slide) -> Self {
        Self {
            slide_size: None,
            unit: Unit::Px,
            grid: None,
            strategy: None,
            slides: vec![slide],
            extra: Map::new(),
        }
    }
}

impl Slide {
    pub fn new(width: f32, height: f32, grid: GridSpec) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            grid: Some(grid),
            strategy: None,
            components: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }
}
