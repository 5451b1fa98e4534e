use crate::error::{AlignError, Result};
use crate::ir::GridSpec;

use super::geometry::Rect;

/// Upper bound on grid columns; larger counts are rejected before any allocation.
pub const MAX_COLUMNS: i64 = 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub x: f32,
    pub w: f32,
}

/// Snap geometry derived from a slide's size and grid spec. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    pub content: Rect,
    pub columns: Vec<Column>,
    pub gutter: f32,
    pub snap: f32,
}

impl GridModel {
    pub fn new(width: f32, height: f32, spec: &GridSpec) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) || !(height.is_finite() && height > 0.0) {
            return Err(AlignError::config(format!(
                "slide size must be positive, got {width}x{height}"
            )));
        }
        if spec.columns < 1 {
            return Err(AlignError::config(format!(
                "column count must be at least 1, got {}",
                spec.columns
            )));
        }
        if spec.columns > MAX_COLUMNS {
            return Err(AlignError::config(format!(
                "column count must be at most {MAX_COLUMNS}, got {}",
                spec.columns
            )));
        }
        let margin = spec.margin.sides();
        for (side, value) in [
            ("top", margin.top),
            ("right", margin.right),
            ("bottom", margin.bottom),
            ("left", margin.left),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AlignError::config(format!(
                    "{side} margin must be non-negative, got {value}"
                )));
            }
        }
        if !(spec.gutter.is_finite() && spec.gutter >= 0.0) {
            return Err(AlignError::config(format!(
                "gutter must be non-negative, got {}",
                spec.gutter
            )));
        }

        let content = Rect::new(
            margin.left,
            margin.top,
            width - margin.left - margin.right,
            height - margin.top - margin.bottom,
        );
        if content.w <= 0.0 || content.h <= 0.0 {
            return Err(AlignError::config(format!(
                "margins leave no content area on a {width}x{height} slide"
            )));
        }

        let count = spec.columns as usize;
        let column_w = (content.w - spec.gutter * (count as f32 - 1.0)) / count as f32;
        // Columns narrower than f32 resolution at this slide size cannot be told apart.
        if column_w <= f32::EPSILON * width.max(height) {
            return Err(AlignError::config(format!(
                "{count} columns with gutter {} do not fit in width {}",
                spec.gutter, content.w
            )));
        }
        let columns: Vec<Column> = (0..count)
            .map(|idx| Column {
                x: content.x + (column_w + spec.gutter) * idx as f32,
                w: column_w,
            })
            .collect();

        let snap = match spec.snap {
            Some(snap) if snap.is_finite() && snap > 0.0 => snap,
            Some(snap) => {
                return Err(AlignError::config(format!(
                    "snap increment must be positive, got {snap}"
                )));
            }
            None => columns.iter().map(|c| c.w).fold(f32::INFINITY, f32::min),
        };

        Ok(Self {
            content,
            columns,
            gutter: spec.gutter,
            snap,
        })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column bucket for a left edge: the snapped column pitch, clamped to the grid.
    pub fn column_index(&self, x: f32) -> usize {
        let pitch = self.snap + self.gutter;
        let raw = ((x - self.content.x) / pitch).round();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.columns.len() - 1)
        }
    }

    /// Number of columns a box of width `w` needs, at least one.
    pub fn span_for(&self, w: f32) -> usize {
        let pitch = self.columns[0].w + self.gutter;
        let span = ((w + self.gutter) / pitch).ceil();
        if span <= 1.0 {
            1
        } else {
            (span as usize).min(self.columns.len())
        }
    }

    /// Horizontal extent covering `span` columns starting at `start`.
    pub fn span_extent(&self, start: usize, span: usize) -> (f32, f32) {
        let last = (start + span.max(1) - 1).min(self.columns.len() - 1);
        let x = self.columns[start].x;
        let end = self.columns[last].x + self.columns[last].w;
        (x, end - x)
    }
}
