use crate::error::{AlignError, Result};
use crate::ir::{Deck, Document, GridPlacement, GridSpec, Margin, MarginSides, Slide, Unit};
use crate::layout::{GridModel, Rect};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const PX_PER_INCH: f32 = 96.0;

static CUSTOM_SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<w>\d+(?:\.\d+)?)\s*[xX×]\s*(?P<h>\d+(?:\.\d+)?)\s*$").unwrap()
});

/// Parses a deck document, or a single slide object when there is no `slides` array.
pub fn parse_document(input: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    if value.get("slides").is_some() {
        Ok(Document::Deck(serde_json::from_value(value)?))
    } else {
        Ok(Document::Slide(serde_json::from_value(value)?))
    }
}

/// Slide width and height for a `slide_size` token, in `unit`.
pub fn slide_dimensions(token: &str, unit: Unit) -> Result<(f32, f32)> {
    let inches = match token.trim() {
        "16x9" | "16:9" => Some((13.333, 7.5)),
        "4x3" | "4:3" => Some((10.0, 7.5)),
        "A4-landscape" | "a4-landscape" => Some((11.69, 8.27)),
        _ => None,
    };
    if let Some((w, h)) = inches {
        return Ok(match unit {
            Unit::In => (w, h),
            Unit::Px => ((w * PX_PER_INCH).round(), (h * PX_PER_INCH).round()),
        });
    }

    let caps = CUSTOM_SIZE_RE
        .captures(token)
        .ok_or_else(|| AlignError::config(format!("unknown slide size `{token}`")))?;
    let parse = |name: &str| -> Result<f32> {
        caps[name]
            .parse::<f32>()
            .map_err(|_| AlignError::config(format!("invalid slide size `{token}`")))
    };
    Ok((parse("w")?, parse("h")?))
}

/// Default grid tokens expressed in `unit`. The tokens themselves are pixel values.
fn default_grid(unit: Unit) -> GridSpec {
    let grid = GridSpec::default();
    match unit {
        Unit::Px => grid,
        Unit::In => {
            let sides = grid.margin.sides();
            GridSpec {
                margin: Margin::Sides(MarginSides {
                    top: sides.top / PX_PER_INCH,
                    right: sides.right / PX_PER_INCH,
                    bottom: sides.bottom / PX_PER_INCH,
                    left: sides.left / PX_PER_INCH,
                }),
                gutter: grid.gutter / PX_PER_INCH,
                ..grid
            }
        }
    }
}

/// Fills every slide's missing size and grid from the deck-level settings.
pub fn apply_deck_defaults(deck: &mut Deck) -> Result<()> {
    let (width, height) = slide_dimensions(deck.slide_size.as_deref().unwrap_or("16x9"), deck.unit)?;
    let grid = deck.grid.clone().unwrap_or_else(|| default_grid(deck.unit));
    for slide in &mut deck.slides {
        slide.width.get_or_insert(width);
        slide.height.get_or_insert(height);
        if slide.grid.is_none() {
            slide.grid = Some(grid.clone());
        }
    }
    Ok(())
}

/// Validated box for every component of `slide`, in component order.
///
/// Explicit boxes must have positive, finite size. Components without a box are
/// placed from their grid placement, stacking downward from the content top
/// when the placement carries no `y`. Ids must be non-empty and unique.
pub fn ingest_components(slide: &Slide, grid: &GridModel) -> Result<Vec<Rect>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut cursor = grid.content.y;
    let mut rects = Vec::with_capacity(slide.components.len());

    for comp in &slide.components {
        if comp.id.trim().is_empty() {
            return Err(AlignError::malformed(&comp.id, "component id is empty"));
        }
        if !seen.insert(comp.id.as_str()) {
            return Err(AlignError::malformed(&comp.id, "duplicate component id"));
        }

        let rect = match (comp.bounds, comp.grid) {
            (Some(rect), _) => {
                check_box(&comp.id, &rect)?;
                rect
            }
            (None, Some(placement)) => {
                let rect = place_on_grid(&comp.id, &placement, cursor, grid)?;
                cursor = cursor.max(rect.bottom() + grid.gutter);
                rect
            }
            (None, None) => {
                return Err(AlignError::malformed(&comp.id, "missing box"));
            }
        };
        rects.push(rect);
    }
    Ok(rects)
}

fn check_box(id: &str, rect: &Rect) -> Result<()> {
    if ![rect.x, rect.y, rect.w, rect.h].iter().all(|v| v.is_finite()) {
        return Err(AlignError::malformed(id, "box has a non-finite coordinate"));
    }
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return Err(AlignError::malformed(
            id,
            format!("box size must be positive, got {}x{}", rect.w, rect.h),
        ));
    }
    Ok(())
}

fn place_on_grid(id: &str, placement: &GridPlacement, cursor: f32, grid: &GridModel) -> Result<Rect> {
    let columns = grid.column_count() as i64;
    if placement.col < 1 {
        return Err(AlignError::malformed(id, format!("grid col {} is below 1", placement.col)));
    }
    if placement.span < 1 {
        return Err(AlignError::malformed(id, format!("grid span {} is below 1", placement.span)));
    }
    if !(placement.row_h.is_finite() && placement.row_h > 0.0) {
        return Err(AlignError::malformed(
            id,
            format!("grid row_h must be positive, got {}", placement.row_h),
        ));
    }

    let mut col = placement.col;
    if col > columns {
        log::warn!("component `{id}`: col {col} > columns {columns}; clamped to {columns}");
        col = columns;
    }
    let mut span = placement.span;
    if span > columns - col + 1 {
        let clamped = columns - col + 1;
        log::warn!("component `{id}`: span {span} overflows grid; clamped to {clamped}");
        span = clamped;
    }

    let (x, w) = grid.span_extent((col - 1) as usize, span as usize);
    let y = placement.y.unwrap_or(cursor);
    let rect = Rect::new(x, y, w, placement.row_h);
    check_box(id, &rect)?;
    Ok(rect)
}
