use super::Item;
use super::geometry::{Rect, clamp_to_bounds};
use super::grid::GridModel;
use super::types::OverlapPair;

/// Spreads components over `k` equal horizontal bands, `k` being the population
/// of the busiest column. Every component is centered in its band and column
/// slot, shrinking when it does not fit.
pub(super) fn apply_balanced(
    items: &mut [Item],
    grid: &GridModel,
    overlaps: &[OverlapPair],
    _eps: f32,
) {
    if overlaps.is_empty() || items.is_empty() {
        return;
    }
    let column_count = grid.column_count();
    let spans: Vec<(usize, usize)> = items
        .iter()
        .map(|item| {
            let span = grid.span_for(item.rect.w);
            let start = grid.column_index(item.rect.x).min(column_count - span);
            (start, span)
        })
        .collect();

    let mut population = vec![0usize; column_count];
    for &(start, span) in &spans {
        for count in &mut population[start..start + span] {
            *count += 1;
        }
    }
    let bands = population.iter().copied().max().unwrap_or(1).max(1);
    let content = grid.content;
    let band_h = content.h / bands as f32;
    log::trace!("balanced: {bands} band(s) of height {band_h:.2}");

    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&l, &r| {
        let (a, b) = (&items[l].rect, &items[r].rect);
        (a.y + a.h / 2.0)
            .total_cmp(&(b.y + b.h / 2.0))
            .then(items[l].index.cmp(&items[r].index))
    });

    let mut occupied = vec![vec![false; bands]; column_count];
    for idx in order {
        let (start, span) = spans[idx];
        let rect = items[idx].rect;
        let center = rect.y + rect.h / 2.0;
        let nearest = (((center - content.y) / band_h).floor().max(0.0) as usize).min(bands - 1);
        let band = (0..bands)
            .filter(|&band| (start..start + span).all(|col| !occupied[col][band]))
            .min_by_key(|&band| (band.abs_diff(nearest), band))
            .unwrap_or(nearest);
        for col in start..start + span {
            occupied[col][band] = true;
        }

        let (slot_x, slot_w) = grid.span_extent(start, span);
        let slot = Rect::new(slot_x, content.y + band_h * band as f32, slot_w, band_h);
        let w = rect.w.min(slot.w);
        let h = rect.h.min(slot.h);
        let centered = Rect::new(
            slot.x + (slot.w - w) / 2.0,
            slot.y + (slot.h - h) / 2.0,
            w,
            h,
        );
        items[idx].rect = clamp_to_bounds(&centered, &slot);
    }
}
