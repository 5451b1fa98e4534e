use super::Item;
use super::geometry::Rect;
use super::grid::GridModel;
use super::preserve_order::apply_preserve_order;
use super::types::OverlapPair;

/// Removes vertical dead space: after a reading-order pass, components are
/// re-stacked top to bottom, each snapped to its nearest column and dropped
/// one gutter below whatever already occupies its horizontal span.
pub(super) fn apply_compact(
    items: &mut [Item],
    grid: &GridModel,
    overlaps: &[OverlapPair],
    eps: f32,
) {
    if overlaps.is_empty() {
        return;
    }
    apply_preserve_order(items, grid, overlaps, eps);

    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&l, &r| {
        let (a, b) = (&items[l], &items[r]);
        a.rect
            .y
            .total_cmp(&b.rect.y)
            .then(a.rect.x.total_cmp(&b.rect.x))
            .then(a.index.cmp(&b.index))
    });

    let content = grid.content;
    let mut packed: Vec<Rect> = Vec::with_capacity(items.len());
    for idx in order {
        let rect = items[idx].rect;
        let column = grid.column_index(rect.x);
        let mut x = grid.columns[column].x;
        if x + rect.w > content.right() {
            x = (content.right() - rect.w).max(content.x);
        }
        let slot = rect.at(x, content.y);
        let y = packed
            .iter()
            .filter(|other| other.spans_overlap_x(&slot, eps))
            .map(|other| other.bottom() + grid.gutter)
            .fold(content.y, f32::max);
        let next = rect.at(x, y);
        packed.push(next);
        items[idx].rect = next;
    }
}
