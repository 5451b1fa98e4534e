use super::Item;
use super::geometry::{Rect, intersection};
use super::types::OverlapPair;

/// Above this many components the sweep-line pass replaces the pairwise scan.
const SWEEP_THRESHOLD: usize = 64;

/// All overlapping pairs among `items`, ordered by (lower index, higher index).
/// `items` holds positional components only, in original slide order.
pub(crate) fn detect_overlaps(items: &[Item], eps: f32) -> Vec<OverlapPair> {
    if items.len() <= SWEEP_THRESHOLD {
        pairwise(items, eps)
    } else {
        sweep(items, eps)
    }
}

fn pairwise(items: &[Item], eps: f32) -> Vec<OverlapPair> {
    let mut pairs = Vec::new();
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if let Some(rect) = intersection(&a.rect, &b.rect, eps) {
                pairs.push(make_pair(a, b, rect));
            }
        }
    }
    pairs
}

fn sweep(items: &[Item], eps: f32) -> Vec<OverlapPair> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&l, &r| {
        items[l]
            .rect
            .x
            .total_cmp(&items[r].rect.x)
            .then(items[l].index.cmp(&items[r].index))
    });

    let mut active: Vec<usize> = Vec::new();
    let mut pairs = Vec::new();
    for &cur in &order {
        let left = items[cur].rect.x;
        active.retain(|&open| items[open].rect.right() - left > eps);
        for &open in &active {
            let (a, b) = if items[open].index < items[cur].index {
                (&items[open], &items[cur])
            } else {
                (&items[cur], &items[open])
            };
            if let Some(rect) = intersection(&a.rect, &b.rect, eps) {
                pairs.push(make_pair(a, b, rect));
            }
        }
        active.push(cur);
    }
    pairs.sort_by_key(|pair| (pair.a_index, pair.b_index));
    pairs
}

fn make_pair(a: &Item, b: &Item, rect: Rect) -> OverlapPair {
    OverlapPair {
        a: a.id.clone(),
        b: b.id.clone(),
        rect,
        a_index: a.index,
        b_index: b.index,
    }
}
