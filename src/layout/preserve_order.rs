use super::Item;
use super::geometry::{Rect, clamp_to_bounds, intersection};
use super::grid::GridModel;
use super::types::OverlapPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Single reading-order pass: each component that collides with an earlier one is
/// pushed right or down by the smallest distance that clears every earlier box.
/// Cascades are left for the next detection round.
pub(super) fn apply_preserve_order(
    items: &mut [Item],
    grid: &GridModel,
    overlaps: &[OverlapPair],
    eps: f32,
) {
    if overlaps.is_empty() {
        return;
    }
    // Lowest top edge placed so far in each column bucket.
    let mut last_top: Vec<Option<f32>> = vec![None; grid.column_count()];
    let mut placed_buckets: Vec<usize> = Vec::with_capacity(items.len());

    for idx in 0..items.len() {
        let (placed, rest) = items.split_at_mut(idx);
        let current = &mut rest[0];
        let bucket = grid.column_index(current.rect.x);
        let next = place(
            current.rect,
            placed,
            &placed_buckets,
            bucket,
            last_top[bucket],
            grid,
            eps,
        );
        if next != current.rect {
            log::trace!(
                "preserve_order: `{}` ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                current.id,
                current.rect.x,
                current.rect.y,
                next.x,
                next.y
            );
        }
        current.rect = next;
        let final_bucket = grid.column_index(next.x);
        let top = last_top[final_bucket].map_or(next.y, |top| top.max(next.y));
        last_top[final_bucket] = Some(top);
        placed_buckets.push(final_bucket);
    }
}

fn place(
    rect: Rect,
    placed: &[Item],
    placed_buckets: &[usize],
    bucket: usize,
    last_top: Option<f32>,
    grid: &GridModel,
    eps: f32,
) -> Rect {
    let mut widest: Option<(f32, Rect)> = None;
    let mut shares_column = false;
    for (item, &item_bucket) in placed.iter().zip(placed_buckets) {
        if let Some(hit) = intersection(&rect, &item.rect, eps) {
            shares_column |= item_bucket == bucket;
            if widest.is_none_or(|(area, _)| hit.area() > area) {
                widest = Some((hit.area(), hit));
            }
        }
    }
    let Some((_, hit)) = widest else {
        return rect;
    };

    let axis = if shares_column || hit.w >= hit.h {
        Axis::Vertical
    } else {
        Axis::Horizontal
    };

    let moved = match axis {
        Axis::Horizontal => {
            let pushed = push_right(rect, placed, eps);
            if pushed.right() > grid.content.right() + eps {
                push_down(rect, placed, last_top, eps)
            } else {
                pushed
            }
        }
        Axis::Vertical => push_down(rect, placed, last_top, eps),
    };
    clamp_to_bounds(&moved, &grid.content)
}

fn push_down(rect: Rect, placed: &[Item], last_top: Option<f32>, eps: f32) -> Rect {
    let floor = last_top.map_or(rect.y, |top| top.max(rect.y));
    let mut current = rect.at(rect.x, floor);
    loop {
        let blocking = placed
            .iter()
            .filter(|item| intersection(&current, &item.rect, eps).is_some())
            .map(|item| item.rect.bottom())
            .fold(f32::NEG_INFINITY, f32::max);
        if blocking == f32::NEG_INFINITY {
            return current;
        }
        current = current.at(current.x, blocking);
    }
}

fn push_right(rect: Rect, placed: &[Item], eps: f32) -> Rect {
    let mut current = rect;
    loop {
        let blocking = placed
            .iter()
            .filter(|item| intersection(&current, &item.rect, eps).is_some())
            .map(|item| item.rect.right())
            .fold(f32::NEG_INFINITY, f32::max);
        if blocking == f32::NEG_INFINITY {
            return current;
        }
        current = current.at(blocking, current.y);
    }
}
