use serde::{Deserialize, Serialize};

/// Axis-aligned box in slide units. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    pub fn at(&self, x: f32, y: f32) -> Self {
        Self::new(x, y, self.w, self.h)
    }

    /// Whether `other` lies fully inside `self`, within `eps`.
    pub fn contains(&self, other: &Rect, eps: f32) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }

    /// Whether the horizontal extents overlap by more than `eps`.
    pub fn spans_overlap_x(&self, other: &Rect, eps: f32) -> bool {
        self.right().min(other.right()) - self.x.max(other.x) > eps
    }

    pub fn approx_eq(&self, other: &Rect, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.w - other.w).abs() <= eps
            && (self.h - other.h).abs() <= eps
    }

    /// Euclidean distance between the top-left corners.
    pub fn displacement_to(&self, other: &Rect) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// True iff the open rectangles share positive area. Edge contact is not an overlap.
pub fn intersects(a: &Rect, b: &Rect, eps: f32) -> bool {
    intersection(a, b, eps).is_some()
}

/// The overlapping region of `a` and `b`, if both of its sides exceed `eps`.
pub fn intersection(a: &Rect, b: &Rect, eps: f32) -> Option<Rect> {
    let x0 = a.x.max(b.x);
    let y0 = a.y.max(b.y);
    let x1 = a.right().min(b.right());
    let y1 = a.bottom().min(b.bottom());
    let w = x1 - x0;
    let h = y1 - y0;
    if w > eps && h > eps {
        Some(Rect::new(x0, y0, w, h))
    } else {
        None
    }
}

/// Fits `rect` inside `area`, translating first and shrinking only the axes
/// that are larger than `area`. `area` must have positive size.
pub fn clamp_to_bounds(rect: &Rect, area: &Rect) -> Rect {
    let w = rect.w.min(area.w);
    let h = rect.h.min(area.h);
    // `right() - w` can round below `area.x`, where `f32::clamp` panics.
    let x = rect.x.min(area.right() - w).max(area.x);
    let y = rect.y.min(area.bottom() - h).max(area.y);
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn edge_touching_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &b, EPS));
        assert!(!intersects(&a, &c, EPS));
    }

    #[test]
    fn intersection_partial_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let hit = intersection(&a, &b, EPS).expect("overlap");
        assert_eq!(hit, Rect::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(hit.area(), 25.0);
    }

    #[test]
    fn intersection_contained() {
        let a = Rect::new(0.0, 0.0, 20.0, 20.0);
        let b = Rect::new(5.0, 5.0, 5.0, 5.0);
        assert_eq!(intersection(&a, &b, EPS), Some(b));
    }

    #[test]
    fn rounding_noise_is_ignored() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.99999, 0.0, 10.0, 10.0);
        assert!(!intersects(&a, &b, EPS));
    }

    #[test]
    fn clamp_translates_inside() {
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect = Rect::new(-10.0, 80.0, 50.0, 50.0);
        assert_eq!(clamp_to_bounds(&rect, &area), Rect::new(0.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn clamp_shrinks_only_oversized_axis() {
        let area = Rect::new(10.0, 10.0, 80.0, 80.0);
        let rect = Rect::new(0.0, 20.0, 200.0, 30.0);
        let clamped = clamp_to_bounds(&rect, &area);
        assert_eq!(clamped, Rect::new(10.0, 20.0, 80.0, 30.0));
        assert!(area.contains(&clamped, EPS));
    }

    #[test]
    fn clamp_keeps_inner_rect() {
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(clamp_to_bounds(&rect, &area), rect);
    }
}
