//! Screen rectangles for hit testing

/// Axis-aligned rectangle in window pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge, clamped to the `i32` range
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge, clamped to the `i32` range
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Zero or negative size; such a rectangle contains no point
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, x: i32, y: i32) -> bool {
        // Offsets are taken in i64 so edges past i32::MAX still compare
        let dx = i64::from(x) - i64::from(self.x);
        let dy = i64::from(y) - i64::from(self.y);
        dx >= 0 && dx < i64::from(self.w) && dy >= 0 && dy < i64::from(self.h)
    }

    pub fn center(&self) -> (i32, i32) {
        (
            self.x.saturating_add(self.w / 2),
            self.y.saturating_add(self.h / 2),
        )
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rect::new(0, 0, 100, 100);
        assert!(rect.contains(0, 0));
        assert!(rect.contains(99, 99));
        assert!(!rect.contains(100, 50));
        assert!(!rect.contains(50, 100));
        assert!(!rect.contains(-1, 0));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        let rect = Rect::new(10, 10, 0, 5);
        assert!(rect.is_empty());
        assert!(!rect.contains(10, 10));
    }

    #[test]
    fn test_center_and_translate() {
        let rect = Rect::new(50, 50, 100, 40);
        assert_eq!(rect.center(), (100, 70));
        assert_eq!(rect.translated(-50, 10), Rect::new(0, 60, 100, 40));
        assert_eq!(rect.right(), 150);
        assert_eq!(rect.bottom(), 90);
    }

    #[test]
    fn test_rect_at_i32_edge() {
        let rect = Rect::new(i32::MAX - 10, 0, 100, 100);
        assert!(rect.contains(i32::MAX - 5, 5));
        assert!(rect.contains(i32::MAX, 99));
        assert!(!rect.contains(i32::MAX - 11, 5));
        assert_eq!(rect.right(), i32::MAX);
        assert_eq!(rect.center(), (i32::MAX, 50));
        assert_eq!(rect.translated(100, 0).x, i32::MAX);

        let low = Rect::new(i32::MIN, i32::MIN, i32::MAX, 10);
        assert!(low.contains(i32::MIN, i32::MIN));
        assert!(low.contains(-2, i32::MIN + 9));
        assert!(!low.contains(-1, i32::MIN));
        assert_eq!(low.translated(-1, 0).x, i32::MIN);
    }
}
