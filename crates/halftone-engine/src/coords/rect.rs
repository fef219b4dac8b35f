use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square of edge `edge` anchored at `origin`.
    #[inline]
    pub const fn square(origin: Vec2, edge: f32) -> Self {
        Self { origin, size: Vec2::new(edge, edge) }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment test: `[min, max)`.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 44.0, 44.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(53.9, 53.9)));
        assert!(!r.contains(Vec2::new(54.0, 20.0)));
        assert!(!r.contains(Vec2::new(9.9, 20.0)));
    }

    #[test]
    fn square_and_empty() {
        let r = Rect::square(Vec2::new(24.0, 48.0), 44.0);
        assert_eq!(r.max(), Vec2::new(68.0, 92.0));
        assert!(!r.is_empty());
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_empty());
    }
}
