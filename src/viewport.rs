/// Terminal size in character cells. Each cell holds two vertical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

/// Rectangle in viewport cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x
            && row >= self.y
            && u32::from(col) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height)
    }
}

impl Viewport {
    const FALLBACK: Viewport = Viewport { cols: 80, rows: 24 };

    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Current terminal size, or 80x24 when it cannot be queried.
    pub fn detect() -> Self {
        match termsize::get() {
            Some(size) => Viewport::new(size.cols, size.rows),
            None => Self::FALLBACK,
        }
    }

    /// Framebuffer size in pixels.
    pub fn pixel_size(&self) -> (usize, usize) {
        (usize::from(self.cols), usize::from(self.rows) * 2)
    }

    /// Normalized device coordinates of a cell center: x right, y up, both in [-1, 1].
    pub fn ndc(&self, col: u16, row: u16) -> [f64; 2] {
        let x = (f64::from(col) + 0.5) / f64::from(self.cols);
        let y = (f64::from(row) + 0.5) / f64::from(self.rows);
        [x * 2.0 - 1.0, -(y * 2.0) + 1.0]
    }

    /// Center of `rect` as a fraction of the viewport, origin top-left.
    pub fn normalized_center(&self, rect: &Rect) -> [f64; 2] {
        let x = f64::from(rect.x) + f64::from(rect.width) / 2.0;
        let y = f64::from(rect.y) + f64::from(rect.height) / 2.0;
        [x / f64::from(self.cols), y / f64::from(self.rows)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_spans_the_viewport() {
        let viewport = Viewport::new(10, 4);
        let close = |a: [f64; 2], b: [f64; 2]| (a[0] - b[0]).abs() < 1e-12 && (a[1] - b[1]).abs() < 1e-12;
        assert!(close(viewport.ndc(0, 0), [-0.9, 0.75]));
        assert!(close(viewport.ndc(9, 3), [0.9, -0.75]));
    }

    #[test]
    fn centered_rect_normalizes_to_half() {
        let viewport = Viewport::new(80, 24);
        let rect = Rect {
            x: 30,
            y: 10,
            width: 20,
            height: 4,
        };
        assert_eq!(viewport.normalized_center(&rect), [0.5, 0.5]);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect {
            x: 2,
            y: 3,
            width: 4,
            height: 1,
        };
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 3));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 4));
    }

    #[test]
    fn zero_size_is_clamped() {
        assert_eq!(Viewport::new(0, 0).pixel_size(), (1, 2));
    }
}
