//! Pointer geometry for the interactive surface.
//!
//! Pure coordinate logic (bounds-relative percentages, bonus hit testing)
//! kept free of terminal/crossterm types so it can be unit tested.

/// A pointer position in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Rectangle of the clickable target (or the whole viewport).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TargetBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.x < self.x + self.width
            && p.y >= self.y
            && p.y < self.y + self.height
    }

    /// Position of `p` as a percentage of these bounds.
    ///
    /// Returns `None` for degenerate (zero-area) bounds or points outside
    /// the rectangle.
    pub fn relative_percent(&self, p: Point) -> Option<(f64, f64)> {
        if self.width <= 0.0 || self.height <= 0.0 || !self.contains(p) {
            return None;
        }
        let x_pct = (p.x - self.x) / self.width * 100.0;
        let y_pct = (p.y - self.y) / self.height * 100.0;
        Some((x_pct, y_pct))
    }
}

/// The sub-rectangle of the target that doubles awarded points, expressed
/// as percentage bands of the target bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusRegion {
    pub x_min_pct: f64,
    pub x_max_pct: f64,
    pub y_min_pct: f64,
    pub y_max_pct: f64,
}

impl Default for BonusRegion {
    fn default() -> Self {
        // The tiger's tongue.
        Self {
            x_min_pct: 45.0,
            x_max_pct: 55.0,
            y_min_pct: 65.0,
            y_max_pct: 85.0,
        }
    }
}

impl BonusRegion {
    pub fn hit(&self, x_pct: f64, y_pct: f64) -> bool {
        x_pct >= self.x_min_pct
            && x_pct <= self.x_max_pct
            && y_pct >= self.y_min_pct
            && y_pct <= self.y_max_pct
    }
}
