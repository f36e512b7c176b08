//! Geometric types for selection rectangles and floating element placement

/// Selection rectangle in physical (monitor) pixels, as reported by the select layer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElementRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl ElementRect {
    /// Create a new rectangle from its bounds
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a rectangle at the origin with the given size
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// Length of the shorter side
    pub fn min_side(&self) -> i32 {
        self.width().min(self.height())
    }

    /// Top-left corner converted to logical coordinates
    pub fn logical_origin(&self, scale_factor: f64) -> Position {
        Position::new(
            self.min_x as f64 / scale_factor,
            self.min_y as f64 / scale_factor,
        )
    }

    /// Bottom-right corner converted to logical coordinates
    pub fn logical_end(&self, scale_factor: f64) -> Position {
        Position::new(
            self.max_x as f64 / scale_factor,
            self.max_y as f64 / scale_factor,
        )
    }
}

/// A point in logical (scaled) coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this position by another one
    pub fn offset(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }

    /// Difference between two positions
    pub fn delta(self, origin: Position) -> Position {
        Position::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Size of a laid-out element in logical coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Result of placing a floating element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Position,
    /// Whether the requested position fell outside the viewport
    pub is_beyond: bool,
}

/// Place a floating element relative to an anchor point.
///
/// The element's top-left lands at `anchor + base_offset - grab_offset`, so a
/// positive `grab_offset` moves the element up/left of the anchor the same way
/// a pointer grab offset does while dragging.
///
/// With `report_only` the raw position is returned together with the
/// overflow flag; otherwise the position is clamped into the viewport.
pub fn place_element(
    element: Size,
    base_offset: Position,
    grab_offset: Position,
    anchor: Position,
    viewport: Option<Size>,
    report_only: bool,
) -> Placement {
    let x = anchor.x + base_offset.x - grab_offset.x;
    let y = anchor.y + base_offset.y - grab_offset.y;

    let mut is_beyond = x < 0.0 || y < 0.0;
    if let Some(viewport) = viewport {
        is_beyond |= x + element.width > viewport.width || y + element.height > viewport.height;
    }

    if report_only {
        return Placement {
            position: Position::new(x, y),
            is_beyond,
        };
    }

    let (max_x, max_y) = match viewport {
        Some(viewport) => (
            (viewport.width - element.width).max(0.0),
            (viewport.height - element.height).max(0.0),
        ),
        None => (f64::INFINITY, f64::INFINITY),
    };

    Placement {
        position: Position::new(x.clamp(0.0, max_x), y.clamp(0.0, max_y)),
        is_beyond,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = ElementRect::new(10, 20, 310, 420);
        assert_eq!(rect.width(), 300);
        assert_eq!(rect.height(), 400);
        assert_eq!(rect.min_side(), 300);
    }

    #[test]
    fn test_logical_origin_applies_scale() {
        let rect = ElementRect::new(200, 100, 400, 300);
        assert_eq!(rect.logical_origin(2.0), Position::new(100.0, 50.0));
        assert_eq!(rect.logical_end(2.0), Position::new(200.0, 150.0));
    }

    #[test]
    fn test_place_element_reports_overflow_without_clamping() {
        let placement = place_element(
            Size::new(80.0, 20.0),
            Position::default(),
            Position::new(0.0, 24.0),
            Position::new(10.0, 5.0),
            None,
            true,
        );
        assert!(placement.is_beyond);
        assert_eq!(placement.position, Position::new(10.0, -19.0));
    }

    #[test]
    fn test_place_element_clamps_into_viewport() {
        let placement = place_element(
            Size::new(100.0, 40.0),
            Position::default(),
            Position::default(),
            Position::new(950.0, 700.0),
            Some(Size::new(1000.0, 720.0)),
            false,
        );
        assert!(placement.is_beyond);
        assert_eq!(placement.position, Position::new(900.0, 680.0));
    }

    #[test]
    fn test_place_element_inside_viewport() {
        let placement = place_element(
            Size::new(100.0, 40.0),
            Position::new(5.0, 5.0),
            Position::default(),
            Position::new(100.0, 100.0),
            Some(Size::new(1000.0, 720.0)),
            false,
        );
        assert!(!placement.is_beyond);
        assert_eq!(placement.position, Position::new(105.0, 105.0));
    }
}
