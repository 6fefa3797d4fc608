/*
[INPUT]:  Tap coordinates on the logical full-screen surface
[OUTPUT]: Named tap regions
[POS]:    Input layer - screen geometry and hit testing
[UPDATE]: When the screen layout or region boundaries change
*/

use serde::{Deserialize, Serialize};

/// Tap position in logical screen units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapRegion {
    /// Middle band, left half
    Left,
    /// Middle band, right half
    Right,
    /// Header, left half ("back")
    TopLeft,
    /// Header, far right corner ("quit")
    TopRight,
    /// Footer band
    Bottom,
}

/// Logical surface size and band boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_header_height")]
    pub header_height: u32,
    #[serde(default = "default_footer_height")]
    pub footer_height: u32,
    #[serde(default = "default_quit_width")]
    pub quit_width: u32,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            header_height: default_header_height(),
            footer_height: default_footer_height(),
            quit_width: default_quit_width(),
        }
    }
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_header_height() -> u32 {
    100
}

fn default_footer_height() -> u32 {
    200
}

fn default_quit_width() -> u32 {
    120
}

impl ScreenGeometry {
    fn center_x(&self) -> u32 {
        self.width / 2
    }

    /// First row of the footer band
    pub fn footer_top(&self) -> u32 {
        self.height.saturating_sub(self.footer_height)
    }

    /// Header and footer leave room for the middle band
    pub fn is_consistent(&self) -> bool {
        self.header_height < self.footer_top() && self.quit_width < self.center_x()
    }

    /// Hit-test a tap. Boundary lines (the center column, band edges) belong to no region.
    pub fn classify(&self, point: Point) -> Option<TapRegion> {
        let Point { x, y } = point;
        let center = self.center_x();

        if y < self.header_height {
            if x > self.width.saturating_sub(self.quit_width) {
                return Some(TapRegion::TopRight);
            }
            if x < center {
                return Some(TapRegion::TopLeft);
            }
            return None;
        }

        if y > self.footer_top() {
            return Some(TapRegion::Bottom);
        }

        if y > self.header_height && y < self.footer_top() {
            if x < center {
                return Some(TapRegion::Left);
            }
            if x > center {
                return Some(TapRegion::Right);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Point::new(400, 500), Some(TapRegion::Left))]
    #[case(Point::new(1500, 500), Some(TapRegion::Right))]
    #[case(Point::new(50, 50), Some(TapRegion::TopLeft))]
    #[case(Point::new(1850, 20), Some(TapRegion::TopRight))]
    #[case(Point::new(1200, 50), None)]
    #[case(Point::new(960, 500), None)]
    #[case(Point::new(300, 100), None)]
    #[case(Point::new(300, 880), None)]
    #[case(Point::new(10, 1000), Some(TapRegion::Bottom))]
    #[case(Point::new(1900, 1079), Some(TapRegion::Bottom))]
    fn test_classify_default_geometry(#[case] point: Point, #[case] expected: Option<TapRegion>) {
        assert_eq!(ScreenGeometry::default().classify(point), expected);
    }

    #[test]
    fn test_quit_corner_boundary() {
        let geometry = ScreenGeometry::default();
        assert_eq!(geometry.classify(Point::new(1800, 10)), None);
        assert_eq!(geometry.classify(Point::new(1801, 10)), Some(TapRegion::TopRight));
    }

    #[test]
    fn test_consistency() {
        assert!(ScreenGeometry::default().is_consistent());

        let squashed = ScreenGeometry {
            height: 250,
            ..ScreenGeometry::default()
        };
        assert!(!squashed.is_consistent());
    }
}
