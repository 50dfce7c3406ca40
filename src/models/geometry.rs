use serde::{Deserialize, Serialize};

/// Integer rectangle in output coordinates.
///
/// The layout math deliberately runs on integers with truncating division,
/// matching the geometry boxes the display layer works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin, used for the single output region.
    pub fn from_size(width: i32, height: i32) -> Self {
        Rect::new(0, 0, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_size_is_origin_anchored() {
        let rect = Rect::from_size(1920, 1080);
        assert_eq!(rect, Rect::new(0, 0, 1920, 1080));
    }
}
