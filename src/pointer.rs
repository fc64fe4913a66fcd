use nannou::prelude::*;

/// 最後に観測したポインタ位置 / Last known pointer position in surface space.
///
/// `position` stays `None` until the first pointer move, so every consumer has
/// to deal with the absent case explicitly instead of measuring against an
/// unset location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    position: Option<Point2>,
    radius: f32,
}

impl PointerState {
    pub fn new(radius: f32) -> Self {
        PointerState {
            position: None,
            radius,
        }
    }

    pub fn position(&self) -> Option<Point2> {
        self.position
    }

    /// Influence radius: particles closer than this are pulled toward the pointer.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn move_to(&mut self, position: Point2) {
        self.position = Some(position);
    }

    /// Distance from `point` to the pointer, `None` while the pointer is absent.
    pub fn distance_to(&self, point: Point2) -> Option<f32> {
        self.position.map(|p| p.distance(point))
    }
}
