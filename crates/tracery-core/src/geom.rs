#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(point(x, y), size(width, height))
}

/// Shrinks `r` vertically by `top` and `bottom`, keeping the height non-negative.
pub fn inset_vertical(r: Rect, top: f64, bottom: f64) -> Rect {
    let height = (r.size.height - top - bottom).max(0.0);
    rect(r.origin.x, r.origin.y + top, r.size.width, height)
}
