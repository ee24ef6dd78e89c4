use crate::animation::Animation;
use std::ops::{Add, Mul, Neg, Sub};
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
    Visible,
    #[default]
    Hidden,
}

/// Horizontal half of the screen a surface rests against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Side whose edge is nearer to the horizontal center of a surface at `x`.
    pub fn nearest(x: f64, width: f64, screen_width: f64) -> Self {
        if x + width / 2.0 > screen_width / 2.0 {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Per-item transform relative to the item's resting place in its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Point,
    pub scale: f64,
}

impl Transform {
    /// Folded into the anchor: no offset and zero scale.
    pub const COLLAPSED: Self = Self {
        translation: Point::ZERO,
        scale: 0.0,
    };

    pub const IDENTITY: Self = Self {
        translation: Point::ZERO,
        scale: 1.0,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A host-provided on-screen element: an overlay window or an item inside one.
///
/// Positions are in screen pixels with the origin at the top-left corner. The
/// core never talks to a window manager directly; hosts implement this trait
/// for whatever handles their toolkit exposes.
///
/// [`Surface::animate`] must eventually hand the animation's ticket back to
/// the owner of the surface (see [`crate::Overlay::on_animation_end`]), unless
/// the animation is stopped or replaced first. [`crate::animation::Animator`]
/// implements the timing side for hosts that do not have their own.
pub trait Surface {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);

    fn screen_size(&self) -> Size;
    fn measured_size(&self) -> Size;
    fn resize(&mut self, size: Size);

    fn visibility(&self) -> Visibility;
    fn set_visibility(&mut self, visibility: Visibility);

    fn alpha(&self) -> f64;
    fn set_alpha(&mut self, alpha: f64);

    fn transform(&self) -> Transform;
    fn set_transform(&mut self, transform: Transform);

    /// Starts `animation`, replacing any animation already running.
    fn animate(&mut self, animation: Animation);
    fn stop_animation(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_side_uses_horizontal_center() {
        assert_eq!(Side::nearest(0.0, 100.0, 1000.0), Side::Left);
        assert_eq!(Side::nearest(449.0, 100.0, 1000.0), Side::Left);
        assert_eq!(Side::nearest(451.0, 100.0, 1000.0), Side::Right);
        assert_eq!(Side::nearest(950.0, 100.0, 1000.0), Side::Right);
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("LEFT".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("right".parse::<Side>().unwrap(), Side::Right);
        assert!("up".parse::<Side>().is_err());
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        assert_eq!(a.distance(Point::ZERO), 5.0);
        assert_eq!(a + a, Point::new(6.0, 8.0));
        assert_eq!(a - a, Point::ZERO);
        assert_eq!(-a * 2.0, Point::new(-6.0, -8.0));
    }
}
