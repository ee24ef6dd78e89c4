use crate::error::{Result, ensure_finite};
use crate::surface::Side;
use std::f64::consts::FRAC_PI_2;
use std::time::Duration;
use strum::Display as StrumDisplay;

pub mod listener;
pub mod machine;

pub use listener::{MenuEvent, MenuListener};
pub use machine::Menu;

pub const DEFAULT_RADIUS: f64 = 200.0;
pub const DEFAULT_ARC_ANGLE: f64 = FRAC_PI_2;
pub const DEFAULT_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuConfig {
    /// Distance from the anchor to each expanded item, in pixels.
    pub radius: f64,
    /// Total span of the fan, in radians.
    pub arc_angle: f64,
    pub animation_duration: Duration,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            arc_angle: DEFAULT_ARC_ANGLE,
            animation_duration: DEFAULT_DURATION,
        }
    }
}

impl MenuConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("radius", self.radius)?;
        ensure_finite("arc_angle", self.arc_angle)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum MenuState {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

impl MenuState {
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Expanding | Self::Collapsing)
    }

    /// Expanding or expanded: the next toggle collapses.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Expanding | Self::Expanded)
    }
}

/// Which way the fan opens, horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Arm {
    Left,
    Right,
}

impl Arm {
    /// Applied to both axes of every offset, so a left fan is the right fan
    /// rotated half a turn.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Fan toward the open part of the screen, away from the edge at `side`.
    pub fn away_from(side: Side) -> Self {
        match side {
            Side::Left => Self::Right,
            Side::Right => Self::Left,
        }
    }
}
