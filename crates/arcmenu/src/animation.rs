//! Animation descriptions handed to [`Surface`]s and a clock-driven player for them.
//!
//! An [`Animation`] carries an [`AnimationTicket`]. Whoever plays it reports the
//! ticket back once the last frame has been applied; the ticket's
//! [`Generation`] lets the owner recognise completions that belong to a cycle
//! it has already abandoned.

use crate::surface::{Point, Surface};
use derive_more::{Display, From, Into};
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

/// Monotonic id of an animation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, From, Into)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The floating trigger button.
    Trigger,
    /// The menu item at this index.
    Item(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationTicket {
    pub generation: Generation,
    pub target: Target,
}

impl AnimationTicket {
    pub fn new(generation: Generation, target: Target) -> Self {
        Self { generation, target }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Material "standard" curve, `cubic-bezier(0.4, 0.0, 0.2, 1.0)`.
    #[default]
    FastOutSlowIn,
    EaseOut,
    /// Settles with a few decaying rebounds.
    Bounce,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress. Both ends are exact.
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::Bounce => bounce_out(t),
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 || progress >= 1.0 {
        return progress;
    }

    let curve = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    // Newton first, bisection if the slope flattens out.
    let mut s = progress;
    for _ in 0..8 {
        let err = curve(x1, x2, s) - progress;
        if err.abs() < 1e-7 {
            return curve(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = progress;
    for _ in 0..32 {
        let x = curve(x1, x2, s);
        if (x - progress).abs() < 1e-7 {
            break;
        }
        if x < progress {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    curve(y1, y2, s)
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        if t >= 1.0 { to } else { self + (to - self) * t }
    }
}

impl Lerp for Point {
    fn lerp(self, to: Self, t: f64) -> Self {
        Point::new(self.x.lerp(to.x, t), self.y.lerp(to.y, t))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
}

impl<T: Lerp> Tween<T> {
    pub fn at(&self, t: f64) -> T {
        self.from.lerp(self.to, t)
    }
}

/// What to animate on a surface. Properties left as `None` are untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub ticket: AnimationTicket,
    pub duration: Duration,
    pub easing: Easing,
    pub translation: Option<Tween<Point>>,
    pub scale: Option<Tween<f64>>,
    pub alpha: Option<Tween<f64>>,
    pub position: Option<Tween<Point>>,
}

impl Animation {
    pub fn new(ticket: AnimationTicket, duration: Duration, easing: Easing) -> Self {
        Self {
            ticket,
            duration,
            easing,
            translation: None,
            scale: None,
            alpha: None,
            position: None,
        }
    }

    pub fn translation(mut self, from: Point, to: Point) -> Self {
        self.translation = Some(Tween { from, to });
        self
    }

    pub fn scale(mut self, from: f64, to: f64) -> Self {
        self.scale = Some(Tween { from, to });
        self
    }

    pub fn alpha(mut self, from: f64, to: f64) -> Self {
        self.alpha = Some(Tween { from, to });
        self
    }

    pub fn position(mut self, from: Point, to: Point) -> Self {
        self.position = Some(Tween { from, to });
        self
    }

    /// Values at linear `progress`, eased with this animation's curve.
    pub fn frame(&self, progress: f64) -> Frame {
        let t = self.easing.apply(progress);
        Frame {
            translation: self.translation.map(|tw| tw.at(t)),
            scale: self.scale.map(|tw| tw.at(t)),
            alpha: self.alpha.map(|tw| tw.at(t)),
            position: self.position.map(|tw| tw.at(t)),
        }
    }

    /// The frame reached once the animation has run its full duration.
    pub fn last_frame(&self) -> Frame {
        self.frame(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub translation: Option<Point>,
    pub scale: Option<f64>,
    pub alpha: Option<f64>,
    pub position: Option<Point>,
}

impl Frame {
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.translation.is_some() || self.scale.is_some() {
            let mut transform = surface.transform();
            if let Some(translation) = self.translation {
                transform.translation = translation;
            }
            if let Some(scale) = self.scale {
                transform.scale = scale;
            }
            surface.set_transform(transform);
        }
        if let Some(alpha) = self.alpha {
            surface.set_alpha(alpha);
        }
        if let Some(position) = self.position {
            surface.set_position(position);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub frame: Frame,
    /// Set on the final frame.
    pub finished: Option<AnimationTicket>,
}

#[derive(Debug, Clone)]
struct Running {
    animation: Animation,
    started: Option<Duration>,
}

/// Plays one [`Animation`] at a time against a host clock.
///
/// The clock is any monotonic timestamp. The first call to
/// [`Animator::advance`] after [`Animator::start`] latches the start time, so
/// starting an animation never needs to know the current time.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    running: Option<Running>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, animation: Animation) {
        self.running = Some(Running {
            animation,
            started: None,
        });
    }

    pub fn stop(&mut self) -> Option<Animation> {
        self.running.take().map(|r| r.animation)
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn current(&self) -> Option<&Animation> {
        self.running.as_ref().map(|r| &r.animation)
    }

    pub fn advance(&mut self, now: Duration) -> Option<Step> {
        let running = self.running.as_mut()?;
        let started = *running.started.get_or_insert(now);
        let duration = running.animation.duration;
        let progress = if duration.is_zero() {
            1.0
        } else {
            (now.saturating_sub(started).as_secs_f64() / duration.as_secs_f64()).min(1.0)
        };

        let frame = running.animation.frame(progress);
        let finished = if progress >= 1.0 {
            self.running.take().map(|r| r.animation.ticket)
        } else {
            None
        };
        Some(Step { frame, finished })
    }
}
