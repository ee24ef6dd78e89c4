//! In-memory surfaces and a manual clock for driving animations in tests.

use crate::animation::{Animation, AnimationTicket, Animator};
use crate::surface::{Point, Size, Surface, Transform, Visibility};
use std::time::Duration;

pub const SCREEN: Size = Size::new(1080.0, 1920.0);
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub struct FakeSurface {
    pub position: Point,
    pub size: Size,
    pub screen: Size,
    pub visibility: Visibility,
    pub alpha: f64,
    pub transform: Transform,
    pub animator: Animator,
    /// Number of animations started on this surface.
    pub started: usize,
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            size: Size::default(),
            screen: SCREEN,
            visibility: Visibility::Visible,
            alpha: 1.0,
            transform: Transform::IDENTITY,
            animator: Animator::new(),
            started: 0,
        }
    }
}

impl FakeSurface {
    pub fn with_size(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn at(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            ..Self::default()
        }
    }

    pub fn tick(&mut self, now: Duration) -> Option<AnimationTicket> {
        let step = self.animator.advance(now)?;
        step.frame.apply(self);
        step.finished
    }
}

impl Surface for FakeSurface {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn screen_size(&self) -> Size {
        self.screen
    }

    fn measured_size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn animate(&mut self, animation: Animation) {
        self.started += 1;
        self.animator.start(animation);
    }

    fn stop_animation(&mut self) {
        self.animator.stop();
    }
}

/// Shared frame clock. Every tick first samples at the current time, which
/// latches the start of animations begun since the previous tick.
#[derive(Debug, Default)]
pub struct Clock {
    pub now: Duration,
}

impl Clock {
    pub fn run_for(&mut self, surfaces: &mut [FakeSurface], span: Duration) -> Vec<AnimationTicket> {
        let mut finished = self.sample(surfaces);
        let end = self.now + span;
        while self.now < end {
            self.now = (self.now + FRAME).min(end);
            finished.extend(self.sample(surfaces));
        }
        finished
    }

    pub fn run_to_end(&mut self, surfaces: &mut [FakeSurface]) -> Vec<AnimationTicket> {
        let mut finished = self.sample(surfaces);
        while surfaces.iter().any(|s| s.animator.is_running()) {
            self.now += FRAME;
            finished.extend(self.sample(surfaces));
        }
        finished
    }

    fn sample(&self, surfaces: &mut [FakeSurface]) -> Vec<AnimationTicket> {
        surfaces.iter_mut().filter_map(|s| s.tick(self.now)).collect()
    }
}
