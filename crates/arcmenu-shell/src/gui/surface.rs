use super::window;
use arcmenu::{Animation, AnimationTicket, Animator, Point, Size, Surface, Transform, Visibility};
use gtk::prelude::*;
use gtk4 as gtk;
use std::time::Duration;

/// Surfaces whose animations are sampled on the shell's frame timer.
pub trait Animated: Surface {
    fn animator(&mut self) -> &mut Animator;
}

/// Samples the running animation, if any, and applies the frame.
pub fn tick<S: Animated>(surface: &mut S, now: Duration) -> Option<AnimationTicket> {
    let step = surface.animator().advance(now)?;
    step.frame.apply(surface);
    step.finished
}

/// A layer-shell window positioned through its margins.
#[derive(Debug)]
pub struct WindowSurface {
    window: gtk::Window,
    position: Point,
    size: Size,
    screen: Size,
    alpha: f64,
    transform: Transform,
    animator: Animator,
}

impl WindowSurface {
    pub fn new(window: gtk::Window, position: Point, size: Size, screen: Size) -> Self {
        let mut surface = Self {
            window,
            position,
            size,
            screen,
            alpha: 1.0,
            transform: Transform::IDENTITY,
            animator: Animator::new(),
        };
        surface.set_position(position);
        surface.resize(size);
        surface
    }

    pub fn window(&self) -> &gtk::Window {
        &self.window
    }
}

impl Surface for WindowSurface {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
        window::place(&self.window, position);
    }

    fn screen_size(&self) -> Size {
        self.screen
    }

    fn measured_size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.window
            .set_size_request(size.width.ceil() as i32, size.height.ceil() as i32);
    }

    fn visibility(&self) -> Visibility {
        if self.window.is_visible() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.window.set_visible(visibility == Visibility::Visible);
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
        self.window.set_opacity(alpha);
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn animate(&mut self, animation: Animation) {
        self.animator.start(animation);
    }

    fn stop_animation(&mut self) {
        self.animator.stop();
    }
}

impl Animated for WindowSurface {
    fn animator(&mut self) -> &mut Animator {
        &mut self.animator
    }
}

/// A menu item painted into the menu window. Its transform is relative to
/// the menu's anchor.
#[derive(Debug, Clone)]
pub struct ItemSurface {
    pub label: String,
    size: Size,
    screen: Size,
    position: Point,
    visibility: Visibility,
    alpha: f64,
    transform: Transform,
    animator: Animator,
}

impl ItemSurface {
    pub fn new(label: impl Into<String>, diameter: f64, screen: Size) -> Self {
        Self {
            label: label.into(),
            size: Size::new(diameter, diameter),
            screen,
            position: Point::ZERO,
            visibility: Visibility::Hidden,
            alpha: 1.0,
            transform: Transform::COLLAPSED,
            animator: Animator::new(),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    pub fn center(&self, anchor: Point) -> Point {
        anchor + self.transform.translation
    }

    pub fn radius(&self) -> f64 {
        self.size.width / 2.0 * self.transform.scale
    }

    pub fn contains(&self, anchor: Point, point: Point) -> bool {
        self.visibility == Visibility::Visible
            && self.center(anchor).distance(point) <= self.radius()
    }
}

impl Surface for ItemSurface {
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
        self.animator.start(animation);
    }

    fn stop_animation(&mut self) {
        self.animator.stop();
    }
}

impl Animated for ItemSurface {
    fn animator(&mut self) -> &mut Animator {
        &mut self.animator
    }
}
