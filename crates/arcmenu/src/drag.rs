use crate::animation::{Animation, AnimationTicket, Easing, Generation, Target};
use crate::error::{Result, ensure_within};
use crate::surface::{Point, Side, Surface};
use std::time::Duration;

pub const DEFAULT_CLICK_SLOP: f64 = 8.0;
pub const DEFAULT_CLICK_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_SNAP_DURATION: Duration = Duration::from_millis(300);
pub const DEFAULT_PRESSED_ALPHA: f64 = 1.0;
pub const DEFAULT_UNPRESSED_ALPHA: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Fraction of the trigger's width pushed past the screen edge when snapped.
    pub hidden_width_ratio: f64,
    pub pressed_alpha: f64,
    pub unpressed_alpha: f64,
    /// Pointer travel, in pixels, at which a press turns into a drag.
    pub click_slop: f64,
    /// A press held this long is no longer a click.
    pub click_timeout: Duration,
    pub snap_duration: Duration,
    pub snap_easing: Easing,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            hidden_width_ratio: 0.0,
            pressed_alpha: DEFAULT_PRESSED_ALPHA,
            unpressed_alpha: DEFAULT_UNPRESSED_ALPHA,
            click_slop: DEFAULT_CLICK_SLOP,
            click_timeout: DEFAULT_CLICK_TIMEOUT,
            snap_duration: DEFAULT_SNAP_DURATION,
            snap_easing: Easing::Bounce,
        }
    }
}

impl DragConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_within("hidden_width_ratio", self.hidden_width_ratio, 0.0, 1.0)?;
        ensure_within("pressed_alpha", self.pressed_alpha, 0.0, 1.0)?;
        ensure_within("unpressed_alpha", self.unpressed_alpha, 0.0, 1.0)?;
        ensure_within("click_slop", self.click_slop, 0.0, f64::MAX)?;
        Ok(())
    }
}

/// Snapshot of the gesture as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub position: Point,
    pub is_pressed: bool,
    pub is_dragging: bool,
    /// Edge the trigger rests against; `None` while it is held or in flight.
    pub snapped_side: Option<Side>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Disabled, or no press in progress.
    Ignored,
    Pressed,
    /// The press is held but has not travelled far enough to drag.
    Holding,
    Dragging,
    Clicked,
    /// Released after a drag; the trigger is on its way to this edge.
    Snapping(Side),
    /// Released without qualifying as a click or a drag.
    Released,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    pointer: Point,
    origin: Point,
    at: Duration,
}

/// Drag-to-move and snap-to-edge behaviour of the floating trigger.
///
/// Pointer coordinates are screen coordinates. While disabled the trigger
/// cannot be dragged, but a press and release still counts as a click so that
/// tapping the trigger can close the menu it opened.
pub struct DragController<S> {
    surface: S,
    config: DragConfig,
    enabled: bool,
    press: Option<Press>,
    dragging: bool,
    snapped: Option<Side>,
    generation: Generation,
    snapping: Option<(Generation, Side)>,
    /// A press stopped a snap short of the edge.
    unsettled: bool,
    click_listener: Option<Box<dyn FnMut()>>,
}

impl<S: Surface> DragController<S> {
    pub fn new(mut surface: S, config: DragConfig) -> Self {
        surface.set_alpha(config.unpressed_alpha);
        Self {
            surface,
            config,
            enabled: true,
            press: None,
            dragging: false,
            snapped: None,
            generation: Generation::default(),
            snapping: None,
            unsettled: false,
            click_listener: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// For hosts that drive the trigger's animations themselves. Moving the
    /// surface through this bypasses the gesture.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
    }

    pub fn state(&self) -> DragState {
        DragState {
            position: self.surface.position(),
            is_pressed: self.press.is_some(),
            is_dragging: self.dragging,
            snapped_side: self.snapped,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling in the middle of a drag drops the trigger at the nearest edge.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled && self.dragging {
            self.dragging = false;
            self.press = None;
            self.keep_to_edge();
        }
    }

    pub fn set_click_listener(&mut self, listener: impl FnMut() + 'static) {
        self.click_listener = Some(Box::new(listener));
    }

    pub fn has_click_listener(&self) -> bool {
        self.click_listener.is_some()
    }

    pub fn pointer_down(&mut self, pointer: Point, now: Duration) -> PointerOutcome {
        if self.snapping.take().is_some() {
            self.surface.stop_animation();
            self.unsettled = true;
        }
        self.press = Some(Press {
            pointer,
            origin: self.surface.position(),
            at: now,
        });
        self.dragging = false;
        self.surface.set_alpha(self.config.pressed_alpha);
        PointerOutcome::Pressed
    }

    pub fn pointer_move(&mut self, pointer: Point) -> PointerOutcome {
        let Some(press) = self.press else {
            return PointerOutcome::Ignored;
        };

        if !self.dragging
            && self.enabled
            && pointer.distance(press.pointer) >= self.config.click_slop
        {
            log::debug!("Trigger drag started");
            self.dragging = true;
            self.snapped = None;
        }

        if self.dragging {
            self.surface
                .set_position(press.origin + (pointer - press.pointer));
            PointerOutcome::Dragging
        } else {
            PointerOutcome::Holding
        }
    }

    pub fn pointer_up(&mut self, pointer: Point, now: Duration) -> PointerOutcome {
        if self.press.is_none() {
            return PointerOutcome::Ignored;
        }
        self.pointer_move(pointer);
        let Some(press) = self.press.take() else {
            return PointerOutcome::Ignored;
        };

        if self.dragging {
            self.dragging = false;
            return PointerOutcome::Snapping(self.snap_to_edge());
        }

        self.settle_if_caught();
        self.surface.set_alpha(self.config.unpressed_alpha);
        let travelled = pointer.distance(press.pointer);
        let held = now.saturating_sub(press.at);
        if travelled < self.config.click_slop && held < self.config.click_timeout {
            if let Some(listener) = self.click_listener.as_mut() {
                listener();
            }
            PointerOutcome::Clicked
        } else {
            PointerOutcome::Released
        }
    }

    /// The pointer went away without a release. A drag still settles at an edge.
    pub fn pointer_cancel(&mut self) -> PointerOutcome {
        if self.press.take().is_none() {
            return PointerOutcome::Ignored;
        }
        if self.dragging {
            self.dragging = false;
            return PointerOutcome::Snapping(self.snap_to_edge());
        }
        self.settle_if_caught();
        self.surface.set_alpha(self.config.unpressed_alpha);
        PointerOutcome::Released
    }

    /// Moves the trigger to the nearer edge at once, without animation.
    pub fn keep_to_edge(&mut self) -> Side {
        if self.snapping.take().is_some() {
            self.surface.stop_animation();
        }
        let (side, target) = self.edge_target();
        self.surface.set_position(target);
        self.snapped = Some(side);
        self.unsettled = false;
        side
    }

    /// Animates the trigger to the nearer edge, fading it to the unpressed alpha.
    pub fn snap_to_edge(&mut self) -> Side {
        let (side, target) = self.edge_target();
        self.generation = self.generation.next();
        self.snapping = Some((self.generation, side));
        self.snapped = None;
        self.unsettled = false;

        log::debug!("Snapping trigger to the {side} edge");
        self.surface.animate(
            Animation::new(
                AnimationTicket::new(self.generation, Target::Trigger),
                self.config.snap_duration,
                self.config.snap_easing,
            )
            .position(self.surface.position(), target)
            .alpha(self.surface.alpha(), self.config.unpressed_alpha),
        );
        side
    }

    /// Returns `true` when the ticket finished the current snap.
    pub fn on_animation_end(&mut self, ticket: AnimationTicket) -> bool {
        match self.snapping {
            Some((generation, side))
                if ticket.target == Target::Trigger && ticket.generation == generation =>
            {
                self.snapping = None;
                self.snapped = Some(side);
                true
            }
            _ => {
                log::trace!("Ignoring stale trigger completion from cycle {}", ticket.generation);
                false
            }
        }
    }

    fn settle_if_caught(&mut self) {
        if self.unsettled {
            self.keep_to_edge();
        }
    }

    fn edge_target(&self) -> (Side, Point) {
        let position = self.surface.position();
        let size = self.surface.measured_size();
        let screen = self.surface.screen_size();

        let side = Side::nearest(position.x, size.width, screen.width);
        let hidden = size.width * self.config.hidden_width_ratio;
        let x = match side {
            Side::Left => -hidden,
            Side::Right => screen.width - size.width + hidden,
        };
        let y = position.y.clamp(0.0, (screen.height - size.height).max(0.0));
        (side, Point::new(x, y))
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for DragController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("enabled", &self.enabled)
            .field("dragging", &self.dragging)
            .field("snapped", &self.snapped)
            .field("snapping", &self.snapping)
            .field("unsettled", &self.unsettled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Size;
    use crate::testing::{Clock, FakeSurface, SCREEN};
    use std::cell::Cell;
    use std::rc::Rc;

    const TRIGGER: Size = Size::new(100.0, 100.0);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn controller_at(x: f64, y: f64, config: DragConfig) -> DragController<FakeSurface> {
        DragController::new(FakeSurface::at(Point::new(x, y), TRIGGER), config)
    }

    fn settle(drag: &mut DragController<FakeSurface>, clock: &mut Clock) {
        let tickets = clock.run_to_end(std::slice::from_mut(drag.surface_mut()));
        for ticket in tickets {
            assert!(drag.on_animation_end(ticket));
        }
    }

    #[test]
    fn test_keep_to_edge_is_idempotent() {
        let config = DragConfig {
            hidden_width_ratio: 0.3,
            ..DragConfig::default()
        };
        for start in [0.0, 200.0, 489.0, 491.0, 800.0, 1200.0] {
            let mut drag = controller_at(start, 700.0, config);
            let side = drag.keep_to_edge();
            let first = drag.surface().position;
            assert_eq!(drag.keep_to_edge(), side);
            assert_eq!(drag.surface().position, first, "start={start}");
            assert_eq!(drag.state().snapped_side, Some(side));
        }
    }

    #[test]
    fn test_keep_to_edge_hides_part_of_the_trigger() {
        let config = DragConfig {
            hidden_width_ratio: 0.25,
            ..DragConfig::default()
        };
        let mut left = controller_at(100.0, 300.0, config);
        assert_eq!(left.keep_to_edge(), Side::Left);
        assert_eq!(left.surface().position, Point::new(-25.0, 300.0));

        let mut right = controller_at(900.0, 300.0, config);
        assert_eq!(right.keep_to_edge(), Side::Right);
        assert_eq!(
            right.surface().position,
            Point::new(SCREEN.width - 100.0 + 25.0, 300.0)
        );
    }

    #[test]
    fn test_keep_to_edge_clamps_vertically() {
        let mut drag = controller_at(100.0, -40.0, DragConfig::default());
        drag.keep_to_edge();
        assert_eq!(drag.surface().position.y, 0.0);

        let mut drag = controller_at(100.0, 5000.0, DragConfig::default());
        drag.keep_to_edge();
        assert_eq!(drag.surface().position.y, SCREEN.height - TRIGGER.height);
    }

    #[test]
    fn test_click() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut drag = controller_at(0.0, 500.0, DragConfig::default());
        drag.set_click_listener(move || counter.set(counter.get() + 1));

        assert_eq!(drag.pointer_down(Point::new(50.0, 550.0), ms(0)), PointerOutcome::Pressed);
        assert_eq!(drag.surface().alpha, DEFAULT_PRESSED_ALPHA);
        assert!(drag.state().is_pressed);
        assert_eq!(drag.pointer_move(Point::new(53.0, 552.0)), PointerOutcome::Holding);
        assert_eq!(drag.surface().position, Point::new(0.0, 500.0));
        assert_eq!(
            drag.pointer_up(Point::new(53.0, 552.0), ms(120)),
            PointerOutcome::Clicked
        );
        assert_eq!(clicks.get(), 1);
        assert_eq!(drag.surface().alpha, DEFAULT_UNPRESSED_ALPHA);
        assert!(!drag.state().is_pressed);
    }

    #[test]
    fn test_displacement_at_slop_is_a_drag() {
        for _ in 0..3 {
            let mut drag = controller_at(0.0, 500.0, DragConfig::default());
            drag.pointer_down(Point::new(50.0, 550.0), ms(0));
            // Exactly DEFAULT_CLICK_SLOP away.
            let outcome = drag.pointer_up(Point::new(50.0, 558.0), ms(50));
            assert_eq!(outcome, PointerOutcome::Snapping(Side::Left));
        }

        let mut drag = controller_at(0.0, 500.0, DragConfig::default());
        drag.pointer_down(Point::new(50.0, 550.0), ms(0));
        let outcome = drag.pointer_up(Point::new(50.0, 557.999), ms(50));
        assert_eq!(outcome, PointerOutcome::Clicked);
    }

    #[test]
    fn test_long_press_is_not_a_click() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut drag = controller_at(0.0, 500.0, DragConfig::default());
        drag.set_click_listener(move || counter.set(counter.get() + 1));

        drag.pointer_down(Point::new(50.0, 550.0), ms(1000));
        let outcome = drag.pointer_up(Point::new(50.0, 550.0), ms(1000) + DEFAULT_CLICK_TIMEOUT);
        assert_eq!(outcome, PointerOutcome::Released);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn test_drag_follows_pointer_then_snaps() {
        let config = DragConfig {
            hidden_width_ratio: 0.5,
            ..DragConfig::default()
        };
        let mut drag = controller_at(0.0, 500.0, config);
        let mut clock = Clock::default();

        drag.pointer_down(Point::new(50.0, 550.0), ms(0));
        assert_eq!(drag.pointer_move(Point::new(350.0, 650.0)), PointerOutcome::Dragging);
        assert_eq!(drag.surface().position, Point::new(300.0, 600.0));
        assert!(drag.state().is_dragging);

        assert_eq!(drag.pointer_move(Point::new(750.0, 450.0)), PointerOutcome::Dragging);
        assert_eq!(drag.surface().position, Point::new(700.0, 400.0));

        let outcome = drag.pointer_up(Point::new(760.0, 450.0), ms(400));
        assert_eq!(outcome, PointerOutcome::Snapping(Side::Right));
        assert_eq!(drag.surface().position, Point::new(710.0, 400.0));
        assert_eq!(drag.state().snapped_side, None);
        assert_eq!(drag.surface().alpha, DEFAULT_PRESSED_ALPHA);

        settle(&mut drag, &mut clock);
        assert_eq!(drag.surface().position, Point::new(SCREEN.width - 50.0, 400.0));
        assert_eq!(drag.surface().alpha, DEFAULT_UNPRESSED_ALPHA);
        assert_eq!(drag.state().snapped_side, Some(Side::Right));
        assert!(!drag.state().is_dragging);
    }

    #[test]
    fn test_press_during_snap_cancels_it() {
        let mut drag = controller_at(0.0, 500.0, DragConfig::default());
        let mut clock = Clock::default();

        drag.pointer_down(Point::new(50.0, 550.0), ms(0));
        drag.pointer_up(Point::new(450.0, 550.0), ms(100));
        let stale = AnimationTicket::new(drag.generation, Target::Trigger);
        clock.run_for(std::slice::from_mut(drag.surface_mut()), ms(100));
        let caught = drag.surface().position;

        assert!(caught.x > 0.0 && caught.x < SCREEN.width / 2.0);

        drag.pointer_down(caught, ms(200));
        assert!(!drag.surface().animator.is_running());
        assert!(!drag.on_animation_end(stale));
        assert_eq!(drag.surface().position, caught);
        assert_eq!(drag.state().snapped_side, None);

        assert_eq!(drag.pointer_up(caught, ms(250)), PointerOutcome::Clicked);
        assert_eq!(drag.surface().position, Point::new(0.0, 500.0));
        assert_eq!(drag.state().snapped_side, Some(Side::Left));
        assert!(!drag.surface().animator.is_running());
    }

    #[test]
    fn test_click_during_snap_still_reaches_the_listener() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut drag = controller_at(0.0, 500.0, DragConfig::default());
        drag.set_click_listener(move || counter.set(counter.get() + 1));
        let mut clock = Clock::default();

        drag.pointer_down(Point::new(50.0, 550.0), ms(0));
        drag.pointer_up(Point::new(1050.0, 550.0), ms(100));
        clock.run_for(std::slice::from_mut(drag.surface_mut()), ms(60));

        let caught = drag.surface().position;
        drag.pointer_down(caught, ms(200));
        assert_eq!(drag.pointer_up(caught, ms(230)), PointerOutcome::Clicked);
        assert_eq!(clicks.get(), 1);
        assert_eq!(drag.state().snapped_side, Some(Side::Right));
        assert_eq!(drag.surface().position, Point::new(SCREEN.width - 100.0, 500.0));
    }

    #[test]
    fn test_cancel_during_snap_settles() {
        let mut drag = controller_at(0.0, 500.0, DragConfig::default());
        let mut clock = Clock::default();

        drag.pointer_down(Point::new(50.0, 550.0), ms(0));
        drag.pointer_up(Point::new(450.0, 550.0), ms(100));
        clock.run_for(std::slice::from_mut(drag.surface_mut()), ms(100));
        let caught = drag.surface().position;

        drag.pointer_down(caught, ms(200));
        assert_eq!(drag.pointer_cancel(), PointerOutcome::Released);
        assert_eq!(drag.state().snapped_side, Some(Side::Left));
        assert_eq!(drag.surface().position, Point::new(0.0, 500.0));
        assert_eq!(drag.surface().alpha, DEFAULT_UNPRESSED_ALPHA);
    }

    #[test]
    fn test_disabled_controller_does_not_drag_but_still_clicks() {
        let mut drag = controller_at(0.0, 500.0, DragConfig::default());
        drag.set_enabled(false);

        drag.pointer_down(Point::new(50.0, 550.0), ms(0));
        assert_eq!(drag.pointer_move(Point::new(400.0, 550.0)), PointerOutcome::Holding);
        assert_eq!(drag.surface().position, Point::new(0.0, 500.0));
        assert_eq!(drag.pointer_up(Point::new(400.0, 550.0), ms(50)), PointerOutcome::Released);

        drag.pointer_down(Point::new(50.0, 550.0), ms(100));
        assert_eq!(drag.pointer_up(Point::new(50.0, 550.0), ms(150)), PointerOutcome::Clicked);
    }

    #[test]
    fn test_disabling_mid_drag_drops_at_edge() {
        let mut drag = controller_at(0.0, 500.0, DragConfig::default());
        drag.pointer_down(Point::new(50.0, 550.0), ms(0));
        drag.pointer_move(Point::new(850.0, 550.0));
        drag.set_enabled(false);

        let state = drag.state();
        assert!(!state.is_pressed && !state.is_dragging);
        assert_eq!(state.snapped_side, Some(Side::Right));
        assert_eq!(state.position, Point::new(SCREEN.width - 100.0, 500.0));
        assert_eq!(drag.pointer_up(Point::new(850.0, 550.0), ms(30)), PointerOutcome::Ignored);
    }

    #[test]
    fn test_cancel_after_drag_snaps() {
        let mut drag = controller_at(0.0, 500.0, DragConfig::default());
        drag.pointer_down(Point::new(50.0, 550.0), ms(0));
        drag.pointer_move(Point::new(150.0, 550.0));
        assert_eq!(drag.pointer_cancel(), PointerOutcome::Snapping(Side::Left));
        assert_eq!(drag.pointer_cancel(), PointerOutcome::Ignored);
    }

    #[test]
    fn test_config_validation() {
        assert!(DragConfig::default().validate().is_ok());
        for bad in [
            DragConfig {
                hidden_width_ratio: 1.2,
                ..DragConfig::default()
            },
            DragConfig {
                pressed_alpha: -0.1,
                ..DragConfig::default()
            },
            DragConfig {
                click_slop: f64::NAN,
                ..DragConfig::default()
            },
        ] {
            assert!(bad.validate().is_err());
        }
    }
}
