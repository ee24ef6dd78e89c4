use crate::animation::{AnimationTicket, Target};
use crate::drag::{DragConfig, DragController, PointerOutcome};
use crate::error::Result;
use crate::layout::ExpandedBounds;
use crate::menu::{Arm, Menu, MenuConfig, MenuListener, MenuState};
use crate::surface::{Point, Side, Size, Surface, Visibility};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayConfig {
    pub menu: MenuConfig,
    pub drag: DragConfig,
}

impl OverlayConfig {
    pub fn validate(&self) -> Result<()> {
        self.menu.validate()?;
        self.drag.validate()
    }
}

/// A floating trigger and the menu it opens, each in its own overlay window.
///
/// The menu window is kept centred vertically on the trigger. It extends away
/// from the screen edge the trigger rests on, with the trigger's centre on its
/// near edge; that point is the menu's anchor, see [`Overlay::menu_anchor`].
pub struct Overlay<W, I> {
    trigger: DragController<W>,
    menu: Menu<I>,
    menu_window: W,
}

impl<W: Surface, I: Surface> Overlay<W, I> {
    pub fn new(trigger: W, mut menu_window: W, items: Vec<I>, config: OverlayConfig) -> Self {
        menu_window.set_visibility(Visibility::Hidden);
        let mut trigger = DragController::new(trigger, config.drag);
        trigger.keep_to_edge();
        Self {
            trigger,
            menu: Menu::new(items, config.menu),
            menu_window,
        }
    }

    pub fn config(&self) -> OverlayConfig {
        OverlayConfig {
            menu: *self.menu.config(),
            drag: *self.trigger.config(),
        }
    }

    /// Applies a new configuration and runs a layout pass with it. An invalid
    /// configuration is rejected before anything changes; an open menu
    /// closes at once so no item is left outside the resized window.
    pub fn set_config(&mut self, config: OverlayConfig) -> Result<ExpandedBounds> {
        config.validate()?;
        if self.menu.state() != MenuState::Collapsed {
            self.menu.reset();
            self.trigger.set_enabled(true);
            self.after_transition();
        }
        self.menu.set_config(config.menu);
        self.trigger.set_config(config.drag);
        if self.menu.state() == MenuState::Collapsed && !self.trigger.state().is_pressed {
            self.trigger.keep_to_edge();
        }
        self.measure()
    }

    pub fn menu(&self) -> &Menu<I> {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu<I> {
        &mut self.menu
    }

    pub fn trigger(&self) -> &DragController<W> {
        &self.trigger
    }

    pub fn trigger_mut(&mut self) -> &mut DragController<W> {
        &mut self.trigger
    }

    pub fn menu_window(&self) -> &W {
        &self.menu_window
    }

    pub fn menu_window_mut(&mut self) -> &mut W {
        &mut self.menu_window
    }

    /// Swaps the items, closing the menu at once if it was open. Run
    /// [`Overlay::measure`] afterwards.
    pub fn set_items(&mut self, items: Vec<I>) -> Vec<I> {
        let old = self.menu.set_items(items);
        self.trigger.set_enabled(true);
        self.after_transition();
        old
    }

    pub fn add_listener(&mut self, listener: impl MenuListener<I> + 'static) {
        self.menu.add_listener(listener);
    }

    /// Replaces the default expand/collapse toggle on trigger clicks.
    pub fn set_click_listener(&mut self, listener: impl FnMut() + 'static) {
        self.trigger.set_click_listener(listener);
    }

    pub fn is_expanded(&self) -> bool {
        self.menu.is_expanded()
    }

    /// Screen half the trigger currently occupies.
    pub fn trigger_side(&self) -> Side {
        let surface = self.trigger.surface();
        Side::nearest(
            surface.position().x,
            surface.measured_size().width,
            surface.screen_size().width,
        )
    }

    pub fn arm(&self) -> Arm {
        Arm::away_from(self.trigger_side())
    }

    /// Where items rest, in the menu window's own coordinates.
    pub fn menu_anchor(&self) -> Point {
        let bounds = Size::from(self.menu.expanded_bounds().unwrap_or_default());
        match self.arm() {
            Arm::Right => Point::new(0.0, bounds.height / 2.0),
            Arm::Left => Point::new(bounds.width, bounds.height / 2.0),
        }
    }

    pub fn measure(&mut self) -> Result<ExpandedBounds> {
        let bounds = self.menu.measure()?;
        self.menu_window.resize(bounds.into());
        self.align_menu();
        Ok(bounds)
    }

    pub fn expand(&mut self) -> Result<()> {
        if self.menu.offsets().is_none() {
            self.measure()?;
        }
        self.align_menu();
        self.menu.expand(self.arm())?;
        self.trigger.set_enabled(false);
        self.menu_window.set_visibility(Visibility::Visible);
        self.after_transition();
        Ok(())
    }

    pub fn collapse(&mut self) {
        self.trigger.set_enabled(true);
        self.align_menu();
        self.menu.collapse();
        let alpha = self.trigger.config().unpressed_alpha;
        self.trigger.surface_mut().set_alpha(alpha);
        self.after_transition();
    }

    pub fn toggle(&mut self) -> Result<()> {
        if self.menu.state().is_open() {
            self.collapse();
            Ok(())
        } else {
            self.expand()
        }
    }

    /// Interaction outside the trigger and the items closes an open menu.
    pub fn dismiss(&mut self) {
        if self.menu.state().is_open() {
            self.collapse();
        }
    }

    pub fn is_shown(&self) -> bool {
        self.trigger.surface().visibility() == Visibility::Visible
    }

    pub fn show(&mut self) {
        self.trigger.surface_mut().set_visibility(Visibility::Visible);
        if self.menu.state() == MenuState::Collapsed {
            self.trigger.keep_to_edge();
        }
    }

    /// Hides the trigger at once. An open menu still plays its collapse.
    pub fn hide(&mut self) {
        self.trigger.pointer_cancel();
        self.dismiss();
        self.trigger.surface_mut().set_visibility(Visibility::Hidden);
    }

    /// Animates the trigger to the nearer edge, unless the menu is in use or
    /// the trigger is held.
    pub fn snap(&mut self) -> Option<Side> {
        if self.menu.state() != MenuState::Collapsed || self.trigger.state().is_pressed {
            return None;
        }
        Some(self.trigger.snap_to_edge())
    }

    pub fn pointer_down(&mut self, pointer: Point, now: Duration) -> PointerOutcome {
        self.trigger.pointer_down(pointer, now)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> PointerOutcome {
        self.trigger.pointer_move(pointer)
    }

    pub fn pointer_up(&mut self, pointer: Point, now: Duration) -> Result<PointerOutcome> {
        let outcome = self.trigger.pointer_up(pointer, now);
        match outcome {
            PointerOutcome::Clicked if !self.trigger.has_click_listener() => self.toggle()?,
            PointerOutcome::Clicked | PointerOutcome::Ignored => {}
            _ if self.menu.state().is_open() => {
                let alpha = self.trigger.config().pressed_alpha;
                self.trigger.surface_mut().set_alpha(alpha);
            }
            _ => {}
        }
        Ok(outcome)
    }

    pub fn pointer_cancel(&mut self) -> PointerOutcome {
        self.trigger.pointer_cancel()
    }

    pub fn on_animation_end(&mut self, ticket: AnimationTicket) {
        match ticket.target {
            Target::Trigger => {
                self.trigger.on_animation_end(ticket);
            }
            Target::Item(_) => {
                if self.menu.on_animation_end(ticket).is_some() {
                    self.after_transition();
                }
            }
        }
    }

    fn align_menu(&mut self) {
        let surface = self.trigger.surface();
        let position = surface.position();
        let size = surface.measured_size();
        let bounds = Size::from(self.menu.expanded_bounds().unwrap_or_default());

        let y = position.y + size.height / 2.0 - bounds.height / 2.0;
        let x = match self.arm() {
            Arm::Right => position.x + size.width / 2.0,
            Arm::Left => position.x + size.width / 2.0 - bounds.width,
        };
        self.menu_window.set_position(Point::new(x, y));
    }

    fn after_transition(&mut self) {
        let config = *self.trigger.config();
        match self.menu.state() {
            MenuState::Expanded => self.trigger.surface_mut().set_alpha(config.pressed_alpha),
            MenuState::Collapsed => {
                self.trigger.surface_mut().set_alpha(config.unpressed_alpha);
                self.menu_window.set_visibility(Visibility::Hidden);
            }
            MenuState::Expanding | MenuState::Collapsing => {}
        }
    }
}

impl<W: std::fmt::Debug, I> std::fmt::Debug for Overlay<W, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("trigger", &self.trigger)
            .field("menu", &self.menu)
            .field("menu_window", &self.menu_window)
            .finish()
    }
}
