use super::{Arm, MenuConfig, MenuEvent, MenuListener, MenuState};
use crate::animation::{Animation, AnimationTicket, Easing, Generation, Target};
use crate::error::Result;
use crate::layout::{self, ExpandedBounds, ItemOffset};
use crate::surface::{Point, Size, Surface, Transform, Visibility};
use std::collections::BTreeSet;

/// Items still animating in the current cycle. The cycle ends when the set
/// drains; completions stamped with another generation never touch it.
#[derive(Debug)]
struct Cycle {
    generation: Generation,
    pending: BTreeSet<usize>,
}

/// The fan of items and its expand/collapse state machine.
///
/// `Collapsed -> Expanding -> Expanded -> Collapsing -> Collapsed`. Calling
/// [`Menu::expand`] or [`Menu::collapse`] mid-cycle restarts every item from
/// wherever it currently is; the superseded cycle's completions are ignored.
pub struct Menu<I> {
    config: MenuConfig,
    items: Vec<I>,
    state: MenuState,
    offsets: Option<Vec<ItemOffset>>,
    bounds: Option<ExpandedBounds>,
    generation: Generation,
    cycle: Option<Cycle>,
    listeners: Vec<Box<dyn MenuListener<I>>>,
}

impl<I: Surface> Menu<I> {
    pub fn new(mut items: Vec<I>, config: MenuConfig) -> Self {
        for item in &mut items {
            item.set_visibility(Visibility::Hidden);
            item.set_transform(Transform::COLLAPSED);
        }
        Self {
            config,
            items,
            state: MenuState::Collapsed,
            offsets: None,
            bounds: None,
            generation: Generation::default(),
            cycle: None,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Takes effect at the next measurement. A cycle already running keeps the
    /// targets it started with.
    pub fn set_config(&mut self, config: MenuConfig) {
        self.config = config;
        self.invalidate();
    }

    /// Drops cached offsets and bounds so the next measurement recomputes them.
    pub fn invalidate(&mut self) {
        self.offsets = None;
        self.bounds = None;
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == MenuState::Expanded
    }

    pub fn is_expanding(&self) -> bool {
        self.state == MenuState::Expanding
    }

    pub fn is_collapsing(&self) -> bool {
        self.state == MenuState::Collapsing
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// For hosts that drive item animations themselves.
    pub fn items_mut(&mut self) -> &mut [I] {
        &mut self.items
    }

    /// Replaces the items and returns the old ones. A cycle in flight is
    /// abandoned; an open menu reports `on_collapsed` right away.
    pub fn set_items(&mut self, items: Vec<I>) -> Vec<I> {
        let old = std::mem::replace(&mut self.items, items);
        self.invalidate();
        self.reset();
        old
    }

    /// Closes the menu without animating. Items jump back to the anchor
    /// hidden, and an open menu reports `on_collapsed`.
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.stop_animation();
            item.set_visibility(Visibility::Hidden);
            item.set_transform(Transform::COLLAPSED);
        }
        self.cycle = None;
        if self.state != MenuState::Collapsed {
            self.state = MenuState::Collapsed;
            self.notify(MenuEvent::Collapsed);
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn offsets(&self) -> Option<&[ItemOffset]> {
        self.offsets.as_deref()
    }

    pub fn expanded_bounds(&self) -> Option<ExpandedBounds> {
        self.bounds
    }

    pub fn add_listener(&mut self, listener: impl MenuListener<I> + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Runs a layout pass: offsets and bounds are recomputed if invalidated,
    /// then `on_measured` fires.
    pub fn measure(&mut self) -> Result<ExpandedBounds> {
        let offsets = match self.offsets.take() {
            Some(offsets) => offsets,
            None if self.items.is_empty() => Vec::new(),
            None => {
                self.config.validate()?;
                layout::compute_offsets(self.items.len(), self.config.radius, self.config.arc_angle)?
            }
        };

        let bounds = match self.bounds {
            Some(bounds) => bounds,
            None => {
                let sizes: Vec<Size> = self.items.iter().map(Surface::measured_size).collect();
                layout::compute_expanded_bounds(&offsets, &sizes)
            }
        };

        log::debug!(
            "Measured {} items: {}x{}",
            offsets.len(),
            bounds.width,
            bounds.height
        );
        self.offsets = Some(offsets);
        self.bounds = Some(bounds);
        self.notify(MenuEvent::Measured);
        Ok(bounds)
    }

    pub fn expand(&mut self, arm: Arm) -> Result<()> {
        if self.offsets.is_none() {
            self.measure()?;
        }
        let targets: Vec<Point> = self
            .offsets
            .iter()
            .flatten()
            .map(|&offset| Point::from(offset) * arm.sign())
            .collect();

        self.begin(MenuState::Expanding);
        log::debug!("Expanding {} items to the {arm}", self.items.len());
        self.notify(MenuEvent::Expanding);

        let generation = self.generation;
        let (duration, easing) = (self.config.animation_duration, Easing::FastOutSlowIn);
        for (i, (item, target)) in self.items.iter_mut().zip(targets).enumerate() {
            let from = item.transform();
            item.set_visibility(Visibility::Visible);
            item.animate(
                Animation::new(
                    AnimationTicket::new(generation, Target::Item(i)),
                    duration,
                    easing,
                )
                .translation(from.translation, target)
                .scale(from.scale, 1.0),
            );
        }

        self.settle_if_idle();
        Ok(())
    }

    pub fn collapse(&mut self) {
        self.begin(MenuState::Collapsing);
        log::debug!("Collapsing {} items", self.items.len());
        self.notify(MenuEvent::Collapsing);

        let generation = self.generation;
        let (duration, easing) = (self.config.animation_duration, Easing::FastOutSlowIn);
        for (i, item) in self.items.iter_mut().enumerate() {
            let from = item.transform();
            item.animate(
                Animation::new(
                    AnimationTicket::new(generation, Target::Item(i)),
                    duration,
                    easing,
                )
                .translation(from.translation, Point::ZERO)
                .scale(from.scale, 0.0),
            );
        }

        self.settle_if_idle();
    }

    /// Feeds back a finished item animation. Returns the state the menu settled
    /// in when this completion ended the current cycle.
    pub fn on_animation_end(&mut self, ticket: AnimationTicket) -> Option<MenuState> {
        let Target::Item(index) = ticket.target else {
            return None;
        };
        let cycle = match self.cycle.as_mut() {
            Some(cycle) if cycle.generation == ticket.generation => cycle,
            _ => {
                log::trace!(
                    "Ignoring stale completion of item {index} from cycle {}",
                    ticket.generation
                );
                return None;
            }
        };
        if !cycle.pending.remove(&index) || !cycle.pending.is_empty() {
            return None;
        }

        self.cycle = None;
        Some(self.settle())
    }

    fn begin(&mut self, state: MenuState) {
        self.generation = self.generation.next();
        self.state = state;
        self.cycle = Some(Cycle {
            generation: self.generation,
            pending: (0..self.items.len()).collect(),
        });
    }

    fn settle_if_idle(&mut self) {
        if self.cycle.as_ref().is_some_and(|c| c.pending.is_empty()) {
            self.cycle = None;
            self.settle();
        }
    }

    fn settle(&mut self) -> MenuState {
        match self.state {
            MenuState::Expanding => {
                self.state = MenuState::Expanded;
                log::debug!("Menu expanded");
                self.notify(MenuEvent::Expanded);
            }
            MenuState::Collapsing => {
                for item in &mut self.items {
                    item.set_visibility(Visibility::Hidden);
                }
                self.state = MenuState::Collapsed;
                log::debug!("Menu collapsed");
                self.notify(MenuEvent::Collapsed);
            }
            MenuState::Expanded | MenuState::Collapsed => {}
        }
        self.state
    }

    fn notify(&mut self, event: MenuEvent) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            event.dispatch(listener.as_mut(), self);
        }
        self.listeners = listeners;
    }
}

impl<I> std::fmt::Debug for Menu<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("config", &self.config)
            .field("items", &self.items.len())
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
