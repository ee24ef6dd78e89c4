//! A radial action menu that fans out from a draggable floating trigger.
//!
//! The core is toolkit-agnostic: hosts implement [`Surface`] for their
//! windows, feed pointer events and frame times in, and hand finished
//! animation tickets back to the [`Overlay`].

pub mod animation;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod layout;
pub mod menu;
pub mod overlay;
pub mod surface;
pub mod sys;

#[cfg(test)]
pub(crate) mod testing;

pub use animation::{Animation, AnimationTicket, Animator, Easing, Frame, Generation, Step, Target};
pub use drag::{DragConfig, DragController, DragState, PointerOutcome};
pub use error::{Error, Invalid, Result};
pub use layout::{ExpandedBounds, ItemOffset, compute_expanded_bounds, compute_offsets};
pub use menu::{Arm, Menu, MenuConfig, MenuEvent, MenuListener, MenuState};
pub use overlay::{Overlay, OverlayConfig};
pub use surface::{Point, Side, Size, Surface, Transform, Visibility};
