//! Arc geometry for the expanded menu.
//!
//! Items are spread evenly over an arc of `arc_angle` radians centred on the
//! positive x axis, `radius` pixels away from the anchor. Angles grow
//! clockwise in screen space (y points down), so item 0 is the top end of the
//! arc and the last item the bottom end. Mirroring for a menu that opens to
//! the left is done by the caller (see [`crate::menu::Arm`]).

use crate::error::{Invalid, Result, ensure_finite};
use crate::surface::{Point, Size};

/// Where an item sits, relative to the anchor, once the menu is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemOffset {
    pub dx: f64,
    pub dy: f64,
}

impl ItemOffset {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn angle(&self) -> f64 {
        self.dy.atan2(self.dx)
    }
}

impl From<ItemOffset> for Point {
    fn from(offset: ItemOffset) -> Self {
        Point::new(offset.dx, offset.dy)
    }
}

/// Box enclosing every expanded item, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpandedBounds {
    pub width: i32,
    pub height: i32,
}

impl ExpandedBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl From<ExpandedBounds> for Size {
    fn from(bounds: ExpandedBounds) -> Self {
        Size::new(f64::from(bounds.width), f64::from(bounds.height))
    }
}

pub fn compute_offsets(item_count: usize, radius: f64, arc_angle: f64) -> Result<Vec<ItemOffset>> {
    if item_count < 2 {
        return Err(Invalid::TooFewItems(item_count).into());
    }
    let radius = ensure_finite("radius", radius)?;
    let arc_angle = ensure_finite("arc_angle", arc_angle)?;

    let step = arc_angle / (item_count - 1) as f64;
    let offsets = (0..item_count)
        .map(|i| {
            let angle = -arc_angle / 2.0 + i as f64 * step;
            ItemOffset::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    Ok(offsets)
}

/// Bounding box of the fan, given each item's measured size.
///
/// Each per-item extent is truncated to whole pixels before being compared,
/// and the running maxima start at zero. The vertical extent subtracts a full
/// item height below the lowest centre and adds one above the highest, so it
/// overshoots the tight box by roughly one item height.
pub fn compute_expanded_bounds(offsets: &[ItemOffset], item_sizes: &[Size]) -> ExpandedBounds {
    if offsets.is_empty() || item_sizes.is_empty() {
        return ExpandedBounds::default();
    }

    let (max_x, max_y, min_y) = offsets.iter().zip(item_sizes).fold(
        (0, 0, i32::MAX),
        |(max_x, max_y, min_y), (offset, size)| {
            (
                max_x.max((offset.dx + size.width) as i32),
                max_y.max((offset.dy + size.height) as i32),
                min_y.min((offset.dy - size.height) as i32),
            )
        },
    );

    ExpandedBounds::new(max_x, max_y.saturating_sub(min_y))
}
