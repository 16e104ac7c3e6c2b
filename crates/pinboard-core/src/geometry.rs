//! Canvas placement geometry.
//!
//! Pure functions and a small drag-session state machine. Nothing here
//! touches the item store: during a drag the position is view-local, and
//! only the final released position is committed (via the store's
//! `move_item`) exactly once. That keeps the store from seeing per-frame
//! positions and guarantees other consumers only ever observe settled
//! coordinates.

use serde::{Deserialize, Serialize};

/// A top-left offset within the canvas coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset in canvas pixels.
    pub x: f64,
    /// Vertical offset in canvas pixels.
    pub y: f64,
}

impl Point {
    /// Construct a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A concrete rendered extent (width × height).
///
/// Items whose declared height is `auto` still have a concrete rendered
/// height at drag time; callers pass that measured value here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Width in canvas pixels.
    pub width: f64,
    /// Height in canvas pixels.
    pub height: f64,
}

impl Bounds {
    /// Construct a bounds value.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Clamp one axis to `[0, container - item]`.
///
/// When the item is larger than the container the valid range is empty and
/// the result pins to `0` — never a negative coordinate.
fn clamp_axis(proposed: f64, item: f64, container: f64) -> f64 {
    let max = (container - item).max(0.0);
    proposed.clamp(0.0, max)
}

/// Clamp a proposed item position so the item stays inside the container.
///
/// Each axis is clamped independently to `[0, container - item]`.
#[must_use]
pub fn clamp_position(proposed: Point, item: Bounds, container: Bounds) -> Point {
    Point {
        x: clamp_axis(proposed.x, item.width, container.width),
        y: clamp_axis(proposed.y, item.height, container.height),
    }
}

/// One in-progress drag of a canvas item.
///
/// Created at pointer-down with the pointer position and the item's current
/// top-left; [`update`](DragSession::update) produces the clamped transient
/// position for each pointer move (view-local, never stored); and
/// [`release`](DragSession::release) consumes the session, yielding the one
/// final position the caller commits.
#[derive(Debug)]
pub struct DragSession {
    /// Pointer offset relative to the item's top-left at drag start.
    grab_offset: Point,
    /// Most recent clamped position.
    current: Point,
}

impl DragSession {
    /// Begin a drag: capture where inside the item the pointer grabbed it.
    #[must_use]
    pub fn begin(pointer: Point, item_origin: Point) -> Self {
        Self {
            grab_offset: Point::new(pointer.x - item_origin.x, pointer.y - item_origin.y),
            current: item_origin,
        }
    }

    /// Advance the drag to a new pointer position.
    ///
    /// Returns the clamped position the view should render the item at.
    pub fn update(&mut self, pointer: Point, item: Bounds, container: Bounds) -> Point {
        let proposed = Point::new(
            pointer.x - self.grab_offset.x,
            pointer.y - self.grab_offset.y,
        );
        self.current = clamp_position(proposed, item, container);
        self.current
    }

    /// End the drag, yielding the final position to commit.
    #[must_use]
    pub fn release(self) -> Point {
        self.current
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
