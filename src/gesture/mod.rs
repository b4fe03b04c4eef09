//! 3D gestures
//!
//! Tools declare, every frame, which pointer interactions they are interested
//! in (hover or drag) and which scene elements the pointer may snap to. The
//! dispatcher resolves the pointer ray against the scene and calls the
//! tool's handler synchronously, before `gesture3d` returns.
//!
//! ```ignore
//! gestures.gesture3d(
//!     &Gesture3d::drag(SnapMask::VOLUME | SnapMask::ROUNDED),
//!     |event| {
//!         tool.on_drag(event, session);
//!         GestureResponse::Accepted
//!     },
//! );
//! ```

mod dispatcher;

pub use dispatcher::{GestureDispatcher, PointerState};

use bitflags::bitflags;
use macroquad::math::Vec3;

bitflags! {
    /// Scene elements a gesture may snap to, plus snapping modifiers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SnapMask: u32 {
        /// Faces of the voxels in the image
        const VOLUME        = 0b0000_0001;
        /// The ground plane (z = 0)
        const PLANE         = 0b0000_0010;
        /// Inner faces of the current selection box
        const SELECTION_IN  = 0b0000_0100;
        /// Outer faces of the current selection box
        const SELECTION_OUT = 0b0000_1000;
        /// Snap the hit to voxel centers on the hit face
        const ROUNDED       = 0b0001_0000;
    }
}

impl Default for SnapMask {
    fn default() -> Self {
        Self::VOLUME | Self::PLANE
    }
}

/// Kind of pointer interaction a gesture listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Hover,
    Drag,
}

/// Where an event sits in the gesture's life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// Pointer moving with no button held
    Hover,
    /// First event of a drag
    Begin,
    /// Drag continuing
    Update,
    /// Button released, last event of a drag
    End,
}

/// Per-frame gesture declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture3d {
    pub kind: GestureKind,
    pub snap_mask: SnapMask,
}

impl Gesture3d {
    pub fn hover(snap_mask: SnapMask) -> Self {
        Self { kind: GestureKind::Hover, snap_mask }
    }

    pub fn drag(snap_mask: SnapMask) -> Self {
        Self { kind: GestureKind::Drag, snap_mask }
    }
}

/// What the handler gets for each dispatched event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    /// Snapped hit position
    pub pos: Vec3,
    /// Normal of the surface that was hit
    pub normal: Vec3,
    /// The single snap target that produced the hit
    pub snapped: SnapMask,
    pub phase: GesturePhase,
}

/// Handler verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureResponse {
    Accepted,
    /// The event is not for this gesture (e.g. hovering the existing selection)
    Ignored,
}
