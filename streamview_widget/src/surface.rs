// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host interfaces: drawing surfaces and the pointer-move subscription.

use kurbo::{Point, Size};
use streamview_core::Mark;

/// The three surfaces the widget draws into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceId {
    /// The streamgraph and its date axis.
    Chart,
    /// Category swatches and labels.
    Legend,
    /// The floating hover tooltip.
    Tooltip,
}

impl SurfaceId {
    /// Every surface, in page order.
    pub const ALL: [Self; 3] = [Self::Chart, Self::Legend, Self::Tooltip];

    /// A short lowercase name, used in logs and markup.
    pub fn name(self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Legend => "legend",
            Self::Tooltip => "tooltip",
        }
    }
}

/// Where the widget's marks go.
///
/// Every redraw is a [`clear`](SurfaceHost::clear) followed by one
/// [`draw`](SurfaceHost::draw); hosts never see partial updates.
pub trait SurfaceHost {
    /// Removes every mark from `surface`.
    fn clear(&mut self, surface: SurfaceId);

    /// Adds `marks` to `surface`.
    fn draw(&mut self, surface: SurfaceId, marks: &[Mark]);

    /// Sets the size of `surface`.
    fn set_size(&mut self, surface: SurfaceId, size: Size);

    /// Shows or hides `surface`.
    fn set_visible(&mut self, surface: SurfaceId, visible: bool);

    /// Moves a floating surface to `position` (viewport coordinates).
    fn set_position(&mut self, surface: SurfaceId, position: Point);
}

/// Handle of a pointer-move subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// The global pointer-move event source.
///
/// While subscribed, the host forwards every pointer move to
/// [`StreamGraphWidget::pointer_move`](crate::StreamGraphWidget::pointer_move).
pub trait PointerHost {
    /// Starts forwarding pointer moves.
    fn subscribe_pointer_moves(&mut self) -> ListenerId;

    /// Stops forwarding pointer moves for `listener`.
    fn unsubscribe_pointer_moves(&mut self, listener: ListenerId);
}
