//! Where a dragged tag lands relative to the tag under the pointer.

use crate::mutations::accepts_children;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Edge band never grows past this many pixels
pub const MAX_DROP_MARGIN: f64 = 15.0;

pub const HOVER_THROTTLE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen rectangle of the hovered element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
    Inside,
}

impl DropPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            DropPosition::Before => "before",
            DropPosition::After => "after",
            DropPosition::Inside => "inside",
        }
    }
}

pub fn resolve_drop_position(pointer: Point, hovered: Option<BoundingBox>, target_tag: &str) -> DropPosition {
    resolve_drop_position_with(pointer, hovered, target_tag, MAX_DROP_MARGIN)
}

/// Top or left band gives `Before`, bottom or right band `After`. The
/// middle is `Inside` for containers and `After` for everything else.
/// Bands are a quarter of each dimension, capped at `max_margin`.
pub fn resolve_drop_position_with(
    pointer: Point,
    hovered: Option<BoundingBox>,
    target_tag: &str,
    max_margin: f64,
) -> DropPosition {
    let Some(rect) = hovered else {
        debug!("Drop target '{}' has no box, placing after", target_tag);
        return DropPosition::After;
    };

    let margin_x = (rect.width / 4.0).min(max_margin);
    let margin_y = (rect.height / 4.0).min(max_margin);
    let x = pointer.x - rect.left;
    let y = pointer.y - rect.top;

    if y < margin_y || x < margin_x {
        DropPosition::Before
    } else if y > rect.height - margin_y || x > rect.width - margin_x {
        DropPosition::After
    } else if accepts_children(target_tag) {
        DropPosition::Inside
    } else {
        DropPosition::After
    }
}

/// Gate limiting how often hover recomputes a drop position
#[derive(Debug, Clone)]
pub struct HoverThrottle {
    window: Duration,
    started_at: Option<Instant>,
}

impl HoverThrottle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            started_at: None,
        }
    }

    /// Open a new window at `now`. False while the previous one is still running.
    pub fn try_start(&mut self, now: Instant) -> bool {
        if self.is_active(now) {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.started_at
            .is_some_and(|started| now.saturating_duration_since(started) < self.window)
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }
}

impl Default for HoverThrottle {
    fn default() -> Self {
        Self::new(HOVER_THROTTLE)
    }
}

/// One drag gesture: what is being dragged plus its hover throttle
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Id of the tag being moved, or `None` when dragging from the palette
    pub source_id: Option<String>,
    throttle: HoverThrottle,
    last_position: Option<DropPosition>,
}

impl DragSession {
    pub fn new(source_id: Option<String>, window: Duration) -> Self {
        Self {
            source_id,
            throttle: HoverThrottle::new(window),
            last_position: None,
        }
    }

    /// Resolve the drop position unless the throttle window is still open
    pub fn hover(
        &mut self,
        now: Instant,
        pointer: Point,
        hovered: Option<BoundingBox>,
        target_tag: &str,
        max_margin: f64,
    ) -> Option<DropPosition> {
        if !self.throttle.try_start(now) {
            return None;
        }
        let position = resolve_drop_position_with(pointer, hovered, target_tag, max_margin);
        self.last_position = Some(position);
        Some(position)
    }

    pub fn last_position(&self) -> Option<DropPosition> {
        self.last_position
    }
}
