//! # Drop Position
//!
//! Where a pending drop lands inside a container, and the rate limiting that
//! keeps the drop indicator from flickering under high-frequency pointer
//! events.
//!
//! Insertion always appends, so `center` and `bottom` only differ in how the
//! indicator is drawn. `top` is part of the wire vocabulary but is never
//! produced.

use serde::{Deserialize, Serialize};

use crate::config::{DropConfig, MAX_MARGIN_FRACTION};
use crate::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Top,
    Center,
    Bottom,
}

/// Pointer position relative to a candidate container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropGeometry {
    /// Vertical pointer offset from the container's top edge
    pub offset_y: f64,

    /// Container height
    pub height: f64,

    /// Whether the container has no children yet
    pub is_empty: bool,
}

/// Resolve the drop position for a pointer inside a container.
///
/// Empty containers always resolve to center. Otherwise anything above the
/// lower third boundary (pushed down by `margin_fraction * height`) is center
/// and anything below it is bottom.
pub fn resolve_drop_position(geometry: DropGeometry, margin_fraction: f64) -> DropPosition {
    if geometry.is_empty {
        return DropPosition::Center;
    }

    let height = geometry.height;
    if !height.is_finite() || height <= 0.0 || !geometry.offset_y.is_finite() {
        return DropPosition::Center;
    }

    let margin = if margin_fraction.is_finite() {
        margin_fraction.clamp(0.0, MAX_MARGIN_FRACTION)
    } else {
        0.0
    };
    let lower_boundary = height * 2.0 / 3.0 + height * margin;

    if geometry.offset_y > lower_boundary {
        DropPosition::Bottom
    } else {
        DropPosition::Center
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    position: DropPosition,
    since_ms: u64,
}

/// Throttled, debounced drop indicator for one drag gesture.
///
/// Every method returns the action the host should dispatch, if any.
/// Timestamps are host milliseconds and must not go backwards.
#[derive(Debug, Clone)]
pub struct DropIndicator {
    config: DropConfig,
    target_id: Option<String>,
    committed: Option<DropPosition>,
    pending: Option<Pending>,
    last_sample_ms: Option<u64>,
}

impl DropIndicator {
    pub fn new(config: DropConfig) -> Self {
        Self {
            config,
            target_id: None,
            committed: None,
            pending: None,
            last_sample_ms: None,
        }
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// Position currently shown to the user.
    pub fn position(&self) -> Option<DropPosition> {
        self.committed
    }

    /// The pointer entered a container: show center right away.
    pub fn enter(&mut self, target_id: &str, now_ms: u64) -> Action {
        self.target_id = Some(target_id.to_string());
        self.committed = Some(DropPosition::Center);
        self.pending = None;
        self.last_sample_ms = Some(now_ms);

        Action::SetDropTarget {
            drop_target_id: target_id.to_string(),
            drop_position: DropPosition::Center,
        }
    }

    /// A pointer sample inside `target_id`.
    pub fn pointer_move(&mut self, target_id: &str, geometry: DropGeometry, now_ms: u64) -> Option<Action> {
        if self.target_id.as_deref() != Some(target_id) {
            return Some(self.enter(target_id, now_ms));
        }

        if let Some(last) = self.last_sample_ms {
            if now_ms.saturating_sub(last) < self.config.throttle_ms {
                return self.tick(now_ms);
            }
        }
        self.last_sample_ms = Some(now_ms);

        let position = resolve_drop_position(geometry, self.config.margin_fraction);

        if self.committed == Some(position) {
            self.pending = None;
            return None;
        }

        match self.pending {
            Some(pending) if pending.position == position => self.tick(now_ms),
            _ => {
                self.pending = Some(Pending {
                    position,
                    since_ms: now_ms,
                });
                self.tick(now_ms)
            }
        }
    }

    /// Commit a pending position once it has been stable long enough.
    pub fn tick(&mut self, now_ms: u64) -> Option<Action> {
        let pending = self.pending?;
        if now_ms.saturating_sub(pending.since_ms) < self.config.debounce_ms {
            return None;
        }

        let target_id = self.target_id.clone()?;
        self.pending = None;
        self.committed = Some(pending.position);

        Some(Action::SetDropTarget {
            drop_target_id: target_id,
            drop_position: pending.position,
        })
    }

    /// The pointer left the container (or the drag ended).
    pub fn leave(&mut self) -> Option<Action> {
        self.pending = None;
        self.committed = None;
        self.last_sample_ms = None;
        self.target_id.take().map(|_| Action::ClearDropTarget)
    }
}
