//! The sheet's presentation / dismissal state machine.
//!
//! Two scalars describe the sheet: how far it is pushed down from its
//! resting position (`drag_offset`, in units) and how opaque the scrim
//! behind it is (`dim_opacity`).  Events (mount, presentation changes,
//! drags, scrim taps) assign new values under a [`Curve`]; the renderer reads
//! the animated values every frame.
//!
//! The presentation flag belongs to the host.  Operations that dismiss the
//! sheet say so in their [`Outcome`] and the host clears its flag through
//! [`Outcome::notify`].  The sheet never asks to be presented.

use std::time::Duration;

use super::animation::{Animated, Curve};
use super::gesture::GestureSample;

/// Logical units per terminal row unless configured otherwise.
pub const DEFAULT_UNITS_PER_ROW: f64 = 16.0;

// ───────────────────────────────────────── config ────────────

/// Tuning constants for one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Scrim opacity while the sheet rests fully presented.
    pub dim_background_amount: f64,
    /// Projected drag distance (units) past which a release dismisses.
    pub required_dismiss_velocity: f64,
    /// Drag distance (units) over which the scrim fades out.
    pub fade_dim_background_tolerance: f64,
    /// Clamp the fade to `[0, dim_background_amount]`.  Off by default: a
    /// drag past the tolerance drives the opacity negative, which renders
    /// as fully transparent.
    pub clamp_dim_fade: bool,
    /// Logical units per terminal row.
    pub units_per_row: f64,
    pub show_curve: Curve,
    pub dismiss_curve: Curve,
    pub reset_curve: Curve,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            dim_background_amount: 0.5,
            required_dismiss_velocity: 6.0,
            fade_dim_background_tolerance: 120.0,
            clamp_dim_fade: false,
            units_per_row: DEFAULT_UNITS_PER_ROW,
            show_curve: Curve::ease_out(),
            dismiss_curve: Curve::ease_in(),
            reset_curve: Curve::spring(),
        }
    }
}

// ───────────────────────────────────────── outcomes ──────────

/// Where the sheet is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// At (or heading to) the resting position.
    Presented,
    /// Following the pointer.
    Dragging,
    /// Off-screen (or heading there).
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Show,
    Dismiss,
    Reset,
}

/// A state assignment and the curve it animates under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub drag_offset: f64,
    pub dim_opacity: f64,
    pub curve: Curve,
}

/// What an event did to the sheet.
#[must_use = "a dismissal must be reported back to the presentation flag"]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub transition: Option<Transition>,
    /// The sheet dismissed itself; the host's flag must become `false`.
    pub dismissed: bool,
}

impl Outcome {
    pub fn none() -> Self {
        Self {
            transition: None,
            dismissed: false,
        }
    }

    fn transition(transition: Transition) -> Self {
        Self {
            dismissed: transition.kind == TransitionKind::Dismiss,
            transition: Some(transition),
        }
    }

    /// Run `on_dismiss` if the sheet dismissed itself.
    pub fn notify(self, on_dismiss: impl FnOnce()) {
        if self.dismissed {
            on_dismiss();
        }
    }
}

// ───────────────────────────────────────── state ─────────────

/// Per-instance sheet state.  Starts fully dismissed.
#[derive(Debug, Clone)]
pub struct SheetState {
    config: SheetConfig,
    drag_offset: f64,
    dim_opacity: f64,
    /// Measured height of the sheet in units; 0 until the first layout.
    sheet_height: f64,
    phase: Phase,
    /// Last presentation flag value seen; `None` before mount.
    observed_presented: Option<bool>,
    offset_anim: Animated,
    dim_anim: Animated,
}

impl SheetState {
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            drag_offset: 0.0,
            dim_opacity: 0.0,
            sheet_height: 0.0,
            phase: Phase::Dismissed,
            observed_presented: None,
            offset_anim: Animated::new(0.0),
            dim_anim: Animated::new(0.0),
        }
    }

    // ── events ──────────────────────────────────────────────────

    /// Initial render: show if presented, otherwise dismiss without
    /// animating.
    pub fn mount(&mut self, presented: bool) -> Outcome {
        self.observed_presented = Some(presented);
        if presented {
            self.show()
        } else {
            self.dismiss(false)
        }
    }

    /// Feed the host's current flag.  The first call mounts; later calls
    /// only act when the value changed since the last one observed.
    pub fn sync_presented(&mut self, presented: bool) -> Outcome {
        match self.observed_presented {
            None => self.mount(presented),
            Some(prev) if prev == presented => Outcome::none(),
            Some(_) => {
                self.observed_presented = Some(presented);
                tracing::info!(presented, "presentation flag changed");
                if presented {
                    self.show()
                } else {
                    self.dismiss(true)
                }
            }
        }
    }

    /// The pointer moved to `translation` units below the press point.
    pub fn drag_changed(&mut self, translation: f64) {
        self.phase = Phase::Dragging;
        self.drag_offset = translation;
        self.dim_opacity = self.dim_for_offset(translation);
        self.offset_anim.set(self.drag_offset, Curve::None);
        self.dim_anim.set(self.dim_opacity, Curve::None);
    }

    /// The pointer was released: dismiss on a fast enough downward flick,
    /// otherwise spring back.
    pub fn drag_ended(&mut self, sample: GestureSample) -> Outcome {
        let velocity = sample.velocity();
        tracing::debug!(
            translation = sample.translation,
            velocity,
            threshold = self.config.required_dismiss_velocity,
            "drag ended"
        );
        if velocity > self.config.required_dismiss_velocity {
            self.dismiss(true)
        } else {
            self.reset()
        }
    }

    /// The scrim was tapped.
    pub fn tap_scrim(&mut self) -> Outcome {
        self.dismiss(true)
    }

    // ── transitions ─────────────────────────────────────────────

    pub fn show(&mut self) -> Outcome {
        self.phase = Phase::Presented;
        self.apply(Transition {
            kind: TransitionKind::Show,
            drag_offset: 0.0,
            dim_opacity: self.config.dim_background_amount,
            curve: self.config.show_curve,
        })
    }

    pub fn dismiss(&mut self, animated: bool) -> Outcome {
        self.phase = Phase::Dismissed;
        self.observed_presented = Some(false);
        self.apply(Transition {
            kind: TransitionKind::Dismiss,
            drag_offset: self.sheet_height,
            dim_opacity: 0.0,
            curve: if animated {
                self.config.dismiss_curve
            } else {
                Curve::None
            },
        })
    }

    pub fn reset(&mut self) -> Outcome {
        self.phase = Phase::Presented;
        self.apply(Transition {
            kind: TransitionKind::Reset,
            drag_offset: 0.0,
            dim_opacity: self.config.dim_background_amount,
            curve: self.config.reset_curve,
        })
    }

    fn apply(&mut self, transition: Transition) -> Outcome {
        tracing::debug!(
            kind = ?transition.kind,
            offset = transition.drag_offset,
            dim = transition.dim_opacity,
            curve = transition.curve.label(),
            "sheet transition"
        );
        self.drag_offset = transition.drag_offset;
        self.dim_opacity = transition.dim_opacity;
        self.offset_anim.set(transition.drag_offset, transition.curve);
        self.dim_anim.set(transition.dim_opacity, transition.curve);
        Outcome::transition(transition)
    }

    // ── layout & frames ─────────────────────────────────────────

    /// Record the sheet height measured by the layout pass.  While the sheet
    /// rests dismissed its offset follows the new height so it stays
    /// off-screen.
    pub fn measure(&mut self, height: f64) {
        if (height - self.sheet_height).abs() < f64::EPSILON {
            return;
        }
        self.sheet_height = height;
        if self.phase == Phase::Dismissed {
            self.drag_offset = height;
            let curve = if self.offset_anim.is_animating() {
                self.offset_anim.curve()
            } else {
                Curve::None
            };
            self.offset_anim.set(height, curve);
        }
    }

    /// Advance running animations by one frame.
    pub fn tick(&mut self, dt: Duration) {
        self.offset_anim.tick(dt);
        self.dim_anim.tick(dt);
    }

    /// Scrim opacity for a drag at `offset` units.
    pub fn dim_for_offset(&self, offset: f64) -> f64 {
        let amount = self.config.dim_background_amount;
        if offset > 0.0 {
            let dim = amount * (1.0 - offset / self.config.fade_dim_background_tolerance);
            if self.config.clamp_dim_fade {
                dim.clamp(0.0, amount)
            } else {
                dim
            }
        } else {
            amount
        }
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Model offset (the value the sheet is at or heading to).
    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    /// Model scrim opacity.
    pub fn dim_opacity(&self) -> f64 {
        self.dim_opacity
    }

    /// Offset to draw this frame.
    pub fn presented_offset(&self) -> f64 {
        self.offset_anim.value()
    }

    /// Scrim opacity to draw this frame.
    pub fn presented_dim(&self) -> f64 {
        self.dim_anim.value()
    }

    pub fn sheet_height(&self) -> f64 {
        self.sheet_height
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.offset_anim.is_animating() || self.dim_anim.is_animating()
    }

    /// Whether any part of the sheet or its scrim may be on screen.  An
    /// unmeasured sheet counts as visible so the next frame can measure it.
    pub fn is_visible(&self) -> bool {
        self.sheet_height <= 0.0
            || self.presented_offset() < self.sheet_height
            || self.presented_dim() > 0.0
    }
}

impl Default for SheetState {
    fn default() -> Self {
        Self::new(SheetConfig::default())
    }
}
