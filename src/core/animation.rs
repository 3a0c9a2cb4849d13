//! Animatable scalars and the interpolation curves that drive them.
//!
//! A transition never moves a value on screen directly.  It assigns a new
//! *target* together with a [`Curve`], and each frame [`Animated::tick`]
//! walks the presented value toward that target.  Assigning again while a
//! value is still moving retargets from wherever it currently is, so an
//! in-flight animation never has to be cancelled.

use std::f64::consts::PI;
use std::time::Duration;

/// Default duration of the ease-in / ease-out curves.
pub const DEFAULT_EASE_DURATION: Duration = Duration::from_millis(350);

/// Largest integration step for the spring (seconds).  Long frames are
/// split so the simulation stays stable at low tick rates.
const MAX_SPRING_STEP: f64 = 1.0 / 240.0;

/// Frames longer than this are treated as this long (e.g. after a stall).
const MAX_FRAME: Duration = Duration::from_secs(1);

/// A spring counts as settled once it is this close to rest.
const SETTLE_DISTANCE: f64 = 1e-3;
const SETTLE_VELOCITY: f64 = 1e-2;

// ───────────────────────────────────────── curves ────────────

/// Interpolation strategy attached to a single transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Jump straight to the target.
    None,
    /// Start slow, finish fast.
    EaseIn { duration: Duration },
    /// Start fast, decelerate into the target.
    EaseOut { duration: Duration },
    /// Critically-ish damped spring.  `response` is the period of the
    /// undamped oscillation in seconds; `damping_fraction` of 1.0 is
    /// critical damping.
    Spring { response: f64, damping_fraction: f64 },
}

impl Curve {
    pub fn ease_in() -> Self {
        Curve::EaseIn {
            duration: DEFAULT_EASE_DURATION,
        }
    }

    pub fn ease_out() -> Self {
        Curve::EaseOut {
            duration: DEFAULT_EASE_DURATION,
        }
    }

    pub fn spring() -> Self {
        Curve::Spring {
            response: 0.55,
            damping_fraction: 0.825,
        }
    }

    /// Map linear progress `t ∈ [0, 1]` to eased progress.  Only meaningful
    /// for the timed curves; springs are simulated instead.
    fn ease(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::EaseIn { .. } => t * t * t,
            Curve::EaseOut { .. } => 1.0 - (1.0 - t).powi(3),
            Curve::None | Curve::Spring { .. } => 1.0,
        }
    }

    /// Short name for logs.
    pub fn label(self) -> &'static str {
        match self {
            Curve::None => "none",
            Curve::EaseIn { .. } => "ease-in",
            Curve::EaseOut { .. } => "ease-out",
            Curve::Spring { .. } => "spring",
        }
    }
}

// ───────────────────────────────────────── animated value ────

/// One animatable scalar: a model value (`target`) and the value currently
/// on screen (`current`).
#[derive(Debug, Clone)]
pub struct Animated {
    current: f64,
    target: f64,
    /// Where the current timed curve started from.
    from: f64,
    curve: Curve,
    elapsed: Duration,
    /// Spring velocity in units per second.
    velocity: f64,
}

impl Animated {
    pub fn new(value: f64) -> Self {
        Self {
            current: value,
            target: value,
            from: value,
            curve: Curve::None,
            elapsed: Duration::ZERO,
            velocity: 0.0,
        }
    }

    /// Retarget to `target` under `curve`, starting from the current
    /// presented value.
    pub fn set(&mut self, target: f64, curve: Curve) {
        self.from = self.current;
        self.target = target;
        self.curve = curve;
        self.elapsed = Duration::ZERO;
        match curve {
            Curve::None => {
                self.current = target;
                self.velocity = 0.0;
            }
            // A spring picks up the motion it interrupts.
            Curve::Spring { .. } => {}
            Curve::EaseIn { .. } | Curve::EaseOut { .. } => self.velocity = 0.0,
        }
    }

    /// Advance by one frame of length `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if !self.is_animating() {
            return;
        }
        let dt = dt.min(MAX_FRAME);

        match self.curve {
            Curve::None => self.snap(),
            Curve::EaseIn { duration } | Curve::EaseOut { duration } => {
                self.elapsed += dt;
                if duration.is_zero() || self.elapsed >= duration {
                    self.snap();
                    return;
                }
                let t = self.elapsed.as_secs_f64() / duration.as_secs_f64();
                self.current = self.from + (self.target - self.from) * self.curve.ease(t);
            }
            Curve::Spring {
                response,
                damping_fraction,
            } => {
                let response = response.max(0.01);
                let stiffness = (2.0 * PI / response).powi(2);
                let damping = 4.0 * PI * damping_fraction / response;

                let mut remaining = dt.as_secs_f64();
                while remaining > 0.0 {
                    let h = remaining.min(MAX_SPRING_STEP);
                    let accel = -stiffness * (self.current - self.target) - damping * self.velocity;
                    self.velocity += accel * h;
                    self.current += self.velocity * h;
                    remaining -= h;
                }

                if (self.current - self.target).abs() < SETTLE_DISTANCE
                    && self.velocity.abs() < SETTLE_VELOCITY
                {
                    self.snap();
                }
            }
        }
    }

    fn snap(&mut self) {
        self.current = self.target;
        self.velocity = 0.0;
    }

    /// Value to draw this frame.
    pub fn value(&self) -> f64 {
        self.current
    }

    /// Value the animation is heading to.
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// True while the presented value has not reached the target.
    pub fn is_animating(&self) -> bool {
        self.current != self.target || self.velocity != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run(value: &mut Animated, total: Duration) {
        let mut t = Duration::ZERO;
        while t < total {
            value.tick(FRAME);
            t += FRAME;
        }
    }

    #[test]
    fn no_curve_applies_immediately() {
        let mut v = Animated::new(10.0);
        v.set(0.0, Curve::None);
        assert_eq!(v.value(), 0.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn ease_out_reaches_target_after_duration() {
        let mut v = Animated::new(100.0);
        v.set(0.0, Curve::ease_out());
        assert!(v.is_animating());
        run(&mut v, DEFAULT_EASE_DURATION + FRAME);
        assert_eq!(v.value(), 0.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn ease_out_leads_and_ease_in_lags_linear_progress() {
        let half = DEFAULT_EASE_DURATION / 2;

        let mut out = Animated::new(0.0);
        out.set(100.0, Curve::ease_out());
        out.tick(half);
        assert!(out.value() > 50.0, "ease-out at half time: {}", out.value());

        let mut inn = Animated::new(0.0);
        inn.set(100.0, Curve::ease_in());
        inn.tick(half);
        assert!(inn.value() < 50.0, "ease-in at half time: {}", inn.value());
    }

    #[test]
    fn retarget_starts_from_presented_value() {
        let mut v = Animated::new(0.0);
        v.set(100.0, Curve::ease_in());
        v.tick(DEFAULT_EASE_DURATION / 2);
        let midway = v.value();

        v.set(0.0, Curve::ease_out());
        assert_eq!(v.value(), midway);
        v.tick(Duration::from_millis(1));
        assert!(v.value() < midway);
        run(&mut v, DEFAULT_EASE_DURATION);
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn spring_settles_on_target() {
        let mut v = Animated::new(200.0);
        v.set(0.0, Curve::spring());
        run(&mut v, Duration::from_secs(3));
        assert_eq!(v.value(), 0.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn spring_survives_long_frames() {
        let mut v = Animated::new(200.0);
        v.set(0.0, Curve::spring());
        for _ in 0..10 {
            v.tick(Duration::from_millis(500));
        }
        assert!(v.value().is_finite());
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn spring_keeps_velocity_when_retargeted() {
        let mut v = Animated::new(0.0);
        v.set(100.0, Curve::spring());
        v.tick(Duration::from_millis(50));
        let before = v.value();

        v.set(100.0, Curve::spring());
        v.tick(Duration::from_millis(16));
        assert!(v.value() > before, "spring lost its momentum");
    }
}
