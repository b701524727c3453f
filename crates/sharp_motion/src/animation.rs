//! Springs, easing curves and timed tweens.
//!
//! Every continuously animated scalar in the layer (cursor x/y/size,
//! magnetic offsets, hover scale) is a [`Spring`]. One-shot entrances use a
//! [`Tween`] with an [`Easing`] curve.

/// Largest integration step. Frame deltas are split into equal sub-steps no
/// larger than this so stiff, light springs stay stable at low frame rates.
pub const MAX_SPRING_STEP: f32 = 1.0 / 240.0;

/// Longest span a single [`Spring::tick`] integrates. Anything beyond is
/// dropped, which bounds one tick to 240 sub-steps.
pub const MAX_SPRING_DT: f32 = 1.0;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Cubic bezier with control points `(x1, y1)` and `(x2, y2)`, as in
    /// CSS `cubic-bezier()`.
    CubicBezier(f32, f32, f32, f32),
    /// General-purpose ease used for tweens without an explicit curve.
    #[default]
    Ease,
}

impl Easing {
    /// CSS `ease-out`.
    pub const EASE_OUT: Self = Self::CubicBezier(0.0, 0.0, 0.58, 1.0);
    /// CSS `ease-in-out`.
    pub const EASE_IN_OUT: Self = Self::CubicBezier(0.42, 0.0, 0.58, 1.0);

    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
        }
    }
}

fn bezier_axis(a1: f32, a2: f32, s: f32) -> f32 {
    // B(s) with endpoints fixed at 0 and 1.
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

fn bezier_axis_slope(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton first, bisection if the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, s) - x;
        if err.abs() < 1e-6 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier_axis(x1, x2, s);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    bezier_axis(y1, y2, s)
}

/// Physical parameters of a damped spring.
///
/// In config files `stiffness`, `damping` and `mass` are required together;
/// the rest thresholds may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SpringConfig {
    /// Spring constant `k`. Higher pulls harder.
    pub stiffness: f32,
    /// Damping coefficient `c`.
    pub damping: f32,
    /// Mass `m`. Lower reacts faster.
    pub mass: f32,
    /// Distance from target below which the spring may rest.
    #[serde(default = "default_rest_threshold")]
    pub rest_delta: f32,
    /// Speed below which the spring may rest.
    #[serde(default = "default_rest_threshold")]
    pub rest_speed: f32,
}

fn default_rest_threshold() -> f32 {
    0.01
}

impl SpringConfig {
    /// Soft glide used by the custom cursor.
    pub const CURSOR: Self = Self::new(500.0, 28.0, 1.0);
    /// Fast, light snap used by magnetic buttons.
    pub const MAGNETIC: Self = Self::new(150.0, 15.0, 0.1);

    /// Creates a config with default rest thresholds.
    #[must_use]
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }

    /// Damping ratio `ζ = c / (2·√(k·m))`. 1.0 is critical damping; below
    /// it the spring overshoots.
    #[must_use]
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Returns true if every parameter is finite and positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.stiffness, self.mass, self.rest_delta, self.rest_speed]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
            && self.damping.is_finite()
            && self.damping >= 0.0
    }
}

/// A scalar driven toward a target by a damped spring.
///
/// Retargeting keeps position and velocity, so direction changes are smooth.
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    current: f32,
    target: f32,
    velocity: f32,
    settled: bool,
}

impl Spring {
    /// Creates a spring resting at `value`.
    #[must_use]
    pub fn new(value: f32, config: SpringConfig) -> Self {
        Self {
            config,
            current: value,
            target: value,
            velocity: 0.0,
            settled: true,
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Returns the target value.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns the current velocity (units per second).
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Returns the spring parameters.
    #[must_use]
    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Returns true once the spring has come to rest on its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Sets a new target. Position and velocity carry over.
    pub fn set_target(&mut self, target: f32) {
        if target != self.target {
            self.target = target;
            self.settled = false;
        }
    }

    /// Places the spring at `value` with no motion.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.velocity = 0.0;
        self.settled = true;
    }

    /// Advances the spring by `dt` seconds and returns the new value.
    ///
    /// Settled springs return immediately.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if self.settled || !(dt > 0.0) {
            return self.current;
        }

        let dt = dt.min(MAX_SPRING_DT);
        let steps = (dt / MAX_SPRING_STEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;

        for _ in 0..steps {
            // F = -kx - cv, semi-implicit Euler
            let displacement = self.current - self.target;
            let acceleration = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += acceleration * h;
            self.current += self.velocity * h;
        }

        if (self.current - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
        {
            self.current = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }

        self.current
    }
}

/// Two independent springs for a 2D value.
#[derive(Debug, Clone)]
pub struct Spring2D {
    /// X component.
    pub x: Spring,
    /// Y component.
    pub y: Spring,
}

impl Spring2D {
    /// Creates a 2D spring resting at `(x, y)`.
    #[must_use]
    pub fn new(x: f32, y: f32, config: SpringConfig) -> Self {
        Self {
            x: Spring::new(x, config),
            y: Spring::new(y, config),
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> (f32, f32) {
        (self.x.value(), self.y.value())
    }

    /// Returns the target value.
    #[must_use]
    pub fn target(&self) -> (f32, f32) {
        (self.x.target(), self.y.target())
    }

    /// Sets a new target.
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.x.set_target(x);
        self.y.set_target(y);
    }

    /// Advances both components.
    pub fn tick(&mut self, dt: f32) -> (f32, f32) {
        (self.x.tick(dt), self.y.tick(dt))
    }

    /// Returns true if both components are at rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }
}

/// A fixed-duration eased progression from 0 to 1, with an optional start
/// delay.
#[derive(Debug, Clone)]
pub struct Tween {
    /// Seconds before progress starts moving.
    delay: f32,
    /// Seconds from start to end.
    duration: f32,
    /// Easing curve.
    easing: Easing,
    /// Seconds since the tween was started.
    elapsed: f32,
}

impl Tween {
    /// Creates a tween with no delay.
    #[must_use]
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            delay: 0.0,
            duration: duration.max(0.0),
            easing,
            elapsed: 0.0,
        }
    }

    /// Sets the start delay.
    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Returns the start delay.
    #[must_use]
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Advances the tween clock.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 && !self.is_complete() {
            self.elapsed += dt;
        }
    }

    /// Linear progress in `[0, 1]`, before easing.
    #[must_use]
    pub fn raw_progress(&self) -> f32 {
        let running = self.elapsed - self.delay;
        if running <= 0.0 {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            (running / self.duration).min(1.0)
        }
    }

    /// Eased progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let t = self.raw_progress();
        if t >= 1.0 {
            1.0
        } else if t <= 0.0 {
            0.0
        } else {
            self.easing.apply(t)
        }
    }

    /// Returns true once the delay and duration have both elapsed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_bezier_endpoints_and_shape() {
        for easing in [Easing::EASE_OUT, Easing::EASE_IN_OUT, Easing::Ease] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
        // ease-out is ahead of linear in the first half
        assert!(Easing::EASE_OUT.apply(0.25) > 0.25);
        // ease-in-out is symmetric around the midpoint
        assert!((Easing::EASE_IN_OUT.apply(0.5) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let linear = Easing::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((linear.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_spring_reaches_target() {
        let mut spring = Spring::new(0.0, SpringConfig::CURSOR);
        spring.set_target(100.0);

        for _ in 0..180 {
            spring.tick(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
    }

    #[test]
    fn test_settled_spring_is_noop() {
        let mut spring = Spring::new(5.0, SpringConfig::MAGNETIC);
        assert!(spring.is_settled());
        assert_eq!(spring.tick(1.0), 5.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_huge_dt_is_bounded() {
        let mut stalled = Spring::new(0.0, SpringConfig::CURSOR);
        let mut reference = Spring::new(0.0, SpringConfig::CURSOR);
        stalled.set_target(100.0);
        reference.set_target(100.0);

        // a caller that skips the frame clock still gets at most one second
        assert_eq!(stalled.tick(f32::MAX), reference.tick(MAX_SPRING_DT));
        assert_eq!(stalled.tick(f32::INFINITY), reference.tick(MAX_SPRING_DT));
        assert!(stalled.value().is_finite());
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(0.0, SpringConfig::CURSOR);
        spring.set_target(100.0);
        spring.tick(1.0 / 60.0);
        let v = spring.velocity();
        assert!(v > 0.0);

        spring.set_target(-100.0);
        assert_eq!(spring.velocity(), v);
        assert!(!spring.is_settled());
    }

    #[test]
    fn test_overdamped_spring_is_monotonic() {
        assert!(SpringConfig::MAGNETIC.damping_ratio() > 1.0);

        let mut spring = Spring::new(8.0, SpringConfig::MAGNETIC);
        spring.set_target(0.0);
        let mut last = spring.value();
        for _ in 0..120 {
            let now = spring.tick(1.0 / 60.0);
            assert!(now <= last, "{now} > {last}");
            assert!(now >= 0.0);
            last = now;
        }
        assert!(spring.is_settled());
    }

    #[test]
    fn test_spring_config_validation() {
        assert!(SpringConfig::CURSOR.is_valid());
        assert!(!SpringConfig::new(0.0, 1.0, 1.0).is_valid());
        assert!(!SpringConfig::new(1.0, 1.0, f32::NAN).is_valid());
        assert!(!SpringConfig::new(1.0, -1.0, 1.0).is_valid());
    }

    #[test]
    fn test_tween_delay_and_completion() {
        let mut tween = Tween::new(0.5, Easing::Linear).with_delay(0.2);
        tween.advance(0.1);
        assert_eq!(tween.progress(), 0.0);

        tween.advance(0.35);
        assert!((tween.progress() - 0.5).abs() < 1e-5);

        tween.advance(1.0);
        assert!(tween.is_complete());
        assert_eq!(tween.progress(), 1.0);
    }
}
