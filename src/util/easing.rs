//! Easing curves for overlay transitions.
//!
//! The named curves match the CSS `transition-timing-function` keywords so
//! the headless overlay samples the same shape a browser would paint.

use serde::{Deserialize, Serialize};

/// Easing function variants for transition curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// CSS `ease`: cubic-bezier(0.25, 0.1, 0.25, 1.0).
    #[default]
    Ease,
    /// CSS `ease-out`: cubic-bezier(0.0, 0.0, 0.58, 1.0).
    EaseOut,
    /// CSS `ease-in-out`: cubic-bezier(0.42, 0.0, 0.58, 1.0).
    EaseInOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time `t`.
    ///
    /// Input is clamped to [0.0, 1.0]. Endpoints map exactly to 0.0 and 1.0.
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }

    /// Keyword used in a CSS `transition` shorthand.
    #[must_use]
    pub fn css_keyword(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

/// One coordinate of a cubic bezier with fixed endpoints 0 and 1.
#[inline]
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let oms = 1.0 - s;
    3.0 * oms * oms * s * p1 + 3.0 * oms * s * s * p2 + s * s * s
}

#[inline]
fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let oms = 1.0 - s;
    3.0 * oms * oms * p1 + 6.0 * oms * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Solve `x(s) = x` for the curve parameter, then return `y(s)`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    // Newton first; fall back to bisection where the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < 1e-6 {
            return bezier(s, y1, y2);
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bezier(s, y1, y2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 4] = [
        EasingFunction::Linear,
        EasingFunction::Ease,
        EasingFunction::EaseOut,
        EasingFunction::EaseInOut,
    ];

    #[test]
    fn endpoints_are_exact() {
        for f in ALL {
            assert_eq!(f.evaluate(0.0), 0.0, "{f:?}");
            assert_eq!(f.evaluate(1.0), 1.0, "{f:?}");
        }
    }

    #[test]
    fn input_is_clamped() {
        for f in ALL {
            assert_eq!(f.evaluate(-0.5), 0.0);
            assert_eq!(f.evaluate(1.5), 1.0);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for f in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = f.evaluate(i as f32 / 100.0);
                assert!(v + 1e-5 >= prev, "{f:?} dipped at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_at_midpoint() {
        let mid = EasingFunction::EaseInOut.evaluate(0.5);
        assert!((mid - 0.5).abs() < 1e-3);
    }

    #[test]
    fn ease_runs_ahead_of_linear() {
        // CSS `ease` accelerates early; at 25% time it is well past 25%.
        assert!(EasingFunction::Ease.evaluate(0.25) > 0.35);
    }

    #[test]
    fn css_keywords() {
        assert_eq!(EasingFunction::default().css_keyword(), "ease");
        assert_eq!(EasingFunction::EaseInOut.css_keyword(), "ease-in-out");
    }
}
