//! Easing curves addressed by their GSAP names (`"power2.out"`, `"none"`, ...).
//!
//! The built-in [`Tweener`](crate::tween::Tweener) evaluates them directly;
//! the GSAP bridge only forwards [`Ease::name`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UiError;

/// Which end of the curve the acceleration sits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EaseDir {
    In,
    Out,
    InOut,
}

/// Easing function. `Power(n, dir)` follows GSAP: power n is a
/// polynomial of degree n + 1 (power2 is cubic). `CubicBezier` takes CSS
/// control points `[x1, y1, x2, y2]` with x1 and x2 in [0, 1].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    Power(u8, EaseDir),
    CubicBezier([f32; 4]),
}

impl Ease {
    pub const POWER2_IN: Ease = Ease::Power(2, EaseDir::In);
    pub const POWER2_OUT: Ease = Ease::Power(2, EaseDir::Out);

    /// Map linear progress `t` to eased progress. Input is clamped to [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power(n, dir) => {
                let exp = i32::from(n) + 1;
                match dir {
                    EaseDir::In => t.powi(exp),
                    EaseDir::Out => 1.0 - (1.0 - t).powi(exp),
                    EaseDir::InOut => {
                        if t < 0.5 {
                            (2.0 * t).powi(exp) * 0.5
                        } else {
                            1.0 - (2.0 * (1.0 - t)).powi(exp) * 0.5
                        }
                    }
                }
            }
            Ease::CubicBezier([x1, y1, x2, y2]) => bezier_ease(t, x1, y1, x2, y2),
        }
    }

    /// GSAP ease string for this curve.
    pub fn name(self) -> String {
        match self {
            Ease::Linear => "none".to_string(),
            Ease::Power(0, _) => "none".to_string(),
            Ease::Power(n, dir) => {
                let suffix = match dir {
                    EaseDir::In => "in",
                    EaseDir::Out => "out",
                    EaseDir::InOut => "inOut",
                };
                format!("power{n}.{suffix}")
            }
            Ease::CubicBezier([x1, y1, x2, y2]) => format!("cubic-bezier({x1},{y1},{x2},{y2})"),
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power(1, EaseDir::Out)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Ease {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UiError::InvalidConfig {
            reason: format!("unknown ease `{s}`"),
        };
        let s = s.trim();
        if s == "none" || s == "linear" {
            return Ok(Ease::Linear);
        }
        if let Some(args) = s
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let points = args
                .split(',')
                .map(|p| p.trim().parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| invalid())?;
            let [x1, y1, x2, y2] = <[f32; 4]>::try_from(points).map_err(|_| invalid())?;
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(invalid());
            }
            return Ok(Ease::CubicBezier([x1, y1, x2, y2]));
        }
        let rest = s.strip_prefix("power").ok_or_else(invalid)?;
        let (degree, dir) = match rest.split_once('.') {
            Some((degree, dir)) => (degree, dir),
            // GSAP treats a bare "power2" as ".out"
            None => (rest, "out"),
        };
        let n: u8 = degree.parse().map_err(|_| invalid())?;
        if n > 4 {
            return Err(invalid());
        }
        let dir = match dir {
            "in" => EaseDir::In,
            "out" => EaseDir::Out,
            "inOut" => EaseDir::InOut,
            _ => return Err(invalid()),
        };
        if n == 0 {
            return Ok(Ease::Linear);
        }
        Ok(Ease::Power(n, dir))
    }
}

impl TryFrom<String> for Ease {
    type Error = UiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.name()
    }
}

#[inline]
fn cubic_bezier(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

/// Invert the x curve by bisection, then sample y at the found parameter.
fn bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x1 == y1 && x2 == y2 {
        return t;
    }
    let (mut lo, mut hi, mut mid) = (0.0f32, 1.0f32, t);
    for _ in 0..24 {
        let x = cubic_bezier(x1, x2, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(y1, y2, mid)
}

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
