//! Forward-mode automatic differentiation on scalar reals.
//!
//! A [`Dual`] is a pair `(val, der)` of 32-bit floats obeying the truncated
//! Taylor rules of dual numbers (ε² = 0): addition is component-wise,
//! `(u·v)' = u'·v + u·v'`, and the transcendentals carry their analytic
//! derivatives. Seeding `der = 1` on exactly one input of a computation
//! makes every downstream value carry the exact partial derivative with
//! respect to that input.
//!
//! Division at `val = 0` and `ln` at `val ≤ 0` are not guarded; they produce
//! IEEE NaN/Inf which callers are expected to detect on the derivative.
//!
//! # Example
//!
//! ```rust
//! use alsvid_dual::Dual;
//!
//! // d/dx (x² · y) at x = 5, y = 6 is 2·x·y = 60.
//! let x = Dual { val: 5.0, der: 1.0 };
//! let y = Dual::constant(6.0);
//! let f = x.powf(2.0) * y;
//! assert_eq!(f.der.round(), 60.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A dual number: value plus derivative seed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dual {
    /// The scalar value.
    pub val: f32,
    /// The derivative carried alongside the value.
    pub der: f32,
}

impl Dual {
    /// Additive identity.
    pub const ZERO: Dual = Dual { val: 0.0, der: 0.0 };
    /// Multiplicative identity.
    pub const ONE: Dual = Dual { val: 1.0, der: 0.0 };
    /// One half.
    pub const HALF: Dual = Dual { val: 0.5, der: 0.0 };

    /// A constant: value with a zero derivative.
    #[inline]
    pub const fn constant(val: f32) -> Self {
        Dual { val, der: 0.0 }
    }

    /// Sine.
    #[inline]
    pub fn sin(self) -> Self {
        Dual {
            val: self.val.sin(),
            der: self.der * self.val.cos(),
        }
    }

    /// Cosine.
    #[inline]
    pub fn cos(self) -> Self {
        Dual {
            val: self.val.cos(),
            der: -self.der * self.val.sin(),
        }
    }

    /// Natural exponential.
    #[inline]
    pub fn exp(self) -> Self {
        let e = self.val.exp();
        Dual {
            val: e,
            der: self.der * e,
        }
    }

    /// Natural logarithm. Not guarded at `val ≤ 0`.
    #[inline]
    pub fn ln(self) -> Self {
        Dual {
            val: self.val.ln(),
            der: self.der / self.val,
        }
    }

    /// Logistic sigmoid σ(x) = 1 / (1 + e⁻ˣ), with σ' = σ·(1−σ).
    #[inline]
    pub fn sigmoid(self) -> Self {
        let s = 1.0 / (1.0 + (-self.val).exp());
        Dual {
            val: s,
            der: self.der * s * (1.0 - s),
        }
    }

    /// Absolute value. The derivative at zero is zero by convention.
    #[inline]
    pub fn abs(self) -> Self {
        let val = self.val.abs();
        let sign = if self.val != 0.0 { self.val / val } else { 0.0 };
        Dual {
            val,
            der: self.der * sign,
        }
    }

    /// Raise to a constant real power.
    #[inline]
    pub fn powf(self, p: f32) -> Self {
        Dual {
            val: self.val.powf(p),
            der: p * self.der * self.val.powf(p - 1.0),
        }
    }
}

impl From<f32> for Dual {
    fn from(val: f32) -> Self {
        Dual::constant(val)
    }
}

impl fmt::Display for Dual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}ε", self.val, self.der)
    }
}

impl Add for Dual {
    type Output = Dual;

    #[inline]
    fn add(self, rhs: Dual) -> Dual {
        Dual {
            val: self.val + rhs.val,
            der: self.der + rhs.der,
        }
    }
}

impl Sub for Dual {
    type Output = Dual;

    #[inline]
    fn sub(self, rhs: Dual) -> Dual {
        Dual {
            val: self.val - rhs.val,
            der: self.der - rhs.der,
        }
    }
}

impl Mul for Dual {
    type Output = Dual;

    #[inline]
    fn mul(self, rhs: Dual) -> Dual {
        Dual {
            val: self.val * rhs.val,
            der: self.der * rhs.val + self.val * rhs.der,
        }
    }
}

impl Div for Dual {
    type Output = Dual;

    #[inline]
    fn div(self, rhs: Dual) -> Dual {
        Dual {
            val: self.val / rhs.val,
            der: (self.der * rhs.val - self.val * rhs.der) / (rhs.val * rhs.val),
        }
    }
}
