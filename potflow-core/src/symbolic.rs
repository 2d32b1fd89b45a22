//! Closed-form complex potentials.
//!
//! An [`Expr`] is an analytic expression in the complex variable
//! `z = x + i·y`. Because it depends on `z` alone, the complex velocity is its
//! exact derivative `dF/dz = vx − i·vy`, with no finite differencing.
//!
//! [`Symbolic`] differentiates and simplifies an expression once, then
//! evaluates both the potential and the velocity from the closed forms.
//!
//! # Example
//!
//! ```
//! use potflow_core::{Complex64, Flow, symbolic::{Expr, Symbolic}};
//!
//! // A unit source at the origin: F(z) = ln(z).
//! let source = Symbolic::new(Expr::z().ln());
//! assert_eq!(source.derivative().to_string(), "1 / (x + iy)");
//!
//! let v = source.velocity_at(Complex64::new(2.0, 0.0));
//! assert_eq!((v.vx, v.vy), (0.5, 0.0));
//! ```

mod display;
mod simplify;

use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex64;

use crate::{Flow, Velocity};

/// An analytic expression in `z`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(Complex64),
    Z,
    Add(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Ln(Box<Expr>),
}

impl Expr {
    /// The variable `z = x + i·y`.
    #[must_use]
    pub fn z() -> Self {
        Self::Z
    }

    /// A complex constant.
    #[must_use]
    pub fn constant(value: Complex64) -> Self {
        Self::Const(value)
    }

    /// A real constant.
    #[must_use]
    pub fn real(value: f64) -> Self {
        Self::Const(Complex64::new(value, 0.0))
    }

    /// The principal natural logarithm of this expression.
    #[must_use]
    pub fn ln(self) -> Self {
        Self::Ln(Box::new(self))
    }

    /// Returns `true` if the expression does not depend on `z`.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Const(_) => true,
            Self::Z => false,
            Self::Add(a, b) | Self::Mul(a, b) | Self::Div(a, b) => {
                a.is_constant() && b.is_constant()
            }
            Self::Neg(a) | Self::Ln(a) => a.is_constant(),
        }
    }

    /// Returns the exact derivative `d/dz`, simplified.
    #[must_use]
    pub fn derivative(&self) -> Self {
        self.differentiate().simplify()
    }

    fn differentiate(&self) -> Self {
        match self {
            Self::Const(_) => Self::real(0.0),
            Self::Z => Self::real(1.0),
            Self::Add(a, b) => a.differentiate() + b.differentiate(),
            Self::Mul(a, b) => {
                a.differentiate() * (**b).clone() + (**a).clone() * b.differentiate()
            }
            Self::Div(a, b) => {
                let numerator =
                    a.differentiate() * (**b).clone() - (**a).clone() * b.differentiate();
                numerator / ((**b).clone() * (**b).clone())
            }
            Self::Neg(a) => -a.differentiate(),
            Self::Ln(a) => a.differentiate() / (**a).clone(),
        }
    }

    /// Replaces every occurrence of `z` with `argument`.
    ///
    /// Used to evaluate a flow at scaled coordinates, `F(s·z)`.
    #[must_use]
    pub fn substitute(&self, argument: &Expr) -> Self {
        match self {
            Self::Const(c) => Self::Const(*c),
            Self::Z => argument.clone(),
            Self::Add(a, b) => a.substitute(argument) + b.substitute(argument),
            Self::Mul(a, b) => a.substitute(argument) * b.substitute(argument),
            Self::Div(a, b) => a.substitute(argument) / b.substitute(argument),
            Self::Neg(a) => -a.substitute(argument),
            Self::Ln(a) => a.substitute(argument).ln(),
        }
    }

    /// Evaluates the expression at `z`.
    ///
    /// No singularity handling is applied: `ln(0)` and division by zero give
    /// the non-finite values of IEEE complex arithmetic.
    #[must_use]
    pub fn eval(&self, z: Complex64) -> Complex64 {
        match self {
            Self::Const(c) => *c,
            Self::Z => z,
            Self::Add(a, b) => a.eval(z) + b.eval(z),
            Self::Mul(a, b) => a.eval(z) * b.eval(z),
            Self::Div(a, b) => a.eval(z) / b.eval(z),
            Self::Neg(a) => -a.eval(z),
            Self::Ln(a) => a.eval(z).ln(),
        }
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(Box::new(self), Box::new(rhs))
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::Add(Box::new(self), Box::new(-rhs))
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::Div(Box::new(self), Box::new(rhs))
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}

/// A complex potential paired with its exact derivative.
///
/// `Symbolic` is itself a [`Flow`], so a closed form can be evaluated,
/// composed, and compared against a numeric primitive directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbolic {
    potential: Expr,
    derivative: Expr,
}

impl Symbolic {
    /// Simplifies `potential` and differentiates it.
    #[must_use]
    pub fn new(potential: Expr) -> Self {
        let potential = potential.simplify();
        let derivative = potential.derivative();
        Self {
            potential,
            derivative,
        }
    }

    /// Returns the simplified potential `F(z)`.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.potential
    }

    /// Returns the complex velocity `dF/dz`.
    #[must_use]
    pub fn derivative(&self) -> &Expr {
        &self.derivative
    }
}

impl Flow for Symbolic {
    fn complex_potential_at(&self, z: Complex64) -> Complex64 {
        self.potential.eval(z)
    }

    fn velocity_at(&self, z: Complex64) -> Velocity {
        Velocity::from_complex_velocity(self.derivative.eval(z))
    }

    fn symbolic(&self) -> Option<Expr> {
        Some(self.potential.clone())
    }
}
