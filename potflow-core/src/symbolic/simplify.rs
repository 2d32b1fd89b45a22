use super::Expr;

impl Expr {
    /// Folds constants and removes additive and multiplicative identities.
    ///
    /// Constants are moved to the left of products, and nested constant
    /// factors are merged, so `2·(3·z)` becomes `6·z`. The result evaluates to
    /// the same value as the input wherever the input is finite.
    #[must_use]
    pub fn simplify(self) -> Self {
        match self {
            Self::Add(a, b) => add(a.simplify(), b.simplify()),
            Self::Mul(a, b) => mul(a.simplify(), b.simplify()),
            Self::Div(a, b) => div(a.simplify(), b.simplify()),
            Self::Neg(a) => neg(a.simplify()),
            Self::Ln(a) => ln(a.simplify()),
            leaf @ (Self::Const(_) | Self::Z) => leaf,
        }
    }
}

fn is_zero(expr: &Expr) -> bool {
    matches!(expr, Expr::Const(c) if c.re == 0.0 && c.im == 0.0)
}

fn is_one(expr: &Expr) -> bool {
    matches!(expr, Expr::Const(c) if c.re == 1.0 && c.im == 0.0)
}

fn add(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Const(x), Expr::Const(y)) => Expr::Const(x + y),
        (a, b) if is_zero(&a) => b,
        (a, b) if is_zero(&b) => a,
        (a, b) => a + b,
    }
}

fn mul(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Const(x), Expr::Const(y)) => Expr::Const(x * y),
        (a, b) if is_zero(&a) || is_zero(&b) => Expr::real(0.0),
        (a, b) if is_one(&a) => b,
        (a, b) if is_one(&b) => a,
        (a, Expr::Const(c)) => mul(Expr::Const(c), a),
        (Expr::Const(x), Expr::Mul(p, q)) => match *p {
            Expr::Const(y) => mul(Expr::Const(x * y), *q),
            p => Expr::Const(x) * (p * *q),
        },
        (Expr::Const(x), Expr::Neg(e)) => mul(Expr::Const(-x), *e),
        (a, b) => a * b,
    }
}

fn div(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (a, b) if is_one(&b) => a,
        (a, b) if is_zero(&b) => a / b,
        (Expr::Const(x), Expr::Const(y)) => Expr::Const(x / y),
        (a, _) if is_zero(&a) => Expr::real(0.0),
        (a, b) => a / b,
    }
}

fn neg(a: Expr) -> Expr {
    match a {
        Expr::Const(c) => Expr::Const(-c),
        Expr::Neg(e) => *e,
        e => -e,
    }
}

fn ln(a: Expr) -> Expr {
    match a {
        Expr::Const(c) if c.re != 0.0 || c.im != 0.0 => Expr::Const(c.ln()),
        e => e.ln(),
    }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;

    use super::*;

    #[test]
    fn folds_constants() {
        let e = (Expr::real(2.0) + Expr::real(3.0)) * Expr::real(4.0);
        assert_eq!(e.simplify(), Expr::real(20.0));
    }

    #[test]
    fn removes_identities() {
        let e = Expr::real(1.0) * Expr::z() + Expr::real(0.0);
        assert_eq!(e.simplify(), Expr::Z);

        let e = Expr::z() / Expr::real(1.0);
        assert_eq!(e.simplify(), Expr::Z);

        let e = Expr::real(0.0) * Expr::z().ln();
        assert_eq!(e.simplify(), Expr::real(0.0));
    }

    #[test]
    fn merges_constant_factors() {
        let e = Expr::real(2.0) * (Expr::z() * Expr::real(3.0));
        assert_eq!(e.simplify(), Expr::real(6.0) * Expr::z());

        let e = Expr::real(2.0) * -Expr::z();
        assert_eq!(e.simplify(), Expr::real(-2.0) * Expr::z());
    }

    #[test]
    fn keeps_division_by_zero() {
        let e = Expr::real(1.0) / Expr::real(0.0);
        assert_eq!(e.clone().simplify(), e);
    }

    #[test]
    fn double_negation() {
        let e = -(-Expr::z());
        assert_eq!(e.simplify(), Expr::Z);

        let e = -Expr::constant(Complex64::new(1.0, -2.0));
        assert_eq!(e.simplify(), Expr::constant(Complex64::new(-1.0, 2.0)));
    }
}
