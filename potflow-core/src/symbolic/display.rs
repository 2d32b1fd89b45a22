use std::fmt;

use num_complex::Complex64;

use super::Expr;

const SUM: u8 = 1;
const PRODUCT: u8 = 2;
const UNARY: u8 = 3;
const ATOM: u8 = 4;

/// Renders the expression in terms of `x` and `y`, with `z` shown as `(x + iy)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(self, f, 0)
    }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Add(..) => SUM,
        Expr::Mul(..) | Expr::Div(..) => PRODUCT,
        Expr::Neg(_) => UNARY,
        Expr::Const(c) if c.im == 0.0 && c.re < 0.0 => UNARY,
        Expr::Const(c) if c.re == 0.0 && c.im < 0.0 => UNARY,
        Expr::Const(_) | Expr::Z | Expr::Ln(_) => ATOM,
    }
}

fn write_expr(expr: &Expr, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
    let parenthesize = precedence(expr) < min;
    if parenthesize {
        f.write_str("(")?;
    }

    match expr {
        Expr::Const(c) => write_complex(*c, f)?,
        Expr::Z => f.write_str("(x + iy)")?,
        Expr::Add(a, b) => {
            write_expr(a, f, SUM)?;
            match b.as_ref() {
                Expr::Neg(inner) => {
                    f.write_str(" - ")?;
                    write_expr(inner, f, PRODUCT)?;
                }
                Expr::Const(c) if c.im == 0.0 && c.re < 0.0 => write!(f, " - {}", -c.re)?,
                other => {
                    f.write_str(" + ")?;
                    write_expr(other, f, SUM)?;
                }
            }
        }
        Expr::Mul(a, b) => {
            write_expr(a, f, PRODUCT)?;
            f.write_str(" * ")?;
            write_expr(b, f, UNARY)?;
        }
        Expr::Div(a, b) => {
            write_expr(a, f, PRODUCT)?;
            f.write_str(" / ")?;
            write_expr(b, f, UNARY)?;
        }
        Expr::Neg(a) => {
            f.write_str("-")?;
            write_expr(a, f, ATOM)?;
        }
        Expr::Ln(a) => {
            f.write_str("ln(")?;
            write_expr(a, f, 0)?;
            f.write_str(")")?;
        }
    }

    if parenthesize {
        f.write_str(")")?;
    }
    Ok(())
}

fn write_complex(c: Complex64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (c.re, c.im) {
        (re, im) if im == 0.0 => write!(f, "{re}"),
        (re, _) if re == 0.0 && c.im == 1.0 => f.write_str("i"),
        (re, _) if re == 0.0 && c.im == -1.0 => f.write_str("-i"),
        (re, im) if re == 0.0 => write!(f, "{im}i"),
        (re, im) if im < 0.0 => write!(f, "({re} - {}i)", -im),
        (re, im) => write!(f, "({re} + {im}i)"),
    }
}
