//! Gate expressions used to describe output functions
//!
//! ```
//! # use voxtable::expr::Expr;
//! # use voxtable::pin::Evaluate;
//! // Full adder sum and carry
//! let sum = Expr::xorn(vec![Expr::Input(0), Expr::Input(1), Expr::Input(2)]);
//! let carry = Expr::maj(Expr::Input(0), Expr::Input(1), Expr::Input(2));
//! assert!(sum.evaluate(&[true, true, true]));
//! assert!(!carry.evaluate(&[true, false, false]));
//! ```

use std::fmt;

use volute::Lut;

use crate::pin::Evaluate;

/// Basic types of N-input gates
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NaryType {
    /// N-input And gate
    And,
    /// N-input Or gate
    Or,
    /// N-input Nand gate
    Nand,
    /// N-input Nor gate
    Nor,
    /// N-input Xor gate
    Xor,
    /// N-input Xnor gate
    Xnor,
}

impl NaryType {
    /// Keyword used in circuit description files
    pub fn keyword(self) -> &'static str {
        match self {
            NaryType::And => "AND",
            NaryType::Or => "OR",
            NaryType::Nand => "NAND",
            NaryType::Nor => "NOR",
            NaryType::Xor => "XOR",
            NaryType::Xnor => "XNOR",
        }
    }

    /// Parse a keyword, ignoring case
    pub fn from_keyword(s: &str) -> Option<NaryType> {
        match s.to_uppercase().as_str() {
            "AND" => Some(NaryType::And),
            "OR" => Some(NaryType::Or),
            "NAND" => Some(NaryType::Nand),
            "NOR" => Some(NaryType::Nor),
            "XOR" => Some(NaryType::Xor),
            "XNOR" => Some(NaryType::Xnor),
            _ => None,
        }
    }
}

/// Boolean expression over the inputs of a circuit
///
/// Inputs are referred to by their index in the input list.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Expr {
    /// Constant value
    Const(bool),
    /// Value of an input
    Input(usize),
    /// Inverter
    Not(Box<Expr>),
    /// Arbitrary N-input gate (And/Or/Xor/Nand/Nor/Xnor)
    Nary(Box<[Expr]>, NaryType),
    /// Multiplexer s ? a : b
    Mux(Box<[Expr; 3]>),
    /// Majority gate (a + b + c >= 2)
    Maj(Box<[Expr; 3]>),
    /// Lookup table; argument j is bit j of the mask
    Lut(Box<[Expr]>, Lut),
}

impl Expr {
    /// Create an inverter
    pub fn not(a: Expr) -> Expr {
        Expr::Not(Box::new(a))
    }

    /// Create a n-input And
    pub fn andn(v: Vec<Expr>) -> Expr {
        Expr::Nary(v.into(), NaryType::And)
    }

    /// Create a n-input Or
    pub fn orn(v: Vec<Expr>) -> Expr {
        Expr::Nary(v.into(), NaryType::Or)
    }

    /// Create a n-input Xor
    pub fn xorn(v: Vec<Expr>) -> Expr {
        Expr::Nary(v.into(), NaryType::Xor)
    }

    /// Create a Mux
    pub fn mux(s: Expr, a: Expr, b: Expr) -> Expr {
        Expr::Mux(Box::new([s, a, b]))
    }

    /// Create a Maj
    pub fn maj(a: Expr, b: Expr, c: Expr) -> Expr {
        Expr::Maj(Box::new([a, b, c]))
    }

    /// Create a Lut; the number of arguments must match the variables of the Lut
    pub fn lut(v: Vec<Expr>, lut: Lut) -> Expr {
        assert_eq!(v.len(), lut.num_vars());
        Expr::Lut(v.into(), lut)
    }

    /// Direct arguments of the expression
    pub fn dependencies(&self) -> &[Expr] {
        match self {
            Expr::Const(_) | Expr::Input(_) => &[],
            Expr::Not(a) => std::slice::from_ref(&**a),
            Expr::Nary(v, _) => v,
            Expr::Mux(v) | Expr::Maj(v) => v.as_slice(),
            Expr::Lut(v, _) => v,
        }
    }

    /// Largest input index used by the expression, if any
    pub fn max_input(&self) -> Option<usize> {
        match self {
            Expr::Input(i) => Some(*i),
            _ => self.dependencies().iter().filter_map(Expr::max_input).max(),
        }
    }

    /// Write the expression using names for the inputs
    pub fn display_with<'a, N: fmt::Display>(&'a self, names: &'a [N]) -> ExprDisplay<'a, N> {
        ExprDisplay { expr: self, names }
    }
}

fn compute_andn(v: &[Expr], a: &[bool], inv_in: bool, inv_out: bool) -> bool {
    let ret = v.iter().all(|e| e.evaluate(a) ^ inv_in);
    ret ^ inv_out
}

fn compute_xorn(v: &[Expr], a: &[bool], inv_out: bool) -> bool {
    let ret = v.iter().fold(false, |acc, e| acc ^ e.evaluate(a));
    ret ^ inv_out
}

impl Evaluate for Expr {
    fn evaluate(&self, a: &[bool]) -> bool {
        match self {
            Expr::Const(b) => *b,
            Expr::Input(i) => a[*i],
            Expr::Not(e) => !e.evaluate(a),
            Expr::Nary(v, tp) => match tp {
                NaryType::And => compute_andn(v, a, false, false),
                NaryType::Or => compute_andn(v, a, true, true),
                NaryType::Nand => compute_andn(v, a, false, true),
                NaryType::Nor => compute_andn(v, a, true, false),
                NaryType::Xor => compute_xorn(v, a, false),
                NaryType::Xnor => compute_xorn(v, a, true),
            },
            Expr::Mux(v) => {
                if v[0].evaluate(a) {
                    v[1].evaluate(a)
                } else {
                    v[2].evaluate(a)
                }
            }
            Expr::Maj(v) => v.iter().filter(|e| e.evaluate(a)).count() >= 2,
            Expr::Lut(v, lut) => {
                let mask = v
                    .iter()
                    .enumerate()
                    .fold(0usize, |m, (j, e)| m | (usize::from(e.evaluate(a)) << j));
                lut.value(mask)
            }
        }
    }

    fn as_expr(&self) -> Option<&Expr> {
        Some(self)
    }

    fn accepts_inputs(&self, nb_inputs: usize) -> bool {
        self.max_input().map_or(true, |m| m < nb_inputs)
    }
}

/// Helper to write an expression with named inputs
pub struct ExprDisplay<'a, N> {
    expr: &'a Expr,
    names: &'a [N],
}

impl<N: fmt::Display> fmt::Display for ExprDisplay<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = |f: &mut fmt::Formatter<'_>, v: &[Expr]| -> fmt::Result {
            write!(f, "(")?;
            for (i, e) in v.iter().enumerate() {
                if i != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", e.display_with(self.names))?;
            }
            write!(f, ")")
        };
        match self.expr {
            Expr::Const(false) => write!(f, "gnd"),
            Expr::Const(true) => write!(f, "vdd"),
            Expr::Input(i) => match self.names.get(*i) {
                Some(n) => write!(f, "{n}"),
                None => write!(f, "i{i}"),
            },
            Expr::Not(e) => {
                write!(f, "NOT")?;
                args(f, std::slice::from_ref(&**e))
            }
            Expr::Nary(v, tp) => {
                write!(f, "{}", tp.keyword())?;
                args(f, v)
            }
            Expr::Mux(v) => {
                write!(f, "MUX")?;
                args(f, v.as_slice())
            }
            Expr::Maj(v) => {
                write!(f, "MAJ")?;
                args(f, v.as_slice())
            }
            Expr::Lut(v, lut) => {
                write!(f, "LUT 0x{}", lut.to_hex_string())?;
                args(f, v)
            }
        }
    }
}
