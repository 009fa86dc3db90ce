//! IO for .pins circuit description files

use std::io::{BufRead, BufReader, Read, Write};

use fxhash::FxHashMap;
use volute::Lut;

use crate::expr::{Expr, NaryType};
use crate::pin::{Evaluate, InputPin, InputType, OutputPin, OutputType};
use crate::position::Position;
use crate::table::assignment;
use crate::{CircuitDefinition, Error, Result};

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

/// Split a line in identifiers and punctuation
fn tokenize(line: usize, s: &str) -> Result<Vec<String>> {
    let mut ret = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if "(),=".contains(c) {
            ret.push(c.to_string());
            chars.next();
        } else if c.is_ascii_alphanumeric() || c == '_' {
            let mut tok = String::new();
            while let Some(&c) = chars.peek() {
                if !(c.is_ascii_alphanumeric() || c == '_') {
                    break;
                }
                tok.push(c);
                chars.next();
            }
            ret.push(tok);
        } else {
            return Err(parse_error(line, format!("Unexpected character '{c}'")));
        }
    }
    Ok(ret)
}

/// A declaration before name resolution
struct Statement {
    line: usize,
    is_input: bool,
    position: String,
    ty: Option<String>,
    expr: Vec<String>,
}

fn parse_statement(line: usize, tokens: Vec<String>) -> Result<Statement> {
    let keyword = tokens[0].to_uppercase();
    let is_input = match keyword.as_str() {
        "INPUT" => true,
        "OUTPUT" => false,
        _ => return Err(parse_error(line, format!("Unknown keyword {}", tokens[0]))),
    };
    let close = tokens
        .iter()
        .position(|t| t == ")")
        .ok_or_else(|| parse_error(line, "Missing ')'"))?;
    let (position, ty) = match &tokens[1..=close] {
        [o, p, c] if o == "(" && c == ")" => (p.clone(), None),
        [o, p, s, t, c] if o == "(" && s == "," && c == ")" => (p.clone(), Some(t.clone())),
        _ => return Err(parse_error(line, format!("Malformed {keyword} declaration"))),
    };
    let rest = &tokens[close + 1..];
    let expr = if is_input {
        if !rest.is_empty() {
            return Err(parse_error(line, "Unexpected tokens after INPUT"));
        }
        Vec::new()
    } else {
        match rest.split_first() {
            Some((eq, e)) if eq == "=" && !e.is_empty() => e.to_vec(),
            _ => return Err(parse_error(line, "OUTPUT requires '= expression'")),
        }
    };
    Ok(Statement {
        line,
        is_input,
        position,
        ty,
        expr,
    })
}

fn parse_type_code(line: usize, ty: &Option<String>) -> Result<u8> {
    match ty {
        None => Ok(crate::pin::POWER_CODE),
        Some(t) if t.eq_ignore_ascii_case("POWER") => Ok(crate::pin::POWER_CODE),
        Some(t) => t
            .parse::<u8>()
            .map_err(|_| parse_error(line, format!("Unknown pin type {t}"))),
    }
}

/// Recursive descent over the tokens of an expression
struct ExprParser<'a> {
    line: usize,
    tokens: &'a [String],
    pos: usize,
    name_to_input: &'a FxHashMap<Position, usize>,
}

impl<'a> ExprParser<'a> {
    fn next(&mut self) -> Result<&'a str> {
        let t = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| parse_error(self.line, "Unexpected end of expression"))?;
        self.pos += 1;
        Ok(t.as_str())
    }

    fn expect(&mut self, s: &str) -> Result<()> {
        let t = self.next()?;
        if t != s {
            return Err(parse_error(self.line, format!("Expected '{s}', got '{t}'")));
        }
        Ok(())
    }

    fn args(&mut self) -> Result<Vec<Expr>> {
        self.expect("(")?;
        let mut ret = vec![self.expr()?];
        loop {
            match self.next()? {
                "," => ret.push(self.expr()?),
                ")" => return Ok(ret),
                t => return Err(parse_error(self.line, format!("Expected ',' or ')', got '{t}'"))),
            }
        }
    }

    fn args_n(&mut self, name: &str, n: usize) -> Result<Vec<Expr>> {
        let v = self.args()?;
        if v.len() != n {
            return Err(parse_error(
                self.line,
                format!("{name} takes {n} arguments, got {}", v.len()),
            ));
        }
        Ok(v)
    }

    fn expr(&mut self) -> Result<Expr> {
        let line = self.line;
        let t = self.next()?.to_string();
        let upper = t.to_uppercase();
        match upper.as_str() {
            "0" | "GND" | "VSS" => return Ok(Expr::Const(false)),
            "1" | "VDD" => return Ok(Expr::Const(true)),
            "NOT" => {
                let mut v = self.args_n("NOT", 1)?;
                return Ok(Expr::not(v.remove(0)));
            }
            "BUF" | "BUFF" => {
                let mut v = self.args_n("BUF", 1)?;
                return Ok(v.remove(0));
            }
            "MUX" | "MAJ" => {
                let v = self.args_n(&upper, 3)?;
                let [a, b, c]: [Expr; 3] = v.try_into().map_err(|_| parse_error(line, "Arity"))?;
                return Ok(if upper == "MUX" {
                    Expr::mux(a, b, c)
                } else {
                    Expr::maj(a, b, c)
                });
            }
            "LUT" => {
                let hex = self.next()?.to_string();
                let digits = hex
                    .strip_prefix("0x")
                    .ok_or_else(|| parse_error(line, format!("Expected 0x prefix, got {hex}")))?;
                let v = self.args()?;
                let lut = Lut::from_hex_string(v.len(), digits)
                    .map_err(|_| parse_error(line, format!("Invalid LUT 0x{digits}")))?;
                return Ok(Expr::lut(v, lut));
            }
            _ => (),
        }
        if let Some(tp) = NaryType::from_keyword(&upper) {
            let v = self.args()?;
            return Ok(Expr::Nary(v.into(), tp));
        }
        let position: Position = t
            .parse()
            .map_err(|_| parse_error(line, format!("Unknown gate or input {t}")))?;
        match self.name_to_input.get(&position) {
            Some(i) => Ok(Expr::Input(*i)),
            None => Err(parse_error(line, format!("{t} is not an input"))),
        }
    }
}

fn parse_expr(
    line: usize,
    tokens: &[String],
    name_to_input: &FxHashMap<Position, usize>,
) -> Result<Expr> {
    let mut parser = ExprParser {
        line,
        tokens,
        pos: 0,
        name_to_input,
    };
    let e = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(parse_error(line, "Unexpected tokens after expression"));
    }
    Ok(e)
}

fn circuit_from_statements(statements: &[Statement]) -> Result<CircuitDefinition> {
    let mut inputs = Vec::new();
    for s in statements.iter().filter(|s| s.is_input) {
        let code = parse_type_code(s.line, &s.ty)?;
        inputs.push(InputPin::parse(&s.position, InputType::from_code(code))?);
    }
    let mut ret = CircuitDefinition::new();
    ret.with_inputs(inputs)?;

    let name_to_input: FxHashMap<Position, usize> = ret
        .inputs()
        .iter()
        .enumerate()
        .map(|(i, p)| (p.position(), i))
        .collect();

    let mut outputs = Vec::new();
    for s in statements.iter().filter(|s| !s.is_input) {
        let code = parse_type_code(s.line, &s.ty)?;
        let e = parse_expr(s.line, &s.expr, &name_to_input)?;
        outputs.push(OutputPin::parse(
            &s.position,
            OutputType::from_code(code),
            e,
        )?);
    }
    ret.with_outputs(outputs)?;
    Ok(ret)
}

/// Read a circuit in .pins format
///
/// These files describe the pins of a module and the function of each output:
/// ```text
///     # This is a comment
///     INPUT(L)
///     INPUT(R)
///     INPUT(S1, POWER)
///     OUTPUT(T) = AND(L, R)
///     OUTPUT(F, 3) = XOR(L, NOT(S1))
///     OUTPUT(S2) = MUX(S1, L, LUT 0x6 (L, R))
/// ```
/// Inputs are in declaration order, regardless of where outputs are declared.
pub fn read_pins<R: Read>(r: R) -> Result<CircuitDefinition> {
    let mut statements = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let s = l?;
        let t = s.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        let tokens = tokenize(i + 1, t)?;
        statements.push(parse_statement(i + 1, tokens)?);
    }
    circuit_from_statements(&statements)
}

/// Sum of products over all inputs, for functions without an expression
fn sum_of_products(nb_inputs: usize, f: &dyn Evaluate) -> Expr {
    let mut minterms = Vec::new();
    for i in 0..(1usize << nb_inputs) {
        let a = assignment(i, nb_inputs);
        if !f.evaluate(&a) {
            continue;
        }
        let lits = a
            .iter()
            .enumerate()
            .map(|(j, b)| {
                if *b {
                    Expr::Input(j)
                } else {
                    Expr::not(Expr::Input(j))
                }
            })
            .collect::<Vec<_>>();
        minterms.push(if lits.is_empty() {
            Expr::Const(true)
        } else {
            Expr::andn(lits)
        });
    }
    match minterms.len() {
        0 => Expr::Const(false),
        1 => minterms.remove(0),
        _ => Expr::orn(minterms),
    }
}

fn write_pin_type(w: &mut impl Write, code: u8) -> Result<()> {
    if code != crate::pin::POWER_CODE {
        write!(w, ", {code}")?;
    }
    Ok(())
}

/// Write a circuit in .pins format
///
/// Outputs driven by a gate expression are written as is.
/// Other functions are written as a sum of products over all inputs.
pub fn write_pins<W: Write>(w: &mut W, def: &CircuitDefinition) -> Result<()> {
    writeln!(w, "# .pins file")?;
    writeln!(w, "# Generated by voxtable")?;
    for p in def.inputs() {
        write!(w, "INPUT({}", p.position())?;
        write_pin_type(w, p.ty().code())?;
        writeln!(w, ")")?;
    }
    writeln!(w)?;
    let names = def.input_positions();
    let names = names.as_slice();
    for o in def.outputs() {
        write!(w, "OUTPUT({}", o.position())?;
        write_pin_type(w, o.ty().code())?;
        match o.function().as_expr() {
            Some(e) => writeln!(w, ") = {}", e.display_with(names))?,
            None => {
                let e = sum_of_products(def.nb_inputs(), o.function());
                writeln!(w, ") = {}", e.display_with(names))?
            }
        }
    }
    Ok(())
}
