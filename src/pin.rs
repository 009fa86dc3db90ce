//! Input and output pins of a module
//!
//! Pins are validated when they are created: a pin that exists is always valid.
//!
//! ```
//! # use voxtable::pin::{InputPin, InputType, OutputPin, OutputType};
//! let a = InputPin::parse("L", InputType::Power).unwrap();
//! let out = OutputPin::parse("T", OutputType::Power, |v: &[bool]| !v[0]).unwrap();
//! assert!(out.evaluate(&[false]));
//!
//! // State slots only carry power
//! assert!(InputPin::parse("S3", InputType::Other(2)).is_err());
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::position::Position;

/// Container code of the Power type
pub const POWER_CODE: u8 = 0;

/// Semantic role of an input pin
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub enum InputType {
    /// Power input
    #[default]
    Power,
    /// A role this crate does not know, with its container code
    Other(u8),
}

/// Semantic role of an output pin
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub enum OutputType {
    /// Power output
    #[default]
    Power,
    /// A role this crate does not know, with its container code
    Other(u8),
}

macro_rules! impl_pin_type {
    ($t:ident) => {
        impl $t {
            /// Create from a container type code
            pub fn from_code(code: u8) -> $t {
                if code == POWER_CODE {
                    $t::Power
                } else {
                    $t::Other(code)
                }
            }

            /// Container type code
            pub fn code(self) -> u8 {
                match self {
                    $t::Power => POWER_CODE,
                    $t::Other(c) => c,
                }
            }

            /// Returns true for the Power type
            pub fn is_power(self) -> bool {
                self.code() == POWER_CODE
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $t::Power => write!(f, "POWER"),
                    $t::Other(c) => write!(f, "{c}"),
                }
            }
        }
    };
}

impl_pin_type!(InputType);
impl_pin_type!(OutputType);

/// A boolean function of the full input assignment
///
/// Implementations must be pure: the result may only depend on the assignment.
/// Nothing enforces it, but compiled tables are meaningless otherwise.
pub trait Evaluate {
    /// Value of the function for an assignment, given in input order
    fn evaluate(&self, assignment: &[bool]) -> bool;

    /// The gate expression behind the function, if it has one
    fn as_expr(&self) -> Option<&Expr> {
        None
    }

    /// Whether the function can be evaluated on assignments of this size
    ///
    /// Functions that do not know their inputs accept any size.
    fn accepts_inputs(&self, _nb_inputs: usize) -> bool {
        true
    }
}

impl<F> Evaluate for F
where
    F: Fn(&[bool]) -> bool,
{
    fn evaluate(&self, assignment: &[bool]) -> bool {
        self(assignment)
    }
}

fn check_state_type(position: Position, is_power: bool, ty: &dyn fmt::Display) -> Result<()> {
    if position.is_state() && !is_power {
        return Err(Error::InvalidStateType {
            position,
            ty: ty.to_string(),
        });
    }
    Ok(())
}

/// An input pin
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct InputPin {
    position: Position,
    ty: InputType,
}

impl InputPin {
    /// Create an input pin, checking that state positions carry power
    pub fn new(position: Position, ty: InputType) -> Result<InputPin> {
        check_state_type(position, ty.is_power(), &ty)?;
        Ok(InputPin { position, ty })
    }

    /// Create an input pin from a position token
    pub fn parse(token: &str, ty: InputType) -> Result<InputPin> {
        InputPin::new(token.parse()?, ty)
    }

    /// Position of the pin
    pub fn position(&self) -> Position {
        self.position
    }

    /// Type of the pin
    pub fn ty(&self) -> InputType {
        self.ty
    }
}

/// An output pin, with the function that drives it
pub struct OutputPin {
    position: Position,
    ty: OutputType,
    function: Box<dyn Evaluate>,
}

impl OutputPin {
    /// Create an output pin, checking that state positions carry power
    pub fn new<F: Evaluate + 'static>(
        position: Position,
        ty: OutputType,
        function: F,
    ) -> Result<OutputPin> {
        check_state_type(position, ty.is_power(), &ty)?;
        Ok(OutputPin {
            position,
            ty,
            function: Box::new(function),
        })
    }

    /// Create an output pin from a position token
    pub fn parse<F: Evaluate + 'static>(
        token: &str,
        ty: OutputType,
        function: F,
    ) -> Result<OutputPin> {
        OutputPin::new(token.parse()?, ty, function)
    }

    /// Position of the pin
    pub fn position(&self) -> Position {
        self.position
    }

    /// Type of the pin
    pub fn ty(&self) -> OutputType {
        self.ty
    }

    /// Function driving the pin
    pub fn function(&self) -> &dyn Evaluate {
        self.function.as_ref()
    }

    /// Whether the function of the pin can be evaluated with this number of inputs
    pub fn accepts_inputs(&self, nb_inputs: usize) -> bool {
        self.function.accepts_inputs(nb_inputs)
    }

    /// Value of the pin for an input assignment
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        self.function.evaluate(assignment)
    }
}

impl fmt::Debug for OutputPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputPin")
            .field("position", &self.position)
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        assert_eq!(InputType::from_code(0), InputType::Power);
        assert_eq!(InputType::from_code(3), InputType::Other(3));
        assert_eq!(OutputType::Other(7).code(), 7);
        assert_eq!(OutputType::Power.code(), POWER_CODE);
        assert_eq!(format!("{}", InputType::Power), "POWER");
        assert_eq!(format!("{}", OutputType::Other(4)), "4");
    }

    #[test]
    fn test_geometric() {
        let p = InputPin::parse("FLT", InputType::Other(5)).unwrap();
        assert_eq!(p.position(), Position::FLT);
        assert_eq!(p.ty(), InputType::Other(5));
        let o = OutputPin::parse("C", OutputType::Other(1), |_: &[bool]| true).unwrap();
        assert_eq!(o.position(), Position::C);
        assert!(o.evaluate(&[]));
    }

    #[test]
    fn test_state() {
        assert!(InputPin::parse("S1", InputType::Power).is_ok());
        assert!(OutputPin::parse("S8", OutputType::Power, |_: &[bool]| false).is_ok());
        assert!(matches!(
            InputPin::parse("S1", InputType::Other(1)),
            Err(Error::InvalidStateType {
                position: Position::S1,
                ..
            })
        ));
        assert!(matches!(
            OutputPin::parse("S5", OutputType::Other(9), |_: &[bool]| false),
            Err(Error::InvalidStateType {
                position: Position::S5,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_position() {
        assert!(matches!(
            InputPin::parse("Z", InputType::Power),
            Err(Error::UnknownPosition(_))
        ));
        assert!(matches!(
            OutputPin::parse("FRONT", OutputType::Power, |_: &[bool]| false),
            Err(Error::UnknownPosition(_))
        ));
    }

    #[test]
    fn test_closure() {
        let o = OutputPin::parse("T", OutputType::Power, |v: &[bool]| v[0] && v[1]).unwrap();
        assert!(!o.evaluate(&[true, false]));
        assert!(o.evaluate(&[true, true]));
        assert!(o.function().evaluate(&[true, true]));
    }
}
