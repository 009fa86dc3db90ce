//! Circuit generators and templates

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::expr::{Expr, NaryType};
use crate::pin::{InputPin, InputType, OutputPin, OutputType};
use crate::position::{Position, NB_GEOMETRIC_POSITIONS};
use crate::{CircuitDefinition, Result};

/// Full adder on the Top, Down and Left inputs
///
/// The sum is on the Front output, the carry on the Back output.
pub fn full_adder() -> Result<CircuitDefinition> {
    let args = || [Expr::Input(0), Expr::Input(1), Expr::Input(2)];
    let inputs = [Position::T, Position::D, Position::L]
        .into_iter()
        .map(|p| InputPin::new(p, InputType::Power))
        .collect::<Result<Vec<_>>>()?;
    let [a, b, c] = args();
    let outputs = vec![
        OutputPin::new(Position::F, OutputType::Power, Expr::xorn(args().into()))?,
        OutputPin::new(Position::B, OutputType::Power, Expr::maj(a, b, c))?,
    ];
    let mut ret = CircuitDefinition::new();
    ret.with_inputs(inputs)?.with_outputs(outputs)?;
    Ok(ret)
}

fn random_gate(rng: &mut SmallRng, nb_inputs: usize) -> Expr {
    const TYPES: [NaryType; 6] = [
        NaryType::And,
        NaryType::Or,
        NaryType::Nand,
        NaryType::Nor,
        NaryType::Xor,
        NaryType::Xnor,
    ];
    if nb_inputs == 0 {
        return Expr::Const(rng.gen());
    }
    let mut args = Vec::new();
    for i in 0..nb_inputs {
        if rng.gen_bool(0.5) {
            let a = Expr::Input(i);
            args.push(if rng.gen() { Expr::not(a) } else { a });
        }
    }
    if args.is_empty() {
        args.push(Expr::Input(rng.gen_range(0..nb_inputs)));
    }
    let tp = TYPES[rng.gen_range(0..TYPES.len())];
    Expr::Nary(args.into(), tp)
}

/// A random circuit, with one random gate per output
///
/// Inputs and outputs use geometric positions in catalog order.
///
/// # Panics
///
/// Panics if more pins are requested than there are geometric positions.
pub fn random_circuit(nb_inputs: usize, nb_outputs: usize, seed: u64) -> Result<CircuitDefinition> {
    assert!(nb_inputs <= NB_GEOMETRIC_POSITIONS);
    assert!(nb_outputs <= NB_GEOMETRIC_POSITIONS);
    let mut rng = SmallRng::seed_from_u64(seed);
    let inputs = Position::ALL[..nb_inputs]
        .iter()
        .map(|p| InputPin::new(*p, InputType::Power))
        .collect::<Result<Vec<_>>>()?;
    let outputs = Position::ALL[..nb_outputs]
        .iter()
        .map(|p| OutputPin::new(*p, OutputType::Power, random_gate(&mut rng, nb_inputs)))
        .collect::<Result<Vec<_>>>()?;
    let mut ret = CircuitDefinition::new();
    ret.with_inputs(inputs)?.with_outputs(outputs)?;
    Ok(ret)
}
