//! Catalog of pin positions
//!
//! A module exposes pins on the faces, edges and corners of its voxel, plus 8 state slots.
//! The catalog order is fixed: it is the index used by the per-position arrays of module records.
//!
//! ```
//! # use voxtable::position::{is_state_position, position_index, Position};
//! assert_eq!(position_index("FLD").unwrap(), 0);
//! assert_eq!("C".parse::<Position>().unwrap(), Position::C);
//! assert!(is_state_position(position_index("S1").unwrap()));
//! assert!(position_index("X").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Position of a pin on a module
///
/// F/B are Front/Back, L/R are Left/Right, T/D are Top/Down and C is the center.
/// S1 to S8 are opaque state slots.
#[allow(missing_docs)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Position {
    FLD,
    FD,
    FRD,
    FL,
    F,
    FR,
    FLT,
    FT,
    FRT,
    LD,
    D,
    RD,
    L,
    C,
    R,
    LT,
    T,
    RT,
    BLD,
    BD,
    BRD,
    BL,
    B,
    BR,
    BLT,
    BT,
    BRT,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
}

/// Number of positions in the catalog
pub const NB_POSITIONS: usize = 35;

/// Number of state positions, at the end of the catalog
pub const NB_STATE_POSITIONS: usize = 8;

/// Number of geometric positions, at the start of the catalog
pub const NB_GEOMETRIC_POSITIONS: usize = NB_POSITIONS - NB_STATE_POSITIONS;

impl Position {
    /// All positions, in catalog order
    pub const ALL: [Position; NB_POSITIONS] = {
        use Position::*;
        [
            FLD, FD, FRD, FL, F, FR, FLT, FT, FRT, //
            LD, D, RD, L, C, R, LT, T, RT, //
            BLD, BD, BRD, BL, B, BR, BLT, BT, BRT, //
            S1, S2, S3, S4, S5, S6, S7, S8,
        ]
    };

    /// Index of the position in the catalog
    pub fn index(self) -> usize {
        self as usize
    }

    /// Obtain the position at a given catalog index
    pub fn from_index(index: usize) -> Option<Position> {
        Self::ALL.get(index).copied()
    }

    /// Returns true for the state slots S1 to S8
    pub fn is_state(self) -> bool {
        is_state_position(self.index())
    }

    /// Token used in files and tables
    pub fn token(self) -> &'static str {
        use Position::*;
        match self {
            FLD => "FLD",
            FD => "FD",
            FRD => "FRD",
            FL => "FL",
            F => "F",
            FR => "FR",
            FLT => "FLT",
            FT => "FT",
            FRT => "FRT",
            LD => "LD",
            D => "D",
            RD => "RD",
            L => "L",
            C => "C",
            R => "R",
            LT => "LT",
            T => "T",
            RT => "RT",
            BLD => "BLD",
            BD => "BD",
            BRD => "BRD",
            BL => "BL",
            B => "B",
            BR => "BR",
            BLT => "BLT",
            BT => "BT",
            BRT => "BRT",
            S1 => "S1",
            S2 => "S2",
            S3 => "S3",
            S4 => "S4",
            S5 => "S5",
            S6 => "S6",
            S7 => "S7",
            S8 => "S8",
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Position> {
        Self::ALL
            .iter()
            .find(|p| p.token() == s)
            .copied()
            .ok_or_else(|| Error::UnknownPosition(s.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.token())
    }
}

/// Catalog index of a position token
pub fn position_index(token: &str) -> Result<usize> {
    token.parse::<Position>().map(Position::index)
}

/// Returns true if the catalog index is one of the state slots
pub fn is_state_position(index: usize) -> bool {
    (NB_GEOMETRIC_POSITIONS..NB_POSITIONS).contains(&index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        for (i, p) in Position::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
            assert_eq!(Position::from_index(i), Some(*p));
            assert_eq!(position_index(p.token()).unwrap(), i);
        }
        assert_eq!(Position::from_index(NB_POSITIONS), None);
        assert_eq!(Position::ALL[0], Position::FLD);
        assert_eq!(Position::ALL[13], Position::C);
        assert_eq!(Position::ALL[26], Position::BRT);
        assert_eq!(Position::ALL[27], Position::S1);
    }

    #[test]
    fn test_tokens_unique() {
        for a in Position::ALL {
            for b in Position::ALL {
                assert_eq!(a == b, a.token() == b.token());
            }
        }
    }

    #[test]
    fn test_state() {
        let nb_state = Position::ALL.iter().filter(|p| p.is_state()).count();
        assert_eq!(nb_state, NB_STATE_POSITIONS);
        assert!(!Position::BRT.is_state());
        assert!(Position::S1.is_state());
        assert!(Position::S8.is_state());
        assert!(!is_state_position(NB_POSITIONS));
    }

    #[test]
    fn test_unknown() {
        assert!(matches!(
            position_index("X"),
            Err(Error::UnknownPosition(s)) if s == "X"
        ));
        assert!(position_index("S9").is_err());
        assert!(position_index("l").is_err());
        assert!(position_index("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Position::FLT), "FLT");
        assert_eq!(format!("{:<3}|", Position::L), "L  |");
    }
}
