use std::fmt;

use strum_macros::{EnumIter, FromRepr};

/// One of the eight architectural registers.
///
/// `$0` and `$H` are wired to constant values: `$0` always reads as zero and `$H` always reads as
/// all-ones. Both can be used as operands anywhere a register is legal, but writes to them are
/// discarded.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    H = 7,
}

impl Register {
    pub const COUNT: usize = 8;

    /// Index into the register file, equal to the 3-bit field used in machine code.
    pub fn index(self) -> usize {
        self as usize
    }

    /// `$0` and `$H` hold hardware-fixed values.
    pub fn is_fixed(self) -> bool {
        matches!(self, Register::R0 | Register::H)
    }

    /// Look up a register by the name written after the `$` sigil.
    ///
    /// `$Z` is an alias for `$0` and `$7` an alias for `$H`.
    pub fn from_name(name: &str) -> Option<Register> {
        let register = match name {
            "0" | "Z" | "z" => Register::R0,
            "1" => Register::R1,
            "2" => Register::R2,
            "3" => Register::R3,
            "4" => Register::R4,
            "5" => Register::R5,
            "6" => Register::R6,
            "7" | "H" | "h" => Register::H,
            _ => return None,
        };
        Some(register)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::H => write!(f, "$H"),
            register => write!(f, "${}", register.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_register_names() {
        let tests = vec![
            ("0", Some(Register::R0)),
            ("Z", Some(Register::R0)),
            ("z", Some(Register::R0)),
            ("3", Some(Register::R3)),
            ("6", Some(Register::R6)),
            ("H", Some(Register::H)),
            ("7", Some(Register::H)),
            ("8", None),
            ("12", None),
            ("", None),
        ];
        for (input, expected) in tests {
            assert_eq!(Register::from_name(input), expected);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Register::R0.to_string(), "$0");
        assert_eq!(Register::R5.to_string(), "$5");
        assert_eq!(Register::H.to_string(), "$H");
    }
}
