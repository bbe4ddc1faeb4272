use strum_macros::{Display, EnumIter, EnumString, FromRepr};

/// ALU operation of a register or immediate instruction.
///
/// The discriminant is the 3-bit `oper` field of the machine word. The string form is the
/// register-form mnemonic, e.g. `add`; the immediate form appends an `i`.
#[derive(
    Debug, Hash, Eq, PartialEq, Clone, Copy, Display, EnumIter, EnumString, FromRepr,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Operation {
    Add = 0,
    Sub = 1,
    Shl = 2,
    Shr = 3,
    And = 4,
    Or = 5,
    Xor = 6,
    Mul = 7,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_mnemonics() {
        let tests = vec![
            ("add", Operation::Add),
            ("sub", Operation::Sub),
            ("shl", Operation::Shl),
            ("shr", Operation::Shr),
            ("and", Operation::And),
            ("or", Operation::Or),
            ("xor", Operation::Xor),
            ("mul", Operation::Mul),
        ];
        for (input, expected) in tests {
            assert_eq!(Operation::from_str(input), Ok(expected));
            assert_eq!(expected.to_string(), input);
        }
    }

    #[test]
    fn test_field_values() {
        assert_eq!(Operation::from_repr(0), Some(Operation::Add));
        assert_eq!(Operation::from_repr(7), Some(Operation::Mul));
        assert_eq!(Operation::from_repr(8), None);
    }
}
