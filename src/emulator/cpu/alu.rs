use crate::ast::Operation;

/// Compute an ALU operation, returning the 16-bit result and the carry flag.
///
/// Arithmetic wraps modulo 2^16. Shifts are logical and shifting by 16 or more yields zero.
pub fn execute(op: Operation, left: u16, right: u16) -> (u16, bool) {
    match op {
        Operation::Add => left.overflowing_add(right),
        Operation::Sub => left.overflowing_sub(right),
        Operation::Mul => {
            let product = left as u32 * right as u32;
            (product as u16, product > 0xffff)
        }
        Operation::Shl if right >= 16 => (0, left != 0),
        Operation::Shl => (left << right, right > 0 && (left >> (16 - right)) != 0),
        Operation::Shr if right >= 16 => (0, false),
        Operation::Shr => (left >> right, false),
        Operation::And => (left & right, false),
        Operation::Or => (left | right, false),
        Operation::Xor => (left ^ right, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_execute() {
        let tests = vec![
            (Operation::Add, 2, 3, (5, false)),
            (Operation::Add, 0xffff, 1, (0, true)),
            (Operation::Add, 0x8000, 0x8001, (1, true)),
            (Operation::Sub, 5, 3, (2, false)),
            (Operation::Sub, 3, 5, (0xfffe, true)),
            (Operation::Sub, 7, 7, (0, false)),
            (Operation::Mul, 300, 200, (60000, false)),
            (Operation::Mul, 0x100, 0x100, (0, true)),
            (Operation::Shl, 0x0001, 4, (0x0010, false)),
            (Operation::Shl, 0x8001, 1, (0x0002, true)),
            (Operation::Shl, 0x1234, 0, (0x1234, false)),
            (Operation::Shl, 0x0001, 16, (0, true)),
            (Operation::Shl, 0, 20, (0, false)),
            (Operation::Shr, 0x8000, 15, (1, false)),
            (Operation::Shr, 0x8000, 16, (0, false)),
            (Operation::And, 0xff0f, 0x0ff0, (0x0f00, false)),
            (Operation::Or, 0xf000, 0x000f, (0xf00f, false)),
            (Operation::Xor, 0x1234, 0xffff, (0xedcb, false)),
        ];

        for (op, left, right, expected) in tests {
            assert_eq!(
                execute(op, left, right),
                expected,
                "{} {:#x} {:#x}",
                op,
                left,
                right
            );
        }
    }
}
