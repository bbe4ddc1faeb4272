use strum_macros::{EnumIter, FromRepr};

/// Condition under which a jump or branch is taken.
///
/// The discriminant is the 3-bit `cond` field shared by all J-class instructions.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Condition {
    Always = 0,
    Never = 1,
    Zero = 2,
    NotZero = 3,
    Carry = 4,
    NotCarry = 5,
    CarryOrZero = 6,
    NeitherCarryNorZero = 7,
}

impl Condition {
    /// Mnemonic of the jump (absolute) form.
    pub fn jump_mnemonic(&self) -> &'static str {
        match self {
            Condition::Always => "jmp",
            Condition::Never => "jn",
            Condition::Zero => "jz",
            Condition::NotZero => "jnz",
            Condition::Carry => "jc",
            Condition::NotCarry => "jnc",
            Condition::CarryOrZero => "jcz",
            Condition::NeitherCarryNorZero => "jncz",
        }
    }

    /// Mnemonic of the branch (relative) form.
    pub fn branch_mnemonic(&self) -> &'static str {
        match self {
            Condition::Always => "bra",
            Condition::Never => "bn",
            Condition::Zero => "bz",
            Condition::NotZero => "bnz",
            Condition::Carry => "bc",
            Condition::NotCarry => "bnc",
            Condition::CarryOrZero => "bcz",
            Condition::NeitherCarryNorZero => "bncz",
        }
    }
}
