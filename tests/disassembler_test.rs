use rm16::{
    assembler::compile_code,
    ast::{Condition, Instruction, Operand, Operation, Register},
    disassembler::{disassemble_code, listing::Listing, to_source},
};

use pretty_assertions::assert_eq;

#[test]
fn test_count_program() {
    let bytes = compile_code(include_str!("../programs/count.asm")).unwrap();
    let code = disassemble_code(&bytes).unwrap();

    let expected = "addi $1, $0, 0x0
addi $2, $0, 0x0
addi $1, $1, 0x1
add $2, $2, $1
subi $3, $1, 0xa
bnz 0x4
jmp 0x14
addi $4, $0, 0x63
add $5, $2, $0
";
    assert_eq!(to_source(&code), expected);
}

#[test]
fn test_reassemble() {
    let bytes = compile_code(include_str!("../programs/count.asm")).unwrap();
    let source = to_source(&disassemble_code(&bytes).unwrap());
    assert_eq!(compile_code(&source).unwrap(), bytes);
}

#[test]
fn test_branch_target_is_absolute() {
    let bytes = compile_code("nop\nloop: addi $1, $1, 1\nbnz loop\n").unwrap();
    let code = disassemble_code(&bytes).unwrap();

    assert_eq!(
        code,
        vec![
            Instruction::Register {
                op: Operation::Add,
                dest: Register::R0,
                left: Register::R0,
                right: Register::R0,
            },
            Instruction::NarrowImmediate {
                op: Operation::Add,
                dest: Register::R1,
                left: Register::R1,
                imm: Operand::Value(1),
            },
            Instruction::Branch {
                cond: Condition::NotZero,
                target: Operand::Value(2),
            },
        ]
    );
}

#[test]
fn test_listing() {
    let bytes = compile_code(include_str!("../programs/count.asm")).unwrap();
    let code = disassemble_code(&bytes).unwrap();
    let listing = Listing::new(&bytes, code, 0).generate();

    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[7], "0x000a  effd       bnz 0x4");
    assert_eq!(lines[8], "0x000c  c000 0014  jmp 0x14");
}

#[test]
fn test_branch_below_address_zero() {
    let bytes = [0xe3, 0xff];
    let code = disassemble_code(&bytes).unwrap();
    assert_eq!(to_source(&code), "bra 0xfffe\n");

    let listing = Listing::new(&bytes, code, 0).generate();
    assert_eq!(listing.lines().nth(2), Some("0x0000  e3ff       bra 0xfffe"));

    assert_eq!(compile_code("bra 0xfffe\n").unwrap(), bytes);
}
