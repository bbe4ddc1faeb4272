use rm16::{
    assembler::compile_code,
    ast::Register,
    emulator::{
        self,
        cpu::{Cpu, Halt, RunOption},
        EmulatorConfig,
    },
};

use pretty_assertions::assert_eq;

fn run_source(source: &str) -> (Cpu, Halt) {
    let bytes = compile_code(source).unwrap();
    emulator::run(&bytes, &EmulatorConfig::default()).unwrap()
}

#[test]
fn test_count_program() {
    let (cpu, halt) = run_source(include_str!("../programs/count.asm"));

    assert_eq!(halt, Halt::EndOfProgram);
    assert_eq!(cpu.steps, 44);
    assert_eq!(cpu.registers.pc, 22);

    let tests = vec![
        (Register::R0, 0),
        (Register::R1, 10),
        (Register::R2, 55),
        (Register::R3, 0),
        (Register::R4, 0),
        (Register::R5, 55),
        (Register::R6, 0),
        (Register::H, 0xffff),
    ];
    for (register, expected) in tests {
        assert_eq!(cpu.registers.read(register), expected, "{}", register);
    }
    assert!(!cpu.registers.status.zero);
    assert!(!cpu.registers.status.carry);
}

#[test]
fn test_add_immediate() {
    let (cpu, _) = run_source("add $1, $0, $0\naddi $1, $1, 5\n");
    assert_eq!(cpu.registers.read(Register::R1), 5);
    assert!(!cpu.registers.status.zero);
}

#[test]
fn test_jump_register() {
    let source = "
    ldi $1, target
    jmp $1
    ldi $2, 7
target:
    ldi $3, 9
";
    let (cpu, _) = run_source(source);
    assert_eq!(cpu.registers.read(Register::R1), 8);
    assert_eq!(cpu.registers.read(Register::R2), 0);
    assert_eq!(cpu.registers.read(Register::R3), 9);
    assert_eq!(cpu.registers.pc, 10);
}

#[test]
fn test_carry_branch() {
    let source = "
    ldi $1, 0xffff
    addi $1, $1, 1
    bc carried
    ldi $2, 1
carried:
    ldi $3, 2
";
    let (cpu, _) = run_source(source);
    assert_eq!(cpu.registers.read(Register::R1), 0);
    assert_eq!(cpu.registers.read(Register::R2), 0);
    assert_eq!(cpu.registers.read(Register::R3), 2);
}

#[test]
fn test_pseudo_instructions() {
    let tests = vec![
        ("ldi $1, 5\nneg $1\n", 0xfffb),
        ("ldi $1, 5\nneg $1\nnot $1\n", 0x0004),
        ("ldi $2, 300\nmv $1, $2\n", 300),
        ("ldi $1, -2\n", 0xfffe),
        ("ldi $1, 3\nnop\n", 3),
    ];
    for (source, expected) in tests {
        let (cpu, _) = run_source(source);
        assert_eq!(cpu.registers.read(Register::R1), expected, "{}", source);
    }
}

#[test]
fn test_fixed_registers_ignore_writes() {
    let (cpu, _) = run_source("ldi $0, 7\nldi $H, 7\nmv $1, $H\n");
    assert_eq!(cpu.registers.read(Register::R0), 0);
    assert_eq!(cpu.registers.read(Register::H), 0xffff);
    assert_eq!(cpu.registers.read(Register::R1), 0xffff);
}

#[test]
fn test_step_limit() {
    let bytes = compile_code("spin: bra spin\n").unwrap();
    let config = EmulatorConfig {
        run_option: RunOption::StepLimit(100),
        ..EmulatorConfig::default()
    };
    let (cpu, halt) = emulator::run(&bytes, &config).unwrap();
    assert_eq!(halt, Halt::StepLimit);
    assert_eq!(cpu.steps, 100);
    assert_eq!(cpu.registers.pc, 0);
}

#[test]
fn test_small_memory() {
    let bytes = compile_code("ldi $1, 1\nldi $2, 2\n").unwrap();
    let config = EmulatorConfig {
        memory_size: 4,
        ..EmulatorConfig::default()
    };
    let (cpu, halt) = emulator::run(&bytes, &config).unwrap();
    assert_eq!(halt, Halt::EndOfProgram);
    assert_eq!(cpu.registers.read(Register::R2), 2);
}

#[test]
fn test_branch_wraps_below_address_zero() {
    // bra with a word offset of -1 at address 0
    let config = EmulatorConfig {
        run_option: RunOption::StepLimit(1),
        ..EmulatorConfig::default()
    };
    let (cpu, halt) = emulator::run(&[0xe3, 0xff], &config).unwrap();
    assert_eq!(cpu.registers.pc, 0xfffe);
    assert_eq!(halt, Halt::EndOfProgram);
}
