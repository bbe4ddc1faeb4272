use std::fmt;

use strum::IntoEnumIterator;

use crate::{
    ast::{Instruction, Operand, Operation, Register},
    codec::{self, CodecError},
    emulator::{memory::Bus, EmulatorError},
};

pub mod alu;
pub mod registers;

use registers::{Registers, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOption {
    /// Run until the program counter leaves the program or the memory
    UntilEnd,
    /// Stop after at most this many instructions
    StepLimit(usize),
}

/// Why [`Cpu::run`] stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    EndOfProgram,
    EndOfMemory,
    StepLimit,
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Halt::EndOfProgram => write!(f, "end of program"),
            Halt::EndOfMemory => write!(f, "end of memory"),
            Halt::StepLimit => write!(f, "step limit reached"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cpu {
    pub registers: Registers,
    /// Instructions executed since the last reset
    pub steps: usize,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.registers = Registers::default();
        self.steps = 0;
    }

    /// Fetches and decodes the instruction at the program counter.
    ///
    /// Two words are always fetched since the decoder decides how many it needs.
    fn fetch_and_decode(&self, memory: &dyn Bus) -> Result<(Instruction, usize), CodecError> {
        let pc = self.registers.pc;
        let first = memory.read_word(pc).to_be_bytes();
        let second = memory.read_word(pc.wrapping_add(2)).to_be_bytes();
        codec::decode(&[first, second].concat(), pc)
    }

    /// Executes a single instruction and returns it.
    ///
    /// The program counter is advanced past the instruction before it is executed.
    pub fn step(&mut self, memory: &dyn Bus) -> Result<Instruction, EmulatorError> {
        let address = self.registers.pc;
        let (ins, size) = self
            .fetch_and_decode(memory)
            .map_err(|source| EmulatorError::Decode { address, source })?;

        self.registers.pc = address.wrapping_add(size as u16);
        self.execute(&ins)
            .map_err(|source| EmulatorError::Decode { address, source })?;
        self.steps += 1;

        tracing::trace!(
            "{:#06x}: {:<20} pc={:#06x} zf={} cf={}",
            address,
            ins.to_string(),
            self.registers.pc,
            self.registers.status.zero,
            self.registers.status.carry
        );
        Ok(ins)
    }

    /// Runs the program until the program counter reaches the end of the program or the
    /// memory, whichever comes first.
    #[tracing::instrument(skip(self, memory))]
    pub fn run(
        &mut self,
        memory: &dyn Bus,
        program_len: usize,
        run_option: RunOption,
    ) -> Result<Halt, EmulatorError> {
        let mut steps = 0;
        let halt = loop {
            let pc = self.registers.pc as usize;
            if pc >= program_len {
                break Halt::EndOfProgram;
            }
            if pc >= memory.size() {
                break Halt::EndOfMemory;
            }
            if let RunOption::StepLimit(limit) = run_option {
                if steps >= limit {
                    break Halt::StepLimit;
                }
            }

            self.step(memory)?;
            steps += 1;
        };

        tracing::debug!(
            "Halted at {:#06x} after {} steps: {}",
            self.registers.pc,
            steps,
            halt
        );
        Ok(halt)
    }

    /// Executes an already decoded instruction. Operands must be resolved.
    pub fn execute(&mut self, ins: &Instruction) -> Result<(), CodecError> {
        match ins {
            Instruction::Register {
                op,
                dest,
                left,
                right,
            } => {
                let right = self.registers.read(*right);
                self.alu(*op, *dest, *left, right);
            }
            Instruction::NarrowImmediate {
                op,
                dest,
                left,
                imm,
            }
            | Instruction::WideImmediate {
                op,
                dest,
                left,
                imm,
            } => {
                let right = operand_value(imm)?;
                self.alu(*op, *dest, *left, right);
            }
            Instruction::JumpRegister { cond, reg } => {
                if self.registers.status.should_jump(*cond) {
                    self.registers.pc = self.registers.read(*reg);
                }
            }
            Instruction::JumpImmediate { cond, target } | Instruction::Branch { cond, target } => {
                let target = operand_value(target)?;
                if self.registers.status.should_jump(*cond) {
                    self.registers.pc = target;
                }
            }
        }
        Ok(())
    }

    fn alu(&mut self, op: Operation, dest: Register, left: Register, right: u16) {
        let (result, carry) = alu::execute(op, self.registers.read(left), right);
        self.registers.status = Status {
            zero: result == 0,
            carry,
        };
        self.registers.write(dest, result);
    }
}

fn operand_value(operand: &Operand) -> Result<u16, CodecError> {
    operand
        .value()
        .ok_or_else(|| CodecError::UnresolvedOperand(operand.to_string()))
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "pc: {:#06x} ({})",
            self.registers.pc, self.registers.pc
        )?;
        for register in Register::iter() {
            let value = self.registers.read(register);
            writeln!(f, "{}: {:#06x} ({})", register, value, value)?;
        }
        write!(
            f,
            "zf: {}  cf: {}",
            self.registers.status.zero, self.registers.status.carry
        )
    }
}
