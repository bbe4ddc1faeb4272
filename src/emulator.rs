use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use thiserror::Error;

use crate::{
    assembler::compile_code,
    codec::CodecError,
    emulator::{
        cpu::{Cpu, Halt, RunOption},
        memory::Memory,
    },
};

pub mod cpu;
pub mod memory;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EmulatorError {
    #[error("Failed to execute instruction at {address:#06x}: {source}")]
    Decode { address: u16, source: CodecError },
    #[error("Invalid memory size: {0} bytes, expected {min}..={max}", min = Memory::MIN_SIZE, max = Memory::MAX_SIZE)]
    InvalidMemorySize(usize),
    #[error("Program of {program} bytes does not fit in {memory} bytes of memory")]
    ProgramTooLarge { program: usize, memory: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatorConfig {
    pub memory_size: usize,
    pub run_option: RunOption,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            memory_size: Memory::DEFAULT_SIZE,
            run_option: RunOption::UntilEnd,
        }
    }
}

/// Loads the program at address 0 and runs it from a freshly reset CPU.
///
/// Returns the final CPU state together with the reason it stopped.
#[tracing::instrument(skip(program))]
pub fn run(program: &[u8], config: &EmulatorConfig) -> Result<(Cpu, Halt), EmulatorError> {
    let mut memory = Memory::with_size(config.memory_size)?;
    memory.load(0x0000, program)?;

    let mut cpu = Cpu::new();
    cpu.reset();
    let halt = cpu.run(&memory, program.len(), config.run_option)?;

    Ok((cpu, halt))
}

#[derive(Args, Debug)]
pub struct EmulationArgs {
    #[arg(value_name = "FILE")]
    #[arg(help = "Binary program file, or assembly source with --source")]
    pub input: PathBuf,
    #[arg(long)]
    #[arg(help = "Treat the input as assembly source and assemble it first")]
    pub source: bool,
    #[arg(long, default_value_t = Memory::DEFAULT_SIZE)]
    #[arg(help = "Memory size in bytes")]
    pub memory_size: usize,
    #[arg(long)]
    #[arg(help = "Stop after this many instructions")]
    pub max_steps: Option<usize>,
}

/// Run a program in the emulator and print the final machine state.
pub fn emulate(args: &EmulationArgs) -> Result<()> {
    let program = if args.source {
        let source = std::fs::read_to_string(&args.input)
            .with_context(|| format!("Unable to read file {}", args.input.display()))?;
        compile_code(&source)
            .with_context(|| format!("Assembly of {} failed", args.input.display()))?
    } else {
        std::fs::read(&args.input)
            .with_context(|| format!("Unable to read file {}", args.input.display()))?
    };

    let config = EmulatorConfig {
        memory_size: args.memory_size,
        run_option: match args.max_steps {
            Some(limit) => RunOption::StepLimit(limit),
            None => RunOption::UntilEnd,
        },
    };

    let (cpu, halt) = run(&program, &config)
        .with_context(|| format!("Emulation of {} failed", args.input.display()))?;

    println!("{}", cpu);
    println!("Program finished: {} after {} steps", halt, cpu.steps);

    Ok(())
}
