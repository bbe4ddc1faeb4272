use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use rm16::{
    assembler::{assemble, AssemblyArgs},
    disassembler::{bincat, disassemble, BincatArgs, DisassemblyArgs},
    emulator::{emulate, EmulationArgs},
    instrumentation,
};

#[derive(Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[clap(long, global = true)]
    #[clap(help = "Enable chrome tracing")]
    #[clap(long_help = "Enable chrome tracing which on program exit will generate
a json file to be opened with a chrome tracing compatible
viewer.")]
    trace: bool,
    #[clap(short, long, global = true, action = ArgAction::Count)]
    #[clap(help = "Increase log verbosity, may be repeated")]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[clap(about = "Assemble a program")]
    #[clap(aliases = &["a", "asm"])]
    Assemble(AssemblyArgs),
    #[clap(about = "Disassemble a binary file")]
    #[clap(aliases = &["d", "dis"])]
    Disassemble(DisassemblyArgs),
    #[clap(about = "Rewrite a binary file in canonical form")]
    #[clap(aliases = &["b", "cat"])]
    Bincat(BincatArgs),
    #[clap(about = "Run a program in the emulator")]
    #[clap(aliases = &["e", "emu"])]
    Emulate(EmulationArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _trace_guard = instrumentation::init(cli.verbose, cli.trace);

    match &cli.command {
        Command::Assemble(args) => assemble(args),
        Command::Disassemble(args) => disassemble(args),
        Command::Bincat(args) => bincat(args),
        Command::Emulate(args) => emulate(args),
    }
}
