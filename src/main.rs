use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use bfrun::channel::Stdio;
use bfrun::inst::{mnemonics, tokenize};
use bfrun::program::Program;
use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(name = "bfrun", about = "Brainfuck interpreter with file and interactive modes")]
struct Cli {
    /// Source file to run. Starts an interactive prompt when omitted.
    file: Option<PathBuf>,

    /// Print instruction mnemonics instead of executing.
    #[arg(long)]
    dump_tokens: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.file {
        Some(path) => {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            run_source(&source, cli.dump_tokens)
        }
        None => repl(cli.dump_tokens),
    }
}

/// Run (or dump) one source unit against the standard streams.
fn run_source(source: &str, dump_tokens: bool) -> anyhow::Result<()> {
    if dump_tokens {
        println!("{}", mnemonics(&tokenize(source)).join(" "));
        return Ok(());
    }

    let mut program = Program::new(source).context("invalid program")?;
    program.run(&mut Stdio)?;
    Ok(())
}

/// Read lines from stdin, running each as an independent program.
/// An error finishes the line, not the session.
fn repl(dump_tokens: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    loop {
        print!("\n:: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(()); // end of input
        }
        debug!("interactive line of {} chars", line.chars().count());

        if let Err(err) = run_source(&line, dump_tokens) {
            eprintln!("{err:#}");
        }
    }
}
