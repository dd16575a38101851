//! KestrelDB shell - run SQL scripts or statements typed at a prompt

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use kestreldb::session::Session;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// KestrelDB - an in-memory SQL engine with indexed columns
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run the statements in this file and exit
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut session = Session::new();
    match args.file {
        Some(path) => {
            for result in session.execute_file(&path)? {
                println!("{}", result);
            }
            Ok(())
        }
        None => repl(&mut session),
    }
}

/// Read statements from stdin line by line until end of input
fn repl(session: &mut Session) -> Result<()> {
    println!("KestrelDB v{}", env!("CARGO_PKG_VERSION"));
    println!("Enter SQL statements terminated by ';'. Ctrl+D exits.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("kestrel> ");
        stdout.flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match session.execute(&line) {
            Ok(results) => {
                for result in results {
                    println!("{}", result);
                }
            }
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }
    Ok(())
}
