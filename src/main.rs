mod cli;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser as _;
use itertools::Itertools;
use log::info;

use bootbnf::{compile_with, CompileOptions, EolStyle, Parser, ParserOptions};
use cli::Cli;

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn run(cli: Cli) -> Result<(), String> {
    let source = read(&cli.file)?;

    let options = CompileOptions {
        eol: if cli.split_eol { EolStyle::Alternatives } else { EolStyle::Compat }
    };
    let rules = compile_with(&source, &options).map_err(|e| format!("{}: {}", cli.file.display(), e))?;
    info!("Compiled {} rules from {}", rules.len(), cli.file.display());

    let Some(input_path) = cli.input else {
        println!("{}", rules.iter().join("\n"));
        return Ok(());
    };

    let input = read(&input_path)?;
    let parser = Parser::new(&rules, ParserOptions {
        start: cli.start,
        max_depth: cli.max_depth
    });

    let tree = parser.get_ast(&input)
        .ok_or_else(|| format!("{}: input does not match the grammar", input_path.display()))?;
    print!("{}", tree);

    if tree.errors.is_empty() {
        Ok(())
    } else {
        Err(tree.errors.iter()
            .map(|e| match e.location.line {
                0 => format!("{}: {}", input_path.display(), e),
                _ => format!("{}:{}: {}", input_path.display(), e.location, e),
            })
            .join("\n"))
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("\x1b[31;49;1m{}\x1b[0m", message);
            ExitCode::FAILURE
        }
    }
}
