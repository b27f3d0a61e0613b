use std::path::PathBuf;

use clap::Parser;

use bootbnf::engine::DEFAULT_MAX_DEPTH;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// File containing the BNF grammar
    pub file: PathBuf,

    /// Parse this file with the compiled grammar and print the tree
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Start symbol for --input (default: first in the grammar)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Give a synthesized EOL rule one alternative per line terminator
    #[arg(long)]
    pub split_eol: bool,

    /// How deeply rules may nest while parsing --input
    #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize
}
