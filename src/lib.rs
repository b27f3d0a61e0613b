/*
    Compiles BNF grammars into rule tables, using a rule table of BNF itself
    to read them
*/

pub mod engine;
pub mod error_handling;
pub mod grammar;
pub mod parser;

pub use engine::{Node, Parser, ParserOptions};
pub use grammar::{Alternative, GrammarTable, RuleDefinition, TermRef};
pub use parser::{build_parser, compile, compile_with, CompileError, CompileErrorType, CompileOptions, EolStyle};
