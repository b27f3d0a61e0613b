/*
    This module compiles BNF text into rule tables
*/

pub mod bootstrap;
mod extract;

use std::fmt::Display;

use itertools::Itertools;
use log::debug;

use crate::engine::{Diagnostic, Node, Parser, ParserOptions};
use crate::error_handling::*;
use crate::grammar::*;
use bootstrap::BOOTSTRAP_PARSER;
pub use extract::{extract_alternative, resolve_term};

#[derive(Debug, PartialEq, Clone)]
pub enum CompileErrorType {
    // The source does not even begin to look like BNF
    ParseFailure(String),
    // The source was parsed but the engine reported a problem with it
    GrammarSyntaxError(Diagnostic),
    // A node the bootstrap grammar guarantees was missing from the tree
    // This is a problem with bootbnf, not the grammar
    MalformedTree(&'static str),
}

impl ErrorType for CompileErrorType {}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::ParseFailure(source) => {
                let first_line = source.lines().next().unwrap_or_default();
                let more = if source.trim_end().contains('\n') { " ..." } else { "" };
                write!(f, "Could not parse `{}{}`", first_line, more)
            }
            CompileErrorType::GrammarSyntaxError(diagnostic) => write!(f, "{}", diagnostic),
            CompileErrorType::MalformedTree(expected) => write!(f, "Parse tree has no `{}` node (this is a problem with bootbnf, not the grammar)", expected),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// How the fallback `EOL` rule is shaped when a grammar does not define one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EolStyle {
    // One alternative holding all three terminators in a row. Matching it
    // needs "\r\n\r\n" and nothing shorter.
    #[default]
    Compat,
    // One alternative per terminator, so any single one matches
    Alternatives,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileOptions {
    pub eol: EolStyle,
}

const EOL_TERMINATORS: [&str; 3] = [r#""\r\n""#, r#""\r""#, r#""\n""#];

fn synthesized_eol(style: EolStyle) -> RuleDefinition {
    let terminators = EOL_TERMINATORS.iter().map(|t| t.to_string());
    let alternatives = match style {
        EolStyle::Compat => vec![terminators.collect_vec()],
        EolStyle::Alternatives => terminators.map(|t| vec![t]).collect_vec(),
    };
    RuleDefinition::new("EOL", alternatives)
}

fn rule_from_node(rule: &Node) -> Result<RuleDefinition> {
    let name = rule.first_child_of_kind("rule-name")
        .ok_or(CompileErrorType::MalformedTree("rule-name"))?
        .text
        .clone();

    let first = rule.first_child_of_kind("firstExpression")
        .ok_or(CompileErrorType::MalformedTree("firstExpression"))?;

    let alternatives = std::iter::once(first)
        .chain(rule.children_of_kind("otherExpression"))
        .map(extract_alternative)
        .collect::<Result<Vec<_>>>()?;

    Ok(RuleDefinition { name, alternatives })
}

fn rules_from_tree(tree: &Node) -> Result<GrammarTable> {
    tree.children_of_kind("rule").map(rule_from_node).collect()
}

pub fn compile(source: &str) -> CompileResult<GrammarTable> {
    compile_with(source, &CompileOptions::default())
}

/// Compiles BNF source into rules, in the order they are written.
///
/// Every failure aborts the whole compilation. A grammar without an `EOL`
/// rule gets one appended, shaped according to `options.eol`.
pub fn compile_with(source: &str, options: &CompileOptions) -> CompileResult<GrammarTable> {
    let tree = BOOTSTRAP_PARSER.get_ast(source).ok_or_else(|| CompileError {
        location: Location::whole(),
        error: CompileErrorType::ParseFailure(source.to_string())
    })?;

    if let Some(diagnostic) = tree.errors.first() {
        return Err(CompileError {
            location: diagnostic.location,
            error: CompileErrorType::GrammarSyntaxError(diagnostic.clone())
        });
    }

    let mut rules = rules_from_tree(&tree)
        .map_err(|error| CompileError { location: Location::whole(), error })?;

    if !rules.iter().any(|rule| rule.name == "EOL") {
        debug!("No `EOL` rule defined, appending one ({:?})", options.eol);
        rules.push(synthesized_eol(options.eol));
    }

    debug!("Compiled {} rules", rules.len());
    Ok(rules)
}

/// Compiles `source` and builds an engine for the language it describes.
/// The options are handed to the engine untouched.
pub fn build_parser(source: &str, options: ParserOptions) -> CompileResult<Parser> {
    build_parser_with(source, &CompileOptions::default(), options)
}

pub fn build_parser_with(source: &str, compile_options: &CompileOptions, options: ParserOptions) -> CompileResult<Parser> {
    let rules = compile_with(source, compile_options)?;
    Ok(Parser::new(&rules, options))
}
