/*
    This module is for storing and inspecting compiled grammars
*/

use std::fmt::Display;

use itertools::Itertools;

// A single term of an alternative, kept in its source form: either a quoted
// literal with its delimiters (`"::="`, `'"'`) or a bare nonterminal name.
// Hand-written tables may follow either form with a repetition suffix.
pub type TermRef = String;

// The terms of a single alternative, in source order
pub type Alternative = Vec<TermRef>;

// One nonterminal and its ordered alternatives
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RuleDefinition {
    pub name: String,
    pub alternatives: Vec<Alternative>,
}

// An ordered list of rules. Names are not required to be unique.
pub type GrammarTable = Vec<RuleDefinition>;

impl RuleDefinition {
    pub fn new(name: impl Into<String>, alternatives: Vec<Alternative>) -> Self {
        RuleDefinition {
            name: name.into(),
            alternatives,
        }
    }
}

// Renders a rule back to BNF, e.g. `<list> ::= <term> " "* <list> | <term>`
impl Display for RuleDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let alternatives = self.alternatives
            .iter()
            .map(|alternative| alternative.iter().map(|term| render_term(term)).join(" "))
            .join(" | ");
        write!(f, "<{}> ::= {}", self.name, alternatives)
    }
}

fn render_term(term: &str) -> String {
    let (base, repetition) = split_repetition(term);
    match Symbol::from_term(base) {
        Symbol::Terminal(_) => term.to_string(),
        Symbol::Nonterminal(name) => format!("<{}>{}", name, repetition.suffix()),
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Repetition {
    Once,
    Optional,
    ZeroOrMore,
    OneOrMore,
}

impl Repetition {
    pub fn suffix(self) -> &'static str {
        match self {
            Repetition::Once => "",
            Repetition::Optional => "?",
            Repetition::ZeroOrMore => "*",
            Repetition::OneOrMore => "+",
        }
    }
}

fn quote_of(term: &str) -> Option<char> {
    term.chars().next().filter(|&c| c == '"' || c == '\'')
}

/// Separates a repetition suffix from a term.
///
/// A suffix only counts when it follows a bare name or the closing delimiter
/// of a literal, so `"*"` is a literal star while `" "*` is any number of
/// spaces.
pub fn split_repetition(term: &str) -> (&str, Repetition) {
    let repetition = match term.chars().last() {
        Some('*') => Repetition::ZeroOrMore,
        Some('+') => Repetition::OneOrMore,
        Some('?') => Repetition::Optional,
        _ => return (term, Repetition::Once),
    };
    let base = &term[..term.len() - 1];

    let is_suffix = match quote_of(term) {
        Some(quote) => base.len() >= 2 && base.ends_with(quote),
        None => !base.is_empty(),
    };

    if is_suffix {
        (base, repetition)
    } else {
        (term, Repetition::Once)
    }
}

// The base unit in a grammar rule, once the source form has been decoded
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    /// Classifies a term without its repetition suffix. Quoting is the only
    /// thing that makes a terminal; terminal text has its delimiters removed
    /// and escapes decoded.
    pub fn from_term(term: &str) -> Symbol {
        match quote_of(term) {
            Some(quote) if term.len() >= 2 && term.ends_with(quote) => {
                Symbol::Terminal(unescape(&term[1..term.len() - 1]))
            }
            _ => Symbol::Nonterminal(term.to_string()),
        }
    }
}

fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('r') => result.push('\r'),
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            // A trailing backslash stands for itself
            None => result.push('\\'),
        }
    }

    result
}
