/*
    This module matches text against a rule table and builds parse trees
*/

pub mod term;
pub mod tree;
pub mod verifier;

use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, warn};

use crate::error_handling::Location;
use crate::grammar::{Repetition, RuleDefinition, Symbol};
use term::Term;
pub use tree::{Diagnostic, Node};

pub const DEFAULT_MAX_DEPTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    // Rule to start matching from (default: the first rule)
    pub start: Option<String>,
    // How deeply rules may nest before a match attempt is abandoned
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            start: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug)]
struct CompiledRule {
    name: String,
    fragment: bool,
    alternatives: Vec<Vec<Term>>,
}

/// A backtracking matcher for any rule table.
///
/// Alternatives are tried in order and the first that matches wins;
/// repetitions are greedy and never give input back. Rules whose names are
/// all uppercase (`RULE_EOL`, `EOL`) are fragments: their text belongs to the
/// enclosing node and they add no node of their own.
#[derive(Debug)]
pub struct Parser {
    rules: Vec<CompiledRule>,
    // Later definitions of a name shadow earlier ones
    lookup: HashMap<String, usize>,
    options: ParserOptions,
}

fn is_fragment(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

impl Parser {
    pub fn new(rules: &[RuleDefinition], options: ParserOptions) -> Parser {
        for name in verifier::undefined_references(rules) {
            warn!("Nonterminal `{}` is referenced but never defined", name);
        }

        let rules = rules.iter()
            .map(|rule| CompiledRule {
                name: rule.name.clone(),
                fragment: is_fragment(&rule.name),
                alternatives: rule.alternatives
                    .iter()
                    .map(|alternative| alternative.iter().map(|term| Term::decode(term)).collect())
                    .collect(),
            })
            .collect_vec();

        let lookup = rules.iter()
            .enumerate()
            .map(|(i, rule)| (rule.name.clone(), i))
            .collect();

        Parser { rules, lookup, options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses `text` from the configured start rule, or the first rule.
    ///
    /// Returns `None` when the start rule does not match at all. When it
    /// matches but leaves input behind, the returned root carries a
    /// diagnostic describing where matching stopped.
    pub fn get_ast(&self, text: &str) -> Option<Node> {
        match &self.options.start {
            Some(start) => self.get_ast_from(text, start),
            None => {
                let first = self.rules.first()?;
                self.parse_rule(text, self.lookup[&first.name])
            }
        }
    }

    pub fn get_ast_from(&self, text: &str, start: &str) -> Option<Node> {
        match self.lookup.get(start) {
            Some(&index) => self.parse_rule(text, index),
            None => {
                warn!("Start rule `{}` is not defined", start);
                None
            }
        }
    }

    fn parse_rule(&self, text: &str, index: usize) -> Option<Node> {
        let mut run = Run::new(self, text);
        let rule = &self.rules[index];

        // The root always gets a node, even when its rule is a fragment
        let (end, children) = run.match_alternatives(index, 0)?;
        let mut root = Node {
            kind: rule.name.clone(),
            text: text[..end].to_string(),
            start: 0,
            end,
            children,
            errors: Vec::new(),
        };

        if end < text.len() {
            root.errors.push(run.unexpected_input(end));
        }
        if run.depth_exceeded {
            root.errors.push(Diagnostic {
                message: format!("Rules nested deeper than {} levels", self.options.max_depth),
                location: Location::whole(),
            });
        }

        debug!("Parsed {} of {} bytes from `{}` with {} errors", end, text.len(), rule.name, root.errors.len());
        Some(root)
    }
}

type Match = Option<(usize, Vec<Node>)>;

// The mutable state of one call to `get_ast`
struct Run<'p, 't> {
    parser: &'p Parser,
    text: &'t str,
    depth: usize,
    depth_exceeded: bool,
    // Furthest offset a literal failed at, and what was expected there
    furthest: usize,
    expected: Vec<String>,
}

impl<'p, 't> Run<'p, 't> {
    fn new(parser: &'p Parser, text: &'t str) -> Self {
        Run {
            parser,
            text,
            depth: 0,
            depth_exceeded: false,
            furthest: 0,
            expected: Vec::new(),
        }
    }

    // Matches a rule without wrapping the result in a node of its own
    fn match_alternatives(&mut self, index: usize, pos: usize) -> Match {
        if self.depth >= self.parser.options.max_depth {
            self.depth_exceeded = true;
            return None;
        }

        let parser = self.parser;
        self.depth += 1;
        let found = parser.rules[index].alternatives
            .iter()
            .find_map(|alternative| self.match_sequence(alternative, pos));
        self.depth -= 1;
        found
    }

    fn match_rule(&mut self, index: usize, pos: usize) -> Match {
        let (end, children) = self.match_alternatives(index, pos)?;

        let rule = &self.parser.rules[index];
        if rule.fragment {
            return Some((end, children));
        }

        Some((end, vec![Node {
            kind: rule.name.clone(),
            text: self.text[pos..end].to_string(),
            start: pos,
            end,
            children,
            errors: Vec::new(),
        }]))
    }

    fn match_sequence(&mut self, terms: &[Term], pos: usize) -> Match {
        let mut cursor = pos;
        let mut nodes = Vec::new();

        for term in terms {
            let (end, mut found) = self.match_term(term, cursor)?;
            cursor = end;
            nodes.append(&mut found);
        }

        Some((cursor, nodes))
    }

    fn match_term(&mut self, term: &Term, pos: usize) -> Match {
        match term.repetition {
            Repetition::Once => self.match_symbol(term, pos),
            Repetition::Optional => self.match_symbol(term, pos).or(Some((pos, Vec::new()))),
            Repetition::ZeroOrMore | Repetition::OneOrMore => {
                let mut cursor = pos;
                let mut nodes = Vec::new();
                let mut count = 0;

                while let Some((end, mut found)) = self.match_symbol(term, cursor) {
                    count += 1;
                    nodes.append(&mut found);
                    // An empty match would repeat forever
                    if end == cursor {
                        break;
                    }
                    cursor = end;
                }

                if term.repetition == Repetition::OneOrMore && count == 0 {
                    None
                } else {
                    Some((cursor, nodes))
                }
            }
        }
    }

    fn match_symbol(&mut self, term: &Term, pos: usize) -> Match {
        match &term.symbol {
            Symbol::Terminal(literal) => {
                if self.text[pos..].starts_with(literal.as_str()) {
                    Some((pos + literal.len(), Vec::new()))
                } else {
                    self.expect(pos, &term.display);
                    None
                }
            }
            Symbol::Nonterminal(name) => {
                let index = *self.parser.lookup.get(name)?;
                self.match_rule(index, pos)
            }
        }
    }

    fn expect(&mut self, pos: usize, display: &str) {
        if pos > self.furthest {
            self.furthest = pos;
            self.expected.clear();
        }
        if pos == self.furthest && !self.expected.iter().any(|e| e == display) {
            self.expected.push(display.to_string());
        }
    }

    fn unexpected_input(&self, end: usize) -> Diagnostic {
        let at = self.furthest.max(end);
        let found = self.text[at..].chars().take_while(|&c| c != '\n' && c != '\r').take(20).collect::<String>();
        let found = if found.is_empty() { "end of line".to_string() } else { format!("`{}`", found) };

        let message = if at == self.furthest && !self.expected.is_empty() {
            format!("Unexpected input {}, expected one of {}", found, self.expected.join(", "))
        } else {
            format!("Unexpected input {}", found)
        };

        Diagnostic {
            message,
            location: Location::of_offset(self.text, at),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rule(name: &str, alternatives: &[&[&str]]) -> RuleDefinition {
        RuleDefinition::new(
            name,
            alternatives.iter().map(|a| a.iter().map(|t| t.to_string()).collect()).collect(),
        )
    }

    fn kinds(node: &Node) -> Vec<&str> {
        node.children.iter().map(|child| child.kind.as_str()).collect()
    }

    fn greeting() -> Parser {
        Parser::new(&[
            rule("greeting", &[&["word", "\" \"*", "name", "PUNCT?"]]),
            rule("word", &[&["\"hello\""], &["\"hi\""]]),
            rule("name", &[&["LETTER+"]]),
            rule("LETTER", &[&["\"a\""], &["\"b\""], &["\"c\""]]),
            rule("PUNCT", &[&["\"!\""]])
        ], ParserOptions::default())
    }

    #[test]
    fn builds_nodes_for_named_rules() {
        let tree = greeting().get_ast("hello  cab!").unwrap();

        assert_eq!(tree.kind, "greeting");
        assert_eq!(tree.text, "hello  cab!");
        assert_eq!(tree.errors, vec![]);
        assert_eq!(kinds(&tree), vec!["word", "name"]);

        let name = tree.first_child_of_kind("name").unwrap();
        assert_eq!((name.text.as_str(), name.start, name.end), ("cab", 7, 10));
        // Fragments leave no nodes behind
        assert!(name.children.is_empty());
    }

    #[test]
    fn ordered_choice() {
        let parser = Parser::new(&[
            rule("start", &[&["\"a\""], &["\"a\"", "\"b\""]])
        ], ParserOptions::default());

        // The first alternative wins even though the second would consume more
        let tree = parser.get_ast("ab").unwrap();
        assert_eq!(tree.end, 1);
        assert_eq!(tree.errors.len(), 1);
    }

    #[test]
    fn failed_alternatives_leave_no_nodes() {
        let parser = Parser::new(&[
            rule("start", &[&["item", "\";\""], &["item", "\".\""]]),
            rule("item", &[&["\"x\""]])
        ], ParserOptions::default());

        let tree = parser.get_ast("x.").unwrap();
        assert_eq!(kinds(&tree), vec!["item"]);
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(greeting().get_ast("bye"), None);
        // One-or-more needs at least one
        assert_eq!(greeting().get_ast("hi !"), None);
    }

    #[test]
    fn trailing_input_is_a_diagnostic() {
        let tree = greeting().get_ast("hi ab!?").unwrap();

        assert_eq!(tree.text, "hi ab!");
        assert_eq!(tree.errors.len(), 1);
        assert_eq!(tree.errors[0].location, Location { line: 1, column: 7 });
        assert!(tree.errors[0].message.contains("`?`"), "{}", tree.errors[0].message);
    }

    #[test]
    fn diagnostic_lists_expectations() {
        let parser = Parser::new(&[
            rule("lines", &[&["line+"]]),
            rule("line", &[&["\"a\"", "\";\"", "\"\\n\""]])
        ], ParserOptions::default());

        let tree = parser.get_ast("a;\na,\n").unwrap();
        assert_eq!(tree.errors[0].location, Location { line: 2, column: 2 });
        assert_eq!(tree.errors[0].message, "Unexpected input `,`, expected one of \";\"");
    }

    #[test]
    fn explicit_start_rule() {
        let options = ParserOptions { start: Some("word".to_string()), ..ParserOptions::default() };
        let parser = Parser::new(&[
            rule("greeting", &[&["word", "\" \"", "word"]]),
            rule("word", &[&["\"hi\""]])
        ], options);

        assert_eq!(parser.get_ast("hi").unwrap().kind, "word");
        assert_eq!(parser.get_ast_from("hi hi", "greeting").unwrap().errors, vec![]);
        assert_eq!(parser.get_ast_from("hi", "nothing"), None);
    }

    #[test]
    fn later_definitions_shadow_earlier_ones() {
        let parser = Parser::new(&[
            rule("start", &[&["item"]]),
            rule("item", &[&["\"a\""]]),
            rule("item", &[&["\"b\""]])
        ], ParserOptions::default());

        assert_eq!(parser.get_ast("b").unwrap().errors, vec![]);
        assert_eq!(parser.get_ast("a"), None);
    }

    #[test]
    fn empty_repetition_terminates() {
        let parser = Parser::new(&[
            rule("start", &[&["maybe*", "\"x\""]]),
            rule("maybe", &[&["\"\""]])
        ], ParserOptions::default());

        assert_eq!(parser.get_ast("x").unwrap().errors, vec![]);
    }

    #[test]
    fn left_recursion_hits_depth_limit() {
        let options = ParserOptions { max_depth: 64, ..ParserOptions::default() };
        let parser = Parser::new(&[
            rule("start", &[&["start", "\"a\""], &["\"a\""]])
        ], options);

        // Whatever prefix survives, the cut-off is reported rather than overflowing
        if let Some(tree) = parser.get_ast("aaa") {
            assert!(tree.errors.iter().any(|e| e.location == Location::whole()));
        }
    }

    #[test]
    fn depth_limit_reported_when_root_matches() {
        let options = ParserOptions { max_depth: 4, ..ParserOptions::default() };
        let parser = Parser::new(&[
            rule("start", &[&["nest"], &["\"a\""]]),
            rule("nest", &[&["nest"]])
        ], options);

        let tree = parser.get_ast("a").unwrap();
        assert_eq!(tree.errors.len(), 1);
        assert_eq!(tree.errors[0].location, Location::whole());
    }

    #[test]
    fn undefined_reference_fails_to_match() {
        let parser = Parser::new(&[
            rule("start", &[&["missing"], &["\"z\""]])
        ], ParserOptions::default());

        assert_eq!(parser.get_ast("z").unwrap().errors, vec![]);
    }

    #[test]
    fn fragment_names() {
        assert!(is_fragment("EOL"));
        assert!(is_fragment("RULE_CHARACTER1"));
        assert!(!is_fragment("rule-name"));
        assert!(!is_fragment("Rule"));
        assert!(!is_fragment("_1"));
    }
}
