use crate::grammar::{split_repetition, Repetition, Symbol};

// A term decoded once at parser construction so matching never re-parses
// the source strings
#[derive(Debug, PartialEq, Clone)]
pub struct Term {
    pub symbol: Symbol,
    pub repetition: Repetition,
    // Source form without the suffix, used when reporting expectations
    pub display: String,
}

impl Term {
    pub fn decode(term: &str) -> Term {
        let (base, repetition) = split_repetition(term);
        Term {
            symbol: Symbol::from_term(base),
            repetition,
            display: base.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decode_terms() {
        let terms = vec!["\" \"*", "rule+", "\"\\n\"", "'\"'", "rule-name"];
        let answers = vec![
            (Symbol::Terminal(" ".to_string()), Repetition::ZeroOrMore, "\" \""),
            (Symbol::Nonterminal("rule".to_string()), Repetition::OneOrMore, "rule"),
            (Symbol::Terminal("\n".to_string()), Repetition::Once, "\"\\n\""),
            (Symbol::Terminal("\"".to_string()), Repetition::Once, "'\"'"),
            (Symbol::Nonterminal("rule-name".to_string()), Repetition::Once, "rule-name")
        ];

        for (term, (symbol, repetition, display)) in zip(terms, answers) {
            assert_eq!(Term::decode(term), Term { symbol, repetition, display: display.to_string() });
        }
    }
}
