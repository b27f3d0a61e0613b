use std::collections::HashSet;

use itertools::Itertools;

use crate::grammar::{split_repetition, Alternative, RuleDefinition, Symbol};

fn get_alternative_references(alternative: &Alternative) -> impl Iterator<Item = String> + '_ {
    // Filter out everything but nonterminals and unwrap the name from each
    alternative.iter()
        .filter_map(|term| match Symbol::from_term(split_repetition(term).0) {
            Symbol::Nonterminal(name) => Some(name),
            Symbol::Terminal(_) => None
        })
}

/// Nonterminals referenced by some alternative but defined by no rule, in
/// order of first use.
pub fn undefined_references(rules: &[RuleDefinition]) -> Vec<String> {
    let defined = rules.iter().map(|rule| rule.name.as_str()).collect::<HashSet<_>>();

    // Flatten every alternative of every rule into its references, then keep
    // the ones nothing defines
    rules.iter()
        .flat_map(|rule| rule.alternatives.iter())
        .flat_map(get_alternative_references)
        .filter(|name| !defined.contains(name.as_str()))
        .unique()
        .collect()
}
