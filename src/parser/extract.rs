use log::trace;

use super::{CompileErrorType, Result};
use crate::engine::Node;
use crate::grammar::{Alternative, TermRef};

// A term is a literal or a `<name>` reference. Literals keep their quotes,
// references lose their angle brackets.
pub fn resolve_term(term: &Node) -> Result<TermRef> {
    term.first_child_of_kind("literal")
        .or_else(|| term.first_child_of_kind("rule-name"))
        .map(|node| node.text.clone())
        .ok_or(CompileErrorType::MalformedTree("literal or rule-name"))
}

/// Collects the terms of one alternative in source order.
///
/// A `list` holds one term and at most one nested `list`, so only the
/// immediate children are read at each level; searching deeper would see the
/// nested terms twice.
pub fn extract_alternative(expression: &Node) -> Result<Alternative> {
    let mut terms = expression.children_of_kind("term")
        .map(resolve_term)
        .collect::<Result<Alternative>>()?;

    for list in expression.children_of_kind("list") {
        terms.extend(extract_alternative(list)?);
    }

    trace!("Extracted {:?} from `{}`", terms, expression.text);
    Ok(terms)
}
