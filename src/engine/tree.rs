use std::fmt::Display;

use crate::error_handling::Location;

// A problem the engine found while matching, attached to the tree root
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub location: Location,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A node of a parse tree. `kind` is the name of the rule that produced it
/// and `text` the exact slice of input it matched (`start..end`, in bytes).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Node {
    pub kind: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub children: Vec<Node>,
    pub errors: Vec<Diagnostic>,
}

impl Node {
    /// The immediate children produced by rule `kind`, in input order.
    /// Grandchildren are never inspected.
    pub fn children_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    pub fn first_child_of_kind(&self, kind: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.kind == kind)
    }

    fn write_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        writeln!(f, "{:indent$}{} {:?}", "", self.kind, self.text, indent = depth * 2)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_indented(f, 0)
    }
}
