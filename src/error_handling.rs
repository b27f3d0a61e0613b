use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {}

// A position in some source text. Line 0 stands for the source as a whole.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize
}

impl Location {
    // The whole source rather than a point inside it
    pub fn whole() -> Self {
        Location { line: 0, column: 0 }
    }

    /// Computes the 1-based line and column of a byte offset into `text`.
    /// Offsets past the end are clamped to the end of the text.
    pub fn of_offset(text: &str, offset: usize) -> Self {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }

        let before = &text[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;

        Location { line, column }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "source")
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType + std::fmt::Debug> std::error::Error for Error<T> {}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn locate_offsets() {
        let text = "<a> ::= \"x\"\n<b> \"y\"\n";
        let offsets = vec![0, 4, 12, 16, 100];
        let answers = vec![
            Location { line: 1, column: 1 },
            Location { line: 1, column: 5 },
            Location { line: 2, column: 1 },
            Location { line: 2, column: 5 },
            Location { line: 3, column: 1 }
        ];

        for (offset, answer) in zip(offsets, answers) {
            assert_eq!(Location::of_offset(text, offset), answer);
        }
    }

    #[test]
    fn locate_counts_characters_not_bytes() {
        assert_eq!(Location::of_offset("é=x", 3), Location { line: 1, column: 3 });
        // Offset inside a multibyte character snaps back to its start
        assert_eq!(Location::of_offset("é", 1), Location { line: 1, column: 1 });
    }

    #[test]
    fn display_location() {
        assert_eq!(Location::whole().to_string(), "source");
        assert_eq!(Location { line: 3, column: 7 }.to_string(), "3:7");
    }
}
