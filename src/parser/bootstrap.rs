/*
    The grammar of BNF itself, written in the same rule form the compiler
    produces. Unlike compiled grammars it uses repetition suffixes.
*/

use lazy_static::lazy_static;

use crate::engine::{Parser, ParserOptions};
use crate::grammar::{GrammarTable, RuleDefinition};

fn rule(name: &str, alternatives: &[&[&str]]) -> RuleDefinition {
    RuleDefinition::new(
        name,
        alternatives.iter()
            .map(|alternative| alternative.iter().map(|term| term.to_string()).collect())
            .collect(),
    )
}

// One single-literal alternative per character
fn one_of(name: &str, characters: &str) -> RuleDefinition {
    RuleDefinition::new(
        name,
        characters.chars()
            .map(|c| match c {
                '\\' => vec![r#""\\""#.to_string()],
                c => vec![format!("\"{}\"", c)],
            })
            .collect(),
    )
}

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = r"-_!#$%&()*+,./:;<=>?@[\]^`{|}~";

lazy_static! {
    pub static ref BOOTSTRAP: GrammarTable = vec![
        rule("syntax", &[
            &["RULE_EOL*", "rule+"]
        ]),
        rule("rule", &[
            &[r#"" "*"#, r#""<""#, "rule-name", r#"">""#, r#"" "*"#, r#""::=""#,
              "firstExpression", "otherExpression*", r#"" "*"#, "RULE_EOL+", r#"" "*"#]
        ]),
        rule("firstExpression", &[
            &[r#"" "*"#, "list"]
        ]),
        rule("otherExpression", &[
            &[r#"" "*"#, r#""|""#, r#"" "*"#, "list"]
        ]),
        rule("RULE_EOL", &[
            &[r#""\r""#],
            &[r#""\n""#]
        ]),
        rule("list", &[
            &["term", r#"" "*"#, "list"],
            &["term"]
        ]),
        rule("term", &[
            &["literal"],
            &[r#""<""#, "rule-name", r#"">""#]
        ]),
        rule("literal", &[
            &[r#"'"'"#, "RULE_CHARACTER1*", r#"'"'"#],
            &[r#""'""#, "RULE_CHARACTER2*", r#""'""#]
        ]),
        rule("RULE_CHARACTER", &[
            &[r#"" ""#],
            &["RULE_LETTER"],
            &["RULE_DIGIT"],
            &["RULE_SYMBOL"]
        ]),
        one_of("RULE_LETTER", LETTERS),
        one_of("RULE_DIGIT", DIGITS),
        one_of("RULE_SYMBOL", SYMBOLS),
        // Escapes come first so a backslash never ends up as a plain symbol
        // right before the delimiter it escapes
        rule("RULE_CHARACTER1", &[
            &["RULE_ESCAPE1"],
            &["RULE_CHARACTER"],
            &[r#""'""#]
        ]),
        rule("RULE_ESCAPE1", &[
            &[r#""\\""#, r#""\\""#],
            &[r#""\\""#, r#"'"'"#]
        ]),
        rule("RULE_CHARACTER2", &[
            &["RULE_ESCAPE2"],
            &["RULE_CHARACTER"],
            &[r#"'"'"#]
        ]),
        rule("RULE_ESCAPE2", &[
            &[r#""\\""#, r#""\\""#],
            &[r#""\\""#, r#""'""#]
        ]),
        rule("rule-name", &[
            &["RULE_LETTER", "RULE_CHAR*"]
        ]),
        rule("RULE_CHAR", &[
            &["RULE_LETTER"],
            &["RULE_DIGIT"],
            &[r#""_""#],
            &[r#""-""#]
        ]),
    ];

    /// The engine instance every compilation shares. Built on first use and
    /// read-only afterwards.
    pub static ref BOOTSTRAP_PARSER: Parser = Parser::new(&BOOTSTRAP, ParserOptions::default());
}
