use super::{CompileErrorType, Result};

pub const SEPARATOR: &str = "::=";
pub const ALTERNATION: &str = "|";
pub const QUOTE: char = '"';
pub const ESCAPE: char = '\\';
const COMMENT_MARKERS: [&str; 2] = ["//", "#"];

// Byte offsets where `pattern` starts outside of a quoted terminal. An
// escaped quote outside a terminal does not open one
fn unquoted_matches<'a>(text: &'a str, pattern: &'a str) -> impl Iterator<Item = usize> + 'a {
    let mut quoted = false;

    text.char_indices().filter_map(move |(i, c)| {
        if c == QUOTE {
            quoted = !quoted && !text[..i].ends_with(ESCAPE);
            return None;
        }
        (!quoted && text[i..].starts_with(pattern)).then_some(i)
    })
}

fn unquoted_find(text: &str, pattern: &str) -> Option<usize> {
    unquoted_matches(text, pattern).next()
}

fn unquoted_split<'a>(text: &'a str, pattern: &'a str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for i in unquoted_matches(text, pattern) {
        parts.push(&text[start..i]);
        start = i + pattern.len();
    }
    parts.push(&text[start..]);

    parts
}

// A production as written in the source, continuation lines joined
#[derive(PartialEq, Debug)]
pub struct RawProduction {
    pub text: String,
    // Line the production starts on, counting from 1
    pub line: usize
}

impl RawProduction {
    // Splits into the head text and the trimmed alternatives
    pub fn split(&self) -> Result<(&str, Vec<&str>)> {
        let at = unquoted_find(&self.text, SEPARATOR)
            .ok_or_else(|| CompileErrorType::MissingSeparator(self.text.clone()))?;
        let (head, rewrite) = (&self.text[..at], &self.text[at + SEPARATOR.len()..]);

        let alternatives = unquoted_split(rewrite, ALTERNATION).into_iter().map(str::trim).collect();

        Ok((head.trim(), alternatives))
    }
}

pub fn strip_comment(line: &str) -> &str {
    let end = COMMENT_MARKERS.iter()
        .filter_map(|marker| unquoted_find(line, marker))
        .min()
        .unwrap_or(line.len());

    &line[..end]
}

pub fn split_productions(source: &str) -> Vec<RawProduction> {
    let mut productions: Vec<RawProduction> = Vec::new();

    for (num, line) in source.lines().enumerate() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if unquoted_find(line, SEPARATOR).is_none() {
            if let Some(current) = productions.last_mut() {
                current.text.push(' ');
                current.text.push_str(line);
                continue;
            }
        }

        // A new production, or text before the first one which will fail
        // when split
        productions.push(RawProduction {
            text: line.to_string(),
            line: num + 1
        });
    }

    productions
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn raw(text: &str, line: usize) -> RawProduction {
        RawProduction {
            text: text.to_string(),
            line
        }
    }

    #[test]
    fn strip_comments() {
        let lines = vec![
            "<a> ::= x # comment",
            "<a> ::= x // comment",
            "<a> ::= x // one # two",
            "<a> ::= x # one // two",
            "# whole line",
            "<a> ::= x",
            "<a> ::= \"#\" \"//\" # comment"
        ];
        let answers = vec![
            "<a> ::= x ",
            "<a> ::= x ",
            "<a> ::= x ",
            "<a> ::= x ",
            "",
            "<a> ::= x",
            "<a> ::= \"#\" \"//\" "
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(strip_comment(line), answer);
        }
    }

    #[test]
    fn join_continuation_lines() {
        let source = "\
<expr> ::= <term>
    | <expr> - <term>   # subtraction

// numbers
<term> ::= 1
";
        assert_eq!(split_productions(source), vec![
            raw("<expr> ::= <term> | <expr> - <term>", 1),
            raw("<term> ::= 1", 5)
        ]);
    }

    #[test]
    fn text_before_first_production() {
        let productions = split_productions("stray text\n<a> ::= x");
        assert_eq!(productions, vec![
            raw("stray text", 1),
            raw("<a> ::= x", 2)
        ]);
        assert_eq!(
            productions[0].split(),
            Err(CompileErrorType::MissingSeparator("stray text".to_string()))
        );
    }

    #[test]
    fn split_normal_production() {
        let production = raw("<a> ::= x <b> |  ε | y ::= z", 1);
        assert_eq!(production.split().unwrap(), ("<a>", vec!["x <b>", "ε", "y ::= z"]));
    }

    #[test]
    fn split_skips_quoted_text() {
        let production = raw("<a> ::= \"|\" | \"::=\" x | \\\" | y", 1);
        assert_eq!(production.split().unwrap(), ("<a>", vec!["\"|\"", "\"::=\" x", "\\\"", "y"]));
    }

    #[test]
    fn quoted_separator_is_a_continuation() {
        let source = "<op> ::= \"+\"\n    | \"::=\"";
        assert_eq!(split_productions(source), vec![raw("<op> ::= \"+\" | \"::=\"", 1)]);
    }

    #[test]
    fn split_empty_rewrite() {
        let production = raw("<a> ::=", 1);
        assert_eq!(production.split().unwrap(), ("<a>", vec![""]));
    }
}
