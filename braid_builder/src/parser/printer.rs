use crate::constant::*;
use crate::parser::ParseError;

fn pad_to(line: &mut String, column: usize) {
    let width = line.chars().count();
    // The description is always separated from the left column by at least one space.
    let padding = if width < column { column - width } else { 1 };
    line.extend(std::iter::repeat(' ').take(padding));
}

/// Render one leaf: the left column, the description, then each detail on a continuation line.
pub(crate) fn render_leaf(
    indent: usize,
    left: &str,
    description: &str,
    details: &[String],
) -> String {
    let mut out = " ".repeat(indent);
    out.push_str(left);

    if !description.is_empty() {
        pad_to(&mut out, LEAF_COLUMN_WIDTH);
        out.push_str(description);
    }

    for detail in details {
        out.push('\n');
        out.push_str(&" ".repeat(LEAF_COLUMN_WIDTH));
        out.push_str(detail);
    }

    out.push('\n');
    out
}

pub(crate) fn render_command(indent: usize, name: &str, description: &str) -> String {
    let mut out = " ".repeat(indent);
    out.push_str(name);

    if !description.is_empty() {
        pad_to(&mut out, COMMAND_COLUMN_WIDTH);
        out.push_str(description);
    }
    out.push('\n');
    out
}

/// Render a titled section whose body was rendered at `indent + SECTION_INDENT`.
pub(crate) fn render_section(indent: usize, title: &str, body: &str) -> String {
    let mut out = " ".repeat(indent);
    out.push_str(title);
    out.push_str(":\n");
    out.push_str(body);
    out
}

/// The input line of a failed parse, with a caret under the offending text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Point at the text which caused `error`, or past the end of the input when there is no such text.
    pub(crate) fn locate(error: &ParseError, tokens: &[&str]) -> Self {
        let end: usize = tokens.iter().map(|t| t.chars().count() + 1).sum();
        let offset = error
            .token()
            .and_then(|text| {
                let mut start = 0;

                for token in tokens {
                    let width = token.chars().count();

                    if *token == text {
                        return Some(start);
                    }

                    if !text.is_empty() && token.ends_with(&format!("{VALUE_SEPARATOR}{text}")) {
                        return Some(start + width - text.chars().count());
                    }

                    start += width + 1;
                }

                None
            })
            .unwrap_or(end.saturating_sub(1));

        Self::new(offset, tokens)
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projection = self.tokens.join(" ");
        let width = std::cmp::min(self.offset, projection.chars().count());

        write!(f, "{projection}\n{:width$}^", "")
    }
}
