pub mod error;
mod lexer;
mod parser;

pub use error::ProblemError;
pub use lexer::Span;
pub use parser::Problem;

use crate::parser::Parser;

/// Parse a problem description:
///
/// ```text
/// n m
/// a b weight      (m candidate edges)
/// q               (optional from here on)
/// u v weight      (q query edges)
/// ```
///
/// Blank lines are ignored and `#` starts a comment.
pub fn parse(input: &str) -> Result<Problem, ProblemError> {
    Parser::new(input).parse()
}

/// The line of `src` containing `span.start`, for error rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDiagnostic {
    pub line_start: usize,
    pub line_end: usize,
    pub line_no: usize,
}

impl LineDiagnostic {
    pub fn new(src: &str, span: Span) -> Option<Self> {
        if span.start > src.len() {
            return None;
        }
        let line_start = src[..span.start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = src[span.start..]
            .find('\n')
            .map_or(src.len(), |i| span.start + i);
        let line_no = src[..line_start].matches('\n').count() + 1;
        Some(Self {
            line_start,
            line_end,
            line_no,
        })
    }
}
