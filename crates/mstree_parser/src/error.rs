use thiserror::Error;

use crate::Span;

#[derive(Debug, Error, PartialEq)]
pub enum ProblemError {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Parser(#[from] ParserError),
}

impl ProblemError {
    pub fn error_span(&self) -> Option<Span> {
        match self {
            ProblemError::Lexer(le) => match le {
                LexerError::UnexpectedCharacter { span, .. } => Some(*span),
            },
            ProblemError::Parser(pe) => match pe {
                ParserError::WrongArity { span, .. }
                | ParserError::InvalidCount { span, .. }
                | ParserError::InvalidVertexId { span, .. }
                | ParserError::InvalidWeight { span, .. }
                | ParserError::TrailingInput { span } => Some(*span),
                ParserError::UnexpectedEof { .. } | ParserError::EmptyInput => None,
            },
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LexerError {
    #[error("unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char, span: Span },
}

#[derive(Debug, Error, PartialEq)]
pub enum ParserError {
    #[error("empty input")]
    EmptyInput,

    #[error("expected {expected} values on this line, found {found}")]
    WrongArity {
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("invalid count '{lexeme}'")]
    InvalidCount { lexeme: String, span: Span },

    #[error("invalid vertex id '{lexeme}'")]
    InvalidVertexId { lexeme: String, span: Span },

    #[error("invalid weight '{lexeme}'")]
    InvalidWeight { lexeme: String, span: Span },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("unexpected input after the last query")]
    TrailingInput { span: Span },
}
