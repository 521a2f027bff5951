use mstree_core::Edge;
use serde::Serialize;

use crate::error::{ParserError, ProblemError};
use crate::lexer::{Lexer, Span, Token, TokenKind, token_text};

/// A parsed problem: the candidate edges to build the tree from and the edges to
/// test against it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    pub vertex_count: usize,
    pub candidates: Vec<Edge>,
    pub queries: Vec<Edge>,
}

// the words of one non-empty line
struct Line {
    words: Vec<Token>,
    span: Span,
}

pub(crate) struct Parser<'s> {
    input: &'s str,
    lexer: Lexer<'s>,
    done: bool,
}

impl<'s> Parser<'s> {
    pub fn new(input: &'s str) -> Self {
        Self {
            input,
            lexer: Lexer::new(input),
            done: false,
        }
    }

    fn next_line(&mut self) -> Result<Option<Line>, ProblemError> {
        let mut words = vec![];
        while !self.done {
            let token = self.lexer.next()?;
            match token.kind {
                TokenKind::Word => words.push(token),
                TokenKind::Newline if words.is_empty() => {}
                TokenKind::Newline => break,
                TokenKind::EOF => self.done = true,
            }
        }

        let (Some(first), Some(last)) = (words.first(), words.last()) else {
            return Ok(None);
        };
        let span = first.span.join(last.span);
        Ok(Some(Line { words, span }))
    }

    fn expect_line(&mut self, arity: usize, expected: &'static str) -> Result<Line, ProblemError> {
        let line = self
            .next_line()?
            .ok_or(ParserError::UnexpectedEof { expected })?;
        if line.words.len() != arity {
            return Err(ParserError::WrongArity {
                expected: arity,
                found: line.words.len(),
                span: line.span,
            }
            .into());
        }
        Ok(line)
    }

    fn count(&self, token: &Token) -> Result<usize, ParserError> {
        let lexeme = token_text(self.input, token);
        lexeme.parse().map_err(|_| ParserError::InvalidCount {
            lexeme: lexeme.to_string(),
            span: token.span,
        })
    }

    fn vertex(&self, token: &Token) -> Result<usize, ParserError> {
        let lexeme = token_text(self.input, token);
        lexeme.parse().map_err(|_| ParserError::InvalidVertexId {
            lexeme: lexeme.to_string(),
            span: token.span,
        })
    }

    fn weight(&self, token: &Token) -> Result<f64, ParserError> {
        let lexeme = token_text(self.input, token);
        lexeme.parse().map_err(|_| ParserError::InvalidWeight {
            lexeme: lexeme.to_string(),
            span: token.span,
        })
    }

    fn edge(&self, line: &Line) -> Result<Edge, ParserError> {
        Ok(Edge::new(
            self.vertex(&line.words[0])?,
            self.vertex(&line.words[1])?,
            self.weight(&line.words[2])?,
        ))
    }

    fn edges(&mut self, count: usize, expected: &'static str) -> Result<Vec<Edge>, ProblemError> {
        // the count comes from the input, don't trust it for preallocation
        let mut edges = Vec::with_capacity(count.min(1 << 12));
        for _ in 0..count {
            let line = self.expect_line(3, expected)?;
            edges.push(self.edge(&line)?);
        }
        Ok(edges)
    }

    pub fn parse(&mut self) -> Result<Problem, ProblemError> {
        let header = self
            .next_line()?
            .ok_or(ParserError::EmptyInput)?;
        if header.words.len() != 2 {
            return Err(ParserError::WrongArity {
                expected: 2,
                found: header.words.len(),
                span: header.span,
            }
            .into());
        }
        let vertex_count = self.count(&header.words[0])?;
        let edge_count = self.count(&header.words[1])?;
        let candidates = self.edges(edge_count, "a candidate edge line 'a b weight'")?;

        // the query section is optional
        let queries = match self.next_line()? {
            None => vec![],
            Some(line) => {
                if line.words.len() != 1 {
                    return Err(ParserError::WrongArity {
                        expected: 1,
                        found: line.words.len(),
                        span: line.span,
                    }
                    .into());
                }
                let query_count = self.count(&line.words[0])?;
                self.edges(query_count, "a query line 'u v weight'")?
            }
        };

        if let Some(line) = self.next_line()? {
            return Err(ParserError::TrailingInput { span: line.span }.into());
        }

        Ok(Problem {
            vertex_count,
            candidates,
            queries,
        })
    }
}
