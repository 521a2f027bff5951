use serde::Serialize;
use unscanny::Scanner;

use crate::error::LexerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Word,
    Newline,
    EOF,
}

/// Byte range into the source, `end` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn join(&self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }

    fn end(pos: usize) -> Self {
        Self::new(TokenKind::EOF, pos, pos)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-' | '_')
}

pub(crate) struct Lexer<'s> {
    s: Scanner<'s>,
}

impl<'s> Lexer<'s> {
    pub fn new(input: &'s str) -> Self {
        Lexer {
            s: Scanner::new(input),
        }
    }

    fn skip_blanks(&mut self) {
        loop {
            self.s.eat_while(|c: char| c.is_whitespace() && c != '\n');
            if self.s.eat_if('#') {
                // comment runs to the end of the line
                self.s.eat_until('\n');
            } else {
                break;
            }
        }
    }

    fn word(&mut self, start: usize) -> Token {
        self.s.eat_while(is_word_char);
        Token::new(TokenKind::Word, start, self.s.cursor() - 1)
    }

    pub fn next(&mut self) -> Result<Token, LexerError> {
        self.skip_blanks();
        let start = self.s.cursor();
        match self.s.eat() {
            Some('\n') => Ok(Token::new(TokenKind::Newline, start, start)),
            Some(c) if is_word_char(c) => Ok(self.word(start)),
            Some(ch) => Err(LexerError::UnexpectedCharacter {
                ch,
                span: Span::new(start, self.s.cursor() - 1),
            }),
            None => Ok(Token::end(start)),
        }
    }
}

pub(crate) fn token_text<'a>(src: &'a str, t: &Token) -> &'a str {
    &src[t.span.start..=t.span.end]
}
