//! Query lexer implementation.

use super::{lookup, Pos, Token, TokenKind};

/// A lexer that turns query text into tokens on demand.
///
/// The lexer holds one token of pushback: [`Lexer::unscan`] returns the most
/// recently scanned token so that the next [`Lexer::scan`] yields it again.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte offset.
    offset: usize,
    /// The line/char position of the next character.
    pos: Pos,
    /// The most recently scanned token.
    last: Option<Token>,
    /// A token pushed back by `unscan`.
    unread: Option<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            pos: Pos::new(0, 0),
            last: None,
            unread: None,
        }
    }

    /// Returns the next token, whitespace included.
    pub fn scan(&mut self) -> Token {
        let tok = match self.unread.take() {
            Some(tok) => tok,
            None => self.next_token(),
        };
        self.last = Some(tok.clone());
        tok
    }

    /// Returns the next non-whitespace token.
    pub fn scan_ignore_whitespace(&mut self) -> Token {
        let tok = self.scan();
        if tok.kind == TokenKind::Ws {
            return self.scan();
        }
        tok
    }

    /// Pushes the most recently scanned token back. Only one level is kept.
    pub fn unscan(&mut self) {
        if let Some(tok) = self.last.take() {
            self.unread = Some(tok);
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.offset..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        self.pos = self.pos.advance(c);
        Some(c)
    }

    /// Consumes the end-of-input marker. Each read past the end moves the
    /// column forward by one.
    fn consume_eof(&mut self) {
        self.pos.char += 1;
    }

    /// Scans the next token from the input.
    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let begin = self.offset;

        let Some(c) = self.advance() else {
            self.consume_eof();
            return Token::new(TokenKind::Eof, start, "");
        };

        match c {
            c if c.is_whitespace() => self.scan_whitespace(start, begin),
            c if c.is_alphabetic() || c == '_' => self.scan_identifier(start, begin),
            c if c.is_ascii_digit() => self.scan_number(start, begin),
            '"' | '\'' => self.scan_string(start, c),

            '+' => Token::new(TokenKind::Add, start, ""),
            '-' => Token::new(TokenKind::Sub, start, ""),
            '*' => Token::new(TokenKind::Mul, start, ""),
            '/' => Token::new(TokenKind::Div, start, ""),
            '=' => Token::new(TokenKind::Eq, start, ""),
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::LtEq, start, "")
                } else {
                    Token::new(TokenKind::Lt, start, "")
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::GtEq, start, "")
                } else {
                    Token::new(TokenKind::Gt, start, "")
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::NotEq, start, "")
                } else {
                    Token::new(TokenKind::Illegal, start, "!")
                }
            }
            '(' => Token::new(TokenKind::LeftParen, start, ""),
            ')' => Token::new(TokenKind::RightParen, start, ""),
            ',' => Token::new(TokenKind::Comma, start, ""),
            ';' => Token::new(TokenKind::Semicolon, start, ""),
            '.' => Token::new(TokenKind::Dot, start, ""),

            _ => Token::new(TokenKind::Illegal, start, c.to_string()),
        }
    }

    /// Scans a run of whitespace. A run that reaches the end of input
    /// consumes the end marker.
    fn scan_whitespace(&mut self, start: Pos, begin: usize) -> Token {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
        if self.peek().is_none() {
            self.consume_eof();
        }
        Token::new(TokenKind::Ws, start, &self.input[begin..self.offset])
    }

    /// Scans an identifier, keyword, word operator or boolean. An identifier
    /// that reaches the end of input consumes the end marker.
    fn scan_identifier(&mut self, start: Pos, begin: usize) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            self.advance();
        }
        if self.peek().is_none() {
            self.consume_eof();
        }

        let text = &self.input[begin..self.offset];
        Token::new(lookup(text), start, text)
    }

    /// Scans a number or, for an integer immediately followed by a unit, a
    /// duration literal.
    fn scan_number(&mut self, start: Pos, begin: usize) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
            return Token::new(TokenKind::Number, start, &self.input[begin..self.offset]);
        }

        match self.peek() {
            Some('u' | 'µ' | 's' | 'h' | 'd' | 'w') => {
                self.advance();
            }
            Some('m') => {
                self.advance();
                if self.peek() == Some('s') {
                    self.advance();
                }
            }
            _ => return Token::new(TokenKind::Number, start, &self.input[begin..self.offset]),
        }
        Token::new(TokenKind::DurationVal, start, &self.input[begin..self.offset])
    }

    /// Scans a quoted string. The opening quote has already been consumed.
    fn scan_string(&mut self, start: Pos, quote: char) -> Token {
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    return Token::new(TokenKind::String, start, value);
                }
                None | Some('\n') => {
                    return Token::new(TokenKind::BadString, start, value);
                }
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some('\'') => value.push('\''),
                    Some(other) => {
                        return Token::new(TokenKind::BadEscape, start, format!("\\{other}"));
                    }
                    None => {
                        return Token::new(TokenKind::BadString, start, value);
                    }
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// Scans the remaining input into tokens, ending with EOF.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
