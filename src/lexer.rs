use crate::ast::{Position, Token, TokenKind};

/// Lazy tokenizer over the raw query text.
///
/// Tokens are pulled one at a time with [`Lexer::next_token`]; once the
/// input is exhausted it keeps returning end-of-input tokens.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    offset: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            self.offset += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn pos(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a double-quoted string. There is no escape processing; the
    /// literal is the content with the quotes stripped. An unterminated
    /// string comes back as an unknown token for the parser to reject.
    fn read_string(&mut self, pos: Position) -> Token {
        self.advance(); // consume opening quote

        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '"' {
                return Token::new(TokenKind::String, result, pos);
            }
            result.push(ch);
        }

        Token::new(TokenKind::Unknown, format!("\"{}", result), pos)
    }

    /// Returns the next token, carrying the position at which it started.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let pos = self.pos();

        let Some(ch) = self.current_char() else {
            return Token::new(TokenKind::Eof, "", pos);
        };

        match ch {
            ';' => self.single(TokenKind::Semicolon, ch, pos),
            '.' => self.single(TokenKind::Period, ch, pos),
            '(' => self.single(TokenKind::LParen, ch, pos),
            ')' => self.single(TokenKind::RParen, ch, pos),
            '[' => self.single(TokenKind::LBracket, ch, pos),
            ']' => self.single(TokenKind::RBracket, ch, pos),
            '&' => self.paired(TokenKind::BitAnd, '&', TokenKind::CondAnd, pos),
            '|' => self.paired(TokenKind::BitOr, '|', TokenKind::CondOr, pos),
            '<' => self.paired(TokenKind::Lt, '=', TokenKind::LtEq, pos),
            '>' => self.paired(TokenKind::Gt, '=', TokenKind::GtEq, pos),
            '=' => self.paired(TokenKind::Unknown, '=', TokenKind::EqEq, pos),
            '!' => self.paired(TokenKind::Unknown, '=', TokenKind::NotEq, pos),
            '"' => self.read_string(pos),
            ch if ch.is_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();
                Token::new(TokenKind::Ident, ident, pos)
            }
            ch => self.single(TokenKind::Unknown, ch, pos),
        }
    }

    fn single(&mut self, kind: TokenKind, ch: char, pos: Position) -> Token {
        self.advance();
        Token::new(kind, ch.to_string(), pos)
    }

    /// Two-character lookahead: a lone first character keeps `kind`, while
    /// the pair upgrades to `pair_kind`.
    fn paired(&mut self, kind: TokenKind, next: char, pair_kind: TokenKind, pos: Position) -> Token {
        let first = self.current_char().unwrap_or_default();
        if self.peek_char(1) == Some(next) {
            self.advance();
            self.advance();
            let mut literal = String::from(first);
            literal.push(next);
            Token::new(pair_kind, literal, pos)
        } else {
            self.advance();
            Token::new(kind, first.to_string(), pos)
        }
    }
}

#[cfg(test)]
fn kinds(input: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(input);
    let mut result = vec![];
    loop {
        let token = lexer.next_token();
        let kind = token.kind;
        result.push(kind);
        if kind == TokenKind::Eof {
            return result;
        }
    }
}

#[test]
fn test_punctuation() {
    assert_eq!(
        kinds("; . ( ) [ ]"),
        vec![
            TokenKind::Semicolon,
            TokenKind::Period,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_operator_lookahead() {
    assert_eq!(
        kinds("& && | || = == ! != < <= > >="),
        vec![
            TokenKind::BitAnd,
            TokenKind::CondAnd,
            TokenKind::BitOr,
            TokenKind::CondOr,
            TokenKind::Unknown,
            TokenKind::EqEq,
            TokenKind::Unknown,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::LtEq,
            TokenKind::Gt,
            TokenKind::GtEq,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("a");
    assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}
