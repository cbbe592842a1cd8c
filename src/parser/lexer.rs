//! Lexer (tokenizer) for Imp source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. The stream always ends with exactly one [`Token::Eof`] so the
//! parser can ask for "the next token" without ever running off the end.

use super::ast::SourceLocation;
use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
/// Grammar decisions compare tags only; `NumLiteral` and `Ident` additionally
/// carry their lexeme.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    NumLiteral(i64, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    Int(SourceLocation),
    Boolean(SourceLocation),
    If(SourceLocation),
    Else(SourceLocation),
    While(SourceLocation),
    Do(SourceLocation),
    Break(SourceLocation),
    Print(SourceLocation),
    True(SourceLocation),
    False(SourceLocation),

    // Arithmetic operators
    Plus(SourceLocation),    // +
    Minus(SourceLocation),   // -
    Star(SourceLocation),    // *
    Slash(SourceLocation),   // /
    Percent(SourceLocation), // %
    Caret(SourceLocation),   // ^

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Logical
    AndAnd(SourceLocation), // &&
    OrOr(SourceLocation),   // ||
    Bang(SourceLocation),   // !

    // Assignment
    Eq(SourceLocation), // =

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    LBracket(SourceLocation),  // [
    RBracket(SourceLocation),  // ]
    Semicolon(SourceLocation), // ;

    // End of input
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::NumLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Int(loc)
            | Token::Boolean(loc)
            | Token::If(loc)
            | Token::Else(loc)
            | Token::While(loc)
            | Token::Do(loc)
            | Token::Break(loc)
            | Token::Print(loc)
            | Token::True(loc)
            | Token::False(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Percent(loc)
            | Token::Caret(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::AndAnd(loc)
            | Token::OrOr(loc)
            | Token::Bang(loc)
            | Token::Eq(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::LBracket(loc)
            | Token::RBracket(loc)
            | Token::Semicolon(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::NumLiteral(n, _) => write!(f, "number {}", n),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Int(_) => write!(f, "'int'"),
            Token::Boolean(_) => write!(f, "'boolean'"),
            Token::If(_) => write!(f, "'if'"),
            Token::Else(_) => write!(f, "'else'"),
            Token::While(_) => write!(f, "'while'"),
            Token::Do(_) => write!(f, "'do'"),
            Token::Break(_) => write!(f, "'break'"),
            Token::Print(_) => write!(f, "'print'"),
            Token::True(_) => write!(f, "'true'"),
            Token::False(_) => write!(f, "'false'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::Caret(_) => write!(f, "'^'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::AndAnd(_) => write!(f, "'&&'"),
            Token::OrOr(_) => write!(f, "'||'"),
            Token::Bang(_) => write!(f, "'!'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::LBracket(_) => write!(f, "'['"),
            Token::RBracket(_) => write!(f, "']'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for Imp source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of input".to_string(),
            location: loc,
        })?;

        match ch {
            // Numeric literals
            '0'..='9' => self.number_literal(ch),

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch)),

            // Operators and punctuation
            '+' => Ok(Token::Plus(loc)),
            '-' => Ok(Token::Minus(loc)),
            '*' => Ok(Token::Star(loc)),
            '/' => Ok(Token::Slash(loc)),
            '%' => Ok(Token::Percent(loc)),
            '^' => Ok(Token::Caret(loc)),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::EqEq(loc))
                } else {
                    Ok(Token::Eq(loc))
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::NotEq(loc))
                } else {
                    Ok(Token::Bang(loc))
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Le(loc))
                } else {
                    Ok(Token::Lt(loc))
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Ge(loc))
                } else {
                    Ok(Token::Gt(loc))
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    Ok(Token::AndAnd(loc))
                } else {
                    Err(LexError {
                        message: "Expected '&&' (the language has no bitwise '&')".to_string(),
                        location: loc,
                    })
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    Ok(Token::OrOr(loc))
                } else {
                    Err(LexError {
                        message: "Expected '||' (the language has no bitwise '|')".to_string(),
                        location: loc,
                    })
                }
            }
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            '[' => Ok(Token::LBracket(loc)),
            ']' => Ok(Token::RBracket(loc)),
            ';' => Ok(Token::Semicolon(loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse numeric literal (integers only)
    fn number_literal(&mut self, first_digit: char) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column - 1);
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value = num_str.parse::<i64>().map_err(|_| LexError {
            message: format!("Invalid integer literal: {}", num_str),
            location: loc,
        })?;

        Ok(Token::NumLiteral(value, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> Token {
        let loc = SourceLocation::new(self.line, self.column - 1);
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Check if it's a keyword
        match ident.as_str() {
            "int" => Token::Int(loc),
            "boolean" => Token::Boolean(loc),
            "if" => Token::If(loc),
            "else" => Token::Else(loc),
            "while" => Token::While(loc),
            "do" => Token::Do(loc),
            "break" => Token::Break(loc),
            "print" => Token::Print(loc),
            "true" => Token::True(loc),
            "false" => Token::False(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_assignment() {
        let mut lexer = Lexer::new("x = 42;");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens.len(), 5);
        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[1], Token::Eq(_)));
        assert!(matches!(tokens[2], Token::NumLiteral(42, _)));
        assert!(matches!(tokens[3], Token::Semicolon(_)));
        assert!(matches!(tokens[4], Token::Eof(_)));
    }

    #[test]
    fn test_two_char_operators() {
        let mut lexer = Lexer::new("== != <= >= && || = < >");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::EqEq(_)));
        assert!(matches!(tokens[1], Token::NotEq(_)));
        assert!(matches!(tokens[2], Token::Le(_)));
        assert!(matches!(tokens[3], Token::Ge(_)));
        assert!(matches!(tokens[4], Token::AndAnd(_)));
        assert!(matches!(tokens[5], Token::OrOr(_)));
        assert!(matches!(tokens[6], Token::Eq(_)));
        assert!(matches!(tokens[7], Token::Lt(_)));
        assert!(matches!(tokens[8], Token::Gt(_)));
    }

    #[test]
    fn test_keywords_vs_identifiers() {
        let mut lexer = Lexer::new("while whilex do doit boolean truely");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::While(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "whilex"));
        assert!(matches!(tokens[2], Token::Do(_)));
        assert!(matches!(tokens[3], Token::Ident(ref s, _) if s == "doit"));
        assert!(matches!(tokens[4], Token::Boolean(_)));
        assert!(matches!(tokens[5], Token::Ident(ref s, _) if s == "truely"));
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "x // trailing comment\n/* block\ncomment */ = 1;";
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens.len(), 5);
        assert!(matches!(tokens[1], Token::Eq(_)));
    }

    #[test]
    fn test_locations_track_lines() {
        let mut lexer = Lexer::new("x\n  y");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].location(), SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location(), SourceLocation::new(2, 3));
    }

    #[test]
    fn test_single_ampersand_is_an_error() {
        let mut lexer = Lexer::new("a & b");
        let err = lexer.tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 3));
    }
}
