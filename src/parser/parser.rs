use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use std::fmt;

/// Parser error type
///
/// Parsing stops at the first failure; no error recovery is attempted and
/// no partial AST is ever returned.
#[derive(Debug)]
pub enum ParseError {
    /// The current token did not match what the grammar requires.
    UnexpectedToken {
        expected: String,
        found: Token,
        location: SourceLocation,
    },
    /// The token stream ran out (hit the end marker) mid-construct.
    UnexpectedEndOfInput {
        expected: String,
        location: SourceLocation,
    },
    /// The lexer failed before any token could be produced.
    Lex(LexError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected,
                found,
                location,
            } => write!(
                f,
                "Parse error at line {}, column {}: expected {}, found {}",
                location.line, location.column, expected, found
            ),
            ParseError::UnexpectedEndOfInput { expected, location } => write!(
                f,
                "Parse error at line {}, column {}: expected {}, but the input ended",
                location.line, location.column, expected
            ),
            ParseError::Lex(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Recursive descent parser for the Imp language
///
/// One production method per grammar rule, one-token lookahead. Token tags
/// are compared by discriminant, so two tokens of the same kind are
/// interchangeable for grammar decisions.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Create a parser directly from source text (lexes internally).
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Create a parser from an already-lexed token stream.
    ///
    /// The stream must be terminated by a [`Token::Eof`] marker; one is
    /// appended if the caller's stream lacks it, so the parser never reads
    /// past the end of the vector.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token::Eof(_))) {
            let loc = tokens
                .last()
                .map(|t| t.location())
                .unwrap_or_else(|| SourceLocation::new(1, 1));
            tokens.push(Token::Eof(loc));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire program: one root block followed by end of input.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let block = self.parse_block()?;
        self.expect_token(&Token::Eof(self.current_location()), "end of input")?;
        Ok(Program::new(block))
    }

    /// Parse a block: '{' decls stmts '}'
    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect_token(&Token::LBrace(self.current_location()), "'{'")?;

        let mut decls = Vec::new();
        while self.is_type_keyword() {
            decls.push(self.parse_declaration()?);
        }

        let mut stmts = Vec::new();
        while !self.check(&Token::RBrace(self.current_location())) && !self.is_at_end() {
            stmts.push(self.parse_statement()?);
        }

        self.expect_token(&Token::RBrace(self.current_location()), "'}'")?;

        Ok(Block { decls, stmts })
    }

    /// Parse a declaration: type ID ('[' NUM ']')? ';'
    fn parse_declaration(&mut self) -> Result<Decl, ParseError> {
        let loc = self.current_location();

        let is_boolean = if self.match_token(&Token::Int(loc)) {
            false
        } else {
            self.expect_token(&Token::Boolean(loc), "'int' or 'boolean'")?;
            true
        };

        let name = self.expect_identifier()?;

        let var_type = if self.match_token(&Token::LBracket(self.current_location())) {
            if is_boolean {
                // Array cells hold ints only
                return Err(ParseError::UnexpectedToken {
                    expected: "';' ('boolean' arrays are not supported)".to_string(),
                    found: self.previous().clone(),
                    location: self.previous_location(),
                });
            }
            let len = self.expect_number("array length")?;
            self.expect_token(&Token::RBracket(self.current_location()), "']'")?;
            if len < 0 {
                return Err(ParseError::UnexpectedToken {
                    expected: "a non-negative array length".to_string(),
                    found: self.previous().clone(),
                    location: loc,
                });
            }
            Type::IntArray(len as usize)
        } else if is_boolean {
            Type::Boolean
        } else {
            Type::Int
        };

        self.expect_token(
            &Token::Semicolon(self.current_location()),
            "';' after declaration",
        )?;

        Ok(Decl {
            name,
            var_type,
            location: loc,
        })
    }

    /// Parse a statement
    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::If(loc)) {
            return self.parse_if_statement();
        }

        if self.match_token(&Token::While(loc)) {
            return self.parse_while_statement();
        }

        if self.match_token(&Token::Do(loc)) {
            return self.parse_do_while_statement();
        }

        if self.match_token(&Token::Break(loc)) {
            self.expect_token(&Token::Semicolon(self.current_location()), "';' after 'break'")?;
            return Ok(Stmt::Break { location: loc });
        }

        if self.match_token(&Token::Print(loc)) {
            return self.parse_print_statement();
        }

        if self.check(&Token::LBrace(loc)) {
            return Ok(Stmt::Block(self.parse_block()?));
        }

        // Anything else must be an assignment: ID ('[' expr ']')? '=' expr ';'
        self.parse_assign_statement()
    }

    /// Parse if statement: 'if' '(' expr ')' block ('else' block)?
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        self.expect_token(&Token::LParen(self.current_location()), "'(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_token(
            &Token::RParen(self.current_location()),
            "')' after if condition",
        )?;

        let then_branch = self.parse_block()?;

        if self.match_token(&Token::Else(self.current_location())) {
            let else_branch = self.parse_block()?;
            Ok(Stmt::IfElse {
                condition,
                then_branch,
                else_branch,
                location: loc,
            })
        } else {
            Ok(Stmt::If {
                condition,
                then_branch,
                location: loc,
            })
        }
    }

    /// Parse while statement: 'while' '(' expr ')' block
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        self.expect_token(&Token::LParen(self.current_location()), "'(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_token(
            &Token::RParen(self.current_location()),
            "')' after while condition",
        )?;

        let body = self.parse_block()?;

        Ok(Stmt::While {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse do-while statement: 'do' block 'while' '(' expr ')' ';'
    fn parse_do_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        let body = self.parse_block()?;

        self.expect_token(&Token::While(self.current_location()), "'while' after do body")?;
        self.expect_token(&Token::LParen(self.current_location()), "'(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_token(
            &Token::RParen(self.current_location()),
            "')' after do-while condition",
        )?;
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            "';' after do-while",
        )?;

        Ok(Stmt::DoWhile {
            body,
            condition,
            location: loc,
        })
    }

    /// Parse print statement: 'print' '(' expr ')' ';'
    fn parse_print_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        self.expect_token(&Token::LParen(self.current_location()), "'(' after 'print'")?;
        let expr = self.parse_expression()?;
        self.expect_token(
            &Token::RParen(self.current_location()),
            "')' after print argument",
        )?;
        self.expect_token(&Token::Semicolon(self.current_location()), "';' after 'print'")?;

        Ok(Stmt::Print {
            expr,
            location: loc,
        })
    }

    /// Parse assignment: ID ('[' expr ']')? '=' expr ';'
    fn parse_assign_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        let name = self.expect_identifier()?;

        let index = if self.match_token(&Token::LBracket(self.current_location())) {
            let index = self.parse_expression()?;
            self.expect_token(
                &Token::RBracket(self.current_location()),
                "']' after array index",
            )?;
            Some(index)
        } else {
            None
        };

        self.expect_token(&Token::Eq(self.current_location()), "'=' in assignment")?;
        let value = self.parse_expression()?;
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            "';' after assignment",
        )?;

        Ok(match index {
            Some(index) => Stmt::AssignElement {
                name,
                index,
                value,
                location: loc,
            },
            None => Stmt::Assign {
                name,
                value,
                location: loc,
            },
        })
    }

    /// Parse expression (top-level entry point)
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical_or()
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.match_token(&Token::OrOr(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_logical_and()?);
            left = Expr::Logical {
                op: LogicOp::Or,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;

        while self.match_token(&Token::AndAnd(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_equality()?);
            left = Expr::Logical {
                op: LogicOp::And,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::EqEq(loc)) {
                RelOp::Eq
            } else if self.match_token(&Token::NotEq(loc)) {
                RelOp::Ne
            } else {
                break;
            };

            let right = Box::new(self.parse_relational()?);
            left = Expr::Relational {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Lt(loc)) {
                RelOp::Lt
            } else if self.match_token(&Token::Le(loc)) {
                RelOp::Le
            } else if self.match_token(&Token::Gt(loc)) {
                RelOp::Gt
            } else if self.match_token(&Token::Ge(loc)) {
                RelOp::Ge
            } else {
                break;
            };

            let right = Box::new(self.parse_additive()?);
            left = Expr::Relational {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Plus(loc)) {
                BinOp::Add
            } else if self.match_token(&Token::Minus(loc)) {
                BinOp::Sub
            } else {
                break;
            };

            let right = Box::new(self.parse_multiplicative()?);
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_power()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Star(loc)) {
                BinOp::Mul
            } else if self.match_token(&Token::Slash(loc)) {
                BinOp::Div
            } else if self.match_token(&Token::Percent(loc)) {
                BinOp::Mod
            } else {
                break;
            };

            let right = Box::new(self.parse_power()?);
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse exponentiation (^), right-associative
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_unary()?;

        if self.match_token(&Token::Caret(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_power()?);
            return Ok(Expr::Binary {
                op: BinOp::Pow,
                left: Box::new(left),
                right,
                location: loc,
            });
        }

        Ok(left)
    }

    /// Parse unary (- !)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::Minus(loc)) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::Unary {
                op: UnOp::Neg,
                operand,
                location: loc,
            });
        }

        if self.match_token(&Token::Bang(loc)) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::Unary {
                op: UnOp::Not,
                operand,
                location: loc,
            });
        }

        self.parse_primary()
    }

    /// Parse primary (literals, variables, array accesses, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        if let Token::NumLiteral(n, loc) = *self.peek() {
            self.advance();
            return Ok(Expr::IntLiteral(n, loc));
        }

        if self.match_token(&Token::True(loc)) {
            return Ok(Expr::BoolLiteral(true, loc));
        }

        if self.match_token(&Token::False(loc)) {
            return Ok(Expr::BoolLiteral(false, loc));
        }

        if let Token::Ident(ref name, loc) = *self.peek() {
            let name = name.clone();
            self.advance();

            // Array index arguments are arbitrary expressions
            if self.match_token(&Token::LBracket(self.current_location())) {
                let index = Box::new(self.parse_expression()?);
                self.expect_token(
                    &Token::RBracket(self.current_location()),
                    "']' after array index",
                )?;
                return Ok(Expr::ArrayAccess {
                    name,
                    index,
                    location: loc,
                });
            }

            return Ok(Expr::Variable(name, loc));
        }

        if self.match_token(&Token::LParen(loc)) {
            let expr = self.parse_expression()?;
            self.expect_token(
                &Token::RParen(self.current_location()),
                "')' after expression",
            )?;
            return Ok(expr);
        }

        Err(self.unexpected("an expression"))
    }

    // ===== Helper methods =====

    fn is_type_keyword(&self) -> bool {
        matches!(self.peek(), Token::Int(_) | Token::Boolean(_))
    }

    fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    /// Build the error for the current token: premature end-of-stream gets
    /// its own variant so callers can tell a truncated program from a
    /// malformed one.
    fn unexpected(&self, expected: &str) -> ParseError {
        if self.is_at_end() {
            ParseError::UnexpectedEndOfInput {
                expected: expected.to_string(),
                location: self.current_location(),
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.peek().clone(),
                location: self.current_location(),
            }
        }
    }

    fn expect_token(&mut self, token: &Token, expected: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(ref name, _) = *self.peek() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected("an identifier"))
        }
    }

    /// Expect a numeric literal (used for declared array lengths, which must
    /// be compile-time constants).
    fn expect_number(&mut self, expected: &str) -> Result<i64, ParseError> {
        if let Token::NumLiteral(n, _) = *self.peek() {
            self.advance();
            Ok(n)
        } else {
            Err(self.unexpected(expected))
        }
    }
}
