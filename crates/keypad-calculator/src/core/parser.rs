//! Expression tokenizer and recursive descent parser
//!
//! The grammar is deliberately small: four binary operators, optional signs
//! on literals, no parentheses and no functions.

use crate::core::format::{INFINITY_SENTINEL, NAN_SENTINEL};
use crate::core::{CalcError, CalcResult, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Numeric literal (including the `Infinity`/`NaN` sentinels)
    Number(f64),
    /// Operator character; binary or sign depending on position
    Operator(Operation),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => write!(f, "{op}"),
        }
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            'A'..='Z' | 'a'..='z' => self.read_sentinel()?,
            _ => {
                let op = Operation::from_char(ch).ok_or(CalcError::UnexpectedChar {
                    ch,
                    offset: self.pos,
                })?;
                self.advance();
                Token::Operator(op)
            }
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.current_char().is_some_and(&pred) {
            self.advance();
        }
        &self.input[start..self.pos]
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let literal = self.read_while(|c| c.is_ascii_digit() || c == '.');

        // `5.` is a complete literal, a bare `.` or a second point is not
        if literal == "." || literal.matches('.').count() > 1 {
            return Err(CalcError::InvalidNumber(literal.to_string()));
        }

        literal
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| CalcError::InvalidNumber(literal.to_string()))
    }

    fn read_sentinel(&mut self) -> CalcResult<Token> {
        let word = self.read_while(|c| c.is_ascii_alphabetic());
        match word {
            INFINITY_SENTINEL => Ok(Token::Number(f64::INFINITY)),
            NAN_SENTINEL => Ok(Token::Number(f64::NAN)),
            _ => Err(CalcError::InvalidNumber(word.to_string())),
        }
    }
}

const ADDITIVE: u8 = 1;
const MULTIPLICATIVE: u8 = 2;

/// Recursive descent parser for keypad expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= factor (('*' | '/') factor)*
/// factor     ::= ('+' | '-') factor | NUMBER
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input.trim()).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::UnexpectedToken(token.to_string()));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token if it is a binary operator of `precedence`
    fn eat_operator(&mut self, precedence: u8) -> Option<Operation> {
        match self.current() {
            Some(Token::Operator(op)) if op.precedence() == precedence => {
                let op = *op;
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.eat_operator(ADDITIVE) {
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_factor()?;

        while let Some(op) = self.eat_operator(MULTIPLICATIVE) {
            let right = self.parse_factor()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> CalcResult<AstNode> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(AstNode::number(n)),
            Some(Token::Operator(Operation::Subtract)) => Ok(AstNode::negate(self.parse_factor()?)),
            // Unary plus is a no-op
            Some(Token::Operator(Operation::Add)) => self.parse_factor(),
            Some(token) => Err(CalcError::UnexpectedToken(token.to_string())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}
