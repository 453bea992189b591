
pub mod display;
pub mod tree_node;

use quick_error::quick_error;
use tokenizer::{
    self, Tokenizer,
    token::{Keyword, Symbol, Token, TokenType},
};
use tree_node::*;

#[macro_export]
/// A macro to create a boxed value.
macro_rules! boxed {
    ($e:expr) => {
        Box::new($e)
    };
}

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        TokenizerError(err: tokenizer::Error) {
            from()
            display("Tokenizer Error: {}", err)
            source(err)
        }
        UnexpectedToken(token: Token) {
            display("Unexpected token: {:?}", token)
        }
        InvalidAssignmentTarget(token: Token) {
            display("Invalid assignment target near: {:?}", token)
        }
        UnexpectedEOF {
            display("Unexpected EOF")
        }
    }
}

pub struct Parser {
    tokenizer: Tokenizer,
}

impl Parser {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Parser { tokenizer }
    }

    /// Parses all the input from the tokenizer and returns the resulting
    /// expressions in a root block expression node
    pub fn parse_all(&mut self) -> Result<Option<tree_node::Expression>, Error> {
        let mut expressions = Vec::<Expression>::new();

        while let Some(expression) = self.parse()? {
            expressions.push(expression);
        }

        Ok(Some(Expression::Block(BlockExpression(expressions))))
    }

    /// Parses a single statement, or returns None once the input is exhausted
    pub fn parse(&mut self) -> Result<Option<tree_node::Expression>, Error> {
        let token = match self.tokenizer.next_token()? {
            Some(token) => token,
            None => return Ok(None),
        };

        if token.token_type == TokenType::EOF {
            return Ok(None);
        }

        self.statement(token).map(Some)
    }

    /// Reads the next token, treating end of input as an error
    fn next_token(&mut self) -> Result<Token, Error> {
        match self.tokenizer.next_token()? {
            Some(token) => Ok(token),
            None => Err(Error::UnexpectedEOF),
        }
    }

    fn expect_symbol(&mut self, symbol: Symbol) -> Result<(), Error> {
        let token = self.next_token()?;
        if token.token_type == TokenType::Symbol(symbol) {
            Ok(())
        } else {
            Err(Error::UnexpectedToken(token))
        }
    }

    fn peek_matches_symbol(&mut self, symbol: Symbol) -> Result<bool, Error> {
        Ok(matches!(
            self.tokenizer.peek_next()?,
            Some(Token { token_type: TokenType::Symbol(s), .. }) if s == symbol
        ))
    }

    fn peek_matches_keyword(&mut self, keyword: Keyword) -> Result<bool, Error> {
        Ok(matches!(
            self.tokenizer.peek_next()?,
            Some(Token { token_type: TokenType::Keyword(k), .. }) if k == keyword
        ))
    }

    /// Parses one statement starting at `token`
    fn statement(&mut self, token: Token) -> Result<Expression, Error> {
        match token.token_type {
            // match declarations with a `var` keyword
            TokenType::Keyword(Keyword::Var) => self.declaration(),

            TokenType::Keyword(Keyword::Return) => {
                let value = self.expression_from_next()?;
                self.expect_symbol(Symbol::Semicolon)?;
                Ok(Expression::Return(boxed!(value)))
            }

            TokenType::Keyword(Keyword::If) => self.if_expression().map(Expression::If),

            TokenType::Symbol(Symbol::LBrace) => self.block().map(Expression::Block),

            // everything else is an expression statement
            _ => {
                let expression = self.expression(token)?;
                self.expect_symbol(Symbol::Semicolon)?;
                Ok(expression)
            }
        }
    }

    /// Parses `var name;` or `var name = value;` after the `var` keyword.
    /// A missing initializer becomes an undefined value node.
    fn declaration(&mut self) -> Result<Expression, Error> {
        let name_token = self.next_token()?;
        let name = match name_token.token_type {
            TokenType::Identifier(ref name) => name.clone(),
            _ => return Err(Error::UnexpectedToken(name_token)),
        };

        let next = self.next_token()?;
        match next.token_type {
            TokenType::Symbol(Symbol::Semicolon) => {
                Ok(Expression::Declaration(name, boxed!(Expression::Undefined)))
            }
            TokenType::Symbol(Symbol::Assign) => {
                let value = self.expression_from_next()?;
                self.expect_symbol(Symbol::Semicolon)?;
                Ok(Expression::Declaration(name, boxed!(value)))
            }
            _ => Err(Error::UnexpectedToken(next)),
        }
    }

    /// Parses `if (condition) statement` with an optional `else statement`.
    /// A dangling `else` binds to the nearest `if`.
    fn if_expression(&mut self) -> Result<IfExpression, Error> {
        self.expect_symbol(Symbol::LParen)?;
        let condition = self.expression_from_next()?;
        self.expect_symbol(Symbol::RParen)?;

        let body_token = self.next_token()?;
        let body = self.statement(body_token)?;

        let else_branch = if self.peek_matches_keyword(Keyword::Else)? {
            self.next_token()?;
            let else_token = self.next_token()?;
            Some(boxed!(self.statement(else_token)?))
        } else {
            None
        };

        Ok(IfExpression {
            condition: boxed!(condition),
            body: boxed!(body),
            else_branch,
        })
    }

    /// Parses statements up to the closing brace
    fn block(&mut self) -> Result<BlockExpression, Error> {
        let mut expressions = Vec::new();

        loop {
            let token = self.next_token()?;
            if token.token_type == TokenType::Symbol(Symbol::RBrace) {
                break;
            }
            expressions.push(self.statement(token)?);
        }

        Ok(BlockExpression(expressions))
    }

    fn expression_from_next(&mut self) -> Result<Expression, Error> {
        let token = self.next_token()?;
        self.expression(token)
    }

    /// Parses an expression starting at `token`. Assignment has the lowest
    /// precedence and is right-associative; its target must be a variable.
    fn expression(&mut self, token: Token) -> Result<Expression, Error> {
        let lhs = self.additive(token)?;

        if self.peek_matches_symbol(Symbol::Assign)? {
            let assign_token = self.next_token()?;
            let identifier = match lhs {
                Expression::Variable(name) => name,
                _ => return Err(Error::InvalidAssignmentTarget(assign_token)),
            };
            let value = self.expression_from_next()?;
            return Ok(Expression::Assignment(AssignmentExpression {
                identifier,
                expression: boxed!(value),
            }));
        }

        Ok(lhs)
    }

    /// Parses a left-associative chain of `+` and `-`
    fn additive(&mut self, token: Token) -> Result<Expression, Error> {
        let mut lhs = self.term(token)?;

        loop {
            if self.peek_matches_symbol(Symbol::Plus)? {
                self.next_token()?;
                let rhs_token = self.next_token()?;
                let rhs = self.term(rhs_token)?;
                lhs = Expression::Binary(BinaryExpression::Add(boxed!(lhs), boxed!(rhs)));
            } else if self.peek_matches_symbol(Symbol::Minus)? {
                self.next_token()?;
                let rhs_token = self.next_token()?;
                let rhs = self.term(rhs_token)?;
                lhs = Expression::Binary(BinaryExpression::Subtract(boxed!(lhs), boxed!(rhs)));
            } else {
                break;
            }
        }

        Ok(lhs)
    }

    /// Parses a left-associative chain of `*` and `/`
    fn term(&mut self, token: Token) -> Result<Expression, Error> {
        let mut lhs = self.primary(token)?;

        loop {
            if self.peek_matches_symbol(Symbol::Asterisk)? {
                self.next_token()?;
                let rhs_token = self.next_token()?;
                let rhs = self.primary(rhs_token)?;
                lhs = Expression::Binary(BinaryExpression::Multiply(boxed!(lhs), boxed!(rhs)));
            } else if self.peek_matches_symbol(Symbol::Slash)? {
                self.next_token()?;
                let rhs_token = self.next_token()?;
                let rhs = self.primary(rhs_token)?;
                lhs = Expression::Binary(BinaryExpression::Divide(boxed!(lhs), boxed!(rhs)));
            } else {
                break;
            }
        }

        Ok(lhs)
    }

    fn primary(&mut self, token: Token) -> Result<Expression, Error> {
        match token.token_type {
            TokenType::Number(value) => Ok(Expression::Number(value)),
            TokenType::Identifier(ref name) => Ok(Expression::Variable(name.clone())),
            TokenType::Symbol(Symbol::LParen) => {
                let inner = self.expression_from_next()?;
                self.expect_symbol(Symbol::RParen)?;
                Ok(inner)
            }
            _ => Err(Error::UnexpectedToken(token)),
        }
    }
}
