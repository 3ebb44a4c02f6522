//! Recursive descent parser for definition files
//!
//! Builds [`DefinitionBlock`]s directly from the token stream.
//! Supports error recovery: a malformed statement is skipped up to the next
//! `;` (or the closing `}` of its block), a malformed block header up to the
//! end of that block.

use text_size::{TextRange, TextSize};

use super::errors::ParseError;
use super::lexer::{Lexer, Token, TokenKind};
use crate::base::{LineIndex, Name, Origin, SourceId, Span};
use crate::syntax::{
    AttributeBlock, AttributeStatement, ChildKind, DefinitionBlock, DefinitionKind, Statement,
};

/// Parse result: every block that could be recovered, plus all errors.
#[derive(Debug, Clone, Default)]
pub struct Parse {
    pub blocks: Vec<DefinitionBlock>,
    pub errors: Vec<ParseError>,
}

impl Parse {
    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse one source text into definition blocks.
pub fn parse(source: SourceId, input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let line_index = LineIndex::new(input);
    let mut parser = Parser {
        source,
        tokens: &tokens,
        pos: 0,
        line_index: &line_index,
        eof: TextSize::new(input.len() as u32),
        parse: Parse::default(),
    };
    parser.parse_file();
    parser.parse
}

/// A call `name(args)` before it is checked against the known statements.
struct Call {
    name: String,
    args: Vec<Arg>,
    span: Span,
}

enum Arg {
    Str(String),
    /// `CommandRef("x")` style argument.
    Ref { keyword: String, name: String },
}

/// The parser state
struct Parser<'a> {
    source: SourceId,
    tokens: &'a [Token<'a>],
    pos: usize,
    line_index: &'a LineIndex,
    eof: TextSize,
    parse: Parse,
}

impl<'a> Parser<'a> {
    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    /// A definition keyword followed by `(`: the start of a new block.
    fn at_block_start(&self) -> bool {
        self.current().is_some_and(|t| {
            t.kind == TokenKind::Ident && DefinitionKind::from_keyword(t.text).is_some()
        }) && self.nth_kind(1) == Some(TokenKind::LParen)
    }

    fn bump(&mut self) -> Option<&'a Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat_token(&mut self, kind: TokenKind) -> Option<&'a Token<'a>> {
        if self.at(kind) { self.bump() } else { None }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        self.eat_token(kind).is_some()
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<&'a Token<'a>, ParseError> {
        match self.eat_token(kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(expected)),
        }
    }

    // =========================================================================
    // Positions and errors
    // =========================================================================

    fn span_of(&self, range: TextRange) -> Span {
        Span::new(
            self.line_index.position(range.start()),
            self.line_index.position(range.end()),
        )
    }

    fn prev_range(&self) -> TextRange {
        self.pos
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .map(|t| t.range)
            .unwrap_or_else(|| TextRange::empty(self.eof))
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.current() {
            Some(token) => ParseError::Unexpected {
                expected,
                found: describe(token),
                span: self.span_of(token.range),
            },
            None => ParseError::UnexpectedEof {
                expected,
                span: self.span_of(TextRange::empty(self.eof)),
            },
        }
    }

    fn error(&mut self, error: ParseError) {
        tracing::trace!("parse error in source {}: {}", self.source, error);
        self.parse.errors.push(error);
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn parse_file(&mut self) {
        while let Some(token) = self.current() {
            if token.kind == TokenKind::Ident {
                self.parse_block();
            } else {
                let err = self.unexpected("definition kind");
                self.error(err);
                self.bump();
            }
        }
    }

    /// `Kind("name") { statement* }`
    fn parse_block(&mut self) {
        let Some(keyword) = self.bump() else {
            return;
        };

        let Some(kind) = DefinitionKind::from_keyword(keyword.text) else {
            self.error(ParseError::UnknownKind {
                keyword: keyword.text.to_string(),
                span: self.span_of(keyword.range),
            });
            self.recover_block();
            return;
        };

        let name = match self.parse_header(kind) {
            Ok(name) => name,
            Err(err) => {
                self.error(err);
                self.recover_block();
                return;
            }
        };

        let mut statements = Vec::new();
        loop {
            if self.eat(TokenKind::RBrace) {
                break;
            }
            if self.current().is_none() || self.at_block_start() {
                // Missing '}': keep what we have, the next block starts here
                let err = self.unexpected("'}'");
                self.error(err);
                break;
            }
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
        }

        let range = TextRange::new(keyword.range.start(), self.prev_range().end());
        let origin = Origin::new(self.source, self.span_of(range));
        self.parse.blocks.push(DefinitionBlock {
            kind,
            name,
            statements,
            origin: Some(origin),
        });
    }

    fn parse_header(&mut self, kind: DefinitionKind) -> Result<Name, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let name = self.expect(TokenKind::String, "definition name")?;
        let name_span = self.span_of(name.range);
        self.expect(TokenKind::RParen, "')'")?;

        let name = unescape(name.text);
        if name.trim().is_empty() {
            return Err(ParseError::BadArguments {
                name: kind.keyword().to_string(),
                expected: "a non-empty name",
                span: name_span,
            });
        }

        self.expect(TokenKind::LBrace, "'{'")?;
        Ok(Name::new(name))
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        let call = match self.parse_call() {
            Ok(call) => call,
            Err(err) => {
                self.error(err);
                self.recover_statement();
                return None;
            }
        };

        if call.name == "addAttribute" {
            return self.finish_attribute(call);
        }

        self.expect_terminator();
        match to_statement(call) {
            Ok(statement) => Some(statement),
            Err(err) => {
                self.error(err);
                None
            }
        }
    }

    /// `addAttribute("name") { attribute-statement* }` or `addAttribute("name");`
    fn finish_attribute(&mut self, call: Call) -> Option<Statement> {
        let name = match call.args.as_slice() {
            [Arg::Str(name)] if !name.trim().is_empty() => Name::new(name),
            _ => {
                self.error(ParseError::BadArguments {
                    name: call.name,
                    expected: "one attribute name",
                    span: call.span,
                });
                self.expect_terminator();
                return None;
            }
        };

        let mut block = AttributeBlock::new(name);
        if !self.eat(TokenKind::LBrace) {
            self.expect_terminator();
            return Some(Statement::AddAttribute(block));
        }

        loop {
            if self.eat(TokenKind::RBrace) {
                break;
            }
            if self.current().is_none() || self.at_block_start() {
                let err = self.unexpected("'}'");
                self.error(err);
                break;
            }
            match self.parse_call() {
                Ok(call) => {
                    self.expect_terminator();
                    match to_attribute_statement(call) {
                        Ok(statement) => block.statements.push(statement),
                        Err(err) => self.error(err),
                    }
                }
                Err(err) => {
                    self.error(err);
                    self.recover_statement();
                }
            }
        }
        self.eat(TokenKind::Semicolon);

        Some(Statement::AddAttribute(block))
    }

    /// `name(arg, ...)`
    fn parse_call(&mut self) -> Result<Call, ParseError> {
        let name = self.expect(TokenKind::Ident, "statement")?;
        self.expect(TokenKind::LParen, "'('")?;

        let mut args = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                args.push(self.parse_arg()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        let close = self.expect(TokenKind::RParen, "')'")?;
        Ok(Call {
            name: name.text.to_string(),
            args,
            span: self.span_of(TextRange::new(name.range.start(), close.range.end())),
        })
    }

    fn parse_arg(&mut self) -> Result<Arg, ParseError> {
        if let Some(token) = self.eat_token(TokenKind::String) {
            return Ok(Arg::Str(unescape(token.text)));
        }
        if let Some(keyword) = self.eat_token(TokenKind::Ident) {
            self.expect(TokenKind::LParen, "'('")?;
            let name = self.expect(TokenKind::String, "string literal")?;
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(Arg::Ref {
                keyword: keyword.text.to_string(),
                name: unescape(name.text),
            });
        }
        Err(self.unexpected("string literal or reference"))
    }

    fn expect_terminator(&mut self) {
        match self.current_kind() {
            Some(TokenKind::Semicolon) => {
                self.bump();
            }
            Some(TokenKind::LBrace) => {
                let err = self.unexpected("';'");
                self.error(err);
                self.skip_balanced();
                self.eat(TokenKind::Semicolon);
            }
            _ => {
                // Report but carry on as if the ';' were there
                let err = self.unexpected("';'");
                self.error(err);
            }
        }
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Skip a `{ ... }` group starting at the current `{`.
    fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// Skip to just after the next `;`, or to the `}` closing the enclosing
    /// block (left in place).
    fn recover_statement(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::Semicolon if depth == 0 => {
                    self.bump();
                    return;
                }
                TokenKind::RBrace if depth == 0 => return,
                TokenKind::RBrace => depth -= 1,
                TokenKind::LBrace => depth += 1,
                TokenKind::Ident if depth == 0 && self.at_block_start() => return,
                _ => {}
            }
            self.bump();
        }
    }

    /// Skip the rest of a block whose header failed to parse.
    fn recover_block(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    if depth <= 1 {
                        self.bump();
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Ident if depth == 0 && self.at_block_start() => return,
                _ => {}
            }
            self.bump();
        }
    }
}

fn describe(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::Ident | TokenKind::String | TokenKind::Error => format!("'{}'", token.text),
        kind => kind.describe().to_string(),
    }
}

/// Strip the quotes and resolve `\"` and `\\`. Any other backslash is kept,
/// so paths like `"Type\Attribute"` survive unchanged.
fn unescape(literal: &str) -> String {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&next @ ('"' | '\\')) => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn single_string(call: &Call) -> Result<Name, ParseError> {
    match call.args.as_slice() {
        [Arg::Str(value)] => Ok(Name::new(value)),
        _ => Err(bad_arguments(call, "one string argument")),
    }
}

fn bad_arguments(call: &Call, expected: &'static str) -> ParseError {
    ParseError::BadArguments {
        name: call.name.clone(),
        expected,
        span: call.span,
    }
}

fn to_statement(call: Call) -> Result<Statement, ParseError> {
    let statement = match call.name.as_str() {
        "setUUID" => Statement::SetUuid(single_string(&call)?.to_string()),
        "setParentType" => Statement::SetParentType(single_string(&call)?),
        "addIcon" => Statement::AddIcon(single_string(&call)?),
        "addTargetTable" => Statement::AddTargetTable(single_string(&call)?),
        "addTargetForm" => Statement::AddTargetForm(single_string(&call)?),
        "addTargetMenu" => Statement::AddTargetMenu(single_string(&call)?),
        "addProperty" => match call.args.as_slice() {
            [Arg::Str(key), Arg::Str(value)] => Statement::AddProperty {
                key: Name::new(key),
                value: value.clone(),
            },
            _ => return Err(bad_arguments(&call, "a key and a value")),
        },
        "addChild" => match call.args.as_slice() {
            [Arg::Ref { keyword, name }] => match ChildKind::from_keyword(keyword) {
                Some(kind) => Statement::AddChild {
                    kind,
                    name: Name::new(name),
                },
                None => return Err(bad_arguments(&call, "CommandRef(..) or MenuRef(..)")),
            },
            _ => return Err(bad_arguments(&call, "CommandRef(..) or MenuRef(..)")),
        },
        _ => {
            return Err(ParseError::UnknownStatement {
                name: call.name.clone(),
                span: call.span,
            });
        }
    };
    Ok(statement)
}

fn to_attribute_statement(call: Call) -> Result<AttributeStatement, ParseError> {
    let statement = match call.name.as_str() {
        "setAttributeType" => AttributeStatement::SetAttributeType(single_string(&call)?),
        "setSQLTable" => AttributeStatement::SetSqlTable(single_string(&call)?),
        "setSQLColumn" => AttributeStatement::SetSqlColumn(single_string(&call)?),
        "setTypeLink" => AttributeStatement::SetTypeLink(single_string(&call)?),
        _ => {
            return Err(ParseError::UnknownStatement {
                name: call.name.clone(),
                span: call.span,
            });
        }
    };
    Ok(statement)
}
