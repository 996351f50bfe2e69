//! Statement/block scanner shared by the dialect parsers.
//!
//! Splits a stylesheet into a tree of statements (`...;`) and blocks
//! (`prelude { ... }`) without interpreting either. Each node keeps the byte
//! offset of its first significant character, so symbol offsets point at the
//! declaration in the original text.
//!
//! Tokenizing is done with `logos`. The token set is just enough to find
//! statement boundaries: `/* */` comments, `//` (a comment in LESS/SCSS
//! outside parentheses), quoted strings, `#{}`/`@{}` interpolation and
//! parentheses (a `;` inside parentheses does not end a statement, as in LESS
//! mixin calls). Everything else is opaque text.

use logos::{Lexer, Logos};

/// Lexical options for one dialect.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Syntax {
    /// `//` starts a comment running to the end of the line
    pub line_comments: bool,
    /// Byte introducing `<sigil>{...}` interpolation (`#` for SCSS, `@` for LESS)
    pub interpolation: Option<u8>,
}

/// Lexical failure reported by the tokenizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum LexError {
    #[default]
    UnexpectedInput,
    UnclosedComment,
    UnclosedString,
    UnclosedInterpolation,
}

impl LexError {
    const fn reason(self) -> &'static str {
        match self {
            Self::UnexpectedInput => "unexpected input",
            Self::UnclosedComment => "unclosed comment",
            Self::UnclosedString => "unclosed string",
            Self::UnclosedInterpolation => "unclosed interpolation",
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = Syntax)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme {
    #[token("/*", block_comment)]
    Comment,

    #[token("//")]
    DoubleSlash,

    #[token("\"", quoted)]
    #[token("'", quoted)]
    Str,

    /// `true` when the sigil belongs to this dialect and the whole
    /// interpolation was consumed
    #[token("#{", interpolation)]
    #[token("@{", interpolation)]
    Interpolation(bool),

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(";")]
    Semicolon,

    #[regex(r#"[^ \t\r\n\f{}();"'/#@]+"#)]
    #[token("/")]
    #[token("#")]
    #[token("@")]
    Text,
}

fn block_comment(lex: &mut Lexer<Lexeme>) -> Result<(), LexError> {
    let end = lex.remainder().find("*/").ok_or(LexError::UnclosedComment)?;
    lex.bump(end + 2);
    Ok(())
}

fn quoted(lex: &mut Lexer<Lexeme>) -> Result<(), LexError> {
    let quote = lex.slice().as_bytes()[0];
    let close = closing_quote(lex.remainder().as_bytes(), quote).ok_or(LexError::UnclosedString)?;
    lex.bump(close + 1);
    Ok(())
}

fn interpolation(lex: &mut Lexer<Lexeme>) -> Result<bool, LexError> {
    let sigil = lex.slice().as_bytes()[0];
    if lex.extras.interpolation != Some(sigil) {
        return Ok(false);
    }

    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    lex.bump(i + 1);
                    return Ok(true);
                }
            }
            quote @ (b'"' | b'\'') => {
                let close = closing_quote(&bytes[i + 1..], quote).ok_or(LexError::UnclosedString)?;
                i += close + 1;
            }
            _ => {}
        }
        i += 1;
    }
    Err(LexError::UnclosedInterpolation)
}

/// Index of the unescaped `quote` ending a string whose body starts at `bytes[0]`.
fn closing_quote(bytes: &[u8], quote: u8) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// One node of the statement tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node<'a> {
    /// A statement terminated by `;`, `}` or end of input
    Statement {
        /// Statement text, trimmed, without the terminator
        text: &'a str,
        /// Byte offset of `text` in the source
        offset: usize,
    },
    /// A `prelude { body }` block
    Block {
        /// Text before `{`, trimmed (may be empty)
        prelude: &'a str,
        /// Byte offset of the prelude (or of `{` when the prelude is empty)
        offset: usize,
        /// Raw text between the braces
        body: &'a str,
        /// Statements and blocks inside the body
        children: Vec<Node<'a>>,
    },
}

/// Structural problem found while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub reason: String,
    pub offset: usize,
}

impl SyntaxError {
    fn new(reason: impl Into<String>, offset: usize) -> Self {
        Self {
            reason: reason.into(),
            offset,
        }
    }
}

struct Frame<'a> {
    prelude: &'a str,
    offset: usize,
    body_start: usize,
    children: Vec<Node<'a>>,
}

impl<'a> Frame<'a> {
    fn open(text: &'a str, stmt_start: Option<usize>, brace: usize) -> Self {
        let (prelude, offset) = match stmt_start {
            Some(start) => (text[start..brace].trim_end(), start),
            None => ("", brace),
        };
        Self {
            prelude,
            offset,
            body_start: brace + 1,
            children: Vec::new(),
        }
    }
}

/// Scan `text` into a statement tree.
pub(crate) fn scan(text: &str, syntax: Syntax) -> Result<Vec<Node<'_>>, SyntaxError> {
    let mut stack: Vec<Frame<'_>> = vec![Frame {
        prelude: "",
        offset: 0,
        body_start: 0,
        children: Vec::new(),
    }];
    let mut stmt_start: Option<usize> = None;
    let mut parens = 0usize;
    let mut lex = Lexeme::lexer_with_extras(text, syntax);

    while let Some(lexeme) = lex.next() {
        let span = lex.span();
        let lexeme = lexeme.map_err(|e| SyntaxError::new(e.reason(), span.start))?;
        match lexeme {
            Lexeme::Comment => {}
            Lexeme::DoubleSlash if syntax.line_comments && parens == 0 => {
                let rest = lex.remainder();
                lex.bump(rest.find('\n').unwrap_or(rest.len()));
            }
            Lexeme::OpenParen => {
                stmt_start.get_or_insert(span.start);
                parens += 1;
            }
            Lexeme::CloseParen => {
                stmt_start.get_or_insert(span.start);
                parens = parens.saturating_sub(1);
            }
            Lexeme::Semicolon if parens == 0 => {
                if let Some(start) = stmt_start.take() {
                    push_statement(&mut stack, text, start, span.start);
                }
            }
            // a foreign sigil followed by `{` opens an ordinary block
            Lexeme::Interpolation(false) => {
                let start = *stmt_start.get_or_insert(span.start);
                stack.push(Frame::open(text, Some(start), span.start + 1));
                stmt_start = None;
                parens = 0;
            }
            Lexeme::OpenBrace => {
                stack.push(Frame::open(text, stmt_start.take(), span.start));
                parens = 0;
            }
            Lexeme::CloseBrace => {
                if let Some(start) = stmt_start.take() {
                    push_statement(&mut stack, text, start, span.start);
                }
                if stack.len() == 1 {
                    return Err(SyntaxError::new("unexpected '}'", span.start));
                }
                if let Some(frame) = stack.pop() {
                    let block = Node::Block {
                        prelude: frame.prelude,
                        offset: frame.offset,
                        body: &text[frame.body_start..span.start],
                        children: frame.children,
                    };
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(block);
                    }
                }
                parens = 0;
            }
            _ => {
                stmt_start.get_or_insert(span.start);
            }
        }
    }

    if stack.len() > 1 {
        let offset = stack.last().map_or(0, |f| f.offset);
        return Err(SyntaxError::new("unclosed block", offset));
    }
    if let Some(start) = stmt_start {
        push_statement(&mut stack, text, start, text.len());
    }

    Ok(stack.pop().map(|f| f.children).unwrap_or_default())
}

fn push_statement<'a>(stack: &mut [Frame<'a>], text: &'a str, start: usize, end: usize) {
    let stmt = text[start..end].trim_end();
    if stmt.is_empty() {
        return;
    }
    if let Some(frame) = stack.last_mut() {
        frame.children.push(Node::Statement {
            text: stmt,
            offset: start,
        });
    }
}

/// Remove `/* */` comments from a fragment and trim it. Comment markers
/// inside strings are kept; an unclosed comment runs to the end.
pub(crate) fn strip_block_comments(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut copied = 0;
    let mut lex = Lexeme::lexer(fragment);

    while let Some(lexeme) = lex.next() {
        let span = lex.span();
        match lexeme {
            Ok(Lexeme::Comment) => {
                out.push_str(&fragment[copied..span.start]);
                copied = span.end;
            }
            Err(LexError::UnclosedComment) => {
                out.push_str(&fragment[copied..span.start]);
                copied = fragment.len();
                break;
            }
            _ => {}
        }
    }
    out.push_str(&fragment[copied..]);
    out.trim().to_string()
}

/// Split `name: value` at the first top-level colon.
pub(crate) fn split_declaration(statement: &str) -> Option<(&str, &str)> {
    let colon = statement.find(':')?;
    Some((statement[..colon].trim(), statement[colon + 1..].trim()))
}

/// Whether `name` is a plain identifier (`[A-Za-z0-9_-]+`).
pub(crate) fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Every node in document order, blocks before their children.
pub(crate) fn walk<'n, 'a>(nodes: &'n [Node<'a>], visit: &mut impl FnMut(&'n Node<'a>)) {
    for node in nodes {
        visit(node);
        if let Node::Block {
            children,
            ..
        } = node
        {
            walk(children, visit);
        }
    }
}
