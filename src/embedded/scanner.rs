//! Minimal markup tokenizer.
//!
//! Recognises exactly what region extraction needs: start tags with their
//! attributes, end tags, comments, and the raw text bodies of `<style>` and
//! `<script>` elements. Everything else is skipped as content. The scanner
//! is a single forward pass and never fails; malformed markup produces
//! fewer tokens, not errors.
//!
//! Content and the inside of a start tag are lexed by two `logos` token sets
//! ([`Markup`] and [`TagLexeme`]); raw text bodies are skipped to their
//! closing tag with a case-insensitive pattern.

use logos::{Lexer, Logos};
use regex::Regex;
use std::sync::LazyLock;

static STYLE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</style").expect("style end-tag pattern is valid"));
static SCRIPT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</script").expect("script end-tag pattern is valid"));

/// A token produced by [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name` of a start tag
    StartTag(&'a str),
    /// An attribute name inside a start tag
    AttributeName(&'a str),
    /// An attribute value without its quotes, with the byte span of that
    /// unquoted text
    AttributeValue {
        /// Value text
        value: &'a str,
        /// Byte offset of the first byte of `value`
        start: usize,
        /// Byte offset just past `value`
        end: usize,
    },
    /// `>` or `/>` closing a start tag
    StartTagClose,
    /// `</name>`
    EndTag(&'a str),
    /// Non-empty raw body of a `<style>` element
    Styles {
        /// Byte offset of the first body byte
        start: usize,
        /// Byte offset just past the body
        end: usize,
    },
}

/// Tokens between tags.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Markup<'s> {
    #[token("<!--", skip_comment)]
    Comment,

    /// Doctype and processing instructions
    #[token("<!", skip_declaration)]
    #[token("<?", skip_declaration)]
    Declaration,

    #[regex(r"<[a-zA-Z][^ \t\r\n\f/>]*", |lex| &lex.slice()[1..])]
    StartTag(&'s str),

    #[regex(r"</[a-zA-Z][^ \t\r\n\f>]*", end_tag)]
    EndTag(&'s str),

    #[token("<")]
    #[regex(r"[^<]+")]
    Text,
}

fn skip_comment<'s>(lex: &mut Lexer<'s, Markup<'s>>) {
    let rest = lex.remainder();
    lex.bump(rest.find("-->").map_or(rest.len(), |end| end + 3));
}

fn skip_declaration<'s>(lex: &mut Lexer<'s, Markup<'s>>) {
    let rest = lex.remainder();
    lex.bump(rest.find('>').map_or(rest.len(), |end| end + 1));
}

fn end_tag<'s>(lex: &mut Lexer<'s, Markup<'s>>) -> &'s str {
    let name = &lex.slice()[2..];
    skip_declaration(lex);
    name
}

/// Unquoted value span relative to the tag lexer's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ValueSpan<'s> {
    text: &'s str,
    start: usize,
    end: usize,
}

/// Tokens inside a start tag.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"/")]
enum TagLexeme<'s> {
    #[token(">")]
    Close,

    #[token("/>")]
    SelfClose,

    /// Start of the next tag; the current one was never closed
    #[token("<")]
    Open,

    #[regex(r#"[^ \t\r\n\f"'<>/=]+"#, |lex| lex.slice())]
    Name(&'s str),

    #[regex(r"=[ \t\r\n\f]*", attribute_value)]
    Value(Option<ValueSpan<'s>>),

    #[token("\"")]
    #[token("'")]
    StrayQuote,
}

/// Consume the value after `=`. A quoted value runs to its closing quote, or
/// to the end of input when the quote is never closed; the quotes are not
/// part of the span. An unquoted value runs to whitespace or `>`.
fn attribute_value<'s>(lex: &mut Lexer<'s, TagLexeme<'s>>) -> Option<ValueSpan<'s>> {
    let rest = lex.remainder();
    let at = lex.span().end;

    let (offset, len, consumed) = match rest.as_bytes().first() {
        Some(&quote @ (b'"' | b'\'')) => match rest[1..].find(char::from(quote)) {
            Some(close) => (1, close, close + 2),
            None => (1, rest.len() - 1, rest.len()),
        },
        _ => {
            let len = rest.find(|c: char| c.is_ascii_whitespace() || c == '>').unwrap_or(rest.len());
            (0, len, len)
        }
    };
    lex.bump(consumed);

    (consumed > 0).then(|| ValueSpan {
        text: &rest[offset..offset + len],
        start: at + offset,
        end: at + offset + len,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Content,
    WithinTag,
    StyleContent,
    ScriptContent,
}

/// Forward-only tokenizer over a markup document.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    state: State,
    tag: &'a str,
}

impl<'a> Scanner<'a> {
    /// Start scanning `text` from the beginning.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            state: State::Content,
            tag: "",
        }
    }

    fn scan_content(&mut self) -> Option<Token<'a>> {
        let base = self.pos;
        let mut lex = Markup::lexer(&self.text[base..]);

        while let Some(lexeme) = lex.next() {
            self.pos = base + lex.span().end;
            match lexeme {
                Ok(Markup::StartTag(name)) => {
                    self.tag = name;
                    self.state = State::WithinTag;
                    return Some(Token::StartTag(name));
                }
                Ok(Markup::EndTag(name)) => return Some(Token::EndTag(name)),
                Ok(_) | Err(()) => {}
            }
        }
        self.pos = self.text.len();
        None
    }

    fn scan_tag(&mut self) -> Option<Token<'a>> {
        let base = self.pos;
        let mut lex = TagLexeme::lexer(&self.text[base..]);

        while let Some(lexeme) = lex.next() {
            let span = lex.span();
            self.pos = base + span.end;
            match lexeme {
                Ok(TagLexeme::Close) => {
                    self.state = if self.tag.eq_ignore_ascii_case("style") {
                        State::StyleContent
                    } else if self.tag.eq_ignore_ascii_case("script") {
                        State::ScriptContent
                    } else {
                        State::Content
                    };
                    return Some(Token::StartTagClose);
                }
                Ok(TagLexeme::SelfClose) => {
                    self.state = State::Content;
                    return Some(Token::StartTagClose);
                }
                // an unclosed tag ends where the next one starts
                Ok(TagLexeme::Open) => {
                    self.pos = base + span.start;
                    self.state = State::Content;
                    return None;
                }
                Ok(TagLexeme::Name(name)) => return Some(Token::AttributeName(name)),
                Ok(TagLexeme::Value(Some(value))) => {
                    return Some(Token::AttributeValue {
                        value: value.text,
                        start: base + value.start,
                        end: base + value.end,
                    });
                }
                Ok(TagLexeme::Value(None) | TagLexeme::StrayQuote) | Err(()) => {}
            }
        }
        self.pos = self.text.len();
        None
    }

    /// Skip a raw text body up to `close`, returning its span.
    fn skip_raw_text(&mut self, close: &Regex) -> (usize, usize) {
        let start = self.pos;
        let end = close.find(&self.text[start..]).map_or(self.text.len(), |m| start + m.start());
        self.pos = end;
        self.state = State::Content;
        (start, end)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let token = match self.state {
                State::Content => return self.scan_content(),
                State::WithinTag => self.scan_tag(),
                State::StyleContent => {
                    let (start, end) = self.skip_raw_text(&STYLE_END);
                    (end > start).then_some(Token::Styles {
                        start,
                        end,
                    })
                }
                State::ScriptContent => {
                    self.skip_raw_text(&SCRIPT_END);
                    None
                }
            };
            if token.is_some() {
                return token;
            }
        }
        None
    }
}
