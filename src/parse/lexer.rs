//! Tokenizer for the declaration script syntax.

use std::iter::Peekable;
use std::str::CharIndices;

/// A lexical token with its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub len: usize,
}

/// Kinds of tokens the script syntax contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A bare or quoted word (command name or argument)
    Word { text: String, quoted: bool },
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
}

impl Token {
    /// The word text, if this token is a word.
    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Lexical error: a quoted argument with no closing quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedString {
    /// Byte offset of the opening quote
    pub offset: usize,
}

/// Tokenize a declaration script.
///
/// Comments run from `#` to end of line. Quoted words may contain any
/// character; `\"`, `\\`, `\n`, and `\t` escapes are recognized.
pub fn tokenize(src: &str) -> Result<Vec<Token>, UnterminatedString> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                skip_comment(&mut chars);
            }
            '(' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::OpenParen,
                    offset,
                    len: 1,
                });
            }
            ')' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::CloseParen,
                    offset,
                    len: 1,
                });
            }
            '"' => {
                tokens.push(lex_quoted(&mut chars)?);
            }
            _ => {
                tokens.push(lex_bare(src, &mut chars));
            }
        }
    }

    Ok(tokens)
}

fn skip_comment(chars: &mut Peekable<CharIndices>) {
    for (_, ch) in chars.by_ref() {
        if ch == '\n' {
            break;
        }
    }
}

fn lex_quoted(chars: &mut Peekable<CharIndices>) -> Result<Token, UnterminatedString> {
    let (start, _) = chars.next().expect("caller peeked the opening quote");
    let mut text = String::new();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '"' => {
                return Ok(Token {
                    kind: TokenKind::Word { text, quoted: true },
                    offset: start,
                    len: offset + 1 - start,
                });
            }
            '\\' => match chars.next() {
                Some((_, 'n')) => text.push('\n'),
                Some((_, 't')) => text.push('\t'),
                Some((_, escaped)) => text.push(escaped),
                None => return Err(UnterminatedString { offset: start }),
            },
            _ => text.push(ch),
        }
    }

    Err(UnterminatedString { offset: start })
}

fn lex_bare(src: &str, chars: &mut Peekable<CharIndices>) -> Token {
    let (start, first) = chars.next().expect("caller peeked the first character");
    let mut end = start + first.len_utf8();

    while let Some(&(offset, ch)) = chars.peek() {
        if ch.is_whitespace() || matches!(ch, '(' | ')' | '"' | '#') {
            break;
        }
        chars.next();
        end = offset + ch.len_utf8();
    }

    Token {
        kind: TokenKind::Word {
            text: src[start..end].to_string(),
            quoted: false,
        },
        offset: start,
        len: end - start,
    }
}
