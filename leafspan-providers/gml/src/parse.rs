//! Turns GML tokens into a tree of key/value entries.

use crate::{
    errors::GmlError,
    lexer::{Token, TokenKind},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Value<'a> {
    Number(&'a str),
    Str(&'a str),
    List(Vec<Entry<'a>>),
}

impl<'a> Value<'a> {
    /// Renders the value the way it would appear in an error message.
    pub(crate) fn raw(&self) -> String {
        match self {
            Self::Number(raw) => (*raw).to_owned(),
            Self::Str(raw) => format!("\"{raw}\""),
            Self::List(_) => "[...]".to_owned(),
        }
    }

    pub(crate) fn as_list(&self) -> Option<&[Entry<'a>]> {
        match self {
            Self::List(entries) => Some(entries),
            Self::Number(_) | Self::Str(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Entry<'a> {
    pub(crate) key: &'a str,
    pub(crate) value: Value<'a>,
}

/// Returns the first value stored under `key`.
pub(crate) fn lookup<'e, 'a>(entries: &'e [Entry<'a>], key: &str) -> Option<&'e Value<'a>> {
    entries
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| &entry.value)
}

pub(crate) fn parse<'a>(tokens: &[Token<'a>]) -> Result<Vec<Entry<'a>>, GmlError> {
    let mut cursor = Cursor { tokens, position: 0 };
    cursor.entries(None)
}

struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    position: usize,
}

impl<'a> Cursor<'_, 'a> {
    fn advance(&mut self) -> Option<&Token<'a>> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Reads entries until the matching `]`, or to the end of input when
    /// `opened_at` is `None`.
    fn entries(&mut self, opened_at: Option<usize>) -> Result<Vec<Entry<'a>>, GmlError> {
        let mut entries = Vec::new();
        loop {
            let Some(token) = self.advance().cloned() else {
                return match opened_at {
                    Some(offset) => Err(GmlError::UnbalancedBrackets { offset }),
                    None => Ok(entries),
                };
            };
            match token.kind {
                TokenKind::Close if opened_at.is_some() => return Ok(entries),
                TokenKind::Close => {
                    return Err(GmlError::UnbalancedBrackets {
                        offset: token.offset,
                    });
                }
                TokenKind::Key(key) => {
                    let value = self.value(token.offset)?;
                    entries.push(Entry { key, value });
                }
                TokenKind::Number(_) | TokenKind::Str(_) | TokenKind::Open => {
                    return Err(GmlError::Syntax {
                        offset: token.offset,
                        expected: "a key",
                    });
                }
            }
        }
    }

    fn value(&mut self, key_offset: usize) -> Result<Value<'a>, GmlError> {
        let Some(token) = self.advance().cloned() else {
            return Err(GmlError::Syntax {
                offset: key_offset,
                expected: "a value after the key",
            });
        };
        match token.kind {
            TokenKind::Number(raw) => Ok(Value::Number(raw)),
            TokenKind::Str(raw) => Ok(Value::Str(raw)),
            TokenKind::Open => self.entries(Some(token.offset)).map(Value::List),
            TokenKind::Key(_) | TokenKind::Close => Err(GmlError::Syntax {
                offset: token.offset,
                expected: "a value",
            }),
        }
    }
}
