//! Tokeniser for the subset of GML the provider reads.
//!
//! Keys are identifiers, values are numbers, quoted strings or bracketed
//! lists. `#` starts a comment that runs to the end of the line. Numbers
//! are kept as text; only ids are ever interpreted.

use crate::errors::GmlError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    Key(&'a str),
    Number(&'a str),
    Str(&'a str),
    Open,
    Close,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) kind: TokenKind<'a>,
    pub(crate) offset: usize,
}

pub(crate) fn tokenize(text: &str) -> Result<Vec<Token<'_>>, GmlError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while chars.next_if(|&(_, c)| c != '\n').is_some() {}
            }
            '[' | ']' => {
                chars.next();
                let kind = if ch == '[' {
                    TokenKind::Open
                } else {
                    TokenKind::Close
                };
                tokens.push(Token { kind, offset });
            }
            '"' => {
                chars.next();
                let start = offset + 1;
                let end = loop {
                    match chars.next() {
                        Some((end, '"')) => break end,
                        Some(_) => {}
                        None => return Err(GmlError::UnterminatedString { offset }),
                    }
                };
                tokens.push(Token {
                    kind: TokenKind::Str(slice(text, start, end)),
                    offset,
                });
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let end = take_while(&mut chars, text.len(), |c| {
                    c.is_ascii_alphanumeric() || c == '_'
                });
                tokens.push(Token {
                    kind: TokenKind::Key(slice(text, offset, end)),
                    offset,
                });
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                let end = take_while(&mut chars, text.len(), |c| {
                    c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
                });
                tokens.push(Token {
                    kind: TokenKind::Number(slice(text, offset, end)),
                    offset,
                });
            }
            found => return Err(GmlError::UnexpectedCharacter { offset, found }),
        }
    }
    Ok(tokens)
}

fn take_while(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    len: usize,
    accept: impl Fn(char) -> bool,
) -> usize {
    while chars.next_if(|&(_, c)| accept(c)).is_some() {}
    chars.peek().map_or(len, |&(end, _)| end)
}

/// Token boundaries always fall on char boundaries.
fn slice(text: &str, start: usize, end: usize) -> &str {
    text.get(start..end).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn kinds(text: &str) -> Vec<TokenKind<'_>> {
        tokenize(text)
            .expect("input must tokenise")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[rstest]
    fn splits_keys_values_and_brackets() {
        assert_eq!(
            kinds("node [ id 3 label \"a b\" ]"),
            vec![
                TokenKind::Key("node"),
                TokenKind::Open,
                TokenKind::Key("id"),
                TokenKind::Number("3"),
                TokenKind::Key("label"),
                TokenKind::Str("a b"),
                TokenKind::Close,
            ],
        );
    }

    #[rstest]
    #[case("-12", "-12")]
    #[case("0.5", "0.5")]
    #[case("1e-3", "1e-3")]
    fn numbers_keep_their_text(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(kinds(raw), vec![TokenKind::Number(expected)]);
    }

    #[rstest]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            kinds("# header [\nid 1 # trailing ]\n"),
            vec![TokenKind::Key("id"), TokenKind::Number("1")],
        );
    }

    #[rstest]
    fn records_byte_offsets() {
        let tokens = tokenize("a  [").expect("input must tokenise");
        let offsets: Vec<usize> = tokens.iter().map(|token| token.offset).collect();
        assert_eq!(offsets, vec![0, 3]);
    }

    #[rstest]
    fn strings_may_hold_brackets_and_non_ascii() {
        assert_eq!(kinds("label \"[é]\""), vec![TokenKind::Key("label"), TokenKind::Str("[é]")]);
    }

    #[rstest]
    fn rejects_unterminated_strings() {
        let err = tokenize("label \"open").expect_err("string must terminate");
        assert!(matches!(err, GmlError::UnterminatedString { offset: 6 }));
    }

    #[rstest]
    fn rejects_stray_characters() {
        let err = tokenize("id 1 ; 2").expect_err("semicolon is not GML");
        assert!(matches!(
            err,
            GmlError::UnexpectedCharacter {
                offset: 5,
                found: ';'
            }
        ));
    }
}
