//! Escape-grammar parser.
//!
//! The top-level entry points are [`Parser`] (lazy) and [`parse_str`] (collected).
//!
//! | Input | Unit |
//! |-------|------|
//! | `x` | [`EmissionUnit::Literal`] |
//! | `\x` | [`EmissionUnit::Escaped`] |
//! | `\-` | [`EmissionUnit::Delay`] |
//! | `\"...\"` | [`EmissionUnit::Combo`] |
//!
//! Inside a combo a backslash always takes the next character with it: `\"`
//! closes the group, any other `\x` becomes [`ComboKey::Escaped`]. A `\"`
//! can therefore never appear as a member; use the plain `"` character.

use crate::error::ParseError;
use crate::unit::{ComboKey, EmissionUnit};
use anyhow::{Context as _, Result, anyhow};
use std::str::CharIndices;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    AfterBackslash,
    InCombo,
    AfterComboBackslash,
}

/// Lazy, single-pass iterator over the emission units of an input string.
///
/// Yields at most one error, after which it is exhausted.
///
/// # Example
///
/// ```
/// use string2hid::{EmissionUnit, Parser};
///
/// let units: Vec<_> = Parser::new(r"a\-b").collect::<Result<_, _>>().unwrap();
/// assert_eq!(
///     units,
///     vec![EmissionUnit::Literal('a'), EmissionUnit::Delay, EmissionUnit::Literal('b')]
/// );
/// ```
pub struct Parser<'a> {
    chars: CharIndices<'a>,
    failed: bool,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices(),
            failed: false,
        }
    }

    fn fail(&mut self, err: ParseError) -> Option<Result<EmissionUnit, ParseError>> {
        self.failed = true;
        Some(Err(err))
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<EmissionUnit, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut state = State::Normal;
        let mut escape_at = 0;
        let mut combo = Vec::new();

        loop {
            let Some((pos, ch)) = self.chars.next() else {
                return match state {
                    State::Normal => None,
                    State::AfterBackslash => self.fail(ParseError::TrailingBackslash {
                        position: escape_at,
                    }),
                    State::InCombo | State::AfterComboBackslash => {
                        self.fail(ParseError::UnterminatedCombo {
                            position: escape_at,
                        })
                    }
                };
            };

            state = match state {
                State::Normal if ch == '\\' => {
                    escape_at = pos;
                    State::AfterBackslash
                }
                State::Normal => return Some(Ok(EmissionUnit::Literal(ch))),
                State::AfterBackslash => match ch {
                    '-' => return Some(Ok(EmissionUnit::Delay)),
                    '"' => State::InCombo,
                    other => return Some(Ok(EmissionUnit::Escaped(other))),
                },
                State::InCombo if ch == '\\' => State::AfterComboBackslash,
                State::InCombo => {
                    combo.push(ComboKey::Literal(ch));
                    State::InCombo
                }
                State::AfterComboBackslash if ch == '"' => {
                    return Some(Ok(EmissionUnit::Combo(combo)));
                }
                State::AfterComboBackslash => {
                    combo.push(ComboKey::Escaped(ch));
                    State::InCombo
                }
            };
        }
    }
}

/// Parse a whole input string into emission units.
///
/// # Errors
///
/// Returns the first [`ParseError`]: a trailing lone backslash or a combo
/// without its closing `\"`.
///
/// # Example
///
/// ```
/// use string2hid::{EmissionUnit, parse_str};
///
/// let units = parse_str(r#"\"ab\""#).unwrap();
/// assert_eq!(units, vec![EmissionUnit::combo("ab")]);
/// ```
pub fn parse_str(input: &str) -> Result<Vec<EmissionUnit>, ParseError> {
    Parser::new(input).collect()
}

/// Parse a duration string: `1s`, `500ms`, `1.5s`.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if let Some(ms_str) = s.strip_suffix("ms") {
        let ms: u64 = ms_str
            .trim()
            .parse()
            .context("Invalid milliseconds value")?;
        Ok(Duration::from_millis(ms))
    } else if let Some(s_str) = s.strip_suffix('s') {
        let secs: f64 = s_str.trim().parse().context("Invalid seconds value")?;
        Duration::try_from_secs_f64(secs).context("Invalid seconds value")
    } else {
        Err(anyhow!("Duration must end with 's' or 'ms', got: {}", s))
    }
}
