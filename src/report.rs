//! 8-byte boot keyboard reports and the unit-to-report encoder.
//!
//! Report layout (USB HID 1.11, Appendix B.1):
//!
//! | Byte | Meaning |
//! |------|---------|
//! | 0    | modifier bitmask |
//! | 1    | reserved, always 0 |
//! | 2-7  | up to six Usage IDs, 0 = empty slot |

use crate::error::EncodeError;
use crate::keymap::{self, KeyEntry};
use crate::unit::{ComboKey, EmissionUnit};
use tracing::warn;

/// Size of every report written to the device.
pub const REPORT_LEN: usize = 8;

/// Number of Usage ID slots in a report.
pub const KEY_SLOTS: usize = 6;

/// Modifier byte bits.
pub mod modifier {
    pub const CTRL: u8 = 0x01;
    pub const SHIFT: u8 = 0x02;
    pub const ALT: u8 = 0x04;
    pub const GUI: u8 = 0x08;
    pub const RIGHT_SHIFT: u8 = 0x20;
    /// Set for uppercase letters: left and right shift together.
    pub const BOTH_SHIFTS: u8 = SHIFT | RIGHT_SHIFT;
}

/// A boot-protocol keyboard input report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardReport {
    pub modifier: u8,
    pub keys: [u8; KEY_SLOTS],
}

impl KeyboardReport {
    /// The all-zero report sent after every press.
    pub const RELEASE: KeyboardReport = KeyboardReport {
        modifier: 0,
        keys: [0; KEY_SLOTS],
    };

    /// Serialize to the on-wire layout.
    pub fn to_bytes(&self) -> [u8; REPORT_LEN] {
        let mut bytes = [0u8; REPORT_LEN];
        bytes[0] = self.modifier;
        bytes[2..].copy_from_slice(&self.keys);
        bytes
    }

    /// No modifier and nothing in the first key slot.
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keys[0] == 0
    }
}

/// Result of encoding one emission unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoded {
    /// Press report; the caller follows it with [`KeyboardReport::RELEASE`].
    Press(KeyboardReport),
    /// Pause, no report.
    Delay,
}

/// Fills a report slot by slot.
struct ReportBuilder {
    report: KeyboardReport,
    used: usize,
    /// Slot-consuming keys seen, including any past the sixth.
    wanted: usize,
}

impl ReportBuilder {
    fn new() -> Self {
        Self {
            report: KeyboardReport::default(),
            used: 0,
            wanted: 0,
        }
    }

    fn push_usage(&mut self, usage: u8) {
        self.wanted += 1;
        if self.used < KEY_SLOTS {
            self.report.keys[self.used] = usage;
            self.used += 1;
        }
    }

    fn push_entry(&mut self, entry: &KeyEntry) {
        if entry.usage != 0 {
            self.push_usage(entry.usage);
        }
        self.report.modifier |= entry.modifier;
    }

    /// Letters by arithmetic, digits and punctuation by table. Returns false if unmapped.
    fn push_char(&mut self, ch: char) -> bool {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_lowercase() {
            self.push_usage(lower as u8 - b'a' + 0x04);
            if ch != lower {
                self.report.modifier |= modifier::BOTH_SHIFTS;
            }
            return true;
        }
        match keymap::lookup_digit(ch).or_else(|| keymap::lookup_special(ch)) {
            Some(entry) => {
                self.push_entry(entry);
                true
            }
            None => false,
        }
    }

    /// Characters after a backslash only resolve through the special table.
    fn push_escaped(&mut self, ch: char) -> bool {
        match keymap::lookup_special(ch) {
            Some(entry) => {
                self.push_entry(entry);
                true
            }
            None => false,
        }
    }

    fn finish(self, unit: &EmissionUnit) -> Result<KeyboardReport, EncodeError> {
        if self.wanted > KEY_SLOTS {
            return Err(EncodeError::ComboOverflow { keys: self.wanted });
        }
        if self.report.is_empty() {
            return Err(EncodeError::Unresolved {
                unit: unit.to_source(),
            });
        }
        Ok(self.report)
    }
}

/// Encode one emission unit.
///
/// `Literal`, `Escaped` and `Combo` produce a single press report, `Delay`
/// produces none. Unmapped combo members are logged and left out; the unit as a
/// whole fails with [`EncodeError::Unresolved`] only when the report stays empty.
///
/// # Errors
///
/// [`EncodeError::Unresolved`] if nothing maps, [`EncodeError::ComboOverflow`]
/// if a combo needs more than six key slots.
///
/// # Example
///
/// ```
/// use string2hid::{EmissionUnit, Encoded, encode};
///
/// let Encoded::Press(report) = encode(&EmissionUnit::Literal('A')).unwrap() else {
///     unreachable!()
/// };
/// assert_eq!(report.to_bytes(), [0x22, 0, 0x04, 0, 0, 0, 0, 0]);
/// ```
pub fn encode(unit: &EmissionUnit) -> Result<Encoded, EncodeError> {
    let mut builder = ReportBuilder::new();
    match unit {
        EmissionUnit::Delay => return Ok(Encoded::Delay),
        EmissionUnit::Literal(ch) => {
            builder.push_char(*ch);
        }
        EmissionUnit::Escaped(ch) => {
            builder.push_escaped(*ch);
        }
        EmissionUnit::Combo(keys) => {
            for key in keys {
                let resolved = match *key {
                    ComboKey::Literal(ch) => builder.push_char(ch),
                    ComboKey::Escaped(ch) => builder.push_escaped(ch),
                };
                if !resolved {
                    warn!(key = ?key, "skipping unmapped combo key");
                }
            }
        }
    }
    builder.finish(unit).map(Encoded::Press)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn press(unit: EmissionUnit) -> KeyboardReport {
        match encode(&unit).unwrap() {
            Encoded::Press(report) => report,
            Encoded::Delay => panic!("expected a press report for {unit:?}"),
        }
    }

    #[test]
    fn test_release_is_all_zero() {
        assert_eq!(KeyboardReport::RELEASE.to_bytes(), [0u8; REPORT_LEN]);
    }

    #[test]
    fn test_lowercase_letter() {
        assert_eq!(
            press(EmissionUnit::Literal('a')).to_bytes(),
            [0, 0, 0x04, 0, 0, 0, 0, 0]
        );
        assert_eq!(press(EmissionUnit::Literal('z')).keys[0], 0x1d);
    }

    #[test]
    fn test_uppercase_sets_both_shifts() {
        let report = press(EmissionUnit::Literal('Q'));
        assert_eq!(report.modifier, 0x22);
        assert_eq!(report.keys[0], b'q' - b'a' + 4);
    }

    #[test]
    fn test_digits() {
        assert_eq!(press(EmissionUnit::Literal('0')).keys[0], 0x27);
        assert_eq!(press(EmissionUnit::Literal('1')).keys[0], 0x1e);
    }

    #[test]
    fn test_punctuation() {
        let report = press(EmissionUnit::Literal('*'));
        assert_eq!(report.to_bytes(), [0x20, 0, 0x25, 0, 0, 0, 0, 0]);
        assert_eq!(press(EmissionUnit::Literal(' ')).keys[0], 0x2c);
    }

    #[test]
    fn test_escaped_enter() {
        assert_eq!(
            press(EmissionUnit::Escaped('n')).to_bytes(),
            [0, 0, 0x28, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_escaped_alt_is_modifier_only() {
        assert_eq!(
            press(EmissionUnit::Escaped('a')).to_bytes(),
            [0x04, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_escaped_backslash() {
        assert_eq!(press(EmissionUnit::Escaped('\\')).keys[0], 0x31);
    }

    #[test]
    fn test_escaped_letter_is_not_arithmetic() {
        let err = encode(&EmissionUnit::Escaped('x')).unwrap_err();
        assert_eq!(
            err,
            EncodeError::Unresolved {
                unit: "\\x".to_string()
            }
        );
        assert!(encode(&EmissionUnit::Escaped('1')).is_err());
    }

    #[test]
    fn test_delay_has_no_report() {
        assert_eq!(encode(&EmissionUnit::Delay).unwrap(), Encoded::Delay);
    }

    #[test]
    fn test_unresolved_literal() {
        let err = encode(&EmissionUnit::Literal('é')).unwrap_err();
        assert!(err.is_recoverable());
        assert!(encode(&EmissionUnit::Literal('\t')).is_err());
    }

    #[test]
    fn test_combo_slots_in_order() {
        assert_eq!(
            press(EmissionUnit::combo("ab")).to_bytes(),
            [0, 0, 0x04, 0x05, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_combo_alt_tab() {
        let unit = EmissionUnit::Combo(vec![ComboKey::Escaped('a'), ComboKey::Escaped('t')]);
        assert_eq!(press(unit).to_bytes(), [0x04, 0, 0x2b, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_combo_modifiers_accumulate() {
        let unit = EmissionUnit::Combo(vec![
            ComboKey::Escaped('c'),
            ComboKey::Escaped('a'),
            ComboKey::Escaped('d'),
        ]);
        assert_eq!(press(unit).to_bytes(), [0x05, 0, 0x4c, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_combo_uppercase_keeps_ctrl() {
        let unit = EmissionUnit::Combo(vec![ComboKey::Escaped('c'), ComboKey::Literal('A')]);
        assert_eq!(press(unit).to_bytes(), [0x23, 0, 0x04, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_combo_six_keys_fit() {
        assert_eq!(
            press(EmissionUnit::combo("abcdef")).to_bytes(),
            [0, 0, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09]
        );
    }

    #[test]
    fn test_combo_modifiers_do_not_use_slots() {
        let mut keys = vec![ComboKey::Escaped('c'), ComboKey::Escaped('s')];
        keys.extend("abcdef".chars().map(ComboKey::Literal));
        let report = press(EmissionUnit::Combo(keys));
        assert_eq!(report.modifier, 0x03);
        assert_eq!(report.keys, [0x04, 0x05, 0x06, 0x07, 0x08, 0x09]);
    }

    #[test]
    fn test_combo_overflow() {
        assert_eq!(
            encode(&EmissionUnit::combo("abcdefg")),
            Err(EncodeError::ComboOverflow { keys: 7 })
        );
        assert!(!EncodeError::ComboOverflow { keys: 7 }.is_recoverable());
    }

    #[test]
    #[traced_test]
    fn test_combo_skips_unmapped_member() {
        let unit = EmissionUnit::Combo(vec![ComboKey::Literal('é'), ComboKey::Literal('b')]);
        assert_eq!(press(unit).keys[0], 0x05);
        assert!(logs_contain("skipping unmapped combo key"));
    }

    #[test]
    fn test_combo_unmapped_member_uses_no_slot() {
        let mut keys: Vec<ComboKey> = "abcdef".chars().map(ComboKey::Literal).collect();
        keys.push(ComboKey::Escaped('x'));
        assert_eq!(
            press(EmissionUnit::Combo(keys)).to_bytes(),
            [0, 0, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09]
        );
        assert_eq!(
            encode(&EmissionUnit::combo("abcdefG")),
            Err(EncodeError::ComboOverflow { keys: 7 })
        );
    }

    #[test]
    fn test_empty_combo_unresolved() {
        assert!(matches!(
            encode(&EmissionUnit::Combo(Vec::new())),
            Err(EncodeError::Unresolved { .. })
        ));
    }
}
