//! Static ASCII to HID Usage ID tables (US layout).
//!
//! Letters are not tabulated: their Usage ID is `lowercase - 'a' + 0x04`.
//! See the USB HID Usage Tables, section 10 (Keyboard/Keypad page).

use crate::report::modifier;

/// One table row: source character, Usage ID and the modifier bits needed to produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    pub ch: char,
    pub usage: u8,
    pub modifier: u8,
}

const fn key(ch: char, usage: u8, modifier: u8) -> KeyEntry {
    KeyEntry {
        ch,
        usage,
        modifier,
    }
}

const SHIFTED: u8 = modifier::RIGHT_SHIFT;

/// Digits `0`-`9`, indexed by numeric value.
pub static DIGIT_KEYS: [KeyEntry; 10] = [
    key('0', 0x27, 0),
    key('1', 0x1e, 0),
    key('2', 0x1f, 0),
    key('3', 0x20, 0),
    key('4', 0x21, 0),
    key('5', 0x22, 0),
    key('6', 0x23, 0),
    key('7', 0x24, 0),
    key('8', 0x25, 0),
    key('9', 0x26, 0),
];

/// Punctuation, space, and the named control keys reachable through a backslash.
///
/// Lookup is exact and case-sensitive. Pure modifier keys (`c`, `s`, `a`, `g`)
/// carry Usage ID 0 and only contribute their modifier bit.
pub static SPECIAL_KEYS: &[KeyEntry] = &[
    key('!', 0x1e, SHIFTED),
    key('@', 0x1f, SHIFTED),
    key('#', 0x20, SHIFTED),
    key('$', 0x21, SHIFTED),
    key('%', 0x22, SHIFTED),
    key('^', 0x23, SHIFTED),
    key('&', 0x24, SHIFTED),
    key('*', 0x25, SHIFTED),
    key('(', 0x26, SHIFTED),
    key(')', 0x27, SHIFTED),
    key('-', 0x2d, 0),
    key('_', 0x2d, SHIFTED),
    key('+', 0x2e, SHIFTED),
    key('=', 0x2e, 0),
    key('[', 0x2f, 0),
    key('{', 0x2f, SHIFTED),
    key(']', 0x30, 0),
    key('}', 0x30, SHIFTED),
    key('\\', 0x31, 0),
    key('|', 0x31, SHIFTED),
    key(';', 0x33, 0),
    key(':', 0x33, SHIFTED),
    key('\'', 0x34, 0),
    key('"', 0x34, SHIFTED),
    key(',', 0x36, 0),
    key('<', 0x36, SHIFTED),
    key('.', 0x37, 0),
    key('>', 0x37, SHIFTED),
    key('/', 0x38, 0),
    key('?', 0x38, SHIFTED),
    key('`', 0x35, 0),
    key('~', 0x35, SHIFTED),
    key(' ', 0x2c, 0),
    key('n', 0x28, 0), // enter
    key('c', 0x00, modifier::CTRL), // ctrl
    key('s', 0x00, modifier::SHIFT), // shift
    key('a', 0x00, modifier::ALT), // alt
    key('g', 0x00, modifier::GUI), // gui/win
    key('t', 0x2b, 0), // tab
    key('d', 0x4c, 0), // delete
    key('b', 0x2a, 0), // backspace
    key('e', 0x29, 0), // escape
];

/// Look up a decimal digit.
pub fn lookup_digit(ch: char) -> Option<&'static KeyEntry> {
    ch.to_digit(10).map(|d| &DIGIT_KEYS[d as usize])
}

/// Look up a special character by exact match; the first entry wins.
pub fn lookup_special(ch: char) -> Option<&'static KeyEntry> {
    SPECIAL_KEYS.iter().find(|entry| entry.ch == ch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_digit_table() {
        assert_eq!(lookup_digit('0').unwrap().usage, 0x27);
        assert_eq!(lookup_digit('1').unwrap().usage, 0x1e);
        assert_eq!(lookup_digit('9').unwrap().usage, 0x26);
        assert!(lookup_digit('a').is_none());
        for (i, entry) in DIGIT_KEYS.iter().enumerate() {
            assert_eq!(entry.ch.to_digit(10), Some(i as u32));
            assert_eq!(entry.modifier, 0);
        }
    }

    #[test]
    fn test_source_chars_unique() {
        let digits: HashSet<char> = DIGIT_KEYS.iter().map(|e| e.ch).collect();
        assert_eq!(digits.len(), DIGIT_KEYS.len());
        let specials: HashSet<char> = SPECIAL_KEYS.iter().map(|e| e.ch).collect();
        assert_eq!(specials.len(), SPECIAL_KEYS.len());
    }

    #[test]
    fn test_special_lookup_case_sensitive() {
        assert_eq!(lookup_special('n').unwrap().usage, 0x28);
        assert!(lookup_special('N').is_none());
        assert!(lookup_special('x').is_none());
    }

    #[test]
    fn test_modifier_keys_have_no_usage() {
        for ch in ['c', 's', 'a', 'g'] {
            let entry = lookup_special(ch).unwrap();
            assert_eq!(entry.usage, 0, "{ch}");
            assert_ne!(entry.modifier, 0, "{ch}");
        }
    }

    #[test]
    fn test_shifted_punctuation() {
        let bang = lookup_special('!').unwrap();
        assert_eq!((bang.usage, bang.modifier), (0x1e, 0x20));
        let space = lookup_special(' ').unwrap();
        assert_eq!((space.usage, space.modifier), (0x2c, 0));
    }
}
