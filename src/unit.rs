//! Emission units produced by the escape parser.

/// One member of a simultaneous-press group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboKey {
    /// Plain character inside the group, e.g. `f` in `\"\af\"`.
    Literal(char),
    /// Character that followed a backslash inside the group, e.g. `a` in `\"\af\"`.
    Escaped(char),
}

/// A single parsed instruction derived from the input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmissionUnit {
    /// One ordinary printable character.
    Literal(char),

    /// The character following a single backslash (`n` for enter, `a` for alt, ...).
    Escaped(char),

    /// Pause before the next unit (`\-`).
    Delay,

    /// Keys pressed together, delimited by `\"` ... `\"`.
    Combo(Vec<ComboKey>),
}

impl EmissionUnit {
    /// Build a combo from plain characters.
    pub fn combo(chars: &str) -> Self {
        EmissionUnit::Combo(chars.chars().map(ComboKey::Literal).collect())
    }

    /// Render the unit back into the escape syntax it was parsed from.
    pub fn to_source(&self) -> String {
        match self {
            EmissionUnit::Literal(ch) => ch.to_string(),
            EmissionUnit::Escaped(ch) => format!("\\{ch}"),
            EmissionUnit::Delay => "\\-".to_string(),
            EmissionUnit::Combo(keys) => {
                let mut out = String::from("\\\"");
                for key in keys {
                    match key {
                        ComboKey::Literal(ch) => out.push(*ch),
                        ComboKey::Escaped(ch) => {
                            out.push('\\');
                            out.push(*ch);
                        }
                    }
                }
                out.push_str("\\\"");
                out
            }
        }
    }
}
