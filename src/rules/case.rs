// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Case styles used by the `*-case` rules.

/// A named case style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Case {
    LowerCase,
    UpperCase,
    CamelCase,
    KebabCase,
    PascalCase,
    SentenceCase,
    SnakeCase,
    StartCase,
}

impl Case {
    /// Get the string representation used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Case::LowerCase => "lower-case",
            Case::UpperCase => "upper-case",
            Case::CamelCase => "camel-case",
            Case::KebabCase => "kebab-case",
            Case::PascalCase => "pascal-case",
            Case::SentenceCase => "sentence-case",
            Case::SnakeCase => "snake-case",
            Case::StartCase => "start-case",
        }
    }

    /// Get all case styles.
    pub fn all() -> &'static [Case] {
        &[
            Case::LowerCase,
            Case::UpperCase,
            Case::CamelCase,
            Case::KebabCase,
            Case::PascalCase,
            Case::SentenceCase,
            Case::SnakeCase,
            Case::StartCase,
        ]
    }

    /// Check whether `text` is written in this case style.
    ///
    /// Characters without case (digits, punctuation) never disqualify a
    /// match on their own.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Case::LowerCase => text == text.to_lowercase(),
            Case::UpperCase => text == text.to_uppercase(),
            Case::CamelCase => {
                !has_separator(text) && starts_with(text, char::is_lowercase)
            }
            Case::PascalCase => {
                !has_separator(text) && starts_with(text, char::is_uppercase)
            }
            Case::KebabCase => {
                text == text.to_lowercase() && !text.contains([' ', '\t', '_'])
            }
            Case::SnakeCase => {
                text == text.to_lowercase() && !text.contains([' ', '\t', '-'])
            }
            Case::SentenceCase => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => {
                        !first.is_lowercase() && chars.as_str() == chars.as_str().to_lowercase()
                    }
                    None => true,
                }
            }
            Case::StartCase => text
                .split_whitespace()
                .all(|word| starts_with(word, |c| !c.is_lowercase())),
        }
    }
}

fn has_separator(text: &str) -> bool {
    text.contains(|c: char| c.is_whitespace() || c == '-' || c == '_')
}

fn starts_with(text: &str, pred: impl Fn(char) -> bool) -> bool {
    text.chars().next().map(pred).unwrap_or(true)
}

impl std::str::FromStr for Case {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Case::all()
            .iter()
            .copied()
            .find(|case| case.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
