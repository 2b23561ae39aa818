//! Text patterns shared by request rules and the store schema.

use std::sync::LazyLock;

use regex::Regex;

static HEXADECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]+$").expect("static regex"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static regex")
});

// One expression per requirement; a password is strong when all match.
static STRONG_PASSWORD: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [r"[a-z]", r"[A-Z]", r"[0-9]", r"[^a-zA-Z0-9]", r"^.{7,}$"]
        .map(|source| Regex::new(source).expect("static regex"))
});

/// Named pattern a field value must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// One or more hexadecimal digits, either case
    Hexadecimal,
    /// At least seven characters with a lowercase letter, an uppercase
    /// letter, a digit and a symbol
    StrongPassword,
    /// `local@domain.tld`
    Email,
}

impl Pattern {
    #[must_use]
    pub fn is_match(self, value: &str) -> bool {
        match self {
            Self::Hexadecimal => HEXADECIMAL.is_match(value),
            Self::Email => EMAIL.is_match(value),
            Self::StrongPassword => STRONG_PASSWORD.iter().all(|re| re.is_match(value)),
        }
    }
}
