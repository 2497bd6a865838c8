use rand::Rng;
use std::convert::TryFrom;
use std::fmt;
use std::num::TryFromIntError;

/// A unique symbolic token.
///
/// Every call to `Symbol::new` produces a token that is distinct from every other token, even if
/// the descriptions are identical. Clones of a symbol compare equal to the original. Ids are
/// random 128-bit values, so a symbol decoded from another process keeps its identity and does
/// not collide with symbols created here.
///
/// # Examples
///
/// ```
/// use token_trie::trie::Symbol;
///
/// let a = Symbol::new("tag");
/// let b = Symbol::new("tag");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// assert_eq!(a.description(), "tag");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol {
    id: [u64; 2],
    description: String,
}

impl Symbol {
    /// Constructs a new, unique `Symbol` with a description.
    pub fn new<S>(description: S) -> Self
    where
        S: Into<String>,
    {
        let mut rng = rand::thread_rng();
        Symbol {
            id: [rng.gen(), rng.gen()],
            description: description.into(),
        }
    }

    /// Returns the description the symbol was created with.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// A scalar token that selects an entry at one level of a trie.
///
/// Keys compare by exact value: `Key::Number(1)` and `Key::Str("1")` are different keys. Numeric
/// keys are integers. A `usize` converts through `TryFrom` and fails if it exceeds `i64::MAX`.
///
/// # Examples
///
/// ```
/// use token_trie::trie::Key;
///
/// assert_eq!(Key::from("a"), Key::Str(String::from("a")));
/// assert_eq!(Key::from(1), Key::Number(1));
/// assert_ne!(Key::from(1), Key::from("1"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    Str(String),
    Number(i64),
    Symbol(Symbol),
}

impl Key {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Key::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Key::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Str(value) => write!(f, "{}", value),
            Key::Number(value) => write!(f, "{}", value),
            Key::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

impl<'a> From<&'a str> for Key {
    fn from(value: &'a str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Number(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Number(i64::from(value))
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key::Number(i64::from(value))
    }
}

impl TryFrom<usize> for Key {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        i64::try_from(value).map(Key::Number)
    }
}

impl From<Symbol> for Key {
    fn from(symbol: Symbol) -> Self {
        Key::Symbol(symbol)
    }
}
