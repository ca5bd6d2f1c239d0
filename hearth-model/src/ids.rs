use std::fmt;

/// Identifier of a catalog entry as reported by the server.
///
/// The catalog endpoint emits either JSON strings or integers for `id`.
/// Both are kept verbatim so the identifier round-trips unchanged. Integers
/// above `i64::MAX` land in `Unsigned`; fractional numbers are not ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CardId {
    Number(i64),
    Unsigned(u64),
    Text(String),
}

impl CardId {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            CardId::Number(n) => Some(*n),
            CardId::Unsigned(n) => i64::try_from(*n).ok(),
            CardId::Text(_) => None,
        }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Number(n) => write!(f, "{n}"),
            CardId::Unsigned(n) => write!(f, "{n}"),
            CardId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CardId {
    fn from(id: i64) -> Self {
        CardId::Number(id)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        CardId::Text(id.to_string())
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        CardId::Text(id)
    }
}

/// Server-side library identifier used to address the catalog endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LibraryId(pub i64);

impl Default for LibraryId {
    fn default() -> Self {
        LibraryId(1)
    }
}

impl LibraryId {
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LibraryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(LibraryId)
    }
}
