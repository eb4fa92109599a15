use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::InvalidConfig;

/// One addressable board position, written as a row letter followed by a
/// 1-based column number, e.g. `A1` or `D5`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SquareId {
    /// 0-based, `A` is 0.
    pub row: u8,
    /// 0-based, column `1` is 0.
    pub col: u8,
}

impl SquareId {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn row_letter(self) -> char {
        (b'A' + self.row) as char
    }
}

impl std::fmt::Display for SquareId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row_letter(), u16::from(self.col) + 1)
    }
}

/// The error type for the [`FromStr`] instance of [`SquareId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquareFromStrErr {
    Empty,
    InvalidRow,
    InvalidColumn,
}

impl std::error::Error for SquareFromStrErr {}

impl std::fmt::Display for SquareFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SquareFromStrErr::Empty => write!(f, "Square id is empty"),
            SquareFromStrErr::InvalidRow => write!(f, "Square id must start with a row letter A-Z"),
            SquareFromStrErr::InvalidColumn => {
                write!(f, "Square id must end with a column number starting at 1")
            }
        }
    }
}

impl FromStr for SquareId {
    type Err = SquareFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let row_char = chars.next().ok_or(SquareFromStrErr::Empty)?;
        let row = match row_char.to_ascii_uppercase() {
            c @ 'A'..='Z' => c as u8 - b'A',
            _ => return Err(SquareFromStrErr::InvalidRow),
        };
        let col: u16 = chars
            .as_str()
            .parse()
            .map_err(|_| SquareFromStrErr::InvalidColumn)?;
        if col == 0 || col > 256 {
            return Err(SquareFromStrErr::InvalidColumn);
        }
        Ok(SquareId {
            row,
            col: (col - 1) as u8,
        })
    }
}

impl TryFrom<String> for SquareId {
    type Error = SquareFromStrErr;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SquareId> for String {
    fn from(square: SquareId) -> String {
        square.to_string()
    }
}

/// Shorthand for creating square ids from a string like `"B3"`.
///
/// This macro is just calling the [`FromStr`] instance of [`SquareId`].
/// ```
/// # use memory_match::{square, SquareId};
/// assert_eq!(square!("B3"), SquareId { row: 1, col: 2 });
/// ```
#[macro_export]
macro_rules! square {
    ($s:literal) => {
        <$crate::SquareId as std::str::FromStr>::from_str($s)
            .expect("Invalid square id given to square! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use square;

/// The grid the cards are laid out on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub rows: u8,
    pub columns: u8,
}

impl Default for BoardLayout {
    /// The standard 4×5 table, `A1`..`D5`.
    fn default() -> Self {
        Self {
            rows: 4,
            columns: 5,
        }
    }
}

impl BoardLayout {
    pub fn new(rows: u8, columns: u8) -> Result<Self, InvalidConfig> {
        let layout = Self { rows, columns };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.rows == 0 || self.columns == 0 {
            return Err(InvalidConfig::EmptyBoard);
        }
        if self.rows > 26 {
            return Err(InvalidConfig::TooManyRows(self.rows));
        }
        if self.len() % 2 != 0 {
            return Err(InvalidConfig::OddSquareCount(self.len()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        usize::from(self.rows) * usize::from(self.columns)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, square: SquareId) -> bool {
        square.row < self.rows && square.col < self.columns
    }

    /// All squares in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = SquareId> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |col| SquareId { row, col }))
    }
}
