use sea_query::{DynIden, Iden, IntoIden};
use std::fmt;
use std::str::FromStr;

/// Part A table - first speaking section of a test
#[derive(Iden)]
pub enum PartA {
    Table,
}

/// Part B table - second speaking section of a test
#[derive(Iden)]
pub enum PartB {
    Table,
}

/// Columns shared by the two part tables (identical schemas)
#[derive(Iden)]
pub enum PartRecord {
    Id,
    StartTime,
    VideoLink,
    AudioLink,
    UploadTime,
    SpeechaceJson,
}

/// Which of the two part tables an operation targets
///
/// This is the only way a table name reaches a query: callers parse the wire
/// sentinel into this enum, so request text is never interpolated into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    A,
    B,
}

impl Part {
    /// Resolve to the table identifier for query building
    pub fn table(self) -> DynIden {
        match self {
            Part::A => PartA::Table.into_iden(),
            Part::B => PartB::Table.into_iden(),
        }
    }
}

impl FromStr for Part {
    type Err = String;

    /// Parse the wire sentinel: "0" is Part A, "1" is Part B
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Part::A),
            "1" => Ok(Part::B),
            other => Err(format!("Invalid part value: '{}' (expected 0 or 1)", other)),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::A => write!(f, "A"),
            Part::B => write!(f, "B"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_sentinels() {
        assert_eq!("0".parse::<Part>().unwrap(), Part::A);
        assert_eq!("1".parse::<Part>().unwrap(), Part::B);
        assert_eq!(" 1 ".parse::<Part>().unwrap(), Part::B);
    }

    #[test]
    fn rejects_anything_else() {
        assert!("2".parse::<Part>().is_err());
        assert!("A".parse::<Part>().is_err());
        assert!("".parse::<Part>().is_err());
    }

    #[test]
    fn resolves_table_names() {
        assert_eq!(Part::A.table().to_string(), "part_a");
        assert_eq!(Part::B.table().to_string(), "part_b");
    }
}
