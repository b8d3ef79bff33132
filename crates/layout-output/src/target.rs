use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An output artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    FixedLayout,
    Record,
    Persistence,
    AttributeMap,
    Enrichment,
    Sql,
}

impl Target {
    pub const ALL: [Target; 6] = [
        Target::FixedLayout,
        Target::Record,
        Target::Persistence,
        Target::AttributeMap,
        Target::Enrichment,
        Target::Sql,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::FixedLayout => "fixed-layout",
            Self::Record => "record",
            Self::Persistence => "persistence",
            Self::AttributeMap => "attribute-map",
            Self::Enrichment => "enrichment",
            Self::Sql => "sql",
        }
    }

    /// File extension of the artifact.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Record => "txt",
            Self::Sql => "sql",
            _ => "xml",
        }
    }

    /// Default output file name.
    pub fn file_name(self) -> String {
        format!("{}.{}", self.id(), self.extension())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Target::ALL
            .into_iter()
            .find(|target| target.id() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Target::ALL.iter().map(|t| t.id()).collect();
                format!("unknown target '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids() {
        assert_eq!("fixed-layout".parse::<Target>(), Ok(Target::FixedLayout));
        assert_eq!("ATTRIBUTE_MAP".parse::<Target>(), Ok(Target::AttributeMap));
        assert!("pdf".parse::<Target>().is_err());
        assert_eq!(Target::Sql.file_name(), "sql.sql");
        assert_eq!(Target::Record.file_name(), "record.txt");
    }
}
