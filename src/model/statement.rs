use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::reference::Reference;
use super::snak::Snak;
use crate::error::Error;

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Preferred,
    #[default]
    Normal,
    Deprecated,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Preferred => "preferred",
            Rank::Normal => "normal",
            Rank::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preferred" => Ok(Rank::Preferred),
            "normal" => Ok(Rank::Normal),
            "deprecated" => Ok(Rank::Deprecated),
            other => Err(Error::validation(format!(
                "invalid rank '{other}', expected preferred, normal or deprecated"
            ))),
        }
    }
}

/// A ranked snak with its qualifiers and references.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Statement {
    /// Assigned by the server; absent until the statement is saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub rank: Rank,
    #[serde(flatten)]
    pub snak: Snak,
    #[serde(default)]
    pub qualifiers: Vec<Snak>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Statement {
    pub fn new(snak: Snak) -> Self {
        Statement {
            snak,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn property_id(&self) -> &str {
        self.snak.property_id()
    }

    pub fn snak(&self) -> &Snak {
        &self.snak
    }

    pub fn snak_mut(&mut self) -> &mut Snak {
        &mut self.snak
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Parses and applies a rank by name; an unknown name leaves the rank as is.
    pub fn set_rank(&mut self, rank: &str) -> Result<(), Error> {
        self.rank = rank.parse()?;
        Ok(())
    }

    pub fn set_rank_value(&mut self, rank: Rank) {
        self.rank = rank;
    }

    pub fn add_qualifier(&mut self, qualifier: Snak) {
        self.qualifiers.push(qualifier);
    }

    pub fn remove_qualifier(&mut self, qualifier: &Snak) -> bool {
        match self.qualifiers.iter().position(|q| q == qualifier) {
            Some(pos) => {
                self.qualifiers.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn qualifiers(&self) -> &[Snak] {
        &self.qualifiers
    }

    pub fn add_reference(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    pub fn remove_reference(&mut self, reference: &Reference) -> bool {
        match self.references.iter().position(|r| r == reference) {
            Some(pos) => {
                self.references.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }
}

impl From<Snak> for Statement {
    fn from(snak: Snak) -> Self {
        Statement::new(snak)
    }
}
