use serde::{Deserialize, Serialize};

use super::snak::Snak;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Reference {
    /// Assigned by the server; absent on references built locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default)]
    pub parts: Vec<Snak>,
}

impl Reference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hash(hash: impl Into<String>) -> Self {
        Reference {
            hash: Some(hash.into()),
            parts: Vec::new(),
        }
    }

    pub fn set_hash(&mut self, hash: impl Into<String>) {
        self.hash = Some(hash.into());
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn add_part(&mut self, part: Snak) {
        self.parts.push(part);
    }

    /// Removes the first part equal to `part`. Returns whether one was found.
    pub fn remove_part(&mut self, part: &Snak) -> bool {
        match self.parts.iter().position(|p| p == part) {
            Some(pos) => {
                self.parts.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn parts(&self) -> &[Snak] {
        &self.parts
    }
}
