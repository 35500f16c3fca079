//! Request bodies for write operations.
//!
//! Every write carries the edit attribution (`tags`, `bot`, optional
//! `comment`). On top of that a PATCH with a previous snapshot carries a
//! JSON Patch computed from the two snapshots, a DELETE carries nothing, and
//! everything else carries the new state under its part name.

use reqwest::Method;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Tag attached to every edit made through this client.
pub const CLIENT_TAG: &str = "wikibase-rest";

/// Attribution applied to a single write.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditOptions {
    pub bot: bool,
    pub summary: Option<String>,
    pub tags: Vec<String>,
}

impl EditOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bot(mut self, bot: bool) -> Self {
        self.bot = bot;
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PayloadBody {
    None,
    Part { name: String, value: Value },
    Patch(json_patch::Patch),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Payload {
    pub tags: Vec<String>,
    pub bot: bool,
    pub comment: Option<String>,
    pub body: PayloadBody,
}

impl Payload {
    /// The request body as JSON.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn patch(&self) -> Option<&json_patch::Patch> {
        match &self.body {
            PayloadBody::Patch(patch) => Some(patch),
            _ => None,
        }
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("tags", &self.tags)?;
        map.serialize_entry("bot", &self.bot)?;
        if let Some(comment) = &self.comment {
            map.serialize_entry("comment", comment)?;
        }
        match &self.body {
            PayloadBody::None => {}
            PayloadBody::Part { name, value } => map.serialize_entry(name, value)?,
            PayloadBody::Patch(patch) => map.serialize_entry("patch", patch)?,
        }
        map.end()
    }
}

pub fn build(
    method: &Method,
    part: Option<&str>,
    new_state: Option<&Value>,
    old_state: Option<&Value>,
    options: &EditOptions,
) -> Payload {
    let mut tags = Vec::with_capacity(options.tags.len() + 1);
    tags.push(CLIENT_TAG.to_string());
    tags.extend(options.tags.iter().cloned());

    let body = match old_state {
        Some(old) if *method == Method::PATCH => {
            PayloadBody::Patch(json_patch::diff(old, new_state.unwrap_or(&Value::Null)))
        }
        _ if *method == Method::DELETE => PayloadBody::None,
        _ => match part {
            Some(name) => PayloadBody::Part {
                name: name.to_string(),
                value: new_state.cloned().unwrap_or(Value::Null),
            },
            None => PayloadBody::None,
        },
    };

    Payload {
        tags,
        bot: options.bot,
        comment: options.summary.clone(),
        body,
    }
}
