use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::sitelink::Sitelink;
use super::statement::Statement;
use crate::error::Error;

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    #[default]
    Item,
    Property,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Item => "item",
            EntityType::Property => "property",
        }
    }

    /// Plural form used in resource paths.
    pub fn segment(&self) -> &'static str {
        match self {
            EntityType::Item => "items",
            EntityType::Property => "properties",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "item" | "items" => Ok(EntityType::Item),
            "property" | "properties" => Ok(EntityType::Property),
            other => Err(Error::validation(format!("unknown entity type '{other}'"))),
        }
    }
}

/// The JSON document of an entity as the REST API returns it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct EntityData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: EntityType,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub statements: BTreeMap<String, Vec<Statement>>,
    /// Only items carry sitelinks; `None` means the member is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sitelinks: Option<BTreeMap<String, Sitelink>>,
    /// Fields this model does not interpret, kept so they never show in diffs
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntityData {
    pub fn new(kind: EntityType) -> Self {
        EntityData {
            kind,
            sitelinks: (kind == EntityType::Item).then(BTreeMap::new),
            ..Default::default()
        }
    }

    pub fn from_value(value: Value) -> Result<Self, Error> {
        let mut data: EntityData = serde_json::from_value(value)?;
        for (site, sitelink) in data.sitelinks.iter_mut().flatten() {
            sitelink.site = site.clone();
        }
        Ok(data)
    }

    pub fn to_value(&self) -> Result<Value, Error> {
        Ok(serde_json::to_value(self)?)
    }
}
