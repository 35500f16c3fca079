use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{Level, event, instrument};

use super::entity_data::{EntityData, EntityType};
use super::sitelink::Sitelink;
use super::statement::Statement;
use crate::connection::Connection;
use crate::error::{Error, Result};

static NO_SITELINKS: BTreeMap<String, Sitelink> = BTreeMap::new();

/// What `submit` ended up doing.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing changed since the last load; no request was sent
    Unchanged,
    /// A new item was created; carries the server response
    Created(Value),
    /// A diff was sent for an existing entity; carries the server response,
    /// which is the conflicting entity when the server answered 409
    Updated(Value),
}

/// A local, editable copy of an entity.
///
/// Edits apply to the current state only. `submit` compares it with the
/// state last fetched from the server and sends either a full create or a
/// JSON Patch. A create records the server-assigned id. After a successful
/// create or update call [`Entity::reload`] to move the baseline forward;
/// it is not refreshed automatically.
pub struct Entity {
    connection: Option<Arc<Connection>>,
    current: EntityData,
    original: Option<EntityData>,
}

impl Entity {
    /// A new, unsaved entity without a connection.
    pub fn new(kind: EntityType) -> Self {
        Entity {
            connection: None,
            current: EntityData::new(kind),
            original: None,
        }
    }

    /// A new, unsaved entity that can be submitted through `connection`.
    pub fn with_connection(connection: Arc<Connection>, kind: EntityType) -> Self {
        Entity {
            connection: Some(connection),
            ..Self::new(kind)
        }
    }

    /// Fetches `id` and starts tracking changes against it.
    pub async fn load(connection: Arc<Connection>, kind: EntityType, id: &str) -> Result<Self> {
        let value = connection.api().get_entity(kind, id).await?;
        let data = EntityData::from_value(value)?;
        Ok(Entity {
            connection: Some(connection),
            current: data.clone(),
            original: Some(data),
        })
    }

    pub async fn reload(&mut self) -> Result<()> {
        let connection = self.connection()?;
        let id = self
            .current
            .id
            .clone()
            .ok_or_else(|| Error::validation("cannot reload an entity without an id"))?;
        let value = connection.api().get_entity(self.current.kind, &id).await?;
        let data = EntityData::from_value(value)?;
        self.current = data.clone();
        self.original = Some(data);
        Ok(())
    }

    fn connection(&self) -> Result<Arc<Connection>> {
        self.connection.clone().ok_or(Error::NoConnection)
    }

    pub fn set_connection(&mut self, connection: Arc<Connection>) {
        self.connection = Some(connection);
    }

    pub fn id(&self) -> Option<&str> {
        self.current.id.as_deref()
    }

    pub fn kind(&self) -> EntityType {
        self.current.kind
    }

    pub fn data(&self) -> &EntityData {
        &self.current
    }

    pub fn original(&self) -> Option<&EntityData> {
        self.original.as_ref()
    }

    pub fn is_new(&self) -> bool {
        self.original.is_none()
    }

    pub fn is_modified(&self) -> bool {
        self.original.as_ref() != Some(&self.current)
    }

    // Labels and descriptions

    pub fn label(&self, lang: &str) -> Option<&str> {
        self.current.labels.get(lang).map(String::as_str)
    }

    pub fn set_label(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        self.current.labels.insert(lang.into(), text.into());
    }

    pub fn remove_label(&mut self, lang: &str) -> Option<String> {
        self.current.labels.remove(lang)
    }

    pub fn description(&self, lang: &str) -> Option<&str> {
        self.current.descriptions.get(lang).map(String::as_str)
    }

    pub fn set_description(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        self.current.descriptions.insert(lang.into(), text.into());
    }

    pub fn remove_description(&mut self, lang: &str) -> Option<String> {
        self.current.descriptions.remove(lang)
    }

    // Aliases

    pub fn aliases(&self, lang: &str) -> &[String] {
        self.current
            .aliases
            .get(lang)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn add_alias(&mut self, lang: impl Into<String>, alias: impl Into<String>) {
        self.current
            .aliases
            .entry(lang.into())
            .or_default()
            .push(alias.into());
    }

    /// Removes the first matching alias; drops the language once it is empty.
    pub fn remove_alias(&mut self, lang: &str, alias: &str) -> bool {
        let Some(aliases) = self.current.aliases.get_mut(lang) else {
            return false;
        };
        let Some(pos) = aliases.iter().position(|a| a == alias) else {
            return false;
        };
        aliases.remove(pos);
        if aliases.is_empty() {
            self.current.aliases.remove(lang);
        }
        true
    }

    // Statements

    pub fn statements(&self) -> &BTreeMap<String, Vec<Statement>> {
        &self.current.statements
    }

    pub fn statements_for(&self, property_id: &str) -> &[Statement] {
        self.current
            .statements
            .get(property_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Files the statement under its property id.
    pub fn add_statement(&mut self, statement: Statement) -> Result<()> {
        if statement.property_id().is_empty() {
            return Err(Error::validation("statement has no property id"));
        }
        self.current
            .statements
            .entry(statement.property_id().to_string())
            .or_default()
            .push(statement);
        Ok(())
    }

    /// Removes a saved statement by id.
    pub fn remove_statement(&mut self, statement_id: &str) -> Option<Statement> {
        let (property_id, pos) = self.current.statements.iter().find_map(|(pid, list)| {
            list.iter()
                .position(|s| s.id() == Some(statement_id))
                .map(|pos| (pid.clone(), pos))
        })?;
        let list = self.current.statements.get_mut(&property_id)?;
        let removed = list.remove(pos);
        if list.is_empty() {
            self.current.statements.remove(&property_id);
        }
        Some(removed)
    }

    pub fn statement_mut(&mut self, statement_id: &str) -> Option<&mut Statement> {
        self.current
            .statements
            .values_mut()
            .flat_map(|list| list.iter_mut())
            .find(|s| s.id() == Some(statement_id))
    }

    // Sitelinks

    pub fn sitelinks(&self) -> &BTreeMap<String, Sitelink> {
        self.current.sitelinks.as_ref().unwrap_or(&NO_SITELINKS)
    }

    pub fn sitelink(&self, site: &str) -> Option<&Sitelink> {
        self.sitelinks().get(site)
    }

    /// Adds or replaces the link for the sitelink's site.
    pub fn add_sitelink(&mut self, sitelink: Sitelink) {
        self.current
            .sitelinks
            .get_or_insert_with(BTreeMap::new)
            .insert(sitelink.site().to_string(), sitelink);
    }

    /// Removes the link but keeps the (possibly empty) sitelinks member.
    pub fn remove_sitelink(&mut self, site: &str) -> Option<Sitelink> {
        self.current.sitelinks.as_mut()?.remove(site)
    }

    /// Sends local changes to the server.
    ///
    /// Only items can be created this way; submitting a new property fails
    /// before any request is made.
    #[instrument(level = "debug", skip(self), fields(id = self.id(), kind = %self.kind()))]
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if !self.is_modified() {
            event!(Level::DEBUG, "no local changes, skipping submit");
            return Ok(SubmitOutcome::Unchanged);
        }

        match &self.original {
            None => {
                if self.current.kind != EntityType::Item {
                    return Err(Error::validation(format!(
                        "only items can be created, not {}",
                        self.current.kind.segment()
                    )));
                }
                if let Some(id) = &self.current.id {
                    return Err(Error::validation(format!(
                        "{id} was already created; reload it before submitting again"
                    )));
                }
                let connection = self.connection()?;
                let data = self.current.to_value()?;
                event!(Level::DEBUG, "creating new item");
                let response = connection
                    .api()
                    .add_item(&data, &connection.edit_options())
                    .await?;
                if let Some(id) = response.get("id").and_then(Value::as_str) {
                    self.current.id = Some(id.to_string());
                }
                Ok(SubmitOutcome::Created(response))
            }
            Some(original) => {
                let connection = self.connection()?;
                let id = original
                    .id
                    .clone()
                    .ok_or_else(|| Error::validation("loaded entity has no id"))?;
                let old = original.to_value()?;
                let new = self.current.to_value()?;
                event!(Level::DEBUG, id = %id, "sending patch");
                let response = connection
                    .api()
                    .update_entity(self.current.kind, &id, &new, &old, &connection.edit_options())
                    .await?;
                Ok(SubmitOutcome::Updated(response))
            }
        }
    }
}
