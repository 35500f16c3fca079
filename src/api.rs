//! Typed operations over the REST resources.
//!
//! Paths follow the REST API v0 layout: `/entities/{kind}/{id}` with the
//! `labels`, `descriptions`, `aliases`, `statements` and (items only)
//! `sitelinks` sub-resources, plus the entity-independent `/statements/{id}`.

use reqwest::Method;
use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::model::EntityType;
use crate::payload::{self, EditOptions};

/// A sub-resource of an entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Part {
    Labels,
    Descriptions,
    Aliases,
    Statements,
    Sitelinks,
}

impl Part {
    /// Path segment under `/entities/{kind}/{id}`.
    pub fn segment(&self) -> &'static str {
        match self {
            Part::Labels => "labels",
            Part::Descriptions => "descriptions",
            Part::Aliases => "aliases",
            Part::Statements => "statements",
            Part::Sitelinks => "sitelinks",
        }
    }

    /// Key the new state is sent under when writing a single element.
    pub fn payload_key(&self) -> &'static str {
        match self {
            Part::Labels => "label",
            Part::Descriptions => "description",
            Part::Aliases => "aliases",
            Part::Statements => "statement",
            Part::Sitelinks => "sitelink",
        }
    }
}

/// `/entities/{kind}/{id}`
pub fn entity_path(kind: EntityType, id: &str) -> String {
    format!("/entities/{}/{}", kind.segment(), id)
}

/// Path of a sub-resource, or of one element of it when `key` is given.
pub fn part_path(kind: EntityType, id: &str, part: Part, key: Option<&str>) -> String {
    let base = format!("{}/{}", entity_path(kind, id), part.segment());
    match key {
        Some(key) => format!("{base}/{key}"),
        None => base,
    }
}

/// `/statements/{id}`, independent of the owning entity.
pub fn statement_path(statement_id: &str) -> String {
    format!("/statements/{statement_id}")
}

/// Resource-level calls over a [`Client`].
#[derive(Clone)]
pub struct RestApi {
    client: Client,
}

impl RestApi {
    /// Wraps `client`.
    pub fn new(client: Client) -> Self {
        RestApi { client }
    }

    /// The underlying transport client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Calls scoped to items.
    pub fn items(&self) -> EntityScope<'_> {
        EntityScope {
            api: self,
            kind: EntityType::Item,
        }
    }

    /// Calls scoped to properties.
    pub fn properties(&self) -> EntityScope<'_> {
        EntityScope {
            api: self,
            kind: EntityType::Property,
        }
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.client.request(Method::GET, path, &[], None).await
    }

    async fn write(
        &self,
        method: Method,
        path: &str,
        part: Option<&str>,
        data: Option<&Value>,
        old_data: Option<&Value>,
        options: &EditOptions,
    ) -> Result<Value> {
        let body = payload::build(&method, part, data, old_data, options).to_value()?;
        self.client.request(method, path, &[], Some(&body)).await
    }

    async fn post(&self, path: &str, part: &str, data: &Value, options: &EditOptions) -> Result<Value> {
        self.write(Method::POST, path, Some(part), Some(data), None, options)
            .await
    }

    async fn put(&self, path: &str, part: &str, data: &Value, options: &EditOptions) -> Result<Value> {
        self.write(Method::PUT, path, Some(part), Some(data), None, options)
            .await
    }

    async fn patch(
        &self,
        path: &str,
        data: &Value,
        old_data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        self.write(Method::PATCH, path, None, Some(data), Some(old_data), options)
            .await
    }

    async fn delete(&self, path: &str, options: &EditOptions) -> Result<Value> {
        self.write(Method::DELETE, path, None, None, None, options)
            .await
    }

    // Entities

    pub async fn get_entity(&self, kind: EntityType, id: &str) -> Result<Value> {
        self.get(&entity_path(kind, id)).await
    }

    pub async fn add_item(&self, data: &Value, options: &EditOptions) -> Result<Value> {
        let path = format!("/entities/{}", EntityType::Item.segment());
        self.post(&path, EntityType::Item.as_str(), data, options)
            .await
    }

    pub async fn update_entity(
        &self,
        kind: EntityType,
        id: &str,
        data: &Value,
        old_data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        self.patch(&entity_path(kind, id), data, old_data, options)
            .await
    }

    pub async fn delete_entity(&self, kind: EntityType, id: &str, options: &EditOptions) -> Result<Value> {
        self.delete(&entity_path(kind, id), options).await
    }

    // Labels

    pub async fn get_labels(&self, kind: EntityType, id: &str) -> Result<Value> {
        self.get(&part_path(kind, id, Part::Labels, None)).await
    }

    pub async fn get_label(&self, kind: EntityType, id: &str, lang: &str) -> Result<Value> {
        self.get(&part_path(kind, id, Part::Labels, Some(lang)))
            .await
    }

    pub async fn add_label(
        &self,
        kind: EntityType,
        id: &str,
        data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        let part = Part::Labels;
        self.post(&part_path(kind, id, part, None), part.payload_key(), data, options)
            .await
    }

    pub async fn replace_label(
        &self,
        kind: EntityType,
        id: &str,
        lang: &str,
        data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        let part = Part::Labels;
        self.put(&part_path(kind, id, part, Some(lang)), part.payload_key(), data, options)
            .await
    }

    pub async fn update_labels(
        &self,
        kind: EntityType,
        id: &str,
        data: &Value,
        old_data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        self.patch(&part_path(kind, id, Part::Labels, None), data, old_data, options)
            .await
    }

    pub async fn delete_label(
        &self,
        kind: EntityType,
        id: &str,
        lang: &str,
        options: &EditOptions,
    ) -> Result<Value> {
        self.delete(&part_path(kind, id, Part::Labels, Some(lang)), options)
            .await
    }

    // Descriptions

    pub async fn get_descriptions(&self, kind: EntityType, id: &str) -> Result<Value> {
        self.get(&part_path(kind, id, Part::Descriptions, None))
            .await
    }

    pub async fn get_description(&self, kind: EntityType, id: &str, lang: &str) -> Result<Value> {
        self.get(&part_path(kind, id, Part::Descriptions, Some(lang)))
            .await
    }

    pub async fn add_description(
        &self,
        kind: EntityType,
        id: &str,
        data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        let part = Part::Descriptions;
        self.post(&part_path(kind, id, part, None), part.payload_key(), data, options)
            .await
    }

    pub async fn replace_description(
        &self,
        kind: EntityType,
        id: &str,
        lang: &str,
        data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        let part = Part::Descriptions;
        self.put(&part_path(kind, id, part, Some(lang)), part.payload_key(), data, options)
            .await
    }

    pub async fn update_descriptions(
        &self,
        kind: EntityType,
        id: &str,
        data: &Value,
        old_data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        self.patch(&part_path(kind, id, Part::Descriptions, None), data, old_data, options)
            .await
    }

    pub async fn delete_description(
        &self,
        kind: EntityType,
        id: &str,
        lang: &str,
        options: &EditOptions,
    ) -> Result<Value> {
        self.delete(&part_path(kind, id, Part::Descriptions, Some(lang)), options)
            .await
    }

    // Aliases

    pub async fn get_aliases(&self, kind: EntityType, id: &str) -> Result<Value> {
        self.get(&part_path(kind, id, Part::Aliases, None)).await
    }

    pub async fn get_aliases_in_language(&self, kind: EntityType, id: &str, lang: &str) -> Result<Value> {
        self.get(&part_path(kind, id, Part::Aliases, Some(lang)))
            .await
    }

    pub async fn add_aliases(
        &self,
        kind: EntityType,
        id: &str,
        data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        let part = Part::Aliases;
        self.post(&part_path(kind, id, part, None), part.payload_key(), data, options)
            .await
    }

    pub async fn replace_aliases(
        &self,
        kind: EntityType,
        id: &str,
        lang: &str,
        data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        let part = Part::Aliases;
        self.put(&part_path(kind, id, part, Some(lang)), part.payload_key(), data, options)
            .await
    }

    pub async fn update_aliases(
        &self,
        kind: EntityType,
        id: &str,
        data: &Value,
        old_data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        self.patch(&part_path(kind, id, Part::Aliases, None), data, old_data, options)
            .await
    }

    pub async fn delete_aliases(
        &self,
        kind: EntityType,
        id: &str,
        lang: &str,
        options: &EditOptions,
    ) -> Result<Value> {
        self.delete(&part_path(kind, id, Part::Aliases, Some(lang)), options)
            .await
    }

    // Statements attached to an entity

    pub async fn get_statements(&self, kind: EntityType, id: &str) -> Result<Value> {
        self.get(&part_path(kind, id, Part::Statements, None))
            .await
    }

    pub async fn get_statement(&self, kind: EntityType, id: &str, statement_id: &str) -> Result<Value> {
        self.get(&part_path(kind, id, Part::Statements, Some(statement_id)))
            .await
    }

    pub async fn add_statement(
        &self,
        kind: EntityType,
        id: &str,
        data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        let part = Part::Statements;
        self.post(&part_path(kind, id, part, None), part.payload_key(), data, options)
            .await
    }

    pub async fn replace_entity_statement(
        &self,
        kind: EntityType,
        id: &str,
        statement_id: &str,
        data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        let part = Part::Statements;
        self.put(
            &part_path(kind, id, part, Some(statement_id)),
            part.payload_key(),
            data,
            options,
        )
        .await
    }

    pub async fn update_entity_statement(
        &self,
        kind: EntityType,
        id: &str,
        statement_id: &str,
        data: &Value,
        old_data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        self.patch(
            &part_path(kind, id, Part::Statements, Some(statement_id)),
            data,
            old_data,
            options,
        )
        .await
    }

    pub async fn delete_entity_statement(
        &self,
        kind: EntityType,
        id: &str,
        statement_id: &str,
        options: &EditOptions,
    ) -> Result<Value> {
        self.delete(&part_path(kind, id, Part::Statements, Some(statement_id)), options)
            .await
    }

    // Statements addressed by id alone

    pub async fn get_statement_by_id(&self, statement_id: &str) -> Result<Value> {
        self.get(&statement_path(statement_id)).await
    }

    pub async fn replace_statement(&self, statement_id: &str, data: &Value, options: &EditOptions) -> Result<Value> {
        self.put(&statement_path(statement_id), Part::Statements.payload_key(), data, options)
            .await
    }

    pub async fn update_statement(
        &self,
        statement_id: &str,
        data: &Value,
        old_data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        self.patch(&statement_path(statement_id), data, old_data, options)
            .await
    }

    pub async fn delete_statement(&self, statement_id: &str, options: &EditOptions) -> Result<Value> {
        self.delete(&statement_path(statement_id), options).await
    }

    // Sitelinks exist on items only

    pub async fn get_sitelinks(&self, item_id: &str) -> Result<Value> {
        self.get(&part_path(EntityType::Item, item_id, Part::Sitelinks, None))
            .await
    }

    pub async fn get_sitelink(&self, item_id: &str, site: &str) -> Result<Value> {
        self.get(&part_path(EntityType::Item, item_id, Part::Sitelinks, Some(site)))
            .await
    }

    pub async fn replace_sitelink(
        &self,
        item_id: &str,
        site: &str,
        data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        let part = Part::Sitelinks;
        self.put(
            &part_path(EntityType::Item, item_id, part, Some(site)),
            part.payload_key(),
            data,
            options,
        )
        .await
    }

    pub async fn update_sitelinks(
        &self,
        item_id: &str,
        data: &Value,
        old_data: &Value,
        options: &EditOptions,
    ) -> Result<Value> {
        self.patch(
            &part_path(EntityType::Item, item_id, Part::Sitelinks, None),
            data,
            old_data,
            options,
        )
        .await
    }

    pub async fn delete_sitelink(&self, item_id: &str, site: &str, options: &EditOptions) -> Result<Value> {
        self.delete(&part_path(EntityType::Item, item_id, Part::Sitelinks, Some(site)), options)
            .await
    }
}

/// [`RestApi`] with the entity kind fixed, e.g. `api.items().get_entity("Q42")`.
#[derive(Clone, Copy)]
pub struct EntityScope<'a> {
    api: &'a RestApi,
    kind: EntityType,
}

impl EntityScope<'_> {
    pub fn kind(&self) -> EntityType {
        self.kind
    }
}

macro_rules! scoped {
    ($( fn $name:ident($($arg:ident: $ty:ty),*); )*) => {
        impl EntityScope<'_> {
            $(
                pub async fn $name(&self, id: &str, $($arg: $ty),*) -> Result<Value> {
                    self.api.$name(self.kind, id, $($arg),*).await
                }
            )*
        }
    };
}

scoped! {
    fn get_entity();
    fn update_entity(data: &Value, old_data: &Value, options: &EditOptions);
    fn delete_entity(options: &EditOptions);
    fn get_labels();
    fn get_label(lang: &str);
    fn add_label(data: &Value, options: &EditOptions);
    fn replace_label(lang: &str, data: &Value, options: &EditOptions);
    fn update_labels(data: &Value, old_data: &Value, options: &EditOptions);
    fn delete_label(lang: &str, options: &EditOptions);
    fn get_descriptions();
    fn get_description(lang: &str);
    fn add_description(data: &Value, options: &EditOptions);
    fn replace_description(lang: &str, data: &Value, options: &EditOptions);
    fn update_descriptions(data: &Value, old_data: &Value, options: &EditOptions);
    fn delete_description(lang: &str, options: &EditOptions);
    fn get_aliases();
    fn get_aliases_in_language(lang: &str);
    fn add_aliases(data: &Value, options: &EditOptions);
    fn replace_aliases(lang: &str, data: &Value, options: &EditOptions);
    fn update_aliases(data: &Value, old_data: &Value, options: &EditOptions);
    fn delete_aliases(lang: &str, options: &EditOptions);
    fn get_statements();
    fn get_statement(statement_id: &str);
    fn add_statement(data: &Value, options: &EditOptions);
    fn replace_entity_statement(statement_id: &str, data: &Value, options: &EditOptions);
    fn update_entity_statement(statement_id: &str, data: &Value, old_data: &Value, options: &EditOptions);
    fn delete_entity_statement(statement_id: &str, options: &EditOptions);
}
