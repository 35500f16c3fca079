use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const GREGORIAN_CALENDAR: &str = "http://www.wikidata.org/entity/Q1985727";

/// Precision code for a calendar day.
pub const PRECISION_DAY: u8 = 11;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct PropertyRef {
    pub id: String,
    #[serde(default)]
    pub data_type: Option<String>,
}

impl PropertyRef {
    pub fn new(id: impl Into<String>, data_type: impl Into<String>) -> Self {
        PropertyRef {
            id: id.into(),
            data_type: Some(data_type.into()),
        }
    }
}

/// What a snak asserts about its property.
///
/// Serialized as `{"type": "value", "content": ...}`, `{"type": "novalue"}`
/// or `{"type": "somevalue"}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", content = "content")]
pub enum SnakValue {
    #[serde(rename = "value")]
    Value(Value),
    #[default]
    #[serde(rename = "novalue")]
    NoValue,
    #[serde(rename = "somevalue")]
    UnknownValue,
}

impl SnakValue {
    pub fn content(&self) -> Option<&Value> {
        match self {
            SnakValue::Value(content) => Some(content),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Snak {
    pub property: PropertyRef,
    pub value: SnakValue,
}

impl Snak {
    pub fn new(property: PropertyRef, value: SnakValue) -> Self {
        Snak { property, value }
    }

    pub fn with_content(
        property_id: impl Into<String>,
        data_type: impl Into<String>,
        content: Value,
    ) -> Self {
        Snak::new(
            PropertyRef::new(property_id, data_type),
            SnakValue::Value(content),
        )
    }

    pub fn string(property_id: impl Into<String>, value: impl Into<String>) -> Self {
        Snak::with_content(property_id, "string", Value::String(value.into()))
    }

    pub fn external_id(property_id: impl Into<String>, value: impl Into<String>) -> Self {
        Snak::with_content(property_id, "external-id", Value::String(value.into()))
    }

    pub fn url(property_id: impl Into<String>, url: impl Into<String>) -> Self {
        Snak::with_content(property_id, "url", Value::String(url.into()))
    }

    pub fn commons_media(property_id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Snak::with_content(property_id, "commonsMedia", Value::String(file_name.into()))
    }

    pub fn wikibase_item(property_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Snak::with_content(property_id, "wikibase-item", Value::String(item_id.into()))
    }

    pub fn monolingual_text(
        property_id: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let content = json!({ "language": language.into(), "text": text.into() });
        Snak::with_content(property_id, "monolingualtext", content)
    }

    /// `unit` is an entity URI; `None` means a unitless quantity.
    pub fn quantity(property_id: impl Into<String>, amount: i64, unit: Option<&str>) -> Self {
        let content = json!({
            "amount": format!("{amount:+}"),
            "unit": unit.unwrap_or("1"),
        });
        Snak::with_content(property_id, "quantity", content)
    }

    /// Accepts `+YYYY-MM-DD` or a full `+YYYY-MM-DDThh:mm:ssZ` timestamp.
    pub fn time(property_id: impl Into<String>, time: &str, precision: u8) -> Self {
        let time = if time.contains('T') {
            time.to_string()
        } else {
            format!("{time}T00:00:00Z")
        };
        let content = json!({
            "time": time,
            "precision": precision,
            "calendarmodel": GREGORIAN_CALENDAR,
        });
        Snak::with_content(property_id, "time", content)
    }

    pub fn set_property(&mut self, property_id: impl Into<String>, data_type: impl Into<String>) {
        self.property = PropertyRef::new(property_id, data_type);
    }

    pub fn set_value(&mut self, content: Value) {
        self.value = SnakValue::Value(content);
    }

    pub fn set_no_value(&mut self) {
        self.value = SnakValue::NoValue;
    }

    pub fn set_unknown_value(&mut self) {
        self.value = SnakValue::UnknownValue;
    }

    pub fn property_id(&self) -> &str {
        &self.property.id
    }

    pub fn data_type(&self) -> Option<&str> {
        self.property.data_type.as_deref()
    }

    pub fn value(&self) -> &SnakValue {
        &self.value
    }
}
