mod entity;
mod entity_data;
mod reference;
mod sitelink;
mod snak;
mod statement;

pub use entity::{Entity, SubmitOutcome};
pub use entity_data::{EntityData, EntityType};
pub use reference::Reference;
pub use sitelink::Sitelink;
pub use snak::{GREGORIAN_CALENDAR, PRECISION_DAY, PropertyRef, Snak, SnakValue};
pub use statement::{Rank, Statement};
