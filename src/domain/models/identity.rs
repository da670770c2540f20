use serde::{Deserialize, Serialize};
use std::fmt;

/// Collections that carry a human-readable `unique_id`. Uniqueness is scoped per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Property,
    Material,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::User, EntityKind::Property, EntityKind::Material];

    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Property => "properties",
            EntityKind::Material => "materials",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "user",
            EntityKind::Property => "property",
            EntityKind::Material => "material",
        };
        f.write_str(name)
    }
}
