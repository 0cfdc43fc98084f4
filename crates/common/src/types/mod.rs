use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// `(id, display name)` pair used by select inputs and list filters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<Id> {
    pub id: Id,
    pub name: String,
}
