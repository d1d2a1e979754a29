//! Department Model

use serde::{Deserialize, Serialize};

/// Department record, fully replicated on every shard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub dept_id: u32,
    pub name: String,
    pub description: String,
    pub manager: Option<String>,
}

/// Update department payload — `None` fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

impl Department {
    /// Merge an update into a copy of this record.
    ///
    /// Every present field writes through as supplied, empty strings
    /// included; the repository compares the result against the stored
    /// document to decide whether the shard was actually modified.
    pub fn apply(&self, update: &DepartmentUpdate) -> Department {
        let mut merged = self.clone();
        if let Some(ref name) = update.name {
            merged.name = name.clone();
        }
        if let Some(ref description) = update.description {
            merged.description = description.clone();
        }
        if let Some(ref manager) = update.manager {
            merged.manager = Some(manager.clone());
        }
        merged
    }
}
