//! Per-agent inspector records, loaded once and patched by indexed updates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub memories: Vec<String>,
    #[serde(default)]
    pub entity_memories: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub documents: BTreeMap<String, String>,
}

impl InspectorRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Write `text` at `index`, growing the list with empty strings as needed.
pub fn set_padded(list: &mut Vec<String>, index: usize, text: impl Into<String>) {
    if list.len() <= index {
        list.resize(index + 1, String::new());
    }
    list[index] = text.into();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectorSet {
    records: Vec<InspectorRecord>,
}

impl InspectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, records: Vec<InspectorRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[InspectorRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&InspectorRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn find_mut(&mut self, owner_id: &str) -> Option<&mut InspectorRecord> {
        self.records.iter_mut().find(|record| record.id == owner_id)
    }

    /// Returns false when no record has `owner_id`.
    pub fn patch_memory(&mut self, owner_id: &str, index: usize, text: &str) -> bool {
        let Some(record) = self.find_mut(owner_id) else {
            return false;
        };
        set_padded(&mut record.memories, index, text);
        true
    }

    pub fn patch_entity_memory(
        &mut self,
        owner_id: &str,
        target: &str,
        index: usize,
        text: &str,
    ) -> bool {
        let Some(record) = self.find_mut(owner_id) else {
            return false;
        };
        let list = record.entity_memories.entry(target.to_string()).or_default();
        set_padded(list, index, text);
        true
    }

    pub fn patch_document(&mut self, owner_id: &str, name: &str, text: &str) -> bool {
        let Some(record) = self.find_mut(owner_id) else {
            return false;
        };
        record.documents.insert(name.to_string(), text.to_string());
        true
    }
}
