//! Named document blobs shown in the document pane. Insertion order is tab order.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    entries: Vec<(String, String)>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text for `name`, or append it as a new tab.
    pub fn upsert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        let text = text.into();
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = text;
            return;
        }
        self.entries.push((name, text));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, text)| text.as_str())
    }

    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.entries
            .get(index)
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
