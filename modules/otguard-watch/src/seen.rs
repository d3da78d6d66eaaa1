use std::collections::HashSet;

/// Process-lifetime memory of CVE ids already handled this run.
///
/// Deliberately not persisted: a restart re-evaluates the current window,
/// which can re-classify records but keeps the loop free of any on-disk
/// dedup state. The findings store does not enforce uniqueness, so this
/// set is the only thing preventing double-reporting within a run.
#[derive(Debug, Default)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Mark an id as seen. Returns true if it was newly inserted.
    pub fn insert(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
