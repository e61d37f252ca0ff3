/// A student who declined to answer, and the question they skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShameEntry {
    pub name: String,
    pub question: String,
}

/// Append-only log, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallOfShame {
    entries: Vec<ShameEntry>,
}

impl WallOfShame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims `name` and appends an entry. Returns None (and records
    /// nothing) when the trimmed name is empty.
    pub fn record(&mut self, name: &str, question: &str) -> Option<&ShameEntry> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.entries.push(ShameEntry {
            name: name.to_string(),
            question: question.to_string(),
        });
        self.entries.last()
    }

    pub fn entries(&self) -> &[ShameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_trims_name() {
        let mut wall = WallOfShame::new();
        let entry = wall.record("  Alex ", "2 + 2 = ?").cloned();

        assert_eq!(
            entry,
            Some(ShameEntry {
                name: "Alex".into(),
                question: "2 + 2 = ?".into()
            })
        );
        assert_eq!(wall.len(), 1);
    }

    #[test]
    fn test_blank_names_are_refused() {
        let mut wall = WallOfShame::new();
        assert!(wall.record("", "q").is_none());
        assert!(wall.record("   \t", "q").is_none());
        assert!(wall.is_empty());
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut wall = WallOfShame::new();
        wall.record("Sam", "q1");
        wall.record("Alex", "q2");
        wall.record("Sam", "q3");

        let names: Vec<&str> = wall.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Sam", "Alex", "Sam"]);
    }
}
