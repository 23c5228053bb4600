use std::collections::BTreeMap;

/// Per-class instance numbering for one run.
///
/// Indices are handed out globally across all images, so two images with a
/// `dog` each produce `dog_0` and `dog_1`.
#[derive(Debug, Default, Clone)]
pub struct ClassInstanceCounter {
    counts: BTreeMap<String, u64>,
}

impl ClassInstanceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next index for `class_label`, starting at 0.
    pub fn next_index(&mut self, class_label: &str) -> u64 {
        match self.counts.get_mut(class_label) {
            Some(count) => {
                let index = *count;
                *count += 1;
                index
            }
            None => {
                self.counts.insert(class_label.to_string(), 1);
                0
            }
        }
    }

    /// Number of indices handed out so far for `class_label`.
    pub fn count(&self, class_label: &str) -> u64 {
        self.counts.get(class_label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Per-class totals sorted by label.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_index_is_sequential_per_class() {
        let mut counter = ClassInstanceCounter::new();
        let dogs: Vec<_> = (0..5).map(|_| counter.next_index("dog")).collect();
        assert_eq!(dogs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_classes_are_counted_independently() {
        let mut counter = ClassInstanceCounter::new();
        assert_eq!(counter.next_index("cat"), 0);
        assert_eq!(counter.next_index("dog"), 0);
        assert_eq!(counter.next_index("cat"), 1);
        assert_eq!(counter.next_index("dog"), 1);
        assert_eq!(counter.next_index("dog"), 2);

        assert_eq!(counter.count("cat"), 2);
        assert_eq!(counter.count("dog"), 3);
        assert_eq!(counter.count("bird"), 0);
        assert_eq!(counter.total(), 5);

        let snapshot: Vec<_> = counter.iter().collect();
        assert_eq!(snapshot, vec![("cat", 2), ("dog", 3)]);
    }
}
