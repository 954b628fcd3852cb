/// Monotonic identifier generator for one collection.
///
/// Numbers are never handed out twice in the same run, even after the
/// record that used one is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    prefix: String,
    next: u32,
}

impl IdSequence {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }

    /// Returns the next identifier and advances the counter
    pub fn next_id(&mut self) -> String {
        let id = self.peek();
        self.next += 1;
        id
    }

    /// Gets the identifier that would be assigned next
    pub fn peek(&self) -> String {
        format!("{}{:03}", self.prefix, self.next)
    }

    /// Moves the counter past every identifier in `ids` that carries this
    /// sequence's prefix. The counter never moves backwards.
    pub fn advance_past<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        let highest = ids
            .into_iter()
            .filter_map(|id| id.strip_prefix(self.prefix.as_str()))
            .filter_map(|n| n.parse::<u32>().ok())
            .max();

        if let Some(highest) = highest {
            self.next = self.next.max(highest.saturating_add(1));
        }
    }
}
