//! Caller-owned name generator for graphs created without a title.

/// Produces sequential graph names such as `graph-0`, `graph-1`, ...
///
/// The generator is an ordinary value owned by whoever creates graphs, so
/// two independent callers never share a counter.
///
/// # Example
///
/// ```rust
/// use trellis::graph::{Graph, IdGenerator};
///
/// let mut ids = IdGenerator::new("net");
/// let first: Graph = Graph::with_generated_name(&mut ids, false);
/// let second: Graph = Graph::with_generated_name(&mut ids, true);
///
/// assert_eq!(first.name(), "net-0");
/// assert_eq!(second.name(), "net-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    prefix: String,
    next: u64,
}

impl IdGenerator {
    /// Creates a generator whose names start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Returns the next unused name.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }

    /// Number of names issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("graph")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_id(), "graph-0");
        assert_eq!(ids.next_id(), "graph-1");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_generators_are_independent() {
        let mut a = IdGenerator::new("a");
        let mut b = IdGenerator::new("b");
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id(), "b-0");
        assert_eq!(a.next_id(), "a-2");
    }
}
