//! In-memory record of server-issued identifiers
//!
//! Ids enter the ledger only after a creation response carried them; they
//! leave when a delete for that id succeeds. Nothing is ever synthesized
//! client-side, and the ledger dies with the process.

/// Kind of entity an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Product,
}

/// Ordered ids per entity kind, in the order they were captured
#[derive(Debug, Default)]
pub struct Ledger {
    users: Vec<u64>,
    products: Vec<u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a server-issued id.
    pub fn record(&mut self, kind: EntityKind, id: u64) {
        self.entries_mut(kind).push(id);
    }

    /// Forget an id after a successful delete.
    pub fn remove(&mut self, kind: EntityKind, id: u64) {
        self.entries_mut(kind).retain(|&entry| entry != id);
    }

    /// Ids of one kind, in capture order.
    pub fn ids(&self, kind: EntityKind) -> &[u64] {
        match kind {
            EntityKind::User => &self.users,
            EntityKind::Product => &self.products,
        }
    }

    /// The id at `index` in capture order, if present.
    pub fn get(&self, kind: EntityKind, index: usize) -> Option<u64> {
        self.ids(kind).get(index).copied()
    }

    fn entries_mut(&mut self, kind: EntityKind) -> &mut Vec<u64> {
        match kind {
            EntityKind::User => &mut self.users,
            EntityKind::Product => &mut self.products,
        }
    }
}
