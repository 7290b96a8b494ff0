//! Effects - side effects declared by the reducer

/// Every catalog/detail effect carries the request sequence number its
/// result must echo back.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Unfiltered collection page, hydrated with full records
    LoadPage { seq: u64, offset: usize, limit: usize },
    /// Full membership list of one category
    LoadTypeMembers { seq: u64, tag: String },
    /// Full records for a slice of a membership list
    LoadEntries {
        seq: u64,
        offset: usize,
        names: Vec<String>,
    },
    SearchByName { seq: u64, name: String },
    LoadTypes,
    LoadDetail { seq: u64, name: String },
    SaveTrainer { name: String },
    ClearTrainer,
}
