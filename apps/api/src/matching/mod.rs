// Skill matching: comparator, score store, ranking engine, profile completion.
// Ranking is pure over snapshots; handlers fetch the snapshots from the stores.

pub mod comparator;
pub mod completion;
pub mod handlers;
pub mod ranking;
pub mod score_store;
