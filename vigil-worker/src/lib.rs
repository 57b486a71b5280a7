pub mod indexer;
pub mod skill;
