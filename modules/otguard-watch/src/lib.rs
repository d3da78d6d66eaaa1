pub mod classifier;
pub mod filter;
pub mod seen;
pub mod store;
pub mod traits;
pub mod watcher;

pub use classifier::{Classification, Classifier};
pub use filter::KeywordFilter;
pub use seen::SeenSet;
pub use store::FindingStore;
pub use watcher::{CycleStats, Watcher};
