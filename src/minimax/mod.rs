mod deepening;
mod search;
mod timer;

pub use deepening::{iterative_deepening, SearchResult};
pub use search::{SearchCutoff, SearchWorker};
pub use timer::SearchTimer;
