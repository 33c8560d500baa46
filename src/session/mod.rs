//! Client-side query sessions.
//!
//! These drive repositories on behalf of a single consumer (a page, a search
//! box): they debounce input, sequence requests so that only the newest one
//! may publish its result, and stop publishing once the consumer is gone.

mod search;
mod sequence;
mod stream;

pub use search::*;
pub use sequence::*;
pub use stream::*;
