//! Cancellable periodic background work
//!
//! Every background loop in the crate (sink flushing, variable tracking) is a
//! [`PeriodicTask`] bound to a [`CancellationToken`]. Tokens form a tree:
//!
//! ```text
//! root (facade)
//! ├── flush loop (sink)
//! └── tracking
//!     ├── tracked var A
//!     └── tracked func B
//! ```
//!
//! Cancelling a parent stops every task below it, while each
//! [`TaskHandle`] cancels only its own token.

mod periodic;


pub use periodic::{PeriodicTask, TaskHandle};
pub use tokio_util::sync::CancellationToken;
