// Search core: option derivation, filtering, interaction state, sessions.
// Everything below `handlers` is synchronous and free of I/O.

pub mod filter;
pub mod handlers;
pub mod interaction;
pub mod options;
pub mod session;

pub use interaction::{Action, TransitionError};
pub use options::FilterOptions;
pub use session::{JobBoard, SearchSession};
