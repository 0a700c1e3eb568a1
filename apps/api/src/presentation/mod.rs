// Presentation layer: pagination and display projections of the search core.
// Handlers serialize these views directly; nothing here mutates session state.

pub mod pagination;
pub mod views;

pub use pagination::DEFAULT_PAGE_SIZE;
pub use views::{board_view, results_view, BoardView, PostingDetail, ResultsView};
