//! Release calendar view-model.
//!
//! Everything here is derived from a flat list of [`ScheduledItem`]s and a
//! [`ViewState`]: the visible grid, the entries on each day, the header
//! counts, and the effect of dragging an entry to another day.
//!
//! [`ScheduledItem`]: crate::models::schedule::ScheduledItem

pub mod assignment;
pub mod counts;
pub mod drag;
pub mod grid;
pub mod notice;
pub mod view;

pub use assignment::{client_names, items_for_date, ScheduleEntry};
pub use counts::{count_by_category, CategoryCounts};
pub use drag::{
    DragId, DropEvent, MoveError, MoveOutcome, ReleaseMove, ReleaseSchedule, ReleaseWriter,
    WriteError,
};
pub use grid::{generate_grid, navigate};
pub use view::{build_cells, CalendarCell, ViewState};
