// Board module
// Ticket status vocabulary and the kanban columns that group it

use serde::Serialize;

pub const STATUS_OPEN: &str = "Open";
pub const STATUS_NOT_STARTED: &str = "Not Started";
pub const STATUS_ON_HOLD: &str = "On Hold";
pub const STATUS_SUSPENDED: &str = "Suspended";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_AWAITING_DEVELOPMENT: &str = "Awaiting Development";
pub const STATUS_AWAITING_DEVELOPER_REPLY: &str = "Awaiting Developer Reply";
pub const STATUS_BUSINESS_ATTENTION: &str = "Business Attention";
pub const STATUS_LEAD_ATTENTION: &str = "Lead Attention";
pub const STATUS_COMPLETED_AWAITING_CLOSURE: &str = "Completed - Awaiting Closure";
pub const STATUS_COMPLETED: &str = "Completed";

/// Every status a ticket may carry.
pub const STATUSES: &[&str] = &[
    STATUS_OPEN,
    STATUS_NOT_STARTED,
    STATUS_ON_HOLD,
    STATUS_SUSPENDED,
    STATUS_IN_PROGRESS,
    STATUS_AWAITING_DEVELOPMENT,
    STATUS_AWAITING_DEVELOPER_REPLY,
    STATUS_BUSINESS_ATTENTION,
    STATUS_LEAD_ATTENTION,
    STATUS_COMPLETED_AWAITING_CLOSURE,
    STATUS_COMPLETED,
];

pub fn is_known_status(status: &str) -> bool {
    STATUSES.contains(&status)
}

/// Both completed states count as done for alerting and stats.
pub fn is_completed(status: &str) -> bool {
    status == STATUS_COMPLETED || status == STATUS_COMPLETED_AWAITING_CLOSURE
}

/// A kanban column and the statuses it collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    pub id: &'static str,
    pub label: &'static str,
    /// The first status is the one assigned when a card is dropped here.
    pub statuses: &'static [&'static str],
}

impl BoardColumn {
    pub fn contains(&self, status: &str) -> bool {
        self.statuses.contains(&status)
    }

    pub fn target_status(&self) -> &'static str {
        self.statuses[0]
    }
}

pub const BOARD_COLUMNS: &[BoardColumn] = &[
    BoardColumn {
        id: "todo",
        label: "To-do / On hold",
        statuses: &[
            STATUS_NOT_STARTED,
            STATUS_OPEN,
            STATUS_ON_HOLD,
            STATUS_SUSPENDED,
        ],
    },
    BoardColumn {
        id: "progress",
        label: "In progress",
        statuses: &[
            STATUS_IN_PROGRESS,
            STATUS_AWAITING_DEVELOPMENT,
            STATUS_AWAITING_DEVELOPER_REPLY,
            STATUS_BUSINESS_ATTENTION,
            STATUS_LEAD_ATTENTION,
        ],
    },
    BoardColumn {
        id: "done",
        label: "Completed",
        statuses: &[STATUS_COMPLETED_AWAITING_CLOSURE, STATUS_COMPLETED],
    },
];

pub fn column_by_id(id: &str) -> Option<&'static BoardColumn> {
    BOARD_COLUMNS.iter().find(|column| column.id == id)
}

pub fn column_for_status(status: &str) -> Option<&'static BoardColumn> {
    BOARD_COLUMNS.iter().find(|column| column.contains(status))
}

/// Group items into board columns by the status `status_of` reports.
///
/// Items whose status belongs to no column are left out, matching the board
/// which only renders known columns.
pub fn group_by_column<'a, T, F>(items: &'a [T], status_of: F) -> Vec<(&'static BoardColumn, Vec<&'a T>)>
where
    F: Fn(&T) -> &str,
{
    BOARD_COLUMNS
        .iter()
        .map(|column| {
            let cards = items
                .iter()
                .filter(|item| column.contains(status_of(item)))
                .collect();
            (column, cards)
        })
        .collect()
}
