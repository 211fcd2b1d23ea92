//! Drag-and-drop release moves with optimistic update and rollback.
//!
//! A move is applied to the in-memory item list before the persistence write
//! starts. When the write fails the whole list is restored from the snapshot
//! taken at the start of that move and an error notice is queued.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use thiserror::Error;

use super::notice::NoticeQueue;
use crate::models::schedule::{Category, ReleaseAxis, ScheduledItem};
use crate::utils::date::parse_day_key;

/// Failure of the persistence write behind a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("ticket {0} not found")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("malformed drag id: {0}")]
    InvalidDragId(String),
    #[error("malformed cell id: {0}")]
    InvalidCellId(String),
    #[error("item {0} is not on the calendar")]
    UnknownItem(String),
    #[error("item {0} comes from an external calendar and cannot be moved")]
    ReadOnly(String),
    #[error("failed to save release date: {0}")]
    Write(#[from] WriteError),
}

/// Persists a new release date for one item.
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseWriter {
    fn write_release_date(
        &self,
        item_id: &str,
        axis: ReleaseAxis,
        date: NaiveDate,
    ) -> Result<(), WriteError>;
}

/// Parsed drag payload `<item id>:<category>`.
///
/// The item id may itself contain colons; the category is the last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragId {
    pub item_id: String,
    pub category: Category,
}

impl FromStr for DragId {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item_id, tag) = s
            .rsplit_once(':')
            .ok_or_else(|| MoveError::InvalidDragId(s.to_string()))?;

        if item_id.is_empty() {
            return Err(MoveError::InvalidDragId(s.to_string()));
        }

        let category = tag
            .parse::<Category>()
            .map_err(|_| MoveError::InvalidDragId(s.to_string()))?;

        Ok(Self {
            item_id: item_id.to_string(),
            category,
        })
    }
}

impl fmt::Display for DragId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.item_id, self.category)
    }
}

/// Raw drop reported by the drag-and-drop surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub source_cell_id: String,
    /// `None` when the card was released outside any cell.
    pub destination_cell_id: Option<String>,
    pub drag_id: String,
}

/// A requested date change for one item on one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseMove {
    pub item_id: String,
    pub axis: ReleaseAxis,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReleaseMove {
    pub fn new(item_id: impl Into<String>, axis: ReleaseAxis, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            item_id: item_id.into(),
            axis,
            from,
            to,
        }
    }

    /// Interpret a drop. Drops outside a cell or onto the source cell are
    /// `Ok(None)`.
    pub fn from_drop(drop: &DropEvent) -> Result<Option<Self>, MoveError> {
        let Some(destination) = drop.destination_cell_id.as_deref() else {
            return Ok(None);
        };

        if destination == drop.source_cell_id {
            return Ok(None);
        }

        let drag_id: DragId = drop.drag_id.parse()?;
        let axis = drag_id
            .category
            .axis()
            .ok_or_else(|| MoveError::ReadOnly(drag_id.item_id.clone()))?;

        let from = parse_day_key(&drop.source_cell_id)
            .ok_or_else(|| MoveError::InvalidCellId(drop.source_cell_id.clone()))?;
        let to = parse_day_key(destination)
            .ok_or_else(|| MoveError::InvalidCellId(destination.to_string()))?;

        Ok(Some(Self::new(drag_id.item_id, axis, from, to)))
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// A move that has been applied optimistically and awaits its write.
#[derive(Debug, Clone)]
pub struct PendingMove {
    pub move_id: u64,
    pub release: ReleaseMove,
    snapshot: Vec<ScheduledItem>,
    /// Moves already applied but unsettled when the snapshot was taken.
    in_flight: Vec<u64>,
}

/// Result of a background move once its write has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub move_id: u64,
    pub release: ReleaseMove,
    pub result: Result<(), MoveError>,
}

struct MoveCompletion {
    move_id: u64,
    result: Result<(), WriteError>,
}

/// In-memory release schedule shared by the calendar views.
pub struct ReleaseSchedule {
    items: Vec<ScheduledItem>,
    pending: HashMap<u64, PendingMove>,
    rolled_back: HashSet<u64>,
    next_move_id: u64,
    completion_tx: Sender<MoveCompletion>,
    completion_rx: Receiver<MoveCompletion>,
    notices: NoticeQueue,
}

impl ReleaseSchedule {
    pub fn new(items: Vec<ScheduledItem>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        Self {
            items,
            pending: HashMap::new(),
            rolled_back: HashSet::new(),
            next_move_id: 1,
            completion_tx,
            completion_rx,
            notices: NoticeQueue::default(),
        }
    }

    pub fn items(&self) -> &[ScheduledItem] {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&ScheduledItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Swap in a freshly fetched list. The last completed fetch wins.
    pub fn replace_items(&mut self, items: Vec<ScheduledItem>) {
        log::debug!(
            "Replacing {} schedule items with {} fetched items",
            self.items.len(),
            items.len()
        );
        self.items = items;
    }

    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NoticeQueue {
        &mut self.notices
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Apply a move to the in-memory list and return the handle needed to
    /// settle it. Returns `Ok(None)` for no-op moves.
    pub fn begin_move(&mut self, release: &ReleaseMove) -> Result<Option<PendingMove>, MoveError> {
        if release.is_noop() {
            return Ok(None);
        }

        let index = self
            .items
            .iter()
            .position(|item| item.id == release.item_id)
            .ok_or_else(|| MoveError::UnknownItem(release.item_id.clone()))?;

        if self.items[index].is_external() {
            return Err(MoveError::ReadOnly(release.item_id.clone()));
        }

        if self.items[index].date_for(release.axis) != Some(release.from) {
            log::debug!(
                "Item {} {} date differs from drag source {}",
                release.item_id,
                release.axis,
                release.from
            );
        }

        let snapshot = self.items.clone();
        let mut in_flight: Vec<u64> = self.pending.keys().copied().collect();
        in_flight.sort_unstable();
        self.items[index].set_date(release.axis, Some(release.to));

        let move_id = self.next_move_id;
        self.next_move_id += 1;

        Ok(Some(PendingMove {
            move_id,
            release: release.clone(),
            snapshot,
            in_flight,
        }))
    }

    /// Settle a move with the outcome of its write. On failure the list is
    /// restored to the snapshot taken in [`begin_move`](Self::begin_move).
    ///
    /// The snapshot is the whole list, so it still carries the optimistic
    /// change of any move that was in flight at the time, even one that has
    /// since been rolled back itself. That case is logged.
    pub fn finish_move(
        &mut self,
        pending: PendingMove,
        result: Result<(), WriteError>,
    ) -> Result<(), MoveError> {
        match result {
            Ok(()) => {
                log::info!(
                    "Moved {} {} release from {} to {}",
                    pending.release.item_id,
                    pending.release.axis,
                    pending.release.from,
                    pending.release.to
                );
                Ok(())
            }
            Err(err) => {
                log::warn!(
                    "Rolling back {} {} release move: {}",
                    pending.release.item_id,
                    pending.release.axis,
                    err
                );
                let reverted = self.rolled_back_in_snapshot(&pending);
                if !reverted.is_empty() {
                    log::warn!(
                        "Snapshot for move {} reapplies rolled-back moves {:?}",
                        pending.move_id,
                        reverted
                    );
                }
                self.rolled_back.insert(pending.move_id);
                self.items = pending.snapshot;
                self.notices
                    .error(format!("Could not save the new release date: {}", err));
                Err(MoveError::Write(err))
            }
        }
    }

    /// Move an item and persist the change before returning.
    pub fn move_item(
        &mut self,
        item_id: &str,
        axis: ReleaseAxis,
        from: NaiveDate,
        to: NaiveDate,
        writer: &dyn ReleaseWriter,
    ) -> Result<(), MoveError> {
        let release = ReleaseMove::new(item_id, axis, from, to);
        let Some(pending) = self.begin_move(&release)? else {
            return Ok(());
        };

        let result = writer.write_release_date(&release.item_id, release.axis, release.to);
        self.finish_move(pending, result)
    }

    /// Interpret a drop and run the resulting move.
    pub fn handle_drop(&mut self, drop: &DropEvent, writer: &dyn ReleaseWriter) -> Result<(), MoveError> {
        match ReleaseMove::from_drop(drop)? {
            Some(release) => self.move_item(
                &release.item_id,
                release.axis,
                release.from,
                release.to,
                writer,
            ),
            None => Ok(()),
        }
    }

    /// Apply a move immediately and persist it on a worker thread.
    ///
    /// Returns the move id, or `None` for no-op moves. Completion is picked up
    /// by [`poll_completions`](Self::poll_completions).
    pub fn move_item_in_background(
        &mut self,
        release: ReleaseMove,
        writer: Arc<dyn ReleaseWriter + Send + Sync>,
    ) -> Result<Option<u64>, MoveError> {
        let Some(pending) = self.begin_move(&release)? else {
            return Ok(None);
        };

        let move_id = pending.move_id;
        self.pending.insert(move_id, pending);

        let tx = self.completion_tx.clone();
        thread::spawn(move || {
            let result = writer.write_release_date(&release.item_id, release.axis, release.to);
            let _ = tx.send(MoveCompletion { move_id, result });
        });

        Ok(Some(move_id))
    }

    /// Settle every background move whose write has finished.
    pub fn poll_completions(&mut self) -> Vec<MoveOutcome> {
        let mut outcomes = Vec::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => {
                    if let Some(outcome) = self.settle(completion) {
                        outcomes.push(outcome);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        outcomes
    }

    /// Block until every background move has settled or `timeout` passes.
    pub fn wait_for_pending(&mut self, timeout: Duration) -> Vec<MoveOutcome> {
        let deadline = Instant::now() + timeout;
        let mut outcomes = Vec::new();

        while !self.pending.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.completion_rx.recv_timeout(remaining) {
                Ok(completion) => {
                    if let Some(outcome) = self.settle(completion) {
                        outcomes.push(outcome);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    log::warn!("{} release moves still pending after {:?}", self.pending.len(), timeout);
                    break;
                }
            }
        }

        outcomes
    }

    fn rolled_back_in_snapshot(&self, pending: &PendingMove) -> Vec<u64> {
        pending
            .in_flight
            .iter()
            .copied()
            .filter(|id| self.rolled_back.contains(id))
            .collect()
    }

    fn settle(&mut self, completion: MoveCompletion) -> Option<MoveOutcome> {
        let pending = self.pending.remove(&completion.move_id)?;
        let release = pending.release.clone();
        let result = self.finish_move(pending, completion.result);
        Some(MoveOutcome {
            move_id: completion.move_id,
            release,
            result,
        })
    }
}
