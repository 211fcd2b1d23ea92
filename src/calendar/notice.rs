//! Non-blocking notices for brief user feedback.
//!
//! Notices replace blocking alerts: a failed release move pushes an error
//! notice which stays visible for a few seconds and then expires.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "✓",
            NoticeLevel::Info => "ℹ",
            NoticeLevel::Warning => "⚠",
            NoticeLevel::Error => "✗",
        }
    }

    fn default_duration(&self) -> Duration {
        match self {
            NoticeLevel::Error => Duration::from_secs(6),
            NoticeLevel::Warning => Duration::from_secs(4),
            _ => Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, level: NoticeLevel) -> Self {
        Self::at(message, level, Instant::now())
    }

    pub fn at(message: impl Into<String>, level: NoticeLevel, created_at: Instant) -> Self {
        Self {
            message: message.into(),
            level,
            created_at,
            duration: level.default_duration(),
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.level.icon(), self.message)
    }
}

/// Bounded queue of notices, oldest first.
#[derive(Debug, Clone)]
pub struct NoticeQueue {
    notices: VecDeque<Notice>,
    max_notices: usize,
}

impl Default for NoticeQueue {
    fn default() -> Self {
        Self::new(5)
    }
}

impl NoticeQueue {
    pub fn new(max_notices: usize) -> Self {
        Self {
            notices: VecDeque::new(),
            max_notices: max_notices.max(1),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        if self.notices.len() == self.max_notices {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notice::new(message, NoticeLevel::Error));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notice::new(message, NoticeLevel::Success));
    }

    /// Drop expired notices and return the ones still showing.
    pub fn active_at(&mut self, now: Instant) -> Vec<&Notice> {
        self.notices.retain(|notice| !notice.is_expired_at(now));
        self.notices.iter().collect()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.back()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}
