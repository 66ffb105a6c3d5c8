//! Ephemeral per-tap feedback records ("+N" floaters).
//!
//! Each accepted tap emits one record carrying the tap's screen position. The
//! presentation layer animates it and signals completion with
//! [`FeedbackQueue::consume`]. Records are not game state and are never saved.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use crate::input::ScreenPoint;
use crate::time::Timestamp;

/// Unique feedback identity: tap time plus a per-queue sequence number, so two
/// touches reported in the same millisecond still get distinct ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FeedbackId {
    pub millis: u64,
    pub seq: u64,
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.millis, self.seq)
    }
}

/// A floating "+N" record at the tap position.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeedbackEvent {
    pub id: FeedbackId,
    pub x: f64,
    pub y: f64,
    /// Points credited by the tap.
    pub amount: u64,
}

impl FeedbackEvent {
    pub fn label(&self) -> String {
        format!("+{}", self.amount)
    }
}

/// Bounded queue of pending feedback records.
#[derive(Clone, Debug)]
pub struct FeedbackQueue {
    events: VecDeque<FeedbackEvent>,
    capacity: usize,
    next_seq: u64,
}

impl FeedbackQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity: capacity.max(1),
            next_seq: 0,
        }
    }

    /// Create and enqueue a record. The oldest record is dropped when full.
    pub fn push(&mut self, now: Timestamp, at: ScreenPoint, amount: u64) -> FeedbackEvent {
        let event = FeedbackEvent {
            id: FeedbackId {
                millis: now.as_millis(),
                seq: self.next_seq,
            },
            x: at.x,
            y: at.y,
            amount,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        if self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event.clone());
        event
    }

    /// Remove a record once its animation has finished. Returns false for
    /// unknown or already-consumed ids.
    pub fn consume(&mut self, id: FeedbackId) -> bool {
        match self.events.iter().position(|e| e.id == id) {
            Some(idx) => {
                self.events.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedbackEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for FeedbackQueue {
    fn default() -> Self {
        Self::new(64)
    }
}
