// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Escape disambiguation: is a lone `ESC` the Escape key, or the start of something?
//!
//! The bytes alone cannot tell. The Escape key sends `0x1B`, and so does the first byte
//! of every arrow, function key, and Alt chord. The only signal is time: the rest of a
//! sequence arrives in the same burst, a human pressing Escape is followed by silence.
//!
//! ```text
//!                 buffer == [ESC] or [ESC ESC]
//!        ┌──────┐ ─────────── arm() ────────────▶ ┌───────────────────┐
//!        │ Idle │                                 │ PendingIntroducer │
//!        └──────┘                                 └─────────┬─────────┘
//!           ▲                          bytes arrive │         │ deadline elapses
//!           │                             cancel()  │         │ fire() / poll_expired()
//!           │                                       ▼         ▼
//!           │  next arm()                   ┌──────────────────────────┐
//!           └───────────────────────────────│ Resolved(how)            │
//!                                           └──────────────────────────┘
//! ```
//!
//! At most one timer is outstanding. Each [`arm()`] hands out a fresh [`EscTimerId`], and
//! firing any id other than the current one is a no-op, so a timer that raced with a
//! cancel can never produce a late escape.
//!
//! [`arm()`]: EscDisambiguator::arm

use crate::PendingIntroducer;
use std::time::Duration;
use tokio::time::Instant;

/// Generation id of one armed deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EscTimerId(u64);

/// How the last pending introducer was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscResolution {
    /// More bytes arrived before the deadline.
    BytesArrived,
    /// The deadline elapsed with nothing after the introducer.
    DeadlineElapsed,
    /// The owning decoder shut down while the timer was armed.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscState {
    Idle,
    PendingIntroducer {
        timer: EscTimerId,
        deadline: Instant,
        pending: PendingIntroducer,
    },
    Resolved(EscResolution),
}

#[derive(Debug)]
pub struct EscDisambiguator {
    timeout: Duration,
    state: EscState,
    next_timer_id: u64,
}

impl EscDisambiguator {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            state: EscState::Idle,
            next_timer_id: 0,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration { self.timeout }

    #[must_use]
    pub fn state(&self) -> EscState { self.state }

    /// Start the deadline for an introducer-only buffer. Replaces any timer that is
    /// still armed.
    pub fn arm(&mut self, now: Instant, pending: PendingIntroducer) -> EscTimerId {
        self.next_timer_id += 1;
        let timer = EscTimerId(self.next_timer_id);
        self.state = EscState::PendingIntroducer {
            timer,
            deadline: now + self.timeout,
            pending,
        };
        timer
    }

    /// Cancel the armed timer because more bytes arrived. Returns `true` if a timer
    /// was armed. Calling it again is harmless.
    pub fn cancel(&mut self) -> bool { self.resolve_armed(EscResolution::BytesArrived) }

    /// Cancel the armed timer because the owner is going away.
    pub fn shutdown(&mut self) -> bool { self.resolve_armed(EscResolution::Cancelled) }

    fn resolve_armed(&mut self, resolution: EscResolution) -> bool {
        match self.state {
            EscState::PendingIntroducer { .. } => {
                self.state = EscState::Resolved(resolution);
                true
            }
            EscState::Idle | EscState::Resolved(_) => false,
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            EscState::PendingIntroducer { deadline, .. } => Some(deadline),
            EscState::Idle | EscState::Resolved(_) => None,
        }
    }

    #[must_use]
    pub fn armed_timer(&self) -> Option<EscTimerId> {
        match self.state {
            EscState::PendingIntroducer { timer, .. } => Some(timer),
            EscState::Idle | EscState::Resolved(_) => None,
        }
    }

    /// A scheduled timer went off. Resolves only if `timer` is the one currently armed
    /// and its deadline has been reached at `now`.
    pub fn fire(&mut self, timer: EscTimerId, now: Instant) -> Option<PendingIntroducer> {
        match self.state {
            EscState::PendingIntroducer {
                timer: armed,
                deadline,
                pending,
            } if armed == timer && now >= deadline => {
                self.state = EscState::Resolved(EscResolution::DeadlineElapsed);
                Some(pending)
            }
            _ => None,
        }
    }

    /// Resolve the armed timer if its deadline has passed at `now`.
    pub fn poll_expired(&mut self, now: Instant) -> Option<PendingIntroducer> {
        let timer = self.armed_timer()?;
        self.fire(timer, now)
    }
}
