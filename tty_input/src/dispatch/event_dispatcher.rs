// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Observer registry that delivers decoded events to handlers by [`EventKind`].
//!
//! # Dispatch rounds
//!
//! [`EventDispatcher::emit`] snapshots the handler list for the kind, then calls each
//! handler in registration order without holding the registry lock. So handlers may
//! subscribe and unsubscribe freely, including themselves:
//!
//! - A handler added during a round is first called in the next round.
//! - A handler removed during a round is not called later in that round. Handlers that
//!   already ran are unaffected.
//!
//! A handler that re-enters `emit` and reaches itself is skipped for that nested round
//! (its own lock is held by the outer call).

use crate::{EventKind, TtyInputError, TtyInputEvent};
use rustc_hash::FxHashMap;
use std::{fmt::{Debug, Formatter},
          str::FromStr,
          sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError}};

const DEBUG_TTY_INPUT_SHOW_DISPATCH: bool = false;

/// A registered callback. Shared so a dispatch round can run it after releasing the
/// registry lock.
pub type EventHandler = Arc<Mutex<dyn FnMut(&TtyInputEvent) + Send>>;

/// Returned by [`EventDispatcher::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    handler: EventHandler,
}

#[derive(Default)]
struct DispatcherInner {
    subscriptions: FxHashMap<EventKind, Vec<Subscription>>,
    next_id: u64,
}

/// Cheap to clone. Clones share one registry.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    inner: Arc<Mutex<DispatcherInner>>,
}

impl Debug for EventDispatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock_inner();
        let mut counts: Vec<_> = inner
            .subscriptions
            .iter()
            .map(|(kind, subs)| (kind.as_ref(), subs.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventDispatcher")
            .field("handler_counts", &counts)
            .finish()
    }
}

impl EventDispatcher {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// A poisoned registry only means a handler panicked mid-update of a `Vec`, which
    /// leaves it structurally valid.
    fn lock_inner(&self) -> MutexGuard<'_, DispatcherInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl FnMut(&TtyInputEvent) + Send + 'static,
    ) -> SubscriptionId {
        let mut inner = self.lock_inner();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.subscriptions.entry(kind).or_default().push(Subscription {
            id,
            handler: Arc::new(Mutex::new(handler)),
        });
        id
    }

    /// [`subscribe`](Self::subscribe) with the kind given as `"keypress"`,
    /// `"mousedown"`, `"mouseup"`, or `"mousemove"`.
    ///
    /// # Errors
    ///
    /// [`TtyInputError::UnknownEventKind`] for any other name.
    pub fn subscribe_by_name(
        &self,
        kind: &str,
        handler: impl FnMut(&TtyInputEvent) + Send + 'static,
    ) -> Result<SubscriptionId, TtyInputError> {
        let kind = EventKind::from_str(kind)
            .map_err(|_| TtyInputError::UnknownEventKind(kind.to_string()))?;
        Ok(self.subscribe(kind, handler))
    }

    /// Returns `false` if `id` was not (or no longer) registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock_inner();
        for subs in inner.subscriptions.values_mut() {
            if let Some(index) = subs.iter().position(|it| it.id == id) {
                subs.remove(index);
                return true;
            }
        }
        false
    }

    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.lock_inner()
            .subscriptions
            .get(&kind)
            .map_or(0, Vec::len)
    }

    fn is_subscribed(&self, kind: EventKind, id: SubscriptionId) -> bool {
        self.lock_inner()
            .subscriptions
            .get(&kind)
            .is_some_and(|subs| subs.iter().any(|it| it.id == id))
    }

    /// Call every handler registered for `kind`, in registration order. Returns how
    /// many handlers ran.
    pub fn emit(&self, kind: EventKind, event: &TtyInputEvent) -> usize {
        let round: Vec<(SubscriptionId, EventHandler)> = self
            .lock_inner()
            .subscriptions
            .get(&kind)
            .map(|subs| {
                subs.iter()
                    .map(|it| (it.id, Arc::clone(&it.handler)))
                    .collect()
            })
            .unwrap_or_default();

        let mut invoked = 0;
        for (id, handler) in round {
            if !self.is_subscribed(kind, id) {
                continue;
            }
            let mut handler = match handler.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => {
                    DEBUG_TTY_INPUT_SHOW_DISPATCH.then(|| {
                        tracing::debug!(
                            message = "EventDispatcher: skipping re-entrant handler",
                            kind = %kind,
                            id = ?id,
                        );
                    });
                    continue;
                }
            };
            (*handler)(event);
            invoked += 1;
        }
        invoked
    }

    /// [`emit`](Self::emit) on the event's own kind.
    pub fn dispatch(&self, event: &TtyInputEvent) -> usize { self.emit(event.kind(), event) }
}
