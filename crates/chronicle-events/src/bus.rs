//! Category-keyed pub/sub dispatch, paired one-to-one with an [`EventLog`].
//!
//! Single-threaded by design (per the engine's concurrency model), so
//! subscriber storage uses `RefCell` interior mutability rather than
//! `Arc`/`Mutex` — there is never more than one thread touching a bus.

use std::cell::RefCell;

use crate::error::EventsError;
use crate::event::{Event, EventCategory, EventDraft, EventId, EventIdAllocator};
use crate::log::EventLog;

/// A subscriber callback. Receives the event just dispatched and a handle
/// back to the bus, so it may itself call [`EventBus::emit`] -- re-entrant
/// emits are dispatched depth-first, completing before the outer `emit`
/// call returns.
pub type Subscriber = Box<dyn FnMut(&Event, &mut EventBus)>;

struct Subscription {
    id: u64,
    category: Option<EventCategory>,
    callback: Subscriber,
    active: bool,
}

/// A handle to a live subscription. Pass to [`EventBus::unsubscribe`] to
/// remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionHandle(u64);

/// A no-op placeholder used to briefly vacate a subscription's slot while
/// its callback is executing, so a re-entrant `emit` can freely inspect or
/// mutate the subscriber list without a `RefCell` double-borrow panic.
fn noop_subscriber() -> Subscriber {
    Box::new(|_event: &Event, _bus: &mut EventBus| {})
}

pub struct EventBus {
    log: EventLog,
    id_alloc: EventIdAllocator,
    subscriptions: RefCell<Vec<Subscription>>,
    next_sub_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            log: EventLog::new(),
            id_alloc: EventIdAllocator::new(),
            subscriptions: RefCell::new(Vec::new()),
            next_sub_id: 0,
        }
    }

    /// Borrow the paired log.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Subscribe to events of one category only.
    pub fn subscribe(&mut self, category: EventCategory, callback: Subscriber) -> SubscriptionHandle {
        self.insert_subscription(Some(category), callback)
    }

    /// Subscribe to every emitted event, regardless of category.
    pub fn subscribe_any(&mut self, callback: Subscriber) -> SubscriptionHandle {
        self.insert_subscription(None, callback)
    }

    fn insert_subscription(&mut self, category: Option<EventCategory>, callback: Subscriber) -> SubscriptionHandle {
        let id = self.next_sub_id;
        self.next_sub_id += 1;
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            category,
            callback,
            active: true,
        });
        SubscriptionHandle(id)
    }

    /// Remove a subscription. Returns whether it was still active.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let mut subs = self.subscriptions.borrow_mut();
        if let Some(sub) = subs.iter_mut().find(|s| s.id == handle.0) {
            let was_active = sub.active;
            sub.active = false;
            was_active
        } else {
            false
        }
    }

    /// Stamp `draft` into a full [`Event`], append it to the log, and
    /// dispatch it: first to every any-subscriber (in subscription order),
    /// then to every subscriber of its category (in subscription order).
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::UnknownCause`] if the draft names a cause id
    /// not already present in the log (should not happen for well-formed
    /// internal callers; surfaced rather than silently dropped).
    pub fn emit(&mut self, draft: EventDraft, tick: u64) -> Result<EventId, EventsError> {
        let category = draft
            .category
            .expect("EventDraft must declare a category before being emitted");
        let event = Event {
            id: self.id_alloc.allocate(),
            category,
            subtype: draft.subtype,
            tick,
            participants: draft.participants,
            causes: draft.causes,
            consequence_potentials: draft.consequence_potentials,
            data: draft.data,
            significance: draft.significance,
        };
        self.dispatch(event)
    }

    fn dispatch(&mut self, event: Event) -> Result<EventId, EventsError> {
        let id = self.log.append(event.clone())?;

        let any_ids: Vec<u64> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.active && s.category.is_none())
            .map(|s| s.id)
            .collect();
        let category_ids: Vec<u64> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.active && s.category == Some(event.category))
            .map(|s| s.id)
            .collect();

        for sub_id in any_ids.into_iter().chain(category_ids) {
            self.invoke(sub_id, &event);
        }

        Ok(id)
    }

    /// Temporarily take the callback out of its slot (swapping in a no-op),
    /// invoke it without holding the `RefCell` borrow, then restore it --
    /// this is what lets a subscriber call `emit` on the same bus.
    fn invoke(&mut self, sub_id: u64, event: &Event) {
        let taken = {
            let mut subs = self.subscriptions.borrow_mut();
            subs.iter_mut()
                .find(|s| s.id == sub_id && s.active)
                .map(|s| std::mem::replace(&mut s.callback, noop_subscriber()))
        };

        if let Some(mut callback) = taken {
            callback(event, self);
            let mut subs = self.subscriptions.borrow_mut();
            if let Some(sub) = subs.iter_mut().find(|s| s.id == sub_id) {
                sub.callback = callback;
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
