//! Observable interaction state.
//!
//! [InteractiveState] is a shared cell of [StateFlags] plus change listeners,
//! built on [Rc] and [Cell] like the rest of lumen's single-threaded state.
//! Clones share the same flags; [WeakInteractiveState] observes without
//! keeping the state alive.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use lumen_theme::state::StateFlags;

/// Identifies a state listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// One observed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    /// Flags before the mutation.
    pub previous: StateFlags,
    /// Flags after the mutation.
    pub current: StateFlags,
}

impl StateChange {
    /// Flags that differ.
    pub fn changed(&self) -> StateFlags {
        self.previous.symmetric_difference(self.current)
    }

    /// The new value of `flag` if it changed.
    pub fn became(&self, flag: StateFlags) -> Option<bool> {
        if self.changed().intersects(flag) {
            Some(self.current.contains(flag))
        } else {
            None
        }
    }
}

type StateListener = Rc<dyn Fn(StateChange)>;

struct StateInner {
    flags: Cell<StateFlags>,
    listeners: RefCell<IndexMap<ListenerId, StateListener>>,
    next_id: Cell<u64>,
}

/// Per-widget interaction flags with change notification.
///
/// Selected and indeterminate are never observed together: setting
/// indeterminate clears selected, and setting selected clears indeterminate.
/// Clearing indeterminate leaves selected as it is.
#[derive(Clone)]
pub struct InteractiveState {
    inner: Rc<StateInner>,
}

impl InteractiveState {
    /// Create a state holding `flags`.
    pub fn new(flags: StateFlags) -> Self {
        Self {
            inner: Rc::new(StateInner {
                flags: Cell::new(flags.normalized()),
                listeners: RefCell::new(IndexMap::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Current flags.
    pub fn get(&self) -> StateFlags {
        self.inner.flags.get()
    }

    /// Whether every flag in `flag` is set.
    pub fn contains(&self, flag: StateFlags) -> bool {
        self.get().contains(flag)
    }

    /// Set or clear `flag`. Returns whether anything changed.
    pub fn set(&self, flag: StateFlags, value: bool) -> bool {
        let mut next = self.get();
        next.set(flag, value);
        if value && flag.contains(StateFlags::INDETERMINATE) {
            next.remove(StateFlags::SELECTED);
        } else if value && flag.contains(StateFlags::SELECTED) {
            next.remove(StateFlags::INDETERMINATE);
        }
        self.replace(next)
    }

    /// Edit several flags as one mutation, notifying at most once.
    pub fn update(&self, edit: impl FnOnce(&mut StateFlags)) -> bool {
        let mut next = self.get();
        edit(&mut next);
        self.replace(next.normalized())
    }

    fn replace(&self, next: StateFlags) -> bool {
        let previous = self.inner.flags.replace(next);
        if previous == next {
            return false;
        }
        self.notify(StateChange {
            previous,
            current: next,
        });
        true
    }

    fn notify(&self, change: StateChange) {
        let listeners: Vec<StateListener> =
            self.inner.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(change);
        }
    }

    /// Hover flag.
    pub fn is_hovered(&self) -> bool {
        self.contains(StateFlags::HOVER)
    }

    /// Pressed flag.
    pub fn is_pressed(&self) -> bool {
        self.contains(StateFlags::PRESSED)
    }

    /// Selected flag.
    pub fn is_selected(&self) -> bool {
        self.contains(StateFlags::SELECTED)
    }

    /// Indeterminate flag.
    pub fn is_indeterminate(&self) -> bool {
        self.contains(StateFlags::INDETERMINATE)
    }

    /// Disabled flag.
    pub fn is_disabled(&self) -> bool {
        self.contains(StateFlags::DISABLED)
    }

    /// Invalid flag.
    pub fn is_invalid(&self) -> bool {
        self.contains(StateFlags::INVALID)
    }

    /// Set the hover flag.
    pub fn set_hovered(&self, value: bool) -> bool {
        self.set(StateFlags::HOVER, value)
    }

    /// Set the pressed flag.
    pub fn set_pressed(&self, value: bool) -> bool {
        self.set(StateFlags::PRESSED, value)
    }

    /// Set the selected flag.
    pub fn set_selected(&self, value: bool) -> bool {
        self.set(StateFlags::SELECTED, value)
    }

    /// Set the indeterminate flag.
    pub fn set_indeterminate(&self, value: bool) -> bool {
        self.set(StateFlags::INDETERMINATE, value)
    }

    /// Set the disabled flag.
    pub fn set_disabled(&self, value: bool) -> bool {
        self.set(StateFlags::DISABLED, value)
    }

    /// Set the invalid flag.
    pub fn set_invalid(&self, value: bool) -> bool {
        self.set(StateFlags::INVALID, value)
    }

    /// Listen for changes. Listeners run in registration order and may
    /// mutate this state again; nested changes are delivered first.
    pub fn on_change(&self, listener: impl Fn(StateChange) + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .insert(id, Rc::new(listener));
        id
    }

    /// Remove a listener. Returns `false` when it was already gone.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().shift_remove(&id).is_some()
    }

    /// Number of listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Create a non-owning handle.
    pub fn downgrade(&self) -> WeakInteractiveState {
        WeakInteractiveState {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles refer to the same state.
    pub fn ptr_eq(&self, other: &InteractiveState) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for InteractiveState {
    fn default() -> Self {
        Self::new(StateFlags::empty())
    }
}

impl fmt::Debug for InteractiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveState")
            .field("flags", &self.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Non-owning handle to an [InteractiveState].
#[derive(Clone)]
pub struct WeakInteractiveState {
    inner: Weak<StateInner>,
}

impl WeakInteractiveState {
    /// The state, if it is still alive.
    pub fn upgrade(&self) -> Option<InteractiveState> {
        self.inner.upgrade().map(|inner| InteractiveState { inner })
    }
}

impl fmt::Debug for WeakInteractiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakInteractiveState")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
