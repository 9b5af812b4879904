//! # Theme Registry
//!
//! The [ThemeRegistry] holds the current [Palette] and the subscribers that
//! must hear about palette changes. It is an explicit context object: create
//! one at startup and hand clones of it to widgets. Clones share state.
//!
//! ## Broadcast rules
//!
//! - [ThemeRegistry::set_current] swaps the palette, then calls every
//!   subscriber registered at that moment, in registration order, on the
//!   calling turn.
//! - A subscriber that panics or returns an error is logged and skipped. The
//!   remaining subscribers still run, and the swap itself never fails.
//! - Subscribers added during a broadcast are not called by that broadcast.
//!   Subscribers removed during a broadcast are not called after removal.
//! - A subscriber may call `set_current` again. The inner broadcast runs to
//!   completion first; the outer one keeps delivering the palette it started
//!   with.
//!
//! ```rust
//! use lumen_theme::registry::ThemeRegistry;
//! use lumen_theme::presets::ThemePreset;
//!
//! let registry = ThemeRegistry::default();
//! let handle = registry.subscribe(|palette| println!("now using {}", palette.name()));
//!
//! registry.set_current(ThemePreset::Nord.palette());
//! registry.unsubscribe(handle);
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::ThemeResult;
use crate::palette::Palette;

/// Identifies a registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    /// The raw id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Receives palette changes.
///
/// Implemented for every `Fn(&Palette) -> ThemeResult<()>`; infallible
/// closures go through [ThemeRegistry::subscribe].
pub trait ThemeListener {
    /// Called with the newly published palette.
    fn palette_changed(&self, palette: &Palette) -> ThemeResult<()>;
}

impl<F> ThemeListener for F
where
    F: Fn(&Palette) -> ThemeResult<()>,
{
    fn palette_changed(&self, palette: &Palette) -> ThemeResult<()> {
        self(palette)
    }
}

/// Outcome of one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Subscribers that were invoked.
    pub notified: usize,
    /// Invoked subscribers that panicked or returned an error.
    pub failed: usize,
}

impl BroadcastReport {
    /// Whether every invoked subscriber succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

struct RegistryInner {
    current: RefCell<Rc<Palette>>,
    listeners: RefCell<IndexMap<SubscriptionHandle, Rc<dyn ThemeListener>>>,
    next_id: Cell<u64>,
}

/// Holder of the current palette and its subscribers.
#[derive(Clone)]
pub struct ThemeRegistry {
    inner: Rc<RegistryInner>,
}

impl ThemeRegistry {
    /// Create a registry publishing `palette`.
    pub fn new(palette: Palette) -> Self {
        log::debug!("Theme registry created with '{}'", palette.name());
        Self {
            inner: Rc::new(RegistryInner {
                current: RefCell::new(Rc::new(palette)),
                listeners: RefCell::new(IndexMap::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// The palette currently published.
    pub fn get_current(&self) -> Rc<Palette> {
        Rc::clone(&self.inner.current.borrow())
    }

    /// Publish `palette` and notify every subscriber registered right now.
    pub fn set_current(&self, palette: Palette) -> BroadcastReport {
        let palette = Rc::new(palette);
        let previous = self.inner.current.replace(Rc::clone(&palette));
        log::info!(
            "Theme switched from '{}' to '{}'",
            previous.name(),
            palette.name()
        );
        drop(previous);

        self.notify_listeners(&palette)
    }

    /// Register an infallible listener.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(&Palette) + 'static,
    {
        self.subscribe_fallible(move |palette: &Palette| -> ThemeResult<()> {
            listener(palette);
            Ok(())
        })
    }

    /// Register a listener that may report failure.
    pub fn subscribe_fallible<L>(&self, listener: L) -> SubscriptionHandle
    where
        L: ThemeListener + 'static,
    {
        let handle = SubscriptionHandle(self.inner.next_id.get());
        self.inner.next_id.set(handle.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .insert(handle, Rc::new(listener));
        log::debug!("Theme listener {} registered", handle.0);
        handle
    }

    /// Remove a listener. Returns `false` when it was already gone.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let removed = self
            .inner
            .listeners
            .borrow_mut()
            .shift_remove(&handle)
            .is_some();
        if removed {
            log::debug!("Theme listener {} removed", handle.0);
        }
        removed
    }

    /// Whether `handle` is still registered.
    pub fn is_subscribed(&self, handle: SubscriptionHandle) -> bool {
        self.inner.listeners.borrow().contains_key(&handle)
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify_listeners(&self, palette: &Palette) -> BroadcastReport {
        let snapshot: Vec<SubscriptionHandle> =
            self.inner.listeners.borrow().keys().copied().collect();
        let mut report = BroadcastReport::default();

        for handle in snapshot {
            // Removed since the snapshot was taken.
            let listener = self.inner.listeners.borrow().get(&handle).cloned();
            let Some(listener) = listener else {
                continue;
            };

            report.notified += 1;
            match catch_unwind(AssertUnwindSafe(|| listener.palette_changed(palette))) {
                Ok(Ok(())) => {},
                Ok(Err(err)) => {
                    report.failed += 1;
                    log::warn!(
                        "Theme listener {} failed for '{}': {}",
                        handle.0,
                        palette.name(),
                        err
                    );
                },
                Err(payload) => {
                    report.failed += 1;
                    log::warn!(
                        "Theme listener {} panicked for '{}': {}",
                        handle.0,
                        palette.name(),
                        panic_message(&*payload)
                    );
                },
            }
        }

        report
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("current", &self.inner.current.borrow().name())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThemeError;
    use crate::palette::ColorRole;
    use crate::presets::ThemePreset;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, ThemeRegistry) {
        (Rc::new(RefCell::new(Vec::new())), ThemeRegistry::default())
    }

    #[test]
    fn get_current_returns_published_palette() {
        let registry = ThemeRegistry::default();
        assert_eq!(registry.get_current().name(), "Default");

        registry.set_current(ThemePreset::Dracula.palette());
        assert_eq!(registry.get_current().name(), "Dracula");
        assert_eq!(registry.get_current().hex_of(ColorRole::Primary), "#BD93F9");
    }

    #[test]
    fn clones_share_state() {
        let registry = ThemeRegistry::default();
        let clone = registry.clone();
        clone.set_current(ThemePreset::Nord.palette());
        assert_eq!(registry.get_current().name(), "Nord");
    }

    #[test]
    fn failing_listeners_do_not_stop_broadcast() {
        let (log, registry) = recorder();
        for k in 0..5 {
            let log = Rc::clone(&log);
            if k == 2 {
                registry.subscribe(move |_| {
                    log.borrow_mut().push(format!("{k}"));
                    panic!("listener {k} exploded");
                });
            } else if k == 3 {
                registry.subscribe_fallible(move |_: &Palette| -> ThemeResult<()> {
                    log.borrow_mut().push(format!("{k}"));
                    Err(ThemeError::listener_failed("refused"))
                });
            } else {
                registry.subscribe(move |_| log.borrow_mut().push(format!("{k}")));
            }
        }

        let report = registry.set_current(ThemePreset::Light.palette());

        assert_eq!(*log.borrow(), vec!["0", "1", "2", "3", "4"]);
        assert_eq!(report, BroadcastReport { notified: 5, failed: 2 });
        assert_eq!(registry.get_current().name(), "Light");
    }

    #[test]
    fn listener_removed_mid_broadcast_is_skipped() {
        let (log, registry) = recorder();
        let victim = Rc::new(Cell::new(None));

        {
            let log = Rc::clone(&log);
            let victim = Rc::clone(&victim);
            let registry_handle = registry.clone();
            registry.subscribe(move |_| {
                log.borrow_mut().push("first".into());
                if let Some(handle) = victim.get() {
                    registry_handle.unsubscribe(handle);
                }
            });
        }
        let second = {
            let log = Rc::clone(&log);
            registry.subscribe(move |_| log.borrow_mut().push("second".into()))
        };
        victim.set(Some(second));

        registry.set_current(ThemePreset::Dark.palette());
        assert_eq!(*log.borrow(), vec!["first"]);
        assert!(!registry.is_subscribed(second));
    }

    #[test]
    fn listener_added_mid_broadcast_waits_for_next_one() {
        let (log, registry) = recorder();
        {
            let log = Rc::clone(&log);
            let registry_handle = registry.clone();
            let added = Cell::new(false);
            registry.subscribe(move |palette| {
                log.borrow_mut().push(format!("outer:{}", palette.name()));
                if !added.replace(true) {
                    let log = Rc::clone(&log);
                    registry_handle
                        .subscribe(move |palette| log.borrow_mut().push(format!("late:{}", palette.name())));
                }
            });
        }

        registry.set_current(ThemePreset::Nord.palette());
        assert_eq!(*log.borrow(), vec!["outer:Nord"]);

        registry.set_current(ThemePreset::Oceanic.palette());
        assert_eq!(
            *log.borrow(),
            vec!["outer:Nord", "outer:Oceanic", "late:Oceanic"]
        );
    }

    #[test]
    fn self_unsubscribe_finishes_current_call() {
        let (log, registry) = recorder();
        let own = Rc::new(Cell::new(None));
        let handle = {
            let log = Rc::clone(&log);
            let own = Rc::clone(&own);
            let registry_handle = registry.clone();
            registry.subscribe(move |_| {
                if let Some(handle) = own.get() {
                    registry_handle.unsubscribe(handle);
                }
                log.borrow_mut().push("ran".into());
            })
        };
        own.set(Some(handle));

        registry.set_current(ThemePreset::Dark.palette());
        registry.set_current(ThemePreset::Light.palette());
        assert_eq!(*log.borrow(), vec!["ran"]);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let registry = ThemeRegistry::default();
        let handle = registry.subscribe(|_| {});
        assert_eq!(registry.subscriber_count(), 1);
        assert!(registry.unsubscribe(handle));
        assert!(!registry.unsubscribe(handle));
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn nested_set_current_keeps_outer_palette() {
        let (log, registry) = recorder();
        {
            let registry_handle = registry.clone();
            registry.subscribe(move |palette| {
                if palette.name() == "Dark" {
                    registry_handle.set_current(ThemePreset::Light.palette());
                }
            });
        }
        {
            let log = Rc::clone(&log);
            registry.subscribe(move |palette| log.borrow_mut().push(palette.name().to_string()));
        }

        registry.set_current(ThemePreset::Dark.palette());

        // Inner broadcast completes first; outer continues with its own palette.
        assert_eq!(*log.borrow(), vec!["Light", "Dark"]);
        assert_eq!(registry.get_current().name(), "Light");
    }
}
