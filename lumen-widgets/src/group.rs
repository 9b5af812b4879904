//! Tri-state aggregation between a parent checkbox and its children.
//!
//! A [CheckboxGroup] keeps two edges in sync:
//!
//! - **child to parent**: whenever a child is checked or unchecked, the parent
//!   shows checked (all children), unchecked (none) or indeterminate (some).
//! - **parent to children**: when the parent itself is checked or unchecked,
//!   every child follows.
//!
//! The group's [GroupPhase] keeps the edges from feeding each other. Writes
//! made while aggregating never reach the children, and child changes made
//! while propagating are folded into one aggregation at the end.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use lumen_core::state::{InteractiveState, ListenerId, StateChange, WeakInteractiveState};
use lumen_core::widget::Widget;
use lumen_theme::state::StateFlags;

use crate::checkbox::{Checkbox, CheckboxState};
use crate::error::{WidgetError, WidgetResult};

/// Aggregation passes run before giving up on a parent that keeps changing.
const MAX_PASSES: usize = 8;

/// What the group is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupPhase {
    /// Waiting for changes.
    #[default]
    Idle,
    /// Writing the aggregated value to the parent.
    Aggregating,
    /// Writing the parent's value to every child.
    Propagating,
}

/// Identifies a child within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildHandle(u64);

struct ChildEntry {
    state: WeakInteractiveState,
    listener: ListenerId,
}

struct GroupInner {
    parent: WeakInteractiveState,
    parent_listener: Cell<Option<ListenerId>>,
    children: RefCell<IndexMap<ChildHandle, ChildEntry>>,
    phase: Cell<GroupPhase>,
    dirty: Cell<bool>,
    next_handle: Cell<u64>,
}

/// Sets the phase and restores the previous one when dropped, even if a
/// listener panics on the way.
struct PhaseGuard<'a> {
    phase: &'a Cell<GroupPhase>,
    previous: GroupPhase,
}

impl<'a> PhaseGuard<'a> {
    fn enter(phase: &'a Cell<GroupPhase>, next: GroupPhase) -> Self {
        let previous = phase.replace(next);
        Self { phase, previous }
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.phase.set(self.previous);
    }
}

/// Makes one checkbox summarize a set of child checkboxes.
///
/// The group holds its parent and children weakly. Children that are
/// dropped or [detached](CheckboxGroup::detach) stop being counted, and
/// dropping the group removes every listener it installed.
///
/// ```rust
/// use lumen_core::context::UiContext;
/// use lumen_core::surface::HeadlessSurface;
/// use lumen_theme::registry::ThemeRegistry;
/// use lumen_widgets::checkbox::{Checkbox, CheckboxState};
/// use lumen_widgets::group::CheckboxGroup;
///
/// let context = UiContext::new(ThemeRegistry::default(), HeadlessSurface::new());
/// let all = Checkbox::new(&context, "All");
/// let a = Checkbox::new(&context, "A");
/// let b = Checkbox::new(&context, "B");
///
/// let group = CheckboxGroup::new(&all);
/// group.attach(&a).unwrap();
/// group.attach(&b).unwrap();
///
/// a.click();
/// assert_eq!(all.value(), CheckboxState::Indeterminate);
///
/// all.click();
/// assert!(a.is_selected() && b.is_selected());
/// ```
pub struct CheckboxGroup {
    inner: Rc<GroupInner>,
}

impl CheckboxGroup {
    /// Create a group summarized by `parent`.
    pub fn new(parent: &Checkbox) -> Self {
        let state = parent.node().state();
        let inner = Rc::new(GroupInner {
            parent: state.downgrade(),
            parent_listener: Cell::new(None),
            children: RefCell::new(IndexMap::new()),
            phase: Cell::new(GroupPhase::Idle),
            dirty: Cell::new(false),
            next_handle: Cell::new(0),
        });

        let weak = Rc::downgrade(&inner);
        let listener = state.on_change(move |change| {
            if let Some(group) = weak.upgrade() {
                group.parent_changed(change);
            }
        });
        inner.parent_listener.set(Some(listener));

        Self { inner }
    }

    /// Add `child` and re-aggregate the parent.
    pub fn attach(&self, child: &Checkbox) -> WidgetResult<ChildHandle> {
        GroupInner::attach(&self.inner, child.node().state())
    }

    /// Add several children, re-aggregating after each.
    pub fn attach_all<'a>(
        &self,
        children: impl IntoIterator<Item = &'a Checkbox>,
    ) -> WidgetResult<Vec<ChildHandle>> {
        children.into_iter().map(|child| self.attach(child)).collect()
    }

    /// Remove a child and re-aggregate. Returns `false` when it was not
    /// attached.
    pub fn detach(&self, handle: ChildHandle) -> bool {
        let entry = self.inner.children.borrow_mut().shift_remove(&handle);
        let Some(entry) = entry else {
            return false;
        };
        if let Some(state) = entry.state.upgrade() {
            state.remove_listener(entry.listener);
        }
        log::debug!("Detached {:?} from checkbox group", handle);
        self.recompute();
        true
    }

    /// Handles of the children still alive, in attach order.
    pub fn children(&self) -> Vec<ChildHandle> {
        self.inner
            .children
            .borrow()
            .iter()
            .filter(|(_, entry)| entry.state.upgrade().is_some())
            .map(|(handle, _)| *handle)
            .collect()
    }

    /// Number of live children.
    pub fn len(&self) -> usize {
        self.inner.live_children().len()
    }

    /// Whether the group has no live children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live children that are checked.
    pub fn selected_count(&self) -> usize {
        self.inner
            .live_children()
            .iter()
            .filter(|child| child.is_selected())
            .count()
    }

    /// Re-aggregate the parent from the children.
    ///
    /// Called while the group is busy, the request is folded into the
    /// running operation.
    pub fn recompute(&self) {
        self.inner.recompute();
    }

    /// What the group is currently doing.
    pub fn phase(&self) -> GroupPhase {
        self.inner.phase.get()
    }
}

impl GroupInner {
    fn attach(this: &Rc<Self>, state: &InteractiveState) -> WidgetResult<ChildHandle> {
        let parent = this.parent.upgrade().ok_or(WidgetError::ParentGone)?;
        if parent.ptr_eq(state) {
            return Err(WidgetError::SelfAttachment);
        }
        if this.live_children().iter().any(|child| child.ptr_eq(state)) {
            return Err(WidgetError::AlreadyAttached);
        }

        let weak: Weak<GroupInner> = Rc::downgrade(this);
        let listener = state.on_change(move |change| {
            if change.became(StateFlags::SELECTED).is_none() {
                return;
            }
            if let Some(group) = weak.upgrade() {
                group.child_changed();
            }
        });

        let handle = ChildHandle(this.next_handle.get());
        this.next_handle.set(handle.0 + 1);
        this.children.borrow_mut().insert(
            handle,
            ChildEntry {
                state: state.downgrade(),
                listener,
            },
        );
        log::debug!("Attached {:?} to checkbox group", handle);

        this.recompute();
        Ok(handle)
    }

    fn live_children(&self) -> Vec<InteractiveState> {
        self.children
            .borrow()
            .values()
            .filter_map(|entry| entry.state.upgrade())
            .collect()
    }

    fn prune(&self) {
        self.children
            .borrow_mut()
            .retain(|_, entry| entry.state.upgrade().is_some());
    }

    fn child_changed(&self) {
        match self.phase.get() {
            GroupPhase::Idle => self.recompute(),
            GroupPhase::Aggregating | GroupPhase::Propagating => self.dirty.set(true),
        }
    }

    fn parent_changed(&self, change: StateChange) {
        if self.phase.get() != GroupPhase::Idle {
            return;
        }
        let Some(selected) = change.became(StateFlags::SELECTED) else {
            return;
        };
        if change.current.contains(StateFlags::INDETERMINATE) {
            return;
        }
        self.propagate(selected);
    }

    fn propagate(&self, selected: bool) {
        let children = self.live_children();
        log::debug!(
            "Propagating selected={} to {} children",
            selected,
            children.len()
        );

        {
            let _guard = PhaseGuard::enter(&self.phase, GroupPhase::Propagating);
            for child in &children {
                child.update(|flags| CheckboxState::from_bool(selected).apply(flags));
            }
        }

        if self.dirty.replace(false) {
            self.recompute();
        }
    }

    fn recompute(&self) {
        if self.phase.get() != GroupPhase::Idle {
            self.dirty.set(true);
            return;
        }
        let Some(parent) = self.parent.upgrade() else {
            return;
        };
        self.prune();

        for _ in 0..MAX_PASSES {
            self.dirty.set(false);
            let children = self.live_children();
            let selected = children.iter().filter(|child| child.is_selected()).count();
            let value = CheckboxState::aggregate(selected, children.len());
            log::trace!(
                "Aggregated {}/{} selected children into {:?}",
                selected,
                children.len(),
                value
            );

            {
                let _guard = PhaseGuard::enter(&self.phase, GroupPhase::Aggregating);
                parent.update(|flags| value.apply(flags));
            }

            if !self.dirty.get() {
                return;
            }
        }
        log::warn!("Checkbox group did not settle after {} passes", MAX_PASSES);
    }
}

impl Drop for GroupInner {
    fn drop(&mut self) {
        if let (Some(parent), Some(listener)) = (self.parent.upgrade(), self.parent_listener.take()) {
            parent.remove_listener(listener);
        }
        for entry in self.children.get_mut().values() {
            if let Some(state) = entry.state.upgrade() {
                state.remove_listener(entry.listener);
            }
        }
    }
}

impl fmt::Debug for CheckboxGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckboxGroup")
            .field("phase", &self.phase())
            .field("children", &self.children())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::context::UiContext;
    use lumen_core::surface::HeadlessSurface;
    use lumen_theme::registry::ThemeRegistry;

    fn context() -> UiContext {
        UiContext::new(ThemeRegistry::default(), HeadlessSurface::new())
    }

    #[test]
    fn attach_aggregates_immediately() {
        let context = context();
        let parent = Checkbox::new(&context, "All");
        let a = Checkbox::new(&context, "A").with_selected(true);
        let b = Checkbox::new(&context, "B");

        let group = CheckboxGroup::new(&parent);
        group.attach(&a).unwrap();
        assert_eq!(parent.value(), CheckboxState::Checked);
        group.attach(&b).unwrap();
        assert_eq!(parent.value(), CheckboxState::Indeterminate);

        // Aggregation never reached the children.
        assert!(a.is_selected());
        assert!(!b.is_selected());
    }

    #[test]
    fn rejects_self_and_duplicates() {
        let context = context();
        let parent = Checkbox::new(&context, "All");
        let a = Checkbox::new(&context, "A");
        let group = CheckboxGroup::new(&parent);

        assert_eq!(group.attach(&parent), Err(WidgetError::SelfAttachment));
        group.attach(&a).unwrap();
        assert_eq!(group.attach(&a), Err(WidgetError::AlreadyAttached));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn detach_and_drop_stop_counting() {
        let context = context();
        let parent = Checkbox::new(&context, "All");
        let a = Checkbox::new(&context, "A").with_selected(true);
        let b = Checkbox::new(&context, "B");
        let c = Checkbox::new(&context, "C");

        let group = CheckboxGroup::new(&parent);
        let handles = group.attach_all([&a, &b, &c]).unwrap();
        assert_eq!(parent.value(), CheckboxState::Indeterminate);

        assert!(group.detach(handles[1]));
        assert!(!group.detach(handles[1]));
        drop(c);
        group.recompute();

        assert_eq!(group.children(), vec![handles[0]]);
        assert_eq!(parent.value(), CheckboxState::Checked);

        // A detached child no longer drives the parent.
        b.click();
        assert_eq!(parent.value(), CheckboxState::Checked);
        assert_eq!(b.node().state().listener_count(), 2);
    }

    #[test]
    fn direct_indeterminate_on_parent_does_not_propagate() {
        let context = context();
        let parent = Checkbox::new(&context, "All");
        let a = Checkbox::new(&context, "A").with_selected(true);
        let group = CheckboxGroup::new(&parent);
        group.attach(&a).unwrap();

        parent.set_indeterminate(true);
        assert!(a.is_selected());
        assert_eq!(group.phase(), GroupPhase::Idle);
    }

    #[test]
    fn dropping_group_removes_listeners() {
        let context = context();
        let parent = Checkbox::new(&context, "All");
        let a = Checkbox::new(&context, "A");
        let parent_listeners = parent.node().state().listener_count();
        let child_listeners = a.node().state().listener_count();

        let group = CheckboxGroup::new(&parent);
        group.attach(&a).unwrap();
        drop(group);

        assert_eq!(parent.node().state().listener_count(), parent_listeners);
        assert_eq!(a.node().state().listener_count(), child_listeners);

        parent.click();
        assert!(!a.is_selected());
    }

    #[test]
    fn nested_groups_cascade_both_ways() {
        let context = context();
        let root = Checkbox::new(&context, "Everything");
        let fruit = Checkbox::new(&context, "Fruit");
        let apple = Checkbox::new(&context, "Apple");
        let pear = Checkbox::new(&context, "Pear");
        let bread = Checkbox::new(&context, "Bread");

        let fruit_group = CheckboxGroup::new(&fruit);
        fruit_group.attach_all([&apple, &pear]).unwrap();
        let root_group = CheckboxGroup::new(&root);
        root_group.attach_all([&fruit, &bread]).unwrap();

        apple.click();
        assert_eq!(fruit.value(), CheckboxState::Indeterminate);
        assert_eq!(root.value(), CheckboxState::Unchecked);

        root.click();
        for leaf in [&apple, &pear, &bread, &fruit] {
            assert!(leaf.is_selected(), "{} should be checked", leaf.label());
        }

        pear.click();
        assert_eq!(fruit.value(), CheckboxState::Indeterminate);
        assert_eq!(root.value(), CheckboxState::Indeterminate);
        assert!(apple.is_selected());
        assert!(bread.is_selected());
    }
}
