use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use lumen_core::context::UiContext;
use lumen_core::state::StateChange;
use lumen_core::surface::Transition;
use lumen_core::widget::{ThemedNode, Widget};
use lumen_theme::state::StateFlags;
use lumen_theme::style::WidgetKind;

/// Length of the ripple played on click.
pub const RIPPLE_DURATION: Duration = Duration::from_millis(400);

/// The value of a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckboxState {
    /// Unchecked state
    #[default]
    Unchecked,
    /// Checked state
    Checked,
    /// Indeterminate state (some but not all children checked)
    Indeterminate,
}

impl CheckboxState {
    /// Read the value out of interaction flags.
    pub fn from_flags(flags: StateFlags) -> Self {
        if flags.contains(StateFlags::INDETERMINATE) {
            CheckboxState::Indeterminate
        } else if flags.contains(StateFlags::SELECTED) {
            CheckboxState::Checked
        } else {
            CheckboxState::Unchecked
        }
    }

    /// The value a parent takes when `selected` of `total` children are checked.
    ///
    /// A parent without children is unchecked.
    pub fn aggregate(selected: usize, total: usize) -> Self {
        if selected == 0 {
            CheckboxState::Unchecked
        } else if selected >= total {
            CheckboxState::Checked
        } else {
            CheckboxState::Indeterminate
        }
    }

    /// Write the value into `flags`, leaving every other flag alone.
    pub fn apply(self, flags: &mut StateFlags) {
        flags.set(StateFlags::SELECTED, self == CheckboxState::Checked);
        flags.set(StateFlags::INDETERMINATE, self == CheckboxState::Indeterminate);
    }

    /// Convert to boolean (true = checked, false = unchecked/indeterminate)
    pub fn to_bool(self) -> bool {
        matches!(self, CheckboxState::Checked)
    }

    /// Create from boolean
    pub fn from_bool(value: bool) -> Self {
        if value {
            CheckboxState::Checked
        } else {
            CheckboxState::Unchecked
        }
    }
}

type ChangeCallback = Rc<RefCell<Option<Box<dyn Fn(CheckboxState)>>>>;

/// A tri-state checkbox with a label and an optional validation message.
///
/// Clicking toggles between checked and unchecked. An indeterminate checkbox
/// always becomes checked. Clicks are ignored while the checkbox is disabled
/// or read-only.
///
/// Use a [CheckboxGroup](crate::group::CheckboxGroup) to make one checkbox
/// summarize others.
///
/// ### Theming
/// Styled as [WidgetKind::Checkbox]. The box uses the primary role when
/// checked or indeterminate, the error role while a validation message is
/// set and the disabled role while disabled.
pub struct Checkbox {
    node: ThemedNode,
    label: String,
    read_only: Cell<bool>,
    validation_message: RefCell<String>,
    on_change: ChangeCallback,
}

impl Checkbox {
    /// Create an unchecked checkbox with the given label.
    pub fn new(context: &UiContext, label: impl Into<String>) -> Self {
        let node = context.node(WidgetKind::Checkbox);
        let on_change: ChangeCallback = Rc::new(RefCell::new(None));

        let callback = Rc::clone(&on_change);
        node.state().on_change(move |change: StateChange| {
            let flag = StateFlags::SELECTED | StateFlags::INDETERMINATE;
            if change.changed().intersects(flag) {
                if let Some(callback) = callback.borrow().as_ref() {
                    callback(CheckboxState::from_flags(change.current));
                }
            }
        });

        Self {
            node,
            label: label.into(),
            read_only: Cell::new(false),
            validation_message: RefCell::new(String::new()),
            on_change,
        }
    }

    fn apply_with(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Start checked or unchecked.
    pub fn with_selected(self, selected: bool) -> Self {
        self.set_selected(selected);
        self
    }

    /// Start read-only.
    pub fn with_read_only(self, read_only: bool) -> Self {
        self.apply_with(|s| s.read_only.set(read_only))
    }

    /// Call `callback` whenever the value changes, whatever caused it.
    pub fn with_on_change(self, callback: impl Fn(CheckboxState) + 'static) -> Self {
        *self.on_change.borrow_mut() = Some(Box::new(callback));
        self
    }

    /// The label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The current value.
    pub fn value(&self) -> CheckboxState {
        CheckboxState::from_flags(self.node.state().get())
    }

    /// Whether the checkbox is checked.
    pub fn is_selected(&self) -> bool {
        self.node.state().is_selected()
    }

    /// Whether the checkbox is indeterminate.
    pub fn is_indeterminate(&self) -> bool {
        self.node.state().is_indeterminate()
    }

    /// Check or uncheck. Checking clears indeterminate.
    pub fn set_selected(&self, selected: bool) {
        self.node.state().set_selected(selected);
    }

    /// Set or clear the indeterminate value. Setting it unchecks.
    pub fn set_indeterminate(&self, indeterminate: bool) {
        self.node.state().set_indeterminate(indeterminate);
    }

    /// Whether clicks are ignored.
    pub fn is_read_only(&self) -> bool {
        self.read_only.get()
    }

    /// Ignore clicks without dimming the checkbox.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Show `message` under the checkbox. A non-empty message marks the
    /// checkbox invalid; an empty one clears it.
    pub fn set_validation_message(&self, message: impl Into<String>) {
        let message = message.into();
        let invalid = !message.is_empty();
        *self.validation_message.borrow_mut() = message;
        self.node.state().set_invalid(invalid);
    }

    /// The current validation message, empty when valid.
    pub fn validation_message(&self) -> String {
        self.validation_message.borrow().clone()
    }

    /// Handle a user click. Returns whether the click was accepted.
    pub fn click(&self) -> bool {
        let state = self.node.state();
        if state.is_disabled() || self.read_only.get() {
            log::trace!("Checkbox '{}' ignored click", self.label);
            return false;
        }

        if state.is_indeterminate() {
            state.set_selected(true);
        } else {
            state.set_selected(!state.is_selected());
        }

        self.node.animate(Transition::ripple(RIPPLE_DURATION));
        true
    }
}

impl Widget for Checkbox {
    fn node(&self) -> &ThemedNode {
        &self.node
    }
}

impl fmt::Debug for Checkbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkbox")
            .field("label", &self.label)
            .field("value", &self.value())
            .field("read_only", &self.read_only.get())
            .finish()
    }
}
