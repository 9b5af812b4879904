use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use lumen_core::context::UiContext;
use lumen_core::widget::{ThemedNode, Widget};
use lumen_theme::style::WidgetKind;

use crate::error::{WidgetError, WidgetResult};

type SelectCallback<T> = Rc<dyn Fn(&T)>;

/// A drop-down list of items with at most one selected.
///
/// The popup state maps onto the selected flag: an expanded combo box is
/// drawn with the accent outline.
///
/// ### Theming
/// Styled as [WidgetKind::ComboBox]. Hovered list cells get a translucent
/// primary highlight.
pub struct ComboBox<T> {
    node: ThemedNode,
    items: RefCell<Vec<T>>,
    selected: Cell<Option<usize>>,
    prompt: String,
    on_select: RefCell<Option<SelectCallback<T>>>,
}

impl<T: Clone + PartialEq + fmt::Display + 'static> ComboBox<T> {
    /// Create an empty, collapsed combo box.
    pub fn new(context: &UiContext) -> Self {
        Self {
            node: context.node(WidgetKind::ComboBox),
            items: RefCell::new(Vec::new()),
            selected: Cell::new(None),
            prompt: String::new(),
            on_select: RefCell::new(None),
        }
    }

    fn apply_with(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Set the items.
    pub fn with_items(self, items: impl IntoIterator<Item = T>) -> Self {
        self.set_items(items);
        self
    }

    /// Set the text shown while nothing is selected.
    pub fn with_prompt(self, prompt: impl Into<String>) -> Self {
        self.apply_with(|s| s.prompt = prompt.into())
    }

    /// Set the function to run when an item is selected.
    pub fn with_on_select(self, on_select: impl Fn(&T) + 'static) -> Self {
        self.apply_with(|s| *s.on_select.get_mut() = Some(Rc::new(on_select)))
    }

    /// A copy of the items.
    pub fn items(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    /// Replace the items. Keeps the selection if the selected item is still
    /// present.
    pub fn set_items(&self, items: impl IntoIterator<Item = T>) {
        let previous = self.selected_item();
        *self.items.borrow_mut() = items.into_iter().collect();
        let index = previous.and_then(|item| self.items.borrow().iter().position(|i| *i == item));
        self.selected.set(index);
    }

    /// Select the item at `index` and collapse the popup.
    pub fn select(&self, index: usize) -> WidgetResult<()> {
        let item = {
            let items = self.items.borrow();
            items.get(index).cloned().ok_or(WidgetError::IndexOutOfRange {
                index,
                len: items.len(),
            })?
        };

        self.selected.set(Some(index));
        self.set_expanded(false);

        let on_select = self.on_select.borrow().clone();
        if let Some(on_select) = on_select {
            on_select(&item);
        }
        Ok(())
    }

    /// Select the first item equal to `item`. Returns whether one was found.
    pub fn select_item(&self, item: &T) -> bool {
        let index = self.items.borrow().iter().position(|i| i == item);
        match index {
            Some(index) => self.select(index).is_ok(),
            None => false,
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&self) {
        self.selected.set(None);
    }

    /// Index of the selected item.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.get()
    }

    /// The selected item.
    pub fn selected_item(&self) -> Option<T> {
        let index = self.selected.get()?;
        self.items.borrow().get(index).cloned()
    }

    /// Text shown in the closed combo box.
    pub fn display_text(&self) -> String {
        self.selected_item()
            .map(|item| item.to_string())
            .unwrap_or_else(|| self.prompt.clone())
    }

    /// Whether the popup is open.
    pub fn is_expanded(&self) -> bool {
        self.node.state().is_selected()
    }

    /// Open or close the popup. Disabled combo boxes stay closed.
    pub fn set_expanded(&self, expanded: bool) {
        if expanded && self.node.state().is_disabled() {
            return;
        }
        self.node.state().set_selected(expanded);
    }
}

impl<T> Widget for ComboBox<T> {
    fn node(&self) -> &ThemedNode {
        &self.node
    }
}

impl<T: fmt::Debug> fmt::Debug for ComboBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComboBox")
            .field("items", &self.items.borrow())
            .field("selected", &self.selected.get())
            .finish()
    }
}
