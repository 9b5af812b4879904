use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::LazyLock;
use std::time::Duration;

use lumen_core::context::UiContext;
use lumen_core::surface::Transition;
use lumen_core::widget::{ThemedNode, Widget};
use lumen_theme::registry::panic_message;
use lumen_theme::style::WidgetKind;
use regex::Regex;

/// Total length of the shake played on invalid input.
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);
/// Horizontal distance of the shake.
pub const SHAKE_DISTANCE: f32 = 10.0;
/// Number of back and forth movements in one shake.
pub const SHAKE_CYCLES: u32 = 5;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9+_.-]+@(.+)$";
const NUMBER_PATTERN: &str = r"^[0-9]*$";

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| compile_pattern(EMAIL_PATTERN));
static NUMBER: LazyLock<Option<Regex>> = LazyLock::new(|| compile_pattern(NUMBER_PATTERN));

/// A built-in pattern that fails to compile is logged and rejects all text.
fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            log::error!("Built-in validator pattern {:?} does not compile: {}", pattern, err);
            None
        },
    }
}

/// A predicate over the text of a field plus the message shown when it fails.
///
/// A predicate that panics is treated as failing.
#[derive(Clone)]
pub struct Validator {
    predicate: Rc<dyn Fn(&str) -> bool>,
    message: String,
}

impl Validator {
    /// Validate with an arbitrary predicate.
    pub fn custom(predicate: impl Fn(&str) -> bool + 'static, message: impl Into<String>) -> Self {
        Self {
            predicate: Rc::new(predicate),
            message: message.into(),
        }
    }

    /// Text must not be empty.
    pub fn required(message: impl Into<String>) -> Self {
        Self::custom(|text| !text.is_empty(), message)
    }

    /// Text must look like an email address (`local@domain`).
    pub fn email(message: impl Into<String>) -> Self {
        Self::pattern(&EMAIL, message)
    }

    /// Text must consist of ASCII digits only. Empty text passes.
    pub fn number(message: impl Into<String>) -> Self {
        Self::pattern(&NUMBER, message)
    }

    /// Text must match `regex`.
    pub fn regex(regex: Regex, message: impl Into<String>) -> Self {
        Self::custom(move |text| regex.is_match(text), message)
    }

    fn pattern(regex: &'static LazyLock<Option<Regex>>, message: impl Into<String>) -> Self {
        Self::custom(
            move |text| LazyLock::force(regex).as_ref().is_some_and(|regex| regex.is_match(text)),
            message,
        )
    }

    /// The message shown when validation fails.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Run the predicate.
    pub fn check(&self, text: &str) -> bool {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.predicate)(text))) {
            Ok(valid) => valid,
            Err(payload) => {
                log::warn!("Validator panicked, treating input as invalid: {}", panic_message(&*payload));
                false
            },
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
struct MaxLength {
    limit: usize,
    message: String,
}

/// A single line text input that validates itself as it changes.
///
/// Every accepted text change re-runs the [Validator]. A failing value marks
/// the field invalid, shows the validator's message and asks the surface to
/// shake the field. Text longer than the maximum length is rejected and the
/// previous text kept.
///
/// ### Theming
/// Styled as [WidgetKind::TextField]. The border switches to the error role
/// while invalid; read-only and disabled fields are drawn at reduced opacity.
pub struct TextField {
    node: ThemedNode,
    text: RefCell<String>,
    placeholder: String,
    editable: Cell<bool>,
    max_length: RefCell<Option<MaxLength>>,
    validator: RefCell<Option<Validator>>,
    message: RefCell<String>,
}

impl TextField {
    /// Create an empty, editable field without validation.
    pub fn new(context: &UiContext) -> Self {
        Self {
            node: context.node(WidgetKind::TextField { editable: true }),
            text: RefCell::new(String::new()),
            placeholder: String::new(),
            editable: Cell::new(true),
            max_length: RefCell::new(None),
            validator: RefCell::new(None),
            message: RefCell::new(String::new()),
        }
    }

    fn apply_with(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Set the placeholder shown while the field is empty.
    pub fn with_placeholder(self, placeholder: impl Into<String>) -> Self {
        self.apply_with(|s| s.placeholder = placeholder.into())
    }

    /// Set the initial text.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Reject text longer than `limit` characters.
    pub fn with_max_length(self, limit: usize, message: impl Into<String>) -> Self {
        self.set_max_length(limit, message);
        self
    }

    /// Validate with `validator`.
    pub fn with_validator(self, validator: Validator) -> Self {
        self.set_validator(validator);
        self
    }

    /// Start read-only.
    pub fn with_editable(self, editable: bool) -> Self {
        self.set_editable(editable);
        self
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// The placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Whether the placeholder is showing.
    pub fn is_placeholder_visible(&self) -> bool {
        self.text.borrow().is_empty()
    }

    /// Replace the text. Returns `false` when the text was too long and got
    /// rejected.
    pub fn set_text(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        let rejected = self
            .max_length
            .borrow()
            .as_ref()
            .filter(|max| text.chars().count() > max.limit)
            .map(|max| max.message.clone());

        if let Some(message) = rejected {
            log::debug!("TextField {:?} rejected text over the length limit", self.node.key());
            self.fail(message);
            return false;
        }

        *self.text.borrow_mut() = text;
        self.validate();
        true
    }

    /// Reject text longer than `limit` characters from now on.
    pub fn set_max_length(&self, limit: usize, message: impl Into<String>) {
        *self.max_length.borrow_mut() = Some(MaxLength {
            limit,
            message: message.into(),
        });
    }

    /// Swap the validator and re-validate the current text.
    pub fn set_validator(&self, validator: Validator) {
        *self.validator.borrow_mut() = Some(validator);
        self.validate();
    }

    /// Remove the validator and clear any validation error.
    pub fn clear_validator(&self) {
        self.validator.borrow_mut().take();
        self.validate();
    }

    /// Whether a validator is installed.
    pub fn has_validator(&self) -> bool {
        self.validator.borrow().is_some()
    }

    /// Re-run the validator on the current text. Returns whether it passed.
    pub fn validate(&self) -> bool {
        let validator = self.validator.borrow().clone();
        let Some(validator) = validator else {
            self.pass();
            return true;
        };

        let valid = validator.check(&self.text.borrow());
        if valid {
            self.pass();
        } else {
            self.fail(validator.message);
        }
        valid
    }

    /// The message currently shown, empty when valid.
    pub fn validation_message(&self) -> String {
        self.message.borrow().clone()
    }

    /// Whether the last validation passed.
    pub fn is_valid(&self) -> bool {
        !self.node.state().is_invalid()
    }

    /// Whether the text can be edited.
    pub fn is_editable(&self) -> bool {
        self.editable.get()
    }

    /// Allow or forbid editing.
    pub fn set_editable(&self, editable: bool) {
        self.editable.set(editable);
        self.node.set_kind(WidgetKind::TextField { editable });
    }

    fn pass(&self) {
        self.message.borrow_mut().clear();
        self.node.state().set_invalid(false);
    }

    fn fail(&self, message: String) {
        *self.message.borrow_mut() = message;
        self.node.state().set_invalid(true);
        self.node
            .animate(Transition::shake(SHAKE_DISTANCE, SHAKE_CYCLES, SHAKE_DURATION));
    }
}

impl Widget for TextField {
    fn node(&self) -> &ThemedNode {
        &self.node
    }
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("text", &self.text.borrow())
            .field("valid", &self.is_valid())
            .field("validator", &self.validator.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::surface::{HeadlessSurface, TransitionChannel};
    use lumen_theme::palette::ColorRole;
    use lumen_theme::registry::ThemeRegistry;
    use lumen_theme::style::StylePart;

    fn context() -> (UiContext, Rc<HeadlessSurface>) {
        let surface = Rc::new(HeadlessSurface::new());
        let context = UiContext::with_surface(ThemeRegistry::default(), surface.clone());
        (context, surface)
    }

    fn shakes(surface: &HeadlessSurface, field: &TextField) -> usize {
        surface
            .transitions_for(field.key())
            .iter()
            .filter(|t| t.channel == TransitionChannel::TranslateX)
            .count()
    }

    #[test]
    fn patterns_compile() {
        assert!(EMAIL.is_some());
        assert!(NUMBER.is_some());
        assert!(compile_pattern("(unclosed").is_none());
    }

    #[test]
    fn builtin_validators() {
        let email = Validator::email("Invalid email");
        assert!(email.check("ada@example.com"));
        assert!(!email.check("ada.example.com"));
        assert!(!email.check("@example.com"));

        let number = Validator::number("Digits only");
        assert!(number.check("12345"));
        assert!(number.check(""));
        assert!(!number.check("12a"));

        let required = Validator::required("Required");
        assert!(!required.check(""));
        assert!(required.check(" "));
    }

    #[test]
    fn failing_text_sets_invalid_and_shakes() {
        let (context, surface) = context();
        let field = TextField::new(&context).with_validator(Validator::required("Required"));
        assert!(!field.is_valid());
        assert_eq!(field.validation_message(), "Required");

        assert!(field.set_text("hello"));
        assert!(field.is_valid());
        assert_eq!(field.validation_message(), "");

        field.set_text("");
        assert!(!field.is_valid());
        assert_eq!(shakes(&surface, &field), 2);

        let style = surface.style_of(field.key()).unwrap();
        assert_eq!(style.part(StylePart::Body).unwrap().border.role, Some(ColorRole::Error));
        assert_eq!(style.part(StylePart::Message).unwrap().opacity, 1.0);
    }

    #[test]
    fn swapping_validator_revalidates() {
        let (context, _) = context();
        let field = TextField::new(&context).with_text("42");
        assert!(field.is_valid());

        field.set_validator(Validator::email("Invalid email"));
        assert!(!field.is_valid());

        field.set_validator(Validator::number("Digits only"));
        assert!(field.is_valid());

        field.set_validator(Validator::email("Invalid email"));
        field.clear_validator();
        assert!(field.is_valid());
        assert!(!field.has_validator());
    }

    #[test]
    fn over_long_text_is_reverted() {
        let (context, surface) = context();
        let field = TextField::new(&context)
            .with_placeholder("Code")
            .with_max_length(4, "At most 4 characters");
        assert!(field.is_placeholder_visible());

        assert!(field.set_text("abcd"));
        assert!(!field.set_text("abcde"));
        assert_eq!(field.text(), "abcd");
        assert!(!field.is_valid());
        assert_eq!(field.validation_message(), "At most 4 characters");
        assert_eq!(shakes(&surface, &field), 1);

        assert!(field.set_text("abc"));
        assert!(field.is_valid());
    }

    #[test]
    fn max_length_counts_characters() {
        let (context, _) = context();
        let field = TextField::new(&context).with_max_length(3, "Too long");
        assert!(field.set_text("äöü"));
    }

    #[test]
    fn panicking_validator_counts_as_invalid() {
        let (context, _) = context();
        let field = TextField::new(&context).with_text("boom");
        field.set_validator(Validator::custom(|_| panic!("validator exploded"), "Broken"));
        assert!(!field.is_valid());
        assert_eq!(field.validation_message(), "Broken");
    }

    #[test]
    fn read_only_changes_style() {
        let (context, surface) = context();
        let field = TextField::new(&context).with_editable(false);
        assert!(!field.is_editable());
        let style = surface.style_of(field.key()).unwrap();
        assert_eq!(style.part(StylePart::Body).unwrap().opacity, 0.6);
    }
}
