//! Validated elements and the document they live in
//!
//! The engine never touches a real DOM. Hosts expose their inputs through
//! [`Element`] and look up confirmation targets through [`Document`];
//! [`FormElement`] and [`Form`] are plain in-memory implementations that can
//! be deserialized from JSON.

use serde::Deserialize;
use serde::Serialize;

/// An input element carrying a serialized rule-set.
pub trait Element: Send + Sync {
    /// Unique id of the element within its document.
    fn id(&self) -> &str;

    /// Form field name, e.g. `user[email]`.
    fn name(&self) -> &str;

    /// Current value.
    fn value(&self) -> &str;

    /// Checked state for checkable inputs; `None` for everything else.
    fn checked(&self) -> Option<bool> {
        None
    }

    /// Value the record had when the form was rendered (update forms).
    fn original_value(&self) -> Option<&str> {
        None
    }

    /// Raw serialized rule-set, or `None` if the element is not validated.
    fn rules(&self) -> Option<&str>;
}

/// Lookup of elements by id.
pub trait Document: Send + Sync {
    fn element(&self, id: &str) -> Option<&dyn Element>;
}

/// In-memory [`Element`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormElement {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_value: Option<String>,
    #[serde(
        default,
        rename = "data-validate",
        alias = "validate",
        skip_serializing_if = "Option::is_none"
    )]
    pub rules: Option<String>,
}

impl FormElement {
    /// Creates an element whose name equals its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn with_original_value(mut self, value: impl Into<String>) -> Self {
        self.original_value = Some(value.into());
        self
    }

    /// Attaches a serialized rule-set.
    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = Some(rules.into());
        self
    }
}

impl Element for FormElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn checked(&self) -> Option<bool> {
        self.checked
    }

    fn original_value(&self) -> Option<&str> {
        self.original_value.as_deref()
    }

    fn rules(&self) -> Option<&str> {
        self.rules.as_deref()
    }
}

/// In-memory [`Document`]: an ordered list of elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    #[serde(default)]
    pub elements: Vec<FormElement>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element, builder style.
    pub fn with(mut self, element: FormElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn push(&mut self, element: FormElement) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    /// Returns the element with the given id.
    pub fn get(&self, id: &str) -> Option<&FormElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Replaces the value of an element; returns `false` if it does not exist.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.value = value.into();
                true
            }
            None => false,
        }
    }
}

impl Document for Form {
    fn element(&self, id: &str) -> Option<&dyn Element> {
        self.get(id).map(|e| e as &dyn Element)
    }
}
