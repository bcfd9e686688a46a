//! Persisted list properties and fixed layout configuration.

use serde::{Deserialize, Serialize};

use crate::error::ListError;
use crate::traits::{ReadableProperty, WritableProperty};

/// Default row ceiling above which rendering is refused
pub const DEFAULT_ROW_LIMIT: usize = 2000;

/// Names of the persisted properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyName {
    SearchExpression,
    ShowSearchField,
    ReverseOrder,
}

impl PropertyName {
    pub const ALL: [PropertyName; 3] = [
        PropertyName::SearchExpression,
        PropertyName::ShowSearchField,
        PropertyName::ReverseOrder,
    ];

    /// Returns the storage key of the property.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyName::SearchExpression => "searchExpression",
            PropertyName::ShowSearchField => "showSearchField",
            PropertyName::ReverseOrder => "reverseOrder",
        }
    }

    /// Looks a property up by its storage key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == key)
    }
}

/// Value carried by a property change event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Text(String),
    Flag(bool),
}

/// A named host property with change tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct ModProperty<T> {
    name: &'static str,
    value: T,
    changed: bool,
}

impl<T: Clone + PartialEq> ModProperty<T> {
    pub fn new(name: PropertyName, value: T) -> Self {
        Self {
            name: name.as_str(),
            value,
            changed: false,
        }
    }

    /// Returns true once after the value was changed through `set`.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

impl<T: Clone + PartialEq> ReadableProperty<T> for ModProperty<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn value(&self) -> T {
        self.value.clone()
    }
}

impl<T: Clone + PartialEq> WritableProperty<T> for ModProperty<T> {
    fn set(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.changed = true;
        }
    }
}

/// The three persisted list properties as a plain serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListProperties {
    pub search_expression: String,
    pub show_search_field: bool,
    pub reverse_order: bool,
}

impl Default for ListProperties {
    fn default() -> Self {
        Self {
            search_expression: String::new(),
            show_search_field: true,
            reverse_order: false,
        }
    }
}

/// Host-side property set backing the list.
#[derive(Debug, Clone)]
pub struct PropertySet {
    pub search_expression: ModProperty<String>,
    pub show_search_field: ModProperty<bool>,
    pub reverse_order: ModProperty<bool>,
}

impl Default for PropertySet {
    fn default() -> Self {
        Self::from_properties(&ListProperties::default())
    }
}

impl PropertySet {
    pub fn from_properties(props: &ListProperties) -> Self {
        Self {
            search_expression: ModProperty::new(PropertyName::SearchExpression, props.search_expression.clone()),
            show_search_field: ModProperty::new(PropertyName::ShowSearchField, props.show_search_field),
            reverse_order: ModProperty::new(PropertyName::ReverseOrder, props.reverse_order),
        }
    }

    /// Returns the current values.
    pub fn snapshot(&self) -> ListProperties {
        ListProperties {
            search_expression: self.search_expression.value(),
            show_search_field: self.show_search_field.value(),
            reverse_order: self.reverse_order.value(),
        }
    }

    /// Routes a change event to the property with the given name.
    ///
    /// # Errors
    /// Returns `ListError::InvalidProperty` if the value kind does not fit the property.
    pub fn set_by_name(&mut self, name: PropertyName, value: PropertyValue) -> Result<(), ListError> {
        match (name, value) {
            (PropertyName::SearchExpression, PropertyValue::Text(text)) => self.search_expression.set(text),
            (PropertyName::ShowSearchField, PropertyValue::Flag(flag)) => self.show_search_field.set(flag),
            (PropertyName::ReverseOrder, PropertyValue::Flag(flag)) => self.reverse_order.set(flag),
            (name, value) => {
                return Err(ListError::InvalidProperty(format!("{} cannot hold {:?}", name.as_str(), value)));
            }
        }
        tracing::debug!("property {} updated", name.as_str());
        Ok(())
    }

    /// Returns true if any property changed since the last call, clearing the flags.
    pub fn take_changed(&mut self) -> bool {
        let search = self.search_expression.take_changed();
        let show = self.show_search_field.take_changed();
        let reverse = self.reverse_order.take_changed();
        search || show || reverse
    }
}

/// Fixed layout and behavior settings of one list instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Rendering is refused above this many data rows
    pub row_limit: usize,
    pub line_height: f32,
    pub search_field_height: f32,
    pub scrollbar_width: f32,
    pub scrollbar_button_size: f32,
    /// Wheel pixels that scroll by one row
    pub wheel_scroll_distance: f32,
    /// Horizontal indentation per depth level
    pub indent_width: f32,
    /// Re-raise render failures after showing them; follows the build profile
    #[serde(skip)]
    pub debug: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
            line_height: 20.0,
            search_field_height: 24.0,
            scrollbar_width: 12.0,
            scrollbar_button_size: 12.0,
            wheel_scroll_distance: 20.0,
            indent_width: 12.0,
            debug: cfg!(debug_assertions),
        }
    }
}
