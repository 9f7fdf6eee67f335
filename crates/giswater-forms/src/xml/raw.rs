//! Raw merged-value view of an XML element.
//!
//! A [`RawValue`] is the shape the normalizer consumes: attributes and child
//! elements of one element are merged into a single ordered object, a child
//! name that occurs more than once becomes a list, and a child that occurs
//! once stays a single value. Text that sits next to attributes or child
//! elements is kept under the [`TEXT_KEY`] entry.
//!
//! Because single occurrences are not wrapped, every consumer of a field that
//! *may* repeat must go through [`RawValue::one_or_many`].

use super::reader::XmlElement;

/// The key under which mixed-content text is stored.
pub const TEXT_KEY: &str = "_";

/// The merged value of one XML element.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// An element with no attributes and no child elements.
    Text(String),
    /// Attributes and child elements, merged, in source order.
    Object(Vec<(String, RawValue)>),
    /// A child name that occurred more than once.
    List(Vec<RawValue>),
}

impl RawValue {
    /// Converts an element into its merged value.
    pub fn from_element(element: &XmlElement) -> Self {
        let has_children = element.child_elements().next().is_some();
        if !element.has_attributes() && !has_children {
            return RawValue::Text(element.text());
        }

        let mut entries: Vec<(String, RawValue)> = element
            .attributes()
            .map(|(key, value)| (key.to_string(), RawValue::Text(value.to_string())))
            .collect();

        for child in element.child_elements() {
            let value = RawValue::from_element(child);
            match entries.iter_mut().find(|(key, _)| key == child.name()) {
                Some((_, RawValue::List(list))) => list.push(value),
                Some((_, existing)) => {
                    let first = std::mem::replace(existing, RawValue::List(Vec::new()));
                    *existing = RawValue::List(vec![first, value]);
                }
                None => entries.push((child.name().to_string(), value)),
            }
        }

        let text = element.text();
        if !text.is_empty() {
            entries.push((TEXT_KEY.to_string(), RawValue::Text(text)));
        }

        RawValue::Object(entries)
    }

    /// Looks up a field of an object value.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        match self {
            RawValue::Object(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Returns the text of a field, if it holds text.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(RawValue::as_text)
    }

    /// Returns the text of this value.
    ///
    /// An object counts as text when it carries mixed-content text, so
    /// `<string notr="true">abc</string>` reads as `abc`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text),
            RawValue::Object(_) => self.get(TEXT_KEY).and_then(RawValue::as_text),
            RawValue::List(_) => None,
        }
    }

    /// Returns the entries of an object value.
    pub fn entries(&self) -> &[(String, RawValue)] {
        match self {
            RawValue::Object(entries) => entries,
            _ => &[],
        }
    }

    /// Coerces a possibly-absent, possibly-single, possibly-repeated field
    /// into a list.
    ///
    /// This is the one place where the "single child is not wrapped" shape is
    /// undone; all list-shaped form fields go through it.
    pub fn one_or_many(value: Option<&RawValue>) -> Vec<&RawValue> {
        match value {
            None => Vec::new(),
            Some(RawValue::List(items)) => items.iter().collect(),
            Some(single) => vec![single],
        }
    }
}
