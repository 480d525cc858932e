use std::str::FromStr;

use markup5ever::{LocalName, Namespace, QualName};

use super::{Attribute, Attributes};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Build the qualified name of an HTML element from its tag name
pub fn html_name(local: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(local))
}

#[derive(Debug, Clone)]
pub struct ElementData {
    /// The elements tag name, namespace and prefix
    pub name: QualName,

    /// The elements attributes
    pub attrs: Attributes,
}

impl ElementData {
    pub fn new(name: QualName, attrs: Vec<Attribute>) -> Self {
        ElementData {
            name,
            attrs: Attributes::new(attrs),
        }
    }

    /// The lower-case tag name (e.g. `span`)
    pub fn tag(&self) -> &str {
        &self.name.local
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    pub fn attr_parsed<T: FromStr>(&self, name: &str) -> Option<T> {
        self.attr(name)?.parse::<T>().ok()
    }

    /// Detects the presence of the attribute, treating *any* value as truthy.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// The `data-*` attribute with the given suffix (`dataset[name]`)
    pub fn data(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| {
                attr.name
                    .local
                    .strip_prefix("data-")
                    .is_some_and(|suffix| suffix == name)
            })
            .map(|attr| attr.value.as_str())
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Returns true if the class was added
    pub(crate) fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        let mut value = self.classes().collect::<Vec<_>>().join(" ");
        if !value.is_empty() {
            value.push(' ');
        }
        value.push_str(class);
        self.attrs.set("class", &value);
        true
    }

    /// Returns true if the class was present
    pub(crate) fn remove_class(&mut self, class: &str) -> bool {
        if !self.has_class(class) {
            return false;
        }
        let value = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.attrs.set("class", &value);
        true
    }

    /// Look up a declaration in the inline `style` attribute
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.attr("style")?
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .find(|(prop, _)| prop.trim() == name)
            .map(|(_, value)| value.trim())
    }

    pub(crate) fn set_style_property(&mut self, name: &str, value: &str) {
        let mut decls = self.style_declarations();
        match decls.iter_mut().find(|(prop, _)| prop == name) {
            Some(decl) => decl.1 = value.to_string(),
            None => decls.push((name.to_string(), value.to_string())),
        }
        self.write_style_declarations(&decls);
    }

    pub(crate) fn remove_style_property(&mut self, name: &str) {
        let mut decls = self.style_declarations();
        decls.retain(|(prop, _)| prop != name);
        self.write_style_declarations(&decls);
    }

    fn style_declarations(&self) -> Vec<(String, String)> {
        self.attr("style")
            .unwrap_or("")
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .map(|(prop, value)| (prop.trim().to_string(), value.trim().to_string()))
            .filter(|(prop, _)| !prop.is_empty())
            .collect()
    }

    fn write_style_declarations(&mut self, decls: &[(String, String)]) {
        if decls.is_empty() {
            self.attrs.remove("style");
            return;
        }
        let value = decls
            .iter()
            .map(|(prop, value)| format!("{prop}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.attrs.set("style", &value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn div(attrs: Vec<Attribute>) -> ElementData {
        ElementData::new(html_name("div"), attrs)
    }

    #[test]
    fn class_list_edits_keep_other_classes() {
        let mut el = div(vec![Attribute::new("class", "btn  d-none active")]);
        assert!(el.remove_class("d-none"));
        assert_eq!(el.attr("class"), Some("btn active"));
        assert!(!el.add_class("btn"));
        assert!(el.add_class("shadow"));
        assert_eq!(el.attr("class"), Some("btn active shadow"));
    }

    #[test]
    fn style_properties_round_trip_through_attribute() {
        let mut el = div(vec![Attribute::new("style", "width: 48px;height:48px")]);
        assert_eq!(el.style_property("height"), Some("48px"));

        el.set_style_property("left", "60px");
        el.set_style_property("width", "50%");
        assert_eq!(el.attr("style"), Some("width: 50%; height: 48px; left: 60px"));

        el.remove_style_property("width");
        el.remove_style_property("height");
        el.remove_style_property("left");
        assert_eq!(el.attr("style"), None);
    }

    #[test]
    fn dataset_lookup() {
        let el = div(vec![Attribute::new("data-color", "green")]);
        assert_eq!(el.data("color"), Some("green"));
        assert_eq!(el.data("format"), None);
    }
}
