use std::ops::{Deref, DerefMut};

use markup5ever::{LocalName, Namespace, QualName};

/// A tag attribute, e.g. `class="test"` in `<div class="test" ...>`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
pub struct Attribute {
    /// The name of the attribute (e.g. the `class` in `<div class="test">`)
    pub name: QualName,
    /// The value of the attribute (e.g. the `"test"` in `<div class="test">`)
    pub value: String,
}

impl Attribute {
    /// An attribute in the null namespace, which is where all HTML attributes live
    pub fn new(local: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::new(None, Namespace::from(""), LocalName::from(local)),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Attributes {
    inner: Vec<Attribute>,
}

impl Attributes {
    pub fn new(inner: Vec<Attribute>) -> Self {
        Self { inner }
    }

    pub fn get(&self, local: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|attr| &*attr.name.local == local)
            .map(|attr| attr.value.as_str())
    }

    pub fn set(&mut self, local: &str, value: &str) {
        let existing_attr = self.inner.iter_mut().find(|a| &*a.name.local == local);
        if let Some(existing_attr) = existing_attr {
            existing_attr.value.clear();
            existing_attr.value.push_str(value);
        } else {
            self.push(Attribute::new(local, value));
        }
    }

    pub fn remove(&mut self, local: &str) -> Option<Attribute> {
        let idx = self.inner.iter().position(|attr| &*attr.name.local == local);
        idx.map(|idx| self.inner.remove(idx))
    }
}

impl Deref for Attributes {
    type Target = Vec<Attribute>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl DerefMut for Attributes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
