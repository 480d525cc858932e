//! Light / dark / sepia theme cycling on the root element.

use std::fmt;
use std::str::FromStr;

use folio_dom::BaseDocument;
use folio_traits::StorageProvider;

pub const THEME_STORAGE_KEY: &str = "theme";
const THEME_ATTR: &str = "data-bs-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
    Sepia,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Sepia];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Sepia => "sepia",
        }
    }

    /// The following theme in the toggle's cycle
    pub fn next(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Sepia,
            Theme::Sepia => Theme::Light,
        }
    }

    /// Bootstrap icon class shown on the toggle
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "bi-sun-fill",
            Theme::Dark => "bi-moon-stars-fill",
            Theme::Sepia => "bi-palette-fill",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light mode",
            Theme::Dark => "Dark mode",
            Theme::Sepia => "Sepia mode",
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeSwitcher {
    root: usize,
    toggle: Option<usize>,
    current: Theme,
}

impl ThemeSwitcher {
    /// Apply the initial theme: the stored one if it is valid, else dark when the
    /// system prefers it, else light.
    pub fn install(doc: &mut BaseDocument, storage: &dyn StorageProvider) -> Self {
        let stored = match storage.get(THEME_STORAGE_KEY) {
            Ok(value) => value.and_then(|value| value.parse::<Theme>().ok()),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("could not read stored theme: {_err}");
                None
            }
        };
        let initial = stored.unwrap_or(if doc.viewport().prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        });

        let mut switcher = ThemeSwitcher {
            root: doc.root_element_id(),
            toggle: doc.get_element_by_id("themeToggle"),
            current: initial,
        };
        switcher.apply(doc, storage, initial);
        switcher
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Set the theme on the root element, persist it and refresh the toggle
    pub fn apply(&mut self, doc: &mut BaseDocument, storage: &dyn StorageProvider, theme: Theme) {
        self.current = theme;
        if let Err(_err) = storage.set(THEME_STORAGE_KEY, theme.as_str()) {
            #[cfg(feature = "tracing")]
            tracing::warn!("could not persist theme: {_err}");
        }

        let icon = self.toggle.and_then(|toggle| {
            doc.get_node(toggle)?
                .children
                .iter()
                .copied()
                .find(|child| doc.tree()[*child].is_element_with_tag_name("i"))
        });

        let mut mutr = doc.mutate();
        mutr.set_attribute(self.root, THEME_ATTR, theme.as_str());
        if let Some(toggle) = self.toggle {
            mutr.set_attribute(toggle, "title", &format!("Theme (current: {})", theme.label()));
        }
        if let Some(icon) = icon {
            mutr.set_attribute(icon, "class", &format!("bi {}", theme.icon()));
        }
    }

    /// Listener on the toggle button. Returns whether `node_id` is the toggle.
    pub fn on_click(
        &mut self,
        doc: &mut BaseDocument,
        storage: &dyn StorageProvider,
        node_id: usize,
    ) -> bool {
        if self.toggle != Some(node_id) {
            return false;
        }
        let next = self.current.next();
        self.apply(doc, storage, next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_all_themes() {
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::Sepia);
        assert_eq!(Theme::Sepia.next(), Theme::Light);
        assert_eq!("sepia".parse::<Theme>(), Ok(Theme::Sepia));
        assert!("solarized".parse::<Theme>().is_err());
    }
}
