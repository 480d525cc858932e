use serde::{Deserialize, Serialize};

/// The host's preferred color scheme (`prefers-color-scheme`)
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

#[derive(Default, Debug, Clone)]
pub struct Viewport {
    /// Width of the visible area in CSS pixels
    pub client_width: f64,
    /// Height of the visible area in CSS pixels
    pub client_height: f64,

    pub color_scheme: ColorScheme,
}

impl Viewport {
    pub fn new(client_width: f64, client_height: f64, color_scheme: ColorScheme) -> Self {
        Self {
            client_width,
            client_height,
            color_scheme,
        }
    }

    pub fn prefers_dark(&self) -> bool {
        self.color_scheme == ColorScheme::Dark
    }
}
