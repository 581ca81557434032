//! Localized UI strings.
//!
//! All labels and ARIA strings the subsystem emits come from a flat
//! key/value dictionary with built-in English defaults; content
//! integrations override entries through configuration. Storage backends
//! are out of scope — this is purely an in-memory map with a small
//! substitution helper for templated strings.

use std::collections::HashMap;

/// Flat string dictionary with namespaced keys (`l10n.*`, `a11y.*`).
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

const DEFAULTS: &[(&str, &str)] = &[
    ("l10n.clickOnHotspotToSeeDetails", "Click on a hotspot to see details."),
    ("l10n.noModel", "No 3D model was provided."),
    ("l10n.noHotspotsWithContents", "No hotspots with content were set up."),
    ("a11y.close", "Close"),
    ("a11y.popupLabel", "Details for @label"),
    ("a11y.buttonPlay", "Play animation"),
    ("a11y.buttonPause", "Pause animation"),
    ("a11y.buttonFullscreenEnter", "Enter fullscreen mode"),
    ("a11y.buttonFullscreenExit", "Exit fullscreen mode"),
];

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            entries: DEFAULTS
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Merge override entries on top of the defaults.
    pub fn fill(&mut self, overrides: HashMap<String, String>) {
        self.entries.extend(overrides);
    }

    /// Look up a key. Unknown keys echo the key itself so missing
    /// translations stay visible instead of silently blanking UI strings.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Look up a templated entry and substitute `token` with `value`
    /// (e.g. the `@label` token in the popup accessible name).
    pub fn get_replaced(&self, key: &str, token: &str, value: &str) -> String {
        self.get(key).replace(token, value)
    }
}
