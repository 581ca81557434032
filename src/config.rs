//! Parameter model, defaults, and validation.
//!
//! Raw author parameters arrive as JSON. This layer fills defaults,
//! sanitizes and filters the hotspot list, and decides whether the core
//! subsystem gets constructed at all: a missing model source or an empty
//! filtered hotspot set short-circuits into a static placeholder message
//! and the core is never instantiated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{ContentBundle, ContentDescriptor};
use crate::hotspot::{Appearance, Hotspot};
use crate::i18n::Dictionary;
use crate::text::purify_html;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid parameters: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which disclosure surface to instantiate. A static choice made once per
/// session; never re-inspected at activation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Presentation {
    #[default]
    SidePanel,
    Overlay,
}

/// Raw author parameters, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Params {
    pub model: ModelParams,
    pub hotspots: Vec<RawHotspot>,
    pub visuals: Visuals,
    pub behaviour: Behaviour,
    pub size: SizeConstraints,
    pub l10n: HashMap<String, String>,
    pub a11y: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelParams {
    pub src: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Visuals {
    pub hotspot_color_default: Option<String>,
    pub background_color: Option<String>,
    pub poster: Option<Poster>,
}

/// Optional poster image; its intrinsic size supplies the explicit aspect
/// ratio that takes precedence over model dimensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Poster {
    pub src: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Poster {
    pub fn ratio(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some(w / h),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Behaviour {
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizeConstraints {
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    pub min_height: Option<f64>,
}

/// One hotspot as authored, before filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawHotspot {
    pub surface: Option<String>,
    pub label: Option<String>,
    pub appearance: Option<Appearance>,
    pub contents: Vec<serde_json::Value>,
}

/// Outcome of validation: either the inputs the core needs, or the
/// placeholder message to show instead of it.
#[derive(Debug)]
pub enum Bootstrap {
    Placeholder { message: String },
    Ready(Box<ValidConfig>),
}

/// Validated, sanitized inputs for constructing the subsystem.
#[derive(Debug)]
pub struct ValidConfig {
    pub model_src: String,
    pub model_alt: String,
    pub hotspots: Vec<Hotspot>,
    pub bundles: Vec<ContentBundle>,
    pub presentation: Presentation,
    pub hotspot_color_default: Option<String>,
    pub background_color: Option<String>,
    pub poster_ratio: Option<f64>,
    pub size: SizeConstraints,
    pub dictionary: Dictionary,
}

impl Params {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validate parameters and assemble the core's inputs.
///
/// Hotspots are kept only when they have a surface anchor, a non-empty
/// sanitized label, and at least one content item whose type reference
/// resolves; survivors receive their dense zero-based index. The same
/// index later keys the marker, the content bundle, and the surface's
/// active-hotspot field.
pub fn validate(params: Params) -> Bootstrap {
    let mut dictionary = Dictionary::new();
    dictionary.fill(namespaced(&params.l10n, "l10n"));
    dictionary.fill(namespaced(&params.a11y, "a11y"));

    let model_src = match params.model.src.as_deref() {
        Some(src) if !src.trim().is_empty() => src.to_string(),
        _ => {
            return Bootstrap::Placeholder {
                message: dictionary.get("l10n.noModel").to_string(),
            }
        }
    };

    let mut hotspots = Vec::new();
    let mut bundles = Vec::new();
    for raw in &params.hotspots {
        let Some(surface) = raw.surface.as_deref().filter(|s| !s.trim().is_empty()) else {
            continue;
        };
        let label = purify_html(raw.label.as_deref().unwrap_or_default());
        if label.is_empty() {
            continue;
        }
        let contents: Vec<ContentDescriptor> = raw
            .contents
            .iter()
            .filter_map(ContentDescriptor::resolve)
            .collect();
        if contents.is_empty() {
            continue;
        }

        let index = hotspots.len();
        hotspots.push(Hotspot {
            index,
            surface_anchor: surface.to_string(),
            label,
            appearance: raw.appearance.clone().unwrap_or_default(),
        });
        bundles.push(ContentBundle { hotspot_index: index, contents });
    }

    if hotspots.is_empty() {
        return Bootstrap::Placeholder {
            message: dictionary.get("l10n.noHotspotsWithContents").to_string(),
        };
    }

    log::info!("configured {} hotspot(s)", hotspots.len());

    Bootstrap::Ready(Box::new(ValidConfig {
        model_src,
        model_alt: purify_html(params.model.alt.as_deref().unwrap_or_default()),
        hotspots,
        bundles,
        presentation: params.behaviour.presentation,
        hotspot_color_default: params.visuals.hotspot_color_default.clone(),
        background_color: params.visuals.background_color.clone(),
        poster_ratio: params.visuals.poster.as_ref().and_then(Poster::ratio),
        size: params.size,
        dictionary,
    }))
}

fn namespaced(entries: &HashMap<String, String>, prefix: &str) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (format!("{prefix}.{key}"), value.clone()))
        .collect()
}
