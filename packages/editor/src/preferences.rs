//! Persisted editor preferences.
//!
//! A flat string key/value store. Every key is read once when the editor
//! starts; a missing or malformed value falls back to its default.

use crate::errors::PreferencesError;
use crate::state::AppState;
use loaderkit_model::{defaults, preset, Canvas, Framework, PresetName, Shape, ShapeModel};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

pub mod keys {
    pub const FRAMEWORK: &str = "framework";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const SPEED: &str = "speed";
    pub const PRIMARY_COLOR: &str = "primaryColor";
    pub const SECONDARY_COLOR: &str = "secondaryColor";
    pub const RTL: &str = "rtl";
    pub const GUIDELINE: &str = "guideline";
    pub const DRAW: &str = "draw";

    pub const ALL: [&str; 9] = [
        FRAMEWORK,
        WIDTH,
        HEIGHT,
        SPEED,
        PRIMARY_COLOR,
        SECONDARY_COLOR,
        RTL,
        GUIDELINE,
        DRAW,
    ];
}

pub trait PreferencesStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String);

    /// Persist buffered writes
    fn flush(&mut self) -> Result<(), PreferencesError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl PreferencesStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// Preferences kept in a JSON object on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl JsonFileStore {
    /// Open `path`; a missing file is an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = values.len(), "opened preferences");
        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferencesStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        if self.values.get(key) != Some(&value) {
            self.values.insert(key.to_string(), value);
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<(), PreferencesError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        self.dirty = false;
        Ok(())
    }
}

/// Build the startup state from `store`
pub fn load_state(store: &dyn PreferencesStore) -> AppState {
    let fallback = preset(PresetName::Facebook);

    let framework = read(store, keys::FRAMEWORK, Framework::default());
    let canvas = Canvas::new(
        read_number(store, keys::WIDTH, defaults::CANVAS_WIDTH),
        read_number(store, keys::HEIGHT, defaults::CANVAS_HEIGHT),
    );
    let primitives = match store.get(keys::DRAW) {
        Some(raw) => match serde_json::from_str::<Vec<Shape>>(&raw) {
            Ok(shapes) => shapes.iter().map(|shape| shape.clamped(&canvas)).collect(),
            Err(err) => {
                warn!(key = keys::DRAW, error = %err, "ignoring malformed preference");
                fallback.primitives.clone()
            }
        },
        None => fallback.primitives.clone(),
    };

    let model = ShapeModel {
        canvas,
        primitives,
        primary_color: store
            .get(keys::PRIMARY_COLOR)
            .unwrap_or_else(|| defaults::PRIMARY_COLOR.to_string()),
        secondary_color: store
            .get(keys::SECONDARY_COLOR)
            .unwrap_or_else(|| defaults::SECONDARY_COLOR.to_string()),
        speed: read_number(store, keys::SPEED, defaults::SPEED),
        rtl: read(store, keys::RTL, false),
        guideline: store.get(keys::GUIDELINE).unwrap_or_default(),
    };

    AppState::new(model, framework)
}

/// Write every preference key from `state`
pub fn save_state(state: &AppState, store: &mut dyn PreferencesStore) -> Result<(), PreferencesError> {
    let model = &state.model;
    store.set(keys::FRAMEWORK, state.framework.to_string());
    store.set(keys::WIDTH, model.canvas.width.to_string());
    store.set(keys::HEIGHT, model.canvas.height.to_string());
    store.set(keys::SPEED, model.speed.to_string());
    store.set(keys::PRIMARY_COLOR, model.primary_color.clone());
    store.set(keys::SECONDARY_COLOR, model.secondary_color.clone());
    store.set(keys::RTL, model.rtl.to_string());
    store.set(keys::GUIDELINE, model.guideline.clone());
    store.set(keys::DRAW, serde_json::to_string(&model.primitives)?);
    store.flush()
}

/// Parsed preference, or `default` when absent or malformed
fn read<T: FromStr>(store: &dyn PreferencesStore, key: &str, default: T) -> T {
    match store.get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring malformed preference");
            default
        }),
        None => default,
    }
}

/// Like [`read`], but only finite, non-negative numbers count
fn read_number(store: &dyn PreferencesStore, key: &str, default: f64) -> f64 {
    let value = read(store, key, default);
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!(key, value, "ignoring out-of-range preference");
        default
    }
}
