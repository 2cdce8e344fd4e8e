//! # Loaderkit Editor
//!
//! Application state and event handling for the loader editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ canvas / config panel / code editor events  │
//! └─────────────────────────────────────────────┘
//!          ↓ immediately          ↓ debounced
//! ┌─────────────────────────────────────────────┐
//! │ EditorShell                                 │
//! │  - update(&AppState, Action) → AppState     │
//! │  - one debouncer per event category         │
//! │  - preview bridge + sandbox                 │
//! │  - preferences written after every change   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ View: generated source, preview, errors     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use loaderkit_editor::{EditorShell, MemoryStore, OptionsPatch, ShellConfig};
//! use loaderkit_preview::MarkupSandbox;
//!
//! let mut shell = EditorShell::new(
//!     Box::new(MarkupSandbox::new()),
//!     Box::new(MemoryStore::new()),
//!     ShellConfig::default(),
//! );
//!
//! shell.edit_field(OptionsPatch::default().width(320.0), Instant::now());
//! shell.tick(Instant::now() + Duration::from_secs(1));
//! let view = shell.view();
//! ```

mod actions;
mod debounce;
mod errors;
mod preferences;
mod shell;
mod state;

pub use actions::{update, Action, OptionsPatch};
pub use debounce::{Debouncer, DEFAULT_WINDOW};
pub use errors::{EditorError, FatalError, PreferencesError};
pub use preferences::{keys, load_state, save_state, JsonFileStore, MemoryStore, PreferencesStore};
pub use shell::{EditorShell, ShellConfig, Tick, View};
pub use state::{AppState, Tool};
