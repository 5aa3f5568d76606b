//! # Pagewright Editor
//!
//! State engine behind the visual page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host UI: renders EditorView, issues commands│
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorCore (synchronous)            │
//! │  - Component tree store + selection         │
//! │  - Undo/redo history per (page, language)   │
//! │  - Single-slot clipboard                    │
//! │  - Language overlay resolution              │
//! │  - Page/site actions                        │
//! └─────────────────────────────────────────────┘
//!                     ↓ outbox (fire-and-forget)
//! ┌─────────────────────────────────────────────┐
//! │ SyncWorker → PersistenceGateway (async)     │
//! │ VersionManager / SiteOperations (awaited)   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Optimistic**: local state changes first, the backend catches up
//! 2. **No rollback**: a failed write is reported, local state is kept
//! 3. **Stable identity**: component ids are never reassigned or reused
//! 4. **Coherent undo grain**: structural edits are one step each, a burst
//!    of prop/style edits on one component is one step
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagewright_editor::{EditorConfig, EditorCore, Outbox, StaticCatalog, SyncWorker};
//!
//! let (outbox, requests) = Outbox::channel();
//! let (worker, handles) = SyncWorker::new(gateway.clone(), requests);
//! tokio::spawn(worker.run());
//!
//! let mut core = EditorCore::new(site, Arc::new(catalog), outbox, EditorConfig::default());
//! let hero = core.add("hero")?;
//! core.update_props(&hero, props)?;
//! core.set_selection(None); // records the prop edit as one undo step
//! core.undo()?;
//! ```

mod catalog;
mod clipboard;
mod commands;
mod config;
mod editor;
mod errors;
mod gateway;
mod history;
mod id_generator;
mod model;
mod notice;
mod overlay;
mod session;
mod site_actions;
mod site_ops;
mod store;
mod sync;
pub mod tree;
mod versions;

pub use catalog::{ComponentCatalog, ComponentDefaults, StaticCatalog};
pub use clipboard::Clipboard;
pub use commands::EditorCommand;
pub use config::{ConfigError, EditorConfig, DEFAULT_CONFIG_NAME};
pub use editor::{EditorCore, EditorView};
pub use errors::{EditorError, ErrorKind};
pub use gateway::{GatewayError, PersistenceGateway, PublishReceipt};
pub use history::{History, HistoryEntry};
pub use id_generator::IdGenerator;
pub use model::{
    AnimationSettings, ComponentNode, ComponentTree, DeviceView, LanguageDescriptor, Page,
    PageTranslation, PageVersion, PropMap, SeoSettings, Site,
};
pub use notice::{Notice, NoticeLevel, NoticeSource};
pub use overlay::{resolve, WriteTarget};
pub use session::EditorSession;
pub use site_ops::SiteOperations;
pub use sync::{Outbox, PersistRequest, SyncHandles, SyncStatus, SyncWorker};
pub use tree::{MoveDirection, MoveOutcome};
pub use versions::VersionManager;
