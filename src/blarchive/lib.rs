//! # Blarchive Architecture
//!
//! Blarchive is a personal photocard and playlist archive for a few idol
//! groups. The core is a library; the terminal client in `cli/` is one front
//! end over it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders views, prompts, exit codes     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns both stores, normalizes listing numbers and filters │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per user action, returns CmdResult          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - PhotocardStore / PlaylistStore over a PersistenceAdapter │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering ([`filter`]) and tag normalisation ([`tags`]) are pure functions
//! over store snapshots. Image intake ([`media`]) and caption suggestions
//! ([`caption`]) are collaborators the command layer calls out to.
//!
//! From `api.rs` inward nothing writes to stdout or stderr. Diagnostics go
//! through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: Logic for each user action
//! - [`store`]: Persistence adapter and the two collections
//! - [`model`]: Records, categories and view selectors
//! - [`filter`]: Category and tag filtering for the gallery and music views
//! - [`index`]: 1-based listing numbers
//! - [`tags`]: Tag input normalisation
//! - [`media`]: Camera capture and image upload
//! - [`caption`]: Caption suggestions over HTTP
//! - [`seed`]: Built-in cards, playlists and channel links
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod caption;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod init;
pub mod media;
pub mod model;
pub mod seed;
pub mod store;
pub mod tags;
