// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # pingwatch
//!
//! A live latency graph for a set of probed hosts, drawn as a borderless,
//! draggable overlay pane in the terminal.
//!
//! Every probe interval the prober measures round-trip time to each enabled
//! target; the whole round is applied to the sample store atomically, so a
//! frame never shows a half-updated round. Each frame the vertical scale
//! snaps up to cover the worst visible sample and decays back down smoothly.
//! Failed probes report `0` milliseconds, indistinguishable from a genuine
//! zero-latency reply.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Event loop (main)                    │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (buffers,│    │ (canvas)│    │         │ │
//! │  └────┬────┘    │  scale)  │    └─────────┘    └─────────┘ │
//! │       │         └──────────┘                               │
//! │       ▼                                                    │
//! │  ┌─────────┐                                               │
//! │  │ probe   │◀── PingProber (ICMP echo, one round at a time)│
//! │  └─────────┘                                               │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`config`]**: the JSON configuration document - window geometry,
//!   visual parameters, and the probed targets; synthesized with defaults
//!   when missing, fatal when malformed
//! - **[`probe`]**: the [`Prober`] seam and the `surge-ping` ICMP
//!   implementation; failures map to the `0` sentinel
//! - **[`data`]**: fixed-capacity rolling sample buffers and the
//!   snap-up/decay-down scale controller
//! - **[`ui`]**: the floating pane and the Braille-canvas graph - polylines,
//!   guide tick marks, latest-value labels
//! - **[`app`]**: application state (running flag, drag offset) threaded
//!   through the event handlers
//!
//! ## Usage
//!
//! ```bash
//! # Probe the configured hosts (pingwatch.json, created on first run)
//! pingwatch
//!
//! # Use another configuration document
//! pingwatch --config ~/.config/pingwatch.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use pingwatch::{Config, SampleStore, ScaleState};
//!
//! let config = Config::default();
//! let mut store = SampleStore::new(&config.servers, config.visual_config.max_points);
//! let mut scale = ScaleState::new(&config.visual_config.guide_levels);
//!
//! store.push("1.1.1.1", 23);
//! scale.tick(
//!     store.global_max(),
//!     &config.visual_config.guide_levels,
//!     config.visual_config.scale_decay_rate,
//! );
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod probe;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::{Config, ServerConfig, VisualConfig, WindowConfig};
pub use data::{SampleBuffer, SampleStore, ScaleState};
pub use probe::{PingProber, Prober};
