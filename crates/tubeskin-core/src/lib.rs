//! Tubeskin Core - Playback UI Library for Tubeskin
//!
//! This crate provides the platform-agnostic half of the custom player skin:
//! - Routing between the intake form and the player view
//! - Identifier intake
//! - Reconciliation of UI state with embedded-player callbacks
//! - Transport controls (play/pause, mute, seek) behind a capability trait
//! - Hover-driven top bar timing
//! - Mount-scoped cancellation and the one-time embed readiness gate
//! - Theme and view-model projection
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Tubeskin Core                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │    Route /   │  │    Hover     │  │    Seek /    │           │
//! │  │    Intake    │  │   Tracker    │  │    Format    │           │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │         │                 │                 │                   │
//! │         └─────────────────┼─────────────────┘                   │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │  Playback   │                              │
//! │                    │ Controller  │                              │
//! │                    └──────┬──────┘                              │
//! │                           │                                     │
//! │  ┌──────────────┐  ┌──────┴──────┐  ┌──────────────┐            │
//! │  │  View Model  │  │   Player    │  │  Mount Scope │            │
//! │  │   / Theme    │  │   Control   │  │  Ready Gate  │            │
//! │  └──────────────┘  └─────────────┘  └──────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod control;
pub mod controller;
pub mod error;
pub mod format;
pub mod hover;
pub mod intake;
pub mod lifecycle;
pub mod route;
pub mod seek;
pub mod theme;
pub mod types;
pub mod view;

pub use config::{EmbedOptions, PlayerVars, ViewConfig};
pub use control::PlayerControl;
pub use controller::{PlaybackController, ProgressFrame, StateEffect};
pub use error::{Error, Result};
pub use format::{format_time, time_label};
pub use hover::HoverTracker;
pub use intake::Navigator;
pub use lifecycle::{MountScope, ReadyGate};
pub use route::Route;
pub use seek::{seek_fraction, seek_target};
pub use theme::{SkinColors, SkinTheme};
pub use types::*;
pub use view::{PlayGlyph, ViewModel, VolumeGlyph};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library with default configuration
pub fn init() {
    tracing::info!(version = VERSION, "Tubeskin Core initialized");
}
