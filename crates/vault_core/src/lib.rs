//! GrooveVault Core Domain Logic
//!
//! This crate contains:
//! - Navigation state machine (stand/stack browsing, inspection, media
//!   viewer, overlays)
//! - Input routing (keyboard and drag gestures)
//! - Cover brightness sampling for contrast adaptation
//! - Collection controller (add/update/delete/import with persistence)
//! - Collection statistics
//! - Recommendation service boundary
//! - Configuration

pub mod brightness;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod navigation;
pub mod recommend;
pub mod session;
pub mod shelf;
pub mod stats;

pub use brightness::{estimate_brightness, Brightness, BrightnessSampler, CoverSource, FsCoverSource, SampleResult};
pub use config::{AppConfig, GeneralConfig, NavigationConfig, ThemeMode};
pub use controller::CollectionController;
pub use error::VaultError;
pub use input::{route_drag_end, route_key, Key, NavAction};
pub use navigation::{Direction, Modal, NavigationState, Overlay, TextContrast, ViewMode};
pub use recommend::{listening_context, Recommendation, RecommendationProvider};
pub use session::Session;
pub use shelf::filter_records;
pub use stats::{CollectionStats, GenreCount};

// Persistence layer types used throughout the domain
pub use vault_store::{MediaKind, MediaRef, VinylDraft, VinylRecord};
