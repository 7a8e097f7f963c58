//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - routing: sections and fragment resolution
//! - device: device status and connection check state
//! - wifi: scanned network types
//! - config: device configuration and forms
//! - widgets: widget list and per-widget configuration
//! - settings: timezone, font size and weather settings

pub mod config;
pub mod device;
pub mod routing;
pub mod settings;
pub mod widgets;
pub mod wifi;

// Re-export all types for backward compatibility
pub use config::*;
pub use device::*;
pub use routing::*;
pub use settings::*;
pub use widgets::*;
pub use wifi::*;
