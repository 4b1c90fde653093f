// ABOUTME: Hearth device registration library for the assistant cloud API
// ABOUTME: Generates device identifiers, registers them, and persists the device config

pub mod error;
pub mod ids;
pub mod registrar;
pub mod storage;
pub mod types;

// Re-export main types
pub use error::{RegistryError, RegistryResult};
pub use registrar::{DeviceRegistrar, RegistrationOutcome};
pub use storage::DeviceConfigStore;
pub use types::DeviceConfig;
