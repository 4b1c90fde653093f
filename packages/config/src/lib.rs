// ABOUTME: Shared configuration constants for the Hearth provisioning tooling
// ABOUTME: Centralizes env var names, file layout, and assistant cloud endpoints

pub mod constants;

pub use constants::*;
