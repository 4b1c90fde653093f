// ABOUTME: Constant definitions shared across the Hearth workspace
// ABOUTME: Environment variable names, data file layout, and cloud endpoints

// Environment Variables
pub const HEARTH_DATA_DIR: &str = "HEARTH_DATA_DIR";
pub const HEARTH_DEVICE_API_URL: &str = "HEARTH_DEVICE_API_URL";
pub const HEARTH_CALLBACK_PORT: &str = "HEARTH_CALLBACK_PORT";

// Data Directory Layout
pub const DEFAULT_DATA_DIR: &str = "data/assistant";
pub const CREDENTIALS_FILE: &str = "credentials.json";
pub const DEVICE_CONFIG_FILE: &str = "device_config.json";

// OAuth
pub const ASSISTANT_SCOPE: &str = "https://www.googleapis.com/auth/assistant-sdk-prototype";
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
pub const DEFAULT_CALLBACK_PORT: u16 = 7337;

// Device Registration API
pub const DEFAULT_DEVICE_API_URL: &str = "https://embeddedassistant.googleapis.com/v1alpha2";
pub const DEVICE_TYPE: &str = "action.devices.types.LIGHT";
pub const DEVICE_CLIENT_TYPE: &str = "SDK_SERVICE";
pub const DEVICE_MANUFACTURER: &str = "Hearth";
pub const DEVICE_PRODUCT_NAME: &str = "Hearth Assistant";
pub const DEVICE_DESCRIPTION: &str = "Smart home controller";
pub const DEVICE_NICKNAME: &str = "Hearth";
