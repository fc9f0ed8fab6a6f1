pub const INSPECTOR_ENDPOINT: &str = "https://api.avo.app/inspector/posthog/v1/track";

/// Names starting with this prefix are generated by the host platform and never forwarded.
pub const RESERVED_PREFIX: char = '$';

pub const DEFAULT_ENVIRONMENT: &str = "dev";
pub const DEFAULT_APP_NAME: &str = "PostHog";

// fixed partner-schema values
pub const APP_VERSION: &str = "1.0.0";
pub const LIB_VERSION: &str = "1.0.0";
pub const LIB_PLATFORM: &str = "node";
pub const SAMPLING_RATE: u32 = 1;

pub const SESSION_STARTED_EVENT_NAME: &str = "sessionStarted";
