/// SpeechAce premium scoring endpoint
/// All scoring requests go to this URL with credentials in the query string
pub const SPEECHACE_SCORING_URL: &str = "https://api2.speechace.com/api/scoring/speech/v9/json";

/// Dialect sent with every scoring request
pub const SPEECHACE_DIALECT: &str = "en-us";

/// Client identifier sent with every scoring request
pub const SPEECHACE_USER_ID: &str = "speaking_test_web";

/// Default HTTP API port for the serve command
pub const DEFAULT_API_PORT: u16 = 8080;

/// Maximum accepted request body size for media uploads (250 MB)
/// Raised from the axum default, which is far too small for part videos
pub const MAX_UPLOAD_BYTES: usize = 250 * 1024 * 1024;
