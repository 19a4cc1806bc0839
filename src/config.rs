/// Runtime configuration for the server
///
/// Everything comes from the process environment (a `.env` file is loaded
/// by the binary before this runs). Validation is presence-only; bad values
/// surface later as connection or request failures.
#[derive(Debug, Clone)]
pub struct Config {
    /// SpeechAce API key, sent as a query parameter on scoring requests
    pub speechace_api_key: String,
    /// Database host, e.g. `localhost` or `db.internal:3307`
    pub db_host: String,
    /// Database user
    pub db_user: String,
    /// Database password
    pub db_password: String,
    /// Database name
    pub db_name: String,
}

impl Config {
    /// Read configuration from the environment
    ///
    /// Required variables: SPEECHACE_API_KEY, DB_HOST, DB_USER, DB_PASSWORD,
    /// DB_NAME. A missing variable is reported by name.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            speechace_api_key: require_env("SPEECHACE_API_KEY")?,
            db_host: require_env("DB_HOST")?,
            db_user: require_env("DB_USER")?,
            db_password: require_env("DB_PASSWORD")?,
            db_name: require_env("DB_NAME")?,
        })
    }

    /// Build a MySQL connection URL from the individual fields
    ///
    /// The password is percent-encoded so it can contain URL metacharacters.
    pub fn mysql_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}/{}",
            self.db_user,
            urlencoding::encode(&self.db_password),
            self.db_host,
            self.db_name
        )
    }
}

fn require_env(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("Missing required environment variable: {}", name))
}
