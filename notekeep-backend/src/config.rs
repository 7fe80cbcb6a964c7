use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// If set, a bearer session for this user id is issued at startup and
    /// its token written to the log. Meant for local development; in
    /// production sessions come from the identity provider.
    pub const BOOTSTRAP_USER: &str = "NOTEKEEP_BOOTSTRAP_USER";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const DATABASE_URL: &str = "./.db/notekeep.db";
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub bootstrap_user: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var(env_vars::PORT)
                .unwrap_or_else(|_| defaults::PORT.to_string())
                .parse()
                .expect("PORT must be a valid number"),
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            bootstrap_user: env::var(env_vars::BOOTSTRAP_USER)
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }
}
