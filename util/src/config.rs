//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use chrono_tz::Tz;
use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    /// IANA timezone name used to decide what "today" means for the hostel.
    pub timezone: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
    pub reminder_concurrency: usize,
    pub default_reminder_time: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every key has a default so that tests and the seeder can run without a `.env`.
    /// `main` refuses to start in production with the development JWT secret.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "hostel-manager"),
            log_level: var_or("LOG_LEVEL", "api=info,services=info,db=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: var_or("DATABASE_PATH", "data/hostel.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 5000),
            jwt_secret: var_or("JWT_SECRET", DEV_JWT_SECRET),
            jwt_duration_minutes: parsed_or("JWT_DURATION_MINUTES", 60),
            timezone: var_or("HOSTEL_TIMEZONE", "UTC"),
            twilio_account_sid: var_or("TWILIO_ACCOUNT_SID", ""),
            twilio_auth_token: var_or("TWILIO_AUTH_TOKEN", ""),
            twilio_phone_number: var_or("TWILIO_PHONE_NUMBER", ""),
            reminder_concurrency: parsed_or("REMINDER_CONCURRENCY", 4usize).max(1),
            default_reminder_time: var_or("DEFAULT_REMINDER_TIME", "20:00:00"),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            if let Ok(mut guard) = lock.write() {
                *guard = AppConfig::from_env();
            }
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: u64) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value);
    }

    pub fn set_timezone(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.timezone = value.into());
    }

    pub fn set_twilio_credentials(
        sid: impl Into<String>,
        token: impl Into<String>,
        from: impl Into<String>,
    ) {
        AppConfig::set_field(|cfg| {
            cfg.twilio_account_sid = sid.into();
            cfg.twilio_auth_token = token.into();
            cfg.twilio_phone_number = from.into();
        });
    }
}

/// Secret used when `JWT_SECRET` is not provided. Rejected in production.
pub const DEV_JWT_SECRET: &str = "hostel-dev-secret";

// --- Free accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

/// Resolved hostel timezone. Unknown names fall back to UTC with a warning.
pub fn timezone() -> Tz {
    let name = AppConfig::global().timezone.clone();
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(timezone = %name, "Unknown HOSTEL_TIMEZONE; falling back to UTC");
            Tz::UTC
        }
    }
}

pub fn twilio_account_sid() -> String {
    AppConfig::global().twilio_account_sid.clone()
}

pub fn twilio_auth_token() -> String {
    AppConfig::global().twilio_auth_token.clone()
}

pub fn twilio_phone_number() -> String {
    AppConfig::global().twilio_phone_number.clone()
}

pub fn reminder_concurrency() -> usize {
    AppConfig::global().reminder_concurrency
}

pub fn default_reminder_time() -> String {
    AppConfig::global().default_reminder_time.clone()
}
