use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub identity: IdentityConfig,
    #[serde(default)]
    pub signup: SignupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Supabase/GoTrue-compatible identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub url: String,
    pub service_role_key: String,
    pub anon_key: String,
    /// HS256 secret the provider signs access tokens with.
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupConfig {
    #[serde(default = "default_code_ttl_hours")]
    pub verification_code_ttl_hours: i64,
}

fn default_code_ttl_hours() -> i64 {
    24
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            verification_code_ttl_hours: default_code_ttl_hours(),
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 配置文件不存在时完全依赖环境变量
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_env()?,
            Err(e) => {
                return Err(format!("Unable to read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str)
            .map_err(|e| format!("Failed to parse config file: {e}").into())
    }

    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let database_url = get_env("DATABASE_URL")
            .ok_or("DATABASE_URL is not set and no config.toml was found")?;

        Ok(Config {
            server: ServerConfig {
                host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: get_env_parse("SERVER_PORT", 4000u16),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
            },
            identity: IdentityConfig {
                url: get_env("SUPABASE_URL").unwrap_or_default(),
                service_role_key: get_env("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
                anon_key: get_env("SUPABASE_ANON_KEY").unwrap_or_default(),
                jwt_secret: get_env("SUPABASE_JWT_SECRET").unwrap_or_default(),
            },
            signup: SignupConfig {
                verification_code_ttl_hours: get_env_parse(
                    "VERIFICATION_CODE_TTL_HOURS",
                    default_code_ttl_hours(),
                ),
            },
        })
    }

    /// Environment variables override file values.
    fn apply_env_overrides(&mut self) {
        if let Some(v) = get_env("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(p) = get_env("SERVER_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = p;
        }
        if let Some(v) = get_env("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(mc) = get_env("DB_MAX_CONNECTIONS").and_then(|v| v.parse().ok()) {
            self.database.max_connections = mc;
        }
        if let Some(v) = get_env("SUPABASE_URL") {
            self.identity.url = v;
        }
        if let Some(v) = get_env("SUPABASE_SERVICE_ROLE_KEY") {
            self.identity.service_role_key = v;
        }
        if let Some(v) = get_env("SUPABASE_ANON_KEY") {
            self.identity.anon_key = v;
        }
        if let Some(v) = get_env("SUPABASE_JWT_SECRET") {
            self.identity.jwt_secret = v;
        }
        if let Some(h) = get_env("VERIFICATION_CODE_TTL_HOURS").and_then(|v| v.parse().ok()) {
            self.signup.verification_code_ttl_hours = h;
        }
    }
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
