//! Runtime configuration, layered with figment.
//!
//! Sources, later ones winning:
//! - built-in defaults (`Config::default()`)
//! - `kalakaar-setup.toml` in the working directory, or the file named by `KALAKAAR_CONFIG`
//! - `KALAKAAR_*` environment variables, nested keys split on `__`
//!   (e.g. `KALAKAAR_DATABASE__PASSWORD`)

use crate::error::SetupError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "KALAKAAR_";
pub const DEFAULT_CONFIG_FILE: &str = "kalakaar-setup.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub database: DatabaseConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub loglevel: String,
    /// Must be switched on by whoever launches the setup; see `SetupMode`.
    pub setup_mode: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            loglevel: "warn".to_string(),
            setup_mode: false,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    #[serde(deserialize_with = "string_like")]
    pub host: String,
    pub port: u16,
    /// Unix socket of the server. When unset and `host` is `localhost`, the
    /// usual socket locations are tried before falling back to TCP.
    pub socket: Option<PathBuf>,
    #[serde(deserialize_with = "string_like")]
    pub user: String,
    #[serde(deserialize_with = "string_like")]
    pub password: String,
    #[serde(deserialize_with = "string_like")]
    pub name: String,
    #[serde(deserialize_with = "string_like")]
    pub charset: String,
    #[serde(deserialize_with = "string_like")]
    pub collation: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            socket: None,
            user: "root".to_string(),
            password: String::new(),
            name: "kalakaar_db".to_string(),
            charset: "utf8mb4".to_string(),
            collation: "utf8mb4_unicode_ci".to_string(),
        }
    }
}

/// Where MySQL and MariaDB packages put the server socket.
pub const DEFAULT_SOCKETS: [&str; 3] = [
    "/var/run/mysqld/mysqld.sock",
    "/var/lib/mysql/mysql.sock",
    "/tmp/mysql.sock",
];

impl DatabaseConfig {
    /// Socket to connect through, if any. `localhost` means the local socket
    /// to MySQL clients, so it only goes over TCP when no socket is found.
    pub fn socket_path(&self) -> Option<PathBuf> {
        self.socket_among(&DEFAULT_SOCKETS.map(Path::new))
    }

    fn socket_among(&self, candidates: &[&Path]) -> Option<PathBuf> {
        if let Some(socket) = &self.socket {
            return Some(socket.clone());
        }
        if !self.host.eq_ignore_ascii_case("localhost") {
            return None;
        }
        candidates
            .iter()
            .find(|p| p.exists())
            .map(|p| p.to_path_buf())
    }
}

// Keep the password out of logs and panics.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("socket", &self.socket)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("charset", &self.charset)
            .field("collation", &self.collation)
            .finish()
    }
}

/// Environment values like `123456` arrive as numbers; keep them as text.
fn string_like<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringLike {
        Str(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match StringLike::deserialize(deserializer)? {
        StringLike::Str(s) => s,
        StringLike::Unsigned(n) => n.to_string(),
        StringLike::Signed(n) => n.to_string(),
        StringLike::Float(n) => n.to_string(),
        StringLike::Bool(b) => b.to_string(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Root that the upload/data/log directories are created under.
    pub base_dir: PathBuf,
    /// Relative paths are resolved against `base_dir`.
    pub schema_file: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            schema_file: PathBuf::from("database.sql"),
        }
    }
}

impl LayoutConfig {
    pub fn schema_path(&self) -> PathBuf {
        resolve(&self.base_dir, &self.schema_file)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl Config {
    pub fn figment() -> Figment {
        let file = std::env::var_os(format!("{ENV_PREFIX}CONFIG"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
    }

    pub fn load() -> Result<Self, SetupError> {
        Ok(Self::figment().extract()?)
    }
}
