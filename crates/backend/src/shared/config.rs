use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

/// Конфигурация, встроенная в бинарник
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[server]
port = 3000
"#;

/// Загрузка config.toml.
///
/// Сначала ищется рядом с исполняемым файлом, иначе берется встроенная конфигурация.
pub fn load_config() -> anyhow::Result<Config> {
    if let Some(exe_dir) = exe_dir() {
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return parse_config(&contents);
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Путь к файлу БД; относительный путь считается от каталога исполняемого файла
pub fn get_database_path(config: &Config) -> PathBuf {
    resolve_path(&config.database.path, exe_dir().as_deref())
}

fn resolve_path(path: &str, base: Option<&Path>) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }
    match base {
        Some(dir) => dir.join(candidate),
        None => PathBuf::from(path),
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_server_section_is_optional() {
        let config = parse_config("[database]\npath = \"data/app.db\"\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "data/app.db");
    }

    #[test]
    fn test_custom_port() {
        let config =
            parse_config("[database]\npath = \"a.db\"\n[server]\nport = 8081\n").unwrap();
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_missing_database_section_is_an_error() {
        assert!(parse_config("[server]\nport = 1\n").is_err());
    }

    #[test]
    fn test_relative_path_resolves_against_base() {
        let base = Path::new("/opt/erp");
        assert_eq!(
            resolve_path("target/db/app.db", Some(base)),
            PathBuf::from("/opt/erp/target/db/app.db")
        );
        assert_eq!(resolve_path("app.db", None), PathBuf::from("app.db"));
    }

    #[test]
    fn test_absolute_path_is_kept() {
        let base = Path::new("/opt/erp");
        assert_eq!(
            resolve_path("/var/lib/erp/app.db", Some(base)),
            PathBuf::from("/var/lib/erp/app.db")
        );
    }
}
