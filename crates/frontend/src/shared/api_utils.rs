//! Адреса backend API

/// Порт backend по умолчанию (см. `[server] port` в config.toml)
pub const BACKEND_PORT: u16 = 3000;

/// Базовый адрес API по текущему location: `http://host:3000`.
/// Пустая строка вне браузера, тогда запросы идут относительно страницы.
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_for(&protocol, &hostname, BACKEND_PORT)
}

fn base_for(protocol: &str, hostname: &str, port: u16) -> String {
    format!("{}//{}:{}", protocol, hostname, port)
}

/// Полный URL, например `api_url("/api/requisition")`
pub fn api_url(path: &str) -> String {
    join(&api_base(), path)
}

fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') || base.is_empty() {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_uses_backend_port() {
        assert_eq!(base_for("https:", "obra.local", 3000), "https://obra.local:3000");
    }

    #[test]
    fn test_join_adds_missing_slash() {
        assert_eq!(join("http://h:3000", "api/warehouse"), "http://h:3000/api/warehouse");
        assert_eq!(join("http://h:3000", "/api/warehouse"), "http://h:3000/api/warehouse");
        assert_eq!(join("", "/api/warehouse"), "/api/warehouse");
    }
}
