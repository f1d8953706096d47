//! Session configuration and TTL policy

/// Where the session identifier travels on a request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierSource {
    /// Identifier read from a cookie; login/logout manage the outbound cookie
    Cookie,
    /// Identifier read from a query parameter; no cookie is ever written
    Token,
}

/// Configuration for the session store, resolved once at construction
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Cookie or query parameter name carrying the session identifier
    /// (default: "SILENCE_SESSION")
    pub session_key_name: String,

    /// How the identifier is transported (default: cookie)
    pub identifier_source: IdentifierSource,

    /// Short TTL in seconds for ordinary sessions (default: 1800)
    pub expire_time: u64,

    /// Long TTL in seconds for "remember me" sessions (default: 1209600 = 14 days)
    pub remember_time: u64,

    /// Backend host (default: "127.0.0.1")
    pub host: String,

    /// Backend port (default: 6379)
    pub port: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_key_name: "SILENCE_SESSION".to_string(),
            identifier_source: IdentifierSource::Cookie,
            expire_time: 1800,
            remember_time: 1209600,
            host: "127.0.0.1".to_string(),
            port: 6379,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cookie/query key name (default: "SILENCE_SESSION")
    pub fn with_session_key_name<S: Into<String>>(mut self, name: S) -> Self {
        self.session_key_name = name.into();
        self
    }

    /// Set the identifier transport (default: cookie)
    pub fn with_identifier_source(mut self, source: IdentifierSource) -> Self {
        self.identifier_source = source;
        self
    }

    /// Set the short TTL in seconds (default: 1800)
    pub fn with_expire_time(mut self, secs: u64) -> Self {
        self.expire_time = secs;
        self
    }

    /// Set the "remember me" TTL in seconds (default: 1209600)
    pub fn with_remember_time(mut self, secs: u64) -> Self {
        self.remember_time = secs;
        self
    }

    /// Set the backend host (default: "127.0.0.1")
    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    /// Set the backend port (default: 6379)
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// TTL class for a session: the long window when the remember flag is
    /// set, the short window otherwise
    pub fn ttl_for(&self, remember: bool) -> u64 {
        if remember {
            self.remember_time
        } else {
            self.expire_time
        }
    }

    /// Whether identifiers travel by cookie
    pub fn uses_cookie(&self) -> bool {
        self.identifier_source == IdentifierSource::Cookie
    }

    /// Connection URL for the Redis backend
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.session_key_name, "SILENCE_SESSION");
        assert_eq!(config.identifier_source, IdentifierSource::Cookie);
        assert_eq!(config.expire_time, 1800);
        assert_eq!(config.remember_time, 1209600);
        assert_eq!(config.redis_url(), "redis://127.0.0.1:6379/");
    }

    #[test]
    fn ttl_class_follows_remember_flag() {
        let config = SessionConfig::new()
            .with_expire_time(60)
            .with_remember_time(3600);
        assert_eq!(config.ttl_for(false), 60);
        assert_eq!(config.ttl_for(true), 3600);
    }
}
