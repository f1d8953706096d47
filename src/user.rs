//! Session record wire format and the in-memory user object

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Serialized form of a session, stored as JSON at the session-identifier key
///
/// The remember flag is an explicit schema field rather than a reserved
/// entry inside the attribute mapping, so user attribute names can never
/// collide with it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Selects the long-lived TTL class for every refresh of this record
    #[serde(default)]
    pub remember: bool,

    /// The user's persisted attributes
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

/// In-memory user object owned by one in-flight request context
///
/// Populated exclusively by `touch`/`login`/`logout`; acquired from and
/// returned to a [`UserFactory`](crate::UserFactory) by the request
/// plumbing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionUser {
    session_id: String,
    is_login: bool,
    remember: bool,
    attributes: HashMap<String, Value>,
}

impl SessionUser {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identifier this user was resolved from or will be persisted under
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn set_session_id<S: Into<String>>(&mut self, id: S) {
        self.session_id = id.into();
    }

    pub fn is_login(&self) -> bool {
        self.is_login
    }

    pub fn set_login(&mut self, login: bool) {
        self.is_login = login;
    }

    /// Whether this user selected the long-lived TTL class
    pub fn remember(&self) -> bool {
        self.remember
    }

    pub fn set_remember(&mut self, remember: bool) {
        self.remember = remember;
    }

    /// Get a typed attribute value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.attributes
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set an attribute value
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            self.attributes.insert(key.to_string(), v);
        }
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Merge a mapping into the attributes, overwriting existing keys
    pub fn assign(&mut self, mapping: HashMap<String, Value>) {
        self.attributes.extend(mapping);
    }

    /// Build the serialized record for this user
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            remember: self.remember,
            attributes: self.attributes.clone(),
        }
    }

    /// Populate this user from a fetched record under the given identifier
    pub fn apply_record(&mut self, session_id: &str, record: SessionRecord) {
        self.session_id = session_id.to_string();
        self.remember = record.remember;
        self.assign(record.attributes);
        self.is_login = true;
    }

    /// Return the user to its pristine state for pool reuse
    pub fn reset(&mut self) {
        self.session_id.clear();
        self.is_login = false;
        self.remember = false;
        self.attributes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_round_trip() {
        let mut user = SessionUser::new();
        user.set("name", "alice");
        user.set("level", 3);
        user.set_remember(true);

        let json = serde_json::to_string(&user.to_record()).unwrap();
        let record: SessionRecord = serde_json::from_str(&json).unwrap();

        assert!(record.remember);
        assert_eq!(record.attributes.get("name"), Some(&json!("alice")));
        assert_eq!(record.attributes.get("level"), Some(&json!(3)));
        // The remember flag lives beside the mapping, never inside it
        assert!(!record.attributes.contains_key("remember"));
    }

    #[test]
    fn record_decode_tolerates_missing_fields() {
        let record: SessionRecord = serde_json::from_str("{}").unwrap();
        assert!(!record.remember);
        assert!(record.attributes.is_empty());
    }

    #[test]
    fn apply_record_marks_logged_in() {
        let mut record = SessionRecord::default();
        record.attributes.insert("name".into(), json!("bob"));

        let mut user = SessionUser::new();
        user.apply_record("sid-1", record);

        assert_eq!(user.session_id(), "sid-1");
        assert!(user.is_login());
        assert_eq!(user.get::<String>("name"), Some("bob".to_string()));
    }

    #[test]
    fn assign_overwrites_existing_keys() {
        let mut user = SessionUser::new();
        user.set("name", "alice");
        user.set("role", "admin");

        let mut incoming = HashMap::new();
        incoming.insert("name".to_string(), json!("carol"));
        user.assign(incoming);

        assert_eq!(user.get::<String>("name"), Some("carol".to_string()));
        assert_eq!(user.get::<String>("role"), Some("admin".to_string()));
    }

    #[test]
    fn reset_clears_everything() {
        let mut user = SessionUser::new();
        user.set_session_id("sid");
        user.set_login(true);
        user.set_remember(true);
        user.set("name", "alice");

        user.reset();
        assert_eq!(user, SessionUser::new());
    }
}
