//! Session Management
//!
//! One session per interactive visit: the session owns the chat transcript
//! and nothing else. Sessions live only in memory for the process lifetime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::{Message, Transcript};

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat session owning its transcript
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: SessionId,

    /// Chat transcript (append-only)
    pub transcript: Transcript,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last activity timestamp
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session with an empty transcript
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            transcript: Transcript::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a session whose transcript opens with an assistant greeting
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.transcript = Transcript::with_greeting(greeting);
        session
    }

    /// Update the activity timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Message count
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Session store trait
pub trait SessionStore: Send + Sync {
    /// Save a session
    fn save(&self, session: &Session) -> crate::Result<()>;

    /// Load a session by ID
    fn load(&self, id: &SessionId) -> crate::Result<Option<Session>>;

    /// Delete a session
    fn delete(&self, id: &SessionId) -> crate::Result<()>;

    /// Atomically append one user/assistant exchange, creating the
    /// session (seeded with `greeting`) if it does not exist. Both turns
    /// land under a single store mutation, so concurrent exchanges on the
    /// same session interleave but never overwrite each other. Returns
    /// the updated session.
    fn append_exchange(
        &self,
        id: &SessionId,
        greeting: &str,
        user: Message,
        assistant: Message,
    ) -> crate::Result<Session>;
}

/// In-memory session store (sessions end with the process)
pub struct MemorySessionStore {
    sessions: std::sync::RwLock<std::collections::HashMap<SessionId, Session>>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: std::sync::RwLock::new(std::collections::HashMap::new()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> crate::Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| crate::AgentError::Session(e.to_string()))?;
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    fn load(&self, id: &SessionId) -> crate::Result<Option<Session>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| crate::AgentError::Session(e.to_string()))?;
        Ok(sessions.get(id).cloned())
    }

    fn delete(&self, id: &SessionId) -> crate::Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| crate::AgentError::Session(e.to_string()))?;
        sessions.remove(id);
        Ok(())
    }

    fn append_exchange(
        &self,
        id: &SessionId,
        greeting: &str,
        user: Message,
        assistant: Message,
    ) -> crate::Result<Session> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| crate::AgentError::Session(e.to_string()))?;
        let session = sessions.entry(id.clone()).or_insert_with(|| {
            let mut session = Session::with_greeting(greeting);
            session.id = id.clone();
            session
        });
        session.transcript.push(user);
        session.transcript.push(assistant);
        session.touch();
        Ok(session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[test]
    fn test_session_creation() {
        let session = Session::new();
        assert_eq!(session.message_count(), 0);
    }

    #[test]
    fn test_session_greeting() {
        let session = Session::with_greeting("Hello!");
        assert_eq!(session.message_count(), 1);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        let mut session = Session::with_greeting("Hi");
        session.transcript.push(Message::user("Question"));
        let id = session.id.clone();

        store.save(&session).unwrap();

        let loaded = store.load(&id).unwrap().unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.message_count(), 2);

        store.delete(&id).unwrap();
        assert!(store.load(&id).unwrap().is_none());
    }

    #[test]
    fn test_append_exchange_creates_session() {
        let store = MemorySessionStore::new();
        let id = SessionId::new();

        let session = store
            .append_exchange(&id, "Hello!", Message::user("Q"), Message::assistant("A"))
            .unwrap();

        assert_eq!(session.id, id);
        assert_eq!(session.message_count(), 3);
        assert_eq!(store.load(&id).unwrap().unwrap().message_count(), 3);
    }

    #[test]
    fn test_concurrent_exchanges_all_survive() {
        let store = std::sync::Arc::new(MemorySessionStore::new());
        let id = SessionId::new();

        let handles: Vec<_> = (0..2)
            .map(|i| {
                let store = store.clone();
                let id = id.clone();
                std::thread::spawn(move || {
                    store
                        .append_exchange(
                            &id,
                            "Hello!",
                            Message::user(format!("question {i}")),
                            Message::assistant(format!("answer {i}")),
                        )
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Greeting plus two complete exchanges; neither overwrote the other.
        let session = store.load(&id).unwrap().unwrap();
        assert_eq!(session.message_count(), 5);
    }
}
