pub mod in_memory;
pub mod traits;

pub use in_memory::InMemorySessionStore;
pub use traits::{
    ChatSession, Message, Sender, SessionError, SessionStore, GREETING, NEW_SESSION_TITLE,
};
