//! Mail source adapters.

mod mock_inbox;

pub use mock_inbox::{MockInbox, MOCK_ATTACHMENT_CONTENT};
