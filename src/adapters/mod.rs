//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - OpenAI / Azure OpenAI completions and a scripted mock
//! - `weather` - OpenWeather and a static provider
//! - `storage` - In-memory plan repository
//! - `mail` - Mock mailbox
//! - `document` - Document analyzers
//! - `http` - JSON API and pages

pub mod ai;
pub mod document;
pub mod http;
pub mod mail;
pub mod storage;
pub mod weather;
