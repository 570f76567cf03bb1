pub mod credentials;
pub mod document_store;
pub mod forwarder;
pub mod projection;
pub mod webhook;

pub use document_store::{AppwriteStore, DocumentStore};
pub use forwarder::RecordForwarder;
pub use webhook::{HttpWebhook, WebhookSink};

#[cfg(test)]
pub mod testing;
