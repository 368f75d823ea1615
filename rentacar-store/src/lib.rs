pub mod app_config;
pub mod database;
pub mod events;
pub mod mailer;

pub use app_config::Config;
pub use database::{DbClient, DocumentStore};
pub use events::{EventProducer, QueueTransport};
pub use mailer::{Mailer, SendGridClient};
