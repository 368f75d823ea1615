use rentacar_store::QueueTransport;
use std::sync::Arc;

/// Process-scoped state: the queue transport is built once at startup and
/// shared across requests. No teardown; process exit releases it.
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<QueueTransport>,
}
