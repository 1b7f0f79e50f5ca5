pub mod cors;
pub mod error;
pub mod handler;
pub mod server;

use std::sync::Arc;

use crate::config::Config;
use crate::postnl::AddressProvider;

/// Router state shared by every request; nothing in here is mutated after startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn AddressProvider>,
}
