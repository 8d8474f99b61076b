pub mod fetch;
pub mod http_client;
pub mod provider;
pub mod state;
pub mod stats;
pub mod theme;
