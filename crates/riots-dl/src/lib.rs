pub mod download;
pub mod error;
pub mod extract;
pub mod github;
pub mod http_client;
pub mod traits;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_server;
