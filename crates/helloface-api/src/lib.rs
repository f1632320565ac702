// helloface-api: Async Rust client for the HelloFace recognition service

pub mod client;
pub mod error;
mod recognition;
mod system;
pub mod transport;
pub mod types;
mod users;

pub use client::FaceClient;
pub use error::Error;
pub use transport::TransportConfig;
