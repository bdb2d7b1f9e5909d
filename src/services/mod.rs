pub mod credentials;
pub mod executor;
