pub mod client;
pub mod protocol;
pub mod transport;
pub mod types;

#[cfg(test)]
mod client_test;
