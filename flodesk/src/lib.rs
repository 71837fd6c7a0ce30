pub mod client;

pub use client::FlodeskClient;
