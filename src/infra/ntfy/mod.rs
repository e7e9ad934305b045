pub mod client;

pub use client::NtfyClient;
