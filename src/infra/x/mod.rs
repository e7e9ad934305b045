pub mod client;

pub use client::XTimelineClient;
