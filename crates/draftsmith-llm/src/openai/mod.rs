pub mod client;

pub use client::OpenAIClient;
