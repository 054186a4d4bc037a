// Upstream chat completion API

mod client;

pub use client::OpenAiClient;
