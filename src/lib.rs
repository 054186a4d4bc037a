// vision-ask - ask an OpenAI vision model questions about an image

pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod metrics;
pub mod openai;
pub mod server;
pub mod session;
pub mod upload;
pub mod utils;
pub mod vision;
