// CLI module for vision-ask

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vision-ask - ask an OpenAI vision model questions about an image
#[derive(Parser, Debug)]
#[command(name = "vision-ask", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.vision-ask/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP front-end
    Serve {
        /// Address to bind (overrides config)
        #[arg(long, env = "VISION_ASK_HOST")]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long, env = "VISION_ASK_PORT")]
        port: Option<u16>,

        /// Directory uploads are saved to (overrides config)
        #[arg(long)]
        data_dir: Option<String>,
    },

    /// Ask one question about an image file and print the answer
    Ask {
        /// Image file (jpg, jpeg or png)
        #[arg(long, short)]
        image: PathBuf,

        /// Question about the image
        #[arg(long, short)]
        question: String,
    },
}
