use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "arbolado")]
#[command(version, about = "Municipal urban-tree registry")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the registry API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}
