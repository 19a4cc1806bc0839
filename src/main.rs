use clap::{Parser, Subcommand};
use dotenv::dotenv;

use speaking_test_server::config::Config;
use speaking_test_server::constants::DEFAULT_API_PORT;
use speaking_test_server::serve;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Speaking test backend: scores uploaded audio via SpeechAce and stores part results"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_API_PORT)]
        port: u16,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Command::Serve { port } => {
            let config = Config::from_env()?;
            serve::serve(config, port)
        }
    }
}
