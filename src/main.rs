use clap::Parser;
use flexi_logger::{Duplicate, Logger};
use log::error;

use ircd::config::{Args, Config};
use ircd::errors::ServerError;
use ircd::server::Server;

fn main() {
    Logger::try_with_str("info")
        .and_then(|logger| {
            logger
                .log_to_stderr()
                .duplicate_to_stderr(Duplicate::All)
                .start()
        })
        .ok();

    if let Err(e) = run() {
        error!("fatal: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ServerError> {
    let args = Args::parse();
    let config = Config::load(args)?;
    let server = Server::bind(config)?;
    server.run()
}
