use thiserror::Error;

/// Fatal, loop-level failures. Anything a single client can trigger
/// (bad command, bad password, malformed MODE) is reported to that
/// client as a numeric reply and never surfaces here.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to register listener with the poller: {0}")]
    PollRegister(#[source] std::io::Error),

    #[error("poll wait failed: {0}")]
    PollWait(#[source] std::io::Error),

    #[error("failed to read configuration file '{path}': {source}")]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse toml: {0}")]
    Parse(#[from] toml::de::Error),
}
