use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Errors relating to the HTTP server itself.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Could not listen on the requested address.
    #[error("could not listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The static assets directory is not usable.
    #[error("assets directory '{}' is not a directory", .0.display())]
    Assets(PathBuf),
}
