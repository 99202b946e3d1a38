use anyhow::{Context, Result};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{IpAddr, SocketAddr};

use tokio::net::TcpListener;

const LISTEN_BACKLOG: i32 = 128;

pub const DEFAULT_PORT: u16 = 5002;

/// Creates a non-blocking TCP listener on `host:port` with `SO_REUSEADDR` set,
/// so a restarted service can rebind while old connections sit in TIME_WAIT.
pub fn create(host: IpAddr, port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::new(host, port);

    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
        .context("Failed to create TCP socket")?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into()).map_err(|e| {
        anyhow::anyhow!(
            "Failed to bind to {}: {}. Check whether another service is using the port.",
            addr,
            e
        )
    })?;
    socket
        .listen(LISTEN_BACKLOG)
        .with_context(|| format!("Failed to listen on {}", addr))?;

    // Convert to a tokio TcpListener
    socket.set_nonblocking(true)?;
    let listener = TcpListener::from_std(socket.into())?;

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn test_create_on_ephemeral_port() {
        let listener = create(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).unwrap();
        let local = listener.local_addr().unwrap();
        assert_eq!(local.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_ne!(local.port(), 0);
    }

    #[tokio::test]
    async fn test_create_fails_on_taken_port() {
        let first = std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let port = first.local_addr().unwrap().port();

        let err = create(IpAddr::V4(Ipv4Addr::LOCALHOST), port).unwrap_err();
        assert!(err.to_string().contains("Failed to bind"));
    }
}
