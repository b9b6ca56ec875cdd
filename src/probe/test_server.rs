use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_rustls::TlsAcceptor;

use crate::error::{AppError, AppResult};

/// How long stalled connections are held open before the thread gives up.
const STALL_HOLD: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub(super) enum Behavior {
    Respond { status: u16, body: &'static str },
    StallHeaders,
    TruncatedBody { declared: usize, sent: &'static str },
    StallBody { declared: usize, sent: &'static str },
}

pub(super) struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawns a blocking HTTP/1.1 server on an ephemeral port.
pub(super) fn spawn_http_server(behavior: Behavior) -> AppResult<(String, ServerHandle)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    listener.set_nonblocking(true)?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, behavior));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Returns a URL whose port had a listener a moment ago and has none now.
pub(super) fn closed_port_url() -> AppResult<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

fn handle_client(mut stream: TcpStream, behavior: Behavior) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut buffer = [0u8; 1024];
    if stream.read(&mut buffer).is_err() {
        return;
    }

    let response = match behavior {
        Behavior::Respond { status, body } => format!(
            "HTTP/1.1 {} OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        ),
        Behavior::StallHeaders => {
            thread::sleep(STALL_HOLD);
            return;
        }
        Behavior::TruncatedBody { declared, sent } | Behavior::StallBody { declared, sent } => {
            format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                declared, sent
            )
        }
    };

    if stream.write_all(response.as_bytes()).is_err() || stream.flush().is_err() {
        return;
    }
    if matches!(behavior, Behavior::StallBody { .. }) {
        thread::sleep(STALL_HOLD);
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Pauses the TLS server inserts before each phase of a connection.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct TlsDelays {
    /// Before the handshake starts, after the TCP accept.
    pub handshake: Duration,
    /// After the request is read, before the status line is written.
    pub headers: Duration,
}

/// Spawns an HTTPS server presenting a freshly generated self-signed
/// certificate for 127.0.0.1. Must be called inside a tokio runtime.
pub(super) async fn spawn_self_signed_tls_server(
    body: &'static str,
    delays: TlsDelays,
) -> AppResult<(String, tokio::task::JoinHandle<()>)> {
    let certified = rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_owned()])
        .map_err(|err| AppError::validation(format!("Certificate generation failed: {}", err)))?;
    let cert_der = certified.cert.der().clone();
    let key_der = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(
        certified.key_pair.serialize_der(),
    ));

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let server_config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|err| AppError::validation(format!("TLS protocol setup failed: {}", err)))?
        .with_no_client_auth()
        .with_single_cert(vec![cert_der], key_der)
        .map_err(|err| AppError::validation(format!("TLS certificate setup failed: {}", err)))?;
    let acceptor = TlsAcceptor::from(Arc::new(server_config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            let response = response.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delays.handshake).await;
                let Ok(mut tls) = acceptor.accept(stream).await else {
                    return;
                };
                let mut buffer = [0u8; 1024];
                if tls.read(&mut buffer).await.is_err() {
                    return;
                }
                tokio::time::sleep(delays.headers).await;
                if tls.write_all(response.as_bytes()).await.is_err() {
                    return;
                }
                drop(tls.shutdown().await);
            });
        }
    });

    Ok((format!("https://{}", addr), handle))
}
