//! The single-threaded, readiness-based event loop (§4.6, §5).
//!
//! Grounded in the teacher's `bin/irc_server.rs` loop shape, rebuilt on
//! `mio` instead of `tokio` — the spec's single-threaded, lock-free
//! requirement is a direct conflict with a task-per-connection async
//! runtime, not a detail to generalize (see DESIGN.md).

use std::collections::HashMap;
use std::io::{ErrorKind, Read, Write};

use log::{debug, error, info, warn};
use mio::net::{TcpListener, TcpStream};
use mio::{Events, Interest, Poll, Token};

use crate::client::{Client, ClientId};
use crate::config::Config;
use crate::constants::DISCONNECT_QUIT_MESSAGE;
use crate::directory::Directory;
use crate::dispatcher::{self, Outcome};
use crate::errors::ServerError;
use crate::framer::extract_lines;
use crate::parser::parse_line;

const LISTENER_TOKEN: Token = Token(0);

pub struct Server {
    config: Config,
    poll: Poll,
    listener: TcpListener,
    streams: HashMap<ClientId, TcpStream>,
    directory: Directory,
    next_token: usize,
}

impl Server {
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        let addr = format!("0.0.0.0:{}", config.port);
        let std_listener = std::net::TcpListener::bind(&addr).map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
        std_listener.set_nonblocking(true).map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
        let mut listener = TcpListener::from_std(std_listener);

        let poll = Poll::new().map_err(ServerError::PollRegister)?;
        poll.registry()
            .register(&mut listener, LISTENER_TOKEN, Interest::READABLE)
            .map_err(ServerError::PollRegister)?;

        info!("listening on {addr}");

        let directory = Directory::new(config.server_name.clone(), config.password.clone());

        Ok(Server {
            config,
            poll,
            listener,
            streams: HashMap::new(),
            directory,
            next_token: 1,
        })
    }

    pub fn run(mut self) -> Result<(), ServerError> {
        let mut events = Events::with_capacity(1024);
        loop {
            self.poll.poll(&mut events, None).map_err(ServerError::PollWait)?;

            for event in events.iter() {
                if event.token() == LISTENER_TOKEN {
                    self.accept_all();
                    continue;
                }

                let id = event.token();
                if event.is_readable() {
                    self.handle_readable(id);
                } else if event.is_error() {
                    self.disconnect(id, DISCONNECT_QUIT_MESSAGE);
                }
            }

            self.flush_all();
        }
    }

    /// mio's readiness notifications are edge-triggered: a single
    /// `accept()` per wakeup would silently strand connections still
    /// queued behind the one just taken, so this drains the accept
    /// queue until it reports would-block.
    fn accept_all(&mut self) {
        loop {
            match self.listener.accept() {
                Ok((mut stream, addr)) => {
                    let id = Token(self.next_token);
                    self.next_token += 1;

                    if let Err(e) = self.poll.registry().register(&mut stream, id, Interest::READABLE) {
                        error!("failed to register accepted connection: {e}");
                        continue;
                    }

                    let hostname = addr.ip().to_string();
                    info!("accepted connection from {hostname} as {id:?}");
                    self.directory.insert_client(id, Client::new(hostname));
                    self.streams.insert(id, stream);
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    error!("accept() failed: {e}");
                    break;
                }
            }
        }
    }

    fn handle_readable(&mut self, id: ClientId) {
        let mut chunk = vec![0u8; self.config.read_chunk_size];
        loop {
            let read_result = match self.streams.get_mut(&id) {
                Some(stream) => stream.read(&mut chunk),
                None => return,
            };

            match read_result {
                Ok(0) => {
                    self.disconnect(id, DISCONNECT_QUIT_MESSAGE);
                    return;
                }
                Ok(n) => {
                    if let Some(client) = self.directory.client_mut(id) {
                        client.recv_buf.extend_from_slice(&chunk[..n]);
                    }
                    self.dispatch_complete_lines(id);
                    if n < chunk.len() {
                        // Short read: drained the socket for this wakeup.
                        return;
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => return,
                Err(e) => {
                    warn!("read error on {id:?}: {e}");
                    self.disconnect(id, DISCONNECT_QUIT_MESSAGE);
                    return;
                }
            }
        }
    }

    fn dispatch_complete_lines(&mut self, id: ClientId) {
        let lines = match self.directory.client_mut(id) {
            Some(client) => extract_lines(&mut client.recv_buf),
            None => return,
        };

        for line in lines {
            debug!("dispatch {id:?}: {line}");
            let msg = parse_line(&line);
            let outcome = dispatcher::dispatch(&mut self.directory, id, msg);
            if outcome == Outcome::Disconnect {
                self.close_connection(id);
                return;
            }
        }
    }

    /// Shared teardown for every disconnect path — explicit QUIT,
    /// read error, and hangup all funnel through here so peers are
    /// always notified (§9's corrected behavior).
    fn disconnect(&mut self, id: ClientId, reason: &str) {
        dispatcher::disconnect_client(&mut self.directory, id, reason);
        self.close_connection(id);
    }

    fn close_connection(&mut self, id: ClientId) {
        if let Some(mut stream) = self.streams.remove(&id) {
            let _ = self.poll.registry().deregister(&mut stream);
        }
        let nick = self.directory.nick(id).to_string();
        self.directory.remove_client(id);
        info!("disconnected {id:?} ({nick})");
    }

    fn flush_all(&mut self) {
        let ids: Vec<ClientId> = self.streams.keys().copied().collect();
        for id in ids {
            self.flush_one(id);
        }
    }

    fn flush_one(&mut self, id: ClientId) {
        let is_empty = match self.directory.client(id) {
            Some(client) => client.out_buf.is_empty(),
            None => return,
        };
        if is_empty {
            return;
        }

        let write_result = {
            let pending = match self.directory.client(id) {
                Some(client) => client.out_buf.clone(),
                None => return,
            };
            match self.streams.get_mut(&id) {
                Some(stream) => stream.write(&pending),
                None => return,
            }
        };

        match write_result {
            Ok(0) => {}
            Ok(n) => {
                if let Some(client) = self.directory.client_mut(id) {
                    client.out_buf.drain(0..n);
                }
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => {}
            Err(e) => {
                warn!("write error on {id:?}: {e}");
                self.disconnect(id, DISCONNECT_QUIT_MESSAGE);
            }
        }
    }
}
