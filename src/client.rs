//! Per-connection state: identity, registration phase, and buffering.

/// Identifies a connection. Backed by `mio::Token` so the directory can
/// use it directly as the poll registration key; removing a client from
/// the middle of an event batch never disturbs the iteration the way
/// index-based `pollfd` vectors would.
pub type ClientId = mio::Token;

/// A connection's progress through the registration gate (§4.3).
/// Transitions are monotonic in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    PassNeeded,
    NickUserNeeded,
    Registered,
}

/// One live TCP connection and everything the dispatcher needs to know
/// about it. Owns no transport handle directly; the event loop looks
/// the handle up by `mio::Token` and this struct only carries the data
/// the protocol cares about.
#[derive(Debug)]
pub struct Client {
    pub hostname: String,
    pub nickname: String,
    pub username: String,
    pub registration: RegistrationState,
    pub authenticated: bool,

    /// Bytes read from the socket but not yet split into complete lines.
    pub recv_buf: Vec<u8>,

    /// Formatted replies queued for this client, flushed to the socket
    /// by the event loop after a round of dispatch (§4.6). Decoupling
    /// writes this way lets the dispatcher be exercised without a real
    /// socket in unit tests.
    pub out_buf: Vec<u8>,
}

impl Client {
    pub fn new(hostname: String) -> Self {
        Client {
            hostname,
            nickname: String::new(),
            username: String::new(),
            registration: RegistrationState::PassNeeded,
            authenticated: false,
            recv_buf: Vec::new(),
            out_buf: Vec::new(),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registration == RegistrationState::Registered
    }

    /// The recipient field for a numeric reply: the nickname, or the
    /// conventional placeholder before one has been chosen.
    pub fn display_nick(&self) -> &str {
        if self.nickname.is_empty() {
            crate::constants::NO_NICK_PLACEHOLDER
        } else {
            &self.nickname
        }
    }

    /// `nick!user@host`, used as the source of relayed messages.
    pub fn prefix(&self) -> String {
        format!("{}!{}@{}", self.nickname, self.username, self.hostname)
    }

    /// Queues a line for delivery; appends the CRLF terminator.
    pub fn queue_line(&mut self, line: &str) {
        self.out_buf.extend_from_slice(line.as_bytes());
        self.out_buf.extend_from_slice(b"\r\n");
    }

    /// Advances the registration phase once both nickname and username
    /// are set, per §4.3; sends nothing itself, the caller emits 001.
    pub fn maybe_complete_registration(&mut self) -> bool {
        if self.registration == RegistrationState::NickUserNeeded
            && !self.nickname.is_empty()
            && !self.username.is_empty()
        {
            self.registration = RegistrationState::Registered;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nick_falls_back_to_placeholder() {
        let c = Client::new("127.0.0.1".into());
        assert_eq!(c.display_nick(), "*");
    }

    #[test]
    fn registration_completes_only_once_both_set() {
        let mut c = Client::new("127.0.0.1".into());
        c.registration = RegistrationState::NickUserNeeded;
        c.nickname = "alice".into();
        assert!(!c.maybe_complete_registration());
        c.username = "alice".into();
        assert!(c.maybe_complete_registration());
        assert_eq!(c.registration, RegistrationState::Registered);
    }

    #[test]
    fn prefix_format() {
        let mut c = Client::new("127.0.0.1".into());
        c.nickname = "alice".into();
        c.username = "alice".into();
        assert_eq!(c.prefix(), "alice!alice@127.0.0.1");
    }
}
