//! Server-global indices: clients by connection id, channels by name.

use std::collections::HashMap;
use std::time::Instant;

use crate::channel::Channel;
use crate::client::{Client, ClientId};

/// Owns every live `Client` and `Channel`. The event loop and the
/// dispatcher both work exclusively through this type; no other part
/// of the crate holds client or channel state directly.
pub struct Directory {
    pub server_name: String,
    pub password: String,
    pub started_at: Instant,
    clients: HashMap<ClientId, Client>,
    channels: HashMap<String, Channel>,
}

impl Directory {
    pub fn new(server_name: String, password: String) -> Self {
        Directory {
            server_name,
            password,
            started_at: Instant::now(),
            clients: HashMap::new(),
            channels: HashMap::new(),
        }
    }

    pub fn uptime(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    pub fn insert_client(&mut self, id: ClientId, client: Client) {
        self.clients.insert(id, client);
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    /// Linear scan by nickname (§9: a secondary index is a legal
    /// optimization, not required at this scale). Exact, case-sensitive
    /// comparison, matching `Server::findClientByNick` in the reference
    /// implementation — nothing in the spec calls for case-folding.
    pub fn find_by_nick(&self, nick: &str) -> Option<ClientId> {
        self.clients
            .iter()
            .find(|(_, c)| c.nickname == nick)
            .map(|(&id, _)| id)
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(name)
    }

    pub fn create_channel(&mut self, name: String, creator: ClientId) {
        let channel = Channel::new(name.clone(), creator);
        self.channels.insert(name, channel);
    }

    /// Deletes the channel if it is empty. Returns true if it was
    /// deleted.
    pub fn drop_channel_if_empty(&mut self, name: &str) -> bool {
        let empty = self.channels.get(name).is_some_and(Channel::is_empty);
        if empty {
            self.channels.remove(name);
        }
        empty
    }

    /// Every channel name the client currently belongs to, used by
    /// QUIT's cleanup (§4.4) and by the disconnect path (§4.6/§7).
    pub fn channels_of(&self, id: ClientId) -> Vec<String> {
        self.channels
            .iter()
            .filter(|(_, ch)| ch.is_member(id))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Removes the client from every channel it belongs to, deleting
    /// any channel that becomes empty as a result.
    pub fn leave_all_channels(&mut self, id: ClientId) -> Vec<String> {
        let names = self.channels_of(id);
        for name in &names {
            if let Some(ch) = self.channels.get_mut(name) {
                ch.remove_member(id);
            }
            self.drop_channel_if_empty(name);
        }
        names
    }

    pub fn remove_client(&mut self, id: ClientId) -> Option<Client> {
        self.clients.remove(&id)
    }

    pub fn nick(&self, id: ClientId) -> &str {
        self.clients.get(&id).map(|c| c.nickname.as_str()).unwrap_or("")
    }

    pub fn display_nick(&self, id: ClientId) -> String {
        self.clients
            .get(&id)
            .map(|c| c.display_nick().to_string())
            .unwrap_or_else(|| crate::constants::NO_NICK_PLACEHOLDER.to_string())
    }

    /// Queues a formatted line on a single client's outbound buffer.
    pub fn send_line(&mut self, id: ClientId, line: &str) {
        if let Some(client) = self.clients.get_mut(&id) {
            client.queue_line(line);
        }
    }

    /// Queues a line to every member of a channel.
    pub fn broadcast_to_channel(&mut self, channel: &str, line: &str) {
        let Some(members) = self.channels.get(channel).map(|c| c.members.clone()) else {
            return;
        };
        for id in members {
            self.send_line(id, line);
        }
    }

    /// Queues a line to every member of a channel except `except`.
    pub fn broadcast_to_channel_except(&mut self, channel: &str, except: ClientId, line: &str) {
        let Some(members) = self.channels.get(channel).map(|c| c.members.clone()) else {
            return;
        };
        for id in members {
            if id != except {
                self.send_line(id, line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: usize) -> ClientId {
        mio::Token(n)
    }

    #[test]
    fn find_by_nick_is_exact_and_case_sensitive() {
        let mut dir = Directory::new("irc.42.fr".into(), "secret".into());
        let mut c = Client::new("127.0.0.1".into());
        c.nickname = "Alice".into();
        dir.insert_client(id(1), c);
        assert!(dir.find_by_nick("alice").is_none());
        assert!(dir.find_by_nick("ALICE").is_none());
        assert_eq!(dir.find_by_nick("Alice"), Some(id(1)));
    }

    #[test]
    fn leave_all_channels_drops_empty_channels() {
        let mut dir = Directory::new("irc.42.fr".into(), "secret".into());
        dir.create_channel("#room".into(), id(1));
        assert!(dir.channel("#room").is_some());
        let left = dir.leave_all_channels(id(1));
        assert_eq!(left, vec!["#room".to_string()]);
        assert!(dir.channel("#room").is_none());
    }

    #[test]
    fn broadcast_except_skips_sender() {
        let mut dir = Directory::new("irc.42.fr".into(), "secret".into());
        dir.insert_client(id(1), Client::new("h".into()));
        dir.insert_client(id(2), Client::new("h".into()));
        dir.create_channel("#room".into(), id(1));
        dir.channel_mut("#room").unwrap().add_member(id(2));
        dir.broadcast_to_channel_except("#room", id(1), "hi");
        assert!(dir.client(id(1)).unwrap().out_buf.is_empty());
        assert_eq!(dir.client(id(2)).unwrap().out_buf, b"hi\r\n");
    }
}
