//! Channel membership, operators, invites, topic and mode state.

use std::collections::HashSet;

use crate::client::ClientId;

/// One chat room. A channel exists iff `members` is non-empty; the
/// directory is responsible for deleting it once the last member
/// leaves.
#[derive(Debug)]
pub struct Channel {
    pub name: String,
    pub topic: String,
    pub key: String,
    pub user_limit: u32,
    pub invite_only: bool,
    pub topic_restricted: bool,
    pub members: Vec<ClientId>,
    pub operators: HashSet<ClientId>,
    pub invited: HashSet<ClientId>,
}

impl Channel {
    /// Creates a channel with `creator` as its sole member and operator,
    /// topic-restricted mode on and everything else off, matching the
    /// reference constructor.
    pub fn new(name: String, creator: ClientId) -> Self {
        let mut operators = HashSet::new();
        operators.insert(creator);
        Channel {
            name,
            topic: String::new(),
            key: String::new(),
            user_limit: 0,
            invite_only: false,
            topic_restricted: true,
            members: vec![creator],
            operators,
            invited: HashSet::new(),
        }
    }

    pub fn is_member(&self, id: ClientId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_operator(&self, id: ClientId) -> bool {
        self.operators.contains(&id)
    }

    pub fn is_invited(&self, id: ClientId) -> bool {
        self.invited.contains(&id)
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    pub fn has_limit(&self) -> bool {
        self.user_limit > 0
    }

    /// Adds a member as a plain (non-operator) participant. No-op if
    /// already present.
    pub fn add_member(&mut self, id: ClientId) {
        if !self.is_member(id) {
            self.members.push(id);
        }
    }

    pub fn add_operator(&mut self, id: ClientId) {
        if self.is_member(id) {
            self.operators.insert(id);
        }
    }

    pub fn remove_operator(&mut self, id: ClientId) {
        self.operators.remove(&id);
    }

    pub fn add_invite(&mut self, id: ClientId) {
        self.invited.insert(id);
    }

    pub fn remove_invite(&mut self, id: ClientId) {
        self.invited.remove(&id);
    }

    /// Removes a member along with any operator/invite status. The
    /// invariant `operators ⊆ members` holds before and after.
    pub fn remove_member(&mut self, id: ClientId) {
        self.remove_operator(id);
        self.remove_invite(id);
        self.members.retain(|&m| m != id);
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `+` followed by any of `itkl` currently in effect; `k` and `l`
    /// are derived from whether a key/limit is set, not independently
    /// stored flags. Empty string if nothing is set.
    pub fn modes_string(&self) -> String {
        let mut modes = String::new();
        if self.invite_only {
            modes.push('i');
        }
        if self.topic_restricted {
            modes.push('t');
        }
        if self.has_key() {
            modes.push('k');
        }
        if self.has_limit() {
            modes.push('l');
        }
        if modes.is_empty() {
            String::new()
        } else {
            format!("+{modes}")
        }
    }

    /// Member list for RPL_NAMREPLY (353), operators prefixed with '@',
    /// in membership order, space-separated.
    pub fn names_list(&self, nick_of: impl Fn(ClientId) -> String) -> String {
        self.members
            .iter()
            .map(|&id| {
                if self.is_operator(id) {
                    format!("@{}", nick_of(id))
                } else {
                    nick_of(id)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
