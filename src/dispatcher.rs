//! Registration gate (§4.3) and the eleven command handlers (§4.4).
//!
//! Every handler here only ever queues outbound lines on the
//! `Directory`; none of them touch the transport or return a Rust
//! `Err` for a protocol-level failure (§7) — a command's only
//! observable failure mode is a queued numeric reply.

use crate::client::{ClientId, RegistrationState};
use crate::constants::*;
use crate::directory::Directory;
use crate::parser::Message;
use crate::replies;

/// What the event loop should do with the connection after a dispatch
/// round.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Disconnect,
}

const ALWAYS_ADMITTED: [&str; 4] = ["PASS", "NICK", "USER", "QUIT"];

pub fn dispatch(dir: &mut Directory, id: ClientId, msg: Message) -> Outcome {
    if msg.command.is_empty() {
        return Outcome::Continue;
    }

    if !ALWAYS_ADMITTED.contains(&msg.command.as_str()) {
        let registered = dir.client(id).is_some_and(|c| c.is_registered());
        if !registered {
            let recipient = dir.display_nick(id);
            dir.send_line(id, &replies::err_not_registered(&dir.server_name, &recipient, false));
            return Outcome::Continue;
        }
    }

    match msg.command.as_str() {
        "PASS" => cmd_pass(dir, id, &msg.args),
        "NICK" => cmd_nick(dir, id, &msg.args),
        "USER" => cmd_user(dir, id, &msg.args),
        "PRIVMSG" => cmd_privmsg(dir, id, &msg.args),
        "JOIN" => cmd_join(dir, id, &msg.args),
        "PART" => cmd_part(dir, id, &msg.args),
        "TOPIC" => cmd_topic(dir, id, &msg.args),
        "KICK" => cmd_kick(dir, id, &msg.args),
        "INVITE" => cmd_invite(dir, id, &msg.args),
        "MODE" => cmd_mode(dir, id, &msg.args),
        "QUIT" => {
            cmd_quit(dir, id, &msg.args);
            return Outcome::Disconnect;
        }
        other => {
            let recipient = dir.display_nick(id);
            dir.send_line(id, &replies::err_unknown_command(&dir.server_name, &recipient, other));
        }
    }
    Outcome::Continue
}

fn cmd_pass(dir: &mut Directory, id: ClientId, args: &[String]) {
    let recipient = dir.display_nick(id);
    if dir.client(id).is_some_and(|c| c.authenticated) {
        dir.send_line(id, &replies::err_already_registered(&dir.server_name, &recipient));
        return;
    }
    let Some(given) = args.first() else {
        dir.send_line(id, &replies::err_need_more_params(&dir.server_name, &recipient, "PASS"));
        return;
    };
    if *given == dir.password {
        let client = dir.client_mut(id).unwrap();
        client.authenticated = true;
        if client.registration == RegistrationState::PassNeeded {
            client.registration = RegistrationState::NickUserNeeded;
        }
    } else {
        dir.send_line(id, &replies::err_passwd_mismatch(&dir.server_name, &recipient));
    }
}

fn cmd_nick(dir: &mut Directory, id: ClientId, args: &[String]) {
    let recipient = dir.display_nick(id);
    if !dir.client(id).is_some_and(|c| c.authenticated) {
        dir.send_line(id, &replies::err_not_registered(&dir.server_name, &recipient, true));
        return;
    }
    let new_nick = args.first().map(String::as_str).unwrap_or("");
    if new_nick.is_empty() {
        dir.send_line(id, &replies::err_no_nickname_given(&dir.server_name, &recipient));
        return;
    }
    if dir.find_by_nick(new_nick).is_some() {
        dir.send_line(id, &replies::err_nickname_in_use(&dir.server_name, &recipient, new_nick));
        return;
    }

    let client = dir.client_mut(id).unwrap();
    client.nickname = new_nick.to_string();
    if client.maybe_complete_registration() {
        let nick = client.nickname.clone();
        dir.send_line(id, &replies::welcome(&dir.server_name, &nick));
    }
}

fn cmd_user(dir: &mut Directory, id: ClientId, args: &[String]) {
    let recipient = dir.display_nick(id);
    if !dir.client(id).is_some_and(|c| c.authenticated) {
        dir.send_line(id, &replies::err_not_registered(&dir.server_name, &recipient, true));
        return;
    }
    if dir.client(id).is_some_and(|c| c.is_registered()) {
        dir.send_line(id, &replies::err_already_registered(&dir.server_name, &recipient));
        return;
    }
    if args.len() < 4 {
        dir.send_line(id, &replies::err_need_more_params(&dir.server_name, &recipient, "USER"));
        return;
    }

    let client = dir.client_mut(id).unwrap();
    client.username = args[0].clone();
    if client.maybe_complete_registration() {
        let nick = client.nickname.clone();
        dir.send_line(id, &replies::welcome(&dir.server_name, &nick));
    }
}

fn cmd_privmsg(dir: &mut Directory, id: ClientId, args: &[String]) {
    let recipient = dir.display_nick(id);
    if args.len() < 2 {
        dir.send_line(id, &replies::err_need_more_params(&dir.server_name, &recipient, "PRIVMSG"));
        return;
    }
    let target = args[0].clone();
    let text = args[1].clone();
    let prefix = dir.client(id).unwrap().prefix();
    let line = replies::relayed(&prefix, "PRIVMSG", &format!("{target} :{text}"));

    if target.starts_with('#') {
        if dir.channel(&target).is_none() {
            dir.send_line(id, &replies::err_no_such_channel(&dir.server_name, &recipient, &target));
        } else if !dir.channel(&target).unwrap().is_member(id) {
            dir.send_line(id, &replies::err_cannot_send_to_chan(&dir.server_name, &recipient, &target));
        } else {
            dir.broadcast_to_channel_except(&target, id, &line);
        }
    } else if let Some(dest) = dir.find_by_nick(&target) {
        dir.send_line(dest, &line);
    } else {
        dir.send_line(id, &replies::err_no_such_nick(&dir.server_name, &recipient, &target));
    }
}

fn cmd_join(dir: &mut Directory, id: ClientId, args: &[String]) {
    let recipient = dir.display_nick(id);
    let Some(channel_name) = args.first().cloned() else {
        dir.send_line(id, &replies::err_need_more_params(&dir.server_name, &recipient, "JOIN"));
        return;
    };

    if !channel_name.starts_with('#') {
        dir.send_line(id, &replies::err_no_such_channel(&dir.server_name, &recipient, &channel_name));
        return;
    }

    let is_new = dir.channel(&channel_name).is_none();
    if is_new {
        dir.create_channel(channel_name.clone(), id);
    } else {
        let ch = dir.channel(&channel_name).unwrap();
        if ch.invite_only && !ch.is_invited(id) {
            dir.send_line(id, &replies::err_invite_only_chan(&dir.server_name, &recipient, &channel_name));
            return;
        }
        if ch.has_key() && args.get(1).map(String::as_str) != Some(ch.key.as_str()) {
            dir.send_line(id, &replies::err_bad_channel_key(&dir.server_name, &recipient, &channel_name));
            return;
        }
        if ch.has_limit() && ch.members.len() as u32 >= ch.user_limit {
            dir.send_line(id, &replies::err_channel_is_full(&dir.server_name, &recipient, &channel_name));
            return;
        }
        dir.channel_mut(&channel_name).unwrap().add_member(id);
    }

    dir.channel_mut(&channel_name).unwrap().remove_invite(id);

    let prefix = dir.client(id).unwrap().prefix();
    let join_line = replies::relayed(&prefix, "JOIN", &format!(":{channel_name}"));
    dir.broadcast_to_channel(&channel_name, &join_line);

    let ch = dir.channel(&channel_name).unwrap();
    if ch.topic.is_empty() {
        dir.send_line(id, &replies::rpl_no_topic(&dir.server_name, &recipient, &channel_name));
    } else {
        let topic = ch.topic.clone();
        dir.send_line(id, &replies::rpl_topic(&dir.server_name, &recipient, &channel_name, &topic));
    }

    let names = dir
        .channel(&channel_name)
        .unwrap()
        .names_list(|m| dir.nick(m).to_string());
    dir.send_line(id, &replies::rpl_names(&dir.server_name, &recipient, &channel_name, &names));
    dir.send_line(id, &replies::rpl_end_of_names(&dir.server_name, &recipient, &channel_name));
}

fn cmd_part(dir: &mut Directory, id: ClientId, args: &[String]) {
    let recipient = dir.display_nick(id);
    let Some(channel_name) = args.first().cloned() else {
        dir.send_line(id, &replies::err_need_more_params(&dir.server_name, &recipient, "PART"));
        return;
    };
    let reason = args.get(1).cloned().unwrap_or_else(|| DEFAULT_PART_REASON.to_string());

    if dir.channel(&channel_name).is_none() {
        dir.send_line(id, &replies::err_no_such_channel(&dir.server_name, &recipient, &channel_name));
        return;
    }
    if !dir.channel(&channel_name).unwrap().is_member(id) {
        dir.send_line(id, &replies::err_not_on_channel(&dir.server_name, &recipient, &channel_name));
        return;
    }

    let prefix = dir.client(id).unwrap().prefix();
    let line = replies::relayed(&prefix, "PART", &format!("{channel_name} :{reason}"));
    dir.broadcast_to_channel(&channel_name, &line);

    dir.channel_mut(&channel_name).unwrap().remove_member(id);
    dir.drop_channel_if_empty(&channel_name);
}

fn cmd_topic(dir: &mut Directory, id: ClientId, args: &[String]) {
    let recipient = dir.display_nick(id);
    let Some(channel_name) = args.first().cloned() else {
        dir.send_line(id, &replies::err_need_more_params(&dir.server_name, &recipient, "TOPIC"));
        return;
    };

    if dir.channel(&channel_name).is_none() {
        dir.send_line(id, &replies::err_no_such_channel(&dir.server_name, &recipient, &channel_name));
        return;
    }
    if !dir.channel(&channel_name).unwrap().is_member(id) {
        dir.send_line(id, &replies::err_not_on_channel(&dir.server_name, &recipient, &channel_name));
        return;
    }

    if args.len() == 1 {
        let ch = dir.channel(&channel_name).unwrap();
        if ch.topic.is_empty() {
            dir.send_line(id, &replies::rpl_no_topic(&dir.server_name, &recipient, &channel_name));
        } else {
            let topic = ch.topic.clone();
            dir.send_line(id, &replies::rpl_topic(&dir.server_name, &recipient, &channel_name, &topic));
        }
        return;
    }

    let ch = dir.channel(&channel_name).unwrap();
    if ch.topic_restricted && !ch.is_operator(id) {
        dir.send_line(id, &replies::err_chan_o_priv_needed(&dir.server_name, &recipient, &channel_name));
        return;
    }

    let new_topic = args[1].clone();
    dir.channel_mut(&channel_name).unwrap().topic = new_topic.clone();

    let prefix = dir.client(id).unwrap().prefix();
    let line = replies::relayed(&prefix, "TOPIC", &format!("{channel_name} :{new_topic}"));
    dir.broadcast_to_channel(&channel_name, &line);
}

fn cmd_kick(dir: &mut Directory, id: ClientId, args: &[String]) {
    let recipient = dir.display_nick(id);
    if args.len() < 2 {
        dir.send_line(id, &replies::err_need_more_params(&dir.server_name, &recipient, "KICK"));
        return;
    }
    let channel_name = args[0].clone();
    let target_nick = args[1].clone();
    let reason = args.get(2).cloned().unwrap_or_else(|| DEFAULT_KICK_REASON.to_string());

    if dir.channel(&channel_name).is_none() {
        dir.send_line(id, &replies::err_no_such_channel(&dir.server_name, &recipient, &channel_name));
        return;
    }
    if !dir.channel(&channel_name).unwrap().is_operator(id) {
        dir.send_line(id, &replies::err_chan_o_priv_needed(&dir.server_name, &recipient, &channel_name));
        return;
    }

    let target = dir.find_by_nick(&target_nick);
    let target_in_channel =
        target.is_some_and(|t| dir.channel(&channel_name).unwrap().is_member(t));
    if !target_in_channel {
        dir.send_line(
            id,
            &replies::err_user_not_in_channel(&dir.server_name, &recipient, &target_nick, &channel_name),
        );
        return;
    }
    let target = target.unwrap();

    let prefix = dir.client(id).unwrap().prefix();
    let line = replies::relayed(&prefix, "KICK", &format!("{channel_name} {target_nick} :{reason}"));
    dir.broadcast_to_channel(&channel_name, &line);

    dir.channel_mut(&channel_name).unwrap().remove_member(target);
    dir.drop_channel_if_empty(&channel_name);
}

fn cmd_invite(dir: &mut Directory, id: ClientId, args: &[String]) {
    let recipient = dir.display_nick(id);
    if args.len() < 2 {
        dir.send_line(id, &replies::err_need_more_params(&dir.server_name, &recipient, "INVITE"));
        return;
    }
    let target_nick = args[0].clone();
    let channel_name = args[1].clone();

    let Some(target) = dir.find_by_nick(&target_nick) else {
        dir.send_line(id, &replies::err_no_such_nick(&dir.server_name, &recipient, &target_nick));
        return;
    };

    if dir.channel(&channel_name).is_none() {
        dir.send_line(id, &replies::err_no_such_channel(&dir.server_name, &recipient, &channel_name));
        return;
    }
    let ch = dir.channel(&channel_name).unwrap();
    if ch.invite_only && !ch.is_operator(id) {
        dir.send_line(id, &replies::err_chan_o_priv_needed(&dir.server_name, &recipient, &channel_name));
        return;
    }
    if ch.is_member(target) {
        dir.send_line(
            id,
            &replies::err_user_on_channel(&dir.server_name, &recipient, &target_nick, &channel_name),
        );
        return;
    }

    dir.channel_mut(&channel_name).unwrap().add_invite(target);
    dir.send_line(id, &replies::rpl_inviting(&dir.server_name, &recipient, &channel_name, &target_nick));

    let prefix = dir.client(id).unwrap().prefix();
    let line = replies::relayed(&prefix, "INVITE", &format!("{target_nick} :{channel_name}"));
    dir.send_line(target, &line);
}

fn cmd_mode(dir: &mut Directory, id: ClientId, args: &[String]) {
    let recipient = dir.display_nick(id);
    let Some(target) = args.first().cloned() else {
        dir.send_line(id, &replies::err_need_more_params(&dir.server_name, &recipient, "MODE"));
        return;
    };

    if !target.starts_with('#') {
        dir.send_line(id, &replies::err_users_dont_match(&dir.server_name, &recipient));
        return;
    }

    if dir.channel(&target).is_none() {
        dir.send_line(id, &replies::err_no_such_channel(&dir.server_name, &recipient, &target));
        return;
    }

    if args.len() == 1 {
        let modes = dir.channel(&target).unwrap().modes_string();
        dir.send_line(id, &replies::rpl_channel_modes(&dir.server_name, &recipient, &target, &modes));
        return;
    }

    if !dir.channel(&target).unwrap().is_operator(id) {
        dir.send_line(id, &replies::err_chan_o_priv_needed(&dir.server_name, &recipient, &target));
        return;
    }

    let mode_str = args[1].clone();
    let mut add = true;
    let mut arg_idx = 2;
    // Every extra argument consumed while applying the modestring, in
    // order; echoed back in full (§9's corrected MODE broadcast).
    let mut consumed = Vec::new();

    for c in mode_str.chars() {
        match c {
            '+' => add = true,
            '-' => add = false,
            'i' => {
                dir.channel_mut(&target).unwrap().invite_only = add;
            }
            't' => {
                dir.channel_mut(&target).unwrap().topic_restricted = add;
            }
            'k' => {
                if add {
                    if let Some(key) = args.get(arg_idx) {
                        dir.channel_mut(&target).unwrap().key = key.clone();
                        consumed.push(key.clone());
                        arg_idx += 1;
                    }
                } else {
                    dir.channel_mut(&target).unwrap().key.clear();
                }
            }
            'o' => {
                if let Some(op_nick) = args.get(arg_idx) {
                    let op_nick = op_nick.clone();
                    arg_idx += 1;
                    consumed.push(op_nick.clone());
                    if let Some(op_id) = dir.find_by_nick(&op_nick) {
                        if dir.channel(&target).unwrap().is_member(op_id) {
                            if add {
                                dir.channel_mut(&target).unwrap().add_operator(op_id);
                            } else {
                                dir.channel_mut(&target).unwrap().remove_operator(op_id);
                            }
                        }
                    }
                }
            }
            'l' => {
                if add {
                    if let Some(n) = args.get(arg_idx) {
                        let limit: u32 = n.parse().unwrap_or(0);
                        dir.channel_mut(&target).unwrap().user_limit = limit;
                        consumed.push(n.clone());
                        arg_idx += 1;
                    }
                } else {
                    dir.channel_mut(&target).unwrap().user_limit = 0;
                }
            }
            _ => {}
        }
    }

    let nick = dir.client(id).unwrap().nickname.clone();
    let mut mode_msg = format!("{target} {mode_str}");
    for extra in &consumed {
        mode_msg.push(' ');
        mode_msg.push_str(extra);
    }
    let line = format!(":{nick} MODE {mode_msg}");
    dir.broadcast_to_channel(&target, &line);
}

fn cmd_quit(dir: &mut Directory, id: ClientId, args: &[String]) {
    let message = args.first().cloned().unwrap_or_else(|| DEFAULT_QUIT_MESSAGE.to_string());
    disconnect_client(dir, id, &message);
}

/// Broadcasts a QUIT to every channel the client belongs to and tears
/// down its membership. Used both for an explicit QUIT command and for
/// every other disconnect path (read error, hangup) per §9's redesign:
/// the reference implementation only notified peers on explicit QUIT.
pub fn disconnect_client(dir: &mut Directory, id: ClientId, message: &str) {
    let Some(client) = dir.client(id) else { return };
    let prefix = client.prefix();
    let line = replies::relayed(&prefix, "QUIT", &format!(":Quit: {message}"));

    for channel_name in dir.channels_of(id) {
        dir.broadcast_to_channel_except(&channel_name, id, &line);
    }
    dir.leave_all_channels(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::parser::parse_line;

    fn new_dir() -> Directory {
        Directory::new("irc.42.fr".into(), "secret".into())
    }

    fn register(dir: &mut Directory, id: ClientId, nick: &str) {
        dir.insert_client(id, Client::new("127.0.0.1".into()));
        dispatch(dir, id, parse_line("PASS secret"));
        dispatch(dir, id, parse_line(&format!("NICK {nick}")));
        dispatch(dir, id, parse_line(&format!("USER {nick} 0 * :{nick}")));
    }

    fn drain(dir: &mut Directory, id: ClientId) -> String {
        let buf = std::mem::take(&mut dir.client_mut(id).unwrap().out_buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn registration_happy_path() {
        let mut dir = new_dir();
        let a = mio::Token(1);
        register(&mut dir, a, "alice");
        let out = drain(&mut dir, a);
        assert!(out.ends_with("001 alice :Welcome to the IRC Network alice\r\n"));
        assert!(dir.client(a).unwrap().is_registered());
    }

    #[test]
    fn wrong_password_then_gate_rejects_nick() {
        let mut dir = new_dir();
        let a = mio::Token(1);
        dir.insert_client(a, Client::new("127.0.0.1".into()));
        dispatch(&mut dir, a, parse_line("PASS wrong"));
        dispatch(&mut dir, a, parse_line("NICK alice"));
        let out = drain(&mut dir, a);
        assert!(out.contains("464 * :Password incorrect"));
        assert!(out.contains("451 * :You have not registered (PASSWORD required)"));
    }

    #[test]
    fn unregistered_command_gate_rejects() {
        let mut dir = new_dir();
        let a = mio::Token(1);
        dir.insert_client(a, Client::new("127.0.0.1".into()));
        dispatch(&mut dir, a, parse_line("JOIN #room"));
        let out = drain(&mut dir, a);
        assert_eq!(out, ":irc.42.fr 451 * :You have not registered\r\n");
    }

    #[test]
    fn join_creates_channel_and_sends_names() {
        let mut dir = new_dir();
        let a = mio::Token(1);
        register(&mut dir, a, "alice");
        drain(&mut dir, a);
        dispatch(&mut dir, a, parse_line("JOIN #room"));
        let out = drain(&mut dir, a);
        assert!(out.contains(":alice!alice@127.0.0.1 JOIN :#room"));
        assert!(out.contains("331 alice #room :No topic is set"));
        assert!(out.contains("353 alice = #room :@alice"));
        assert!(out.contains("366 alice #room :End of /NAMES list"));
        assert_eq!(dir.channel("#room").unwrap().modes_string(), "+t");
    }

    #[test]
    fn invite_only_then_invite_then_join() {
        let mut dir = new_dir();
        let a = mio::Token(1);
        let b = mio::Token(2);
        register(&mut dir, a, "alice");
        register(&mut dir, b, "bob");
        drain(&mut dir, a);
        drain(&mut dir, b);

        dispatch(&mut dir, a, parse_line("JOIN #room"));
        drain(&mut dir, a);
        dispatch(&mut dir, a, parse_line("MODE #room +i"));
        drain(&mut dir, a);

        dispatch(&mut dir, b, parse_line("JOIN #room"));
        let out = drain(&mut dir, b);
        assert_eq!(out, ":irc.42.fr 473 bob #room :Cannot join channel (+i)\r\n");

        dispatch(&mut dir, a, parse_line("INVITE bob #room"));
        let a_out = drain(&mut dir, a);
        assert!(a_out.contains("341 alice #room bob"));
        let b_out = drain(&mut dir, b);
        assert!(b_out.contains(":alice!alice@127.0.0.1 INVITE bob :#room"));

        dispatch(&mut dir, b, parse_line("JOIN #room"));
        let out = drain(&mut dir, b);
        assert!(out.contains(":bob!bob@127.0.0.1 JOIN :#room"));
        assert!(!dir.channel("#room").unwrap().is_invited(b));
    }

    #[test]
    fn kick_by_operator_notifies_all_members() {
        let mut dir = new_dir();
        let a = mio::Token(1);
        let b = mio::Token(2);
        let c = mio::Token(3);
        register(&mut dir, a, "alice");
        register(&mut dir, b, "bob");
        register(&mut dir, c, "carol");
        for x in [a, b, c] {
            drain(&mut dir, x);
        }
        dispatch(&mut dir, a, parse_line("JOIN #room"));
        drain(&mut dir, a);
        dispatch(&mut dir, b, parse_line("JOIN #room"));
        drain(&mut dir, a);
        drain(&mut dir, b);
        dispatch(&mut dir, c, parse_line("JOIN #room"));
        drain(&mut dir, a);
        drain(&mut dir, b);
        drain(&mut dir, c);

        dispatch(&mut dir, a, parse_line("KICK #room bob :bye"));
        let a_out = drain(&mut dir, a);
        let b_out = drain(&mut dir, b);
        let c_out = drain(&mut dir, c);
        let expected = ":alice!alice@127.0.0.1 KICK #room bob :bye\r\n";
        assert_eq!(a_out, expected);
        assert_eq!(b_out, expected);
        assert_eq!(c_out, expected);
        assert!(!dir.channel("#room").unwrap().is_member(b));
    }

    #[test]
    fn privmsg_to_nonmember_rejected_and_silent() {
        let mut dir = new_dir();
        let a = mio::Token(1);
        let c = mio::Token(3);
        register(&mut dir, a, "alice");
        register(&mut dir, c, "carol");
        drain(&mut dir, a);
        drain(&mut dir, c);
        dispatch(&mut dir, a, parse_line("JOIN #room"));
        drain(&mut dir, a);

        dispatch(&mut dir, c, parse_line("PRIVMSG #room :hi"));
        let c_out = drain(&mut dir, c);
        assert_eq!(c_out, ":irc.42.fr 404 carol #room :Cannot send to channel\r\n");
        assert!(drain(&mut dir, a).is_empty());
    }

    #[test]
    fn mode_broadcast_echoes_all_consumed_args() {
        let mut dir = new_dir();
        let a = mio::Token(1);
        let b = mio::Token(2);
        register(&mut dir, a, "alice");
        register(&mut dir, b, "bob");
        drain(&mut dir, a);
        drain(&mut dir, b);
        dispatch(&mut dir, a, parse_line("JOIN #room"));
        drain(&mut dir, a);
        dispatch(&mut dir, b, parse_line("JOIN #room"));
        drain(&mut dir, a);
        drain(&mut dir, b);

        dispatch(&mut dir, a, parse_line("MODE #room +ol bob 5"));
        let out = drain(&mut dir, a);
        assert_eq!(out, ":alice MODE #room +ol bob 5\r\n");
        assert!(dir.channel("#room").unwrap().is_operator(b));
        assert_eq!(dir.channel("#room").unwrap().user_limit, 5);
    }

    #[test]
    fn quit_broadcasts_to_peers_and_cleans_up() {
        let mut dir = new_dir();
        let a = mio::Token(1);
        let b = mio::Token(2);
        register(&mut dir, a, "alice");
        register(&mut dir, b, "bob");
        drain(&mut dir, a);
        drain(&mut dir, b);
        dispatch(&mut dir, a, parse_line("JOIN #room"));
        drain(&mut dir, a);
        dispatch(&mut dir, b, parse_line("JOIN #room"));
        drain(&mut dir, a);
        drain(&mut dir, b);

        let outcome = dispatch(&mut dir, a, parse_line("QUIT :bye"));
        assert_eq!(outcome, Outcome::Disconnect);
        let b_out = drain(&mut dir, b);
        assert_eq!(b_out, ":alice!alice@127.0.0.1 QUIT :Quit: bye\r\n");
        assert!(!dir.channel("#room").unwrap().is_member(a));
        assert!(dir.channel("#room").unwrap().is_member(b));
    }
}
