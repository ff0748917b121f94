//! Numeric and relayed message formatting (§4.5).

use crate::constants::*;

/// `:<server-name> <code> <recipient> <message>`, CRLF is added by the
/// caller (`Client::queue_line`) at the point the line is queued.
pub fn numeric(server_name: &str, code: u16, recipient: &str, message: &str) -> String {
    format!(":{server_name} {code:03} {recipient} {message}")
}

/// `:<nick>!<user>@<host> <verb> <params>`, used for JOIN/PART/TOPIC/
/// KICK/INVITE/MODE/QUIT/PRIVMSG relays.
pub fn relayed(prefix: &str, verb: &str, params: &str) -> String {
    format!(":{prefix} {verb} {params}")
}

pub fn welcome(server_name: &str, nick: &str) -> String {
    numeric(
        server_name,
        RPL_WELCOME,
        nick,
        &format!(":Welcome to the IRC Network {nick}"),
    )
}

pub fn err_need_more_params(server_name: &str, recipient: &str, command: &str) -> String {
    numeric(
        server_name,
        ERR_NEEDMOREPARAMS,
        recipient,
        &format!("{command} :Not enough parameters"),
    )
}

pub fn err_already_registered(server_name: &str, recipient: &str) -> String {
    numeric(
        server_name,
        ERR_ALREADYREGISTRED,
        recipient,
        ":You may not reregister",
    )
}

pub fn err_passwd_mismatch(server_name: &str, recipient: &str) -> String {
    numeric(server_name, ERR_PASSWDMISMATCH, recipient, ":Password incorrect")
}

pub fn err_not_registered(server_name: &str, recipient: &str, hint_password: bool) -> String {
    let msg = if hint_password {
        ":You have not registered (PASSWORD required)"
    } else {
        ":You have not registered"
    };
    numeric(server_name, ERR_NOTREGISTERED, recipient, msg)
}

pub fn err_no_nickname_given(server_name: &str, recipient: &str) -> String {
    numeric(server_name, ERR_NONICKNAMEGIVEN, recipient, ":No nickname given")
}

pub fn err_nickname_in_use(server_name: &str, recipient: &str, nick: &str) -> String {
    numeric(
        server_name,
        ERR_NICKNAMEINUSE,
        recipient,
        &format!("{nick} :Nickname is already in use"),
    )
}

pub fn err_unknown_command(server_name: &str, recipient: &str, command: &str) -> String {
    numeric(
        server_name,
        ERR_UNKNOWNCOMMAND,
        recipient,
        &format!("{command} :Unknown command"),
    )
}

pub fn err_no_such_channel(server_name: &str, recipient: &str, channel: &str) -> String {
    numeric(server_name, ERR_NOSUCHCHANNEL, recipient, &format!("{channel} :No such channel"))
}

pub fn err_no_such_nick(server_name: &str, recipient: &str, target: &str) -> String {
    numeric(
        server_name,
        ERR_NOSUCHNICK,
        recipient,
        &format!("{target} :No such nick/channel"),
    )
}

pub fn err_cannot_send_to_chan(server_name: &str, recipient: &str, channel: &str) -> String {
    numeric(
        server_name,
        ERR_CANNOTSENDTOCHAN,
        recipient,
        &format!("{channel} :Cannot send to channel"),
    )
}

pub fn err_not_on_channel(server_name: &str, recipient: &str, channel: &str) -> String {
    numeric(
        server_name,
        ERR_NOTONCHANNEL,
        recipient,
        &format!("{channel} :You're not on that channel"),
    )
}

pub fn err_user_not_in_channel(server_name: &str, recipient: &str, target: &str, channel: &str) -> String {
    numeric(
        server_name,
        ERR_USERNOTINCHANNEL,
        recipient,
        &format!("{target} {channel} :They aren't on that channel"),
    )
}

pub fn err_user_on_channel(server_name: &str, recipient: &str, target: &str, channel: &str) -> String {
    numeric(
        server_name,
        ERR_USERONCHANNEL,
        recipient,
        &format!("{target} {channel} :is already on channel"),
    )
}

pub fn err_chan_o_priv_needed(server_name: &str, recipient: &str, channel: &str) -> String {
    numeric(
        server_name,
        ERR_CHANOPRIVSNEEDED,
        recipient,
        &format!("{channel} :You're not channel operator"),
    )
}

pub fn err_invite_only_chan(server_name: &str, recipient: &str, channel: &str) -> String {
    numeric(
        server_name,
        ERR_INVITEONLYCHAN,
        recipient,
        &format!("{channel} :Cannot join channel (+i)"),
    )
}

pub fn err_bad_channel_key(server_name: &str, recipient: &str, channel: &str) -> String {
    numeric(
        server_name,
        ERR_BADCHANNELKEY,
        recipient,
        &format!("{channel} :Cannot join channel (+k)"),
    )
}

pub fn err_channel_is_full(server_name: &str, recipient: &str, channel: &str) -> String {
    numeric(
        server_name,
        ERR_CHANNELISFULL,
        recipient,
        &format!("{channel} :Cannot join channel (+l)"),
    )
}

pub fn err_users_dont_match(server_name: &str, recipient: &str) -> String {
    numeric(
        server_name,
        ERR_USERSDONTMATCH,
        recipient,
        ":Users MODE is not supported",
    )
}

pub fn rpl_topic(server_name: &str, recipient: &str, channel: &str, topic: &str) -> String {
    numeric(server_name, RPL_TOPIC, recipient, &format!("{channel} :{topic}"))
}

pub fn rpl_no_topic(server_name: &str, recipient: &str, channel: &str) -> String {
    numeric(server_name, RPL_NOTOPIC, recipient, &format!("{channel} :No topic is set"))
}

pub fn rpl_inviting(server_name: &str, recipient: &str, channel: &str, target: &str) -> String {
    numeric(server_name, RPL_INVITING, recipient, &format!("{channel} {target}"))
}

pub fn rpl_names(server_name: &str, recipient: &str, channel: &str, names: &str) -> String {
    numeric(server_name, RPL_NAMREPLY, recipient, &format!("= {channel} :{names}"))
}

pub fn rpl_end_of_names(server_name: &str, recipient: &str, channel: &str) -> String {
    numeric(
        server_name,
        RPL_ENDOFNAMES,
        recipient,
        &format!("{channel} :End of /NAMES list"),
    )
}

pub fn rpl_channel_modes(server_name: &str, recipient: &str, channel: &str, modes: &str) -> String {
    numeric(server_name, RPL_CHANNELMODEIS, recipient, &format!("{channel} {modes}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_shape() {
        assert_eq!(
            welcome("irc.42.fr", "alice"),
            ":irc.42.fr 001 alice :Welcome to the IRC Network alice"
        );
    }

    #[test]
    fn not_registered_hints_password() {
        assert_eq!(
            err_not_registered("irc.42.fr", "*", true),
            ":irc.42.fr 451 * :You have not registered (PASSWORD required)"
        );
        assert_eq!(
            err_not_registered("irc.42.fr", "*", false),
            ":irc.42.fr 451 * :You have not registered"
        );
    }

    #[test]
    fn relayed_shape() {
        assert_eq!(
            relayed("alice!alice@127.0.0.1", "JOIN", ":#room"),
            ":alice!alice@127.0.0.1 JOIN :#room"
        );
    }
}
