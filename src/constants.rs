//! Numeric reply codes and default configuration values.
//!
//! Bodies are cross-checked against the reference command handlers; the
//! three-digit code and the trailing-message text must match exactly for
//! a standard IRC client to render them sensibly.

pub const RPL_WELCOME: u16 = 1;
pub const RPL_NOTOPIC: u16 = 331;
pub const RPL_TOPIC: u16 = 332;
pub const RPL_INVITING: u16 = 341;
pub const RPL_NAMREPLY: u16 = 353;
pub const RPL_ENDOFNAMES: u16 = 366;
pub const RPL_CHANNELMODEIS: u16 = 324;

pub const ERR_NOSUCHNICK: u16 = 401;
pub const ERR_NOSUCHCHANNEL: u16 = 403;
pub const ERR_CANNOTSENDTOCHAN: u16 = 404;
pub const ERR_UNKNOWNCOMMAND: u16 = 421;
pub const ERR_NONICKNAMEGIVEN: u16 = 431;
pub const ERR_NICKNAMEINUSE: u16 = 433;
pub const ERR_USERNOTINCHANNEL: u16 = 441;
pub const ERR_NOTONCHANNEL: u16 = 442;
pub const ERR_USERONCHANNEL: u16 = 443;
pub const ERR_NOTREGISTERED: u16 = 451;
pub const ERR_NEEDMOREPARAMS: u16 = 461;
pub const ERR_ALREADYREGISTRED: u16 = 462;
pub const ERR_PASSWDMISMATCH: u16 = 464;
pub const ERR_CHANNELISFULL: u16 = 471;
pub const ERR_INVITEONLYCHAN: u16 = 473;
pub const ERR_BADCHANNELKEY: u16 = 475;
pub const ERR_CHANOPRIVSNEEDED: u16 = 482;
pub const ERR_USERSDONTMATCH: u16 = 502;

/// Default source used in numeric replies; overridable via config (§10.3).
pub const DEFAULT_SERVER_NAME: &str = "irc.42.fr";

/// Default per-read buffer size, matching the ">= 512 bytes" requirement.
pub const DEFAULT_READ_CHUNK: usize = 512;

pub const DEFAULT_QUIT_MESSAGE: &str = "Client Quit";
pub const DEFAULT_PART_REASON: &str = "Leaving";
pub const DEFAULT_KICK_REASON: &str = "Kicked";
pub const DISCONNECT_QUIT_MESSAGE: &str = "Connection reset";

/// The conventional placeholder for a numeric reply's recipient field
/// before the client has chosen a nickname.
pub const NO_NICK_PLACEHOLDER: &str = "*";
