//! Total command/argument tokenizer (§4.2).
//!
//! Hand-rolled rather than grammar-driven: unlike a strict RFC2812
//! parser this never fails. An unrecognized command is a dispatcher
//! concern, not a parse error.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub command: String,
    pub args: Vec<String>,
}

/// Splits one line (no trailing newline) into an uppercased command and
/// its positional arguments. A `:` that begins a token consumes the
/// remainder of the line verbatim, including spaces, as the final
/// argument.
pub fn parse_line(line: &str) -> Message {
    if let Some(trailing) = line.strip_prefix(':') {
        // Degenerate case: a line opening with ':' has no command, the
        // rest of the line is the lone trailing argument.
        return Message {
            command: String::new(),
            args: vec![trailing.to_string()],
        };
    }

    let mut parts = line.split(' ').peekable();

    let command = parts.next().unwrap_or("").to_ascii_uppercase();
    let mut args = Vec::new();

    while let Some(tok) = parts.next() {
        if tok.is_empty() {
            continue;
        }
        if let Some(rest) = tok.strip_prefix(':') {
            let mut trailing = rest.to_string();
            for more in parts {
                trailing.push(' ');
                trailing.push_str(more);
            }
            args.push(trailing);
            break;
        }
        args.push(tok.to_string());
    }

    Message { command, args }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_middles_and_trailing() {
        let m = parse_line("USER alice 0 * :Alice Liddell");
        assert_eq!(m.command, "USER");
        assert_eq!(m.args, vec!["alice", "0", "*", "Alice Liddell"]);
    }

    #[test]
    fn uppercases_command() {
        let m = parse_line("nick bob");
        assert_eq!(m.command, "NICK");
        assert_eq!(m.args, vec!["bob"]);
    }

    #[test]
    fn no_trailing_argument() {
        let m = parse_line("JOIN #room");
        assert_eq!(m.args, vec!["#room"]);
    }

    #[test]
    fn empty_line_yields_empty_command() {
        let m = parse_line("");
        assert_eq!(m.command, "");
        assert!(m.args.is_empty());
    }

    #[test]
    fn collapses_repeated_spaces_between_middles() {
        let m = parse_line("JOIN  #room");
        assert_eq!(m.args, vec!["#room"]);
    }

    #[test]
    fn never_fails_on_garbage() {
        let m = parse_line(":::::");
        assert_eq!(m.command, "");
        assert_eq!(m.args, vec!["::::"]);
    }

    #[test]
    fn leading_colon_with_no_command_is_degenerate() {
        let m = parse_line(": just text");
        assert_eq!(m.command, "");
        assert_eq!(m.args, vec![" just text"]);
    }
}
