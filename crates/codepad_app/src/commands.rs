#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run,
    Clear,
    Example(String),
    Examples,
    Show,
    New,
    Open(String),
    Help,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str = "Commands: /run, /clear, /example <name>, /examples, /show, /new, /open <path>, /help, /quit\nOther lines are appended to the buffer.";

/// Parses a command line. Only lines whose first character is `/` are
/// commands; everything else (including `//` comments and indented lines)
/// returns `None` and belongs to the source buffer.
pub fn parse_command(input: &str) -> Option<Command> {
    if !input.starts_with('/') || input.starts_with("//") {
        return None;
    }
    let trimmed = input.trim_end();

    let (command, argument) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    let parsed = match command {
        "/run" => Command::Run,
        "/clear" => Command::Clear,
        "/example" => Command::Example(argument.to_string()),
        "/examples" => Command::Examples,
        "/show" => Command::Show,
        "/new" => Command::New,
        "/open" => Command::Open(argument.to_string()),
        "/help" => Command::Help,
        "/quit" => Command::Quit,
        _ => Command::Unknown(command.to_string()),
    };

    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_lines_are_not_commands() {
        assert_eq!(parse_command("x = 5;"), None);
        assert_eq!(parse_command("10 - 5 / 2;"), None);
        assert_eq!(parse_command("// Arithmetic operations"), None);
        assert_eq!(parse_command("   // indented comment"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn indented_slash_lines_are_source() {
        assert_eq!(parse_command("   /2;"), None);
        assert_eq!(parse_command("\t/run"), None);
        assert_eq!(parse_command("/run  "), Some(Command::Run));
    }

    #[test]
    fn arguments_are_trimmed() {
        assert_eq!(
            parse_command("/example   variables  "),
            Some(Command::Example("variables".to_string()))
        );
        assert_eq!(parse_command("/example"), Some(Command::Example(String::new())));
        assert_eq!(
            parse_command("/open ./prog file.pad"),
            Some(Command::Open("./prog file.pad".to_string()))
        );
    }

    #[test]
    fn unknown_commands_keep_their_name_only() {
        assert_eq!(
            parse_command("/nope extra args"),
            Some(Command::Unknown("/nope".to_string()))
        );
        assert_eq!(parse_command("/"), Some(Command::Unknown("/".to_string())));
    }
}
