/// One interactive command, parsed from the first whitespace-separated
/// token of an input line. Single-letter and long forms are synonyms and
/// case does not matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    Skip,
    ShowId,
    Pause,
    Like,
    Text,
    Link,
    Dump,
    Exit,
    Help,
    Nop,
    Unknown(String),
}

impl PlayerCommand {
    pub fn parse(line: &str) -> Self {
        let token = match line.split_whitespace().next() {
            Some(token) => token,
            None => return PlayerCommand::Nop,
        };
        match token.to_ascii_lowercase().as_str() {
            "s" | "skip" => PlayerCommand::Skip,
            "i" | "id" => PlayerCommand::ShowId,
            "p" | "pause" => PlayerCommand::Pause,
            "l" | "like" => PlayerCommand::Like,
            "t" | "text" => PlayerCommand::Text,
            "k" | "link" => PlayerCommand::Link,
            "m" | "dump" => PlayerCommand::Dump,
            "x" | "exit" => PlayerCommand::Exit,
            "h" | "help" => PlayerCommand::Help,
            other => PlayerCommand::Unknown(other.to_string()),
        }
    }

    pub fn help() -> &'static str {
        "s: skip\ni: id\np: pause\nl: like\nt: text\nk: link\nm: dump\nx: exit\nh: help"
    }
}
