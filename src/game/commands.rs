//! Command parsing
//!
//! Free text in, one command out. The verb is the first whitespace token,
//! folded to lower case; the argument is the remainder of the line after
//! the first space, kept whole (item names may contain spaces).

/// A parsed player command. Argument-taking verbs carry `None` when the
/// argument was missing, so the dispatcher can answer with guidance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Quit,
    Look,
    Inventory,
    Talk,
    Attack,
    Status,
    Move(Option<String>),
    Take(Option<String>),
    Use(Option<String>),
    Equip(Option<String>),
    Unknown,
}

impl Command {
    pub fn parse(input: &str) -> Command {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let (verb, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((verb, rest)) => {
                let rest = rest.trim();
                (verb, (!rest.is_empty()).then(|| rest.to_string()))
            }
            None => (trimmed, None),
        };

        match verb.to_ascii_lowercase().as_str() {
            "quit" => Command::Quit,
            "look" => Command::Look,
            "inventory" | "inv" => Command::Inventory,
            "talk" => Command::Talk,
            "attack" => Command::Attack,
            "status" => Command::Status,
            "move" => Command::Move(arg),
            "take" | "pickup" => Command::Take(arg),
            // "pick up <item>" arrives as verb "pick", arg "up <item>".
            "pick" => Command::Take(strip_up(arg)),
            "use" => Command::Use(arg),
            "equip" => Command::Equip(arg),
            _ => Command::Unknown,
        }
    }
}

fn strip_up(arg: Option<String>) -> Option<String> {
    let arg = arg?;
    if arg.eq_ignore_ascii_case("up") {
        return None;
    }
    match arg.split_once(char::is_whitespace) {
        Some((first, rest)) if first.eq_ignore_ascii_case("up") => {
            let rest = rest.trim();
            (!rest.is_empty()).then(|| rest.to_string())
        }
        _ => Some(arg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_fold_case() {
        assert_eq!(Command::parse("QUIT"), Command::Quit);
        assert_eq!(Command::parse("Attack"), Command::Attack);
        assert_eq!(Command::parse("  look  "), Command::Look);
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn arguments_keep_their_spaces() {
        assert_eq!(
            Command::parse("take ancient key"),
            Command::Take(Some("ancient key".into()))
        );
        assert_eq!(
            Command::parse("use Gold Pouch"),
            Command::Use(Some("Gold Pouch".into()))
        );
    }

    #[test]
    fn missing_arguments_are_flagged_not_rejected() {
        assert_eq!(Command::parse("move"), Command::Move(None));
        assert_eq!(Command::parse("take"), Command::Take(None));
        assert_eq!(Command::parse("use "), Command::Use(None));
        assert_eq!(Command::parse("equip"), Command::Equip(None));
    }

    #[test]
    fn pick_up_aliases_take() {
        assert_eq!(
            Command::parse("pick up dagger"),
            Command::Take(Some("dagger".into()))
        );
        assert_eq!(
            Command::parse("pickup dagger"),
            Command::Take(Some("dagger".into()))
        );
        assert_eq!(Command::parse("pick up"), Command::Take(None));
        assert_eq!(
            Command::parse("pick dagger"),
            Command::Take(Some("dagger".into()))
        );
    }

    #[test]
    fn unknown_verbs_fall_through() {
        assert_eq!(Command::parse("dance"), Command::Unknown);
        assert_eq!(Command::parse("north"), Command::Unknown);
    }
}
