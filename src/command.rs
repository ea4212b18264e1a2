use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Find { keyword: String, category: Option<String> },
    List { category: Option<String> },
    Help,
    Version,
}

/// Value following `flag`, if both are present.
fn flag_value(args: &[&str], flag: &str) -> Option<String> {
    let pos = args.iter().position(|&a| a == flag)?;
    args.get(pos + 1).map(|v| v.to_string())
}

/// Parses one prompt line. The whole line is lower-cased first, so keywords
/// and category names are case-insensitive. A blank line is `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.to_lowercase();
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some(&name) = args.first() else {
        return Ok(None);
    };

    let command = match name {
        "help" => Command::Help,
        "v" | "-v" | "version" => Command::Version,
        "find" => {
            let keyword = flag_value(&args, "-k").ok_or(CommandError::KeywordRequired)?;
            Command::Find { keyword, category: flag_value(&args, "-t") }
        }
        "list" => Command::List { category: flag_value(&args, "-t") },
        other => return Err(CommandError::Invalid(other.to_string())),
    };
    Ok(Some(command))
}
