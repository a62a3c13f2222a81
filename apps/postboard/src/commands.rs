//! Shell command parsing.

use thiserror::Error;

use postboard_core::domain::{PostId, ReactionKind, UserId};

pub const HELP: &str = "\
commands:
  fetch                             load posts from the backend
  list [user]                       list posts, optionally by one author
  show <id>                         show one post
  add <user> <title> | <content>    submit a new post
  edit <id> <title> | <content>     edit a post (leave a side empty to keep it)
  react <id> <reaction>             thumbsUp, hooray, heart, rocket or eyes
  status                            request status of each call
  help                              this text
  quit                              leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch,
    List { user: Option<UserId> },
    Show { id: PostId },
    Add {
        user: UserId,
        title: String,
        content: String,
    },
    Edit {
        id: PostId,
        title: Option<String>,
        content: Option<String>,
    },
    React { id: PostId, reaction: ReactionKind },
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("missing {0}")]
    Missing(&'static str),

    #[error("{0}")]
    InvalidReaction(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = split_word(line);
    let command = match word.to_ascii_lowercase().as_str() {
        "fetch" => Command::Fetch,
        "list" | "ls" => Command::List {
            user: non_empty(rest).map(UserId::from),
        },
        "show" => Command::Show {
            id: required(rest, "post id").map(PostId::from)?,
        },
        "add" => {
            let (user, rest) = split_word(rest);
            let user = required(user, "user")?;
            let (title, content) = split_bar(rest);
            Command::Add {
                user: UserId::from(user),
                title: required(title, "title")?.to_string(),
                content: content.unwrap_or_default().to_string(),
            }
        }
        "edit" => {
            let (id, rest) = split_word(rest);
            let id = required(id, "post id")?;
            let (title, content) = split_bar(rest);
            let title = non_empty(title).map(str::to_string);
            let content = content.and_then(non_empty).map(str::to_string);
            if title.is_none() && content.is_none() {
                return Err(ParseError::Missing("title or content"));
            }
            Command::Edit {
                id: PostId::from(id),
                title,
                content,
            }
        }
        "react" => {
            let (id, reaction) = split_word(rest);
            let id = required(id, "post id")?;
            let reaction = required(reaction, "reaction")?
                .parse()
                .map_err(ParseError::InvalidReaction)?;
            Command::React {
                id: PostId::from(id),
                reaction,
            }
        }
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn split_bar(s: &str) -> (&str, Option<&str>) {
    match s.split_once('|') {
        Some((left, right)) => (left.trim(), Some(right.trim())),
        None => (s.trim(), None),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

fn required<'a>(s: &'a str, what: &'static str) -> Result<&'a str, ParseError> {
    non_empty(s).ok_or(ParseError::Missing(what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("fetch"), Ok(Some(Command::Fetch)));
        assert_eq!(parse("STATUS"), Ok(Some(Command::Status)));
        assert_eq!(parse("q"), Ok(Some(Command::Quit)));
        assert_eq!(parse("list"), Ok(Some(Command::List { user: None })));
        assert_eq!(
            parse("list 2"),
            Ok(Some(Command::List {
                user: Some(UserId::from("2"))
            }))
        );
    }

    #[test]
    fn test_add_splits_title_and_content() {
        assert_eq!(
            parse("add 1 Hello world | It works"),
            Ok(Some(Command::Add {
                user: UserId::from("1"),
                title: "Hello world".to_string(),
                content: "It works".to_string(),
            }))
        );
        assert_eq!(parse("add 1"), Err(ParseError::Missing("title")));
        assert_eq!(parse("add"), Err(ParseError::Missing("user")));
    }

    #[test]
    fn test_edit_keeps_empty_side() {
        assert_eq!(
            parse("edit 7 | new body"),
            Ok(Some(Command::Edit {
                id: PostId::from("7"),
                title: None,
                content: Some("new body".to_string()),
            }))
        );
        assert_eq!(
            parse("edit 7 New title"),
            Ok(Some(Command::Edit {
                id: PostId::from("7"),
                title: Some("New title".to_string()),
                content: None,
            }))
        );
        assert_eq!(parse("edit 7 |"), Err(ParseError::Missing("title or content")));
    }

    #[test]
    fn test_react() {
        assert_eq!(
            parse("react 3 rocket"),
            Ok(Some(Command::React {
                id: PostId::from("3"),
                reaction: ReactionKind::Rocket,
            }))
        );
        assert!(matches!(
            parse("react 3 clap"),
            Err(ParseError::InvalidReaction(_))
        ));
        assert_eq!(parse("react 3"), Err(ParseError::Missing("reaction")));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            parse("delete 1"),
            Err(ParseError::Unknown("delete".to_string()))
        );
    }
}
