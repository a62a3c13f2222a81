//! Line-oriented shell over a [`PostsSession`].

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use postboard_core::PostsSession;
use postboard_core::domain::{Post, PostPatch, ReactionKind};
use postboard_core::store::RequestTracker;

use crate::commands::{self, Command, HELP};
use crate::error::AppResult;

const EXCERPT_CHARS: usize = 100;

/// Read commands from `input` until EOF or `quit`, writing results to `out`.
pub async fn run<R, W>(session: &mut PostsSession, input: R, mut out: W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "postboard ready, type 'help' for commands")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        execute(session, command, &mut out).await?;
    }

    Ok(())
}

async fn execute<W: Write>(
    session: &mut PostsSession,
    command: Command,
    out: &mut W,
) -> AppResult<()> {
    match command {
        Command::Fetch => match session.fetch_posts().await {
            Ok(()) => writeln!(out, "loaded {} posts", session.state().posts.len())?,
            Err(e) => writeln!(out, "error: {e}")?,
        },
        Command::List { user } => {
            let posts = match &user {
                Some(user) => session.posts_by_user(user),
                None => session.all_posts(),
            };
            if posts.is_empty() {
                writeln!(out, "no posts")?;
            }
            for post in posts.iter() {
                write_excerpt(out, post)?;
            }
        }
        Command::Show { id } => {
            let post = match session.post(&id) {
                Some(post) => Ok(post),
                None => session.fetch_post(&id).await,
            };
            match post {
                Ok(post) => write_post(out, &post)?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        Command::Add {
            user,
            title,
            content,
        } => match session.add_new_post(title, content, user).await {
            Ok(post) => writeln!(out, "created post {}", post.id)?,
            Err(e) => writeln!(out, "error: {e}")?,
        },
        Command::Edit { id, title, content } => {
            if session.post(&id).is_none() {
                writeln!(out, "no post {id}")?;
            } else {
                session.update_post(id.clone(), PostPatch { title, content });
                writeln!(out, "updated post {id}")?;
            }
        }
        Command::React { id, reaction } => {
            session.add_reaction(id.clone(), reaction);
            match session.post(&id) {
                Some(post) => {
                    writeln!(out, "{} {}", reaction.emoji(), post.reactions.get(reaction))?
                }
                None => writeln!(out, "no post {id}")?,
            }
        }
        Command::Status => {
            let state = session.state();
            write_tracker(out, "fetch", &state.fetch)?;
            write_tracker(out, "detail", &state.detail)?;
            write_tracker(out, "add", &state.add)?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

fn write_excerpt<W: Write>(out: &mut W, post: &Post) -> std::io::Result<()> {
    writeln!(out, "[{}] {} (by {})", post.id, post.title, post.user)?;
    writeln!(out, "    {}", post.excerpt(EXCERPT_CHARS))
}

fn write_post<W: Write>(out: &mut W, post: &Post) -> std::io::Result<()> {
    writeln!(out, "{}", post.title)?;
    writeln!(out, "by {} on {}", post.user, post.date.to_rfc3339())?;
    writeln!(out)?;
    writeln!(out, "{}", post.content)?;
    writeln!(out)?;
    let reactions: Vec<String> = ReactionKind::ALL
        .iter()
        .map(|kind| format!("{} {}", kind.emoji(), post.reactions.get(*kind)))
        .collect();
    writeln!(out, "{}", reactions.join("  "))
}

fn write_tracker<W: Write>(
    out: &mut W,
    name: &str,
    tracker: &RequestTracker,
) -> std::io::Result<()> {
    match tracker.error() {
        Some(error) => writeln!(out, "{name}: {} ({error})", tracker.status()),
        None => writeln!(out, "{name}: {}", tracker.status()),
    }
}
