//! Headless mode for the Hack or Snooze client.
//!
//! A line-oriented protocol on stdin for scripting and automated testing.
//! Every line is a `#` command; output lines are tagged (`[STORIES]`,
//! `[OK]`, `[ERROR]`, ...) so they are easy to grep.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use hns_core::{AppState, FavoriteChange, NewStory, Story, StoryId};

/// A parsed headless command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { username: String, password: String },
    Signup {
        username: String,
        password: String,
        name: String,
    },
    Stories,
    Favorites,
    Mine,
    Submit(NewStory),
    Favorite(StoryId),
    Delete(StoryId),
    Logout,
    Refresh,
    Help,
    Quit,
}

const HELP: &[&str] = &[
    "  #login <username> <password>          - Log in",
    "  #signup <username> <password> <name>  - Create an account",
    "  #stories                              - List all stories",
    "  #favorites                            - List your favorites",
    "  #mine                                 - List your stories",
    "  #submit <author> | <title> | <url>    - Post a story",
    "  #fav <id>                             - Star or unstar a story",
    "  #delete <id>                          - Delete one of your stories",
    "  #refresh                              - Reload the story feed",
    "  #logout                               - Log out",
    "  #help                                 - Show this help",
    "  #quit                                 - Exit",
];

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let Some(rest) = line.trim().strip_prefix('#') else {
        return Err("Commands start with '#'. Type #help for help.".to_string());
    };
    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };
    let words: Vec<&str> = args.split_whitespace().collect();

    let command = match name {
        "login" => match words.as_slice() {
            [username, password] => Command::Login {
                username: username.to_string(),
                password: password.to_string(),
            },
            _ => return Err("Usage: #login <username> <password>".to_string()),
        },
        "signup" => match words.as_slice() {
            [username, password, name @ ..] if !name.is_empty() => Command::Signup {
                username: username.to_string(),
                password: password.to_string(),
                name: name.join(" "),
            },
            _ => return Err("Usage: #signup <username> <password> <name>".to_string()),
        },
        "stories" => Command::Stories,
        "favorites" => Command::Favorites,
        "mine" => Command::Mine,
        "submit" => {
            let parts: Vec<&str> = args.split('|').map(str::trim).collect();
            match parts.as_slice() {
                [author, title, url] if [author, title, url].iter().all(|p| !p.is_empty()) => {
                    Command::Submit(NewStory::new(*author, *title, *url))
                }
                _ => return Err("Usage: #submit <author> | <title> | <url>".to_string()),
            }
        }
        "fav" => match words.as_slice() {
            [id] => Command::Favorite(StoryId::from(*id)),
            _ => return Err("Usage: #fav <id>".to_string()),
        },
        "delete" => match words.as_slice() {
            [id] => Command::Delete(StoryId::from(*id)),
            _ => return Err("Usage: #delete <id>".to_string()),
        },
        "logout" => Command::Logout,
        "refresh" => Command::Refresh,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err("Unknown command. Type #help for help.".to_string()),
    };
    Ok(command)
}

/// Run the client in headless mode until `#quit` or end of input.
pub async fn run_headless(mut state: AppState) -> io::Result<()> {
    let mut stdout = io::stdout();

    writeln!(stdout, "=== Hack or Snooze Headless Mode ===")?;
    match state.current_user() {
        Some(user) => writeln!(stdout, "[USER] {}", user.username())?,
        None => writeln!(stdout, "[USER] not logged in")?,
    }
    writeln!(stdout, "[STORIES] {} loaded", state.story_list().len())?;
    writeln!(stdout, "Type #help for commands.")?;
    writeln!(stdout)?;
    stdout.flush()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let keep_going = match parse_command(&line) {
            Ok(command) => execute(&mut state, command, &mut stdout).await?,
            Err(message) => {
                writeln!(stdout, "[ERROR] {message}")?;
                true
            }
        };
        stdout.flush()?;

        if !keep_going {
            break;
        }
    }

    Ok(())
}

/// Execute one command, writing its output. Returns `false` on `#quit`.
pub async fn execute<W: Write>(
    state: &mut AppState,
    command: Command,
    out: &mut W,
) -> io::Result<bool> {
    let result = match command {
        Command::Quit => {
            writeln!(out, "Goodbye!")?;
            return Ok(false);
        }
        Command::Help => {
            writeln!(out, "[HELP]")?;
            for line in HELP {
                writeln!(out, "{line}")?;
            }
            return Ok(true);
        }
        Command::Stories => {
            print_stories(out, state, "STORIES", state.story_list().stories())?;
            return Ok(true);
        }
        Command::Favorites => {
            match state.current_user() {
                Some(user) => print_stories(out, state, "FAVORITES", user.favorites.stories())?,
                None => writeln!(out, "[ERROR] You need to log in first")?,
            }
            return Ok(true);
        }
        Command::Mine => {
            match state.current_user() {
                Some(user) => print_stories(out, state, "MINE", user.own_stories.stories())?,
                None => writeln!(out, "[ERROR] You need to log in first")?,
            }
            return Ok(true);
        }
        Command::Login { username, password } => state
            .login(&username, &password)
            .await
            .map(|user| format!("Logged in as {}", user.username())),
        Command::Signup {
            username,
            password,
            name,
        } => state
            .signup(&username, &password, &name)
            .await
            .map(|user| format!("Account created for {}", user.username())),
        Command::Submit(new_story) => state
            .submit_story(new_story)
            .await
            .map(|story| format!("Posted {} {}", story.story_id(), story.title())),
        Command::Favorite(story_id) => {
            state
                .toggle_favorite(&story_id)
                .await
                .map(|change| match change {
                    FavoriteChange::Added => format!("Added {story_id} to favorites"),
                    FavoriteChange::Removed => format!("Removed {story_id} from favorites"),
                })
        }
        Command::Delete(story_id) => state
            .delete_story(&story_id)
            .await
            .map(|()| format!("Deleted {story_id}")),
        Command::Logout => state.logout().await.map(|()| "Logged out".to_string()),
        Command::Refresh => state
            .refresh_stories()
            .await
            .map(|()| format!("Loaded {} stories", state.story_list().len())),
    };

    match result {
        Ok(message) => writeln!(out, "[OK] {message}")?,
        Err(e) => writeln!(out, "[ERROR] {e}")?,
    }
    Ok(true)
}

fn print_stories<W: Write>(
    out: &mut W,
    state: &AppState,
    tag: &str,
    stories: &[Arc<Story>],
) -> io::Result<()> {
    writeln!(out, "[{tag}] {}", stories.len())?;
    for story in stories {
        writeln!(out, "{}", describe(state, story))?;
    }
    Ok(())
}

/// One story as a line: star, id, title, host, author and poster.
fn describe(state: &AppState, story: &Story) -> String {
    let star = match state.is_logged_in() {
        true if state.is_favorite(story.story_id()) => "* ",
        true => "  ",
        false => "",
    };
    format!(
        "  {star}{}  {} ({}) by {}, posted by {}",
        story.story_id(),
        story.title(),
        story.host_name(),
        story.author(),
        story.username()
    )
}
