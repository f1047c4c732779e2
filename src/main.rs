use std::io::{self, Write};

use dotenvy::dotenv;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use mergington_activities::{
    ActivityBoard, BoardEvent, Config, ConfirmUnregister, HttpActivitiesApi, ListArea,
};

#[tokio::main]
async fn main() {
    // Load the .env file
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Build the API client and the board
    let config = Config::from_env();
    let api = HttpActivitiesApi::new(&config.api_url);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut board = ActivityBoard::new(api, events_tx);

    println!("🎒 Mergington High School activities");
    println!("🔗 API at {}", config.api_url);

    board.load_catalog().await;
    print_board(&board);
    println!("Type 'help' for commands.");

    // 3. Command loop
    loop {
        let Some(line) = read_command() else { break };
        if line.is_empty() {
            continue;
        }

        let (command, rest) = split_command(&line);
        match command {
            "help" => {
                print_help();
                continue;
            }
            "list" | "ls" => {}
            "refresh" => board.load_catalog().await,
            "email" => board.set_signup_email(rest),
            "pick" => board.select_activity(rest),
            "signup" => {
                // Optional inline form fill: `signup <email> <activity>`
                if !rest.is_empty() {
                    match rest.split_once(char::is_whitespace) {
                        Some((email, activity)) => {
                            board.set_signup_email(email);
                            board.select_activity(activity);
                        }
                        None => board.set_signup_email(rest),
                    }
                }
                board.submit_signup().await;
            }
            "unregister" => match rest.split_once(char::is_whitespace) {
                Some((email, activity)) => {
                    let mut gate = StdinPrompt;
                    board
                        .submit_unregister(activity.trim(), email, &mut gate)
                        .await;
                }
                None => {
                    println!("Usage: unregister <email> <activity>");
                    continue;
                }
            },
            "quit" | "exit" => break,
            other => {
                println!("Unknown command '{}'. Type 'help' for commands.", other);
                continue;
            }
        }

        drain_events(&mut board, &mut events_rx);
        print_board(&board);
    }

    println!("👋 Bye");
}

/// Confirms removals on the terminal; anything but y/yes declines.
struct StdinPrompt;

impl ConfirmUnregister for StdinPrompt {
    fn confirm(&mut self, activity: &str, email: &str) -> bool {
        print!("Unregister {} from {}? [y/N] ", email, activity);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

fn read_command() -> Option<String> {
    print!("> ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (line, ""),
    }
}

fn drain_events(
    board: &mut ActivityBoard<HttpActivitiesApi>,
    events: &mut UnboundedReceiver<BoardEvent>,
) {
    while let Ok(event) = events.try_recv() {
        board.handle_event(event);
    }
}

fn print_board(board: &ActivityBoard<HttpActivitiesApi>) {
    println!();
    println!("=== Activities ===");
    print!("{}", board.list());

    if let ListArea::Loaded(view) = board.list() {
        if !view.options.is_empty() {
            let names: Vec<&str> = view.options.iter().map(|o| o.label.as_str()).collect();
            println!();
            println!("Sign up for: {}", names.join(", "));
        }
    }

    let form = board.form();
    if !form.email.is_empty() || !form.activity.is_empty() {
        println!("Form: email '{}', activity '{}'", form.email, form.activity);
    }
    if let Some(notice) = board.notice() {
        println!("[{}] {}", notice.kind.as_str(), notice.text);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list                           show the activity board");
    println!("  refresh                        reload activities from the server");
    println!("  email <address>                set the signup email");
    println!("  pick <activity>                choose the activity to sign up for");
    println!("  signup [email] [activity]      submit the signup form");
    println!("  unregister <email> <activity>  remove a participant (asks first)");
    println!("  quit                           leave");
}
