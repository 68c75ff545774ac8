// Line-oriented driver for scripting and front-ends that speak over pipes.
// One command per input line, one response line per command.
use deck_core::config::{BrowserConfig, BROWSER_ONLY_FLAGS};
use deck_core::core::navigator::NavState;
use deck_core::{logging, Deck, DeckSession, OrderMode, Side};
use log::{info, warn};
use std::io::{self, BufRead, Write};

fn main() {
    // Theme, click and compile belong to the interactive browser.
    let parsed = BrowserConfig::from_args_without(std::env::args().skip(1), BROWSER_ONLY_FLAGS)
        .and_then(|config| config.log_level().map(|level| (config, level)));
    let (config, level) = match parsed {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = logging::init_file_logger(&config.log_path, level) {
        eprintln!("WARNING: logging disabled: {}", e);
    }
    if let Err(e) = run(&config) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &BrowserConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- deck pipe starting ---");
    let deck = match &config.deck {
        Some(path) => Deck::load(path)?,
        None => Deck::builtin()?,
    };
    let mut session = DeckSession::new(deck, config.session_options());
    let mut announcer = config.announcer();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        info!("<- {:?}", input);
        let (command, arg) = match input.split_once(' ') {
            Some((command, arg)) => (command, arg),
            None => (input.as_str(), ""),
        };

        let response = match command {
            "QUERY" => {
                session.set_query(arg);
                summary(&session)
            }
            "CLEAR" => {
                session.clear_query();
                summary(&session)
            }
            "MODE" => match arg.parse::<OrderMode>() {
                Ok(mode) => {
                    session.set_mode(mode);
                    summary(&session)
                }
                Err(e) => format!("ERR {}", e),
            },
            "NEXT" => {
                session.next();
                current(&session)
            }
            "PREV" => {
                session.prev();
                current(&session)
            }
            "RANDOM" => {
                session.jump_random();
                current(&session)
            }
            "START" => {
                session.jump_to_start();
                current(&session)
            }
            "RESET" => {
                session.reset();
                current(&session)
            }
            "CURRENT" => current(&session),
            "COUNT" => format!("COUNT {} {}", session.match_count(), session.total_count()),
            "HINT" => format!("HINT {}", session.phonetic_hint(arg)),
            "SAY" => match arg.parse::<Side>() {
                Ok(side) => match session.pronounce(side) {
                    Some(request) => {
                        announcer.say(&request);
                        format!("SAY {} {}", request.lang, request.text)
                    }
                    None => "SAY NONE".to_string(),
                },
                Err(e) => format!("ERR {}", e),
            },
            "EXIT" => {
                info!("received EXIT");
                break;
            }
            _ => {
                warn!("unknown command {:?}", command);
                format!("ERR unknown command '{}'", command)
            }
        };
        info!("-> {:?}", response);
        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }
    announcer.hush();
    info!("shutting down");
    Ok(())
}

fn summary(session: &DeckSession) -> String {
    format!("MATCHES {} {} | {}", session.match_count(), session.mode(), current(session))
}

fn current(session: &DeckSession) -> String {
    match (session.state(), session.current_entry()) {
        (NavState::Positioned(cursor), Some(entry)) => format!(
            "CARD {} #{} {} = {} {}",
            cursor,
            entry.id,
            entry.source_text,
            entry.target_text,
            session.phonetic_hint(&entry.source_text)
        ),
        _ => "EMPTY".to_string(),
    }
}
