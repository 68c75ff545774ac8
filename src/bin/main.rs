use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use deck_core::config::{BrowserConfig, Theme};
use deck_core::render::{self, Frame};
use deck_core::speech::Announcer;
use deck_core::{logging, Deck, DeckSession, Side};
use log::{error, info};
use std::io::{self, stdout, Write};
use std::process::exit;

fn main() {
    let parsed = BrowserConfig::from_args(std::env::args().skip(1))
        .and_then(|config| config.log_level().map(|level| (config, level)));
    let (config, level) = match parsed {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            eprintln!(
                "Usage: deck_browser [--config FILE] [--deck FILE] [--theme light|dark] [--mode alpha|shuffle] \
                 [--seed N] [--no-click] [--no-speech] [--compile OUT.bin] [--log FILE]"
            );
            exit(1);
        }
    };
    if let Err(e) = logging::init_file_logger(&config.log_path, level) {
        eprintln!("WARNING: logging disabled: {}", e);
    }

    if let Err(e) = run(config) {
        error!("fatal: {}", e);
        eprintln!("ERROR: {}", e);
        exit(1);
    }
}

fn run(config: BrowserConfig) -> Result<(), Box<dyn std::error::Error>> {
    let deck = match &config.deck {
        Some(path) => Deck::load(path)?,
        None => Deck::builtin()?,
    };

    if let Some(out) = &config.compile {
        deck.compile_to(out)?;
        println!("Compiled {} entries to '{}'", deck.len(), out.display());
        return Ok(());
    }

    info!("starting browser with {} entries", deck.len());
    let session = DeckSession::new(deck, config.session_options());
    let announcer = config.announcer();

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, cursor::Hide)?;
    let result = App::new(session, announcer, &config).run(&mut out);
    // Restore the terminal even when the loop failed.
    let _ = execute!(out, cursor::Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    result.map_err(Into::into)
}

struct App<'a> {
    session: DeckSession,
    announcer: Announcer,
    config: &'a BrowserConfig,
    theme: Theme,
    search_focused: bool,
    status: Option<String>,
}

impl<'a> App<'a> {
    fn new(session: DeckSession, announcer: Announcer, config: &'a BrowserConfig) -> Self {
        Self {
            session,
            announcer,
            config,
            theme: config.theme,
            search_focused: false,
            status: None,
        }
    }

    fn run(&mut self, out: &mut impl Write) -> io::Result<()> {
        loop {
            let frame = Frame {
                theme: self.theme,
                search_focused: self.search_focused,
                status: self.status.as_deref(),
            };
            render::draw(out, &self.session, self.config, &frame)?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !self.handle_key(key, out) {
                    break;
                }
            }
        }
        self.announcer.hush();
        Ok(())
    }

    /// Returns false when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent, out: &mut impl Write) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        self.status = None;

        // While the search box has focus, keys edit the query and never navigate.
        if self.search_focused {
            let mut query = self.session.query().to_string();
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.search_focused = false,
                KeyCode::Backspace => {
                    query.pop();
                }
                KeyCode::Char(c) => query.push(c),
                _ => {}
            }
            self.session.set_query(&query);
            return true;
        }

        let moved = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Right => self.session.next(),
            KeyCode::Left => self.session.prev(),
            KeyCode::Char('r') => self.session.jump_random(),
            KeyCode::Home | KeyCode::Char('d') => {
                self.session.jump_to_start();
                false
            }
            KeyCode::Char('/') => {
                self.search_focused = true;
                false
            }
            KeyCode::Char('x') => {
                self.session.clear_query();
                false
            }
            KeyCode::Char('s') => {
                self.session.toggle_mode();
                false
            }
            KeyCode::Char('t') => {
                self.theme = self.theme.toggled();
                false
            }
            KeyCode::Char('e') => {
                self.pronounce(Side::Source);
                false
            }
            KeyCode::Char('i') => {
                self.pronounce(Side::Target);
                false
            }
            _ => false,
        };
        if moved && self.config.click {
            // Audible click; best effort like every other audio side effect.
            let _ = out.write_all(b"\x07");
        }
        true
    }

    fn pronounce(&mut self, side: Side) {
        if let Some(request) = self.session.pronounce(side) {
            self.status = Some(format!("Speaking \"{}\" ({})", request.text, request.lang));
            self.announcer.say(&request);
        }
    }
}
