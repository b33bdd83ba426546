mod animation;
mod clock;
mod config;
mod constants;
mod engine;
mod history;
mod shiny;
mod species;
mod sprites;
mod tally;
mod ui;

use animation::{AnimKey, AnimationPlayer};
use config::Config;
use constants::INPUT_POLL_MS;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use engine::{Engine, EngineConfig, EngineEvent};
use history::HuntHistory;
use ratatui::{backend::CrosstermBackend, Terminal};
use species::SpeciesTable;
use sprites::SpriteLibrary;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tally::TallyStore;
use ui::HuntView;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_CONFIG_PATH: &str = "config.json";

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("idlemon {}", VERSION);
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("IdleMon - Terminal Shiny-Hunting Idle Game\n");
                println!("Usage: idlemon [options]\n");
                println!("Options:");
                println!("  --config <path>  Use a specific config file (default: config.json)");
                println!("  --version        Show version information");
                println!("  --help           Show this help message");
                std::process::exit(0);
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_path = PathBuf::from(path),
                    None => {
                        eprintln!("--config requires a path argument");
                        std::process::exit(1);
                    }
                }
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'idlemon --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Fatal startup errors: bad config or species data means no engine.
    let config = Config::load(&config_path).unwrap_or_else(|e| {
        eprintln!("Failed to load config {}: {}", config_path.display(), e);
        std::process::exit(1);
    });

    let table = SpeciesTable::load(&config.species_file, &config.rarity_weights).unwrap_or_else(
        |e| {
            eprintln!(
                "Failed to load species data {}: {}",
                config.species_file.display(),
                e
            );
            std::process::exit(1);
        },
    );

    // Persistence collaborators: tally defaults to 0 on any read problem.
    let tally_store = TallyStore::new()?;
    let history = tally_store.data_dir().map(HuntHistory::new);
    let total_shinies = tally_store.load();

    // Start the background simulation.
    let engine_config = EngineConfig {
        encounter_delay: Duration::from_secs_f64(config.encounter_delay_secs),
        shiny_rate: config.shiny_rate,
    };
    let mut engine = Engine::spawn(table, engine_config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_hunt(
        &mut terminal,
        &engine,
        &config,
        &tally_store,
        history.as_ref(),
        total_shinies,
    );

    // Cleanup terminal
    engine.stop();
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    result
}

/// The presentation loop: drains engine events, advances the animation and
/// redraws. All shared hunt state is applied here and only here.
fn run_hunt(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &Engine,
    config: &Config,
    tally_store: &TallyStore,
    history: Option<&HuntHistory>,
    total_shinies: u64,
) -> io::Result<()> {
    let mut view = HuntView::new(total_shinies, config.mute_audio);
    let mut player = AnimationPlayer::new(SpriteLibrary::new(config.sprites_dir.clone()));

    loop {
        let now = Instant::now();

        // Drain everything the background threads produced since last turn.
        while let Some(event) = engine.try_next_event() {
            apply_event(event, &mut view, &mut player, tally_store, history, now);
        }

        player.poll(Instant::now());

        let sprite = player.current_frame().map(String::as_str);
        terminal.draw(|frame| ui::draw_ui(frame, &view, sprite))?;

        // Poll for input (50ms non-blocking)
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key_event) = event::read()? {
                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        player.cancel();
                        return Ok(());
                    }
                    KeyCode::Char('m') | KeyCode::Char('M') => {
                        view.muted = !view.muted;
                    }
                    KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Enter
                        if view.awaiting_continue =>
                    {
                        engine.request_continue();
                        view.awaiting_continue = false;
                        view.encounters = 0;
                        view.heard_flavor = false;
                        view.status_is_shiny = false;
                        view.status = "Walking through the tall grass...".to_string();
                        chime(view.muted);
                    }
                    _ => {}
                }
            }
        }
    }
}

fn apply_event(
    event: EngineEvent,
    view: &mut HuntView,
    player: &mut AnimationPlayer<SpriteLibrary>,
    tally_store: &TallyStore,
    history: Option<&HuntHistory>,
    now: Instant,
) {
    match event {
        EngineEvent::EncounterOccurred {
            species,
            rarity,
            is_shiny,
            encounters,
        } => {
            view.encounters = encounters;
            view.heard_flavor = false;
            view.status_is_shiny = is_shiny;
            view.status = if is_shiny {
                format!("{species} - {rarity} (Shiny!)")
            } else {
                format!("{species} - {rarity}")
            };

            let key = AnimKey {
                species,
                rarity,
                is_shiny,
            };
            if let Some(message) = player.show(key, now) {
                view.warning = Some(message);
            }
        }
        EngineEvent::CommonEncounter { heard_flavor, .. } => {
            view.heard_flavor = heard_flavor;
        }
        EngineEvent::ShinyFound {
            species,
            rarity,
            encounters,
        } => {
            view.awaiting_continue = true;
            view.total_shinies += 1;

            // Exactly one increment and one write per confirmed shiny.
            if let Err(e) = tally_store.save(view.total_shinies) {
                view.warning = Some(format!("could not save shiny tally: {e}"));
            }
            if let Some(history) = history {
                if let Err(e) = history.record_shiny(&species, &rarity, encounters) {
                    view.warning = Some(format!("could not write hunt history: {e}"));
                }
            }

            chime(view.muted);
        }
        EngineEvent::TimeTick { total_elapsed_secs } => {
            view.elapsed_secs = total_elapsed_secs;
        }
        EngineEvent::HuntStalled { reason } => {
            view.stalled = Some(reason);
        }
    }
}

/// Terminal-bell stand-in for the shiny/continue sound cues. Cosmetic only;
/// errors are swallowed.
fn chime(muted: bool) {
    if muted {
        return;
    }
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
