//! The encounter engine: background simulation threads and the event
//! channel the presentation task drains.
//!
//! Two threads run behind the UI: the encounter loop (sleep, draw a species,
//! roll shininess, emit events, halt on a shiny until Continue) and the hunt
//! clock (one tick per second while a hunt is active). All shared UI-facing
//! state is updated only by the presentation task, from events; the threads
//! themselves never touch it. Control flows the other way over a channel
//! plus one atomic running flag checked at loop-iteration boundaries.

use crate::clock::HuntClock;
use crate::constants::CLOCK_TICK_SECONDS;
use crate::shiny::roll_shiny;
use crate::species::SpeciesTable;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Events emitted by the background threads, applied on the UI task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Every encounter, shiny or not, with a counter snapshot.
    EncounterOccurred {
        species: String,
        rarity: String,
        is_shiny: bool,
        encounters: u64,
    },
    /// A non-shiny encounter; `heard_flavor` carries the nearby-shiny hint.
    CommonEncounter {
        species: String,
        rarity: String,
        heard_flavor: bool,
    },
    /// The hunt's terminal condition; the loop is parked until Continue.
    ShinyFound {
        species: String,
        rarity: String,
        encounters: u64,
    },
    /// Once per second while a hunt is active.
    TimeTick { total_elapsed_secs: u64 },
    /// The table is degenerate; the loop halted in Idle. Emitted once.
    HuntStalled { reason: String },
}

/// Signals accepted by the encounter loop while parked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub encounter_delay: Duration,
    pub shiny_rate: u32,
}

/// Handle owned by the presentation task.
pub struct Engine {
    events: Receiver<EngineEvent>,
    control: Sender<Control>,
    running: Arc<AtomicBool>,
    encounter_thread: Option<JoinHandle<()>>,
    clock_thread: Option<JoinHandle<()>>,
}

impl Engine {
    /// Spawns the encounter loop and clock threads and starts the first
    /// hunt immediately.
    pub fn spawn(table: SpeciesTable, config: EngineConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let (control_tx, control_rx) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let hunting = Arc::new(AtomicBool::new(false));

        let encounter_thread = {
            let tx = event_tx.clone();
            let running = Arc::clone(&running);
            let hunting = Arc::clone(&hunting);
            thread::spawn(move || {
                run_encounter_loop(&table, &config, &tx, &control_rx, &running, &hunting);
                hunting.store(false, Ordering::SeqCst);
            })
        };

        let clock_thread = {
            let running = Arc::clone(&running);
            let hunting = Arc::clone(&hunting);
            thread::spawn(move || run_clock(&event_tx, &running, &hunting))
        };

        Self {
            events: event_rx,
            control: control_tx,
            running,
            encounter_thread: Some(encounter_thread),
            clock_thread: Some(clock_thread),
        }
    }

    /// Non-blocking drain; the UI calls this each turn until empty.
    pub fn try_next_event(&self) -> Option<EngineEvent> {
        self.events.try_recv().ok()
    }

    /// Blocking receive with a deadline; used by tests.
    pub fn next_event_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Maps the user's "Continue Hunt" action onto the engine transition.
    pub fn request_continue(&self) {
        let _ = self.control.send(Control::Continue);
    }

    /// Stops both threads and waits for them to exit. Each thread observes
    /// the flag within one sleep interval; the control send unparks a loop
    /// waiting in ShinyFound or Idle.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        let _ = self.control.send(Control::Shutdown);

        if let Some(handle) = self.encounter_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.clock_thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_encounter_loop(
    table: &SpeciesTable,
    config: &EngineConfig,
    events: &Sender<EngineEvent>,
    control: &Receiver<Control>,
    running: &AtomicBool,
    hunting: &AtomicBool,
) {
    let mut rng = rand::thread_rng();

    if table.is_empty() || table.total_weight() == 0 {
        let _ = events.send(EngineEvent::HuntStalled {
            reason: "species table is empty or has zero total weight".to_string(),
        });
        park_until_shutdown(control);
        return;
    }

    'hunt: loop {
        // Idle -> Hunting: fresh counter, clock resumes via the flag.
        hunting.store(true, Ordering::SeqCst);
        let mut encounters: u64 = 0;

        loop {
            thread::sleep(config.encounter_delay);
            if !running.load(Ordering::SeqCst) {
                return;
            }

            encounters += 1;
            let species = match table.select(&mut rng) {
                Ok(s) => s.clone(),
                Err(e) => {
                    // Weights can only degenerate if the table was built
                    // that way, which the startup check catches; still,
                    // never spin on a selection failure.
                    hunting.store(false, Ordering::SeqCst);
                    let _ = events.send(EngineEvent::HuntStalled {
                        reason: e.to_string(),
                    });
                    park_until_shutdown(control);
                    return;
                }
            };
            let roll = roll_shiny(config.shiny_rate, &mut rng);

            if events
                .send(EngineEvent::EncounterOccurred {
                    species: species.name.clone(),
                    rarity: species.rarity.clone(),
                    is_shiny: roll.is_shiny,
                    encounters,
                })
                .is_err()
            {
                // Presentation side is gone.
                return;
            }

            if roll.is_shiny {
                // Hunting -> ShinyFound: stop the clock, park for Continue.
                hunting.store(false, Ordering::SeqCst);
                let _ = events.send(EngineEvent::ShinyFound {
                    species: species.name.clone(),
                    rarity: species.rarity.clone(),
                    encounters,
                });

                match control.recv() {
                    Ok(Control::Continue) => continue 'hunt,
                    Ok(Control::Shutdown) | Err(_) => return,
                }
            }

            let _ = events.send(EngineEvent::CommonEncounter {
                species: species.name.clone(),
                rarity: species.rarity.clone(),
                heard_flavor: roll.heard_flavor,
            });
        }
    }
}

/// Holds a stalled loop in Idle; only Shutdown (or a closed channel) frees it.
fn park_until_shutdown(control: &Receiver<Control>) {
    loop {
        match control.recv() {
            Ok(Control::Shutdown) | Err(_) => return,
            Ok(Control::Continue) => {}
        }
    }
}

fn run_clock(events: &Sender<EngineEvent>, running: &AtomicBool, hunting: &AtomicBool) {
    let mut clock = HuntClock::new();

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_secs(CLOCK_TICK_SECONDS));

        let active = hunting.load(Ordering::SeqCst);
        let total = clock.observe(Instant::now(), active);

        if active
            && events
                .send(EngineEvent::TimeTick {
                    total_elapsed_secs: total.as_secs(),
                })
                .is_err()
        {
            return;
        }
    }
}
