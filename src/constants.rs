// UI timing constants
pub const INPUT_POLL_MS: u64 = 50;

// Animation pacing: shiny variants deliberately run at half speed
pub const COMMON_FRAME_DELAY_MS: u64 = 50;
pub const SHINY_FRAME_DELAY_MS: u64 = 100;

// Clock tick cadence
pub const CLOCK_TICK_SECONDS: u64 = 1;

// Config defaults
pub const DEFAULT_ENCOUNTER_DELAY_SECS: f64 = 2.0;
pub const DEFAULT_SHINY_RATE: u32 = 2000;

// Tally save format
pub const TALLY_VERSION_MAGIC: u64 = 0x49444C454D4F4E00; // "IDLEMON\0" in hex
