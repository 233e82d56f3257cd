pub(crate) const DEFAULT_BAUD_RATE: u32 = 115_200;
pub(crate) const SERIAL_TIMEOUT_MS: u64 = 500;
pub(crate) const MAX_LINE_BYTES: usize = 1024;

/// A received line containing this character anywhere means the device
/// awaits input.
pub(crate) const PROMPT_MARKER: char = '>';

pub(crate) const START_TOKEN: &str = "s";
pub(crate) const TERMINATE_TOKEN: &str = "z";
