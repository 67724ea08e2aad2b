//! Runtime configuration. The wire format has no configurable knobs of its own
//! (alphabet range and bit order are fixed); this exists purely to gate the
//! optional summary log line, following `lib.rs`'s old `Options`/`STD_OPTIONS` shape.

#[derive(Clone,Copy,Debug)]
pub struct Config {
    /// emit a `log::info!` summary of header/body sizes after encode/decode
    pub verbose_stats: bool
}

pub const STD_CONFIG: Config = Config { verbose_stats: false };

impl Default for Config {
    fn default() -> Self {
        STD_CONFIG
    }
}
