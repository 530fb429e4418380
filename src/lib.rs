//! Keyboard-driven target selection
//!
//! Targets get short, prefix-free key sequences shown as hint labels; the
//! user types a sequence to pick one target, or keeps picking to toggle a
//! selection. See [`jump::JumpEngine`].

pub mod config;
pub mod error;
pub mod jump;
pub mod keyboard;
pub mod text;

use std::io::Write;

pub use config::{Settings, UnmatchedKeyPolicy};
pub use error::{JumpError, TargetError};
pub use jump::{HintHandle, JumpEngine, Jumpable, Seed, Selectable, Target};
pub use keyboard::{InputEvent, InputSource};

/// Initialize `env_logger` with millisecond timestamps
///
/// `RUST_LOG` overrides the default `info` filter. Safe to call more than
/// once; later calls are ignored.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            writeln!(buf, "[{}] {} - {}", timestamp, record.level(), record.args())
        })
        .try_init();
}
