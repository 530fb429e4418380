mod settings;
mod validation;

pub use settings::{Settings, UnmatchedKeyPolicy};
pub use validation::validate_hint_keys;
