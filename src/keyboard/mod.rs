mod capture;
pub mod keycode;
mod script;

pub use capture::{channel, InputEvent, InputReceiver, InputSender, InputSource, MouseClickEvent};
pub use keycode::{Key, KeyEvent, Modifiers, NamedKey};
pub use script::{parse_script, ScriptedInput};
