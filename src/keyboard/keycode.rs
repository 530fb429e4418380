//! Keys delivered by the host input source
//!
//! Printable keys arrive as characters; everything else is a named key.
//! Named keys never match a hint, so they end a round like any other
//! unrecognized key.

/// Macro to define named keys with their properties in one place.
/// Format: Variant = (name, display_name)
macro_rules! define_named_keys {
    (
        $(
            $variant:ident = ($name:literal, $display:literal)
        ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NamedKey {
            $($variant),*
        }

        impl NamedKey {
            /// Convert key to a snake_case string name (for settings and scripts)
            pub fn to_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Convert key to a human-readable display name
            pub fn to_display_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $display,)*
                }
            }

            /// Parse a key name string to NamedKey
            pub fn from_name(name: &str) -> Option<Self> {
                match name.to_lowercase().as_str() {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

define_named_keys! {
    Return = ("return", "Return"),
    Tab = ("tab", "Tab"),
    Delete = ("delete", "Delete"),
    Escape = ("escape", "Escape"),
    Left = ("left", "Left Arrow"),
    Right = ("right", "Right Arrow"),
    Down = ("down", "Down Arrow"),
    Up = ("up", "Up Arrow"),
    Home = ("home", "Home"),
    End = ("end", "End"),
    PageUp = ("page_up", "Page Up"),
    PageDown = ("page_down", "Page Down"),
    ForwardDelete = ("forward_delete", "Forward Delete"),
    F1 = ("f1", "F1"),
    F2 = ("f2", "F2"),
    F3 = ("f3", "F3"),
    F4 = ("f4", "F4"),
    F5 = ("f5", "F5"),
    F6 = ("f6", "F6"),
    F7 = ("f7", "F7"),
    F8 = ("f8", "F8"),
    F9 = ("f9", "F9"),
    F10 = ("f10", "F10"),
    F11 = ("f11", "F11"),
    F12 = ("f12", "F12"),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Named(NamedKey),
}

impl Key {
    /// The character typed, if this is a printable key
    pub fn to_char(self) -> Option<char> {
        match self {
            Key::Char(c) => Some(c),
            Key::Named(_) => None,
        }
    }

    /// Text shown for this key in messages
    pub fn to_display_name(&self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::Named(named) => named.to_display_name().to_string(),
        }
    }
}

/// Modifier flags held while a key was pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub option: bool,
    pub command: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
        option: false,
        command: false,
    };

    /// Whether any chord modifier is held
    pub fn any(&self) -> bool {
        self.shift || self.control || self.option || self.command
    }
}

/// A key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// An unmodified character key
    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::NONE)
    }

    /// An unmodified named key
    pub fn named(key: NamedKey) -> Self {
        Self::new(Key::Named(key), Modifiers::NONE)
    }
}
