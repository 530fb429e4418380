//! Scripted input, for driving rounds without a live host
//!
//! Plain characters are key presses. Anything in angle brackets is a
//! named key, a modified key or a non-key event:
//! `<escape>`, `<c-f>`, `<s-a>`, `<a-x>`, `<m-x>`, `<click>`,
//! `<right_click>`, `<scroll>`, `<lt>` (a literal `<`).

use std::collections::VecDeque;

use async_trait::async_trait;

use super::capture::{InputEvent, InputSource, MouseClickEvent};
use super::keycode::{Key, KeyEvent, Modifiers, NamedKey};

/// Parse a key script into events
pub fn parse_script(script: &str) -> Result<Vec<InputEvent>, String> {
    let mut events = Vec::new();
    let mut chars = script.chars();
    while let Some(c) = chars.next() {
        if c != '<' {
            events.push(InputEvent::Key(KeyEvent::char(c)));
            continue;
        }
        let mut token = String::new();
        loop {
            match chars.next() {
                Some('>') => break,
                Some(c) => token.push(c),
                None => return Err(format!("Unterminated '<{}' in key script", token)),
            }
        }
        events.push(parse_token(&token)?);
    }
    Ok(events)
}

fn parse_token(token: &str) -> Result<InputEvent, String> {
    match token.to_lowercase().as_str() {
        "click" => {
            return Ok(InputEvent::PointerPressed(MouseClickEvent {
                is_left_click: true,
                is_right_click: false,
            }))
        }
        "right_click" => {
            return Ok(InputEvent::PointerPressed(MouseClickEvent {
                is_left_click: false,
                is_right_click: true,
            }))
        }
        "scroll" => return Ok(InputEvent::Scroll),
        _ => {}
    }

    let mut modifiers = Modifiers::NONE;
    let mut rest = token;
    // Modifier prefixes like "c-" or "s-", but a lone "-" key is allowed
    while rest.len() > 2 && rest.as_bytes()[1] == b'-' {
        match rest.as_bytes()[0].to_ascii_lowercase() {
            b'c' => modifiers.control = true,
            b's' => modifiers.shift = true,
            b'a' | b'o' => modifiers.option = true,
            b'm' | b'd' => modifiers.command = true,
            _ => return Err(format!("Unknown modifier in '<{}>'", token)),
        }
        rest = &rest[2..];
    }

    let key = parse_key(rest).ok_or_else(|| format!("Unknown key '<{}>'", token))?;
    Ok(InputEvent::Key(KeyEvent::new(key, modifiers)))
}

fn parse_key(name: &str) -> Option<Key> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(Key::Char(c));
    }
    match name.to_lowercase().as_str() {
        "lt" => Some(Key::Char('<')),
        "gt" => Some(Key::Char('>')),
        "space" => Some(Key::Char(' ')),
        other => NamedKey::from_name(other).map(Key::Named),
    }
}

/// Input source replaying a fixed list of events
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Parse `script` with [`parse_script`]
    pub fn from_script(script: &str) -> Result<Self, String> {
        parse_script(script).map(Self::new)
    }

    /// Events not consumed yet
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn next_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keys() {
        assert_eq!(
            parse_script("fj;").unwrap(),
            vec![
                InputEvent::Key(KeyEvent::char('f')),
                InputEvent::Key(KeyEvent::char('j')),
                InputEvent::Key(KeyEvent::char(';')),
            ]
        );
    }

    #[test]
    fn test_tokens() {
        let events = parse_script("<escape><c-f><s-a><click><scroll><lt><->").unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::Key(KeyEvent::named(NamedKey::Escape)),
                InputEvent::Key(KeyEvent::new(
                    Key::Char('f'),
                    Modifiers {
                        control: true,
                        ..Modifiers::NONE
                    }
                )),
                InputEvent::Key(KeyEvent::new(
                    Key::Char('a'),
                    Modifiers {
                        shift: true,
                        ..Modifiers::NONE
                    }
                )),
                InputEvent::PointerPressed(MouseClickEvent {
                    is_left_click: true,
                    is_right_click: false,
                }),
                InputEvent::Scroll,
                InputEvent::Key(KeyEvent::char('<')),
                InputEvent::Key(KeyEvent::char('-')),
            ]
        );
    }

    #[test]
    fn test_stacked_modifiers() {
        let events = parse_script("<c-m-x>").unwrap();
        let InputEvent::Key(event) = events[0] else {
            panic!("expected a key event");
        };
        assert!(event.modifiers.control && event.modifiers.command);
        assert!(!event.modifiers.shift);
        assert_eq!(event.key, Key::Char('x'));
    }

    #[test]
    fn test_errors() {
        assert!(parse_script("<escape").is_err());
        assert!(parse_script("<hyper>").is_err());
        assert!(parse_script("<q-x>").is_err());
    }

    #[tokio::test]
    async fn test_scripted_input_drains() {
        let mut input = ScriptedInput::from_script("ab").unwrap();
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.next_event().await, Some(InputEvent::Key(KeyEvent::char('a'))));
        assert_eq!(input.next_event().await, Some(InputEvent::Key(KeyEvent::char('b'))));
        assert_eq!(input.next_event().await, None);
    }
}
