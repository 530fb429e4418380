use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use monkey_jump::keyboard::ScriptedInput;
use monkey_jump::text::{self, TextView};
use monkey_jump::{InputEvent, InputSource, JumpEngine, JumpError, Seed, Settings};

fn print_usage() {
    eprintln!("monkey - jump around a text file with hint keys");
    eprintln!();
    eprintln!("Usage: monkey <command> <file> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  lines             Jump to a line");
    eprintln!("  words             Jump to a word");
    eprintln!("  select            Toggle words in and out of a selection");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --keys <script>   Keys to type (read from stdin when absent)");
    eprintln!("  --rows <a:b>      Only consider words on rows a to b (1-based, inclusive)");
    eprintln!("  --all             Start 'select' with every word selected");
    eprintln!("  --config <path>   Read settings from this YAML file");
    eprintln!("  --show            Print the hinted text before each key");
    eprintln!();
    eprintln!("Key scripts:");
    eprintln!("  Plain characters are typed as-is; <escape>, <tab>, <c-x>, <click>");
    eprintln!("  and <scroll> stand for special keys, chords and pointer events.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  monkey words src/main.rs --keys fj");
    eprintln!("  monkey select notes.txt --rows 3:5 --keys 'fdk<escape>'");
}

fn get_arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Parse a 1-based inclusive `a:b` row span into a 0-based range
fn parse_rows(span: &str) -> Result<std::ops::Range<usize>> {
    let (start, end) = span
        .split_once(':')
        .with_context(|| format!("Invalid row span '{}', expected a:b", span))?;
    let start: usize = start.trim().parse().context("Invalid first row")?;
    let end: usize = end.trim().parse().context("Invalid last row")?;
    if start == 0 || end < start {
        bail!("Invalid row span '{}'", span);
    }
    Ok(start - 1..end)
}

/// Scripted input that prints the hinted view before handing out each event
struct ShowingInput {
    inner: ScriptedInput,
    view: Arc<TextView>,
}

#[async_trait]
impl InputSource for ShowingInput {
    async fn next_event(&mut self) -> Option<InputEvent> {
        eprintln!("{}\n", self.view.render());
        self.inner.next_event().await
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    monkey_jump::init_logger();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        std::process::exit(if args.len() < 3 { 1 } else { 0 });
    }

    if let Err(e) = run(&args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<()> {
    let command = args[1].as_str();
    let path = PathBuf::from(&args[2]);

    let settings = match get_arg_value(args, "--config") {
        Some(config) => {
            let mut settings = Settings::load_from(&PathBuf::from(config)).map_err(anyhow::Error::msg)?;
            settings.sanitize();
            settings
        }
        None => Settings::load(),
    };
    let engine = JumpEngine::new(&settings)?;

    let contents = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let view = Arc::new(TextView::new(&contents));

    let script = match get_arg_value(args, "--keys") {
        Some(keys) => keys,
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).context("Failed to read keys from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    let inner = ScriptedInput::from_script(&script).map_err(anyhow::Error::msg)?;
    let mut input: Box<dyn InputSource> = if args.iter().any(|a| a == "--show") {
        Box::new(ShowingInput {
            inner,
            view: Arc::clone(&view),
        })
    } else {
        Box::new(inner)
    };

    let rows = get_arg_value(args, "--rows").map(|span| parse_rows(&span)).transpose()?;

    let outcome = match command {
        "lines" => {
            let targets = text::line_targets(&view);
            engine
                .jump(&targets, input.as_mut())
                .await
                .map(|chosen| chosen.map(|target| target.position()))
        }
        "words" => {
            let targets = text::word_targets(&view, rows);
            engine
                .jump(&targets, input.as_mut())
                .await
                .map(|chosen| chosen.map(|target| target.range().start))
        }
        "select" => {
            let targets = text::word_targets(&view, rows);
            let seed = if args.iter().any(|a| a == "--all") {
                Seed::All
            } else {
                Seed::None
            };
            match engine.resolve_toggled(&targets, seed, input.as_mut()).await {
                Ok(selected) => {
                    for target in &selected {
                        println!("{}\t{}", target.range(), target.text().unwrap_or_default());
                    }
                    return Ok(());
                }
                Err(e) => Err(e),
            }
        }
        other => bail!("Unknown command: {}", other),
    };

    match outcome {
        Ok(Some(position)) => {
            debug_assert_eq!(view.cursor(), position);
            println!("{}\t{}", position, view.line(position.row).unwrap_or_default().trim());
        }
        Ok(None) => log::info!("No target chosen"),
        Err(e) if e.is_notification() => {
            if !settings.mute_notifications {
                eprintln!("{}", e);
            }
        }
        Err(JumpError::EmptyTargetSet) => bail!("Nothing to jump to in {}", path.display()),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        assert_eq!(parse_rows("3:5").unwrap(), 2..5);
        assert_eq!(parse_rows("1:1").unwrap(), 0..1);
        assert!(parse_rows("0:2").is_err());
        assert!(parse_rows("4:2").is_err());
        assert!(parse_rows("4").is_err());
    }
}
