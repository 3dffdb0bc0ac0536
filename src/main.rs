//! Interactive demo driver: one editable field on stdin.
//!
//! Each input line maps to an inbound field operation; the events the
//! operation produced are printed, followed by the field's state. Key events
//! go through the platform decode adapter, so the restrictor bypass rules
//! can be exercised from the terminal.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use blockfield::cli::CliArgs;
use blockfield::field::{FieldEvent, TextField};
use blockfield::keys::{decode_key_event, DecodedKey, KeyPlatform, Modifiers, RawKeyEvent};

const HELP: &str = "\
Commands:
  open               start an editing session
  close              end the session (commit or discard)
  type <text>        decode and insert each character
  key <code> [mods]  raw key event (mods: ctrl shift alt meta)
  text <text>        whole-text replacement from the editor
  value <text>       programmatic set_value
  editor <text>      set value and editor text together
  state              print field state
  quit               exit";

fn main() -> Result<()> {
    blockfield::trace::init();

    let args = CliArgs::parse();
    let (mut field, platform) = args.into_field().map_err(anyhow::Error::msg)?;

    println!("blockfield demo - type 'help' for commands");
    print_state(&field);

    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        if !handle_line(&mut field, platform, line.trim()) {
            break;
        }
        prompt()?;
    }
    Ok(())
}

/// Run one input line; returns false when the driver should exit
fn handle_line(field: &mut TextField, platform: KeyPlatform, line: &str) -> bool {
    if line.is_empty() {
        return true;
    }
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let events = match command {
        "quit" | "exit" => return false,
        "help" => {
            println!("{}", HELP);
            return true;
        }
        "state" => {
            print_state(field);
            return true;
        }
        "open" => field.open(),
        "close" => field.close(),
        "type" => {
            let mut events = Vec::new();
            for ch in rest.chars() {
                let decoded = decode_key_event(RawKeyEvent::from_char(ch), platform);
                events.extend(dispatch(field, decoded));
            }
            events
        }
        "key" => match parse_key(rest) {
            Ok(raw) => dispatch(field, decode_key_event(raw, platform)),
            Err(e) => {
                println!("error: {}", e);
                return true;
            }
        },
        "text" => field.set_editor_text(rest),
        "value" => field.set_value(rest),
        "editor" => field.set_editor_value(rest),
        other => {
            println!("unknown command {:?}; type 'help'", other);
            return true;
        }
    };

    print_events(&events);
    print_state(field);
    true
}

fn dispatch(field: &mut TextField, decoded: DecodedKey) -> Vec<FieldEvent> {
    match decoded {
        DecodedKey::Insert(ch) => field.insert_character(ch),
        DecodedKey::Command(command) => field.key_command(command),
        DecodedKey::ControlCombo => {
            println!("(control combo - host passes it to the native editor)");
            Vec::new()
        }
        DecodedKey::Ignored => Vec::new(),
    }
}

fn parse_key(rest: &str) -> Result<RawKeyEvent, String> {
    let mut parts = rest.split_whitespace();
    let code: u32 = parts
        .next()
        .ok_or_else(|| "usage: key <code> [ctrl|shift|alt|meta]...".to_string())?
        .parse()
        .map_err(|e| format!("bad key code: {}", e))?;

    let mut mods = Modifiers::NONE;
    for part in parts {
        mods = mods
            | match part {
                "ctrl" => Modifiers::CTRL,
                "shift" => Modifiers::SHIFT,
                "alt" => Modifiers::ALT,
                "meta" => Modifiers::META,
                other => return Err(format!("unknown modifier {:?}", other)),
            };
    }
    Ok(RawKeyEvent::new(code, mods))
}

fn print_events(events: &[FieldEvent]) {
    for event in events {
        println!("  -> {:?}", event);
    }
}

fn print_state(field: &TextField) {
    println!(
        "[value={:?} display={:?} editing={} valid={}]",
        field.value(),
        field.display_text(),
        field.is_editing(),
        field.is_valid()
    );
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}
