//! Key-event decoding for host integrations.
//!
//! Hosts report raw key events as a platform key code plus a modifier
//! bitfield. [`decode_key_event`] turns one event into what the field core
//! actually cares about: a printable character to insert, a session command,
//! a control combination the restrictor must not touch, or nothing. The
//! session logic itself stays platform-agnostic; all keycode quirks live
//! here.
//!
//! The quirk that forces this adapter to exist: one legacy platform reports
//! modifier combinations as literal ASCII letter codes (Ctrl+C arrives as
//! code 99 with the ctrl flag set), so a small fixed whitelist of combo codes
//! has to pass through untouched or copy/paste would be eaten by the
//! restrictor.

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    /// Check if ctrl is held
    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    /// Check if shift is held
    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    /// Check if alt/option is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    /// Check if meta (cmd/win) is held
    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if either command-style modifier (ctrl or meta) is held
    #[inline]
    pub const fn command(self) -> bool {
        self.ctrl() || self.meta()
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A raw key event as reported by the host: platform code plus modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawKeyEvent {
    pub code: u32,
    pub mods: Modifiers,
}

impl RawKeyEvent {
    pub const fn new(code: u32, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// Event for a plain printable character with no modifiers
    pub const fn from_char(ch: char) -> Self {
        Self {
            code: ch as u32,
            mods: Modifiers::NONE,
        }
    }
}

/// Session commands produced by key decoding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// Commit the edit and close the session
    Commit,
    /// Discard the edit and close the session
    Cancel,
    /// Close, then move activation to the next field
    NavigateNext,
    /// Close, then move activation to the previous field
    NavigatePrev,
}

/// How the host platform reports key events
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyPlatform {
    /// Modifier combinations arrive with distinguishable codes
    #[default]
    Standard,
    /// Modifier combinations arrive as literal ASCII letter codes with the
    /// modifier flags set
    LegacyLetterCodes,
}

/// What one raw key event means to the field core
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodedKey {
    /// Printable character; feed to `insert_character` (restrictor applies)
    Insert(char),
    /// Session command; feed to `key_command`
    Command(KeyCommand),
    /// Control character or editor shortcut; the restrictor must not see it.
    /// Any resulting text mutation comes back through `set_editor_text`.
    ControlCombo,
    /// Not meaningful to the field
    Ignored,
}

const KEY_TAB: u32 = 9;
const KEY_ENTER: u32 = 13;
const KEY_ESCAPE: u32 = 27;
const KEY_DELETE: u32 = 127;

/// Combo codes the legacy platform reports as plain letters while ctrl/meta
/// is held: select-all, copy, paste, cut.
pub const LEGACY_COMBO_WHITELIST: [u32; 4] = [97, 99, 118, 120];

/// Decode one raw key event.
///
/// Commands win over everything else, then control characters (codes below
/// 32, and 127) pass as combos unconditionally. On the legacy platform only
/// the whitelisted letter codes pass as combos when ctrl/meta is held; any
/// other letter decodes as an ordinary insertion, modifier or not, because
/// the platform gives us no way to tell the two apart.
pub fn decode_key_event(raw: RawKeyEvent, platform: KeyPlatform) -> DecodedKey {
    match raw.code {
        KEY_ENTER => DecodedKey::Command(KeyCommand::Commit),
        KEY_ESCAPE => DecodedKey::Command(KeyCommand::Cancel),
        KEY_TAB => {
            if raw.mods.shift() {
                DecodedKey::Command(KeyCommand::NavigatePrev)
            } else {
                DecodedKey::Command(KeyCommand::NavigateNext)
            }
        }
        code if code < 32 || code == KEY_DELETE => DecodedKey::ControlCombo,
        code => {
            let is_combo = match platform {
                KeyPlatform::Standard => raw.mods.command(),
                KeyPlatform::LegacyLetterCodes => {
                    raw.mods.command() && LEGACY_COMBO_WHITELIST.contains(&code)
                }
            };
            if is_combo {
                return DecodedKey::ControlCombo;
            }
            match char::from_u32(code) {
                Some(ch) => DecodedKey::Insert(ch),
                None => DecodedKey::Ignored,
            }
        }
    }
}
