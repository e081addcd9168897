use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default keybindings embedded at compile time
const DEFAULT_KEYBINDINGS: &str = include_str!("defaults.toml");

/// A key combination (key code + modifiers)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Shift is folded into the character for printable keys, so it is dropped here
    pub fn from_event(key: &KeyEvent) -> Self {
        let mut modifiers = key.modifiers;
        if let KeyCode::Char(_) = key.code {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self::new(key.code, modifiers)
    }

    /// Parse a key string like "Ctrl-c", "Shift-Tab", "Enter", "j"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s == "-" {
            return Some(Self::new(KeyCode::Char('-'), KeyModifiers::NONE));
        }

        let mut modifiers = KeyModifiers::NONE;
        let mut parts: Vec<&str> = s.split('-').collect();

        // Everything before the last part is a modifier
        while parts.len() > 1 {
            let modifier = parts.remove(0).to_lowercase();
            match modifier.as_str() {
                "ctrl" | "c" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "a" | "opt" | "option" => modifiers |= KeyModifiers::ALT,
                "shift" | "s" => modifiers |= KeyModifiers::SHIFT,
                "super" | "cmd" | "command" | "meta" => modifiers |= KeyModifiers::SUPER,
                _ => return None,
            }
        }

        let code = parse_key_code(parts[0])?;
        Some(Self::new(code, modifiers))
    }

    /// Convert to display string for UI
    pub fn display(&self) -> String {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::SUPER) {
            parts.push("Cmd".to_string());
        }
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        parts.push(key_code_display(&self.code));

        parts.join("-")
    }
}

fn parse_key_code(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "backspace" | "bs" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "space" => Some(KeyCode::Char(' ')),
        f if f.starts_with('f') => f[1..].parse::<u8>().ok().filter(|n| (1..=12).contains(n)).map(KeyCode::F),
        _ => None,
    }
}

fn key_code_display(code: &KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    }
}

/// The action name as a string (matches Action enum variants)
pub type ActionName = String;

/// Raw TOML structure for keybindings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeybindingsToml {
    #[serde(default)]
    pub global: HashMap<String, String>,

    /// Active while the notification panel is open
    #[serde(default)]
    pub panel: HashMap<String, String>,
}

/// Parsed keybinding configuration with KeyCombo lookups
#[derive(Debug, Clone)]
pub struct KeybindingConfig {
    pub global: HashMap<KeyCombo, ActionName>,
    pub panel: HashMap<KeyCombo, ActionName>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::from_toml(DEFAULT_KEYBINDINGS)
    }
}

impl KeybindingConfig {
    pub fn from_toml(content: &str) -> Self {
        let raw: KeybindingsToml = toml::from_str(content).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid keybindings, using defaults");
            toml::from_str(DEFAULT_KEYBINDINGS).unwrap_or_default()
        });
        Self {
            global: Self::parse_bindings(&raw.global),
            panel: Self::parse_bindings(&raw.panel),
        }
    }

    fn parse_bindings(raw: &HashMap<String, String>) -> HashMap<KeyCombo, ActionName> {
        raw.iter()
            .filter_map(|(key, action)| match KeyCombo::parse(key) {
                Some(combo) => Some((combo, action.clone())),
                None => {
                    tracing::warn!(key = %key, "ignoring unparseable key binding");
                    None
                }
            })
            .collect()
    }

    pub fn global_action(&self, key: &KeyEvent) -> Option<&str> {
        self.global.get(&KeyCombo::from_event(key)).map(String::as_str)
    }

    pub fn panel_action(&self, key: &KeyEvent) -> Option<&str> {
        self.panel.get(&KeyCombo::from_event(key)).map(String::as_str)
    }

    /// First key bound to `action`, for help and hint text
    pub fn key_for(&self, action: &str) -> Option<String> {
        let mut keys: Vec<String> = self
            .global
            .iter()
            .chain(self.panel.iter())
            .filter(|(_, name)| name.as_str() == action)
            .map(|(combo, _)| combo.display())
            .collect();
        keys.sort();
        keys.into_iter().next()
    }
}

/// Load keybindings from user config, falling back to defaults
pub fn load_keybindings() -> KeybindingConfig {
    match get_user_config_path() {
        Some(path) => load_keybindings_from(&path),
        None => KeybindingConfig::default(),
    }
}

/// Seeds `path` with the defaults on first run
pub fn load_keybindings_from(path: &Path) -> KeybindingConfig {
    let content = if path.exists() {
        std::fs::read_to_string(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "could not read keybindings");
            DEFAULT_KEYBINDINGS.to_string()
        })
    } else {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = std::fs::write(path, DEFAULT_KEYBINDINGS);
        DEFAULT_KEYBINDINGS.to_string()
    };

    KeybindingConfig::from_toml(&content)
}

/// Get the path to user's keybindings config file
pub fn get_user_config_path() -> Option<PathBuf> {
    super::config_dir().ok().map(|dir| dir.join("keybindings.toml"))
}
