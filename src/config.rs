//! User configuration: sheet tuning, keybindings and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/action-sheet/config.toml` (default
//! `~/.config/action-sheet/config.toml`).  Malformed lines are reported and
//! skipped; they never stop the app from starting.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use action_sheet::SheetConfig;

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("line {line}: expected `key = value`")]
    MalformedLine { line: usize },
    #[error("line {line}: unknown key `{key}`")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: `{key}` expects {expected}, got `{value}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
        expected: &'static str,
    },
    #[error("line {line}: no usable key in `{value}`")]
    InvalidBinding { line: usize, value: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Confirm,
    Dismiss,
    Quit,
}

impl Action {
    /// Ordered list of all actions.
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::Confirm,
        Action::Dismiss,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::Confirm => "confirm",
            Action::Dismiss => "dismiss",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "move_up" => Some(Action::MoveUp),
            "move_down" => Some(Action::MoveDown),
            "confirm" => Some(Action::Confirm),
            "dismiss" => Some(Action::Dismiss),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"↑"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            other => code_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Up"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&code_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn code_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and sheet tuning.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Scrim opacity at rest.
    pub dim_background_amount: f64,
    /// Projected drag distance (units) that dismisses on release.
    pub required_dismiss_velocity: f64,
    /// Drag distance (units) over which the scrim fades.
    pub fade_dim_background_tolerance: f64,
    /// Keep the scrim fade within `[0, dim_background_amount]`.
    pub clamp_dim_fade: bool,
    /// Logical units per terminal row.
    pub units_per_row: f64,
    /// Frame interval for animations.
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let sheet = SheetConfig::default();
        Self {
            bindings: Self::default_bindings(),
            dim_background_amount: sheet.dim_background_amount,
            required_dismiss_velocity: sheet.required_dismiss_velocity,
            fade_dim_background_tolerance: sheet.fade_dim_background_tolerance,
            clamp_dim_fade: sheet.clamp_dim_fade,
            units_per_row: sheet.units_per_row,
            tick_ms: 16,
        }
    }
}

impl AppConfig {
    /// Built-in key bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Confirm, vec![KeyBind::new(Enter, n), KeyBind::new(Char(' '), n)]);
        m.insert(Dismiss, vec![KeyBind::new(Esc, n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint for the host list.
    pub fn host_hint(&self) -> String {
        format!(
            "{}/{}: navigate | {}: actions | {}: quit",
            self.short_binding(Action::MoveUp),
            self.short_binding(Action::MoveDown),
            self.short_binding(Action::Confirm),
            self.short_binding(Action::Quit),
        )
    }

    /// Hint line shown inside the sheet.
    pub fn sheet_hint(&self) -> String {
        format!(
            "{}: choose  {}: cancel  drag ↓ to dismiss",
            self.short_binding(Action::Confirm),
            self.short_binding(Action::Dismiss),
        )
    }

    /// Constants for the sheet state machine.
    pub fn sheet_config(&self) -> SheetConfig {
        SheetConfig {
            dim_background_amount: self.dim_background_amount,
            required_dismiss_velocity: self.required_dismiss_velocity,
            fade_dim_background_tolerance: self.fade_dim_background_tolerance,
            clamp_dim_fade: self.clamp_dim_fade,
            units_per_row: self.units_per_row,
            ..SheetConfig::default()
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`.  A missing or unreadable file yields the
    /// defaults; bad lines are logged and skipped.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let (config, errors) = Self::parse(&contents);
                for err in errors {
                    tracing::warn!(path = %path.display(), "config: {err}");
                }
                config
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "cannot read config: {err}");
                Self::default()
            }
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    /// Parse config text on top of the defaults, collecting every problem.
    pub fn parse(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                errors.push(ConfigError::MalformedLine { line: line_no });
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            if let Err(err) = config.apply(line_no, key, value) {
                errors.push(err);
            }
        }

        (config, errors)
    }

    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |expected: &'static str| ConfigError::InvalidValue {
            line,
            key: key.to_string(),
            value: value.to_string(),
            expected,
        };
        let positive = |v: &str| v.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0);

        match key {
            "dim_background_amount" => {
                self.dim_background_amount = value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| (0.0..=1.0).contains(v))
                    .ok_or_else(|| invalid("a number in 0..=1"))?;
            }
            "required_dismiss_velocity" => {
                self.required_dismiss_velocity = value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| invalid("a number"))?;
            }
            "fade_dim_background_tolerance" => {
                self.fade_dim_background_tolerance =
                    positive(value).ok_or_else(|| invalid("a positive number"))?;
            }
            "units_per_row" => {
                self.units_per_row = positive(value).ok_or_else(|| invalid("a positive number"))?;
            }
            "clamp_dim_fade" => {
                self.clamp_dim_fade = value.parse().map_err(|_| invalid("true or false"))?;
            }
            "tick_ms" => {
                let ms: u64 = value.parse().map_err(|_| invalid("milliseconds"))?;
                // Keep this bounded for predictable animation.
                self.tick_ms = ms.clamp(5, 200);
            }
            _ => {
                let Some(action) = Action::from_config_key(key) else {
                    return Err(ConfigError::UnknownKey {
                        line,
                        key: key.to_string(),
                    });
                };
                let parsed: Vec<KeyBind> = value
                    .split(',')
                    .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                    .collect();
                if parsed.is_empty() {
                    return Err(ConfigError::InvalidBinding {
                        line,
                        value: value.to_string(),
                    });
                }
                self.bindings.insert(action, parsed);
            }
        }
        Ok(())
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# action-sheet configuration".to_string(),
            String::new(),
            "# Sheet tuning (distances in units; one terminal row = units_per_row)".to_string(),
            format!("dim_background_amount = {}", self.dim_background_amount),
            format!("required_dismiss_velocity = {}", self.required_dismiss_velocity),
            format!(
                "fade_dim_background_tolerance = {}",
                self.fade_dim_background_tolerance
            ),
            format!("clamp_dim_fade = {}", self.clamp_dim_fade),
            format!("units_per_row = {}", self.units_per_row),
            format!("tick_ms = {}", self.tick_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/action-sheet/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("action-sheet").join("config.toml")
}
