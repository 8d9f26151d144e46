//! Key presses and the scripted-control queue.
//!
//! A key either drives the simulation (pause, reset, generation, inject)
//! or only moves the view.  Scripted presses are timed in frontend seconds
//! (frames at `ticks_per_sec` frames per second), which keep running while
//! the simulation is paused.

use std::collections::VecDeque;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    TogglePause,
    Reset,
    ToggleAutoGenerate,
    InjectPassenger,
    /// Gantt window 5 s back.
    GanttEarlier,
    /// Gantt window 5 s forward.
    GanttLater,
    GanttUp,
    GanttDown,
    /// Statistics table towards older rows.
    TableOlder,
    TableNewer,
    Quit,
}

impl Control {
    pub fn from_key(key: &str) -> Option<Self> {
        let control = match key.to_ascii_lowercase().as_str() {
            "space" | " " => Control::TogglePause,
            "r" => Control::Reset,
            "a" => Control::ToggleAutoGenerate,
            "n" => Control::InjectPassenger,
            "left" => Control::GanttEarlier,
            "right" => Control::GanttLater,
            "up" => Control::GanttUp,
            "down" => Control::GanttDown,
            "pageup" | "wheelup" => Control::TableOlder,
            "pagedown" | "wheeldown" => Control::TableNewer,
            "esc" | "escape" | "q" => Control::Quit,
            _ => return None,
        };
        Some(control)
    }

    /// Presentation-only: never touches simulation state.
    pub fn is_view(self) -> bool {
        matches!(
            self,
            Control::GanttEarlier
                | Control::GanttLater
                | Control::GanttUp
                | Control::GanttDown
                | Control::TableOlder
                | Control::TableNewer
        )
    }
}

impl FromStr for Control {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Control::from_key(s.trim()).ok_or_else(|| format!("unknown key `{s}`"))
    }
}

/// One `--at SECS:KEY` entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptedControl {
    pub at_secs: f64,
    pub control: Control,
}

impl FromStr for ScriptedControl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (secs, key) = s
            .split_once(':')
            .ok_or_else(|| format!("expected SECS:KEY, got `{s}`"))?;
        let at_secs: f64 = secs
            .trim()
            .parse()
            .map_err(|e| format!("bad time `{secs}`: {e}"))?;
        if !at_secs.is_finite() || at_secs < 0.0 {
            return Err(format!("time must be a non-negative number, got `{secs}`"));
        }
        Ok(Self { at_secs, control: key.parse()? })
    }
}

/// clap value parser for `--at`.
pub fn parse_scripted(s: &str) -> Result<ScriptedControl, String> {
    s.parse()
}

/// Pending scripted presses in time order; equal times keep command-line
/// order.
#[derive(Debug, Default)]
pub struct Script {
    pending: VecDeque<ScriptedControl>,
}

impl Script {
    pub fn new(mut controls: Vec<ScriptedControl>) -> Self {
        controls.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        Self { pending: controls.into() }
    }

    /// Next press due at or before `now_secs`.
    pub fn pop_due(&mut self, now_secs: f64) -> Option<Control> {
        if self.pending.front()?.at_secs <= now_secs {
            return self.pending.pop_front().map(|s| s.control);
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
