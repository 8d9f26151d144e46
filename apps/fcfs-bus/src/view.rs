//! Scroll positions of the Gantt chart and the statistics table.
//! Presentation only; nothing here feeds back into the simulation.

use crate::control::Control;

/// Horizontal Gantt scroll step.
pub const GANTT_STEP_SECS: f64 = 5.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    /// Left edge of the Gantt window, in simulated seconds.
    pub gantt_offset_secs: f64,
    /// First Gantt bar shown.
    pub gantt_row:         usize,
    /// Rows scrolled up from the newest completed passenger.
    pub table_offset:      usize,
}

impl ViewState {
    /// Apply a view control.  Returns `false` for controls that are not
    /// view controls.
    pub fn apply(&mut self, control: Control, completed: usize, visible_rows: usize) -> bool {
        match control {
            Control::GanttLater => self.gantt_offset_secs += GANTT_STEP_SECS,
            Control::GanttEarlier => {
                self.gantt_offset_secs = (self.gantt_offset_secs - GANTT_STEP_SECS).max(0.0);
            }
            Control::GanttUp => self.gantt_row = self.gantt_row.saturating_sub(1),
            Control::GanttDown => self.gantt_row += 1,
            Control::TableOlder => {
                self.table_offset = (self.table_offset + 1).min(max_offset(completed, visible_rows));
            }
            Control::TableNewer => self.table_offset = self.table_offset.saturating_sub(1),
            _ => return false,
        }
        true
    }

    /// Pull the scroll positions back inside the current content.  Run
    /// before every render since the content keeps changing.
    pub fn clamp(&mut self, gantt_bars: usize, gantt_visible: usize, completed: usize, table_visible: usize) {
        self.gantt_row = self.gantt_row.min(max_offset(gantt_bars, gantt_visible));
        self.table_offset = self.table_offset.min(max_offset(completed, table_visible));
    }

    /// Index range of the completed history to show, oldest first.
    pub fn table_window(&self, completed: usize, visible_rows: usize) -> std::ops::Range<usize> {
        let end = completed.saturating_sub(self.table_offset);
        let start = end.saturating_sub(visible_rows);
        start..end
    }
}

fn max_offset(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gantt_horizontal_floor_zero() {
        let mut v = ViewState::default();
        assert!(v.apply(Control::GanttEarlier, 0, 8));
        assert_eq!(v.gantt_offset_secs, 0.0);
        v.apply(Control::GanttLater, 0, 8);
        v.apply(Control::GanttLater, 0, 8);
        assert_eq!(v.gantt_offset_secs, 10.0);
        v.apply(Control::GanttEarlier, 0, 8);
        assert_eq!(v.gantt_offset_secs, 5.0);
    }

    #[test]
    fn gantt_vertical_floor_zero_then_clamped() {
        let mut v = ViewState::default();
        v.apply(Control::GanttUp, 0, 8);
        assert_eq!(v.gantt_row, 0);
        for _ in 0..6 {
            v.apply(Control::GanttDown, 0, 8);
        }
        assert_eq!(v.gantt_row, 6);
        v.clamp(12, 10, 0, 8);
        assert_eq!(v.gantt_row, 2);
    }

    #[test]
    fn table_scroll_bounded() {
        let mut v = ViewState::default();
        for _ in 0..10 {
            v.apply(Control::TableOlder, 12, 8);
        }
        assert_eq!(v.table_offset, 4);
        v.apply(Control::TableNewer, 12, 8);
        assert_eq!(v.table_offset, 3);

        // Fewer rows than fit: no scrolling at all.
        let mut short = ViewState::default();
        short.apply(Control::TableOlder, 5, 8);
        assert_eq!(short.table_offset, 0);
    }

    #[test]
    fn table_window_shows_newest_by_default() {
        let v = ViewState::default();
        assert_eq!(v.table_window(12, 8), 4..12);
        assert_eq!(v.table_window(3, 8), 0..3);

        let scrolled = ViewState { table_offset: 4, ..ViewState::default() };
        assert_eq!(scrolled.table_window(12, 8), 0..8);
    }

    #[test]
    fn simulation_controls_ignored() {
        let mut v = ViewState::default();
        assert!(!v.apply(Control::TogglePause, 0, 8));
        assert!(!v.apply(Control::Quit, 0, 8));
        assert_eq!(v, ViewState::default());
    }
}
