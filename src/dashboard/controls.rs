//! View-model controls: triggers, status regions, the temperature slider.
//!
//! Plain data. The TUI reads these every frame; the controller is the only
//! writer.

/// Lifecycle of an actionable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    InProgress,
}

/// A button-like trigger with an idle and an in-progress label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerControl {
    idle_label: &'static str,
    busy_label: &'static str,
    state: ControlState,
}

impl TriggerControl {
    pub fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            idle_label,
            busy_label,
            state: ControlState::Idle,
        }
    }

    /// Enter `InProgress`. Returns false (and changes nothing) if already there.
    pub fn begin(&mut self) -> bool {
        match self.state {
            ControlState::Idle => {
                self.state = ControlState::InProgress;
                true
            }
            ControlState::InProgress => false,
        }
    }

    /// Back to `Idle`, whatever the outcome was.
    pub fn settle(&mut self) {
        self.state = ControlState::Idle;
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == ControlState::Idle
    }

    pub fn label(&self) -> &'static str {
        match self.state {
            ControlState::Idle => self.idle_label,
            ControlState::InProgress => self.busy_label,
        }
    }
}

/// How a status message is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Progress notice shown while a request is in flight.
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// An inline status line. Hidden when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRegion {
    message: Option<StatusMessage>,
}

impl StatusRegion {
    pub fn show(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Error, text);
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    pub fn kind(&self) -> Option<StatusKind> {
        self.message.as_ref().map(|m| m.kind)
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

/// Slider steps per unit. The slider runs 0.0..=1.0 in tenths.
const STEPS: u8 = 10;

/// Temperature slider with a text readout kept in sync on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperatureSlider {
    tenths: u8,
    readout: String,
}

impl TemperatureSlider {
    pub fn new(value: f64) -> Self {
        let mut slider = Self {
            tenths: 0,
            readout: String::new(),
        };
        slider.set_value(value);
        slider
    }

    /// Move to `value`, snapped to the nearest step and clamped to range.
    pub fn set_value(&mut self, value: f64) {
        let snapped = if value.is_finite() {
            (value * STEPS as f64).round().clamp(0.0, STEPS as f64) as u8
        } else {
            0
        };
        self.tenths = snapped;
        self.readout = self.value_text();
    }

    /// Set from the control's own text form ("0.9").
    pub fn set_text(&mut self, text: &str) -> Result<(), String> {
        let value: f64 = text
            .trim()
            .parse()
            .map_err(|_| format!("not a number: '{text}'"))?;
        self.set_value(value);
        Ok(())
    }

    pub fn step_up(&mut self) {
        if self.tenths < STEPS {
            self.tenths += 1;
        }
        self.readout = self.value_text();
    }

    pub fn step_down(&mut self) {
        self.tenths = self.tenths.saturating_sub(1);
        self.readout = self.value_text();
    }

    pub fn value(&self) -> f64 {
        self.tenths as f64 / STEPS as f64
    }

    /// The slider's own value text.
    pub fn value_text(&self) -> String {
        format!("{:.1}", self.value())
    }

    /// The displayed readout.
    pub fn readout(&self) -> &str {
        &self.readout
    }
}
