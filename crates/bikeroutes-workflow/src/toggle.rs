//! Exclusive open/close state of the three attribute pickers.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// One of the attribute picker panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    /// Road type picker.
    Type,
    /// Road surface picker.
    Surface,
    /// Road condition picker.
    Condition,
}

/// Which panel is open and whether the picker bar is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleState {
    /// The open panel, if any. A single value, so two panels can never be
    /// open together.
    pub open_panel: Option<Panel>,
    /// Collapse/expand flag, independent of `open_panel`.
    pub visible: bool,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            open_panel: Some(Panel::Type),
            visible: true,
        }
    }
}

/// Input accepted by [`PanelToggleCoordinator::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "panel", rename_all = "kebab-case")]
pub enum ToggleEvent {
    /// Opens a panel, closing any other.
    Open(Panel),
    /// Closes whichever panel is open.
    Close,
    /// Opens a panel, or closes it if it is already open.
    Toggle(Panel),
    /// Flips the collapse/expand flag.
    ToggleVisibility,
}

/// Keeps at most one attribute panel open.
///
/// Starts with [`Panel::Type`] open and the bar expanded.
#[derive(Debug, Clone, Default)]
pub struct PanelToggleCoordinator {
    state: ToggleState,
}

impl PanelToggleCoordinator {
    /// Creates a coordinator in its initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[inline]
    pub fn state(&self) -> ToggleState {
        self.state
    }

    /// Returns the open panel, if any.
    #[inline]
    pub fn open_panel(&self) -> Option<Panel> {
        self.state.open_panel
    }

    /// Returns true if `panel` is the open one.
    pub fn is_open(&self, panel: Panel) -> bool {
        self.state.open_panel == Some(panel)
    }

    /// Returns the collapse/expand flag.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    /// Opens `panel`, closing whatever was open.
    pub fn open(&mut self, panel: Panel) -> ToggleState {
        self.state.open_panel = Some(panel);
        self.state
    }

    /// Closes the open panel.
    pub fn close(&mut self) -> ToggleState {
        self.state.open_panel = None;
        self.state
    }

    /// Opens `panel`, or closes it if it is already open.
    pub fn toggle(&mut self, panel: Panel) -> ToggleState {
        if self.is_open(panel) {
            self.close()
        } else {
            self.open(panel)
        }
    }

    /// Flips the collapse/expand flag without touching the open panel.
    pub fn toggle_visibility(&mut self) -> ToggleState {
        self.state.visible = !self.state.visible;
        self.state
    }

    /// Applies an event.
    pub fn apply(&mut self, event: ToggleEvent) -> ToggleState {
        match event {
            ToggleEvent::Open(panel) => self.open(panel),
            ToggleEvent::Close => self.close(),
            ToggleEvent::Toggle(panel) => self.toggle(panel),
            ToggleEvent::ToggleVisibility => self.toggle_visibility(),
        }
    }
}
