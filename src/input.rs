//! Per-frame input snapshot and the pointer binding map.
//!
//! The host application samples its windowing layer once per frame and hands
//! the result to [`crate::context::PlotContext::begin_plot`] as a
//! [`FrameInput`]. Nothing here talks to a window system directly.

use crate::geom::ScreenPoint;

/// Pointer buttons the interaction layer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub(crate) fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

/// Keyboard modifier state sampled with the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
        alt: false,
    };

    pub const ALT: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: true,
    };

    /// Whether every modifier required by `wanted` is currently held.
    pub fn contains(self, wanted: Modifiers) -> bool {
        (!wanted.ctrl || self.ctrl) && (!wanted.shift || self.shift) && (!wanted.alt || self.alt)
    }
}

/// Per-button edge and level state for one frame.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonState {
    down: bool,
    clicked: bool,
    double_clicked: bool,
    released: bool,
}

/// Snapshot of pointer state for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Pointer position in screen pixels.
    pub mouse_pos: ScreenPoint,
    /// Pointer movement since the previous frame.
    pub mouse_delta: ScreenPoint,
    /// Vertical scroll since the previous frame, positive away from the user.
    pub scroll_delta: f32,
    /// Modifier keys held this frame.
    pub modifiers: Modifiers,
    buttons: [ButtonState; 3],
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            mouse_pos: ScreenPoint::new(f32::NAN, f32::NAN),
            mouse_delta: ScreenPoint::new(0.0, 0.0),
            scroll_delta: 0.0,
            modifiers: Modifiers::NONE,
            buttons: [ButtonState::default(); 3],
        }
    }
}

impl FrameInput {
    pub fn new(mouse_pos: ScreenPoint) -> Self {
        Self {
            mouse_pos,
            ..Self::default()
        }
    }

    pub fn with_delta(mut self, delta: ScreenPoint) -> Self {
        self.mouse_delta = delta;
        self
    }

    pub fn with_scroll(mut self, delta: f32) -> Self {
        self.scroll_delta = delta;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark a button as held this frame.
    pub fn with_down(mut self, button: MouseButton) -> Self {
        self.buttons[button.index()].down = true;
        self
    }

    /// Mark a button as pressed this frame (and therefore also held).
    pub fn with_clicked(mut self, button: MouseButton) -> Self {
        self.buttons[button.index()].clicked = true;
        self.buttons[button.index()].down = true;
        self
    }

    /// Mark a button as double-clicked this frame.
    pub fn with_double_clicked(mut self, button: MouseButton) -> Self {
        self.buttons[button.index()].double_clicked = true;
        self.buttons[button.index()].down = true;
        self
    }

    /// Mark a button as released this frame.
    pub fn with_released(mut self, button: MouseButton) -> Self {
        self.buttons[button.index()].released = true;
        self
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].down
    }

    pub fn is_clicked(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].clicked
    }

    pub fn is_double_clicked(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].double_clicked
    }

    pub fn is_released(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].released
    }
}

/// Which button and modifier combinations drive each interaction.
#[derive(Debug, Clone, Copy)]
pub struct InputMap {
    /// Button that pans the plot and drags axis regions.
    pub pan_button: MouseButton,
    /// Modifiers required while panning.
    pub pan_mod: Modifiers,
    /// Button whose double-click fits axes to the plotted data.
    pub fit_button: MouseButton,
    /// Button that starts a box selection.
    pub box_select_button: MouseButton,
    /// Modifiers required to start a box selection.
    pub box_select_mod: Modifiers,
    /// Button that cancels an active box selection.
    pub box_select_cancel_button: MouseButton,
    /// Button that starts a query drag.
    pub query_button: MouseButton,
    /// Modifiers required to start a query drag.
    pub query_mod: Modifiers,
    /// Modifier that turns a box selection into a query instead.
    pub query_toggle_mod: Modifiers,
    /// Modifier restricting a drag or selection to the X direction.
    pub horizontal_mod: Modifiers,
    /// Modifier restricting a drag or selection to the Y direction.
    pub vertical_mod: Modifiers,
}

impl Default for InputMap {
    fn default() -> Self {
        Self {
            pan_button: MouseButton::Left,
            pan_mod: Modifiers::NONE,
            fit_button: MouseButton::Left,
            box_select_button: MouseButton::Right,
            box_select_mod: Modifiers::NONE,
            box_select_cancel_button: MouseButton::Left,
            query_button: MouseButton::Middle,
            query_mod: Modifiers::NONE,
            query_toggle_mod: Modifiers::CTRL,
            horizontal_mod: Modifiers::ALT,
            vertical_mod: Modifiers::SHIFT,
        }
    }
}
