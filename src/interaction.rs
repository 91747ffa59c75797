//! Pointer interaction: panning, zooming, box selection, queries, and
//! double-click fit requests.
//!
//! One [`process`] call per frame reduces the input snapshot against the
//! plot's persistent [`InteractionState`]. Exactly one gesture can be active
//! at a time; [`InteractionMode`] is the single source of truth for which.

use crate::axis::{AxisState, YAxis};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::input::{FrameInput, InputMap};
use crate::layout::PlotLayout;
use crate::transform::TransformCache;

/// Pixel threshold below which a selection or query is considered a stray
/// click and discarded.
const SELECT_MIN_PX: f32 = 2.0;

const ZOOM_RATE: f32 = 0.1;

/// The gesture currently in progress, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Dragging out a box selection.
    Selecting,
    /// Dragging out a query region.
    Querying,
    /// Moving an existing query region.
    DraggingQuery,
}

/// Persistent interaction state for one plot.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub mode: InteractionMode,
    /// Anchor pixel of an active selection.
    pub(crate) select_start: ScreenPoint,
    /// Anchor pixel of an active query drag.
    pub(crate) query_start: ScreenPoint,
    /// Query region in pixels relative to the plot rectangle's min corner,
    /// so it tracks the plot across resizes.
    pub(crate) query_rect: ScreenRect,
    /// A committed query region exists.
    pub queried: bool,
    /// Fit was requested this frame.
    pub(crate) fit_this_frame: bool,
    pub(crate) fit_x: bool,
    pub(crate) fit_y: [bool; 3],
}

impl InteractionState {
    /// Query region in absolute pixels.
    pub(crate) fn query_rect_abs(&self, plot_rect: ScreenRect) -> ScreenRect {
        self.query_rect
            .translated(plot_rect.min.x, plot_rect.min.y)
    }

    pub(crate) fn clear_fit(&mut self) {
        self.fit_this_frame = false;
        self.fit_x = false;
        self.fit_y = [false; 3];
    }
}

/// Reduce one frame of pointer input. Returns true when an axis range
/// changed and the transform cache must be rebuilt.
pub(crate) fn process(
    state: &mut InteractionState,
    x_axis: &mut AxisState,
    y_axes: &mut [AxisState; 3],
    layout: &PlotLayout,
    transforms: &TransformCache,
    input: &FrameInput,
    map: &InputMap,
    legend_hovered: bool,
) -> bool {
    let mouse = input.mouse_pos;
    let plot_rect = layout.plot_rect;
    let hov_plot = layout.hovers_plot(mouse);
    let mut changed = false;

    x_axis.hovered_ext = layout.hovers_x_region(mouse);
    x_axis.hovered_tot = x_axis.hovered_ext || hov_plot;
    for (i, y_axis) in y_axes.iter_mut().enumerate() {
        y_axis.hovered_ext = layout.hovers_y_region(YAxis::ALL[i], mouse);
        y_axis.hovered_tot = y_axis.hovered_ext || hov_plot;
    }
    let any_hovered =
        x_axis.hovered_tot || y_axes.iter().any(|y| y.hovered_tot);

    // End an axis drag.
    let any_dragging = x_axis.dragging || y_axes.iter().any(|y| y.dragging);
    if any_dragging && input.is_released(map.pan_button) {
        x_axis.dragging = false;
        for y_axis in y_axes.iter_mut() {
            y_axis.dragging = false;
        }
    }

    // Continue an axis drag.
    let delta = input.mouse_delta;
    if (x_axis.dragging || y_axes.iter().any(|y| y.dragging))
        && (delta.x != 0.0 || delta.y != 0.0)
    {
        if x_axis.dragging && !x_axis.options.fully_locked() {
            let a = transforms
                .pixels_to_plot(plot_rect.min.offset(-delta.x, -delta.y), YAxis::Y0)
                .x;
            let b = transforms
                .pixels_to_plot(plot_rect.max.offset(-delta.x, -delta.y), YAxis::Y0)
                .x;
            if !x_axis.options.lock_min {
                x_axis.range.min = a.min(b);
            }
            if !x_axis.options.lock_max {
                x_axis.range.max = a.max(b);
            }
            changed = true;
        }
        for (i, y_axis) in y_axes.iter_mut().enumerate() {
            if !y_axis.dragging || y_axis.options.fully_locked() {
                continue;
            }
            let axis = YAxis::ALL[i];
            let a = transforms
                .pixels_to_plot(plot_rect.min.offset(-delta.x, -delta.y), axis)
                .y;
            let b = transforms
                .pixels_to_plot(plot_rect.max.offset(-delta.x, -delta.y), axis)
                .y;
            if !y_axis.options.lock_min {
                y_axis.range.min = a.min(b);
            }
            if !y_axis.options.lock_max {
                y_axis.range.max = a.max(b);
            }
            changed = true;
        }
    }

    // Scroll zoom, anchored at the pointer.
    if input.scroll_delta != 0.0 && any_hovered {
        let mut rate = ZOOM_RATE;
        if input.scroll_delta > 0.0 {
            rate = (-rate) / (1.0 + 2.0 * rate);
        }
        let tx = (mouse.x - plot_rect.min.x) / plot_rect.width();
        let ty = (mouse.y - plot_rect.min.y) / plot_rect.height();
        let zoomed_min = plot_rect.min.offset(
            -plot_rect.width() * tx * rate,
            -plot_rect.height() * ty * rate,
        );
        let zoomed_max = plot_rect.max.offset(
            plot_rect.width() * (1.0 - tx) * rate,
            plot_rect.height() * (1.0 - ty) * rate,
        );
        if x_axis.hovered_tot && !x_axis.options.fully_locked() {
            let a = transforms.pixels_to_plot(zoomed_min, YAxis::Y0).x;
            let b = transforms.pixels_to_plot(zoomed_max, YAxis::Y0).x;
            if !x_axis.options.lock_min {
                x_axis.range.min = a.min(b);
            }
            if !x_axis.options.lock_max {
                x_axis.range.max = a.max(b);
            }
            changed = true;
        }
        for (i, y_axis) in y_axes.iter_mut().enumerate() {
            if !y_axis.hovered_tot || y_axis.options.fully_locked() {
                continue;
            }
            let axis = YAxis::ALL[i];
            let a = transforms.pixels_to_plot(zoomed_min, axis).y;
            let b = transforms.pixels_to_plot(zoomed_max, axis).y;
            if !y_axis.options.lock_min {
                y_axis.range.min = a.min(b);
            }
            if !y_axis.options.lock_max {
                y_axis.range.max = a.max(b);
            }
            changed = true;
        }
    }

    // Box selection.
    if state.mode == InteractionMode::Selecting {
        if input.is_released(map.box_select_button) {
            let width = (state.select_start.x - mouse.x).abs();
            let height = (state.select_start.y - mouse.y).abs();
            let skip_x = input.modifiers.contains(map.horizontal_mod);
            let skip_y = input.modifiers.contains(map.vertical_mod);
            if width > SELECT_MIN_PX
                && !skip_x
                && !x_axis.options.fully_locked()
            {
                let a = transforms.pixels_to_plot(state.select_start, YAxis::Y0).x;
                let b = transforms.pixels_to_plot(mouse, YAxis::Y0).x;
                if !x_axis.options.lock_min {
                    x_axis.range.min = a.min(b);
                }
                if !x_axis.options.lock_max {
                    x_axis.range.max = a.max(b);
                }
                changed = true;
            }
            if height > SELECT_MIN_PX && !skip_y {
                for (i, y_axis) in y_axes.iter_mut().enumerate() {
                    if y_axis.options.fully_locked() {
                        continue;
                    }
                    let axis = YAxis::ALL[i];
                    let a = transforms.pixels_to_plot(state.select_start, axis).y;
                    let b = transforms.pixels_to_plot(mouse, axis).y;
                    if !y_axis.options.lock_min {
                        y_axis.range.min = a.min(b);
                    }
                    if !y_axis.options.lock_max {
                        y_axis.range.max = a.max(b);
                    }
                    changed = true;
                }
            }
            state.mode = InteractionMode::Idle;
        } else if input.is_clicked(map.box_select_cancel_button) {
            state.mode = InteractionMode::Idle;
        } else if input.modifiers.contains(map.query_toggle_mod) {
            // Holding the toggle modifier converts the selection in flight
            // into a query.
            state.mode = InteractionMode::Querying;
            state.query_start = state.select_start;
        }
    }

    // Query in progress.
    if state.mode == InteractionMode::Querying {
        let clamped = ScreenPoint::new(
            mouse.x.clamp(plot_rect.min.x, plot_rect.max.x),
            mouse.y.clamp(plot_rect.min.y, plot_rect.max.y),
        );
        let abs = ScreenRect::from_corners(state.query_start, clamped);
        state.query_rect = abs.translated(-plot_rect.min.x, -plot_rect.min.y);
        state.queried =
            abs.width() > SELECT_MIN_PX && abs.height() > SELECT_MIN_PX;
        if !input.is_down(map.query_button) && !input.is_down(map.box_select_button) {
            state.mode = InteractionMode::Idle;
        }
    }

    // Moving an existing query region.
    if state.mode == InteractionMode::DraggingQuery {
        state.query_rect = state.query_rect.translated(delta.x, delta.y);
        if input.is_released(map.pan_button) {
            state.mode = InteractionMode::Idle;
        }
    }
    if state.mode == InteractionMode::Idle
        && state.queried
        && input.is_clicked(map.pan_button)
        && state.query_rect_abs(plot_rect).contains(mouse)
    {
        state.mode = InteractionMode::DraggingQuery;
    }

    // New gestures start only from the idle state, with the query drag
    // above taking priority over a fresh selection or pan.
    let starting_allowed =
        state.mode == InteractionMode::Idle && hov_plot && !legend_hovered;
    if starting_allowed
        && input.is_clicked(map.box_select_button)
        && input.modifiers.contains(map.box_select_mod)
    {
        state.mode = InteractionMode::Selecting;
        state.select_start = mouse;
    } else if starting_allowed
        && input.is_clicked(map.query_button)
        && input.modifiers.contains(map.query_mod)
    {
        state.mode = InteractionMode::Querying;
        state.query_start = mouse;
        state.query_rect = ScreenRect::default();
        state.queried = false;
    } else if state.mode == InteractionMode::Idle
        && !legend_hovered
        && any_hovered
        && !any_dragging
        && input.is_clicked(map.pan_button)
        && input.modifiers.contains(map.pan_mod)
    {
        x_axis.dragging = x_axis.hovered_tot;
        for y_axis in y_axes.iter_mut() {
            y_axis.dragging = y_axis.hovered_tot;
        }
    }

    // Double-click fit request, scoped to the hovered axes.
    if any_hovered && input.is_double_clicked(map.fit_button) {
        state.fit_this_frame = true;
        state.fit_x = x_axis.hovered_tot;
        for (i, y_axis) in y_axes.iter().enumerate() {
            state.fit_y[i] = y_axis.hovered_tot;
        }
        // The double click's press also set dragging above; undo it.
        x_axis.dragging = false;
        for y_axis in y_axes.iter_mut() {
            y_axis.dragging = false;
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{AxisOptions, AxisState};
    use crate::geom::ScreenRect;
    use crate::input::{Modifiers, MouseButton};
    use crate::range::Range;

    struct Fixture {
        state: InteractionState,
        x_axis: AxisState,
        y_axes: [AxisState; 3],
        layout: PlotLayout,
        map: InputMap,
    }

    impl Fixture {
        fn new() -> Self {
            let frame =
                ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(500.0, 400.0));
            let layout = PlotLayout::compute(
                frame,
                frame,
                crate::layout::LayoutSpec {
                    y_label_widths: [45.0, 0.0, 0.0],
                    y_present: [true, false, false],
                    x_label_height: 13.0,
                    ..Default::default()
                },
            );
            let mut x_axis = AxisState::default();
            x_axis.range = Range::new(0.0, 10.0);
            let mut y0 = AxisState::default();
            y0.range = Range::new(0.0, 10.0);
            Self {
                state: InteractionState::default(),
                x_axis,
                y_axes: [y0, AxisState::default(), AxisState::default()],
                layout,
                map: InputMap::default(),
            }
        }

        fn run(&mut self, input: FrameInput) -> bool {
            let transforms =
                TransformCache::rebuild(self.layout.plot_rect, &self.x_axis, &self.y_axes);
            process(
                &mut self.state,
                &mut self.x_axis,
                &mut self.y_axes,
                &self.layout,
                &transforms,
                &input,
                &self.map,
                false,
            )
        }

        fn center(&self) -> ScreenPoint {
            self.layout.plot_rect.center()
        }
    }

    #[test]
    fn scroll_up_zooms_in_around_center() {
        let mut fixture = Fixture::new();
        let changed = fixture.run(FrameInput::new(fixture.center()).with_scroll(1.0));
        assert!(changed);
        let rate = -ZOOM_RATE / (1.0 + 2.0 * ZOOM_RATE);
        let expected = 10.0 * (1.0 + rate as f64);
        assert!((fixture.x_axis.range.span() - expected).abs() < 1e-3);
        assert!((fixture.y_axes[0].range.span() - expected).abs() < 1e-3);
    }

    #[test]
    fn scroll_leaves_locked_axis_untouched() {
        let mut fixture = Fixture::new();
        fixture.x_axis.options = AxisOptions::default()
            .with_lock_min(true)
            .with_lock_max(true);
        fixture.run(FrameInput::new(fixture.center()).with_scroll(-1.0));
        assert_eq!(fixture.x_axis.range, Range::new(0.0, 10.0));
        assert!(fixture.y_axes[0].range.span() > 10.0);
    }

    #[test]
    fn pan_click_then_drag_shifts_ranges() {
        let mut fixture = Fixture::new();
        fixture.run(FrameInput::new(fixture.center()).with_clicked(MouseButton::Left));
        assert!(fixture.x_axis.dragging);
        assert!(fixture.y_axes[0].dragging);

        let before = fixture.x_axis.range;
        fixture.run(
            FrameInput::new(fixture.center())
                .with_down(MouseButton::Left)
                .with_delta(ScreenPoint::new(20.0, 0.0)),
        );
        // Dragging right moves the view left in data space.
        assert!(fixture.x_axis.range.min < before.min);
        assert!((fixture.x_axis.range.span() - before.span()).abs() < 1e-9);

        fixture.run(FrameInput::new(fixture.center()).with_released(MouseButton::Left));
        assert!(!fixture.x_axis.dragging);
    }

    #[test]
    fn box_select_commits_both_ranges() {
        let mut fixture = Fixture::new();
        let plot = fixture.layout.plot_rect;
        let start = ScreenPoint::new(plot.min.x + plot.width() * 0.25, plot.min.y + 40.0);
        let end = ScreenPoint::new(plot.min.x + plot.width() * 0.75, plot.max.y - 40.0);
        fixture.run(FrameInput::new(start).with_clicked(MouseButton::Right));
        assert_eq!(fixture.state.mode, InteractionMode::Selecting);

        let changed = fixture.run(FrameInput::new(end).with_released(MouseButton::Right));
        assert!(changed);
        assert_eq!(fixture.state.mode, InteractionMode::Idle);
        assert!((fixture.x_axis.range.min - 2.5).abs() < 0.05);
        assert!((fixture.x_axis.range.max - 7.5).abs() < 0.05);
        assert!(fixture.y_axes[0].range.span() < 10.0);
    }

    #[test]
    fn horizontal_mod_skips_x_commit() {
        let mut fixture = Fixture::new();
        let plot = fixture.layout.plot_rect;
        fixture.run(
            FrameInput::new(plot.min.offset(20.0, 20.0)).with_clicked(MouseButton::Right),
        );
        fixture.run(
            FrameInput::new(plot.max.offset(-20.0, -20.0))
                .with_released(MouseButton::Right)
                .with_modifiers(Modifiers::ALT),
        );
        assert_eq!(fixture.x_axis.range, Range::new(0.0, 10.0));
        assert!(fixture.y_axes[0].range.span() < 10.0);
    }

    #[test]
    fn tiny_selection_is_discarded() {
        let mut fixture = Fixture::new();
        let start = fixture.center();
        fixture.run(FrameInput::new(start).with_clicked(MouseButton::Right));
        let changed = fixture.run(
            FrameInput::new(start.offset(1.0, 1.0)).with_released(MouseButton::Right),
        );
        assert!(!changed);
        assert_eq!(fixture.x_axis.range, Range::new(0.0, 10.0));
    }

    #[test]
    fn query_drag_produces_region() {
        let mut fixture = Fixture::new();
        let start = fixture.center();
        fixture.run(FrameInput::new(start).with_clicked(MouseButton::Middle));
        assert_eq!(fixture.state.mode, InteractionMode::Querying);

        fixture.run(FrameInput::new(start.offset(30.0, 30.0)).with_down(MouseButton::Middle));
        assert!(fixture.state.queried);

        fixture.run(FrameInput::new(start.offset(30.0, 30.0)));
        assert_eq!(fixture.state.mode, InteractionMode::Idle);
        assert!(fixture.state.queried);
        let abs = fixture.state.query_rect_abs(fixture.layout.plot_rect);
        assert_eq!(abs.width(), 30.0);
    }

    #[test]
    fn double_click_flags_hovered_axes_for_fit() {
        let mut fixture = Fixture::new();
        fixture.run(FrameInput::new(fixture.center()).with_double_clicked(MouseButton::Left));
        assert!(fixture.state.fit_this_frame);
        assert!(fixture.state.fit_x);
        assert!(fixture.state.fit_y[0]);
        assert!(!fixture.x_axis.dragging);
    }

    #[test]
    fn x_region_click_drags_only_x() {
        let mut fixture = Fixture::new();
        let plot = fixture.layout.plot_rect;
        let below = ScreenPoint::new(plot.center().x, plot.max.y + 5.0);
        fixture.run(FrameInput::new(below).with_clicked(MouseButton::Left));
        assert!(fixture.x_axis.dragging);
        assert!(!fixture.y_axes[0].dragging);
    }
}
