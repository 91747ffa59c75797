//! The plot context: the immediate-mode entry point tying everything
//! together.
//!
//! A [`PlotContext`] owns all retained plot state. Each frame the caller
//! brackets a plot with [`PlotContext::begin_plot`] and
//! [`PlotContext::end_plot`], submits items in between, and replays the
//! returned render list against its drawing backend. API misuse (an
//! unbalanced bracket, an item outside a plot) is reported through
//! `tracing` and panics in debug builds; release builds ignore the call.

use tracing::{error, trace};

use crate::axis::{Axis, AxisOptions, AxisScale, AxisState, YAxis};
use crate::colormap::Colormap;
use crate::geom::{PlotPoint, ScreenPoint, ScreenRect};
use crate::input::{FrameInput, InputMap};
use crate::interaction::{self, InteractionMode};
use crate::layout::{self, LABEL_OFFSET, LayoutSpec, PlotLayout};
use crate::range::Range;
use crate::registry::{PlotId, PlotRegistry};
use crate::render::{
    Color, LineSegment, LineStyle, MarkerStyle, RectStyle, RenderCommand, RenderList, TextStyle,
    build_line_segments, build_scatter_points,
};
use crate::style::{PlotStyle, StyleColor, StyleStacks, StyleVar};
use crate::text::{MonospaceMeasurer, TextMeasurer};
use crate::ticks::{TickSet, format_compact};
use crate::transform::TransformCache;

/// Minor divisions per major tick interval on linear axes.
const SUB_DIV: usize = 10;

/// Tick mark lengths in pixels.
const MAJOR_TICK_LEN: f32 = 10.0;
const MINOR_TICK_LEN: f32 = 5.0;

const LEGEND_PADDING: f32 = 5.0;
const LEGEND_ICON_SIZE: f32 = 10.0;

macro_rules! usage_error {
    ($($arg:tt)*) => {{
        error!($($arg)*);
        debug_assert!(false, "plot API usage error");
    }};
}

/// Per-plot configuration, applied on every `begin_plot`.
///
/// Submitting a changed configuration takes effect immediately; submitting
/// the same configuration preserves options the user has mutated at
/// runtime.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// X axis options.
    pub x: AxisOptions,
    /// First Y axis options.
    pub y: AxisOptions,
    /// Second Y axis; present only when set.
    pub y2: Option<AxisOptions>,
    /// Third Y axis; present only when set.
    pub y3: Option<AxisOptions>,
    /// Draw the legend.
    pub legend: bool,
    /// Allow box selection.
    pub box_select: bool,
    /// Allow query regions.
    pub query: bool,
    /// Replace the pointer with full-width crosshair lines while hovered.
    pub crosshairs: bool,
    /// Print the pointer's data coordinates in the plot corner.
    pub mouse_text: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotConfig {
    pub fn new() -> Self {
        Self {
            x: AxisOptions::default(),
            y: AxisOptions::default(),
            y2: None,
            y3: None,
            legend: true,
            box_select: true,
            query: false,
            crosshairs: false,
            mouse_text: true,
        }
    }

    pub fn with_x(mut self, options: AxisOptions) -> Self {
        self.x = options;
        self
    }

    pub fn with_y(mut self, options: AxisOptions) -> Self {
        self.y = options;
        self
    }

    pub fn with_y2(mut self, options: AxisOptions) -> Self {
        self.y2 = Some(options);
        self
    }

    pub fn with_y3(mut self, options: AxisOptions) -> Self {
        self.y3 = Some(options);
        self
    }

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_box_select(mut self, box_select: bool) -> Self {
        self.box_select = box_select;
        self
    }

    pub fn with_query(mut self, query: bool) -> Self {
        self.query = query;
        self
    }

    pub fn with_crosshairs(mut self, crosshairs: bool) -> Self {
        self.crosshairs = crosshairs;
        self
    }

    pub fn with_mouse_text(mut self, mouse_text: bool) -> Self {
        self.mouse_text = mouse_text;
        self
    }
}

/// When a `set_next_*` range request takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cond {
    /// Only while the plot does not exist yet; an established plot keeps
    /// its range.
    #[default]
    Once,
    /// On every `begin_plot`.
    Always,
}

/// Caller-supplied ticks for the next plot.
#[derive(Debug, Clone)]
enum NextTicks {
    Explicit {
        values: Vec<f64>,
        labels: Option<Vec<String>>,
        show_default: bool,
    },
    /// `count` ticks spread evenly across the final axis range.
    Spaced {
        count: usize,
        labels: Option<Vec<String>>,
        show_default: bool,
    },
}

impl NextTicks {
    fn show_default(&self) -> bool {
        match self {
            NextTicks::Explicit { show_default, .. }
            | NextTicks::Spaced { show_default, .. } => *show_default,
        }
    }
}

/// One-shot state consumed by the next `begin_plot`.
#[derive(Debug, Default)]
struct NextPlotData {
    x_range: Option<(Range, Cond)>,
    y_ranges: [Option<(Range, Cond)>; 3],
    x_ticks: Option<NextTicks>,
    y_ticks: Option<NextTicks>,
    fit: bool,
}

/// Running min/max accumulator for fit requests.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min: f64,
    max: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Extent {
    fn add(&mut self, value: f64) {
        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    fn valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Frame state of the plot currently between `begin_plot` and `end_plot`.
struct CurrentPlot {
    index: usize,
    title: String,
    config: PlotConfig,
    layout: PlotLayout,
    transforms: TransformCache,
    input: FrameInput,
    y_present: [bool; 3],
    current_y: YAxis,
    fit_x: Extent,
    fit_y: [Extent; 3],
}

/// Owner of all plotting state. Not `Sync`; one context per UI thread.
pub struct PlotContext {
    registry: PlotRegistry,
    style: PlotStyle,
    stacks: StyleStacks,
    input_map: InputMap,
    colormap: Colormap,
    measurer: Box<dyn TextMeasurer>,
    next: NextPlotData,
    current: Option<CurrentPlot>,
    // Scratch reused across frames.
    x_ticks: TickSet,
    y_ticks: [TickSet; 3],
    render: RenderList,
}

impl Default for PlotContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotContext {
    /// Create a context measuring text with the built-in monospace metrics.
    pub fn new() -> Self {
        Self::with_measurer(Box::new(MonospaceMeasurer::default()))
    }

    /// Create a context with caller-supplied text metrics.
    pub fn with_measurer(measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            registry: PlotRegistry::default(),
            style: PlotStyle::default(),
            stacks: StyleStacks::default(),
            input_map: InputMap::default(),
            colormap: Colormap::default(),
            measurer,
            next: NextPlotData::default(),
            current: None,
            x_ticks: TickSet::new(),
            y_ticks: [TickSet::new(), TickSet::new(), TickSet::new()],
            render: RenderList::new(),
        }
    }

    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut PlotStyle {
        &mut self.style
    }

    pub fn set_colormap(&mut self, colormap: Colormap) {
        self.colormap = colormap;
    }

    /// Color new items from an explicit table instead of a built-in map.
    pub fn set_colormap_colors(&mut self, colors: &[Color]) {
        if colors.is_empty() {
            usage_error!("set_colormap_colors with an empty table");
            return;
        }
        self.colormap = Colormap::Custom(colors.to_vec());
    }

    pub fn set_input_map(&mut self, map: InputMap) {
        self.input_map = map;
    }

    pub fn input_map(&self) -> &InputMap {
        &self.input_map
    }

    /// Override a style color until the matching pop.
    pub fn push_style_color(&mut self, which: StyleColor, color: Color) {
        self.stacks.push_color(&mut self.style, which, color);
    }

    pub fn pop_style_color(&mut self) {
        if !self.stacks.pop_color(&mut self.style) {
            usage_error!("pop_style_color on an empty stack");
        }
    }

    /// Override a style variable until the matching pop.
    pub fn push_style_var(&mut self, which: StyleVar, value: f32) {
        self.stacks.push_var(&mut self.style, which, value);
    }

    pub fn pop_style_var(&mut self) {
        if !self.stacks.pop_var(&mut self.style) {
            usage_error!("pop_style_var on an empty stack");
        }
    }

    /// Set the X axis range the next plot opens with. `Cond::Once`
    /// requests are dropped when the plot already exists.
    pub fn set_next_x_range(&mut self, range: Range, cond: Cond) {
        self.next.x_range = Some((range, cond));
    }

    /// Set a Y axis range the next plot opens with.
    pub fn set_next_y_range(&mut self, axis: YAxis, range: Range, cond: Cond) {
        self.next.y_ranges[axis.index()] = Some((range, cond));
    }

    /// Set the next plot's X ticks to explicit positions. With
    /// `show_default` the generated ticks are kept alongside them.
    pub fn set_next_x_ticks(&mut self, values: &[f64], labels: Option<&[&str]>, show_default: bool) {
        self.next.x_ticks = Some(NextTicks::Explicit {
            values: values.to_vec(),
            labels: labels.map(owned_labels),
            show_default,
        });
    }

    /// Set the next plot's X ticks to `count` evenly spaced ones.
    pub fn set_next_x_tick_count(
        &mut self,
        count: usize,
        labels: Option<&[&str]>,
        show_default: bool,
    ) {
        if count < 2 {
            usage_error!(count, "tick count must be at least 2");
            return;
        }
        self.next.x_ticks = Some(NextTicks::Spaced {
            count,
            labels: labels.map(owned_labels),
            show_default,
        });
    }

    /// Set the next plot's first-Y-axis ticks to explicit positions.
    pub fn set_next_y_ticks(&mut self, values: &[f64], labels: Option<&[&str]>, show_default: bool) {
        self.next.y_ticks = Some(NextTicks::Explicit {
            values: values.to_vec(),
            labels: labels.map(owned_labels),
            show_default,
        });
    }

    /// Set the next plot's first-Y-axis ticks to `count` evenly spaced
    /// ones.
    pub fn set_next_y_tick_count(
        &mut self,
        count: usize,
        labels: Option<&[&str]>,
        show_default: bool,
    ) {
        if count < 2 {
            usage_error!(count, "tick count must be at least 2");
            return;
        }
        self.next.y_ticks = Some(NextTicks::Spaced {
            count,
            labels: labels.map(owned_labels),
            show_default,
        });
    }

    /// Fit every axis of the next plot to its data.
    pub fn fit_next_plot(&mut self) {
        self.next.fit = true;
    }

    /// Open a plot. Returns false (and renders nothing) when the frame
    /// rectangle is degenerate; in that case `end_plot` must not be called.
    pub fn begin_plot(
        &mut self,
        title: &str,
        config: PlotConfig,
        frame: ScreenRect,
        input: FrameInput,
    ) -> bool {
        if self.current.is_some() {
            usage_error!(title, "begin_plot inside an open plot");
            return false;
        }
        if !frame.is_valid() {
            self.next = NextPlotData::default();
            return false;
        }

        let id = PlotId::from_title(title);
        let (index, created) = self.registry.get_or_create(id);
        let next = std::mem::take(&mut self.next);
        let y_present = [true, config.y2.is_some(), config.y3.is_some()];

        {
            let plot = self.registry.get_mut(index);
            plot.x_axis.apply_options(config.x, created);
            plot.y_axes[0].apply_options(config.y, created);
            plot.y_axes[1].apply_options(config.y2.unwrap_or_default(), created);
            plot.y_axes[2].apply_options(config.y3.unwrap_or_default(), created);

            if let Some((range, cond)) = next.x_range
                && (created || cond == Cond::Always)
            {
                plot.x_axis.range = range;
            }
            for (i, request) in next.y_ranges.iter().enumerate() {
                if let Some((range, cond)) = request
                    && (created || *cond == Cond::Always)
                {
                    plot.y_axes[i].range = *range;
                }
            }

            plot.x_axis.begin_frame();
            plot.x_axis.constrain();
            for y_axis in &mut plot.y_axes {
                y_axis.begin_frame();
                y_axis.constrain();
            }
            plot.items.begin_frame();

            if next.fit {
                plot.interaction.fit_this_frame = true;
                plot.interaction.fit_x = true;
                plot.interaction.fit_y = y_present;
            }
        }

        trace!(title, created, "begin plot");

        let canvas = PlotLayout::canvas(frame, self.style.plot_padding);
        self.generate_ticks(index, canvas, y_present, next.x_ticks.as_ref(), next.y_ticks.as_ref());

        let title_height = if title.is_empty() {
            0.0
        } else {
            self.measurer.measure(title).1
        };
        let spec = {
            let plot = self.registry.get(index);
            LayoutSpec {
                title_height,
                x_label_height: if plot.x_axis.options.tick_labels {
                    self.x_ticks.max_label_height()
                } else {
                    0.0
                },
                y_label_widths: std::array::from_fn(|i| {
                    if y_present[i] && plot.y_axes[i].options.tick_labels {
                        self.y_ticks[i].max_label_width()
                    } else {
                        0.0
                    }
                }),
                y_present,
            }
        };
        let layout = PlotLayout::compute(frame, canvas, spec);

        let mut transforms = {
            let plot = self.registry.get(index);
            TransformCache::rebuild(layout.plot_rect, &plot.x_axis, &plot.y_axes)
        };

        let changed = {
            let plot = self.registry.get_mut(index);
            let (x_axis, y_axes) = (&mut plot.x_axis, &mut plot.y_axes);
            let changed = interaction::process(
                &mut plot.interaction,
                x_axis,
                y_axes,
                &layout,
                &transforms,
                &input,
                &self.input_map,
                plot.legend_hovered,
            );
            // Gestures disabled by the configuration are cancelled right
            // after the reducer.
            if !config.box_select && plot.interaction.mode == InteractionMode::Selecting {
                plot.interaction.mode = InteractionMode::Idle;
            }
            if !config.query {
                if matches!(
                    plot.interaction.mode,
                    InteractionMode::Querying | InteractionMode::DraggingQuery
                ) {
                    plot.interaction.mode = InteractionMode::Idle;
                }
                plot.interaction.queried = false;
            }
            changed
        };

        if changed {
            let plot = self.registry.get_mut(index);
            plot.x_axis.constrain();
            for y_axis in &mut plot.y_axes {
                y_axis.constrain();
            }
            transforms = TransformCache::rebuild(layout.plot_rect, &plot.x_axis, &plot.y_axes);
            self.generate_ticks(
                index,
                canvas,
                y_present,
                next.x_ticks.as_ref(),
                next.y_ticks.as_ref(),
            );
        }

        for tick in self.x_ticks.iter_mut() {
            tick.pixel = transforms
                .plot_to_pixels(PlotPoint::new(tick.position, 0.0), YAxis::Y0)
                .x;
        }
        for (i, set) in self.y_ticks.iter_mut().enumerate() {
            for tick in set.iter_mut() {
                tick.pixel = transforms
                    .plot_to_pixels(PlotPoint::new(0.0, tick.position), YAxis::ALL[i])
                    .y;
            }
        }

        self.render.clear();
        self.render_background(index, &layout);
        self.render
            .push(RenderCommand::ClipRect(layout.plot_rect));

        self.current = Some(CurrentPlot {
            index,
            title: title.to_owned(),
            config,
            layout,
            transforms,
            input,
            y_present,
            current_y: YAxis::Y0,
            fit_x: Extent::default(),
            fit_y: [Extent::default(); 3],
        });
        true
    }

    /// Direct subsequent items at one of the Y axes.
    pub fn set_plot_y_axis(&mut self, axis: YAxis) {
        let Some(current) = self.current.as_mut() else {
            usage_error!("set_plot_y_axis outside a plot");
            return;
        };
        if !current.y_present[axis.index()] {
            usage_error!(axis = axis.index(), "Y axis not enabled for this plot");
            return;
        }
        current.current_y = axis;
    }

    /// Submit a polyline item, colored from the colormap.
    pub fn plot_line(&mut self, name: &str, points: &[PlotPoint]) {
        self.plot_item(name, points, None, false);
    }

    /// Submit a polyline item with an explicit color.
    pub fn plot_line_colored(&mut self, name: &str, points: &[PlotPoint], color: Color) {
        self.plot_item(name, points, Some(color), false);
    }

    /// Submit a scatter item, colored from the colormap.
    pub fn plot_scatter(&mut self, name: &str, points: &[PlotPoint]) {
        self.plot_item(name, points, None, true);
    }

    /// Submit a scatter item with an explicit color.
    pub fn plot_scatter_colored(&mut self, name: &str, points: &[PlotPoint], color: Color) {
        self.plot_item(name, points, Some(color), true);
    }

    fn plot_item(
        &mut self,
        name: &str,
        points: &[PlotPoint],
        color_override: Option<Color>,
        scatter: bool,
    ) {
        let Some(current) = self.current.as_mut() else {
            usage_error!(name, "plot item submitted outside a plot");
            return;
        };
        let plot = self.registry.get_mut(current.index);
        let item_index = plot.items.register(name, &self.colormap, color_override);
        let item = plot.items.get(item_index);
        if !item.show {
            return;
        }

        if plot.interaction.fit_this_frame {
            let y_extent = &mut current.fit_y[current.current_y.index()];
            for point in points {
                if point.is_finite() {
                    current.fit_x.add(point.x);
                    y_extent.add(point.y);
                }
            }
        }

        let weight = if item.highlighted {
            self.style.line_weight * 2.0
        } else {
            self.style.line_weight
        };
        let color = item.color;
        if scatter {
            let mut out = Vec::new();
            build_scatter_points(
                points,
                &current.transforms,
                current.current_y,
                current.layout.plot_rect,
                &mut out,
            );
            self.render.push(RenderCommand::Points {
                points: out,
                style: MarkerStyle {
                    color,
                    size: self.style.marker_size,
                    ..MarkerStyle::default()
                },
            });
        } else {
            let mut out = Vec::new();
            build_line_segments(
                points,
                &current.transforms,
                current.current_y,
                current.layout.plot_rect,
                &mut out,
            );
            self.render.push(RenderCommand::LineSegments {
                segments: out,
                style: LineStyle {
                    color,
                    width: weight,
                },
            });
        }
    }

    /// Pointer is over the plot area.
    pub fn is_plot_hovered(&self) -> bool {
        match &self.current {
            Some(current) => current.layout.hovers_plot(current.input.mouse_pos),
            None => false,
        }
    }

    /// Pointer is over an axis label strip.
    pub fn is_axis_hovered(&self, axis: Axis) -> bool {
        let Some(current) = &self.current else {
            return false;
        };
        let plot = self.registry.get(current.index);
        match axis {
            Axis::X => plot.x_axis.hovered_ext,
            Axis::Y(y_axis) => plot.y_axes[y_axis.index()].hovered_ext,
        }
    }

    /// Pointer position in data coordinates of the given Y axis.
    pub fn plot_mouse_pos(&self, y_axis: YAxis) -> Option<PlotPoint> {
        let current = self.current.as_ref()?;
        Some(
            current
                .transforms
                .pixels_to_plot(current.input.mouse_pos, y_axis),
        )
    }

    /// Convert a pixel position to data coordinates.
    pub fn pixels_to_plot(&self, pixel: ScreenPoint, y_axis: YAxis) -> Option<PlotPoint> {
        let current = self.current.as_ref()?;
        Some(current.transforms.pixels_to_plot(pixel, y_axis))
    }

    /// Convert a data point to pixels.
    pub fn plot_to_pixels(&self, point: PlotPoint, y_axis: YAxis) -> Option<ScreenPoint> {
        let current = self.current.as_ref()?;
        Some(current.transforms.plot_to_pixels(point, y_axis))
    }

    /// Current axis ranges of the open plot.
    pub fn plot_limits(&self, y_axis: YAxis) -> Option<(Range, Range)> {
        let current = self.current.as_ref()?;
        let plot = self.registry.get(current.index);
        Some((plot.x_axis.range, plot.y_axes[y_axis.index()].range))
    }

    /// A committed query region exists on the open plot.
    pub fn is_plot_queried(&self) -> bool {
        match &self.current {
            Some(current) => self.registry.get(current.index).interaction.queried,
            None => false,
        }
    }

    /// Data-space bounds of the query region, against the given Y axis.
    pub fn plot_query(&self, y_axis: YAxis) -> Option<(Range, Range)> {
        let current = self.current.as_ref()?;
        let plot = self.registry.get(current.index);
        if !plot.interaction.queried {
            return None;
        }
        let rect = plot.interaction.query_rect_abs(current.layout.plot_rect);
        let a = current.transforms.pixels_to_plot(rect.min, y_axis);
        let b = current.transforms.pixels_to_plot(rect.max, y_axis);
        Some((
            Range::new(a.x.min(b.x), a.x.max(b.x)),
            Range::new(a.y.min(b.y), a.y.max(b.y)),
        ))
    }

    /// Toggle an item's visibility by name. Effective on the next frame's
    /// submission of that item.
    pub fn set_item_visibility(&mut self, plot_title: &str, item: &str, show: bool) {
        let id = PlotId::from_title(plot_title);
        let (index, _) = self.registry.get_or_create(id);
        if let Some(item) = self.registry.get_mut(index).items.by_name_mut(item) {
            item.show = show;
        }
    }

    /// Close the open plot, draw overlays, apply pending fits, and return
    /// the frame's render list.
    pub fn end_plot(&mut self) -> &RenderList {
        let Some(current) = self.current.take() else {
            usage_error!("end_plot without begin_plot");
            return &self.render;
        };

        self.render.push(RenderCommand::ClipEnd);
        self.render_overlays(&current);
        self.update_legend(&current);
        self.apply_fit(&current);

        trace!(title = current.title.as_str(), "end plot");
        &self.render
    }

    fn generate_ticks(
        &mut self,
        index: usize,
        canvas: ScreenRect,
        y_present: [bool; 3],
        x_custom: Option<&NextTicks>,
        y_custom: Option<&NextTicks>,
    ) {
        let plot = self.registry.get(index);
        let measurer = self.measurer.as_ref();

        self.x_ticks.clear();
        if plot.x_axis.options.wants_ticks() {
            let capacity = match plot.x_axis.options.scale {
                AxisScale::Time => {
                    let sample = measurer.measure("00:00:00").0;
                    layout::time_label_capacity(canvas.width(), sample)
                }
                _ => layout::x_tick_count(canvas.width()),
            };
            build_axis_ticks(&mut self.x_ticks, &plot.x_axis, x_custom, capacity, measurer);
        }

        for (i, set) in self.y_ticks.iter_mut().enumerate() {
            set.clear();
            if !y_present[i] || !plot.y_axes[i].options.wants_ticks() {
                continue;
            }
            let custom = if i == 0 { y_custom } else { None };
            let capacity = layout::y_tick_count(canvas.height());
            build_axis_ticks(set, &plot.y_axes[i], custom, capacity, measurer);
        }
    }

    fn render_background(&mut self, index: usize, layout: &PlotLayout) {
        self.render.push(RenderCommand::Rect {
            rect: layout.frame_rect,
            style: RectStyle {
                fill: self.style.color(StyleColor::FrameBg),
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
            },
        });
        self.render.push(RenderCommand::Rect {
            rect: layout.plot_rect,
            style: RectStyle {
                fill: self.style.color(StyleColor::PlotBg),
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
            },
        });

        let plot = self.registry.get(index);
        let plot_rect = layout.plot_rect;
        if plot.x_axis.options.grid_lines {
            let mut majors = Vec::new();
            let mut minors = Vec::new();
            for tick in self.x_ticks.iter() {
                let segment = LineSegment::new(
                    ScreenPoint::new(tick.pixel, plot_rect.min.y),
                    ScreenPoint::new(tick.pixel, plot_rect.max.y),
                );
                if tick.major {
                    majors.push(segment);
                } else {
                    minors.push(segment);
                }
            }
            let color = self.style.color(StyleColor::XAxisGrid);
            push_grid(&mut self.render, majors, minors, color);
        }
        for (i, set) in self.y_ticks.iter().enumerate() {
            if !plot.y_axes[i].options.grid_lines {
                continue;
            }
            let mut majors = Vec::new();
            let mut minors = Vec::new();
            for tick in set.iter() {
                let segment = LineSegment::new(
                    ScreenPoint::new(plot_rect.min.x, tick.pixel),
                    ScreenPoint::new(plot_rect.max.x, tick.pixel),
                );
                if tick.major {
                    majors.push(segment);
                } else {
                    minors.push(segment);
                }
            }
            let color = self.style.color(y_grid_color(YAxis::ALL[i]));
            push_grid(&mut self.render, majors, minors, color);
        }
    }

    fn render_overlays(&mut self, current: &CurrentPlot) {
        let plot_rect = current.layout.plot_rect;
        let plot = self.registry.get(current.index);

        self.render.push(RenderCommand::Rect {
            rect: plot_rect,
            style: RectStyle {
                fill: Color::TRANSPARENT,
                stroke: self.style.color(StyleColor::PlotBorder),
                stroke_width: 1.0,
            },
        });

        // Tick marks, drawn inward from the plot edge.
        if plot.x_axis.options.tick_marks {
            let mut marks = Vec::new();
            for tick in self.x_ticks.iter() {
                let len = if tick.major { MAJOR_TICK_LEN } else { MINOR_TICK_LEN };
                marks.push(LineSegment::new(
                    ScreenPoint::new(tick.pixel, plot_rect.max.y),
                    ScreenPoint::new(tick.pixel, plot_rect.max.y - len),
                ));
            }
            self.render.push(RenderCommand::LineSegments {
                segments: marks,
                style: LineStyle {
                    color: self.style.color(StyleColor::XAxisGrid),
                    width: 1.0,
                },
            });
        }
        for (i, set) in self.y_ticks.iter().enumerate() {
            if !current.y_present[i] || !plot.y_axes[i].options.tick_marks {
                continue;
            }
            // Y0 marks grow from the left edge, the others from the right.
            let (edge, direction) = if i == 0 {
                (plot_rect.min.x, 1.0)
            } else {
                (plot_rect.max.x, -1.0)
            };
            let mut marks = Vec::new();
            for tick in set.iter() {
                let len = if tick.major { MAJOR_TICK_LEN } else { MINOR_TICK_LEN };
                marks.push(LineSegment::new(
                    ScreenPoint::new(edge, tick.pixel),
                    ScreenPoint::new(edge + direction * len, tick.pixel),
                ));
            }
            self.render.push(RenderCommand::LineSegments {
                segments: marks,
                style: LineStyle {
                    color: self.style.color(y_grid_color(YAxis::ALL[i])),
                    width: 1.0,
                },
            });
        }

        // Tick labels.
        let text_color = self.style.color(StyleColor::TickText);
        if plot.x_axis.options.tick_labels {
            for tick in self.x_ticks.iter() {
                if !tick.show_label {
                    continue;
                }
                let (width, _) = tick.label_size;
                self.render.push(RenderCommand::Text {
                    position: ScreenPoint::new(
                        tick.pixel - width * 0.5,
                        plot_rect.max.y + LABEL_OFFSET,
                    ),
                    text: self.x_ticks.label(tick).to_owned(),
                    style: TextStyle {
                        color: text_color,
                        ..TextStyle::default()
                    },
                });
            }
        }
        let y1_column = if current.y_present[1] && plot.y_axes[1].options.tick_labels {
            self.y_ticks[1].max_label_width() + LABEL_OFFSET
        } else {
            0.0
        };
        for (i, set) in self.y_ticks.iter().enumerate() {
            if !current.y_present[i] || !plot.y_axes[i].options.tick_labels {
                continue;
            }
            for tick in set.iter() {
                if !tick.show_label {
                    continue;
                }
                let (width, height) = tick.label_size;
                let x = match i {
                    // Right-aligned against the plot's left edge.
                    0 => plot_rect.min.x - LABEL_OFFSET - width,
                    1 => plot_rect.max.x + LABEL_OFFSET,
                    _ => plot_rect.max.x + LABEL_OFFSET + y1_column,
                };
                self.render.push(RenderCommand::Text {
                    position: ScreenPoint::new(x, tick.pixel - height * 0.5),
                    text: set.label(tick).to_owned(),
                    style: TextStyle {
                        color: text_color,
                        ..TextStyle::default()
                    },
                });
            }
        }

        // Title, centered over the canvas.
        if !current.title.is_empty() {
            let (width, _) = self.measurer.measure(&current.title);
            self.render.push(RenderCommand::Text {
                position: ScreenPoint::new(
                    current.layout.canvas_rect.center().x - width * 0.5,
                    current.layout.canvas_rect.min.y,
                ),
                text: current.title.clone(),
                style: TextStyle {
                    color: self.style.color(StyleColor::TitleText),
                    ..TextStyle::default()
                },
            });
        }

        // Selection in progress. An axis whose commit the held modifier
        // skips is shown spanning the full plot instead.
        if plot.interaction.mode == InteractionMode::Selecting {
            let mouse = current.input.mouse_pos;
            let clamped = ScreenPoint::new(
                mouse.x.clamp(plot_rect.min.x, plot_rect.max.x),
                mouse.y.clamp(plot_rect.min.y, plot_rect.max.y),
            );
            let mut rect = ScreenRect::from_corners(plot.interaction.select_start, clamped);
            if current.input.modifiers.contains(self.input_map.horizontal_mod) {
                rect.min.x = plot_rect.min.x;
                rect.max.x = plot_rect.max.x;
            }
            if current.input.modifiers.contains(self.input_map.vertical_mod) {
                rect.min.y = plot_rect.min.y;
                rect.max.y = plot_rect.max.y;
            }
            let color = self.style.color(StyleColor::Selection);
            self.render.push(RenderCommand::Rect {
                rect,
                style: RectStyle {
                    fill: color.with_alpha(color.a * 0.25),
                    stroke: color,
                    stroke_width: 1.0,
                },
            });
        }

        // Query region.
        if plot.interaction.queried
            || matches!(
                plot.interaction.mode,
                InteractionMode::Querying | InteractionMode::DraggingQuery
            )
        {
            let rect = plot.interaction.query_rect_abs(plot_rect);
            if rect.is_valid() {
                let color = self.style.color(StyleColor::Query);
                self.render.push(RenderCommand::Rect {
                    rect,
                    style: RectStyle {
                        fill: color.with_alpha(color.a * 0.25),
                        stroke: color,
                        stroke_width: 1.0,
                    },
                });
            }
        }

        let mouse = current.input.mouse_pos;
        let hovered = current.layout.hovers_plot(mouse)
            && plot.interaction.mode == InteractionMode::Idle;

        // Crosshair lines with a small gap around the pointer.
        if current.config.crosshairs && hovered {
            const GAP: f32 = 5.0;
            let color = self.style.color(StyleColor::PlotBorder);
            self.render.push(RenderCommand::LineSegments {
                segments: vec![
                    LineSegment::new(
                        ScreenPoint::new(plot_rect.min.x, mouse.y),
                        ScreenPoint::new(mouse.x - GAP, mouse.y),
                    ),
                    LineSegment::new(
                        ScreenPoint::new(mouse.x + GAP, mouse.y),
                        ScreenPoint::new(plot_rect.max.x, mouse.y),
                    ),
                    LineSegment::new(
                        ScreenPoint::new(mouse.x, plot_rect.min.y),
                        ScreenPoint::new(mouse.x, mouse.y - GAP),
                    ),
                    LineSegment::new(
                        ScreenPoint::new(mouse.x, mouse.y + GAP),
                        ScreenPoint::new(mouse.x, plot_rect.max.y),
                    ),
                ],
                style: LineStyle {
                    color,
                    width: 1.0,
                },
            });
        }

        // Pointer readout in the bottom-right corner, against the first
        // Y axis.
        if current.config.mouse_text && hovered {
            let point = current.transforms.pixels_to_plot(mouse, YAxis::Y0);
            let text = format!("{},{}", format_compact(point.x), format_compact(point.y));
            let (width, height) = self.measurer.measure(&text);
            self.render.push(RenderCommand::Text {
                position: ScreenPoint::new(
                    plot_rect.max.x - width - LABEL_OFFSET,
                    plot_rect.max.y - height - LABEL_OFFSET,
                ),
                text,
                style: TextStyle {
                    color: text_color,
                    ..TextStyle::default()
                },
            });
        }
    }

    fn update_legend(&mut self, current: &CurrentPlot) {
        let plot = self.registry.get_mut(current.index);
        if !current.config.legend || plot.items.legend_len() == 0 {
            plot.legend_hovered = false;
            return;
        }

        let row_height = self.measurer.measure("Ag").1;
        let mut max_name_width: f32 = 0.0;
        for item in plot.items.legend_items() {
            max_name_width = max_name_width.max(self.measurer.measure(item.name()).0);
        }
        let rows = plot.items.legend_len() as f32;
        let width = LEGEND_PADDING * 3.0 + LEGEND_ICON_SIZE + max_name_width;
        let height = LEGEND_PADDING * 2.0 + rows * row_height;
        let origin = current
            .layout
            .plot_rect
            .min
            .offset(LEGEND_PADDING * 2.0, LEGEND_PADDING * 2.0);
        let rect = ScreenRect::new(origin, origin.offset(width, height));

        self.render.push(RenderCommand::Rect {
            rect,
            style: RectStyle {
                fill: self.style.color(StyleColor::LegendBg),
                stroke: self.style.color(StyleColor::PlotBorder),
                stroke_width: 1.0,
            },
        });

        let mouse = current.input.mouse_pos;
        plot.legend_hovered = rect.contains(mouse);
        let clicked = current.input.is_clicked(self.input_map.pan_button);
        let text_color = self.style.color(StyleColor::TickText);

        let names: Vec<String> = plot
            .items
            .legend_items()
            .map(|item| item.name().to_owned())
            .collect();
        for (row, name) in names.iter().enumerate() {
            let top = origin.y + LEGEND_PADDING + row as f32 * row_height;
            let row_rect = ScreenRect::new(
                ScreenPoint::new(rect.min.x, top),
                ScreenPoint::new(rect.max.x, top + row_height),
            );
            let hovered = row_rect.contains(mouse);
            if let Some(item) = plot.items.by_name_mut(name) {
                item.highlighted = hovered;
                if hovered && clicked {
                    item.show = !item.show;
                }
            }
            let (color, show) = match plot.items.by_name(name) {
                Some(item) => (item.color(), item.show),
                None => (text_color, true),
            };
            let alpha = if show { 1.0 } else { 0.25 };

            let icon_origin = ScreenPoint::new(
                rect.min.x + LEGEND_PADDING,
                top + (row_height - LEGEND_ICON_SIZE) * 0.5,
            );
            self.render.push(RenderCommand::Rect {
                rect: ScreenRect::new(
                    icon_origin,
                    icon_origin.offset(LEGEND_ICON_SIZE, LEGEND_ICON_SIZE),
                ),
                style: RectStyle {
                    fill: color.with_alpha(color.a * alpha),
                    stroke: Color::TRANSPARENT,
                    stroke_width: 0.0,
                },
            });
            self.render.push(RenderCommand::Text {
                position: ScreenPoint::new(
                    rect.min.x + LEGEND_PADDING * 2.0 + LEGEND_ICON_SIZE,
                    top,
                ),
                text: name.clone(),
                style: TextStyle {
                    color: text_color.with_alpha(text_color.a * alpha),
                    ..TextStyle::default()
                },
            });
        }
    }

    fn apply_fit(&mut self, current: &CurrentPlot) {
        let plot = self.registry.get_mut(current.index);
        if !plot.interaction.fit_this_frame {
            return;
        }

        if plot.interaction.fit_x && current.fit_x.valid() && !plot.x_axis.options.fully_locked() {
            if !plot.x_axis.options.lock_min {
                plot.x_axis.range.min = current.fit_x.min;
            }
            if !plot.x_axis.options.lock_max {
                plot.x_axis.range.max = current.fit_x.max;
            }
            plot.x_axis.constrain();
        }
        for (i, y_axis) in plot.y_axes.iter_mut().enumerate() {
            let extent = &current.fit_y[i];
            if !plot.interaction.fit_y[i] || !extent.valid() || y_axis.options.fully_locked() {
                continue;
            }
            if !y_axis.options.lock_min {
                y_axis.range.min = extent.min;
            }
            if !y_axis.options.lock_max {
                y_axis.range.max = extent.max;
            }
            y_axis.constrain();
        }
        plot.interaction.clear_fit();
    }
}

fn owned_labels(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| (*label).to_string()).collect()
}

fn y_grid_color(axis: YAxis) -> StyleColor {
    match axis {
        YAxis::Y0 => StyleColor::YAxisGrid,
        YAxis::Y1 => StyleColor::YAxisGrid2,
        YAxis::Y2 => StyleColor::YAxisGrid3,
    }
}

fn push_grid(
    render: &mut RenderList,
    majors: Vec<LineSegment>,
    minors: Vec<LineSegment>,
    color: Color,
) {
    if !majors.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: majors,
            style: LineStyle { color, width: 1.0 },
        });
    }
    if !minors.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: minors,
            style: LineStyle {
                color: color.with_alpha(color.a * 0.4),
                width: 1.0,
            },
        });
    }
}

fn build_axis_ticks(
    set: &mut TickSet,
    axis: &AxisState,
    custom: Option<&NextTicks>,
    capacity: usize,
    measurer: &dyn TextMeasurer,
) {
    set.clear();
    if custom.is_none_or(NextTicks::show_default) {
        match axis.options.scale {
            AxisScale::Time => set.add_time(axis.range, capacity, 2),
            AxisScale::Log10 => set.add_default(axis.range, capacity, 0, true),
            AxisScale::Linear => set.add_default(axis.range, capacity, SUB_DIV, false),
        }
    }
    match custom {
        Some(NextTicks::Explicit { values, labels, .. }) => {
            let label_refs: Option<Vec<&str>> = labels
                .as_ref()
                .map(|labels| labels.iter().map(String::as_str).collect());
            set.add_custom(values, label_refs.as_deref(), measurer);
        }
        Some(NextTicks::Spaced { count, labels, .. }) => {
            let span = axis.range.span();
            let values: Vec<f64> = (0..*count)
                .map(|i| axis.range.min + span * i as f64 / (*count - 1) as f64)
                .collect();
            let label_refs: Option<Vec<&str>> = labels
                .as_ref()
                .map(|labels| labels.iter().map(String::as_str).collect());
            set.add_custom(&values, label_refs.as_deref(), measurer);
        }
        None => {}
    }
    set.label_all(
        axis.options.scientific,
        axis.options.scale == AxisScale::Time,
        measurer,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;

    fn frame() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(640.0, 480.0))
    }

    fn open(ctx: &mut PlotContext, title: &str) -> bool {
        ctx.begin_plot(title, PlotConfig::new(), frame(), FrameInput::default())
    }

    #[test]
    fn begin_end_produces_render_commands() {
        let mut ctx = PlotContext::new();
        ctx.set_next_x_range(Range::new(0.0, 10.0), Cond::Always);
        ctx.set_next_y_range(YAxis::Y0, Range::new(-1.0, 1.0), Cond::Always);
        assert!(open(&mut ctx, "scope"));
        ctx.plot_line(
            "signal",
            &[PlotPoint::new(0.0, 0.0), PlotPoint::new(10.0, 1.0)],
        );
        let list = ctx.end_plot();
        assert!(!list.commands().is_empty());
        let has_line = list.commands().iter().any(|command| {
            matches!(command, RenderCommand::LineSegments { segments, .. } if !segments.is_empty())
        });
        assert!(has_line);
    }

    #[test]
    fn degenerate_frame_rejected() {
        let mut ctx = PlotContext::new();
        let empty = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(0.0, 0.0));
        assert!(!ctx.begin_plot("scope", PlotConfig::new(), empty, FrameInput::default()));
    }

    #[test]
    fn next_ranges_are_one_shot() {
        let mut ctx = PlotContext::new();
        ctx.set_next_x_range(Range::new(0.0, 100.0), Cond::Always);
        assert!(open(&mut ctx, "scope"));
        assert_eq!(
            ctx.plot_limits(YAxis::Y0).map(|(x, _)| x),
            Some(Range::new(0.0, 100.0))
        );
        ctx.end_plot();

        // Second frame without set_next: the range persists from state,
        // not from the one-shot.
        assert!(open(&mut ctx, "scope"));
        assert_eq!(
            ctx.plot_limits(YAxis::Y0).map(|(x, _)| x),
            Some(Range::new(0.0, 100.0))
        );
        ctx.end_plot();
    }

    #[test]
    fn fit_next_plot_adopts_data_extents() {
        let mut ctx = PlotContext::new();
        ctx.fit_next_plot();
        assert!(open(&mut ctx, "scope"));
        ctx.plot_line(
            "signal",
            &[
                PlotPoint::new(0.0, -5.0),
                PlotPoint::new(10.0, 5.0),
                PlotPoint::new(f64::NAN, 99.0),
            ],
        );
        ctx.end_plot();

        assert!(open(&mut ctx, "scope"));
        let (x, y) = ctx.plot_limits(YAxis::Y0).unwrap();
        assert_eq!(x, Range::new(0.0, 10.0));
        assert_eq!(y, Range::new(-5.0, 5.0));
        ctx.end_plot();
    }

    #[test]
    fn custom_ticks_used_for_next_plot_only() {
        let mut ctx = PlotContext::new();
        ctx.set_next_x_range(Range::new(0.0, 3.0), Cond::Always);
        ctx.set_next_x_ticks(&[1.0, 2.0], Some(&["one", "two"]), false);
        assert!(open(&mut ctx, "scope"));
        let labels: Vec<&str> = ctx
            .x_ticks
            .iter()
            .map(|tick| ctx.x_ticks.label(tick))
            .collect();
        assert_eq!(labels, ["one", "two"]);
        ctx.end_plot();

        assert!(open(&mut ctx, "scope"));
        assert!(ctx.x_ticks.len() > 2);
        ctx.end_plot();
    }

    #[test]
    fn evenly_spaced_ticks_cover_the_range() {
        let mut ctx = PlotContext::new();
        ctx.set_next_x_range(Range::new(0.0, 8.0), Cond::Always);
        ctx.set_next_x_tick_count(5, None, false);
        assert!(open(&mut ctx, "scope"));
        let positions: Vec<f64> = ctx.x_ticks.iter().map(|tick| tick.position).collect();
        assert_eq!(positions, [0.0, 2.0, 4.0, 6.0, 8.0]);
        ctx.end_plot();
    }

    #[test]
    fn second_y_axis_gets_its_own_ticks() {
        let mut ctx = PlotContext::new();
        let config = PlotConfig::new().with_y2(AxisOptions::default());
        ctx.set_next_y_range(YAxis::Y1, Range::new(0.0, 50.0), Cond::Always);
        assert!(ctx.begin_plot("scope", config, frame(), FrameInput::default()));
        assert!(!ctx.y_ticks[1].is_empty());
        assert!(ctx.y_ticks[2].is_empty());
        ctx.set_plot_y_axis(YAxis::Y1);
        ctx.plot_line(
            "aux",
            &[PlotPoint::new(0.0, 0.0), PlotPoint::new(1.0, 50.0)],
        );
        ctx.end_plot();
    }

    #[test]
    fn legend_toggle_hides_item_next_frame() {
        let mut ctx = PlotContext::new();
        assert!(open(&mut ctx, "scope"));
        ctx.plot_line("signal", &[PlotPoint::new(0.0, 0.5), PlotPoint::new(1.0, 0.5)]);
        ctx.end_plot();
        ctx.set_item_visibility("scope", "signal", false);

        assert!(open(&mut ctx, "scope"));
        ctx.plot_line("signal", &[PlotPoint::new(0.0, 0.5), PlotPoint::new(1.0, 0.5)]);
        let list = ctx.end_plot();
        // Grid lines and tick marks still render; the item's single
        // horizontal segment must not.
        let item_segments = list
            .commands()
            .iter()
            .filter(|command| {
                matches!(command, RenderCommand::LineSegments { segments, .. }
                    if segments.len() == 1 && segments[0].start.y == segments[0].end.y)
            })
            .count();
        assert_eq!(item_segments, 0);
    }

    #[test]
    fn locked_axis_survives_frames_of_interaction() {
        let mut ctx = PlotContext::new();
        let locked = AxisOptions::default()
            .with_lock_min(true)
            .with_lock_max(true);
        let config = PlotConfig::new().with_x(locked);
        ctx.set_next_x_range(Range::new(0.0, 10.0), Cond::Always);
        ctx.set_next_y_range(YAxis::Y0, Range::new(0.0, 10.0), Cond::Always);

        assert!(ctx.begin_plot("scope", config.clone(), frame(), FrameInput::default()));
        let center = ScreenPoint::new(320.0, 240.0);
        ctx.end_plot();

        // A few frames of scrolling and dragging over the plot.
        for i in 0..5 {
            let input = if i % 2 == 0 {
                FrameInput::new(center).with_scroll(1.0)
            } else {
                FrameInput::new(center)
                    .with_clicked(MouseButton::Left)
                    .with_delta(ScreenPoint::new(15.0, -10.0))
            };
            assert!(ctx.begin_plot("scope", config.clone(), frame(), input));
            ctx.end_plot();
        }

        assert!(ctx.begin_plot("scope", config, frame(), FrameInput::default()));
        let (x, y) = ctx.plot_limits(YAxis::Y0).unwrap();
        assert_eq!(x, Range::new(0.0, 10.0));
        // The unlocked Y axis did move.
        assert_ne!(y, Range::new(0.0, 10.0));
        ctx.end_plot();
    }

    #[test]
    fn query_region_maps_to_data_space() {
        let mut ctx = PlotContext::new();
        let config = PlotConfig::new().with_query(true);
        ctx.set_next_x_range(Range::new(0.0, 10.0), Cond::Always);
        ctx.set_next_y_range(YAxis::Y0, Range::new(0.0, 10.0), Cond::Always);

        let start = ScreenPoint::new(200.0, 200.0);
        let end = ScreenPoint::new(300.0, 300.0);
        assert!(ctx.begin_plot(
            "scope",
            config.clone(),
            frame(),
            FrameInput::new(start).with_clicked(MouseButton::Middle),
        ));
        ctx.end_plot();
        assert!(ctx.begin_plot(
            "scope",
            config.clone(),
            frame(),
            FrameInput::new(end).with_down(MouseButton::Middle),
        ));
        ctx.end_plot();

        assert!(ctx.begin_plot("scope", config, frame(), FrameInput::new(end)));
        assert!(ctx.is_plot_queried());
        let (x, y) = ctx.plot_query(YAxis::Y0).unwrap();
        assert!(x.span() > 0.0 && y.span() > 0.0);
        assert!(x.min >= 0.0 && x.max <= 10.0);
        assert!(y.min >= 0.0 && y.max <= 10.0);
        ctx.end_plot();
    }

    #[test]
    fn once_range_yields_to_an_existing_plot() {
        let mut ctx = PlotContext::new();
        ctx.set_next_x_range(Range::new(0.0, 10.0), Cond::Once);
        assert!(open(&mut ctx, "scope"));
        assert_eq!(
            ctx.plot_limits(YAxis::Y0).map(|(x, _)| x),
            Some(Range::new(0.0, 10.0))
        );
        ctx.end_plot();

        // The plot exists now, so a Once request is dropped.
        ctx.set_next_x_range(Range::new(3.0, 4.0), Cond::Once);
        assert!(open(&mut ctx, "scope"));
        assert_eq!(
            ctx.plot_limits(YAxis::Y0).map(|(x, _)| x),
            Some(Range::new(0.0, 10.0))
        );
        ctx.end_plot();

        ctx.set_next_x_range(Range::new(3.0, 4.0), Cond::Always);
        assert!(open(&mut ctx, "scope"));
        assert_eq!(
            ctx.plot_limits(YAxis::Y0).map(|(x, _)| x),
            Some(Range::new(3.0, 4.0))
        );
        ctx.end_plot();
    }

    #[test]
    fn custom_ticks_can_keep_the_default_set() {
        let mut ctx = PlotContext::new();
        ctx.set_next_x_range(Range::new(0.0, 10.0), Cond::Always);
        ctx.set_next_x_ticks(&[3.3], Some(&["marker"]), true);
        assert!(open(&mut ctx, "scope"));
        let labels: Vec<&str> = ctx
            .x_ticks
            .iter()
            .map(|tick| ctx.x_ticks.label(tick))
            .collect();
        assert!(labels.contains(&"marker"));
        // The generated ticks are still there alongside the custom one.
        assert!(ctx.x_ticks.len() > 1);
        ctx.end_plot();
    }

    #[test]
    #[should_panic(expected = "plot API usage error")]
    fn degenerate_tick_count_is_a_usage_error() {
        let mut ctx = PlotContext::new();
        ctx.set_next_x_tick_count(1, None, false);
    }

    #[test]
    fn explicit_color_table_colors_items() {
        let mut ctx = PlotContext::new();
        let table = [Color::from_rgb8(10, 20, 30), Color::from_rgb8(40, 50, 60)];
        ctx.set_colormap_colors(&table);
        assert!(open(&mut ctx, "scope"));
        ctx.plot_line("a", &[PlotPoint::new(0.0, 0.0), PlotPoint::new(1.0, 1.0)]);
        ctx.plot_line("b", &[PlotPoint::new(0.0, 1.0), PlotPoint::new(1.0, 0.0)]);
        ctx.end_plot();

        let id = PlotId::from_title("scope");
        let (index, created) = ctx.registry.get_or_create(id);
        assert!(!created);
        let items = &ctx.registry.get(index).items;
        assert_eq!(items.by_name("a").unwrap().color(), table[0]);
        assert_eq!(items.by_name("b").unwrap().color(), table[1]);
    }

    #[test]
    fn hover_overlays_render_when_enabled() {
        let mut ctx = PlotContext::new();
        let config = PlotConfig::new().with_crosshairs(true);
        ctx.set_next_x_range(Range::new(0.0, 10.0), Cond::Always);
        ctx.set_next_y_range(YAxis::Y0, Range::new(0.0, 10.0), Cond::Always);
        let center = ScreenPoint::new(320.0, 240.0);
        assert!(ctx.begin_plot("scope", config, frame(), FrameInput::new(center)));
        let list = ctx.end_plot();

        let crosshair = list.commands().iter().any(|command| {
            matches!(command, RenderCommand::LineSegments { segments, .. }
                if segments.len() == 4)
        });
        assert!(crosshair);
        let readout = list.commands().iter().any(|command| {
            matches!(command, RenderCommand::Text { text, .. } if text.contains(','))
        });
        assert!(readout);
    }

    #[test]
    fn style_stack_misuse_is_survivable() {
        let mut ctx = PlotContext::new();
        ctx.push_style_var(StyleVar::LineWeight, 2.0);
        ctx.pop_style_var();
        assert_eq!(ctx.style().line_weight, 1.0);
    }
}
