//! frameplot is an immediate-mode 2D plotting engine. Every frame the
//! caller brackets a plot with `begin_plot`/`end_plot`, submits items in
//! between, and replays the returned render command list against its own
//! drawing backend; panning, zooming, box selection, queries, and
//! double-click fitting come built in.

#![forbid(unsafe_code)]

pub mod axis;
pub mod colormap;
pub mod context;
pub mod geom;
pub mod input;
pub mod interaction;
pub mod items;
pub mod layout;
pub mod nice;
pub mod range;
pub mod registry;
pub mod render;
pub mod style;
pub mod text;
pub mod ticks;
pub mod time;
pub mod transform;

pub use axis::{Axis, AxisOptions, AxisScale, YAxis};
pub use colormap::Colormap;
pub use context::{Cond, PlotConfig, PlotContext};
pub use geom::{PlotPoint, ScreenPoint, ScreenRect};
pub use input::{FrameInput, InputMap, Modifiers, MouseButton};
pub use interaction::InteractionMode;
pub use layout::PlotLayout;
pub use range::Range;
pub use registry::PlotId;
pub use render::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle, RenderCommand, RenderList,
    TextStyle,
};
pub use style::{PlotStyle, StyleColor, StyleVar};
pub use text::{MonospaceMeasurer, TextMeasurer, TextSize};
pub use ticks::{Tick, TickSet};
pub use time::{TimeFormatter, TimeUnit};
pub use transform::TransformCache;
