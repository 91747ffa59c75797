//! Plot items and the legend bookkeeping behind them.
//!
//! An item is anything with a legend entry. Items persist across frames so
//! legend toggles and assigned colors survive; the legend itself is rebuilt
//! every frame in the order items are submitted.

use std::collections::HashMap;

use crate::colormap::Colormap;
use crate::render::Color;

/// Retained state for one legend entry.
#[derive(Debug, Clone)]
pub struct Item {
    pub(crate) name: String,
    /// Legend toggle; hidden items keep their slot and color.
    pub show: bool,
    /// Pointer is over this item's legend entry.
    pub(crate) highlighted: bool,
    /// Color assigned from the colormap when the item was first seen.
    pub(crate) color: Color,
    pub(crate) seen_this_frame: bool,
}

impl Item {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Items of one plot, retained across frames.
#[derive(Debug, Clone, Default)]
pub(crate) struct ItemSet {
    items: Vec<Item>,
    by_name: HashMap<String, usize>,
    colormap_cursor: usize,
    /// Indices into `items` in this frame's submission order.
    legend: Vec<usize>,
}

impl ItemSet {
    pub(crate) fn begin_frame(&mut self) {
        for item in &mut self.items {
            item.seen_this_frame = false;
        }
        self.legend.clear();
    }

    /// Register an item for this frame, creating it on first sight. A new
    /// item takes the next colormap color unless an override is given.
    pub(crate) fn register(
        &mut self,
        name: &str,
        colormap: &Colormap,
        color_override: Option<Color>,
    ) -> usize {
        let index = match self.by_name.get(name) {
            Some(&index) => index,
            None => {
                let color = match color_override {
                    Some(color) => color,
                    None => {
                        let color = colormap.color(self.colormap_cursor);
                        self.colormap_cursor += 1;
                        color
                    }
                };
                let index = self.items.len();
                self.items.push(Item {
                    name: name.to_owned(),
                    show: true,
                    highlighted: false,
                    color,
                    seen_this_frame: false,
                });
                self.by_name.insert(name.to_owned(), index);
                index
            }
        };
        let item = &mut self.items[index];
        if let Some(color) = color_override {
            item.color = color;
        }
        if !item.seen_this_frame {
            item.seen_this_frame = true;
            self.legend.push(index);
        }
        index
    }

    pub(crate) fn get(&self, index: usize) -> &Item {
        &self.items[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Item {
        &mut self.items[index]
    }

    pub(crate) fn by_name(&self, name: &str) -> Option<&Item> {
        self.by_name.get(name).map(|&index| &self.items[index])
    }

    pub(crate) fn by_name_mut(&mut self, name: &str) -> Option<&mut Item> {
        match self.by_name.get(name) {
            Some(&index) => Some(&mut self.items[index]),
            None => None,
        }
    }

    /// Items submitted this frame, in submission order.
    pub(crate) fn legend_items(&self) -> impl Iterator<Item = &Item> {
        self.legend.iter().map(|&index| &self.items[index])
    }

    pub(crate) fn legend_len(&self) -> usize {
        self.legend.len()
    }

    /// At least one shown item was submitted this frame.
    pub(crate) fn any_visible(&self) -> bool {
        self.legend.iter().any(|&index| self.items[index].show)
    }
}
