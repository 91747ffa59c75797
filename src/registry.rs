//! Retained per-plot state, keyed by plot title.
//!
//! The immediate-mode API identifies a plot purely by the title string
//! passed to `begin_plot`; everything that must survive between frames
//! lives here. Plots are stored in an arena in creation order so
//! iteration is deterministic.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::axis::AxisState;
use crate::interaction::InteractionState;
use crate::items::ItemSet;

/// Stable identifier for a plot, derived from its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlotId(u64);

impl PlotId {
    pub fn from_title(title: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        title.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Everything retained for one plot between frames.
#[derive(Debug, Clone, Default)]
pub(crate) struct PlotState {
    pub x_axis: AxisState,
    pub y_axes: [AxisState; 3],
    pub interaction: InteractionState,
    pub items: ItemSet,
    /// Pointer was over the legend last frame; blocks gesture starts.
    pub legend_hovered: bool,
}

#[derive(Debug, Default)]
pub(crate) struct PlotRegistry {
    plots: Vec<PlotState>,
    by_id: HashMap<PlotId, usize>,
}

impl PlotRegistry {
    /// Look up a plot, creating it on first sight. The flag is true when
    /// the plot was created by this call.
    pub(crate) fn get_or_create(&mut self, id: PlotId) -> (usize, bool) {
        match self.by_id.get(&id) {
            Some(&index) => (index, false),
            None => {
                let index = self.plots.len();
                self.plots.push(PlotState::default());
                self.by_id.insert(id, index);
                (index, true)
            }
        }
    }

    pub(crate) fn get(&self, index: usize) -> &PlotState {
        &self.plots[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut PlotState {
        &mut self.plots[index]
    }

    pub(crate) fn find(&self, id: PlotId) -> Option<&PlotState> {
        self.by_id.get(&id).map(|&index| &self.plots[index])
    }

    pub(crate) fn len(&self) -> usize {
        self.plots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_title_same_plot() {
        let mut registry = PlotRegistry::default();
        let id = PlotId::from_title("scope");
        let (first, created) = registry.get_or_create(id);
        assert!(created);
        let (second, created) = registry.get_or_create(id);
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_titles_distinct_ids() {
        assert_ne!(PlotId::from_title("a"), PlotId::from_title("b"));
        assert_eq!(PlotId::from_title("a"), PlotId::from_title("a"));
    }

    #[test]
    fn state_survives_lookup() {
        let mut registry = PlotRegistry::default();
        let id = PlotId::from_title("scope");
        let (index, _) = registry.get_or_create(id);
        registry.get_mut(index).x_axis.range = crate::range::Range::new(-1.0, 1.0);
        assert_eq!(
            registry.find(id).map(|plot| plot.x_axis.range),
            Some(crate::range::Range::new(-1.0, 1.0))
        );
    }
}
