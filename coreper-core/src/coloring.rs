//! Two-valued node labels with a maintained histogram.

use std::fmt;

use crate::graph::NodeId;

/// Node label. The discriminant is the color's canonical index.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Color {
    /// Member of the densely connected core.
    Core = 0,
    /// Member of the sparse periphery.
    Periphery = 1,
}

impl Color {
    /// Every color in canonical order.
    pub const ALL: [Self; 2] = [Self::Core, Self::Periphery];

    /// Returns the canonical index used by [`Coloring::fractions`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the lowercase label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Periphery => "periphery",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total assignment of a [`Color`] to every node in `0..len()`.
///
/// Per-color counts are updated together with the per-node labels, so
/// [`Self::count`] and [`Self::fractions`] never need a scan.
///
/// # Examples
/// ```
/// use coreper_core::{Color, Coloring};
///
/// let mut coloring = Coloring::new(4, Color::Periphery);
/// assert_eq!(coloring.winning_color(), Some(Color::Periphery));
///
/// coloring.set(0, Color::Core);
/// assert_eq!(coloring.fractions(), [0.25, 0.75]);
/// assert_eq!(coloring.winning_color(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coloring {
    colors: Vec<Color>,
    counts: [usize; 2],
}

impl Coloring {
    /// Creates a coloring of `len` nodes all set to `initial`.
    #[must_use]
    pub fn new(len: usize, initial: Color) -> Self {
        let mut counts = [0; 2];
        counts[initial.index()] = len;
        Self {
            colors: vec![initial; len],
            counts,
        }
    }

    /// Returns the number of colored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns whether the coloring covers no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color of `node`.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Color {
        self.colors[node]
    }

    /// Sets the color of `node`, keeping the histogram in sync.
    pub fn set(&mut self, node: NodeId, color: Color) {
        let previous = std::mem::replace(&mut self.colors[node], color);
        self.counts[previous.index()] -= 1;
        self.counts[color.index()] += 1;
    }

    /// Overwrites this coloring with `other` without reallocating.
    ///
    /// Both colorings must cover the same number of nodes; this is checked
    /// in debug builds only.
    pub fn assign_from(&mut self, other: &Self) {
        debug_assert_eq!(self.len(), other.len(), "coloring sizes differ");
        self.colors.clone_from(&other.colors);
        self.counts = other.counts;
    }

    /// Exchanges the contents of two colorings.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Returns how many nodes hold `color`.
    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.counts[color.index()]
    }

    /// Returns each color's share of the nodes, indexed by [`Color::index`].
    ///
    /// An empty coloring reports `NaN` shares.
    #[must_use]
    pub fn fractions(&self) -> [f64; 2] {
        let total = self.len() as f64;
        Color::ALL.map(|color| self.count(color) as f64 / total)
    }

    /// Returns whether at most one color is in use.
    #[must_use]
    pub fn is_unimodal(&self) -> bool {
        self.counts.iter().filter(|&&count| count > 0).count() <= 1
    }

    /// Returns the only color in use, or `None` for an empty or split
    /// population.
    #[must_use]
    pub fn winning_color(&self) -> Option<Color> {
        if !self.is_unimodal() {
            return None;
        }
        Color::ALL.into_iter().find(|&color| self.count(color) > 0)
    }

    /// Iterates over the nodes holding `color` in ascending order.
    pub fn nodes_with(&self, color: Color) -> impl Iterator<Item = NodeId> + '_ {
        self.colors
            .iter()
            .enumerate()
            .filter(move |&(_, &current)| current == color)
            .map(|(node, _)| node)
    }
}
