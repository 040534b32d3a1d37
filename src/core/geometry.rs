use serde::{Deserialize, Serialize};

/// A point in rendered (screen) coordinates: origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One of the four edges of a word box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EdgeName {
    Left,
    Top,
    Right,
    Bottom,
}

impl EdgeName {
    /// Fixed iteration order used for drag-handle activation.
    pub const ALL: [EdgeName; 4] = [
        EdgeName::Left,
        EdgeName::Top,
        EdgeName::Right,
        EdgeName::Bottom,
    ];

    pub fn axis(self) -> Axis {
        match self {
            EdgeName::Left | EdgeName::Right => Axis::Horizontal,
            EdgeName::Top | EdgeName::Bottom => Axis::Vertical,
        }
    }
}

/// The primary axis shared by a pair of edges: horizontal = {left, right},
/// vertical = {top, bottom}.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn adjacent(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// The two member edges of this subgroup.
    pub fn edges(self) -> [EdgeName; 2] {
        match self {
            Axis::Horizontal => [EdgeName::Left, EdgeName::Right],
            Axis::Vertical => [EdgeName::Top, EdgeName::Bottom],
        }
    }
}

/// Displacement of each edge from the origin, in file coordinates
/// (origin bottom-left, y growing upward, per the Tesseract box format).
///
/// `left <= right` is expected; inverted rectangles are not rejected here.
/// Callers deriving a rectangle from two arbitrary corners normalize with
/// min/max first.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Displacements {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Displacements {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn edge(&self, name: EdgeName) -> i32 {
        match name {
            EdgeName::Left => self.left,
            EdgeName::Top => self.top,
            EdgeName::Right => self.right,
            EdgeName::Bottom => self.bottom,
        }
    }

    pub fn set_edge(&mut self, name: EdgeName, value: i32) {
        match name {
            EdgeName::Left => self.left = value,
            EdgeName::Top => self.top = value,
            EdgeName::Right => self.right = value,
            EdgeName::Bottom => self.bottom = value,
        }
    }

    /// Positional rectangle in (left, top, right, bottom) order, for draw calls.
    pub fn to_array(self) -> [i32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    /// Smallest rectangle covering both, in file orientation (top is the
    /// larger y).
    pub fn union(&self, other: &Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    /// One box-file row tail: the four geometry fields plus the page column,
    /// which is always written as 0.
    pub fn file_representation(&self) -> String {
        format!("{} {} {} {} 0\n", self.left, self.bottom, self.right, self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_in_file_field_order() {
        let d = Displacements::new(10, 80, 50, 20);
        assert_eq!(d.file_representation(), "10 20 50 80 0\n");
    }

    #[test]
    fn iterates_positionally() {
        let d = Displacements::new(1, 2, 3, 4);
        assert_eq!(d.to_array(), [1, 2, 3, 4]);
    }

    #[test]
    fn edge_access_round_trips() {
        let mut d = Displacements::default();
        for (i, name) in EdgeName::ALL.into_iter().enumerate() {
            d.set_edge(name, i as i32 + 1);
        }
        assert_eq!(d, Displacements::new(1, 2, 3, 4));
        assert_eq!(d.edge(EdgeName::Bottom), 4);
    }

    #[test]
    fn union_covers_both_rectangles() {
        let a = Displacements::new(10, 80, 50, 20);
        let b = Displacements::new(40, 95, 70, 30);
        assert_eq!(a.union(&b), Displacements::new(10, 95, 70, 20));
    }

    #[test]
    fn axes_are_mutually_adjacent() {
        assert_eq!(Axis::Horizontal.adjacent(), Axis::Vertical);
        assert_eq!(Axis::Vertical.adjacent(), Axis::Horizontal);
        assert_eq!(EdgeName::Left.axis(), Axis::Horizontal);
        assert_eq!(EdgeName::Top.axis(), Axis::Vertical);
    }
}
