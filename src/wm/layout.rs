//! Layout - binary split tree arranging the panes of a tab

use super::pane::PaneId;

/// Direction of split
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SplitDirection {
    Horizontal, // New pane to the right (vertical divider)
    Vertical,   // New pane below (horizontal divider)
}

/// Layout node - binary tree structure.
///
/// Each split exclusively owns its two children; panes are referenced by id only.
#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    /// A leaf node containing a pane
    Pane(PaneId),
    /// A split containing two child layouts
    Split {
        direction: SplitDirection,
        /// Ratio of first child (0.0 - 1.0)
        ratio: f32,
        first: Box<Layout>,
        second: Box<Layout>,
    },
}

impl Layout {
    /// Create a new layout with a single pane
    pub fn new(pane_id: PaneId) -> Self {
        Layout::Pane(pane_id)
    }

    fn is_leaf(&self, pane_id: PaneId) -> bool {
        matches!(self, Layout::Pane(id) if *id == pane_id)
    }

    /// Split `target_pane` into `target_pane` (first) and `new_pane` (second).
    ///
    /// Returns false and leaves the tree untouched if `target_pane` is not in it.
    pub fn split(&mut self, target_pane: PaneId, new_pane: PaneId, direction: SplitDirection) -> bool {
        match self {
            Layout::Pane(id) => {
                if *id != target_pane {
                    return false;
                }
                *self = Layout::Split {
                    direction,
                    ratio: 0.5,
                    first: Box::new(Layout::Pane(target_pane)),
                    second: Box::new(Layout::Pane(new_pane)),
                };
                true
            }
            Layout::Split { first, second, .. } => {
                first.split(target_pane, new_pane, direction)
                    || second.split(target_pane, new_pane, direction)
            }
        }
    }

    /// Remove a pane, promoting its sibling into the parent split's place.
    ///
    /// Returns the pane adjacent to the removed one in document order inside
    /// the promoted sibling: its first pane if the removed pane came first,
    /// its last pane otherwise. Returns `None` when the pane is not found or
    /// is the root leaf (a tree cannot become empty).
    pub fn remove(&mut self, pane_id: PaneId) -> Option<PaneId> {
        match self {
            Layout::Pane(_) => None,
            Layout::Split { first, second, .. } => {
                if first.is_leaf(pane_id) {
                    let sibling = std::mem::replace(second.as_mut(), Layout::Pane(pane_id));
                    let successor = sibling.first_pane();
                    *self = sibling;
                    Some(successor)
                } else if second.is_leaf(pane_id) {
                    let sibling = std::mem::replace(first.as_mut(), Layout::Pane(pane_id));
                    let successor = sibling.last_pane();
                    *self = sibling;
                    Some(successor)
                } else {
                    first.remove(pane_id).or_else(|| second.remove(pane_id))
                }
            }
        }
    }

    /// Get all pane IDs in document order (first child before second)
    pub fn pane_ids(&self) -> Vec<PaneId> {
        match self {
            Layout::Pane(id) => vec![*id],
            Layout::Split { first, second, .. } => {
                let mut ids = first.pane_ids();
                ids.extend(second.pane_ids());
                ids
            }
        }
    }

    pub fn contains(&self, pane_id: PaneId) -> bool {
        match self {
            Layout::Pane(id) => *id == pane_id,
            Layout::Split { first, second, .. } => first.contains(pane_id) || second.contains(pane_id),
        }
    }

    /// Leftmost leaf
    pub fn first_pane(&self) -> PaneId {
        match self {
            Layout::Pane(id) => *id,
            Layout::Split { first, .. } => first.first_pane(),
        }
    }

    /// Rightmost leaf
    pub fn last_pane(&self) -> PaneId {
        match self {
            Layout::Pane(id) => *id,
            Layout::Split { second, .. } => second.last_pane(),
        }
    }

    /// Number of split levels above the deepest pane
    pub fn depth(&self) -> usize {
        match self {
            Layout::Pane(_) => 0,
            Layout::Split { first, second, .. } => 1 + first.depth().max(second.depth()),
        }
    }

    /// Calculate positions and sizes for all panes
    pub fn calculate_positions(&self, x: u16, y: u16, width: u16, height: u16) -> Vec<(PaneId, u16, u16, u16, u16)> {
        match self {
            Layout::Pane(id) => vec![(*id, x, y, width, height)],
            Layout::Split { direction, ratio, first, second } => {
                let mut positions = Vec::new();

                match direction {
                    SplitDirection::Horizontal => {
                        let first_width = ((width as f32) * ratio) as u16;
                        let second_width = width - first_width;

                        positions.extend(first.calculate_positions(x, y, first_width, height));
                        positions.extend(second.calculate_positions(x + first_width, y, second_width, height));
                    }
                    SplitDirection::Vertical => {
                        let first_height = ((height as f32) * ratio) as u16;
                        let second_height = height - first_height;

                        positions.extend(first.calculate_positions(x, y, width, first_height));
                        positions.extend(second.calculate_positions(x, y + first_height, width, second_height));
                    }
                }

                positions
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(direction: SplitDirection, first: Layout, second: Layout) -> Layout {
        Layout::Split {
            direction,
            ratio: 0.5,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    #[test]
    fn test_split_replaces_leaf_in_place() {
        let mut layout = Layout::new(1);
        assert!(layout.split(1, 2, SplitDirection::Vertical));
        assert_eq!(layout, split(SplitDirection::Vertical, Layout::Pane(1), Layout::Pane(2)));

        assert!(layout.split(1, 3, SplitDirection::Horizontal));
        assert_eq!(layout.pane_ids(), vec![1, 3, 2]);
        assert_eq!(layout.depth(), 2);
    }

    #[test]
    fn test_split_unknown_target_is_noop() {
        let mut layout = Layout::new(1);
        layout.split(1, 2, SplitDirection::Horizontal);
        let before = layout.clone();
        assert!(!layout.split(7, 8, SplitDirection::Vertical));
        assert_eq!(layout, before);
    }

    #[test]
    fn test_remove_promotes_sibling_subtree() {
        // split(H, 1, split(V, 2, 3))
        let mut layout = split(
            SplitDirection::Horizontal,
            Layout::Pane(1),
            split(SplitDirection::Vertical, Layout::Pane(2), Layout::Pane(3)),
        );
        assert_eq!(layout.remove(1), Some(2));
        assert_eq!(layout, split(SplitDirection::Vertical, Layout::Pane(2), Layout::Pane(3)));
    }

    #[test]
    fn test_remove_second_activates_last_of_sibling() {
        // split(H, split(V, 1, 2), 3)
        let mut layout = split(
            SplitDirection::Horizontal,
            split(SplitDirection::Vertical, Layout::Pane(1), Layout::Pane(2)),
            Layout::Pane(3),
        );
        assert_eq!(layout.remove(3), Some(2));
        assert_eq!(layout.pane_ids(), vec![1, 2]);
    }

    #[test]
    fn test_remove_nested_keeps_outer_order() {
        let mut layout = Layout::new(1);
        layout.split(1, 2, SplitDirection::Horizontal);
        layout.split(2, 3, SplitDirection::Vertical);
        layout.split(1, 4, SplitDirection::Vertical);
        assert_eq!(layout.pane_ids(), vec![1, 4, 2, 3]);

        assert_eq!(layout.remove(3), Some(2));
        assert_eq!(layout.pane_ids(), vec![1, 4, 2]);
        assert!(!layout.contains(3));
    }

    #[test]
    fn test_remove_root_or_missing() {
        let mut layout = Layout::new(1);
        assert_eq!(layout.remove(1), None);
        assert_eq!(layout, Layout::Pane(1));

        layout.split(1, 2, SplitDirection::Horizontal);
        assert_eq!(layout.remove(9), None);
        assert_eq!(layout.pane_ids(), vec![1, 2]);
    }

    #[test]
    fn test_calculate_positions() {
        let mut layout = Layout::new(1);
        layout.split(1, 2, SplitDirection::Horizontal);
        layout.split(2, 3, SplitDirection::Vertical);

        let positions = layout.calculate_positions(0, 0, 80, 24);
        assert_eq!(
            positions,
            vec![(1, 0, 0, 40, 24), (2, 40, 0, 40, 12), (3, 40, 12, 40, 12)]
        );
    }
}
