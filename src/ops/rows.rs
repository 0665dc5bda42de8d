//! Grouping of an item's links into visual rows.

/// Top-left corner of a rendered link, in layout units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkPosition {
    pub top: f32,
    pub left: f32,
}

/// Source of live link geometry. Positions are asked for every time they
/// are needed because layout can reflow between keystrokes.
pub trait LinkLayout {
    /// Position of link `link` of item `item`, or `None` when it is not laid out
    fn link_position(&self, item: usize, link: usize) -> Option<LinkPosition>;
}

/// Links sharing (roughly) one vertical position
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRow {
    /// Top of the first link that opened the row
    pub top: f32,
    /// Link indices into the item's link list, left to right
    pub links: Vec<usize>,
}

/// Cluster the links of `item` into rows.
///
/// Greedy, in document order: a link joins the first row whose top is within
/// `tolerance`, otherwise it opens a new row. Rows are then sorted top to
/// bottom and each row left to right.
pub fn cluster_rows(
    layout: &dyn LinkLayout,
    item: usize,
    link_count: usize,
    tolerance: f32,
) -> Vec<LinkRow> {
    let mut rows: Vec<(f32, Vec<(usize, f32)>)> = Vec::new();

    for link in 0..link_count {
        let Some(pos) = layout.link_position(item, link) else {
            continue;
        };
        match rows
            .iter_mut()
            .find(|(top, _)| (top - pos.top).abs() <= tolerance)
        {
            Some((_, members)) => members.push((link, pos.left)),
            None => rows.push((pos.top, vec![(link, pos.left)])),
        }
    }

    for (_, members) in rows.iter_mut() {
        members.sort_by(|a, b| a.1.total_cmp(&b.1));
    }
    rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    rows.into_iter()
        .map(|(top, members)| LinkRow {
            top,
            links: members.into_iter().map(|(link, _)| link).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Fixed(HashMap<usize, LinkPosition>);

    impl Fixed {
        fn new(points: &[(f32, f32)]) -> Self {
            Fixed(
                points
                    .iter()
                    .enumerate()
                    .map(|(i, &(top, left))| (i, LinkPosition { top, left }))
                    .collect(),
            )
        }
    }

    impl LinkLayout for Fixed {
        fn link_position(&self, _item: usize, link: usize) -> Option<LinkPosition> {
            self.0.get(&link).copied()
        }
    }

    fn indices(rows: &[LinkRow]) -> Vec<Vec<usize>> {
        rows.iter().map(|r| r.links.clone()).collect()
    }

    #[test]
    fn no_links_no_rows() {
        let layout = Fixed::new(&[]);
        assert!(cluster_rows(&layout, 0, 0, 6.0).is_empty());
    }

    #[test]
    fn groups_within_tolerance_and_sorts_by_left() {
        // Two visual lines; second link on line one is slightly lower
        let layout = Fixed::new(&[(10.0, 50.0), (14.0, 5.0), (40.0, 20.0), (42.0, 1.0)]);
        let rows = cluster_rows(&layout, 0, 4, 6.0);
        assert_eq!(indices(&rows), vec![vec![1, 0], vec![3, 2]]);
        assert_eq!(rows[0].top, 10.0);
    }

    #[test]
    fn tolerance_is_inclusive() {
        let layout = Fixed::new(&[(0.0, 0.0), (6.0, 10.0), (6.5, 20.0)]);
        let rows = cluster_rows(&layout, 0, 3, 6.0);
        assert_eq!(indices(&rows), vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn rows_sorted_top_to_bottom_even_if_seen_later() {
        let layout = Fixed::new(&[(100.0, 0.0), (20.0, 0.0), (60.0, 0.0)]);
        let rows = cluster_rows(&layout, 0, 3, 6.0);
        assert_eq!(indices(&rows), vec![vec![1], vec![2], vec![0]]);
    }

    #[test]
    fn first_seen_row_claims_band() {
        // 5 is within 6 of 0, so 10 (within 6 of 5 but not of 0) opens its own row
        let layout = Fixed::new(&[(0.0, 0.0), (5.0, 10.0), (10.0, 20.0)]);
        let rows = cluster_rows(&layout, 0, 3, 6.0);
        assert_eq!(indices(&rows), vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn unplaced_links_are_skipped() {
        let layout = Fixed::new(&[(0.0, 0.0)]);
        let rows = cluster_rows(&layout, 0, 3, 6.0);
        assert_eq!(indices(&rows), vec![vec![0]]);
    }

    #[test]
    fn clustering_is_idempotent() {
        let layout = Fixed::new(&[(3.0, 9.0), (30.0, 2.0), (1.0, 4.0), (33.0, 0.0)]);
        let first = cluster_rows(&layout, 0, 4, 6.0);
        let second = cluster_rows(&layout, 0, 4, 6.0);
        assert_eq!(first, second);
    }
}
