use std::sync::Arc;

use crate::stroke::StrokeRef;

/// The full, committed stroke list at one point in time.
///
/// Snapshots share their storage; strokes are immutable, so sharing never lets
/// one snapshot observe a change made through another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    strokes: Arc<[StrokeRef]>,
}

impl Snapshot {
    pub fn new(strokes: &[StrokeRef]) -> Self {
        Self {
            strokes: strokes.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    /// Owned copy of the stroke list, for use as a live list
    pub fn to_vec(&self) -> Vec<StrokeRef> {
        self.strokes.to_vec()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// Linear undo/redo log of document snapshots.
///
/// Always holds at least one snapshot and `index < len`. Committing while not at
/// the newest snapshot drops every snapshot after `index` first, so there is never
/// more than one redo branch.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    index: usize,
    /// Maximum number of snapshots kept, `None` for no limit
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Creates a history holding a single empty snapshot
    pub fn new() -> Self {
        Self {
            snapshots: vec![Snapshot::empty()],
            index: 0,
            limit: None,
        }
    }

    /// Creates a history that keeps at most `limit` snapshots (at least one)
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|l| l.max(1)),
            ..Self::new()
        }
    }

    /// Append `snapshot` after the current index, discarding any redo tail
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);

        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
                log::debug!("History limit {} reached, dropped {} oldest snapshots", limit, excess);
            }
        }

        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. Returns `None` when already at the oldest.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Step forward one snapshot. Returns `None` when already at the newest.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    /// Reset to a single empty snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.snapshots.push(Snapshot::empty());
        self.index = 0;
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Geometry, Stroke};
    use crate::style::PaintStyle;
    use egui::pos2;

    fn snapshot_with(n: usize) -> Snapshot {
        let strokes: Vec<StrokeRef> = (0..n)
            .map(|i| {
                Stroke::new_ref(
                    Geometry::Freehand(vec![pos2(i as f32, 0.0)]),
                    PaintStyle::default().stroke_style(),
                )
            })
            .collect();
        Snapshot::new(&strokes)
    }

    #[test]
    fn test_new_history() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_truncates_redo_tail() {
        let mut history = History::new();
        history.commit(snapshot_with(1));
        history.commit(snapshot_with(2));
        history.commit(snapshot_with(3));
        assert_eq!(history.len(), 4);

        history.undo();
        history.undo();
        assert_eq!(history.index(), 1);
        assert!(history.can_redo());

        history.commit(snapshot_with(5));
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.current().len(), 5);
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_undo_redo_at_bounds() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert_eq!(history.index(), 0);

        history.commit(snapshot_with(1));
        assert!(history.redo().is_none());
        assert_eq!(history.index(), 1);

        assert_eq!(history.undo().map(|s| s.len()), Some(0));
        assert_eq!(history.redo().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Some(3));
        for n in 1..=5 {
            history.commit(snapshot_with(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.snapshots()[0].len(), 3);

        while history.undo().is_some() {}
        assert_eq!(history.current().len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.commit(snapshot_with(2));
        history.clear();
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(history.current().is_empty());
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut live = snapshot_with(2).to_vec();
        let snapshot = Snapshot::new(&live);
        live.pop();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(live.len(), 1);
    }
}
