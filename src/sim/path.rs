//! Path follower for the sprite actor
//!
//! A target request turns into a line of beads; a fixed-rate timer then walks
//! the actor along it `stride` points per tick.

use crate::GridPoint;
use crate::consts::PATH_STRIDE;
use crate::error::PondError;
use crate::host::Host;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFollower {
    position: GridPoint,
    /// `None` while idle
    path: Option<Vec<GridPoint>>,
    step: usize,
    stride: usize,
}

impl PathFollower {
    pub fn new(position: GridPoint) -> Self {
        Self {
            position,
            path: None,
            step: 0,
            stride: PATH_STRIDE,
        }
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.set_stride(stride);
        self
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }

    pub fn path(&self) -> Option<&[GridPoint]> {
        self.path.as_deref()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_idle(&self) -> bool {
        self.path.is_none()
    }

    /// Points skipped per tick. Clamped to at least 1.
    pub fn set_stride(&mut self, stride: usize) {
        self.stride = stride.max(1);
    }

    /// Jump straight to `position`, dropping any active path
    pub fn teleport(&mut self, position: GridPoint) {
        self.position = position;
        self.cancel();
    }

    /// Stop where the actor stands
    pub fn cancel(&mut self) {
        self.path = None;
        self.step = 0;
    }

    /// Replace the active path with `line` (from the current position toward a
    /// target). A line with fewer than two points means there is nowhere to go:
    /// the follower is left exactly as it was.
    ///
    /// When the line starts on the actor's own bead, walking begins at the
    /// second point. Returns the number of points still to visit.
    pub fn set_path(&mut self, line: Vec<GridPoint>) -> Result<usize, PondError> {
        if line.len() < 2 {
            let to = line.last().copied().unwrap_or(self.position);
            return Err(PondError::InvalidPath {
                from: self.position,
                to,
            });
        }

        let step = usize::from(line[0] == self.position);
        let remaining = line.len() - step;
        self.path = Some(line);
        self.step = step;
        Ok(remaining)
    }

    /// Head for `target` along the host's line from the current position
    pub fn set_target(&mut self, host: &dyn Host, target: GridPoint) -> Result<usize, PondError> {
        self.set_path(host.line(self.position, target))
    }

    /// Advance one tick. Returns the new position when the actor moved.
    pub fn advance(&mut self) -> Option<GridPoint> {
        let path = self.path.as_ref()?;
        let Some(&next) = path.get(self.step) else {
            self.path = None;
            return None;
        };

        if next == self.position {
            self.path = None;
            return None;
        }

        self.position = next;
        let last = path.len() - 1;
        self.step = if self.step < last {
            // Never stride past the final point without landing on it
            (self.step + self.stride).min(last)
        } else {
            path.len()
        };
        if self.step >= path.len() {
            self.path = None;
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use crate::point;
    use crate::sim::line_points;

    #[test]
    fn test_set_target_uses_host_line() {
        let host = HeadlessHost::new(1);
        let mut actor = PathFollower::new(point(0, 0));
        assert_eq!(actor.set_target(&host, point(5, 2)), Ok(5));
        let expected = [point(1, 0), point(2, 1), point(3, 1), point(4, 2), point(5, 2)];
        for p in expected {
            assert_eq!(actor.advance(), Some(p));
        }
        assert!(actor.is_idle());
        assert!(actor.set_target(&host, point(5, 2)).is_err());
    }

    #[test]
    fn test_walks_horizontal_path_in_three_ticks() {
        let mut actor = PathFollower::new(point(0, 0));
        let line = line_points(point(0, 0), point(3, 0));
        assert_eq!(line, vec![point(0, 0), point(1, 0), point(2, 0), point(3, 0)]);
        assert_eq!(actor.set_path(line), Ok(3));

        assert_eq!(actor.advance(), Some(point(1, 0)));
        assert_eq!(actor.advance(), Some(point(2, 0)));
        assert_eq!(actor.advance(), Some(point(3, 0)));
        assert_eq!(actor.position(), point(3, 0));
        assert!(actor.is_idle());

        // 4th tick
        assert_eq!(actor.advance(), None);
        assert_eq!(actor.position(), point(3, 0));
    }

    #[test]
    fn test_target_on_self_is_no_movement() {
        let mut actor = PathFollower::new(point(4, 4));
        let line = line_points(point(4, 4), point(4, 4));
        assert!(matches!(actor.set_path(line), Err(PondError::InvalidPath { .. })));
        assert!(actor.is_idle());
        assert_eq!(actor.advance(), None);
        assert_eq!(actor.position(), point(4, 4));
    }

    #[test]
    fn test_trivial_line_keeps_active_path() {
        let mut actor = PathFollower::new(point(0, 0));
        actor.set_path(line_points(point(0, 0), point(5, 0))).unwrap();
        actor.advance();
        assert!(actor.set_path(line_points(point(1, 0), point(1, 0))).is_err());
        assert_eq!(actor.path().map(<[GridPoint]>::len), Some(6));
        assert_eq!(actor.advance(), Some(point(2, 0)));
    }

    #[test]
    fn test_new_target_replaces_path() {
        let mut actor = PathFollower::new(point(0, 0));
        actor.set_path(line_points(point(0, 0), point(10, 0))).unwrap();
        actor.advance();
        actor.advance();
        assert_eq!(actor.position(), point(2, 0));

        actor.set_path(line_points(point(2, 0), point(2, 2))).unwrap();
        assert_eq!(actor.step(), 1);
        assert_eq!(actor.advance(), Some(point(2, 1)));
        assert_eq!(actor.advance(), Some(point(2, 2)));
        assert!(actor.is_idle());
    }

    #[test]
    fn test_stride_lands_on_target() {
        let mut actor = PathFollower::new(point(0, 0)).with_stride(3);
        actor.set_path(line_points(point(0, 0), point(7, 0))).unwrap();
        let mut visited = Vec::new();
        while let Some(p) = actor.advance() {
            visited.push(p);
        }
        assert_eq!(visited, vec![point(1, 0), point(4, 0), point(7, 0)]);
        assert_eq!(actor.position(), point(7, 0));
    }

    #[test]
    fn test_path_not_starting_on_actor() {
        let mut actor = PathFollower::new(point(0, 0));
        let remaining = actor.set_path(vec![point(5, 5), point(6, 5)]).unwrap();
        assert_eq!(remaining, 2);
        assert_eq!(actor.advance(), Some(point(5, 5)));
        assert_eq!(actor.advance(), Some(point(6, 5)));
        assert!(actor.is_idle());
    }

    #[test]
    fn test_repeated_point_exhausts_path() {
        let mut actor = PathFollower::new(point(0, 0));
        actor.set_path(vec![point(2, 0), point(2, 0), point(3, 0)]).unwrap();
        assert_eq!(actor.advance(), Some(point(2, 0)));
        assert_eq!(actor.advance(), None);
        assert!(actor.is_idle());
        assert_eq!(actor.advance(), None);
        assert_eq!(actor.position(), point(2, 0));
    }

    #[test]
    fn test_cancel_keeps_position() {
        let mut actor = PathFollower::new(point(0, 0));
        actor.set_path(line_points(point(0, 0), point(6, 0))).unwrap();
        actor.advance();
        actor.cancel();
        assert!(actor.is_idle());
        assert_eq!(actor.advance(), None);
        assert_eq!(actor.position(), point(1, 0));
    }

    #[test]
    fn test_stride_is_at_least_one() {
        let actor = PathFollower::new(point(0, 0)).with_stride(0);
        assert_eq!(actor.stride(), 1);
    }
}
