// seeker_core/src/maze.rs

//! Fixed geometry of the two-room maze.
//!
//! A square arena centred on the origin is split along `z = 0` by a dividing
//! wall. The wall has a single gap; everything else about the topology is
//! known in advance.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MazeLayout {
    /// Distance from the origin to each outer wall.
    pub half_extent: f64,
    pub wall_thickness: f64,
    /// Lateral coordinate of the gap's centre line.
    pub gap_center_x: f64,
    pub gap_width: f64,
    /// Depth offset from the wall used to line up before and after crossing.
    pub standoff: f64,
    /// Depth of the spread-out point on the far half.
    pub exploration_depth: f64,
    /// Waypoints are kept this far inside the outer walls.
    pub safe_margin: f64,
}

impl Default for MazeLayout {
    fn default() -> Self {
        Self {
            half_extent: 20.0,
            wall_thickness: 0.5,
            gap_center_x: 0.0,
            gap_width: 4.0,
            standoff: 3.0,
            exploration_depth: 10.0,
            safe_margin: 1.5,
        }
    }
}

/// Which side of the dividing wall a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MazeHalf {
    /// `z < 0`
    North,
    /// `z >= 0`
    South,
}

impl MazeHalf {
    pub fn of(point: &Point2<f64>) -> Self {
        if point.y < 0.0 {
            MazeHalf::North
        } else {
            MazeHalf::South
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            MazeHalf::North => MazeHalf::South,
            MazeHalf::South => MazeHalf::North,
        }
    }

    /// Sign of the depth coordinate on this half.
    pub fn sign(self) -> f64 {
        match self {
            MazeHalf::North => -1.0,
            MazeHalf::South => 1.0,
        }
    }
}

impl MazeLayout {
    pub fn gap_half_width(&self) -> f64 {
        self.gap_width * 0.5
    }

    /// True when lateral coordinate `x` lies within the opening.
    pub fn in_gap_band(&self, x: f64) -> bool {
        (x - self.gap_center_x).abs() <= self.gap_half_width()
    }

    /// True when `(x, z)` is inside the solid part of the dividing wall,
    /// inflated by `radius`.
    pub fn hits_divider(&self, p: &Point2<f64>, radius: f64) -> bool {
        p.y.abs() < self.wall_thickness * 0.5 + radius && !self.in_gap_band(p.x)
    }

    /// Half-width of the region waypoints are allowed in.
    pub fn safe_limit(&self) -> f64 {
        self.half_extent - self.safe_margin
    }

    pub fn clamp_safe(&self, p: Point2<f64>) -> Point2<f64> {
        let limit = self.safe_limit();
        Point2::new(p.x.clamp(-limit, limit), p.y.clamp(-limit, limit))
    }

    pub fn contains(&self, p: &Point2<f64>) -> bool {
        p.x.abs() <= self.half_extent && p.y.abs() <= self.half_extent
    }

    pub fn gap_center(&self) -> Point2<f64> {
        Point2::new(self.gap_center_x, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_split_on_depth_sign() {
        assert_eq!(MazeHalf::of(&Point2::new(5.0, -0.1)), MazeHalf::North);
        assert_eq!(MazeHalf::of(&Point2::new(-5.0, 0.0)), MazeHalf::South);
        assert_eq!(MazeHalf::North.opposite(), MazeHalf::South);
    }

    #[test]
    fn divider_has_a_gap() {
        let maze = MazeLayout::default();
        assert!(maze.hits_divider(&Point2::new(8.0, 0.1), 0.5));
        assert!(!maze.hits_divider(&Point2::new(0.5, 0.1), 0.5));
        assert!(!maze.hits_divider(&Point2::new(8.0, 2.0), 0.5));
    }

    #[test]
    fn clamp_safe_keeps_points_inside() {
        let maze = MazeLayout::default();
        let p = maze.clamp_safe(Point2::new(40.0, -40.0));
        assert_eq!(p, Point2::new(18.5, -18.5));
    }
}
