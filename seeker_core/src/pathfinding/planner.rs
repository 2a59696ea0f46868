// seeker_core/src/pathfinding/planner.rs

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::graph::{room_sequence, MazeNode};
use crate::maze::{MazeHalf, MazeLayout};

/// A planned traversal to the other half of the maze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub from: MazeHalf,
    pub to: MazeHalf,
    pub waypoints: Vec<Point2<f64>>,
}

/// Plans a route from `start` into the half it is not in.
///
/// The destination half is always the opposite one, wherever the target
/// actually is: the route is for coverage, not for homing. The legs are
/// start, line up with the gap, stand-off, gap centre, stand-off on the far
/// side, then spread out to the exploration depth.
pub fn plan_crossing(start: Point2<f64>, layout: &MazeLayout) -> Route {
    let from = MazeHalf::of(&start);
    let to = from.opposite();
    let gap_x = layout.gap_center_x;

    // The graph is fixed and connected, so the search always succeeds.
    let rooms = room_sequence(from, to).unwrap_or_else(|| {
        vec![MazeNode::Room(from), MazeNode::Gap, MazeNode::Room(to)]
    });

    let mut waypoints = Vec::with_capacity(6);
    for node in rooms {
        match node {
            MazeNode::Room(half) if half == from => {
                waypoints.push(start);
                waypoints.push(Point2::new(gap_x, start.y));
                waypoints.push(Point2::new(gap_x, half.sign() * layout.standoff));
            }
            MazeNode::Gap => waypoints.push(layout.gap_center()),
            MazeNode::Room(half) => {
                waypoints.push(Point2::new(gap_x, half.sign() * layout.standoff));
                waypoints.push(Point2::new(start.x, half.sign() * layout.exploration_depth));
            }
        }
    }

    Route {
        from,
        to,
        waypoints: waypoints.into_iter().map(|p| layout.clamp_safe(p)).collect(),
    }
}
