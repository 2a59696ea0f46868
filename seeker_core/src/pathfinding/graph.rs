// seeker_core/src/pathfinding/graph.rs

//! The maze as a tiny topological graph: two rooms joined by the gap.
//! A textbook breadth-first search picks the room sequence; geometry is
//! attached afterwards by the route planner.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::maze::MazeHalf;

/// A node of the maze graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MazeNode {
    Room(MazeHalf),
    Gap,
}

/// Adjacency of the fixed two-room topology.
pub fn neighbors(node: &MazeNode) -> Vec<MazeNode> {
    match node {
        MazeNode::Room(_) => vec![MazeNode::Gap],
        MazeNode::Gap => vec![
            MazeNode::Room(MazeHalf::North),
            MazeNode::Room(MazeHalf::South),
        ],
    }
}

/// Generic unweighted search. Returns the node sequence from `start` to the
/// first node satisfying `is_goal`, both ends included.
pub fn breadth_first<N, FN, IT>(
    start: N,
    mut is_goal: impl FnMut(&N) -> bool,
    get_neighbors: &mut FN,
) -> Option<Vec<N>>
where
    N: Copy + Eq + Hash,
    FN: FnMut(&N) -> IT,
    IT: IntoIterator<Item = N>,
{
    let mut parents: HashMap<N, Option<N>> = HashMap::new();
    let mut frontier = VecDeque::new();
    parents.insert(start, None);
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        if is_goal(&current) {
            return Some(reconstruct(current, &parents));
        }
        for next in get_neighbors(&current) {
            if parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, Some(current));
            frontier.push_back(next);
        }
    }
    None
}

fn reconstruct<N: Copy + Eq + Hash>(goal: N, parents: &HashMap<N, Option<N>>) -> Vec<N> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(Some(parent)) = parents.get(&current) {
        path.push(*parent);
        current = *parent;
    }
    path.reverse();
    path
}

/// Room sequence from one half to the other.
pub fn room_sequence(from: MazeHalf, to: MazeHalf) -> Option<Vec<MazeNode>> {
    let goal = MazeNode::Room(to);
    breadth_first(MazeNode::Room(from), |n| *n == goal, &mut neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_goes_through_the_gap() {
        let seq = room_sequence(MazeHalf::North, MazeHalf::South).unwrap();
        assert_eq!(
            seq,
            vec![
                MazeNode::Room(MazeHalf::North),
                MazeNode::Gap,
                MazeNode::Room(MazeHalf::South)
            ]
        );
    }

    #[test]
    fn same_room_is_a_single_node() {
        let seq = room_sequence(MazeHalf::South, MazeHalf::South).unwrap();
        assert_eq!(seq, vec![MazeNode::Room(MazeHalf::South)]);
    }

    #[test]
    fn breadth_first_finds_shortest_hop_count() {
        // 0 - 1 - 2 - 3 and a shortcut 0 - 3.
        let mut adj = |n: &u8| match *n {
            0 => vec![1, 3],
            1 => vec![0, 2],
            2 => vec![1, 3],
            _ => vec![2, 0],
        };
        let path = breadth_first(0u8, |n| *n == 3, &mut adj).unwrap();
        assert_eq!(path, vec![0, 3]);
        assert!(breadth_first(0u8, |n| *n == 9, &mut adj).is_none());
    }
}
