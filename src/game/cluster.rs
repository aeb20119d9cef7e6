//! Cluster detection - finding and popping matching bubbles.
//!
//! Uses flood fill (BFS) to find connected groups of same-colored bubbles.
//! Two bubbles are connected when their centers are within one diameter plus
//! a small slack, which absorbs float error from snapping.
//! When a cluster of 3+ is found, they pop!

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};

use super::{
    bubble::{BubbleColor, BubbleId},
    field::Field,
};

/// Minimum cluster size to pop (match-3).
pub const MIN_CLUSTER_SIZE: usize = 3;

/// A group of bubbles removed from the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Pop {
    pub ids: Vec<BubbleId>,
    pub color: BubbleColor,
}

impl Pop {
    pub fn count(&self) -> usize {
        self.ids.len()
    }
}

/// Find all bubbles connected to `start` that share its color.
///
/// The result always contains `start` (if it is in the field) and is closed
/// under adjacency: no same-colored bubble within `within` of a member is left
/// out. Members are listed in visit order.
pub fn find_cluster(field: &Field, start: BubbleId, within: f32) -> Vec<BubbleId> {
    let Some(seed) = field.get(start) else {
        return Vec::new();
    };
    let target_color = seed.color;

    let mut cluster = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(seed.id);
    queue.push_back(*seed);

    while let Some(current) = queue.pop_front() {
        cluster.push(current.id);

        for neighbor in field.neighbors_of_color(current.position, target_color, within) {
            if visited.insert(neighbor.id) {
                queue.push_back(*neighbor);
            }
        }
    }

    cluster
}

/// Pop the cluster around a freshly placed bubble if it is big enough.
///
/// `placed` must already be in `field`. Returns the removed group, or `None`
/// when the cluster is too small and the field is left untouched.
pub fn resolve(field: &mut Field, placed: BubbleId, within: f32) -> Option<Pop> {
    let cluster = find_cluster(field, placed, within);
    let color = field.get(placed)?.color;

    if cluster.len() < MIN_CLUSTER_SIZE {
        debug!(
            "Cluster of {} {:?} around {} is too small to pop",
            cluster.len(),
            color,
            placed
        );
        return None;
    }

    let members: HashSet<BubbleId> = cluster.iter().copied().collect();
    field.remove_many(&members);

    info!("Popped cluster of {} {:?} bubbles", cluster.len(), color);

    Some(Pop {
        ids: cluster,
        color,
    })
}
