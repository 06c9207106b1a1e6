//! Greedy interval packing of segments into visual layers.

use crate::entities::Segment;

/// Assign every segment a non-overlapping layer, in place. Returns the
/// number of layers used.
///
/// Segments are processed in order of ascending `start`; ties keep the
/// original list order (stable sort). That ordering is load-bearing: it
/// makes layer assignment reproducible across re-runs, which is what the
/// caller relies on when it recomputes from scratch after every edit.
/// First-fit against the per-layer end times is equivalent to greedy
/// interval-graph coloring - minimal for this processing order, not
/// globally minimal, and that is the contract.
pub fn assign_layers(segments: &mut [Segment]) -> usize {
    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by_key(|&i| segments[i].start);

    // layer_end[i] holds the end time of the segment currently occupying
    // layer i.
    let mut layer_end: Vec<i32> = Vec::new();
    for &i in &order {
        let (start, end) = (segments[i].start, segments[i].end);
        match layer_end.iter().position(|&e| e <= start) {
            Some(layer) => {
                layer_end[layer] = end;
                segments[i].layer = layer as u32;
            }
            None => {
                segments[i].layer = layer_end.len() as u32;
                layer_end.push(end);
            }
        }
    }
    layer_end.len()
}
