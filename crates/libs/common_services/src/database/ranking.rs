use crate::database::embedding::FaceCandidate;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Orders by distance, then by embedding id so equal distances rank deterministically.
fn closer(a: &FaceCandidate, b: &FaceCandidate) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.embedding_id.cmp(&b.embedding_id))
}

/// Reduces raw candidates to the final match list.
///
/// Candidates farther than `threshold` are dropped (a NaN distance never qualifies), each image
/// keeps only its closest face, and the survivors are sorted best first and cut to `limit`.
#[must_use]
pub fn rank_matches(
    candidates: Vec<FaceCandidate>,
    threshold: f64,
    limit: usize,
) -> Vec<FaceCandidate> {
    let mut best_per_image: HashMap<i64, FaceCandidate> = HashMap::new();

    for candidate in candidates.into_iter().filter(|c| c.distance <= threshold) {
        match best_per_image.entry(candidate.image_id) {
            Entry::Occupied(mut best) => {
                if closer(&candidate, best.get()).is_lt() {
                    best.insert(candidate);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }

    let mut ranked: Vec<FaceCandidate> = best_per_image.into_values().collect();
    ranked.sort_by(closer);
    ranked.truncate(limit);
    ranked
}
