//! AC-3 arc consistency.

use std::collections::{HashSet, VecDeque};

use super::CspModel;

/// Prunes every domain to arc consistency.
///
/// Returns `false` as soon as a domain is emptied. Every ordered pair of
/// distinct variables is an arc; pending arcs are never queued twice.
pub fn ac3(model: &mut CspModel<'_>) -> bool {
    let n = model.len();
    let mut queue = VecDeque::with_capacity(n * n.saturating_sub(1));
    let mut pending = HashSet::new();
    for x in 0..n {
        for y in 0..n {
            if x != y {
                queue.push_back((x, y));
                pending.insert((x, y));
            }
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        pending.remove(&(x, y));
        if !revise(model, x, y) {
            continue;
        }
        if model.domains[x].is_empty() {
            return false;
        }
        for z in (0..n).filter(|&z| z != x && z != y) {
            if pending.insert((z, x)) {
                queue.push_back((z, x));
            }
        }
    }
    true
}

/// Drops values of `x` with no support in `y`. Returns whether any went.
fn revise(model: &mut CspModel<'_>, x: usize, y: usize) -> bool {
    let domain = std::mem::take(&mut model.domains[x]);
    let before = domain.len();
    let kept: Vec<_> = domain
        .into_iter()
        .filter(|&vx| {
            model.domains[y]
                .iter()
                .any(|&vy| model.compatible(x, vx, y, vy))
        })
        .collect();
    let revised = kept.len() != before;
    model.domains[x] = kept;
    revised
}
