// File: crates/difplot-core/src/gap.rs
// Summary: Maximum x-gap enforcement over a sorted candidate index set.

/// Walk `candidates` (sorted, starting at 0) and insert intermediate indices wherever
/// two consecutive picks are more than `max_gap` apart in x.
///
/// Each insertion is the furthest point still within `max_gap` of the last pick. When
/// even the next raw point is out of reach the gap cannot be closed, so that point is
/// taken as is and the walk moves on. Insertion stops as soon as it would not land
/// strictly between the last pick and the candidate.
pub(crate) fn enforce_max_gap(x: &[f64], candidates: &[usize], max_gap: f64) -> Vec<usize> {
    let Some((&first, rest)) = candidates.split_first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(candidates.len());
    out.push(first);
    for &j in rest {
        while let Some(&last) = out.last() {
            if x[j] - x[last] <= max_gap {
                break;
            }
            // must agree with `within_gap` under rounding
            let within = last + x[last..=j].partition_point(|&v| v - x[last] <= max_gap) - 1;
            let next = within.max(last + 1);
            if next >= j {
                break;
            }
            out.push(next);
        }
        out.push(j);
    }
    out
}

/// True when every consecutive pair of `idx` is at most `max_gap` apart in x.
pub(crate) fn within_gap(x: &[f64], idx: &[usize], max_gap: f64) -> bool {
    idx.windows(2).all(|w| x[w[1]] - x[w[0]] <= max_gap)
}
