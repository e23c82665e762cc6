//! Task packing for a single free interval.
//!
//! Selects the value-maximizing subset of the unplaced pool that fits the
//! interval, as a 0/1 knapsack over integer minutes. Deadlines are handled
//! inside the DP: candidates are ordered earliest-deadline-first, so the
//! chosen prefix before a task must end by that task's deadline.
//!
//! Cost is O(candidates × capacity) time and memory per interval. Capacity
//! is bounded by one day's window, so this stays small for realistic pools.

use std::cmp::Ordering;

use crate::schedule::{Task, TaskKind};
use crate::time::AbsMinute;
use crate::timeline::Interval;

/// A task chosen for an interval, with its concrete span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Index into the pool passed to [`pack_interval`].
    pub pool_index: usize,
    pub span: Interval,
}

struct Candidate {
    pool_index: usize,
    duration: usize,
    /// Latest end, as an offset from the interval start, capped to capacity.
    limit: usize,
    deadline: Option<AbsMinute>,
    kind: TaskKind,
    value: u32,
}

/// Pack `pool` into `interval`.
///
/// `deadlines[i]` is the absolute deadline of `pool[i]`, if any. Returns the
/// placements laid out back to back from `interval.start`; an empty result
/// means nothing eligible fits.
pub fn pack_interval(
    interval: Interval,
    pool: &[&Task],
    deadlines: &[Option<AbsMinute>],
) -> Vec<Placement> {
    let capacity = interval.duration_minutes().max(0) as usize;
    let mut candidates = eligible_candidates(interval, pool, deadlines, capacity);
    if candidates.is_empty() {
        return Vec::new();
    }

    // EDF order; tasks without a deadline last, then by pool order.
    candidates.sort_by(|a, b| match (a.deadline, b.deadline) {
        (Some(x), Some(y)) => x.cmp(&y).then(a.pool_index.cmp(&b.pool_index)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.pool_index.cmp(&b.pool_index),
    });

    let must_value = must_weight(&candidates);
    let weights: Vec<u64> = candidates
        .iter()
        .map(|c| match c.kind {
            TaskKind::Must => must_value,
            TaskKind::Want => c.value as u64,
        })
        .collect();

    let chosen = knapsack(&candidates, &weights, capacity);
    let mut chosen: Vec<&Candidate> = chosen.into_iter().map(|i| &candidates[i]).collect();
    layout(interval, &mut chosen)
}

/// Tasks that fit this interval on their own, deadline included.
fn eligible_candidates(
    interval: Interval,
    pool: &[&Task],
    deadlines: &[Option<AbsMinute>],
    capacity: usize,
) -> Vec<Candidate> {
    pool.iter()
        .enumerate()
        .filter_map(|(pool_index, task)| {
            let duration = usize::try_from(task.duration_minutes).ok()?;
            if duration == 0 || duration > capacity {
                return None;
            }
            let deadline = deadlines.get(pool_index).copied().flatten();
            let limit = match deadline {
                Some(dl) => {
                    let room = dl - interval.start;
                    if room < duration as i64 {
                        return None;
                    }
                    (room as usize).min(capacity)
                }
                None => capacity,
            };
            Some(Candidate {
                pool_index,
                duration,
                limit,
                deadline,
                kind: task.kind,
                value: task.value,
            })
        })
        .collect()
}

/// Weight of a `must` task: strictly more than every `want` together.
fn must_weight(candidates: &[Candidate]) -> u64 {
    candidates
        .iter()
        .filter(|c| c.kind == TaskKind::Want)
        .map(|c| c.value as u64)
        .sum::<u64>()
        + 1
}

/// 0/1 knapsack with per-item end limits. Returns chosen candidate indices.
///
/// `dp[i][c]` is the best value using the first `i` candidates whose EDF
/// schedule ends within `c` minutes; taking item `i` caps the prefix at
/// `min(c, limit_i) - duration_i`.
fn knapsack(candidates: &[Candidate], weights: &[u64], capacity: usize) -> Vec<usize> {
    let m = candidates.len();
    let width = capacity + 1;
    let mut dp = vec![0u64; (m + 1) * width];
    let mut take = vec![false; (m + 1) * width];

    for i in 1..=m {
        let cand = &candidates[i - 1];
        for c in 0..=capacity {
            let skip = dp[(i - 1) * width + c];
            let bound = c.min(cand.limit);
            let mut best = skip;
            if bound >= cand.duration {
                let with = dp[(i - 1) * width + (bound - cand.duration)] + weights[i - 1];
                if with > skip {
                    best = with;
                    take[i * width + c] = true;
                }
            }
            dp[i * width + c] = best;
        }
    }

    let mut chosen = Vec::new();
    let mut c = capacity;
    for i in (1..=m).rev() {
        if take[i * width + c] {
            let cand = &candidates[i - 1];
            chosen.push(i - 1);
            c = c.min(cand.limit) - cand.duration;
        }
    }
    chosen.reverse();
    chosen
}

/// Presentation order: `must` first, then descending value.
fn priority_order(a: &Candidate, b: &Candidate) -> Ordering {
    let rank = |k: TaskKind| match k {
        TaskKind::Must => 0,
        TaskKind::Want => 1,
    };
    rank(a.kind)
        .cmp(&rank(b.kind))
        .then(b.value.cmp(&a.value))
        .then(a.pool_index.cmp(&b.pool_index))
}

/// Lay out back to back. Falls back to earliest-deadline-first when the
/// priority order would miss a deadline.
fn layout(interval: Interval, chosen: &mut [&Candidate]) -> Vec<Placement> {
    chosen.sort_by(|a, b| priority_order(a, b));
    if !meets_deadlines(chosen) {
        chosen.sort_by(|a, b| {
            let da = a.deadline.unwrap_or(AbsMinute::MAX);
            let db = b.deadline.unwrap_or(AbsMinute::MAX);
            da.cmp(&db).then_with(|| priority_order(a, b))
        });
    }

    let mut cursor = interval.start;
    chosen
        .iter()
        .map(|cand| {
            let start = cursor;
            cursor += cand.duration as i64;
            Placement {
                pool_index: cand.pool_index,
                span: Interval { start, end: cursor },
            }
        })
        .collect()
}

fn meets_deadlines(order: &[&Candidate]) -> bool {
    let mut offset = 0usize;
    order.iter().all(|cand| {
        offset += cand.duration;
        offset <= cand.limit
    })
}
