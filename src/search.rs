//! Best-first search core shared by the grid solvers. Nodes are dense indices into the
//! grid (`row * width + col`), so the open/closed bookkeeping lives in flat arrays sized
//! to the grid rather than in hash maps.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::cancel::CancelToken;
use crate::error::Result;

const NO_PARENT: usize = usize::MAX;

struct SmallestCostHolder {
    estimated_cost: f64,
    cost: f64,
    index: usize,
    /// Push counter; earlier discoveries win ties.
    order: u64,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest estimate first, then the node that
        // was pushed earliest.
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => other.order.cmp(&self.order),
            s => s,
        }
    }
}

/// Per-invocation search state. Dropped when the search returns.
struct SearchContext {
    cost: Vec<f64>,
    parent: Vec<usize>,
    closed: Vec<bool>,
    to_see: BinaryHeap<SmallestCostHolder>,
    pushed: u64,
}

impl SearchContext {
    fn new(len: usize) -> SearchContext {
        SearchContext {
            cost: vec![f64::INFINITY; len],
            parent: vec![NO_PARENT; len],
            closed: vec![false; len],
            to_see: BinaryHeap::new(),
            pushed: 0,
        }
    }

    fn push(&mut self, index: usize, cost: f64, estimated_cost: f64) {
        self.to_see.push(SmallestCostHolder {
            estimated_cost,
            cost,
            index,
            order: self.pushed,
        });
        self.pushed += 1;
    }

    fn reverse_path(&self, end: usize) -> Vec<usize> {
        let mut path: Vec<usize> = std::iter::successors(Some(end), |&i| {
            Some(self.parent[i]).filter(|&p| p != NO_PARENT)
        })
        .collect();
        path.reverse();
        path
    }
}

/// A* over `len` dense nodes. Returns the node sequence from `start` to the first node
/// accepted by `success` together with its cost, `Ok(None)` if the open set drains, or
/// [RouteError::Cancelled](crate::RouteError::Cancelled) if `cancel` trips. The token is
/// checked before every expansion.
pub(crate) fn astar<FN, IN, FH, FS>(
    len: usize,
    start: usize,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    cancel: &CancelToken,
) -> Result<Option<(Vec<usize>, f64)>>
where
    FN: FnMut(usize) -> IN,
    IN: IntoIterator<Item = (usize, f64)>,
    FH: FnMut(usize) -> f64,
    FS: FnMut(usize) -> bool,
{
    let mut ctx = SearchContext::new(len);
    ctx.cost[start] = 0.0;
    let h = heuristic(start);
    ctx.push(start, 0.0, h);
    while let Some(SmallestCostHolder { cost, index, .. }) = ctx.to_see.pop() {
        cancel.check()?;
        // A node may sit in the heap several times if a cheaper way to it was found
        // later; only the entry matching its best cost is expanded.
        if ctx.closed[index] || cost > ctx.cost[index] {
            continue;
        }
        ctx.closed[index] = true;
        if success(index) {
            return Ok(Some((ctx.reverse_path(index), cost)));
        }
        for (successor, move_cost) in successors(index) {
            let new_cost = cost + move_cost;
            if new_cost < ctx.cost[successor] {
                ctx.cost[successor] = new_cost;
                ctx.parent[successor] = index;
                // Reopens the node if it had been closed with a worse cost.
                ctx.closed[successor] = false;
                let h = heuristic(successor);
                ctx.push(successor, new_cost, new_cost + h);
            }
        }
    }
    Ok(None)
}
