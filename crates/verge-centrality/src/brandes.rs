//! Brandes dependency accumulation over canonical edges.
//!
//! One pass per source vertex: a shortest-path DAG is built (BFS for
//! unit weights, Dijkstra otherwise), then dependencies are pushed back
//! through the DAG in reverse settle order. Each predecessor arc `(v, w)`
//! receives `sigma[v] / sigma[w] * (1 + delta[w])`, accumulated into the
//! score slot of its canonical edge.
//!
//! The accumulator precision is generic so the engine can honor a
//! requested f32 or f64 result dtype without duplicated traversal code.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use verge_core::Graph;

/// Accumulator scalar for centrality scores (f32 or f64).
pub(crate) trait Accum:
    Copy
    + Send
    + Sync
    + PartialOrd
    + std::ops::Add<Output = Self>
    + std::ops::AddAssign
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    fn to_f64(self) -> f64;
}

impl Accum for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Accum for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn to_f64(self) -> f64 {
        self
    }
}

/// Predecessor record: the predecessor vertex and the arc reaching `w`.
type Pred = (u32, usize);

/// Accumulates unweighted (hop-count) edge dependencies for `sources`
/// into `scores`, one slot per canonical edge.
pub(crate) fn accumulate_unweighted<S: Accum>(graph: &Graph, sources: &[u32], scores: &mut [S]) {
    debug_assert_eq!(scores.len(), graph.num_edges());
    let n = graph.num_vertices();

    let mut sigma: Vec<S> = vec![S::ZERO; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut preds: Vec<Vec<Pred>> = vec![Vec::new(); n];
    let mut order: Vec<u32> = Vec::with_capacity(n);
    let mut delta: Vec<S> = vec![S::ZERO; n];
    let mut queue: VecDeque<u32> = VecDeque::new();

    for &s in sources {
        // Reset only what the previous source touched.
        for &v in &order {
            let v = v as usize;
            sigma[v] = S::ZERO;
            dist[v] = -1;
            delta[v] = S::ZERO;
            preds[v].clear();
        }
        order.clear();

        sigma[s as usize] = S::ONE;
        dist[s as usize] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            let dv = dist[v as usize];
            for arc in graph.arc_range(v as usize) {
                let w = graph.target(arc);
                if dist[w as usize] < 0 {
                    dist[w as usize] = dv + 1;
                    queue.push_back(w);
                }
                if dist[w as usize] == dv + 1 {
                    let sv = sigma[v as usize];
                    sigma[w as usize] += sv;
                    preds[w as usize].push((v, arc));
                }
            }
        }

        push_dependencies(graph, &order, &sigma, &preds, &mut delta, scores);
    }
}

/// Accumulates weighted edge dependencies for `sources` into `scores`.
///
/// Arc weights must be strictly positive (validated by the caller); with
/// that precondition every vertex settles after all of its shortest-path
/// predecessors, so relaxing only from settled vertices is exact.
pub(crate) fn accumulate_weighted<S: Accum>(graph: &Graph, sources: &[u32], scores: &mut [S]) {
    debug_assert_eq!(scores.len(), graph.num_edges());
    let n = graph.num_vertices();

    let mut sigma: Vec<S> = vec![S::ZERO; n];
    let mut dist: Vec<f64> = vec![f64::INFINITY; n];
    let mut settled: Vec<bool> = vec![false; n];
    let mut preds: Vec<Vec<Pred>> = vec![Vec::new(); n];
    let mut order: Vec<u32> = Vec::with_capacity(n);
    let mut delta: Vec<S> = vec![S::ZERO; n];
    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();

    for &s in sources {
        for &v in &order {
            let v = v as usize;
            sigma[v] = S::ZERO;
            dist[v] = f64::INFINITY;
            settled[v] = false;
            delta[v] = S::ZERO;
            preds[v].clear();
        }
        order.clear();

        sigma[s as usize] = S::ONE;
        dist[s as usize] = 0.0;
        heap.push(HeapEntry {
            dist: 0.0,
            vertex: s,
        });

        while let Some(HeapEntry { dist: d, vertex: v }) = heap.pop() {
            if settled[v as usize] {
                continue;
            }
            settled[v as usize] = true;
            order.push(v);

            for arc in graph.arc_range(v as usize) {
                let w = graph.target(arc);
                let nd = d + graph.arc_weight(arc);
                let dw = dist[w as usize];
                if nd < dw {
                    dist[w as usize] = nd;
                    sigma[w as usize] = sigma[v as usize];
                    preds[w as usize].clear();
                    preds[w as usize].push((v, arc));
                    heap.push(HeapEntry {
                        dist: nd,
                        vertex: w,
                    });
                } else if nd == dw {
                    let sv = sigma[v as usize];
                    sigma[w as usize] += sv;
                    preds[w as usize].push((v, arc));
                }
            }
        }

        push_dependencies(graph, &order, &sigma, &preds, &mut delta, scores);
    }
}

/// Reverse pass: pushes dependencies from the settle order back through
/// the predecessor arcs.
fn push_dependencies<S: Accum>(
    graph: &Graph,
    order: &[u32],
    sigma: &[S],
    preds: &[Vec<Pred>],
    delta: &mut [S],
    scores: &mut [S],
) {
    for &w in order.iter().rev() {
        let w = w as usize;
        let coeff = (S::ONE + delta[w]) / sigma[w];
        for &(v, arc) in &preds[w] {
            let contribution = sigma[v as usize] * coeff;
            scores[graph.arc_edge(arc)] += contribution;
            delta[v as usize] += contribution;
        }
    }
}

/// Min-heap entry ordered by distance (reversed for `BinaryHeap`).
struct HeapEntry {
    dist: f64,
    vertex: u32,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist && self.vertex == other.vertex
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the distance comparison to turn the max-heap into a
        // min-heap; break ties on vertex id for determinism.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}
