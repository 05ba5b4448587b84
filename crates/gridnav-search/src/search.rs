//! The best-first search loop.
//!
//! The open list is ordered by cost so far. Each iteration takes the
//! front record, stops if it is the goal, and otherwise relaxes every
//! outgoing connection: a cheaper route to a closed cell reopens it, a
//! cheaper route to an open cell replaces its record, and an unseen cell
//! is added with a fresh heuristic estimate. A replaced record is
//! reinserted at its new cost; leaving it at its old position lets a
//! costlier goal record reach the front first. The expanded record then
//! moves to the closed list.
//!
//! The cancel flag and deadline are checked before each expansion and
//! before each connection is relaxed.

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use gridnav_core::{Cell, CostModifiers, DiagonalPolicy, NavError, NavGrid, NeighborQuery};

use crate::budget::{Budget, Checkpoint};
use crate::connection::Connection;
use crate::edge_cost::{EdgeCost, ObstacleEdgeCost};
use crate::graph::ConnectionGraph;
use crate::heuristic::{Heuristic, HeuristicKind};
use crate::path::{Path, SearchDiagnostics};
use crate::priority::PriorityList;
use crate::record::NodeRecord;

/// Tunables for one search.
#[derive(Clone, Debug)]
pub struct SearchSettings {
    /// Heuristic to instantiate. Default: [`HeuristicKind::Euclidean`].
    pub heuristic: HeuristicKind,
    /// Door and entity penalties. Default: door 10, entity 5.
    pub modifiers: CostModifiers,
    /// Diagonal movement rule. Default: [`DiagonalPolicy::Strict`].
    pub diagonals: DiagonalPolicy,
    /// Wall-clock limit for the search loop. Default: 1000 ms.
    pub timeout: Duration,
    /// Keep the final open and closed lists. Default: `false`.
    pub debugging: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            heuristic: HeuristicKind::Euclidean,
            modifiers: CostModifiers::default(),
            diagonals: DiagonalPolicy::Strict,
            timeout: Duration::from_millis(1000),
            debugging: false,
        }
    }
}

/// Everything one search needs. Built per request and consumed by
/// [`search()`].
pub struct SearchContext<'a> {
    begin: Cell,
    end: Cell,
    heuristic: Box<dyn Heuristic>,
    graph: ConnectionGraph<'a>,
    cancel: &'a AtomicBool,
    timeout: Duration,
    debugging: bool,
}

impl<'a> SearchContext<'a> {
    /// Bind a fresh heuristic to `end` and a graph over `grid`.
    pub fn new(
        grid: &'a dyn NavGrid,
        begin: Cell,
        end: Cell,
        settings: &SearchSettings,
        cancel: &'a AtomicBool,
    ) -> Self {
        let graph = ConnectionGraph::new(
            grid,
            NeighborQuery::navigation(settings.diagonals),
            Box::new(ObstacleEdgeCost::new(settings.modifiers)),
        );
        Self {
            begin,
            end,
            heuristic: settings.heuristic.bind(&end, &settings.modifiers),
            graph,
            cancel,
            timeout: settings.timeout,
            debugging: settings.debugging,
        }
    }

    /// Replace the step pricing. The heuristic must stay admissible for
    /// the new costs.
    pub fn with_edge_cost(self, edge_cost: Box<dyn EdgeCost + 'a>) -> Self {
        let graph = ConnectionGraph::new(self.graph.grid(), *self.graph.query(), edge_cost);
        Self { graph, ..self }
    }

    /// Begin cell.
    pub fn begin(&self) -> &Cell {
        &self.begin
    }

    /// End cell.
    pub fn end(&self) -> &Cell {
        &self.end
    }
}

/// How a search finished.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// A cheapest path was found.
    Found(Path),
    /// Every reachable cell was expanded without reaching the end.
    Exhausted(Option<SearchDiagnostics>),
    /// The cancel flag was raised.
    Cancelled(Option<SearchDiagnostics>),
    /// The time limit elapsed.
    TimedOut {
        /// The configured limit.
        limit: Duration,
        /// Time spent when the check fired.
        elapsed: Duration,
    },
}

impl SearchOutcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Diagnostics carried by this outcome, if any.
    pub fn diagnostics(&self) -> Option<&SearchDiagnostics> {
        match self {
            SearchOutcome::Found(path) => path.diagnostics(),
            SearchOutcome::Exhausted(d) | SearchOutcome::Cancelled(d) => d.as_ref(),
            SearchOutcome::TimedOut { .. } => None,
        }
    }
}

enum Flow {
    Reached(NodeRecord),
    Exhausted,
    Cancelled,
    TimedOut { limit: Duration, elapsed: Duration },
}

fn halted(checkpoint: Checkpoint) -> Option<Flow> {
    match checkpoint {
        Checkpoint::Continue => None,
        Checkpoint::Cancelled => Some(Flow::Cancelled),
        Checkpoint::TimedOut { limit, elapsed } => Some(Flow::TimedOut { limit, elapsed }),
    }
}

/// Run a search to completion.
///
/// Errors are reserved for grid contract violations and internal
/// inconsistencies; running out of reachable cells, cancellation, and
/// timeouts are ordinary [`SearchOutcome`]s.
pub fn search(ctx: SearchContext<'_>) -> Result<SearchOutcome, NavError> {
    let mut open = PriorityList::new();
    let mut closed = PriorityList::new();
    let flow = expand(&ctx, &mut open, &mut closed)?;

    let debugging = ctx.debugging;
    let diagnostics = move |open, closed| debugging.then_some(SearchDiagnostics { open, closed });

    Ok(match flow {
        Flow::Reached(goal) => {
            let connections = reconstruct(&ctx.begin, goal, &open, &closed)?;
            SearchOutcome::Found(Path::new(connections, diagnostics(open, closed)))
        }
        Flow::Exhausted => SearchOutcome::Exhausted(diagnostics(open, closed)),
        Flow::Cancelled => SearchOutcome::Cancelled(diagnostics(open, closed)),
        Flow::TimedOut { limit, elapsed } => SearchOutcome::TimedOut { limit, elapsed },
    })
}

fn expand(
    ctx: &SearchContext<'_>,
    open: &mut PriorityList,
    closed: &mut PriorityList,
) -> Result<Flow, NavError> {
    open.add(NodeRecord::seed(ctx.begin, ctx.heuristic.estimate(&ctx.begin)));
    let budget = Budget::start(ctx.cancel, ctx.timeout);

    while let Some(&current) = open.lowest_cost_so_far() {
        if let Some(flow) = halted(budget.check()) {
            return Ok(flow);
        }
        if current.node == ctx.end {
            return Ok(Flow::Reached(current));
        }

        for connection in ctx.graph.connections(&current.node)? {
            if let Some(flow) = halted(budget.check()) {
                return Ok(flow);
            }
            let end_node = connection.end;
            let end_cost = current.cost_so_far + connection.cost;

            let heuristic_delta = if let Some(&record) = closed.try_get(&end_node) {
                if record.cost_so_far <= end_cost {
                    continue;
                }
                closed.remove(&record)?;
                record.heuristic_delta()
            } else if let Some(record) = open.try_get(&end_node) {
                if record.cost_so_far <= end_cost {
                    continue;
                }
                record.heuristic_delta()
            } else {
                ctx.heuristic.estimate(&end_node)
            };

            let updated = NodeRecord {
                node: end_node,
                connection: Some(connection),
                cost_so_far: end_cost,
                estimated_total_cost: end_cost + heuristic_delta,
            };
            if open.contains(&end_node) {
                open.remove(&updated)?;
            }
            open.add(updated);
        }

        let expanded = open.remove(&current)?;
        closed.add(expanded);
    }
    Ok(Flow::Exhausted)
}

/// Walk predecessors back from `goal` to `begin`.
fn reconstruct(
    begin: &Cell,
    goal: NodeRecord,
    open: &PriorityList,
    closed: &PriorityList,
) -> Result<Vec<Connection>, NavError> {
    let mut connections = Vec::new();
    let mut record = goal;
    while record.node != *begin {
        let connection = record
            .connection
            .ok_or(NavError::MissingConnection { cell: record.node })?;
        connections.push(connection);
        record = match closed.try_get(&connection.begin) {
            Some(r) => *r,
            None => *open.get(&connection.begin)?,
        };
    }
    connections.reverse();
    Ok(connections)
}
