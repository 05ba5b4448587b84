//! Error taxonomy for path searches and request submission.
//!
//! Only genuine failures live here. A search that finds no path, is
//! cancelled, or runs out of time completes normally with a dedicated
//! result state; those outcomes are not errors.

use std::error::Error;
use std::fmt;

use crate::cell::{Cell, RegionId};
use crate::position::Position;

/// Errors a navigation request can complete with.
#[derive(Clone, Debug, PartialEq)]
pub enum NavError {
    /// The request's begin coordinate does not resolve to a grid cell.
    InvalidBegin {
        /// The unresolved begin coordinate.
        begin: Position,
        /// The request's end coordinate, for context.
        end: Position,
    },
    /// The request's end coordinate does not resolve to a grid cell.
    InvalidEnd {
        /// The request's begin coordinate, for context.
        begin: Position,
        /// The unresolved end coordinate.
        end: Position,
    },
    /// A neighbour's region has no recognised spawn state. This is a
    /// violation of the grid contract and is never retried.
    UnknownRegion {
        /// The neighbour whose region could not be resolved.
        cell: Cell,
        /// The unresolved region.
        region: RegionId,
    },
    /// A priority list was asked to remove a record it does not hold.
    RecordNotFound {
        /// The cell of the missing record.
        cell: Cell,
    },
    /// A priority list was asked for a cell it does not hold.
    CellNotFound {
        /// The missing cell.
        cell: Cell,
    },
    /// Path reconstruction reached a record with no incoming connection
    /// before getting back to the begin cell.
    MissingConnection {
        /// The record's cell.
        cell: Cell,
    },
    /// A connection was built from a cell to itself.
    SelfConnection {
        /// The offending cell.
        cell: Cell,
    },
    /// The search panicked; the panic was contained at the operation
    /// boundary.
    WorkerPanicked {
        /// The panic payload, if it was a string.
        reason: String,
    },
    /// The request queue is at capacity.
    QueueFull,
    /// The service has stopped and no longer accepts requests.
    ServiceStopped,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBegin { begin, end } => {
                write!(f, "request {begin} -> {end} specified invalid begin {begin}")
            }
            Self::InvalidEnd { begin, end } => {
                write!(f, "request {begin} -> {end} specified invalid end {end}")
            }
            Self::UnknownRegion { cell, region } => {
                write!(f, "{cell} belongs to region {region} with no known spawn state")
            }
            Self::RecordNotFound { cell } => {
                write!(f, "cannot remove record for {cell}: not in priority list")
            }
            Self::CellNotFound { cell } => {
                write!(f, "cannot find a record for {cell} in priority list")
            }
            Self::MissingConnection { cell } => {
                write!(f, "record for {cell} has no incoming connection")
            }
            Self::SelfConnection { cell } => {
                write!(f, "connection from {cell} to itself")
            }
            Self::WorkerPanicked { reason } => write!(f, "search panicked: {reason}"),
            Self::QueueFull => write!(f, "request queue full"),
            Self::ServiceStopped => write!(f, "navigation service has stopped"),
        }
    }
}

impl Error for NavError {}
