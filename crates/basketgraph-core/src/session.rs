//! # Session Module
//!
//! Owns one co-occurrence graph for the lifetime of an analysis.
//!
//! A session is either loaded from a transaction source, which it remembers so
//! that it can be rebuilt later, or built from baskets already in memory.
//! The graph is never persisted.

use crate::engine::QueryEngine;
use crate::graph::CooccurrenceGraph;
use crate::loader::{BasketBuilder, Schema};
use crate::{Basket, BasketError};
use std::path::{Path, PathBuf};

/// Where a session's baskets came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub schema: Schema,
}

/// A graph together with the bookkeeping needed to rebuild it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    graph: CooccurrenceGraph,
    source: Option<Source>,
    basket_count: usize,
    record_count: usize,
}

impl Session {
    /// Create an empty session with no source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the transaction file at `path` and build its graph.
    pub fn load(path: impl AsRef<Path>, schema: Schema) -> Result<Self, BasketError> {
        let source = Source {
            path: path.as_ref().to_path_buf(),
            schema,
        };
        let mut session = Self::build(&source)?;
        session.source = Some(source);
        Ok(session)
    }

    /// Build a session from baskets already in memory.
    ///
    /// Such a session has no source, so `reload` fails with `NoSource`.
    #[must_use]
    pub fn from_baskets<'b, I>(baskets: I) -> Self
    where
        I: IntoIterator<Item = &'b Basket>,
    {
        let mut session = Self::new();
        session.ingest(baskets);
        session
    }

    /// Fold more baskets into the graph. Returns how many were applied.
    ///
    /// Ingested baskets are not part of the source: a later `reload` drops them.
    pub fn ingest<'b, I>(&mut self, baskets: I) -> usize
    where
        I: IntoIterator<Item = &'b Basket>,
    {
        let applied = self.graph.update_all(baskets);
        self.basket_count = self.basket_count.saturating_add(applied);
        applied
    }

    /// Rebuild the graph from the recorded source.
    ///
    /// The new graph is built completely before anything is replaced, so on
    /// error the session keeps its previous state.
    pub fn reload(&mut self) -> Result<(), BasketError> {
        let source = self.source.take().ok_or(BasketError::NoSource)?;
        match Self::build(&source) {
            Ok(mut rebuilt) => {
                rebuilt.source = Some(source);
                *self = rebuilt;
                Ok(())
            }
            Err(e) => {
                self.source = Some(source);
                Err(e)
            }
        }
    }

    fn build(source: &Source) -> Result<Self, BasketError> {
        let mut builder = BasketBuilder::new(source.schema.clone());
        let record_count = builder.load(&source.path)?;
        let baskets = builder.finish();

        let mut session = Self::new();
        session.ingest(&baskets);
        session.record_count = record_count;
        Ok(session)
    }

    /// The owned graph.
    #[must_use]
    pub fn graph(&self) -> &CooccurrenceGraph {
        &self.graph
    }

    /// A query engine borrowing this session's graph.
    #[must_use]
    pub fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.graph)
    }

    /// Number of baskets folded into the graph.
    #[must_use]
    pub fn basket_count(&self) -> usize {
        self.basket_count
    }

    /// Number of data rows read from the source (0 for in-memory sessions).
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// The source this session was loaded from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
