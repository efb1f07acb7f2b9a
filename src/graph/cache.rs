//! Lazily rebuilt link graph with single-flight coordination.
//!
//! Three states:
//! - `Invalid`: no usable graph; the next `get_graph()` starts a build
//! - `Building`: one build in flight; callers join it instead of starting another
//! - `Ready`: a graph is published and current
//!
//! The published graph lives in an `ArcSwapOption`, so the `Ready` fast path
//! is a lock-free load. The state mutex is only taken to start, join or
//! finish a build, and is never held across an await.
//!
//! `invalidate()` during a build does not cancel it: the build's success is
//! still handed to everyone waiting on it, but it is not published, and the
//! next call starts a fresh build.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use tokio::sync::watch;

use super::adjacency::LinkGraph;
use super::builder::GraphBuilder;
use crate::error::{GraphError, Result};
use crate::source::ContentSource;

/// Shared outcome of one build, handed to every waiter.
type Outcome = Result<Arc<LinkGraph>>;

/// Observable cache state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Invalid,
    Building,
    Ready,
}

enum Slot {
    Invalid,
    Building {
        /// Identifies the build so a late finisher cannot clobber a newer one.
        id: u64,
        /// Invalidation generation observed when the build started.
        generation: u64,
        outcome: watch::Receiver<Option<Outcome>>,
    },
    Ready,
}

struct State {
    slot: Slot,
    /// Bumped by every `invalidate()`.
    generation: u64,
    next_build: u64,
}

struct Inner<S> {
    source: S,
    builder: GraphBuilder,
    state: Mutex<State>,
    published: ArcSwapOption<LinkGraph>,
    builds: AtomicU64,
}

/// Owner of the current link graph.
///
/// Cheap to clone; clones share the same state.
pub struct GraphCache<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for GraphCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ContentSource> GraphCache<S> {
    pub fn new(source: S, builder: GraphBuilder) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                builder,
                state: Mutex::new(State {
                    slot: Slot::Invalid,
                    generation: 0,
                    next_build: 0,
                }),
                published: ArcSwapOption::empty(),
                builds: AtomicU64::new(0),
            }),
        }
    }

    /// The content source this cache indexes.
    pub fn source(&self) -> &S {
        &self.inner.source
    }

    /// The builder used for every rebuild.
    pub fn builder(&self) -> &GraphBuilder {
        &self.inner.builder
    }

    /// Current state.
    pub fn state(&self) -> CacheState {
        match self.inner.state.lock().slot {
            Slot::Invalid => CacheState::Invalid,
            Slot::Building { .. } => CacheState::Building,
            Slot::Ready => CacheState::Ready,
        }
    }

    /// Number of builds started so far.
    pub fn builds(&self) -> u64 {
        self.inner.builds.load(Ordering::Relaxed)
    }

    /// Mark the current graph, and any build in flight, as stale.
    ///
    /// Never blocks on a build and never cancels one.
    pub fn invalidate(&self) {
        let mut state = self.inner.state.lock();
        state.generation += 1;
        self.inner.published.store(None);
        if matches!(state.slot, Slot::Ready) {
            state.slot = Slot::Invalid;
        }
        crate::debug!("graph"; "invalidated (generation {})", state.generation);
    }

    /// Get the current graph, building it first if needed.
    ///
    /// Concurrent callers share a single build and receive the same outcome:
    /// the identical graph instance, or the identical error.
    pub async fn get_graph(&self) -> Result<Arc<LinkGraph>> {
        if let Some(graph) = self.inner.published.load_full() {
            return Ok(graph);
        }

        let (id, mut outcome) = {
            let mut state = self.inner.state.lock();
            let joined = match &state.slot {
                Slot::Building { id, outcome, .. } => Some((*id, outcome.clone())),
                // Published between the fast path and taking the lock.
                Slot::Ready => match self.inner.published.load_full() {
                    Some(graph) => return Ok(graph),
                    None => None,
                },
                Slot::Invalid => None,
            };
            match joined {
                Some(joined) => joined,
                None => self.start_build(&mut state),
            }
        };

        match outcome.wait_for(Option::is_some).await {
            Ok(result) => match &*result {
                Some(outcome) => outcome.clone(),
                None => Err(GraphError::Aborted),
            },
            Err(_) => {
                // Build task dropped its sender without an outcome (panicked).
                self.inner.abandon(id);
                Err(GraphError::Aborted)
            }
        }
    }

    /// Transition to `Building` and spawn the build task.
    fn start_build(&self, state: &mut State) -> (u64, watch::Receiver<Option<Outcome>>) {
        let id = state.next_build;
        state.next_build += 1;

        let (tx, rx) = watch::channel(None);
        state.slot = Slot::Building {
            id,
            generation: state.generation,
            outcome: rx.clone(),
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.run_build().await;
            inner.finish(id, &outcome);
            // Receivers may all be gone; the outcome is already recorded.
            let _ = tx.send(Some(outcome));
        });

        (id, rx)
    }
}

impl<S: ContentSource> Inner<S> {
    async fn run_build(&self) -> Outcome {
        let count = self.builds.fetch_add(1, Ordering::Relaxed) + 1;
        crate::debug!("graph"; "build #{} started", count);

        let documents = self
            .source
            .list_documents()
            .await
            .map_err(|e| GraphError::Source(format!("{e:#}")))?;

        let builder = self.builder.clone();
        let graph = tokio::task::spawn_blocking(move || builder.build(documents))
            .await
            .map_err(|_| GraphError::Aborted)??;

        Ok(Arc::new(graph))
    }
}

impl<S> Inner<S> {
    /// Record a build outcome: publish on fresh success, otherwise go back to `Invalid`.
    fn finish(&self, id: u64, outcome: &Outcome) {
        let mut state = self.state.lock();
        let started = match state.slot {
            Slot::Building {
                id: current,
                generation,
                ..
            } if current == id => generation,
            _ => return,
        };

        match outcome {
            Ok(graph) if started == state.generation => {
                self.published.store(Some(Arc::clone(graph)));
                state.slot = Slot::Ready;
                crate::debug!("graph"; "published graph ({} documents)", graph.len());
            }
            Ok(_) => {
                state.slot = Slot::Invalid;
                crate::debug!("graph"; "build finished stale, next query rebuilds");
            }
            Err(e) => {
                state.slot = Slot::Invalid;
                crate::debug!("graph"; "build failed: {}", e);
            }
        }
    }

    /// Reset a build that ended without reporting an outcome.
    fn abandon(&self, id: u64) {
        let mut state = self.state.lock();
        if matches!(state.slot, Slot::Building { id: current, .. } if current == id) {
            state.slot = Slot::Invalid;
        }
    }
}
