//! Reactive Runtime
//!
//! This module provides the dependency graph behind [`Observable`] and
//! [`autorun`], and the batching machinery that coalesces notifications.
//!
//! ## Architecture
//!
//! 1. **Observer Stack**: Tracks the currently executing autorun
//! 2. **Dependency Tracking**: Reads of an [`Observable`] inside an autorun
//!    record an edge in the graph
//! 3. **Batching**: Writes schedule their subscribers; the schedule is
//!    flushed once the outermost batch ends, running each subscriber once
//!
//! The runtime is thread-local. Navigation is single-threaded and
//! cooperative, so every node lives on the thread that created it.
//!
//! [`Observable`]: super::Observable
//! [`autorun`]: super::autorun

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Unique identifier for reactive nodes (observables and autoruns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Create a new unique NodeId
	pub fn new() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// Dependency graph node
#[derive(Debug, Default)]
struct DependencyNode {
	/// IDs of autoruns that read this node
	subscribers: Vec<NodeId>,
	/// IDs of observables this autorun read during its last run
	dependencies: Vec<NodeId>,
}

pub(crate) type EffectFn = Rc<RefCell<Box<dyn FnMut()>>>;

/// Per-thread reactive runtime.
pub struct Runtime {
	/// Autoruns currently executing, innermost last
	observer_stack: RefCell<Vec<NodeId>>,
	dependency_graph: RefCell<BTreeMap<NodeId, DependencyNode>>,
	/// Registered autorun bodies
	effects: RefCell<BTreeMap<NodeId, EffectFn>>,
	/// Autoruns waiting for the current batch to end
	pending_updates: RefCell<Vec<NodeId>>,
	batch_depth: Cell<usize>,
	flushing: Cell<bool>,
}

impl Runtime {
	/// Create a new Runtime instance
	pub fn new() -> Self {
		Self {
			observer_stack: RefCell::new(Vec::new()),
			dependency_graph: RefCell::new(BTreeMap::new()),
			effects: RefCell::new(BTreeMap::new()),
			pending_updates: RefCell::new(Vec::new()),
			batch_depth: Cell::new(0),
			flushing: Cell::new(false),
		}
	}

	/// Returns the currently executing autorun, if any.
	pub fn current_observer(&self) -> Option<NodeId> {
		self.observer_stack.borrow().last().copied()
	}

	/// Records that the current autorun (if any) read `source_id`.
	pub fn track_dependency(&self, source_id: NodeId) {
		let Some(observer_id) = self.current_observer() else {
			return;
		};
		let mut graph = self.dependency_graph.borrow_mut();

		let source = graph.entry(source_id).or_default();
		if !source.subscribers.contains(&observer_id) {
			source.subscribers.push(observer_id);
		}

		let observer = graph.entry(observer_id).or_default();
		if !observer.dependencies.contains(&source_id) {
			observer.dependencies.push(source_id);
		}
	}

	/// Schedules every subscriber of `source_id` and flushes unless a batch
	/// is open.
	pub fn notify_change(&self, source_id: NodeId) {
		let subscribers = self
			.dependency_graph
			.borrow()
			.get(&source_id)
			.map(|node| node.subscribers.clone())
			.unwrap_or_default();

		{
			let mut pending = self.pending_updates.borrow_mut();
			for id in subscribers {
				if !pending.contains(&id) {
					pending.push(id);
				}
			}
		}

		if self.batch_depth.get() == 0 {
			self.flush_updates();
		}
	}

	/// Opens a batch. Must be paired with [`Runtime::end_batch`].
	pub fn begin_batch(&self) {
		self.batch_depth.set(self.batch_depth.get() + 1);
	}

	/// Closes a batch, flushing pending subscribers when it was the outermost.
	pub fn end_batch(&self) {
		let depth = self.batch_depth.get().saturating_sub(1);
		self.batch_depth.set(depth);
		if depth == 0 {
			self.flush_updates();
		}
	}

	/// Returns whether a batch is currently open.
	pub fn in_batch(&self) -> bool {
		self.batch_depth.get() > 0
	}

	/// Runs every pending autorun until the queue drains.
	///
	/// Re-entrant calls (an autorun writing to an observable) only enqueue;
	/// the outer flush picks the new work up on its next pass.
	pub fn flush_updates(&self) {
		if self.flushing.replace(true) {
			return;
		}

		loop {
			let pending = std::mem::take(&mut *self.pending_updates.borrow_mut());
			if pending.is_empty() {
				break;
			}
			tracing::trace!(count = pending.len(), "flushing reactive subscribers");
			for id in pending {
				self.run_effect(id);
			}
		}

		self.flushing.set(false);
	}

	pub(crate) fn register_effect(&self, id: NodeId, f: Box<dyn FnMut()>) {
		self.effects
			.borrow_mut()
			.insert(id, Rc::new(RefCell::new(f)));
	}

	/// Runs an autorun body, recomputing its dependencies.
	pub(crate) fn run_effect(&self, id: NodeId) {
		// Clone the handle out so the map is not borrowed while user code runs.
		let Some(effect) = self.effects.borrow().get(&id).cloned() else {
			return;
		};
		let Ok(mut body) = effect.try_borrow_mut() else {
			// Already running further up the stack; the write that got us
			// here is visible to that run.
			return;
		};

		self.clear_dependencies(id);
		self.observer_stack.borrow_mut().push(id);
		(&mut **body)();
		self.observer_stack.borrow_mut().pop();
	}

	/// Drops the outgoing edges of `node_id`.
	pub fn clear_dependencies(&self, node_id: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();

		let dependencies = graph
			.get_mut(&node_id)
			.map(|node| std::mem::take(&mut node.dependencies))
			.unwrap_or_default();

		for dep_id in dependencies {
			if let Some(dep_node) = graph.get_mut(&dep_id) {
				dep_node.subscribers.retain(|&id| id != node_id);
			}
		}
	}

	/// Removes a node (and its autorun body, if any) from the runtime.
	pub fn remove_node(&self, node_id: NodeId) {
		self.clear_dependencies(node_id);
		self.dependency_graph.borrow_mut().remove(&node_id);
		self.effects.borrow_mut().remove(&node_id);
		self.pending_updates.borrow_mut().retain(|&id| id != node_id);
	}

	/// Check if a node exists in the dependency graph (for testing)
	pub fn has_node(&self, node_id: NodeId) -> bool {
		self.dependency_graph.borrow().contains_key(&node_id)
	}

	/// Get the number of subscribers for a node (for testing)
	pub fn subscriber_count(&self, node_id: NodeId) -> usize {
		self.dependency_graph
			.borrow()
			.get(&node_id)
			.map(|node| node.subscribers.len())
			.unwrap_or(0)
	}
}

impl Default for Runtime {
	fn default() -> Self {
		Self::new()
	}
}

thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Runs `f` against the thread's runtime.
pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Like [`with_runtime`], but returns `None` once thread-local storage has
/// been torn down (safe to call from `Drop`).
pub(crate) fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}
