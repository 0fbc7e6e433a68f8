//! History synchronization.

use std::rc::Rc;

use futures::FutureExt;
use waypoint_core::ReactivityAdapter;

use crate::engine::Router;

impl<A: ReactivityAdapter> Router<A> {
	/// Follows back/forward traversals of the history backend.
	///
	/// Each traversal is resolved to a payload and navigated to with
	/// `replace` semantics on the configured spawner. Calling this twice
	/// attaches one listener.
	pub fn history_sync_start(&self) {
		if self.inner.sync.borrow().is_some() {
			return;
		}

		let router = Rc::downgrade(&self.inner);
		let id = self.inner.history.subscribe(Rc::new(move |url: String| {
			let Some(inner) = router.upgrade() else {
				return;
			};
			let router = Router { inner };
			let spawn = Rc::clone(&router.inner.spawner);
			spawn(async move { router.follow_traversal(url).await }.boxed_local());
		}));

		*self.inner.sync.borrow_mut() = Some(id);
		tracing::debug!("history sync started");
	}

	/// Detaches the traversal listener. Does nothing if sync is not running.
	pub fn history_sync_stop(&self) {
		if let Some(id) = self.inner.sync.borrow_mut().take() {
			self.inner.history.unsubscribe(id);
			tracing::debug!("history sync stopped");
		}
	}

	/// Whether [`history_sync_start`](Self::history_sync_start) is in effect.
	pub fn is_history_synced(&self) -> bool {
		self.inner.sync.borrow().is_some()
	}

	async fn follow_traversal(&self, url: String) {
		let payload = self.url_to_payload(&url).replacing(true);
		if let Err(signal) = self.redirect(payload).await {
			tracing::warn!(from = %url, to = %signal.url, "redirect signal raised by a history traversal");
		}
	}
}
