//! Task spawning for navigations started outside an async context.

use std::rc::Rc;

use futures::future::LocalBoxFuture;

/// Runs a detached, non-`Send` future to completion.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// The platform spawner.
///
/// Natively this is `tokio::task::spawn_local`, which must be called from
/// inside a `tokio::task::LocalSet`. On wasm it is
/// `wasm_bindgen_futures::spawn_local`.
pub fn default_spawner() -> Spawner {
	#[cfg(target_arch = "wasm32")]
	{
		Rc::new(|future: LocalBoxFuture<'static, ()>| {
			wasm_bindgen_futures::spawn_local(future)
		})
	}
	#[cfg(not(target_arch = "wasm32"))]
	{
		Rc::new(|future: LocalBoxFuture<'static, ()>| {
			tokio::task::spawn_local(future);
		})
	}
}
