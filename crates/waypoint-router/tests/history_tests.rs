//! History synchronization: back/forward traversal and listener lifetime.

mod support;

use rstest::{fixture, rstest};
use support::Harness;
use waypoint_core::SignalAdapter;
use waypoint_router::{HistoryBackend, InitOptions, MemoryHistory, Router, RouterOptions};
use waypoint_urls::Payload;

#[fixture]
fn harness() -> Harness {
	Harness::new(RouterOptions::default())
}

async fn visit_home_then_user(harness: &Harness) {
	harness.router.init("/", InitOptions::default()).await.unwrap();
	harness
		.router
		.redirect(Payload::new("user").with_param("id", "1"))
		.await
		.unwrap();
}

#[rstest]
#[tokio::test]
async fn test_back_and_forward_follow_history(harness: Harness) {
	visit_home_then_user(&harness).await;
	harness.router.history_sync_start();

	assert!(harness.history.back());
	harness.drain().await;
	assert_eq!(harness.active_name().as_deref(), Some("home"));

	assert!(harness.history.forward());
	harness.drain().await;
	assert_eq!(harness.active_name().as_deref(), Some("user"));

	assert_eq!(harness.history.entries(), vec!["/", "/users/1"]);
	assert_eq!(harness.history.cursor(), 1);
}

#[rstest]
#[tokio::test]
async fn test_traversal_runs_hooks(harness: Harness) {
	visit_home_then_user(&harness).await;
	harness.router.history_sync_start();
	harness.clear_log();

	harness.history.back();
	harness.drain().await;

	assert_eq!(harness.log(), vec!["leave:user", "enter:home:new_config"]);
}

#[rstest]
#[tokio::test]
async fn test_start_is_idempotent(harness: Harness) {
	harness.router.history_sync_start();
	harness.router.history_sync_start();

	assert_eq!(harness.history.listener_count(), 1);
	assert!(harness.router.is_history_synced());
}

#[rstest]
#[tokio::test]
async fn test_stop_detaches_listener(harness: Harness) {
	visit_home_then_user(&harness).await;
	harness.router.history_sync_start();
	harness.router.history_sync_stop();
	harness.router.history_sync_stop();

	harness.history.back();

	assert_eq!(harness.history.listener_count(), 0);
	assert!(harness.tasks.borrow().is_empty());
	assert_eq!(harness.active_name().as_deref(), Some("user"));
}

#[rstest]
#[tokio::test]
async fn test_dropping_router_detaches_listener() {
	let history = MemoryHistory::new("/");
	let router = Router::builder(
		support::routes(&support::Log::default(), &Default::default()),
		SignalAdapter::new(),
	)
	.history(history.clone())
	.build();
	router.history_sync_start();
	assert_eq!(history.listener_count(), 1);

	drop(router);

	assert_eq!(history.listener_count(), 0);
}

#[rstest]
#[tokio::test]
async fn test_routers_sharing_history_sync_independently() {
	let history = MemoryHistory::new("/");
	let build = || {
		Router::builder(
			support::routes(&support::Log::default(), &Default::default()),
			SignalAdapter::new(),
		)
		.history(history.clone())
		.build()
	};
	let first = build();
	let second = build();

	first.history_sync_start();
	second.history_sync_start();
	first.history_sync_stop();

	assert_eq!(history.listener_count(), 1);
	assert!(!first.is_history_synced());
	assert!(second.is_history_synced());
}

#[rstest]
#[tokio::test]
async fn test_default_spawner_runs_on_local_set() {
	let local = tokio::task::LocalSet::new();
	local
		.run_until(async {
			let history = MemoryHistory::new("/");
			let router = Router::builder(
				support::routes(&support::Log::default(), &Default::default()),
				SignalAdapter::new(),
			)
			.history(history.clone())
			.build();
			router.init("/", InitOptions::default()).await.unwrap();
			router.redirect_url("/users/4").await.unwrap();
			router.history_sync_start();

			history.back();
			for _ in 0..16 {
				if router.active_state().map(|state| state.name).as_deref() == Some("home") {
					break;
				}
				tokio::task::yield_now().await;
			}

			assert_eq!(router.active_state().unwrap().url, "/");
			assert_eq!(history.current_url(), "/");
		})
		.await;
}
