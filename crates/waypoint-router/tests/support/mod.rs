//! Shared route table and router harness for navigation tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use waypoint_core::SignalAdapter;
use waypoint_core::component::component;
use waypoint_router::{MemoryHistory, Router, RouterOptions};
use waypoint_urls::{
	EnterAction, INTERNAL_ERROR, LeaveAction, LifecycleContext, NOT_FOUND, Payload, RouteDefinition,
	RouteTable,
};

pub type Log = Rc<RefCell<Vec<String>>>;
pub type TaskQueue = Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>;

pub struct Harness {
	pub router: Router,
	pub history: MemoryHistory,
	pub log: Log,
	pub loads: Rc<Cell<usize>>,
	pub tasks: TaskQueue,
}

impl Harness {
	pub fn new(options: RouterOptions) -> Self {
		let log = Log::default();
		let loads = Rc::new(Cell::new(0));
		let tasks = TaskQueue::default();
		let history = MemoryHistory::new("/");

		let queue = Rc::clone(&tasks);
		let router = Router::builder(routes(&log, &loads), SignalAdapter::new())
			.options(options)
			.history(history.clone())
			.spawner(move |task| queue.borrow_mut().push(task))
			.build();

		Self {
			router,
			history,
			log,
			loads,
			tasks,
		}
	}

	/// Runs every spawned task, including ones spawned while draining.
	pub async fn drain(&self) {
		loop {
			let next = {
				let mut tasks = self.tasks.borrow_mut();
				if tasks.is_empty() {
					None
				} else {
					Some(tasks.remove(0))
				}
			};
			match next {
				Some(task) => task.await,
				None => break,
			}
		}
	}

	pub fn log(&self) -> Vec<String> {
		self.log.borrow().clone()
	}

	pub fn clear_log(&self) {
		self.log.borrow_mut().clear();
	}

	pub fn active_name(&self) -> Option<String> {
		self.router.active_state().map(|state| state.name)
	}
}

type Hook<T> = LocalBoxFuture<'static, anyhow::Result<T>>;

fn entered(log: &Log) -> impl Fn(LifecycleContext) -> Hook<EnterAction> + 'static {
	let log = Rc::clone(log);
	move |ctx: LifecycleContext| -> Hook<EnterAction> {
		log.borrow_mut()
			.push(format!("enter:{}:{}", ctx.next.name, ctx.reason));
		Box::pin(async { anyhow::Ok(EnterAction::Proceed) })
	}
}

fn left(log: &Log) -> impl Fn(LifecycleContext) -> Hook<LeaveAction> + 'static {
	let log = Rc::clone(log);
	move |ctx: LifecycleContext| -> Hook<LeaveAction> {
		let from = ctx.current.map(|state| state.name).unwrap_or_default();
		log.borrow_mut().push(format!("leave:{from}"));
		Box::pin(async { anyhow::Ok(LeaveAction::Proceed) })
	}
}

fn redirects_to(
	log: &Log,
	name: &'static str,
	target: &'static str,
) -> impl Fn(LifecycleContext) -> Hook<EnterAction> + 'static {
	let log = Rc::clone(log);
	move |_ctx: LifecycleContext| -> Hook<EnterAction> {
		log.borrow_mut().push(format!("enter:{name}"));
		Box::pin(async move { anyhow::Ok(EnterAction::Redirect(Payload::new(target))) })
	}
}

pub fn routes(log: &Log, loads: &Rc<Cell<usize>>) -> RouteTable {
	let loads = Rc::clone(loads);
	let prevented = Rc::clone(log);

	RouteTable::builder()
		.route(RouteDefinition::new("home", "/").before_enter(entered(log)))
		.route(
			RouteDefinition::new("user", "/users/:id")
				.param("id", |v| v.chars().all(|c| c.is_ascii_digit()))
				.query("tab", |v| !v.is_empty())
				.before_enter(entered(log))
				.before_leave(left(log)),
		)
		.route(RouteDefinition::new("guarded", "/guarded").before_leave(move |_ctx| {
			prevented.borrow_mut().push("leave:guarded".to_string());
			async { Ok(LeaveAction::Prevent) }
		}))
		.route(RouteDefinition::new("a", "/a").before_enter(redirects_to(log, "a", "b")))
		.route(RouteDefinition::new("b", "/b").before_enter(redirects_to(log, "b", "c")))
		.route(RouteDefinition::new("c", "/c").before_enter(entered(log)))
		.route(RouteDefinition::new("ping", "/ping").before_enter(redirects_to(log, "ping", "pong")))
		.route(RouteDefinition::new("pong", "/pong").before_enter(redirects_to(log, "pong", "ping")))
		.route(
			RouteDefinition::new("failing", "/failing")
				.before_enter(|_ctx| async { Err(anyhow::anyhow!("enter hook exploded")) }),
		)
		.route(
			RouteDefinition::new("sticky", "/sticky")
				.before_leave(|_ctx| async { Err(anyhow::anyhow!("leave hook exploded")) }),
		)
		.route(RouteDefinition::new("lazy", "/lazy").loader(move || {
			loads.set(loads.get() + 1);
			async { Ok(component("lazy page")) }
		}))
		.route(
			RouteDefinition::new("broken", "/broken")
				.loader(|| async { Err(anyhow::anyhow!("chunk failed to load")) }),
		)
		.route(RouteDefinition::new("dynamic", "/:id").param("id", |id| id.len() > 2))
		.route(RouteDefinition::new(NOT_FOUND, "/error404"))
		.route(RouteDefinition::new(INTERNAL_ERROR, "/error500"))
		.build()
		.unwrap()
}
