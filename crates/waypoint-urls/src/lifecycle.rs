//! Lifecycle hook types.
//!
//! Hooks are async closures attached to a route. `beforeLeave` runs on the
//! route being left, `beforeEnter` on the route being entered. Both receive
//! a [`LifecycleContext`] and answer with an action value; returning an
//! error routes the navigation to `internalError`.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use waypoint_core::Component;

use crate::payload::Payload;
use crate::state::RouteState;

/// Boxed future returned by hooks and loaders.
pub type HookFuture<T> = Pin<Box<dyn Future<Output = anyhow::Result<T>>>>;

pub(crate) type EnterHook = Rc<dyn Fn(LifecycleContext) -> HookFuture<EnterAction>>;
pub(crate) type LeaveHook = Rc<dyn Fn(LifecycleContext) -> HookFuture<LeaveAction>>;
pub(crate) type Loader = Rc<dyn Fn() -> HookFuture<Component>>;

/// What changed between the active state and the navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationReason {
	/// The route changed (or nothing was active yet).
	NewConfig,
	/// Same route, different params. Query may differ as well.
	NewParams,
	/// Same route and params, different query.
	NewQuery,
}

impl NavigationReason {
	/// Classifies a transition from `current` to `next`.
	pub fn between(current: Option<&RouteState>, next: &RouteState) -> Self {
		match current {
			Some(current) if current.name == next.name => {
				if current.params != next.params {
					Self::NewParams
				} else {
					Self::NewQuery
				}
			}
			_ => Self::NewConfig,
		}
	}

	/// The wire name of the reason.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::NewConfig => "new_config",
			Self::NewParams => "new_params",
			Self::NewQuery => "new_query",
		}
	}
}

impl std::fmt::Display for NavigationReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of a `beforeLeave` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveAction {
	/// Continue the navigation.
	Proceed,
	/// Abort the navigation; the active state stays untouched.
	Prevent,
}

/// Outcome of a `beforeEnter` hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterAction {
	/// Commit the target state.
	Proceed,
	/// Retarget the navigation.
	Redirect(Payload),
}

/// Arguments handed to lifecycle hooks.
#[derive(Debug, Clone)]
pub struct LifecycleContext {
	/// The active state, absent on first load.
	pub current: Option<RouteState>,
	/// The state about to be committed.
	pub next: RouteState,
	/// What changed.
	pub reason: NavigationReason,
}

impl LifecycleContext {
	/// Builds a context, computing the reason.
	pub fn new(current: Option<RouteState>, next: RouteState) -> Self {
		let reason = NavigationReason::between(current.as_ref(), &next);
		Self {
			current,
			next,
			reason,
		}
	}

	/// Shorthand for [`LeaveAction::Prevent`].
	pub fn prevent(&self) -> LeaveAction {
		LeaveAction::Prevent
	}

	/// Shorthand for [`EnterAction::Redirect`].
	pub fn redirect(&self, payload: Payload) -> EnterAction {
		EnterAction::Redirect(payload)
	}
}

pub(crate) fn boxed_enter<F, Fut>(hook: F) -> EnterHook
where
	F: Fn(LifecycleContext) -> Fut + 'static,
	Fut: Future<Output = anyhow::Result<EnterAction>> + 'static,
{
	Rc::new(move |ctx| -> HookFuture<EnterAction> { Box::pin(hook(ctx)) })
}

pub(crate) fn boxed_leave<F, Fut>(hook: F) -> LeaveHook
where
	F: Fn(LifecycleContext) -> Fut + 'static,
	Fut: Future<Output = anyhow::Result<LeaveAction>> + 'static,
{
	Rc::new(move |ctx| -> HookFuture<LeaveAction> { Box::pin(hook(ctx)) })
}

pub(crate) fn boxed_loader<F, Fut>(loader: F) -> Loader
where
	F: Fn() -> Fut + 'static,
	Fut: Future<Output = anyhow::Result<Component>> + 'static,
{
	Rc::new(move || -> HookFuture<Component> { Box::pin(loader()) })
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn state(name: &str, id: &str, tab: &str) -> RouteState {
		let mut state = RouteState::empty(name);
		state.params.insert("id".to_string(), id.to_string());
		state.query.insert("tab".to_string(), tab.to_string());
		state
	}

	#[rstest]
	fn test_reason_without_current_is_new_config() {
		let next = state("user", "1", "a");

		assert_eq!(NavigationReason::between(None, &next), NavigationReason::NewConfig);
	}

	#[rstest]
	#[case(state("post", "1", "a"), NavigationReason::NewConfig)]
	#[case(state("post", "2", "b"), NavigationReason::NewConfig)]
	#[case(state("user", "2", "a"), NavigationReason::NewParams)]
	#[case(state("user", "2", "b"), NavigationReason::NewParams)]
	#[case(state("user", "1", "b"), NavigationReason::NewQuery)]
	fn test_reason_precedence(#[case] next: RouteState, #[case] expected: NavigationReason) {
		let current = state("user", "1", "a");

		assert_eq!(NavigationReason::between(Some(&current), &next), expected);
	}

	#[rstest]
	fn test_reason_wire_names() {
		assert_eq!(
			serde_json::to_string(&NavigationReason::NewParams).unwrap(),
			r#""new_params""#
		);
		assert_eq!(NavigationReason::NewQuery.to_string(), "new_query");
	}

	#[rstest]
	fn test_context_shorthands() {
		let ctx = LifecycleContext::new(None, state("user", "1", "a"));

		assert_eq!(ctx.reason, NavigationReason::NewConfig);
		assert_eq!(ctx.prevent(), LeaveAction::Prevent);
		assert_eq!(
			ctx.redirect(Payload::new("home")),
			EnterAction::Redirect(Payload::new("home"))
		);
	}
}
