//! A single route definition.

use std::cell::OnceCell;
use std::fmt;
use std::future::{Future, ready};
use std::rc::Rc;

use waypoint_core::Component;

use super::pattern::PathTemplate;
use crate::lifecycle::{
	EnterAction, EnterHook, HookFuture, LeaveAction, LeaveHook, LifecycleContext, Loader,
	boxed_enter, boxed_leave, boxed_loader,
};
use crate::state::Props;

/// Predicate deciding whether a decoded param or query value is acceptable.
pub type Validator = Rc<dyn Fn(&str) -> bool>;

/// A named route: path template, validators, static props, a lazy
/// component loader and lifecycle hooks.
///
/// # Example
///
/// ```
/// use waypoint_urls::{EnterAction, RouteDefinition};
///
/// let route = RouteDefinition::new("user", "/users/:id")
/// 	.param("id", |v| v.chars().all(|c| c.is_ascii_digit()))
/// 	.query("tab", |v| matches!(v, "posts" | "likes"))
/// 	.prop("title", "User")
/// 	.before_enter(|_ctx| async { Ok(EnterAction::Proceed) });
///
/// assert!(route.declares_params());
/// assert!(route.has_before_enter());
/// ```
pub struct RouteDefinition {
	name: String,
	path: PathTemplate,
	params: Vec<(String, Validator)>,
	query: Vec<(String, Validator)>,
	props: Props,
	loader: Option<Loader>,
	before_enter: Option<EnterHook>,
	before_leave: Option<LeaveHook>,
	/// Resolved once on first entry.
	component: OnceCell<Component>,
}

impl RouteDefinition {
	/// Creates a route with no validators, props, loader or hooks.
	pub fn new(name: impl Into<String>, path: &str) -> Self {
		Self {
			name: name.into(),
			path: PathTemplate::parse(path),
			params: Vec::new(),
			query: Vec::new(),
			props: Props::new(),
			loader: None,
			before_enter: None,
			before_leave: None,
			component: OnceCell::new(),
		}
	}

	/// Declares the validator for the `:name` placeholder.
	pub fn param<F>(mut self, name: impl Into<String>, validator: F) -> Self
	where
		F: Fn(&str) -> bool + 'static,
	{
		upsert(&mut self.params, name.into(), Rc::new(validator));
		self
	}

	/// Declares an accepted query key and its validator.
	pub fn query<F>(mut self, name: impl Into<String>, validator: F) -> Self
	where
		F: Fn(&str) -> bool + 'static,
	{
		upsert(&mut self.query, name.into(), Rc::new(validator));
		self
	}

	/// Adds a static prop copied into every state of this route.
	pub fn prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.props.insert(key.into(), value.into());
		self
	}

	/// Sets the deferred component resolver.
	pub fn loader<F, Fut>(mut self, loader: F) -> Self
	where
		F: Fn() -> Fut + 'static,
		Fut: Future<Output = anyhow::Result<Component>> + 'static,
	{
		self.loader = Some(boxed_loader(loader));
		self
	}

	/// Sets the hook run before this route is entered.
	pub fn before_enter<F, Fut>(mut self, hook: F) -> Self
	where
		F: Fn(LifecycleContext) -> Fut + 'static,
		Fut: Future<Output = anyhow::Result<EnterAction>> + 'static,
	{
		self.before_enter = Some(boxed_enter(hook));
		self
	}

	/// Sets the hook run before this route is left.
	pub fn before_leave<F, Fut>(mut self, hook: F) -> Self
	where
		F: Fn(LifecycleContext) -> Fut + 'static,
		Fut: Future<Output = anyhow::Result<LeaveAction>> + 'static,
	{
		self.before_leave = Some(boxed_leave(hook));
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the path template.
	pub fn path(&self) -> &PathTemplate {
		&self.path
	}

	/// Returns the static props.
	pub fn props(&self) -> &Props {
		&self.props
	}

	/// Returns whether the path has placeholders (and so requires params).
	pub fn declares_params(&self) -> bool {
		!self.path.is_static()
	}

	/// Returns whether any query keys are declared.
	pub fn declares_query(&self) -> bool {
		!self.query.is_empty()
	}

	/// Returns the validator for a path param.
	pub fn param_validator(&self, name: &str) -> Option<&Validator> {
		lookup(&self.params, name)
	}

	/// Names that have a param validator, in declaration order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.params.iter().map(|(name, _)| name.as_str())
	}

	/// Returns the validator for a query key.
	pub fn query_validator(&self, name: &str) -> Option<&Validator> {
		lookup(&self.query, name)
	}

	/// Declared query keys with their validators, in declaration order.
	pub fn query_validators(&self) -> impl Iterator<Item = (&str, &Validator)> {
		self.query
			.iter()
			.map(|(name, validator)| (name.as_str(), validator))
	}

	/// Returns whether a `beforeEnter` hook is set.
	pub fn has_before_enter(&self) -> bool {
		self.before_enter.is_some()
	}

	/// Returns whether a `beforeLeave` hook is set.
	pub fn has_before_leave(&self) -> bool {
		self.before_leave.is_some()
	}

	/// Returns whether a component loader is set.
	pub fn has_loader(&self) -> bool {
		self.loader.is_some()
	}

	/// Starts the `beforeEnter` hook; resolves to `Proceed` when none is set.
	///
	/// The returned future does not borrow the definition.
	pub fn run_before_enter(&self, ctx: LifecycleContext) -> HookFuture<EnterAction> {
		match &self.before_enter {
			Some(hook) => hook(ctx),
			None => Box::pin(ready(Ok(EnterAction::Proceed))),
		}
	}

	/// Starts the `beforeLeave` hook; resolves to `Proceed` when none is set.
	pub fn run_before_leave(&self, ctx: LifecycleContext) -> HookFuture<LeaveAction> {
		match &self.before_leave {
			Some(hook) => hook(ctx),
			None => Box::pin(ready(Ok(LeaveAction::Proceed))),
		}
	}

	/// Returns the cached component, if it has been loaded.
	pub fn component(&self) -> Option<Component> {
		self.component.get().cloned()
	}

	/// Starts the loader, unless the component is cached or no loader is set.
	pub fn load_component(&self) -> Option<HookFuture<Component>> {
		if self.component.get().is_some() {
			return None;
		}
		self.loader.as_ref().map(|loader| loader())
	}

	/// Caches `component` unless one is cached already; returns the cached
	/// value either way.
	pub fn cache_component(&self, component: Component) -> Component {
		Rc::clone(self.component.get_or_init(|| component))
	}
}

impl fmt::Debug for RouteDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteDefinition")
			.field("name", &self.name)
			.field("path", &self.path)
			.field("params", &self.param_names().collect::<Vec<_>>())
			.field(
				"query",
				&self.query.iter().map(|(name, _)| name).collect::<Vec<_>>(),
			)
			.field("props", &self.props)
			.field("has_loader", &self.loader.is_some())
			.field("has_before_enter", &self.before_enter.is_some())
			.field("has_before_leave", &self.before_leave.is_some())
			.field("component_loaded", &self.component.get().is_some())
			.finish()
	}
}

fn upsert(validators: &mut Vec<(String, Validator)>, name: String, validator: Validator) {
	match validators.iter_mut().find(|(existing, _)| *existing == name) {
		Some((_, slot)) => *slot = validator,
		None => validators.push((name, validator)),
	}
}

fn lookup<'a>(validators: &'a [(String, Validator)], name: &str) -> Option<&'a Validator> {
	validators
		.iter()
		.find(|(existing, _)| existing == name)
		.map(|(_, validator)| validator)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::state::RouteState;
	use rstest::rstest;
	use waypoint_core::component::component;

	#[rstest]
	fn test_validators_lookup() {
		let route = RouteDefinition::new("user", "/users/:id")
			.param("id", |v| v.len() > 2)
			.query("tab", |v| v == "posts");

		let id = route.param_validator("id").unwrap();
		assert!(id("abc"));
		assert!(!id("ab"));
		assert!(route.param_validator("missing").is_none());
		assert!(route.query_validator("tab").unwrap()("posts"));
		assert!(route.declares_params());
		assert!(route.declares_query());
	}

	#[rstest]
	fn test_redeclared_validator_replaces_in_place() {
		let route = RouteDefinition::new("list", "/list")
			.query("a", |_| false)
			.query("b", |_| true)
			.query("a", |_| true);

		let keys: Vec<_> = route.query_validators().map(|(key, _)| key).collect();
		assert_eq!(keys, vec!["a", "b"]);
		assert!(route.query_validator("a").unwrap()("x"));
	}

	#[rstest]
	fn test_props() {
		let route = RouteDefinition::new("home", "/")
			.prop("title", "Home")
			.prop("depth", 0);

		assert_eq!(route.props().get("title"), Some(&serde_json::json!("Home")));
		assert_eq!(route.props().get("depth"), Some(&serde_json::json!(0)));
	}

	#[rstest]
	#[tokio::test]
	async fn test_missing_hooks_proceed() {
		let route = RouteDefinition::new("home", "/");
		let ctx = LifecycleContext::new(None, RouteState::empty("home"));

		assert_eq!(
			route.run_before_enter(ctx.clone()).await.unwrap(),
			EnterAction::Proceed
		);
		assert_eq!(route.run_before_leave(ctx).await.unwrap(), LeaveAction::Proceed);
	}

	#[rstest]
	#[tokio::test]
	async fn test_component_cached_once() {
		let route = RouteDefinition::new("home", "/").loader(|| async { Ok(component("home page")) });

		let loaded = route.load_component().unwrap().await.unwrap();
		let cached = route.cache_component(loaded);

		assert!(route.load_component().is_none());
		assert!(Rc::ptr_eq(&route.component().unwrap(), &cached));
		assert!(Rc::ptr_eq(
			&route.cache_component(component("other")),
			&cached
		));
	}
}
