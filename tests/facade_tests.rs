//! End-to-end navigation through the facade's prelude.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};
use waypoint::prelude::*;

type Visits = Rc<RefCell<Vec<String>>>;

#[fixture]
fn visits() -> Visits {
	Visits::default()
}

fn shop(visits: &Visits) -> RouteTable {
	let seen = Rc::clone(visits);

	RouteTable::builder()
		.route(RouteDefinition::new("catalog", "/"))
		.route(
			RouteDefinition::new("product", "/products/:sku")
				.param("sku", |sku| sku.len() == 6)
				.query("color", |color| !color.is_empty())
				.prop("layout", "wide")
				.before_enter(move |ctx| {
					seen.borrow_mut()
						.push(format!("{}:{}", ctx.next.url, ctx.reason));
					async { anyhow::Ok(EnterAction::Proceed) }
				}),
		)
		.route(RouteDefinition::new("legacy", "/old-catalog").before_enter(|ctx| {
			let action = ctx.redirect(Payload::new("catalog").replacing(true));
			async move { anyhow::Ok(action) }
		}))
		.route(RouteDefinition::new(NOT_FOUND, "/missing"))
		.route(RouteDefinition::new(INTERNAL_ERROR, "/oops"))
		.build()
		.unwrap()
}

#[rstest]
#[tokio::test]
async fn test_browse_products(visits: Visits) {
	let history = MemoryHistory::new("/");
	let router = Router::builder(shop(&visits), SignalAdapter::new())
		.history(history.clone())
		.build();

	router.init("/", InitOptions::default()).await.unwrap();
	router.redirect_url("/products/ABC123").await.unwrap();
	router
		.redirect(
			Payload::new("product")
				.with_param("sku", "ABC123")
				.with_query("color", "red"),
		)
		.await
		.unwrap();

	let active = router.active_state().unwrap();
	assert_eq!(active.url, "/products/ABC123?color=red");
	assert_eq!(
		active.props.get("layout").and_then(|layout| layout.as_str()),
		Some("wide")
	);
	assert_eq!(
		*visits.borrow(),
		vec![
			"/products/ABC123:new_config",
			"/products/ABC123?color=red:new_query",
		]
	);
	assert_eq!(
		history.entries(),
		vec!["/", "/products/ABC123", "/products/ABC123?color=red"]
	);
}

#[rstest]
#[tokio::test]
async fn test_legacy_url_is_replaced(visits: Visits) {
	let history = MemoryHistory::new("/");
	let router = Router::builder(shop(&visits), SignalAdapter::new())
		.history(history.clone())
		.build();
	router.redirect_url("/products/ABC123").await.unwrap();

	let url = router.redirect_url("/old-catalog").await.unwrap();

	assert_eq!(url, "/");
	assert_eq!(history.entries(), vec!["/", "/"]);
	assert_eq!(history.current_url(), "/");
}

#[rstest]
#[case("/products/short", "/missing")]
#[case("/nowhere", "/missing")]
#[case("/products/ABC123?color=", "/products/ABC123")]
#[tokio::test]
async fn test_bad_urls_resolve_quietly(
	visits: Visits,
	#[case] url: &str,
	#[case] expected: &str,
) {
	let router = Router::builder(shop(&visits), SignalAdapter::new())
		.history(MemoryHistory::new("/"))
		.build();

	assert_eq!(router.redirect_url(url).await.unwrap(), expected);
}

#[rstest]
#[tokio::test]
async fn test_server_rendering_from_toml_options(visits: Visits) {
	let options = RouterOptions::from_toml_str(
		r#"
mode = "server"
base_url = "https://shop.test"
"#,
	)
	.unwrap();
	assert_eq!(options.mode, NavigationMode::Server);

	let router = Router::builder(shop(&visits), PlainAdapter)
		.options(options)
		.history(MemoryHistory::new("/"))
		.build();

	let signal = router
		.init("https://shop.test/old-catalog", InitOptions::default())
		.await
		.unwrap_err();
	assert_eq!(signal, RedirectSignal { url: "/".to_string() });

	let url = router
		.init("https://shop.test/products/XYZ789", InitOptions::default())
		.await
		.unwrap();
	assert_eq!(url, "/products/XYZ789");
}
