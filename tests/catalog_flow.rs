//! Shell-level flows: preload on mount, lazy planets, failures per tab, favorites.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use common::{app_with, render, settle, ScriptedTransport};
use swapix::graphql::{Suspense, TransportError};
use swapix::types::Tab;
use swapix::InputMode;

fn characters_reply() -> serde_json::Value {
    json!({
        "data": {
            "allPeople": {
                "people": [
                    { "id": "cGVvcGxlOjE=", "name": "Luke" },
                    null,
                    { "id": "cGVvcGxlOjU=", "name": "Leia" }
                ],
                "totalCount": 82
            }
        }
    })
}

fn planets_reply(count: usize, total: u64) -> serde_json::Value {
    let planets: Vec<_> = (1..=count)
        .map(|i| {
            json!({
                "id": format!("cGxhbmV0czo{i}"),
                "name": format!("Planet {i}"),
                "diameter": 10_000 + i,
                "population": 2_000_000,
                "climates": ["temperate"],
                "terrains": ["grasslands", "mountains"],
                "surfaceWater": 40,
                "gravity": "1 standard",
                "orbitalPeriod": 364,
                "rotationPeriod": 24
            })
        })
        .collect();
    json!({ "data": { "allPlanets": { "planets": planets, "totalCount": total } } })
}

#[tokio::test(start_paused = true)]
async fn characters_render_surviving_entries_and_server_total() {
    let transport = Arc::new(
        ScriptedTransport::default().reply("CharactersListQuery", characters_reply()),
    );
    let (mut app, mut rx) = app_with(Arc::clone(&transport));
    app.mount();
    assert_eq!(app.env().dispatched(), 3);
    settle(&mut app, &mut rx).await;

    app.set_tab(Tab::Characters);
    let screen = render(&mut app, 120, 40);
    assert!(screen.contains("Showing 2 of 82 characters"), "{screen}");
    assert!(screen.contains("Luke"));
    assert!(screen.contains("Leia"));

    match app.list(Tab::Characters).unwrap().current() {
        Suspense::Ready(model) => assert_eq!(model.cards.len(), 2),
        other => panic!("characters not ready: {:?}", other.is_pending()),
    }
}

#[tokio::test(start_paused = true)]
async fn pending_tabs_show_placeholders() {
    let transport = Arc::new(ScriptedTransport::default());
    let (mut app, mut rx) = app_with(transport);
    app.mount();
    settle(&mut app, &mut rx).await;

    let screen = render(&mut app, 120, 40);
    assert!(screen.contains("Loading films..."), "{screen}");
    assert!(screen.contains("░"));
}

#[tokio::test(start_paused = true)]
async fn planets_are_fetched_lazily_when_their_tab_renders() {
    let transport =
        Arc::new(ScriptedTransport::default().reply("PlanetsListQuery", planets_reply(12, 60)));
    let (mut app, mut rx) = app_with(Arc::clone(&transport));
    app.mount();
    settle(&mut app, &mut rx).await;
    assert!(transport.calls().iter().all(|(op, _)| *op != "PlanetsListQuery"));

    app.set_tab(Tab::Planets);
    let screen = render(&mut app, 120, 40);
    assert!(screen.contains("Loading planets..."), "{screen}");
    settle(&mut app, &mut rx).await;

    let screen = render(&mut app, 120, 40);
    assert!(screen.contains("Showing 12 of 60 planets"), "{screen}");
    match app.list(Tab::Planets).unwrap().current() {
        Suspense::Ready(model) => assert_eq!(model.cards.len(), 12),
        _ => panic!("planets not ready"),
    }

    let planet_calls: Vec<_> = transport
        .calls()
        .into_iter()
        .filter(|(op, _)| *op == "PlanetsListQuery")
        .collect();
    assert_eq!(planet_calls, vec![("PlanetsListQuery", json!({ "first": 12 }))]);
}

#[tokio::test(start_paused = true)]
async fn a_failed_query_only_breaks_its_own_tab() {
    let transport = Arc::new(
        ScriptedTransport::default()
            .fail("FilmsListQuery", TransportError::Status { status: 500 })
            .reply("CharactersListQuery", characters_reply()),
    );
    let (mut app, mut rx) = app_with(transport);
    app.mount();
    settle(&mut app, &mut rx).await;

    let screen = render(&mut app, 120, 40);
    assert!(screen.contains("Something went wrong"), "{screen}");
    assert!(screen.contains("http 500"));

    app.set_tab(Tab::Characters);
    let screen = render(&mut app, 120, 40);
    assert!(!screen.contains("Something went wrong"));
    assert!(screen.contains("Showing 2 of 82 characters"));
}

#[tokio::test(start_paused = true)]
async fn graphql_errors_without_data_fail_the_view() {
    let transport = Arc::new(ScriptedTransport::default().reply(
        "StarshipsListQuery",
        json!({ "errors": [{ "message": "Cannot query field" }] }),
    ));
    let (mut app, mut rx) = app_with(transport);
    app.mount();
    settle(&mut app, &mut rx).await;

    app.set_tab(Tab::Starships);
    let screen = render(&mut app, 120, 40);
    assert!(screen.contains("Something went wrong"), "{screen}");
    assert!(screen.contains("Cannot query field"));
}

#[tokio::test(start_paused = true)]
async fn adding_a_favorite_completes_after_the_simulated_delay() {
    let (mut app, mut rx) = app_with(Arc::new(ScriptedTransport::default()));
    app.set_tab(Tab::Favorites);
    assert_eq!(app.favorites().len(), 2);

    app.open_favorite_dialog();
    assert_eq!(app.input_mode(), InputMode::FavoriteDialog);
    for c in "Yoda".chars() {
        app.favorite_input(c);
    }
    app.favorite_next_kind();
    assert!(app.submit_favorite());
    assert!(app.favorites().is_adding());
    assert!(!app.submit_favorite(), "second submit while adding is ignored");

    let screen = render(&mut app, 120, 40);
    assert!(screen.contains("Adding..."), "{screen}");

    let ev = rx.recv().await.unwrap();
    app.on_event(ev);
    assert_eq!(app.favorites().len(), 3);
    assert!(!app.favorites().is_adding());
    assert_eq!(app.toast_message(), Some("Added Yoda to favorites"));

    app.close_favorite_dialog();
    let screen = render(&mut app, 120, 40);
    assert!(screen.contains("Yoda"), "{screen}");
    assert!(screen.contains("My Favorites (3)"));
}

#[tokio::test(start_paused = true)]
async fn removing_every_favorite_shows_the_empty_state() {
    let (mut app, _rx) = app_with(Arc::new(ScriptedTransport::default()));
    app.set_tab(Tab::Favorites);
    app.remove_selected_favorite();
    app.remove_selected_favorite();
    assert!(app.favorites().is_empty());

    let screen = render(&mut app, 120, 40);
    assert!(screen.contains("No favorites yet"), "{screen}");
}
