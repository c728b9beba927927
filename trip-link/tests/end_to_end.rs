//! A visitor types an address, picks a stop and opens the planner.

use std::sync::Arc;
use std::time::Duration;

use trip_link::cache::{CacheConfig, CachedStopFinder};
use trip_link::controller::{
    ControllerConfig, ControllerState, NavigationController, RecordingSurface, ResultsState,
    SubmitMode, SubmitOutcome,
};
use trip_link::deeplink::{DeepLinkBuilder, build_deep_link};
use trip_link::domain::{DestinationContext, Field, Location};
use trip_link::efa::MockStopFinder;

const DESTINATION: &str = "Mergelteichstraße 80, 44225 Dortmund";

fn finder() -> MockStopFinder {
    MockStopFinder::new()
        .with_locations(
            DESTINATION,
            vec![
                Location::new("de:05913:460", "Dortmund, Mergelteichstraße")
                    .with_coord(51.4712, 7.4823)
                    .best(),
            ],
        )
        .with_locations(
            "Hauptbahnhof",
            vec![
                Location::new("de:05913:284", "Dortmund, Hauptbahnhof")
                    .with_coord(51.51757, 7.45904)
                    .best(),
                Location::new("de:05913:13", "Dortmund, Hbf/Königswall")
                    .with_coord(51.51699, 7.4615),
            ],
        )
}

#[tokio::test(start_paused = true)]
async fn pick_non_best_stop_and_open_planner() {
    let finder = finder();
    let controller = NavigationController::new(
        CachedStopFinder::new(finder.clone(), &CacheConfig::default()),
        RecordingSurface::new(),
        Arc::new(DestinationContext::new(DESTINATION)),
        DeepLinkBuilder::default(),
        ControllerConfig::new(Duration::from_millis(500), SubmitMode::Selection),
    );

    controller.load().await;
    assert_eq!(
        controller.destination().destination_id(),
        Some("de:05913:460")
    );

    // Typing quickly only searches once the debounce settles
    for prefix in ["H", "Haupt", "Hauptbahnhof"] {
        controller.on_input(Field::FromAddress, prefix);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(finder.requests(), vec![DESTINATION, "Hauptbahnhof"]);
    assert_eq!(controller.state(), ControllerState::ResultsShown);

    let ResultsState::Candidates(shown) = controller.surface().view().results else {
        panic!("expected a candidate list");
    };
    assert_eq!(shown.len(), 2);
    assert_eq!(shown.iter().filter(|l| l.is_best).count(), 1);

    let non_best = shown.iter().position(|l| !l.is_best).unwrap();
    assert!(controller.select_candidate(non_best));
    controller.on_input(Field::Date, "2024-03-05");
    controller.on_input(Field::Time, "09:30");

    let outcome = controller.submit().await;

    let opened = controller.surface().opened();
    assert_eq!(opened.len(), 1);
    assert_eq!(outcome, SubmitOutcome::Opened(opened[0].clone()));
    assert_eq!(
        opened[0],
        build_deep_link("de:05913:13", "05032024", "0930", "de:05913:460")
    );
    assert!(opened[0].contains("origin%3Dde%253A05913%253A13"));
}

#[tokio::test(start_paused = true)]
async fn submit_without_selection_opens_nothing() {
    let controller = NavigationController::new(
        finder(),
        RecordingSurface::new(),
        Arc::new(DestinationContext::new(DESTINATION)),
        DeepLinkBuilder::default(),
        ControllerConfig::new(Duration::from_millis(500), SubmitMode::Selection),
    );
    controller.on_input(Field::FromAddress, "Hauptbahnhof");
    controller.on_input(Field::Date, "2024-03-05");
    controller.on_input(Field::Time, "09:30");

    assert!(matches!(controller.submit().await, SubmitOutcome::Invalid(_)));
    assert!(controller.surface().opened().is_empty());
}
