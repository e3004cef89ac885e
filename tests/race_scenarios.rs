//! End-to-end race scenarios driven through the public API.

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use stadium_kart::demo::RingAutopilot;
use stadium_kart::input::{InputIntent, InputSource, KeyboardInput, sample_or_idle};
use stadium_kart::polar_to_cartesian;
use stadium_kart::sim::{RaceEvent, RaceSessionState, RaceSimulation, TrackProfile, TrackTheme, WallSide};
use stadium_kart::store::{RaceSessionStore, SelectionStore};
use stadium_kart::{Catalog, RaceSession, Settings};

const FRAME_DT: f32 = 1.0 / 60.0;

/// Drive with the autopilot until the race ends or `limit` seconds pass
fn autopilot_race(session: &mut RaceSession, limit: f32) -> Vec<RaceEvent> {
    let mut pilot = RingAutopilot::new();
    let mut events = Vec::new();
    while !session.is_finished() && session.simulation().elapsed() < limit {
        pilot.update(&session.simulation().vehicle, session.simulation().track());
        events.extend(session.frame(FRAME_DT, pilot.sample_intent()));
    }
    events
}

#[test]
fn three_lap_race_finishes_on_lap_four() {
    let selection = SelectionStore::new(Catalog::builtin());
    let setup = selection.resolve();
    assert_eq!(setup.total_laps, 3);

    let mut session = RaceSession::new(&setup, &Settings::default()).unwrap();
    let transitions = Rc::new(RefCell::new(Vec::new()));
    let t = transitions.clone();
    session
        .progress_mut()
        .subscribe(move |p: &RaceSessionState| t.borrow_mut().push((p.current_lap, p.finished)));

    let events = autopilot_race(&mut session, 120.0);

    let progress = *session.progress().get();
    assert_eq!(progress.current_lap, 4);
    assert!(progress.finished);

    let laps: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            RaceEvent::LapCompleted { lap } => Some(*lap),
            _ => None,
        })
        .collect();
    assert_eq!(laps, vec![2, 3, 4]);
    assert_eq!(events.iter().filter(|e| **e == RaceEvent::Finished).count(), 1);
    assert_eq!(
        events.iter().filter(|e| **e == RaceEvent::CheckpointArmed).count(),
        3
    );

    // Subscribers saw each lap, and `finished` flipped exactly once
    assert_eq!(*transitions.borrow(), vec![(2, false), (3, false), (4, true)]);
}

#[test]
fn every_catalog_combination_can_finish() {
    let catalog = Catalog::builtin();
    for vehicle in catalog.vehicles() {
        for track in catalog.tracks() {
            let mut selection = SelectionStore::new(catalog.clone());
            selection.select_vehicle(&vehicle.id).unwrap();
            selection.select_track(&track.id).unwrap();
            selection.select_laps(1).unwrap();

            let mut session = RaceSession::new(&selection.resolve(), &Settings::default()).unwrap();
            autopilot_race(&mut session, 120.0);
            assert!(
                session.is_finished(),
                "{} on {} did not finish",
                vehicle.id,
                track.id
            );
        }
    }
}

#[test]
fn finished_session_stops_counting() {
    let mut selection = SelectionStore::new(Catalog::builtin());
    selection.select_laps(1).unwrap();
    let mut session = RaceSession::new(&selection.resolve(), &Settings::default()).unwrap();
    autopilot_race(&mut session, 120.0);
    assert!(session.is_finished());

    // Keep driving another couple of laps' worth of time
    let mut pilot = RingAutopilot::new();
    for _ in 0..(20.0 / FRAME_DT) as usize {
        pilot.update(&session.simulation().vehicle, session.simulation().track());
        let events = session.frame(FRAME_DT, pilot.sample_intent());
        assert!(!events.contains(&RaceEvent::Finished));
    }
    let progress = *session.progress().get();
    assert_eq!(progress.current_lap, 2);
    assert!(progress.finished);
}

#[test]
fn idle_kart_does_not_move() {
    let mut session =
        RaceSession::new(&SelectionStore::new(Catalog::builtin()).resolve(), &Settings::default())
            .unwrap();
    let start = session.snapshot();

    // No input source at all: coast
    for _ in 0..60 {
        session.frame(FRAME_DT, sample_or_idle(None));
    }

    let end = session.snapshot();
    assert_eq!(end.vehicle_position, start.vehicle_position);
    assert_eq!(end.heading, start.heading);
    assert_eq!(end.speed, 0.0);
    assert_eq!(end.camera_position, start.camera_position);
}

#[test]
fn outer_wall_pulls_kart_back_to_radius_22() {
    let track = TrackProfile::new("bowl", "Bowl", TrackTheme::Neon, 12.0, 22.0);
    let vehicle = Catalog::builtin().vehicles()[0].clone();
    let mut sim = RaceSimulation::new(vehicle, track).unwrap();
    let mut progress = RaceSessionStore::new(RaceSessionState::new(3));

    sim.vehicle.pos = polar_to_cartesian(30.0, 1.0);
    sim.vehicle.last_angle = 1.0;
    sim.vehicle.forward_speed = 15.0;

    let events = sim.tick(&mut progress, &InputIntent::default(), 0.0);

    assert!((sim.vehicle.pos.length() - 22.0).abs() < 1e-4);
    assert!((sim.vehicle.forward_speed - 9.0).abs() < 1e-4);
    assert_eq!(events, vec![RaceEvent::WallContact { side: WallSide::Outer }]);
}

#[test]
fn boost_pad_cooldown_is_per_vehicle() {
    let track = TrackProfile::new("pads", "Pads", TrackTheme::Desert, 12.0, 22.0)
        .with_boost(FRAC_PI_2, 0.2)
        .with_boost(FRAC_PI_2 + 0.5, 0.2);
    let vehicle = Catalog::builtin().vehicles()[0].clone();
    let mut sim = RaceSimulation::new(vehicle, track).unwrap();
    let mut progress = RaceSessionStore::new(RaceSessionState::new(3));
    let idle = InputIntent::default();

    sim.vehicle.pos = polar_to_cartesian(17.0, FRAC_PI_2);
    sim.vehicle.last_angle = FRAC_PI_2;
    let first = sim.tick(&mut progress, &idle, 0.01);
    assert!(matches!(first.as_slice(), [RaceEvent::Boost { .. }]));

    // Jump straight onto the second pad half a second later: still cooling down
    sim.vehicle.forward_speed = 0.0;
    for _ in 0..10 {
        sim.tick(&mut progress, &idle, 0.05);
    }
    sim.vehicle.pos = polar_to_cartesian(17.0, FRAC_PI_2 + 0.5);
    sim.vehicle.last_angle = FRAC_PI_2 + 0.5;
    let second = sim.tick(&mut progress, &idle, 0.01);
    assert!(second.is_empty());

    // After the cooldown the second pad fires
    for _ in 0..10 {
        sim.tick(&mut progress, &idle, 0.05);
        sim.vehicle.pos = polar_to_cartesian(17.0, FRAC_PI_2 + 0.5);
    }
    assert!(sim.vehicle.forward_speed > 0.0);
}

#[test]
fn unset_selection_resolves_to_first_choices() {
    let catalog = Catalog::builtin();
    let selection = SelectionStore::new(catalog.clone());

    assert_eq!(selection.character(), &catalog.characters()[0]);
    assert_eq!(selection.vehicle(), &catalog.vehicles()[0]);
    assert_eq!(selection.track(), &catalog.tracks()[0]);
    assert_eq!(selection.total_laps(), catalog.lap_options()[0]);

    let session = RaceSession::new(&selection.resolve(), &Settings::default()).unwrap();
    assert_eq!(session.character(), &catalog.characters()[0]);
    assert_eq!(session.simulation().track().id, catalog.tracks()[0].id);
}

#[test]
fn keyboard_driving_reaches_the_session() {
    let mut session =
        RaceSession::new(&SelectionStore::new(Catalog::builtin()).resolve(), &Settings::default())
            .unwrap();
    let mut keys = KeyboardInput::new();
    keys.key_down("ArrowUp");

    for _ in 0..30 {
        session.frame(FRAME_DT, keys.sample_intent());
    }
    assert!(session.snapshot().speed > 0.0);

    keys.key_down("Escape");
    if keys.take_pause_request() {
        session.toggle_pause();
    }
    assert!(session.is_paused());
    let frozen = session.snapshot();
    session.frame(FRAME_DT, keys.sample_intent());
    assert_eq!(session.snapshot(), frozen);
}
