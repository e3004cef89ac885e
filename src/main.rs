//! Stadium Kart entry point
//!
//! On the web this wires DOM input and the HUD to a race session and drives it
//! from `requestAnimationFrame`; the page's renderer reads `snapshot_json()`.
//! Natively it runs a headless race with the autopilot at the wheel.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, PointerEvent};

    use stadium_kart::hud::FpsMeter;
    use stadium_kart::input::{ActiveInput, Control, InputSource, KeyBinding};
    use stadium_kart::platform::Platform;
    use stadium_kart::sim::RaceEvent;
    use stadium_kart::store::SelectionStore;
    use stadium_kart::{Catalog, ConfigError, RaceSession, Settings};

    /// Game instance holding all state
    struct Game {
        selection: SelectionStore,
        settings: Settings,
        session: Option<RaceSession>,
        input: ActiveInput,
        last_time: f64,
        fps: FpsMeter,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let mut selection = SelectionStore::new(Catalog::builtin());
            let platform = settings.effective_platform(Platform::detect());
            selection.select_platform(platform);
            Self {
                selection,
                settings,
                session: None,
                input: ActiveInput::for_platform(platform),
                last_time: 0.0,
                fps: FpsMeter::new(),
            }
        }

        /// Build a fresh session from the current selection
        fn start_race(&mut self) -> Result<(), ConfigError> {
            let setup = self.selection.resolve();
            let mut session = RaceSession::new(&setup, &self.settings)?;
            session.progress_mut().subscribe(|progress| {
                set_text("hud-lap", &format!("{}/{}", progress.display_lap(), progress.total_laps));
            });
            if self.input.platform() != setup.platform {
                self.input = ActiveInput::for_platform(setup.platform);
            }
            set_text("hud-lap", &format!("1/{}", setup.total_laps));
            set_class("results", "hidden");
            set_class("hud-fps", if self.settings.show_fps { "hud-item" } else { "hidden" });
            self.fps.reset();
            self.session = Some(session);
            self.last_time = 0.0;
            Ok(())
        }

        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            if self.settings.show_fps {
                let fps = self.fps.record(time);
                set_text("hud-fps", &fps.to_string());
            }

            let pause = match &mut self.input {
                ActiveInput::Keyboard(keys) => keys.take_pause_request(),
                ActiveInput::Touch(_) => false,
            };
            let intent = self.input.sample_intent();

            let Some(session) = self.session.as_mut() else {
                return;
            };
            if pause && !session.is_finished() {
                let paused = session.toggle_pause();
                set_class("pause-menu", if paused { "" } else { "hidden" });
            }

            for event in session.frame(dt, intent) {
                if event == RaceEvent::Finished {
                    set_class("results", "");
                }
            }
        }
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    fn with_game<R>(f: impl FnOnce(&mut Game) -> R) -> Option<R> {
        GAME.with(|slot| slot.borrow().as_ref().map(|game| f(&mut game.borrow_mut())))
    }

    fn set_text(id: &str, text: &str) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if let Some(el) = el {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(id: &str, class: &str) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if let Some(el) = el {
            let _ = el.set_attribute("class", class);
        }
    }

    /// Current frame for the page's renderer, as JSON
    #[wasm_bindgen]
    pub fn snapshot_json() -> Option<String> {
        with_game(|g| g.session.as_ref().map(|s| s.snapshot()))
            .flatten()
            .and_then(|snap| serde_json::to_string(&snap).ok())
    }

    /// Menu hooks: each returns false (and logs) if the choice is rejected
    #[wasm_bindgen]
    pub fn select_character(id: &str) -> bool {
        report(with_game(|g| g.selection.select_character(id)))
    }

    #[wasm_bindgen]
    pub fn select_vehicle(id: &str) -> bool {
        report(with_game(|g| g.selection.select_vehicle(id)))
    }

    #[wasm_bindgen]
    pub fn select_track(id: &str) -> bool {
        report(with_game(|g| g.selection.select_track(id)))
    }

    #[wasm_bindgen]
    pub fn select_laps(laps: u32) -> bool {
        report(with_game(|g| g.selection.select_laps(laps)))
    }

    /// Replace the settings with host-supplied JSON; applies from the next race
    #[wasm_bindgen]
    pub fn load_settings(json: &str) -> bool {
        report(with_game(|g| -> Result<(), ConfigError> {
            g.settings = Settings::from_json(json)?;
            let platform = g.settings.effective_platform(Platform::detect());
            g.selection.select_platform(platform);
            Ok(())
        }))
    }

    #[wasm_bindgen]
    pub fn start_race() -> bool {
        report(with_game(|g| g.start_race()))
    }

    fn report(result: Option<Result<(), ConfigError>>) -> bool {
        match result {
            Some(Ok(())) => true,
            Some(Err(e)) => {
                log::warn!("{e}");
                false
            }
            None => {
                log::error!("Game not initialized");
                false
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Stadium Kart starting...");

        let game = Rc::new(RefCell::new(Game::new(Settings::default())));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        setup_keyboard(game.clone());
        setup_touch_zones(game.clone());
        setup_blur(game.clone());

        if let Err(e) = game.borrow_mut().start_race() {
            log::error!("Failed to start race: {e}");
        }

        request_animation_frame(game);
        log::info!("Stadium Kart running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if KeyBinding::from_key(&key).is_none() {
                    return;
                }
                event.prevent_default();
                if let ActiveInput::Keyboard(keys) = &mut game.borrow_mut().input {
                    if pressed {
                        keys.key_down(&key);
                    } else {
                        keys.key_up(&key);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_zones(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let zones = [
            ("touch-left", Control::Left),
            ("touch-right", Control::Right),
            ("touch-throttle", Control::Throttle),
            ("touch-brake", Control::Brake),
        ];

        for (id, zone) in zones {
            let Some(el) = document.get_element_by_id(id) else {
                log::warn!("Touch zone #{id} missing");
                continue;
            };
            for (event_name, held) in [
                ("pointerdown", true),
                ("pointerup", false),
                ("pointerleave", false),
                ("pointercancel", false),
            ] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    if let ActiveInput::Touch(touch) = &mut game.borrow_mut().input {
                        match (held, event_name) {
                            (true, _) => touch.pointer_down(zone),
                            (false, "pointerleave") => touch.pointer_leave(zone),
                            (false, _) => touch.pointer_up(zone),
                        }
                    }
                });
                let _ = el
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_blur(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        // Key-ups are lost while unfocused
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().input.release_all();
            log::info!("Input released (window blur)");
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().update(time);
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Stadium Kart (native) starting...");

    let cli = native::Cli::parse();
    if let Err(e) = native::run_headless(&cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use stadium_kart::demo::RingAutopilot;
    use stadium_kart::input::InputSource;
    use stadium_kart::sim::RaceEvent;
    use stadium_kart::store::SelectionStore;
    use stadium_kart::{Catalog, ConfigError, RaceSession, Settings};

    /// Frame rate of the headless run
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after this much simulated time
    const TIME_LIMIT: f32 = 600.0;

    /// Headless race driven by the autopilot
    #[derive(Parser, Debug)]
    #[command(name = "stadium-kart")]
    #[command(about = "Run a headless Stadium Kart race with the autopilot at the wheel")]
    pub struct Cli {
        /// Character id (defaults to the first in the catalog)
        #[arg(long)]
        pub character: Option<String>,
        /// Vehicle id
        #[arg(long)]
        pub vehicle: Option<String>,
        /// Track id
        #[arg(long)]
        pub track: Option<String>,
        /// Number of laps
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        pub laps: Option<u32>,
        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,
    }

    #[derive(Debug, thiserror::Error)]
    pub enum CliError {
        #[error(transparent)]
        Config(#[from] ConfigError),

        #[error("Failed to read settings {path}: {source}")]
        ReadSettings {
            path: PathBuf,
            source: std::io::Error,
        },
    }

    fn load_settings(path: Option<&PathBuf>) -> Result<Settings, CliError> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        let json = std::fs::read_to_string(path).map_err(|source| CliError::ReadSettings {
            path: path.clone(),
            source,
        })?;
        Ok(Settings::from_json(&json)?)
    }

    fn build_selection(cli: &Cli) -> Result<SelectionStore, ConfigError> {
        let mut selection = SelectionStore::new(Catalog::builtin());
        if let Some(id) = &cli.character {
            selection.select_character(id)?;
        }
        if let Some(id) = &cli.vehicle {
            selection.select_vehicle(id)?;
        }
        if let Some(id) = &cli.track {
            selection.select_track(id)?;
        }
        if let Some(laps) = cli.laps {
            selection.select_laps(laps)?;
        }
        Ok(selection)
    }

    pub fn run_headless(cli: &Cli) -> Result<(), CliError> {
        let settings = load_settings(cli.settings.as_ref())?;
        let setup = build_selection(cli)?.resolve();
        let mut session = RaceSession::new(&setup, &settings)?;
        let mut pilot = RingAutopilot::new();

        while !session.is_finished() && session.simulation().elapsed() < TIME_LIMIT {
            pilot.update(&session.simulation().vehicle, session.simulation().track());
            for event in session.frame(FRAME_DT, pilot.sample_intent()) {
                if let RaceEvent::LapCompleted { lap } = event {
                    log::info!(
                        "t={:.2}s lap {} begins",
                        session.simulation().elapsed(),
                        lap.min(setup.total_laps)
                    );
                }
            }
        }

        let snap = session.snapshot();
        if snap.finished {
            println!(
                "Finished {} laps on {} in {:.2}s",
                snap.total_laps,
                setup.track.name,
                session.simulation().elapsed()
            );
        } else {
            println!(
                "Did not finish: lap {}/{} after {:.0}s",
                snap.current_lap, snap.total_laps, TIME_LIMIT
            );
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cli_parses_race_options() {
            let cli = Cli::try_parse_from([
                "stadium-kart",
                "--vehicle",
                "rocket",
                "--track",
                "ice-ring",
                "--laps",
                "1",
            ])
            .unwrap();
            let setup = build_selection(&cli).unwrap().resolve();
            assert_eq!(setup.vehicle.id, "rocket");
            assert_eq!(setup.track.id, "ice-ring");
            assert_eq!(setup.total_laps, 1);
        }

        #[test]
        fn test_bad_lap_count_is_an_error() {
            assert!(Cli::try_parse_from(["stadium-kart", "--laps", "abc"]).is_err());
            assert!(Cli::try_parse_from(["stadium-kart", "--laps", "0"]).is_err());
            assert!(Cli::try_parse_from(["stadium-kart", "laps=3"]).is_err());
        }

        #[test]
        fn test_unknown_selection_is_an_error() {
            let cli = Cli::try_parse_from(["stadium-kart", "--track", "moon"]).unwrap();
            assert!(matches!(
                build_selection(&cli),
                Err(ConfigError::UnknownEntry { kind: "track", .. })
            ));
        }

        #[test]
        fn test_unreadable_settings_is_an_error() {
            let cli =
                Cli::try_parse_from(["stadium-kart", "--settings", "/nonexistent/kart.json"])
                    .unwrap();
            assert!(matches!(
                run_headless(&cli),
                Err(CliError::ReadSettings { .. })
            ));
        }
    }
}
