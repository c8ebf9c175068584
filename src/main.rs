//! Replays a scripted input session against a scene preset and logs every
//! pick and overlay transition.
//!
//! ```text
//! RUST_LOG=info vitrine showcase assets/sessions/showcase.json
//! ```

use std::path::Path;
use std::time::Duration;

use vitrine::assets::{AssetRegistry, FileLoader};
use vitrine::overlay::OverlayPanels;
use vitrine::reveal::{PickController, SceneContext};
use vitrine::scene::Stage;
use vitrine::session::{run_session, Session};
use vitrine::util::clock::SceneClock;
use vitrine::{Options, ScenePreset};

const ASSET_ROOT: &str = "assets";

fn main() {
    env_logger::init();

    let Some(preset) = std::env::args().nth(1) else {
        // Error level is the only one env_logger shows by default.
        log::error!("Usage: vitrine <preset name or options.toml> [session.json]");
        log::error!("built-in presets: {}", ScenePreset::list());
        return;
    };

    let options = match Options::resolve(&preset) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };

    let session = match std::env::args().nth(2) {
        Some(path) => match Session::load(Path::new(&path)) {
            Ok(session) => session,
            Err(e) => {
                log::error!("failed to load session {path}: {e}");
                return;
            }
        },
        None => Session::default(),
    };

    let registry = AssetRegistry::new(FileLoader::new(ASSET_ROOT));
    let model = registry.load_model(&options.scene.model_url);
    let environment = registry.load_environment(&options.environment.hdri_url);

    let mut stage = Stage::new(&options, session.viewport);
    match pollster::block_on(environment) {
        Ok(map) => stage.set_environment(map),
        Err(e) => log::warn!("continuing without environment lighting: {e}"),
    }
    if let Err(e) = pollster::block_on(model.clone()) {
        log::warn!("nothing will be pickable: {e}");
    }

    let overlay = OverlayPanels::new(&options.overlay);
    let mut controller =
        PickController::new(SceneContext::new(stage, model, overlay), &options);

    log::info!(
        "scene '{}' with {} scripted events",
        options.scene.name,
        session.events.len()
    );
    let clock = SceneClock::start();
    let report = run_session(&mut controller, &session, Duration::from_secs(1));
    log::debug!("replay took {:?}", clock.now());
    log::info!(
        "done: {} clicks, {} transitions, overlay {}",
        report.picks.len(),
        report.phases.len(),
        if report.revealed { "open" } else { "closed" }
    );
}
