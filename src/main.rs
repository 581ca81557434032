use eframe::egui;

use model_hotspots::config::Params;

mod app;

use app::ExplorerApp;

/// Built-in session shown when no parameter file is given on the
/// command line.
const SAMPLE_PARAMS: &str = r##"{
    "model": { "src": "assets/engine.glb", "alt": "Cutaway engine model" },
    "behaviour": { "presentation": "sidePanel" },
    "visuals": { "hotspotColorDefault": "#2e6da4" },
    "hotspots": [
        {
            "surface": "0.12 0.45 0.31",
            "label": "Crankshaft",
            "contents": [
                { "type": "text", "body": "<p>Converts piston motion into rotation.</p>" }
            ]
        },
        {
            "surface": "0.71 0.22 0.40",
            "label": "Intake manifold",
            "appearance": { "type": "icon", "icon": "info" },
            "contents": [
                { "type": "text", "body": "<p>Distributes air to the cylinders.</p>" },
                { "type": "image", "uri": "assets/manifold.png", "alt": "Manifold cross-section" }
            ]
        }
    ]
}"##;

fn main() {
    env_logger::init();

    let params = match load_params() {
        Ok(params) => params,
        Err(error) => {
            log::error!("could not load parameters: {error}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Model Hotspots",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(params)))),
    )
    .expect("Failed to start Model Hotspots");
}

fn load_params() -> Result<Params, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            Ok(Params::from_json(&json)?)
        }
        None => Ok(Params::from_json(SAMPLE_PARAMS)?),
    }
}
