//! Hex map viewer with infinite horizontal scrolling.
//!
//! Move the cursor to a window edge to pan; the mouse wheel dollies the
//! camera. Tab toggles the debug overlay, Esc quits.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use hex_scroll::GameState;
use hex_scroll::config::HexMapConfig;
use hex_scroll::error::ConfigError;
use hex_scroll::map::HexMapPlugin;
use hex_scroll::pan::{PanConfig, PanPlugin};

#[cfg(feature = "native")]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;

    use hex_scroll::config::{HexMapConfig, load_config};
    use hex_scroll::error::ConfigError;

    /// Command-line overrides for the map configuration.
    #[derive(Parser, Debug)]
    #[command(version, about = "Infinitely scrolling hex map")]
    pub struct Args {
        /// YAML file with map settings; missing fields use defaults.
        #[arg(long)]
        pub config: Option<PathBuf>,
        /// Map width in hexes.
        #[arg(long)]
        pub map_width: Option<u32>,
        /// Map depth in hexes.
        #[arg(long)]
        pub map_depth: Option<u32>,
        /// Hex radius in world units.
        #[arg(long)]
        pub hex_radius: Option<f32>,
    }

    impl Args {
        /// File settings (or defaults) with the flags applied on top.
        pub fn into_config(self) -> Result<HexMapConfig, ConfigError> {
            let mut cfg = match &self.config {
                Some(path) => load_config(path)?,
                None => HexMapConfig::default(),
            };
            if let Some(w) = self.map_width {
                cfg.map_width = w;
            }
            if let Some(d) = self.map_depth {
                cfg.map_depth = d;
            }
            if let Some(r) = self.hex_radius {
                cfg.hex_radius = r;
            }
            Ok(cfg)
        }
    }
}

#[cfg(feature = "native")]
fn map_config() -> Result<HexMapConfig, ConfigError> {
    use clap::Parser;

    let cfg = cli::Args::parse().into_config()?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(not(feature = "native"))]
fn map_config() -> Result<HexMapConfig, ConfigError> {
    let cfg = HexMapConfig::default();
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> AppExit {
    let map_cfg = match map_config() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("hex-scroll: {err}");
            return AppExit::error();
        }
    };

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Scroll".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .insert_resource(ClearColor(Color::srgb(0.01, 0.01, 0.02)))
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(HexMapPlugin(map_cfg))
    .add_plugins(PanPlugin(PanConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    {
        use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
        app.add_plugins(RemotePlugin::default())
            .add_plugins(RemoteHttpPlugin::default());
    }

    app.run()
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        };
        info!("switching to {new_state:?}");
        next.set(new_state);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
