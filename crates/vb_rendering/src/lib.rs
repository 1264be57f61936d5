// Rendering glue for the rally: a 2D camera, actor sprites (art when present,
// colored quads otherwise), court gizmos, the HUD and the phase overlay.
// Court space is converted to world space here and nowhere else.

use bevy::prelude::*;

pub mod court;
pub mod hud;
mod palette;
pub mod sprites;

pub use court::{block_box_world, grid_segments};
pub use hud::{hud_text, overlay_label, HudText, PhaseOverlay};
pub use palette::{passer_color, pose_color, Palette};
pub use sprites::{ball_depth, sprite_or_quad, SpriteLibrary, SPRITE_NAMES};

const LOG_TARGET: &str = "vb_rendering";

#[derive(Component)]
pub struct GameCamera;

fn setup_camera(mut commands: Commands) {
    commands.spawn((Name::new("GameCamera"), Camera2d, GameCamera));
}

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Palette::BG))
            .add_systems(PreStartup, sprites::load_sprite_library)
            .add_systems(
                Startup,
                (setup_camera, sprites::spawn_backdrop, hud::spawn_hud),
            )
            .add_systems(
                Update,
                (
                    sprites::attach_actor_sprites,
                    (
                        sprites::update_player_sprite,
                        sprites::update_spiker_sprite,
                        sprites::tint_stunned_passers,
                        sprites::sync_actor_transforms,
                    ),
                    (hud::update_hud, hud::update_phase_overlay),
                )
                    .chain(),
            );

        #[cfg(not(any(test, feature = "headless")))]
        app.add_systems(Update, (court::draw_court, court::draw_block_box));
    }
}
