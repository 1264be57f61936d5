//! Sprite art lookup and per-actor visuals.
//!
//! Art is optional: every name in [`SPRITE_NAMES`] resolves to
//! `assets/sprites/<name>.png` when the file exists and to a colored quad
//! otherwise, so the game runs from a bare checkout.

use bevy::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use vb_core::{court_to_world, Ball, CourtBody, GameConfigRes, Passer, Player, Side, Spiker};
use vb_physics::Stun;

use crate::palette::{passer_color, pose_color, Palette};
use crate::LOG_TARGET;

pub const ASSET_ROOT: &str = "assets";
pub const SPRITE_DIR: &str = "sprites";

pub const SPRITE_NAMES: &[&str] = &[
    "B_Idle",
    "B_Bump",
    "B_KneesBent",
    "B_LeftBlock",
    "B_RightBlock",
    "B_MiddleBlock",
    "B_SplitBlock",
    "S_Idle",
    "S_LeftPrimed",
    "S_RightPrimed",
    "S_LeftSpike",
    "S_RightSpike",
    "NPC_Lower",
    "NPC_Upper",
    "Ball",
    "Net",
    "Floor",
];

/// Draw order, back to front.
pub mod depth {
    pub const FLOOR: f32 = 0.1;
    pub const FAR_NPC: f32 = 1.0;
    pub const BALL_BEHIND_NET: f32 = 1.5;
    pub const NET: f32 = 2.0;
    pub const PLAYER: f32 = 3.0;
    pub const BALL: f32 = 4.0;
    pub const NEAR_NPC: f32 = 5.0;
}

/// Loaded sprite handles by name. Names without art are listed in `missing`.
#[derive(Resource, Debug, Default, Clone)]
pub struct SpriteLibrary {
    images: HashMap<&'static str, Handle<Image>>,
    pub missing: Vec<&'static str>,
}

impl SpriteLibrary {
    /// Resolve every sprite name under `root/sprites`. Without an asset server nothing loads.
    pub fn resolve(root: &Path, server: Option<&AssetServer>) -> Self {
        let mut lib = Self::default();
        for &name in SPRITE_NAMES {
            let rel = sprite_path(name);
            match server {
                Some(server) if root.join(&rel).is_file() => {
                    lib.images.insert(name, server.load(rel));
                }
                _ => lib.missing.push(name),
            }
        }
        lib
    }

    pub fn get(&self, name: &str) -> Option<Handle<Image>> {
        self.images.get(name).cloned()
    }

    pub fn loaded(&self) -> usize {
        self.images.len()
    }
}

/// Asset-relative path of a sprite.
pub fn sprite_path(name: &str) -> PathBuf {
    Path::new(SPRITE_DIR).join(format!("{name}.png"))
}

pub fn load_sprite_library(mut commands: Commands, server: Option<Res<AssetServer>>) {
    let lib = SpriteLibrary::resolve(Path::new(ASSET_ROOT), server.as_deref());
    if lib.missing.is_empty() {
        info!(target: LOG_TARGET, loaded = lib.loaded(), "sprites loaded");
    } else {
        warn!(
            target: LOG_TARGET,
            loaded = lib.loaded(),
            missing = ?lib.missing,
            "sprite art missing under {ASSET_ROOT}/{SPRITE_DIR}; drawing colored quads"
        );
    }
    commands.insert_resource(lib);
}

/// Image sprite at `art_size`, or a flat quad of `body_size` in `color`.
pub fn sprite_or_quad(
    lib: &SpriteLibrary,
    name: &str,
    art_size: Vec2,
    body_size: Vec2,
    color: Color,
) -> Sprite {
    match lib.get(name) {
        Some(image) => Sprite {
            image,
            custom_size: Some(art_size),
            ..default()
        },
        None => Sprite::from_color(color, body_size),
    }
}

fn passer_sprite_name(side: Side) -> &'static str {
    match side {
        Side::Upper => "NPC_Upper",
        Side::Lower | Side::Spiker => "NPC_Lower",
    }
}

/// Ball is hidden by the net while it travels on the far side of it.
pub fn ball_depth(ball: &Ball, body: &CourtBody) -> f32 {
    let vy = body.velocity.y;
    let behind = (vy > 0.0 && ball.side == Side::Lower) || (vy < 0.0 && ball.side == Side::Upper);
    if behind {
        depth::BALL_BEHIND_NET
    } else {
        depth::BALL
    }
}

/// Net and floor art. Without art the net is a translucent band on the kill line.
pub fn spawn_backdrop(mut commands: Commands, lib: Res<SpriteLibrary>, cfg: Res<GameConfigRes>) {
    let court = &cfg.0.court;
    let size = Vec2::new(court.width, court.height);
    if let Some(image) = lib.get("Floor") {
        commands.spawn((
            Name::new("Floor"),
            Sprite {
                image,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, depth::FLOOR),
        ));
    }
    let net = match lib.get("Net") {
        Some(image) => (
            Sprite {
                image,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, depth::NET),
        ),
        None => {
            let y = court_to_world(Vec2::new(0.0, court.kill_line_y), size).y;
            (
                Sprite::from_color(Palette::NET, Vec2::new(court.width, 6.0)),
                Transform::from_xyz(0.0, y, depth::NET),
            )
        }
    };
    commands.spawn((Name::new("Net"), net.0, net.1));
}

#[allow(clippy::type_complexity)]
pub fn attach_actor_sprites(
    mut commands: Commands,
    lib: Res<SpriteLibrary>,
    cfg: Res<GameConfigRes>,
    q: Query<
        (
            Entity,
            &CourtBody,
            Option<&Player>,
            Option<&Passer>,
            Option<&Spiker>,
            Has<Ball>,
        ),
        Added<CourtBody>,
    >,
) {
    let scale = cfg.0.player.sprite_scale;
    for (e, body, player, passer, spiker, is_ball) in &q {
        let sprite = if let Some(p) = player {
            let color = pose_color(p.pose);
            sprite_or_quad(&lib, p.pose.sprite_name(), body.size * scale, body.size, color)
        } else if let Some(p) = passer {
            let color = passer_color(p.side);
            sprite_or_quad(&lib, passer_sprite_name(p.side), body.size, body.size, color)
        } else if let Some(s) = spiker {
            sprite_or_quad(&lib, s.sprite_name(), body.size, body.size, Palette::SPIKER)
        } else if is_ball {
            sprite_or_quad(&lib, "Ball", body.size, body.size, Palette::BALL)
        } else {
            continue;
        };
        commands.entity(e).insert(sprite);
    }
}

/// Swap player art (or fallback color) when the pose changes.
pub fn update_player_sprite(
    lib: Res<SpriteLibrary>,
    mut q: Query<(&Player, &mut Sprite), Changed<Player>>,
) {
    for (player, mut sprite) in &mut q {
        apply_art(&lib, &mut sprite, player.pose.sprite_name(), pose_color(player.pose));
    }
}

pub fn update_spiker_sprite(
    lib: Res<SpriteLibrary>,
    mut q: Query<(&Spiker, &mut Sprite, Has<Stun>)>,
) {
    for (spiker, mut sprite, stunned) in &mut q {
        let color = if stunned { Palette::STUNNED } else { Palette::SPIKER };
        apply_art(&lib, &mut sprite, spiker.sprite_name(), color);
    }
}

/// Grey out stunned passers drawn as quads.
pub fn tint_stunned_passers(
    lib: Res<SpriteLibrary>,
    mut q: Query<(&Passer, &mut Sprite, Has<Stun>)>,
) {
    for (passer, mut sprite, stunned) in &mut q {
        if lib.get(passer_sprite_name(passer.side)).is_some() {
            continue;
        }
        let color = if stunned {
            Palette::STUNNED
        } else {
            passer_color(passer.side)
        };
        if sprite.color != color {
            sprite.color = color;
        }
    }
}

fn apply_art(lib: &SpriteLibrary, sprite: &mut Sprite, name: &str, fallback: Color) {
    match lib.get(name) {
        Some(image) if sprite.image != image => sprite.image = image,
        Some(_) => {}
        None if sprite.color != fallback => sprite.color = fallback,
        None => {}
    }
}

/// Court space to world transforms, with per-actor draw order.
#[allow(clippy::type_complexity)]
pub fn sync_actor_transforms(
    cfg: Res<GameConfigRes>,
    mut q: Query<(
        &CourtBody,
        &mut Transform,
        Option<&Ball>,
        Option<&Passer>,
        Has<Player>,
    )>,
) {
    let court = Vec2::new(cfg.0.court.width, cfg.0.court.height);
    for (body, mut tf, ball, passer, is_player) in &mut q {
        let z = match (ball, passer) {
            (Some(ball), _) => ball_depth(ball, body),
            (None, Some(p)) if p.side == Side::Lower => depth::NEAR_NPC,
            _ if is_player => depth::PLAYER,
            _ => depth::FAR_NPC,
        };
        tf.translation = court_to_world(body.center, court).extend(z);
    }
}
