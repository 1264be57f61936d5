use bevy::prelude::*;
use std::fmt::Write as _;
use std::path::Path;
use vb_core::{MatchPhase, Player, RallyStats};
use vb_gameplay::GestureState;
use vb_gesture::GesturePredicate;

use crate::palette::Palette;
use crate::sprites::ASSET_ROOT;
use crate::LOG_TARGET;

const HUD_FONT: &str = "fonts/FiraSans-Bold.ttf";

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct PhaseOverlay;

#[derive(Component)]
pub struct PhaseOverlayText;

fn hud_font(server: Option<&AssetServer>) -> Handle<Font> {
    let on_disk = Path::new(ASSET_ROOT).join(HUD_FONT);
    match server {
        Some(server) if on_disk.is_file() => server.load(HUD_FONT),
        Some(_) => {
            debug!(target: LOG_TARGET, "HUD font missing at {}; default font", on_disk.display());
            Handle::default()
        }
        None => Handle::default(),
    }
}

pub fn spawn_hud(mut commands: Commands, server: Option<Res<AssetServer>>) {
    let font = hud_font(server.as_deref());
    commands.spawn((
        Name::new("Hud"),
        Text::new(String::new()),
        TextFont {
            font: font.clone(),
            font_size: 16.0,
            ..Default::default()
        },
        TextColor(Palette::HUD_TEXT),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(6.0),
            left: Val::Px(8.0),
            ..Default::default()
        },
        HudText,
    ));

    commands
        .spawn((
            Name::new("PhaseOverlay"),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..Default::default()
            },
            BackgroundColor(Palette::OVERLAY),
            Visibility::Hidden,
            PhaseOverlay,
        ))
        .with_children(|p| {
            p.spawn((
                Text::new("KILL BLOCK"),
                TextFont {
                    font,
                    font_size: 100.0,
                    ..Default::default()
                },
                TextColor(Palette::OVERLAY_TEXT),
                PhaseOverlayText,
            ));
        });
}

/// HUD body: controls state, gesture indicators, baseline and rally stats.
pub fn hud_text(
    gesture: &GestureState,
    player: Option<&Player>,
    stats: &RallyStats,
    phase: MatchPhase,
) -> String {
    let mut s = String::new();
    let (power, block) = player
        .map(|p| (p.jump_power, p.block.label()))
        .unwrap_or((0.0, "None"));
    let _ = writeln!(s, "Jump factor: {power:.0}");
    let _ = writeln!(s, "Block: {block}");

    if gesture.live {
        let snap = &gesture.snapshot;
        let _ = writeln!(
            s,
            "Pose: {} ({} frames)",
            if snap.detected { "tracking" } else { "lost" },
            gesture.frames_seen
        );
        for p in GesturePredicate::ALL {
            let mark = if snap.is_active(p) { "x" } else { " " };
            let _ = writeln!(s, "[{mark}] {}", p.label());
        }
        if gesture.classifier.is_calibrated() {
            let b = gesture.classifier.baseline();
            let _ = writeln!(
                s,
                "Baseline: floor {:.2} height {:.2} knees {:.2}",
                b.floor_y, b.standing_height, b.knee_level
            );
        } else {
            let _ = writeln!(s, "Baseline: waiting for first pose");
        }
    } else {
        let _ = writeln!(s, "Pose: no feed (keyboard)");
    }

    let _ = writeln!(
        s,
        "Passes: {}  Spikes faced: {}  Kill blocks: {}  Resets: {}",
        stats.passes, stats.spikes_faced, stats.kill_blocks, stats.resets
    );
    if phase == MatchPhase::Paused {
        let _ = writeln!(s, "Paused (P to resume)");
    }
    s
}

pub fn update_hud(
    gesture: Res<GestureState>,
    stats: Res<RallyStats>,
    phase: Res<MatchPhase>,
    players: Query<&Player>,
    mut text_q: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut text) = text_q.single_mut() else {
        return;
    };
    let body = hud_text(&gesture, players.iter().next(), &stats, *phase);
    if text.0 != body {
        text.0 = body;
    }
}

/// Banner for the current phase; `None` hides the overlay.
pub fn overlay_label(phase: MatchPhase) -> Option<&'static str> {
    match phase {
        MatchPhase::Playing => None,
        MatchPhase::Paused => Some("PAUSED"),
        MatchPhase::KillBlock => Some("KILL BLOCK"),
    }
}

pub fn update_phase_overlay(
    phase: Res<MatchPhase>,
    mut overlay: Query<&mut Visibility, With<PhaseOverlay>>,
    mut label: Query<&mut Text, With<PhaseOverlayText>>,
) {
    if !phase.is_changed() {
        return;
    }
    let banner = overlay_label(*phase);
    for mut vis in &mut overlay {
        *vis = if banner.is_some() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if let Some(banner) = banner {
        for mut text in &mut label {
            text.0 = banner.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vb_gesture::test_support::standing_body;
    use vb_gesture::{BlockType, GestureClassifier, GestureSettings};

    fn state() -> GestureState {
        GestureState::new(GestureClassifier::new(GestureSettings::default()))
    }

    #[test]
    fn keyboard_only_hud() {
        let mut p = Player::new(15.0);
        p.block = BlockType::Split;
        let text = hud_text(&state(), Some(&p), &RallyStats::default(), MatchPhase::Playing);
        assert!(text.contains("Jump factor: 15"));
        assert!(text.contains("Block: Split"));
        assert!(text.contains("no feed"));
        assert!(!text.contains("Paused"));
    }

    #[test]
    fn live_feed_lists_indicators_and_baseline() {
        let mut g = state();
        g.live = true;
        g.frames_seen = 3;
        g.snapshot = g.classifier.update(0.0, Some(&standing_body()));
        let stats = RallyStats {
            spikes_faced: 4,
            passes: 9,
            kill_blocks: 1,
            resets: 0,
        };
        let text = hud_text(&g, None, &stats, MatchPhase::Paused);
        for p in GesturePredicate::ALL {
            assert!(text.contains(p.label()), "{}", p.label());
        }
        assert!(text.contains("[x] Hands below shoulders"));
        assert!(text.contains("Baseline: floor"));
        assert!(text.contains("Passes: 9  Spikes faced: 4  Kill blocks: 1"));
        assert!(text.contains("Paused"));
    }

    #[test]
    fn overlay_banner_per_phase() {
        assert_eq!(overlay_label(MatchPhase::Playing), None);
        assert_eq!(overlay_label(MatchPhase::KillBlock), Some("KILL BLOCK"));
        assert_eq!(overlay_label(MatchPhase::Paused), Some("PAUSED"));
    }
}
