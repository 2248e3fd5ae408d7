//! Bevy 2D viewer and interaction layer for the sandbox
//!
//! Owns the window, the fixed-rate physics clock, keyboard/mouse dispatch,
//! and all drawing: body discs as 2D meshes, trails and the slingshot
//! preview as gizmos, help/status text as a HUD overlay
//!
//! Simulation space uses window coordinates (origin top-left, y down), so
//! cursor positions feed the gesture machine unchanged; `sim_to_world`
//! flips into Bevy's centered, y-up world space only when drawing

use std::collections::HashSet;

use bevy::app::AppExit;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::PrimaryWindow;
use rand::Rng;

use crate::simulation::controller::{SimController, Slingshot};
use crate::simulation::engine::Engine;
use crate::simulation::integrator::sandbox_step;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, NVec2, Rgb};

/// Component tagging each disc with the stable id of its body
#[derive(Component)]
struct BodyId(pub u64);

/// Component tagging the help/status overlay text
#[derive(Component)]
struct HudText;

/// Component tagging the PAUSED indicator text
#[derive(Component)]
struct PauseText;

pub fn run_sandbox(scenario: Scenario) {
    println!(
        "run_sandbox: starting Bevy 2D sandbox with {} bodies",
        scenario.system.bodies.len()
    );

    let controller = SimController::new(&scenario.spawn);
    let engine = scenario.engine.clone();

    App::new()
        .insert_resource(Time::<Fixed>::from_hz(engine.fps))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(scenario)
        .insert_resource(controller)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: engine.title.clone(),
                resolution: (engine.width as f32, engine.height as f32).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_overlay)
        .add_systems(FixedUpdate, physics_step_system)
        .add_systems(
            Update,
            (
                keyboard_input_system,
                mouse_input_system,
                sync_bodies_system,
                draw_trails_system,
                draw_slingshot_system,
                hud_system,
            ),
        )
        .run();
}

/// Map a simulation-space position (window coords, y down) into Bevy world
/// space (centered origin, y up)
fn sim_to_world(engine: &Engine, p: &NVec2) -> Vec2 {
    Vec2::new(
        p.x as f32 - 0.5 * engine.width as f32,
        0.5 * engine.height as f32 - p.y as f32,
    )
}

fn cursor_to_sim(p: Vec2) -> NVec2 {
    NVec2::new(p.x as f64, p.y as f64)
}

fn rgb_color(c: Rgb) -> Color {
    Color::srgb_u8(c[0], c[1], c[2])
}

/// Startup system: spawn camera and the two text overlays
fn setup_overlay(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 18.0,
                color: Color::WHITE,
                ..Default::default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..Default::default()
        }),
        HudText,
    ));

    commands.spawn((
        TextBundle::from_section(
            "PAUSED",
            TextStyle {
                font_size: 22.0,
                color: Color::srgb_u8(255, 255, 0),
                ..Default::default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Percent(48.0),
            ..Default::default()
        }),
        PauseText,
    ));
}

/// Fixed-rate physics advance, gated by the pause flag
fn physics_step_system(mut scenario: ResMut<Scenario>, controller: Res<SimController>) {
    if controller.paused {
        return;
    }

    // Split &mut Scenario into &mut fields in one destructuring step
    let Scenario {
        engine,
        parameters,
        system,
        forces,
        ..
    } = &mut *scenario;

    sandbox_step(system, forces, parameters, engine);
}

/// Keyboard dispatch: pause, reset, help, quit, pending-mass stepping
fn keyboard_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut scenario: ResMut<Scenario>,
    mut controller: ResMut<SimController>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Space) {
        controller.toggle_pause();
    }
    if keys.just_pressed(KeyCode::KeyR) {
        scenario.reset();
        controller.slingshot.cancel();
    }
    if keys.just_pressed(KeyCode::KeyH) {
        controller.toggle_help();
    }
    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
    if keys.just_pressed(KeyCode::Equal) || keys.just_pressed(KeyCode::NumpadAdd) {
        controller.raise_mass(&scenario.spawn);
    }
    if keys.just_pressed(KeyCode::Minus) || keys.just_pressed(KeyCode::NumpadSubtract) {
        controller.lower_mass(&scenario.spawn);
    }
}

/// Mouse dispatch: left press/drag/release drives the slingshot gesture,
/// right press clears spawned bodies
fn mouse_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scenario: ResMut<Scenario>,
    mut controller: ResMut<SimController>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let cursor = window.cursor_position().map(cursor_to_sim);

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(p) = cursor {
            controller.slingshot.press(p);
        }
    }

    // Track the preview point every frame while aiming
    if let Some(p) = cursor {
        controller.slingshot.drag(p);
    }

    if buttons.just_released(MouseButton::Left) {
        match cursor {
            Some(p) => {
                let scale = scenario.parameters.slingshot_scale;
                if let Some((x, v)) = controller.slingshot.release(p, scale) {
                    let color = pick_color(&scenario.palette);
                    let mass = controller.spawn_mass;
                    scenario.spawn_body(x, v, mass, color);
                }
            }
            // Released outside the window: abandon the gesture
            None => controller.slingshot.cancel(),
        }
    }

    if buttons.just_pressed(MouseButton::Right) {
        scenario.clear_spawned();
        controller.slingshot.cancel();
    }
}

/// Random palette color for a launched body; the palette is the only place
/// randomness enters the sandbox
fn pick_color(palette: &[Rgb]) -> Rgb {
    if palette.is_empty() {
        return [255, 255, 255];
    }
    let mut rng = rand::rng();
    palette[rng.random_range(0..palette.len())]
}

/// Keep one disc entity per live body: spawn discs for new bodies, despawn
/// discs whose body was culled or cleared, and sync the survivors' positions
fn sync_bodies_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    scenario: Res<Scenario>,
    mut query: Query<(Entity, &BodyId, &mut Transform)>,
) {
    let engine = &scenario.engine;
    let mut drawn: HashSet<u64> = HashSet::new();

    for (entity, BodyId(id), mut transform) in &mut query {
        match scenario.system.body(*id) {
            Some(b) => {
                let w = sim_to_world(engine, &b.x);
                transform.translation.x = w.x;
                transform.translation.y = w.y;
                drawn.insert(*id);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for b in &scenario.system.bodies {
        if drawn.contains(&b.id) {
            continue;
        }
        let w = sim_to_world(engine, &b.x);
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(b.radius as f32))),
                material: materials.add(ColorMaterial::from(rgb_color(b.color))),
                transform: Transform::from_xyz(w.x, w.y, 1.0),
                ..Default::default()
            },
            BodyId(b.id),
        ));
    }
}

/// Draw each body's trail as a polyline in its own color. Trails shorter
/// than 2 points draw nothing.
fn draw_trails_system(mut gizmos: Gizmos, scenario: Res<Scenario>) {
    let engine = &scenario.engine;
    for b in &scenario.system.bodies {
        if b.trail.len() < 2 {
            continue;
        }
        gizmos.linestrip_2d(
            b.trail.iter().map(|p| sim_to_world(engine, p)),
            rgb_color(b.color),
        );
    }
}

/// Slingshot preview: outlined disc sized for the pending mass at the
/// gesture start, a line to the cursor, and a dot at the cursor
fn draw_slingshot_system(
    mut gizmos: Gizmos,
    scenario: Res<Scenario>,
    controller: Res<SimController>,
) {
    let Slingshot::Aiming { start, current } = controller.slingshot else {
        return;
    };

    let engine = &scenario.engine;
    let grey = Color::srgb_u8(150, 150, 150);
    let preview_radius = Body::radius_for_mass(controller.spawn_mass) as f32;

    let start_w = sim_to_world(engine, &start);
    let current_w = sim_to_world(engine, &current);

    gizmos.circle_2d(start_w, preview_radius, grey);
    gizmos.line_2d(start_w, current_w, grey);
    gizmos.circle_2d(current_w, 3.0, Color::WHITE);
}

/// Refresh the help/status overlay and the PAUSED indicator
fn hud_system(
    scenario: Res<Scenario>,
    controller: Res<SimController>,
    mut hud: Query<&mut Text, With<HudText>>,
    mut pause: Query<&mut Visibility, With<PauseText>>,
) {
    let Ok(mut text) = hud.get_single_mut() else {
        return;
    };

    let mass = controller.spawn_mass;
    let count = scenario.system.bodies.len();

    text.sections[0].value = if controller.show_help {
        [
            "Gravity Sandbox".to_string(),
            "-------------------------------------".to_string(),
            format!("Next Body Mass: {mass:.0} (use +/- to change)"),
            "Left Click: Set body position".to_string(),
            "Hold & Drag Left Mouse: Aim slingshot (drag AWAY from launch direction)".to_string(),
            "Release Left Mouse: Launch body".to_string(),
            "Right Click: Clear spawned bodies".to_string(),
            "SPACE: Pause/Resume".to_string(),
            "R: Reset simulation".to_string(),
            "H: Toggle this help".to_string(),
            "ESC: Quit".to_string(),
            format!("Bodies: {count}"),
        ]
        .join("\n")
    } else {
        format!("Mass: {mass:.0} | Bodies: {count} (Press H for help)")
    };

    if let Ok(mut visibility) = pause.get_single_mut() {
        *visibility = if controller.paused {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
