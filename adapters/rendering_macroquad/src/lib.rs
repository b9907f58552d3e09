#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for LifeTime traffic.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! We depend on macroquad without its default `audio` feature.
//!
//! The facility is drawn as translucent boxes in a 3D perspective with the
//! z axis pointing up. The population label is drawn in screen space on top.

use anyhow::Result;
use lifetime_traffic_rendering::{
    CameraPresentation, Color, FacilityPresentation, Presentation, Prism, RenderingBackend, Scene,
};
use macroquad::{
    camera::{set_camera, set_default_camera, Camera3D},
    color::BLACK,
    input::{is_key_pressed, KeyCode},
    math::Vec3 as MacroquadVec3,
};
use std::time::Duration;

const LABEL_FONT_SIZE: f32 = 28.0;
const LABEL_MARGIN: f32 = 16.0;
const FIELD_OF_VIEW_DEGREES: f32 = 45.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    window_width: i32,
    window_height: i32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            window_width: 960,
            window_height: 960,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

fn quit_requested() -> bool {
    is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q)
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: self.window_width,
            window_height: self.window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);

            loop {
                if quit_requested() {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                update_scene(frame_dt, &mut scene);

                macroquad::window::clear_background(background);

                set_camera(&camera_for(&scene.camera));
                draw_facility(&scene.facility);
                for footprint in scene.footprints() {
                    draw_prism(&footprint.prism());
                }

                set_default_camera();
                macroquad::text::draw_text(
                    scene.population_label(),
                    LABEL_MARGIN,
                    LABEL_MARGIN + LABEL_FONT_SIZE,
                    LABEL_FONT_SIZE,
                    BLACK,
                );

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn camera_for(camera: &CameraPresentation) -> Camera3D {
    Camera3D {
        position: to_macroquad_vec3(camera.eye()),
        target: to_macroquad_vec3(camera.target),
        up: MacroquadVec3::Z,
        fovy: FIELD_OF_VIEW_DEGREES.to_radians(),
        ..Camera3D::default()
    }
}

fn draw_facility(facility: &FacilityPresentation) {
    let parking_lot_color = to_macroquad_color(facility.parking_lot_color);
    for segment in &facility.parking_lot {
        macroquad::models::draw_line_3d(
            to_macroquad_vec3(segment.from),
            to_macroquad_vec3(segment.to),
            parking_lot_color,
        );
    }

    for prism in &facility.prisms {
        draw_prism(prism);
    }
}

fn draw_prism(prism: &Prism) {
    let (center, size) = cube_placement(prism);
    macroquad::models::draw_cube(center, size, None, to_macroquad_color(prism.face));
    macroquad::models::draw_cube_wires(center, size, to_macroquad_color(prism.edge));
}

/// Macroquad cubes are positioned by their center.
fn cube_placement(prism: &Prism) -> (MacroquadVec3, MacroquadVec3) {
    (
        to_macroquad_vec3(prism.center()),
        to_macroquad_vec3(prism.size()),
    )
}

fn to_macroquad_vec3(vector: glam::Vec3) -> MacroquadVec3 {
    MacroquadVec3::new(vector.x, vector.y, vector.z)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
