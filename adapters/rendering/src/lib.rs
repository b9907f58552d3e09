#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for LifeTime traffic adapters.
//!
//! The [`Scene`] is a retained, backend-agnostic description of what should be
//! on screen: the static facility, the camera, one footprint per active
//! occupant and the population label. The engine writes into it through
//! [`SceneAdapter`]; rendering backends only read it.

use anyhow::Result as AnyResult;
use glam::Vec3;
use lifetime_traffic_core::{
    population_label, OccupantColor, OccupantId, Position, SceneAdapter, FACILITY_NAME,
};
use std::{collections::BTreeMap, error::Error, fmt, time::Duration};

/// Width of an occupant footprint along the x axis, in meters.
pub const PERSON_WIDTH: f32 = 0.5;
/// Depth of an occupant footprint along the y axis, in meters.
pub const PERSON_DEPTH: f32 = 0.3;
/// Height of an occupant footprint, in meters.
pub const PERSON_HEIGHT: f32 = 1.82;
/// Opacity applied to occupant footprints.
pub const FOOTPRINT_ALPHA: f32 = 0.7;
/// Half extent of the displayed ground area; the vertical axis spans `0..=AXIS_LIMIT`.
pub const AXIS_LIMIT: f32 = 135.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided opacity.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Translucent color used to draw an occupant.
    #[must_use]
    pub const fn for_occupant(color: OccupantColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue()).with_alpha(FOOTPRINT_ALPHA)
    }
}

const TAN: Color = Color::from_rgb_u8(0xd2, 0xb4, 0x8c);
const SKY_BLUE: Color = Color::from_rgb_u8(0x87, 0xce, 0xeb);
const GRAY: Color = Color::from_rgb_u8(0x80, 0x80, 0x80);
const EDGE: Color = Color::from_rgb_u8(0x00, 0x00, 0x00);

/// Converts an engine position into rendering space.
#[must_use]
pub fn to_render_space(position: Position) -> Vec3 {
    Vec3::new(
        position.x() as f32,
        position.y() as f32,
        position.z() as f32,
    )
}

/// Axis-aligned box drawn with translucent faces and solid edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prism {
    /// Corner with the smallest coordinates.
    pub min: Vec3,
    /// Corner with the largest coordinates.
    pub max: Vec3,
    /// Face fill color.
    pub face: Color,
    /// Edge line color.
    pub edge: Color,
}

impl Prism {
    /// Creates a prism spanning the two corners.
    pub fn from_corners(
        min: Vec3,
        max: Vec3,
        face: Color,
        edge: Color,
    ) -> Result<Self, RenderingError> {
        if min.cmpgt(max).any() {
            return Err(RenderingError::InvertedPrism { min, max });
        }
        Ok(Self {
            min,
            max,
            face,
            edge,
        })
    }

    /// Extent of the prism along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Geometric center of the prism.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Straight boundary line drawn on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundSegment {
    /// Start of the line.
    pub from: Vec3,
    /// End of the line.
    pub to: Vec3,
}

impl GroundSegment {
    const fn new(from: (f32, f32), to: (f32, f32)) -> Self {
        Self {
            from: Vec3::new(from.0, from.1, 0.0),
            to: Vec3::new(to.0, to.1, 0.0),
        }
    }
}

/// Static description of the facility drawn behind the occupants.
#[derive(Clone, Debug, PartialEq)]
pub struct FacilityPresentation {
    /// Solid building volumes.
    pub prisms: Vec<Prism>,
    /// Parking-lot boundary lines.
    pub parking_lot: Vec<GroundSegment>,
    /// Color of the parking-lot boundary lines.
    pub parking_lot_color: Color,
}

impl FacilityPresentation {
    /// Layout of LifeTime Savage with its entrance at the origin.
    ///
    /// The main hall is 100 m long, 56.5 m wide and an estimated 12 m tall. The
    /// atrium protrudes south of the entrance and its roof slab extends into
    /// the hall. The parking lot is outlined by its straight boundary lines
    /// only; curved kerbs and island edges are not drawn.
    pub fn lifetime_savage() -> Result<Self, RenderingError> {
        let hall = Prism::from_corners(
            Vec3::new(-64.0, 0.0, 0.0),
            Vec3::new(36.0, 56.5, 12.0),
            TAN.with_alpha(0.5),
            EDGE,
        )?;
        let atrium = Prism::from_corners(
            Vec3::new(-7.0, -8.0, 0.0),
            Vec3::new(7.0, 0.0, 13.0),
            SKY_BLUE,
            EDGE,
        )?;
        let atrium_roof = Prism::from_corners(
            Vec3::new(-7.0, 0.0, 12.0),
            Vec3::new(7.0, 8.0, 13.0),
            SKY_BLUE,
            EDGE,
        )?;

        let parking_lot = vec![
            GroundSegment::new((-122.0, -8.0), (57.5, -8.0)),
            GroundSegment::new((-23.0, -100.0), (-7.0, -100.0)),
            GroundSegment::new((-7.0, -100.0), (-7.0, -86.0)),
            GroundSegment::new((-23.0, -100.0), (-23.0, -86.0)),
            GroundSegment::new((57.5, -8.0), (57.5, 55.0)),
            GroundSegment::new((-93.83, -86.0), (-23.0, -86.0)),
            GroundSegment::new((-7.0, -86.0), (57.5, -86.0)),
            GroundSegment::new((-17.33, -80.0), (-11.99, -80.0)),
            GroundSegment::new((-6.7, -20.0), (-1.36, -20.0)),
            GroundSegment::new((3.96, -20.0), (25.0, -20.0)),
        ];

        Ok(Self {
            prisms: vec![hall, atrium, atrium_roof],
            parking_lot,
            parking_lot_color: GRAY,
        })
    }
}

/// Orbit camera described the way a 3D plot view is configured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPresentation {
    /// Angle above the ground plane, in degrees.
    pub elevation_degrees: f32,
    /// Angle around the vertical axis measured from +x, in degrees.
    pub azimuth_degrees: f32,
    /// Distance between the eye and the target, in meters.
    pub distance: f32,
    /// Point the camera looks at.
    pub target: Vec3,
}

impl CameraPresentation {
    /// Elevated view from the south, looking north across the parking lots.
    #[must_use]
    pub fn facility_overview() -> Self {
        Self {
            elevation_degrees: 20.0,
            azimuth_degrees: 270.0,
            distance: 2.0 * AXIS_LIMIT,
            target: Vec3::ZERO,
        }
    }

    /// Position of the eye in rendering space.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let elevation = self.elevation_degrees.to_radians();
        let azimuth = self.azimuth_degrees.to_radians();
        let direction = Vec3::new(
            elevation.cos() * azimuth.cos(),
            elevation.cos() * azimuth.sin(),
            elevation.sin(),
        );
        self.target + direction * self.distance
    }
}

/// Footprint of a single occupant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FootprintPresentation {
    /// Occupant the footprint belongs to.
    pub occupant: OccupantId,
    /// Ground corner the footprint box grows from.
    pub anchor: Vec3,
    /// Translucent fill color.
    pub color: Color,
}

impl FootprintPresentation {
    /// Box drawn for the occupant, growing along +x, +y and +z from the anchor.
    #[must_use]
    pub fn prism(&self) -> Prism {
        Prism {
            min: self.anchor,
            max: self.anchor + Vec3::new(PERSON_WIDTH, PERSON_DEPTH, PERSON_HEIGHT),
            face: self.color,
            edge: self.color.with_alpha(1.0),
        }
    }
}

/// Declarative scene description consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Static facility geometry.
    pub facility: FacilityPresentation,
    /// Camera used to view the facility.
    pub camera: CameraPresentation,
    footprints: BTreeMap<OccupantId, FootprintPresentation>,
    population_label: String,
}

impl Scene {
    /// Creates an empty scene showing zero occupants.
    #[must_use]
    pub fn new(facility: FacilityPresentation, camera: CameraPresentation) -> Self {
        Self {
            facility,
            camera,
            footprints: BTreeMap::new(),
            population_label: population_label(0),
        }
    }

    /// Footprints ordered by occupant identifier.
    pub fn footprints(&self) -> impl Iterator<Item = &FootprintPresentation> {
        self.footprints.values()
    }

    /// Footprint of a specific occupant, if shown.
    #[must_use]
    pub fn footprint(&self, occupant: OccupantId) -> Option<&FootprintPresentation> {
        self.footprints.get(&occupant)
    }

    /// Number of footprints currently shown.
    #[must_use]
    pub fn footprint_count(&self) -> usize {
        self.footprints.len()
    }

    /// Latest population counter text.
    #[must_use]
    pub fn population_label(&self) -> &str {
        &self.population_label
    }
}

impl SceneAdapter for Scene {
    fn set_footprint(&mut self, occupant: OccupantId, position: Position, color: OccupantColor) {
        let footprint = FootprintPresentation {
            occupant,
            anchor: to_render_space(position),
            color: Color::for_occupant(color),
        };
        let _ = self.footprints.insert(occupant, footprint);
    }

    fn remove_footprint(&mut self, occupant: OccupantId) {
        let _ = self.footprints.remove(&occupant);
    }

    fn set_population_label(&mut self, text: &str) {
        text.clone_into(&mut self.population_label);
    }
}

/// Scene bundled with the window configuration.
#[derive(Clone, Debug)]
pub struct Presentation {
    /// Title displayed by the window chrome.
    pub window_title: String,
    /// Color used to clear the frame before drawing.
    pub clear_color: Color,
    /// Scene to draw.
    pub scene: Scene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }

    /// Presentation of the LifeTime Savage facility on a white background.
    pub fn lifetime_savage() -> Result<Self, RenderingError> {
        let scene = Scene::new(
            FacilityPresentation::lifetime_savage()?,
            CameraPresentation::facility_overview(),
        );
        Ok(Self::new(
            FACILITY_NAME,
            Color::from_rgb_u8(0xff, 0xff, 0xff),
            scene,
        ))
    }
}

/// Rendering backend capable of presenting traffic scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the real frame delta and
    /// may mutate the scene before it is rendered, allowing adapters to
    /// advance the simulation on their own cadence.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// A prism's minimum corner exceeds its maximum corner on some axis.
    InvertedPrism {
        /// Provided minimum corner.
        min: Vec3,
        /// Provided maximum corner.
        max: Vec3,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedPrism { min, max } => {
                write!(f, "prism corners are inverted (min {min}, max {max})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Presentation::lifetime_savage()
            .expect("facility geometry is valid")
            .scene
    }

    #[test]
    fn new_scene_shows_zero_population() {
        let scene = scene();
        assert_eq!(scene.population_label(), "Person count: 0");
        assert_eq!(scene.footprint_count(), 0);
    }

    #[test]
    fn footprints_follow_set_and_remove_calls() {
        let mut scene = scene();
        let color = OccupantColor::from_rgb(255, 0, 0);

        scene.set_footprint(OccupantId::new(2), Position::on_ground(5.0, -100.0), color);
        scene.set_footprint(OccupantId::new(1), Position::on_ground(1.0, 1.0), color);
        scene.set_footprint(OccupantId::new(2), Position::on_ground(4.0, -90.0), color);

        let order: Vec<_> = scene.footprints().map(|footprint| footprint.occupant).collect();
        assert_eq!(order, vec![OccupantId::new(1), OccupantId::new(2)]);
        assert_eq!(
            scene
                .footprint(OccupantId::new(2))
                .map(|footprint| footprint.anchor),
            Some(Vec3::new(4.0, -90.0, 0.0))
        );

        scene.remove_footprint(OccupantId::new(2));
        scene.remove_footprint(OccupantId::new(7));
        assert_eq!(scene.footprint_count(), 1);

        scene.set_population_label("Person count: 1");
        assert_eq!(scene.population_label(), "Person count: 1");
    }

    #[test]
    fn footprint_prism_uses_person_dimensions() {
        let footprint = FootprintPresentation {
            occupant: OccupantId::new(0),
            anchor: Vec3::new(3.5, -4.0, 0.0),
            color: Color::for_occupant(OccupantColor::from_rgb(0, 0, 255)),
        };
        let prism = footprint.prism();

        assert!((prism.size() - Vec3::new(0.5, 0.3, 1.82)).length() < 1e-6);
        assert_eq!(prism.min, Vec3::new(3.5, -4.0, 0.0));
        assert!((prism.face.alpha - 0.7).abs() < f32::EPSILON);
        assert!((prism.edge.alpha - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn hall_matches_interior_wander_area() {
        let facility = FacilityPresentation::lifetime_savage().expect("valid geometry");
        let hall = facility.prisms[0];
        assert_eq!(hall.min, Vec3::new(-64.0, 0.0, 0.0));
        assert_eq!(hall.max, Vec3::new(36.0, 56.5, 12.0));
        assert_eq!(hall.center(), Vec3::new(-14.0, 28.25, 6.0));
        assert!(facility
            .parking_lot
            .iter()
            .all(|segment| segment.from.z == 0.0 && segment.to.z == 0.0));
    }

    #[test]
    fn parking_lot_outline_is_axis_aligned_lines() {
        let facility = FacilityPresentation::lifetime_savage().expect("valid geometry");
        assert_eq!(facility.parking_lot.len(), 10);
        for segment in &facility.parking_lot {
            assert!(
                segment.from.x == segment.to.x || segment.from.y == segment.to.y,
                "{segment:?} is not a straight boundary line"
            );
            assert_ne!(segment.from, segment.to);
        }
    }

    #[test]
    fn inverted_prism_is_rejected() {
        let error = Prism::from_corners(Vec3::ONE, Vec3::ZERO, TAN, EDGE)
            .expect_err("inverted corners must be rejected");
        assert!(matches!(error, RenderingError::InvertedPrism { .. }));
    }

    #[test]
    fn overview_camera_looks_from_the_south() {
        let eye = CameraPresentation::facility_overview().eye();
        assert!(eye.x.abs() < 1e-3);
        assert!(eye.y < -200.0);
        assert!(eye.z > 80.0 && eye.z < 100.0);
    }
}
