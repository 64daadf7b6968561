use glam::DVec2;

use crate::core::schema::NormalizedParameters;
use crate::platform::surface::Surface;
use crate::simulation::camera::Camera;

/// A live piece of a running simulation.
///
/// `update` advances the model by `dt` seconds (`elapsed` is the simulation
/// clock after the step). `render` only reads state, so drawing can never
/// perturb the physics.
pub trait SimulationObject {
    fn update(&mut self, dt: f64, elapsed: f64);

    fn render(&self, surface: &mut dyn Surface, camera: &Camera);

    fn caption(&self) -> Option<&str> {
        None
    }

    /// Representative point in surface coordinates, used for hover lookup.
    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        None
    }

    /// Problem parameters shown when the object is hovered.
    fn annotation(&self) -> Option<&NormalizedParameters> {
        None
    }

    /// Whether the motion has finished. The runtime stops its clock after
    /// the first frame in which any object reports `true`.
    fn is_settled(&self) -> bool {
        false
    }
}

/// Append-only handle a constructor builds a scene through.
pub struct Stage<'a> {
    objects: &'a mut Vec<Box<dyn SimulationObject>>,
    camera: &'a Camera,
}

impl<'a> Stage<'a> {
    pub fn new(objects: &'a mut Vec<Box<dyn SimulationObject>>, camera: &'a Camera) -> Self {
        Self { objects, camera }
    }

    pub fn add_object(&mut self, object: impl SimulationObject + 'static) {
        self.objects.push(Box::new(object));
    }

    pub fn camera(&self) -> &Camera {
        self.camera
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
