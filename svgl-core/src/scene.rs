//! Insertion-ordered collection of meshes and lights.
use log::debug;

use crate::light::{Light, LightId, LightType};
use crate::mesh::{Mesh, MeshId};

#[derive(Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh, replacing any mesh with the same id in place.
    pub fn add(&mut self, mesh: Mesh) -> MeshId {
        let id = mesh.id();
        match self.meshes.iter_mut().find(|m| m.id() == id) {
            Some(existing) => *existing = mesh,
            None => self.meshes.push(mesh),
        }
        debug!("scene: added mesh {id}");
        id
    }

    /// Remove a mesh. Unknown ids are ignored.
    pub fn remove(&mut self, id: MeshId) -> Option<Mesh> {
        let index = self.meshes.iter().position(|m| m.id() == id)?;
        Some(self.meshes.remove(index))
    }

    pub fn get(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.id() == id)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.iter_mut().find(|m| m.id() == id)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn add_light(&mut self, light: impl Into<Light>) -> LightId {
        let light = light.into();
        let id = light.id();
        match self.lights.iter_mut().find(|l| l.id() == id) {
            Some(existing) => *existing = light,
            None => self.lights.push(light),
        }
        id
    }

    pub fn remove_light(&mut self, id: LightId) -> Option<Light> {
        let index = self.lights.iter().position(|l| l.id() == id)?;
        Some(self.lights.remove(index))
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.iter().find(|l| l.id() == id)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.iter_mut().find(|l| l.id() == id)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn lights_by_type(&self, light_type: LightType) -> impl Iterator<Item = &Light> {
        self.lights
            .iter()
            .filter(move |l| l.light_type() == light_type)
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty() && self.lights.is_empty()
    }

    /// Meshes mutably (their caches freshen during a frame) next to the lights.
    pub(crate) fn parts_mut(&mut self) -> (&mut [Mesh], &[Light]) {
        (&mut self.meshes, &self.lights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::{AmbientLight, PointLight};
    use nalgebra::Point3;

    #[test]
    fn test_meshes_keep_insertion_order() {
        let mut scene = Scene::new();
        let a = scene.add(Mesh::cube(1.0));
        let b = scene.add(Mesh::cube(2.0));
        let c = scene.add(Mesh::cube(3.0));
        let ids: Vec<MeshId> = scene.meshes().iter().map(Mesh::id).collect();
        assert_eq!(ids, vec![a, b, c]);

        scene.remove(b);
        let ids: Vec<MeshId> = scene.meshes().iter().map(Mesh::id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut scene = Scene::new();
        let id = scene.add(Mesh::new());
        assert!(scene.remove(id).is_some());
        assert!(scene.remove(id).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_readded_mesh_moves_to_the_end() {
        let mut scene = Scene::new();
        let a = scene.add(Mesh::cube(1.0));
        let b = scene.add(Mesh::cube(1.0));
        let mesh = scene.remove(a).unwrap();
        scene.add(mesh);
        let ids: Vec<MeshId> = scene.meshes().iter().map(Mesh::id).collect();
        assert_eq!(ids, vec![b, a]);

        scene.mesh_mut(a).unwrap().set_visible(false);
        assert!(!scene.get(a).unwrap().visible());
    }

    #[test]
    fn test_lights_by_type() {
        let mut scene = Scene::new();
        let point = scene.add_light(PointLight::new(Point3::new(0.0, 5.0, 0.0)));
        scene.add_light(AmbientLight::default());
        scene.add_light(AmbientLight::default());

        assert_eq!(scene.lights_by_type(LightType::Ambient).count(), 2);
        assert_eq!(scene.lights_by_type(LightType::Point).count(), 1);

        scene.light_mut(point).unwrap().set_intensity(3.0);
        assert_eq!(scene.light(point).unwrap().intensity(), 3.0);
        assert!(scene.remove_light(point).is_some());
        assert!(scene.remove_light(point).is_none());
    }
}
