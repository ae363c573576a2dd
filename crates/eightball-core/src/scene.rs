//! Static scene graph assembled once per mount.

use crate::constants::{SPHERE_RINGS, SPHERE_SEGMENTS};
use crate::environment::{bake_environment, EnvironmentBake, RoomEnvironment};
use crate::mesh::{project_decal, uv_sphere, DecalProjector, MeshData};
use glam::{Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshRole {
    Sphere,
    GlyphDecal,
    PromptDecal,
}

/// Which face texture a material samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSlot {
    Glyph,
    Prompt,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PbrMaterial {
    pub base_color: Vec3,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub map: Option<TextureSlot>,
    pub transparent: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Light position; it shines toward the origin.
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }

    pub fn radiance(&self) -> Vec3 {
        self.color * self.intensity
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: Vec3,
    pub key: DirectionalLight,
    pub fill: DirectionalLight,
    pub rim: DirectionalLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.25),
            key: DirectionalLight {
                position: Vec3::new(3.0, 4.0, 5.0),
                color: Vec3::new(1.0, 0.96, 0.9),
                intensity: 2.2,
            },
            fill: DirectionalLight {
                position: Vec3::new(-4.0, 1.0, 2.0),
                color: Vec3::new(0.75, 0.82, 1.0),
                intensity: 0.8,
            },
            rim: DirectionalLight {
                position: Vec3::new(0.0, 3.0, -5.0),
                color: Vec3::ONE,
                intensity: 1.4,
            },
        }
    }
}

impl LightRig {
    pub fn directional(&self) -> [DirectionalLight; 3] {
        [self.key, self.fill, self.rim]
    }
}

#[derive(Clone, Debug)]
pub struct SceneMesh {
    pub role: MeshRole,
    pub geometry: MeshData,
    pub material: PbrMaterial,
}

/// One root transform node and its three meshes. The meshes are owned by
/// the root, so the graph cannot hold cycles or second parents.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    pub root: Mat4,
    pub meshes: Vec<SceneMesh>,
    pub lights: LightRig,
    pub environment: EnvironmentBake,
}

impl SceneGraph {
    pub fn mesh(&self, role: MeshRole) -> Option<&SceneMesh> {
        self.meshes.iter().find(|m| m.role == role)
    }
}

pub const GLYPH_DECAL_SIZE: Vec3 = Vec3::new(0.9, 0.9, 0.5);
pub const PROMPT_DECAL_SIZE: Vec3 = Vec3::new(1.1, 1.1, 0.8);

pub fn ball_material() -> PbrMaterial {
    PbrMaterial {
        base_color: Vec3::new(0.018, 0.018, 0.022),
        opacity: 1.0,
        roughness: 0.35,
        metalness: 0.0,
        clearcoat: 1.0,
        clearcoat_roughness: 0.06,
        map: None,
        transparent: false,
    }
}

fn decal_material(slot: TextureSlot, opacity: f32) -> PbrMaterial {
    PbrMaterial {
        base_color: Vec3::ONE,
        opacity,
        roughness: 0.45,
        metalness: 0.0,
        clearcoat: 0.6,
        clearcoat_roughness: 0.1,
        map: Some(slot),
        transparent: true,
    }
}

fn pole_projector(size: Vec3) -> DecalProjector {
    DecalProjector {
        position: Vec3::new(0.0, 0.0, 1.0),
        orientation: Quat::IDENTITY,
        size,
    }
}

/// Builds the sphere, then projects both decals from its finished
/// transform, then bakes the environment.
pub fn build_scene() -> SceneGraph {
    let sphere = uv_sphere(SPHERE_SEGMENTS, SPHERE_RINGS);
    let sphere_transform = Mat4::IDENTITY;

    let glyph = project_decal(&sphere, sphere_transform, &pole_projector(GLYPH_DECAL_SIZE));
    let prompt = project_decal(&sphere, sphere_transform, &pole_projector(PROMPT_DECAL_SIZE));
    log::debug!(
        "scene: sphere {} tris, glyph decal {} tris, prompt decal {} tris",
        sphere.triangle_count(),
        glyph.triangle_count(),
        prompt.triangle_count()
    );

    SceneGraph {
        root: Mat4::IDENTITY,
        meshes: vec![
            SceneMesh {
                role: MeshRole::Sphere,
                geometry: sphere,
                material: ball_material(),
            },
            SceneMesh {
                role: MeshRole::GlyphDecal,
                geometry: glyph,
                material: decal_material(TextureSlot::Glyph, 1.0),
            },
            SceneMesh {
                role: MeshRole::PromptDecal,
                geometry: prompt,
                material: decal_material(TextureSlot::Prompt, 0.0),
            },
        ],
        lights: LightRig::default(),
        environment: bake_environment(&RoomEnvironment::default()),
    }
}
