//! Static meshes and textures used by the effect

pub mod flame;
pub mod mesh;
pub mod sphere;

pub use flame::{shared_flame_mesh, FlameShape};
pub use mesh::Mesh;
pub use sphere::{checkerboard_texture, shared_particle_sphere, uv_sphere, Texture};
