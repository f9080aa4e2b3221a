//! Render projection.
//!
//! Turns the simulation arena into data a renderer can draw, without the
//! simulation knowing anything about the renderer. Everything here is a pure
//! function of the field's current state and works with no GPU present.

use crate::field::ParticleField;
use crate::palette::{ColorIndex, Palette};
use crate::particle::Particle;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Read-only view of one particle after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSnapshot {
    /// World-space position (field origin applied).
    pub position: Vec3,
    /// Lifecycle scale.
    pub scale: f32,
    /// Geometric radius; drawn size is `radius * scale`.
    pub radius: f32,
    /// Palette index.
    pub color: ColorIndex,
    /// Resolved palette color.
    pub rgb: Vec3,
}

impl ParticleSnapshot {
    pub(crate) fn of(p: &Particle, origin: Vec3, palette: &Palette) -> Self {
        Self {
            position: origin + p.position,
            scale: p.scale,
            radius: p.radius,
            color: p.color,
            rgb: palette.color(p.color),
        }
    }

    /// Radius as drawn.
    #[inline]
    pub fn visual_radius(&self) -> f32 {
        self.radius * self.scale
    }
}

/// Per-instance vertex data for the billboard shader.
///
/// Layout matches the `@location(0..=2)` inputs of [`PARTICLE_SHADER`].
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl ParticleInstance {
    /// Byte offset of `size`.
    pub const SIZE_OFFSET: u64 = 12;
    /// Byte offset of `color`.
    pub const COLOR_OFFSET: u64 = 16;

    pub fn from_snapshot(s: &ParticleSnapshot) -> Self {
        Self {
            position: s.position.to_array(),
            size: s.visual_radius(),
            color: s.rgb.extend(1.0).to_array(),
        }
    }
}

/// Instance data for every particle in slot order.
pub fn instances<R>(field: &ParticleField<R>) -> Vec<ParticleInstance> {
    let mut out = Vec::with_capacity(field.len());
    write_instances(field, &mut out);
    out
}

/// Like [`instances`] but reuses `out`'s allocation.
pub fn write_instances<R>(field: &ParticleField<R>, out: &mut Vec<ParticleInstance>) {
    out.clear();
    out.extend(field.snapshots().map(|s| ParticleInstance::from_snapshot(&s)));
}

/// WGSL for camera-facing lit circles, one instanced quad per particle.
///
/// Uniforms: `view_proj`, camera right/up vectors for billboarding, and a
/// light (`xyz` direction toward the light, `w` ambient term).
pub const PARTICLE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_right: vec4<f32>,
    camera_up: vec4<f32>,
    light: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec3<f32>,
    @location(1) size: f32,
    @location(2) color: vec4<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[vertex_index];
    let offset = (uniforms.camera_right.xyz * quad_pos.x + uniforms.camera_up.xyz * quad_pos.y) * size;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(center + offset, 1.0);
    out.color = color;
    out.uv = quad_pos;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    // Treat the disc as a hemisphere facing the camera for flat-ish shading.
    let normal = vec3<f32>(in.uv, sqrt(max(1.0 - dist * dist, 0.0)));
    let diffuse = max(dot(normal, normalize(uniforms.light.xyz)), 0.0);
    let shade = min(uniforms.light.w + diffuse, 1.0);
    let alpha = 1.0 - smoothstep(0.9, 1.0, dist);
    return vec4<f32>(in.color.rgb * shade, in.color.a * alpha);
}
"#;
