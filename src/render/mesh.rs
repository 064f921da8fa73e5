use crate::constants::{AXES_LENGTH, AXIS_COLORS};
use arrayviz_core::{BoxEntity, EntityId, Scene};
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Vertex {
    pub(crate) position: [f32; 3],
    pub(crate) color: [f32; 4],
}

impl Vertex {
    pub(crate) const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// What the last upload was built from; equal signatures skip the rebuild.
pub(crate) type MeshSignature = Vec<(EntityId, u64, [f32; 3])>;

pub(crate) fn signature(scene: &Scene) -> MeshSignature {
    scene
        .visible()
        .map(|(id, b)| (id, b.revision(), b.position().to_array()))
        .collect()
}

/// CPU-side geometry for one frame. Opaque fills come first in `fills`,
/// followed by translucent ones starting at `translucent_start`.
#[derive(Default)]
pub(crate) struct SceneMesh {
    pub(crate) fills: Vec<Vertex>,
    pub(crate) translucent_start: u32,
    pub(crate) lines: Vec<Vertex>,
}

pub(crate) fn build(scene: &Scene) -> SceneMesh {
    let mut mesh = SceneMesh::default();
    push_axes(&mut mesh.lines);

    let (translucent, opaque): (Vec<_>, Vec<_>) =
        scene.visible().partition(|(_, b)| b.is_translucent());
    for (_, body) in &opaque {
        push_fill(&mut mesh.fills, body);
    }
    mesh.translucent_start = mesh.fills.len() as u32;
    for (_, body) in &translucent {
        push_fill(&mut mesh.fills, body);
    }
    for (_, body) in opaque.iter().chain(translucent.iter()) {
        push_outline(&mut mesh.lines, body);
    }
    mesh
}

fn push_axes(out: &mut Vec<Vertex>) {
    for (axis, color) in [Vec3::X, Vec3::Y, Vec3::Z].into_iter().zip(AXIS_COLORS) {
        out.push(Vertex {
            position: [0.0; 3],
            color,
        });
        out.push(Vertex {
            position: (axis * AXES_LENGTH).to_array(),
            color,
        });
    }
}

// Corner order matches the outline: bottom ring then top ring.
fn corners(body: &BoxEntity) -> [Vec3; 8] {
    let c = *body.position();
    let h = body.dimensions().extents() * 0.5;
    [
        c + Vec3::new(-h.x, -h.y, -h.z),
        c + Vec3::new(h.x, -h.y, -h.z),
        c + Vec3::new(h.x, h.y, -h.z),
        c + Vec3::new(-h.x, h.y, -h.z),
        c + Vec3::new(-h.x, -h.y, h.z),
        c + Vec3::new(h.x, -h.y, h.z),
        c + Vec3::new(h.x, h.y, h.z),
        c + Vec3::new(-h.x, h.y, h.z),
    ]
}

const FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // bottom
    [4, 5, 6, 7], // top
    [0, 1, 5, 4], // -y
    [2, 3, 7, 6], // +y
    [1, 2, 6, 5], // +x
    [3, 0, 4, 7], // -x
];

fn push_fill(out: &mut Vec<Vertex>, body: &BoxEntity) {
    let [r, g, b] = body.color();
    let color = [r, g, b, body.opacity()];
    let corners = corners(body);
    for [a, b_, c, d] in FACES {
        for i in [a, b_, c, a, c, d] {
            out.push(Vertex {
                position: corners[i].to_array(),
                color,
            });
        }
    }
}

fn push_outline(out: &mut Vec<Vertex>, body: &BoxEntity) {
    let [r, g, b] = body.outline_color();
    let color = [r, g, b, 1.0];
    let center = *body.position();
    for [p0, p1] in &body.outline().segments {
        out.push(Vertex {
            position: (center + *p0).to_array(),
            color,
        });
        out.push(Vertex {
            position: (center + *p1).to_array(),
            color,
        });
    }
}
