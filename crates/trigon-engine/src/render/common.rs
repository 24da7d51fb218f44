//! GPU state shared by batch renderers.

use bytemuck::{Pod, Zeroable};

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub size: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    /// Clamps each axis to at least one pixel so the shader never divides by zero.
    pub(super) fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width.max(1.0), height.max(1.0)],
            _pad: [0.0; 2],
        }
    }

    pub(super) fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<Self>() as u64)
            .expect("ViewportUniform has non-zero size by construction")
    }
}
