//! The fixed orthographic camera looking down on the city.

use cgmath::{Matrix4, Point3, SquareMatrix, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const EYE: [f32; 3] = [200.0, 200.0, 200.0];
const NEAR: f32 = 1.0;
const FAR: f32 = 1000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct OrthoCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    /// World units per logical pixel.
    pub zoom: f32,
    width: f32,
    height: f32,
}

impl OrthoCamera {
    pub fn new(width: u32, height: u32, zoom: f32) -> Self {
        Self {
            eye: EYE.into(),
            target: Point3::new(0.0, 0.0, 0.0),
            zoom,
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, Vector3::unit_y());
        let half_width = self.width * self.zoom / 2.0;
        let half_height = self.height * self.zoom / 2.0;
        let proj = cgmath::ortho(-half_width, half_width, -half_height, half_height, NEAR, FAR);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &OrthoCamera) {
        self.view_proj = camera.build_view_projection_matrix().into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
