use gl::types::*;
use glam::Vec3;
use std::ptr;
use thiserror::Error;

use super::buffer::{Buffer, BufferTarget, VertexArray};

/// Attribute location the position data is bound to.
pub const POSITION_LOCATION: GLuint = 0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("Mesh has no vertices")]
    Empty,
    #[error("Index {index} is out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// `glDrawArrays` over `count` vertices.
    Arrays { count: GLsizei },
    /// `glDrawElements` over `count` `u32` indices.
    Elements { count: GLsizei },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            indices: Vec::new(),
        }
    }

    pub fn indexed(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn draw_mode(&self) -> Result<DrawMode, MeshError> {
        if self.positions.is_empty() {
            return Err(MeshError::Empty);
        }

        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertices: self.positions.len(),
            });
        }

        Ok(if self.is_indexed() {
            DrawMode::Elements {
                count: self.indices.len() as GLsizei,
            }
        } else {
            DrawMode::Arrays {
                count: self.positions.len() as GLsizei,
            }
        })
    }
}

/// Mesh data living on the GPU.
pub struct Mesh {
    vao: VertexArray,
    _vbo: Buffer,
    _ebo: Option<Buffer>,
    mode: DrawMode,
}

impl Mesh {
    pub fn upload(data: &MeshData) -> Result<Self, MeshError> {
        let mode = data.draw_mode()?;

        let vao = VertexArray::new();
        vao.bind();

        let vbo = Buffer::new(BufferTarget::Array);
        vbo.upload(&data.positions);

        // The element buffer binding is recorded in the VAO, so it stays bound
        // until the VAO is unbound.
        let ebo = data.is_indexed().then(|| {
            let ebo = Buffer::new(BufferTarget::ElementArray);
            ebo.upload(&data.indices);
            ebo
        });

        vao.position_attribute(POSITION_LOCATION);
        VertexArray::unbind();

        Ok(Self {
            vao,
            _vbo: vbo,
            _ebo: ebo,
            mode,
        })
    }

    pub fn draw(&self) {
        self.vao.bind();
        unsafe {
            match self.mode {
                DrawMode::Arrays { count } => gl::DrawArrays(gl::TRIANGLES, 0, count),
                DrawMode::Elements { count } => {
                    gl::DrawElements(gl::TRIANGLES, count, gl::UNSIGNED_INT, ptr::null())
                }
            }
        }
        VertexArray::unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrays_count_is_vertex_count() {
        let mesh = MeshData::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(mesh.draw_mode(), Ok(DrawMode::Arrays { count: 3 }));
    }

    #[test]
    fn test_elements_count_is_index_count() {
        let mesh = MeshData::indexed(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE],
            vec![0, 1, 2, 3, 1, 2],
        );
        assert_eq!(mesh.draw_mode(), Ok(DrawMode::Elements { count: 6 }));
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        assert_eq!(MeshData::default().draw_mode(), Err(MeshError::Empty));
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mesh = MeshData::indexed(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 3]);
        assert_eq!(
            mesh.draw_mode(),
            Err(MeshError::IndexOutOfRange {
                index: 3,
                vertices: 3
            })
        );
    }

    #[test]
    fn test_positions_upload_as_packed_floats() {
        let positions = vec![Vec3::new(0.0, 0.5, 0.0), Vec3::new(-0.5, -0.5, 0.0)];
        let floats: &[f32] = bytemuck::cast_slice(&positions);
        assert_eq!(floats, &[0.0, 0.5, 0.0, -0.5, -0.5, 0.0]);
    }
}
