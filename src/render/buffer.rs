use bytemuck::Pod;
use gl::types::*;
use std::mem;
use std::ptr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    fn gl_enum(self) -> GLenum {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// A GL buffer object holding static data.
pub struct Buffer {
    id: GLuint,
    target: BufferTarget,
}

impl Buffer {
    pub fn new(target: BufferTarget) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
        }
        log::debug!("Created {:?} buffer {}", target, id);
        Self { id, target }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(self.target.gl_enum(), self.id);
        }
    }

    /// Binds the buffer and replaces its contents with `data` (`STATIC_DRAW`).
    pub fn upload<T: Pod>(&self, data: &[T]) {
        self.bind();
        let bytes: &[u8] = bytemuck::cast_slice(data);
        unsafe {
            gl::BufferData(
                self.target.gl_enum(),
                bytes.len() as GLsizeiptr,
                bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

/// A vertex array object recording attribute layout and the bound element buffer.
pub struct VertexArray {
    id: GLuint,
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
        }
        log::debug!("Created vertex array {}", id);
        Self { id }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
        }
    }

    pub fn unbind() {
        unsafe {
            gl::BindVertexArray(0);
        }
    }

    /// Describes attribute `index` as three tightly packed floats read from
    /// the currently bound array buffer, and enables it.
    pub fn position_attribute(&self, index: GLuint) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                3,
                gl::FLOAT,
                gl::FALSE,
                (3 * mem::size_of::<f32>()) as GLsizei,
                ptr::null(),
            );
            gl::EnableVertexAttribArray(index);
        }
    }
}

impl Default for VertexArray {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}
