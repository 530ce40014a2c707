use gl::types::*;
use std::ffi::CStr;
use std::ptr;

use super::shaders::ShaderStage;

/// The slice of the GL API the shader builder talks to.
///
/// Handles are plain `GLuint` names. Every call assumes a current context.
pub trait ShaderApi {
    fn create_shader(&self, stage: ShaderStage) -> Option<GLuint>;
    fn compile_shader(&self, shader: GLuint, source: &CStr);
    fn compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> Option<GLuint>;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn link_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn use_program(&self, program: GLuint);
    fn delete_program(&self, program: GLuint);
}

/// [`ShaderApi`] backed by the function pointers loaded through `gl::load_with`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlApi;

impl ShaderApi for GlApi {
    fn create_shader(&self, stage: ShaderStage) -> Option<GLuint> {
        let id = unsafe { gl::CreateShader(stage.gl_enum()) };
        (id != 0).then_some(id)
    }

    fn compile_shader(&self, shader: GLuint, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader);
        }
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }
        success != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }
        read_info_log(len, |capacity, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader, capacity, written, buffer);
        })
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe {
            gl::DeleteShader(shader);
        }
    }

    fn create_program(&self) -> Option<GLuint> {
        let id = unsafe { gl::CreateProgram() };
        (id != 0).then_some(id)
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe {
            gl::AttachShader(program, shader);
        }
    }

    fn link_program(&self, program: GLuint) {
        unsafe {
            gl::LinkProgram(program);
        }
    }

    fn link_status(&self, program: GLuint) -> bool {
        let mut success = 0;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }
        success != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }
        read_info_log(len, |capacity, written, buffer| unsafe {
            gl::GetProgramInfoLog(program, capacity, written, buffer);
        })
    }

    fn use_program(&self, program: GLuint) {
        unsafe {
            gl::UseProgram(program);
        }
    }

    fn delete_program(&self, program: GLuint) {
        unsafe {
            gl::DeleteProgram(program);
        }
    }
}

/// Reads an info log of `len` bytes (terminator included) through `fetch`.
fn read_info_log<F>(len: GLint, fetch: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    if len <= 0 {
        return String::new();
    }

    let mut buffer = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.clamp(0, len) as usize);

    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory stand-in for a GL driver. Compilation is a rough GLSL
    //! sanity check: a `#version` line, a `void main()` entry point, balanced
    //! braces and `;`-terminated statements, which may span several lines.

    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct FakeShader {
        stage: ShaderStage,
        compiled: bool,
        log: String,
    }

    #[derive(Debug, Default)]
    struct FakeProgram {
        attached: Vec<GLuint>,
        linked: bool,
        log: String,
    }

    #[derive(Debug, Default)]
    struct State {
        next_id: GLuint,
        shaders: HashMap<GLuint, FakeShader>,
        programs: HashMap<GLuint, FakeProgram>,
        in_use: GLuint,
    }

    #[derive(Debug, Default)]
    pub struct FakeGl {
        state: RefCell<State>,
        pub silent_driver: bool,
    }

    impl FakeGl {
        pub fn new() -> Self {
            Self::default()
        }

        /// A driver that reports failures without any log text.
        pub fn silent() -> Self {
            Self {
                silent_driver: true,
                ..Self::default()
            }
        }

        pub fn live_shaders(&self) -> usize {
            self.state.borrow().shaders.len()
        }

        pub fn live_programs(&self) -> usize {
            self.state.borrow().programs.len()
        }

        pub fn program_in_use(&self) -> GLuint {
            self.state.borrow().in_use
        }

        fn next_id(&self) -> GLuint {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            state.next_id
        }
    }

    fn check_glsl(source: &str) -> Result<(), String> {
        let mut lines = source.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

        match lines.next() {
            Some((_, first)) if first.trim_start().starts_with("#version") => {}
            Some((n, _)) => return Err(format!("0:{}: error: #version must come first", n + 1)),
            None => return Err("0:0: error: empty shader source".to_string()),
        }

        // Statements may span lines; a `}` or end of input with an
        // unterminated statement is the missing-';' case.
        let mut depth = 0i32;
        let mut pending = false;
        let mut last_line = 0;
        for (n, line) in lines {
            let code = line.split("//").next().unwrap_or("").trim();
            if code.starts_with('#') {
                continue;
            }
            last_line = n + 1;
            for c in code.chars() {
                match c {
                    ';' => pending = false,
                    '{' => {
                        depth += 1;
                        pending = false;
                    }
                    '}' => {
                        if pending {
                            return Err(format!("0:{}: error: syntax error, missing ';'", n + 1));
                        }
                        depth -= 1;
                        if depth < 0 {
                            return Err(format!("0:{}: error: syntax error, unexpected '}}'", n + 1));
                        }
                    }
                    c if c.is_whitespace() => {}
                    _ => pending = true,
                }
            }
        }

        if pending {
            return Err(format!("0:{}: error: syntax error, missing ';'", last_line));
        }
        if depth != 0 {
            return Err("0:0: error: syntax error, unexpected end of file".to_string());
        }
        let compact: String = source.split_whitespace().collect();
        if !compact.contains("voidmain()") {
            return Err("0:0: error: missing entry point 'main'".to_string());
        }
        Ok(())
    }

    impl ShaderApi for FakeGl {
        fn create_shader(&self, stage: ShaderStage) -> Option<GLuint> {
            let id = self.next_id();
            self.state.borrow_mut().shaders.insert(
                id,
                FakeShader {
                    stage,
                    compiled: false,
                    log: String::new(),
                },
            );
            Some(id)
        }

        fn compile_shader(&self, shader: GLuint, source: &CStr) {
            let result = check_glsl(&source.to_string_lossy());
            let silent = self.silent_driver;
            if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
                match result {
                    Ok(()) => s.compiled = true,
                    Err(log) => {
                        s.compiled = false;
                        s.log = if silent { String::new() } else { log };
                    }
                }
            }
        }

        fn compile_status(&self, shader: GLuint) -> bool {
            self.state.borrow().shaders.get(&shader).is_some_and(|s| s.compiled)
        }

        fn shader_info_log(&self, shader: GLuint) -> String {
            self.state
                .borrow()
                .shaders
                .get(&shader)
                .map(|s| s.log.clone())
                .unwrap_or_default()
        }

        fn delete_shader(&self, shader: GLuint) {
            self.state.borrow_mut().shaders.remove(&shader);
        }

        fn create_program(&self) -> Option<GLuint> {
            let id = self.next_id();
            self.state.borrow_mut().programs.insert(id, FakeProgram::default());
            Some(id)
        }

        fn attach_shader(&self, program: GLuint, shader: GLuint) {
            if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
                p.attached.push(shader);
            }
        }

        fn link_program(&self, program: GLuint) {
            let mut state = self.state.borrow_mut();
            let stages: Vec<(ShaderStage, bool)> = match state.programs.get(&program) {
                Some(p) => p
                    .attached
                    .iter()
                    .filter_map(|id| state.shaders.get(id))
                    .map(|s| (s.stage, s.compiled))
                    .collect(),
                None => return,
            };

            let count = |kind: ShaderStage| stages.iter().filter(|(s, _)| *s == kind).count();
            let log = if stages.iter().any(|(_, compiled)| !compiled) {
                Some("error: attached shader is not compiled")
            } else if count(ShaderStage::Vertex) != 1 {
                Some("error: program needs exactly one vertex shader")
            } else if count(ShaderStage::Fragment) != 1 {
                Some("error: program needs exactly one fragment shader")
            } else {
                None
            };

            let silent = self.silent_driver;
            if let Some(p) = state.programs.get_mut(&program) {
                p.linked = log.is_none();
                p.log = match log {
                    Some(log) if !silent => log.to_string(),
                    _ => String::new(),
                };
            }
        }

        fn link_status(&self, program: GLuint) -> bool {
            self.state.borrow().programs.get(&program).is_some_and(|p| p.linked)
        }

        fn program_info_log(&self, program: GLuint) -> String {
            self.state
                .borrow()
                .programs
                .get(&program)
                .map(|p| p.log.clone())
                .unwrap_or_default()
        }

        fn use_program(&self, program: GLuint) {
            self.state.borrow_mut().in_use = program;
        }

        fn delete_program(&self, program: GLuint) {
            self.state.borrow_mut().programs.remove(&program);
        }
    }
}
