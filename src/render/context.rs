use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{info, warn};
use raw_window_handle::HasRawWindowHandle;
use std::{
    ffi::{CStr, CString},
    num::NonZeroU32,
    ptr,
};
use thiserror::Error;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use crate::config::{RenderConfig, WindowConfig};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Failed to create window: {0}")]
    Window(String),
    #[error("Display builder returned no window")]
    NoWindow,
    #[error("OpenGL error: {0}")]
    Gl(#[from] glutin::error::Error),
}

/// The window, its GL surface and the current context, created once and
/// shared by every exercise.
pub struct RenderContext {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
}

impl RenderContext {
    pub fn new(
        event_loop: &EventLoop<()>,
        window_config: &WindowConfig,
        render_config: &RenderConfig,
    ) -> Result<Self, ContextError> {
        let window_builder = WindowBuilder::new()
            .with_title(window_config.title.as_str())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                // The picker has no error channel; an empty list only happens when the
                // display supports no RGBA8 config at all.
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("display offered no GL configs")
            })
            .map_err(|e| ContextError::Window(e.to_string()))?;

        let window = window.ok_or(ContextError::NoWindow)?;
        let raw_window_handle = window.raw_window_handle();

        let (major, minor) = window_config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };

        let gl_context = not_current.make_current(&gl_surface)?;

        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
            Err(_) => ptr::null(),
        });

        let interval = if render_config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            warn!("Failed to set swap interval: {}", e);
        }

        let context = Self {
            window,
            gl_context,
            gl_surface,
        };
        info!(
            "Created {}x{} window with OpenGL {}",
            window_config.width,
            window_config.height,
            context.gl_version()
        );
        Ok(context)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn gl_version(&self) -> String {
        unsafe {
            let version = gl::GetString(gl::VERSION);
            if version.is_null() {
                return "unknown".to_string();
            }
            CStr::from_ptr(version as *const _).to_string_lossy().into_owned()
        }
    }

    /// Keeps the surface and viewport in step with the framebuffer size.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            warn!("Ignoring zero-sized resize to {}x{}", size.width, size.height);
            return;
        };

        self.gl_surface.resize(&self.gl_context, width, height);
        unsafe {
            gl::Viewport(0, 0, size.width as i32, size.height as i32);
        }
    }

    pub fn swap_buffers(&self) -> Result<(), ContextError> {
        self.gl_surface.swap_buffers(&self.gl_context)?;
        Ok(())
    }
}
