//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::{sync::Arc, time::Instant};

use crate::{
    config::WindowConfig,
    error::{Result, ViewerError},
    viewer::{Platform, PlatformEvent},
};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    started: Instant,
}

impl App {
    /// Opens a resizable window with an OpenGL 3.3 core context made current.
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let sdl = sdl2::init().map_err(ViewerError::Platform)?;
        let video_subsystem = sdl.video().map_err(ViewerError::Platform)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_depth_size(24);
        gl_attr.set_double_buffer(true);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .position(config.x, config.y)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| ViewerError::Window(e.to_string()))?;
        let gl_context = window.gl_create_context().map_err(ViewerError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(ViewerError::Context)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(ViewerError::Platform)?;

        log::info!(
            "Opened {}x{} window {:?} at ({}, {})",
            config.width,
            config.height,
            config.title,
            config.x,
            config.y
        );

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Arc::new(gl),
            event_pump,
            started: Instant::now(),
        })
    }

    /// Size of the drawable area in pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}

impl Platform for App {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. } => events.push(PlatformEvent::CloseRequested),
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (width, height) = self.window.drawable_size();
                    events.push(PlatformEvent::Resized { width, height });
                }
                _ => {}
            }
        }
        events
    }

    fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    fn present(&mut self) {
        self.window.gl_swap_window();
    }
}
