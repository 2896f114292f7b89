//! The render loop.
//!
//! [`Viewer`] owns everything the loop and the resize handler share (backend, scene, camera,
//! current projection), so a resize is just another method call made between frames.
//! Window-system work sits behind the [`Platform`] trait.

use glam::Mat4;

use crate::{
    render::{MatrixUniform, RenderBackend},
    scene::{self, Camera, Scene},
};

/// Window-system events the viewer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The drawable area changed to `width` x `height` pixels.
    Resized { width: u32, height: u32 },
    CloseRequested,
}

/// The window and clock the loop runs against.
pub trait Platform {
    /// Drains pending window events.
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// Seconds since startup.
    fn elapsed(&self) -> f32;

    /// Presents the finished frame.
    fn present(&mut self);
}

/// `width / height`, or `None` when either side is zero.
fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    (width > 0 && height > 0).then(|| width as f32 / height as f32)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closing,
}

pub struct Viewer<B: RenderBackend> {
    backend: B,
    scene: Scene<B::Mesh, B::Texture>,
    camera: Camera,
    rotation_speed: f32,
    projection: Mat4,
    viewport: (u32, u32),
    state: LoopState,
    frames: u64,
}

impl<B: RenderBackend> Viewer<B> {
    /// Sets the initial viewport and uploads the view and projection matrices.
    ///
    /// A zero-sized drawable area falls back to a square aspect until the first resize.
    pub fn new(
        mut backend: B,
        scene: Scene<B::Mesh, B::Texture>,
        camera: Camera,
        rotation_speed: f32,
        (width, height): (u32, u32),
    ) -> Self {
        let projection = match aspect_ratio(width, height) {
            Some(aspect) => camera.projection(aspect),
            None => {
                log::warn!("Drawable area is {width}x{height}, using a square projection");
                camera.projection(1.0)
            }
        };
        backend.set_viewport(width as i32, height as i32);
        backend.set_matrix(MatrixUniform::Projection, &projection);
        backend.set_matrix(MatrixUniform::View, &camera.view());

        Self {
            backend,
            scene,
            camera,
            rotation_speed,
            projection,
            viewport: (width, height),
            state: LoopState::Running,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scene(&self) -> &Scene<B::Mesh, B::Texture> {
        &self.scene
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn handle_event(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::Resized { width, height } => self.resize(width, height),
            PlatformEvent::CloseRequested => {
                log::debug!("Close requested");
                self.state = LoopState::Closing;
            }
        }
    }

    /// Updates the viewport and re-uploads the projection for the new aspect ratio.
    ///
    /// A zero-sized window (minimised) keeps the previous projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.set_viewport(width as i32, height as i32);
        self.viewport = (width, height);
        let Some(aspect) = aspect_ratio(width, height) else {
            log::debug!("Ignoring projection update for {width}x{height}");
            return;
        };
        self.projection = self.camera.projection(aspect);
        self.backend
            .set_matrix(MatrixUniform::Projection, &self.projection);
        log::debug!("Resized to {width}x{height}");
    }

    /// Draws every object once with the rotation for `time` seconds.
    pub fn render_frame(&mut self, time: f32) {
        self.backend.clear();
        let rotation = scene::rotation_at(self.rotation_speed, time);
        for object in self.scene.objects() {
            let model = scene::model_matrix(rotation, object.placement);
            self.backend.set_matrix(MatrixUniform::Model, &model);
            self.backend.draw(&object.mesh, &object.texture);
        }
        log::trace!("Frame {} at {time:.3}s", self.frames);
    }

    /// One loop iteration. Events are handled first; once closing is observed nothing else
    /// is drawn.
    pub fn step<P: Platform>(&mut self, platform: &mut P) -> LoopState {
        for event in platform.poll_events() {
            self.handle_event(event);
        }
        if self.state == LoopState::Closing {
            return self.state;
        }

        self.render_frame(platform.elapsed());
        platform.present();
        self.frames += 1;
        self.state
    }

    /// Runs until the platform asks to close.
    pub fn run<P: Platform>(&mut self, platform: &mut P) {
        log::info!("Rendering {} objects", self.scene.len());
        while self.step(platform) == LoopState::Running {}
        log::info!("Closing after {} frames", self.frames);
    }
}
