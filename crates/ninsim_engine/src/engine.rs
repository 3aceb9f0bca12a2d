//! Startup sequence and frame loop

use thiserror::Error;

use crate::{
    config::ConfigError,
    core::config::{ApplicationConfig, ShaderSources, WindowConfig},
    foundation::time::FrameCounter,
    render::{
        opengl::{GlApi, GlContext},
        window::{GlfwWindow, WindowBackend, WindowError, WindowEvent, WindowResult},
        Renderer, Scene,
    },
};

/// Fatal startup errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration or shader files could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Window, context or GL loader setup failed
    #[error(transparent)]
    Window(#[from] WindowError),
}

impl EngineError {
    /// Process exit code for every fatal startup error
    pub const EXIT_CODE: i32 = -1;
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames presented before the window closed
    pub frames_rendered: u64,
    /// Whether the shader program built, i.e. frames contained the triangle
    pub program_ready: bool,
}

/// Owns the window, the GL context and everything drawn with it
///
/// Generic over the window system and GL so the loop can run against fakes.
pub struct Engine<W, G> {
    window: W,
    gl: G,
    renderer: Renderer,
    scene: Scene,
    viewport_tracks_resize: bool,
    frames: FrameCounter,
}

impl Engine<GlfwWindow, GlContext> {
    /// Open the GLFW window and run until it is closed
    pub fn run(config: &ApplicationConfig) -> Result<RunSummary, EngineError> {
        Self::run_with(config, GlfwWindow::open)
    }

    /// Exit code for a run result: 0 on success, -1 on fatal startup errors
    pub const fn exit_code(result: &Result<RunSummary, EngineError>) -> i32 {
        match result {
            Ok(_) => 0,
            Err(_) => EngineError::EXIT_CODE,
        }
    }
}

impl<W: WindowBackend, G: GlApi> Engine<W, G> {
    /// Run the full startup sequence with a custom window factory
    ///
    /// Nothing touches the GPU unless `open` succeeds.
    pub fn run_with<F>(config: &ApplicationConfig, open: F) -> Result<RunSummary, EngineError>
    where
        F: FnOnce(&WindowConfig) -> WindowResult<(W, G)>,
    {
        let sources = config.renderer.shaders.load_sources()?;

        let (window, gl) = open(&config.window)?;

        let mut engine = Self::new(config, window, gl, &sources);
        engine.run_loop();

        let summary = engine.summary();
        log::info!(
            "Window closed after {} frames ({:.1} fps average)",
            summary.frames_rendered,
            engine.frames.average_fps()
        );
        Ok(summary)
    }

    /// Set the initial viewport and build the scene on an open window
    pub fn new(config: &ApplicationConfig, window: W, gl: G, sources: &ShaderSources) -> Self {
        let renderer = Renderer::new(&config.renderer);

        let (width, height) = window.framebuffer_size();
        renderer.resize(&gl, width, height);

        let scene = Scene::build(&gl, sources);
        if let Some(err) = scene.program_error() {
            log::warn!("Shader program unavailable ({err}); frames will be cleared only");
        }

        Self {
            window,
            gl,
            renderer,
            scene,
            viewport_tracks_resize: config.renderer.viewport_tracks_resize,
            frames: FrameCounter::new(),
        }
    }

    /// Run frames until the window is asked to close
    pub fn run_loop(&mut self) {
        log::info!("Starting main loop...");
        while !self.window.should_close() && self.frame() {}
    }

    /// Poll events, then draw and present one frame
    ///
    /// Returns `false` without drawing when the events asked to close.
    pub fn frame(&mut self) -> bool {
        for event in self.window.poll_events() {
            match event {
                WindowEvent::CloseRequested => {
                    log::info!("Window close requested");
                    self.window.set_should_close(true);
                }
                WindowEvent::FramebufferResized { width, height } => {
                    if self.viewport_tracks_resize {
                        self.renderer.resize(&self.gl, width, height);
                    }
                }
            }
        }

        if self.window.should_close() {
            return false;
        }

        self.renderer.draw_frame(&self.gl, &self.scene);
        self.window.swap_buffers();
        self.frames.tick();
        true
    }

    /// Frame count and program state so far
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames_rendered: self.frames.frame_count(),
            program_ready: self.scene.is_drawable(),
        }
    }

    /// The scene being drawn
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The GL implementation
    pub const fn gl(&self) -> &G {
        &self.gl
    }

    /// The window
    pub const fn window(&self) -> &W {
        &self.window
    }
}
