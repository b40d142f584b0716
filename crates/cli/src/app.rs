//! The windowed frame loop.

use depthfield_core::render::{GpuContext, Renderer};
use depthfield_core::{
    CameraState, Config, FrameClock, FrameInputs, InputState, PassSequencer, SceneGeometry,
};

use crate::error::CliError;
use crate::window::GlWindow;

/// Opens a window and renders `config` until Escape or close.
pub fn run(config: &Config) -> Result<(), CliError> {
    let geometry = SceneGeometry::generate(config.scene, config.water_height)?;

    let mut window = GlWindow::open(config)?;
    let context = GpuContext::new(window.load_gl())?;
    let gl = context.gl();
    let (major, minor) = context.version();
    log::debug!("using OpenGL {major}.{minor} core context");

    let renderer = Renderer::new(gl, config, geometry)?;
    let sequencer = PassSequencer::from_config(config);
    let projection = config.projection().matrix(config.aspect());

    let mut camera = CameraState::new(config.mouse_sensitivity, config.orbit_radius);
    let mut input = InputState::new();
    let mut clock = FrameClock::new();

    log::info!(
        "running {} scene with {} blur passes",
        config.scene,
        config.blur_passes
    );
    let result = loop {
        window.poll(&mut input, &mut camera);
        if input.quit_requested() || window.should_close() {
            break Ok(());
        }

        let time = clock.tick(window.time());
        let inputs = FrameInputs {
            camera: camera.snapshot(),
            projection,
            elapsed: time.elapsed,
            selection: input.selection(),
        };
        if let Err(e) = renderer.render(gl, &sequencer.plan(&inputs)) {
            break Err(CliError::from(e));
        }
        window.swap_buffers();

        if time.frame_index % 600 == 0 {
            log::debug!("frame {} at {:.1}s", time.frame_index, time.elapsed);
        }
    };

    renderer.destroy(gl);
    log::info!("shutting down");
    result
}
