//! GLFW window, OpenGL context and input translation.

use depthfield_core::{CameraState, Config, InputCommand, InputState, Selection};
use glfw::{Action, Context, Key, WindowEvent};

use crate::error::CliError;

/// A window with a current OpenGL 3.3 core context.
pub struct GlWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
}

impl GlWindow {
    /// Opens the window, makes its context current and captures the cursor.
    pub fn open(config: &Config) -> Result<Self, CliError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| CliError::Setup(format!("cannot initialize GLFW: {e}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| CliError::Setup("cannot create window".to_string()))?;

        window.make_current();
        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        window.set_key_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_close_polling(true);
        window.set_cursor_mode(glfw::CursorMode::Disabled);

        log::info!(
            "opened {}x{} window '{}'",
            config.width,
            config.height,
            config.title
        );
        Ok(Self {
            glfw,
            window,
            events,
        })
    }

    /// Loads GL function pointers from the current context.
    #[allow(unsafe_code)]
    pub fn load_gl(&mut self) -> glow::Context {
        let window = &mut self.window;
        // SAFETY: the window's context was made current in open() and stays
        // current on this thread for the life of the window.
        unsafe { glow::Context::from_loader_function(|s| window.get_proc_address(s) as *const _) }
    }

    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Seconds since GLFW was initialized.
    pub fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    /// Polls events, feeding keys to `input` and cursor motion to `camera`.
    pub fn poll(&mut self, input: &mut InputState, camera: &mut CameraState) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                WindowEvent::Key(key, _, Action::Press, _) => {
                    if let Some(command) = key_command(key) {
                        input.apply(command);
                    }
                }
                WindowEvent::CursorPos(x, y) => camera.on_cursor_moved(x, y),
                WindowEvent::Close => input.apply(InputCommand::Quit),
                _ => {}
            }
        }
    }

    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}

/// Maps a pressed key to a command: 1-4 select the output view, Escape quits.
pub fn key_command(key: Key) -> Option<InputCommand> {
    let digit = match key {
        Key::Escape => return Some(InputCommand::Quit),
        Key::Num1 | Key::Kp1 => 1,
        Key::Num2 | Key::Kp2 => 2,
        Key::Num3 | Key::Kp3 => 3,
        Key::Num4 | Key::Kp4 => 4,
        _ => return None,
    };
    Selection::new(digit).map(InputCommand::Select)
}
