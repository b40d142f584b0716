//! Shader sources, compilation and linking.
//!
//! Compile and link need a `glow::Context`. Source loading and error
//! excerpt formatting are plain file and string work.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, compiling or linking shaders.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A shader source file could not be read.
    #[error("cannot read shader {path}: {message}")]
    Io { path: PathBuf, message: String },
    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    CompileError {
        /// The shader stage and source that failed (e.g. "fragment water.frag").
        stage: String,
        /// The driver's info log describing the error.
        log: String,
    },
    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    LinkError(String),
}

/// Where a shader stage's GLSL comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// A file read at load time.
    File(PathBuf),
    /// Source compiled into the binary.
    Embedded { name: &'static str, source: &'static str },
}

impl ShaderSource {
    /// Returns the GLSL text, reading the file if needed.
    ///
    /// # Errors
    ///
    /// Returns `ShaderError::Io` if a file source cannot be read.
    pub fn load(&self) -> Result<String, ShaderError> {
        match self {
            ShaderSource::File(path) => {
                std::fs::read_to_string(path).map_err(|e| ShaderError::Io {
                    path: path.clone(),
                    message: e.to_string(),
                })
            }
            ShaderSource::Embedded { source, .. } => Ok((*source).to_string()),
        }
    }
}

impl fmt::Display for ShaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderSource::File(path) => write!(f, "{}", path.display()),
            ShaderSource::Embedded { name, .. } => write!(f, "<{name}>"),
        }
    }
}

/// Lines of context shown on each side of a line the driver complains about.
const EXCERPT_CONTEXT: usize = 2;

/// Source line numbers referenced by a driver info log.
///
/// Understands the common `0:12(5): ...` / `ERROR: 0:12: ...` (Mesa, NVIDIA,
/// ANGLE) and `ERROR: 12:...` style prefixes. Returns sorted, unique
/// 1-based line numbers.
pub fn referenced_lines(log: &str) -> Vec<usize> {
    let mut lines: Vec<usize> = log
        .lines()
        .filter_map(|entry| {
            let entry = entry.trim_start_matches("ERROR:").trim_start();
            let mut fields = entry.split(|c: char| c == ':' || c == '(');
            let first = fields.next()?.trim().parse::<usize>().ok()?;
            // "file:line" when a second number follows, otherwise "line".
            match fields.next().and_then(|f| f.trim().parse::<usize>().ok()) {
                Some(line) => Some(line),
                None => Some(first),
            }
        })
        .filter(|&line| line > 0)
        .collect();
    lines.sort_unstable();
    lines.dedup();
    lines
}

/// Renders the driver `log` followed by numbered `source` lines.
///
/// When the log names specific lines, only those lines and a little context
/// around them are shown, with `>` marking the offending ones. Otherwise the
/// whole source is numbered.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let source_lines: Vec<&str> = source.lines().collect();
    let width = source_lines.len().max(1).to_string().len();

    let flagged = referenced_lines(log);
    let shown = |n: usize| {
        flagged.is_empty()
            || flagged
                .iter()
                .any(|&f| n + EXCERPT_CONTEXT >= f && n <= f + EXCERPT_CONTEXT)
    };

    let mut out = String::new();
    if !log.is_empty() {
        out.push_str(log.trim_end());
    }
    let mut last_shown = 0;
    for (i, line) in source_lines.iter().enumerate() {
        let n = i + 1;
        if !shown(n) {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        if last_shown != 0 && n > last_shown + 1 {
            out.push_str("...\n");
        } else if last_shown == 0 && !log.is_empty() {
            out.push('\n');
        }
        let marker = if flagged.contains(&n) { '>' } else { ' ' };
        out.push_str(&format!("{marker}{n:>width$}| {line}"));
        last_shown = n;
    }
    out
}

/// Compiles one shader stage; `label` names it in errors.
///
/// # Errors
///
/// Returns `ShaderError::CompileError` carrying the driver log and the
/// relevant source excerpt.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    label: &str,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    let stage = format!("{} {label}", stage_name(shader_type));

    // SAFETY: shader_type is a stage constant; the handle is deleted on
    // every failure path below.
    unsafe {
        let shader = gl
            .create_shader(shader_type)
            .map_err(|log| ShaderError::CompileError {
                stage: stage.clone(),
                log,
            })?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if gl.get_shader_compile_status(shader) {
            return Ok(shader);
        }
        let info_log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        Err(ShaderError::CompileError {
            stage,
            log: format_shader_error(source, &info_log),
        })
    }
}

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

/// Links compiled stages into a program. Stages stay owned by the caller.
///
/// # Errors
///
/// Returns `ShaderError::LinkError` with the driver's log if linking fails.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    stages: &[glow::Shader],
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    // SAFETY: every stage is a live compiled shader; the program is deleted
    // if linking fails.
    unsafe {
        let program = gl.create_program().map_err(ShaderError::LinkError)?;
        for &stage in stages {
            gl.attach_shader(program, stage);
        }
        gl.link_program(program);
        for &stage in stages {
            gl.detach_shader(program, stage);
        }
        if gl.get_program_link_status(program) {
            Ok(program)
        } else {
            let info_log = gl.get_program_info_log(program);
            gl.delete_program(program);
            Err(ShaderError::LinkError(info_log))
        }
    }
}

/// Loads, compiles and links a vertex/fragment pair.
///
/// # Errors
///
/// Returns the first `ShaderError` hit while reading, compiling or linking.
#[allow(unsafe_code)]
pub fn compile_program(
    gl: &glow::Context,
    vertex: &ShaderSource,
    fragment: &ShaderSource,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    let pairs = [
        (glow::VERTEX_SHADER, vertex),
        (glow::FRAGMENT_SHADER, fragment),
    ];
    let mut stages = Vec::with_capacity(pairs.len());
    let compiled = pairs.iter().try_for_each(|&(kind, source)| {
        let text = source.load()?;
        stages.push(compile_shader(gl, kind, &source.to_string(), &text)?);
        Ok::<(), ShaderError>(())
    });
    let result = compiled.and_then(|()| link_program(gl, &stages));

    for stage in stages {
        // SAFETY: each handle came from compile_shader; a linked program
        // keeps its own reference.
        unsafe { gl.delete_shader(stage) };
    }
    result
}
