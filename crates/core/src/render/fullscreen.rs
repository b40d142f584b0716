//! Full-screen quad vertex stage for the blur and combine passes.
//!
//! Corner positions and UVs come from `gl_VertexID`, so no vertex buffer is
//! needed; the draw binds an empty VAO.

use super::shader::ShaderSource;

/// Vertices drawn for the quad as a `TRIANGLE_STRIP`.
pub const FULLSCREEN_VERTEX_COUNT: i32 = 4;

/// GLSL 3.30 core vertex shader covering the viewport with a 4-vertex strip.
///
/// Vertex `i` lands on corner `(i & 1, i >> 1)` of the unit square, giving
/// the strip order bottom-left, bottom-right, top-left, top-right. Draw with:
///
/// ```text
/// gl.draw_arrays(TRIANGLE_STRIP, 0, 4)
/// ```
pub const FULLSCREEN_VERTEX_SHADER: &str = r#"#version 330 core
out vec2 v_uv;
void main() {
    v_uv = vec2(float(gl_VertexID & 1), float(gl_VertexID >> 1));
    gl_Position = vec4(v_uv * 2.0 - 1.0, 0.0, 1.0);
}
"#;

/// The quad stage as a loadable source.
pub fn fullscreen_vertex_source() -> ShaderSource {
    ShaderSource::Embedded {
        name: "fullscreen-quad",
        source: FULLSCREEN_VERTEX_SHADER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_vertex_shader_targets_glsl_330_core() {
        assert!(
            FULLSCREEN_VERTEX_SHADER.starts_with("#version 330 core"),
            "expected GLSL 3.30 core directive in:\n{FULLSCREEN_VERTEX_SHADER}"
        );
    }

    #[test]
    fn fullscreen_vertex_shader_uses_gl_vertex_id() {
        assert!(
            FULLSCREEN_VERTEX_SHADER.contains("gl_VertexID"),
            "expected gl_VertexID usage in:\n{FULLSCREEN_VERTEX_SHADER}"
        );
    }

    #[test]
    fn fullscreen_vertex_shader_outputs_uv_varying() {
        assert!(
            FULLSCREEN_VERTEX_SHADER.contains("out vec2 v_uv"),
            "expected 'out vec2 v_uv' declaration in:\n{FULLSCREEN_VERTEX_SHADER}"
        );
    }

    #[test]
    fn strip_corners_cover_unit_square_counter_clockwise() {
        // Mirrors the shader's corner math.
        let corner = |id: i32| ((id & 1) as f32, (id >> 1) as f32);
        let corners: Vec<_> = (0..FULLSCREEN_VERTEX_COUNT).map(corner).collect();
        assert_eq!(corners, vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);

        let (a, b, c) = (corners[0], corners[1], corners[2]);
        let area = (b.0 - a.0) * (c.1 - a.1) - (c.0 - a.0) * (b.1 - a.1);
        assert!(area > 0.0, "first strip triangle must be front-facing");
    }

    #[test]
    fn embedded_source_loads() {
        let src = fullscreen_vertex_source();
        assert_eq!(src.load().unwrap(), FULLSCREEN_VERTEX_SHADER);
    }
}
