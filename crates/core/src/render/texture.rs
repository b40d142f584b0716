//! Texture allocation and image upload.
//!
//! Render-target attachments are allocated empty through [`TextureConfig`].
//! Decoded images are uploaded as mipmapped, repeating 2D textures or as
//! cubemaps.

use crate::assets::DecodedImage;

/// Configuration for an empty render-target texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureConfig {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// GL internal format (e.g. `glow::RGBA8`).
    pub internal_format: u32,
    /// GL texture filter mode (e.g. `glow::LINEAR`).
    pub filter: u32,
}

impl TextureConfig {
    /// An RGBA8 color attachment with LINEAR filtering, so blur taps
    /// between texels interpolate.
    pub fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            internal_format: glow::RGBA8,
            filter: glow::LINEAR,
        }
    }

    /// A 24-bit depth attachment, sampled directly by the combine pass.
    pub fn depth24(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            internal_format: glow::DEPTH_COMPONENT24,
            filter: glow::NEAREST,
        }
    }

    /// The `(format, type)` pair `tex_image_2d` expects for this internal
    /// format.
    pub fn upload_format(&self) -> (u32, u32) {
        upload_format(self.internal_format)
    }
}

/// Returns the GL `(format, type)` pair matching an internal format:
/// depth attachments or RGBA8 color.
pub fn upload_format(internal_format: u32) -> (u32, u32) {
    if internal_format == glow::DEPTH_COMPONENT24 {
        (glow::DEPTH_COMPONENT, glow::UNSIGNED_INT)
    } else {
        (glow::RGBA, glow::UNSIGNED_BYTE)
    }
}

/// Creates an empty texture from the given configuration.
///
/// Sets wrap mode to `CLAMP_TO_EDGE` on both axes, applies the specified
/// filter for both min and mag, and allocates storage at the given size.
///
/// # Errors
///
/// Returns an error string if the GL context fails to create the texture.
#[allow(unsafe_code)]
pub fn create_texture(gl: &glow::Context, config: &TextureConfig) -> Result<glow::Texture, String> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. We create, configure,
    // and allocate a texture using valid parameters derived from TextureConfig.
    let texture = unsafe { gl.create_texture()? };

    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        set_params(gl, glow::TEXTURE_2D, glow::CLAMP_TO_EDGE, config.filter, config.filter);

        let (format, ty) = config.upload_format();
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            config.internal_format as i32,
            config.width as i32,
            config.height as i32,
            0,
            format,
            ty,
            glow::PixelUnpackData::Slice(None),
        );

        gl.bind_texture(glow::TEXTURE_2D, None);
    }

    Ok(texture)
}

/// Uploads an RGBA8 image as a repeating, trilinear-filtered 2D texture.
///
/// # Errors
///
/// Returns an error string if the GL context fails to create the texture.
#[allow(unsafe_code)]
pub fn upload_texture_2d(gl: &glow::Context, image: &DecodedImage) -> Result<glow::Texture, String> {
    use glow::HasContext;

    // SAFETY: the pixel slice holds width * height RGBA8 texels.
    let texture = unsafe { gl.create_texture()? };
    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        set_params(
            gl,
            glow::TEXTURE_2D,
            glow::REPEAT,
            glow::LINEAR_MIPMAP_LINEAR,
            glow::LINEAR,
        );
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            image.width as i32,
            image.height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(&image.pixels)),
        );
        gl.generate_mipmap(glow::TEXTURE_2D);
        gl.bind_texture(glow::TEXTURE_2D, None);
    }
    Ok(texture)
}

/// Uploads six faces (+X, -X, +Y, -Y, +Z, -Z) as a cubemap.
///
/// # Errors
///
/// Returns an error string if the GL context fails to create the texture.
#[allow(unsafe_code)]
pub fn upload_cubemap(gl: &glow::Context, faces: &[DecodedImage; 6]) -> Result<glow::Texture, String> {
    use glow::HasContext;

    // SAFETY: each face slice holds width * height RGBA8 texels.
    let texture = unsafe { gl.create_texture()? };
    unsafe {
        gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(texture));
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        for (i, face) in faces.iter().enumerate() {
            gl.tex_image_2d(
                glow::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32,
                0,
                glow::RGBA8 as i32,
                face.width as i32,
                face.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(&face.pixels)),
            );
        }
        set_params(
            gl,
            glow::TEXTURE_CUBE_MAP,
            glow::CLAMP_TO_EDGE,
            glow::LINEAR,
            glow::LINEAR,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_CUBE_MAP,
            glow::TEXTURE_WRAP_R,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.bind_texture(glow::TEXTURE_CUBE_MAP, None);
    }
    Ok(texture)
}

#[allow(unsafe_code)]
unsafe fn set_params(gl: &glow::Context, target: u32, wrap: u32, min: u32, mag: u32) {
    use glow::HasContext;

    gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_S, wrap as i32);
    gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_T, wrap as i32);
    gl.tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, min as i32);
    gl.tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, mag as i32);
}
