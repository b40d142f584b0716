//! Asset locations and image decoding.
//!
//! Decoding is CPU-only and independent of the GL context; the `render`
//! module uploads the resulting [`DecodedImage`]s.

use std::path::{Path, PathBuf};

use crate::error::AssetError;

/// Cubemap face file stems in GL face order (+X, -X, +Y, -Y, +Z, -Z).
pub const CUBEMAP_FACES: [&str; 6] = ["px", "nx", "py", "ny", "pz", "nz"];

/// Distortion map for the water surface.
pub const DUDV_TEXTURE: &str = "dudv.jpg";

/// Tile texture for the pool walls and floor.
pub const POOL_TEXTURE: &str = "pool.jpg";

/// Resolves asset file names against a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/shaders/<file>`
    pub fn shader(&self, file: &str) -> PathBuf {
        self.root.join("shaders").join(file)
    }

    /// `<root>/textures/<file>`
    pub fn texture(&self, file: &str) -> PathBuf {
        self.root.join("textures").join(file)
    }

    /// The six cubemap face images in upload order.
    pub fn cubemap_faces(&self) -> [PathBuf; 6] {
        CUBEMAP_FACES.map(|stem| self.texture(&format!("{stem}.jpg")))
    }
}

/// A decoded image as tightly packed RGBA8 rows, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// A single opaque pixel, used when a texture fails to load.
    pub fn placeholder(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }
}

/// Decodes any PNG or JPEG file into RGBA8.
pub fn decode_image(path: &Path) -> Result<DecodedImage, AssetError> {
    let img = image::open(path).map_err(|e| AssetError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("decoded {} ({width}x{height})", path.display());
    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Decodes six cubemap faces and checks they are square and equally sized.
///
/// The first face sets the expected edge length.
pub fn decode_cubemap(paths: &[PathBuf; 6]) -> Result<[DecodedImage; 6], AssetError> {
    let mut faces = Vec::with_capacity(6);
    let mut expected = None;
    for path in paths {
        let face = decode_image(path)?;
        let edge = *expected.get_or_insert(face.width);
        if face.width != edge || face.height != edge {
            return Err(AssetError::CubemapFaceMismatch {
                path: path.clone(),
                width: face.width,
                height: face.height,
                expected: edge,
            });
        }
        faces.push(face);
    }
    faces.try_into().map_err(|_: Vec<DecodedImage>| AssetError::Decode {
        path: paths[0].clone(),
        message: "cubemap needs exactly six faces".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn asset_paths_join_subdirectories() {
        let paths = AssetPaths::new("assets");
        assert_eq!(
            paths.shader("water.frag"),
            Path::new("assets/shaders/water.frag")
        );
        assert_eq!(paths.texture(DUDV_TEXTURE), Path::new("assets/textures/dudv.jpg"));
    }

    #[test]
    fn cubemap_faces_follow_gl_face_order() {
        let faces = AssetPaths::new("a").cubemap_faces();
        let names: Vec<_> = faces
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["px.jpg", "nx.jpg", "py.jpg", "ny.jpg", "pz.jpg", "nz.jpg"]);
    }

    #[test]
    fn decode_image_produces_rgba8() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "t.png", 3, 2);
        let img = decode_image(&path).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.pixels.len(), 3 * 2 * 4);
        assert_eq!(&img.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn decode_image_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_image(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn decode_cubemap_accepts_matching_square_faces() {
        let dir = tempfile::tempdir().unwrap();
        let paths = CUBEMAP_FACES.map(|s| write_png(dir.path(), &format!("{s}.png"), 4, 4));
        let faces = decode_cubemap(&paths).unwrap();
        assert!(faces.iter().all(|f| f.width == 4 && f.height == 4));
    }

    #[test]
    fn decode_cubemap_rejects_mismatched_face() {
        let dir = tempfile::tempdir().unwrap();
        let paths = CUBEMAP_FACES.map(|s| {
            let size = if s == "pz" { 8 } else { 4 };
            write_png(dir.path(), &format!("{s}.png"), size, size)
        });
        match decode_cubemap(&paths) {
            Err(AssetError::CubemapFaceMismatch { path, expected, .. }) => {
                assert!(path.ends_with("pz.png"));
                assert_eq!(expected, 4);
            }
            other => panic!("expected face mismatch, got {other:?}"),
        }
    }

    #[test]
    fn decode_cubemap_rejects_non_square_face() {
        let dir = tempfile::tempdir().unwrap();
        let paths = CUBEMAP_FACES.map(|s| {
            let height = if s == "px" { 4 } else { 2 };
            write_png(dir.path(), &format!("{s}.png"), 4, height)
        });
        assert!(matches!(
            decode_cubemap(&paths),
            Err(AssetError::CubemapFaceMismatch { .. })
        ));
    }

    #[test]
    fn placeholder_is_one_pixel() {
        let img = DecodedImage::placeholder([255, 0, 255, 255]);
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(img.pixels, vec![255, 0, 255, 255]);
    }
}
