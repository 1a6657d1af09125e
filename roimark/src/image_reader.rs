use roimark_domain::{to_rm, RmResult, ViewImage};
use std::path::Path;
use tracing::debug;

pub const SUPPORTED_EXTENSIONS: [&str; 10] = [
    ".PNG", ".png", ".JPG", ".jpg", ".JPEG", ".jpeg", ".TIF", ".tif", ".TIFF", ".tiff",
];

/// picker-style extension filter
pub fn is_supported(path: &Path) -> bool {
    match path.file_name().and_then(|fname| fname.to_str()) {
        Some(fname) => SUPPORTED_EXTENSIONS.iter().any(|ext| fname.ends_with(ext)),
        None => false,
    }
}

/// decode the reference image to rgb, the format the session blits
pub fn read_image(path: &Path) -> RmResult<ViewImage> {
    debug!("reading image {path:?}");
    image::open(path).map(|im| im.into_rgb8()).map_err(to_rm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("some/folder/reference.jpg")));
        assert!(is_supported(Path::new("reference.PNG")));
        assert!(!is_supported(Path::new("reference.bmp")));
        assert!(!is_supported(Path::new("some/folder/")));
    }

    #[test]
    fn test_read_image_missing() {
        assert!(read_image(Path::new("surely/not/an/image.png")).is_err());
    }
}
