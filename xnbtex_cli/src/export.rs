use crate::error::{Error, Result};
use std::path::Path;
use xnbtex::DecodedImage;

const RAW_EXTENSIONS: [&str; 2] = ["rgba", "raw"];

#[inline]
fn is_raw_output(path: &Path) -> bool {
    path.extension()
        .map(|x| {
            RAW_EXTENSIONS
                .iter()
                .any(|raw| x.eq_ignore_ascii_case(raw))
        })
        .unwrap_or(false)
}

/// Writes bare RGBA8 rows for `.rgba`/`.raw`, otherwise an image whose
/// encoding follows the extension.
pub fn write_image(image: DecodedImage, path: &Path) -> Result<()> {
    if is_raw_output(path) {
        std::fs::write(path, image.data())?;
        return Ok(());
    }

    let (width, height) = (image.width(), image.height());
    match image.into_image() {
        Some(buffer) => Ok(buffer.save(path)?),
        None => Err(Error::IO(std::io::Error::other(format!(
            "pixel buffer does not match {width}x{height}"
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_extensions() {
        assert!(is_raw_output(Path::new("out.rgba")));
        assert!(is_raw_output(Path::new("out.RAW")));
        assert!(!is_raw_output(Path::new("out.png")));
        assert!(!is_raw_output(Path::new("rgba")));
    }

    #[test]
    fn writes_raw_pixels() {
        let block = [0xFF, 0xFF, 0, 0, 0, 0, 0, 0];
        let image = xnbtex::decode(&block, 3, 2, xnbtex::TextureFormat::DXT1).unwrap();
        let path = std::env::temp_dir().join(format!("xnbtex-{}.rgba", std::process::id()));

        write_image(image, &path).unwrap();
        let written = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(written, [0xFF; 24]);
    }
}
