//! Reading reference images from disk and writing storyboards out.

use framecast_core::{ImageRef, StoryboardResult};
use framecast_error::{FramecastResult, MediaError, MediaErrorKind};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Image mime type for a file extension, if it is one we recognise.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Load an image file as an inline reference, inferring the mime type from
/// the extension.
pub fn image_from_path(path: &Path) -> FramecastResult<ImageRef> {
    let mime = mime_for_path(path).ok_or_else(|| {
        MediaError::new(MediaErrorKind::NotAnImage(path.display().to_string()))
    })?;
    let bytes = fs::read(path).map_err(|e| {
        MediaError::new(MediaErrorKind::Fetch {
            url: path.display().to_string(),
            message: e.to_string(),
        })
    })?;
    if bytes.is_empty() {
        return Err(MediaError::new(MediaErrorKind::Empty).into());
    }
    debug!(path = %path.display(), mime, bytes = bytes.len(), "Loaded reference image");
    Ok(ImageRef::inline(mime, bytes))
}

/// Write `storyboard.txt` and one file per scene image into `dir`.
///
/// Inline images are written as `scene-<n>.<ext>`; remote locators and provider
/// file handles as `scene-<n>.url` holding the address. Scenes without an image
/// are skipped. Returns the paths written.
pub fn write_storyboard(dir: &Path, storyboard: &StoryboardResult) -> std::io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let script = dir.join("storyboard.txt");
    fs::write(&script, storyboard.copy_ready_prompt())?;
    written.push(script);

    for (i, scene) in storyboard.scenes().iter().enumerate() {
        let Some(image) = scene.image_url() else {
            continue;
        };
        let path = match image {
            ImageRef::Inline { data, .. } => {
                let path = dir.join(format!("scene-{}.{}", i + 1, image.file_extension()));
                fs::write(&path, data)?;
                path
            }
            ImageRef::Url(_) | ImageRef::FileHandle { .. } => {
                let path = dir.join(format!("scene-{}.url", i + 1));
                fs::write(&path, image.display_url())?;
                path
            }
        };
        written.push(path);
    }

    Ok(written)
}
