//! Tests for reading images from disk and writing storyboards out.

use framecast::{
    FramecastErrorKind, ImageRef, MediaErrorKind, Scene, StoryboardResult, image_from_path,
    mime_for_path, write_storyboard,
};
use std::fs;
use std::path::Path;

#[test]
fn test_mime_from_extension() -> anyhow::Result<()> {
    assert_eq!(mime_for_path(Path::new("ref.PNG")), Some("image/png"));
    assert_eq!(mime_for_path(Path::new("a/b/photo.jpeg")), Some("image/jpeg"));
    assert_eq!(mime_for_path(Path::new("notes.txt")), None);
    assert_eq!(mime_for_path(Path::new("no_extension")), None);
    Ok(())
}

#[test]
fn test_image_from_path_reads_bytes() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("anchor.webp");
    fs::write(&path, [1u8, 2, 3])?;

    let image = image_from_path(&path)?;
    assert_eq!(image, ImageRef::inline("image/webp", vec![1, 2, 3]));
    Ok(())
}

#[test]
fn test_image_from_path_rejects_bad_files() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let text = dir.path().join("idea.txt");
    fs::write(&text, "hello")?;
    let err = image_from_path(&text).unwrap_err();
    assert!(matches!(
        err.kind(),
        FramecastErrorKind::Media(e) if matches!(e.kind, MediaErrorKind::NotAnImage(_))
    ));

    let empty = dir.path().join("empty.png");
    fs::write(&empty, [0u8; 0])?;
    let err = image_from_path(&empty).unwrap_err();
    assert!(matches!(err.kind(), FramecastErrorKind::Media(e) if e.kind == MediaErrorKind::Empty));

    let missing = dir.path().join("missing.png");
    let err = image_from_path(&missing).unwrap_err();
    assert!(matches!(
        err.kind(),
        FramecastErrorKind::Media(e) if matches!(e.kind, MediaErrorKind::Fetch { .. })
    ));
    Ok(())
}

#[test]
fn test_write_storyboard_outputs() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("run");
    let storyboard = StoryboardResult::new(vec![
        Scene::new("A", "a", "Scene 1:A").with_image(ImageRef::inline("image/jpeg", vec![9, 9])),
        Scene::new("B", "b", "Scene 2:B")
            .with_image(ImageRef::Url("https://cdn.example.com/b.png".to_string())),
        Scene::new("C", "c", "Scene 3:C"),
    ]);

    let written = write_storyboard(&out, &storyboard)?;

    assert_eq!(written.len(), 3);
    assert_eq!(
        fs::read_to_string(out.join("storyboard.txt"))?,
        "Scene 1:A\n\nScene 2:B\n\nScene 3:C"
    );
    assert_eq!(fs::read(out.join("scene-1.jpg"))?, vec![9, 9]);
    assert_eq!(
        fs::read_to_string(out.join("scene-2.url"))?,
        "https://cdn.example.com/b.png"
    );
    assert!(!out.join("scene-3.png").exists());
    Ok(())
}
