//! Output size selection for Ark image models.

use framecast_config::ImageSizePreset;
use framecast_core::AspectRatio;

/// Pixel size string for an Ark image request.
///
/// Presets win over the aspect ratio. Text-to-image models without a preset use
/// `1024x1024`; other models size from the aspect ratio when `aspect_ratio` is
/// given and fall back to `2048x2048` otherwise.
///
/// ```
/// use framecast_config::ImageSizePreset;
/// use framecast_core::AspectRatio;
/// use framecast_models::ark_image_size;
///
/// assert_eq!(ark_image_size(ImageSizePreset::FourK, Some(AspectRatio::Ratio16x9), false), "4096x4096");
/// assert_eq!(ark_image_size(ImageSizePreset::Auto, Some(AspectRatio::Ratio9x16), false), "1440x2560");
/// assert_eq!(ark_image_size(ImageSizePreset::Auto, Some(AspectRatio::Ratio9x16), true), "1024x1024");
/// assert_eq!(ark_image_size(ImageSizePreset::Auto, None, false), "2048x2048");
/// ```
pub fn ark_image_size(
    preset: ImageSizePreset,
    aspect_ratio: Option<AspectRatio>,
    text_to_image_model: bool,
) -> &'static str {
    match preset {
        ImageSizePreset::TwoK => return "2048x2048",
        ImageSizePreset::FourK => return "4096x4096",
        ImageSizePreset::Auto => {}
    }
    if text_to_image_model {
        return "1024x1024";
    }
    match aspect_ratio {
        Some(AspectRatio::Ratio16x9) => "2560x1440",
        Some(AspectRatio::Ratio9x16) => "1440x2560",
        Some(AspectRatio::Ratio1x1) => "2048x2048",
        Some(AspectRatio::Ratio4x3) => "2304x1728",
        Some(AspectRatio::Ratio3x4) => "1728x2304",
        Some(AspectRatio::Ratio3x2) => "2496x1664",
        Some(AspectRatio::Ratio2x3) => "1664x2496",
        Some(AspectRatio::Ratio21x9) => "3024x1296",
        None => "2048x2048",
    }
}
