use {
    crate::{config::constants::ImageConfig, data::ImageData, error::VisionError},
    base64::{Engine as _, engine::general_purpose::STANDARD},
    image::{codecs::jpeg::JpegEncoder, imageops::FilterType},
};

/// Chart screenshot re-encoded for upload
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub data: ImageData,
    pub width: u32,
    pub height: u32,
    pub encoded_len: usize,
}

/// Decodes any supported format, caps the longer side at `max_dimension`
/// (aspect ratio kept) and re-encodes as JPEG.
pub fn normalize_image(bytes: &[u8], config: &ImageConfig) -> Result<NormalizedImage, VisionError> {
    if bytes.is_empty() {
        return Err(VisionError::InputInvalid("empty file".into()));
    }

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| VisionError::InputInvalid(e.to_string()))?;

    let longest = decoded.width().max(decoded.height());
    let resized = if longest > config.max_dimension {
        decoded.resize(config.max_dimension, config.max_dimension, FilterType::Triangle)
    } else {
        decoded
    };

    // JPEG has no alpha channel
    let rgb = resized.to_rgb8();
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, config.jpeg_quality)
        .encode_image(&rgb)
        .map_err(|e| VisionError::InputInvalid(format!("re-encoding failed: {}", e)))?;

    Ok(NormalizedImage {
        width: rgb.width(),
        height: rgb.height(),
        encoded_len: encoded.len(),
        data: ImageData {
            mime_type: config.mime_type.to_string(),
            base64: STANDARD.encode(&encoded),
        },
    })
}
