use eframe::egui::ColorImage;
use tracing::warn;

/// Downloads and decodes a template thumbnail. Blocking; run it off the UI thread.
pub fn fetch_thumbnail(url: &str) -> Option<ColorImage> {
    let bytes = match reqwest::blocking::get(url).and_then(|r| r.error_for_status()?.bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(%url, "thumbnail fetch failed: {}", e);
            return None;
        }
    };
    decode_thumbnail(&bytes)
}

/// Decodes any supported image into an unmultiplied RGBA egui image.
pub fn decode_thumbnail(bytes: &[u8]) -> Option<ColorImage> {
    let img = match image::load_from_memory(bytes) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            warn!("thumbnail decode failed: {}", e);
            return None;
        }
    };
    let size = [img.width() as usize, img.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(size, &img))
}
