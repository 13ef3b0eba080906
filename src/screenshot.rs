//! PNG export of a 256x240 frame buffer (feature `screenshot`).

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::ppu::{NES_HEIGHT, NES_WIDTH};

/// Convert packed `0x00RRGGBB` / `0xAARRGGBB` pixels into an RGB image.
pub fn frame_to_image(frame: &[u32]) -> Result<RgbImage, String> {
    if frame.len() != NES_WIDTH * NES_HEIGHT {
        return Err(format!(
            "Frame buffer has {} pixels, expected {}",
            frame.len(),
            NES_WIDTH * NES_HEIGHT
        ));
    }
    Ok(RgbImage::from_fn(NES_WIDTH as u32, NES_HEIGHT as u32, |x, y| {
        let argb = frame[y as usize * NES_WIDTH + x as usize];
        Rgb([(argb >> 16) as u8, (argb >> 8) as u8, argb as u8])
    }))
}

pub fn save_png<P: AsRef<Path>>(frame: &[u32], path: P) -> Result<(), String> {
    let path = path.as_ref();
    frame_to_image(frame)?
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppu::SYSTEM_PALETTE;

    #[test]
    fn unpacks_channels() {
        let mut frame = vec![0u32; NES_WIDTH * NES_HEIGHT];
        frame[1] = SYSTEM_PALETTE[0x16];
        let img = frame_to_image(&frame).expect("size matches");
        let p = SYSTEM_PALETTE[0x16];
        assert_eq!(img.get_pixel(1, 0).0, [(p >> 16) as u8, (p >> 8) as u8, p as u8]);
    }

    #[test]
    fn rejects_wrong_size() {
        assert!(frame_to_image(&[0; 10]).is_err());
    }
}
