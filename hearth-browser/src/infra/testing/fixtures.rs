use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Encode a small solid-colour image in the given container format
pub fn encode_test_image(
    format: ImageFormat,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, image::ImageError> {
    let pixels = RgbImage::from_pixel(width, height, Rgb([200, 120, 40]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(pixels).write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}

/// Catalog body with `count` items, ids `1..=count`, posters `/p{id}.jpg`
pub fn sample_catalog_json(count: usize) -> serde_json::Value {
    serde_json::Value::Array(
        (1..=count)
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "name": format!("Title {id}"),
                    "poster_path": format!("/p{id}.jpg"),
                })
            })
            .collect(),
    )
}
