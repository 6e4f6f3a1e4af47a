use bevy::prelude::Image;

/// Pixel size of a height-map image. The pixel values themselves are not read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightMapDimensions {
    pub width: u32,
    pub height: u32,
}

impl HeightMapDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_image(image: &Image) -> Self {
        let size = image.texture_descriptor.size;
        Self::new(size.width, size.height)
    }

    pub fn as_extent(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}
