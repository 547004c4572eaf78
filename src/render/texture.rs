use image::RgbaImage;
use image::imageops::FilterType;

/// A presentable copy of an image, optionally resized on upload.
///
/// Tracks the source revision it was uploaded from so unchanged sources are not re-uploaded.
#[derive(Clone, Debug)]
pub struct Texture {
    image: RgbaImage,
    size: Option<(u32, u32)>,
    revision: Option<u64>,
    uploads: u64,
}

impl Texture {
    /// Empty texture that uploads at the source's native size.
    pub fn native() -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            size: None,
            revision: None,
            uploads: 0,
        }
    }

    /// Empty texture that resizes every upload to `width x height`.
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            size: Some((width, height)),
            ..Self::native()
        }
    }

    /// Upload `source` once, resized to `width x height`.
    pub fn from_image_resized(source: &RgbaImage, width: u32, height: u32) -> Self {
        let mut tex = Self::sized(width, height);
        tex.upload(source, 0);
        tex
    }

    /// Last uploaded pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Number of uploads performed so far.
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    /// Re-upload when `revision` differs from the last uploaded one. Returns whether it uploaded.
    pub fn sync(&mut self, source: &RgbaImage, revision: u64) -> bool {
        if self.revision == Some(revision) {
            return false;
        }
        self.upload(source, revision);
        true
    }

    fn upload(&mut self, source: &RgbaImage, revision: u64) {
        match self.size {
            Some((w, h)) if (w, h) != source.dimensions() && w > 0 && h > 0 => {
                self.image = image::imageops::resize(source, w, h, FilterType::Triangle);
            }
            _ => self.image.clone_from(source),
        }
        self.revision = Some(revision);
        self.uploads += 1;
    }
}
