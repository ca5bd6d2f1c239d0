/// Image formats accepted for the home banner, keyed by declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerFormat {
    Jpeg,
    Png,
    Webp,
    Gif,
    Bmp,
}

impl BannerFormat {
    pub const ALL: [Self; 5] =
        [Self::Jpeg, Self::Png, Self::Webp, Self::Gif, Self::Bmp];

    /// Resolve a `content-type` header value to a supported image format.
    ///
    /// Parameters after `;` are ignored and the comparison is
    /// case-insensitive. Returns `None` for anything that is not one of the
    /// supported image types.
    pub fn from_content_type(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            "image/gif" => Some(Self::Gif),
            "image/bmp" | "image/x-ms-bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }
}

impl std::fmt::Display for BannerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime_type())
    }
}
