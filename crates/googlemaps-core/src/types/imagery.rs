//! Options for the image-producing services and device geolocation.

use super::travel::wire_enum;

wire_enum! {
    /// Pixel density multiplier of a static map
    pub enum Scale {
        /// Standard resolution (default)
        One => "1",
        /// Double resolution
        Two => "2",
        /// Quadruple resolution, premium plans only
        Four => "4",
    }
}

wire_enum! {
    /// Static map image format
    pub enum ImageFormat {
        /// 8-bit PNG (default)
        Png => "png",
        /// 32-bit PNG
        Png32 => "png32",
        /// GIF
        Gif => "gif",
        /// Progressive JPEG
        Jpg => "jpg",
        /// Non-progressive JPEG
        JpgBaseline => "jpg-baseline",
    }
}

wire_enum! {
    /// Static map type
    pub enum MapType {
        /// Standard road map (default)
        Roadmap => "roadmap",
        /// Satellite imagery
        Satellite => "satellite",
        /// Satellite imagery with road overlay
        Hybrid => "hybrid",
        /// Physical relief
        Terrain => "terrain",
    }
}

wire_enum! {
    /// Mobile radio technology of a geolocating device
    pub enum RadioType {
        /// LTE
        Lte => "lte",
        /// GSM
        Gsm => "gsm",
        /// CDMA
        Cdma => "cdma",
        /// WCDMA
        Wcdma => "wcdma",
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::One
    }
}

impl Default for ImageFormat {
    fn default() -> Self {
        Self::Png
    }
}

impl Default for MapType {
    fn default() -> Self {
        Self::Roadmap
    }
}
