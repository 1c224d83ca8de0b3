use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const SURFACE_FORMAT_DXT1: i32 = 4;
pub const SURFACE_FORMAT_DXT3: i32 = 5;
pub const SURFACE_FORMAT_DXT5: i32 = 6;

/// Block compressed surface formats understood by the decoder.
///
/// Any other xna surface format tag is kept as `Unknown` so the caller
/// can report it back.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum TextureFormat {
    /// BC1
    DXT1,
    /// BC2
    DXT3,
    /// BC3
    DXT5,
    Unknown(i32),
}

impl From<i32> for TextureFormat {
    fn from(value: i32) -> Self {
        match value {
            SURFACE_FORMAT_DXT1 => TextureFormat::DXT1,
            SURFACE_FORMAT_DXT3 => TextureFormat::DXT3,
            SURFACE_FORMAT_DXT5 => TextureFormat::DXT5,
            _ => TextureFormat::Unknown(value),
        }
    }
}

impl FromStr for TextureFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dxt1" | "bc1" => Ok(TextureFormat::DXT1),
            "dxt3" | "bc2" => Ok(TextureFormat::DXT3),
            "dxt5" | "bc3" => Ok(TextureFormat::DXT5),
            _ => Err(()),
        }
    }
}

impl TextureFormat {
    pub const BLOCK_WIDTH: u32 = 4;
    pub const BLOCK_HEIGHT: u32 = 4;
    pub const TEXELS_PER_BLOCK: usize = 16;

    #[inline]
    pub fn surface_format(&self) -> i32 {
        match self {
            TextureFormat::DXT1 => SURFACE_FORMAT_DXT1,
            TextureFormat::DXT3 => SURFACE_FORMAT_DXT3,
            TextureFormat::DXT5 => SURFACE_FORMAT_DXT5,
            TextureFormat::Unknown(tag) => *tag,
        }
    }

    /// encoded bytes per 4x4 block, `None` for unknown formats
    #[inline]
    pub fn block_size(&self) -> Option<usize> {
        match self {
            TextureFormat::DXT1 => Some(8),
            TextureFormat::DXT3 | TextureFormat::DXT5 => Some(16),
            TextureFormat::Unknown(_) => None,
        }
    }

    /// number of compressed bytes a `width` x `height` texture occupies
    pub fn data_size(&self, width: u32, height: u32) -> Option<usize> {
        let (blocks_x, blocks_y) = block_count(width, height);
        (blocks_x as usize)
            .checked_mul(blocks_y as usize)?
            .checked_mul(self.block_size()?)
    }
}

#[inline]
pub(crate) fn block_count(width: u32, height: u32) -> (u32, u32) {
    (
        width.div_ceil(TextureFormat::BLOCK_WIDTH),
        height.div_ceil(TextureFormat::BLOCK_HEIGHT),
    )
}

impl Display for TextureFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureFormat::DXT1 => f.write_str("DXT1"),
            TextureFormat::DXT3 => f.write_str("DXT3"),
            TextureFormat::DXT5 => f.write_str("DXT5"),
            TextureFormat::Unknown(tag) => write!(f, "Unknown({tag})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4, TextureFormat::DXT1)]
    #[case(5, TextureFormat::DXT3)]
    #[case(6, TextureFormat::DXT5)]
    #[case(0, TextureFormat::Unknown(0))]
    #[case(7, TextureFormat::Unknown(7))]
    fn surface_format_tags(#[case] tag: i32, #[case] format: TextureFormat) {
        assert_eq!(TextureFormat::from(tag), format);
        assert_eq!(format.surface_format(), tag);
    }

    #[rstest]
    #[case("dxt1", TextureFormat::DXT1)]
    #[case("BC1", TextureFormat::DXT1)]
    #[case("bc2", TextureFormat::DXT3)]
    #[case("Dxt5", TextureFormat::DXT5)]
    fn parses_names(#[case] name: &str, #[case] format: TextureFormat) {
        assert_eq!(name.parse::<TextureFormat>(), Ok(format));
    }

    #[test]
    fn rejects_other_names() {
        assert!("bc7".parse::<TextureFormat>().is_err());
    }

    #[rstest]
    #[case(TextureFormat::DXT1, 4, 4, Some(8))]
    #[case(TextureFormat::DXT1, 5, 5, Some(32))]
    #[case(TextureFormat::DXT3, 8, 8, Some(64))]
    #[case(TextureFormat::DXT5, 1, 9, Some(48))]
    #[case(TextureFormat::Unknown(0), 4, 4, None)]
    fn data_size_rounds_up_to_blocks(
        #[case] format: TextureFormat,
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(format.data_size(width, height), expected);
    }
}
