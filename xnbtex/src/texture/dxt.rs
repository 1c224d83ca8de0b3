//! Decoding of DXT (S3TC) compressed blocks
//!
//! Every block covers 4x4 texels. DXT1 stores only color, DXT3 prepends
//! explicit 4-bit alpha, DXT5 prepends interpolated 3-bit alpha.
//!
//! # Related Links
//! * <https://www.khronos.org/registry/OpenGL/extensions/EXT/EXT_texture_compression_s3tc.txt> - Description of the DXT compression OpenGL extensions.
//!
//! Interpolation truncates instead of rounding and the 565 expansion uses the
//! xna content pipeline formula, so the output matches textures exported by
//! the xna tooling byte for byte.

use crate::error::Result;
use crate::reader::BlockCursor;
use crate::texture::TextureFormat;

pub type Rgb = [u8; 3];
pub type Rgba = [u8; 4];

/// 16 decoded texels in row major order
pub type Block = [Rgba; TextureFormat::TEXELS_PER_BLOCK];

macro_rules! to_bit8 {
    (5,$val:expr) => {{
        let val = u32::from($val) * 0xFF + 16;
        ((val / 32 + val) / 32) as u8
    }};
    (6,$val:expr) => {{
        let val = u32::from($val) * 0xFF + 32;
        ((val / 64 + val) / 64) as u8
    }};
}

/// decodes a 5-bit R, 6-bit G, 5-bit B 16-bit packed color value into 8-bit RGB
pub fn enc565_decode(value: u16) -> Rgb {
    let red = (value >> 11) & 0x1F;
    let green = (value >> 5) & 0x3F;
    let blue = value & 0x1F;
    [to_bit8!(5, red), to_bit8!(6, green), to_bit8!(5, blue)]
}

/// the 8 byte color part shared by every dxt format
#[derive(Copy, Clone, Debug)]
struct ColorBlock {
    color0: u16,
    color1: u16,
    indices: u32,
}

impl ColorBlock {
    #[inline]
    fn read(cursor: &mut BlockCursor) -> Result<ColorBlock> {
        Ok(ColorBlock {
            color0: cursor.get_u16_le()?,
            color1: cursor.get_u16_le()?,
            indices: cursor.get_u32_le()?,
        })
    }

    /// `punch_through` enables the three color + transparent black mode when
    /// `color0 <= color1`. Only DXT1 uses it.
    fn decode(&self, punch_through: bool) -> Block {
        let c0 = enc565_decode(self.color0);
        let c1 = enc565_decode(self.color1);

        let mut palette = [[0, 0, 0, u8::MAX]; 4];
        palette[0][..3].copy_from_slice(&c0);
        palette[1][..3].copy_from_slice(&c1);

        if self.color0 > self.color1 || !punch_through {
            for i in 0..3 {
                palette[2][i] = ((u16::from(c0[i]) * 2 + u16::from(c1[i])) / 3) as u8;
                palette[3][i] = ((u16::from(c0[i]) + u16::from(c1[i]) * 2) / 3) as u8;
            }
        } else {
            for i in 0..3 {
                palette[2][i] = ((u16::from(c0[i]) + u16::from(c1[i])) / 2) as u8;
            }
            palette[3] = [0, 0, 0, 0];
        }

        let mut block = [[0u8; 4]; TextureFormat::TEXELS_PER_BLOCK];
        for (i, texel) in block.iter_mut().enumerate() {
            *texel = palette[(self.indices >> (i * 2)) as usize & 3];
        }
        block
    }
}

/// Constructs the DXT5 alpha lookup table from the two alpha entries
/// if alpha0 > alpha1, constructs a table of [a0, a1, 6 linearly interpolated values from a0 to a1]
/// if alpha0 <= alpha1, constructs a table of [a0, a1, 4 linearly interpolated values from a0 to a1, 0, 0xFF]
pub fn alpha_table_dxt5(alpha0: u8, alpha1: u8) -> [u8; 8] {
    let mut table = [alpha0, alpha1, 0, 0, 0, 0, 0, 0xFF];
    if alpha0 > alpha1 {
        for i in 2..8u16 {
            table[i as usize] =
                (((8 - i) * u16::from(alpha0) + (i - 1) * u16::from(alpha1)) / 7) as u8;
        }
    } else {
        for i in 2..6u16 {
            table[i as usize] =
                (((6 - i) * u16::from(alpha0) + (i - 1) * u16::from(alpha1)) / 5) as u8;
        }
    }
    table
}

/// Decodes an 8-byte block of dxt1 data
pub fn decode_dxt1_block(cursor: &mut BlockCursor) -> Result<Block> {
    Ok(ColorBlock::read(cursor)?.decode(true))
}

/// Decodes a 16-byte block of dxt3 data
pub fn decode_dxt3_block(cursor: &mut BlockCursor) -> Result<Block> {
    let alpha = cursor.get_array::<8>()?;
    let mut block = ColorBlock::read(cursor)?.decode(false);

    // texel i sits in the low nibble of byte i / 2 when i is even
    for (i, texel) in block.iter_mut().enumerate() {
        let byte = alpha[i / 2];
        let nibble = if i % 2 == 0 { byte & 0x0F } else { byte >> 4 };
        texel[3] = nibble | (nibble << 4);
    }
    Ok(block)
}

/// Decodes a 16-byte block of dxt5 data
pub fn decode_dxt5_block(cursor: &mut BlockCursor) -> Result<Block> {
    let alpha0 = cursor.get_u8()?;
    let alpha1 = cursor.get_u8()?;
    let alpha_indices = cursor.get_u48_le()?;
    let mut block = ColorBlock::read(cursor)?.decode(false);

    let alphas = alpha_table_dxt5(alpha0, alpha1);
    for (i, texel) in block.iter_mut().enumerate() {
        texel[3] = alphas[(alpha_indices >> (i * 3)) as usize & 7];
    }
    Ok(block)
}
