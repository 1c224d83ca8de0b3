use crate::error::{Error, Result, err_end_of_data};
use crate::reader::BlockCursor;
use crate::texture::dxt::{self, Block, Rgba};
use crate::texture::format::{TextureFormat, block_count};
#[cfg(feature = "image")]
use image::{ImageBuffer, Rgba as ImageRgba};
use log::{debug, trace};

const BYTES_PER_PIXEL: usize = 4;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TextureAttribute {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

impl TextureAttribute {
    #[inline]
    pub fn new(width: u32, height: u32, format: TextureFormat) -> TextureAttribute {
        TextureAttribute {
            width,
            height,
            format,
        }
    }

    /// blocks per row and per column, partial edge blocks included
    #[inline]
    pub fn block_count(&self) -> (u32, u32) {
        block_count(self.width, self.height)
    }

    /// compressed bytes the texture needs, `None` if the format is unknown
    /// or the size does not fit in memory
    #[inline]
    pub fn data_size(&self) -> Option<usize> {
        self.format.data_size(self.width, self.height)
    }
}

#[derive(Copy, Clone, Default, Debug)]
pub struct DecodeOptions {
    /// Decode block rows on the rayon thread pool.
    ///
    /// Ignored unless the `rayon` feature is enabled.
    pub parallel: bool,
}

/// Compressed texture data together with the metadata the container declared.
#[derive(Clone)]
pub struct Texture<T> {
    pub attr: TextureAttribute,
    data: T,
}

impl<T: AsRef<[u8]>> Texture<T> {
    #[inline]
    pub fn new(attr: TextureAttribute, data: T) -> Texture<T> {
        Texture { attr, data }
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.data
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    #[inline]
    pub fn decode(&self) -> Result<DecodedImage> {
        self.decode_with(&DecodeOptions::default())
    }

    /// Decodes every block into a linear RGBA8 image.
    ///
    /// The input is validated up front, so on error no pixels are produced.
    #[cfg_attr(not(feature = "rayon"), allow(unused_variables))]
    pub fn decode_with(&self, options: &DecodeOptions) -> Result<DecodedImage> {
        let TextureAttribute {
            width,
            height,
            format,
        } = self.attr;

        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let Some(block_size) = format.block_size() else {
            return Err(Error::UnsupportedFormat(format.surface_format()));
        };

        let invalid_dimensions = || Error::InvalidDimensions { width, height };
        let data_size = self.attr.data_size().ok_or_else(invalid_dimensions)?;
        let image_size = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(invalid_dimensions)?;

        let data = self.data.as_ref();
        if data.len() < data_size {
            return Err(err_end_of_data(data_size, data.len()));
        }

        let (blocks_x, blocks_y) = self.attr.block_count();
        debug!(
            "decode {format} {width}x{height}, {blocks_x}x{blocks_y} blocks, {data_size} bytes"
        );

        let source = &data[..data_size];
        let source_row_size = block_size * blocks_x as usize;
        // four pixel rows per block row, the last band may be shorter
        let dest_row_size = width as usize * BYTES_PER_PIXEL * TextureFormat::BLOCK_HEIGHT as usize;
        let mut pixels = vec![0u8; image_size];

        #[cfg(feature = "rayon")]
        if options.parallel {
            use rayon::prelude::*;

            pixels
                .par_chunks_mut(dest_row_size)
                .zip(source.par_chunks_exact(source_row_size))
                .enumerate()
                .try_for_each(|(block_y, (dest, row))| {
                    trace!("decode block row {block_y}");
                    decode_block_row(format, &mut BlockCursor::new(row), dest, width as usize)
                })?;

            return Ok(DecodedImage::new(width, height, pixels));
        }

        let mut cursor = BlockCursor::new(source);
        for (block_y, dest) in pixels.chunks_mut(dest_row_size).enumerate() {
            trace!("decode block row {block_y} at {}", cursor.pos());
            decode_block_row(format, &mut cursor, dest, width as usize)?;
        }

        Ok(DecodedImage::new(width, height, pixels))
    }
}

#[inline]
fn decode_block(format: TextureFormat, cursor: &mut BlockCursor) -> Result<Block> {
    match format {
        TextureFormat::DXT1 => dxt::decode_dxt1_block(cursor),
        TextureFormat::DXT3 => dxt::decode_dxt3_block(cursor),
        TextureFormat::DXT5 => dxt::decode_dxt5_block(cursor),
        TextureFormat::Unknown(tag) => Err(Error::UnsupportedFormat(tag)),
    }
}

/// Decodes one row of blocks into `dest`, a band of up to four pixel rows.
/// Texels past the right or bottom edge are dropped.
fn decode_block_row(
    format: TextureFormat,
    cursor: &mut BlockCursor,
    dest: &mut [u8],
    width: usize,
) -> Result<()> {
    let stride = width * BYTES_PER_PIXEL;
    let rows = dest.len() / stride;

    for x in (0..width).step_by(TextureFormat::BLOCK_WIDTH as usize) {
        let block = decode_block(format, cursor)?;
        let columns = (width - x).min(TextureFormat::BLOCK_WIDTH as usize);

        for (line, texels) in block.chunks_exact(4).take(rows).enumerate() {
            let offset = line * stride + x * BYTES_PER_PIXEL;
            dest[offset..offset + columns * BYTES_PER_PIXEL]
                .chunks_exact_mut(BYTES_PER_PIXEL)
                .zip(texels)
                .for_each(|(pixel, texel)| pixel.copy_from_slice(texel));
        }
    }
    Ok(())
}

/// Linear RGBA8 image, row major with the origin at the top left.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl DecodedImage {
    #[inline]
    fn new(width: u32, height: u32, data: Vec<u8>) -> DecodedImage {
        DecodedImage {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / BYTES_PER_PIXEL
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// raw RGBA8 bytes, `width * 4` bytes per row
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut pixel = [0u8; 4];
        pixel.copy_from_slice(&self.data[offset..offset + BYTES_PER_PIXEL]);
        Some(pixel)
    }

    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]])
    }
}

#[cfg(feature = "image")]
impl DecodedImage {
    pub fn image(&self) -> Option<ImageBuffer<ImageRgba<u8>, Vec<u8>>> {
        ImageBuffer::from_raw(self.width, self.height, self.data.clone())
    }

    pub fn into_image(self) -> Option<ImageBuffer<ImageRgba<u8>, Vec<u8>>> {
        ImageBuffer::from_raw(self.width, self.height, self.data)
    }
}

/// Decodes `data` as a `width` x `height` texture in `format`.
#[inline]
pub fn decode(data: &[u8], width: u32, height: u32, format: TextureFormat) -> Result<DecodedImage> {
    Texture::new(TextureAttribute::new(width, height, format), data).decode()
}
