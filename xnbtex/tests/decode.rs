use rstest::rstest;
use xnbtex::{DecodeOptions, Error, Texture, TextureAttribute, TextureFormat, decode};

fn dxt1_block(color0: u16, color1: u16, indices: u32) -> Vec<u8> {
    let mut block = Vec::with_capacity(8);
    block.extend_from_slice(&color0.to_le_bytes());
    block.extend_from_slice(&color1.to_le_bytes());
    block.extend_from_slice(&indices.to_le_bytes());
    block
}

#[test]
fn white_block_with_index_zero() {
    let image = decode(&dxt1_block(0xFFFF, 0x0000, 0), 4, 4, TextureFormat::DXT1).unwrap();

    assert_eq!(image.len(), 16);
    assert!(image.pixels().all(|pixel| pixel == [255, 255, 255, 255]));
}

#[test]
fn punch_through_block_with_index_three() {
    let image = decode(
        &dxt1_block(0x0000, 0xFFFF, 0xFFFF_FFFF),
        4,
        4,
        TextureFormat::DXT1,
    )
    .unwrap();

    assert!(image.pixels().all(|pixel| pixel == [0, 0, 0, 0]));
}

#[test]
fn short_buffer_fails_without_output() {
    let data = dxt1_block(0xFFFF, 0x0000, 0);
    let result = decode(&data, 8, 4, TextureFormat::DXT1);

    assert_eq!(
        result,
        Err(Error::UnexpectedEndOfData {
            expected: 16,
            actual: 8
        })
    );
}

#[test]
fn surface_format_tag_drives_dispatch() {
    let data = dxt1_block(0xFFFF, 0x0000, 0);
    let texture = Texture::new(TextureAttribute::new(4, 4, TextureFormat::from(4)), &data[..]);
    assert!(texture.decode().is_ok());

    let texture = Texture::new(TextureAttribute::new(4, 4, TextureFormat::from(1)), &data[..]);
    assert_eq!(texture.decode(), Err(Error::UnsupportedFormat(1)));
}

#[test]
fn five_by_five_reads_four_blocks_writes_25_pixels() {
    let data = [
        dxt1_block(0xF800, 0, 0),
        dxt1_block(0x07E0, 0, 0),
        dxt1_block(0x001F, 0, 0),
        dxt1_block(0xFFFF, 0, 0),
    ]
    .concat();
    assert_eq!(TextureFormat::DXT1.data_size(5, 5), Some(data.len()));
    assert_eq!(TextureFormat::DXT1.data_size(8, 8), Some(data.len()));

    let image = decode(&data, 5, 5, TextureFormat::DXT1).unwrap();
    assert_eq!(image.len(), 25);
    assert_eq!(image.data().len(), 100);

    assert_eq!(image.pixel(3, 3), Some([255, 0, 0, 255]));
    assert_eq!(image.pixel(4, 0), Some([0, 255, 0, 255]));
    assert_eq!(image.pixel(0, 4), Some([0, 0, 255, 255]));
    assert_eq!(image.pixel(4, 4), Some([255, 255, 255, 255]));
}

#[test]
fn dxt3_block_end_to_end() {
    let mut data = vec![0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE];
    data.extend(dxt1_block(0x0000, 0xFFFF, 0x5555_5555));

    let image = decode(&data, 4, 4, TextureFormat::DXT3).unwrap();
    for (i, pixel) in image.pixels().enumerate() {
        assert_eq!(pixel, [255, 255, 255, i as u8 * 0x11]);
    }
}

#[test]
fn dxt5_block_end_to_end() {
    // index 0 for the first row, 1 for the second, 6 and 7 for the rest
    let indices: u64 = (0..16u64).fold(0, |acc, i| {
        let index = match i / 4 {
            0 => 0,
            1 => 1,
            2 => 6,
            _ => 7,
        };
        acc | (index << (i * 3))
    });
    let mut data = vec![40, 80];
    data.extend_from_slice(&indices.to_le_bytes()[..6]);
    data.extend(dxt1_block(0xFFFF, 0x0000, 0));

    let image = decode(&data, 4, 4, TextureFormat::DXT5).unwrap();
    let alphas = image.pixels().map(|pixel| pixel[3]).collect::<Vec<_>>();
    assert_eq!(
        alphas,
        [40, 40, 40, 40, 80, 80, 80, 80, 0, 0, 0, 0, 255, 255, 255, 255]
    );
}

#[rstest]
#[case(TextureFormat::DXT1)]
#[case(TextureFormat::DXT3)]
#[case(TextureFormat::DXT5)]
fn output_size_matches_dimensions(#[case] format: TextureFormat) {
    for (width, height) in [(1, 1), (3, 7), (4, 4), (13, 8), (64, 17)] {
        let data = vec![0x5A; format.data_size(width, height).unwrap()];
        let image = Texture::new(TextureAttribute::new(width, height, format), data)
            .decode_with(&DecodeOptions::default())
            .unwrap();

        assert_eq!(image.width(), width);
        assert_eq!(image.height(), height);
        assert_eq!(image.len(), (width * height) as usize);
        assert_eq!(image.into_inner().len(), (width * height * 4) as usize);
    }
}
