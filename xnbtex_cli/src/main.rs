mod error;
mod export;

use crate::error::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use memmap2::Mmap;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;
use xnbtex::{DecodeOptions, Texture, TextureAttribute, TextureFormat};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum)]
pub enum Format {
    #[value(alias = "bc1")]
    Dxt1,
    #[value(alias = "bc2")]
    Dxt3,
    #[value(alias = "bc3")]
    Dxt5,
}

impl From<Format> for TextureFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Dxt1 => TextureFormat::DXT1,
            Format::Dxt3 => TextureFormat::DXT3,
            Format::Dxt5 => TextureFormat::DXT5,
        }
    }
}

#[derive(clap::Args)]
struct Surface {
    /// texture width in pixels
    #[arg(short = 'W', long)]
    width: u32,
    /// texture height in pixels
    #[arg(short = 'H', long)]
    height: u32,
    /// block compression format
    #[arg(short, long, value_enum, conflicts_with = "surface_format")]
    format: Option<Format>,
    /// xna surface format tag, 4 = dxt1, 5 = dxt3, 6 = dxt5
    #[arg(short, long, value_name = "TAG")]
    surface_format: Option<i32>,
}

impl Surface {
    fn attribute(&self) -> Result<TextureAttribute> {
        let format = match (self.format, self.surface_format) {
            (Some(format), _) => TextureFormat::from(format),
            (None, Some(tag)) => TextureFormat::from(tag),
            (None, None) => return Err(Error::MissingFormat),
        };
        Ok(TextureAttribute::new(self.width, self.height, format))
    }
}

#[derive(Parser)]
#[command(name = "xnbtex")]
#[command(about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// decode compressed texture data to png or raw rgba
    Decode {
        /// file holding the compressed blocks
        #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
        /// output file, `.rgba` or `.raw` writes bare pixels
        #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,
        #[command(flatten)]
        surface: Surface,
        /// bytes to skip before the first block
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// decode block rows in parallel
        #[arg(short, long, action = clap::ArgAction::SetTrue)]
        parallel: bool,
        /// worker threads used with --parallel
        #[arg(short, long, value_name = "N", requires = "parallel")]
        threads: Option<usize>,
    },
    /// print the block layout and compressed size of a texture
    Probe {
        #[command(flatten)]
        surface: Surface,
    },
}

fn decode_command(
    input: PathBuf,
    output: PathBuf,
    attr: TextureAttribute,
    offset: usize,
    parallel: bool,
    threads: Option<usize>,
) -> Result<()> {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let mmap = unsafe { Mmap::map(&File::open(input.as_path())?)? };
    let Some(data) = mmap.get(offset..) else {
        return Err(Error::OffsetOutOfRange {
            offset,
            len: mmap.len(),
        });
    };
    log::info!(
        "decoding {} ({} bytes from offset {offset}) as {} {}x{}",
        input.display(),
        data.len(),
        attr.format,
        attr.width,
        attr.height
    );

    let start = Instant::now();
    let image = Texture::new(attr, data).decode_with(&DecodeOptions { parallel })?;
    log::info!("decoded {} pixels in {:?}", image.len(), start.elapsed());

    export::write_image(image, output.as_path())?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn probe_command(attr: TextureAttribute) -> Result<()> {
    let (blocks_x, blocks_y) = attr.block_count();
    println!("format: {} (surface format {})", attr.format, attr.format.surface_format());
    println!("blocks: {blocks_x}x{blocks_y}");
    match (attr.format.block_size(), attr.data_size()) {
        (Some(block_size), Some(data_size)) => {
            println!("block size: {block_size} bytes");
            println!("data size: {data_size} bytes");
            Ok(())
        }
        _ => Err(Error::Xnbtex(xnbtex::Error::UnsupportedFormat(
            attr.format.surface_format(),
        ))),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            input,
            output,
            surface,
            offset,
            parallel,
            threads,
        } => decode_command(
            input,
            output,
            surface.attribute()?,
            offset,
            parallel,
            threads,
        ),
        Commands::Probe { surface } => probe_command(surface.attribute()?),
    }
}
