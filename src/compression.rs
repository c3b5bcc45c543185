//! Transparent compression for record sources and tree sinks.
//!
//! Codecs are picked by file extension first (`.gz`, `.zst`), falling back to
//! magic bytes on read. Each codec sits behind its own feature flag; with no
//! codec features enabled both entry points are buffered pass-throughs.
//!
//! Writers must be closed with [`EncodedWriter::finish`] to see errors from
//! the codec trailer and the final flush.

use anyhow::{Context, Result};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A built-in compression codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    #[cfg(feature = "compression-gzip")]
    Gzip,
    #[cfg(feature = "compression-zstd")]
    Zstd,
}

impl Codec {
    /// All codecs compiled into this build.
    pub const ALL: &'static [Codec] = &[
        #[cfg(feature = "compression-gzip")]
        Codec::Gzip,
        #[cfg(feature = "compression-zstd")]
        Codec::Zstd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => "gzip",
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => "zstd",
        }
    }

    /// Lowercase extensions, leading dot included.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => &[".gz", ".gzip"],
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => &[".zst", ".zstd"],
        }
    }

    fn magic_bytes(self) -> &'static [u8] {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => &[0x1f, 0x8b],
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => &[0x28, 0xb5, 0x2f, 0xfd],
        }
    }

    /// Codec whose extension ends `path`, case-insensitively.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Codec> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.extensions().iter().any(|ext| name.ends_with(ext)))
    }

    /// Peek at the head of `reader` without consuming it.
    fn from_magic<R: BufRead>(reader: &mut R) -> Option<Codec> {
        let head = reader.fill_buf().ok()?;
        Self::ALL
            .iter()
            .copied()
            .find(|c| head.starts_with(c.magic_bytes()))
    }

    fn wrap_reader(self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => Ok(Box::new(flate2::read::MultiGzDecoder::new(reader))),
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => {
                zstd::stream::read::Decoder::new(reader).map(|d| Box::new(d) as Box<dyn Read>)
            }
        }
    }

    fn wrap_writer<W: Write>(self, writer: BufWriter<W>) -> io::Result<Encoder<W>> {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => Ok(Encoder::Gzip(flate2::write::GzEncoder::new(
                writer,
                flate2::Compression::default(),
            ))),
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => zstd::stream::write::Encoder::new(writer, 3).map(Encoder::Zstd),
        }
    }
}

enum Encoder<W: Write> {
    Plain(BufWriter<W>),
    #[cfg(feature = "compression-gzip")]
    Gzip(flate2::write::GzEncoder<BufWriter<W>>),
    #[cfg(feature = "compression-zstd")]
    Zstd(zstd::stream::write::Encoder<'static, BufWriter<W>>),
}

impl<W: Write> Encoder<W> {
    fn as_write(&mut self) -> &mut dyn Write {
        match self {
            Encoder::Plain(w) => w,
            #[cfg(feature = "compression-gzip")]
            Encoder::Gzip(e) => e,
            #[cfg(feature = "compression-zstd")]
            Encoder::Zstd(e) => e,
        }
    }

    fn finish(self) -> io::Result<()> {
        let mut buffered = match self {
            Encoder::Plain(w) => w,
            #[cfg(feature = "compression-gzip")]
            Encoder::Gzip(e) => e.finish()?,
            #[cfg(feature = "compression-zstd")]
            Encoder::Zstd(e) => e.finish()?,
        };
        buffered.flush()
    }
}

/// Buffered, possibly compressing writer returned by [`auto_detect_writer`].
///
/// Dropping it without [`finish`](EncodedWriter::finish) still completes the
/// stream, but any error on the way is lost.
pub struct EncodedWriter<W: Write> {
    inner: Option<Encoder<W>>,
}

impl<W: Write> EncodedWriter<W> {
    /// Write the codec trailer, if any, and flush everything to the
    /// underlying writer.
    pub fn finish(mut self) -> io::Result<()> {
        match self.inner.take() {
            Some(encoder) => encoder.finish(),
            None => Ok(()),
        }
    }

    fn encoder(&mut self) -> io::Result<&mut dyn Write> {
        match self.inner.as_mut() {
            Some(encoder) => Ok(encoder.as_write()),
            None => Err(io::Error::other("writer already finished")),
        }
    }
}

impl<W: Write> Write for EncodedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.encoder()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder()?.flush()
    }
}

impl<W: Write> Drop for EncodedWriter<W> {
    fn drop(&mut self) {
        if let Some(encoder) = self.inner.take() {
            let _ = encoder.finish();
        }
    }
}

/// Wrap `reader` with a decompressor if `path_hint` or the stream's leading
/// bytes identify a codec.
pub fn auto_detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<Box<dyn Read>> {
    let mut buffered = BufReader::new(reader);
    let codec = Codec::from_path(&path_hint).or_else(|| Codec::from_magic(&mut buffered));
    match codec {
        Some(codec) => codec
            .wrap_reader(Box::new(buffered))
            .with_context(|| format!("wrap reader with {} codec", codec.name())),
        None => Ok(Box::new(buffered)),
    }
}

/// Wrap `writer` with a compressor chosen by the extension of `path_hint`.
pub fn auto_detect_writer<W: Write>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> Result<EncodedWriter<W>> {
    let buffered = BufWriter::new(writer);
    let encoder = match Codec::from_path(&path_hint) {
        Some(codec) => codec
            .wrap_writer(buffered)
            .with_context(|| format!("wrap writer with {} codec", codec.name()))?,
        None => Encoder::Plain(buffered),
    };
    Ok(EncodedWriter {
        inner: Some(encoder),
    })
}
