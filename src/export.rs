//! Writing shapes out, one per line (or block), optionally gzip compressed.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use flate2::write::GzEncoder;

use crate::{
    error::{Error, Result},
    polyomino::Polyomino,
};

/// Text representation of each shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `n h w r c r c ...`
    #[default]
    Coordinates,
    /// `h w bits`
    Bitstring,
    /// One JSON object per line.
    Json,
    /// A header with the index and symmetry sigil, then the drawing and a
    /// blank line.
    Drawing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
}

pub enum Writer<T>
where
    T: Write,
{
    Uncompressed(T),
    Gzip(GzEncoder<T>),
}

impl<T> Writer<T>
where
    T: Write,
{
    pub fn new(compression: Compression, writer: T) -> Self {
        match compression {
            Compression::None => Self::Uncompressed(writer),
            Compression::Gzip => Self::Gzip(GzEncoder::new(writer, flate2::Compression::default())),
        }
    }

    /// Flush everything, including the gzip trailer, and return the inner writer.
    pub fn finish(self) -> std::io::Result<T> {
        match self {
            Writer::Uncompressed(mut t) => {
                t.flush()?;
                Ok(t)
            }
            Writer::Gzip(t) => t.finish(),
        }
    }
}

impl<T> Write for Writer<T>
where
    T: Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Writer::Uncompressed(t) => t.write(buf),
            Writer::Gzip(t) => t.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Writer::Uncompressed(t) => t.flush(),
            Writer::Gzip(t) => t.flush(),
        }
    }
}

fn io(operation: &'static str) -> impl FnOnce(std::io::Error) -> Error {
    move |source| Error::Io { operation, source }
}

/// Render one shape. `index` is only shown by [`Format::Drawing`].
pub fn render(shape: &Polyomino, index: usize, format: Format) -> Result<String> {
    let text = match format {
        Format::Coordinates => shape.to_coordinates(),
        Format::Bitstring => shape.to_bitstring(),
        Format::Json => shape.to_json()?,
        Format::Drawing => format!("# {index} {}\n{shape}\n", shape.symmetry()),
    };

    Ok(text)
}

/// Write `shapes` to `write`, returning how many were written.
pub fn write_shapes<'a, I, W>(
    shapes: I,
    format: Format,
    compression: Compression,
    write: W,
) -> Result<usize>
where
    I: IntoIterator<Item = &'a Polyomino>,
    W: Write,
{
    let mut writer = Writer::new(compression, write);
    let mut written = 0;

    for (index, shape) in shapes.into_iter().enumerate() {
        let line = render(shape, index, format)?;
        writeln!(writer, "{line}").map_err(io("writing shapes"))?;
        written += 1;
    }

    writer.finish().map_err(io("finishing output"))?;

    Ok(written)
}

/// Write `shapes` to the file at `path`, creating or truncating it.
pub fn write_file<'a, I>(
    shapes: I,
    format: Format,
    compression: Compression,
    path: impl AsRef<Path>,
) -> Result<usize>
where
    I: IntoIterator<Item = &'a Polyomino>,
{
    let file = File::create(path.as_ref()).map_err(io("creating output file"))?;
    write_shapes(shapes, format, compression, BufWriter::new(file))
}
