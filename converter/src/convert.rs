use crate::{ConvertError, Decoder, ImageView, Result};
use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Bytes per pixel in the output: B, G, R, A.
const BPP: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Conversion {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            width,
            height,
        }
    }

    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * BPP
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

/// Serializes the `width`x`height` region at the origin of `view` as premultiplied BGRA,
/// row by row. Pixels beyond the region are ignored.
pub fn encode<V: ImageView + ?Sized>(view: &V, conversion: &Conversion) -> Result<Vec<u8>> {
    let bounds_error = || ConvertError::Bounds {
        path: conversion.input.clone(),
        requested: (conversion.width, conversion.height),
        actual: view.dimensions(),
    };

    let (actual_width, actual_height) = view.dimensions();
    if actual_width < conversion.width || actual_height < conversion.height {
        return Err(bounds_error());
    }

    let mut buffer = Vec::with_capacity(conversion.byte_len());
    for y in 0..conversion.height {
        for x in 0..conversion.width {
            let pixel = view.get_pixel(x, y).ok_or_else(bounds_error)?;
            buffer.extend_from_slice(&pixel.premultiplied_bgra());
        }
    }

    Ok(buffer)
}

pub fn convert<D: Decoder + ?Sized>(
    decoder: &D,
    conversion: &Conversion,
) -> Result<ConversionReport> {
    let view = decoder.decode(&conversion.input)?;
    let buffer = encode(&view, conversion)?;
    write_replacing(&conversion.output, &buffer)?;

    Ok(ConversionReport {
        output: conversion.output.clone(),
        width: conversion.width,
        height: conversion.height,
        bytes: buffer.len(),
    })
}

/// Runs the conversions in order and stops at the first failure.
pub fn convert_all<D: Decoder + ?Sized>(
    decoder: &D,
    conversions: &[Conversion],
) -> Result<Vec<ConversionReport>> {
    let mut reports = Vec::with_capacity(conversions.len());
    for conversion in conversions {
        debug!(
            "Converting {} into {} ({}x{})",
            conversion.input.display(),
            conversion.output.display(),
            conversion.width,
            conversion.height
        );
        let report = convert(decoder, conversion)?;
        info!(
            "Wrote {}x{} image data ({} bytes) to {}",
            report.width,
            report.height,
            report.bytes,
            report.output.display()
        );
        reports.push(report);
    }

    Ok(reports)
}

// The blob goes to a sibling temporary file first, an existing output is only replaced by a
// complete one.
fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(directory).map_err(write_error)?;
    file.write_all(bytes).map_err(write_error)?;
    // The temporary file is private, the output keeps the mode of the file it replaces.
    match std::fs::metadata(path) {
        Ok(metadata) => file
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?,
        Err(_) => set_default_permissions(file.as_file()).map_err(write_error)?,
    }
    file.as_file().sync_all().map_err(write_error)?;
    trace!("Persisting {} into {}", file.path().display(), path.display());
    file.persist(path).map_err(|e| write_error(e.error))?;

    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}
