//! Batch export of rendered frames as a C header/source pair.
//!
//! The artifacts embed the frame sequence as a `uint32_t` array (one
//! `0xFFRRGGBB` word per pixel) for firmware and hardware test rigs that
//! cannot decode image formats. Output is written to temporaries in the
//! destination directory and renamed into place only once both files are
//! complete, so a failed export never leaves a truncated artifact behind.

use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use tempfile::NamedTempFile;

use crate::{
    core::OverlayState,
    error::{UeitError, UeitResult},
    pipeline::FramePipeline,
};

/// One-shot export request. Runs synchronously on the caller's thread and
/// is never concurrent with the live loop.
#[derive(Clone, Debug)]
pub struct ExportJob {
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    pub out_dir: PathBuf,
}

/// Final paths of a completed export.
#[derive(Clone, Debug)]
pub struct ExportArtifacts {
    pub header: PathBuf,
    pub data: PathBuf,
}

/// Nominal fps recorded in the artifacts, rounded from the target period
/// and clamped into the two digits the info line can show.
pub fn derive_fps(target_period: f64) -> i64 {
    ((1.0 / target_period).round() as i64).clamp(0, OverlayState::FPS_MAX)
}

impl ExportJob {
    pub fn validate(&self) -> UeitResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(UeitError::validation(
                "export width/height must be non-zero",
            ));
        }
        if self.frame_count == 0 {
            return Err(UeitError::validation("export frame count must be non-zero"));
        }
        Ok(())
    }

    /// `ueit_<fps>_<frames>_<width>_<height>`, shared by both artifacts.
    pub fn file_stem(&self, fps: i64) -> String {
        format!(
            "ueit_{}_{}_{}_{}",
            fps, self.frame_count, self.width, self.height
        )
    }

    /// Renders every frame through `pipeline` and writes the artifact
    /// pair. Any I/O failure aborts the export, drops the temporaries and
    /// propagates; there is no retry.
    #[tracing::instrument(skip_all, fields(width = self.width, height = self.height, frames = self.frame_count))]
    pub fn run(
        &self,
        pipeline: &mut FramePipeline,
        target_period: f64,
    ) -> UeitResult<ExportArtifacts> {
        self.validate()?;

        let fps = derive_fps(target_period);
        let stem = self.file_stem(fps);
        let header_path = self.out_dir.join(format!("{stem}.h"));
        let data_path = self.out_dir.join(format!("{stem}.c"));

        let mut header_tmp = NamedTempFile::new_in(&self.out_dir).map_err(|e| {
            UeitError::export(format!(
                "failed to create temporary file in '{}': {e}",
                self.out_dir.display()
            ))
        })?;
        let mut data_tmp = NamedTempFile::new_in(&self.out_dir)
            .map_err(|e| UeitError::export(format!("failed to create temporary file: {e}")))?;

        self.write_header(&mut BufWriter::new(header_tmp.as_file_mut()), &stem, fps)
            .map_err(|e| UeitError::export(format!("failed to write descriptor: {e}")))?;
        self.write_data(&mut BufWriter::new(data_tmp.as_file_mut()), &stem, fps, pipeline)?;

        header_tmp.persist(&header_path).map_err(|e| {
            UeitError::export(format!(
                "failed to move descriptor into '{}': {e}",
                header_path.display()
            ))
        })?;
        if let Err(e) = data_tmp.persist(&data_path) {
            // Keep the pair atomic: do not leave a descriptor without data.
            let _ = std::fs::remove_file(&header_path);
            return Err(UeitError::export(format!(
                "failed to move data into '{}': {e}",
                data_path.display()
            )));
        }

        tracing::info!(
            header = %header_path.display(),
            data = %data_path.display(),
            "export complete"
        );
        Ok(ExportArtifacts {
            header: header_path,
            data: data_path,
        })
    }

    fn write_header(&self, w: &mut impl Write, stem: &str, fps: i64) -> std::io::Result<()> {
        let guard = format!("{}_H", stem.to_uppercase());

        write!(w, "#ifndef {guard}\r\n")?;
        write!(w, "#define {guard}\r\n")?;
        write!(w, "\r\n")?;
        write!(w, "#include <stdint.h>\r\n")?;
        write!(w, "\r\n")?;
        write!(w, "#define UEIT_WIDTH\t\t\t{}\r\n", self.width)?;
        write!(w, "#define UEIT_HEIGHT\t\t\t{}\r\n", self.height)?;
        write!(w, "\r\n")?;
        write!(w, "#define UEIT_FPS\t\t\t{fps}\r\n")?;
        write!(w, "#define UEIT_NUM_FRAMES\t\t{}\r\n", self.frame_count)?;
        write!(w, "\r\n")?;
        write!(
            w,
            "extern const uint32_t UEIT_DATA[UEIT_NUM_FRAMES][UEIT_WIDTH * UEIT_HEIGHT] __attribute__((aligned(32)));\r\n"
        )?;
        write!(w, "\r\n")?;
        write!(w, "#endif\r\n")?;
        w.flush()
    }

    fn write_data(
        &self,
        w: &mut impl Write,
        stem: &str,
        fps: i64,
        pipeline: &mut FramePipeline,
    ) -> UeitResult<()> {
        let io_err = |e: std::io::Error| UeitError::export(format!("failed to write data: {e}"));

        write!(w, "#include \"{stem}.h\"\r\n").map_err(io_err)?;
        write!(w, "\r\n").map_err(io_err)?;
        write!(
            w,
            "const uint32_t UEIT_DATA[UEIT_NUM_FRAMES][UEIT_WIDTH * UEIT_HEIGHT] __attribute__((aligned(32))) =\r\n"
        )
        .map_err(io_err)?;
        write!(w, "{{\r\n").map_err(io_err)?;

        for i in 0..self.frame_count {
            tracing::debug!(frame = i + 1, total = self.frame_count, "rendering export frame");

            let state = OverlayState::new(u64::from(i), fps);
            let frame = pipeline.frame(self.width, self.height, &state)?;

            write!(w, "\t{{").map_err(io_err)?;
            for (n, word) in frame.words().iter().enumerate() {
                if n % 8 == 0 {
                    write!(w, "\r\n\t").map_err(io_err)?;
                }
                write!(w, "\t0x{word:08X},").map_err(io_err)?;
            }
            write!(w, "\r\n").map_err(io_err)?;
            write!(w, "\t}},\r\n").map_err(io_err)?;
        }

        write!(w, "}};\r\n").map_err(io_err)?;
        w.flush().map_err(io_err)
    }
}
