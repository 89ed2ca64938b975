//! Lenient startup configuration.
//!
//! Malformed values are never fatal: they surface as warnings and fall
//! back to the documented defaults, so a typo on the command line still
//! gets a running display.

use std::path::PathBuf;

use crate::{
    export::ExportJob,
    pacer::{RATE_MAX, RATE_MIN},
};

/// Used when the frame rate is absent or unparsable.
pub const DEFAULT_TARGET_RATE: f64 = 60.0;

/// Resolved startup configuration plus any warnings produced while
/// resolving it. Warnings are for the caller's diagnostic stream; they do
/// not stop the run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub target_rate: f64,
    pub export: Option<ExportJob>,
    pub warnings: Vec<String>,
}

impl RunConfig {
    /// Resolves raw argument strings. The rate defaults to 60 and clamps
    /// into `[1, 100]`; a malformed export triple disables the export.
    pub fn resolve(
        rate: Option<&str>,
        export: Option<(&str, &str, &str)>,
        out_dir: PathBuf,
    ) -> Self {
        let mut warnings = Vec::new();

        let target_rate = match rate {
            None => DEFAULT_TARGET_RATE,
            Some(raw) => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    warnings.push(format!(
                        "invalid frame rate '{raw}', using {DEFAULT_TARGET_RATE}"
                    ));
                    DEFAULT_TARGET_RATE
                }
            },
        };
        let target_rate = target_rate.clamp(RATE_MIN, RATE_MAX);

        let export = export.and_then(|(frames, width, height)| {
            match (
                frames.parse::<u32>(),
                width.parse::<u32>(),
                height.parse::<u32>(),
            ) {
                (Ok(frame_count), Ok(width), Ok(height))
                    if frame_count > 0 && width > 0 && height > 0 =>
                {
                    Some(ExportJob {
                        width,
                        height,
                        frame_count,
                        out_dir,
                    })
                }
                _ => {
                    warnings.push(format!(
                        "invalid export parameters '{frames} {width} {height}', skipping export"
                    ));
                    None
                }
            }
        });

        Self {
            target_rate,
            export,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_rate_uses_default() {
        let cfg = RunConfig::resolve(None, None, PathBuf::from("."));
        assert_eq!(cfg.target_rate, 60.0);
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn malformed_rate_warns_and_defaults() {
        let cfg = RunConfig::resolve(Some("fast"), None, PathBuf::from("."));
        assert_eq!(cfg.target_rate, 60.0);
        assert_eq!(cfg.warnings.len(), 1);

        let cfg = RunConfig::resolve(Some("NaN"), None, PathBuf::from("."));
        assert_eq!(cfg.target_rate, 60.0);
    }

    #[test]
    fn rate_clamps_into_documented_range() {
        assert_eq!(
            RunConfig::resolve(Some("0.2"), None, PathBuf::from(".")).target_rate,
            1.0
        );
        assert_eq!(
            RunConfig::resolve(Some("500"), None, PathBuf::from(".")).target_rate,
            100.0
        );
    }

    #[test]
    fn export_triple_parses_or_disables() {
        let cfg = RunConfig::resolve(None, Some(("30", "640", "360")), PathBuf::from("out"));
        let job = cfg.export.unwrap();
        assert_eq!(
            (job.frame_count, job.width, job.height),
            (30, 640, 360)
        );
        assert_eq!(job.out_dir, PathBuf::from("out"));

        let cfg = RunConfig::resolve(None, Some(("30", "x", "360")), PathBuf::from("."));
        assert!(cfg.export.is_none());
        assert_eq!(cfg.warnings.len(), 1);

        let cfg = RunConfig::resolve(None, Some(("0", "640", "360")), PathBuf::from("."));
        assert!(cfg.export.is_none());
    }
}
