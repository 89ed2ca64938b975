use std::path::PathBuf;

use clap::Parser;
use minifb::{Key, Window, WindowOptions};

use ueit::{Canvas, FramePacer, FramePipeline, PresentSink, RunConfig, UeitError, UeitResult};

#[derive(Parser, Debug)]
#[command(name = "ueit", version)]
struct Cli {
    /// Target frame rate in frames per second (clamped to 1..=100,
    /// defaults to 60 when absent or unparsable).
    rate: Option<String>,

    /// Number of frames to export before the display opens.
    frames: Option<String>,

    /// Export frame width in pixels.
    width: Option<String>,

    /// Export frame height in pixels.
    height: Option<String>,

    /// Directory the export artifacts are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let export_args = match (&cli.frames, &cli.width, &cli.height) {
        (Some(f), Some(w), Some(h)) => Some((f.as_str(), w.as_str(), h.as_str())),
        (None, None, None) => None,
        _ => {
            eprintln!("export needs all of: frames width height; skipping export");
            None
        }
    };

    let config = RunConfig::resolve(cli.rate.as_deref(), export_args, cli.out_dir);
    for warning in &config.warnings {
        eprintln!("{warning}");
    }

    let mut pipeline = FramePipeline::new();
    let mut pacer = FramePacer::new(config.target_rate);

    if let Some(job) = &config.export {
        // Export failure is fatal to the export only; the display still runs.
        match job.run(&mut pipeline, pacer.target_period()) {
            Ok(artifacts) => {
                eprintln!("wrote {}", artifacts.header.display());
                eprintln!("wrote {}", artifacts.data.display());
            }
            Err(e) => eprintln!("export failed: {e}"),
        }
    }

    let mut sink = WindowSink::open(1280, 720)?;
    ueit::run_live(&mut pipeline, &mut pacer, &mut sink)?;
    Ok(())
}

/// Thin display shell around a minifb window: it owns the surface, hands
/// its current size to the renderer, and turns Escape/close into the stop
/// signal. All cadence belongs to the pacer, so the window's own frame
/// limiter is disabled.
struct WindowSink {
    window: Window,
}

impl WindowSink {
    fn open(width: usize, height: usize) -> UeitResult<Self> {
        let mut window = Window::new(
            "UEIT",
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| UeitError::render(format!("failed to open display window: {e}")))?;
        window.set_target_fps(0);
        Ok(Self { window })
    }
}

impl PresentSink for WindowSink {
    fn dimensions(&self) -> (u32, u32) {
        let (w, h) = self.window.get_size();
        (w.max(1) as u32, h.max(1) as u32)
    }

    fn present(&mut self, frame: &Canvas) -> UeitResult<()> {
        self.window
            .update_with_buffer(frame.words(), frame.width() as usize, frame.height() as usize)
            .map_err(|e| UeitError::render(format!("failed to present frame: {e}")))
    }

    fn stop_requested(&mut self) -> bool {
        !self.window.is_open() || self.window.is_key_down(Key::Escape)
    }
}
