use ueit::{Canvas, FramePacer, FramePipeline, PresentSink, UeitResult, run_live};

/// Headless stand-in for the display shell: fixed dimensions, counts the
/// frames it is handed, and raises the stop signal after a few ticks.
struct CountingSink {
    presented: Vec<(u32, u32)>,
    stop_after: usize,
}

impl PresentSink for CountingSink {
    fn dimensions(&self) -> (u32, u32) {
        (64, 36)
    }

    fn present(&mut self, frame: &Canvas) -> UeitResult<()> {
        self.presented.push((frame.width(), frame.height()));
        Ok(())
    }

    fn stop_requested(&mut self) -> bool {
        self.presented.len() >= self.stop_after
    }
}

#[test]
fn loop_runs_until_stop_and_presents_full_frames() {
    let mut pipeline = FramePipeline::new();
    let mut pacer = FramePacer::new(100.0);
    let mut sink = CountingSink {
        presented: Vec::new(),
        stop_after: 5,
    };

    run_live(&mut pipeline, &mut pacer, &mut sink).unwrap();

    assert_eq!(sink.presented.len(), 5);
    assert!(sink.presented.iter().all(|&(w, h)| (w, h) == (64, 36)));
}

/// A sink whose present fails must abort the loop with the error rather
/// than spinning.
struct FailingSink;

impl PresentSink for FailingSink {
    fn dimensions(&self) -> (u32, u32) {
        (32, 18)
    }

    fn present(&mut self, _frame: &Canvas) -> UeitResult<()> {
        Err(ueit::UeitError::render("surface lost"))
    }

    fn stop_requested(&mut self) -> bool {
        false
    }
}

#[test]
fn present_failure_propagates() {
    let mut pipeline = FramePipeline::new();
    let mut pacer = FramePacer::new(60.0);
    assert!(run_live(&mut pipeline, &mut pacer, &mut FailingSink).is_err());
}
