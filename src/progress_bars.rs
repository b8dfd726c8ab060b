use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::{fmt::Write, time::Duration};

const PROGRESS_CHARS: &str = "━━";

const MAIN_TEMPLATE: &str = "{spinner:.green.bold} {elapsed_precise:.bold} {wide_bar:.green/white.dim} {percent:.bold}  {pos:.green} ({msg:.bold.blue})";

/// Single bar tracking how many images a collection run saved so far.
///
/// Every console line of the run goes through [`CollectProgress::println`] so log lines
/// don't tear the bar apart.
pub struct CollectProgress {
    bar: ProgressBar,
}

impl CollectProgress {
    pub fn initialize(len: u64, query: &str) -> Self {
        let bar = ProgressBar::new(len).with_style(master_progress_style());
        bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(60));
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(query.to_string());

        Self { bar }
    }

    #[inline]
    pub fn println<S: AsRef<str>>(&self, line: S) {
        self.bar.suspend(|| println!("{}", line.as_ref()));
    }

    #[inline]
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

pub fn master_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(MAIN_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("pos", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{}/{}", state.pos(), state.len().unwrap_or_default());
        })
        .with_key("percent", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{:>3.0}%", state.fraction() * 100_f32);
        })
        .progress_chars(PROGRESS_CHARS)
}
