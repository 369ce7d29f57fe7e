use indicatif::ProgressBar;
use std::io::{stderr, IsTerminal};

/// Progress bar over the match loop; suppressed when stderr is not a
/// terminal (tests, sweeps piped into files).
pub fn progress_bar(len: u64, message: String) -> Option<ProgressBar> {
    if !stderr().is_terminal() {
        return None;
    }

    let bar = ProgressBar::new(len);
    bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .unwrap()
            .progress_chars("##-")
    );
    bar.set_message(message);

    Some(bar)
}
