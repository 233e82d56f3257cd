use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Stderr spinner shown while waiting on the probe, so echoed device
/// output on stdout stays untouched.
pub(crate) fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} ({elapsed})")
            .expect("Failed to create spinner"),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(120));

    pb
}
