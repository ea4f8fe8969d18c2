//! Terminal progress indicator on a background thread

use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const FRAMES: [char; 4] = ['-', '\\', '|', '/'];
const FRAME_INTERVAL: Duration = Duration::from_millis(200);

/// A running spinner
///
/// The thread owns the receiving end of a channel; [`Spinner::finish`] (or dropping the
/// spinner) sends the stop message and joins the thread.
pub struct Spinner {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start drawing `message` followed by a rotating frame
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();
        let (tx, rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut frame = 0usize;
            loop {
                print!("\r{} {}", message, FRAMES[frame % FRAMES.len()]);
                let _ = io::stdout().flush();
                frame += 1;

                match rx.recv_timeout(FRAME_INTERVAL) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Stop requested or the spinner was dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self {
            stop: Some(tx),
            handle: Some(handle),
        }
    }

    /// Stop the spinner and replace its line with `message`
    pub fn finish(mut self, message: &str) {
        self.stop_and_join();
        println!("\r{}       ", message);
    }

    fn stop_and_join(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_finish_joins_promptly() {
        let spinner = Spinner::start("Working...");
        thread::sleep(Duration::from_millis(50));

        let started = Instant::now();
        spinner.finish("Working... Done!");
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_drop_stops_thread() {
        let spinner = Spinner::start("Working...");
        drop(spinner);
    }
}
