use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Print, Stylize};
use crossterm::terminal::{Clear, ClearType};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const TICK: Duration = Duration::from_millis(100);

/// One-line progress animation repainted while a long external call runs.
/// Must be started from within a tokio runtime.
pub struct Spinner {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        Self::start_on(io::stderr(), message)
    }

    pub fn start_on<W>(mut out: W, message: impl Into<String>) -> Self
    where
        W: Write + Send + 'static,
    {
        let message = message.into();
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK);
            let mut frame = 0;
            loop {
                tokio::select! {
                    biased;
                    _ = cancel_clone.cancelled() => {
                        let _ = clear_line(&mut out);
                        break;
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = paint(&mut out, &message, FRAMES[frame]) {
                            tracing::debug!("spinner stopped painting: {e}");
                            break;
                        }
                        frame = (frame + 1) % FRAMES.len();
                    }
                }
            }
        });

        Self { cancel, handle: Some(handle) }
    }

    /// Clears the line and returns once the animation task has finished, so
    /// nothing is painted after this resolves.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn paint<W: Write>(out: &mut W, message: &str, frame: char) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(format!("{message} {frame} ").cyan()))?;
    out.flush()
}

fn clear_line<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn len(&self) -> usize {
            self.0.lock().unwrap().len()
        }

        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn paints_message_while_running() {
        let buf = SharedBuf::default();
        let spinner = Spinner::start_on(buf.clone(), "Logging in to ECR...");
        tokio::time::sleep(Duration::from_millis(250)).await;
        spinner.stop().await;

        let text = buf.text();
        assert!(text.contains("Logging in to ECR... |"));
        assert!(text.contains("Logging in to ECR... /"));
    }

    #[tokio::test]
    async fn nothing_is_written_after_stop() {
        let buf = SharedBuf::default();
        let spinner = Spinner::start_on(buf.clone(), "working");
        tokio::time::sleep(Duration::from_millis(150)).await;
        spinner.stop().await;

        let written = buf.len();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(buf.len(), written);
    }

    #[tokio::test]
    async fn dropping_stops_the_animation() {
        let buf = SharedBuf::default();
        drop(Spinner::start_on(buf.clone(), "working"));
        tokio::time::sleep(Duration::from_millis(50)).await;

        let written = buf.len();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(buf.len(), written);
    }
}
