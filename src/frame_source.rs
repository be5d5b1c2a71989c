//! Landmark frame source: newline-delimited detector results.
//!
//! A reader thread decodes one detector result per line and offers it to
//! the controller through a single-slot channel. For a live detector on
//! stdin, a frame arriving while the previous one has not been picked up
//! yet is dropped, matching a camera loop that skips frames while the
//! detector is still busy. A recorded file has nobody upstream to skip for,
//! so the reader waits for the slot instead and every line is delivered.

use crate::{
    error::{FrameError, Result},
    landmarks::{DetectorResult, LandmarkSet},
};
use log::{debug, info, warn};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::{self, Receiver, TryRecvError, TrySendError},
        Arc,
    },
    thread::{self, JoinHandle},
};

/// A decoded frame, or the reason it could not be decoded
pub type FrameResult = std::result::Result<LandmarkSet, FrameError>;

/// What a poll of the frame source produced
#[derive(Debug)]
pub enum SourcePoll {
    /// A frame was waiting
    Frame(FrameResult),
    /// Nothing new since the last poll
    Empty,
    /// The stream has ended and every frame was delivered
    Ended,
}

/// How the reader hands frames over when the slot is still occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delivery {
    /// Drop the new frame (live detector)
    #[default]
    DropWhileBusy,
    /// Block until the slot frees up (recorded stream)
    Backpressure,
}

/// Decode one line of the landmark stream
///
/// # Errors
///
/// Returns [`FrameError::Malformed`] when the line is not a detector result
pub fn parse_frame(line: &str) -> FrameResult {
    serde_json::from_str::<DetectorResult>(line)
        .map(DetectorResult::into_first_face)
        .map_err(|e| FrameError::Malformed(e.to_string()))
}

/// Open the landmark stream: a file path, or stdin for `None` and `"-"`.
///
/// Files are replayed with [`Delivery::Backpressure`], stdin is treated as
/// a live detector.
///
/// # Errors
///
/// Returns an I/O error when the file cannot be opened
pub fn open_input(path: Option<&Path>) -> Result<(Box<dyn BufRead + Send>, Delivery)> {
    match path {
        Some(p) if p != Path::new("-") => {
            info!("Replaying landmark frames from {}", p.display());
            Ok((Box::new(BufReader::new(File::open(p)?)), Delivery::Backpressure))
        }
        _ => {
            info!("Reading landmark frames from stdin");
            Ok((Box::new(BufReader::new(io::stdin())), Delivery::DropWhileBusy))
        }
    }
}

/// Background reader delivering frames one at a time
pub struct FrameSource {
    receiver: Receiver<FrameResult>,
    dropped: Arc<AtomicUsize>,
    handle: Option<JoinHandle<()>>,
}

impl FrameSource {
    /// Start reading a live stream on its own thread
    pub fn spawn<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self::spawn_with(reader, Delivery::DropWhileBusy)
    }

    /// Start reading `reader` on its own thread with the given delivery
    pub fn spawn_with<R: BufRead + Send + 'static>(reader: R, delivery: Delivery) -> Self {
        let (sender, receiver) = mpsc::sync_channel(1);
        let dropped = Arc::new(AtomicUsize::new(0));
        let dropped_counter = Arc::clone(&dropped);

        let handle = thread::spawn(move || {
            let mut delivered = 0usize;
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Landmark stream read failed: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                let frame = parse_frame(&line);
                match delivery {
                    Delivery::Backpressure => {
                        if sender.send(frame).is_err() {
                            break;
                        }
                        delivered += 1;
                    }
                    Delivery::DropWhileBusy => match sender.try_send(frame) {
                        Ok(()) => delivered += 1,
                        Err(TrySendError::Full(_)) => {
                            dropped_counter.fetch_add(1, Ordering::Relaxed);
                            debug!("Previous frame still pending, dropping");
                        }
                        Err(TrySendError::Disconnected(_)) => break,
                    },
                }
            }
            info!(
                "Landmark stream ended after {} frames ({} dropped)",
                delivered,
                dropped_counter.load(Ordering::Relaxed)
            );
        });

        Self {
            receiver,
            dropped,
            handle: Some(handle),
        }
    }

    /// Take the pending frame, if any, without blocking
    pub fn poll(&mut self) -> SourcePoll {
        match self.receiver.try_recv() {
            Ok(frame) => SourcePoll::Frame(frame),
            Err(TryRecvError::Empty) => SourcePoll::Empty,
            Err(TryRecvError::Disconnected) => {
                if let Some(handle) = self.handle.take() {
                    if handle.join().is_err() {
                        warn!("Landmark reader thread panicked");
                    }
                }
                SourcePoll::Ended
            }
        }
    }

    /// Frames discarded because the previous one was still pending
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    #[test]
    fn test_parse_frame() {
        let face = parse_frame(r#"{"multiFaceLandmarks":[[{"x":0.5,"y":0.25}]]}"#).unwrap();
        assert_eq!(face.len(), 1);
        assert!(parse_frame(r#"{"multiFaceLandmarks":[]}"#).unwrap().is_empty());
        assert!(matches!(parse_frame("not json"), Err(FrameError::Malformed(_))));
    }

    #[test]
    fn test_source_delivers_and_ends() {
        let input = "{}\n\n{\"multiFaceLandmarks\":[[{\"x\":0.1,\"y\":0.2}]]}\n";
        let mut source = FrameSource::spawn(Cursor::new(input.to_string()));

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut frames = Vec::new();
        loop {
            match source.poll() {
                SourcePoll::Frame(frame) => frames.push(frame),
                SourcePoll::Empty => thread::sleep(Duration::from_millis(1)),
                SourcePoll::Ended => break,
            }
            assert!(Instant::now() < deadline, "frame source never ended");
        }

        // The slot holds one frame; the rest may be dropped while it waits
        assert!(!frames.is_empty());
        assert_eq!(frames.len() + source.dropped(), 2);
        assert!(frames.iter().all(|f| f.is_ok()));
    }

    #[test]
    fn test_backpressure_delivers_every_line() {
        let line = r#"{"multiFaceLandmarks":[[{"x":0.1,"y":0.2}]]}"#;
        let input = vec![line; 30].join("\n");
        let mut source = FrameSource::spawn_with(Cursor::new(input), Delivery::Backpressure);

        // Give the reader every chance to run ahead before draining
        thread::sleep(Duration::from_millis(50));

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut delivered = 0;
        loop {
            match source.poll() {
                SourcePoll::Frame(frame) => {
                    assert!(frame.is_ok());
                    delivered += 1;
                }
                SourcePoll::Empty => thread::sleep(Duration::from_millis(1)),
                SourcePoll::Ended => break,
            }
            assert!(Instant::now() < deadline, "frame source never ended");
        }

        assert_eq!(delivered, 30);
        assert_eq!(source.dropped(), 0);
    }
}
