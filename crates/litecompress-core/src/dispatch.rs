//! Background compression on the tokio blocking pool.
//!
//! Each invocation snapshots the compressor (config plus codec) and runs the
//! whole decision procedure on one blocking worker. Nothing is shared between
//! invocations and there is no cancellation: a stuck codec call keeps its
//! worker until it returns.

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::callback::CompressCallback;
use crate::codec::ImageCodec;
use crate::compressor::{CompressInput, ImageCompressor};
use crate::result::CompressResult;

impl<C> ImageCompressor<C>
where
    C: ImageCodec + Clone + 'static,
{
    /// Run [`compress`](Self::compress) on a blocking worker thread.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_compress(&self, input: impl Into<CompressInput>) -> JoinHandle<CompressResult> {
        let input = input.into();
        let snapshot = self.clone();
        tokio::task::spawn_blocking(move || snapshot.compress(input))
    }

    /// Compress in the background and report through `callback`.
    ///
    /// `on_start` fires before the work is submitted. The outcome is delivered
    /// after the worker finishes, from this future, so every callback runs on
    /// whatever task or thread awaits it. A successful outcome goes to
    /// `on_success`; a failed one, or a worker that panicked, goes to `on_error`.
    pub async fn compress_async<CB>(&self, input: impl Into<CompressInput>, callback: &mut CB)
    where
        CB: CompressCallback + ?Sized,
    {
        callback.on_start();

        match self.spawn_compress(input).await {
            Ok(result) if result.is_success() => {
                debug!("Background compression finished");
                callback.on_success(result);
            }
            Ok(result) => {
                let message = result
                    .error_message()
                    .unwrap_or("Compression failed")
                    .to_string();
                callback.on_error(message);
            }
            Err(e) => {
                warn!("Compression worker failed: {}", e);
                callback.on_error(format!("Compression task failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::callback::{CallbackEvent, RecordingCallback};
    use crate::codec::ImageCodec;
    use crate::compressor::test_support::*;
    use crate::compressor::ImageCompressor;
    use crate::config::CompressConfig;
    use crate::decode::{DecodeError, DecodedImage};
    use crate::encode::{EncodeError, OutputFormat};
    use crate::result::MSG_FILE_MISSING;
    use std::sync::{Arc, Mutex};
    use std::thread::ThreadId;

    const KB: usize = 1024;

    /// Scripted codec that also records the thread each decode ran on.
    #[derive(Debug, Default)]
    struct ThreadProbe {
        inner: ScriptedCodec,
        decode_threads: Mutex<Vec<ThreadId>>,
    }

    impl ImageCodec for ThreadProbe {
        fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
            self.decode_threads
                .lock()
                .unwrap()
                .push(std::thread::current().id());
            self.inner.decode(bytes)
        }

        fn encode(
            &self,
            image: &DecodedImage,
            format: OutputFormat,
            quality: u8,
        ) -> Result<Vec<u8>, EncodeError> {
            self.inner.encode(image, format, quality)
        }
    }

    #[tokio::test]
    async fn test_callbacks_run_on_caller_thread() {
        let probe = Arc::new(ThreadProbe {
            inner: ScriptedCodec::producing(600 * KB),
            ..Default::default()
        });
        let compressor = ImageCompressor::with_codec(CompressConfig::default(), probe.clone());
        let mut callback = RecordingCallback::default();

        compressor
            .compress_async(vec![0u8; 2000 * KB], &mut callback)
            .await;

        let caller = std::thread::current().id();
        assert_eq!(callback.threads, vec![caller, caller]);

        let worker_threads = probe.decode_threads.lock().unwrap().clone();
        assert!(!worker_threads.is_empty());
        assert!(worker_threads.iter().all(|id| *id != caller));
    }

    #[tokio::test]
    async fn test_start_precedes_success() {
        let compressor = ImageCompressor::with_codec(
            CompressConfig::default(),
            Arc::new(ScriptedCodec::producing(600 * KB)),
        );
        let mut callback = RecordingCallback::default();

        compressor
            .compress_async(vec![0u8; 2000 * KB], &mut callback)
            .await;

        assert_eq!(callback.events.len(), 2);
        assert_eq!(callback.events[0], CallbackEvent::Start);
        match &callback.events[1] {
            CallbackEvent::Success(result) => {
                assert!(result.was_compressed());
                assert_eq!(result.compressed_size(), 614_400);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_file_routes_to_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let compressor = ImageCompressor::new(CompressConfig::default());
        let mut callback = RecordingCallback::default();

        compressor
            .compress_async(dir.path().join("gone.png"), &mut callback)
            .await;

        assert_eq!(
            callback.events,
            vec![
                CallbackEvent::Start,
                CallbackEvent::Error(MSG_FILE_MISSING.to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_worker_panic_routes_to_on_error() {
        let compressor = ImageCompressor::with_codec(CompressConfig::default(), PanickingCodec);
        let mut callback = RecordingCallback::default();

        compressor.compress_async(vec![1u8, 2, 3], &mut callback).await;

        assert_eq!(callback.events[0], CallbackEvent::Start);
        match &callback.events[1] {
            CallbackEvent::Error(message) => {
                assert!(message.starts_with("Compression task failed:"));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_invocations_are_independent() {
        let small = ImageCompressor::with_codec(
            CompressConfig::new(4096, 80, OutputFormat::Jpeg).unwrap(),
            Arc::new(ScriptedCodec::producing(600 * KB)),
        );
        let tight = ImageCompressor::with_codec(
            CompressConfig::new(100, 80, OutputFormat::Jpeg).unwrap(),
            Arc::new(ScriptedCodec::producing(600 * KB)),
        );

        let a = small.spawn_compress(vec![0u8; 2000 * KB]);
        let b = tight.spawn_compress(vec![0u8; 2000 * KB]);
        let (a, b) = (a.await.unwrap(), b.await.unwrap());

        assert!(!a.was_compressed());
        assert!(b.was_compressed());
    }
}
