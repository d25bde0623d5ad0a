//! Typed-transcript stand-in for a speech-to-text provider.
//!
//! The CLI has no microphone access; "listening" reads one line of text,
//! either from stdin or from the `--transcript` flag.

use smartnote_core::{Audio, RecognitionError, SpeechRecognizer};
use std::io::{self, BufRead, Write};

const TEXT_SAMPLE_RATE: u32 = 0;

pub enum TranscriptSource {
    Stdin,
    Scripted(Option<String>),
}

pub struct TranscriptRecognizer {
    source: TranscriptSource,
}

impl TranscriptRecognizer {
    pub fn stdin() -> Self {
        Self {
            source: TranscriptSource::Stdin,
        }
    }

    pub fn scripted(text: impl Into<String>) -> Self {
        Self {
            source: TranscriptSource::Scripted(Some(text.into())),
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        match &mut self.source {
            TranscriptSource::Scripted(text) => Ok(text.take().unwrap_or_default()),
            TranscriptSource::Stdin => {
                print!("Listening... Speak now! ");
                io::stdout().flush()?;
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                Ok(line)
            }
        }
    }
}

impl SpeechRecognizer for TranscriptRecognizer {
    fn listen(&mut self) -> Result<Audio, RecognitionError> {
        let line = self
            .read_line()
            .map_err(|err| RecognitionError::ServiceUnreachable(err.to_string()))?;
        Ok(Audio {
            samples: line.into_bytes(),
            sample_rate: TEXT_SAMPLE_RATE,
        })
    }

    fn recognize(&mut self, audio: &Audio) -> Result<String, RecognitionError> {
        let text =
            std::str::from_utf8(&audio.samples).map_err(|_| RecognitionError::Unintelligible)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(RecognitionError::Unintelligible);
        }
        Ok(text.to_string())
    }
}
