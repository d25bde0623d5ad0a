//! Speech-to-text provider port.
//!
//! # Responsibility
//! - Describe the capture (`listen`) and transcription (`recognize`) steps
//!   of an external speech provider.
//! - Define the two failure kinds surfaced to users.
//!
//! # Invariants
//! - Capture blocks until audio is available or the provider gives up.
//! - Recognition is attempted once; there are no retries.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw captured audio handed from `listen` to `recognize`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audio {
    pub samples: Vec<u8>,
    pub sample_rate: u32,
}

/// Recognition failure kinds. Both are non-fatal for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    /// The provider could not transcribe the audio.
    Unintelligible,
    /// The provider could not be reached.
    ServiceUnreachable(String),
}

impl RecognitionError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unintelligible => "Could not understand audio",
            Self::ServiceUnreachable(_) => "Could not request results",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Unintelligible => "unintelligible",
            Self::ServiceUnreachable(_) => "service_unreachable",
        }
    }
}

impl Display for RecognitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unintelligible => f.write_str(self.user_message()),
            Self::ServiceUnreachable(details) => {
                write!(f, "{}: {details}", self.user_message())
            }
        }
    }
}

impl Error for RecognitionError {}

/// External speech-to-text collaborator.
pub trait SpeechRecognizer {
    /// Captures one utterance.
    fn listen(&mut self) -> Result<Audio, RecognitionError>;
    /// Transcribes captured audio.
    fn recognize(&mut self, audio: &Audio) -> Result<String, RecognitionError>;

    /// Captures and transcribes one utterance.
    fn transcribe(&mut self) -> Result<String, RecognitionError> {
        let audio = self.listen()?;
        self.recognize(&audio)
    }
}

/// Recognizer that replays queued outcomes in order.
///
/// An exhausted queue behaves like silence (`Unintelligible`).
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    outcomes: VecDeque<Result<String, RecognitionError>>,
    pending: Option<Result<String, RecognitionError>>,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_says(mut self, transcript: impl Into<String>) -> Self {
        self.outcomes.push_back(Ok(transcript.into()));
        self
    }

    pub fn then_fails(mut self, error: RecognitionError) -> Self {
        self.outcomes.push_back(Err(error));
        self
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn listen(&mut self) -> Result<Audio, RecognitionError> {
        self.pending = Some(
            self.outcomes
                .pop_front()
                .unwrap_or(Err(RecognitionError::Unintelligible)),
        );
        Ok(Audio::default())
    }

    fn recognize(&mut self, _audio: &Audio) -> Result<String, RecognitionError> {
        self.pending
            .take()
            .unwrap_or(Err(RecognitionError::Unintelligible))
    }
}
