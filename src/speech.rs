// File: src/speech.rs
use crate::error::SpeechError;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::process::{Child, Command, Stdio};

/// What to say and in which language (a BCP 47 tag such as `en-US`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub lang: String,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self { text: text.into(), lang: lang.into() }
    }
}

/// An external text-to-speech engine.
pub trait SpeechSynthesizer {
    /// Starts speaking without waiting for playback to finish.
    fn speak(&mut self, request: &SpeechRequest) -> Result<(), SpeechError>;
    /// Stops whatever is currently being spoken.
    fn cancel(&mut self);
}

/// Used when speech is disabled.
#[derive(Debug, Default)]
pub struct SilentSpeech;

impl SpeechSynthesizer for SilentSpeech {
    fn speak(&mut self, _request: &SpeechRequest) -> Result<(), SpeechError> {
        Ok(())
    }

    fn cancel(&mut self) {}
}

/// Runs a TTS program per request, e.g. `espeak-ng -v {voice} {text}`.
///
/// The argv template may contain `{text}`, `{lang}` and `{voice}`. `{voice}`
/// resolves through `voices`, falling back to the language tag.
pub struct CommandSpeech {
    template: Vec<String>,
    voices: BTreeMap<String, String>,
    current: Option<Child>,
}

impl CommandSpeech {
    pub fn new(template: Vec<String>, voices: BTreeMap<String, String>) -> Self {
        Self { template, voices, current: None }
    }

    fn voice_for<'a>(&'a self, lang: &'a str) -> &'a str {
        self.voices.get(lang).map(String::as_str).unwrap_or(lang)
    }

    /// Expands the template for one request into program + arguments.
    pub fn argv(&self, request: &SpeechRequest) -> Vec<String> {
        let voice = self.voice_for(&request.lang);
        self.template
            .iter()
            .map(|arg| {
                arg.replace("{voice}", voice)
                    .replace("{lang}", &request.lang)
                    .replace("{text}", &request.text)
            })
            .collect()
    }
}

impl SpeechSynthesizer for CommandSpeech {
    fn speak(&mut self, request: &SpeechRequest) -> Result<(), SpeechError> {
        let argv = self.argv(request);
        let (program, args) = argv.split_first().ok_or(SpeechError::NoCommand)?;
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn { program: program.clone(), source })?;
        self.current = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            // Already exited is fine; kill only fails then.
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// The boundary in front of a synthesizer. A new request supersedes the
/// pending one, and failures never reach the caller.
pub struct Announcer {
    synth: Box<dyn SpeechSynthesizer>,
}

impl Announcer {
    pub fn new(synth: Box<dyn SpeechSynthesizer>) -> Self {
        Self { synth }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentSpeech))
    }

    pub fn say(&mut self, request: &SpeechRequest) {
        self.synth.cancel();
        debug!("speak {:?} in {}", request.text, request.lang);
        if let Err(e) = self.synth.speak(request) {
            warn!("speech failed: {}", e);
        }
    }

    pub fn hush(&mut self) {
        self.synth.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl SpeechSynthesizer for Recorder {
        fn speak(&mut self, request: &SpeechRequest) -> Result<(), SpeechError> {
            self.log.borrow_mut().push(format!("speak {}", request.text));
            if self.fail {
                Err(SpeechError::NoCommand)
            } else {
                Ok(())
            }
        }

        fn cancel(&mut self) {
            self.log.borrow_mut().push("cancel".to_string());
        }
    }

    #[test]
    fn new_request_cancels_the_previous_one() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut announcer = Announcer::new(Box::new(Recorder { log: log.clone(), fail: false }));
        announcer.say(&SpeechRequest::new("learn", "en-US"));
        announcer.say(&SpeechRequest::new("belajar", "id-ID"));
        assert_eq!(*log.borrow(), vec!["cancel", "speak learn", "cancel", "speak belajar"]);
    }

    #[test]
    fn failures_are_swallowed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut announcer = Announcer::new(Box::new(Recorder { log: log.clone(), fail: true }));
        announcer.say(&SpeechRequest::new("learn", "en-US"));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn template_expands_voice_lang_and_text() {
        let mut voices = BTreeMap::new();
        voices.insert("en-US".to_string(), "en-us".to_string());
        let speech = CommandSpeech::new(
            vec!["espeak-ng".into(), "-v".into(), "{voice}".into(), "[{lang}] {text}".into()],
            voices,
        );
        assert_eq!(
            speech.argv(&SpeechRequest::new("thank you", "en-US")),
            vec!["espeak-ng", "-v", "en-us", "[en-US] thank you"]
        );
        // Unknown languages fall back to their tag.
        assert_eq!(speech.argv(&SpeechRequest::new("ya", "id-ID"))[2], "id-ID");
    }

    #[test]
    fn empty_template_is_an_error() {
        let mut speech = CommandSpeech::new(Vec::new(), BTreeMap::new());
        assert!(matches!(speech.speak(&SpeechRequest::new("a", "en-US")), Err(SpeechError::NoCommand)));
    }

    #[test]
    fn missing_program_reports_spawn_error() {
        let mut speech = CommandSpeech::new(vec!["definitely-not-a-tts-binary-4821".into()], BTreeMap::new());
        let err = speech.speak(&SpeechRequest::new("a", "en-US")).unwrap_err();
        assert!(matches!(err, SpeechError::Spawn { .. }));
    }
}
