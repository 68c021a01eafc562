//! Top-level screen flow: upload, process, results

use std::path::Path;

use super::results::ResultsView;
use crate::capture::image::SourceImage;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ocr::TextExtractor;
use crate::session::EditorSession;

/// Which screen is showing
#[derive(Debug, Default)]
pub enum Screen {
    /// Waiting for an image
    #[default]
    Upload,
    /// Drawing a selection over the uploaded image
    Process(Box<EditorSession>),
    /// Showing the extracted text
    Results(Box<ResultsView>),
}

#[derive(Debug)]
pub struct App {
    config: Config,
    screen: Screen,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            screen: Screen::Upload,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> Option<&EditorSession> {
        match &self.screen {
            Screen::Process(session) => Some(&**session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut EditorSession> {
        match &mut self.screen {
            Screen::Process(session) => Some(&mut **session),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&ResultsView> {
        match &self.screen {
            Screen::Results(results) => Some(&**results),
            _ => None,
        }
    }

    pub fn results_mut(&mut self) -> Option<&mut ResultsView> {
        match &mut self.screen {
            Screen::Results(results) => Some(&mut **results),
            _ => None,
        }
    }

    /// Start a fresh session on `source`, discarding any previous one
    pub fn load(&mut self, source: SourceImage) {
        let session = EditorSession::new(source, self.config.viewport_dimensions());
        self.screen = Screen::Process(Box::new(session));
    }

    /// Accept a dropped or chosen file
    ///
    /// Returns `Ok(false)` when the file is not an image; such files are
    /// ignored without leaving the current screen.
    pub fn handle_file(&mut self, path: &Path) -> Result<bool> {
        let source = Self::accept(SourceImage::from_path(path))?;
        Ok(self.load_accepted(source))
    }

    /// Accept an in-memory upload with its reported media type
    pub fn handle_bytes(&mut self, bytes: &[u8], media_type: &str) -> Result<bool> {
        let source = Self::accept(SourceImage::from_bytes(bytes, media_type))?;
        Ok(self.load_accepted(source))
    }

    fn accept(decoded: Result<SourceImage>) -> Result<Option<SourceImage>> {
        match decoded {
            Ok(source) => Ok(Some(source)),
            Err(Error::InvalidFileType(what)) => {
                log::debug!("Ignoring non-image upload: {what}");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn load_accepted(&mut self, source: Option<SourceImage>) -> bool {
        match source {
            Some(source) => {
                self.load(source);
                true
            }
            None => false,
        }
    }

    /// Extract text from the current selection
    ///
    /// Moves to the results screen on success. On failure the app stays on
    /// the process screen with the selection intact and the error is
    /// returned for display.
    pub async fn confirm(&mut self, extractor: &dyn TextExtractor) -> Result<()> {
        let Some(session) = self.session_mut() else {
            log::warn!("Confirm requested without an active session");
            return Err(Error::NoImage);
        };
        let extraction = session.confirm(extractor).await?;
        self.screen = Screen::Results(Box::new(ResultsView::new(extraction)));
        Ok(())
    }

    /// Cancel or start over: drop everything and return to upload
    pub fn reset(&mut self) {
        log::debug!("Resetting to upload screen");
        self.screen = Screen::Upload;
    }
}
