//! Editing session for one uploaded image

use std::sync::Arc;

use image::RgbaImage;

use super::messages::{Msg, PointerEvent};
use super::state::{Phase, SelectionState};
use crate::capture::crop::{self, EncodedImage};
use crate::capture::image::SourceImage;
use crate::domain::{ImageGeometry, InteractionMode, Rect, RectDimension, SelectionHistory};
use crate::error::{Error, Result};
use crate::ocr::{OcrStatus, TextExtractor};
use crate::render::preview;

/// Successful extraction of a confirmed selection
#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
    /// Losslessly encoded crop that was sent to the service
    pub image: EncodedImage,
    pub text: String,
}

/// Geometry, history and interaction state owned by one loaded image
///
/// Dropping the session discards all of it; a new upload starts fresh.
#[derive(Debug)]
pub struct EditorSession {
    source: SourceImage,
    geometry: ImageGeometry,
    history: SelectionHistory,
    selection: SelectionState,
    display: RgbaImage,
    status: OcrStatus,
}

impl EditorSession {
    pub fn new(source: SourceImage, viewport: RectDimension) -> Self {
        let geometry = ImageGeometry::fit_to_viewport(source.dimensions(), viewport);
        let display = preview::display_copy(&source.rgba, &geometry);
        log::info!(
            "New session: {}x{} image shown at {}x{} (scale {:.4})",
            source.width(),
            source.height(),
            geometry.display().width(),
            geometry.display().height(),
            geometry.scale_ratio()
        );
        Self {
            source,
            geometry,
            history: SelectionHistory::new(),
            selection: SelectionState::new(),
            display,
            status: OcrStatus::Idle,
        }
    }

    /// Apply one message; returns whether a repaint is needed
    pub fn update(&mut self, msg: Msg) -> bool {
        let changed = match msg {
            Msg::Pointer(PointerEvent::Down(x, y)) => self.selection.pointer_down(x, y),
            Msg::Pointer(PointerEvent::Move(x, y)) => self.selection.pointer_move(x, y),
            Msg::Pointer(PointerEvent::Up | PointerEvent::Leave) => {
                self.selection.pointer_up(&mut self.history)
            }
            Msg::SetTool(mode) => self.selection.switch_tool(mode, &mut self.history),
            Msg::Undo => self.selection.undo(&mut self.history),
            Msg::Redo => self.selection.redo(&mut self.history),
        };
        if !changed && self.selection.is_locked() {
            log::debug!("Ignoring {msg:?} while extraction is running");
        }
        changed
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    pub fn geometry(&self) -> &ImageGeometry {
        &self.geometry
    }

    pub fn history(&self) -> &SelectionHistory {
        &self.history
    }

    /// Selection currently shown, in display space
    pub fn selection(&self) -> Rect {
        self.selection.current()
    }

    pub fn mode(&self) -> InteractionMode {
        self.selection.mode()
    }

    pub fn phase(&self) -> Phase {
        self.selection.phase()
    }

    pub fn is_locked(&self) -> bool {
        self.selection.is_locked()
    }

    pub fn can_undo(&self) -> bool {
        !self.is_locked() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_locked() && self.history.can_redo()
    }

    pub fn status(&self) -> &OcrStatus {
        &self.status
    }

    /// Display-sized image with the current selection overlay
    pub fn preview(&self) -> RgbaImage {
        preview::render_preview(&self.display, self.selection.current())
    }

    /// Validate the selection and take the processing lock
    ///
    /// Fails with `EmptySelection` without locking when nothing is selected.
    pub fn begin_confirm(&mut self) -> Result<Rect> {
        if self.selection.is_locked() {
            return Err(Error::Busy);
        }
        let rect = self.selection.current();
        if rect.is_empty() {
            return Err(Error::EmptySelection);
        }
        self.selection.begin_processing();
        self.status = OcrStatus::Running;
        Ok(rect)
    }

    /// Release the processing lock and record the outcome
    pub fn finish_confirm(&mut self, result: &Result<Extraction>) {
        self.selection.end_processing();
        self.status = match result {
            Ok(extraction) => OcrStatus::Done(extraction.text.clone()),
            Err(err) => {
                log::error!("Error extracting text: {err}");
                OcrStatus::Error(err.user_message())
            }
        };
    }

    /// Crop the selection at full resolution and send it for extraction
    ///
    /// The lock is held for the whole round trip and released on every
    /// outcome. On failure the committed selection is left intact so the
    /// same region can be retried.
    pub async fn confirm(&mut self, extractor: &dyn TextExtractor) -> Result<Extraction> {
        let rect = self.begin_confirm()?;
        let result = self.run_extraction(rect, extractor).await;
        self.finish_confirm(&result);
        result
    }

    async fn run_extraction(&self, rect: Rect, extractor: &dyn TextExtractor) -> Result<Extraction> {
        let source = Arc::clone(&self.source.rgba);
        let geometry = self.geometry;
        let image = tokio::task::spawn_blocking(move || crop::crop_and_encode(&source, rect, &geometry))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(format!("crop task failed: {e}"))))??;
        let text = extractor.extract_text(&image).await?;
        Ok(Extraction { image, text })
    }
}
