//! One scroll event, one read-resolve-rewrite-write cycle.
//!
//! The cycle reads the document fresh every time, so nothing computed for an
//! earlier event can go stale. It either writes the whole new text once or
//! leaves the document alone:
//!
//! 1. confirm the modifier key is still held
//! 2. classify the element under the pointer and find its document
//! 3. resolve the reference and build the edit plan
//! 4. update the existing size, or insert the initial one
//! 5. write only if the text actually changed

use relative_path::RelativePathBuf;

use crate::ZoomError;
use crate::canvas::{self, NodeSize};
use crate::edit::{self, EditPlan};
use crate::element::{ImageElement, ImageSource};
use crate::io::DocumentHost;
use crate::keys::{KeyTracker, Modifiers};
use crate::reference;
use crate::settings::ZoomSettings;

/// Which way the wheel turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Wheel away from the user (negative delta): grow.
    ZoomIn,
    /// Wheel towards the user (positive delta): shrink.
    ZoomOut,
}

impl ScrollDirection {
    pub fn from_delta(delta_y: f64) -> Option<Self> {
        if delta_y < 0.0 {
            Some(Self::ZoomIn)
        } else if delta_y > 0.0 {
            Some(Self::ZoomOut)
        } else {
            None
        }
    }
}

/// What the pointer was over when the wheel turned.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget {
    Image(ImageElement),
    CanvasNode(NodeSize),
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelEvent {
    pub delta_y: f64,
    pub modifiers: Modifiers,
    pub target: ScrollTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ZoomOutcome {
    /// Not a zoom gesture: key not held, no delta, or nothing resizable.
    Ignored,
    /// The computed edit did not change the text; nothing was written.
    Unchanged,
    /// The document was rewritten with the image at `size` pixels.
    Resized {
        document: RelativePathBuf,
        size: u32,
    },
    /// A canvas node should take these dimensions.
    CanvasResized(NodeSize),
}

/// New document text produced by a zoom step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub size: u32,
}

/// Size after one scroll step.
///
/// Shrinking only happens while the result stays above zero, so an image at
/// exactly one step keeps its size.
pub fn next_size(current: u32, direction: ScrollDirection, step: u32) -> u32 {
    match direction {
        ScrollDirection::ZoomIn => current.saturating_add(step),
        ScrollDirection::ZoomOut if current > step => current - step,
        ScrollDirection::ZoomOut => current,
    }
}

/// Size given to an image that has none yet: the configured default, capped
/// by the image's natural width when that is known.
pub fn initial_size(default: u32, natural_width: Option<u32>) -> u32 {
    match natural_width {
        Some(width) if width > 0 => default.min(width),
        _ => default,
    }
}

/// Apply one zoom step to `text`. Returns `None` when the text would not change.
pub fn rewrite(
    text: &str,
    plan: &EditPlan,
    direction: ScrollDirection,
    settings: &ZoomSettings,
    natural_width: Option<u32>,
) -> Result<Option<Rewrite>, ZoomError> {
    let (find, replace, size) = match plan.current_size(text)? {
        Some(current) => {
            let size = next_size(current.value, direction, settings.step_size);
            (
                plan.update.find_text(current.value),
                plan.update.replace_text(size),
                size,
            )
        }
        None => {
            let size = initial_size(settings.initial_size, natural_width);
            (
                plan.insert.find_text(0),
                plan.insert.replace_text(size),
                size,
            )
        }
    };

    let updated = text.replacen(&find, &replace, 1);
    Ok((updated != text).then_some(Rewrite {
        text: updated,
        size,
    }))
}

/// Drives zoom cycles for one host.
pub struct ImageZoom<H: DocumentHost> {
    settings: ZoomSettings,
    keys: KeyTracker,
    host: H,
}

impl<H: DocumentHost> ImageZoom<H> {
    pub fn new(settings: ZoomSettings, host: H) -> Self {
        let keys = KeyTracker::new(settings.modifier_key);
        Self {
            settings,
            keys,
            host,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn key_down(&mut self, code: &str) {
        self.keys.key_down(code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.keys.key_up(code);
    }

    pub fn on_wheel(&mut self, event: &WheelEvent) -> Result<ZoomOutcome, ZoomError> {
        if !self.keys.confirm(event.modifiers) {
            return Ok(ZoomOutcome::Ignored);
        }
        let Some(direction) = ScrollDirection::from_delta(event.delta_y) else {
            return Ok(ZoomOutcome::Ignored);
        };

        match &event.target {
            ScrollTarget::Image(element) => self
                .zoom_image(element, direction)
                .inspect_err(|e| log::warn!("Zoom aborted: {e}")),
            ScrollTarget::CanvasNode(size) if self.settings.resize_in_canvas => {
                let resized = canvas::resize(*size, event.delta_y, self.settings.step_size);
                log::debug!("Canvas node {size:?} -> {resized:?}");
                Ok(ZoomOutcome::CanvasResized(resized))
            }
            ScrollTarget::CanvasNode(_) | ScrollTarget::Other => Ok(ZoomOutcome::Ignored),
        }
    }

    /// Run one cycle for an image, bypassing the modifier key check.
    pub fn zoom_image(
        &mut self,
        element: &ImageElement,
        direction: ScrollDirection,
    ) -> Result<ZoomOutcome, ZoomError> {
        let document = self
            .host
            .document_for(element)
            .ok_or(ZoomError::PaneNotFound)?;
        let source = ImageSource::classify(element)?;

        let text = self.host.read(&document)?;
        let reference = reference::resolve(&source, &text)?;
        let plan = edit::plan(&reference)?;

        let step = rewrite(
            &text,
            &plan,
            direction,
            &self.settings,
            element.natural_width,
        )?;
        let Some(rewrite) = step else {
            log::debug!("{} unchanged, skipping write", reference.canonical_form);
            return Ok(ZoomOutcome::Unchanged);
        };

        self.host.write(&document, &rewrite.text)?;
        log::info!(
            "Resized {} to {}px in {document}",
            reference.canonical_form,
            rewrite.size
        );
        Ok(ZoomOutcome::Resized {
            document,
            size: rewrite.size,
        })
    }
}
