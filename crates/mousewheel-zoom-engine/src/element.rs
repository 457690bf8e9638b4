use crate::ZoomError;

/// Class prefix the drawing plugin puts on its rendered SVG images.
const DRAWING_CLASS_PREFIX: &str = "excalidraw-svg";

/// Length of the extension marker trailing a drawing's `filesource` (`.md`).
const DRAWING_SUFFIX_LEN: usize = 3;

/// The attributes of an on-screen image element that the zoom cycle reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageElement {
    pub src: String,
    pub classes: Vec<String>,
    /// Source document of a drawing node; its `src` is only a rendered raster.
    pub filesource: Option<String>,
    /// Intrinsic width of the loaded image, when the host knows it.
    pub natural_width: Option<u32>,
}

impl ImageElement {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_filesource(mut self, filesource: impl Into<String>) -> Self {
        self.filesource = Some(filesource.into());
        self
    }

    pub fn with_natural_width(mut self, width: u32) -> Self {
        self.natural_width = Some(width);
        self
    }

    fn is_drawing(&self) -> bool {
        self.classes
            .iter()
            .any(|class| class.starts_with(DRAWING_CLASS_PREFIX))
    }
}

/// Where the bytes of an image come from, which decides how it is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Vault file served through the host's local URI scheme.
    Local(String),
    /// `http(s)` URL embedded with link syntax.
    Remote(String),
    /// Drawing node; carries the drawing's file name without extension.
    Drawing(String),
}

impl ImageSource {
    pub fn classify(element: &ImageElement) -> Result<Self, ZoomError> {
        let src = element.src.as_str();
        if src.starts_with("http://") || src.starts_with("https://") {
            return Ok(Self::Remote(src.to_string()));
        }
        if element.is_drawing() {
            let filesource = element.filesource.as_deref().ok_or_else(|| {
                ZoomError::Unsupported(format!("drawing without filesource: {src}"))
            })?;
            return Ok(Self::Drawing(drawing_name(filesource)));
        }
        if src.starts_with("app://") {
            return Ok(Self::Local(src.to_string()));
        }
        Err(ZoomError::Unsupported(src.to_string()))
    }
}

fn drawing_name(filesource: &str) -> String {
    let cut = filesource
        .char_indices()
        .rev()
        .nth(DRAWING_SUFFIX_LEN - 1)
        .map_or(0, |(i, _)| i);
    let stem = &filesource[..cut];
    stem.rsplit('/').next().unwrap_or(stem).to_string()
}
