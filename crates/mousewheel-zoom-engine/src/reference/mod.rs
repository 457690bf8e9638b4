//! Locating an image's reference inside raw markdown text.
//!
//! An on-screen image only knows its source (a local URI, a remote URL or a
//! drawing file). The resolver maps that back to the exact substring the
//! document uses for it, so the edit generator can anchor on text that is
//! guaranteed to be present:
//!
//! - `![[folder/name.png|ctr]]` resolves to `folder/name.png|ctr` (wiki embed)
//! - `![alt](folder/name%20x.png)` resolves to `folder/name%20x.png` (link embed)
//! - `![](https://host/i.png)` resolves to the URL itself (link embed)

mod table;

use regex::Regex;
use std::sync::OnceLock;

use crate::ZoomError;
use crate::element::ImageSource;

pub use table::is_in_table;

/// Leftover of a `%2F` that some platforms fail to decode in front of the name.
const UNDECODED_SEPARATOR: &str = "2F";

/// Which embed syntax encloses a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceDialect {
    /// `![[name]]`, optionally `![[name|attrs|size]]`.
    WikiEmbed,
    /// `![alt](name)`, optionally `![alt|size](name)`.
    MarkdownLink,
}

impl ReferenceDialect {
    /// Dialect implied by the text right before a reference.
    fn preceding(before: &str) -> Self {
        match before.chars().next_back() {
            Some('[') => Self::WikiEmbed,
            _ => Self::MarkdownLink,
        }
    }
}

/// The resolved identity of one image mention in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Decoded file name or remote URL, before folder and attributes are added.
    pub base_name: String,
    /// Exact substring of the document the edits anchor on.
    pub canonical_form: String,
    pub dialect: ReferenceDialect,
    pub in_table: bool,
}

/// Resolve any classified image source against the document text.
pub fn resolve(source: &ImageSource, text: &str) -> Result<ImageReference, ZoomError> {
    match source {
        ImageSource::Local(uri) => resolve_local(uri, text),
        ImageSource::Remote(url) => resolve_remote(url, text),
        ImageSource::Drawing(name) => resolve_local_name(name, text),
    }
}

/// Resolve a local image URI such as `app://local/C:/notes/image.png?1677337704730`.
pub fn resolve_local(image_uri: &str, text: &str) -> Result<ImageReference, ZoomError> {
    let name = local_name_from_uri(image_uri)?;
    resolve_local_name(&name, text)
}

/// Extract the decoded file name from a local image URI.
///
/// The name is the last path segment before the `?` cache-busting query.
pub fn local_name_from_uri(image_uri: &str) -> Result<String, ZoomError> {
    let malformed = || ZoomError::MalformedUri(image_uri.to_string());

    let decoded = urlencoding::decode(image_uri).map_err(|_| malformed())?;
    let (path, _query) = decoded.rsplit_once('?').ok_or_else(malformed)?;
    let segment = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let name = segment.strip_prefix(UNDECODED_SEPARATOR).unwrap_or(segment);

    if name.is_empty() {
        return Err(malformed());
    }
    Ok(name.to_string())
}

/// Resolve a bare local file name (already decoded) against the document text.
pub fn resolve_local_name(name: &str, text: &str) -> Result<ImageReference, ZoomError> {
    if name.is_empty() {
        return Err(ZoomError::NotFound(name.to_string()));
    }
    let spelling = spellings(name)
        .into_iter()
        .find(|candidate| text.contains(candidate.as_str()))
        .ok_or_else(|| ZoomError::NotFound(name.to_string()))?;
    let start = text
        .find(&spelling)
        .ok_or_else(|| ZoomError::NotFound(spelling.clone()))?;

    let before = &text[..start];
    let folder = folder_prefix(before);
    let dialect = ReferenceDialect::preceding(&before[..before.len() - folder.len()]);

    let mut canonical_form = format!("{folder}{spelling}");
    if dialect == ReferenceDialect::WikiEmbed
        && let Some(suffix) = attribute_suffix(&text[start + spelling.len()..])
    {
        canonical_form.push_str(suffix);
    }

    let in_table = is_in_table(&canonical_form, text);
    log::debug!("Resolved {name:?} to {canonical_form:?} ({dialect:?}, in table: {in_table})");

    Ok(ImageReference {
        base_name: name.to_string(),
        canonical_form,
        dialect,
        in_table,
    })
}

/// Resolve a remote image; the URL is used verbatim.
pub fn resolve_remote(url: &str, text: &str) -> Result<ImageReference, ZoomError> {
    if !text.contains(url) {
        return Err(ZoomError::NotFound(url.to_string()));
    }
    Ok(ImageReference {
        base_name: url.to_string(),
        canonical_form: url.to_string(),
        dialect: ReferenceDialect::MarkdownLink,
        in_table: is_in_table(url, text),
    })
}

/// Spellings a file name may have in markdown, in order of preference.
fn spellings(name: &str) -> [String; 3] {
    [
        name.to_string(),
        urlencoding::encode(name).into_owned(),
        name.replace(' ', "%20"),
    ]
}

/// Folder path written between the opening `[` or `(` and the file name.
fn folder_prefix(before: &str) -> &str {
    let Some(open) = before.rfind(['[', '(']) else {
        return "";
    };
    let prefix = &before[open + 1..];
    // A closing bracket or line break means the name is not inside that embed
    if prefix.contains([']', ')', '\n']) {
        ""
    } else {
        prefix
    }
}

/// Attributes such as `|ctr` that sit between a wiki embed's name and its size.
fn attribute_suffix(after: &str) -> Option<&str> {
    static SUFFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = SUFFIX_REGEX.get_or_init(|| {
        Regex::new(r"^(?:([^\[\]\n]*?)\\?\|\d+\]\]|([^\[\]\n]*?)\]\])")
            .expect("Invalid attribute suffix regex")
    });

    let caps = re.captures(after)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .filter(|suffix| !suffix.is_empty())
}
