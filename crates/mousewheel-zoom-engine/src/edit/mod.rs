//! Find/replace terms that insert or update an image's size annotation.

use regex::Regex;

use crate::ZoomError;
use crate::reference::{ImageReference, ReferenceDialect};

/// Token written in front of a size value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `|`
    Bare,
    /// `\|`, so table renderers do not read the pipe as a new column.
    Escaped,
}

impl Separator {
    pub fn for_reference(reference: &ImageReference) -> Self {
        if reference.in_table {
            Self::Escaped
        } else {
            Self::Bare
        }
    }

    /// The separator as it appears in the document.
    pub fn literal(self) -> &'static str {
        match self {
            Self::Bare => "|",
            Self::Escaped => "\\|",
        }
    }

    /// The separator as a regex fragment matching [`Separator::literal`].
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Bare => r"\|",
            Self::Escaped => r"\\\|",
        }
    }
}

/// An existing size annotation found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeAnnotation {
    pub value: u32,
    pub separator: Separator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TermKind {
    Insert,
    Update,
}

/// A find/replace pair parameterised by a size value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTerm {
    kind: TermKind,
    name: String,
    dialect: ReferenceDialect,
    separator: Separator,
}

impl EditTerm {
    /// Exact substring to locate, given the size currently in the document.
    ///
    /// Insert terms ignore `old_size`: there is no annotation to match yet.
    pub fn find_text(&self, old_size: u32) -> String {
        match self.kind {
            TermKind::Insert => match self.dialect {
                ReferenceDialect::WikiEmbed => self.name.clone(),
                ReferenceDialect::MarkdownLink => format!("]({})", self.name),
            },
            TermKind::Update => self.annotated(old_size),
        }
    }

    /// Exact substring to substitute for [`EditTerm::find_text`].
    pub fn replace_text(&self, new_size: u32) -> String {
        self.annotated(new_size)
    }

    fn annotated(&self, size: u32) -> String {
        let sep = self.separator.literal();
        match self.dialect {
            ReferenceDialect::WikiEmbed => format!("{}{sep}{size}", self.name),
            ReferenceDialect::MarkdownLink => format!("{sep}{size}]({})", self.name),
        }
    }
}

/// Everything needed to rewrite one reference's size.
#[derive(Debug, Clone)]
pub struct EditPlan {
    /// First capture group is the current size.
    pub size_pattern: Regex,
    pub separator: Separator,
    /// Used when the reference already carries a size.
    pub update: EditTerm,
    /// Used when it does not.
    pub insert: EditTerm,
}

impl EditPlan {
    /// The size annotation currently attached to the reference, if any.
    ///
    /// A value too large to represent is an error rather than "no size", so
    /// the caller never inserts a second annotation next to it.
    pub fn current_size(&self, text: &str) -> Result<Option<SizeAnnotation>, ZoomError> {
        let Some(caps) = self.size_pattern.captures(text) else {
            return Ok(None);
        };
        let digits = &caps[1];
        let value: u32 = digits.parse().map_err(|_| {
            ZoomError::Unsupported(format!("size annotation {digits} is out of range"))
        })?;
        Ok(Some(SizeAnnotation {
            value,
            separator: self.separator,
        }))
    }
}

/// Build the edit plan for a resolved reference.
pub fn plan(reference: &ImageReference) -> Result<EditPlan, ZoomError> {
    let separator = Separator::for_reference(reference);
    let name = reference.canonical_form.as_str();
    let sep = separator.pattern();

    let pattern = match reference.dialect {
        ReferenceDialect::WikiEmbed => format!(r"{}{sep}(\d+)", regex::escape(name)),
        ReferenceDialect::MarkdownLink => {
            format!(r"{sep}(\d+)\]{}", regex::escape(&format!("({name})")))
        }
    };
    let size_pattern = Regex::new(&pattern).map_err(|e| ZoomError::Unsupported(e.to_string()))?;

    let term = |kind| EditTerm {
        kind,
        name: name.to_string(),
        dialect: reference.dialect,
        separator,
    };

    Ok(EditPlan {
        size_pattern,
        separator,
        update: term(TermKind::Update),
        insert: term(TermKind::Insert),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{resolve_local_name, resolve_remote};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn apply(text: &str, term: &EditTerm, old: u32, new: u32) -> String {
        text.replacen(&term.find_text(old), &term.replace_text(new), 1)
    }

    fn size_in(plan: &EditPlan, text: &str) -> Option<u32> {
        plan.current_size(text).unwrap().map(|size| size.value)
    }

    #[rstest]
    #[case(
        "| some | table | ![[example.png]] |",
        r"example\.png\\\|(\d+)",
        "example.png",
        "example.png\\|200",
        "| some | table | ![[example.png\\|200]] |"
    )]
    #[case(
        "Lorem ipsum ![[example.png]] dolor sit amet",
        r"example\.png\|(\d+)",
        "example.png",
        "example.png|200",
        "Lorem ipsum ![[example.png|200]] dolor sit amet"
    )]
    #[case(
        "Lorem ipsum ![[example.png|ctr]] dolor sit amet",
        r"example\.png\|ctr\|(\d+)",
        "example.png|ctr",
        "example.png|ctr|200",
        "Lorem ipsum ![[example.png|ctr|200]] dolor sit amet"
    )]
    #[case(
        "| some | table | ![[example.png\\|ctr]] |",
        r"example\.png\\\|ctr\\\|(\d+)",
        "example.png\\|ctr",
        "example.png\\|ctr\\|200",
        "| some | table | ![[example.png\\|ctr\\|200]] |"
    )]
    #[case(
        "This is a test file with an image: ![](example.png)",
        r"\|(\d+)\]\(example\.png\)",
        "](example.png)",
        "|200](example.png)",
        "This is a test file with an image: ![|200](example.png)"
    )]
    #[case(
        "| some | table | ![](example.png) |",
        r"\\\|(\d+)\]\(example\.png\)",
        "](example.png)",
        "\\|200](example.png)",
        "| some | table | ![\\|200](example.png) |"
    )]
    #[case(
        "| some | table | ![das](example.png) |",
        r"\\\|(\d+)\]\(example\.png\)",
        "](example.png)",
        "\\|200](example.png)",
        "| some | table | ![das\\|200](example.png) |"
    )]
    #[case(
        "This is a test file with an image: ![](folder/example.png)",
        r"\|(\d+)\]\(folder/example\.png\)",
        "](folder/example.png)",
        "|200](folder/example.png)",
        "This is a test file with an image: ![|200](folder/example.png)"
    )]
    #[case(
        "| some | table | ![](folder/example.png) |",
        r"\\\|(\d+)\]\(folder/example\.png\)",
        "](folder/example.png)",
        "\\|200](folder/example.png)",
        "| some | table | ![\\|200](folder/example.png) |"
    )]
    fn test_insert_size(
        #[case] text: &str,
        #[case] pattern: &str,
        #[case] find: &str,
        #[case] replace: &str,
        #[case] expected: &str,
    ) {
        let reference = resolve_local_name("example.png", text).unwrap();
        let plan = plan(&reference).unwrap();

        assert_eq!(plan.size_pattern.as_str(), pattern);
        assert_eq!(size_in(&plan, text), None);
        assert_eq!(plan.insert.find_text(100), find);
        assert_eq!(plan.insert.replace_text(200), replace);
        assert_eq!(apply(text, &plan.insert, 0, 200), expected);
    }

    #[rstest]
    #[case(
        "| some | table | ![[example.png\\|100]] |",
        "example.png\\|100",
        "| some | table | ![[example.png\\|200]] |"
    )]
    #[case(
        "Lorem ipsum ![[example.png|100]] dolor sit amet",
        "example.png|100",
        "Lorem ipsum ![[example.png|200]] dolor sit amet"
    )]
    #[case(
        "This is a test file with an image: ![|100](example.png)",
        "|100](example.png)",
        "This is a test file with an image: ![|200](example.png)"
    )]
    #[case(
        "| some | table | ![\\|100](example.png) |",
        "\\|100](example.png)",
        "| some | table | ![\\|200](example.png) |"
    )]
    #[case(
        "This is a test file with an image: ![|100](folder/example.png)",
        "|100](folder/example.png)",
        "This is a test file with an image: ![|200](folder/example.png)"
    )]
    #[case(
        "| some | table | ![\\|100](folder/example.png) |",
        "\\|100](folder/example.png)",
        "| some | table | ![\\|200](folder/example.png) |"
    )]
    fn test_update_size(#[case] text: &str, #[case] find: &str, #[case] expected: &str) {
        let reference = resolve_local_name("example.png", text).unwrap();
        let plan = plan(&reference).unwrap();

        let current = plan.current_size(text).unwrap().unwrap();
        assert_eq!(current.value, 100);
        assert_eq!(current.separator, Separator::for_reference(&reference));
        assert_eq!(plan.update.find_text(100), find);
        assert_eq!(apply(text, &plan.update, 100, 200), expected);
    }

    #[test]
    fn test_update_size_with_encoded_spaces() {
        let text = "This is a test file with an image: ![|100](folder/example%20picture.png)";
        let reference = resolve_local_name("example picture.png", text).unwrap();
        let plan = plan(&reference).unwrap();

        insta::assert_snapshot!(plan.size_pattern.as_str(), @r"\|(\d+)\]\(folder/example%20picture\.png\)");
        assert_eq!(size_in(&plan, text), Some(100));
        assert_eq!(
            plan.update.replace_text(200),
            "|200](folder/example%20picture.png)"
        );
        assert_eq!(
            apply(text, &plan.update, 100, 200),
            "This is a test file with an image: ![|200](folder/example%20picture.png)"
        );
    }

    #[rstest]
    #[case(
        "This is a test file with an image: ![](https://www.example.com/image.png)",
        r"\|(\d+)\]\(https://www\.example\.com/image\.png\)",
        "This is a test file with an image: ![|200](https://www.example.com/image.png)"
    )]
    #[case(
        "| This | is | a | test | ![](https://www.example.com/image.png) |",
        r"\\\|(\d+)\]\(https://www\.example\.com/image\.png\)",
        "| This | is | a | test | ![\\|200](https://www.example.com/image.png) |"
    )]
    fn test_remote_insert(#[case] text: &str, #[case] pattern: &str, #[case] expected: &str) {
        let url = "https://www.example.com/image.png";
        let plan = plan(&resolve_remote(url, text).unwrap()).unwrap();

        assert_eq!(plan.size_pattern.as_str(), pattern);
        assert_eq!(size_in(&plan, text), None);
        assert_eq!(plan.insert.find_text(0), format!("]({url})"));
        assert_eq!(apply(text, &plan.insert, 0, 200), expected);
    }

    #[test]
    fn test_metacharacters_in_name_match_literally() {
        let text = "![[a(b)c.png|40]] and ![[ab.png|90]]";
        let literal = plan(&resolve_local_name("a(b)c.png", text).unwrap()).unwrap();
        assert_eq!(size_in(&literal, text), Some(40));

        let decoy = "![[abc.png|90]]";
        let reference = ImageReference {
            base_name: "a.c".to_string(),
            canonical_form: "a.c".to_string(),
            dialect: ReferenceDialect::WikiEmbed,
            in_table: false,
        };
        assert_eq!(size_in(&plan(&reference).unwrap(), decoy), None);
    }

    #[rstest]
    #[case("Lorem ![[example.png|99999999999]] ipsum")]
    #[case("| a | ![\\|4294967296](example.png) |")]
    fn test_oversized_annotation_is_an_error(#[case] text: &str) {
        let plan = plan(&resolve_local_name("example.png", text).unwrap()).unwrap();

        assert!(matches!(
            plan.current_size(text),
            Err(ZoomError::Unsupported(_))
        ));
    }

    #[test]
    fn test_separator_matches_table_membership() {
        for (text, separator) in [
            ("| x | ![[example.png]] |", Separator::Escaped),
            ("![[example.png]]", Separator::Bare),
            ("| x | ![](example.png) |", Separator::Escaped),
            ("![](example.png)", Separator::Bare),
        ] {
            let plan = plan(&resolve_local_name("example.png", text).unwrap()).unwrap();
            assert_eq!(plan.separator, separator, "{text}");
            assert!(plan.insert.replace_text(5).contains(separator.literal()));
            assert!(plan.update.find_text(5).contains(separator.literal()));
        }
    }
}
