use crate::fs::consts::{PATH_CURRENT, PATH_DELIM, PATH_PARENT, PATH_ROOT};
use crate::fs::error::{FsError, FsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `.`, stays in place.
    Current,
    /// `..`, moves to the parent directory.
    Parent,
    /// Any other component.
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathToken {
    pub kind: TokenKind,
    pub value: String,
    pub is_last: bool,
}

/// A tokenized path.
///
/// A leading `root` component marks an absolute path and is not kept as a
/// token. `name` is the final component when that component is a name, i.e.
/// the subject the caller operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub tokens: Vec<PathToken>,
    pub name: Option<String>,
    pub is_absolute: bool,
}

fn token_kind(component: &str) -> TokenKind {
    match component {
        PATH_CURRENT => TokenKind::Current,
        PATH_PARENT => TokenKind::Parent,
        _ => TokenKind::Name,
    }
}

pub fn parse(path: &str) -> FsResult<ParsedPath> {
    let mut components = path.split(PATH_DELIM).filter(|c| !c.is_empty()).peekable();
    if components.peek().is_none() {
        return Err(FsError::invalid("empty path"));
    }

    let is_absolute = components.next_if(|&c| c == PATH_ROOT).is_some();
    let mut tokens: Vec<PathToken> = components
        .map(|c| PathToken {
            kind: token_kind(c),
            value: c.to_string(),
            is_last: false,
        })
        .collect();

    let name = match tokens.last_mut() {
        Some(last) => {
            last.is_last = true;
            (last.kind == TokenKind::Name).then(|| last.value.clone())
        }
        None => None,
    };

    Ok(ParsedPath {
        tokens,
        name,
        is_absolute,
    })
}

impl ParsedPath {
    /// The subject name, or an error naming the path when it has none
    /// (`..`, `.`, `root`).
    pub fn subject(&self) -> FsResult<&str> {
        self.name
            .as_deref()
            .ok_or_else(|| FsError::invalid("path does not end in a name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_name() {
        let p = parse("a").unwrap();
        assert!(!p.is_absolute);
        assert_eq!(p.tokens.len(), 1);
        assert_eq!(p.tokens[0].kind, TokenKind::Name);
        assert!(p.tokens[0].is_last);
        assert_eq!(p.name.as_deref(), Some("a"));
    }

    #[test]
    fn absolute_path_drops_root_marker() {
        let p = parse("root/sub/x").unwrap();
        assert!(p.is_absolute);
        let values: Vec<_> = p.tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, ["sub", "x"]);
        assert!(!p.tokens[0].is_last);
        assert!(p.tokens[1].is_last);
        assert_eq!(p.subject().unwrap(), "x");
    }

    #[test]
    fn root_alone_has_no_tokens() {
        let p = parse("root").unwrap();
        assert!(p.is_absolute);
        assert!(p.tokens.is_empty());
        assert!(p.subject().is_err());
    }

    #[test]
    fn dot_components_are_typed() {
        let p = parse("./../b/..").unwrap();
        let kinds: Vec<_> = p.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Current,
                TokenKind::Parent,
                TokenKind::Name,
                TokenKind::Parent
            ]
        );
        assert!(p.name.is_none());
    }

    #[test]
    fn repeated_slashes_are_ignored() {
        let p = parse("//a///b/").unwrap();
        assert_eq!(p.tokens.len(), 2);
        assert_eq!(p.name.as_deref(), Some("b"));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(parse("").is_err());
        assert!(parse("///").is_err());
    }

    #[test]
    fn root_only_special_when_first() {
        let p = parse("a/root").unwrap();
        assert!(!p.is_absolute);
        assert_eq!(p.name.as_deref(), Some("root"));
    }
}
