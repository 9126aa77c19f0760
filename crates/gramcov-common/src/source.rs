use crate::construct::SourceLocation;
use crate::syntax::{CommentSyntax, SyntaxTable};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Unique identifier for a registered fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u32);

/// Byte offsets of line starts, for offset to line/column lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i as u32 + 1))
            .collect();
        Self {
            line_starts,
            len: content.len() as u32,
        }
    }

    /// Line and column (0-indexed) of a byte offset into `content`, the
    /// text this index was built from. Columns count characters, not bytes.
    pub fn line_col(&self, content: &str, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let start = self.line_starts[line] as usize;
        let column = content
            .get(start..offset as usize)
            .map_or(0, |prefix| prefix.chars().count());
        (line as u32, column as u32)
    }
}

/// A fixture file with its contents.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: SourceId,
    pub path: PathBuf,
    pub content: String,
    pub syntax: CommentSyntax,
    name: Arc<str>,
    lines: LineIndex,
}

impl SourceFile {
    pub fn new(id: SourceId, path: PathBuf, content: String, syntax: CommentSyntax) -> Self {
        let name: Arc<str> = path.display().to_string().into();
        let lines = LineIndex::new(&content);
        Self {
            id,
            path,
            content,
            syntax,
            name,
            lines,
        }
    }

    /// Display name used in report locations.
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// 1-based location of a byte offset.
    pub fn location(&self, offset: u32) -> SourceLocation {
        let (line, col) = self.lines.line_col(&self.content, offset);
        SourceLocation::new(self.name.clone(), line + 1, col + 1)
    }
}

/// Registry of all fixtures read during a run.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: RwLock<Vec<Arc<SourceFile>>>,
    path_to_id: RwLock<FxHashMap<PathBuf, SourceId>>,
    syntaxes: SyntaxTable,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_syntaxes(syntaxes: SyntaxTable) -> Self {
        Self {
            syntaxes,
            ..Self::default()
        }
    }

    /// Register a file, choosing its comment syntax from the extension.
    /// Registering a path twice replaces the lookup entry but keeps both files.
    pub fn add_file(&self, path: impl AsRef<Path>, content: String) -> SourceId {
        let path = path.as_ref().to_path_buf();
        let syntax = self.syntaxes.for_path(&path).clone();

        let mut files = self.files.write().unwrap();
        let mut path_to_id = self.path_to_id.write().unwrap();

        let id = SourceId(files.len() as u32);
        files.push(Arc::new(SourceFile::new(id, path.clone(), content, syntax)));
        path_to_id.insert(path, id);

        id
    }

    pub fn get(&self, id: SourceId) -> Option<Arc<SourceFile>> {
        let files = self.files.read().unwrap();
        files.get(id.0 as usize).cloned()
    }

    pub fn get_by_path(&self, path: impl AsRef<Path>) -> Option<Arc<SourceFile>> {
        let path_to_id = self.path_to_id.read().unwrap();
        let id = path_to_id.get(path.as_ref())?;
        self.get(*id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let text = "let a;\n// pair\nx";
        let index = LineIndex::new(text);
        assert_eq!(index.line_col(text, 0), (0, 0));
        assert_eq!(index.line_col(text, 7), (1, 0));
        assert_eq!(index.line_col(text, 10), (1, 3));
        assert_eq!(index.line_col(text, 15), (2, 0));
    }

    #[test]
    fn test_line_col_clamps_past_end() {
        let index = LineIndex::new("ab");
        assert_eq!(index.line_col("ab", 99), (0, 2));
    }

    #[test]
    fn test_columns_count_characters() {
        let text = "x\n\u{e9}\u{4e2d} // pair";
        let index = LineIndex::new(text);
        let offset = text.find("pair").unwrap() as u32;
        assert_eq!(index.line_col(text, offset), (1, 6));
    }

    #[test]
    fn test_location_is_one_based() {
        let map = SourceMap::new();
        let id = map.add_file("fixture.tsx", "a\r\n  // object\n".to_string());
        let file = map.get(id).unwrap();
        let loc = file.location(6);
        assert_eq!((loc.line, loc.column), (2, 4));
        assert_eq!(&*loc.file, "fixture.tsx");
    }

    #[test]
    fn test_registry_lookup() {
        let map = SourceMap::new();
        let a = map.add_file("a.tsx", "// a".to_string());
        let b = map.add_file("b.py", "# b".to_string());
        assert_ne!(a, b);
        assert_eq!(map.get_by_path("b.py").unwrap().id, b);
        assert_eq!(map.get_by_path("a.tsx").unwrap().id, a);
        assert_eq!(map.get(b).unwrap().syntax.line_comment, "#");
        assert!(map.get_by_path("c.rs").is_none());
    }
}
