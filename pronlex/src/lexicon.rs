//! 見出し付きブロック形式の語彙ファイルの書き出し
//!
//! 出力される語彙ファイルと単語リストは、`# <見出し>`と空行に続いてエントリが並ぶ
//! ブロックの連なりです。書き出しは出力先と同じディレクトリの一時ファイルに行い、
//! 完了後に置き換えます。

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::category::Category;
use crate::errors::Result;

/// 書き出したファイルのパーミッション
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// 見出し付きのエントリのまとまり
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    label: String,
    entries: Vec<String>,
}

impl Block {
    /// 新しいブロックを作成します。
    pub fn new<S>(label: S, entries: Vec<String>) -> Self
    where
        S: Into<String>,
    {
        Self {
            label: label.into(),
            entries,
        }
    }

    /// 分類の語彙見出しを持つブロックを作成します。
    pub fn lexicon(category: Category, entries: Vec<String>) -> Self {
        Self::new(category.label(), entries)
    }

    /// 分類の単語リスト見出しを持つブロックを作成します。
    pub fn wordlist(category: Category, entries: Vec<String>) -> Self {
        Self::new(category.wordlist_label(), entries)
    }

    /// 見出しを返します。
    pub fn label(&self) -> &str {
        &self.label
    }

    /// エントリを返します。
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// ブロックを書き出します。
    ///
    /// # 引数
    ///
    /// * `wtr` - 書き込み先
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        write!(wtr, "\n# {} \n\n", self.label)?;
        for entry in &self.entries {
            writeln!(wtr, "{entry}")?;
        }
        Ok(())
    }
}

/// ブロックの列をファイルに書き出します。
///
/// # 引数
///
/// * `path` - 出力先
/// * `blocks` - 書き出すブロック
///
/// # エラー
///
/// 書き込みや置き換えに失敗した場合にエラーを返します。
pub fn write_blocks<P>(path: P, blocks: &[Block]) -> Result<()>
where
    P: AsRef<Path>,
{
    write_atomic(path, |wtr| {
        for block in blocks {
            block.write(&mut *wtr)?;
        }
        Ok(())
    })
}

/// 一時ファイルに書き込んでから出力先に置き換えます。
///
/// 書き込みの途中で失敗した場合、出力先は変更されません。
pub fn write_atomic<P, F>(path: P, f: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(dir)?;
    {
        let mut wtr = BufWriter::new(temp_file.as_file_mut());
        f(&mut wtr)?;
        wtr.flush()?;
    }
    // Temporary files are created owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(OUTPUT_MODE))?;
    }
    temp_file.persist(path)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_format() {
        let block = Block::new("CMU ENG words found", vec!["cat K AE T".to_string()]);
        let mut buf = vec![];
        block.write(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\n# CMU ENG words found \n\ncat K AE T\n"
        );
    }

    #[test]
    fn test_write_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words_en.txt");
        std::fs::write(&path, "stale").unwrap();
        let blocks = [
            Block::wordlist(Category::Missed, vec![]),
            Block::wordlist(Category::ReferenceFound, vec!["cat".to_string(), "dog".to_string()]),
        ];
        write_blocks(&path, &blocks).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "\n# missed.txt - supplied words missed by CMU, do these manually \n\n\
             \n# CMU found these ENG words \n\ncat\ndog\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon_en.txt");
        write_atomic(&path, |wtr| Ok(wtr.write_all(b"cat K AE T\n")?)).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
