//! ファイル読み込みのユーティリティ関数を提供するモジュール
//!
//! すべての入力ファイルは「1行1レコード、`#`で始まる行はコメント、空行は無視」という
//! 共通の行形式を持ちます。このモジュールはその形式の読み込みと、
//! 必須ファイル・任意ファイルのオープンを扱います。

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use crate::errors::{PronlexError, Result};

/// u32から他の型への変換を提供するトレイト
pub trait FromU32 {
    /// u32値から実装型を生成する
    fn from_u32(src: u32) -> Self;
}

impl FromU32 for usize {
    #[inline(always)]
    fn from_u32(src: u32) -> Self {
        // The crate is compiled only for 32- and 64-bit targets.
        src as usize
    }
}

/// 空行とコメント行を除いた行を読み込む
///
/// 各行は末尾の空白が取り除かれます。先頭の空白は保持されます。
///
/// # 引数
///
/// * `rdr` - 読み込み元
///
/// # 戻り値
///
/// 出現順の行のベクター
///
/// # 例
///
/// ```
/// # use pronlex::utils::read_nonblank_lines;
/// let text = "# header \n\ncat\ndog  \n\n";
/// let lines = read_nonblank_lines(text.as_bytes()).unwrap();
/// assert_eq!(lines, vec!["cat", "dog"]);
/// ```
pub fn read_nonblank_lines<R>(rdr: R) -> Result<Vec<String>>
where
    R: Read,
{
    let mut lines = vec![];
    for line in BufReader::new(rdr).lines() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        lines.push(line.to_string());
    }
    Ok(lines)
}

/// 必須の入力ファイルを開く
///
/// ファイルが存在しない場合は[`PronlexError::FileNotFound`]を返します。
///
/// # 引数
///
/// * `path` - ファイルのパス
///
/// # 戻り値
///
/// 開かれたファイル
///
/// # エラー
///
/// ファイルが存在しない場合、ディレクトリである場合、またはその他のI/Oエラーの場合に
/// エラーを返します。
pub fn open_required<P>(path: P) -> Result<File>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        return Err(PronlexError::PathIsDirectory(path.to_path_buf()));
    }
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PronlexError::FileNotFound(path.to_path_buf()),
        _ => PronlexError::IoError(e),
    })
}

/// 任意の入力ファイルを開く
///
/// ファイルが存在しない場合は`Ok(None)`を返します。
pub fn open_optional<P>(path: P) -> Result<Option<File>>
where
    P: AsRef<Path>,
{
    match open_required(path) {
        Ok(file) => Ok(Some(file)),
        Err(PronlexError::FileNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// ファイル内のエントリ数（空行とコメント行を除いた行数）を数える
///
/// # エラー
///
/// ファイルが存在しない場合は[`PronlexError::FileNotFound`]を返します。
pub fn count_entries<P>(path: P) -> Result<usize>
where
    P: AsRef<Path>,
{
    Ok(read_nonblank_lines(open_required(path)?)?.len())
}

/// 整列と重複除去を行う
pub(crate) fn sorted_unique(mut words: Vec<String>) -> Vec<String> {
    words.sort_unstable();
    words.dedup();
    words
}

#[cfg(test)]
/// HashMapリテラルを簡潔に記述するためのマクロ
///
/// キーと値のペアを`=>`演算子で指定し、カンマで区切って記述します。
///
/// # 例
///
/// ```ignore
/// let dict = hashmap! {
///     "cat".to_string() => vec![vec!["K".to_string(), "AE1".to_string(), "T".to_string()]],
/// };
/// ```
macro_rules! hashmap {
    ( $($k:expr => $v:expr,)* ) => {
        {
            #[allow(unused_mut)]
            let mut h = hashbrown::HashMap::new();
            $(
                h.insert($k, $v);
            )*
            h
        }
    };
    ( $($k:expr => $v:expr),* ) => {
        hashmap![$( $k => $v, )*]
    };
}

#[cfg(test)]
pub(crate) use hashmap;
