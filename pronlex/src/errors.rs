//! エラー型の定義
//!
//! このモジュールは、pronlexライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt::{self, Debug};
use std::path::PathBuf;

/// pronlex専用のResult型
///
/// エラー型としてデフォルトで[`PronlexError`]を使用します。
pub type Result<T, E = PronlexError> = std::result::Result<T, E>;

/// pronlexのエラー型
///
/// 致命的なエラーのみを表現します。上書きリストの欠落や語数の不一致などの
/// 注意喚起は各ステージのレポートに記録され、エラーにはなりません。
#[derive(Debug, thiserror::Error)]
pub enum PronlexError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 必須の入力ファイルが存在しない
    ///
    /// 単語リスト、参照辞書、トークンファイル、規則表のいずれかが見つからない場合に発生します。
    #[error("File not found: '{0}'")]
    FileNotFound(PathBuf),

    /// ディレクトリが指定されたエラー
    ///
    /// ファイルが期待される場所にディレクトリが指定された場合に発生します。
    #[error("The path '{0}' is a directory, but a file was expected.")]
    PathIsDirectory(PathBuf),

    /// I/Oエラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// ディレクトリ走査エラー
    ///
    /// [`walkdir::Error`]のエラーバリアント。
    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),

    /// 一時ファイルの永続化エラー
    ///
    /// [`tempfile::PersistError`]のエラーバリアント。
    #[error(transparent)]
    PathPersist(#[from] tempfile::PersistError),

    /// 整数変換エラー
    ///
    /// [`TryFromIntError`](std::num::TryFromIntError)のエラーバリアント。
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),
}

impl PronlexError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}
