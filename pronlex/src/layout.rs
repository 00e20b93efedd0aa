//! 入出力ファイルの配置
//!
//! 分類ステージは固定のディレクトリ構成で動作します。入力ディレクトリには
//! 単語リストと任意の上書きリストを、出力ディレクトリには生成された
//! 語彙ファイルと単語リストを置きます。

use std::path::{Path, PathBuf};

/// 入力単語リスト
pub const WORDLIST: &str = "wordlist.txt";
/// 曖昧な単語のリスト
pub const AMBIGUOUS: &str = "ambiguous.txt";
/// 参照辞書から除外する単語のリスト
pub const EXCLUDE: &str = "exclude.txt";
/// 手動で発音を作成する単語のリスト
pub const MANUAL: &str = "manual.txt";
/// 手動で作成された発音のマップ
pub const MANUAL_MAP: &str = "manual_map.txt";
/// 参照辞書が見落とした単語のリスト
pub const MISSED: &str = "missed.txt";
/// 参照辞書が見落とした単語の発音マップ
pub const MISSED_MAP: &str = "missed_map.txt";
/// 文字から音への規則表
pub const LETTER_TO_SOUND: &str = "letter_to_sound.txt";

/// 参照辞書で発音が得られた語彙
pub const LEXICON_EN: &str = "lexicon_en.txt";
/// 変換器に渡す一時語彙
pub const LEXICON_NON_ENG_TMP: &str = "lexicon_non_eng_tmp.txt";
/// 変換器が出力する語彙
pub const LEXICON_NON_ENG: &str = "lexicon_non_eng.txt";
/// 既知語の単語リスト
pub const WORDS_EN: &str = "words_en.txt";
/// 非参照語の単語リスト
pub const WORDS_NON_ENG: &str = "words_non_eng.txt";

/// 入力と出力のディレクトリ構成
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("input", "output")
    }
}

impl Layout {
    /// 新しい構成を作成します。
    ///
    /// # 引数
    ///
    /// * `input_dir` - 入力ディレクトリ
    /// * `output_dir` - 出力ディレクトリ
    pub fn new<I, O>(input_dir: I, output_dir: O) -> Self
    where
        I: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// 入力ディレクトリを返します。
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// 出力ディレクトリを返します。
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 入力ディレクトリ内のファイルのパスを返します。
    pub fn input(&self, name: &str) -> PathBuf {
        self.input_dir.join(name)
    }

    /// 出力ディレクトリ内のファイルのパスを返します。
    pub fn output(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    /// この構成における変換ステージの既定のパスを返します。
    pub fn transducer_paths(&self) -> TransducerPaths {
        TransducerPaths {
            words: self.output(LEXICON_NON_ENG_TMP),
            config: self.input(LETTER_TO_SOUND),
            output_file: self.output(LEXICON_NON_ENG),
            manual_map: self.input(MANUAL_MAP),
        }
    }
}

/// 変換ステージが扱うファイルのパス
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransducerPaths {
    /// 1行1トークンの入力ファイル。変換後に削除されます。
    pub words: PathBuf,

    /// 文字から音への規則表
    pub config: PathBuf,

    /// 出力する語彙ファイル
    pub output_file: PathBuf,

    /// 手動マップ。存在しなくてもかまいません。
    pub manual_map: PathBuf,
}

impl Default for TransducerPaths {
    fn default() -> Self {
        Layout::default().transducer_paths()
    }
}
