//! 単語リストの分類
//!
//! 入力単語リストを上書きリストと参照辞書の検索によって互いに素な分類に分け、
//! 既知語の語彙、変換器に渡す一時語彙、照合用の2つの単語リストを書き出します。
//!
//! ## 手順
//!
//! 1. 入力単語リストの重複を除き、上書きリスト（曖昧・除外・手動・見落とし）の和集合を取り除きます。
//! 2. 残りの候補を整列順に参照辞書で検索します。見つかった単語は最初の発音から強勢の数字を
//!    取り除いて記録し、見つからなかった単語は未解決として記録します。
//! 3. 4つの成果物を書き出します。
//!
//! 見落とし語のマップや手動マップが与えられた場合、語彙にはマップの内容が使われますが、
//! 単語リストには常に元のリストが使われます。照合はこの単語リストに対して行われます。

mod overrides;
mod reconcile;

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::category::Category;
use crate::dictionary::{strip_stress, PronunciationDictionary};
use crate::errors::Result;
use crate::layout::{self, Layout};
use crate::lexicon::{self, Block};
use crate::utils;

pub use crate::classifier::overrides::Overrides;
pub use crate::classifier::reconcile::Reconciliation;

/// 参照辞書で発音が見つかった単語とその発音
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedEntry {
    word: String,
    phonemes: Vec<String>,
}

impl MappedEntry {
    /// 新しいエントリを作成します。
    pub fn new(word: String, phonemes: Vec<String>) -> Self {
        Self { word, phonemes }
    }

    /// 単語を返します。
    pub fn word(&self) -> &str {
        &self.word
    }

    /// 強勢の数字を取り除いた発音を返します。
    pub fn phonemes(&self) -> &[String] {
        &self.phonemes
    }

    /// 語彙ファイルの1行に整形します。
    pub fn to_line(&self) -> String {
        let mut line = self.word.clone();
        for ph in &self.phonemes {
            line.push(' ');
            line.push_str(ph);
        }
        line
    }
}

/// 参照辞書を使って単語リストを分類する
pub struct Classifier<D> {
    dict: D,
}

impl<D> Classifier<D>
where
    D: PronunciationDictionary,
{
    /// 新しい分類器を作成します。
    ///
    /// # 引数
    ///
    /// * `dict` - 参照辞書
    pub fn new(dict: D) -> Self {
        Self { dict }
    }

    /// 単語リストを分類します。
    ///
    /// # 引数
    ///
    /// * `wordlist` - 入力単語リスト。重複を含んでもかまいません。
    /// * `overrides` - 上書きリスト
    ///
    /// # 戻り値
    ///
    /// 分類結果
    pub fn classify<I, S>(&self, wordlist: I, mut overrides: Overrides) -> ClassificationResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        overrides.normalize();

        let input: BTreeSet<String> = wordlist.into_iter().map(Into::into).collect();

        let mut reference_found = vec![];
        let mut unresolved = vec![];
        for word in input.iter().filter(|w| !overrides.contains(w)) {
            match self.dict.lookup(word).and_then(|prons| prons.first()) {
                Some(pron) => {
                    reference_found.push(MappedEntry::new(word.clone(), strip_stress(pron.as_slice())));
                }
                None => unresolved.push(word.clone()),
            }
        }
        log::info!(
            "{} words found in the reference dictionary, {} words not found",
            reference_found.len(),
            unresolved.len(),
        );

        ClassificationResult {
            input,
            overrides,
            reference_found,
            unresolved,
        }
    }
}

/// 分類結果
///
/// すべての分類を1つのレコードとして保持し、成果物の書き出しに使います。
#[derive(Clone, Debug)]
pub struct ClassificationResult {
    input: BTreeSet<String>,
    overrides: Overrides,
    reference_found: Vec<MappedEntry>,
    unresolved: Vec<String>,
}

impl ClassificationResult {
    /// 入力単語の集合を返します。
    pub fn input(&self) -> &BTreeSet<String> {
        &self.input
    }

    /// 分類に使った上書きリストを返します。
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// 参照辞書で見つかった単語を整列順に返します。
    pub fn reference_found(&self) -> &[MappedEntry] {
        &self.reference_found
    }

    /// 参照辞書で見つからなかった単語を整列順に返します。
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// 分類の単語を返します。
    ///
    /// `MissedMapped`は見落とし語と同じ単語を返します。
    pub fn words(&self, category: Category) -> Vec<&str> {
        let list = match category {
            Category::Ambiguous => &self.overrides.ambiguous,
            Category::Excluded => &self.overrides.excluded,
            Category::Manual => &self.overrides.manual,
            Category::Missed | Category::MissedMapped => &self.overrides.missed,
            Category::Unresolved => &self.unresolved,
            Category::ReferenceFound => {
                return self.reference_found.iter().map(MappedEntry::word).collect();
            }
        };
        list.iter().map(String::as_str).collect()
    }

    /// 既知語の語彙を構成します。
    ///
    /// 見落とし語のマップがあればその行を、なければ見落とし語そのものを最初のブロックにします。
    pub fn known_lexicon(&self) -> Vec<Block> {
        let missed = match &self.overrides.missed_map {
            Some(map) => Block::lexicon(Category::MissedMapped, map.clone()),
            None => Block::lexicon(Category::Missed, self.overrides.missed.clone()),
        };
        let found = self.reference_found.iter().map(MappedEntry::to_line).collect();
        vec![missed, Block::lexicon(Category::ReferenceFound, found)]
    }

    /// 変換器に渡す一時語彙を構成します。
    ///
    /// 手動マップが与えられた場合、手動語のブロックは省略されます。
    pub fn non_reference_lexicon(&self) -> Vec<Block> {
        let mut blocks = vec![];
        if !self.overrides.manual_map_supplied {
            blocks.push(Block::lexicon(Category::Manual, self.overrides.manual.clone()));
        }
        blocks.push(Block::lexicon(Category::Ambiguous, self.overrides.ambiguous.clone()));
        blocks.push(Block::lexicon(Category::Excluded, self.overrides.excluded.clone()));
        blocks.push(Block::lexicon(Category::Unresolved, self.unresolved.clone()));
        blocks
    }

    /// 既知語の単語リストを構成します。
    pub fn known_wordlist(&self) -> Vec<Block> {
        [Category::Missed, Category::ReferenceFound]
            .into_iter()
            .map(|c| Block::wordlist(c, self.owned_words(c)))
            .collect()
    }

    /// 非参照語の単語リストを構成します。
    pub fn non_reference_wordlist(&self) -> Vec<Block> {
        [
            Category::Ambiguous,
            Category::Excluded,
            Category::Manual,
            Category::Unresolved,
        ]
        .into_iter()
        .map(|c| Block::wordlist(c, self.owned_words(c)))
        .collect()
    }

    /// 4つの成果物を出力ディレクトリに書き出します。
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合にエラーを返します。
    pub fn write(&self, layout: &Layout) -> Result<()> {
        fs::create_dir_all(layout.output_dir())?;
        lexicon::write_blocks(layout.output(layout::LEXICON_EN), &self.known_lexicon())?;
        lexicon::write_blocks(
            layout.output(layout::LEXICON_NON_ENG_TMP),
            &self.non_reference_lexicon(),
        )?;
        lexicon::write_blocks(layout.output(layout::WORDS_EN), &self.known_wordlist())?;
        lexicon::write_blocks(
            layout.output(layout::WORDS_NON_ENG),
            &self.non_reference_wordlist(),
        )?;
        Ok(())
    }

    fn owned_words(&self, category: Category) -> Vec<String> {
        self.words(category).into_iter().map(str::to_string).collect()
    }
}

/// 入力単語リストを読み込みます。
///
/// # エラー
///
/// ファイルが存在しない場合は[`PronlexError::FileNotFound`](crate::errors::PronlexError::FileNotFound)を返します。
pub fn read_wordlist(layout: &Layout) -> Result<Vec<String>> {
    utils::read_nonblank_lines(utils::open_required(layout.input(layout::WORDLIST))?)
}

/// 出力ディレクトリ以下の`.txt`ファイルをすべて削除します。
///
/// ディレクトリが存在しない場合は作成します。
///
/// # 戻り値
///
/// 削除したファイルの数
pub fn purge_outputs(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        return Ok(0);
    }
    let mut removed = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        let is_txt = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if entry.file_type().is_file() && is_txt {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    log::debug!("Removed {} files from {}", removed, dir.display());
    Ok(removed)
}

/// 生成されたファイルのエントリ数
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputCounts {
    /// 入力単語リストの行数
    pub wordlist: usize,
    /// 既知語の語彙の行数
    pub known_lexicon: usize,
    /// 一時語彙の行数
    pub non_reference_lexicon: usize,
    /// 既知語リストの行数
    pub known_words: usize,
    /// 非参照語リストの行数
    pub non_reference_words: usize,
}

impl OutputCounts {
    /// 入力と出力のファイルのエントリ数を数えます。
    pub fn from_layout(layout: &Layout) -> Result<Self> {
        Ok(Self {
            wordlist: utils::count_entries(layout.input(layout::WORDLIST))?,
            known_lexicon: utils::count_entries(layout.output(layout::LEXICON_EN))?,
            non_reference_lexicon: utils::count_entries(layout.output(layout::LEXICON_NON_ENG_TMP))?,
            known_words: utils::count_entries(layout.output(layout::WORDS_EN))?,
            non_reference_words: utils::count_entries(layout.output(layout::WORDS_NON_ENG))?,
        })
    }
}

/// 分類ステージ全体の結果
#[derive(Clone, Debug)]
pub struct ClassifyReport {
    /// 見つからなかった任意ファイルの名前
    pub absent: Vec<&'static str>,
    /// 見落とし語のマップが語彙に含まれたかどうか
    pub missed_map_supplied: bool,
    /// 手動マップが与えられたかどうか
    pub manual_map_supplied: bool,
    /// 生成されたファイルのエントリ数
    pub counts: OutputCounts,
    /// 語数照合の結果
    pub reconciliation: Reconciliation,
}

/// 分類ステージを実行します。
///
/// 出力ディレクトリの消去、入力の読み込み、分類、書き出し、照合を順に行います。
///
/// # 引数
///
/// * `layout` - ディレクトリ構成
/// * `dict` - 参照辞書
///
/// # エラー
///
/// 入力単語リストが存在しない場合や、ファイルの読み書きに失敗した場合にエラーを返します。
pub fn run<D>(layout: &Layout, dict: D) -> Result<ClassifyReport>
where
    D: PronunciationDictionary,
{
    log::info!("Cleaning output dir");
    purge_outputs(layout.output_dir())?;

    log::info!("Reading input files");
    let overrides = Overrides::load(layout)?;
    let wordlist = read_wordlist(layout)?;

    log::info!("Checking the reference dictionary");
    let result = Classifier::new(dict).classify(wordlist, overrides);

    log::info!("Writing lexicon files and wordlists");
    result.write(layout)?;

    log::info!("Verifying");
    let reconciliation = Reconciliation::from_outputs(layout, result.input())?;
    let counts = OutputCounts::from_layout(layout)?;

    Ok(ClassifyReport {
        absent: result.overrides().absent().to_vec(),
        missed_map_supplied: result.overrides().missed_map.is_some(),
        manual_map_supplied: result.overrides().manual_map_supplied,
        counts,
        reconciliation,
    })
}
