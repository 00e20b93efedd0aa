//! 文字から音への規則表

use std::cmp::Reverse;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::errors::{PronlexError, Result};
use crate::transducer::trie::GraphemeTrie;
use crate::utils::{self, FromU32};

/// 書記素と、それに一致したときに出力する音素列の組
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundRule {
    grapheme: String,
    phonemes: String,
    num_chars: usize,
}

impl SoundRule {
    /// 新しい規則を作成します。
    ///
    /// # 引数
    ///
    /// * `grapheme` - 書記素。空であってはなりません。
    /// * `phonemes` - 出力する音素列。内部の空白も含めてそのまま出力されます。
    ///
    /// # エラー
    ///
    /// 書記素が空の場合にエラーを返します。
    pub fn new<G, P>(grapheme: G, phonemes: P) -> Result<Self>
    where
        G: Into<String>,
        P: Into<String>,
    {
        let grapheme = grapheme.into();
        if grapheme.is_empty() {
            return Err(PronlexError::invalid_argument(
                "grapheme",
                "must not be empty",
            ));
        }
        let num_chars = grapheme.chars().count();
        Ok(Self {
            grapheme,
            phonemes: phonemes.into(),
            num_chars,
        })
    }

    /// 規則表の1行を解析します。
    ///
    /// 行は最初の空白で書記素と音素列に分けられます。どちらかが欠けている行は`None`になります。
    pub fn parse_line(line: &str) -> Option<Self> {
        let (grapheme, phonemes) = line.trim().split_once(' ')?;
        if phonemes.is_empty() {
            return None;
        }
        Self::new(grapheme, phonemes).ok()
    }

    /// 書記素を返します。
    pub fn grapheme(&self) -> &str {
        &self.grapheme
    }

    /// 音素列を返します。
    pub fn phonemes(&self) -> &str {
        &self.phonemes
    }

    /// 書記素の文字数を返します。
    pub fn num_chars(&self) -> usize {
        self.num_chars
    }
}

/// 書記素の長い順に並べられた規則表
///
/// 同じ長さの書記素は表に現れた順に並びます。
pub struct RuleTable {
    rules: Vec<SoundRule>,
    trie: Option<GraphemeTrie>,
}

impl RuleTable {
    /// 規則の列から規則表を構築します。
    ///
    /// # エラー
    ///
    /// 規則の数が多すぎる場合にエラーを返します。
    pub fn new<I>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = SoundRule>,
    {
        let mut rules: Vec<SoundRule> = rules.into_iter().collect();
        // Stable, so equal-length graphemes keep their table order.
        rules.sort_by_key(|r| Reverse(r.num_chars));
        let trie = GraphemeTrie::from_graphemes(rules.iter().map(SoundRule::grapheme))?;
        Ok(Self { rules, trie })
    }

    /// 規則表ファイルを読み込みます。
    ///
    /// `#`で始まる行は無視され、書記素と音素列の両方を持たない行は読み飛ばされます。
    ///
    /// # 引数
    ///
    /// * `rdr` - 規則表のリーダー
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut rules = vec![];
        for line in BufReader::new(rdr).lines() {
            let line = line?;
            if line.starts_with('#') {
                continue;
            }
            match SoundRule::parse_line(&line) {
                Some(rule) => rules.push(rule),
                None if !line.trim().is_empty() => {
                    log::warn!("Skipped a malformed rule, {line:?}");
                }
                None => {}
            }
        }
        Self::new(rules)
    }

    /// 規則表ファイルを開いて読み込みます。
    ///
    /// # エラー
    ///
    /// ファイルが存在しない場合は[`PronlexError::FileNotFound`]を返します。
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::from_reader(utils::open_required(path)?)
    }

    /// 整列済みの規則を返します。
    pub fn rules(&self) -> &[SoundRule] {
        &self.rules
    }

    /// 規則の数を返します。
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// 規則表が空かどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 入力の先頭で一致する最も長い書記素の規則を返します。
    ///
    /// 表を先頭から走査して最初に一致した規則と同じものを返します。
    #[inline]
    pub fn longest_match(&self, input: &[char]) -> Option<&SoundRule> {
        // Hits come out shortest first.
        let m = self.trie.as_ref()?.common_prefix_iterator(input).last()?;
        Some(&self.rules[usize::from_u32(m.value)])
    }
}
