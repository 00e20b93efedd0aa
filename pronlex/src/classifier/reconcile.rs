//! 語数の照合
//!
//! 生成された2つの単語リストの語数の合計が入力単語リストの語数と一致するかを確かめ、
//! 一致しない場合は重複・欠落・混入した単語を列挙します。

use std::collections::BTreeSet;

use hashbrown::HashSet;

use crate::errors::Result;
use crate::layout::{self, Layout};
use crate::utils;

/// 語数照合の結果
///
/// 不一致は致命的ではありません。診断は作業者が入力を修正するための情報です。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// 入力単語リストの異なり語数
    pub input_count: usize,

    /// 既知語リストの語数
    pub known_count: usize,

    /// 非参照語リストの語数
    pub non_reference_count: usize,

    /// 両方の単語リストに現れる単語
    pub duplicates: Vec<String>,

    /// 入力にあるが単語リストに現れない単語
    pub missing: Vec<String>,

    /// 単語リストにあるが入力に存在しない単語
    pub invented: Vec<String>,
}

impl Reconciliation {
    /// 単語リストを照合します。
    ///
    /// 語数が一致しない場合のみ診断を行います。
    ///
    /// # 引数
    ///
    /// * `input` - 入力単語の集合
    /// * `known` - 既知語リスト
    /// * `non_reference` - 非参照語リスト
    pub fn compute<S>(input: &BTreeSet<String>, known: &[S], non_reference: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let mut rec = Self {
            input_count: input.len(),
            known_count: known.len(),
            non_reference_count: non_reference.len(),
            ..Self::default()
        };
        if rec.is_consistent() {
            return rec;
        }

        let known: HashSet<&str> = known.iter().map(AsRef::as_ref).collect();
        let non_reference: HashSet<&str> = non_reference.iter().map(AsRef::as_ref).collect();

        rec.duplicates = sorted(known.intersection(&non_reference).copied());
        let generated: HashSet<&str> = known.union(&non_reference).copied().collect();
        rec.missing = sorted(
            input
                .iter()
                .map(String::as_str)
                .filter(|w| !generated.contains(w)),
        );
        rec.invented = sorted(generated.into_iter().filter(|w| !input.contains(*w)));
        rec
    }

    /// 出力ディレクトリに書き出された単語リストを読み直して照合します。
    ///
    /// # エラー
    ///
    /// 単語リストが存在しない場合は[`PronlexError::FileNotFound`](crate::errors::PronlexError::FileNotFound)を返します。
    pub fn from_outputs(layout: &Layout, input: &BTreeSet<String>) -> Result<Self> {
        let known = utils::read_nonblank_lines(utils::open_required(layout.output(layout::WORDS_EN))?)?;
        let non_reference =
            utils::read_nonblank_lines(utils::open_required(layout.output(layout::WORDS_NON_ENG))?)?;
        let rec = Self::compute(input, &known, &non_reference);
        if !rec.is_consistent() {
            log::warn!("Wordlist counts differ by {}", rec.difference());
        }
        Ok(rec)
    }

    /// 生成された単語リストの語数の合計を返します。
    pub fn generated_count(&self) -> usize {
        self.known_count + self.non_reference_count
    }

    /// 生成された語数から入力の語数を引いた差を返します。
    pub fn difference(&self) -> i64 {
        // Word counts are far below i64::MAX.
        self.generated_count() as i64 - self.input_count as i64
    }

    /// 語数が一致したかどうかを返します。
    pub fn is_consistent(&self) -> bool {
        self.generated_count() == self.input_count
    }
}

fn sorted<'a, I>(words: I) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut words: Vec<String> = words.map(str::to_string).collect();
    words.sort_unstable();
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_consistent() {
        let rec = Reconciliation::compute(&set(&["a", "b", "c"]), &["a", "b"], &["c"]);
        assert!(rec.is_consistent());
        assert_eq!(rec.difference(), 0);
        assert!(rec.duplicates.is_empty());
    }

    #[test]
    fn test_duplicate() {
        let rec = Reconciliation::compute(&set(&["a", "b"]), &["a", "b"], &["b"]);
        assert_eq!(rec.difference(), 1);
        assert_eq!(rec.duplicates, vec!["b"]);
        assert!(rec.missing.is_empty());
        assert!(rec.invented.is_empty());
    }

    #[test]
    fn test_missing_and_invented() {
        let rec = Reconciliation::compute(&set(&["a", "b", "c"]), &["a"], &["d", "e", "f"]);
        assert_eq!(rec.difference(), 1);
        assert_eq!(rec.missing, vec!["b", "c"]);
        assert_eq!(rec.invented, vec!["d", "e", "f"]);
    }
}
