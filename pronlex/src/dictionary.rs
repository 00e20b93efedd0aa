//! 参照発音辞書
//!
//! 分類器は参照辞書を「単語 → 発音候補の列」という不透明な検索として扱います。
//! [`PronunciationDictionary`]を実装すれば任意の辞書を注入できます。
//! このモジュールはCMU Pronouncing Dictionary形式のファイルを読み込む
//! [`CmuDictionary`]と、テスト用の小さな辞書として使える`HashMap`の実装を提供します。

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use hashbrown::HashMap;
use regex::Regex;

use crate::errors::{PronlexError, Result};
use crate::utils;

/// 1つの発音（音素記号の列）
pub type Pronunciation = Vec<String>;

static STRESS_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

/// 単語から発音候補を引く参照辞書
pub trait PronunciationDictionary {
    /// 単語の発音候補を登録順に返します。
    ///
    /// 検索は大文字と小文字を区別しません。
    ///
    /// # 引数
    ///
    /// * `word` - 検索する単語
    ///
    /// # 戻り値
    ///
    /// 見つかった場合は発音候補のスライス、見つからない場合は`None`
    fn lookup(&self, word: &str) -> Option<&[Pronunciation]>;
}

impl<D> PronunciationDictionary for &D
where
    D: PronunciationDictionary + ?Sized,
{
    fn lookup(&self, word: &str) -> Option<&[Pronunciation]> {
        (**self).lookup(word)
    }
}

/// 小文字のキーを持つマップを辞書として扱います。
impl PronunciationDictionary for HashMap<String, Vec<Pronunciation>> {
    fn lookup(&self, word: &str) -> Option<&[Pronunciation]> {
        self.get(&word.to_lowercase())
            .map(Vec::as_slice)
            .filter(|prons| !prons.is_empty())
    }
}

/// 各音素から強勢を表す数字を取り除きます。
///
/// # 例
///
/// ```
/// # use pronlex::dictionary::strip_stress;
/// let pron = vec!["K".to_string(), "AE1".to_string(), "T".to_string()];
/// assert_eq!(strip_stress(&pron), vec!["K", "AE", "T"]);
/// ```
pub fn strip_stress<S>(phonemes: &[S]) -> Vec<String>
where
    S: AsRef<str>,
{
    phonemes
        .iter()
        .map(|ph| STRESS_MARKER.replace_all(ph.as_ref(), "").into_owned())
        .collect()
}

/// CMU Pronouncing Dictionary形式のファイルから読み込んだ参照辞書
///
/// 各行は`WORD  PH1 PH2 ...`の形式で、`;;;`で始まる行はコメントです。
/// 別の発音は`WORD(2)`のように番号付きで登録され、ファイル中の順に候補として保持されます。
#[derive(Default)]
pub struct CmuDictionary {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl CmuDictionary {
    /// リーダーから辞書を構築します。
    ///
    /// # 引数
    ///
    /// * `rdr` - 辞書ファイルのリーダー
    ///
    /// # エラー
    ///
    /// 発音を持たない行がある場合、[`PronlexError`]が返されます。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut entries: HashMap<String, Vec<Pronunciation>> = HashMap::new();
        for line in BufReader::new(rdr).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let mut cols = line.split_whitespace();
            let Some(head) = cols.next() else {
                continue;
            };
            let phonemes: Pronunciation = cols.map(str::to_string).collect();
            if phonemes.is_empty() {
                let msg = format!("An entry must have at least one phoneme, {line:?}");
                return Err(PronlexError::invalid_format("cmudict", msg));
            }
            entries
                .entry(Self::headword(head).to_lowercase())
                .or_default()
                .push(phonemes);
        }
        log::debug!("Loaded {} headwords from the reference dictionary", entries.len());
        Ok(Self { entries })
    }

    /// ファイルから辞書を構築します。
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

    /// 見出し語の数を返します。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 辞書が空かどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `WORD(2)`のような別発音の番号を取り除きます。
    fn headword(head: &str) -> &str {
        if let Some(stem) = head.strip_suffix(')') {
            if let Some((word, num)) = stem.rsplit_once('(') {
                if !word.is_empty() && !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) {
                    return word;
                }
            }
        }
        head
    }
}

impl PronunciationDictionary for CmuDictionary {
    fn lookup(&self, word: &str) -> Option<&[Pronunciation]> {
        self.entries.get(&word.to_lowercase()).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CMUDICT: &str = ";;; # CMUdict  --  Major Version: 0.07
;;; comment line
CAT  K AE1 T
DOG  D AO1 G
READ  R EH1 D
READ(2)  R IY1 D
(PAREN  P ER0 EH1 N
";

    #[test]
    fn test_cmu_lookup() {
        let dict = CmuDictionary::from_reader(CMUDICT.as_bytes()).unwrap();
        assert_eq!(dict.len(), 4);
        assert_eq!(
            dict.lookup("cat").unwrap(),
            &[vec!["K".to_string(), "AE1".to_string(), "T".to_string()]]
        );
        assert!(dict.lookup("xyzzy").is_none());
    }

    #[test]
    fn test_cmu_lookup_ignores_case() {
        let dict = CmuDictionary::from_reader(CMUDICT.as_bytes()).unwrap();
        assert!(dict.lookup("Dog").is_some());
        assert!(dict.lookup("DOG").is_some());
    }

    #[test]
    fn test_cmu_alternatives_keep_file_order() {
        let dict = CmuDictionary::from_reader(CMUDICT.as_bytes()).unwrap();
        let prons = dict.lookup("read").unwrap();
        assert_eq!(prons.len(), 2);
        assert_eq!(prons[0], vec!["R", "EH1", "D"]);
        assert_eq!(prons[1], vec!["R", "IY1", "D"]);
    }

    #[test]
    fn test_cmu_headword_with_parenthesis() {
        let dict = CmuDictionary::from_reader(CMUDICT.as_bytes()).unwrap();
        assert!(dict.lookup("(paren").is_some());
    }

    #[test]
    fn test_cmu_missing_phonemes() {
        let result = CmuDictionary::from_reader("CAT\n".as_bytes());
        assert!(matches!(result, Err(PronlexError::InvalidFormat(_))));
    }

    #[test]
    fn test_strip_stress() {
        assert_eq!(strip_stress(&["P", "ER0", "EH1", "N"]), vec!["P", "ER", "EH", "N"]);
        assert_eq!(strip_stress::<&str>(&[]), Vec::<String>::new());
    }

    #[test]
    fn test_hashmap_dictionary() {
        let dict = crate::utils::hashmap! {
            "cat".to_string() => vec![vec!["K".to_string(), "AE1".to_string(), "T".to_string()]],
            "empty".to_string() => vec![],
        };
        assert!(dict.lookup("CAT").is_some());
        assert!(dict.lookup("empty").is_none());
    }
}
