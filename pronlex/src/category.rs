//! 単語の分類

use crate::layout;

/// 入力単語リストの各単語が属する分類
///
/// 各単語はちょうど1つの分類に属します。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// 参照辞書の言語にも対象言語にもなりうる単語
    Ambiguous,
    /// 参照辞書にあっても対象言語として扱う単語
    Excluded,
    /// 手動で発音を作成する単語（略語など）
    Manual,
    /// 参照辞書が見落とした単語
    Missed,
    /// 発音マップが与えられた見落とし語
    MissedMapped,
    /// 参照辞書で発音が見つかった単語
    ReferenceFound,
    /// 参照辞書で発音が見つからなかった単語
    Unresolved,
}

impl Category {
    /// 語彙ファイルのブロック見出しを返します。
    pub fn label(self) -> String {
        match self {
            Self::Ambiguous => format!("{} - supplied ambiguous words", layout::AMBIGUOUS),
            Self::Excluded => format!("{} - supplied words excluded from CMU", layout::EXCLUDE),
            Self::Manual => format!(
                "{} - supplied words to check manually (acronyms etc)",
                layout::MANUAL
            ),
            Self::Missed => format!(
                "{} - supplied words missed by CMU, do these manually",
                layout::MISSED
            ),
            Self::MissedMapped => format!(
                "{} - supplied map of words missed by CMU",
                layout::MISSED_MAP
            ),
            Self::ReferenceFound => "CMU ENG words found".to_string(),
            Self::Unresolved => "CMU did not see these words".to_string(),
        }
    }

    /// 単語リストファイルのブロック見出しを返します。
    ///
    /// 参照辞書で見つかった単語だけが語彙ファイルと異なる見出しを持ちます。
    pub fn wordlist_label(self) -> String {
        match self {
            Self::ReferenceFound => "CMU found these ENG words".to_string(),
            _ => self.label(),
        }
    }
}
