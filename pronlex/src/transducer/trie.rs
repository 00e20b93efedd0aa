//! 書記素のダブル配列トライ

use std::collections::BTreeMap;

use crate::errors::{PronlexError, Result};

/// 書記素から規則番号を引くダブル配列トライ
pub struct GraphemeTrie {
    da: crawdad::Trie,
}

impl GraphemeTrie {
    /// 書記素の列からトライを構築します。
    ///
    /// 同じ書記素が複数回現れる場合は、最初に現れたものの番号が使われます。
    ///
    /// # 戻り値
    ///
    /// 書記素が1つもない場合は`Ok(None)`
    pub fn from_graphemes<'a, I>(graphemes: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut records: BTreeMap<&str, u32> = BTreeMap::new();
        for (i, g) in graphemes.into_iter().enumerate() {
            let id = u32::try_from(i)?;
            records.entry(g).or_insert(id);
        }
        if records.is_empty() {
            return Ok(None);
        }
        let da = crawdad::Trie::from_records(records)
            .map_err(|e| PronlexError::invalid_argument("graphemes", e.to_string()))?;
        Ok(Some(Self { da }))
    }

    /// 入力の先頭から一致する書記素を短い順に返すイテレータを取得します。
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = TrieMatch> + 'a {
        self.da
            .common_prefix_search(input.iter().cloned())
            .map(move |(value, end_char)| TrieMatch::new(value, end_char))
    }
}

/// トライマッチング結果
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct TrieMatch {
    pub value: u32,
    pub end_char: usize,
}

impl TrieMatch {
    /// 新しいマッチング結果を作成します。
    #[inline(always)]
    pub const fn new(value: u32, end_char: usize) -> Self {
        Self { value, end_char }
    }
}
