//! 人手で用意された上書きリストの読み込み

use std::path::Path;

use crate::errors::Result;
use crate::layout::{self, Layout};
use crate::utils;

/// 上書きリストとマップ
///
/// どのファイルも任意です。存在しないファイルは空として扱われ、
/// その名前が[`Overrides::absent()`]に記録されます。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    /// 曖昧な単語（整列・重複除去済み）
    pub ambiguous: Vec<String>,

    /// 参照辞書から除外する単語（整列・重複除去済み）
    pub excluded: Vec<String>,

    /// 手動で発音を作成する単語（整列・重複除去済み）
    pub manual: Vec<String>,

    /// 参照辞書が見落とした単語（整列・重複除去済み）
    pub missed: Vec<String>,

    /// 見落とし語の発音マップの行。ファイルの順序のまま保持します。
    ///
    /// 見落とし語のリストがある場合にのみ読み込まれます。
    pub missed_map: Option<Vec<String>>,

    /// 手動マップが与えられたかどうか
    ///
    /// 手動マップの内容は変換ステージが語彙に加えます。
    pub manual_map_supplied: bool,

    pub(crate) absent: Vec<&'static str>,
}

impl Overrides {
    /// 入力ディレクトリから上書きリストを読み込みます。
    ///
    /// # 引数
    ///
    /// * `layout` - ディレクトリ構成
    ///
    /// # エラー
    ///
    /// 存在するファイルの読み込みに失敗した場合にエラーを返します。
    pub fn load(layout: &Layout) -> Result<Self> {
        let mut overrides = Self::default();

        overrides.ambiguous = overrides.load_list(layout, layout::AMBIGUOUS)?;
        overrides.excluded = overrides.load_list(layout, layout::EXCLUDE)?;
        overrides.manual = overrides.load_list(layout, layout::MANUAL)?;
        overrides.missed = overrides.load_list(layout, layout::MISSED)?;

        // The map only supplies pronunciations for words in the missed list.
        let missed_map = layout.input(layout::MISSED_MAP);
        if layout.input(layout::MISSED).is_file() {
            overrides.missed_map = overrides.load_map(&missed_map, layout::MISSED_MAP)?;
        } else if missed_map.is_file() {
            log::warn!(
                "{} ignored because no {} file was supplied",
                layout::MISSED_MAP,
                layout::MISSED
            );
        }

        let manual_map = layout.input(layout::MANUAL_MAP);
        overrides.manual_map_supplied = manual_map.is_file();
        if !overrides.manual_map_supplied {
            overrides.record_absent(layout::MANUAL_MAP);
        }

        Ok(overrides)
    }

    /// 見つからなかったファイルの名前を返します。
    pub fn absent(&self) -> &[&'static str] {
        &self.absent
    }

    /// 単語リストとしての上書きリストの和集合に含まれるかを判定します。
    pub(crate) fn contains(&self, word: &str) -> bool {
        [&self.ambiguous, &self.excluded, &self.manual, &self.missed]
            .into_iter()
            .any(|list| list.binary_search_by(|w| w.as_str().cmp(word)).is_ok())
    }

    /// 整列と重複除去を行い、不変条件を満たす状態にします。
    pub(crate) fn normalize(&mut self) {
        for list in [
            &mut self.ambiguous,
            &mut self.excluded,
            &mut self.manual,
            &mut self.missed,
        ] {
            *list = utils::sorted_unique(std::mem::take(list));
        }
    }

    fn load_list(&mut self, layout: &Layout, name: &'static str) -> Result<Vec<String>> {
        let path = layout.input(name);
        match utils::open_optional(&path)? {
            Some(file) => {
                let words = utils::sorted_unique(utils::read_nonblank_lines(file)?);
                log::debug!("Loaded {} words from {}", words.len(), path.display());
                Ok(words)
            }
            None => {
                self.record_absent(name);
                Ok(vec![])
            }
        }
    }

    fn load_map(&mut self, path: &Path, name: &'static str) -> Result<Option<Vec<String>>> {
        match utils::open_optional(path)? {
            Some(file) => Ok(Some(utils::read_nonblank_lines(file)?)),
            None => {
                self.record_absent(name);
                Ok(None)
            }
        }
    }

    fn record_absent(&mut self, name: &'static str) {
        log::warn!("no {name} file supplied");
        self.absent.push(name);
    }
}
