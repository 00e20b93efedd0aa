//! 最長一致による文字から音への変換
//!
//! 未解決の単語を規則表に従って音素列に変換します。
//!
//! 各トークンは小文字に変換してから先頭から走査されます。各位置では、その位置から始まる
//! 最も長い書記素の規則が選ばれ、その音素列が出力されます。一致する規則がない文字は
//! `(c)`の形のプレースホルダーとして出力され、未知文字として記録されます。
//! `#`で始まるトークンはコメントとしてそのまま出力されます。

mod rule;
mod trie;

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::errors::Result;
use crate::layout::TransducerPaths;
use crate::lexicon;
use crate::utils;

pub use crate::transducer::rule::{RuleTable, SoundRule};

/// 変換結果の1単位
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    source: String,
    output: String,
    is_oov: bool,
}

impl Unit {
    /// 消費された（小文字化済みの）書記素を返します。
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 出力される音素列を返します。
    pub fn output(&self) -> &str {
        &self.output
    }

    /// 規則に一致しなかった文字のプレースホルダーかどうかを返します。
    pub fn is_oov(&self) -> bool {
        self.is_oov
    }
}

/// 1トークンの変換結果
///
/// トークン自身と、走査順の出力単位の列からなります。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcription {
    token: String,
    units: Vec<Unit>,
}

impl Transcription {
    /// 元のトークンを返します。
    pub fn token(&self) -> &str {
        &self.token
    }

    /// 出力単位を返します。
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// 音素列の部分だけを空白区切りで返します。
    pub fn pronunciation(&self) -> String {
        self.units
            .iter()
            .map(Unit::output)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 語彙ファイルの1行（トークンと出力単位を空白で連結したもの）として表示します。
impl fmt::Display for Transcription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.token)?;
        for unit in &self.units {
            write!(f, " {}", unit.output)?;
        }
        Ok(())
    }
}

/// 変換器の出力する語彙の1エントリ
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// そのまま出力されるコメント
    Comment(String),
    /// 変換されたトークン
    Transcribed(Transcription),
}

/// 規則表に基づく変換器
pub struct Transducer {
    table: RuleTable,
}

impl Transducer {
    /// 新しい変換器を作成します。
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// 規則表を返します。
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// トークンを変換します。
    ///
    /// # 引数
    ///
    /// * `token` - 変換するトークン。照合にのみ小文字化したものが使われます。
    /// * `oov` - 規則に一致しなかった文字を追加する集合
    pub fn transcribe(&self, token: &str, oov: &mut BTreeSet<char>) -> Transcription {
        let chars: Vec<char> = token.to_lowercase().chars().collect();
        let mut units = vec![];
        let mut cur = 0;
        while cur < chars.len() {
            match self.table.longest_match(&chars[cur..]) {
                Some(rule) => {
                    units.push(Unit {
                        source: rule.grapheme().to_string(),
                        output: rule.phonemes().to_string(),
                        is_oov: false,
                    });
                    cur += rule.num_chars();
                }
                None => {
                    let c = chars[cur];
                    units.push(Unit {
                        source: c.to_string(),
                        output: format!("({c})"),
                        is_oov: true,
                    });
                    oov.insert(c);
                    cur += 1;
                }
            }
        }
        Transcription {
            token: token.to_string(),
            units,
        }
    }

    /// トークンの列を変換します。
    ///
    /// `#`で始まるトークンはコメントとして扱われます。
    pub fn transduce<I, S>(&self, tokens: I) -> Transduction
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Transduction::default();
        for token in tokens {
            let token = token.as_ref();
            if token.starts_with('#') {
                result.entries.push(Entry::Comment(token.to_string()));
            } else {
                let t = self.transcribe(token, &mut result.oov);
                result.entries.push(Entry::Transcribed(t));
            }
        }
        result
    }
}

/// トークン列の変換結果
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transduction {
    entries: Vec<Entry>,
    oov: BTreeSet<char>,
}

impl Transduction {
    /// 入力順のエントリを返します。
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// 規則に一致しなかった文字を返します。
    pub fn oov(&self) -> &BTreeSet<char> {
        &self.oov
    }

    /// 変換されたトークンの数を返します。
    pub fn num_transcribed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Transcribed(_)))
            .count()
    }

    /// 語彙を書き出します。
    ///
    /// 手動マップが与えられた場合は、見出しに続けてその行をそのまま先に書き出します。
    /// コメントの前には空行が2行入ります。
    ///
    /// # 引数
    ///
    /// * `wtr` - 書き込み先
    /// * `manual_map` - 手動マップの行
    pub fn write<W>(&self, mut wtr: W, manual_map: Option<&[String]>) -> Result<()>
    where
        W: Write,
    {
        if let Some(lines) = manual_map {
            wtr.write_all(b"# using supplied manual map \n\n")?;
            for line in lines {
                writeln!(wtr, "{line}")?;
            }
        }
        for entry in &self.entries {
            match entry {
                Entry::Comment(comment) => writeln!(wtr, "\n\n{comment}")?,
                Entry::Transcribed(t) => writeln!(wtr, "{t}")?,
            }
        }
        Ok(())
    }
}

/// 変換ステージ全体の結果
#[derive(Clone, Debug)]
pub struct TransduceReport {
    /// 読み込んだ規則の数
    pub num_rules: usize,
    /// 変換したトークンの数
    pub num_transcribed: usize,
    /// 規則に一致しなかった文字
    pub oov: BTreeSet<char>,
    /// 手動マップが使われたかどうか
    pub manual_map_supplied: bool,
    /// 出力した語彙のエントリ数
    pub lexicon_count: usize,
}

/// トークンファイルを読み込みます。
///
/// 各行の前後の空白が取り除かれ、空行は無視されます。`#`で始まる行もコメントとして残ります。
pub fn read_tokens<P>(path: P) -> Result<Vec<String>>
where
    P: AsRef<Path>,
{
    let mut tokens = vec![];
    for line in BufReader::new(utils::open_required(path)?).lines() {
        let line = line?;
        let token = line.trim();
        if !token.is_empty() {
            tokens.push(token.to_string());
        }
    }
    Ok(tokens)
}

/// 変換ステージを実行します。
///
/// トークンファイルと規則表を読み込んで語彙を書き出し、成功したらトークンファイルを削除します。
///
/// # エラー
///
/// トークンファイルか規則表が存在しない場合は
/// [`PronlexError::FileNotFound`](crate::errors::PronlexError::FileNotFound)を返します。
pub fn run(paths: &TransducerPaths) -> Result<TransduceReport> {
    log::info!("Reading tokens from {}", paths.words.display());
    let tokens = read_tokens(&paths.words)?;

    log::info!("Reading l2s rules from {}", paths.config.display());
    let table = RuleTable::from_path(&paths.config)?;
    let num_rules = table.len();
    if table.is_empty() {
        log::warn!("The rule table is empty; every character will be a placeholder");
    }

    let manual_map = match utils::open_optional(&paths.manual_map)? {
        Some(file) => Some(utils::read_nonblank_lines(file)?),
        None => {
            log::warn!("No manual map supplied, make sure you check the output");
            None
        }
    };

    log::info!("Processing words");
    let transduction = Transducer::new(table).transduce(&tokens);
    if !transduction.oov().is_empty() {
        log::warn!("Unexpected characters: {:?}", transduction.oov());
    }

    log::info!("Writing lexicon to {}", paths.output_file.display());
    if let Some(dir) = paths.output_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    lexicon::write_atomic(&paths.output_file, |wtr| {
        transduction.write(wtr, manual_map.as_deref())
    })?;

    fs::remove_file(&paths.words)?;
    log::debug!("Removed {}", paths.words.display());

    Ok(TransduceReport {
        num_rules,
        num_transcribed: transduction.num_transcribed(),
        oov: transduction.oov,
        manual_map_supplied: manual_map.is_some(),
        lexicon_count: utils::count_entries(&paths.output_file)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transducer(rules: &str) -> Transducer {
        Transducer::new(RuleTable::from_reader(rules.as_bytes()).unwrap())
    }

    #[test]
    fn test_transcribe() {
        let t = transducer("t T\nth T H\nh H\na A\n");
        let mut oov = BTreeSet::new();
        let res = t.transcribe("That", &mut oov);
        assert_eq!(res.to_string(), "That T H A T");
        assert_eq!(res.units()[0].source(), "th");
        assert!(oov.is_empty());
    }

    #[test]
    fn test_transcribe_oov() {
        let t = transducer("a A\n");
        let mut oov = BTreeSet::new();
        let res = t.transcribe("abA", &mut oov);
        assert_eq!(res.pronunciation(), "A (b) A");
        assert!(res.units()[1].is_oov());
        assert_eq!(oov, BTreeSet::from(['b']));
    }

    #[test]
    fn test_transduce_comments() {
        let t = transducer("a A\n");
        let res = t.transduce(["# CMU did not see these words", "aa"]);
        assert_eq!(res.num_transcribed(), 1);
        let mut buf = vec![];
        res.write(&mut buf, None).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\n\n# CMU did not see these words\naa A A\n"
        );
    }

    #[test]
    fn test_write_with_manual_map() {
        let t = transducer("a A\n");
        let res = t.transduce(["a"]);
        let mut buf = vec![];
        let map = vec!["NASA N AE S AH".to_string()];
        res.write(&mut buf, Some(map.as_slice())).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "# using supplied manual map \n\nNASA N AE S AH\na A\n"
        );
    }
}
