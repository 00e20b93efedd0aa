//! 分類モジュール
//!
//! 入力単語リストを参照辞書と上書きリストで分類し、語彙ファイルと単語リストを出力します。
//! 出力後に語数を照合し、その結果と次の作業の案内を表示します。

use std::path::{Path, PathBuf};

use clap::Parser;
use pronlex::classifier::{self, ClassifyReport};
use pronlex::errors::PronlexError;
use pronlex::layout::{self, Layout};
use pronlex::CmuDictionary;

/// 分類コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "classify",
    about = "Splits a wordlist into reference and non-reference lexicons"
)]
pub struct Args {
    /// Directory holding wordlist.txt and the optional override lists.
    #[clap(short = 'i', long, value_name = "DIR", default_value = "input")]
    pub input_dir: PathBuf,

    /// Directory to which the lexicons and wordlists will be output.
    /// Existing .txt files in it are removed first.
    #[clap(short = 'o', long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Reference pronunciation dictionary in the CMU format.
    #[clap(short = 'd', long, value_name = "CMUDICT_PATH")]
    pub dict: PathBuf,
}

/// 分類処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// pronlexライブラリのエラー
    #[error(transparent)]
    Pronlex(#[from] PronlexError),
}

/// 分類コマンドを実行する
///
/// # エラー
///
/// 参照辞書や入力単語リストが存在しない場合、またはファイルの入出力に失敗した場合に
/// `ClassifyError`を返します。
pub fn run(args: Args) -> Result<(), ClassifyError> {
    let layout = Layout::new(args.input_dir, args.output_dir);
    let report = classify(&layout, &args.dict)?;
    print_guidance(&layout, &report);
    Ok(())
}

/// 参照辞書を読み込んで分類ステージを実行し、照合結果を表示する
pub fn classify(layout: &Layout, dict_path: &Path) -> Result<ClassifyReport, PronlexError> {
    println!("Loading the reference dictionary...");
    let dict = CmuDictionary::from_path(dict_path)?;
    log::info!("{} headwords in {}", dict.len(), dict_path.display());

    println!("Classifying {}...", layout.input(layout::WORDLIST).display());
    let report = classifier::run(layout, &dict)?;
    print_report(&report);
    Ok(report)
}

fn print_report(report: &ClassifyReport) {
    for name in &report.absent {
        println!("no {name} file supplied");
    }

    let counts = &report.counts;
    println!(
        "{}, {} words in generated ENG wordlist and lexicon",
        counts.known_words, counts.known_lexicon
    );
    println!(
        "{}, {} words in generated non-ENG wordlist and temp lexicon",
        counts.non_reference_words, counts.non_reference_lexicon
    );
    if counts.non_reference_words != counts.non_reference_lexicon {
        println!("A difference here may be because manual map entries will be added by the transduce stage");
    }

    let rec = &report.reconciliation;
    println!("{} total generated words (ENG + non-ENG)", rec.generated_count());
    println!(
        "{} words in input wordlist, {} unique",
        counts.wordlist, rec.input_count
    );
    if rec.is_consistent() {
        println!("OK, wordlist counts match");
        return;
    }

    println!("Eek! Wordlist counts differ by {}", rec.difference());
    println!("Checking for duplicates");
    for word in &rec.duplicates {
        println!("{word}");
    }
    println!("Checking for missing words");
    if !rec.missing.is_empty() {
        println!("These words are in the input wordlist but missing from the generated files.");
        for word in &rec.missing {
            println!("{word}");
        }
    }
    if !rec.invented.is_empty() {
        println!("These words are in the generated files but not in the input wordlist.");
        for word in &rec.invented {
            println!("{word}");
        }
    }
}

fn print_guidance(layout: &Layout, report: &ClassifyReport) {
    let lexicon_en = layout.output(layout::LEXICON_EN);
    let lexicon_non_eng = layout.output(layout::LEXICON_NON_ENG);

    println!(". . . .");
    println!("Done");
    println!("You now need to build the non-ENG lexicon");
    if report.missed_map_supplied {
        println!(
            "Missing ENG word map was supplied, it has been included in {}",
            lexicon_en.display()
        );
    } else {
        println!(
            "Missing ENG word map was NOT supplied, do it manually in {}",
            lexicon_en.display()
        );
    }
    if report.manual_map_supplied {
        println!(
            "Manual non-ENG word map was supplied, it will be included in {} by the transduce stage",
            lexicon_non_eng.display()
        );
    } else {
        println!(
            "Manual non-ENG word map was NOT supplied, {} will include words to check manually",
            lexicon_non_eng.display()
        );
    }
}
